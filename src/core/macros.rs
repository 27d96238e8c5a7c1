//! Macros for declaring state kind sets.

/// Generate a kind enum and its `StateKind` implementation.
///
/// The enum gets the derives [`StateKind`](crate::core::StateKind)
/// requires (`Copy`, `Eq`, `Hash`, `Debug`, serde) and a `name()` that
/// stringifies each variant.
///
/// # Example
///
/// ```
/// use statecraft::core::StateKind;
/// use statecraft::kind_enum;
///
/// kind_enum! {
///     pub enum Movement {
///         Idle,
///         Walk,
///         Run,
///     }
/// }
///
/// assert_eq!(Movement::Run.name(), "Run");
/// ```
#[macro_export]
macro_rules! kind_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            Debug,
            serde::Serialize,
            serde::Deserialize,
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::StateKind for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
