//! Transition journal.
//!
//! An append-only, timestamped record of every transition a machine
//! completes. The journal is observational: it is distinct from the
//! machine's history stack (the undo path) and never influences
//! transition decisions. Rejected transitions and self-transition
//! no-ops leave no record.

use super::state::StateKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which transition policy produced a record.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum TransitionCause {
    /// First assignment; no prior state existed.
    Initial,
    /// Ordinary push-down transition; the prior state went onto history.
    Push,
    /// Target matched the history top; current and top exchanged places.
    Swap,
    /// Unwound to the previous state; one entry left history.
    Pop,
    /// In-place replacement; the prior state was not recorded in history.
    Substitute,
}

/// Record of a single completed transition.
///
/// # Example
///
/// ```rust
/// use statecraft::core::{TransitionCause, TransitionRecord};
/// use statecraft::kind_enum;
/// use chrono::Utc;
///
/// kind_enum! {
///     enum Movement {
///         Idle,
///         Walk,
///     }
/// }
///
/// let record = TransitionRecord {
///     from: Some(Movement::Idle),
///     to: Movement::Walk,
///     cause: TransitionCause::Push,
///     timestamp: Utc::now(),
/// };
///
/// assert_eq!(record.to, Movement::Walk);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionRecord<K: StateKind> {
    /// The state that was current before the transition, if any.
    pub from: Option<K>,
    /// The state that became current.
    pub to: K,
    /// The policy that handled the transition.
    pub cause: TransitionCause,
    /// When the transition completed.
    pub timestamp: DateTime<Utc>,
}

/// Ordered journal of completed transitions.
///
/// # Example
///
/// ```rust
/// use statecraft::core::{TransitionCause, TransitionJournal, TransitionRecord};
/// use statecraft::kind_enum;
/// use chrono::Utc;
///
/// kind_enum! {
///     enum Movement {
///         Idle,
///         Walk,
///     }
/// }
///
/// let mut journal = TransitionJournal::new();
///
/// journal.record(TransitionRecord {
///     from: None,
///     to: Movement::Idle,
///     cause: TransitionCause::Initial,
///     timestamp: Utc::now(),
/// });
///
/// journal.record(TransitionRecord {
///     from: Some(Movement::Idle),
///     to: Movement::Walk,
///     cause: TransitionCause::Push,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(journal.len(), 2);
/// assert_eq!(journal.visited(), vec![Movement::Idle, Movement::Walk]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionJournal<K: StateKind> {
    records: Vec<TransitionRecord<K>>,
}

impl<K: StateKind> Default for TransitionJournal<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: StateKind> TransitionJournal<K> {
    /// Create a new empty journal.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Append a completed transition.
    pub fn record(&mut self, record: TransitionRecord<K>) {
        self.records.push(record);
    }

    /// All records, oldest first.
    pub fn records(&self) -> &[TransitionRecord<K>] {
        &self.records
    }

    /// The most recent record, if any.
    pub fn last(&self) -> Option<&TransitionRecord<K>> {
        self.records.last()
    }

    /// Number of recorded transitions.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no transition has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The path of kinds the machine moved through.
    ///
    /// Starts at the first record's origin (when one existed) and then
    /// follows each record's destination, in order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use statecraft::core::{TransitionCause, TransitionJournal, TransitionRecord};
    /// use statecraft::kind_enum;
    /// use chrono::Utc;
    ///
    /// kind_enum! {
    ///     enum Phase {
    ///         One,
    ///         Two,
    ///         Three,
    ///     }
    /// }
    ///
    /// let mut journal = TransitionJournal::new();
    ///
    /// journal.record(TransitionRecord {
    ///     from: Some(Phase::One),
    ///     to: Phase::Two,
    ///     cause: TransitionCause::Push,
    ///     timestamp: Utc::now(),
    /// });
    ///
    /// journal.record(TransitionRecord {
    ///     from: Some(Phase::Two),
    ///     to: Phase::Three,
    ///     cause: TransitionCause::Push,
    ///     timestamp: Utc::now(),
    /// });
    ///
    /// assert_eq!(journal.visited(), vec![Phase::One, Phase::Two, Phase::Three]);
    /// ```
    pub fn visited(&self) -> Vec<K> {
        let mut path = Vec::new();
        if let Some(first) = self.records.first() {
            if let Some(from) = first.from {
                path.push(from);
            }
        }
        for record in &self.records {
            path.push(record.to);
        }
        path
    }

    /// Elapsed time from the first to the last recorded transition.
    ///
    /// Returns `None` while the journal is empty.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.records.first(), self.records.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }
}
