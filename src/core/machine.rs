//! The state machine: active state, history stack, transition engine.

use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::TransitionError;
use super::factory::StateFactory;
use super::journal::{TransitionCause, TransitionJournal, TransitionRecord};
use super::registry::StateRegistry;
use super::state::{BoxedState, State, StateKind};

/// Serializable view of a machine's observable shape.
///
/// Captures the active kind and the history stack at a point in time.
/// Two machines that would respond identically to the same sequence of
/// transition requests produce equal snapshots.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct MachineSnapshot<K: StateKind> {
    pub current: Option<K>,
    pub history: Vec<K>,
}

/// A hierarchical state machine with a history stack.
///
/// The machine tracks one active kind and a stack of the kinds it came
/// from. Transitions push the former active kind onto the stack so the
/// machine can later unwind through [`change_to_previous`], with two
/// refinements: re-requesting the active kind is free, and requesting the
/// kind on top of the stack swaps places with it instead of pushing, so
/// toggling between two states never grows the stack.
///
/// State instances live in a [`StateRegistry`] keyed by kind. An instance
/// that leaves the active slot stays registered, and returning to its kind
/// re-enters that same instance with whatever it accumulated earlier.
///
/// Lifecycle hooks receive the owner context `O` and never the machine
/// itself, so a hook cannot re-enter the machine mid-transition.
///
/// [`change_to_previous`]: StateMachine::change_to_previous
pub struct StateMachine<K: StateKind, O> {
    id: Uuid,
    registry: StateRegistry<K, O>,
    current: Option<K>,
    history: Vec<K>,
    journal: TransitionJournal<K>,
}

impl<K: StateKind, O> StateMachine<K, O> {
    /// Creates an empty machine whose instances come from `factory`.
    ///
    /// The machine starts with no active state and an empty history; the
    /// first [`change_to`](StateMachine::change_to) activates a state
    /// without recording anything to unwind to.
    pub fn new(factory: StateFactory<K, O>) -> Self {
        Self::with_registry(StateRegistry::new(factory))
    }

    /// Creates an empty machine around an existing registry, keeping any
    /// instances that were installed ahead of time.
    pub fn with_registry(registry: StateRegistry<K, O>) -> Self {
        Self {
            id: Uuid::new_v4(),
            registry,
            current: None,
            history: Vec::new(),
            journal: TransitionJournal::new(),
        }
    }

    /// Unique identifier of this machine, used to tell instances apart
    /// in log output.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The active kind, or `None` before the first transition.
    pub fn current(&self) -> Option<K> {
        self.current
    }

    /// The kind on top of the history stack, i.e. where
    /// [`change_to_previous`](StateMachine::change_to_previous) would go.
    pub fn previous(&self) -> Option<K> {
        self.history.last().copied()
    }

    /// Whether `kind` is the active kind.
    pub fn is_current(&self, kind: K) -> bool {
        self.current == Some(kind)
    }

    /// The history stack, oldest first.
    pub fn history(&self) -> &[K] {
        &self.history
    }

    /// Number of entries on the history stack.
    pub fn depth(&self) -> usize {
        self.history.len()
    }

    /// Shared access to the active state instance.
    pub fn current_state(&self) -> Option<&dyn State<O, Kind = K>> {
        self.current.and_then(|kind| self.registry.get(kind))
    }

    /// The registry of live instances backing this machine.
    pub fn registry(&self) -> &StateRegistry<K, O> {
        &self.registry
    }

    /// Every transition this machine has completed, in order.
    pub fn journal(&self) -> &TransitionJournal<K> {
        &self.journal
    }

    /// Captures the machine's observable shape.
    pub fn snapshot(&self) -> MachineSnapshot<K> {
        MachineSnapshot {
            current: self.current,
            history: self.history.clone(),
        }
    }

    /// Transitions to `kind`, resolving the instance through the factory.
    ///
    /// Exactly one of the following happens:
    ///
    /// * no state is active yet: `kind` becomes current and is entered,
    ///   with nothing pushed onto the history stack;
    /// * `kind` is already current: nothing runs and nothing is recorded;
    /// * `kind` sits on top of the history stack: current and the top
    ///   entry exchange places, leaving the stack the same size;
    /// * otherwise: current is exited and pushed, `kind` is entered.
    ///
    /// Fails with [`TransitionError::InvalidTarget`] or
    /// [`TransitionError::KindMismatch`] when the factory cannot produce
    /// a usable instance; the machine is untouched and no hook has run.
    pub fn change_to(&mut self, kind: K, owner: &mut O) -> Result<K, TransitionError<K>> {
        self.registry.resolve(kind)?;
        Ok(self.apply_change(kind, owner))
    }

    /// Transitions to an externally constructed instance.
    ///
    /// The instance is registered under its own kind, dropping any stale
    /// instance of that kind first, and the transition then proceeds
    /// exactly as [`change_to`](StateMachine::change_to) would. Note that
    /// if the instance's kind is already current, the replacement is
    /// registered but no hook runs.
    pub fn change_to_state(&mut self, state: BoxedState<K, O>, owner: &mut O) -> K {
        let kind = self.registry.install(state);
        self.apply_change(kind, owner)
    }

    /// Unwinds one entry: pops the top of the history stack and makes it
    /// current again.
    ///
    /// Fails with [`TransitionError::EmptyHistory`] when there is nothing
    /// to unwind to; the active state is left as it was.
    pub fn change_to_previous(&mut self, owner: &mut O) -> Result<K, TransitionError<K>> {
        match self.unwind_one(owner) {
            Some(kind) => Ok(kind),
            None => {
                log::warn!(
                    "machine {}: cannot change to previous state, history is empty",
                    self.id
                );
                Err(TransitionError::EmptyHistory)
            }
        }
    }

    /// Replaces the active state with `kind` without recording the
    /// replaced state in history.
    ///
    /// When `kind` is exactly the top of the history stack the call
    /// behaves as [`change_to_previous`](StateMachine::change_to_previous)
    /// instead, so the stack never gains an entry for a kind it already
    /// holds in that slot. Unlike [`change_to`](StateMachine::change_to),
    /// substituting the active kind exits and re-enters it.
    pub fn substitute(&mut self, kind: K, owner: &mut O) -> Result<K, TransitionError<K>> {
        self.registry.resolve(kind)?;
        Ok(self.apply_substitute(kind, owner))
    }

    /// Replaces the active state with an externally constructed instance,
    /// without recording the replaced state in history.
    pub fn substitute_state(&mut self, state: BoxedState<K, O>, owner: &mut O) -> K {
        let kind = self.registry.install(state);
        self.apply_substitute(kind, owner)
    }

    /// Forwards a frame update to the active state, if any.
    pub fn tick(&mut self, owner: &mut O) {
        let Some(kind) = self.current else {
            return;
        };
        if let Some(state) = self.registry.get_mut(kind) {
            state.update(owner);
        }
    }

    /// Forwards a fixed-rate update to the active state, if any.
    pub fn fixed_tick(&mut self, owner: &mut O) {
        let Some(kind) = self.current else {
            return;
        };
        if let Some(state) = self.registry.get_mut(kind) {
            state.fixed_update(owner);
        }
    }

    /// Exits the active state and drops every live instance.
    ///
    /// The journal is kept, so a shut-down machine still answers what
    /// happened. Dropping the machine without calling this runs no exit
    /// hook, since the owner context is not available at drop time.
    pub fn shutdown(&mut self, owner: &mut O) {
        if let Some(current) = self.current.take() {
            self.run_exit(current, owner);
        }
        self.history.clear();
        self.registry.clear();
        log::debug!("machine {}: shut down", self.id);
    }

    fn apply_change(&mut self, kind: K, owner: &mut O) -> K {
        let Some(current) = self.current else {
            self.current = Some(kind);
            self.run_enter(kind, owner);
            self.record(None, kind, TransitionCause::Initial);
            return kind;
        };

        if current == kind {
            return kind;
        }

        if self.history.last() == Some(&kind) {
            // Exchange with the top of the stack instead of pushing, so
            // toggling between two kinds keeps the stack the same size.
            self.run_exit(current, owner);
            self.history.pop();
            self.history.push(current);
            self.current = Some(kind);
            self.run_enter(kind, owner);
            self.record(Some(current), kind, TransitionCause::Swap);
            return kind;
        }

        self.run_exit(current, owner);
        self.history.push(current);
        self.current = Some(kind);
        self.run_enter(kind, owner);
        self.record(Some(current), kind, TransitionCause::Push);
        kind
    }

    fn apply_substitute(&mut self, kind: K, owner: &mut O) -> K {
        if self.history.last() == Some(&kind) {
            // The target is one unwind away; popping keeps the stack
            // honest instead of leaving a duplicate entry behind.
            if let Some(previous) = self.unwind_one(owner) {
                return previous;
            }
        }

        let from = self.current;
        if let Some(current) = self.current {
            self.run_exit(current, owner);
        }
        self.current = Some(kind);
        self.run_enter(kind, owner);
        self.record(from, kind, TransitionCause::Substitute);
        kind
    }

    fn unwind_one(&mut self, owner: &mut O) -> Option<K> {
        let kind = self.history.pop()?;
        let from = self.current;
        if let Some(current) = self.current {
            self.run_exit(current, owner);
        }
        self.current = Some(kind);
        self.run_enter(kind, owner);
        self.record(from, kind, TransitionCause::Pop);
        Some(kind)
    }

    fn run_enter(&mut self, kind: K, owner: &mut O) {
        log::debug!("machine {}: entering {}", self.id, kind.name());
        if let Some(state) = self.registry.get_mut(kind) {
            state.on_enter(owner);
        }
    }

    fn run_exit(&mut self, kind: K, owner: &mut O) {
        log::debug!("machine {}: exiting {}", self.id, kind.name());
        if let Some(state) = self.registry.get_mut(kind) {
            state.on_exit(owner);
        }
    }

    fn record(&mut self, from: Option<K>, to: K, cause: TransitionCause) {
        self.journal.record(TransitionRecord {
            from,
            to,
            cause,
            timestamp: Utc::now(),
        });
    }
}

impl<K: StateKind, O> fmt::Debug for StateMachine<K, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("id", &self.id)
            .field("current", &self.current)
            .field("history", &self.history)
            .field("live_states", &self.registry.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind_enum;
    use std::sync::{Arc, Mutex};

    kind_enum! {
        enum TestKind {
            Idle,
            Walk,
            Run,
            Jump,
        }
    }

    type Events = Arc<Mutex<Vec<String>>>;

    struct World {
        events: Events,
    }

    struct Traced {
        kind: TestKind,
        events: Events,
    }

    impl State<World> for Traced {
        type Kind = TestKind;

        fn kind(&self) -> TestKind {
            self.kind
        }

        fn on_enter(&mut self, world: &mut World) {
            world
                .events
                .lock()
                .unwrap()
                .push(format!("enter {}", self.kind.name()));
        }

        fn on_exit(&mut self, world: &mut World) {
            world
                .events
                .lock()
                .unwrap()
                .push(format!("exit {}", self.kind.name()));
        }

        fn update(&mut self, world: &mut World) {
            world
                .events
                .lock()
                .unwrap()
                .push(format!("update {}", self.kind.name()));
        }

        fn fixed_update(&mut self, world: &mut World) {
            world
                .events
                .lock()
                .unwrap()
                .push(format!("fixed {}", self.kind.name()));
        }
    }

    impl Drop for Traced {
        fn drop(&mut self) {
            self.events
                .lock()
                .unwrap()
                .push(format!("drop {}", self.kind.name()));
        }
    }

    fn traced(kind: TestKind, events: &Events) -> BoxedState<TestKind, World> {
        Traced {
            kind,
            events: Arc::clone(events),
        }
        .boxed()
    }

    fn machine(events: &Events) -> StateMachine<TestKind, World> {
        let events = Arc::clone(events);
        StateMachine::new(StateFactory::new(move |kind| {
            Some(
                Traced {
                    kind,
                    events: Arc::clone(&events),
                }
                .boxed(),
            )
        }))
    }

    fn world(events: &Events) -> World {
        World {
            events: Arc::clone(events),
        }
    }

    fn take(events: &Events) -> Vec<String> {
        std::mem::take(&mut *events.lock().unwrap())
    }

    #[test]
    fn first_transition_sets_current_without_push() {
        let events = Events::default();
        let mut machine = machine(&events);
        let mut world = world(&events);

        let entered = machine.change_to(TestKind::Idle, &mut world).unwrap();

        assert_eq!(entered, TestKind::Idle);
        assert_eq!(machine.current(), Some(TestKind::Idle));
        assert!(machine.history().is_empty());
        assert_eq!(take(&events), vec!["enter Idle"]);

        let record = machine.journal().last().unwrap();
        assert_eq!(record.from, None);
        assert_eq!(record.to, TestKind::Idle);
        assert_eq!(record.cause, TransitionCause::Initial);
    }

    #[test]
    fn requesting_the_active_kind_is_free() {
        let events = Events::default();
        let mut machine = machine(&events);
        let mut world = world(&events);

        machine.change_to(TestKind::Idle, &mut world).unwrap();
        take(&events);

        for _ in 0..3 {
            let entered = machine.change_to(TestKind::Idle, &mut world).unwrap();
            assert_eq!(entered, TestKind::Idle);
        }

        assert!(take(&events).is_empty());
        assert!(machine.history().is_empty());
        assert_eq!(machine.journal().len(), 1);
    }

    #[test]
    fn general_transition_pushes_former_current() {
        let events = Events::default();
        let mut machine = machine(&events);
        let mut world = world(&events);

        machine.change_to(TestKind::Idle, &mut world).unwrap();
        machine.change_to(TestKind::Walk, &mut world).unwrap();

        assert_eq!(machine.current(), Some(TestKind::Walk));
        assert_eq!(machine.history(), &[TestKind::Idle]);
        assert_eq!(machine.previous(), Some(TestKind::Idle));
        assert_eq!(take(&events), vec!["enter Idle", "exit Idle", "enter Walk"]);
        assert_eq!(
            machine.journal().last().unwrap().cause,
            TransitionCause::Push
        );
    }

    #[test]
    fn requesting_the_previous_kind_swaps_instead_of_pushing() {
        let events = Events::default();
        let mut machine = machine(&events);
        let mut world = world(&events);

        machine.change_to(TestKind::Idle, &mut world).unwrap();
        machine.change_to(TestKind::Walk, &mut world).unwrap();
        take(&events);

        machine.change_to(TestKind::Idle, &mut world).unwrap();

        assert_eq!(machine.current(), Some(TestKind::Idle));
        assert_eq!(machine.history(), &[TestKind::Walk]);
        assert_eq!(machine.depth(), 1);
        assert_eq!(take(&events), vec!["exit Walk", "enter Idle"]);
        assert_eq!(
            machine.journal().last().unwrap().cause,
            TransitionCause::Swap
        );
    }

    #[test]
    fn change_to_previous_pops_the_stack() {
        let events = Events::default();
        let mut machine = machine(&events);
        let mut world = world(&events);

        machine.change_to(TestKind::Idle, &mut world).unwrap();
        machine.change_to(TestKind::Walk, &mut world).unwrap();
        take(&events);

        let restored = machine.change_to_previous(&mut world).unwrap();

        assert_eq!(restored, TestKind::Idle);
        assert_eq!(machine.current(), Some(TestKind::Idle));
        assert!(machine.history().is_empty());
        assert_eq!(take(&events), vec!["exit Walk", "enter Idle"]);
        assert_eq!(
            machine.journal().last().unwrap().cause,
            TransitionCause::Pop
        );
    }

    #[test]
    fn change_to_previous_on_empty_history_errs() {
        let events = Events::default();
        let mut machine = machine(&events);
        let mut world = world(&events);

        // Before any transition at all.
        assert_eq!(
            machine.change_to_previous(&mut world),
            Err(TransitionError::EmptyHistory)
        );
        assert_eq!(machine.current(), None);

        // With an active state but nothing stacked beneath it.
        machine.change_to(TestKind::Idle, &mut world).unwrap();
        take(&events);
        let before = machine.snapshot();

        assert_eq!(
            machine.change_to_previous(&mut world),
            Err(TransitionError::EmptyHistory)
        );
        assert_eq!(machine.snapshot(), before);
        assert!(take(&events).is_empty());
    }

    #[test]
    fn substitute_replaces_without_recording() {
        let events = Events::default();
        let mut machine = machine(&events);
        let mut world = world(&events);

        machine.change_to(TestKind::Idle, &mut world).unwrap();
        machine.change_to(TestKind::Walk, &mut world).unwrap();
        take(&events);

        machine.substitute(TestKind::Run, &mut world).unwrap();

        assert_eq!(machine.current(), Some(TestKind::Run));
        assert_eq!(machine.history(), &[TestKind::Idle]);
        assert_eq!(take(&events), vec!["exit Walk", "enter Run"]);
        assert_eq!(
            machine.journal().last().unwrap().cause,
            TransitionCause::Substitute
        );

        // Unwinding skips the replaced state entirely.
        let restored = machine.change_to_previous(&mut world).unwrap();
        assert_eq!(restored, TestKind::Idle);
    }

    #[test]
    fn substitute_delegates_when_target_is_previous() {
        let events = Events::default();
        let mut machine = machine(&events);
        let mut world = world(&events);

        machine.change_to(TestKind::Idle, &mut world).unwrap();
        machine.change_to(TestKind::Walk, &mut world).unwrap();
        take(&events);

        let restored = machine.substitute(TestKind::Idle, &mut world).unwrap();

        assert_eq!(restored, TestKind::Idle);
        assert!(machine.history().is_empty());
        assert_eq!(take(&events), vec!["exit Walk", "enter Idle"]);
        assert_eq!(
            machine.journal().last().unwrap().cause,
            TransitionCause::Pop
        );
    }

    #[test]
    fn substitute_restarts_the_active_kind() {
        let events = Events::default();
        let mut machine = machine(&events);
        let mut world = world(&events);

        machine.change_to(TestKind::Idle, &mut world).unwrap();
        machine.change_to(TestKind::Walk, &mut world).unwrap();
        take(&events);

        machine.substitute(TestKind::Walk, &mut world).unwrap();

        assert_eq!(machine.current(), Some(TestKind::Walk));
        assert_eq!(machine.history(), &[TestKind::Idle]);
        assert_eq!(take(&events), vec!["exit Walk", "enter Walk"]);
    }

    #[test]
    fn substitute_works_as_first_transition() {
        let events = Events::default();
        let mut machine = machine(&events);
        let mut world = world(&events);

        machine.substitute(TestKind::Idle, &mut world).unwrap();

        assert_eq!(machine.current(), Some(TestKind::Idle));
        assert!(machine.history().is_empty());
        assert_eq!(take(&events), vec!["enter Idle"]);

        let record = machine.journal().last().unwrap();
        assert_eq!(record.from, None);
        assert_eq!(record.cause, TransitionCause::Substitute);
    }

    #[test]
    fn tick_dispatches_to_the_active_state_only() {
        let events = Events::default();
        let mut machine = machine(&events);
        let mut world = world(&events);

        machine.tick(&mut world);
        machine.fixed_tick(&mut world);
        assert!(take(&events).is_empty());

        machine.change_to(TestKind::Walk, &mut world).unwrap();
        take(&events);

        machine.tick(&mut world);
        machine.fixed_tick(&mut world);
        assert_eq!(take(&events), vec!["update Walk", "fixed Walk"]);
    }

    #[test]
    fn change_to_state_installs_the_supplied_instance() {
        let events = Events::default();
        let mut machine = machine(&events);
        let mut world = world(&events);

        let entered = machine.change_to_state(traced(TestKind::Walk, &events), &mut world);

        assert_eq!(entered, TestKind::Walk);
        assert_eq!(machine.current(), Some(TestKind::Walk));
        assert_eq!(take(&events), vec!["enter Walk"]);
    }

    #[test]
    fn duplicate_install_reclaims_the_stale_instance() {
        let events = Events::default();
        let mut machine = machine(&events);
        let mut world = world(&events);

        machine.change_to_state(traced(TestKind::Walk, &events), &mut world);
        machine.change_to(TestKind::Idle, &mut world).unwrap();
        take(&events);

        // The old Walk instance is dropped before the new one is entered.
        machine.change_to_state(traced(TestKind::Walk, &events), &mut world);

        assert_eq!(take(&events), vec!["drop Walk", "exit Idle", "enter Walk"]);
        assert_eq!(machine.current(), Some(TestKind::Walk));
        assert_eq!(machine.history(), &[TestKind::Idle]);
    }

    #[test]
    fn installing_over_the_active_kind_runs_no_hooks() {
        let events = Events::default();
        let mut machine = machine(&events);
        let mut world = world(&events);

        machine.change_to(TestKind::Walk, &mut world).unwrap();
        let journal_len = machine.journal().len();
        take(&events);

        let entered = machine.change_to_state(traced(TestKind::Walk, &events), &mut world);

        assert_eq!(entered, TestKind::Walk);
        assert_eq!(machine.current(), Some(TestKind::Walk));
        assert_eq!(take(&events), vec!["drop Walk"]);
        assert_eq!(machine.journal().len(), journal_len);
    }

    #[test]
    fn rejected_target_leaves_the_machine_untouched() {
        let events = Events::default();
        let sink = Arc::clone(&events);
        let mut machine: StateMachine<TestKind, World> =
            StateMachine::new(StateFactory::new(move |kind| match kind {
                TestKind::Jump => None,
                _ => Some(
                    Traced {
                        kind,
                        events: Arc::clone(&sink),
                    }
                    .boxed(),
                ),
            }));
        let mut world = world(&events);

        machine.change_to(TestKind::Idle, &mut world).unwrap();
        take(&events);
        let before = machine.snapshot();

        let err = machine.change_to(TestKind::Jump, &mut world).unwrap_err();

        assert_eq!(err, TransitionError::InvalidTarget(TestKind::Jump));
        assert_eq!(machine.snapshot(), before);
        assert!(take(&events).is_empty());
        assert_eq!(machine.journal().len(), 1);
        assert!(!machine.registry().contains(TestKind::Jump));
    }

    #[test]
    fn mismatched_factory_output_is_rejected() {
        let events = Events::default();
        let sink = Arc::clone(&events);
        let mut machine: StateMachine<TestKind, World> =
            StateMachine::new(StateFactory::new(move |_| {
                Some(
                    Traced {
                        kind: TestKind::Idle,
                        events: Arc::clone(&sink),
                    }
                    .boxed(),
                )
            }));
        let mut world = world(&events);

        let err = machine.change_to(TestKind::Walk, &mut world).unwrap_err();

        assert_eq!(
            err,
            TransitionError::KindMismatch {
                requested: TestKind::Walk,
                actual: TestKind::Idle,
            }
        );
        assert_eq!(machine.current(), None);
    }

    #[test]
    fn parked_instances_are_reused_not_rebuilt() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let events = Events::default();
        let sink = Arc::clone(&events);
        let built = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&built);
        let mut machine: StateMachine<TestKind, World> =
            StateMachine::new(StateFactory::new(move |kind| {
                counter.fetch_add(1, Ordering::SeqCst);
                Some(
                    Traced {
                        kind,
                        events: Arc::clone(&sink),
                    }
                    .boxed(),
                )
            }));
        let mut world = world(&events);

        machine.change_to(TestKind::Idle, &mut world).unwrap();
        machine.change_to(TestKind::Walk, &mut world).unwrap();
        machine.change_to_previous(&mut world).unwrap();
        machine.change_to(TestKind::Walk, &mut world).unwrap();

        assert_eq!(built.load(Ordering::SeqCst), 2);
        assert_eq!(machine.registry().len(), 2);
        assert!(!take(&events).contains(&"drop Walk".to_string()));
    }

    #[test]
    fn shutdown_exits_current_and_drops_instances() {
        let events = Events::default();
        let mut machine = machine(&events);
        let mut world = world(&events);

        machine.change_to(TestKind::Idle, &mut world).unwrap();
        machine.change_to(TestKind::Walk, &mut world).unwrap();
        take(&events);

        machine.shutdown(&mut world);

        let trace = take(&events);
        assert_eq!(trace[0], "exit Walk");
        assert!(trace.contains(&"drop Idle".to_string()));
        assert!(trace.contains(&"drop Walk".to_string()));
        assert_eq!(machine.current(), None);
        assert!(machine.history().is_empty());
        assert!(machine.registry().is_empty());
        assert_eq!(machine.journal().len(), 2);
    }

    #[test]
    fn current_state_peeks_at_the_active_instance() {
        let events = Events::default();
        let mut machine = machine(&events);
        let mut world = world(&events);

        assert!(machine.current_state().is_none());

        machine.change_to(TestKind::Run, &mut world).unwrap();
        assert_eq!(machine.current_state().unwrap().kind(), TestKind::Run);
    }

    #[test]
    fn prewarmed_registry_is_honored() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let events = Events::default();
        let sink = Arc::clone(&events);
        let built = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&built);
        let factory = StateFactory::new(move |kind| {
            counter.fetch_add(1, Ordering::SeqCst);
            Some(
                Traced {
                    kind,
                    events: Arc::clone(&sink),
                }
                .boxed(),
            )
        });
        let mut registry = StateRegistry::new(factory);
        registry.install(traced(TestKind::Idle, &events));

        let mut machine = StateMachine::with_registry(registry);
        let mut world = world(&events);

        machine.change_to(TestKind::Idle, &mut world).unwrap();
        assert_eq!(built.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn debug_output_shows_the_machine_shape() {
        let events = Events::default();
        let mut machine = machine(&events);
        let mut world = world(&events);
        machine.change_to(TestKind::Idle, &mut world).unwrap();

        let rendered = format!("{machine:?}");
        assert!(rendered.contains("StateMachine"));
        assert!(rendered.contains("Idle"));
    }
}
