use super::{command::Command, event::Event};
use crate::traits::MealyMachine;

// ─── Steps ──────────────────────────────────────────────────────────────────

/// One unit of work in the probe workflow. Exactly one runs per idle tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Step {
    Setup,
    RegisterApps,
    PrintApplications,
    Teardown,
}

impl Step {
    pub const WORKFLOW: [Step; 4] = [
        Step::Setup,
        Step::RegisterApps,
        Step::PrintApplications,
        Step::Teardown,
    ];

    /// The step that follows this one, or `None` when nothing is chained.
    pub fn next(self) -> Option<Step> {
        match self {
            Step::Setup => Some(Step::RegisterApps),
            Step::RegisterApps => Some(Step::PrintApplications),
            Step::PrintApplications => Some(Step::Teardown),
            Step::Teardown => None,
        }
    }

    /// Side effect performed while this step runs.
    ///
    /// `RegisterApps` deliberately issues nothing: what registering
    /// applications with the registry should do is undefined, so the step
    /// only advances the workflow.
    pub fn command(self) -> Option<Command> {
        match self {
            Step::Setup => Some(Command::BindRegistryRoot),
            Step::RegisterApps => None,
            Step::PrintApplications => Some(Command::ListApplications),
            Step::Teardown => Some(Command::StopLoop),
        }
    }
}

// ─── State ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepState {
    pub current: Step,
    pub finished: bool,
}

impl Default for StepState {
    fn default() -> Self {
        Self::new()
    }
}

impl StepState {
    pub fn new() -> Self {
        Self {
            current: Step::Setup,
            finished: false,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn run_current(mut self) -> (Self, Vec<Command>) {
        let step = self.current;
        let commands = step.command().into_iter().collect();
        // A step with nothing chained falls through to teardown; teardown
        // itself finishes the machine and stays parked there.
        self.finished = step == Step::Teardown;
        self.current = step.next().unwrap_or(Step::Teardown);
        (self, commands)
    }
}

impl MealyMachine for StepState {
    type Event = Event;
    type Command = Command;

    fn transition(mut self, event: Event) -> (Self, Vec<Command>) {
        match (self.finished, event) {
            (true, _) => (self, Vec::new()),
            (false, Event::IdleTick) => self.run_current(),
            (false, Event::ShutdownRequested) => {
                self.current = Step::Teardown;
                (self, Vec::new())
            }
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::test_utils::{arb_event, arb_step};

    fn run_ticks(mut state: StepState, ticks: usize) -> (StepState, Vec<Command>) {
        let mut all = Vec::new();
        for _ in 0..ticks {
            let (next, commands) = state.transition(Event::IdleTick);
            state = next;
            all.extend(commands);
        }
        (state, all)
    }

    #[test]
    fn initial_state_is_setup() {
        let state = StepState::new();
        assert_eq!(state.current, Step::Setup);
        assert!(!state.is_finished());
    }

    #[test]
    fn workflow_runs_in_table_order() {
        let mut state = StepState::new();
        let mut seen = Vec::new();
        while !state.is_finished() {
            seen.push(state.current);
            state = state.transition(Event::IdleTick).0;
        }
        assert_eq!(seen, Step::WORKFLOW);
    }

    #[test]
    fn each_step_emits_its_command() {
        let (state, commands) = run_ticks(StepState::new(), 4);
        assert!(state.is_finished());
        assert_eq!(
            commands,
            [
                Command::BindRegistryRoot,
                Command::ListApplications,
                Command::StopLoop
            ]
        );
    }

    #[test]
    fn register_apps_is_a_silent_step() {
        let state = StepState {
            current: Step::RegisterApps,
            finished: false,
        };
        let (state, commands) = state.transition(Event::IdleTick);
        assert!(commands.is_empty());
        assert_eq!(state.current, Step::PrintApplications);
    }

    #[test]
    fn step_names_are_snake_case() {
        assert_eq!(Step::PrintApplications.to_string(), "print_applications");
        assert_eq!(Step::RegisterApps.to_string(), "register_apps");
    }

    proptest! {
        #[test]
        fn every_chain_ends_in_teardown(step in arb_step()) {
            let mut current = step;
            let mut hops = 0;
            while let Some(next) = current.next() {
                current = next;
                hops += 1;
                prop_assert!(hops <= Step::WORKFLOW.len());
            }
            prop_assert_eq!(current, Step::Teardown);
        }

        #[test]
        fn extra_ticks_after_teardown_do_nothing(extra in 0usize..16) {
            let (state, commands) = run_ticks(StepState::new(), 4 + extra);
            prop_assert!(state.is_finished());
            prop_assert_eq!(state.current, Step::Teardown);
            prop_assert_eq!(commands.len(), 3);
        }

        #[test]
        fn stop_is_issued_at_most_once(events in prop::collection::vec(arb_event(), 0..32)) {
            let mut state = StepState::new();
            let mut stops = 0;
            let mut lists = 0;
            for event in events {
                let (next, commands) = state.transition(event);
                state = next;
                stops += commands.iter().filter(|c| **c == Command::StopLoop).count();
                lists += commands.iter().filter(|c| **c == Command::ListApplications).count();
            }
            prop_assert!(stops <= 1);
            prop_assert!(lists <= 1);
            prop_assert_eq!(stops == 1, state.is_finished());
        }

        #[test]
        fn shutdown_skips_to_teardown(step in arb_step()) {
            let state = StepState { current: step, finished: false };
            let (state, commands) = state.transition(Event::ShutdownRequested);
            prop_assert!(commands.is_empty());
            prop_assert_eq!(state.current, Step::Teardown);

            let (state, commands) = state.transition(Event::IdleTick);
            prop_assert_eq!(commands, vec![Command::StopLoop]);
            prop_assert!(state.is_finished());
        }

        #[test]
        fn finished_machine_absorbs_every_event(event in arb_event()) {
            let (state, _) = run_ticks(StepState::new(), 4);
            let (after, commands) = state.clone().transition(event);
            prop_assert!(commands.is_empty());
            prop_assert_eq!(after, state);
        }
    }
}
