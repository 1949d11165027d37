use std::io::Write;

use super::execute::{ExecutionContext, ProbeError, execute_commands};
use crate::{
    event_loop::{IdleHandler, StopHandle},
    state::{Event, Step, StepState},
    traits::{MealyMachine, RegistryConnection},
};

/// Drives the probe workflow one step per idle tick.
///
/// Owns the registry connection for the whole run. The only handle it holds
/// on the loop is a [`StopHandle`], fired by the teardown step.
pub struct IdleStateMachine<C: RegistryConnection, W> {
    state: StepState,
    ctx: ExecutionContext<C, W>,
    interrupt: Option<StopHandle>,
    interrupt_seen: bool,
    executed: Vec<Step>,
}

impl<C: RegistryConnection, W: Write> IdleStateMachine<C, W> {
    pub fn new(connection: C, stop: StopHandle, out: W) -> Self {
        Self {
            state: StepState::new(),
            ctx: ExecutionContext {
                connection,
                root: None,
                stop,
                out,
            },
            interrupt: None,
            interrupt_seen: false,
            executed: Vec::new(),
        }
    }

    /// Once `interrupt` fires, the next tick runs teardown instead of the
    /// remaining steps.
    pub fn with_interrupt(mut self, interrupt: StopHandle) -> Self {
        self.interrupt = Some(interrupt);
        self
    }

    pub fn current_step(&self) -> Step {
        self.state.current
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Steps run so far, in order.
    pub fn executed(&self) -> &[Step] {
        &self.executed
    }

    pub fn into_output(self) -> W {
        self.ctx.out
    }

    fn deliver_interrupt(&mut self) {
        let fired = self.interrupt.as_ref().is_some_and(StopHandle::is_stopped);
        if !fired || self.interrupt_seen {
            return;
        }
        self.interrupt_seen = true;
        tracing::info!(skipped = %self.state.current, "shutdown requested, skipping to teardown");
        let (state, _) = std::mem::take(&mut self.state).transition(Event::ShutdownRequested);
        self.state = state;
    }

    /// Runs the current step and installs its successor.
    ///
    /// Returns `Ok(true)` while steps remain and `Ok(false)` once teardown
    /// has run; later calls do nothing. Step failures are returned as-is.
    pub async fn advance(&mut self) -> Result<bool, ProbeError> {
        if self.state.is_finished() {
            return Ok(false);
        }
        self.deliver_interrupt();

        let step = self.state.current;
        tracing::info!(%step, "running step");
        let (state, commands) = std::mem::take(&mut self.state).transition(Event::IdleTick);
        self.state = state;
        self.executed.push(step);

        execute_commands(&commands, &mut self.ctx).await?;
        Ok(!self.state.is_finished())
    }
}

impl<C: RegistryConnection, W: Write> IdleHandler for IdleStateMachine<C, W> {
    type Error = ProbeError;

    async fn on_idle(&mut self) -> Result<bool, ProbeError> {
        self.advance().await
    }
}
