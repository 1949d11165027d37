mod execute;
mod machine;

use std::io::{self, Write};

use anyhow::{Context, Result};

pub use self::{
    execute::{ExecutionContext, ProbeError, execute_commands},
    machine::IdleStateMachine,
};
use crate::{
    event_loop::{MainLoop, StopHandle},
    locator::A11yBusLocator,
    shutdown,
    traits::ServiceLocator,
    types::{BusAddress, BusAddressParseError},
};

// ─── Main entry ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct ProbeConfig {
    /// Use this accessibility bus instead of asking the session bus launcher.
    pub bus_address: Option<BusAddress>,
}

impl ProbeConfig {
    /// Builds the config from a raw address setting. Unset, empty and
    /// whitespace-only values all mean "ask the launcher"; anything else
    /// must parse as a bus address.
    pub fn from_bus_address(raw: Option<&str>) -> Result<Self, BusAddressParseError> {
        let bus_address = raw
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse::<BusAddress>)
            .transpose()?;
        Ok(Self { bus_address })
    }
}

pub async fn run(config: ProbeConfig) -> Result<()> {
    let interrupt = StopHandle::new();
    shutdown::listen(interrupt.clone()).context("installing signal handlers")?;

    let locator = A11yBusLocator::new(config.bus_address);
    run_with(&locator, io::stdout(), interrupt).await?;
    Ok(())
}

/// Connects through `locator` and runs the workflow to teardown, writing the
/// listing to `out`. Returns the number of idle ticks the loop dispatched.
///
/// Nothing is scheduled until the connection exists, so a locator failure
/// means no step ever runs. Firing `interrupt` abandons a pending connect,
/// or drops the step in flight and runs teardown; either way the run ends
/// with [`ProbeError::Interrupted`].
pub async fn run_with<L, W>(locator: &L, out: W, interrupt: StopHandle) -> Result<u64>
where
    L: ServiceLocator,
    W: Write,
{
    let connection = tokio::select! {
        biased;
        () = interrupt.stopped() => return Err(ProbeError::Interrupted("connecting").into()),
        res = locator.resolve_and_connect() => {
            res.context("locating the accessibility registry")?
        }
    };

    let mut main_loop = MainLoop::new();
    let mut machine = IdleStateMachine::new(connection, main_loop.stop_handle(), out)
        .with_interrupt(interrupt.clone());

    let completed = tokio::select! {
        biased;
        res = main_loop.run(&mut machine) => Some(res),
        () = interrupt.stopped() => None,
    };

    let ticks = match completed {
        Some(res) => res.with_context(|| {
            format!(
                "step {} failed",
                machine.executed().last().copied().unwrap_or(machine.current_step())
            )
        })?,
        None => {
            tracing::warn!(
                abandoned = ?machine.executed().last(),
                "interrupted during a step"
            );
            // The next advance sees the interrupt and runs teardown.
            machine.advance().await?;
            main_loop.ticks()
        }
    };
    tracing::info!(ticks, steps = machine.executed().len(), "probe finished");

    match interrupt.is_stopped() {
        true => Err(ProbeError::Interrupted("running steps").into()),
        false => Ok(ticks),
    }
}
