use std::io::{self, Write};

use thiserror::Error;

use crate::{
    event_loop::StopHandle,
    registry::RegistryError,
    state::Command,
    traits::{AccessibleRoot, RegistryConnection},
};

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("registry root listed before it was bound")]
    RootNotBound,
    #[error("writing results")]
    Output(#[from] io::Error),
    #[error("interrupted while {0}")]
    Interrupted(&'static str),
}

pub struct ExecutionContext<C: RegistryConnection, W> {
    pub connection: C,
    pub root: Option<C::Root>,
    pub stop: StopHandle,
    pub out: W,
}

pub async fn execute_commands<C, W>(
    commands: &[Command],
    ctx: &mut ExecutionContext<C, W>,
) -> Result<(), ProbeError>
where
    C: RegistryConnection,
    W: Write,
{
    for cmd in commands {
        match cmd {
            Command::BindRegistryRoot => {
                ctx.root = Some(ctx.connection.bind_root().await?);
                tracing::debug!("bound registry root");
            }
            Command::ListApplications => {
                let root = ctx.root.as_ref().ok_or(ProbeError::RootNotBound)?;
                let apps = root.list_children().await?;
                tracing::info!(count = apps.len(), "listed registered applications");
                writeln!(ctx.out, "{}", apps.summary())?;
                writeln!(ctx.out, "{apps}")?;
                ctx.out.flush()?;
            }
            Command::StopLoop => {
                ctx.root = None;
                match ctx.stop.stop() {
                    true => tracing::debug!("stop issued"),
                    false => tracing::debug!("loop was already stopping"),
                }
            }
        }
    }
    Ok(())
}
