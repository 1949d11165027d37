use std::future::Future;

use tokio_util::sync::CancellationToken;

/// The one capability handed to code that needs to end the loop.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    token: CancellationToken,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests the stop. Repeated calls are harmless; returns `true` only
    /// for the call that actually issued it.
    pub fn stop(&self) -> bool {
        let first = !self.token.is_cancelled();
        self.token.cancel();
        first
    }

    pub fn is_stopped(&self) -> bool {
        self.token.is_cancelled()
    }

    pub async fn stopped(&self) {
        self.token.cancelled().await;
    }
}

/// Callback invoked once per idle tick.
pub trait IdleHandler {
    type Error;

    /// Returns `Ok(false)` to detach from the loop. Errors end the loop.
    fn on_idle(&mut self) -> impl Future<Output = Result<bool, Self::Error>>;
}

/// Single-threaded cooperative loop whose only work is its idle handler.
///
/// Each iteration yields to the runtime first, so anything else scheduled on
/// the same thread (signal listeners, I/O drivers) gets to run between ticks.
#[derive(Debug, Default)]
pub struct MainLoop {
    stop: StopHandle,
    ticks: u64,
}

impl MainLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Runs until the stop handle fires, returning the number of idle ticks
    /// dispatched. A detached handler leaves the loop waiting for the stop.
    pub async fn run<H: IdleHandler>(&mut self, handler: &mut H) -> Result<u64, H::Error> {
        let mut attached = true;
        while !self.stop.is_stopped() {
            match attached {
                true => {
                    tokio::task::yield_now().await;
                    self.ticks += 1;
                    attached = handler.on_idle().await?;
                    if !attached {
                        tracing::debug!(ticks = self.ticks, "idle handler detached");
                    }
                }
                false => self.stop.stopped().await,
            }
        }
        tracing::debug!(ticks = self.ticks, "main loop stopped");
        Ok(self.ticks)
    }
}
