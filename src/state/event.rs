#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Event {
    /// The loop had nothing else to do; run the current step.
    IdleTick,
    /// SIGINT/SIGTERM arrived; skip ahead to teardown.
    ShutdownRequested,
}
