/// Side effects requested by the step machine; the probe driver performs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Command {
    /// Build the proxy for the registry's root accessible object.
    BindRegistryRoot,
    /// Fetch the root's children and print the count and the sequence.
    ListApplications,
    /// Tell the owning loop to stop.
    StopLoop,
}
