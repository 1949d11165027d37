use std::future::Future;

use crate::{locator::LocatorError, registry::RegistryError, types::ApplicationList};

/// A Mealy machine coalgebra: `(State, Event) → (State, Vec<Command>)`.
///
/// The step machine implements this so the workflow can be tested without a
/// bus or a running loop; the driver executes the emitted commands.
pub trait MealyMachine: Sized {
    type Event;
    type Command;
    fn transition(self, event: Self::Event) -> (Self, Vec<Self::Command>);
}

/// Finds the registry's bus and opens a connection to it.
pub trait ServiceLocator {
    type Connection: RegistryConnection;

    /// Resolves the bus address and connects; any failure is final.
    fn resolve_and_connect(&self)
    -> impl Future<Output = Result<Self::Connection, LocatorError>>;
}

/// An established channel to the registry service.
pub trait RegistryConnection {
    type Root: AccessibleRoot;

    /// Builds a handle for the registry's root accessible object.
    fn bind_root(&self) -> impl Future<Output = Result<Self::Root, RegistryError>>;
}

/// Handle on the registry's root accessible object.
pub trait AccessibleRoot {
    /// Children of the root in registry order, one per registered application.
    fn list_children(&self) -> impl Future<Output = Result<ApplicationList, RegistryError>>;
}
