pub mod event_loop;
pub mod locator;
pub mod probe;
pub mod protocol;
pub mod registry;
pub mod shutdown;
pub mod state;
pub mod traits;
pub mod types;

#[cfg(test)]
pub mod test_utils;
