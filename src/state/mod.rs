pub mod command;
pub mod event;
pub mod step;

pub use command::Command;
pub use event::Event;
pub use step::{Step, StepState};
