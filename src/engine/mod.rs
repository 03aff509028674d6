pub mod scheduler;
pub mod ticker;

pub use scheduler::{Dispatch, Pattern, Scheduler, StepEvent, TriggerEvent, DEFAULT_LOOKAHEAD};
pub use ticker::{TickHandle, DEFAULT_TICK_INTERVAL};
