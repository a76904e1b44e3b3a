pub mod cancellation;
pub mod scheduling;

pub use cancellation::CancellationEngine;
pub use scheduling::SchedulingEngine;
