//! Currency resolution pipeline

pub mod events;
pub mod pipeline;
pub mod selectors;
pub mod state;

pub use events::{TickerEvent, run_event_loop};
pub use pipeline::TickerPipeline;
pub use state::{LoadPhase, RequestId, TickerState, Transition};
