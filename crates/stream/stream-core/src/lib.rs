//! Stream Anomaly Detection Core
//!
//! Implementations for the seasonal source, sliding window, rolling z-score
//! detection, anomaly logging and the per-tick orchestrator.

mod detector;
mod exclusion;
mod log;
mod orchestrator;
mod source;
mod view;
mod window;

pub use detector::*;
pub use exclusion::*;
pub use log::*;
pub use orchestrator::*;
pub use source::*;
pub use view::*;
pub use window::*;
