//! Export orchestration
//!
//! - Export coordination across planned windows
//! - Output sinks for rendered windows
//! - Summary and reporting

pub mod coordinator;
pub mod sink;
pub mod summary;

pub use coordinator::ExportCoordinator;
pub use sink::{FsSink, OutputSink};
pub use summary::{ExportSummary, WindowFailure, WindowReport};
