//! Shared types for time-uniform confidence sequences: the guarantee-tier
//! lattice, the error hierarchy, stream/scenario specs, and the result
//! records every CS/e-process emits.

pub mod atlas;
pub mod error;
pub mod result;
pub mod spec;
pub mod tier;

pub use atlas::{Generator, MetricAccumulator, Scenario, StoppingRule};
pub use error::{format_error_human, Error, ErrorCategory, Result, StructuredError};
pub use result::{DiagnosticsSnapshot, EValue, Interval, Recommendation};
pub use spec::{ABSpec, Arm, ClipMode, Kind, StreamSpec, Support};
pub use tier::GuaranteeTier;
