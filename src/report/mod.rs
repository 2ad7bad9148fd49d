//! Report module - summarizing scoring results

pub mod drift_export;
pub mod summary;

pub use drift_export::*;
pub use summary::*;
