//! Pipeline module - artifacts, transformation, scoring, and drift checks

pub mod artifacts;
pub mod drift;
pub mod error;
pub mod loader;
pub mod model;
pub mod record;
pub mod rules;
pub mod score;
pub mod transform;

pub use artifacts::*;
pub use drift::*;
pub use error::*;
pub use loader::*;
pub use model::*;
pub use record::*;
pub use rules::*;
pub use score::*;
pub use transform::*;
