//! Enhancement engine: cached lookups, concurrent source fan-out,
//! field-level merge, confidence scoring.
//!
//! [`enhance::YachtEnhancer`] drives the whole pipeline; [`merge`] and
//! [`confidence`] hold the pure resolution and scoring logic so they can
//! be exercised without adapters or network.

pub mod confidence;
pub mod enhance;
pub mod merge;

pub use enhance::YachtEnhancer;
