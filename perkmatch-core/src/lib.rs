//! Core domain types for the perkmatch recommendation engine.
//!
//! Cards, their benefits, network-tier templates and places are immutable
//! reference data. The [`ValueWeights`] estimator turns a benefit's display
//! value into a comparable score in won.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod benefit;
mod card;
mod catalogue;
pub mod estimator;
mod network;
mod place;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use benefit::{Benefit, Scope};
pub use card::{Card, Network, NetworkParseError};
pub use catalogue::Catalogue;
pub use estimator::{UNLIMITED_MARKER, ValueWeights, estimate_value};
pub use network::{NetworkBenefitTable, NetworkBenefitTemplate, NetworkTierBenefits};
pub use place::Place;
