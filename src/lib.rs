//! Facade crate for the perkmatch card recommendation engine.
//!
//! This crate re-exports the domain model and the index, resolver and ranking
//! engine so applications depend on a single crate.

#![forbid(unsafe_code)]

pub use perkmatch_core::{
    Benefit, Card, Catalogue, Network, NetworkBenefitTable, NetworkBenefitTemplate,
    NetworkParseError, NetworkTierBenefits, Place, Scope, UNLIMITED_MARKER, ValueWeights,
    estimate_value,
};
pub use perkmatch_engine::{
    BenefitIndex, BenefitSource, BenefitSummary, EnrichedBenefit, ExpandedQuery, IndexStats,
    NetworkBenefit, NetworkResolver, QueryExpander, RankedCard, Ranker, calculate_ranking,
};

#[cfg(feature = "test-support")]
pub use perkmatch_core::test_support;
