//! Benefit indexing and card recommendation for perkmatch.
//!
//! The crate provides three cooperating pieces:
//! - **[`BenefitIndex`]** enriches every catalogue benefit with its card and
//!   estimated value once, then answers per-card, per-category, per-place-tag
//!   and free-text queries without re-sorting.
//! - **[`NetworkResolver`]** finds the network-tier perks a user's cards earn
//!   at a place.
//! - **[`Ranker`]** merges both sources into a per-card score list for the
//!   place the user selected.
//!
//! Everything is synchronous and allocation-only. A built index is immutable
//! and can be shared between threads behind an `Arc`.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use perkmatch_core::{Benefit, Card, Network, NetworkBenefitTable, ValueWeights};
//! use perkmatch_engine::{BenefitIndex, Ranker};
//!
//! let cards = vec![Card::new("c1", "Hana", "Cafe Card", Network::Visa, "Classic")];
//! let benefits = vec![
//!     Benefit::new("b1", "c1", "Coffee 10%", "10%")
//!         .with_category("cafe")
//!         .with_place_tags(["cafe"]),
//! ];
//! let weights = ValueWeights::default();
//! let index = BenefitIndex::build(&benefits, &cards, &weights);
//! let table = NetworkBenefitTable::new();
//! let ranker = Ranker::new(&index, &table, &weights);
//!
//! let user_cards: Vec<Arc<Card>> = index.cards().to_vec();
//! let ranking = ranker.rank(&["c1"], &["cafe"], &user_cards);
//! assert_eq!(ranking.len(), 1);
//! assert_eq!(ranking[0].total_value, 5_000);
//! ```

#![forbid(unsafe_code)]

mod index;
mod network;
mod ranking;
mod search;

pub use index::{BenefitIndex, EnrichedBenefit, IndexStats};
pub use network::{NetworkBenefit, NetworkResolver};
pub use ranking::{BenefitSource, BenefitSummary, RankedCard, Ranker, calculate_ranking};
pub use search::{ExpandedQuery, QueryExpander};
