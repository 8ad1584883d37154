//! Resolve network-tier perks for a user's cards at a place.

use std::collections::HashSet;
use std::sync::Arc;

use perkmatch_core::{Card, Network, NetworkBenefitTable, NetworkBenefitTemplate};
use serde::Serialize;

/// A network-tier template that applies at the selected place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkBenefit {
    /// Template as published for the tier.
    #[serde(flatten)]
    pub template: NetworkBenefitTemplate,
    /// First user card of the tier, credited with the perk.
    pub card: Arc<Card>,
    /// Network of the tier.
    pub network: Network,
    /// Grade of the tier.
    pub grade: String,
    /// Template value, or the configured default when it has none.
    pub estimated_value: u32,
}

/// Looks up network-tier templates for sets of cards.
#[derive(Debug, Clone, Copy)]
pub struct NetworkResolver<'a> {
    table: &'a NetworkBenefitTable,
    default_value: u32,
}

impl<'a> NetworkResolver<'a> {
    /// Create a resolver over `table`, valuing templates without a value at
    /// `default_value`.
    #[must_use]
    pub const fn new(table: &'a NetworkBenefitTable, default_value: u32) -> Self {
        Self {
            table,
            default_value,
        }
    }

    /// Network perks earned by `cards` at a place tagged `place_tags`.
    ///
    /// Each `(network, grade)` pair is visited once, crediting the first card
    /// of that tier. Templates must share a tag with the place and contribute
    /// each title at most once per tier. Output follows card order, then
    /// template order.
    #[must_use]
    pub fn resolve<S: AsRef<str>>(
        &self,
        cards: &[Arc<Card>],
        place_tags: &[S],
    ) -> Vec<NetworkBenefit> {
        let mut tiers: HashSet<(Network, &str)> = HashSet::new();
        let mut titles: HashSet<(Network, &str, &str)> = HashSet::new();
        let mut resolved = Vec::new();

        for card in cards {
            let (network, grade) = card.tier();
            if !tiers.insert((network, grade)) {
                continue;
            }
            for template in self.table.templates(network, grade) {
                if !template.applies_to(place_tags) {
                    continue;
                }
                if !titles.insert((network, grade, template.title.as_str())) {
                    continue;
                }
                resolved.push(NetworkBenefit {
                    template: template.clone(),
                    card: Arc::clone(card),
                    network,
                    grade: grade.to_owned(),
                    estimated_value: template.value.unwrap_or(self.default_value),
                });
            }
        }
        resolved
    }
}
