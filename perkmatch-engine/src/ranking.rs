//! Rank a user's cards for a selected place.
//!
//! Card benefits matching the place and network-tier perks are credited to
//! the card that earns them. Cards are ordered by the summed estimated value
//! of their contributions.

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;
use perkmatch_core::{Card, NetworkBenefitTable, Place, ValueWeights};
use serde::Serialize;

use crate::{BenefitIndex, EnrichedBenefit, NetworkBenefit, NetworkResolver};

/// Origin of a ranked contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BenefitSource {
    /// Issuer benefit from the card catalogue.
    Card,
    /// Perk granted by the card's network tier.
    Network,
}

/// Compact description of one contribution to a card's score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BenefitSummary {
    /// Where the contribution came from.
    pub source: BenefitSource,
    /// Benefit headline.
    pub title: String,
    /// Display value; network perks use their icon.
    pub value: String,
    /// Estimated value credited to the card.
    pub estimated_value: u32,
}

/// A card's aggregated score at a place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCard {
    /// Identifier of the scored card.
    pub card_id: String,
    /// The card, when known to the catalogue.
    pub card: Option<Arc<Card>>,
    /// Sum of the estimated values of every contribution.
    pub total_value: u64,
    /// Number of contributions.
    pub count: usize,
    /// One line per contribution, in credit order.
    pub reasons: Vec<String>,
    /// Catalogue ids of contributing card benefits.
    pub benefit_ids: Vec<String>,
    /// Structured form of [`RankedCard::reasons`].
    pub benefit_summary: Vec<BenefitSummary>,
    /// Distinct conditions and limits, in first-seen order.
    pub caveats: Vec<String>,
}

impl RankedCard {
    fn new(card_id: &str, card: Option<Arc<Card>>) -> Self {
        Self {
            card_id: card_id.to_owned(),
            card,
            total_value: 0,
            count: 0,
            reasons: Vec::new(),
            benefit_ids: Vec::new(),
            benefit_summary: Vec::new(),
            caveats: Vec::new(),
        }
    }

    fn credit(&mut self, summary: BenefitSummary, reason: String) {
        self.total_value = self
            .total_value
            .saturating_add(u64::from(summary.estimated_value));
        self.count = self.count.saturating_add(1);
        self.reasons.push(reason);
        self.benefit_summary.push(summary);
    }

    fn add_caveat(&mut self, caveat: Option<&String>) {
        let Some(text) = caveat else {
            return;
        };
        if !text.trim().is_empty() && !self.caveats.contains(text) {
            self.caveats.push(text.clone());
        }
    }

    fn absorb_benefit(&mut self, entry: &EnrichedBenefit) {
        let benefit = &entry.benefit;
        self.credit(
            BenefitSummary {
                source: BenefitSource::Card,
                title: benefit.title.clone(),
                value: benefit.value.clone(),
                estimated_value: entry.estimated_value,
            },
            format!("{} ({})", benefit.title, benefit.value),
        );
        self.benefit_ids.push(benefit.id.clone());
        self.add_caveat(benefit.conditions.as_ref());
        self.add_caveat(benefit.limit.as_ref());
    }

    fn absorb_network(&mut self, perk: &NetworkBenefit) {
        if self.card.is_none() {
            self.card = Some(Arc::clone(&perk.card));
        }
        self.credit(
            BenefitSummary {
                source: BenefitSource::Network,
                title: perk.template.title.clone(),
                value: perk.template.icon.clone(),
                estimated_value: perk.estimated_value,
            },
            format!("{} {} · {}", perk.network, perk.grade, perk.template.title),
        );
    }
}

/// Running per-card totals keyed by first appearance.
#[derive(Default)]
struct Tally {
    positions: HashMap<String, usize>,
    ranked: Vec<RankedCard>,
}

impl Tally {
    fn entry(&mut self, card_id: &str, card: Option<&Arc<Card>>) -> Option<&mut RankedCard> {
        let position = if let Some(&existing) = self.positions.get(card_id) {
            existing
        } else {
            let next = self.ranked.len();
            self.ranked.push(RankedCard::new(card_id, card.cloned()));
            self.positions.insert(card_id.to_owned(), next);
            next
        };
        self.ranked.get_mut(position)
    }

    fn into_sorted(self) -> Vec<RankedCard> {
        let mut ranked = self.ranked;
        ranked.retain(|card| card.count > 0);
        ranked.sort_by(|a, b| b.total_value.cmp(&a.total_value));
        ranked
    }
}

/// Ranks cards by the benefits they earn at a place.
#[derive(Debug, Clone, Copy)]
pub struct Ranker<'a> {
    index: &'a BenefitIndex,
    resolver: NetworkResolver<'a>,
}

impl<'a> Ranker<'a> {
    /// Create a ranker over a built index and network table.
    #[must_use]
    pub const fn new(
        index: &'a BenefitIndex,
        table: &'a NetworkBenefitTable,
        weights: &ValueWeights,
    ) -> Self {
        Self {
            index,
            resolver: NetworkResolver::new(table, weights.network_default_value),
        }
    }

    /// Score `card_ids` at a place tagged `place_tags`.
    ///
    /// `user_cards` supplies the network tiers to consult. Cards without any
    /// applicable benefit are omitted, so an empty result means nothing
    /// applies. Ties keep the order in which cards were first credited.
    #[must_use]
    pub fn rank<S, T>(
        &self,
        card_ids: &[S],
        place_tags: &[T],
        user_cards: &[Arc<Card>],
    ) -> Vec<RankedCard>
    where
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let place_benefits = self.index.by_place(card_ids, place_tags);
        let network_benefits = self.resolver.resolve(user_cards, place_tags);
        if place_benefits.is_empty() && network_benefits.is_empty() {
            return Vec::new();
        }

        let mut tally = Tally::default();
        for entry in &place_benefits {
            if let Some(ranked) = tally.entry(entry.card_id(), entry.card.as_ref()) {
                ranked.absorb_benefit(entry);
            }
        }
        for perk in &network_benefits {
            if let Some(ranked) = tally.entry(&perk.card.id, Some(&perk.card)) {
                ranked.absorb_network(perk);
            }
        }

        let ranked = tally.into_sorted();
        debug!(
            "ranked {} cards from {} card benefits and {} network perks",
            ranked.len(),
            place_benefits.len(),
            network_benefits.len()
        );
        ranked
    }

    /// Score the cards in `card_ids` at `place`, consulting network tiers for
    /// the same cards.
    #[must_use]
    pub fn rank_place<S: AsRef<str>>(&self, place: &Place, card_ids: &[S]) -> Vec<RankedCard> {
        let user_cards = self.index.cards_for(card_ids);
        self.rank(card_ids, place.tags.as_slice(), &user_cards)
    }

    /// The highest-scoring card, if any benefit applies.
    #[must_use]
    pub fn best<S, T>(
        &self,
        card_ids: &[S],
        place_tags: &[T],
        user_cards: &[Arc<Card>],
    ) -> Option<RankedCard>
    where
        S: AsRef<str>,
        T: AsRef<str>,
    {
        self.rank(card_ids, place_tags, user_cards).into_iter().next()
    }
}

/// Rank `card_ids` at a place in one call.
///
/// Equivalent to building a [`Ranker`] and calling [`Ranker::rank`].
#[must_use]
pub fn calculate_ranking<S, T>(
    index: &BenefitIndex,
    card_ids: &[S],
    place_tags: &[T],
    table: &NetworkBenefitTable,
    user_cards: &[Arc<Card>],
    weights: &ValueWeights,
) -> Vec<RankedCard>
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    Ranker::new(index, table, weights).rank(card_ids, place_tags, user_cards)
}
