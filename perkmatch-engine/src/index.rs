//! In-memory benefit index built once per catalogue load.
//!
//! Every raw benefit is enriched with its card and estimated value and then
//! filed under its card, its category and each of its place tags, or in the
//! universal list when it applies everywhere. All buckets are sorted by
//! descending estimated value at build time; queries preserve that order.

#![forbid(unsafe_code)]

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use log::{debug, info};
use perkmatch_core::{Benefit, Card, Catalogue, Scope, ValueWeights};
use serde::Serialize;

/// A benefit paired with its card and estimated value.
///
/// Entries are shared between buckets, so a benefit with three place tags is
/// one allocation referenced from three buckets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedBenefit {
    /// The catalogue record, unchanged.
    #[serde(flatten)]
    pub benefit: Benefit,
    /// Owning card; `None` when the catalogue references an unknown card.
    pub card: Option<Arc<Card>>,
    /// Synthetic value used for ordering.
    pub estimated_value: u32,
}

impl EnrichedBenefit {
    /// Catalogue identifier of the benefit.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.benefit.id
    }

    /// Identifier of the owning card.
    #[must_use]
    pub fn card_id(&self) -> &str {
        &self.benefit.card_id
    }
}

/// Counts describing a built index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    /// Benefits indexed.
    pub benefits: usize,
    /// Cards known to the index.
    pub cards: usize,
    /// Distinct benefit categories.
    pub categories: usize,
    /// Distinct place tags.
    pub place_tags: usize,
    /// Benefits applying everywhere.
    pub universal: usize,
    /// Benefits whose card is missing from the catalogue.
    pub orphaned: usize,
}

type Bucket = Vec<Arc<EnrichedBenefit>>;

/// Read-only lookup structures over a benefit catalogue.
#[derive(Debug, Clone, Default)]
pub struct BenefitIndex {
    cards: Vec<Arc<Card>>,
    card_lookup: HashMap<String, Arc<Card>>,
    by_card_id: HashMap<String, Bucket>,
    by_category: HashMap<String, Bucket>,
    by_place_tag: HashMap<String, Bucket>,
    universal: Bucket,
    len: usize,
    orphaned: usize,
}

impl BenefitIndex {
    /// Build the index from raw benefits and cards.
    ///
    /// Benefits referencing an unknown card are kept with `card = None`.
    /// The inputs are not modified.
    #[must_use]
    pub fn build(benefits: &[Benefit], cards: &[Card], weights: &ValueWeights) -> Self {
        let mut index = Self::default();
        for card in cards {
            let shared = Arc::new(card.clone());
            index.cards.push(Arc::clone(&shared));
            index.card_lookup.insert(card.id.clone(), shared);
        }

        for benefit in benefits {
            index.insert(benefit, weights);
        }
        index.sort_buckets();

        info!(
            "indexed {} benefits across {} cards ({} place tags, {} universal, {} orphaned)",
            index.len,
            index.cards.len(),
            index.by_place_tag.len(),
            index.universal.len(),
            index.orphaned
        );
        index
    }

    /// Build the index from a loaded [`Catalogue`].
    #[must_use]
    pub fn from_catalogue(catalogue: &Catalogue, weights: &ValueWeights) -> Self {
        Self::build(&catalogue.benefits, &catalogue.cards, weights)
    }

    fn insert(&mut self, benefit: &Benefit, weights: &ValueWeights) {
        let card = self.card_lookup.get(&benefit.card_id).cloned();
        if card.is_none() {
            self.orphaned = self.orphaned.saturating_add(1);
            debug!(
                "benefit {} references unknown card {}",
                benefit.id, benefit.card_id
            );
        }
        let entry = Arc::new(EnrichedBenefit {
            benefit: benefit.clone(),
            card,
            estimated_value: weights.estimate(benefit),
        });

        self.by_card_id
            .entry(benefit.card_id.clone())
            .or_default()
            .push(Arc::clone(&entry));
        if let Some(category) = &benefit.category {
            self.by_category
                .entry(category.clone())
                .or_default()
                .push(Arc::clone(&entry));
        }
        match &benefit.scope {
            Scope::Universal => self.universal.push(entry),
            Scope::Tagged(tags) => {
                for tag in tags {
                    self.by_place_tag
                        .entry(tag.clone())
                        .or_default()
                        .push(Arc::clone(&entry));
                }
            }
        }
        self.len = self.len.saturating_add(1);
    }

    fn sort_buckets(&mut self) {
        self.by_card_id.values_mut().for_each(sort_by_value);
        self.by_category.values_mut().for_each(sort_by_value);
        self.by_place_tag.values_mut().for_each(sort_by_value);
        sort_by_value(&mut self.universal);
    }

    /// Benefits of each card in `card_ids`, grouped by card in request order.
    ///
    /// Each group keeps its value order; groups are not merged or re-ranked.
    /// Unknown ids contribute nothing.
    #[must_use]
    pub fn by_card_ids<S: AsRef<str>>(&self, card_ids: &[S]) -> Vec<Arc<EnrichedBenefit>> {
        card_ids
            .iter()
            .filter_map(|id| self.by_card_id.get(id.as_ref()))
            .flat_map(|bucket| bucket.iter().cloned())
            .collect()
    }

    /// Tagged benefits of `card_ids` usable at a place with `place_tags`.
    ///
    /// A benefit matching several tags is returned once. The result is sorted
    /// by descending value; ties keep tag order, then bucket order.
    #[must_use]
    pub fn by_place<S, T>(&self, card_ids: &[S], place_tags: &[T]) -> Vec<Arc<EnrichedBenefit>>
    where
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let owned = card_set(card_ids);
        let mut seen = HashSet::new();
        let mut matches = Vec::new();
        for tag in place_tags {
            let Some(bucket) = self.by_place_tag.get(tag.as_ref()) else {
                continue;
            };
            for entry in bucket {
                if owned.contains(entry.card_id()) && seen.insert(entry.id()) {
                    matches.push(Arc::clone(entry));
                }
            }
        }
        sort_by_value(&mut matches);
        matches
    }

    /// Universal benefits held by `card_ids`, in value order.
    #[must_use]
    pub fn universal<S: AsRef<str>>(&self, card_ids: &[S]) -> Vec<Arc<EnrichedBenefit>> {
        let owned = card_set(card_ids);
        self.universal
            .iter()
            .filter(|entry| owned.contains(entry.card_id()))
            .cloned()
            .collect()
    }

    /// Tagged benefits of `card_ids` grouped by category.
    ///
    /// Universal benefits are left out; they are reported by
    /// [`BenefitIndex::universal`]. Categories without matches are omitted.
    #[must_use]
    pub fn grouped_by_category<S: AsRef<str>>(
        &self,
        card_ids: &[S],
    ) -> BTreeMap<String, Vec<Arc<EnrichedBenefit>>> {
        let owned = card_set(card_ids);
        self.by_category
            .iter()
            .filter_map(|(category, bucket)| {
                let filtered: Bucket = bucket
                    .iter()
                    .filter(|entry| {
                        owned.contains(entry.card_id()) && !entry.benefit.scope.is_universal()
                    })
                    .cloned()
                    .collect();
                (!filtered.is_empty()).then(|| (category.clone(), filtered))
            })
            .collect()
    }

    /// Search the benefits of `card_ids` for `tag`.
    ///
    /// Matches are collected in three stages, each skipping benefits already
    /// found: the category equal to `tag`, then the place tag equal to `tag`,
    /// then titles containing any of `terms` (case-insensitive). The title
    /// stage stops once `limit` results are held. The result is sorted by
    /// value and truncated to `limit`. Blank terms are ignored.
    #[must_use]
    pub fn search<S, T>(
        &self,
        card_ids: &[S],
        tag: &str,
        terms: &[T],
        limit: usize,
    ) -> Vec<Arc<EnrichedBenefit>>
    where
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let owned = card_set(card_ids);
        let mut collector = Collector::default();

        for bucket in [self.by_category.get(tag), self.by_place_tag.get(tag)]
            .into_iter()
            .flatten()
        {
            bucket
                .iter()
                .filter(|entry| owned.contains(entry.card_id()))
                .for_each(|entry| collector.push(entry));
        }

        let needles: Vec<String> = terms
            .iter()
            .map(|term| term.as_ref().trim().to_lowercase())
            .filter(|term| !term.is_empty())
            .collect();
        if !needles.is_empty() {
            for entry in self.by_card_ids(card_ids) {
                if collector.len() >= limit {
                    break;
                }
                let title = entry.benefit.title.to_lowercase();
                if needles.iter().any(|needle| title.contains(needle.as_str())) {
                    collector.push(&entry);
                }
            }
        }

        let mut results = collector.into_inner();
        sort_by_value(&mut results);
        results.truncate(limit);
        results
    }

    /// Look up a card by identifier.
    #[must_use]
    pub fn card(&self, card_id: &str) -> Option<&Arc<Card>> {
        self.card_lookup.get(card_id)
    }

    /// Cards in catalogue order.
    #[must_use]
    pub fn cards(&self) -> &[Arc<Card>] {
        &self.cards
    }

    /// Resolve `card_ids` to known cards, skipping unknown identifiers.
    #[must_use]
    pub fn cards_for<S: AsRef<str>>(&self, card_ids: &[S]) -> Vec<Arc<Card>> {
        card_ids
            .iter()
            .filter_map(|id| self.card(id.as_ref()))
            .cloned()
            .collect()
    }

    /// Benefits whose card is missing from the catalogue.
    ///
    /// Grouped by the referenced card id in ascending order; each group keeps
    /// its value order.
    #[must_use]
    pub fn orphaned(&self) -> Vec<Arc<EnrichedBenefit>> {
        let mut missing: Vec<&String> = self
            .by_card_id
            .keys()
            .filter(|id| !self.card_lookup.contains_key(id.as_str()))
            .collect();
        missing.sort();
        self.by_card_ids(&missing)
    }

    /// Number of indexed benefits.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Report whether no benefits were indexed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Summary counts for diagnostics.
    #[must_use]
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            benefits: self.len,
            cards: self.cards.len(),
            categories: self.by_category.len(),
            place_tags: self.by_place_tag.len(),
            universal: self.universal.len(),
            orphaned: self.orphaned,
        }
    }

    #[cfg(test)]
    pub(crate) fn place_tag_bucket(&self, tag: &str) -> &[Arc<EnrichedBenefit>] {
        self.by_place_tag.get(tag).map_or(&[], Vec::as_slice)
    }

    #[cfg(test)]
    pub(crate) fn universal_bucket(&self) -> &[Arc<EnrichedBenefit>] {
        &self.universal
    }
}

/// Accumulates entries in arrival order, skipping repeated benefit ids.
#[derive(Default)]
struct Collector {
    seen: HashSet<String>,
    entries: Bucket,
}

impl Collector {
    fn push(&mut self, entry: &Arc<EnrichedBenefit>) {
        if self.seen.insert(entry.id().to_owned()) {
            self.entries.push(Arc::clone(entry));
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn into_inner(self) -> Bucket {
        self.entries
    }
}

fn card_set<S: AsRef<str>>(card_ids: &[S]) -> HashSet<&str> {
    card_ids.iter().map(AsRef::as_ref).collect()
}

/// Stable sort by descending estimated value.
fn sort_by_value(bucket: &mut Bucket) {
    bucket.sort_by(|a, b| b.estimated_value.cmp(&a.estimated_value));
}
