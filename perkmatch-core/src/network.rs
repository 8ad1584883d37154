//! Network-tier benefit templates.
//!
//! Card networks grant perks to every card of a given tier independently of
//! the issuing bank's catalogue. Templates are keyed by `(network, grade)`.

use std::collections::HashMap;

use crate::Network;

/// A perk granted by a network tier rather than by a specific card.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkBenefitTemplate {
    /// Emoji or icon name shown next to the title.
    #[cfg_attr(feature = "serde", serde(default))]
    pub icon: String,
    /// Headline, unique within one `(network, grade)` pair.
    pub title: String,
    /// Place tags at which the perk applies.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<String>,
    /// Estimated value in won; the resolver substitutes a default when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub value: Option<u32>,
    /// Longer description.
    #[cfg_attr(feature = "serde", serde(default))]
    pub desc: String,
}

impl NetworkBenefitTemplate {
    /// Construct a template applying at the given tags.
    pub fn new<I, S>(icon: &str, title: &str, tags: I, value: Option<u32>, desc: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            icon: icon.to_owned(),
            title: title.to_owned(),
            tags: tags.into_iter().map(Into::into).collect(),
            value,
            desc: desc.to_owned(),
        }
    }

    /// Report whether any place tag intersects the template's tags.
    #[must_use]
    pub fn applies_to<S: AsRef<str>>(&self, place_tags: &[S]) -> bool {
        self.tags
            .iter()
            .any(|tag| place_tags.iter().any(|place| place.as_ref() == tag))
    }
}

/// Templates grouped under one `(network, grade)` key, as stored in catalogue
/// files.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkTierBenefits {
    /// Network the tier belongs to.
    pub network: Network,
    /// Tier label.
    pub grade: String,
    /// Templates granted by the tier, in display order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub benefits: Vec<NetworkBenefitTemplate>,
}

/// Lookup table of network-tier templates.
///
/// # Examples
/// ```
/// use perkmatch_core::{Network, NetworkBenefitTable};
///
/// let table = NetworkBenefitTable::builtin();
/// assert!(!table.templates(Network::Visa, "Infinite").is_empty());
/// assert!(table.templates(Network::Visa, "Nonexistent").is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkBenefitTable {
    tiers: HashMap<Network, HashMap<String, Vec<NetworkBenefitTemplate>>>,
}

impl NetworkBenefitTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a template to the `(network, grade)` entry.
    pub fn insert(
        &mut self,
        network: Network,
        grade: impl Into<String>,
        template: NetworkBenefitTemplate,
    ) {
        self.tiers
            .entry(network)
            .or_default()
            .entry(grade.into())
            .or_default()
            .push(template);
    }

    /// Add a template while consuming `self`, enabling chaining.
    #[must_use]
    pub fn with_template(
        mut self,
        network: Network,
        grade: impl Into<String>,
        template: NetworkBenefitTemplate,
    ) -> Self {
        self.insert(network, grade, template);
        self
    }

    /// Templates for a tier; empty when the pair is unknown.
    #[must_use]
    pub fn templates(&self, network: Network, grade: &str) -> &[NetworkBenefitTemplate] {
        self.tiers
            .get(&network)
            .and_then(|grades| grades.get(grade))
            .map_or(&[], Vec::as_slice)
    }

    /// Number of `(network, grade)` entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiers.values().map(HashMap::len).sum()
    }

    /// Report whether the table holds no tiers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Premium-tier perks published by the international networks.
    #[must_use]
    pub fn builtin() -> Self {
        let lounge = |value| {
            NetworkBenefitTemplate::new(
                "🛋️",
                "공항 라운지",
                ["airport", "lounge"],
                Some(value),
                "Lounge access at partner airports",
            )
        };
        let concierge = NetworkBenefitTemplate::new(
            "🛎️",
            "컨시어지",
            ["hotel", "travel", "dining"],
            Some(5_000),
            "Reservations and travel arrangements",
        );
        let hotel = NetworkBenefitTemplate::new(
            "🏨",
            "호텔 업그레이드",
            ["hotel"],
            Some(20_000),
            "Room upgrade and late checkout at partner hotels",
        );
        let insurance = NetworkBenefitTemplate::new(
            "🧳",
            "여행자 보험",
            ["airport", "travel"],
            Some(8_000),
            "Overseas travel insurance when the fare is paid by card",
        );
        let golf = NetworkBenefitTemplate::new(
            "⛳",
            "골프 그린피 할인",
            ["golf"],
            Some(15_000),
            "Green fee discount at partner courses",
        );

        Self::new()
            .with_template(Network::Visa, "Infinite", lounge(30_000))
            .with_template(Network::Visa, "Infinite", hotel.clone())
            .with_template(Network::Visa, "Infinite", concierge.clone())
            .with_template(Network::Visa, "Infinite", golf.clone())
            .with_template(Network::Visa, "Signature", lounge(20_000))
            .with_template(Network::Visa, "Signature", concierge.clone())
            .with_template(Network::Visa, "Platinum", insurance.clone())
            .with_template(Network::Mastercard, "World Elite", lounge(30_000))
            .with_template(Network::Mastercard, "World Elite", hotel.clone())
            .with_template(Network::Mastercard, "World Elite", golf)
            .with_template(Network::Mastercard, "World", lounge(20_000))
            .with_template(Network::Mastercard, "World", insurance.clone())
            .with_template(Network::Mastercard, "Platinum", insurance.clone())
            .with_template(Network::Amex, "Platinum", lounge(35_000))
            .with_template(Network::Amex, "Platinum", hotel)
            .with_template(Network::Amex, "Platinum", concierge)
            .with_template(Network::Amex, "Gold", insurance)
    }
}

impl FromIterator<NetworkTierBenefits> for NetworkBenefitTable {
    fn from_iter<I: IntoIterator<Item = NetworkTierBenefits>>(iter: I) -> Self {
        let mut table = Self::new();
        for tier in iter {
            for template in tier.benefits {
                table.insert(tier.network, tier.grade.clone(), template);
            }
        }
        table
    }
}
