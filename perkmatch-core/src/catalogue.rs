//! Reference data bundle handed over by the data-loading layer.

use crate::{Benefit, Card, NetworkBenefitTable, NetworkTierBenefits};

/// Cards, their benefits and the network-tier templates, as plain data.
///
/// # Examples
/// ```
/// use perkmatch_core::{Benefit, Card, Catalogue, Network};
///
/// let catalogue = Catalogue::new(
///     vec![Card::new("c1", "KB", "Nori", Network::Visa, "Classic")],
///     vec![Benefit::new("b1", "c1", "Coffee", "10%").with_place_tags(["cafe"])],
/// );
/// assert_eq!(catalogue.benefits.len(), 1);
/// assert!(catalogue.network_table().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Catalogue {
    /// Card records in catalogue order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cards: Vec<Card>,
    /// Benefit records in catalogue order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub benefits: Vec<Benefit>,
    /// Network-tier templates grouped by tier.
    #[cfg_attr(feature = "serde", serde(default))]
    pub network_benefits: Vec<NetworkTierBenefits>,
}

impl Catalogue {
    /// Construct a catalogue without network-tier templates.
    #[must_use]
    pub const fn new(cards: Vec<Card>, benefits: Vec<Benefit>) -> Self {
        Self {
            cards,
            benefits,
            network_benefits: Vec::new(),
        }
    }

    /// Build the `(network, grade)` lookup table from the grouped templates.
    #[must_use]
    pub fn network_table(&self) -> NetworkBenefitTable {
        self.network_benefits.iter().cloned().collect()
    }

    /// Parse a catalogue from its JSON representation.
    ///
    /// # Errors
    /// Returns the `serde_json` error when the payload is malformed or a
    /// record carries an unknown network label.
    #[cfg(feature = "serde")]
    pub fn from_json(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }
}
