//! Test-only catalogue builders shared by unit and behaviour tests.

use crate::{Benefit, Card, Catalogue, Network, NetworkBenefitTable, NetworkTierBenefits};

/// Build a card with placeholder issuer and name.
#[must_use]
pub fn card(id: &str, network: Network, grade: &str) -> Card {
    Card::new(id, "Test Bank", format!("{id} card"), network, grade)
}

/// Build a benefit restricted to `tags`.
#[must_use]
pub fn tagged(id: &str, card_id: &str, category: &str, value: &str, tags: &[&str]) -> Benefit {
    Benefit::new(id, card_id, format!("{id} title"), value)
        .with_category(category)
        .with_place_tags(tags.iter().copied())
}

/// Build a benefit usable anywhere.
#[must_use]
pub fn universal(id: &str, card_id: &str, category: &str, value: &str) -> Benefit {
    Benefit::new(id, card_id, format!("{id} title"), value).with_category(category)
}

/// A small catalogue spanning three cards, tagged and universal benefits, and
/// the built-in network templates.
///
/// Estimated values with default weights:
///
/// | id         | card | tags              | value  |
/// |------------|------|-------------------|--------|
/// | `a-cafe`   | A    | cafe              | 5 000  |
/// | `a-sbux`   | A    | cafe, starbucks   | 13 000 |
/// | `a-bakery` | A    | bakery            | 3 000  |
/// | `a-cash`   | A    | universal         | 5 200  |
/// | `b-movie`  | B    | movie, cgv        | 14 000 |
/// | `b-cash`   | B    | universal         | 30 000 |
/// | `c-lounge` | C    | airport, lounge   | 55 000 |
#[must_use]
pub fn sample_catalogue() -> Catalogue {
    let cards = vec![
        card("A", Network::Visa, "Infinite"),
        card("B", Network::Mastercard, "Platinum"),
        card("C", Network::Visa, "Infinite"),
    ];
    let benefits = vec![
        tagged("a-cafe", "A", "cafe", "10%", &["cafe"]),
        tagged("a-sbux", "A", "cafe", "50%", &["cafe", "starbucks"])
            .with_conditions("전월 실적 30만원 이상"),
        tagged("a-bakery", "A", "bakery", "5%", &["bakery"])
            .with_conditions("전월 실적 30만원 이상")
            .with_limit("월 5천원"),
        universal("a-cash", "A", "shopping", "1%"),
        tagged("b-movie", "B", "movie", "35%", &["movie", "cgv"]),
        Benefit::new("b-cash", "B", "b-cash title", "무제한 적립"),
        tagged("c-lounge", "C", "lounge", "무제한", &["airport", "lounge"])
            .with_conditions("전월 실적 50만원 이상")
            .with_limit("연 2회"),
    ];
    Catalogue::new(cards, benefits)
}

/// The built-in network table split back into catalogue groups for the
/// tiers used by [`sample_catalogue`].
#[must_use]
pub fn sample_network_tiers() -> Vec<NetworkTierBenefits> {
    let table = NetworkBenefitTable::builtin();
    [(Network::Visa, "Infinite"), (Network::Mastercard, "Platinum")]
        .into_iter()
        .map(|(network, grade)| NetworkTierBenefits {
            network,
            grade: grade.to_owned(),
            benefits: table.templates(network, grade).to_vec(),
        })
        .collect()
}
