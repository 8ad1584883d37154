//! Estimate the monetary value of a benefit for ranking.
//!
//! The estimate is a synthetic score in won: a per-category base weight plus
//! a bonus derived from the display value. It never fails; display strings
//! that cannot be read simply earn no bonus.

use std::collections::BTreeMap;

use crate::Benefit;

/// Display marker for benefits without a usage cap.
pub const UNLIMITED_MARKER: &str = "무제한";

const DEFAULT_CATEGORY_WEIGHTS: [(&str, u32); 15] = [
    ("lounge", 25_000),
    ("travel", 15_000),
    ("hotel", 12_000),
    ("golf", 10_000),
    ("dining", 8_000),
    ("movie", 7_000),
    ("shopping", 5_000),
    ("fuel", 5_000),
    ("telecom", 4_000),
    ("culture", 4_000),
    ("cafe", 3_000),
    ("transport", 3_000),
    ("convenience", 2_000),
    ("bakery", 2_000),
    ("delivery", 2_000),
];

/// Tuning constants for value estimation.
///
/// Every field is optional when deserialising, so a weights file only needs
/// the values it overrides.
///
/// # Examples
/// ```
/// use perkmatch_core::{Benefit, ValueWeights};
///
/// let weights = ValueWeights::default();
/// let lounge = Benefit::new("b1", "c1", "Lounge", "무제한").with_category("lounge");
/// assert_eq!(weights.estimate(&lounge), 55_000);
///
/// let shopping = Benefit::new("b2", "c1", "Mall", "10%").with_category("shopping");
/// assert_eq!(weights.estimate(&shopping), 7_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct ValueWeights {
    /// Base weight per benefit category; unknown categories weigh zero.
    pub category_weights: BTreeMap<String, u32>,
    /// Substring marking a benefit as unlimited.
    pub unlimited_marker: String,
    /// Bonus added to unlimited benefits.
    pub unlimited_bonus: u32,
    /// Bonus per percentage point found in the display value.
    pub percent_multiplier: u32,
    /// Value assigned to network-tier templates that carry none.
    pub network_default_value: u32,
}

impl Default for ValueWeights {
    fn default() -> Self {
        Self {
            category_weights: DEFAULT_CATEGORY_WEIGHTS
                .iter()
                .map(|&(category, weight)| (category.to_owned(), weight))
                .collect(),
            unlimited_marker: UNLIMITED_MARKER.to_owned(),
            unlimited_bonus: 30_000,
            percent_multiplier: 200,
            network_default_value: 10_000,
        }
    }
}

impl ValueWeights {
    /// Estimate the value of `benefit`.
    #[must_use]
    pub fn estimate(&self, benefit: &Benefit) -> u32 {
        self.estimate_parts(benefit.category.as_deref(), &benefit.value)
    }

    /// Estimate from a category and display value without a full record.
    #[must_use]
    pub fn estimate_parts(&self, category: Option<&str>, value: &str) -> u32 {
        let base = category
            .and_then(|name| self.category_weights.get(name))
            .copied()
            .unwrap_or(0);
        if !self.unlimited_marker.is_empty() && value.contains(self.unlimited_marker.as_str()) {
            return base.saturating_add(self.unlimited_bonus);
        }
        percent_hundredths(value).map_or(base, |hundredths| {
            base.saturating_add(self.percent_bonus(hundredths))
        })
    }

    /// Weight configured for `category`, or zero.
    #[must_use]
    pub fn category_weight(&self, category: &str) -> u32 {
        self.category_weights.get(category).copied().unwrap_or(0)
    }

    #[expect(
        clippy::integer_division,
        reason = "percentages are tracked in hundredths and truncated to whole won"
    )]
    fn percent_bonus(&self, hundredths: u64) -> u32 {
        let scaled = hundredths.saturating_mul(u64::from(self.percent_multiplier)) / 100;
        u32::try_from(scaled).unwrap_or(u32::MAX)
    }
}

/// Estimate `benefit` with the default weights.
///
/// # Examples
/// ```
/// use perkmatch_core::{Benefit, estimate_value};
///
/// let unknown = Benefit::new("b1", "c1", "Mystery", "see terms").with_category("misc");
/// assert_eq!(estimate_value(&unknown), 0);
/// ```
#[must_use]
pub fn estimate_value(benefit: &Benefit) -> u32 {
    ValueWeights::default().estimate(benefit)
}

/// Locate the first number written directly before a `%` sign.
///
/// Returns the figure in hundredths of a percent so `1.5%` becomes `150`.
fn percent_hundredths(value: &str) -> Option<u64> {
    let mut segments: Vec<&str> = value.split('%').collect();
    // The final segment follows the last `%` and cannot carry a figure.
    segments.pop();
    segments.into_iter().find_map(trailing_figure)
}

fn trailing_figure(segment: &str) -> Option<u64> {
    let mut figure: Vec<char> = segment
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    figure.reverse();
    let text: String = figure.into_iter().collect();
    let trimmed = text.trim_start_matches('.');
    let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
    let fraction_digits: Vec<u64> = fraction
        .chars()
        .take_while(char::is_ascii_digit)
        .take(2)
        .filter_map(|c| c.to_digit(10).map(u64::from))
        .collect();
    if whole.is_empty() && fraction_digits.is_empty() {
        return None;
    }
    let whole_value = if whole.is_empty() {
        0
    } else {
        whole.parse::<u64>().ok()?
    };
    let fraction_value = match fraction_digits.as_slice() {
        [tenths] => tenths.saturating_mul(10),
        [tenths, hundredths] => tenths.saturating_mul(10).saturating_add(*hundredths),
        _ => 0,
    };
    Some(whole_value.saturating_mul(100).saturating_add(fraction_value))
}
