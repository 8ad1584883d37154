//! Issuer benefits attached to a single card.
//!
//! A benefit applies either everywhere or only at places carrying one of its
//! tags. [`Scope`] makes that distinction explicit instead of overloading an
//! empty tag list.

/// Where a benefit can be used.
///
/// Catalogue data encodes this as a `placeTags` array: absent or empty means
/// [`Scope::Universal`], anything else is [`Scope::Tagged`].
///
/// # Examples
/// ```
/// use perkmatch_core::Scope;
///
/// let scope = Scope::from(vec!["cafe".to_owned()]);
/// assert!(scope.matches_any(&["cafe", "bakery"]));
///
/// let everywhere = Scope::from(Vec::new());
/// assert!(everywhere.is_universal());
/// assert!(everywhere.tags().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "Vec<String>", into = "Vec<String>")
)]
pub enum Scope {
    /// Usable at any place.
    #[default]
    Universal,
    /// Usable only at places sharing at least one of these tags.
    Tagged(Vec<String>),
}

impl Scope {
    /// Report whether the benefit applies everywhere.
    #[must_use]
    pub const fn is_universal(&self) -> bool {
        matches!(self, Self::Universal)
    }

    /// Place tags restricting the benefit; empty when universal.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        match self {
            Self::Universal => &[],
            Self::Tagged(tags) => tags.as_slice(),
        }
    }

    /// Report whether any of `place_tags` intersects this scope's tags.
    ///
    /// Universal scopes never match by tag; callers surface them separately.
    #[must_use]
    pub fn matches_any<S: AsRef<str>>(&self, place_tags: &[S]) -> bool {
        self.tags()
            .iter()
            .any(|tag| place_tags.iter().any(|place| place.as_ref() == tag))
    }
}

impl From<Vec<String>> for Scope {
    fn from(tags: Vec<String>) -> Self {
        if tags.is_empty() {
            Self::Universal
        } else {
            Self::Tagged(tags)
        }
    }
}

impl From<Scope> for Vec<String> {
    fn from(scope: Scope) -> Self {
        match scope {
            Scope::Universal => Self::new(),
            Scope::Tagged(tags) => tags,
        }
    }
}

/// A single perk offered by one card.
///
/// # Examples
/// ```
/// use perkmatch_core::{Benefit, Scope};
///
/// let benefit = Benefit::new("b1", "c1", "Starbucks 10% off", "10%")
///     .with_category("cafe")
///     .with_place_tags(["cafe", "starbucks"]);
/// assert_eq!(benefit.scope.tags().len(), 2);
/// assert_eq!(benefit.category.as_deref(), Some("cafe"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Benefit {
    /// Catalogue identifier.
    pub id: String,
    /// Identifier of the owning [`Card`](crate::Card).
    pub card_id: String,
    /// Benefit category, e.g. `cafe` or `lounge`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub category: Option<String>,
    /// Headline shown to the user.
    pub title: String,
    /// Display value such as `10%` or `무제한`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub value: String,
    /// Longer description.
    #[cfg_attr(feature = "serde", serde(default))]
    pub desc: String,
    /// Usage conditions, e.g. a minimum monthly spend.
    #[cfg_attr(feature = "serde", serde(default))]
    pub conditions: Option<String>,
    /// Where the benefit applies.
    #[cfg_attr(feature = "serde", serde(default, rename = "placeTags"))]
    pub scope: Scope,
    /// Usage cap, e.g. a monthly discount ceiling.
    #[cfg_attr(feature = "serde", serde(default))]
    pub limit: Option<String>,
}

impl Benefit {
    /// Construct a universal benefit without category, conditions or limit.
    pub fn new(
        id: impl Into<String>,
        card_id: impl Into<String>,
        title: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            card_id: card_id.into(),
            category: None,
            title: title.into(),
            value: value.into(),
            desc: String::new(),
            conditions: None,
            scope: Scope::Universal,
            limit: None,
        }
    }

    /// Set the category while returning `self` for chaining.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Restrict the benefit to the given place tags.
    ///
    /// An empty iterator leaves the benefit universal.
    #[must_use]
    pub fn with_place_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scope = Scope::from(tags.into_iter().map(Into::into).collect::<Vec<String>>());
        self
    }

    /// Attach usage conditions.
    #[must_use]
    pub fn with_conditions(mut self, conditions: impl Into<String>) -> Self {
        self.conditions = Some(conditions.into());
        self
    }

    /// Attach a usage cap.
    #[must_use]
    pub fn with_limit(mut self, limit: impl Into<String>) -> Self {
        self.limit = Some(limit.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tags_become_universal() {
        let benefit =
            Benefit::new("b1", "c1", "Cashback", "1%").with_place_tags(Vec::<String>::new());
        assert!(benefit.scope.is_universal());
    }

    #[test]
    fn universal_scope_never_matches_tags() {
        assert!(!Scope::Universal.matches_any(&["cafe"]));
    }

    #[test]
    fn tagged_scope_requires_intersection() {
        let scope = Scope::from(vec!["airport".to_owned()]);
        assert!(!scope.matches_any(&["cafe", "bakery"]));
        assert!(scope.matches_any(&["airport"]));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn missing_place_tags_deserialise_as_universal() {
        let json = r#"{"id":"b1","cardId":"c1","title":"Cashback","value":"1%"}"#;
        let benefit: Benefit = serde_json::from_str(json).unwrap();
        assert_eq!(benefit.scope, Scope::Universal);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn place_tags_deserialise_as_tagged() {
        let json = r#"{"id":"b1","cardId":"c1","category":"cafe","title":"Coffee",
            "value":"10%","placeTags":["cafe"]}"#;
        let benefit: Benefit = serde_json::from_str(json).unwrap();
        assert_eq!(benefit.scope, Scope::Tagged(vec!["cafe".to_owned()]));
    }
}
