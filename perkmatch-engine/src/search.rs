//! Expand free-text benefit searches into a structural tag and title terms.
//!
//! Users type brand names and colloquial abbreviations ("스벅") rather than
//! catalogue tags. [`QueryExpander`] maps such queries to the tag the index
//! understands together with every synonym worth matching against titles.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::{BenefitIndex, EnrichedBenefit};

const DEFAULT_VOCABULARY: [(&str, &[&str]); 9] = [
    (
        "cafe",
        &["카페", "커피", "스타벅스", "스벅", "starbucks", "이디야", "투썸"],
    ),
    ("convenience", &["편의점", "gs25", "cu", "세븐일레븐"]),
    ("movie", &["영화", "cgv", "메가박스", "롯데시네마"]),
    ("fuel", &["주유", "주유소", "sk에너지", "gs칼텍스"]),
    ("lounge", &["라운지", "공항", "pp"]),
    ("dining", &["외식", "레스토랑", "음식점"]),
    ("shopping", &["쇼핑", "백화점", "마트"]),
    ("transport", &["교통", "택시", "버스", "지하철"]),
    ("bakery", &["베이커리", "빵", "파리바게뜨"]),
];

/// ASCII terms shorter than this resolve queries but never match titles.
const MIN_ASCII_TITLE_TERM: usize = 3;

/// A search query resolved to an index tag and title terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandedQuery {
    /// Category or place tag to match structurally.
    pub tag: String,
    /// Terms matched case-insensitively against benefit titles.
    pub terms: Vec<String>,
}

/// Synonym vocabulary keyed by index tag.
///
/// # Examples
/// ```
/// use perkmatch_engine::QueryExpander;
///
/// let expander = QueryExpander::default();
/// let query = expander.expand("스벅");
/// assert_eq!(query.tag, "cafe");
/// assert!(query.terms.iter().any(|term| term == "starbucks"));
///
/// let unknown = expander.expand("bookstore");
/// assert_eq!(unknown.tag, "bookstore");
/// assert_eq!(unknown.terms, vec!["bookstore".to_owned()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryExpander {
    vocabulary: BTreeMap<String, Vec<String>>,
}

impl QueryExpander {
    /// Create an expander without any synonyms.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            vocabulary: BTreeMap::new(),
        }
    }

    /// Register synonyms for `tag`, appending to any already present.
    #[must_use]
    pub fn with_synonyms<I, S>(mut self, tag: &str, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.vocabulary
            .entry(tag.to_owned())
            .or_default()
            .extend(synonyms.into_iter().map(Into::into));
        self
    }

    /// Resolve `query` to a tag and its title terms.
    ///
    /// A query equal (ignoring case) to a known tag or one of its synonyms
    /// expands to that tag; the terms list the query, the tag and every
    /// synonym without repeats. Short ASCII aliases such as `pp` select the
    /// tag but are left out of the terms, since they occur inside unrelated
    /// words. Other queries stand for themselves.
    #[must_use]
    pub fn expand(&self, query: &str) -> ExpandedQuery {
        let trimmed = query.trim();
        let needle = trimmed.to_lowercase();
        let hit = self.vocabulary.iter().find(|(tag, synonyms)| {
            tag.to_lowercase() == needle
                || synonyms
                    .iter()
                    .any(|synonym| synonym.to_lowercase() == needle)
        });
        let Some((tag, synonyms)) = hit else {
            return ExpandedQuery {
                tag: trimmed.to_owned(),
                terms: vec![trimmed.to_owned()],
            };
        };

        let mut terms: Vec<String> = Vec::with_capacity(synonyms.len().saturating_add(2));
        for term in std::iter::once(trimmed)
            .chain(std::iter::once(tag.as_str()))
            .chain(synonyms.iter().map(String::as_str))
        {
            if is_title_term(term)
                && !terms.iter().any(|known| known.eq_ignore_ascii_case(term))
            {
                terms.push(term.to_owned());
            }
        }
        ExpandedQuery {
            tag: tag.clone(),
            terms,
        }
    }
}

fn is_title_term(term: &str) -> bool {
    !(term.is_ascii() && term.len() < MIN_ASCII_TITLE_TERM)
}

impl Default for QueryExpander {
    fn default() -> Self {
        DEFAULT_VOCABULARY
            .iter()
            .fold(Self::empty(), |expander, (tag, synonyms)| {
                expander.with_synonyms(tag, synonyms.iter().copied())
            })
    }
}

impl BenefitIndex {
    /// Search the benefits of `card_ids` for a free-text `query`.
    ///
    /// The query is expanded with `expander` and passed to
    /// [`BenefitIndex::search`].
    #[must_use]
    pub fn search_query<S: AsRef<str>>(
        &self,
        card_ids: &[S],
        query: &str,
        expander: &QueryExpander,
        limit: usize,
    ) -> Vec<Arc<EnrichedBenefit>> {
        let expanded = expander.expand(query);
        self.search(card_ids, &expanded.tag, &expanded.terms, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("cafe")]
    #[case("CAFE")]
    #[case(" 커피 ")]
    #[case("Starbucks")]
    fn known_queries_resolve_to_their_tag(#[case] query: &str) {
        assert_eq!(QueryExpander::default().expand(query).tag, "cafe");
    }

    #[rstest]
    fn terms_start_with_the_query_and_skip_repeats() {
        let expander = QueryExpander::empty().with_synonyms("cafe", ["cafe", "커피", "Coffee"]);
        let expanded = expander.expand("coffee");
        assert_eq!(expanded.terms, vec!["coffee", "cafe", "커피"]);
    }

    #[rstest]
    #[case("라운지", "lounge")]
    #[case("PP", "lounge")]
    #[case("편의점", "convenience")]
    #[case("cu", "convenience")]
    fn short_aliases_resolve_but_never_become_terms(#[case] query: &str, #[case] tag: &str) {
        let expanded = QueryExpander::default().expand(query);
        assert_eq!(expanded.tag, tag);
        assert!(
            expanded
                .terms
                .iter()
                .all(|term| !(term.is_ascii() && term.len() < 3)),
            "{:?}",
            expanded.terms
        );
    }

    #[rstest]
    fn synonyms_accumulate_per_tag() {
        let expander = QueryExpander::empty()
            .with_synonyms("fuel", ["주유"])
            .with_synonyms("fuel", ["gas"]);
        assert_eq!(expander.expand("gas").terms, vec!["gas", "fuel", "주유"]);
    }
}
