//! Search command implementation for the perkmatch CLI.

use std::io::Write;
use std::sync::Arc;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use perkmatch_engine::{EnrichedBenefit, QueryExpander};
use serde::{Deserialize, Serialize};

use crate::catalogue::LoadedCatalogue;
use crate::fs::require_existing;
use crate::{
    ARG_CARDS, ARG_CATALOGUE, ARG_LIMIT, ARG_QUERY, ARG_WEIGHTS, CliError, ENV_SEARCH_CARDS,
    ENV_SEARCH_CATALOGUE, ENV_SEARCH_QUERY, split_list, write_json,
};

/// Results returned when `--limit` is not given.
pub(crate) const DEFAULT_SEARCH_LIMIT: usize = 10;

/// CLI arguments for the `search` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "search",
    long_about = "Search the user's benefits. Brand names and nicknames expand \
                 to their category before matching categories, place tags \
                 and titles.",
    about = "Search benefits by brand or category"
)]
#[ortho_config(prefix = "PERKMATCH")]
pub(crate) struct SearchArgs {
    /// Path to the JSON benefit catalogue.
    #[arg(long = ARG_CATALOGUE, value_name = "path")]
    #[serde(default)]
    pub(crate) catalogue: Option<Utf8PathBuf>,
    /// Comma-separated ids of the cards the user holds.
    #[arg(long = ARG_CARDS, value_name = "ids")]
    #[serde(default)]
    pub(crate) cards: Option<String>,
    /// Free-text query, e.g. "스벅" or "cafe".
    #[arg(value_name = "query")]
    #[serde(default)]
    pub(crate) query: Option<String>,
    /// Maximum number of results.
    #[arg(long = ARG_LIMIT, value_name = "count")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    /// Path to a JSON file overriding value weights.
    #[arg(long = ARG_WEIGHTS, value_name = "path")]
    #[serde(default)]
    pub(crate) weights: Option<Utf8PathBuf>,
}

impl SearchArgs {
    pub(crate) fn into_config(self) -> Result<SearchConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SearchConfig::try_from(merged)
    }
}

/// Resolved `search` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SearchConfig {
    pub(crate) catalogue: Utf8PathBuf,
    pub(crate) card_ids: Vec<String>,
    pub(crate) query: String,
    pub(crate) limit: usize,
    pub(crate) weights: Option<Utf8PathBuf>,
}

impl SearchConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.catalogue, ARG_CATALOGUE)?;
        if let Some(path) = &self.weights {
            require_existing(path, ARG_WEIGHTS)?;
        }
        Ok(())
    }
}

impl TryFrom<SearchArgs> for SearchConfig {
    type Error = CliError;

    fn try_from(args: SearchArgs) -> Result<Self, Self::Error> {
        let catalogue = args.catalogue.ok_or(CliError::MissingArgument {
            field: ARG_CATALOGUE,
            env: ENV_SEARCH_CATALOGUE,
        })?;
        let cards = args.cards.ok_or(CliError::MissingArgument {
            field: ARG_CARDS,
            env: ENV_SEARCH_CARDS,
        })?;
        let query = args
            .query
            .filter(|text| !text.trim().is_empty())
            .ok_or(CliError::MissingArgument {
                field: ARG_QUERY,
                env: ENV_SEARCH_QUERY,
            })?;
        Ok(Self {
            catalogue,
            card_ids: split_list(&cards),
            query,
            limit: args.limit.unwrap_or(DEFAULT_SEARCH_LIMIT),
            weights: args.weights,
        })
    }
}

pub(crate) fn run_search_with(args: SearchArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let results = execute_search(&config)?;
    write_json(writer, &results)
}

/// Run the configured search with the default vocabulary.
pub(crate) fn execute_search(
    config: &SearchConfig,
) -> Result<Vec<Arc<EnrichedBenefit>>, CliError> {
    let loaded = LoadedCatalogue::open(&config.catalogue, config.weights.as_deref())?;
    loaded.report_unknown_cards(&config.card_ids);
    let expander = QueryExpander::default();
    Ok(loaded
        .index
        .search_query(&config.card_ids, &config.query, &expander, config.limit))
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SearchConfig, CliError> {
    let merged = SearchArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SearchConfig::try_from(merged)
}
