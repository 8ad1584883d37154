//! Estimate command implementation for the perkmatch CLI.
//!
//! Prints the index summary together with the estimated value of each
//! benefit, which is handy when tuning a weights file.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use perkmatch_engine::{EnrichedBenefit, IndexStats};
use serde::{Deserialize, Serialize};

use crate::catalogue::LoadedCatalogue;
use crate::fs::require_existing;
use crate::{
    ARG_CARDS, ARG_CATALOGUE, ARG_WEIGHTS, CliError, ENV_ESTIMATE_CATALOGUE, split_list,
    write_json,
};

/// CLI arguments for the `estimate` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "estimate",
    long_about = "Report the estimated value the ranking assigns to each \
                 benefit, optionally restricted to some cards. Without a card \
                 list, benefits of cards missing from the catalogue follow the \
                 catalogue's own cards. Pass a weights file to preview the \
                 effect of new tuning values.",
    about = "Show estimated benefit values"
)]
#[ortho_config(prefix = "PERKMATCH")]
pub(crate) struct EstimateArgs {
    /// Path to the JSON benefit catalogue.
    #[arg(long = ARG_CATALOGUE, value_name = "path")]
    #[serde(default)]
    pub(crate) catalogue: Option<Utf8PathBuf>,
    /// Comma-separated card ids; every card when omitted.
    #[arg(long = ARG_CARDS, value_name = "ids")]
    #[serde(default)]
    pub(crate) cards: Option<String>,
    /// Path to a JSON file overriding value weights.
    #[arg(long = ARG_WEIGHTS, value_name = "path")]
    #[serde(default)]
    pub(crate) weights: Option<Utf8PathBuf>,
}

impl EstimateArgs {
    pub(crate) fn into_config(self) -> Result<EstimateConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        EstimateConfig::try_from(merged)
    }
}

/// Resolved `estimate` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EstimateConfig {
    pub(crate) catalogue: Utf8PathBuf,
    pub(crate) card_ids: Option<Vec<String>>,
    pub(crate) weights: Option<Utf8PathBuf>,
}

impl EstimateConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.catalogue, ARG_CATALOGUE)?;
        if let Some(path) = &self.weights {
            require_existing(path, ARG_WEIGHTS)?;
        }
        Ok(())
    }
}

impl TryFrom<EstimateArgs> for EstimateConfig {
    type Error = CliError;

    fn try_from(args: EstimateArgs) -> Result<Self, Self::Error> {
        let catalogue = args.catalogue.ok_or(CliError::MissingArgument {
            field: ARG_CATALOGUE,
            env: ENV_ESTIMATE_CATALOGUE,
        })?;
        Ok(Self {
            catalogue,
            card_ids: args.cards.as_deref().map(split_list),
            weights: args.weights,
        })
    }
}

/// One benefit and the value it ranks with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BenefitEstimate {
    pub(crate) id: String,
    pub(crate) card_id: String,
    pub(crate) category: Option<String>,
    pub(crate) value: String,
    pub(crate) estimated_value: u32,
}

impl From<&EnrichedBenefit> for BenefitEstimate {
    fn from(entry: &EnrichedBenefit) -> Self {
        Self {
            id: entry.benefit.id.clone(),
            card_id: entry.benefit.card_id.clone(),
            category: entry.benefit.category.clone(),
            value: entry.benefit.value.clone(),
            estimated_value: entry.estimated_value,
        }
    }
}

/// Output of the `estimate` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct EstimateReport {
    pub(crate) stats: IndexStats,
    pub(crate) benefits: Vec<BenefitEstimate>,
}

pub(crate) fn run_estimate_with(
    args: EstimateArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let report = execute_estimate(&config)?;
    write_json(writer, &report)
}

/// Estimate every benefit of the configured cards, grouped by card.
pub(crate) fn execute_estimate(config: &EstimateConfig) -> Result<EstimateReport, CliError> {
    let loaded = LoadedCatalogue::open(&config.catalogue, config.weights.as_deref())?;
    let card_ids: Vec<String> = match &config.card_ids {
        Some(ids) => {
            loaded.report_unknown_cards(ids);
            ids.clone()
        }
        None => loaded
            .index
            .cards()
            .iter()
            .map(|card| card.id.clone())
            .collect(),
    };
    let mut entries = loaded.index.by_card_ids(&card_ids);
    if config.card_ids.is_none() {
        entries.extend(loaded.index.orphaned());
    }
    let benefits = entries
        .iter()
        .map(|entry| BenefitEstimate::from(entry.as_ref()))
        .collect();
    Ok(EstimateReport {
        stats: loaded.index.stats(),
        benefits,
    })
}
