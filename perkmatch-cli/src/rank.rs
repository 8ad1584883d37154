//! Rank command implementation for the perkmatch CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use perkmatch_engine::{RankedCard, Ranker};
use serde::{Deserialize, Serialize};

use crate::catalogue::{LoadedCatalogue, load_place};
use crate::fs::require_existing;
use crate::{
    ARG_CARDS, ARG_CATALOGUE, ARG_PLACE, ARG_TAGS, ARG_WEIGHTS, CliError, ENV_RANK_CARDS,
    ENV_RANK_CATALOGUE, ENV_RANK_TAGS, split_list, write_json,
};

/// CLI arguments for the `rank` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "rank",
    long_about = "Rank the user's cards for a place. The place is given either \
                 as comma-separated tags or as a JSON place record; card \
                 benefits and network-tier perks are both credited.",
    about = "Rank cards for a place"
)]
#[ortho_config(prefix = "PERKMATCH")]
pub(crate) struct RankArgs {
    /// Path to the JSON benefit catalogue.
    #[arg(long = ARG_CATALOGUE, value_name = "path")]
    #[serde(default)]
    pub(crate) catalogue: Option<Utf8PathBuf>,
    /// Comma-separated ids of the cards the user holds.
    #[arg(long = ARG_CARDS, value_name = "ids")]
    #[serde(default)]
    pub(crate) cards: Option<String>,
    /// Comma-separated tags of the selected place.
    #[arg(long = ARG_TAGS, value_name = "tags", conflicts_with = ARG_PLACE)]
    #[serde(default)]
    pub(crate) tags: Option<String>,
    /// Path to a JSON place record whose tags are used.
    #[arg(long = ARG_PLACE, value_name = "path")]
    #[serde(default)]
    pub(crate) place: Option<Utf8PathBuf>,
    /// Path to a JSON file overriding value weights.
    #[arg(long = ARG_WEIGHTS, value_name = "path")]
    #[serde(default)]
    pub(crate) weights: Option<Utf8PathBuf>,
}

impl RankArgs {
    pub(crate) fn into_config(self) -> Result<RankConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RankConfig::try_from(merged)
    }
}

/// Where the place tags come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PlaceSource {
    /// Tags given directly.
    Tags(Vec<String>),
    /// Tags read from a place record.
    File(Utf8PathBuf),
}

/// Resolved `rank` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RankConfig {
    pub(crate) catalogue: Utf8PathBuf,
    pub(crate) card_ids: Vec<String>,
    pub(crate) place: PlaceSource,
    pub(crate) weights: Option<Utf8PathBuf>,
}

impl RankConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.catalogue, ARG_CATALOGUE)?;
        if let PlaceSource::File(path) = &self.place {
            require_existing(path, ARG_PLACE)?;
        }
        if let Some(path) = &self.weights {
            require_existing(path, ARG_WEIGHTS)?;
        }
        Ok(())
    }
}

impl TryFrom<RankArgs> for RankConfig {
    type Error = CliError;

    fn try_from(args: RankArgs) -> Result<Self, Self::Error> {
        let catalogue = args.catalogue.ok_or(CliError::MissingArgument {
            field: ARG_CATALOGUE,
            env: ENV_RANK_CATALOGUE,
        })?;
        let cards = args.cards.ok_or(CliError::MissingArgument {
            field: ARG_CARDS,
            env: ENV_RANK_CARDS,
        })?;
        let place = match (args.place, args.tags) {
            (Some(path), _) => PlaceSource::File(path),
            (None, Some(tags)) => PlaceSource::Tags(split_list(&tags)),
            (None, None) => {
                return Err(CliError::MissingArgument {
                    field: ARG_TAGS,
                    env: ENV_RANK_TAGS,
                });
            }
        };
        Ok(Self {
            catalogue,
            card_ids: split_list(&cards),
            place,
            weights: args.weights,
        })
    }
}

pub(crate) fn run_rank_with(args: RankArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let ranking = execute_rank(&config)?;
    write_json(writer, &ranking)
}

/// Rank the configured cards.
pub(crate) fn execute_rank(config: &RankConfig) -> Result<Vec<RankedCard>, CliError> {
    let loaded = LoadedCatalogue::open(&config.catalogue, config.weights.as_deref())?;
    loaded.report_unknown_cards(&config.card_ids);
    let ranker = Ranker::new(&loaded.index, &loaded.table, &loaded.weights);
    let ranking = match &config.place {
        PlaceSource::Tags(tags) => {
            let user_cards = loaded.index.cards_for(&config.card_ids);
            ranker.rank(&config.card_ids, tags, &user_cards)
        }
        PlaceSource::File(path) => {
            let place = load_place(path)?;
            ranker.rank_place(&place, &config.card_ids)
        }
    };
    Ok(ranking)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RankConfig, CliError> {
    let merged = RankArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RankConfig::try_from(merged)
}
