//! Load catalogue, weights and place files from disk.

use std::io::BufReader;

use camino::{Utf8Path, Utf8PathBuf};
use log::{info, warn};
use perkmatch_core::{Catalogue, NetworkBenefitTable, Place, ValueWeights};
use perkmatch_engine::BenefitIndex;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::fs::open_utf8_file;

/// Errors raised while reading JSON inputs.
#[derive(Debug, Error)]
pub enum CatalogueError {
    /// The file could not be opened.
    #[error("failed to open {what} at {path:?}: {source}")]
    Open {
        /// Kind of input being read.
        what: &'static str,
        /// Path of the file.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid JSON for the expected shape.
    #[error("failed to parse {what} JSON at {path:?}: {source}")]
    Parse {
        /// Kind of input being read.
        what: &'static str,
        /// Path of the file.
        path: Utf8PathBuf,
        /// Decoder failure, including unknown network labels.
        #[source]
        source: serde_json::Error,
    },
}

fn read_json<T: DeserializeOwned>(
    path: &Utf8Path,
    what: &'static str,
) -> Result<T, CatalogueError> {
    let file = open_utf8_file(path).map_err(|source| CatalogueError::Open {
        what,
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CatalogueError::Parse {
        what,
        path: path.to_path_buf(),
        source,
    })
}

/// Load a catalogue JSON file.
pub(crate) fn load_catalogue(path: &Utf8Path) -> Result<Catalogue, CatalogueError> {
    let catalogue: Catalogue = read_json(path, "catalogue")?;
    info!(
        "loaded {} cards and {} benefits from {path}",
        catalogue.cards.len(),
        catalogue.benefits.len()
    );
    Ok(catalogue)
}

/// Load value weights, falling back to the defaults when no file is given.
pub(crate) fn load_weights(path: Option<&Utf8Path>) -> Result<ValueWeights, CatalogueError> {
    path.map_or_else(|| Ok(ValueWeights::default()), |file| read_json(file, "weights"))
}

/// Load a place JSON file.
pub(crate) fn load_place(path: &Utf8Path) -> Result<Place, CatalogueError> {
    read_json(path, "place")
}

/// Everything a query needs once the inputs are loaded.
pub(crate) struct LoadedCatalogue {
    pub(crate) index: BenefitIndex,
    pub(crate) table: NetworkBenefitTable,
    pub(crate) weights: ValueWeights,
}

impl LoadedCatalogue {
    /// Load the catalogue and weights and build the index.
    ///
    /// Catalogues without network templates use the built-in table.
    pub(crate) fn open(
        catalogue_path: &Utf8Path,
        weights_path: Option<&Utf8Path>,
    ) -> Result<Self, CatalogueError> {
        let loaded = load_catalogue(catalogue_path)?;
        let weights = load_weights(weights_path)?;
        let table = if loaded.network_benefits.is_empty() {
            info!("catalogue has no network benefits; using the built-in table");
            NetworkBenefitTable::builtin()
        } else {
            loaded.network_table()
        };
        let index = BenefitIndex::from_catalogue(&loaded, &weights);
        Ok(Self {
            index,
            table,
            weights,
        })
    }

    /// Warn about requested card ids the catalogue does not know.
    pub(crate) fn report_unknown_cards(&self, card_ids: &[String]) {
        for id in card_ids {
            if self.index.card(id).is_none() {
                warn!("card {id} is not in the catalogue");
            }
        }
    }
}
