//! Focused unit tests covering the estimate command.

use super::helpers::Workspace;
use super::*;
use crate::estimate::{EstimateConfig, execute_estimate};
use rstest::rstest;

fn estimates(config: &EstimateConfig) -> Vec<(String, u32)> {
    execute_estimate(config)
        .expect("estimate should succeed")
        .benefits
        .into_iter()
        .map(|benefit| (benefit.id, benefit.estimated_value))
        .collect()
}

#[rstest]
fn estimates_every_card_in_catalogue_order() {
    let workspace = Workspace::new();
    let config = EstimateConfig {
        catalogue: workspace.catalogue(),
        card_ids: None,
        weights: None,
    };

    let report = execute_estimate(&config).expect("estimate should succeed");

    assert_eq!(report.stats.benefits, 4);
    assert_eq!(report.stats.universal, 1);
    assert_eq!(
        estimates(&config),
        vec![
            ("h-sbux".to_owned(), 13_000),
            ("h-cafe".to_owned(), 5_000),
            ("k-cash".to_owned(), 30_000),
            ("k-movie".to_owned(), 14_000),
        ]
    );
}

#[rstest]
fn benefits_of_missing_cards_follow_the_catalogue_cards() {
    let workspace = Workspace::new();
    let catalogue = workspace.write(
        "catalogue.json",
        r#"{"cards": [{"id": "hana", "issuer": "Hana", "name": "Hana Infinite",
            "shortName": "Infinite", "network": "VISA", "grade": "Infinite"}],
            "benefits": [
              {"id": "ghost", "cardId": "retired", "category": "movie", "title": "Old",
               "value": "50%", "placeTags": ["movie"]},
              {"id": "h-cafe", "cardId": "hana", "category": "cafe", "title": "Cafe",
               "value": "10%", "placeTags": ["cafe"]}
            ]}"#,
    );
    let everything = EstimateConfig {
        catalogue,
        card_ids: None,
        weights: None,
    };

    let report = execute_estimate(&everything).expect("estimate should succeed");

    assert_eq!(report.stats.orphaned, 1);
    assert_eq!(
        estimates(&everything),
        vec![("h-cafe".to_owned(), 5_000), ("ghost".to_owned(), 17_000)]
    );

    let hana_only = EstimateConfig {
        card_ids: Some(vec!["hana".to_owned()]),
        ..everything
    };
    assert_eq!(estimates(&hana_only), vec![("h-cafe".to_owned(), 5_000)]);
}

#[rstest]
fn weights_file_overrides_defaults() {
    let workspace = Workspace::new();
    let weights = workspace.write(
        "weights.json",
        r#"{"unlimitedBonus": 0, "categoryWeights": {"movie": 1000}}"#,
    );
    let config = EstimateConfig {
        catalogue: workspace.catalogue(),
        card_ids: Some(vec!["kb".to_owned()]),
        weights: Some(weights),
    };

    assert_eq!(
        estimates(&config),
        vec![("k-movie".to_owned(), 8_000), ("k-cash".to_owned(), 0)]
    );
}

#[rstest]
fn malformed_weights_are_reported() {
    let workspace = Workspace::new();
    let weights = workspace.write("weights.json", r#"{"unlimitedBonus": "lots"}"#);
    let config = EstimateConfig {
        catalogue: workspace.catalogue(),
        card_ids: None,
        weights: Some(weights),
    };

    let err = execute_estimate(&config).expect_err("malformed weights should fail");
    match err {
        CliError::Catalogue(CatalogueError::Parse { what, .. }) => assert_eq!(what, "weights"),
        other => panic!("expected weights parse error, found {other:?}"),
    }
}

#[rstest]
fn unknown_networks_fail_catalogue_parsing() {
    let workspace = Workspace::new();
    let catalogue = workspace.write(
        "catalogue.json",
        r#"{"cards": [{"id": "d", "issuer": "X", "name": "Diners", "shortName": "D",
            "network": "Diners", "grade": "Club"}]}"#,
    );
    let config = EstimateConfig {
        catalogue,
        card_ids: None,
        weights: None,
    };

    let err = execute_estimate(&config).expect_err("unknown network should fail");
    match err {
        CliError::Catalogue(CatalogueError::Parse { what, source, .. }) => {
            assert_eq!(what, "catalogue");
            assert!(source.to_string().contains("Diners"), "{source}");
        }
        other => panic!("expected catalogue parse error, found {other:?}"),
    }
}

#[rstest]
fn missing_catalogue_argument_names_the_environment_variable() {
    let err = EstimateConfig::try_from(EstimateArgs::default()).expect_err("missing catalogue");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_CATALOGUE);
            assert_eq!(env, ENV_ESTIMATE_CATALOGUE);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}
