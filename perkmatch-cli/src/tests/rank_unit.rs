//! Focused unit tests covering rank CLI configuration and execution.

use super::helpers::Workspace;
use super::*;
use crate::rank::{PlaceSource, RankConfig, config_from_layers_for_test, execute_rank};
use rstest::rstest;

fn full_args(workspace: &Workspace) -> RankArgs {
    RankArgs {
        catalogue: Some(workspace.catalogue()),
        cards: Some("hana,kb".to_owned()),
        tags: Some("cafe,starbucks".to_owned()),
        place: None,
        weights: None,
    }
}

#[rstest]
#[case::catalogue(ARG_CATALOGUE, ENV_RANK_CATALOGUE)]
#[case::cards(ARG_CARDS, ENV_RANK_CARDS)]
#[case::tags(ARG_TAGS, ENV_RANK_TAGS)]
fn converting_without_required_fields_errors(
    #[case] field: &'static str,
    #[case] env_var: &'static str,
) {
    let workspace = Workspace::new();
    let mut args = full_args(&workspace);
    match field {
        ARG_CATALOGUE => args.catalogue = None,
        ARG_CARDS => args.cards = None,
        _ => args.tags = None,
    }

    let err = RankConfig::try_from(args).expect_err("missing field should error");
    match err {
        CliError::MissingArgument {
            field: missing,
            env,
        } => {
            assert_eq!(missing, field);
            assert_eq!(env, env_var);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn place_file_replaces_tags() {
    let workspace = Workspace::new();
    let place = workspace.path("place.json");
    let args = RankArgs {
        tags: None,
        place: Some(place.clone()),
        ..full_args(&workspace)
    };

    let config = RankConfig::try_from(args).expect("config should build");
    assert_eq!(config.place, PlaceSource::File(place));
    assert_eq!(config.card_ids, vec!["hana", "kb"]);
}

#[rstest]
fn validate_sources_reports_missing_catalogue() {
    let workspace = Workspace::new();
    let config = RankConfig {
        catalogue: workspace.path("missing.json"),
        card_ids: vec!["hana".to_owned()],
        place: PlaceSource::Tags(vec!["cafe".to_owned()]),
        weights: None,
    };

    let err = config.validate_sources().expect_err("expected failure");
    match err {
        CliError::MissingSourceFile { field, .. } => assert_eq!(field, ARG_CATALOGUE),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_rejects_directories() {
    let workspace = Workspace::new();
    let weights_dir = workspace.path("weights");
    std::fs::create_dir(&weights_dir).expect("weights directory");
    let config = RankConfig {
        catalogue: workspace.catalogue(),
        card_ids: vec!["hana".to_owned()],
        place: PlaceSource::Tags(vec!["cafe".to_owned()]),
        weights: Some(weights_dir.clone()),
    };

    let err = config
        .validate_sources()
        .expect_err("expected directory path to fail validation");
    match err {
        CliError::SourcePathNotFile { field, path } => {
            assert_eq!(field, ARG_WEIGHTS);
            assert_eq!(path, weights_dir);
        }
        other => panic!("expected SourcePathNotFile, found {other:?}"),
    }
}

#[rstest]
fn execute_rank_scores_the_place_tags() {
    let workspace = Workspace::new();
    let config = RankConfig::try_from(full_args(&workspace)).expect("config should build");

    let ranking = execute_rank(&config).expect("ranking should succeed");

    assert_eq!(ranking.len(), 1);
    assert_eq!(ranking[0].card_id, "hana");
    assert_eq!(ranking[0].total_value, 18_000);
    assert_eq!(ranking[0].caveats, vec!["전월 실적 30만원 이상"]);
}

#[rstest]
fn execute_rank_reads_place_records() {
    let workspace = Workspace::new();
    let place = workspace.write(
        "place.json",
        r#"{"id": "icn", "name": "Incheon T1", "type": "airport",
            "lat": 37.449, "lng": 126.451, "tags": ["airport"]}"#,
    );
    let args = RankArgs {
        tags: None,
        place: Some(place),
        ..full_args(&workspace)
    };
    let config = RankConfig::try_from(args).expect("config should build");

    let ranking = execute_rank(&config).expect("ranking should succeed");

    let ids: Vec<&str> = ranking.iter().map(|ranked| ranked.card_id.as_str()).collect();
    assert_eq!(ids, vec!["hana", "kb"]);
    assert_eq!(ranking[0].reasons, vec!["VISA Infinite · 공항 라운지"]);
}

#[rstest]
fn execute_rank_reports_malformed_places() {
    let workspace = Workspace::new();
    let place = workspace.write("place.json", "{ not json");
    let config = RankConfig {
        catalogue: workspace.catalogue(),
        card_ids: vec!["hana".to_owned()],
        place: PlaceSource::File(place.clone()),
        weights: None,
    };

    let err = execute_rank(&config).expect_err("malformed place should fail");
    match err {
        CliError::Catalogue(CatalogueError::Parse { what, path, .. }) => {
            assert_eq!(what, "place");
            assert_eq!(path, place);
        }
        other => panic!("expected place parse error, found {other:?}"),
    }
}

#[rstest]
fn run_rank_with_prints_json() {
    let workspace = Workspace::new();
    let mut buffer = Vec::new();

    run_rank_with(full_args(&workspace), &mut buffer).expect("rank should succeed");

    let output: serde_json::Value =
        serde_json::from_slice(&buffer).expect("output should be JSON");
    assert_eq!(output[0]["cardId"], "hana");
    assert_eq!(output[0]["totalValue"], 18_000);
    assert_eq!(output[0]["benefitIds"][0], "h-sbux");
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "cards": 42 }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let workspace = Workspace::new();
    let file_catalogue = workspace.path("from-file.json");
    let env_catalogue = workspace.path("from-env.json");
    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "catalogue": file_catalogue.as_str(),
            "cards": "hana",
            "tags": "movie",
        }),
        None,
    );
    composer.push_environment(json!({
        "catalogue": env_catalogue.as_str(),
        "tags": "cafe",
    }));
    composer.push_cli(json!({ "tags": "airport,lounge" }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.catalogue, env_catalogue);
    assert_eq!(config.card_ids, vec!["hana"]);
    assert_eq!(
        config.place,
        PlaceSource::Tags(vec!["airport".to_owned(), "lounge".to_owned()])
    );
}
