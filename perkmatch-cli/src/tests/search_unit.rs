//! Focused unit tests covering search CLI configuration and execution.

use super::helpers::Workspace;
use super::*;
use crate::search::{
    DEFAULT_SEARCH_LIMIT, SearchConfig, config_from_layers_for_test, execute_search,
};
use rstest::rstest;

fn args_for(workspace: &Workspace, query: &str) -> SearchArgs {
    SearchArgs {
        catalogue: Some(workspace.catalogue()),
        cards: Some("hana,kb".to_owned()),
        query: Some(query.to_owned()),
        limit: None,
        weights: None,
    }
}

#[rstest]
#[case::absent(None)]
#[case::blank(Some("   "))]
fn converting_without_a_query_errors(#[case] query: Option<&str>) {
    let workspace = Workspace::new();
    let args = SearchArgs {
        query: query.map(str::to_owned),
        ..args_for(&workspace, "unused")
    };

    let err = SearchConfig::try_from(args).expect_err("missing query should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_QUERY);
            assert_eq!(env, ENV_SEARCH_QUERY);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn limit_defaults_when_unset() {
    let workspace = Workspace::new();
    let config = SearchConfig::try_from(args_for(&workspace, "cafe")).expect("config");
    assert_eq!(config.limit, DEFAULT_SEARCH_LIMIT);
}

#[rstest]
#[case::nickname("스벅", &["h-sbux", "h-cafe"])]
#[case::brand_title("CGV", &["k-movie"])]
#[case::unmatched("bookstore", &[])]
fn execute_search_expands_queries(#[case] query: &str, #[case] expected: &[&str]) {
    let workspace = Workspace::new();
    let config = SearchConfig::try_from(args_for(&workspace, query)).expect("config");

    let results = execute_search(&config).expect("search should succeed");

    let ids: Vec<&str> = results.iter().map(|entry| entry.id()).collect();
    assert_eq!(ids, expected);
}

#[rstest]
fn execute_search_honours_the_limit() {
    let workspace = Workspace::new();
    let args = SearchArgs {
        limit: Some(1),
        ..args_for(&workspace, "cafe")
    };
    let config = SearchConfig::try_from(args).expect("config");

    let results = execute_search(&config).expect("search should succeed");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id(), "h-sbux");
}

#[rstest]
fn execute_search_reports_missing_catalogues() {
    let workspace = Workspace::new();
    let config = SearchConfig {
        catalogue: workspace.path("absent.json"),
        card_ids: vec!["hana".to_owned()],
        query: "cafe".to_owned(),
        limit: 5,
        weights: None,
    };

    let err = execute_search(&config).expect_err("missing catalogue should fail");
    match err {
        CliError::Catalogue(CatalogueError::Open { what, .. }) => assert_eq!(what, "catalogue"),
        other => panic!("expected catalogue open error, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_read_limit_from_environment() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let workspace = Workspace::new();
    let catalogue = workspace.catalogue();
    let mut composer = MergeComposer::new();
    composer.push_environment(json!({ "limit": 3, "cards": "kb" }));
    composer.push_cli(json!({
        "catalogue": catalogue.as_str(),
        "query": "영화",
    }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.limit, 3);
    assert_eq!(config.card_ids, vec!["kb"]);
    assert_eq!(config.query, "영화");
}
