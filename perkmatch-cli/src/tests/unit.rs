//! Focused unit tests covering shared CLI helpers and argument parsing.

use super::*;
use rstest::rstest;

#[rstest]
#[case("hana,kb", &["hana", "kb"])]
#[case(" hana , kb ,", &["hana", "kb"])]
#[case("", &[])]
#[case(",,", &[])]
fn split_list_trims_and_drops_blanks(#[case] raw: &str, #[case] expected: &[&str]) {
    assert_eq!(split_list(raw), expected);
}

#[rstest]
fn write_json_appends_a_newline() {
    let mut buffer = Vec::new();
    write_json(&mut buffer, &["a", "b"]).expect("write json");
    let text = String::from_utf8(buffer).expect("utf-8 output");
    assert!(text.ends_with("]\n"));
    let parsed: Vec<String> = serde_json::from_str(&text).expect("valid json");
    assert_eq!(parsed, vec!["a", "b"]);
}

#[rstest]
fn log_level_is_accepted_after_the_subcommand() {
    let cli = Cli::try_parse_from([
        "perkmatch",
        "search",
        "스벅",
        "--cards",
        "hana",
        "--log-level",
        "debug",
    ])
    .expect("arguments should parse");
    assert_eq!(cli.log_level.as_deref(), Some("debug"));
    match cli.command {
        Command::Search(args) => {
            assert_eq!(args.query.as_deref(), Some("스벅"));
            assert_eq!(args.cards.as_deref(), Some("hana"));
        }
        other => panic!("expected search command, found {other:?}"),
    }
}

#[rstest]
fn tags_and_place_are_mutually_exclusive() {
    let err = Cli::try_parse_from([
        "perkmatch",
        "rank",
        "--cards",
        "hana",
        "--tags",
        "cafe",
        "--place",
        "place.json",
    ])
    .expect_err("conflicting arguments should fail");
    assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
}

#[rstest]
fn unknown_subcommands_are_rejected() {
    let err = Cli::try_parse_from(["perkmatch", "solve"]).expect_err("unknown subcommand");
    assert_eq!(err.kind(), clap::error::ErrorKind::InvalidSubcommand);
}
