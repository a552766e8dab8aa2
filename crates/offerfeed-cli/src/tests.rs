use super::*;

#[test]
fn no_arguments_is_usage() {
    let cli = Cli::try_parse_from(["offerfeed"]).expect("expected valid cli args");
    assert_eq!(cli.mode(), Mode::Usage);
}

#[test]
fn parses_offer_export() {
    let cli = Cli::try_parse_from([
        "offerfeed",
        "--market-id",
        "562286",
        "--output-file",
        "Angebote.md",
    ])
    .expect("expected valid cli args");

    assert_eq!(
        cli.mode(),
        Mode::ExportOffers {
            market_id: "562286",
            output_file: Path::new("Angebote.md"),
            highlights: None,
        }
    );
}

#[test]
fn parses_highlights_with_equals_sign() {
    let cli = Cli::try_parse_from([
        "offerfeed",
        "--market-id",
        "562286",
        "--output-file",
        "Angebote.md",
        "--highlights=highlights.txt",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.mode(),
        Mode::ExportOffers { highlights: Some(path), .. } if path == Path::new("highlights.txt")
    ));
}

#[test]
fn output_file_without_market_id_is_usage() {
    let cli = Cli::try_parse_from(["offerfeed", "--output-file", "Angebote.md"])
        .expect("expected valid cli args");
    assert_eq!(cli.mode(), Mode::Usage);
}

#[test]
fn market_id_without_output_file_is_usage() {
    let cli =
        Cli::try_parse_from(["offerfeed", "--market-id", "562286"]).expect("expected valid cli args");
    assert_eq!(cli.mode(), Mode::Usage);
}

#[test]
fn empty_market_id_is_usage() {
    let cli = Cli::try_parse_from(["offerfeed", "--market-id", "", "--output-file", "out.md"])
        .expect("expected valid cli args");
    assert_eq!(cli.mode(), Mode::Usage);
}

#[test]
fn list_markets_takes_precedence_over_export() {
    let cli = Cli::try_parse_from([
        "offerfeed",
        "--list-markets",
        "63773",
        "--market-id",
        "562286",
        "--output-file",
        "Angebote.md",
    ])
    .expect("expected valid cli args");

    assert_eq!(
        cli.mode(),
        Mode::ListMarkets {
            postal_code: "63773"
        }
    );
}

#[test]
fn unknown_flag_is_rejected() {
    assert!(Cli::try_parse_from(["offerfeed", "--store", "1"]).is_err());
}

#[test]
fn help_mentions_examples() {
    let help = Cli::command().render_help().to_string();
    assert!(help.contains("--list-markets"));
    let long_help = Cli::command().render_long_help().to_string();
    assert!(long_help.contains("Example usages:"));
}
