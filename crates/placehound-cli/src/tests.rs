use super::*;
use crate::search::{render_json, render_table};
use placehound_core::EnrichedPlace;

fn place(id: &str, email: &str) -> EnrichedPlace {
    EnrichedPlace {
        id: id.to_string(),
        name: format!("Place {id}"),
        address: "1 Main St".to_string(),
        phone: String::new(),
        website: "https://example.com".to_string(),
        email: email.to_string(),
        rating: Some(4.5),
        lat: Some(40.7),
        lng: None,
    }
}

#[test]
fn parses_search_with_defaults() {
    let cli = Cli::try_parse_from(["placehound-cli", "search"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Search {
            location: None,
            keyword: None,
            json: false
        }
    ));
}

#[test]
fn parses_search_with_all_flags() {
    let cli = Cli::try_parse_from([
        "placehound-cli",
        "search",
        "--location",
        "Austin, TX",
        "--keyword",
        "plumber",
        "--json",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Search {
            location: Some(ref l),
            keyword: Some(ref k),
            json: true
        } if l == "Austin, TX" && k == "plumber"
    ));
}

#[test]
fn missing_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["placehound-cli"]).is_err());
}

#[test]
fn table_has_header_and_one_row_per_place() {
    let table = render_table(&[place("a", "info@a.com"), place("b", "")]);
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("ID\tNAME"));
    assert_eq!(
        lines[1],
        "a\tPlace a\t1 Main St\t\thttps://example.com\tinfo@a.com\t4.5\t40.7\t"
    );
    assert_eq!(lines[2].split('\t').nth(5), Some(""));
}

#[test]
fn table_flattens_embedded_tabs_and_newlines() {
    let mut p = place("a", "");
    p.address = "Suite 2\n1 Main\tSt".to_string();
    let table = render_table(&[p]);
    assert_eq!(table.lines().count(), 2);
    assert_eq!(table.lines().nth(1).and_then(|l| l.split('\t').nth(2)), Some("Suite 2 1 Main St"));
}

#[test]
fn json_output_wraps_results() {
    let rendered = render_json(&[place("a", "info@a.com")]).expect("render");
    let value: serde_json::Value = serde_json::from_str(&rendered).expect("json parse");
    assert_eq!(value["results"][0]["id"], "a");
    assert_eq!(value["results"][0]["email"], "info@a.com");
    assert!(value["results"][0].get("lng").is_none());
}
