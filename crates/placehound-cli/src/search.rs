//! `search` command handler and output rendering.

use std::fmt::Write as _;

use placehound_core::{AppConfig, EnrichedPlace, SearchQuery};
use placehound_search::{PlaceAggregator, SearchSettings};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ResultsEnvelope<'a> {
    results: &'a [EnrichedPlace],
}

/// Run one aggregation and print it to stdout.
///
/// # Errors
///
/// Returns an error if the HTTP clients cannot be built, if the search
/// phase fails, or if JSON rendering fails.
pub(crate) async fn run_search(
    config: &AppConfig,
    location: Option<&str>,
    keyword: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let query = SearchQuery::with_defaults(location, keyword);
    let settings = SearchSettings::from_app_config(config);
    let aggregator = PlaceAggregator::new(&settings)?;

    let results = aggregator.search(&query.location, &query.keyword).await?;

    if json {
        println!("{}", render_json(&results)?);
    } else if results.is_empty() {
        println!("no places found for \"{}\"", query.text_query());
    } else {
        print!("{}", render_table(&results));
    }

    Ok(())
}

pub(crate) fn render_json(results: &[EnrichedPlace]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&ResultsEnvelope { results })
}

/// Tab-separated table with a header row. Tabs and newlines inside values
/// are flattened to spaces so every place stays on one line.
pub(crate) fn render_table(results: &[EnrichedPlace]) -> String {
    let mut out = String::from("ID\tNAME\tADDRESS\tPHONE\tWEBSITE\tEMAIL\tRATING\tLAT\tLNG\n");
    for place in results {
        let cells = [
            cell(&place.id),
            cell(&place.name),
            cell(&place.address),
            cell(&place.phone),
            cell(&place.website),
            cell(&place.email),
            number(place.rating),
            number(place.lat),
            number(place.lng),
        ];
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{}", cells.join("\t"));
    }
    out
}

fn cell(value: &str) -> String {
    value.replace(['\t', '\n', '\r'], " ")
}

fn number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
