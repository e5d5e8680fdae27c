// src/cli/submit.rs
use anyhow::{Context, Result};
use chrono::Utc;
use std::path::Path;

use crate::server::form::parse_form_pairs;
use crate::sheets::pipeline::{submit, SubmissionOutcome, SubmitOptions};
use crate::sheets::record::{record_from_json, record_from_pairs, stamp_submission_time, Record};
use crate::sheets::store::SheetStore;

/// `@file.json` reads a JSON object from disk; anything else is a query string.
pub fn parse_payload(payload: &str) -> Result<Record> {
    match payload.strip_prefix('@') {
        Some(file) => {
            let bytes = std::fs::read(Path::new(file))
                .with_context(|| format!("reading payload file {}", file))?;
            record_from_json(&bytes).with_context(|| format!("decoding payload file {}", file))
        }
        None => Ok(record_from_pairs(parse_form_pairs(payload.trim_start_matches('?')))),
    }
}

pub fn run<S>(
    store: &mut S,
    payload: &str,
    options: &SubmitOptions,
    timestamp_field: &str,
    json: bool,
) -> Result<SubmissionOutcome>
where
    S: SheetStore + ?Sized,
{
    let mut record = parse_payload(payload)?;
    stamp_submission_time(&mut record, timestamp_field, Utc::now());
    let outcome = submit(store, &record, options).context("storing submission")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(outcome);
    }
    match outcome.data_row {
        Some(row) => println!("Appended to '{}' at row {}", outcome.sheet, row),
        None => println!("Nothing to append to '{}'", outcome.sheet),
    }
    if outcome.header_rewritten {
        println!("Headers: {}", outcome.headers.join(", "));
    }
    Ok(outcome)
}
