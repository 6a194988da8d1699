// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Print one record per line; JSON records are compact so the stream stays
/// line-delimited
pub fn print_record<T: Serialize + std::fmt::Display>(value: &T, format: OutputFormat) {
    match format {
        OutputFormat::Text => println!("{}", value),
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string(value) {
                println!("{}", json);
            }
        }
    }
}

/// Print a listing such as `tickbus kinds`: one row per line in text mode,
/// a single JSON array otherwise
pub fn print_rows<T, I>(rows: I, format: OutputFormat)
where
    T: Serialize + std::fmt::Display,
    I: IntoIterator<Item = T>,
{
    match format {
        OutputFormat::Text => rows.into_iter().for_each(|row| println!("{}", row)),
        OutputFormat::Json => {
            let rows: Vec<T> = rows.into_iter().collect();
            if let Ok(json) = serde_json::to_string_pretty(&rows) {
                println!("{}", json);
            }
        }
    }
}
