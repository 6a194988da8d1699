// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tickbus kinds` - List event kinds usable in scenarios

use crate::demo::DemoEvent;
use crate::output::{self, OutputFormat};
use serde::Serialize;
use std::fmt;
use tickbus::EventKind;

#[derive(clap::Args)]
pub struct KindsArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct KindInfo {
    index: usize,
    name: &'static str,
}

impl fmt::Display for KindInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>2}  {}", self.index, self.name)
    }
}

pub fn handle(args: KindsArgs) {
    let rows = DemoEvent::ALL.iter().map(|kind| KindInfo {
        index: kind.index(),
        name: kind.name(),
    });
    output::print_rows(rows, args.format);
}
