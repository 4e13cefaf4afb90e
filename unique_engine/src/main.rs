#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! ** unique_audit **
//! Loads a ruleset and a content file, parses every unique and reports what the
//! engine could not make sense of.
//!
//! Usage: `unique_audit [RULESET.toml] [CONTENT.ron] [--json]`

use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;

use unique_engine::data_paths::{default_content_path, default_ruleset_path};
use unique_engine::report::{audit, render_report};
use unique_engine::{UNIQUE_ENGINE_VERSION, load_content, load_ruleset};

fn main() -> Result<()> {
    env_logger::init();

    let mut json = false;
    let mut paths = Vec::new();
    for arg in std::env::args().skip(1) {
        if arg == "--json" {
            json = true;
        } else {
            paths.push(PathBuf::from(arg));
        }
    }
    let mut paths = paths.into_iter();
    let ruleset_path = paths.next().unwrap_or_else(default_ruleset_path);
    let content_path = paths.next().unwrap_or_else(default_content_path);

    info!("unique_audit {UNIQUE_ENGINE_VERSION} starting");
    let ruleset = load_ruleset(&ruleset_path).context("while loading ruleset")?;
    let uniques = load_content(&content_path).context("while loading content")?;

    let report = audit(&uniques, &ruleset);
    info!(
        "audit finished: {} of {} uniques recognized, {} problem(s)",
        report.recognized,
        report.total,
        report.problem_count()
    );

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("while serializing report")?
        );
    } else {
        print!("{}", render_report(&report));
    }

    Ok(())
}
