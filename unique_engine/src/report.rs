//! Content audit report.
//!
//! Walks every loaded unique and collects what a content author would want fixed:
//! uniques that match no catalog entry, conditionals that match no condition kind,
//! and conditional parameters naming eras, techs or policies the ruleset lacks.
//! Broken content never stops the engine; this report is how it becomes visible.

use std::fmt::Write as _;

use colored::Colorize;
use log::warn;
use serde::Serialize;

use crate::ruleset::Ruleset;
use crate::unique::Unique;
use crate::unique_map::{UniqueMap, UniqueMapTyped};
use crate::unique_type::UniqueType;

/// One problem found in the content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub source: String,
    pub text: String,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeCount {
    pub unique_type: UniqueType,
    pub count: usize,
}

/// Summary of a content audit.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuditReport {
    pub ruleset: String,
    pub total: usize,
    pub recognized: usize,
    pub distinct_patterns: usize,
    pub type_counts: Vec<TypeCount>,
    pub unrecognized: Vec<Finding>,
    pub unknown_conditionals: Vec<Finding>,
    pub unknown_references: Vec<Finding>,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.unrecognized.is_empty() && self.unknown_conditionals.is_empty() && self.unknown_references.is_empty()
    }

    pub fn problem_count(&self) -> usize {
        self.unrecognized.len() + self.unknown_conditionals.len() + self.unknown_references.len()
    }
}

/// Audit `uniques` against the catalog and `ruleset`.
pub fn audit(uniques: &[Unique], ruleset: &Ruleset) -> AuditReport {
    let by_pattern: UniqueMap = uniques.iter().collect();
    let by_type: UniqueMapTyped = uniques.iter().collect();

    let mut report = AuditReport {
        ruleset: ruleset.name.clone(),
        total: uniques.len(),
        recognized: by_type.len(),
        distinct_patterns: by_pattern.pattern_count(),
        type_counts: by_type
            .type_counts()
            .into_iter()
            .map(|(unique_type, count)| TypeCount { unique_type, count })
            .collect(),
        ..AuditReport::default()
    };

    for unique in by_pattern.get_all_uniques() {
        let source = unique
            .source()
            .map_or_else(|| "unknown source".to_string(), ToString::to_string);

        if unique.unique_type().is_none() {
            warn!("unrecognized unique \"{}\" on {source}", unique.text());
            report.unrecognized.push(Finding {
                source: source.clone(),
                text: unique.text().to_string(),
                detail: format!("no effect matches pattern \"{}\"", unique.placeholder_text()),
            });
        }

        for conditional in unique.conditionals() {
            match conditional.unique_type() {
                None => {
                    warn!(
                        "unrecognized conditional <{}> in \"{}\" on {source}",
                        conditional.text(),
                        unique.text()
                    );
                    report.unknown_conditionals.push(Finding {
                        source: source.clone(),
                        text: unique.text().to_string(),
                        detail: format!("<{}> matches no condition", conditional.text()),
                    });
                },
                Some(kind) => {
                    if let Some(detail) = unknown_reference(kind, conditional, ruleset) {
                        warn!("{detail} in \"{}\" on {source}", unique.text());
                        report.unknown_references.push(Finding {
                            source: source.clone(),
                            text: unique.text().to_string(),
                            detail,
                        });
                    }
                },
            }
        }
    }

    report
}

// Tech and policy names are only checked when the ruleset lists any.
fn unknown_reference(kind: UniqueType, conditional: &Unique, ruleset: &Ruleset) -> Option<String> {
    let name = conditional.params().first()?;
    match kind {
        UniqueType::ConditionalBeforeEra | UniqueType::ConditionalStartingFromEra | UniqueType::ConditionalDuringEra
            if ruleset.era_number(name).is_none() =>
        {
            Some(format!("unknown era '{name}'"))
        },
        UniqueType::ConditionalTech | UniqueType::ConditionalNoTech
            if !ruleset.techs.is_empty() && !ruleset.has_tech(name) =>
        {
            Some(format!("unknown tech '{name}'"))
        },
        UniqueType::ConditionalPolicy | UniqueType::ConditionalNoPolicy
            if !ruleset.policies.is_empty() && !ruleset.has_policy(name) =>
        {
            Some(format!("unknown policy '{name}'"))
        },
        _ => None,
    }
}

/// Render a report for the terminal.
pub fn render_report(report: &AuditReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        format!("Unique audit for ruleset '{}'", report.ruleset)
            .bright_yellow()
            .underline()
    );
    let _ = writeln!(
        out,
        "{} uniques, {} recognized, {} distinct patterns",
        report.total.to_string().bold(),
        report.recognized.to_string().bold().green(),
        report.distinct_patterns
    );

    if !report.type_counts.is_empty() {
        let _ = writeln!(out, "\n{}", "Recognized types".bold());
        for TypeCount { unique_type, count } in &report.type_counts {
            let _ = writeln!(out, "  {count:>4}  {unique_type}");
        }
    }

    render_findings(&mut out, "Unrecognized uniques", &report.unrecognized);
    render_findings(&mut out, "Unrecognized conditionals", &report.unknown_conditionals);
    render_findings(&mut out, "Unknown references", &report.unknown_references);

    if report.is_clean() {
        let _ = writeln!(out, "\n{}", "No problems found.".bright_green());
    } else {
        let _ = writeln!(
            out,
            "\n{}",
            format!("{} problem(s) found.", report.problem_count()).bright_red()
        );
    }
    out
}

fn render_findings(out: &mut String, title: &str, findings: &[Finding]) {
    if findings.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{} ({})", title.bold().red(), findings.len());
    for finding in findings {
        let _ = writeln!(
            out,
            "  {} {}\n      {}",
            finding.source.cyan(),
            finding.text,
            finding.detail.dimmed()
        );
    }
}
