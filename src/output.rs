//! CLI output formatting for every command.
//!
//! # Slot-First Display
//!
//! The primary unit of output is the content slot: the key a component reads
//! and what happened when it was resolved. File paths come second, as
//! indented context under the summary they belong to.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! Slots: 16 resolved, 1 missing
//!     missing: ctaBanner
//! Home → index.html
//! Assets
//!     assets/images/hero.svg
//! Site generated at dist
//! ```
//!
//! ## Check
//!
//! ```text
//! 001 navigation: resolved
//! 002 header.search: resolved
//! 003 ctaBanner: unavailable (HTTP status 503)
//!
//! 3 slots: 2 resolved, 1 unavailable
//! ```
//!
//! ## Status
//!
//! ```text
//! Configuration
//!     Locale: en
//!     Auth token: s3cr****
//! Content source
//!     Selected: remote CMS
//! Persisted queries
//!     homepage → https://cms.example.com/graphql/execute.json/site/homepage
//! Content models
//!     Hero Banner → HeroBanner
//!         headingLine1 → headingLine1 (text)
//! Editable components
//!     site/components/header → Header
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::assets::AssetResolver;
use crate::config::SiteConfig;
use crate::content::{ROUTES, SourceKind};
use crate::editor::ComponentRegistry;
use crate::generate::GenerateReport;
use crate::models::ModelInfo;
use crate::page::{SlotDiagnostic, SlotOutcome};

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Show enough of a secret to recognise it, never the whole thing.
pub fn mask_token(token: Option<&str>) -> String {
    match token {
        None => "(not set)".to_string(),
        Some(t) if t.chars().count() <= 4 => "****".to_string(),
        Some(t) => format!("{}****", t.chars().take(4).collect::<String>()),
    }
}

fn or_unset(value: Option<&str>) -> &str {
    value.unwrap_or("(not set)")
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Tally {
    resolved: usize,
    missing: usize,
    unavailable: usize,
    invalid: usize,
}

impl Tally {
    fn of(diagnostics: &[SlotDiagnostic]) -> Self {
        let mut tally = Self::default();
        for d in diagnostics {
            match d.outcome {
                SlotOutcome::Resolved => tally.resolved += 1,
                SlotOutcome::Missing => tally.missing += 1,
                SlotOutcome::Unavailable(_) => tally.unavailable += 1,
                SlotOutcome::Invalid(_) => tally.invalid += 1,
            }
        }
        tally
    }

    /// `16 resolved, 1 missing`; zero counts other than resolved are omitted.
    fn summary(&self) -> String {
        let mut parts = vec![format!("{} resolved", self.resolved)];
        for (count, label) in [
            (self.missing, "missing"),
            (self.unavailable, "unavailable"),
            (self.invalid, "invalid"),
        ] {
            if count > 0 {
                parts.push(format!("{count} {label}"));
            }
        }
        parts.join(", ")
    }
}

// ============================================================================
// build
// ============================================================================

/// Format the result of a build: slot summary, unresolved slots, files.
pub fn format_build_output(diagnostics: &[SlotDiagnostic], report: &GenerateReport) -> Vec<String> {
    let mut lines = vec![format!("Slots: {}", Tally::of(diagnostics).summary())];
    for d in diagnostics.iter().filter(|d| d.outcome != SlotOutcome::Resolved) {
        lines.push(format!("{}{}: {}", indent(1), d.outcome, d.key));
    }

    for page in &report.pages {
        lines.push(format!("Home → {}", page.display()));
    }
    if !report.assets.is_empty() {
        lines.push("Assets".to_string());
        for asset in &report.assets {
            lines.push(format!("{}{}", indent(1), asset.display()));
        }
    }
    lines.push(format!("Site generated at {}", report.output_dir.display()));
    lines
}

pub fn print_build_output(diagnostics: &[SlotDiagnostic], report: &GenerateReport) {
    for line in format_build_output(diagnostics, report) {
        println!("{}", line);
    }
}

// ============================================================================
// check
// ============================================================================

/// One line per slot in composition order, then a tally.
pub fn format_check_report(diagnostics: &[SlotDiagnostic]) -> Vec<String> {
    let mut lines: Vec<String> = diagnostics
        .iter()
        .enumerate()
        .map(|(i, d)| format!("{} {}: {}", format_index(i + 1), d.key, d.outcome))
        .collect();
    lines.push(String::new());
    lines.push(format!(
        "{} slots: {}",
        diagnostics.len(),
        Tally::of(diagnostics).summary()
    ));
    lines
}

pub fn print_check_report(diagnostics: &[SlotDiagnostic]) {
    for line in format_check_report(diagnostics) {
        println!("{}", line);
    }
}

// ============================================================================
// status
// ============================================================================

/// Everything the integration status dashboard shows.
pub struct StatusReport<'a> {
    pub config: &'a SiteConfig,
    pub selected: SourceKind,
    /// The source's own description, or why it could not be opened.
    pub source: String,
    pub assets: &'a AssetResolver,
    /// `(query, url)` for each persisted query; empty without a remote host.
    pub queries: Vec<(String, String)>,
    pub models: &'a [ModelInfo],
    pub registry: &'a ComponentRegistry,
}

pub fn format_status(status: &StatusReport<'_>) -> Vec<String> {
    let config = status.config;
    let remote = &config.remote;
    let mut lines = vec![
        "Configuration".to_string(),
        format!("{}Locale: {}", indent(1), config.locale),
        format!("{}Title: {}", indent(1), config.title),
        format!("{}Data source: {}", indent(1), remote.data_source),
        format!("{}Remote host: {}", indent(1), or_unset(remote.host())),
        format!("{}Query path: {}", indent(1), remote.query_path),
        format!("{}Project: {}", indent(1), remote.project),
        format!("{}Auth token: {}", indent(1), mask_token(remote.auth_token())),
        "Content source".to_string(),
        format!("{}Selected: {}", indent(1), status.selected),
        format!("{}{}", indent(1), status.source),
        format!(
            "{}Assets: {}",
            indent(1),
            match status.assets.host() {
                Some(host) => format!("prefixed with {host}"),
                None => "same-origin".to_string(),
            }
        ),
        "Persisted queries".to_string(),
    ];

    if status.queries.is_empty() {
        lines.push(format!("{}(no remote host configured)", indent(1)));
    }
    for (query, url) in &status.queries {
        lines.push(format!("{}{} → {}", indent(1), query, url));
        for route in ROUTES.iter().filter(|r| r.query == query.as_str()) {
            lines.push(format!("{}serves {}", indent(2), route.prefix.join(".")));
        }
    }

    lines.push("Content models".to_string());
    for model in status.models {
        lines.push(format!("{}{} → {}", indent(1), model.name, model.target));
        for field in model.fields {
            lines.push(format!(
                "{}{} → {} ({})",
                indent(2),
                field.source,
                field.target,
                field.kind
            ));
        }
    }

    lines.push("Editable components".to_string());
    for registration in status.registry.iter() {
        lines.push(format!(
            "{}{} → {}",
            indent(1),
            registration.resource_type,
            registration.component
        ));
    }
    lines
}

pub fn print_status(status: &StatusReport<'_>) {
    for line in format_status(status) {
        println!("{}", line);
    }
}
