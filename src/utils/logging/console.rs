//! Terminal rendering of risk tables and dataset summaries

use std::fmt::{self, Write};

use colored::Colorize;

use crate::algorithm::summary::{
    CauseComparison, CauseTotal, DatasetSummary, EventShare, SexTotals,
};
use crate::models::{CauseRiskRecord, RiskTier};
use crate::pipeline::PipelineOutcome;

const CAUSE_WIDTH: usize = 44;
const DIVIDER_WIDTH: usize = 96;

fn fit(label: &str, width: usize) -> String {
    if label.chars().count() <= width {
        return label.to_string();
    }
    let mut short: String = label.chars().take(width.saturating_sub(3)).collect();
    short.push_str("...");
    short
}

fn tier_cell(tier: RiskTier) -> String {
    let cell = format!("{:<12}", tier.label());
    match tier {
        RiskTier::High => cell.bright_red().bold().to_string(),
        RiskTier::Medium => cell.yellow().to_string(),
        RiskTier::Low => cell.green().to_string(),
    }
}

fn write_header(out: &mut String, title: &str) -> fmt::Result {
    let divider = "=".repeat(DIVIDER_WIDTH);
    writeln!(out, "{}", divider.bright_blue())?;
    writeln!(out, "    {}", title.bright_white().bold())?;
    writeln!(out, "{}", divider.bright_blue())
}

fn write_risk_row(out: &mut String, rank: usize, record: &CauseRiskRecord) -> fmt::Result {
    let marker = if record.insufficient_data { "*" } else { " " };
    writeln!(
        out,
        "{rank:>3}  {:<width$}{marker} {:>6.3}  {}  {:>9}  {:>9.3}  {:>9.3}",
        fit(&record.cause, CAUSE_WIDTH),
        record.ire,
        tier_cell(record.tier),
        record.frequency,
        record.lethality,
        record.sex_disparity,
        width = CAUSE_WIDTH,
    )
}

fn write_risk_table(out: &mut String, outcome: &PipelineOutcome, limit: usize) -> fmt::Result {
    write_header(
        out,
        &format!("EPIDEMIOLOGICAL RISK INDEX - {}", outcome.scope.name().to_uppercase()),
    )?;
    writeln!(
        out,
        "{} records in scope, {} excluded, {} causes scored",
        outcome.records_in_scope,
        outcome.records_excluded,
        outcome.table.len()
    )?;
    writeln!(out)?;

    if outcome.table.is_empty() {
        return writeln!(out, "{}", "No causes to score.".dimmed());
    }

    writeln!(
        out,
        "{}",
        format!(
            "{:>3}  {:<width$}  {:>6}  {:<12}  {:>9}  {:>9}  {:>9}",
            "#",
            "Cause",
            "IRE",
            "Tier",
            "Frequency",
            "Lethality",
            "Sex disp.",
            width = CAUSE_WIDTH,
        )
        .bold()
    )?;

    let rows = outcome.table.top(limit);
    for (idx, record) in rows.iter().enumerate() {
        write_risk_row(out, idx + 1, record)?;
    }

    if rows.iter().any(|r| r.insufficient_data) {
        writeln!(out)?;
        writeln!(
            out,
            "{}",
            "* zero events for this cause; indicators set to 0".dimmed()
        )?;
    }

    if !outcome.dropped_death_only.is_empty() {
        writeln!(out)?;
        writeln!(
            out,
            "{} {}",
            "Deaths without admissions (not scored):".yellow(),
            outcome.dropped_death_only.join(", ")
        )?;
    }

    Ok(())
}

/// Render the top `limit` rows of a pipeline outcome
#[must_use]
pub fn format_risk_table(outcome: &PipelineOutcome, limit: usize) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = write_risk_table(&mut out, outcome, limit);
    out
}

fn write_event_overview(
    out: &mut String,
    sex: &[SexTotals],
    shares: &[EventShare],
) -> fmt::Result {
    writeln!(out, "{}", "EVENTS BY TYPE".bright_yellow().bold())?;
    writeln!(
        out,
        "{}",
        format!(
            "{:<12}  {:>10}  {:>10}  {:>10}  {:>7}",
            "Type", "Male", "Female", "Total", "Share"
        )
        .bold()
    )?;
    for (totals, share) in sex.iter().zip(shares) {
        writeln!(
            out,
            "{:<12}  {:>10}  {:>10}  {:>10}  {:>6.1}%",
            totals.event_type.to_string(),
            totals.male,
            totals.female,
            share.total,
            share.share * 100.0
        )?;
    }
    writeln!(out)
}

fn write_cause_totals(out: &mut String, title: &str, causes: &[CauseTotal]) -> fmt::Result {
    writeln!(out, "{}", title.bright_yellow().bold())?;
    if causes.is_empty() {
        writeln!(out, "{}", "No events.".dimmed())?;
        return writeln!(out);
    }
    for (idx, cause) in causes.iter().enumerate() {
        writeln!(
            out,
            "{:>3}  {:<width$}  {:>10}  (M {} / F {})",
            idx + 1,
            fit(&cause.cause, CAUSE_WIDTH),
            cause.total,
            cause.male,
            cause.female,
            width = CAUSE_WIDTH,
        )?;
    }
    writeln!(out)
}

fn write_comparison(out: &mut String, title: &str, comparison: &CauseComparison) -> fmt::Result {
    writeln!(out, "{}", title.bright_yellow().bold())?;
    if comparison.causes.is_empty() {
        writeln!(out, "{}", "No events.".dimmed())?;
        return writeln!(out);
    }
    for cause in &comparison.causes {
        writeln!(out, "  {}", fit(cause, CAUSE_WIDTH).bold())?;
        for row in comparison.rows.iter().filter(|r| &r.cause == cause) {
            writeln!(out, "      {:<30}  {:>10}", row.city, row.total)?;
        }
    }
    writeln!(out)
}

fn write_summary(out: &mut String, summary: &DatasetSummary) -> fmt::Result {
    write_header(
        out,
        &format!("DATASET SUMMARY - {}", summary.scope.name().to_uppercase()),
    )?;
    writeln!(out)?;
    write_event_overview(out, &summary.sex, &summary.shares)?;
    write_cause_totals(out, "LEADING CAUSES OF ADMISSION", &summary.top_admissions)?;
    write_cause_totals(out, "LEADING CAUSES OF DEATH", &summary.top_deaths)?;
    write_comparison(
        out,
        "LEADING ADMISSION CAUSES, ALL CITIES",
        &summary.admission_comparison,
    )?;
    write_comparison(out, "LEADING DEATH CAUSES, ALL CITIES", &summary.death_comparison)
}

/// Render the dataset summary
#[must_use]
pub fn format_summary(summary: &DatasetSummary) -> String {
    let mut out = String::new();
    let _ = write_summary(&mut out, summary);
    out
}
