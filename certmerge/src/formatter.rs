//! Human-readable run summary

use certmerge_core::BatchReport;
use colored::*;
use std::path::Path;

/// Print generated, skipped and failed rows with colors
pub fn print_summary(template: &Path, report: &BatchReport, dry_run: bool) {
    let title = if dry_run {
        format!("[DRY RUN] Template: {}", template.display())
    } else {
        format!("Template: {}", template.display())
    };
    println!("{}", title.bold());
    println!();

    if !report.generated.is_empty() {
        println!("{}", "Certificates:".bold().underline());
        for certificate in &report.generated {
            println!(
                "  {} {} {}",
                format!("row {}", certificate.row).bright_black(),
                certificate.name.cyan(),
                certificate.path.display()
            );
        }
        println!();
    }

    if !report.skipped.is_empty() {
        println!("{}", "Skipped rows (no name):".bold().underline());
        let rows: Vec<String> = report.skipped.iter().map(|s| s.row.to_string()).collect();
        println!("  {}", rows.join(", ").yellow());
        println!();
    }

    if !report.failed.is_empty() {
        println!("{}", "Failed rows:".bold().underline());
        for failed in &report.failed {
            println!(
                "  {} {} {}",
                format!("row {}", failed.row).bright_black(),
                failed.name.cyan(),
                failed.error.red()
            );
        }
        println!();
    }

    println!("{}", "Summary:".bold().underline());
    let verb = if dry_run { "Planned:" } else { "Generated:" };
    println!("  {} {}", verb.green().bold(), report.generated.len());
    if !report.skipped.is_empty() {
        println!("  {} {}", "Skipped:".yellow().bold(), report.skipped.len());
    }
    if !report.failed.is_empty() {
        println!("  {} {}", "Failed:".red().bold(), report.failed.len());
    }
}
