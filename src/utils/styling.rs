//! Terminal styling utilities for the CLI output

use console::{style, Emoji};
use std::path::Path;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static CHART: Emoji<'_, '_> = Emoji("📊 ", "");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static PACKAGE: Emoji<'_, '_> = Emoji("📦 ", "");
pub static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");
pub static WAVE: Emoji<'_, '_> = Emoji("🌊 ", "");

/// Print the application banner with ASCII art
pub fn print_banner(version: &str) {
    let banner = r#"
    ████████╗ █████╗ ██████╗ ███████╗ ██████╗ ██████╗ ██████╗ ███████╗
    ╚══██╔══╝██╔══██╗██╔══██╗██╔════╝██╔════╝██╔═══██╗██╔══██╗██╔════╝
       ██║   ███████║██████╔╝███████╗██║     ██║   ██║██████╔╝█████╗
       ██║   ██╔══██║██╔══██╗╚════██║██║     ██║   ██║██╔══██╗██╔══╝
       ██║   ██║  ██║██████╔╝███████║╚██████╗╚██████╔╝██║  ██║███████╗
       ╚═╝   ╚═╝  ╚═╝╚═════╝ ╚══════╝ ╚═════╝ ╚═════╝ ╚═╝  ╚═╝╚══════╝
    "#;

    println!();
    println!("{}", style(banner).cyan().bold());
    println!(
        "    {} {}",
        style("τ").magenta().bold(),
        style("Score tabular data with fitted artifacts").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print configuration card
pub fn print_config(
    input: &Path,
    artifacts: &Path,
    output: &Path,
    drift_tolerance: f64,
    fail_on_drift: bool,
) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);

    println!("    ┌{}┐", line);
    println!(
        "    │ {}{}│",
        style("⚙️  Configuration").cyan().bold(),
        " ".repeat(box_width - 20)
    );
    println!("    ├{}┤", line);
    println!(
        "    │  {} Input:     {:<36}│",
        FOLDER,
        truncate_path(input, 35)
    );
    println!(
        "    │  {} Artifacts: {:<36}│",
        PACKAGE,
        truncate_path(artifacts, 35)
    );
    println!(
        "    │  {} Output:    {:<36}│",
        SAVE,
        truncate_path(output, 35)
    );
    println!("    ├{}┤", line);
    println!(
        "    │  {} Drift tolerance: {:<29}│",
        WAVE,
        style(format!("{:e}", drift_tolerance)).yellow()
    );
    println!(
        "    │  {} Fail on drift:   {:<29}│",
        CHART,
        style(fail_on_drift).yellow()
    );
    println!("    └{}┘", line);
    println!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!(
        "    {} {}",
        style("⚠").yellow().bold(),
        style(message).yellow()
    );
}

/// Print an error with its cause chain for operator diagnosis
pub fn print_failure(err: &anyhow::Error) {
    println!("    {} {}", style("✗").red().bold(), style(err).red());
    for cause in err.chain().skip(1) {
        println!("      {} {}", style("↳").dim(), style(cause).dim());
    }
}

/// Print the elapsed time of a completed step
pub fn print_step_time(elapsed: std::time::Duration) {
    println!("      {}", style(format!("took {:.2?}", elapsed)).dim());
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        ROCKET,
        style("Tabscore run complete!").green().bold()
    );
    println!();
}

// Helper functions

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("...{}", &s[s.len() - max_len + 3..])
    }
}
