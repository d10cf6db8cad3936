//! bellvqe demo suite
//!
//! Two-qubit VQE on top of the bellvqe simulator:
//!
//! - [`circuits`]: the two-parameter state-preparation ansatz,
//! - [`energy`]: E(θ) from per-term expectations,
//! - [`optimizers`]: Powell and Nelder-Mead,
//! - [`runners`]: the VQE loop with multistart and reference comparison,
//! - [`config`]: YAML run configuration.
//!
//! # Example
//!
//! ```no_run
//! use bellvqe_demos::config::VqeConfig;
//! use bellvqe_demos::runners::VqeRunner;
//! use bellvqe_sim::StatevectorExpectation;
//!
//! let runner = VqeRunner::from_config(VqeConfig::default())?;
//! let mut provider = StatevectorExpectation::new();
//! let result = runner.run_with_params(&mut provider, [0.5, 0.5])?;
//! println!("{:.5}", result.optimal_energy);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod circuits;
pub mod config;
pub mod energy;
pub mod optimizers;
pub mod runners;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Create a progress bar for demo operations.
pub fn create_progress_bar(len: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    let style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("#>-");
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

/// Print a demo header.
pub fn print_header(title: &str) {
    println!();
    println!("{}", style("═".repeat(60)).cyan());
    println!("{}", style(format!("  {title}")).cyan().bold());
    println!("{}", style("═".repeat(60)).cyan());
    println!();
}

/// Print a demo section.
pub fn print_section(title: &str) {
    println!();
    println!("{}", style(format!("▶ {title}")).green().bold());
    println!("{}", style("─".repeat(40)).dim());
}

/// Print a result line.
pub fn print_result(label: &str, value: impl std::fmt::Display) {
    println!("  {} {}", style(format!("{label}:")).dim(), value);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("!").yellow().bold(), message);
}

/// Round half away from zero to `decimals` places; `-0` becomes `0`.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    let rounded = (value * scale).round() / scale;
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Shortest representation of `value`, keeping `.0` on whole numbers.
pub fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}
