//! Lumen CLI
//!
//! Checks the text of an HTML document against the WCAG contrast thresholds
//! and prints the findings. Exits with status 1 when the document fails.

use std::fs;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use lumen_contrast::{
    CheckerConfig, ColorContrastChecker, ContrastFinding, Finding, Report, StyleFinding, WcagLevel,
};
use lumen_css::{Rgb, parse_color};
use lumen_dom::{TextMode, parse_html};
use owo_colors::{OwoColorize, Style};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Lumen: WCAG color contrast checker for HTML
#[derive(Parser, Debug)]
#[command(name = "lumen")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Check a file at level AA
    lumen page.html

    # Check inline markup at level AAA
    lumen --level AAA --html '<p style="color: #777">grey</p>'

    # Dark theme, machine-readable output
    lumen --background black --foreground white --json page.html
"#)]
struct Cli {
    /// Path to an HTML file
    #[arg(value_name = "FILE")]
    path: Option<String>,

    /// Check this markup instead of a file
    #[arg(long, value_name = "HTML")]
    html: Option<String>,

    /// Conformance level, AA or AAA (anything else falls back to AA)
    #[arg(long, default_value = "AA")]
    level: String,

    /// Background color of the document root
    #[arg(long, default_value = "#FFFFFF")]
    background: String,

    /// Text color of the document root
    #[arg(long, default_value = "#000000")]
    foreground: String,

    /// Do not check inside an element that already failed
    #[arg(long)]
    fast_fail: bool,

    /// Quote only an element's own text, with child elements as placeholders
    #[arg(long)]
    placeholder_text: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(long, short)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> anyhow::Result<CheckerConfig> {
        let text_mode = if self.placeholder_text {
            TextMode::Placeholder
        } else {
            TextMode::Flattened
        };
        Ok(CheckerConfig::default()
            .with_level(WcagLevel::parse_or_default(&self.level))
            .with_background(root_color("--background", &self.background)?)
            .with_foreground(root_color("--foreground", &self.foreground)?)
            .with_fast_fail(self.fast_fail)
            .with_text_mode(text_mode))
    }

    fn markup(&self) -> anyhow::Result<String> {
        if let Some(ref html) = self.html {
            Ok(html.clone())
        } else if let Some(ref path) = self.path {
            fs::read_to_string(path).with_context(|| format!("failed to read {path}"))
        } else {
            anyhow::bail!("expected a file path or --html")
        }
    }
}

/// Parse a root color flag. Translucent values are drawn over white.
fn root_color(flag: &str, value: &str) -> anyhow::Result<Rgb> {
    let color = parse_color(value).with_context(|| format!("invalid {flag} color '{value}'"))?;
    Ok(color.render_over(Rgb::WHITE))
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("lumen=debug")
    } else {
        EnvFilter::new("lumen=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.config()?;
    let markup = cli.markup()?;
    let tree = parse_html(&markup);
    info!(nodes = tree.len(), level = %config.level, "checking document");

    let report = ColorContrastChecker::new(config).evaluate(&tree);
    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        print_report(&report);
    }

    Ok(if report.passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_report(report: &Report) {
    let fail = Style::new().red().bold();
    let dim = Style::new().dimmed();

    for finding in &report.errors {
        match finding {
            Finding::Contrast(finding) => print_contrast(finding, fail),
            Finding::Style(finding) => print_style(finding),
        }
        println!("    {}", finding.text().style(dim));
    }

    if report.passed {
        println!("{}", "passed".green().bold());
    } else {
        println!(
            "{} ({} finding{})",
            "failed".style(fail),
            report.errors.len(),
            if report.errors.len() == 1 { "" } else { "s" }
        );
    }
}

fn print_contrast(finding: &ContrastFinding, fail: Style) {
    let size = if finding.text_is_large { "large" } else { "normal" };
    println!(
        "{} <{}> {} ({} {} text): {}",
        finding.kind.style(fail),
        finding.tag.cyan(),
        finding.contrast_ratio.bold(),
        finding.mode,
        size,
        finding.recommendation
    );
}

fn print_style(finding: &StyleFinding) {
    println!(
        "{} <{}> {}: {}",
        finding.kind.yellow(),
        finding.tag.cyan(),
        finding.property.bold(),
        finding.recommendation
    );
}
