//! Poulint CLI
//!
//! Lint driver for IEC 61131-3 structured-text program units.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use poulint_core::{LintConfig, Orchestrator, RunReport, register_builtin_checks};
use poulint_parser::StructuredTextParser;
use poulint_registry::{CODE_WIDTH, CheckRegistry, Settings};

/// Poulint - structured-text lint driver
#[derive(Parser)]
#[command(name = "poulint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Optional JSON settings file passed to checks
    #[arg(short, long, global = true)]
    settings: Option<PathBuf>,

    /// Plugin file or directory (may be given multiple times)
    #[arg(long = "plugin", value_name = "PATH", global = true)]
    plugins: Vec<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable caching
    #[arg(long, global = true)]
    no_cache: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint source files
    Lint {
        /// Glob pattern(s) to include (may be given multiple times)
        #[arg(short = 'p', long = "pattern", value_name = "GLOB")]
        patterns: Vec<String>,

        /// Glob pattern(s) to exclude (may be given multiple times)
        #[arg(short = 'e', long = "exclude", value_name = "GLOB")]
        excludes: Vec<String>,

        /// Root directory to scan patterns from
        #[arg(short = 'r', long, default_value = ".")]
        root_dir: PathBuf,

        /// Directory to store cache data
        #[arg(long, value_name = "DIR")]
        cache_dir: Option<PathBuf>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// List all registered checks
    Checks,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(has_issues) => {
            if has_issues {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    let mut config = load_config(&cli)?;

    // Populate the registry before anything is listed or run: builtins
    // first, then plugins. Any failure here is fatal.
    let mut registry = CheckRegistry::new();
    register_builtin_checks(&mut registry).into_diagnostic()?;

    let mut plugin_paths = config.plugins.clone();
    plugin_paths.extend(cli.plugins.iter().cloned());
    poulint_plugin::load_paths(&plugin_paths, &mut registry).into_diagnostic()?;

    match &cli.command {
        Commands::Checks => {
            print_checks(&registry);
            Ok(false)
        }
        Commands::Lint {
            patterns,
            excludes,
            root_dir,
            cache_dir,
            format,
        } => {
            if !patterns.is_empty() {
                config.include = patterns.clone();
            }
            config.exclude.extend(excludes.iter().cloned());
            config.root_dir = root_dir.clone();
            if let Some(dir) = cache_dir {
                config.cache_dir = dir.to_string_lossy().to_string();
            }
            if cli.no_cache {
                config.cache = false;
            }

            let settings = match &cli.settings {
                Some(path) => Settings::from_file(path).into_diagnostic()?,
                None => Settings::empty(),
            };

            let orchestrator =
                Orchestrator::new(config, registry, Box::new(StructuredTextParser::new()))
                    .into_diagnostic()?;
            let report = orchestrator.run(&settings).into_diagnostic()?;

            output_report(&report, format)?;
            Ok(!report.is_clean())
        }
    }
}

fn load_config(cli: &Cli) -> Result<LintConfig> {
    if let Some(ref path) = cli.config {
        return LintConfig::from_file(path).into_diagnostic();
    }

    if let Some(path) = LintConfig::discover(".") {
        info!("Using config: {}", path.display());
        return LintConfig::from_file(&path).into_diagnostic();
    }

    Ok(LintConfig::new())
}

fn print_checks(registry: &CheckRegistry) {
    const DOC_WIDTH: usize = 96;
    const DOC_INDENT: usize = 4;

    for check in registry.checks() {
        println!("{:<width$} {}:", check.code, check.name, width = CODE_WIDTH);
        for line in wrap(
            &check.doc,
            DOC_WIDTH,
            CODE_WIDTH + 1 + DOC_INDENT,
            CODE_WIDTH + 1,
        ) {
            println!("{line}");
        }
    }
}

/// Greedy word wrap with a hanging indent.
fn wrap(text: &str, width: usize, initial_indent: usize, subsequent_indent: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = " ".repeat(initial_indent);
    let mut has_word = false;

    for word in text.split_whitespace() {
        if has_word && line.len() + 1 + word.len() > width {
            lines.push(std::mem::replace(&mut line, " ".repeat(subsequent_indent)));
            has_word = false;
        }
        if has_word {
            line.push(' ');
        }
        line.push_str(word);
        has_word = true;
    }
    if has_word {
        lines.push(line);
    }

    lines
}

fn output_report(report: &RunReport, format: &str) -> Result<()> {
    match format {
        "json" => {
            println!(
                "{}",
                serde_json::to_string_pretty(report).into_diagnostic()?
            );
        }
        _ => {
            // Text format
            for issue in &report.issues {
                let prefix = match (&issue.file, &issue.location) {
                    (Some(file), Some(location)) => format!("{}:{} ", file.display(), location),
                    (Some(file), None) => format!("{} ", file.display()),
                    _ => String::new(),
                };
                println!(
                    "{}{} [{}]: {}",
                    prefix,
                    issue.severity.as_str(),
                    issue.code,
                    issue.message
                );
            }

            if !report.issues.is_empty() {
                println!();
            }
            println!(
                "Checked {} files ({} from cache), found {} issues",
                report.files_checked,
                report.cache_hits,
                report.issues.len()
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_single_short_line() {
        let lines = wrap("one two", 96, 4, 2);
        assert_eq!(lines, vec!["    one two"]);
    }

    #[test]
    fn test_wrap_breaks_and_indents() {
        let lines = wrap("alpha beta gamma delta", 12, 2, 4);
        assert_eq!(lines[0], "  alpha beta");
        assert!(lines.len() > 1);
        assert!(lines[1].starts_with("    "));
    }

    #[test]
    fn test_wrap_empty_text() {
        assert!(wrap("", 96, 4, 2).is_empty());
    }
}
