use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use constgov_analysis::rules::RuleSet;
use constgov_analysis::tool::{
    render_file_report, render_itemized, render_summary, save_report, to_json,
};
use constgov_analysis::ValidationTool;
use constgov_core::config::{CliOverrides, ConstgovConfig};
use constgov_core::tracing::init_tracing;

mod cli;

use cli::{normalize_args, Cli};

fn main() -> ExitCode {
    let cli = match Cli::try_parse_from(normalize_args(std::env::args_os())) {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    init_tracing(if cli.verbose {
        "constgov=debug"
    } else {
        "constgov=info"
    });

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            tracing::error!(error = %e, "validation aborted");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

/// Rendered report: what goes to stdout and what goes to `--output`.
struct Rendered {
    passed: bool,
    stdout: String,
    file: String,
}

fn run(cli: &Cli) -> anyhow::Result<bool> {
    let overrides = CliOverrides {
        output: cli.output.as_ref().map(|p| p.display().to_string()),
        verbose: cli.verbose.then_some(true),
        json: cli.json.then_some(true),
    };
    let config = ConstgovConfig::load(&cli.root, cli.config.as_deref(), Some(&overrides))
        .context("loading configuration")?;
    let rules = RuleSet::standard().context("building rule tables")?;

    let verbose = config.report.effective_verbose();
    let json = config.report.effective_json();
    let output = config.report.output.clone();
    let tool = ValidationTool::new(config, rules);

    let rendered = match &cli.file {
        Some(file) => {
            let report = tool
                .validate_specific_file(file)
                .with_context(|| format!("validating {}", file.display()))?;
            let text = if json {
                to_json(&report)?
            } else {
                render_file_report(&report)
            };
            Rendered {
                passed: report.passed,
                stdout: text.clone(),
                file: text,
            }
        }
        None => {
            let report = tool
                .run_comprehensive_validation(&cli.root)
                .with_context(|| format!("validating {}", cli.root.display()))?;
            if json {
                let text = to_json(&report)?;
                Rendered {
                    passed: report.overall_passed,
                    stdout: text.clone(),
                    file: text,
                }
            } else {
                let itemized = render_itemized(&report);
                Rendered {
                    passed: report.overall_passed,
                    stdout: if verbose {
                        itemized.clone()
                    } else {
                        render_summary(&report)
                    },
                    file: itemized,
                }
            }
        }
    };

    print!("{}", rendered.stdout);
    if json {
        println!();
    }

    if let Some(path) = output {
        if let Err(e) = save_report(Path::new(&path), &rendered.file) {
            tracing::error!(path = %path, error = %e, "failed to save report");
        }
    }

    Ok(rendered.passed)
}
