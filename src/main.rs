use anyhow::Result;
use clap::Parser;
use colored::*;
use pydoctor_rs::config::Config;
use pydoctor_rs::issue::Severity;
use pydoctor_rs::scanner::Doctor;
use std::path::PathBuf;
use std::process::ExitCode;

/// Command line interface configuration using `clap`.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Root directory (or single file's directory) to scan for Python
    /// production-readiness issues.
    path: PathBuf,

    /// Configuration file (JSON). Missing or malformed files fall back to
    /// the built-in defaults with a warning.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of parallel workers.
    #[arg(short, long, default_value_t = 4)]
    jobs: usize,

    /// Output the raw scan report as JSON for machine parsing.
    #[arg(long)]
    json: bool,

    /// Verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if cli.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let config = Config::load(cli.config.as_deref());
    let doctor = Doctor::new(config, cli.jobs);

    if !cli.json {
        println!("Scanning path: {:?}", cli.path);
    }

    let report = doctor.scan(&cli.path)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("\n{}", "Python Production Readiness Results".bold());
        println!("====================================\n");

        let summary = &report.summary;
        println!(
            "Files scanned: {} | Total issues: {}",
            summary.total_files, summary.total_issues
        );
        println!(" * {}: {}", "critical".red(), summary.critical);
        println!(" * {}: {}", "serious".yellow(), summary.serious);
        println!(" * {}: {}", "minor".cyan(), summary.minor);

        if summary.total_functions > 0 {
            let doc_pct =
                100.0 * summary.documented_functions as f64 / summary.total_functions as f64;
            let hint_pct =
                100.0 * summary.type_hinted_functions as f64 / summary.total_functions as f64;
            println!(
                "\nDocumentation coverage: {:.1}% ({}/{})",
                doc_pct, summary.documented_functions, summary.total_functions
            );
            println!(
                "Type hint coverage: {:.1}% ({}/{})",
                hint_pct, summary.type_hinted_functions, summary.total_functions
            );
        }

        for result in &report.results {
            if result.issues.is_empty() {
                continue;
            }
            println!("\n{}", result.file.display().to_string().bold());
            for (i, issue) in result.issues.iter().enumerate() {
                let severity = match issue.severity {
                    Severity::Critical => issue.severity.to_string().red(),
                    Severity::Serious => issue.severity.to_string().yellow(),
                    Severity::Minor => issue.severity.to_string().cyan(),
                };
                println!(
                    " {}. [{}] {} (line {}) {}",
                    i + 1,
                    issue.category,
                    severity,
                    issue.line,
                    issue.message
                );
            }
        }
    }

    // Critical issues block deployment.
    if report.summary.critical > 0 {
        return Ok(ExitCode::from(1));
    }
    Ok(ExitCode::SUCCESS)
}
