//! Command-line interface for dslint.

use clap::{ArgAction, Parser, Subcommand};
use globset::GlobSet;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use crate::config::Config;
use crate::detect::{self, Runner};
use crate::report;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Lint mandatory properties of builder-style DSL lambdas.
///
/// dslint reads fact documents describing DSL classes and the lambdas that
/// configure them, and reports lambdas that never set a property annotated
/// with `@DSLMandatory`.
#[derive(Parser)]
#[command(name = "dslint")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check fact documents for missing mandatory DSL properties
    #[command(visible_alias = "lint")]
    Check(CheckArgs),
    /// List the issues dslint reports
    Issues,
}

/// Arguments for the check command.
#[derive(Parser)]
pub struct CheckArgs {
    /// Fact document or directory of fact documents
    pub path: PathBuf,

    /// Path to configuration YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: pretty, json, or sarif
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Show suppressed diagnostics in output
    #[arg(long)]
    pub show_suppressed: bool,
}

/// Install the stderr log subscriber.
pub fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("dslint={}", default_level)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Collect fact documents under `root` matching the include globs.
pub fn collect_files(root: &Path, include: &GlobSet) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_string_lossy();
            // Skip hidden and build output directories
            !(e.depth() > 0
                && e.file_type().is_dir()
                && (name.starts_with('.') || name == "build" || name == "target"))
        })
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = entry.path().strip_prefix(root).unwrap_or(entry.path());
        if include.is_match(rel) {
            files.push(entry.path().to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => Config::discover(Path::new(".")),
    };
    match path {
        Some(p) => {
            tracing::debug!(config = %p.display(), "loading configuration");
            Ok(Config::parse_file(&p)?)
        }
        None => Ok(Config::default()),
    }
}

/// Run the check command.
pub fn run_check(args: &CheckArgs) -> anyhow::Result<i32> {
    if args.format != "pretty" && args.format != "json" && args.format != "sarif" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty', 'json', or 'sarif'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    let config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let runner = match Runner::new(&config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: invalid configuration: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let metadata = match std::fs::metadata(&args.path) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error: cannot access path {:?}: {}", args.path, e);
            return Ok(EXIT_ERROR);
        }
    };

    let result = if metadata.is_dir() {
        let files = collect_files(&args.path, &config.include_matcher()?)?;
        if files.is_empty() {
            eprintln!("Warning: no fact documents to check");
            return Ok(EXIT_SUCCESS);
        }
        tracing::debug!(count = files.len(), "checking fact documents");
        runner.run(&files)
    } else {
        match runner.check_file(&args.path) {
            Ok(mut r) => {
                r.sort();
                r
            }
            Err(e) => {
                eprintln!("Error: {:#}", e);
                return Ok(EXIT_ERROR);
            }
        }
    };

    let path_str = args.path.to_string_lossy().to_string();
    match args.format.as_str() {
        "json" => report::write_json(&path_str, &result)?,
        "sarif" => report::write_sarif(&result)?,
        _ => report::write_pretty(&path_str, &result, args.show_suppressed),
    }

    if result.has_errors() {
        Ok(EXIT_FAILED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

/// Run the issues command.
pub fn run_issues() -> anyhow::Result<i32> {
    println!("Issues:");
    println!();
    for issue in detect::issues() {
        println!(
            "  {:<16} {:<12} priority {:<3} {}",
            issue.id,
            issue.category.as_str(),
            issue.priority,
            issue.severity
        );
        println!("  {:<16} {}", "", issue.brief);
    }
    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_collect_files_uses_include_globs() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("app/src");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::create_dir_all(temp.path().join("build")).unwrap();
        std::fs::write(nested.join("server.dslint.yaml"), "").unwrap();
        std::fs::write(nested.join("Server.kt"), "").unwrap();
        std::fs::write(temp.path().join("build/out.dslint.yaml"), "").unwrap();
        std::fs::write(temp.path().join("root.dslint.json"), "").unwrap();

        let include = Config::default().include_matcher().unwrap();
        let files = collect_files(temp.path(), &include).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["server.dslint.yaml", "root.dslint.json"]);
    }

    #[test]
    fn test_run_check_rejects_unknown_format() {
        let args = CheckArgs {
            path: PathBuf::from("."),
            config: None,
            format: "xml".to_string(),
            show_suppressed: false,
        };
        assert_eq!(run_check(&args).unwrap(), EXIT_ERROR);
    }

    #[test]
    fn test_run_check_missing_path() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("dslint.yaml");
        std::fs::write(&config, "severity: error\n").unwrap();
        let args = CheckArgs {
            path: temp.path().join("missing.dslint.yaml"),
            config: Some(config),
            format: "json".to_string(),
            show_suppressed: false,
        };
        assert_eq!(run_check(&args).unwrap(), EXIT_ERROR);
    }
}
