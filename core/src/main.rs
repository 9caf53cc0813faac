use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use glean_core::config::ScanConfig;
use glean_core::grammar::GrammarRegistry;
use glean_core::scan::{ScanReport, Scanner};

#[derive(Clone, Copy, ValueEnum)]
enum Output {
    /// Full report as pretty-printed JSON
    Json,
    /// One `path:line:offset:scope:text` row per comment
    Line,
}

#[derive(Parser)]
#[command(name = "glean", about = "Extract comments from source files for prose linting")]
struct Cli {
    /// Files or directories to scan
    #[arg(required_unless_present = "list_languages")]
    paths: Vec<PathBuf>,

    /// Scan config (TOML); defaults to the user config file if present
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only scan walked files matching this pattern (e.g. `*.rs`); repeatable
    #[arg(long)]
    glob: Vec<String>,

    /// Output style
    #[arg(long, value_enum, default_value = "json")]
    output: Output,

    /// Don't return a nonzero exit code when a file fails to read or extract
    #[arg(long)]
    no_exit: bool,

    /// Print supported languages and their extensions, then exit
    #[arg(long)]
    list_languages: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("glean=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let registry = GrammarRegistry::new();

    if cli.list_languages {
        for language in registry.languages() {
            println!("{language}: {}", language.extensions().join(" "));
        }
        return Ok(());
    }

    let mut config = ScanConfig::load(cli.config.as_deref())?;
    if !cli.glob.is_empty() {
        config.glob = cli.glob.clone();
    }
    tracing::info!(paths = ?cli.paths, glob = ?config.glob, "scanning");

    let report = Scanner::from_config(&registry, &config)?.scan(&cli.paths)?;
    for skipped in &report.skipped {
        if skipped.reason.is_failure() {
            tracing::warn!(path = %skipped.path.display(), reason = %skipped.reason, "skipped file");
        } else {
            tracing::debug!(path = %skipped.path.display(), reason = %skipped.reason, "skipped file");
        }
    }
    for err in &report.errors {
        tracing::warn!(error = %err, "scan error");
    }
    tracing::info!(
        files = report.files.len(),
        skipped = report.skipped.len(),
        comments = report.comment_count(),
        "scan complete"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.output {
        Output::Json => {
            serde_json::to_writer_pretty(&mut out, &report)?;
            writeln!(out)?;
        }
        Output::Line => write_lines(&mut out, &report)?,
    }
    out.flush()?;

    if report.has_failures() && !cli.no_exit {
        std::process::exit(1);
    }
    Ok(())
}

fn write_lines(out: &mut impl Write, report: &ScanReport) -> std::io::Result<()> {
    for file in &report.files {
        for c in &file.comments {
            let first = c.text.lines().next().unwrap_or("");
            writeln!(
                out,
                "{}:{}:{}:{}:{}",
                file.path.display(),
                c.line,
                c.offset,
                c.scope.as_str(),
                first
            )?;
        }
    }
    Ok(())
}
