use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::Pattern;
use rayon::prelude::*;
use serde::Serialize;
use walkdir::WalkDir;

use crate::comment::Comment;
use crate::config::ScanConfig;
use crate::extract::extract;
use crate::grammar::{extension_of, GrammarRegistry, Language};

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct FileComments {
    pub path: PathBuf,
    pub language: Language,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    Unsupported { extension: String },
    TooLarge { size: u64, limit: u64 },
    Read { message: String },
    Extract { message: String },
}

impl SkipReason {
    /// Read and extraction errors are failures; the other reasons are
    /// routine skips (not a source file, over the size budget).
    pub fn is_failure(&self) -> bool {
        matches!(self, SkipReason::Read { .. } | SkipReason::Extract { .. })
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Unsupported { extension } if extension.is_empty() => {
                write!(f, "unsupported file type (no extension)")
            }
            SkipReason::Unsupported { extension } => write!(f, "unsupported file type {extension}"),
            SkipReason::TooLarge { size, limit } => {
                write!(f, "file too large ({size} bytes, limit {limit})")
            }
            SkipReason::Read { message } => write!(f, "read error: {message}"),
            SkipReason::Extract { message } => write!(f, "extraction failed: {message}"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}

#[derive(Debug, Default, Serialize)]
pub struct ScanReport {
    pub files: Vec<FileComments>,
    pub skipped: Vec<SkippedFile>,
    /// Directory walk failures (missing paths, permission errors).
    pub errors: Vec<String>,
}

impl ScanReport {
    pub fn comment_count(&self) -> usize {
        self.files.iter().map(|f| f.comments.len()).sum()
    }

    /// True when a file could not be read or extracted, or the walk failed.
    pub fn has_failures(&self) -> bool {
        !self.errors.is_empty() || self.skipped.iter().any(|s| s.reason.is_failure())
    }
}

enum FileOutcome {
    Extracted(FileComments),
    Skipped(SkippedFile),
}

// ---------------------------------------------------------------------------
// Scanner
// ---------------------------------------------------------------------------

/// Runs extraction over many files. One bad file never stops the run; it is
/// recorded in the report's `skipped` list instead.
pub struct Scanner<'a> {
    registry: &'a GrammarRegistry,
    exclude_patterns: HashSet<String>,
    include_globs: Vec<Pattern>,
    max_file_size: u64,
    threads: Option<usize>,
}

impl<'a> Scanner<'a> {
    pub fn new(registry: &'a GrammarRegistry) -> Self {
        let config = ScanConfig::default();
        Self {
            registry,
            exclude_patterns: config.exclude.into_iter().collect(),
            include_globs: Vec::new(),
            max_file_size: config.max_file_size,
            threads: config.threads,
        }
    }

    pub fn from_config(registry: &'a GrammarRegistry, config: &ScanConfig) -> Result<Self> {
        let scanner = Self::new(registry)
            .with_excludes(config.exclude.clone())
            .with_max_file_size(config.max_file_size)
            .with_globs(&config.glob)?;
        Ok(match config.threads {
            Some(threads) => scanner.with_threads(threads),
            None => scanner,
        })
    }

    /// Only visit walked files whose path, relative to the scanned root,
    /// matches one of `patterns` (e.g. `*.rs`). An empty list visits all.
    pub fn with_globs(mut self, patterns: &[String]) -> Result<Self> {
        self.include_globs = patterns
            .iter()
            .map(|p| Pattern::new(p).with_context(|| format!("invalid glob pattern {p:?}")))
            .collect::<Result<_>>()?;
        Ok(self)
    }

    pub fn with_excludes(mut self, patterns: Vec<String>) -> Self {
        self.exclude_patterns = patterns.into_iter().collect();
        self
    }

    pub fn with_max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Walk `paths` (files or directories) and extract comments from every
    /// file found. Results are ordered by path.
    pub fn scan(&self, paths: &[PathBuf]) -> Result<ScanReport> {
        let mut report = ScanReport::default();
        let files = self.collect_files(paths, &mut report.errors);
        tracing::debug!(files = files.len(), "collected files to scan");

        let outcomes: Vec<FileOutcome> = match self.threads {
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .context("failed to build scan thread pool")?
                .install(|| files.par_iter().map(|p| self.scan_file(p)).collect()),
            None => files.par_iter().map(|p| self.scan_file(p)).collect(),
        };

        for outcome in outcomes {
            match outcome {
                FileOutcome::Extracted(file) => report.files.push(file),
                FileOutcome::Skipped(skipped) => report.skipped.push(skipped),
            }
        }
        Ok(report)
    }

    /// Extract comments from a single file on disk.
    fn scan_file(&self, path: &Path) -> FileOutcome {
        let skip = |reason: SkipReason| {
            tracing::debug!(path = %path.display(), reason = %reason, "skipping file");
            FileOutcome::Skipped(SkippedFile {
                path: path.to_path_buf(),
                reason,
            })
        };

        let ext = extension_of(path);
        let language = match self.registry.for_extension(&ext) {
            Ok(g) => g.language(),
            Err(_) => return skip(SkipReason::Unsupported { extension: ext }),
        };

        let size = match fs::metadata(path) {
            Ok(m) => m.len(),
            Err(err) => return skip(SkipReason::Read { message: err.to_string() }),
        };
        if size > self.max_file_size {
            return skip(SkipReason::TooLarge {
                size,
                limit: self.max_file_size,
            });
        }

        let source = match fs::read(path) {
            Ok(s) => s,
            Err(err) => return skip(SkipReason::Read { message: err.to_string() }),
        };

        match extract(self.registry, &source, &ext) {
            Ok(comments) => FileOutcome::Extracted(FileComments {
                path: path.to_path_buf(),
                language,
                comments,
            }),
            Err(err) => skip(SkipReason::Extract { message: err.to_string() }),
        }
    }

    /// Expand directories into their files. Paths named directly are always
    /// kept; excludes and globs only filter what the walk discovers.
    fn collect_files(&self, paths: &[PathBuf], errors: &mut Vec<String>) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for root in paths {
            for entry in WalkDir::new(root)
                .into_iter()
                .filter_entry(|e| e.depth() == 0 || !self.is_excluded(e.path()))
            {
                let entry = match entry {
                    Ok(e) => e,
                    Err(err) => {
                        errors.push(format!("walk error: {err}"));
                        continue;
                    }
                };
                if !entry.file_type().is_file() {
                    continue;
                }
                if entry.depth() > 0 && !self.is_included(root, entry.path()) {
                    continue;
                }
                files.push(entry.into_path());
            }
        }
        files.sort();
        files.dedup();
        files
    }

    fn is_included(&self, root: &Path, path: &Path) -> bool {
        if self.include_globs.is_empty() {
            return true;
        }
        let rel = path.strip_prefix(root).unwrap_or(path);
        self.include_globs.iter().any(|g| g.matches_path(rel))
    }

    fn is_excluded(&self, path: &Path) -> bool {
        path.file_name()
            .map(|name| self.exclude_patterns.contains(name.to_string_lossy().as_ref()))
            .unwrap_or(false)
    }
}
