use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use glean_core::config::ScanConfig;
use glean_core::grammar::{GrammarRegistry, Language};
use glean_core::scan::{SkipReason, Scanner};

/// Write a file into `dir` at the given relative path.
fn write_file(dir: &TempDir, rel_path: &str, content: &str) -> PathBuf {
    let full = dir.path().join(rel_path);
    if let Some(parent) = full.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&full, content).unwrap();
    full
}

const GO_FILE: &str = "package main\n\n// Alpha does things.\nfunc Alpha() {}\n";

// ---------------------------------------------------------------------------
// 1. Directory scan
// ---------------------------------------------------------------------------
#[test]
fn test_scan_directory() {
    let registry = GrammarRegistry::new();
    let dir = TempDir::new().unwrap();
    write_file(&dir, "main.go", GO_FILE);
    write_file(&dir, "lib/util.py", "# helper\nx = 1\n");

    let report = Scanner::new(&registry)
        .scan(&[dir.path().to_path_buf()])
        .unwrap();

    assert_eq!(report.files.len(), 2, "got: {:?}", report.files);
    assert!(report.skipped.is_empty(), "unexpected skips: {:?}", report.skipped);
    assert!(report.errors.is_empty(), "unexpected errors: {:?}", report.errors);
    assert_eq!(report.comment_count(), 2);

    // Sorted by path: lib/util.py before main.go
    assert_eq!(report.files[0].language, Language::Python);
    assert_eq!(report.files[1].language, Language::Go);
    assert_eq!(report.files[1].comments[0].text, "// Alpha does things.");
    assert_eq!(report.files[1].comments[0].line, 3);
}

// ---------------------------------------------------------------------------
// 2. Per-file failures are reported, not fatal
// ---------------------------------------------------------------------------
#[test]
fn test_skipped_files_are_reported() {
    let registry = GrammarRegistry::new();
    let dir = TempDir::new().unwrap();
    write_file(&dir, "main.go", GO_FILE);
    let notes = write_file(&dir, "notes.txt", "plain prose\n");
    let big = write_file(&dir, "big.py", &"# padding\n".repeat(20));

    let report = Scanner::new(&registry)
        .with_max_file_size(100)
        .scan(&[dir.path().to_path_buf()])
        .unwrap();

    assert_eq!(report.files.len(), 1);
    assert_eq!(report.skipped.len(), 2, "got: {:?}", report.skipped);
    assert!(
        !report.has_failures(),
        "unsupported and oversized files are routine skips"
    );

    let notes_skip = report.skipped.iter().find(|s| s.path == notes).unwrap();
    assert_eq!(
        notes_skip.reason,
        SkipReason::Unsupported {
            extension: ".txt".to_string()
        }
    );

    let big_skip = report.skipped.iter().find(|s| s.path == big).unwrap();
    assert_eq!(
        big_skip.reason,
        SkipReason::TooLarge {
            size: 200,
            limit: 100
        }
    );
    assert!(big_skip.reason.to_string().contains("too large"));
    assert!(!big_skip.reason.is_failure());
}

// ---------------------------------------------------------------------------
// 3. Excludes
// ---------------------------------------------------------------------------
#[test]
fn test_excluded_directories_are_pruned() {
    let registry = GrammarRegistry::new();
    let dir = TempDir::new().unwrap();
    write_file(&dir, "src/app.js", "// app\n");
    write_file(&dir, "node_modules/dep/index.js", "// dep\n");
    write_file(&dir, "build/out.js", "// generated\n");

    let report = Scanner::new(&registry)
        .scan(&[dir.path().to_path_buf()])
        .unwrap();
    assert_eq!(report.files.len(), 2, "node_modules should be pruned: {:?}", report.files);

    let report = Scanner::new(&registry)
        .with_excludes(vec!["node_modules".to_string(), "build".to_string()])
        .scan(&[dir.path().to_path_buf()])
        .unwrap();
    assert_eq!(report.files.len(), 1, "got: {:?}", report.files);
    assert!(report.files[0].path.ends_with("src/app.js"));
}

// ---------------------------------------------------------------------------
// 4. Explicit file paths and missing paths
// ---------------------------------------------------------------------------
#[test]
fn test_explicit_files_and_missing_paths() {
    let registry = GrammarRegistry::new();
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "target/keep.rs", "/* kept */\nfn main() {}\n");
    let missing = dir.path().join("does-not-exist.go");

    let report = Scanner::new(&registry).scan(&[file.clone(), missing]).unwrap();

    // Named directly, so the `target` exclude does not apply.
    assert_eq!(report.files.len(), 1);
    assert_eq!(report.files[0].path, file);
    assert_eq!(report.errors.len(), 1, "got: {:?}", report.errors);
    assert!(report.has_failures(), "a missing path is a failure");
}

// ---------------------------------------------------------------------------
// 5. Config-driven scanner with a fixed pool
// ---------------------------------------------------------------------------
#[test]
fn test_scanner_from_config() {
    let registry = GrammarRegistry::new();
    let dir = TempDir::new().unwrap();
    for i in 0..10 {
        write_file(&dir, &format!("pkg/f{i}.go"), GO_FILE);
    }
    write_file(&dir, "skip/ignored.go", GO_FILE);

    let config = ScanConfig {
        exclude: vec!["skip".to_string()],
        glob: Vec::new(),
        max_file_size: 1024,
        threads: Some(2),
    };
    let report = Scanner::from_config(&registry, &config)
        .unwrap()
        .scan(&[dir.path().to_path_buf()])
        .unwrap();

    assert_eq!(report.files.len(), 10);
    assert_eq!(report.comment_count(), 10);
    let paths: Vec<&PathBuf> = report.files.iter().map(|f| &f.path).collect();
    let mut sorted = paths.clone();
    sorted.sort();
    assert_eq!(paths, sorted, "report should be ordered by path");
}

// ---------------------------------------------------------------------------
// 6. Glob filter
// ---------------------------------------------------------------------------
#[test]
fn test_glob_restricts_walked_files() {
    let registry = GrammarRegistry::new();
    let dir = TempDir::new().unwrap();
    write_file(&dir, "src/lib.rs", "/* lib */\n");
    write_file(&dir, "src/nested/mod.rs", "/* nested */\n");
    write_file(&dir, "main.go", GO_FILE);
    write_file(&dir, "README.md", "# readme\n");

    let report = Scanner::new(&registry)
        .with_globs(&["*.rs".to_string()])
        .unwrap()
        .scan(&[dir.path().to_path_buf()])
        .unwrap();

    assert_eq!(report.files.len(), 2, "got: {:?}", report.files);
    assert!(report.files.iter().all(|f| f.language == Language::Rust));
    assert!(
        report.skipped.is_empty(),
        "files outside the glob should not be visited: {:?}",
        report.skipped
    );

    // Several patterns act as alternatives.
    let report = Scanner::new(&registry)
        .with_globs(&["*.rs".to_string(), "*.go".to_string()])
        .unwrap()
        .scan(&[dir.path().to_path_buf()])
        .unwrap();
    assert_eq!(report.files.len(), 3, "got: {:?}", report.files);
}

#[test]
fn test_glob_from_config_and_invalid_pattern() {
    let registry = GrammarRegistry::new();
    let dir = TempDir::new().unwrap();
    write_file(&dir, "a.py", "# a\n");
    write_file(&dir, "b.js", "// b\n");

    let config = ScanConfig {
        glob: vec!["*.py".to_string()],
        ..ScanConfig::default()
    };
    let report = Scanner::from_config(&registry, &config)
        .unwrap()
        .scan(&[dir.path().to_path_buf()])
        .unwrap();
    assert_eq!(report.files.len(), 1);
    assert_eq!(report.files[0].language, Language::Python);

    let bad = ScanConfig {
        glob: vec!["[".to_string()],
        ..ScanConfig::default()
    };
    let err = Scanner::from_config(&registry, &bad).err().expect("expected invalid glob error");
    assert!(err.to_string().contains("invalid glob pattern"), "got: {err}");
}

#[test]
fn test_named_file_bypasses_glob() {
    let registry = GrammarRegistry::new();
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "tool.py", "# tool\n");

    let report = Scanner::new(&registry)
        .with_globs(&["*.rs".to_string()])
        .unwrap()
        .scan(&[file])
        .unwrap();

    assert_eq!(report.files.len(), 1, "got: {:?}", report.files);
}
