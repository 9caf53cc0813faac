mod language;

pub use language::Language;

use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use tree_sitter::Query;

use crate::error::{ExtractError, Result};

// ---------------------------------------------------------------------------
// Grammar
// ---------------------------------------------------------------------------

/// A registered language plus its lazily compiled comment query.
///
/// The query is compiled on first use and shared afterwards; concurrent first
/// use from several threads compiles it exactly once.
pub struct Grammar {
    language: Language,
    query: OnceLock<std::result::Result<Query, String>>,
}

impl Grammar {
    fn new(language: Language) -> Self {
        Self {
            language,
            query: OnceLock::new(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn tree_sitter_language(&self) -> tree_sitter::Language {
        self.language.tree_sitter_language()
    }

    /// The compiled "every comment node" query for this grammar.
    pub fn comment_query(&self) -> Result<&Query> {
        let compiled = self.query.get_or_init(|| {
            let source = self.language.comment_query();
            tracing::debug!(language = %self.language, query = %source, "compiling comment query");
            Query::new(&self.tree_sitter_language(), &source).map_err(|e| e.to_string())
        });
        compiled.as_ref().map_err(|message| ExtractError::Query {
            language: self.language,
            message: message.clone(),
        })
    }
}

impl std::fmt::Debug for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grammar")
            .field("language", &self.language)
            .field("compiled", &self.query.get().is_some())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Read-only table from file extension to grammar.
///
/// Build it once and share it by reference (or `Arc`) across threads.
#[derive(Debug)]
pub struct GrammarRegistry {
    grammars: Vec<Grammar>,
    by_extension: HashMap<&'static str, usize>,
}

impl GrammarRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            grammars: Vec::new(),
            by_extension: HashMap::new(),
        };
        for language in Language::ALL {
            registry.register(language);
        }
        registry
    }

    /// Add a language and all of its extension aliases. Registering the same
    /// language twice is a no-op.
    pub fn register(&mut self, language: Language) {
        if self.grammars.iter().any(|g| g.language == language) {
            return;
        }
        let index = self.grammars.len();
        self.grammars.push(Grammar::new(language));
        for ext in language.extensions() {
            self.by_extension.insert(*ext, index);
        }
    }

    /// Look up the grammar for an extension, leading dot included (`.py`).
    /// Matching is case-sensitive.
    pub fn for_extension(&self, ext: &str) -> Result<&Grammar> {
        self.by_extension
            .get(ext)
            .map(|&index| &self.grammars[index])
            .ok_or_else(|| ExtractError::UnsupportedLanguage {
                extension: ext.to_string(),
            })
    }

    /// Detect the language for a file path based on its extension.
    pub fn detect_language(&self, path: &Path) -> Option<Language> {
        let ext = extension_of(path);
        self.for_extension(&ext).ok().map(Grammar::language)
    }

    /// Registered languages, in registration order.
    pub fn languages(&self) -> impl Iterator<Item = Language> + '_ {
        self.grammars.iter().map(Grammar::language)
    }

    /// Registered extensions, sorted.
    pub fn extensions(&self) -> Vec<&'static str> {
        let mut exts: Vec<&'static str> = self.by_extension.keys().copied().collect();
        exts.sort_unstable();
        exts
    }
}

impl Default for GrammarRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// `.` plus the final extension of `path`, or `""` when it has none.
pub fn extension_of(path: &Path) -> String {
    match path.extension() {
        Some(ext) => format!(".{}", ext.to_string_lossy()),
        None => String::new(),
    }
}
