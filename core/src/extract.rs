use std::path::Path;

use crate::comment::{classify, Comment};
use crate::error::Result;
use crate::grammar::{extension_of, GrammarRegistry};
use crate::query::parse_and_query;

/// Extract every comment from `source`, choosing the grammar by `extension`
/// (leading dot included, e.g. `.go`).
///
/// Either the full, source-ordered comment list is returned or an error; a
/// failed call never yields a partial list.
pub fn extract(registry: &GrammarRegistry, source: &[u8], extension: &str) -> Result<Vec<Comment>> {
    let grammar = registry.for_extension(extension)?;
    let comments: Vec<Comment> = parse_and_query(source, grammar)?
        .into_iter()
        .map(classify)
        .collect();

    tracing::debug!(
        language = %grammar.language(),
        extension,
        bytes = source.len(),
        comments = comments.len(),
        "extracted comments"
    );
    Ok(comments)
}

/// Like [`extract`], with the extension taken from `path`. Nothing is read
/// from disk; `source` must already hold the file contents.
pub fn extract_path(registry: &GrammarRegistry, path: &Path, source: &[u8]) -> Result<Vec<Comment>> {
    extract(registry, source, &extension_of(path))
}
