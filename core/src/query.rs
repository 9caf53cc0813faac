use tree_sitter::{Node, Parser, QueryCursor, StreamingIterator};

use crate::error::{ExtractError, Result};
use crate::grammar::Grammar;

// ---------------------------------------------------------------------------
// Raw matches
// ---------------------------------------------------------------------------

/// A comment node as the query found it, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch {
    /// 0-based row of the node start.
    pub start_line: usize,
    /// 0-based character column of the node start.
    pub start_column: usize,
    /// Source text covered by the node, delimiters included, without a
    /// trailing line terminator.
    pub text: String,
}

// ---------------------------------------------------------------------------
// Parse + query
// ---------------------------------------------------------------------------

/// Parse `source` with `grammar` and return every comment node in document
/// order.
///
/// Syntax errors in `source` are tolerated; tree-sitter still yields a tree
/// and comments outside the broken region are reported. Only a parser that
/// cannot be set up or returns no tree is a `Parse` error.
pub fn parse_and_query(source: &[u8], grammar: &Grammar) -> Result<Vec<RawMatch>> {
    let language = grammar.language();

    let mut parser = Parser::new();
    parser
        .set_language(&grammar.tree_sitter_language())
        .map_err(|e| ExtractError::Parse {
            language,
            message: e.to_string(),
        })?;

    let tree = parser.parse(source, None).ok_or_else(|| ExtractError::Parse {
        language,
        message: "parser returned no tree".to_string(),
    })?;

    let query = grammar.comment_query()?;

    let mut matches = Vec::new();
    let mut cursor = QueryCursor::new();
    let mut captures = cursor.captures(query, tree.root_node(), source);
    while let Some((m, index)) = captures.next() {
        let node = m.captures[*index].node;
        matches.push(raw_match(&node, source));
    }

    Ok(matches)
}

fn raw_match(node: &Node, source: &[u8]) -> RawMatch {
    let start = node.start_position();
    let start_byte = node.start_byte();
    let end_byte = trim_line_terminator(source, start_byte, node.end_byte());

    // tree-sitter columns count bytes; re-count the line prefix in characters.
    let line_start = start_byte.saturating_sub(start.column);
    let start_column = source
        .get(line_start..start_byte)
        .map(|prefix| String::from_utf8_lossy(prefix).chars().count())
        .unwrap_or(start.column);

    let text = source
        .get(start_byte..end_byte)
        .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
        .unwrap_or_default();

    RawMatch {
        start_line: start.row,
        start_column,
        text,
    }
}

/// Some grammars (tree-sitter-rust doc comments) end a line comment node
/// after its `\n`. The terminator belongs to the line, not the comment.
fn trim_line_terminator(source: &[u8], start_byte: usize, end_byte: usize) -> usize {
    let span = source.get(start_byte..end_byte).unwrap_or_default();
    if span.ends_with(b"\r\n") {
        end_byte - 2
    } else if span.ends_with(b"\n") {
        end_byte - 1
    } else {
        end_byte
    }
}
