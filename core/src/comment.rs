use serde::Serialize;

use crate::query::RawMatch;

// ---------------------------------------------------------------------------
// Scope
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Scope {
    #[serde(rename = "text.comment.line")]
    LineComment,
    #[serde(rename = "text.comment.block")]
    BlockComment,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::LineComment => "text.comment.line",
            Scope::BlockComment => "text.comment.block",
        }
    }

    /// Block iff the comment text spans more than one physical line.
    ///
    /// This looks at the text only, never at the grammar's node kind: a Rust
    /// `/* x */` on one line is a line comment here.
    pub fn of_text(text: &str) -> Self {
        if text.contains('\n') {
            Scope::BlockComment
        } else {
            Scope::LineComment
        }
    }
}

// ---------------------------------------------------------------------------
// Comment
// ---------------------------------------------------------------------------

/// One comment found in source, markers included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub text: String,
    /// 1-based line of the comment's first character.
    pub line: usize,
    /// 0-based character column of the comment's first character.
    pub offset: usize,
    pub scope: Scope,
}

impl Comment {
    pub fn is_block(&self) -> bool {
        self.scope == Scope::BlockComment
    }
}

/// Turn a raw query match into a `Comment`. Text is kept verbatim.
pub fn classify(raw: RawMatch) -> Comment {
    Comment {
        scope: Scope::of_text(&raw.text),
        line: raw.start_line + 1,
        offset: raw.start_column,
        text: raw.text,
    }
}
