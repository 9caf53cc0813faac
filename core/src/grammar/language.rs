use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Supported languages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    C,
    Cpp,
    CSharp,
    Css,
    Go,
    Java,
    JavaScript,
    Lua,
    Python,
    Ruby,
    Rust,
    Scala,
    TypeScript,
}

impl Language {
    /// Every language available at launch, in registration order.
    pub const ALL: [Language; 13] = [
        Language::C,
        Language::Cpp,
        Language::CSharp,
        Language::Css,
        Language::Go,
        Language::Java,
        Language::JavaScript,
        Language::Lua,
        Language::Python,
        Language::Ruby,
        Language::Rust,
        Language::Scala,
        Language::TypeScript,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::CSharp => "csharp",
            Language::Css => "css",
            Language::Go => "go",
            Language::Java => "java",
            Language::JavaScript => "javascript",
            Language::Lua => "lua",
            Language::Python => "python",
            Language::Ruby => "ruby",
            Language::Rust => "rust",
            Language::Scala => "scala",
            Language::TypeScript => "typescript",
        }
    }

    /// File extensions, leading dot included, that select this language.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Language::C => &[".c", ".h"],
            Language::Cpp => &[".cpp", ".hpp", ".cc", ".hh", ".cxx", ".hxx"],
            Language::CSharp => &[".cs", ".csx"],
            Language::Css => &[".css"],
            Language::Go => &[".go"],
            Language::Java => &[".java", ".bsh"],
            Language::JavaScript => &[".js"],
            Language::Lua => &[".lua"],
            Language::Python => &[".py", ".py3", ".pyw", ".pyi", ".pyx", ".rpy"],
            Language::Ruby => &[".rb"],
            Language::Rust => &[".rs"],
            Language::Scala => &[".scala", ".sbt"],
            Language::TypeScript => &[".ts"],
        }
    }

    /// Node kinds the grammar uses for comments. Some grammars split line and
    /// block comments into separate kinds, most use a single `comment` kind.
    pub fn comment_kinds(&self) -> &'static [&'static str] {
        match self {
            Language::Java | Language::Rust => &["line_comment", "block_comment"],
            Language::Scala => &["comment", "block_comment"],
            _ => &["comment"],
        }
    }

    pub fn tree_sitter_language(&self) -> tree_sitter::Language {
        match self {
            Language::C => tree_sitter_c::LANGUAGE.into(),
            Language::Cpp => tree_sitter_cpp::LANGUAGE.into(),
            Language::CSharp => tree_sitter_c_sharp::LANGUAGE.into(),
            Language::Css => tree_sitter_css::LANGUAGE.into(),
            Language::Go => tree_sitter_go::LANGUAGE.into(),
            Language::Java => tree_sitter_java::LANGUAGE.into(),
            Language::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Language::Lua => tree_sitter_lua::LANGUAGE.into(),
            Language::Python => tree_sitter_python::LANGUAGE.into(),
            Language::Ruby => tree_sitter_ruby::LANGUAGE.into(),
            Language::Rust => tree_sitter_rust::LANGUAGE.into(),
            Language::Scala => tree_sitter_scala::LANGUAGE.into(),
            Language::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        }
    }

    /// Query source selecting every comment node of this grammar.
    /// For `["line_comment", "block_comment"]` this is
    /// `[(line_comment) (block_comment)] @comment`.
    pub fn comment_query(&self) -> String {
        let alternatives: Vec<String> = self
            .comment_kinds()
            .iter()
            .map(|kind| format!("({kind})"))
            .collect();
        format!("[{}] @comment", alternatives.join(" "))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
