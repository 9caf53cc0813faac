pub mod comment;
pub mod config;
pub mod error;
pub mod extract;
pub mod grammar;
pub mod query;
pub mod scan;

pub use comment::{Comment, Scope};
pub use error::{ExtractError, Result};
pub use extract::{extract, extract_path};
pub use grammar::{Grammar, GrammarRegistry, Language};
