pub mod lexer;
pub mod parser;

pub use lexer::{lex, SpannedToken, Token};
pub use parser::parse;

use crate::core::{CommitType, Direction};

/// Keyed fields of a `commit` statement; every field is optional and the
/// DSL accepts them in any order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommitFields {
    pub id: Option<String>,
    pub tag: Option<String>,
    pub commit_type: Option<CommitType>,
    pub message: Option<String>,
}

/// Keyed fields of a `merge` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeFields {
    pub branch: String,
    pub id: Option<String>,
    pub commit_type: Option<CommitType>,
    pub tag: Option<String>,
}

/// Keyed fields of a `cherry-pick` statement. `tag: Some("")` records an
/// explicit empty tag (`tag: ""` in source), which suppresses the default
/// cherry-pick tag.
#[derive(Debug, Clone, PartialEq)]
pub struct CherryPickFields {
    pub source: String,
    pub tag: Option<String>,
    pub parent: Option<String>,
}

/// One grammar rule's worth of builder input.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Commit(CommitFields),
    Branch { name: String, order: Option<i64> },
    Checkout { name: String },
    Merge(MergeFields),
    CherryPick(CherryPickFields),
    Direction(Direction),
    AccTitle(String),
    AccDescr(String),
    Section(String),
}

/// A parsed diagram: the header's direction and raw options block plus the
/// statement list in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub direction: Option<Direction>,
    pub options: Option<String>,
    pub statements: Vec<Statement>,
}
