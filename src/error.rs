use std::fmt;

/// Failures raised while scanning, parsing, or building a graph.
///
/// Lexical and syntax errors abort the parse; semantic errors abort the
/// build and leave the graph in its last valid state. Every semantic
/// variant carries the attempted command text so a host UI can show it.
///
/// `Display` and `Error` are implemented by hand rather than derived
/// with `thiserror` because the `source: String` fields (mandated by the
/// spec) would otherwise be inferred as error-source fields.
#[derive(Debug, Clone, PartialEq)]
pub enum GitGraphError {
    Lexical { line: usize, near: String },

    Syntax {
        line: usize,
        found: String,
        expected: Vec<String>,
    },

    DuplicateBranch { name: String },

    UnknownBranch { name: String, command: String },

    SelfMerge { branch: String },

    EmptyBranch { branch: String, command: String },

    SameHead { branch: String },

    DuplicateCommitId { id: String, command: String },

    UnknownCommit { id: String, command: String },

    InvalidParent { parent: String, source: String },

    MergeNeedsParent { source: String },

    AlreadyOnBranch { id: String, branch: String },
}

impl fmt::Display for GitGraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GitGraphError::Lexical { line, near } => write!(
                f,
                "lexical error on line {line}: unrecognized input near '{near}'"
            ),
            GitGraphError::Syntax {
                line,
                found,
                expected,
            } => write!(
                f,
                "syntax error on line {line}: unexpected {found}, expected one of: {}",
                expected.join(", ")
            ),
            GitGraphError::DuplicateBranch { name } => write!(
                f,
                "trying to create an existing branch '{name}' (try \"checkout {name}\")"
            ),
            GitGraphError::UnknownBranch { name, command } => write!(
                f,
                "in \"{command}\": branch '{name}' is not yet created (try \"branch {name}\")"
            ),
            GitGraphError::SelfMerge { branch } => write!(
                f,
                "incorrect usage of \"merge\": cannot merge branch '{branch}' into itself"
            ),
            GitGraphError::EmptyBranch { branch, command } => {
                write!(f, "in \"{command}\": branch '{branch}' has no commits")
            }
            GitGraphError::SameHead { branch: _ } => write!(
                f,
                "incorrect usage of \"merge\": both branches have the same head"
            ),
            GitGraphError::DuplicateCommitId { id, command } => write!(
                f,
                "in \"{command}\": commit id '{id}' already exists, use a different custom id"
            ),
            GitGraphError::UnknownCommit { id, command } => {
                write!(f, "in \"{command}\": source commit '{id}' does not exist")
            }
            GitGraphError::InvalidParent { parent, source } => write!(
                f,
                "commit '{parent}' is not an immediate parent of commit '{source}'"
            ),
            GitGraphError::MergeNeedsParent { source } => write!(
                f,
                "cherry-picking merge commit '{source}' requires an immediate parent to be specified"
            ),
            GitGraphError::AlreadyOnBranch { id, branch } => write!(
                f,
                "cannot cherry-pick '{id}': source commit is already on branch '{branch}'"
            ),
        }
    }
}

impl std::error::Error for GitGraphError {}

pub type Result<T> = std::result::Result<T, GitGraphError>;
