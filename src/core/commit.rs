use smallvec::SmallVec;

/// Visual classification of a commit node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitType {
    Normal,
    Reverse,
    Highlight,
    Merge,
    CherryPick,
}

/// A commit node in the graph
#[derive(Debug, Clone, PartialEq)]
pub struct Commit {
    /// Unique commit id (explicit or auto-generated)
    pub id: String,
    /// Commit message
    pub message: String,
    /// Creation-order counter, strictly increasing across the graph
    pub seq: u64,
    /// Structural type of the commit
    pub commit_type: CommitType,
    /// Requested visual type for merge commits whose marker differs
    /// from the plain merge dot
    pub custom_type: Option<CommitType>,
    /// True when the author supplied the id explicitly
    pub custom_id: bool,
    /// Optional tag label; never stored as an empty string
    pub tag: Option<String>,
    /// Parent commit ids, at most two
    pub parents: SmallVec<[String; 2]>,
    /// Branch that was checked out when the commit was created
    pub branch: String,
}

impl Commit {
    /// Check if this is a root commit (no parents)
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// Check if this is a two-parent commit (merge or cherry-pick)
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    /// Type a renderer should draw; the explicit override wins.
    pub fn display_type(&self) -> CommitType {
        self.custom_type.unwrap_or(self.commit_type)
    }
}
