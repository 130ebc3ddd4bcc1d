use std::collections::HashMap;

use smallvec::smallvec;
use tracing::{debug, error};
use uuid::Uuid;

use crate::config::GitGraphConfig;
use crate::core::{fractional_order, BranchMeta, Commit, CommitType, Direction};
use crate::error::{GitGraphError, Result};
use crate::parse::{Document, Statement};

/// Mutable commit-graph state driven by the parser.
///
/// One instance per parse session; every operation is an atomic,
/// fully-validated transition. On failure the state is left unchanged and
/// the error propagates to the caller.
#[derive(Debug, Clone)]
pub struct GitGraph {
    config: GitGraphConfig,
    commits: HashMap<String, Commit>,
    branch_heads: HashMap<String, Option<String>>,
    /// Declaration order drives the synthesized sort keys
    branch_meta: Vec<BranchMeta>,
    current_branch: String,
    head: Option<String>,
    direction: Direction,
    seq: u64,
    options: Option<serde_json::Value>,
    acc_title: String,
    acc_descr: String,
    sections: Vec<String>,
}

impl GitGraph {
    /// Empty graph seeded with the configured main branch.
    pub fn new(config: GitGraphConfig) -> Self {
        let main = config.main_branch_name.clone();
        let main_order = config.main_branch_order;
        let mut branch_heads = HashMap::new();
        branch_heads.insert(main.clone(), None);
        Self {
            config,
            commits: HashMap::new(),
            branch_heads,
            branch_meta: vec![BranchMeta::new(main.clone(), Some(main_order))],
            current_branch: main,
            head: None,
            direction: Direction::default(),
            seq: 0,
            options: None,
            acc_title: String::new(),
            acc_descr: String::new(),
            sections: Vec::new(),
        }
    }

    /// Reset to the seeded initial state, as between independent parses.
    pub fn clear(&mut self) {
        *self = GitGraph::new(self.config.clone());
    }

    /// Run every statement of a parsed document against this graph.
    /// Stops at the first semantic failure, leaving the graph in its last
    /// valid state.
    pub fn apply(&mut self, doc: &Document) -> Result<()> {
        if let Some(raw) = &doc.options {
            self.set_options(raw);
        }
        if let Some(direction) = doc.direction {
            self.set_direction(direction);
        }
        for statement in &doc.statements {
            match statement {
                Statement::Commit(f) => {
                    self.commit(
                        f.id.clone(),
                        f.tag.clone(),
                        f.commit_type.unwrap_or(CommitType::Normal),
                        f.message.clone(),
                    );
                }
                Statement::Branch { name, order } => {
                    self.branch(name, order.map(|n| n as f64))?;
                }
                Statement::Checkout { name } => self.checkout(name)?,
                Statement::Merge(f) => {
                    self.merge(&f.branch, f.id.clone(), f.commit_type, f.tag.clone())?;
                }
                Statement::CherryPick(f) => {
                    self.cherry_pick(&f.source, None, f.tag.clone(), f.parent.clone())?;
                }
                Statement::Direction(d) => self.set_direction(*d),
                Statement::AccTitle(s) => self.set_acc_title(s),
                Statement::AccDescr(s) => self.set_acc_description(s),
                Statement::Section(s) => self.add_section(s),
            }
        }
        Ok(())
    }

    /// Create a commit on the current branch and advance the head.
    /// Returns the id of the new commit.
    pub fn commit(
        &mut self,
        id: Option<String>,
        tag: Option<String>,
        commit_type: CommitType,
        message: Option<String>,
    ) -> String {
        let custom_id = matches!(&id, Some(s) if !s.is_empty());
        let id = normalize(id).unwrap_or_else(|| self.generate_id());
        debug!(id = %id, branch = %self.current_branch, "commit");
        let commit = Commit {
            id: id.clone(),
            message: normalize(message).unwrap_or_default(),
            seq: self.next_seq(),
            commit_type,
            custom_type: None,
            custom_id,
            tag: normalize(tag),
            parents: match &self.head {
                Some(head) => smallvec![head.clone()],
                None => smallvec![],
            },
            branch: self.current_branch.clone(),
        };
        self.push_commit(commit);
        id
    }

    /// Register a new branch pointing at the current head. Does not switch
    /// onto it; that takes an explicit `checkout`.
    pub fn branch(&mut self, name: &str, order: Option<f64>) -> Result<()> {
        if self.branch_heads.contains_key(name) {
            return Err(GitGraphError::DuplicateBranch {
                name: name.to_string(),
            });
        }
        debug!(name, ?order, "create branch");
        self.branch_heads.insert(name.to_string(), self.head.clone());
        self.branch_meta.push(BranchMeta::new(name, order));
        Ok(())
    }

    /// Make `name` the current branch and move the session head to its tip.
    pub fn checkout(&mut self, name: &str) -> Result<()> {
        let Some(head) = self.branch_heads.get(name) else {
            return Err(GitGraphError::UnknownBranch {
                name: name.to_string(),
                command: format!("checkout {name}"),
            });
        };
        self.head = head.clone();
        self.current_branch = name.to_string();
        Ok(())
    }

    /// Merge `other` into the current branch, creating a two-parent commit.
    /// Returns the id of the merge commit.
    pub fn merge(
        &mut self,
        other: &str,
        custom_id: Option<String>,
        custom_type: Option<CommitType>,
        tag: Option<String>,
    ) -> Result<String> {
        let command = format!("merge {other}");
        if other == self.current_branch {
            return Err(GitGraphError::SelfMerge {
                branch: self.current_branch.clone(),
            });
        }
        let current_head = self
            .branch_heads
            .get(&self.current_branch)
            .cloned()
            .flatten()
            .filter(|id| self.commits.contains_key(id));
        let Some(current_head) = current_head else {
            return Err(GitGraphError::EmptyBranch {
                branch: self.current_branch.clone(),
                command,
            });
        };
        let Some(other_head) = self.branch_heads.get(other) else {
            return Err(GitGraphError::UnknownBranch {
                name: other.to_string(),
                command,
            });
        };
        let other_head = other_head
            .clone()
            .filter(|id| self.commits.contains_key(id));
        let Some(other_head) = other_head else {
            return Err(GitGraphError::EmptyBranch {
                branch: other.to_string(),
                command,
            });
        };
        if current_head == other_head {
            return Err(GitGraphError::SameHead {
                branch: other.to_string(),
            });
        }
        let custom_id = normalize(custom_id);
        if let Some(id) = &custom_id {
            if self.commits.contains_key(id) {
                return Err(GitGraphError::DuplicateCommitId {
                    id: id.clone(),
                    command,
                });
            }
        }
        debug!(other, branch = %self.current_branch, "merge branch");
        let is_custom = custom_id.is_some();
        let id = custom_id.unwrap_or_else(|| self.generate_id());
        let commit = Commit {
            id: id.clone(),
            message: format!("merged branch {other} into {}", self.current_branch),
            seq: self.next_seq(),
            commit_type: CommitType::Merge,
            custom_type,
            custom_id: is_custom,
            tag: normalize(tag),
            parents: smallvec![current_head, other_head],
            branch: self.current_branch.clone(),
        };
        self.push_commit(commit);
        Ok(id)
    }

    /// Re-apply `source` onto the current branch as a two-parent
    /// cherry-pick commit. Returns the new commit's id, or `None` when
    /// `target_id` already names an existing commit (legacy escape hatch:
    /// the operation is silently skipped).
    pub fn cherry_pick(
        &mut self,
        source: &str,
        target_id: Option<&str>,
        tag: Option<String>,
        parent: Option<String>,
    ) -> Result<Option<String>> {
        let command = format!("cherry-pick {source}");
        let Some(source_commit) = self.commits.get(source) else {
            return Err(GitGraphError::UnknownCommit {
                id: source.to_string(),
                command,
            });
        };
        let source_commit = source_commit.clone();
        if let Some(p) = &parent {
            if !source_commit.parents.iter().any(|pid| pid == p) {
                return Err(GitGraphError::InvalidParent {
                    parent: p.clone(),
                    source: source.to_string(),
                });
            }
        }
        if source_commit.commit_type == CommitType::Merge && parent.is_none() {
            return Err(GitGraphError::MergeNeedsParent {
                source: source.to_string(),
            });
        }
        if let Some(target) = target_id {
            if self.commits.contains_key(target) {
                debug!(source, target, "cherry-pick target exists, skipping");
                return Ok(None);
            }
        }
        if source_commit.branch == self.current_branch {
            return Err(GitGraphError::AlreadyOnBranch {
                id: source.to_string(),
                branch: self.current_branch.clone(),
            });
        }
        let current_head = self
            .branch_heads
            .get(&self.current_branch)
            .cloned()
            .flatten()
            .filter(|id| self.commits.contains_key(id));
        let Some(current_head) = current_head else {
            return Err(GitGraphError::EmptyBranch {
                branch: self.current_branch.clone(),
                command,
            });
        };
        let tag = match tag {
            Some(t) if t.is_empty() => None,
            Some(t) => Some(t),
            None => {
                let mut t = format!("cherry-pick:{source}");
                if source_commit.commit_type == CommitType::Merge {
                    // parent presence was validated above
                    if let Some(p) = &parent {
                        t.push_str(&format!("|parent:{p}"));
                    }
                }
                Some(t)
            }
        };
        debug!(source, branch = %self.current_branch, "cherry-pick");
        let id = self.generate_id();
        let commit = Commit {
            id: id.clone(),
            message: format!("cherry-picked {source} into {}", self.current_branch),
            seq: self.next_seq(),
            commit_type: CommitType::CherryPick,
            custom_type: None,
            custom_id: false,
            tag,
            parents: smallvec![current_head, source.to_string()],
            branch: self.current_branch.clone(),
        };
        self.push_commit(commit);
        Ok(Some(id))
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Parse the raw `options ... end` block body as JSON. A malformed
    /// block is logged and ignored, it never aborts the parse.
    pub fn set_options(&mut self, raw: &str) {
        let trimmed = raw.trim();
        let body = if trimmed.is_empty() { "{}" } else { trimmed };
        match serde_json::from_str(body) {
            Ok(value) => self.options = Some(value),
            Err(e) => error!("error while parsing gitGraph options: {e}"),
        }
    }

    pub fn set_acc_title(&mut self, title: &str) {
        self.acc_title = title.trim().to_string();
    }

    pub fn set_acc_description(&mut self, descr: &str) {
        self.acc_descr = descr.trim().to_string();
    }

    pub fn add_section(&mut self, section: &str) {
        self.sections.push(section.to_string());
    }

    pub fn commits(&self) -> &HashMap<String, Commit> {
        &self.commits
    }

    pub fn commit_by_id(&self, id: &str) -> Option<&Commit> {
        self.commits.get(id)
    }

    /// All commits in ascending creation order.
    pub fn commits_sorted(&self) -> Vec<&Commit> {
        let mut all: Vec<&Commit> = self.commits.values().collect();
        all.sort_by_key(|c| c.seq);
        all
    }

    pub fn branch_heads(&self) -> &HashMap<String, Option<String>> {
        &self.branch_heads
    }

    /// Branches sorted by explicit `order`, with branches lacking one given
    /// a fractional `0.<index>` key so they interleave deterministically by
    /// declaration order.
    pub fn branches_ordered(&self) -> Vec<BranchMeta> {
        let mut out: Vec<BranchMeta> = self
            .branch_meta
            .iter()
            .enumerate()
            .map(|(index, b)| BranchMeta {
                name: b.name.clone(),
                order: b.order.or(Some(fractional_order(index))),
            })
            .collect();
        out.sort_by(|a, b| {
            a.order
                .partial_cmp(&b.order)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        out
    }

    pub fn current_branch(&self) -> &str {
        &self.current_branch
    }

    pub fn head(&self) -> Option<&Commit> {
        self.head.as_ref().and_then(|id| self.commits.get(id))
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn options(&self) -> Option<&serde_json::Value> {
        self.options.as_ref()
    }

    pub fn acc_title(&self) -> &str {
        &self.acc_title
    }

    pub fn acc_description(&self) -> &str {
        &self.acc_descr
    }

    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    pub fn config(&self) -> &GitGraphConfig {
        &self.config
    }

    /// Commit ids in an order where every commit precedes all of its
    /// parents, starting from the newest commit and walking its ancestry.
    /// Commits reachable through two paths appear once.
    pub fn topo_order(&self) -> Vec<String> {
        let Some(tip) = self.commits.values().max_by_key(|c| c.seq) else {
            return Vec::new();
        };
        let mut frontier: Vec<&Commit> = vec![tip];
        let mut visited: std::collections::HashSet<&str> = std::collections::HashSet::new();
        let mut out = Vec::new();
        while let Some(idx) = frontier
            .iter()
            .enumerate()
            .max_by_key(|(_, c)| c.seq)
            .map(|(i, _)| i)
        {
            let commit = frontier.swap_remove(idx);
            if !visited.insert(commit.id.as_str()) {
                continue;
            }
            out.push(commit.id.clone());
            for pid in &commit.parents {
                if let Some(parent) = self.commits.get(pid) {
                    if !visited.contains(parent.id.as_str()) {
                        frontier.push(parent);
                    }
                }
            }
        }
        out
    }

    /// Log the deduplicated ancestry walk, newest first, with the branch
    /// tips pointing at each commit.
    pub fn pretty_print(&self) {
        for id in self.topo_order() {
            if let Some(commit) = self.commits.get(&id) {
                let tips: Vec<&str> = self
                    .branch_heads
                    .iter()
                    .filter(|(_, head)| head.as_deref() == Some(id.as_str()))
                    .map(|(name, _)| name.as_str())
                    .collect();
                debug!(seq = commit.seq, branch = %commit.branch, ?tips, "* {}", commit.id);
            }
        }
    }

    fn generate_id(&self) -> String {
        let suffix = Uuid::new_v4().simple().to_string();
        format!("{}-{}", self.seq, &suffix[..7])
    }

    fn next_seq(&mut self) -> u64 {
        let seq = self.seq;
        self.seq += 1;
        seq
    }

    fn push_commit(&mut self, commit: Commit) {
        self.head = Some(commit.id.clone());
        self.branch_heads
            .insert(self.current_branch.clone(), Some(commit.id.clone()));
        self.commits.insert(commit.id.clone(), commit);
    }
}

impl Default for GitGraph {
    fn default() -> Self {
        Self::new(GitGraphConfig::default())
    }
}

/// Empty strings from the DSL mean "absent".
fn normalize(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph() -> GitGraph {
        GitGraph::default()
    }

    #[test]
    fn commit_advances_head_and_seq() {
        let mut g = graph();
        let a = g.commit(Some("a".to_string()), None, CommitType::Normal, None);
        let b = g.commit(Some("b".to_string()), None, CommitType::Normal, None);
        assert_eq!(a, "a");
        assert_eq!(g.head().unwrap().id, b);
        assert!(g.commits()["a"].seq < g.commits()["b"].seq);
        assert_eq!(g.commits()["b"].parents.as_slice(), ["a".to_string()]);
        assert!(g.commits()["a"].parents.is_empty());
    }

    #[test]
    fn auto_ids_are_unique() {
        let mut g = graph();
        let a = g.commit(None, None, CommitType::Normal, None);
        let b = g.commit(None, None, CommitType::Normal, None);
        assert_ne!(a, b);
        assert!(!g.commits()[&a].custom_id);
    }

    #[test]
    fn duplicate_branch_is_rejected_and_leaves_state_unchanged() {
        let mut g = graph();
        g.branch("x", None).unwrap();
        let before_branches = g.branches_ordered().len();
        let before_commits = g.commits().len();
        let err = g.branch("x", None).unwrap_err();
        assert_eq!(
            err,
            GitGraphError::DuplicateBranch {
                name: "x".to_string()
            }
        );
        assert_eq!(g.branches_ordered().len(), before_branches);
        assert_eq!(g.commits().len(), before_commits);
    }

    #[test]
    fn branch_does_not_checkout() {
        let mut g = graph();
        g.commit(Some("a".to_string()), None, CommitType::Normal, None);
        g.branch("feature", None).unwrap();
        assert_eq!(g.current_branch(), "main");
        g.checkout("feature").unwrap();
        assert_eq!(g.current_branch(), "feature");
        assert_eq!(g.head().unwrap().id, "a");
    }

    #[test]
    fn checkout_unknown_branch_fails() {
        let mut g = graph();
        let err = g.checkout("nope").unwrap_err();
        assert!(matches!(err, GitGraphError::UnknownBranch { .. }));
    }

    #[test]
    fn self_merge_is_rejected_without_creating_a_commit() {
        let mut g = graph();
        g.commit(Some("a".to_string()), None, CommitType::Normal, None);
        let err = g.merge("main", None, None, None).unwrap_err();
        assert!(matches!(err, GitGraphError::SelfMerge { .. }));
        assert_eq!(g.commits().len(), 1);
    }

    #[test]
    fn merge_requires_commits_on_both_branches() {
        let mut g = graph();
        g.branch("dev", None).unwrap();
        // current branch empty
        assert!(matches!(
            g.merge("dev", None, None, None).unwrap_err(),
            GitGraphError::EmptyBranch { .. }
        ));
        g.commit(Some("a".to_string()), None, CommitType::Normal, None);
        // dev head equals main head: both point at "a"? dev was created
        // before the commit, so dev has no commits at all
        assert!(matches!(
            g.merge("dev", None, None, None).unwrap_err(),
            GitGraphError::EmptyBranch { .. }
        ));
    }

    #[test]
    fn merge_with_same_head_is_rejected() {
        let mut g = graph();
        g.commit(Some("a".to_string()), None, CommitType::Normal, None);
        g.branch("dev", None).unwrap();
        // dev snapshotted main's head, no commits since
        assert!(matches!(
            g.merge("dev", None, None, None).unwrap_err(),
            GitGraphError::SameHead { .. }
        ));
    }

    #[test]
    fn merge_parent_order_and_head_update() {
        let mut g = graph();
        g.commit(Some("a".to_string()), None, CommitType::Normal, None);
        g.branch("feature", None).unwrap();
        g.checkout("feature").unwrap();
        g.commit(Some("b".to_string()), None, CommitType::Normal, None);
        g.checkout("main").unwrap();
        let m = g.merge("feature", Some("m".to_string()), None, None).unwrap();
        let merge = &g.commits()[&m];
        assert_eq!(merge.parents.as_slice(), ["a".to_string(), "b".to_string()]);
        assert_eq!(merge.commit_type, CommitType::Merge);
        assert!(merge.custom_id);
        assert_eq!(g.branch_heads()["main"].as_deref(), Some("m"));
        assert_eq!(g.branch_heads()["feature"].as_deref(), Some("b"));
    }

    #[test]
    fn merge_duplicate_custom_id_is_rejected() {
        let mut g = graph();
        g.commit(Some("a".to_string()), None, CommitType::Normal, None);
        g.branch("dev", None).unwrap();
        g.checkout("dev").unwrap();
        g.commit(Some("b".to_string()), None, CommitType::Normal, None);
        g.checkout("main").unwrap();
        let err = g.merge("dev", Some("a".to_string()), None, None).unwrap_err();
        assert!(matches!(err, GitGraphError::DuplicateCommitId { .. }));
        assert_eq!(g.commits().len(), 2);
    }

    #[test]
    fn merge_unknown_branch_is_rejected() {
        let mut g = graph();
        g.commit(None, None, CommitType::Normal, None);
        assert!(matches!(
            g.merge("ghost", None, None, None).unwrap_err(),
            GitGraphError::UnknownBranch { .. }
        ));
    }

    #[test]
    fn cherry_pick_unknown_source_fails() {
        let mut g = graph();
        g.commit(None, None, CommitType::Normal, None);
        assert!(matches!(
            g.cherry_pick("ghost", None, None, None).unwrap_err(),
            GitGraphError::UnknownCommit { .. }
        ));
    }

    #[test]
    fn cherry_pick_of_merge_requires_parent() {
        let mut g = graph();
        g.commit(Some("a".to_string()), None, CommitType::Normal, None);
        g.branch("dev", None).unwrap();
        g.checkout("dev").unwrap();
        g.commit(Some("b".to_string()), None, CommitType::Normal, None);
        g.checkout("main").unwrap();
        g.merge("dev", Some("m".to_string()), None, None).unwrap();
        g.branch("target", None).unwrap();
        g.checkout("target").unwrap();
        g.commit(Some("t".to_string()), None, CommitType::Normal, None);

        assert!(matches!(
            g.cherry_pick("m", None, None, None).unwrap_err(),
            GitGraphError::MergeNeedsParent { .. }
        ));
        let picked = g
            .cherry_pick("m", None, None, Some("a".to_string()))
            .unwrap()
            .unwrap();
        let commit = &g.commits()[&picked];
        assert_eq!(commit.commit_type, CommitType::CherryPick);
        assert_eq!(commit.parents.as_slice(), ["t".to_string(), "m".to_string()]);
        assert_eq!(commit.tag.as_deref(), Some("cherry-pick:m|parent:a"));
    }

    #[test]
    fn cherry_pick_invalid_parent_override_fails() {
        let mut g = graph();
        g.commit(Some("a".to_string()), None, CommitType::Normal, None);
        g.branch("dev", None).unwrap();
        g.checkout("dev").unwrap();
        g.commit(Some("b".to_string()), None, CommitType::Normal, None);
        g.checkout("main").unwrap();
        assert!(matches!(
            g.cherry_pick("b", None, None, Some("zzz".to_string()))
                .unwrap_err(),
            GitGraphError::InvalidParent { .. }
        ));
    }

    #[test]
    fn cherry_pick_same_branch_fails_without_target_escape() {
        let mut g = graph();
        g.commit(Some("a".to_string()), None, CommitType::Normal, None);
        g.commit(Some("b".to_string()), None, CommitType::Normal, None);
        assert!(matches!(
            g.cherry_pick("a", None, None, None).unwrap_err(),
            GitGraphError::AlreadyOnBranch { .. }
        ));
        // target naming an existing commit turns the operation into a no-op
        let before = g.commits().len();
        assert_eq!(g.cherry_pick("a", Some("b"), None, None).unwrap(), None);
        assert_eq!(g.commits().len(), before);
    }

    #[test]
    fn cherry_pick_default_and_explicit_empty_tag() {
        let mut g = graph();
        g.commit(Some("a".to_string()), None, CommitType::Normal, None);
        g.branch("dev", None).unwrap();
        g.checkout("dev").unwrap();
        g.commit(Some("b".to_string()), None, CommitType::Normal, None);
        g.checkout("main").unwrap();
        let picked = g.cherry_pick("b", None, None, None).unwrap().unwrap();
        assert_eq!(g.commits()[&picked].tag.as_deref(), Some("cherry-pick:b"));

        g.checkout("dev").unwrap();
        g.commit(Some("c".to_string()), None, CommitType::Normal, None);
        g.checkout("main").unwrap();
        let picked = g
            .cherry_pick("c", None, Some(String::new()), None)
            .unwrap()
            .unwrap();
        assert_eq!(g.commits()[&picked].tag, None);
    }

    #[test]
    fn clear_is_idempotent() {
        let mut g = graph();
        g.commit(None, None, CommitType::Normal, None);
        g.branch("dev", Some(1.0)).unwrap();
        g.set_direction(Direction::TB);
        g.clear();
        let snapshot = format!("{:?}", g.branches_ordered());
        assert!(g.commits().is_empty());
        assert!(g.head().is_none());
        assert_eq!(g.current_branch(), "main");
        assert_eq!(g.direction(), Direction::LR);
        g.clear();
        assert_eq!(format!("{:?}", g.branches_ordered()), snapshot);
    }

    #[test]
    fn branches_ordered_interleaves_fractional_keys() {
        let mut g = graph();
        g.branch("first", None).unwrap(); // index 1 -> 0.1
        g.branch("pinned", Some(0.05)).unwrap();
        g.branch("last", Some(2.0)).unwrap();
        let names: Vec<String> = g.branches_ordered().into_iter().map(|b| b.name).collect();
        // main has explicit order 0, then pinned (0.05), then first (0.1)
        assert_eq!(names, ["main", "pinned", "first", "last"]);
    }

    #[test]
    fn topo_order_places_children_before_parents_and_dedupes() {
        let mut g = graph();
        g.commit(Some("a".to_string()), None, CommitType::Normal, None);
        g.branch("dev", None).unwrap();
        g.checkout("dev").unwrap();
        g.commit(Some("b".to_string()), None, CommitType::Normal, None);
        g.checkout("main").unwrap();
        g.commit(Some("c".to_string()), None, CommitType::Normal, None);
        g.merge("dev", Some("m".to_string()), None, None).unwrap();
        let order = g.topo_order();
        assert_eq!(order.len(), 4); // "a" reachable twice, visited once
        let pos = |id: &str| order.iter().position(|x| x == id).unwrap();
        assert!(pos("m") < pos("c"));
        assert!(pos("m") < pos("b"));
        assert!(pos("c") < pos("a"));
        assert!(pos("b") < pos("a"));
    }

    #[test]
    fn options_parse_as_json_and_bad_options_are_ignored() {
        let mut g = graph();
        g.set_options("{\"showBranches\": false}\n");
        assert_eq!(
            g.options().unwrap()["showBranches"],
            serde_json::Value::Bool(false)
        );
        g.set_options("not json");
        // previous value kept
        assert!(g.options().is_some());
    }
}
