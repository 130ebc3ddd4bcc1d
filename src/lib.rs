//! gitGraph diagram engine: a lexer and parser for the gitGraph text DSL,
//! a validating commit-graph builder, and a renderer-agnostic 2D layout
//! pass (lane assignment, commit placement, edge routing).
//!
//! The pipeline is three stages, each usable on its own:
//!
//! ```text
//! text --parse--> Document --apply--> GitGraph --layout--> Layout
//! ```
//!
//! [`compile`] runs the first two, producing a validated graph; [`layout`]
//! turns a graph into drawable geometry.
//!
//! ```
//! use gitgraph::{compile, layout, GitGraphConfig};
//!
//! let graph = compile(
//!     "gitGraph:\n commit id: \"a\"\n branch dev\n checkout dev\n commit id: \"b\"\n",
//!     GitGraphConfig::default(),
//! )?;
//! assert_eq!(graph.commits().len(), 2);
//! let geometry = layout(&graph, graph.config());
//! assert_eq!(geometry.edges.len(), 1);
//! # Ok::<(), gitgraph::GitGraphError>(())
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod graph;
pub mod layout;
pub mod parse;

pub use config::GitGraphConfig;
pub use core::{BranchMeta, Commit, CommitType, Direction};
pub use error::GitGraphError;
pub use graph::GitGraph;
pub use layout::{layout, BranchLane, Layout, PathSegment, Point, RoutedEdge};
pub use parse::{parse, Document, Statement};

/// Parse `input` and replay it onto a fresh graph.
pub fn compile(input: &str, config: GitGraphConfig) -> error::Result<GitGraph> {
    let doc = parse::parse(input)?;
    let mut graph = GitGraph::new(config);
    graph.apply(&doc)?;
    Ok(graph)
}
