pub mod position;
pub mod route;

pub use route::{BendAllocator, PathSegment, RoutedEdge};

use std::collections::HashMap;

use crate::config::GitGraphConfig;
use crate::core::Direction;
use crate::graph::GitGraph;

/// A point in layout space. For horizontal layouts x is the flow axis and
/// y the lane axis; vertical layouts swap them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Fixed visual band assigned to a branch: its coordinate on the lane axis
/// and its position in the ordered branch list (renderers derive palette
/// colors from `index`).
#[derive(Debug, Clone, PartialEq)]
pub struct BranchLane {
    pub pos: f64,
    pub index: usize,
}

/// Drawable geometry for a finished graph, independent of any rendering
/// backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub direction: Direction,
    /// Branch name -> lane
    pub lanes: HashMap<String, BranchLane>,
    /// Commit id -> position
    pub positions: HashMap<String, Point>,
    /// One routed path per (commit, parent) pair
    pub edges: Vec<RoutedEdge>,
    /// Extent of the flow axis after the last commit
    pub max_offset: f64,
}

/// Compute lanes, commit positions and routed parent edges.
pub fn layout(graph: &GitGraph, config: &GitGraphConfig) -> Layout {
    let direction = graph.direction();
    let vertical = direction.is_vertical();
    let lanes = position::assign_lanes(graph, config);
    let positioned = position::position_commits(graph, config, &lanes, vertical);
    let mut bends = BendAllocator::new();
    if config.show_branches {
        // drawn lane lines claim their offsets before any edge bends
        for lane in lanes.values() {
            bends.seed(lane.pos);
        }
    }
    let edges = route::route_edges(graph, &lanes, &positioned.positions, vertical, &mut bends);
    Layout {
        direction,
        lanes,
        positions: positioned.positions,
        edges,
        max_offset: positioned.max_offset,
    }
}
