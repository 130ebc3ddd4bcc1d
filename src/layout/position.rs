use std::collections::HashMap;

use super::{BranchLane, Point};
use crate::config::GitGraphConfig;
use crate::graph::GitGraph;

/// Gap between adjacent lanes.
pub(crate) const LANE_SPACING: f64 = 50.0;
/// Extra lane width when commit labels are drawn rotated.
pub(crate) const ROTATED_LABEL_EXTRA: f64 = 40.0;
/// Flow-axis distance between consecutive commits.
pub(crate) const COMMIT_STEP: f64 = 50.0;
/// Offset of a commit bullet past the cursor.
pub(crate) const COMMIT_LEAD: f64 = 10.0;
/// Vertical layouts leave room for branch labels at the top.
pub(crate) const VERTICAL_TOP: f64 = 30.0;
/// Parallel mode: distance past the furthest-placed parent.
pub(crate) const PARALLEL_PARENT_GAP: f64 = 40.0;

/// Assign each branch a lane, in ordered-branch order.
pub fn assign_lanes(graph: &GitGraph, config: &GitGraphConfig) -> HashMap<String, BranchLane> {
    let spacing = LANE_SPACING
        + if config.rotate_commit_label {
            ROTATED_LABEL_EXTRA
        } else {
            0.0
        };
    let mut lanes = HashMap::new();
    let mut pos = 0.0;
    for (index, branch) in graph.branches_ordered().into_iter().enumerate() {
        lanes.insert(branch.name, BranchLane { pos, index });
        pos += spacing;
    }
    lanes
}

pub struct Positioned {
    pub positions: HashMap<String, Point>,
    pub max_offset: f64,
}

/// Place commits along their branch lanes in ascending `seq` order.
///
/// The flow-axis cursor normally advances one step per commit across the
/// whole graph; with `parallel_commits` each commit instead sits one gap
/// past its furthest-placed parent, so concurrent branches share depths.
pub fn position_commits(
    graph: &GitGraph,
    config: &GitGraphConfig,
    lanes: &HashMap<String, BranchLane>,
    vertical: bool,
) -> Positioned {
    let base = if vertical { VERTICAL_TOP } else { 0.0 };
    let mut cursor = base;
    let mut positions: HashMap<String, Point> = HashMap::new();
    let mut max_offset: f64 = 0.0;
    for commit in graph.commits_sorted() {
        if config.parallel_commits {
            cursor = if commit.parents.is_empty() {
                base
            } else {
                commit
                    .parents
                    .iter()
                    .filter_map(|p| positions.get(p))
                    .map(|pt| if vertical { pt.y } else { pt.x })
                    .fold(base, f64::max)
                    + PARALLEL_PARENT_GAP
            };
        }
        let flow = cursor + COMMIT_LEAD;
        let lane = lanes.get(&commit.branch).map(|l| l.pos).unwrap_or(0.0);
        let point = if vertical {
            Point::new(lane, flow)
        } else {
            Point::new(flow, lane)
        };
        positions.insert(commit.id.clone(), point);
        cursor += COMMIT_STEP;
        if cursor > max_offset {
            max_offset = cursor;
        }
    }
    Positioned {
        positions,
        max_offset,
    }
}
