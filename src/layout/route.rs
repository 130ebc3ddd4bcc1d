use std::collections::HashMap;

use super::{BranchLane, Point};
use crate::core::{Commit, CommitType};
use crate::graph::GitGraph;

/// Corner radius of an ordinary one-bend edge.
pub(crate) const BEND_RADIUS: f64 = 20.0;
/// Corner radius of a rerouted edge (two bends around traffic).
pub(crate) const REROUTE_RADIUS: f64 = 10.0;
/// Minimum distance between two routed bend offsets.
pub(crate) const MIN_BEND_SPACING: f64 = 10.0;
/// Defensive cap on the bend-offset search; past this the candidate is
/// taken as-is.
pub(crate) const MAX_BEND_DEPTH: u32 = 5;

/// One piece of a routed edge path.
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    Move(Point),
    Line(Point),
    /// Quarter arc ending at `to`; `clockwise` is the sweep direction.
    Arc {
        radius: f64,
        clockwise: bool,
        to: Point,
    },
}

/// Routed path for one parent -> child edge, plus the palette slot a
/// renderer should color it with.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutedEdge {
    pub parent: String,
    pub child: String,
    pub segments: Vec<PathSegment>,
    pub color_index: usize,
}

/// Hands out bend offsets between two lane coordinates, steering clear of
/// offsets already in use so stacked arcs stay visually separate.
#[derive(Debug, Default)]
pub struct BendAllocator {
    used: Vec<f64>,
}

impl BendAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve an offset that is in use for other reasons (e.g. a drawn
    /// branch lane line).
    pub fn seed(&mut self, offset: f64) {
        self.used.push(offset);
    }

    /// Pick an offset strictly between `lo` and `hi`, at least
    /// [`MIN_BEND_SPACING`] away from every previously used offset.
    /// Starts at the midpoint and shrinks the interval by a fifth per
    /// attempt; after [`MAX_BEND_DEPTH`] attempts the last candidate is
    /// returned unrecorded.
    pub fn allocate(&mut self, lo: f64, hi: f64) -> f64 {
        self.search(lo, hi, 0)
    }

    fn search(&mut self, lo: f64, hi: f64, depth: u32) -> f64 {
        let candidate = lo + (hi - lo).abs() / 2.0;
        if depth > MAX_BEND_DEPTH {
            return candidate;
        }
        if self
            .used
            .iter()
            .all(|u| (u - candidate).abs() >= MIN_BEND_SPACING)
        {
            self.used.push(candidate);
            return candidate;
        }
        let span = (hi - lo).abs();
        self.search(lo, hi - span / 5.0, depth + 1)
    }
}

/// Route one path per (commit, parent) pair.
pub fn route_edges(
    graph: &GitGraph,
    lanes: &HashMap<String, BranchLane>,
    positions: &HashMap<String, Point>,
    vertical: bool,
    bends: &mut BendAllocator,
) -> Vec<RoutedEdge> {
    let mut edges = Vec::new();
    for child in graph.commits_sorted() {
        for pid in &child.parents {
            let parent = graph.commit_by_id(pid);
            let from = positions.get(pid.as_str()).copied();
            let to = positions.get(child.id.as_str()).copied();
            if let (Some(parent), Some(from), Some(to)) = (parent, from, to) {
                edges.push(route_edge(graph, lanes, vertical, bends, parent, child, from, to));
            }
        }
    }
    edges
}

/// A lane has traffic between the two commits when some commit on the
/// overlapped branch was created between them; the overlapped branch is
/// the child's when the edge runs toward higher lane offsets, otherwise
/// the parent's.
fn has_lane_traffic(
    graph: &GitGraph,
    parent: &Commit,
    child: &Commit,
    from: Point,
    to: Point,
    vertical: bool,
) -> bool {
    let toward_higher = if vertical { from.x < to.x } else { from.y < to.y };
    let overlapped = if toward_higher {
        &child.branch
    } else {
        &parent.branch
    };
    graph
        .commits()
        .values()
        .any(|c| c.seq > parent.seq && c.seq < child.seq && c.branch == *overlapped)
}

#[allow(clippy::too_many_arguments)]
fn route_edge(
    graph: &GitGraph,
    lanes: &HashMap<String, BranchLane>,
    vertical: bool,
    bends: &mut BendAllocator,
    parent: &Commit,
    child: &Commit,
    from: Point,
    to: Point,
) -> RoutedEdge {
    // merge-in arrows (into a merge commit from the merged branch) bend at
    // the child end and take the source branch's color
    let merge_in = child.commit_type == CommitType::Merge
        && child.parents.first().map(|p| p != &parent.id).unwrap_or(false);
    let lane_index =
        |branch: &str| lanes.get(branch).map(|l| l.index).unwrap_or(0);
    let mut color_index = if merge_in {
        lane_index(&parent.branch)
    } else {
        lane_index(&child.branch)
    };

    let mut segments = vec![PathSegment::Move(from)];
    if has_lane_traffic(graph, parent, child, from, to, vertical) {
        let r = REROUTE_RADIUS;
        if vertical {
            let bend = if from.x < to.x {
                bends.allocate(from.x, to.x)
            } else {
                bends.allocate(to.x, from.x)
            };
            if from.x < to.x {
                segments.push(line(bend - r, from.y));
                segments.push(arc(r, true, bend, from.y + r));
                segments.push(line(bend, to.y - r));
                segments.push(arc(r, false, bend + r, to.y));
            } else {
                color_index = lane_index(&parent.branch);
                segments.push(line(bend + r, from.y));
                segments.push(arc(r, false, bend, from.y + r));
                segments.push(line(bend, to.y - r));
                segments.push(arc(r, true, bend - r, to.y));
            }
        } else {
            let bend = if from.y < to.y {
                bends.allocate(from.y, to.y)
            } else {
                bends.allocate(to.y, from.y)
            };
            if from.y < to.y {
                segments.push(line(from.x, bend - r));
                segments.push(arc(r, false, from.x + r, bend));
                segments.push(line(to.x - r, bend));
                segments.push(arc(r, true, to.x, bend + r));
            } else {
                color_index = lane_index(&parent.branch);
                segments.push(line(from.x, bend + r));
                segments.push(arc(r, true, from.x + r, bend));
                segments.push(line(to.x - r, bend));
                segments.push(arc(r, false, to.x, bend - r));
            }
        }
        segments.push(PathSegment::Line(to));
    } else {
        let r = BEND_RADIUS;
        if vertical {
            if from.x < to.x {
                if merge_in {
                    segments.push(line(from.x, to.y - r));
                    segments.push(arc(r, false, from.x + r, to.y));
                } else {
                    segments.push(line(to.x - r, from.y));
                    segments.push(arc(r, true, to.x, from.y + r));
                }
            } else if from.x > to.x {
                if merge_in {
                    segments.push(line(from.x, to.y - r));
                    segments.push(arc(r, true, from.x - r, to.y));
                } else {
                    segments.push(line(to.x + r, from.y));
                    segments.push(arc(r, false, to.x, from.y + r));
                }
            }
            segments.push(PathSegment::Line(to));
        } else {
            if from.y < to.y {
                if merge_in {
                    segments.push(line(to.x - r, from.y));
                    segments.push(arc(r, true, to.x, from.y + r));
                } else {
                    segments.push(line(from.x, to.y - r));
                    segments.push(arc(r, false, from.x + r, to.y));
                }
            } else if from.y > to.y {
                if merge_in {
                    segments.push(line(to.x - r, from.y));
                    segments.push(arc(r, false, to.x, from.y - r));
                } else {
                    segments.push(line(from.x, to.y + r));
                    segments.push(arc(r, true, from.x + r, to.y));
                }
            }
            segments.push(PathSegment::Line(to));
        }
    }

    RoutedEdge {
        parent: parent.id.clone(),
        child: child.id.clone(),
        segments,
        color_index,
    }
}

fn line(x: f64, y: f64) -> PathSegment {
    PathSegment::Line(Point::new(x, y))
}

fn arc(radius: f64, clockwise: bool, x: f64, y: f64) -> PathSegment {
    PathSegment::Arc {
        radius,
        clockwise,
        to: Point::new(x, y),
    }
}
