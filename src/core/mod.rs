pub mod branch;
pub mod commit;

pub use branch::BranchMeta;
pub use commit::{Commit, CommitType};

pub(crate) use branch::fractional_order;

/// Diagram flow direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    LR,
    TB,
    BT,
    RL,
}

impl Direction {
    /// Vertical layouts place lanes along the x axis and commits along y.
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::TB | Direction::BT)
    }
}
