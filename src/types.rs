use std::fmt;

/// Identity of a ZDD node: a (row, column) pair into the level-indexed
/// node table.
///
/// `row` is the node's level (the number of edges still undecided below
/// it, so the root of a diagram over `m` edges sits at row `m`), and
/// `col` is its column within that level's node vector.
///
/// # Invariants
///
/// - Row 0 is reserved for the two terminals:
///   `NodeId::BOTTOM` = (0, 0) is ⊥ (the empty family) and
///   `NodeId::TOP` = (0, 1) is ⊤ (the family containing the empty set).
/// - Decision nodes have `row >= 1`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct NodeId {
    row: u32,
    col: u32,
}

impl NodeId {
    /// The ⊥ terminal (empty family).
    pub const BOTTOM: NodeId = NodeId { row: 0, col: 0 };

    /// The ⊤ terminal (family containing only the empty set).
    pub const TOP: NodeId = NodeId { row: 0, col: 1 };

    /// Creates a node identity from a level and a column.
    pub const fn new(row: usize, col: usize) -> Self {
        NodeId {
            row: row as u32,
            col: col as u32,
        }
    }

    /// The node's level.
    pub const fn row(self) -> usize {
        self.row as usize
    }

    /// The node's column within its level.
    pub const fn col(self) -> usize {
        self.col as usize
    }

    /// Returns true for ⊥ and ⊤.
    pub const fn is_terminal(self) -> bool {
        self.row == 0
    }

    /// Returns true if this is the ⊥ terminal.
    pub const fn is_bottom(self) -> bool {
        self.row == 0 && self.col == 0
    }

    /// Returns true if this is the ⊤ terminal.
    pub const fn is_top(self) -> bool {
        self.row == 0 && self.col == 1
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_bottom() {
            write!(f, "⊥")
        } else if self.is_top() {
            write!(f, "⊤")
        } else {
            write!(f, "{}:{}", self.row, self.col)
        }
    }
}

/// A decision node: the two successors of a binary decision on one edge.
///
/// `lo` is followed when the edge is excluded, `hi` when it is included.
/// In a reduced diagram `hi` is never ⊥ (zero-suppression rule) and no two
/// nodes on one level share the same (lo, hi) pair.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ZddNode {
    /// Successor on the 0-branch (edge excluded).
    pub lo: NodeId,
    /// Successor on the 1-branch (edge included).
    pub hi: NodeId,
}

impl ZddNode {
    pub const fn new(lo: NodeId, hi: NodeId) -> Self {
        ZddNode { lo, hi }
    }
}
