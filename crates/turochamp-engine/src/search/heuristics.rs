//! History heuristic for move ordering.

use chess::{Color, Square};

/// History heuristic table indexed by `[side][from][to]`.
///
/// A move that causes a beta cutoff earns `depth²`. Entries only grow; the
/// driver clears the table at the start of every depth.
#[derive(PartialEq, Eq)]
pub struct HistoryTable {
    table: Box<[[[u32; 64]; 64]; 2]>,
}

impl HistoryTable {
    /// Create a zeroed history table.
    pub fn new() -> Self {
        Self {
            table: Box::new([[[0; 64]; 64]; 2]),
        }
    }

    /// Reward the move `from -> to` by `side` for a cutoff at `depth`.
    pub fn reward(&mut self, side: Color, from: Square, to: Square, depth: u8) {
        let bonus = u32::from(depth) * u32::from(depth);
        let entry = &mut self.table[side.to_index()][from.to_index()][to.to_index()];
        *entry = entry.saturating_add(bonus);
    }

    /// Accumulated bonus for `side` playing `from -> to`.
    #[inline]
    pub fn score(&self, side: Color, from: Square, to: Square) -> u32 {
        self.table[side.to_index()][from.to_index()][to.to_index()]
    }

    /// Zero every entry.
    pub fn clear(&mut self) {
        for side in self.table.iter_mut() {
            for row in side.iter_mut() {
                row.fill(0);
            }
        }
    }
}

impl Default for HistoryTable {
    fn default() -> Self {
        Self::new()
    }
}
