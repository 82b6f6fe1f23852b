//! Formation table: roster slot -> offset from the squad anchor

use serde::{Deserialize, Serialize};

use crate::core::types::GridPos;

/// Per-slot offsets, persisted as a sequence of `[dx, dy]` pairs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Formation(Vec<(i32, i32)>);

impl Default for Formation {
    /// 3x3 block centred on the anchor, filled row by row from the top
    fn default() -> Self {
        let mut offsets = Vec::with_capacity(9);
        for dy in -1..=1 {
            for dx in -1..=1 {
                offsets.push((dx, dy));
            }
        }
        Self(offsets)
    }
}

impl Formation {
    pub fn new(offsets: Vec<(i32, i32)>) -> Self {
        Self(offsets)
    }

    /// Offset for a roster slot; slots past the table sit on the anchor
    pub fn offset(&self, slot: usize) -> (i32, i32) {
        self.0.get(slot).copied().unwrap_or((0, 0))
    }

    /// Grid cell for a roster slot given the squad anchor
    pub fn place(&self, anchor: GridPos, slot: usize) -> GridPos {
        let (dx, dy) = self.offset(slot);
        anchor.offset(dx, dy)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn offsets(&self) -> &[(i32, i32)] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_three_by_three() {
        let formation = Formation::default();
        assert_eq!(formation.len(), 9);
        assert_eq!(formation.offset(0), (-1, -1));
        assert_eq!(formation.offset(4), (0, 0));
        assert_eq!(formation.offset(8), (1, 1));
    }

    #[test]
    fn test_slot_past_table_uses_anchor() {
        let formation = Formation::new(vec![(2, 0)]);
        let anchor = GridPos::new(10, 10);
        assert_eq!(formation.place(anchor, 0), GridPos::new(12, 10));
        assert_eq!(formation.place(anchor, 3), anchor);
    }

    #[test]
    fn test_serializes_as_pairs() {
        let formation = Formation::new(vec![(-1, 0), (1, 0)]);
        let json = serde_json::to_string(&formation).unwrap();
        assert_eq!(json, "[[-1,0],[1,0]]");
    }
}
