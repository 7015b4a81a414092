use crate::TileId;

/// The tile id of an empty cell
pub const EMPTY: TileId = 0;

/// A 0-based storage index into a [`TileGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileIndex {
    pub row: usize,
    pub col: usize,
}

impl TileIndex {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A 1-based grid coordinate, as addressed by the editor. `x` is the column and `y` the row.
///
/// Anything below `1` lies outside the editable grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Convert into a storage index. This is the only place where editor coordinates become
    /// storage coordinates.
    pub fn to_index(self) -> Option<TileIndex> {
        if self.x < 1 || self.y < 1 {
            return None;
        }

        Some(TileIndex::new((self.y - 1) as usize, (self.x - 1) as usize))
    }

    /// Convert a storage index back into editor coordinates.
    pub fn from_index(index: TileIndex) -> Self {
        Self::new(index.col as i32 + 1, index.row as i32 + 1)
    }
}

/// A jagged 2D array of tile ids making up a single level.
///
/// Rows may have different lengths. Anything past the end of a row reads as [`EMPTY`].
#[derive(Debug, Clone, Default)]
pub struct TileGrid {
    rows: Vec<Vec<TileId>>,

    /// Bumped by every [`TileGrid::set`] that changes the grid
    revision: u64,
}

impl PartialEq for TileGrid {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
    }
}

impl Eq for TileGrid {}

impl From<Vec<Vec<TileId>>> for TileGrid {
    fn from(rows: Vec<Vec<TileId>>) -> Self {
        Self { rows, revision: 0 }
    }
}

impl TileGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the tile at `(row, col)`, or [`EMPTY`] if it lies out of bounds.
    pub fn get(&self, row: usize, col: usize) -> TileId {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(EMPTY)
    }

    /// Writes `tile` at `(row, col)`, first growing the grid with empty rows and cells until the
    /// cell exists. The grid never shrinks.
    pub fn set(&mut self, row: usize, col: usize, tile: TileId) {
        let mut changed = false;

        // create rows if absent
        if row >= self.rows.len() {
            self.rows.resize_with(row + 1, Vec::new);
            changed = true;
        }

        // create columns if absent
        let cells = &mut self.rows[row];
        if col >= cells.len() {
            cells.resize(col + 1, EMPTY);
            changed = true;
        }

        if cells[col] != tile {
            cells[col] = tile;
            changed = true;
        }

        if changed {
            self.revision += 1;
        }
    }

    pub fn get_at(&self, index: TileIndex) -> TileId {
        self.get(index.row, index.col)
    }

    pub fn set_at(&mut self, index: TileIndex, tile: TileId) {
        self.set(index.row, index.col, tile)
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Length of `row`, `0` if the row doesn't exist
    pub fn row_len(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, Vec::len)
    }

    /// Length of the longest row
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|r| r.iter().all(|&t| t == EMPTY))
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn as_rows(&self) -> &[Vec<TileId>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<TileId>> {
        self.rows
    }

    /// Iterate over every non-empty tile in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = (TileIndex, TileId)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(|&(_, &tile)| tile != EMPTY)
                .map(move |(col, &tile)| (TileIndex::new(row, col), tile))
        })
    }
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;

    use super::GridPos;
    use super::TileGrid;
    use super::TileIndex;

    #[test]
    fn out_of_bounds_reads_empty() {
        let grid = TileGrid::from(vec![vec![1, 2], vec![3]]);

        assert_eq!(grid.get(0, 1), 2);
        assert_eq!(grid.get(1, 1), 0);
        assert_eq!(grid.get(7, 0), 0);
    }

    #[test]
    fn set_grows_jagged() {
        let mut grid = TileGrid::new();
        grid.set(2, 3, 5);

        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.row_len(0), 0);
        assert_eq!(grid.row_len(1), 0);
        assert_eq!(grid.row_len(2), 4);
        assert_eq!(grid.as_rows()[2], vec![0, 0, 0, 5]);
    }

    #[test]
    fn set_never_shrinks() {
        let mut grid = TileGrid::from(vec![vec![1, 1, 1]]);
        grid.set(0, 2, 0);

        assert_eq!(grid.row_len(0), 3);
    }

    #[test]
    fn revision_tracks_changes_only() {
        let mut grid = TileGrid::new();
        grid.set(0, 0, 4);
        let rev = grid.revision();

        grid.set(0, 0, 4);
        assert_eq!(grid.revision(), rev);

        grid.set(0, 0, 2);
        assert!(grid.revision() > rev);
    }

    #[test]
    fn tiles_are_row_major() {
        let grid = TileGrid::from(vec![vec![0, 1], vec![2, 0, 3]]);
        let tiles: Vec<_> = grid.tiles().collect();

        assert_eq!(
            tiles,
            vec![
                (TileIndex::new(0, 1), 1),
                (TileIndex::new(1, 0), 2),
                (TileIndex::new(1, 2), 3),
            ]
        );
    }

    #[test]
    fn grid_pos_conversion() {
        assert_eq!(GridPos::new(1, 1).to_index(), Some(TileIndex::new(0, 0)));
        assert_eq!(GridPos::new(4, 2).to_index(), Some(TileIndex::new(1, 3)));
        assert_eq!(GridPos::new(0, 3).to_index(), None);
        assert_eq!(GridPos::new(3, -1).to_index(), None);
        assert_eq!(GridPos::from_index(TileIndex::new(1, 3)), GridPos::new(4, 2));
    }

    fn arb_grid() -> impl Strategy<Value = TileGrid> {
        prop::collection::vec(prop::collection::vec(0u32..5, 0..8), 0..8).prop_map(TileGrid::from)
    }

    proptest! {
        #[test]
        fn get_after_set(mut grid in arb_grid(), row in 0usize..12, col in 0usize..12, tile in 0u32..20) {
            grid.set(row, col, tile);
            prop_assert_eq!(grid.get(row, col), tile);
        }

        #[test]
        fn unset_cells_read_empty(grid in arb_grid(), row in 0usize..12, col in 0usize..12) {
            if row >= grid.rows() || col >= grid.row_len(row) {
                prop_assert_eq!(grid.get(row, col), 0);
            }
        }

        #[test]
        fn set_is_idempotent(grid in arb_grid(), row in 0usize..12, col in 0usize..12, tile in 0u32..20) {
            let mut once = grid.clone();
            once.set(row, col, tile);

            let mut twice = once.clone();
            twice.set(row, col, tile);

            prop_assert_eq!(&once, &twice);
            prop_assert_eq!(once.revision(), twice.revision());
        }
    }
}
