use crate::TileId;
use crate::grid::EMPTY;
use crate::grid::TileGrid;

/// A classified tile: its id and its storage column (`x`) and row (`y`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRecord {
    pub tile: TileId,
    pub x: usize,
    pub y: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileClass {
    /// At least one face is exposed to air
    Collidable,

    /// Enclosed on all four sides
    NonCollidable,
}

/// The tiles of a grid split by [`TileClass`]. Both lists are in row-major order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionPartition {
    pub collidable: Vec<TileRecord>,
    pub non_collidable: Vec<TileRecord>,
}

impl CollisionPartition {
    pub fn len(&self) -> usize {
        self.collidable.len() + self.non_collidable.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over both lists, collidable tiles first.
    pub fn iter(&self) -> impl Iterator<Item = (TileClass, &TileRecord)> {
        let c = self.collidable.iter().map(|t| (TileClass::Collidable, t));
        let n = self.non_collidable.iter().map(|t| (TileClass::NonCollidable, t));

        c.chain(n)
    }
}

/// Whether `(row, col)` holds a tile. Out of bounds cells count as air.
fn present(grid: &TileGrid, row: Option<usize>, col: Option<usize>) -> bool {
    match (row, col) {
        (Some(row), Some(col)) => grid.get(row, col) != EMPTY,
        _ => false,
    }
}

/// Classify the tile at `(row, col)` by its four orthogonal neighbors.
pub fn classify_cell(grid: &TileGrid, row: usize, col: usize) -> TileClass {
    //    [u]
    // [l] c [r]
    //    [d]
    let up = present(grid, row.checked_sub(1), Some(col));
    let down = present(grid, row.checked_add(1), Some(col));
    let left = present(grid, Some(row), col.checked_sub(1));
    let right = present(grid, Some(row), col.checked_add(1));

    if up && down && left && right {
        TileClass::NonCollidable
    } else {
        TileClass::Collidable
    }
}

/// Split every non-empty tile of `grid` into collidable and non-collidable tiles.
///
/// Must run on a fully mutated grid: classification only reads, so it is ordered strictly after
/// the edits of a frame.
pub fn classify(grid: &TileGrid) -> CollisionPartition {
    let mut partition = CollisionPartition::default();

    for (index, tile) in grid.tiles() {
        let record = TileRecord {
            tile,
            x: index.col,
            y: index.row,
        };

        match classify_cell(grid, index.row, index.col) {
            TileClass::Collidable => partition.collidable.push(record),
            TileClass::NonCollidable => partition.non_collidable.push(record),
        }
    }

    partition
}

/// Holds on to the last partition until the grid changes.
#[derive(Debug, Default)]
pub struct PartitionCache {
    cached: Option<(u64, CollisionPartition)>,
}

impl PartitionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, grid: &TileGrid) -> &CollisionPartition {
        let revision = grid.revision();

        if self.cached.as_ref().is_some_and(|(rev, _)| *rev != revision) {
            self.cached = None;
        }

        let (_, partition) = self.cached.get_or_insert_with(|| (revision, classify(grid)));
        partition
    }

    /// Forget the cached partition, e.g. when switching to another grid.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}
