use thiserror::Error;

use crate::TileId;
use crate::level::World;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TilesetError {
    #[error("Invalid tile id {id}, tileset has {len} tiles")]
    InvalidTile { id: TileId, len: usize },

    #[error("Level {level} at row {row}, column {col}: {source}")]
    InLevel {
        level: usize,
        row: usize,
        col: usize,

        #[source]
        source: Box<TilesetError>,
    },
}

/// An ordered set of drawable tiles. Tile id `n` refers to slot `n - 1`.
#[derive(Debug, Clone)]
pub struct Tileset<T> {
    tiles: Vec<T>,
}

impl<T> From<Vec<T>> for Tileset<T> {
    fn from(tiles: Vec<T>) -> Self {
        Self { tiles }
    }
}

impl<T> Tileset<T> {
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Look up the drawable for `id`. The empty tile has no drawable.
    pub fn get(&self, id: TileId) -> Result<&T, TilesetError> {
        let len = self.len();

        (id as usize)
            .checked_sub(1)
            .and_then(|i| self.tiles.get(i))
            .ok_or(TilesetError::InvalidTile { id, len })
    }

    /// Check every tile of every level against this tileset.
    pub fn validate(&self, world: &World) -> Result<(), TilesetError> {
        for level in world.levels() {
            for (index, tile) in level.grid.tiles() {
                self.get(tile).map_err(|e| TilesetError::InLevel {
                    level: level.id(),
                    row: index.row,
                    col: index.col,
                    source: Box::new(e),
                })?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::Tileset;
    use super::TilesetError;
    use crate::grid::TileGrid;
    use crate::level::Rgb;
    use crate::level::World;

    #[test]
    fn lookup() {
        let set = Tileset::from(vec!['#', '=', '?']);

        assert_eq!(set.get(1), Ok(&'#'));
        assert_eq!(set.get(3), Ok(&'?'));
        assert_eq!(set.get(0), Err(TilesetError::InvalidTile { id: 0, len: 3 }));
        assert_eq!(set.get(4), Err(TilesetError::InvalidTile { id: 4, len: 3 }));
    }

    #[test]
    fn validate_reports_location() {
        let set = Tileset::from(vec!['#', '=']);
        let mut world = World::with_default_level();
        world.push_level(TileGrid::from(vec![vec![1, 2], vec![0, 0, 9]]), Rgb::default());

        let Err(TilesetError::InLevel { level, row, col, .. }) = set.validate(&world) else {
            panic!("expected an invalid tile")
        };

        assert_eq!((level, row, col), (2, 1, 2));
    }
}
