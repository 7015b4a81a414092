use thiserror::Error;
use tracing::debug;

use crate::grid::TileGrid;

pub const DEFAULT_BACKGROUND: Rgb = Rgb::new(0, 80, 100);
pub const DEFAULT_TILESET: &str = "smb_map";
pub const DEFAULT_OBJSET: &str = "smb_obj";

/// A background color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(c: Rgb) -> Self {
        [c.r, c.g, c.b]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    /// 1-based position of this level in its [`World`]
    id: usize,

    pub grid: TileGrid,
    pub background: Rgb,
}

impl Level {
    fn empty(id: usize) -> Self {
        Self {
            id,
            grid: TileGrid::new(),
            background: DEFAULT_BACKGROUND,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    #[error("Level {id} not found, world has {len} levels")]
    LevelNotFound { id: usize, len: usize },
}

/// An ordered collection of levels sharing a tileset and objset.
///
/// Level ids are always dense, running from `1` to [`World::len`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct World {
    pub name: String,
    pub tileset: String,
    pub objset: String,

    levels: Vec<Level>,
}

impl Default for World {
    fn default() -> Self {
        Self::new("", DEFAULT_TILESET, DEFAULT_OBJSET)
    }
}

impl World {
    /// Create a world without any levels
    pub fn new(name: impl Into<String>, tileset: impl Into<String>, objset: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tileset: tileset.into(),
            objset: objset.into(),
            levels: Vec::new(),
        }
    }

    /// A fresh world holding a single empty level
    pub fn with_default_level() -> Self {
        let mut world = Self::default();
        world.extend_to(1);

        world
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn levels(&self) -> impl Iterator<Item = &Level> {
        self.levels.iter()
    }

    pub fn level(&self, id: usize) -> Result<&Level, WorldError> {
        let len = self.len();

        id.checked_sub(1)
            .and_then(|i| self.levels.get(i))
            .ok_or(WorldError::LevelNotFound { id, len })
    }

    pub fn level_mut(&mut self, id: usize) -> Result<&mut Level, WorldError> {
        let len = self.len();

        id.checked_sub(1)
            .and_then(|i| self.levels.get_mut(i))
            .ok_or(WorldError::LevelNotFound { id, len })
    }

    /// Append empty levels until the world holds at least `id` of them.
    pub fn extend_to(&mut self, id: usize) {
        if id <= self.len() {
            return;
        }

        debug!(from = self.len(), to = id, "extending world");

        while self.len() < id {
            let level = Level::empty(self.len() + 1);
            self.levels.push(level);
        }
    }

    /// Append a level after the current last one, returning its id.
    pub fn push_level(&mut self, grid: TileGrid, background: Rgb) -> usize {
        let id = self.len() + 1;
        self.levels.push(Level { id, grid, background });

        id
    }

    /// Remove every level and restore the default tileset and objset.
    pub fn reset(&mut self) {
        self.levels.clear();
        self.tileset = DEFAULT_TILESET.to_string();
        self.objset = DEFAULT_OBJSET.to_string();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn extend_empty_world() {
        let mut world = World::default();
        world.extend_to(5);

        assert_eq!(world.len(), 5);

        for (i, level) in world.levels().enumerate() {
            assert_eq!(level.id(), i + 1);
            assert!(level.grid.is_empty());
            assert_eq!(level.grid.rows(), 0);
            assert_eq!(level.background, DEFAULT_BACKGROUND);
        }
    }

    #[test]
    fn extend_never_truncates() {
        let mut world = World::default();
        world.extend_to(3);
        world.extend_to(1);

        assert_eq!(world.len(), 3);
    }

    #[test]
    fn level_lookup() {
        let mut world = World::default();
        world.extend_to(2);

        assert_eq!(world.level(2).map(Level::id), Ok(2));
        assert_eq!(world.level(3), Err(WorldError::LevelNotFound { id: 3, len: 2 }));
        assert_eq!(world.level(0), Err(WorldError::LevelNotFound { id: 0, len: 2 }));
    }

    #[test]
    fn reset_clears_levels() {
        let mut world = World::new("w1", "custom_map", "custom_obj");
        world.extend_to(4);
        world.reset();

        assert!(world.is_empty());
        assert_eq!(world.tileset, DEFAULT_TILESET);
        assert_eq!(world.objset, DEFAULT_OBJSET);
    }

    #[test]
    fn push_level_keeps_ids_dense() {
        let mut world = World::with_default_level();
        let id = world.push_level(TileGrid::from(vec![vec![1]]), Rgb::new(1, 2, 3));

        assert_eq!(id, 2);
        assert_eq!(world.level(2).map(|l| l.background), Ok(Rgb::new(1, 2, 3)));
    }
}
