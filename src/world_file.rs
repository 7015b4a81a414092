use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::MapAccess;
use serde::de::Visitor;
use thiserror::Error;
use tracing::info;
use tracing::warn;

use crate::TileId;
use crate::grid::TileGrid;
use crate::level::Rgb;
use crate::level::World;

/// On-disk shape of a single level
#[derive(Debug, Serialize, Deserialize)]
struct LevelFile {
    #[serde(rename = "background-color")]
    background: [u8; 3],

    layout: Vec<Vec<TileId>>,
}

/// On-disk shape of a world. Levels are keyed by their 1-based id.
#[derive(Debug, Serialize, Deserialize)]
struct WorldFile {
    name: String,
    tileset: String,
    objset: String,

    /// Kept in file order, so saving writes `"1".."n"` in sequence and repeated keys survive
    /// long enough to be rejected.
    #[serde(serialize_with = "serialize_levels", deserialize_with = "deserialize_levels")]
    levels: Vec<(String, LevelFile)>,
}

fn serialize_levels<S>(levels: &[(String, LevelFile)], s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.collect_map(levels.iter().map(|(key, level)| (key, level)))
}

fn deserialize_levels<'de, D>(d: D) -> Result<Vec<(String, LevelFile)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct LevelsVisitor;

    impl<'de> Visitor<'de> for LevelsVisitor {
        type Value = Vec<(String, LevelFile)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of level ids to levels")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut levels = Vec::with_capacity(map.size_hint().unwrap_or(0));

            while let Some(entry) = map.next_entry()? {
                levels.push(entry);
            }

            Ok(levels)
        }
    }

    d.deserialize_map(LevelsVisitor)
}

#[derive(Debug, Error)]
pub enum WorldFileError {
    #[error("Malformed world JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to access world file: {0}")]
    Io(#[from] io::Error),

    #[error("Level key \"{key}\" is not a positive integer")]
    InvalidLevelKey { key: String },

    #[error("Level {id} is missing, world has {len} levels")]
    MissingLevel { id: usize, len: usize },

    #[error("Level {id} is defined more than once")]
    DuplicateLevel { id: usize },
}

impl WorldFile {
    fn into_world(self) -> Result<World, WorldFileError> {
        let mut levels = BTreeMap::new();

        for (key, level) in self.levels {
            let id = match key.trim().parse::<usize>() {
                Ok(id) if id >= 1 => id,
                _ => return Err(WorldFileError::InvalidLevelKey { key }),
            };

            if levels.insert(id, level).is_some() {
                return Err(WorldFileError::DuplicateLevel { id });
            }
        }

        let len = levels.len();
        let mut world = World::new(self.name, self.tileset, self.objset);

        for (expected, (id, level)) in (1..).zip(levels) {
            if id != expected {
                return Err(WorldFileError::MissingLevel { id: expected, len });
            }

            world.push_level(TileGrid::from(level.layout), Rgb::from(level.background));
        }

        if world.is_empty() {
            warn!(name = %world.name, "world has no levels");
        }

        Ok(world)
    }

    fn from_world(world: &World) -> Self {
        let levels = world
            .levels()
            .map(|level| {
                let file = LevelFile {
                    background: level.background.into(),
                    layout: level.grid.as_rows().to_vec(),
                };

                (level.id().to_string(), file)
            })
            .collect();

        Self {
            name: world.name.clone(),
            tileset: world.tileset.clone(),
            objset: world.objset.clone(),
            levels,
        }
    }
}

pub fn from_json(s: &str) -> Result<World, WorldFileError> {
    let file: WorldFile = serde_json::from_str(s)?;

    file.into_world()
}

pub fn to_json(world: &World) -> Result<String, WorldFileError> {
    let s = serde_json::to_string(&WorldFile::from_world(world))?;

    Ok(s)
}

pub fn load(path: impl AsRef<Path>) -> Result<World, WorldFileError> {
    let path = path.as_ref();
    let world = from_json(&fs::read_to_string(path)?)?;

    info!(path = %path.display(), levels = world.len(), "loaded world");

    Ok(world)
}

pub fn save(path: impl AsRef<Path>, world: &World) -> Result<(), WorldFileError> {
    let path = path.as_ref();
    fs::write(path, to_json(world)?)?;

    info!(path = %path.display(), levels = world.len(), "saved world");

    Ok(())
}
