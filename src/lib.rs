pub mod classify;
pub mod editor;
pub mod events;
pub mod grid;
pub mod level;
pub mod render;
pub mod tileset;
pub mod viewport;
pub mod world_file;

/// Names a tileset slot. `0` is the empty tile, `n` refers to slot `n - 1`.
pub type TileId = u32;
