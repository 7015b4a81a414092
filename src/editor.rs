use glam::Vec2;
use tracing::debug;
use tracing::info;

use crate::TileId;
use crate::classify::CollisionPartition;
use crate::classify::PartitionCache;
use crate::events::AppEvent;
use crate::events::CameraEvent;
use crate::events::EditorEvent;
use crate::events::Event;
use crate::grid::EMPTY;
use crate::level::Level;
use crate::level::World;
use crate::viewport::Viewport;

/// Pixels scrolled per step at zoom `1`
const SCROLL_STEP: f32 = 5.0;

/// Zoom change per mouse wheel notch
const ZOOM_STEP: f32 = 0.1;

/// Write `tile` at the cell under `point`, growing the grid as needed.
///
/// Points that land left of or above the grid are ignored. Returns whether the point mapped to a
/// cell.
pub fn paint(level: &mut Level, point: Vec2, viewport: &Viewport, tile: TileId) -> bool {
    let pos = viewport.screen_to_grid(point);

    let Some(index) = pos.to_index() else {
        return false;
    };

    level.grid.set_at(index, tile);
    true
}

/// Clear the cell under `point`. The grid still grows to include the cell.
pub fn erase(level: &mut Level, point: Vec2, viewport: &Viewport) -> bool {
    paint(level, point, viewport, EMPTY)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Brush,
    Erase,
}

/// A single editing session: the world being edited, the camera looking at it and the tool
/// state. Everything the editor does goes through here.
#[derive(Debug)]
pub struct Editor {
    world: World,

    /// Id of the level being edited
    level: usize,

    pub viewport: Viewport,

    tool: Tool,
    selected: TileId,

    /// Number of tiles available to paint with
    palette_len: usize,

    partition: PartitionCache,
}

impl Editor {
    pub fn new(viewport: Viewport, palette_len: usize) -> Self {
        Self {
            world: World::with_default_level(),
            level: 1,
            viewport,
            tool: Tool::default(),
            selected: 1,
            palette_len: palette_len.max(1),
            partition: PartitionCache::new(),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn level_id(&self) -> usize {
        self.level
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn selected_tile(&self) -> TileId {
        self.selected
    }

    pub fn level(&self) -> &Level {
        match self.world.level(self.level) {
            Ok(level) => level,
            Err(e) => unreachable!("active level always exists: {e}"),
        }
    }

    /// Apply the active tool at a screen point. Points off the drawing surface are ignored.
    pub fn apply_tool(&mut self, point: Vec2) -> bool {
        if !self.viewport.contains(point) {
            return false;
        }

        let (tool, tile) = (self.tool, self.selected);
        let Ok(level) = self.world.level_mut(self.level) else {
            unreachable!("active level always exists")
        };

        match tool {
            Tool::Brush => paint(level, point, &self.viewport, tile),
            Tool::Erase => erase(level, point, &self.viewport),
        }
    }

    pub fn select_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn select_tile(&mut self, tile: TileId) {
        self.selected = tile.clamp(1, self.palette_len as TileId);
    }

    pub fn select_next_tile(&mut self) {
        self.selected = self.selected % self.palette_len as TileId + 1;
    }

    pub fn select_prev_tile(&mut self) {
        self.selected = match self.selected {
            1 => self.palette_len as TileId,
            n => n - 1,
        };
    }

    /// Switch to level `id`, extending the world if it doesn't exist yet. Ids below `1` are
    /// ignored.
    pub fn set_level(&mut self, id: usize) {
        if id < 1 {
            return;
        }

        self.world.extend_to(id);
        self.level = id;
        self.partition.invalidate();

        debug!(level = id, levels = self.world.len(), "switched level");
    }

    pub fn new_world(&mut self) {
        self.load_world(World::with_default_level());
        info!("created a new world");
    }

    /// Replace the world being edited and go back to its first level.
    pub fn load_world(&mut self, world: World) {
        self.world = world;
        self.level = 0;
        self.set_level(1);
        self.viewport.reset_scroll();
    }

    /// Scroll by some number of steps. Steps get larger when zoomed in.
    pub fn scroll(&mut self, dx: f32, dy: f32) {
        let step = SCROLL_STEP * self.viewport.zoom();
        self.viewport.scroll_by(Vec2::new(dx, dy) * step);
    }

    pub fn zoom(&mut self, wheel: f32) {
        self.viewport.zoom_by(ZOOM_STEP * wheel);
    }

    /// Collidable and non-collidable tiles of the active level, recomputed only after edits.
    pub fn partition(&mut self) -> &CollisionPartition {
        let level = match self.world.level(self.level) {
            Ok(level) => level,
            Err(e) => unreachable!("active level always exists: {e}"),
        };

        self.partition.get(&level.grid)
    }

    /// Returns `false` once the session should end.
    pub fn handle(&mut self, event: Event) -> bool {
        match event {
            Event::EditorEvent(event) => match event {
                EditorEvent::Apply(point) => {
                    self.apply_tool(point);
                }
                EditorEvent::SelectTool(tool) => self.select_tool(tool),
                EditorEvent::NextTile => self.select_next_tile(),
                EditorEvent::PrevTile => self.select_prev_tile(),
                EditorEvent::GotoLevel(id) => self.set_level(id),
                EditorEvent::NextLevel => self.set_level(self.level + 1),
                EditorEvent::PrevLevel => self.set_level(self.level - 1),
                EditorEvent::NewWorld => self.new_world(),
            },

            Event::AppEvent(AppEvent::CameraEvent(event)) => match event {
                CameraEvent::Move { dx, dy } => self.scroll(dx, dy),
                CameraEvent::Zoom(wheel) => self.zoom(wheel),
                CameraEvent::Resize { width, height } => self.viewport.resize(width, height),
                CameraEvent::ResetView => {
                    self.viewport.reset_scroll();
                    self.viewport.set_zoom(self.viewport.config().initial_zoom);
                }
            },

            // Overlays are a frontend concern
            Event::AppEvent(AppEvent::ToggleOverlay) => {}
            Event::AppEvent(AppEvent::Exit) => return false,
        }

        true
    }
}
