use glam::Vec2;
use tracing::debug;

use crate::grid::GridPos;
use crate::grid::TileIndex;

/// No viewport zooms out further than this, whatever its config says. Zoom `0` would collapse
/// tiles to nothing.
pub const ZOOM_FLOOR: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportConfig {
    /// The most you can zoom out
    pub min_zoom: f32,

    /// The most you can zoom in
    pub max_zoom: f32,

    /// Zoom a new viewport starts at
    pub initial_zoom: f32,

    /// Per-axis scale on the number of tiles that fit across the viewport
    pub ratio: Vec2,

    /// How many tiles fit across the viewport at zoom `1`
    pub tiles_across: f32,

    /// Tiles are still considered visible this many pixels past the viewport edge
    pub cull_margin: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_zoom: 0.1,
            max_zoom: 2.0,
            initial_zoom: 0.5,
            ratio: Vec2::ONE,
            tiles_across: 10.0,
            cull_margin: 5.0,
        }
    }
}

impl ViewportConfig {
    /// Orders the zoom bounds and keeps both at or above [`ZOOM_FLOOR`].
    fn sanitized(mut self) -> Self {
        if self.min_zoom > self.max_zoom {
            std::mem::swap(&mut self.min_zoom, &mut self.max_zoom);
        }

        // `f32::max` drops a NaN operand
        self.min_zoom = self.min_zoom.max(ZOOM_FLOOR);
        self.max_zoom = self.max_zoom.max(self.min_zoom);
        self
    }
}

/// A scrollable, zoomable window onto a tile grid.
///
/// There are three coordinate spaces in play:
///  - grid coordinates, either a storage [`TileIndex`] or a 1-based [`GridPos`]
///  - world pixels, `grid * tile_size`
///  - screen pixels, world pixels minus the scroll offset, plus the viewport origin
#[derive(Debug, Clone)]
pub struct Viewport {
    config: ViewportConfig,

    zoom: f32,

    /// Scroll offset in world pixels. Never negative.
    offset: Vec2,

    /// Size of a single tile in pixels. Derived from `zoom` and `size`.
    tile_size: Vec2,

    /// Size of the drawing surface in pixels
    size: Vec2,

    /// Where the drawing surface sits on the screen
    origin: Vec2,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_config(width, height, ViewportConfig::default())
    }

    pub fn with_config(width: f32, height: f32, config: ViewportConfig) -> Self {
        let config = config.sanitized();
        let mut viewport = Self {
            config,
            zoom: 1.0,
            offset: Vec2::ZERO,
            tile_size: Vec2::ZERO,
            size: Vec2::new(width, height),
            origin: Vec2::ZERO,
        };

        viewport.set_zoom(config.initial_zoom);
        viewport
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn tile_size(&self) -> Vec2 {
        self.tile_size
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn set_origin(&mut self, origin: Vec2) {
        self.origin = origin;
    }

    /// Set the zoom, clamped to the configured range, and recompute the tile size.
    pub fn set_zoom(&mut self, zoom: f32) {
        // NaN would slip through `clamp`
        let zoom = if zoom.is_nan() { self.config.min_zoom } else { zoom };

        self.zoom = zoom.clamp(self.config.min_zoom, self.config.max_zoom);
        self.update_tile_size();
    }

    pub fn zoom_by(&mut self, delta: f32) {
        self.set_zoom(self.zoom + delta);
        debug!(zoom = self.zoom, "zoom changed");
    }

    /// Resize the drawing surface and recompute the tile size.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
        self.update_tile_size();
    }

    /// Scroll by `delta` world pixels. The world origin is a hard boundary, there is no upper
    /// bound.
    pub fn scroll_by(&mut self, delta: Vec2) {
        self.offset = (self.offset + delta).max(Vec2::ZERO);
    }

    pub fn reset_scroll(&mut self) {
        self.offset = Vec2::ZERO;
    }

    fn update_tile_size(&mut self) {
        let tiles = self.config.ratio * self.config.tiles_across / self.zoom;
        self.tile_size = self.size / tiles;
    }

    /// Top left corner of a tile, relative to the drawing surface. Unlike [`Self::screen_to_grid`]
    /// this ignores the origin; pass the result through [`Self::surface_to_window`] to get a
    /// point on the window.
    pub fn world_to_screen(&self, index: TileIndex) -> Vec2 {
        let grid = Vec2::new(index.col as f32, index.row as f32);

        grid * self.tile_size - self.offset
    }

    pub fn surface_to_window(&self, point: Vec2) -> Vec2 {
        point + self.origin
    }

    /// The grid cell under a window point. Points outside the drawing surface still map to a
    /// cell, possibly one below `1`.
    pub fn screen_to_grid(&self, point: Vec2) -> GridPos {
        let world = point - self.origin + self.offset;
        let cell = (world / self.tile_size).floor();

        GridPos::new(cell.x as i32 + 1, cell.y as i32 + 1)
    }

    /// Whether a screen point lies on the drawing surface
    pub fn contains(&self, point: Vec2) -> bool {
        let p = point - self.origin;

        p.x >= 0.0 && p.y >= 0.0 && p.x < self.size.x && p.y < self.size.y
    }

    /// Whether any part of the tile at `index` could land on the drawing surface. Each axis is
    /// checked on its own.
    pub fn is_visible(&self, index: TileIndex) -> bool {
        let pos = self.world_to_screen(index);
        let margin = self.config.cull_margin;

        let hidden_x = pos.x + self.tile_size.x + margin < 0.0 || pos.x - margin > self.size.x;
        let hidden_y = pos.y + self.tile_size.y + margin < 0.0 || pos.y - margin > self.size.y;

        !(hidden_x || hidden_y)
    }
}
