use glam::Vec2;

use crate::TileId;
use crate::classify::CollisionPartition;
use crate::classify::TileClass;
use crate::grid::TileGrid;
use crate::grid::TileIndex;
use crate::level::Level;
use crate::tileset::Tileset;
use crate::tileset::TilesetError;
use crate::viewport::Viewport;

/// A tile that made it past culling, positioned on the drawing surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileDraw {
    pub tile: TileId,
    pub index: TileIndex,

    /// Top left corner in surface pixels
    pub position: Vec2,
    pub size: Vec2,
}

/// Every non-empty tile of `grid` that is visible through `viewport`, in row-major order.
pub fn visible_tiles<'a>(
    grid: &'a TileGrid,
    viewport: &'a Viewport,
) -> impl Iterator<Item = TileDraw> + 'a {
    grid.tiles()
        .filter(move |&(index, _)| viewport.is_visible(index))
        .map(move |(index, tile)| TileDraw {
            tile,
            index,
            position: viewport.world_to_screen(index),
            size: viewport.tile_size(),
        })
}

/// Visible rectangles of a partition, tagged by class. Collidable tiles come first.
pub fn debug_overlay<'a>(
    partition: &'a CollisionPartition,
    viewport: &'a Viewport,
) -> impl Iterator<Item = (TileClass, Vec2, Vec2)> + 'a {
    partition
        .iter()
        .map(|(class, t)| (class, TileIndex::new(t.y, t.x)))
        .filter(move |&(_, index)| viewport.is_visible(index))
        .map(move |(class, index)| (class, viewport.world_to_screen(index), viewport.tile_size()))
}

/// A character framebuffer the size of a viewport, one character per pixel.
pub struct Canvas {
    /// The cell buffer
    cb: Vec<char>,

    /// The frame buffer
    fb: String,

    /// Width of the framebuffer
    w: usize,

    /// Height of the framebuffer
    h: usize,

    /// Character of an empty pixel
    blank: char,
}

impl Canvas {
    pub fn new(w: usize, h: usize) -> Self {
        Self::with_blank(w, h, ' ')
    }

    pub fn with_blank(w: usize, h: usize, blank: char) -> Self {
        Self {
            cb: vec![blank; w * h],
            // one newline per row, and most glyphs are a single byte
            fb: String::with_capacity(w * h + h),
            w,
            h,
            blank,
        }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        self.w = w;
        self.h = h;
        self.cb = vec![self.blank; w * h];
    }

    /// Reset the cell buffer
    pub fn clear(&mut self) {
        self.cb.fill(self.blank);
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<char> {
        if x >= self.w || y >= self.h {
            return None;
        }

        Some(self.cb[self.xy_from(x, y)])
    }

    /// Fill a rectangle given in surface pixels. Anything outside the canvas is clipped.
    pub fn fill_rect(&mut self, position: Vec2, size: Vec2, c: char) {
        let lo = position.round().max(Vec2::ZERO);
        let hi = (position + size).round().min(Vec2::new(self.w as f32, self.h as f32));

        if lo.x >= hi.x || lo.y >= hi.y {
            return;
        }

        for y in lo.y as usize..hi.y as usize {
            for x in lo.x as usize..hi.x as usize {
                let i = self.xy_from(x, y);
                self.cb[i] = c;
            }
        }
    }

    /// Draw every visible tile of `level`, looking glyphs up in `tileset`.
    pub fn draw_level(
        &mut self,
        level: &Level,
        viewport: &Viewport,
        tileset: &Tileset<char>,
    ) -> Result<(), TilesetError> {
        self.clear();

        for draw in visible_tiles(&level.grid, viewport) {
            let &glyph = tileset.get(draw.tile)?;
            self.fill_rect(draw.position, draw.size, glyph);
        }

        Ok(())
    }

    /// Mark collidable tiles with `collidable` and enclosed ones with `enclosed`.
    pub fn draw_overlay(
        &mut self,
        partition: &CollisionPartition,
        viewport: &Viewport,
        collidable: char,
        enclosed: char,
    ) {
        for (class, position, size) in debug_overlay(partition, viewport) {
            let c = match class {
                TileClass::Collidable => collidable,
                TileClass::NonCollidable => enclosed,
            };

            self.fill_rect(position, size, c);
        }
    }

    pub fn render(&mut self) -> &str {
        self.fb.clear();

        for (i, row) in self.cb.chunks(self.w.max(1)).enumerate() {
            if i > 0 {
                self.fb.push('\n');
            }

            self.fb.extend(row);
        }

        &self.fb
    }

    fn xy_from(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }
}

#[cfg(test)]
mod test {
    use glam::Vec2;
    use insta::assert_snapshot;

    use super::*;
    use crate::classify::classify;
    use crate::level::World;
    use crate::viewport::ViewportConfig;

    /// 8x4 surface with 2x1 tiles
    fn small_viewport() -> Viewport {
        let config = ViewportConfig {
            initial_zoom: 1.0,
            tiles_across: 4.0,
            cull_margin: 0.0,
            ..ViewportConfig::default()
        };

        Viewport::with_config(8.0, 4.0, config)
    }

    fn level(rows: Vec<Vec<TileId>>) -> Level {
        let mut world = World::default();
        world.push_level(TileGrid::from(rows), Default::default());

        world.level(1).cloned().unwrap()
    }

    #[test]
    fn visible_tiles_are_culled() {
        let vp = small_viewport();
        let grid = TileGrid::from(vec![vec![1, 0, 0, 0, 0, 0, 2]]);

        let draws: Vec<_> = visible_tiles(&grid, &vp).collect();

        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].tile, 1);
        assert_eq!(draws[0].position, Vec2::ZERO);
        assert_eq!(draws[0].size, Vec2::new(2.0, 1.0));
    }

    #[test]
    fn draw_level() {
        let vp = small_viewport();
        let tileset = Tileset::from(vec!['#', '=', '?']);
        let mut canvas = Canvas::with_blank(8, 4, '.');

        canvas
            .draw_level(&level(vec![vec![1, 2], vec![0, 3]]), &vp, &tileset)
            .unwrap();

        assert_snapshot!(canvas.render(), @r"
        ##==....
        ..??....
        ........
        ........
        ");
    }

    #[test]
    fn draw_level_scrolled() {
        let mut vp = small_viewport();
        vp.scroll_by(Vec2::new(3.0, 1.0));

        let tileset = Tileset::from(vec!['#', '=', '?']);
        let mut canvas = Canvas::with_blank(8, 4, '.');

        canvas
            .draw_level(&level(vec![vec![1, 2], vec![0, 3]]), &vp, &tileset)
            .unwrap();

        assert_snapshot!(canvas.render(), @r"
        ?.......
        ........
        ........
        ........
        ");
    }

    #[test]
    fn draw_level_rejects_unknown_tiles() {
        let vp = small_viewport();
        let tileset = Tileset::from(vec!['#']);
        let mut canvas = Canvas::new(8, 4);

        let res = canvas.draw_level(&level(vec![vec![1, 5]]), &vp, &tileset);

        assert_eq!(res, Err(TilesetError::InvalidTile { id: 5, len: 1 }));
    }

    #[test]
    fn overlay() {
        let vp = small_viewport();
        let grid = TileGrid::from(vec![vec![0, 1, 0], vec![1, 1, 1], vec![0, 1, 0]]);
        let mut canvas = Canvas::with_blank(8, 4, '.');

        canvas.draw_overlay(&classify(&grid), &vp, 'c', 'n');
        assert_eq!(canvas.pixel(2, 1), Some('n'));
        assert_eq!(canvas.pixel(8, 1), None);

        assert_snapshot!(canvas.render(), @r"
        ..cc....
        ccnncc..
        ..cc....
        ........
        ");
    }
}
