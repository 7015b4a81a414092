use glam::Vec2;

use crate::editor::Tool;

/// Everything an [`Editor`](crate::editor::Editor) reacts to, independent of the frontend
/// producing it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    EditorEvent(EditorEvent),
    AppEvent(AppEvent),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorEvent {
    /// Apply the active tool at a screen point
    Apply(Vec2),

    SelectTool(Tool),
    NextTile,
    PrevTile,

    /// Switch to the level with the given id, creating it if needed
    GotoLevel(usize),
    NextLevel,
    PrevLevel,

    /// Replace the world with a fresh one
    NewWorld,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppEvent {
    CameraEvent(CameraEvent),

    ToggleOverlay,

    /// Exit the application
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraEvent {
    /// Scroll by some number of steps along each axis
    Move { dx: f32, dy: f32 },

    /// Mouse wheel style zoom, positive zooms in
    Zoom(f32),

    Resize { width: f32, height: f32 },

    ResetView,
}
