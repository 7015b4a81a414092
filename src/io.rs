use crossterm::event::Event as CrossTermEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseButton;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;
use glam::Vec2;

use tilelevel::editor::Tool;
use tilelevel::events::AppEvent;
use tilelevel::events::CameraEvent;
use tilelevel::events::EditorEvent;
use tilelevel::events::Event;

/// What the frontend should do in response to a terminal event
pub enum Input {
    Event(Event),

    /// Write the world back to disk
    Save,
}

impl From<EditorEvent> for Input {
    fn from(event: EditorEvent) -> Self {
        Input::Event(Event::EditorEvent(event))
    }
}

impl From<AppEvent> for Input {
    fn from(event: AppEvent) -> Self {
        Input::Event(Event::AppEvent(event))
    }
}

impl From<CameraEvent> for Input {
    fn from(event: CameraEvent) -> Self {
        AppEvent::CameraEvent(event).into()
    }
}

/// Converts a crossterm event into an editor input
pub fn convert_event(event: CrossTermEvent) -> Option<Input> {
    match event {
        CrossTermEvent::Key(key_event) => convert_key(key_event),
        CrossTermEvent::Mouse(mouse_event) => convert_mouse(mouse_event),

        // The bottom row is reserved for the status line
        CrossTermEvent::Resize(cols, rows) => Some(
            CameraEvent::Resize {
                width: cols as f32,
                height: rows.saturating_sub(1) as f32,
            }
            .into(),
        ),
        _ => None,
    }
}

fn convert_key(key_event: KeyEvent) -> Option<Input> {
    let KeyEvent {
        code,
        modifiers,
        kind,
        ..
    } = key_event;

    // Some platforms also report releases
    if kind != KeyEventKind::Press {
        return None;
    }

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Some(AppEvent::Exit.into()),
            KeyCode::Char('s') => Some(Input::Save),
            _ => None,
        };
    }

    let input: Input = match code {
        KeyCode::Char('q') => AppEvent::Exit.into(),
        KeyCode::Char('c') => AppEvent::ToggleOverlay.into(),

        // movements
        KeyCode::Char('w') => CameraEvent::Move { dx: 0.0, dy: -1.0 }.into(),
        KeyCode::Char('a') => CameraEvent::Move { dx: -1.0, dy: 0.0 }.into(),
        KeyCode::Char('s') => CameraEvent::Move { dx: 0.0, dy: 1.0 }.into(),
        KeyCode::Char('d') => CameraEvent::Move { dx: 1.0, dy: 0.0 }.into(),

        // zoom
        KeyCode::Char('+') => CameraEvent::Zoom(1.0).into(),
        KeyCode::Char('-') => CameraEvent::Zoom(-1.0).into(),
        KeyCode::Char('0') => CameraEvent::ResetView.into(),

        // tools
        KeyCode::Char('b') => EditorEvent::SelectTool(Tool::Brush).into(),
        KeyCode::Char('e') => EditorEvent::SelectTool(Tool::Erase).into(),
        KeyCode::Char(']') => EditorEvent::NextTile.into(),
        KeyCode::Char('[') => EditorEvent::PrevTile.into(),

        // levels
        KeyCode::Right => EditorEvent::NextLevel.into(),
        KeyCode::Left => EditorEvent::PrevLevel.into(),
        KeyCode::Char('n') => EditorEvent::NewWorld.into(),

        _ => return None,
    };

    Some(input)
}

fn convert_mouse(mouse_event: MouseEvent) -> Option<Input> {
    let point = Vec2::new(mouse_event.column as f32, mouse_event.row as f32);

    let input: Input = match mouse_event.kind {
        MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
            EditorEvent::Apply(point).into()
        }
        MouseEventKind::ScrollUp => CameraEvent::Zoom(1.0).into(),
        MouseEventKind::ScrollDown => CameraEvent::Zoom(-1.0).into(),
        _ => return None,
    };

    Some(input)
}
