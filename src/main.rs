use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::thread;
use std::time;

use anyhow::Context;
use clap::Parser;
use crossterm::cursor;
use crossterm::event;
use crossterm::execute;
use crossterm::queue;
use crossterm::style;
use crossterm::style::Color;
use crossterm::terminal;
use tracing::info;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use tilelevel::editor::Editor;
use tilelevel::events::AppEvent;
use tilelevel::events::CameraEvent;
use tilelevel::events::Event;
use tilelevel::level::Level;
use tilelevel::render::Canvas;
use tilelevel::tileset::Tileset;
use tilelevel::viewport::Viewport;
use tilelevel::viewport::ViewportConfig;
use tilelevel::world_file;

use crate::io::Input;

mod io;

const FRAMERATE: u32 = 60;
const FRAMETIME: time::Duration =
    time::Duration::from_millis(((1f64 / FRAMERATE as f64) * 1_000f64) as u64);

/// Terminal level editor
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// World file to edit. Created on save if it doesn't exist.
    #[arg(short, long, default_value = "world.json")]
    world: PathBuf,

    /// Initial zoom
    #[arg(short, long)]
    zoom: Option<f32>,

    /// Glyphs for tile ids 1, 2, 3, ...
    #[arg(short, long, default_value = "#=%@OX~^")]
    tiles: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let tileset = Tileset::from(args.tiles.chars().collect::<Vec<_>>());
    anyhow::ensure!(!tileset.is_empty(), "At least one tile glyph is required");

    let (cols, rows) = terminal::size().context("Failed to query terminal size")?;

    let mut config = ViewportConfig::default();
    if let Some(zoom) = args.zoom {
        config.initial_zoom = zoom;
    }

    // Keep the bottom row for the status line
    let viewport = Viewport::with_config(cols as f32, rows.saturating_sub(1) as f32, config);
    let mut editor = Editor::new(viewport, tileset.len());

    if args.world.exists() {
        let world = world_file::load(&args.world)
            .with_context(|| format!("Failed to load {}", args.world.display()))?;

        tileset
            .validate(&world)
            .context("World uses more tiles than there are glyphs")?;

        editor.load_world(world);
    } else {
        info!(path = %args.world.display(), "starting a new world");
    }

    let mut canvas = Canvas::new(cols as usize, rows.saturating_sub(1) as usize);

    terminal::enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(
        stdout,
        terminal::EnterAlternateScreen,
        event::EnableMouseCapture,
        cursor::Hide
    )?;

    let res = run(&mut editor, &mut canvas, &tileset, &args.world);

    execute!(
        stdout,
        cursor::Show,
        event::DisableMouseCapture,
        terminal::LeaveAlternateScreen
    )?;
    terminal::disable_raw_mode()?;

    res
}

fn run(
    editor: &mut Editor,
    canvas: &mut Canvas,
    tileset: &Tileset<char>,
    path: &Path,
) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout();
    let mut overlay = false;

    loop {
        let t = time::SystemTime::now();

        // Poll event for as long as FRAMETIME
        let input = if event::poll(FRAMETIME)? {
            io::convert_event(event::read()?)
        } else {
            None
        };

        match input {
            None => {}
            Some(Input::Save) => {
                if let Err(e) = world_file::save(path, editor.world()) {
                    warn!(error = %e, "failed to save world");
                }
            }
            Some(Input::Event(Event::AppEvent(AppEvent::ToggleOverlay))) => overlay = !overlay,
            Some(Input::Event(event)) => {
                if let Event::AppEvent(AppEvent::CameraEvent(CameraEvent::Resize { width, height })) =
                    event
                {
                    canvas.resize(width as usize, height as usize);
                }

                if !editor.handle(event) {
                    break;
                }
            }
        }

        canvas.draw_level(editor.level(), &editor.viewport, tileset)?;

        if overlay {
            let viewport = editor.viewport.clone();
            canvas.draw_overlay(editor.partition(), &viewport, '+', '.');
        }

        draw(&mut stdout, canvas, editor.level(), &status_line(editor, tileset))?;

        let dt = t.elapsed().unwrap_or_default();
        thread::sleep(FRAMETIME.saturating_sub(dt));
    }

    Ok(())
}

fn status_line(editor: &Editor, tileset: &Tileset<char>) -> String {
    let offset = editor.viewport.offset();
    let glyph = tileset.get(editor.selected_tile()).copied().unwrap_or(' ');

    format!(
        "Level: {}/{}  ({}, {})  zoom {:.1}  {:?} '{}'",
        editor.level_id(),
        editor.world().len(),
        offset.x as i32,
        offset.y as i32,
        editor.viewport.zoom(),
        editor.tool(),
        glyph,
    )
}

fn draw(
    stdout: &mut impl Write,
    canvas: &mut Canvas,
    level: &Level,
    status: &str,
) -> std::io::Result<()> {
    let bg = level.background;

    queue!(
        stdout,
        cursor::MoveTo(0, 0),
        style::SetBackgroundColor(Color::Rgb {
            r: bg.r,
            g: bg.g,
            b: bg.b
        })
    )?;

    for line in canvas.render().lines() {
        queue!(stdout, style::Print(line), cursor::MoveToNextLine(1))?;
    }

    queue!(
        stdout,
        style::ResetColor,
        terminal::Clear(terminal::ClearType::CurrentLine),
        style::Print(status)
    )?;

    stdout.flush()
}
