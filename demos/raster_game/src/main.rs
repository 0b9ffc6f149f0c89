// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted game loop on the software raster backend.
//!
//! A player square (or image) walks across a row of red blocks while
//! scripted clicks drop green blocks at the pointer. The player is moved to
//! the back of the queue so it paints over everything else. When the script
//! runs out the engine shuts down, the last frame is written as a PNG, and
//! with `--trace` the recorded diagnostics are exported as Chrome trace JSON.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use kurbo::{Point, Rect, Size};

use strata_backend_raster::{RasterBackend, RasterConfig, StdClock};
use strata_core::color::Color;
use strata_core::engine::{Engine, EngineConfig};
use strata_core::geometry::is_touching;
use strata_core::input::{Event, Key, MouseButton, RawEvent};
use strata_core::queue::{EntryId, RenderQueue};
use strata_core::trace::{
    EntryFreedEvent, ErrorEvent, LifecycleEvent, PaceEvent, PresentEvent, QueueOpEvent, TraceSink,
};
use strata_debug::chrome;
use strata_debug::pretty::PrettyPrintSink;
use strata_debug::recorder::RecorderSink;

const BLOCK: f64 = 32.0;
const PLAYER_SPEED: f64 = 8.0;

#[derive(Parser)]
#[command(name = "raster_game")]
#[command(about = "Run a scripted strata game loop and save the last frame")]
struct Cli {
    /// Target frame rate; 0 disables pacing.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Number of frames to run before quitting.
    #[arg(long, default_value_t = 90)]
    frames: u64,

    /// Where to write the last presented frame.
    #[arg(long, default_value = "raster_game.png")]
    output: PathBuf,

    /// Print every trace event to stderr.
    #[arg(long)]
    debug: bool,

    /// Write recorded trace events as Chrome trace JSON.
    #[arg(long)]
    trace: Option<PathBuf>,

    /// Image file for the player; a blue square is used without one.
    #[arg(long)]
    image: Option<String>,

    /// Font file for the title text; no title is drawn without one.
    #[arg(long)]
    font: Option<String>,
}

/// Fans trace events out to the optional printer and the recorder.
#[derive(Debug, Default)]
struct DemoSink {
    pretty: Option<PrettyPrintSink>,
    recorder: RecorderSink,
}

impl TraceSink for DemoSink {
    fn on_queue_op(&mut self, e: &QueueOpEvent) {
        if let Some(p) = &mut self.pretty {
            p.on_queue_op(e);
        }
        self.recorder.on_queue_op(e);
    }

    fn on_entry_freed(&mut self, e: &EntryFreedEvent) {
        if let Some(p) = &mut self.pretty {
            p.on_entry_freed(e);
        }
        self.recorder.on_entry_freed(e);
    }

    fn on_pace(&mut self, e: &PaceEvent) {
        if let Some(p) = &mut self.pretty {
            p.on_pace(e);
        }
        self.recorder.on_pace(e);
    }

    fn on_present(&mut self, e: &PresentEvent) {
        if let Some(p) = &mut self.pretty {
            p.on_present(e);
        }
        self.recorder.on_present(e);
    }

    fn on_error(&mut self, e: &ErrorEvent) {
        if let Some(p) = &mut self.pretty {
            p.on_error(e);
        }
        self.recorder.on_error(e);
    }

    fn on_lifecycle(&mut self, e: &LifecycleEvent) {
        if let Some(p) = &mut self.pretty {
            p.on_lifecycle(e);
        }
        self.recorder.on_lifecycle(e);
    }
}

/// Raw input injected before polling `frame`.
fn script(frame: u64) -> Vec<RawEvent> {
    let key = |k: Key| RawEvent::KeyDown {
        scancode: k.scancode(),
    };
    let click = |x: f64, y: f64, button: MouseButton| {
        vec![
            RawEvent::MouseMotion {
                position: Point::new(x, y),
            },
            RawEvent::MouseButtonDown {
                button: button.to_raw(),
            },
            RawEvent::MouseButtonUp {
                button: button.to_raw(),
            },
        ]
    };
    match frame {
        0..=11 => vec![key(Key::D)],
        12..=23 => vec![key(Key::S)],
        30 => click(200.0, 200.0, MouseButton::Left),
        35 => click(300.0, 260.0, MouseButton::Middle),
        40 => click(400.0, 320.0, MouseButton::Right),
        // Lands on the player: sends it to the front of the queue.
        45 => click(100.0, 100.0, MouseButton::Left),
        50..=53 => vec![key(Key::A)],
        60 => vec![
            RawEvent::KeyDown { scancode: 44 },
            RawEvent::KeyUp { scancode: 44 },
        ],
        _ => Vec::new(),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let backend = RasterBackend::new(RasterConfig::new("game", 800, 600))
        .context("creating raster backend")?;
    let config = EngineConfig::new()
        .with_target_fps(cli.fps)
        .with_debug(cli.debug || cli.trace.is_some());
    let sink = DemoSink {
        pretty: cli.debug.then(PrettyPrintSink::stderr),
        recorder: RecorderSink::new(),
    };
    let mut engine = Engine::with_sink(backend, StdClock::new(), config, sink);
    let mut queue = RenderQueue::new();

    // -- scene ---------------------------------------------------------------
    let player_bounds = Rect::from_origin_size((0.0, 0.0), Size::new(BLOCK, BLOCK));
    let player = match &cli.image {
        Some(path) => engine
            .create_image(&mut queue, path, player_bounds)
            .with_context(|| format!("loading {path}"))?,
        None => engine.create_rect(&mut queue, player_bounds, Color::BLUE)?,
    };
    for i in 0..5 {
        let x = BLOCK * f64::from(i);
        engine.create_rect(
            &mut queue,
            Rect::from_origin_size((x, 0.0), Size::new(BLOCK, BLOCK)),
            Color::RED,
        )?;
    }
    engine.move_to_position(&mut queue, player, -1)?;

    if let Some(font) = &cli.font {
        let title = engine
            .create_text(&mut queue, font, 48.0, "strata", Color::WHITE, Point::ZERO)
            .with_context(|| format!("rendering title with {font}"))?;
        engine.center_in_window(&mut queue, title)?;
    }

    // -- loop ----------------------------------------------------------------
    let mut frame = 0;
    while engine.is_running() {
        engine.backend_mut().push_events(script(frame));
        while engine.poll_event() {
            handle(&mut engine, &mut queue, player)?;
        }
        engine.render(&queue);

        frame += 1;
        if frame >= cli.frames {
            engine.backend_mut().push_event(RawEvent::Quit);
            // Drain through the quit so the engine stops.
            while engine.poll_event() {
                handle(&mut engine, &mut queue, player)?;
            }
        }
    }

    let presented = engine.frame_index();
    let entries = queue.len();
    let (backend, sink) = engine.shutdown(&mut queue);

    backend
        .save_png(&cli.output)
        .with_context(|| format!("writing {}", cli.output.display()))?;
    println!(
        "presented {presented} frames with {entries} entries, saved {}",
        cli.output.display()
    );

    if let Some(path) = &cli.trace {
        write_trace(sink.recorder.as_bytes(), path)?;
        println!("wrote trace to {}", path.display());
    }
    Ok(())
}

/// Exports recorded trace bytes to `path` as Chrome trace JSON.
fn write_trace(bytes: &[u8], path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    chrome::export(bytes, &mut writer).with_context(|| format!("writing {}", path.display()))?;
    // Dropping a BufWriter discards flush errors.
    writer
        .flush()
        .with_context(|| format!("flushing {}", path.display()))?;
    Ok(())
}

/// Reacts to the engine's most recent event.
fn handle(
    engine: &mut Engine<RasterBackend, StdClock, DemoSink>,
    queue: &mut RenderQueue,
    player: EntryId,
) -> Result<()> {
    let Some(event) = engine.last_event() else {
        return Ok(());
    };
    match event {
        Event::KeyDown(Key::Escape) => engine.request_quit(),
        Event::KeyDown(key) => {
            let (dx, dy) = match key {
                Key::W => (0.0, -PLAYER_SPEED),
                Key::A => (-PLAYER_SPEED, 0.0),
                Key::S => (0.0, PLAYER_SPEED),
                Key::D => (PLAYER_SPEED, 0.0),
                _ => return Ok(()),
            };
            if let Some(drawable) = queue.get_mut(player) {
                let origin = drawable.bounds().origin();
                drawable.set_origin(origin.x + dx, origin.y + dy);
            }
        }
        Event::MouseButtonDown(_) => {
            let pointer = engine.pointer_position();
            let hit = Rect::from_origin_size(pointer, Size::new(1.0, 1.0));
            let on_player = queue
                .bounds(player)
                .is_some_and(|bounds| is_touching(hit, bounds));
            if on_player {
                engine.move_to_position(queue, player, 1)?;
            } else {
                engine.create_rect(
                    queue,
                    Rect::from_origin_size(pointer, Size::new(BLOCK, BLOCK)),
                    Color::GREEN,
                )?;
            }
        }
        Event::MouseMotion(_) | Event::WindowResized(_) => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use strata_core::time::HostTime;
    use strata_core::trace::Lifecycle;

    use super::*;

    #[test]
    fn trace_file_is_complete_json() {
        let mut recorder = RecorderSink::new();
        for (phase, t) in [(Lifecycle::Started, 1_000), (Lifecycle::ShutDown, 9_000)] {
            recorder.on_lifecycle(&LifecycleEvent {
                phase,
                timestamp: HostTime(t),
            });
        }
        let path = std::env::temp_dir().join(format!("strata-{}-trace.json", std::process::id()));
        write_trace(recorder.as_bytes(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json.as_array().map(Vec::len), Some(2));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn unwritable_trace_path_is_reported() {
        let path = Path::new("/nonexistent/strata/trace.json");
        let err = write_trace(&[], path).unwrap_err();
        assert!(err.to_string().contains("creating"), "{err:#}");
    }
}
