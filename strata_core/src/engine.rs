// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The engine context.
//!
//! [`Engine`] is an explicit context object: it owns a backend, a clock, the
//! frame pacer, the application state (running flag, last event, pointer
//! position, window size), the last recorded error, and a trace sink. Render
//! queues are *not* owned by the engine; the application keeps every queue
//! and passes it to the operations that need one.
//!
//! # Frame loop
//!
//! ```rust,ignore
//! let mut queue = RenderQueue::new();
//! let player = engine.create_image(&mut queue, "player.png", bounds)?;
//!
//! while engine.is_running() {
//!     while engine.poll_event() {
//!         if let Some(Event::KeyDown(Key::D)) = engine.last_event() {
//!             queue.get_mut(player).unwrap().set_origin(x + 5.0, y);
//!         }
//!     }
//!     engine.render(&queue);
//! }
//! let (backend, sink) = engine.shutdown(&mut queue);
//! ```

use alloc::string::{String, ToString};

use kurbo::{Point, Rect, Size};

use crate::backend::Backend;
use crate::clock::Clock;
use crate::color::Color;
use crate::drawable::Drawable;
use crate::error::{Error, Result};
use crate::geometry;
use crate::input::{self, Event, RawEvent};
use crate::present;
use crate::queue::{EntryId, RenderQueue};
use crate::scheduler::{FramePacer, PacerConfig};
use crate::trace::{
    EntryFreedEvent, ErrorEvent, Lifecycle, LifecycleEvent, NoopSink, PaceEvent, PresentEvent,
    QueueOp, QueueOpEvent, TraceSink, Tracer,
};

/// Configuration for an [`Engine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EngineConfig {
    /// Frame pacing.
    pub pacer: PacerConfig,
    /// Color [`Engine::render`] clears to.
    pub background: Color,
    /// Whether events reach the trace sink.
    pub debug: bool,
}

impl EngineConfig {
    /// 60 fps, opaque black background, tracing off.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pacer: PacerConfig::fixed(60),
            background: Color::BLACK,
            debug: false,
        }
    }

    /// Sets the target frame rate (`0` for uncapped).
    #[must_use]
    pub const fn with_target_fps(mut self, fps: u32) -> Self {
        self.pacer = PacerConfig::fixed(fps);
        self
    }

    /// Sets the default background color.
    #[must_use]
    pub const fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Enables or disables tracing.
    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// The engine context: backend, clock, pacing, application state, and
/// diagnostics.
///
/// Engine-level operations that fail record their error as the *last error*
/// (see [`last_error`](Self::last_error)) and report it to the trace sink
/// before returning it; recording never changes what is returned.
#[derive(Debug)]
pub struct Engine<B, C, S = NoopSink> {
    backend: B,
    clock: C,
    sink: S,
    pacer: FramePacer,
    config: EngineConfig,

    // -- Application state --
    running: bool,
    last_event: Option<Event>,
    pointer: Point,
    window_size: Size,

    // -- Diagnostics --
    last_error: Option<Error>,
    frame_index: u64,
}

impl<B: Backend, C: Clock> Engine<B, C> {
    /// Creates an engine that discards trace events.
    #[must_use]
    pub fn new(backend: B, clock: C, config: EngineConfig) -> Self {
        Self::with_sink(backend, clock, config, NoopSink)
    }
}

impl<B: Backend, C: Clock, S: TraceSink> Engine<B, C, S> {
    /// Creates an engine that reports to `sink` while `config.debug` is set.
    #[must_use]
    pub fn with_sink(backend: B, clock: C, config: EngineConfig, sink: S) -> Self {
        let pointer = backend.pointer_position();
        let window_size = backend.window_size();
        let mut engine = Self {
            backend,
            clock,
            sink,
            pacer: FramePacer::new(config.pacer),
            config,
            running: true,
            last_event: None,
            pointer,
            window_size,
            last_error: None,
            frame_index: 0,
        };
        engine.emit_lifecycle(Lifecycle::Started);
        engine
    }

    // -- Frame loop --

    /// Runs one poll step: takes at most one raw event, refreshes the
    /// pointer position, paces the loop, and translates the event.
    ///
    /// Returns `true` iff a translated event was recorded this call; it is
    /// then available from [`last_event`](Self::last_event). A quit request
    /// clears the running flag and returns `false`.
    pub fn poll_event(&mut self) -> bool {
        let raw = self.backend.poll_event();
        self.pointer = self.backend.pointer_position();

        let now = self.clock.now();
        let decision = self.pacer.pace(&mut self.clock);
        let e = PaceEvent {
            frame_index: self.frame_index,
            now,
            decision,
        };
        self.tracer().pace(&e);

        let Some(mut raw) = raw else {
            return false;
        };
        match &mut raw {
            RawEvent::Quit => {
                self.running = false;
                return false;
            }
            // The backend may refuse a size; report the one it kept.
            RawEvent::WindowResized { size } => {
                *size = self.backend.window_size();
                self.window_size = *size;
            }
            _ => {}
        }
        match input::translate(&raw) {
            Some(event) => {
                self.last_event = Some(event);
                true
            }
            None => false,
        }
    }

    /// Presents `queue` over the configured background.
    ///
    /// Returns the number of draw calls issued.
    pub fn render(&mut self, queue: &RenderQueue) -> usize {
        self.render_with(queue, self.config.background)
    }

    /// Presents `queue` over an explicit background, e.g. for an overlay
    /// menu kept in its own queue.
    pub fn render_with(&mut self, queue: &RenderQueue, background: Color) -> usize {
        let draw_calls = present::present(queue, &mut self.backend, background);
        let timestamp = self.clock.now();
        self.pacer.mark_presented(timestamp);
        let e = PresentEvent {
            frame_index: self.frame_index,
            timestamp,
            draw_calls,
        };
        self.tracer().present(&e);
        self.frame_index += 1;
        draw_calls
    }

    // -- Queue operations --

    /// Appends a drawable to `queue`.
    pub fn append(&mut self, queue: &mut RenderQueue, drawable: Drawable) -> Result<EntryId> {
        let id = self.record(queue.append(drawable))?;
        self.emit_queue_op(QueueOp::Appended, Some(id), queue.len());
        Ok(id)
    }

    /// Removes an entry from `queue` and returns its drawable.
    ///
    /// Backend handles stay alive; pass the drawable to
    /// [`release`](Self::release) once it is no longer needed.
    pub fn remove(&mut self, queue: &mut RenderQueue, id: EntryId) -> Result<Drawable> {
        let drawable = self.record(queue.remove(id))?;
        self.emit_queue_op(QueueOp::Removed, Some(id), queue.len());
        Ok(drawable)
    }

    /// Moves an entry of `queue` to a 1-based position.
    ///
    /// See [`RenderQueue::move_to_position`] for the accepted positions.
    pub fn move_to_position(
        &mut self,
        queue: &mut RenderQueue,
        id: EntryId,
        position: i32,
    ) -> Result<()> {
        self.record(queue.move_to_position(id, position))?;
        self.emit_queue_op(QueueOp::Moved { position }, Some(id), queue.len());
        Ok(())
    }

    // -- Factories --

    /// Appends a filled rectangle to `queue`.
    pub fn create_rect(
        &mut self,
        queue: &mut RenderQueue,
        bounds: Rect,
        color: Color,
    ) -> Result<EntryId> {
        self.append(queue, Drawable::rect(bounds, color))
    }

    /// Loads an image and returns a texture drawable without queueing it.
    pub fn load_image(&mut self, path: &str, bounds: Rect) -> Result<Drawable> {
        let loaded = self.backend.load_image(path);
        let (texture, _) = self.record(loaded)?;
        Ok(Drawable::texture(bounds, texture))
    }

    /// Loads an image and appends it to `queue`.
    ///
    /// If appending fails the texture is destroyed again.
    pub fn create_image(
        &mut self,
        queue: &mut RenderQueue,
        path: &str,
        bounds: Rect,
    ) -> Result<EntryId> {
        let drawable = self.load_image(path, bounds)?;
        self.append_or_release(queue, drawable)
    }

    /// Renders text and returns a text drawable without queueing it.
    ///
    /// The drawable's bounds start at `origin` and take the measured size of
    /// the rendered text.
    pub fn render_text(
        &mut self,
        font_path: &str,
        point_size: f32,
        text: &str,
        color: Color,
        origin: Point,
    ) -> Result<Drawable> {
        let rendered = self.backend.render_text(font_path, point_size, text, color);
        let rendered = self.record(rendered)?;
        Ok(Drawable::text(
            Rect::from_origin_size(origin, rendered.size),
            rendered.text,
            rendered.texture,
        ))
    }

    /// Renders text and appends it to `queue`.
    ///
    /// If appending fails the text resources are destroyed again.
    pub fn create_text(
        &mut self,
        queue: &mut RenderQueue,
        font_path: &str,
        point_size: f32,
        text: &str,
        color: Color,
        origin: Point,
    ) -> Result<EntryId> {
        let drawable = self.render_text(font_path, point_size, text, color, origin)?;
        self.append_or_release(queue, drawable)
    }

    // -- Layout helpers --

    /// Moves a drawable so it is centered in the current window.
    pub fn center(&self, drawable: &mut Drawable) {
        drawable.set_bounds(geometry::centered_in(drawable.bounds(), self.window_size));
    }

    /// Moves an entry of `queue` so it is centered in the current window.
    pub fn center_in_window(&mut self, queue: &mut RenderQueue, id: EntryId) -> Result<()> {
        let window = self.window_size;
        match queue.get_mut(id) {
            Some(drawable) => {
                drawable.set_bounds(geometry::centered_in(drawable.bounds(), window));
                Ok(())
            }
            None => self.fail(Error::EntryNotFound),
        }
    }

    // -- Teardown --

    /// Destroys the backend resources a drawable refers to.
    pub fn release(&mut self, drawable: Drawable) {
        match drawable {
            Drawable::Rect { .. } => {}
            Drawable::Texture { texture, .. } => self.backend.destroy_texture(texture),
            Drawable::Text { text, texture, .. } => {
                self.backend.destroy_texture(texture);
                self.backend.destroy_text(text);
            }
        }
    }

    /// Removes every entry of `queue` front to back, destroying the backend
    /// resources each one refers to.
    pub fn clear_queue(&mut self, queue: &mut RenderQueue) {
        let total = queue.len();
        for (i, (_, drawable)) in queue.drain().enumerate() {
            let kind = drawable.kind();
            self.release(drawable);
            let e = EntryFreedEvent {
                index: i + 1,
                total,
                kind,
            };
            self.tracer().entry_freed(&e);
        }
        self.emit_queue_op(QueueOp::Cleared, None, 0);
    }

    /// Tears `queue` down, stops the loop, and hands back the backend and
    /// the trace sink.
    pub fn shutdown(mut self, queue: &mut RenderQueue) -> (B, S) {
        self.clear_queue(queue);
        self.running = false;
        self.emit_lifecycle(Lifecycle::ShutDown);
        (self.backend, self.sink)
    }

    // -- Application state --

    /// Returns `false` once a quit was observed or requested.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Clears the running flag.
    pub fn request_quit(&mut self) {
        self.running = false;
    }

    /// The most recent translated event.
    #[must_use]
    pub fn last_event(&self) -> Option<Event> {
        self.last_event
    }

    /// Pointer position as of the last poll.
    #[must_use]
    pub fn pointer_position(&self) -> Point {
        self.pointer
    }

    /// Window size as of the last resize event (or construction).
    #[must_use]
    pub fn window_size(&self) -> Size {
        self.window_size
    }

    /// Changes the target frame rate (`0` for uncapped).
    pub fn set_target_fps(&mut self, fps: u32) {
        self.config.pacer = PacerConfig::fixed(fps);
        self.pacer.set_target_fps(fps);
    }

    /// Number of frames presented so far.
    #[must_use]
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// The current configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The frame pacer.
    #[must_use]
    pub fn pacer(&self) -> &FramePacer {
        &self.pacer
    }

    // -- Errors --

    /// The error most recently recorded by an engine operation.
    #[must_use]
    pub fn last_error(&self) -> Option<Error> {
        self.last_error
    }

    /// Human-readable text of the last recorded error.
    #[must_use]
    pub fn describe_last_error(&self) -> String {
        match self.last_error {
            Some(e) => e.to_string(),
            None => String::from("There was no error"),
        }
    }

    // -- Collaborators --

    /// The backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The backend, mutably (e.g. to inject events).
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// The clock.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// The clock, mutably.
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// The trace sink.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The trace sink, mutably.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    // -- Internal helpers --

    /// A tracer over the sink when debugging is on.
    fn tracer(&mut self) -> Tracer<'_> {
        if self.config.debug {
            Tracer::new(&mut self.sink)
        } else {
            Tracer::none()
        }
    }

    /// Records `error` as the last error, reports it, and returns it.
    fn fail<T>(&mut self, error: Error) -> Result<T> {
        self.last_error = Some(error);
        let e = ErrorEvent {
            frame_index: self.frame_index,
            error,
        };
        self.tracer().error(&e);
        Err(error)
    }

    /// Passes `result` through, recording its error if any.
    fn record<T>(&mut self, result: Result<T>) -> Result<T> {
        match result {
            Ok(value) => Ok(value),
            Err(error) => self.fail(error),
        }
    }

    fn append_or_release(
        &mut self,
        queue: &mut RenderQueue,
        drawable: Drawable,
    ) -> Result<EntryId> {
        let result = self.append(queue, drawable);
        if result.is_err() {
            self.release(drawable);
        }
        result
    }

    fn emit_queue_op(&mut self, op: QueueOp, entry: Option<EntryId>, len: usize) {
        let e = QueueOpEvent {
            frame_index: self.frame_index,
            op,
            entry,
            len,
        };
        self.tracer().queue_op(&e);
    }

    fn emit_lifecycle(&mut self, phase: Lifecycle) {
        let e = LifecycleEvent {
            phase,
            timestamp: self.clock.now(),
        };
        self.tracer().lifecycle(&e);
    }
}
