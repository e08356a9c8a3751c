//! The per-frame driver of one reveal.
//!
//! A [`RevealSession`] is ticked once per displayed frame. Each tick asks the
//! [`MorphScheduler`] where the timeline is, blends the two active shapes into
//! the live buffer, sprinkles twinkle noise on top, and hands the result to
//! the [`RenderBackend`]. When the timeline runs out the session stops asking
//! for frames, releases its buffers and surface, and fires the completion
//! callback exactly once.

use glam::Vec3;
use log::{debug, info, warn};
use rand::{Rng, rngs::ThreadRng};

use crate::{
    backend::{Frame, RenderBackend},
    camera::{Camera, SceneRotation, Viewport},
    clock::Clock,
    config::{ConfigError, RevealConfig},
    scheduler::{MorphScheduler, Phase},
    shapes::{ShapeLibrary, ShapeName},
    types::PointCloud,
};

/// Invoked with no arguments when the reveal finishes naturally.
pub type CompletionCallback = Box<dyn FnOnce()>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Running,
    /// Finished naturally; the callback has fired.
    Completed,
    /// Ended early by the caller; the callback never fires.
    Cancelled,
}

/// Result of a single [`RevealSession::tick`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameOutcome {
    /// A frame was drawn and another one is wanted.
    Rendered(Phase),
    /// The timeline ran out on this tick.
    Completed,
    /// The session had already ended; nothing was done.
    Idle,
}

/// Writes `from * (1 - progress) + to * progress` into `out`, point by point.
///
/// All three slices are expected to have the same length; extra points in any
/// of them are left alone.
pub fn blend_into(out: &mut [Vec3], from: &[Vec3], to: &[Vec3], progress: f32) {
    debug_assert_eq!(out.len(), from.len());
    debug_assert_eq!(out.len(), to.len());

    let keep = 1.0 - progress;
    for ((o, a), b) in out.iter_mut().zip(from).zip(to) {
        *o = *a * keep + *b * progress;
    }
}

/// Offsets a random subset of points by up to `amplitude / 2` on each axis.
///
/// The noise lands on the freshly blended buffer, so it never accumulates
/// across frames.
pub fn apply_twinkle(out: &mut [Vec3], rng: &mut impl Rng, probability: f64, amplitude: f32) {
    if probability <= 0.0 || amplitude == 0.0 {
        return;
    }
    let probability = probability.min(1.0);

    for p in out.iter_mut() {
        if rng.random_bool(probability) {
            *p += Vec3::new(
                (rng.random::<f32>() - 0.5) * amplitude,
                (rng.random::<f32>() - 0.5) * amplitude,
                (rng.random::<f32>() - 0.5) * amplitude,
            );
        }
    }
}

/// One reveal from start to completion or cancellation.
///
/// The session exclusively owns its shape library, position buffer and
/// backend. Dropping a running session cancels it.
pub struct RevealSession<C: Clock, B: RenderBackend> {
    config: RevealConfig,
    scheduler: MorphScheduler,
    library: Option<ShapeLibrary>,
    positions: PointCloud,

    clock: C,
    start_ms: f64,
    last_cycle: Option<u64>,

    state: SessionState,
    on_complete: Option<CompletionCallback>,
    frame_requested: bool,
    released: bool,

    camera: Camera,
    viewport: Viewport,
    backend: B,

    rng: ThreadRng,
}

impl<C: Clock, B: RenderBackend> RevealSession<C, B> {
    /// Generates all shapes and begins the reveal at the clock's current time.
    ///
    /// ### Errors
    /// Returns [`ConfigError`] when `config` cannot drive a timeline.
    pub fn start(
        config: RevealConfig,
        viewport: Viewport,
        clock: C,
        backend: B,
        on_complete: impl FnOnce() + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = rand::rng();
        let library = ShapeLibrary::generate(config.particle_count, &mut rng);
        Self::from_library(config, library, viewport, clock, backend, on_complete)
    }

    /// Begins a reveal over a pre-generated library.
    ///
    /// The particle count is taken from `library`; `config.particle_count`
    /// is ignored.
    ///
    /// ### Parameters
    /// - `config` - Timeline and twinkle settings.
    /// - `library` - Target shapes, all of the same length.
    /// - `viewport` - Initial drawable area; a degenerate one is kept but
    ///   not forwarded to the backend.
    /// - `clock` - Time source for the whole session.
    /// - `backend` - Receives every frame until teardown.
    /// - `on_complete` - Invoked once when the final cycle ends.
    ///
    /// ### Errors
    /// Returns [`ConfigError`] when `config` cannot drive a timeline.
    pub fn from_library(
        config: RevealConfig,
        library: ShapeLibrary,
        viewport: Viewport,
        clock: C,
        mut backend: B,
        on_complete: impl FnOnce() + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let scheduler = MorphScheduler::new(config.duration_per_shape_ms, config.total_cycles)?;

        let positions = library.get(ShapeName::ORDER[0]).to_vec();

        let mut camera = Camera::default();
        if camera.set_viewport(&viewport) {
            backend.resize(viewport);
        } else {
            warn!("starting reveal with degenerate viewport {viewport:?}");
        }

        let start_ms = clock.now_ms();
        info!(
            "reveal started: {} particles, {} cycles of {} ms, complete at {} ms",
            library.point_count(),
            config.total_cycles,
            config.duration_per_shape_ms,
            scheduler.total_duration_ms()
        );

        Ok(Self {
            config,
            scheduler,
            library: Some(library),
            positions,
            clock,
            start_ms,
            last_cycle: None,
            state: SessionState::Running,
            on_complete: Some(Box::new(on_complete)),
            frame_requested: true,
            released: false,
            camera,
            viewport,
            backend,
            rng: rand::rng(),
        })
    }

    /// Advances the reveal by one displayed frame.
    pub fn tick(&mut self) -> FrameOutcome {
        if self.state != SessionState::Running {
            return FrameOutcome::Idle;
        }

        let now = self.clock.now_ms();
        let phase = self.scheduler.current_phase(now - self.start_ms);

        if phase.is_complete {
            self.finish(now);
            return FrameOutcome::Completed;
        }

        let Some(library) = &self.library else {
            return FrameOutcome::Idle;
        };

        if self.last_cycle != Some(phase.cycle_index) {
            debug!(
                "cycle {}: morphing {} -> {}",
                phase.cycle_index, phase.from, phase.to
            );
            self.last_cycle = Some(phase.cycle_index);
        }

        blend_into(
            &mut self.positions,
            library.get(phase.from),
            library.get(phase.to),
            phase.progress,
        );
        apply_twinkle(
            &mut self.positions,
            &mut self.rng,
            self.config.twinkle_probability,
            self.config.twinkle_amplitude,
        );

        let frame = Frame {
            positions: &self.positions,
            rotation: SceneRotation::at(now),
            camera: &self.camera,
            phase,
        };
        self.backend.draw(&frame);
        self.frame_requested = true;

        FrameOutcome::Rendered(phase)
    }

    /// Propagates a new viewport to the camera and the surface.
    ///
    /// The timeline is untouched. Returns `false` if the viewport was
    /// degenerate and therefore ignored.
    pub fn resize(&mut self, viewport: Viewport) -> bool {
        if !self.camera.set_viewport(&viewport) {
            debug!("ignoring degenerate viewport {viewport:?}");
            return false;
        }
        self.viewport = viewport;
        if !self.released {
            self.backend.resize(viewport);
        }
        debug!(
            "viewport resized to {}x{} @{}",
            viewport.width, viewport.height, viewport.pixel_ratio
        );
        true
    }

    /// Ends the reveal early without firing the completion callback.
    ///
    /// Safe to call any number of times, and a no-op after completion.
    pub fn cancel(&mut self) {
        if self.state == SessionState::Running {
            self.state = SessionState::Cancelled;
            self.frame_requested = false;
            self.on_complete = None;
            info!(
                "reveal cancelled after {:.0} ms",
                self.clock.now_ms() - self.start_ms
            );
        }
        self.release();
    }

    fn finish(&mut self, now: f64) {
        self.state = SessionState::Completed;
        self.frame_requested = false;
        info!("reveal complete after {:.0} ms", now - self.start_ms);
        self.release();

        if let Some(on_complete) = self.on_complete.take() {
            on_complete();
        }
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.library = None;
        self.positions = Vec::new();
        self.backend.detach();
    }

    /// Lifecycle state of the session.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// `true` while the session wants another [`RevealSession::tick`].
    pub fn has_pending_frame(&self) -> bool {
        self.frame_requested
    }

    /// Milliseconds since the session started.
    pub fn elapsed_ms(&self) -> f64 {
        self.clock.now_ms() - self.start_ms
    }

    /// The live buffer; empty once the session has ended.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The starting viewport, or the last one accepted by
    /// [`RevealSession::resize`].
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable access to the backend, e.g. to collect what it drew.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

impl<C: Clock, B: RenderBackend> Drop for RevealSession<C, B> {
    fn drop(&mut self) {
        self.cancel();
    }
}
