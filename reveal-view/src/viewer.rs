//! Full-screen particle reveal window built with eframe/egui.
//!
//! [`Viewer`] plays the part of the surrounding application: it starts a
//! [`RevealSession`] on request, feeds it the viewport every frame, paints
//! the mesh produced by [`EguiBackend`], and learns about completion through
//! the session's one-shot callback.

use std::cell::Cell;
use std::rc::Rc;

use eframe::App;
use reveal_core::{
    camera::Viewport,
    clock::SystemClock,
    config::RevealConfig,
    session::{FrameOutcome, RevealSession},
};

use crate::{backend::EguiBackend, glow};

type Session = RevealSession<SystemClock, EguiBackend>;

/// What the window is currently showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Revealing,
    Revealed,
}

/// Main application state for the reveal window.
///
/// ### Fields
/// - `config` - Parameters used for every new reveal.
/// - `session` - The running reveal, if any.
/// - `glow` - Particle sprite texture, uploaded on the first frame.
/// - `revealed` - Set by the completion callback.
/// - `last_error` - Message shown when a reveal could not start.
pub struct Viewer {
    config: RevealConfig,
    session: Option<Session>,
    glow: Option<egui::TextureHandle>,
    revealed: Rc<Cell<bool>>,
    last_error: Option<String>,
}

impl Viewer {
    /// Creates an idle viewer; nothing is generated until a reveal starts.
    pub fn new(config: RevealConfig) -> Self {
        Self {
            config,
            session: None,
            glow: None,
            revealed: Rc::new(Cell::new(false)),
            last_error: None,
        }
    }

    /// ### Returns
    /// [`Stage::Revealing`] while a session exists, [`Stage::Revealed`] after
    /// one completed, [`Stage::Idle`] otherwise.
    pub fn stage(&self) -> Stage {
        if self.session.is_some() {
            Stage::Revealing
        } else if self.revealed.get() {
            Stage::Revealed
        } else {
            Stage::Idle
        }
    }

    /// Starts a new reveal, replacing (and cancelling) any running one.
    fn start_reveal(&mut self, viewport: Viewport, texture: egui::TextureId) {
        self.session = None;
        self.revealed.set(false);

        let revealed = Rc::clone(&self.revealed);
        match RevealSession::start(
            self.config,
            viewport,
            SystemClock::new(),
            EguiBackend::new(texture),
            move || revealed.set(true),
        ) {
            Ok(session) => {
                self.session = Some(session);
                self.last_error = None;
            }
            Err(err) => {
                log::error!("could not start reveal: {err}");
                self.last_error = Some(err.to_string());
            }
        }
    }

    /// Cancels the running reveal, if any, without revealing.
    fn skip(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.cancel();
        }
    }

    /// Advances the running reveal by one frame.
    ///
    /// Returns the mesh to paint, or `None` once the session has ended (in
    /// which case it is dropped).
    fn step(&mut self, viewport: Viewport, origin: egui::Pos2) -> Option<egui::Mesh> {
        let session = self.session.as_mut()?;

        // Minimized windows report an empty rect; keep the last good size.
        if viewport.is_valid() && viewport != session.viewport() {
            session.resize(viewport);
        }
        session.backend_mut().set_origin(origin);

        match session.tick() {
            FrameOutcome::Rendered(_) => Some(session.backend_mut().take_mesh()),
            FrameOutcome::Completed | FrameOutcome::Idle => {
                self.session = None;
                None
            }
        }
    }

    /// `true` while the running session has asked for another frame.
    fn wants_frame(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(RevealSession::has_pending_frame)
    }

    fn glow_texture(&mut self, ctx: &egui::Context) -> egui::TextureId {
        self.glow
            .get_or_insert_with(|| {
                ctx.load_texture(
                    "reveal-glow",
                    glow::glow_image(32),
                    egui::TextureOptions::LINEAR,
                )
            })
            .id()
    }

    /// Builds the black overlay where the particles are drawn.
    fn ui_reveal(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                let viewport = Viewport::new(rect.width(), rect.height(), ctx.pixels_per_point());

                if let Some(mesh) = self.step(viewport, rect.min) {
                    ui.painter_at(rect).add(egui::Shape::mesh(mesh));
                }
                // One more frame after the session ends switches to the idle screen.
                if self.wants_frame() || self.session.is_none() {
                    ctx.request_repaint();
                }
            });

        egui::Area::new("skip".into())
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -16.0))
            .show(ctx, |ui| {
                if ui.button("Skip").clicked() {
                    self.skip();
                }
            });

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.skip();
        }
    }

    /// Builds the resting screen with the reveal button.
    fn ui_idle(&mut self, ctx: &egui::Context) {
        let texture = self.glow_texture(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            let rect = ui.max_rect();
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.35);

                if self.stage() == Stage::Revealed {
                    ui.heading("The pairings are revealed!");
                    ui.add_space(12.0);
                }

                if ui.button("✨ Reveal").clicked() {
                    let viewport =
                        Viewport::new(rect.width(), rect.height(), ctx.pixels_per_point());
                    self.start_reveal(viewport, texture);
                }

                if let Some(err) = &self.last_error {
                    ui.colored_label(egui::Color32::LIGHT_RED, err);
                }
            });
        });
    }
}

impl App for Viewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.session.is_some() {
            self.ui_reveal(ctx);
        } else {
            self.ui_idle(ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn viewport() -> Viewport {
        Viewport::new(800.0, 600.0, 1.0)
    }

    fn small_config() -> RevealConfig {
        RevealConfig {
            particle_count: 64,
            ..RevealConfig::default()
        }
    }

    #[test]
    fn new_viewer_is_idle() {
        let viewer = Viewer::new(small_config());
        assert_eq!(viewer.stage(), Stage::Idle);
    }

    #[test]
    fn start_then_step_produces_a_mesh() {
        let mut viewer = Viewer::new(small_config());
        viewer.start_reveal(viewport(), egui::TextureId::default());
        assert_eq!(viewer.stage(), Stage::Revealing);

        let mesh = viewer.step(viewport(), egui::Pos2::ZERO).unwrap();
        assert!(!mesh.vertices.is_empty());
        assert_eq!(viewer.stage(), Stage::Revealing);
    }

    #[test]
    fn running_reveal_wants_frames_until_skipped() {
        let mut viewer = Viewer::new(small_config());
        assert!(!viewer.wants_frame());

        viewer.start_reveal(viewport(), egui::TextureId::default());
        assert!(viewer.wants_frame());
        viewer.step(viewport(), egui::Pos2::ZERO);
        assert!(viewer.wants_frame());

        viewer.skip();
        assert!(!viewer.wants_frame());
    }

    #[test]
    fn empty_viewport_keeps_last_size_and_keeps_drawing() {
        let mut viewer = Viewer::new(small_config());
        viewer.start_reveal(viewport(), egui::TextureId::default());

        let minimized = Viewport::new(0.0, 0.0, 1.0);
        for _ in 0..3 {
            let mesh = viewer.step(minimized, egui::Pos2::ZERO).unwrap();
            assert!(!mesh.vertices.is_empty());
        }

        let session = viewer.session.as_ref().unwrap();
        assert_eq!(session.viewport(), viewport());
        assert_eq!(session.camera().aspect(), viewport().aspect());
    }

    #[test]
    fn skip_returns_to_idle_without_revealing() {
        let mut viewer = Viewer::new(small_config());
        viewer.start_reveal(viewport(), egui::TextureId::default());
        viewer.step(viewport(), egui::Pos2::ZERO);

        viewer.skip();
        assert_eq!(viewer.stage(), Stage::Idle);
        assert!(viewer.step(viewport(), egui::Pos2::ZERO).is_none());
    }

    #[test]
    fn finished_reveal_switches_to_revealed() {
        let config = RevealConfig {
            particle_count: 16,
            duration_per_shape_ms: 1.0,
            total_cycles: 1,
            ..RevealConfig::default()
        };
        let mut viewer = Viewer::new(config);
        viewer.start_reveal(viewport(), egui::TextureId::default());

        std::thread::sleep(Duration::from_millis(5));
        assert!(viewer.step(viewport(), egui::Pos2::ZERO).is_none());
        assert_eq!(viewer.stage(), Stage::Revealed);
        assert!(!viewer.wants_frame());
    }

    #[test]
    fn invalid_config_reports_an_error() {
        let config = RevealConfig {
            total_cycles: 0,
            ..small_config()
        };
        let mut viewer = Viewer::new(config);
        viewer.start_reveal(viewport(), egui::TextureId::default());

        assert_eq!(viewer.stage(), Stage::Idle);
        assert!(viewer.last_error.is_some());
    }
}
