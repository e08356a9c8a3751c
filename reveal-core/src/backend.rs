//! Seam between the reveal session and whatever draws the points.

use glam::Vec3;

use crate::{
    camera::{Camera, SceneRotation, Viewport},
    scheduler::Phase,
};

/// Everything a backend needs to draw one frame.
#[derive(Debug)]
pub struct Frame<'a> {
    pub positions: &'a [Vec3],
    pub rotation: SceneRotation,
    pub camera: &'a Camera,
    pub phase: Phase,
}

/// Owner of the drawing surface.
///
/// The session calls [`RenderBackend::resize`] once at start and again on
/// every valid resize, [`RenderBackend::draw`] once per rendered frame, and
/// [`RenderBackend::detach`] when it ends. `detach` may be called more than
/// once and must tolerate that.
pub trait RenderBackend {
    fn resize(&mut self, viewport: Viewport);
    fn draw(&mut self, frame: &Frame<'_>);
    fn detach(&mut self);
}
