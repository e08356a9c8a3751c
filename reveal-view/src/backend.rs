//! egui rendering backend: turns each reveal frame into one textured mesh.

use egui::{Mesh, Pos2, Rect, TextureId, pos2, vec2};
use reveal_core::{
    backend::{Frame, RenderBackend},
    camera::Viewport,
};

use crate::glow;

/// Particle diameter in world units.
const POINT_SIZE: f32 = 0.15;
/// Particles fogged below this visibility are skipped.
const MIN_VISIBILITY: f32 = 0.01;

/// Builds a mesh of glow sprites for the viewer to paint.
///
/// The mesh is rebuilt on every [`RenderBackend::draw`] and handed out with
/// [`EguiBackend::take_mesh`]; after [`RenderBackend::detach`] draws are
/// ignored and the mesh storage is freed.
pub struct EguiBackend {
    texture: TextureId,
    mesh: Mesh,
    viewport: Option<Viewport>,
    origin: Pos2,
    attached: bool,
}

impl EguiBackend {
    /// ### Parameters
    /// - `texture` - Glow sprite sampled by every particle quad.
    pub fn new(texture: TextureId) -> Self {
        Self {
            texture,
            mesh: Mesh::with_texture(texture),
            viewport: None,
            origin: Pos2::ZERO,
            attached: true,
        }
    }

    /// Screen position of the drawing area's top-left corner.
    pub fn set_origin(&mut self, origin: Pos2) {
        self.origin = origin;
    }

    /// Takes the most recently built mesh, leaving an empty one behind.
    pub fn take_mesh(&mut self) -> Mesh {
        std::mem::replace(&mut self.mesh, Mesh::with_texture(self.texture))
    }
}

impl RenderBackend for EguiBackend {
    fn resize(&mut self, viewport: Viewport) {
        log::debug!(
            "surface resized to {:?} device pixels",
            viewport.physical_size()
        );
        self.viewport = Some(viewport);
    }

    fn draw(&mut self, frame: &Frame<'_>) {
        let (true, Some(viewport)) = (self.attached, self.viewport) else {
            return;
        };

        self.mesh.clear();
        self.mesh.texture_id = self.texture;
        let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
        let rotation = frame.rotation.matrix();

        for p in frame.positions {
            let Some(projected) = frame.camera.project(rotation * *p, &viewport, POINT_SIZE)
            else {
                continue;
            };
            let visibility = frame.camera.fog_factor(projected.depth);
            if visibility < MIN_VISIBILITY {
                continue;
            }

            let centre = self.origin + vec2(projected.screen.x, projected.screen.y);
            let size = projected.size.max(1.0);
            self.mesh.add_rect_with_uv(
                Rect::from_center_size(centre, vec2(size, size)),
                uv,
                glow::point_tint(visibility),
            );
        }
    }

    fn detach(&mut self) {
        if self.attached {
            log::debug!("detaching egui surface");
        }
        self.attached = false;
        self.viewport = None;
        self.mesh = Mesh::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use reveal_core::{
        camera::{Camera, SceneRotation},
        scheduler::Phase,
        shapes::ShapeName,
    };

    fn phase() -> Phase {
        Phase {
            from: ShapeName::Tree,
            to: ShapeName::Ball,
            progress: 0.0,
            cycle_index: 0,
            is_complete: false,
        }
    }

    fn draw(backend: &mut EguiBackend, positions: &[Vec3]) {
        let viewport = Viewport::new(800.0, 600.0, 1.0);
        let camera = Camera::for_viewport(&viewport);
        backend.draw(&Frame {
            positions,
            rotation: SceneRotation::at(0.0),
            camera: &camera,
            phase: phase(),
        });
    }

    #[test]
    fn draw_emits_one_quad_per_visible_point() {
        let mut backend = EguiBackend::new(TextureId::default());
        backend.resize(Viewport::new(800.0, 600.0, 1.0));

        // The last point sits behind the camera.
        let positions = [Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0), Vec3::new(0.0, 0.0, 30.0)];
        draw(&mut backend, &positions);

        let mesh = backend.take_mesh();
        assert_eq!(mesh.vertices.len(), 8);
        assert_eq!(mesh.indices.len(), 12);
        assert!(backend.take_mesh().is_empty());
    }

    #[test]
    fn origin_offsets_every_quad() {
        let mut backend = EguiBackend::new(TextureId::default());
        backend.resize(Viewport::new(800.0, 600.0, 1.0));
        draw(&mut backend, &[Vec3::ZERO]);
        let plain = backend.take_mesh();

        backend.set_origin(pos2(100.0, 50.0));
        draw(&mut backend, &[Vec3::ZERO]);
        let shifted = backend.take_mesh();

        let delta = shifted.vertices[0].pos - plain.vertices[0].pos;
        assert!((delta - vec2(100.0, 50.0)).length() < 1e-3);
    }

    #[test]
    fn detached_backend_ignores_draws() {
        let mut backend = EguiBackend::new(TextureId::default());
        backend.resize(Viewport::new(800.0, 600.0, 1.0));
        backend.detach();
        backend.detach();

        draw(&mut backend, &[Vec3::ZERO]);
        assert!(!backend.attached);
        assert!(backend.take_mesh().is_empty());
    }
}
