//! Perspective camera and slow scene spin for the reveal view.

use glam::{Mat3, Vec2, Vec3};

/// Drawable area in logical pixels plus the device pixel density.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            pixel_ratio,
        }
    }

    /// `true` when every dimension is finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        [self.width, self.height, self.pixel_ratio]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
    }

    /// Width over height; only meaningful for a valid viewport.
    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Size of the backing surface in device pixels.
    pub fn physical_size(&self) -> [u32; 2] {
        [
            (self.width * self.pixel_ratio).round() as u32,
            (self.height * self.pixel_ratio).round() as u32,
        ]
    }
}

/// Whole-scene rotation applied on top of the morph, driven by wall time only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneRotation {
    /// Spin around the vertical axis, in radians.
    pub yaw: f32,
    /// Small nod around the horizontal axis, in radians.
    pub pitch: f32,
}

impl SceneRotation {
    /// Rotation at wall time `now_ms`.
    ///
    /// Yaw grows at `0.00025` rad/ms; pitch oscillates within `±0.1` rad.
    pub fn at(now_ms: f64) -> Self {
        let t = now_ms * 0.0005;
        Self {
            yaw: (t * 0.5) as f32,
            pitch: ((t * 0.5).sin() * 0.1) as f32,
        }
    }

    /// Rotation matrix, pitch applied after yaw.
    pub fn matrix(&self) -> Mat3 {
        Mat3::from_rotation_x(self.pitch) * Mat3::from_rotation_y(self.yaw)
    }
}

/// A point mapped onto the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectedPoint {
    /// Position in logical pixels, origin at the top-left corner.
    pub screen: Vec2,
    /// Distance in front of the camera along its view axis.
    pub depth: f32,
    /// Point diameter in logical pixels after perspective attenuation.
    pub size: f32,
}

/// Perspective camera looking down the negative Z axis.
///
/// ### Fields
/// - `position` - Eye position in world space.
/// - `fov_y_deg` - Vertical field of view in degrees.
/// - `near`, `far` - Depth range kept by [`Camera::project`].
/// - `fog_density` - Exponential-squared fog coefficient.
/// - `aspect` - Width over height of the last valid viewport.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub position: Vec3,
    pub fov_y_deg: f32,
    pub near: f32,
    pub far: f32,
    pub fog_density: f32,
    aspect: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 2.0, 15.0),
            fov_y_deg: 75.0,
            near: 0.1,
            far: 100.0,
            fog_density: 0.05,
            aspect: 1.0,
        }
    }
}

impl Camera {
    /// Default camera with its aspect taken from `viewport`, if valid.
    pub fn for_viewport(viewport: &Viewport) -> Self {
        let mut camera = Self::default();
        camera.set_viewport(viewport);
        camera
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Updates the projection aspect; invalid viewports leave it untouched.
    ///
    /// ### Returns
    /// `true` if the viewport was accepted.
    pub fn set_viewport(&mut self, viewport: &Viewport) -> bool {
        if !viewport.is_valid() {
            return false;
        }
        self.aspect = viewport.aspect();
        true
    }

    /// Projects a world-space point, or `None` when it is outside the
    /// near/far range.
    ///
    /// `world_size` is the point diameter in world units; the returned size
    /// shrinks with depth the way attenuated GL points do.
    pub fn project(
        &self,
        world: Vec3,
        viewport: &Viewport,
        world_size: f32,
    ) -> Option<ProjectedPoint> {
        let rel = world - self.position;
        let depth = -rel.z;
        if !(self.near..=self.far).contains(&depth) {
            return None;
        }

        let focal = 1.0 / (self.fov_y_deg.to_radians() * 0.5).tan();
        let ndc_x = rel.x * focal / (self.aspect * depth);
        let ndc_y = rel.y * focal / depth;

        let screen = Vec2::new(
            (ndc_x + 1.0) * 0.5 * viewport.width,
            (1.0 - ndc_y) * 0.5 * viewport.height,
        );
        let size = world_size * viewport.height * 0.5 / depth;

        Some(ProjectedPoint {
            screen,
            depth,
            size,
        })
    }

    /// Exponential-squared fog visibility at `depth`, in `[0, 1]`.
    pub fn fog_factor(&self, depth: f32) -> f32 {
        let d = self.fog_density * depth;
        (-(d * d)).exp().clamp(0.0, 1.0)
    }
}
