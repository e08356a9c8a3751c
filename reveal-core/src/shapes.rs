//! Procedural point-cloud generators for the reveal silhouettes.
//!
//! Each generator draws fresh randomness on every call, so two clouds of the
//! same shape share a distribution but not their exact points.

use std::f32::consts::{PI, TAU};
use std::fmt;

use glam::Vec3;
use rand::Rng;

use crate::types::PointCloud;

/// Radius of the ball silhouette.
pub const BALL_RADIUS: f32 = 4.5;

/// Radius of the candy-cane hook.
const CANE_HOOK_RADIUS: f32 = 2.5;
/// Fraction of the cane parameter spent on the straight shaft.
const CANE_SHAFT_SPLIT: f32 = 0.7;
const CANE_MAX_THICKNESS: f32 = 0.8;

const STAR_ARMS: usize = 6;
const STAR_ARM_LENGTH: f32 = 6.0;
const STAR_BRANCH_PROBABILITY: f64 = 0.2;
const STAR_BRANCH_SPREAD: f32 = 1.5;

/// Target silhouettes, in the order the reveal cycles through them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeName {
    Tree,
    Ball,
    Cane,
    Star,
    Gingerbread,
}

impl ShapeName {
    /// Number of distinct shapes.
    pub const COUNT: usize = 5;

    /// Morph rotation: shape `k` morphs into shape `(k + 1) % COUNT`.
    pub const ORDER: [ShapeName; Self::COUNT] = [
        ShapeName::Tree,
        ShapeName::Ball,
        ShapeName::Cane,
        ShapeName::Star,
        ShapeName::Gingerbread,
    ];

    /// Position of this shape in [`ShapeName::ORDER`].
    pub const fn index(self) -> usize {
        match self {
            ShapeName::Tree => 0,
            ShapeName::Ball => 1,
            ShapeName::Cane => 2,
            ShapeName::Star => 3,
            ShapeName::Gingerbread => 4,
        }
    }

    /// Shape at `cycle` in the rotation, wrapping around.
    pub const fn at_cycle(cycle: u64) -> ShapeName {
        Self::ORDER[(cycle % Self::COUNT as u64) as usize]
    }

    /// The shape this one morphs into.
    pub const fn next(self) -> ShapeName {
        Self::ORDER[(self.index() + 1) % Self::COUNT]
    }

    /// Lower-case name used in logs.
    pub const fn label(self) -> &'static str {
        match self {
            ShapeName::Tree => "tree",
            ShapeName::Ball => "ball",
            ShapeName::Cane => "cane",
            ShapeName::Star => "star",
            ShapeName::Gingerbread => "gingerbread",
        }
    }
}

impl fmt::Display for ShapeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Generates `count` points approximating `shape`.
///
/// Generation is O(`count`) and cannot fail; `count == 0` yields an empty cloud.
pub fn generate(shape: ShapeName, count: usize, rng: &mut impl Rng) -> PointCloud {
    (0..count)
        .map(|_| match shape {
            ShapeName::Tree => tree_point(rng),
            ShapeName::Ball => ball_point(BALL_RADIUS, rng),
            ShapeName::Cane => cane_point(rng),
            ShapeName::Star => star_point(rng),
            ShapeName::Gingerbread => gingerbread_point(rng),
        })
        .collect()
}

/// Symmetric sample in `(-half, half)`.
#[inline]
fn jitter(half: f32, rng: &mut impl Rng) -> f32 {
    (rng.random::<f32>() - 0.5) * 2.0 * half
}

/// Cone from `y = -5` to `y = 5`, narrowing linearly towards the tip.
///
/// The azimuth is twisted by `2y`, which wraps the density into a helix.
fn tree_point(rng: &mut impl Rng) -> Vec3 {
    let y = rng.random::<f32>() * 10.0 - 5.0;
    let max_radius = (5.0 - y) * 0.4;
    let angle = rng.random::<f32>() * TAU * 10.0;
    let r = rng.random::<f32>() * max_radius;

    Vec3::new(r * (angle + y * 2.0).cos(), y, r * (angle + y * 2.0).sin())
}

/// Uniform-by-volume sample inside a sphere of `radius`.
///
/// The radius uses a cube-root transform so the core is not over-sampled.
pub fn ball_point(radius: f32, rng: &mut impl Rng) -> Vec3 {
    let u: f32 = rng.random();
    let v: f32 = rng.random();
    let theta = TAU * u;
    // acos is undefined outside [-1, 1]; rounding must not leak NaN.
    let phi = (2.0 * v - 1.0).clamp(-1.0, 1.0).acos();
    let r = rng.random::<f32>().cbrt() * radius;

    let sin_phi = phi.sin();
    Vec3::new(
        r * sin_phi * theta.cos(),
        r * sin_phi * theta.sin(),
        r * phi.cos(),
    )
}

/// Tube around a vertical shaft topped by a semicircular hook.
fn cane_point(rng: &mut impl Rng) -> Vec3 {
    let t: f32 = rng.random();
    let thickness = rng.random::<f32>() * CANE_MAX_THICKNESS;
    let angle = rng.random::<f32>() * TAU;
    let (ring_x, ring_z) = (thickness * angle.cos(), thickness * angle.sin());

    if t < CANE_SHAFT_SPLIT {
        let y = (t / CANE_SHAFT_SPLIT) * 10.0 - 5.0;
        Vec3::new(ring_x, y, ring_z)
    } else {
        let hook_t = (t - CANE_SHAFT_SPLIT) / (1.0 - CANE_SHAFT_SPLIT);
        let hook_angle = hook_t * PI;
        let y = 5.0 + CANE_HOOK_RADIUS * hook_angle.sin();
        let x = -CANE_HOOK_RADIUS + CANE_HOOK_RADIUS * hook_angle.cos() + ring_x;
        Vec3::new(x, y, ring_z)
    }
}

/// Six flat arms with occasional branch deflections.
fn star_point(rng: &mut impl Rng) -> Vec3 {
    let arm = rng.random_range(0..STAR_ARMS);
    let r = rng.random::<f32>() * STAR_ARM_LENGTH;
    let base_angle = (arm as f32 / STAR_ARMS as f32) * TAU;
    let spread = rng.random::<f32>() * 0.5;

    let angle = if rng.random_bool(STAR_BRANCH_PROBABILITY) {
        base_angle + jitter(STAR_BRANCH_SPREAD * 0.5, rng)
    } else {
        base_angle
    };

    let x = r * angle.cos() + jitter(0.5, rng) * spread;
    let y = r * angle.sin() + jitter(0.5, rng) * spread;
    let z = jitter(0.25, rng);
    Vec3::new(x, y, z)
}

/// Head, torso, arms and legs, chosen per point by a fixed partition.
fn gingerbread_point(rng: &mut impl Rng) -> Vec3 {
    let region: f32 = rng.random();
    let z = jitter(0.5, rng);

    let (x, y) = if region < 0.15 {
        let angle = rng.random::<f32>() * TAU;
        let r = rng.random::<f32>() * 1.5;
        (r * angle.cos(), 2.5 + r * angle.sin())
    } else if region < 0.5 {
        let half_width = 1.5 + jitter(0.5, rng);
        (jitter(0.5, rng) * half_width * 2.0, jitter(1.5, rng))
    } else if region < 0.75 {
        let side = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let reach = rng.random::<f32>() * 2.0;
        (side * (1.5 + reach), 0.5 + jitter(0.5, rng))
    } else {
        let side = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let reach = rng.random::<f32>() * 2.0;
        (side * (1.0 + rng.random::<f32>() * 0.5), -1.5 - reach)
    };

    Vec3::new(x, y, z)
}

/// Immutable set of target clouds, one per [`ShapeName`], all of equal length.
#[derive(Debug)]
pub struct ShapeLibrary {
    clouds: [PointCloud; ShapeName::COUNT],
    point_count: usize,
}

impl ShapeLibrary {
    /// Generates every shape with `point_count` points.
    pub fn generate(point_count: usize, rng: &mut impl Rng) -> Self {
        let clouds = ShapeName::ORDER.map(|shape| generate(shape, point_count, rng));
        Self {
            clouds,
            point_count,
        }
    }

    #[inline]
    /// ### Returns
    /// The target cloud for `shape`, [`ShapeLibrary::point_count`] points long.
    pub fn get(&self, shape: ShapeName) -> &[Vec3] {
        &self.clouds[shape.index()]
    }

    /// Number of points in every cloud of the library.
    pub fn point_count(&self) -> usize {
        self.point_count
    }
}
