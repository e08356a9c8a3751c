//! Particle shape-morphing engine behind the full-screen reveal effect.
//!
//! Main components:
//! - [`shapes`] — point-cloud generators and the per-session shape library.
//! - [`scheduler`] — maps elapsed time to the active shape pair and eased progress.
//! - [`session`] — the per-frame driver with one-shot completion and teardown.
//! - [`camera`] — viewport, perspective projection and scene spin.
//! - [`backend`] — the trait a renderer implements to receive frames.
//! - [`clock`] — injected time sources.
//! - [`config`] — session parameters and their validation.
//! - [`types`] — shared type aliases.

pub mod backend;
pub mod camera;
pub mod clock;
pub mod config;
pub mod scheduler;
pub mod session;
pub mod shapes;
pub mod types;
