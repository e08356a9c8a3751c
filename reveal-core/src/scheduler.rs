//! Timeline of the reveal: which two shapes are blending, and how far along.

use crate::{config::ConfigError, shapes::ShapeName};

/// Symmetric quadratic ease-in-out on `[0, 1]`.
///
/// Accelerates over the first half and decelerates over the second, with
/// `ease_in_out(0) = 0`, `ease_in_out(0.5) = 0.5` and `ease_in_out(1) = 1`.
/// Inputs outside the unit interval are clamped.
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        let u = 2.0 - 2.0 * t;
        1.0 - u * u * 0.5
    }
}

/// Snapshot of the timeline at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Phase {
    pub from: ShapeName,
    pub to: ShapeName,
    /// Eased mix weight of `to` over `from`.
    pub progress: f32,
    /// Number of whole transitions already played.
    pub cycle_index: u64,
    /// Set once elapsed time reaches [`MorphScheduler::total_duration_ms`].
    pub is_complete: bool,
}

/// Maps elapsed session time onto the fixed shape rotation.
#[derive(Clone, Copy, Debug)]
pub struct MorphScheduler {
    duration_per_shape_ms: f64,
    total_cycles: u32,
}

impl MorphScheduler {
    /// Creates a scheduler for `total_cycles` transitions.
    ///
    /// ### Errors
    /// - [`ConfigError::InvalidDuration`] when `duration_per_shape_ms` is not
    ///   finite or not strictly positive.
    pub fn new(duration_per_shape_ms: f64, total_cycles: u32) -> Result<Self, ConfigError> {
        if !duration_per_shape_ms.is_finite() || duration_per_shape_ms <= 0.0 {
            return Err(ConfigError::InvalidDuration(duration_per_shape_ms));
        }
        Ok(Self {
            duration_per_shape_ms,
            total_cycles,
        })
    }

    /// Time at which [`Phase::is_complete`] first becomes `true`.
    pub fn total_duration_ms(&self) -> f64 {
        self.duration_per_shape_ms * f64::from(self.total_cycles)
    }

    /// Returns the phase at `elapsed_ms` after session start.
    ///
    /// Negative or NaN elapsed times are treated as the session start. Once
    /// complete, the reported shapes are those of the cycle that would have
    /// followed and `progress` is pinned to `1.0`; they must not be drawn.
    pub fn current_phase(&self, elapsed_ms: f64) -> Phase {
        let elapsed = if elapsed_ms.is_nan() {
            0.0
        } else {
            elapsed_ms.max(0.0)
        };
        let last_cycle = u64::from(self.total_cycles);

        // Saturating float-to-int cast keeps absurd elapsed values in range.
        let cycles = (elapsed / self.duration_per_shape_ms).floor() as u64;

        // The floored quotient can round either way near the end; completion
        // is decided by `total_duration_ms` alone.
        if elapsed >= self.total_duration_ms() {
            let cycle_index = cycles.max(last_cycle);
            let from = ShapeName::at_cycle(cycle_index);
            return Phase {
                from,
                to: from.next(),
                progress: 1.0,
                cycle_index,
                is_complete: true,
            };
        }

        let cycle_index = cycles.min(last_cycle.saturating_sub(1));
        let within = elapsed - cycle_index as f64 * self.duration_per_shape_ms;
        let linear = (within / self.duration_per_shape_ms) as f32;
        let from = ShapeName::at_cycle(cycle_index);

        Phase {
            from,
            to: from.next(),
            progress: ease_in_out(linear),
            cycle_index,
            is_complete: false,
        }
    }
}
