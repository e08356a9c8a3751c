//! Soft gold glow sprite and tint used for every particle.

use egui::{Color32, ColorImage};

/// Base particle colour, `#d4af37`.
pub const GOLD: [u8; 3] = [0xd4, 0xaf, 0x37];
/// Overall particle opacity before fog.
pub const OPACITY: f32 = 0.8;

/// Radial gradient stops as `(offset, [r, g, b], alpha)`.
const STOPS: [(f32, [f32; 3], f32); 4] = [
    (0.0, [255.0, 255.0, 255.0], 1.0),
    (0.2, [255.0, 215.0, 0.0], 0.8),
    (0.5, [212.0, 175.0, 55.0], 0.2),
    (1.0, [0.0, 0.0, 0.0], 0.0),
];

fn sample_gradient(t: f32) -> ([f32; 3], f32) {
    let t = t.clamp(0.0, 1.0);
    for pair in STOPS.windows(2) {
        let (t0, c0, a0) = pair[0];
        let (t1, c1, a1) = pair[1];
        if t <= t1 {
            let k = (t - t0) / (t1 - t0);
            let rgb = [
                c0[0] + (c1[0] - c0[0]) * k,
                c0[1] + (c1[1] - c0[1]) * k,
                c0[2] + (c1[2] - c0[2]) * k,
            ];
            return (rgb, a0 + (a1 - a0) * k);
        }
    }
    let (_, rgb, a) = STOPS[STOPS.len() - 1];
    (rgb, a)
}

/// Builds a `size`×`size` radial glow, opaque white in the middle and fully
/// transparent at the rim.
pub fn glow_image(size: usize) -> ColorImage {
    let radius = size as f32 * 0.5;
    let mut rgba = Vec::with_capacity(size * size * 4);

    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 + 0.5 - radius;
            let dy = y as f32 + 0.5 - radius;
            let t = (dx * dx + dy * dy).sqrt() / radius;
            let (rgb, alpha) = sample_gradient(t);
            rgba.extend_from_slice(&[
                rgb[0].round() as u8,
                rgb[1].round() as u8,
                rgb[2].round() as u8,
                (alpha * 255.0).round() as u8,
            ]);
        }
    }

    ColorImage::from_rgba_unmultiplied([size, size], &rgba)
}

/// Additive vertex tint for a particle whose fog visibility is `fog`.
///
/// A premultiplied colour with zero alpha adds onto whatever is already drawn.
pub fn point_tint(fog: f32) -> Color32 {
    let k = (OPACITY * fog).clamp(0.0, 1.0);
    Color32::from_rgba_premultiplied(
        (f32::from(GOLD[0]) * k).round() as u8,
        (f32::from(GOLD[1]) * k).round() as u8,
        (f32::from(GOLD[2]) * k).round() as u8,
        0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glow_is_bright_in_centre_and_clear_at_corners() {
        let image = glow_image(32);
        assert_eq!(image.size, [32, 32]);

        let centre = image.pixels[16 * 32 + 16];
        assert!(centre.a() > 230, "centre alpha {}", centre.a());

        for (x, y) in [(0, 0), (31, 0), (0, 31), (31, 31)] {
            assert_eq!(image.pixels[y * 32 + x].a(), 0);
        }
    }

    #[test]
    fn gradient_hits_its_stops() {
        let (rgb, a) = sample_gradient(0.2);
        assert_eq!(rgb, [255.0, 215.0, 0.0]);
        assert!((a - 0.8).abs() < 1e-6);

        let (_, a) = sample_gradient(2.0);
        assert_eq!(a, 0.0);
    }

    #[test]
    fn tint_is_additive_and_fades_with_fog() {
        let near = point_tint(1.0);
        let far = point_tint(0.25);
        assert_eq!(near.a(), 0);
        assert!(near.r() > far.r());
        assert_eq!(point_tint(0.0), Color32::TRANSPARENT);
    }
}
