//! Resize and grid alignment
//!
//! Maps raw image dimensions to the resolution a model actually encodes.

use tracing::debug;
use vtc_core::{AlignedDimensions, Error, ImageDimensions, Result};

use crate::models::{Layout, ModelConfig};

/// Largest accepted long/short side ratio for smart resizing
pub const MAX_ASPECT_RATIO: f64 = 200.0;

/// Rescale passes before falling back to step-wise clamping
const MAX_REFINE_PASSES: usize = 4;

/// Aligned dimensions for `dims` under the family's layout
pub fn align(dims: ImageDimensions, config: &ModelConfig) -> Result<AlignedDimensions> {
    match config.layout {
        Layout::SmartResize => {
            smart_resize(dims, config.unit(), config.min_pixels, config.max_pixels)
        }
        Layout::Fixed { width, height } => Ok(AlignedDimensions::new(width, height)),
        Layout::Tiled {
            tile_size,
            min_tiles,
            max_tiles,
            ..
        } => {
            let (cols, rows) = optimal_tile_grid(dims, tile_size, min_tiles, max_tiles);
            Ok(AlignedDimensions::new(cols * tile_size, rows * tile_size))
        }
    }
}

/// Snap both sides to multiples of `unit` and fit the area into
/// `[min_pixels, max_pixels]` while keeping the aspect ratio.
///
/// Sides are first rounded to the nearest multiple (ties to even, never
/// below one unit). An area above the maximum is scaled down and floored, an
/// area below the minimum is scaled up and ceiled. If the bounds still fail
/// after a few passes, sides are stepped one unit at a time; whatever
/// deviation remains after that is accepted.
pub fn smart_resize(
    dims: ImageDimensions,
    unit: u32,
    min_pixels: u64,
    max_pixels: u64,
) -> Result<AlignedDimensions> {
    let (width, height) = (f64::from(dims.width), f64::from(dims.height));
    let ratio = width.max(height) / width.min(height);
    if ratio > MAX_ASPECT_RATIO {
        return Err(Error::AspectRatioTooLarge {
            ratio,
            limit: MAX_ASPECT_RATIO,
        });
    }

    let mut w = snap(width / f64::from(unit), unit, f64::round_ties_even);
    let mut h = snap(height / f64::from(unit), unit, f64::round_ties_even);
    let (mut src_w, mut src_h) = (width, height);

    for pass in 0..MAX_REFINE_PASSES {
        let area = u64::from(w) * u64::from(h);
        if area > max_pixels {
            let beta = (src_w * src_h / max_pixels as f64).sqrt();
            w = snap(src_w / beta / f64::from(unit), unit, f64::floor);
            h = snap(src_h / beta / f64::from(unit), unit, f64::floor);
        } else if area < min_pixels {
            let beta = (min_pixels as f64 / (src_w * src_h)).sqrt();
            w = snap(src_w * beta / f64::from(unit), unit, f64::ceil);
            h = snap(src_h * beta / f64::from(unit), unit, f64::ceil);
        } else {
            return Ok(AlignedDimensions::new(w, h));
        }

        debug!(pass, width = w, height = h, "rescaled into pixel bounds");
        src_w = f64::from(w);
        src_h = f64::from(h);
    }

    Ok(clamp_to_bounds(w, h, unit, min_pixels, max_pixels))
}

/// Convert a unit count to pixels, keeping at least one unit and staying in u32
fn snap(units: f64, unit: u32, rounding: fn(f64) -> f64) -> u32 {
    let max_units = f64::from(u32::MAX / unit);
    let units = rounding(units).clamp(1.0, max_units);
    units as u32 * unit
}

fn clamp_to_bounds(
    mut w: u32,
    mut h: u32,
    unit: u32,
    min_pixels: u64,
    max_pixels: u64,
) -> AlignedDimensions {
    let area = |w: u32, h: u32| u64::from(w) * u64::from(h);

    while area(w, h) > max_pixels && (w > unit || h > unit) {
        if w >= h && w > unit {
            w -= unit;
        } else {
            h -= unit;
        }
    }

    while area(w, h) < min_pixels {
        let (next_w, next_h) = if w <= h {
            (w.saturating_add(unit), h)
        } else {
            (w, h.saturating_add(unit))
        };
        if (next_w, next_h) == (w, h) {
            break;
        }
        (w, h) = (next_w, next_h);
    }

    let final_area = area(w, h);
    if final_area < min_pixels || final_area > max_pixels {
        debug!(
            width = w,
            height = h,
            min_pixels,
            max_pixels,
            "pixel bounds not satisfiable on the grid, keeping closest fit"
        );
    }

    AlignedDimensions::new(w, h)
}

/// Every (cols, rows) grid with a tile count in `[min_tiles, max_tiles]`,
/// ordered by tile count
fn supported_tile_grids(min_tiles: u32, max_tiles: u32) -> Vec<(u32, u32)> {
    let mut grids = Vec::new();
    for cols in 1..=max_tiles {
        for rows in 1..=max_tiles {
            let tiles = cols * rows;
            if tiles >= min_tiles && tiles <= max_tiles {
                grids.push((cols, rows));
            }
        }
    }

    // stable: equal tile counts keep generation order
    grids.sort_by_key(|&(cols, rows)| cols * rows);
    grids
}

/// Pick the tile grid whose aspect ratio is closest to the image's.
///
/// On ties the larger grid wins while the image still covers more than half
/// of the tiled canvas.
pub fn optimal_tile_grid(
    dims: ImageDimensions,
    tile_size: u32,
    min_tiles: u32,
    max_tiles: u32,
) -> (u32, u32) {
    let aspect_ratio = f64::from(dims.width) / f64::from(dims.height);
    let area = dims.area() as f64;
    let tile_area = f64::from(tile_size) * f64::from(tile_size);

    let mut best_diff = f64::INFINITY;
    let mut best_grid = (1, 1);
    for (cols, rows) in supported_tile_grids(min_tiles, max_tiles) {
        let diff = (aspect_ratio - f64::from(cols) / f64::from(rows)).abs();
        if diff < best_diff {
            best_diff = diff;
            best_grid = (cols, rows);
        } else if diff == best_diff && area > 0.5 * tile_area * f64::from(cols * rows) {
            best_grid = (cols, rows);
        }
    }

    best_grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ModelFamily;

    const QWEN_MIN: u64 = 56 * 56;
    const QWEN_MAX: u64 = 28 * 28 * 16_384;

    fn dims(width: u32, height: u32) -> ImageDimensions {
        ImageDimensions { width, height }
    }

    #[test]
    fn test_nearest_multiple_rounding() {
        assert_eq!(
            smart_resize(dims(1024, 768), 28, QWEN_MIN, QWEN_MAX).unwrap(),
            AlignedDimensions::new(1036, 756)
        );
        assert_eq!(
            smart_resize(dims(256, 256), 28, QWEN_MIN, QWEN_MAX).unwrap(),
            AlignedDimensions::new(252, 252)
        );
        assert_eq!(
            smart_resize(dims(2048, 1536), 28, QWEN_MIN, QWEN_MAX).unwrap(),
            AlignedDimensions::new(2044, 1540)
        );
    }

    #[test]
    fn test_ties_round_to_even() {
        // 42 / 28 = 1.5 -> 2 units, 70 / 28 = 2.5 -> 2 units
        assert_eq!(
            smart_resize(dims(42, 70), 28, 0, QWEN_MAX).unwrap(),
            AlignedDimensions::new(56, 56)
        );
    }

    #[test]
    fn test_degenerate_input_never_rounds_to_zero() {
        let aligned = smart_resize(dims(1, 1), 28, QWEN_MIN, QWEN_MAX).unwrap();
        assert_eq!(aligned, AlignedDimensions::new(56, 56));

        let aligned = smart_resize(dims(10, 1000), 28, 0, QWEN_MAX).unwrap();
        assert_eq!(aligned.width, 28);
        assert_eq!(aligned.height, 1008);
    }

    #[test]
    fn test_downscale_to_max_pixels() {
        let aligned = smart_resize(dims(8000, 6000), 28, QWEN_MIN, QWEN_MAX).unwrap();
        assert_eq!(aligned.width % 28, 0);
        assert_eq!(aligned.height % 28, 0);
        assert!(aligned.area() <= QWEN_MAX);
        assert!(aligned.area() >= QWEN_MIN);
    }

    #[test]
    fn test_very_large_input_accepted() {
        let aligned = smart_resize(dims(150_000, 100_000), 28, QWEN_MIN, QWEN_MAX).unwrap();
        assert!(aligned.area() <= QWEN_MAX);
    }

    #[test]
    fn test_extreme_aspect_ratio_rejected() {
        assert!(matches!(
            smart_resize(dims(20_100, 100), 28, QWEN_MIN, QWEN_MAX),
            Err(Error::AspectRatioTooLarge { .. })
        ));
        assert!(smart_resize(dims(20_000, 100), 28, QWEN_MIN, QWEN_MAX).is_ok());
    }

    #[test]
    fn test_alignment_invariants_across_sizes() {
        let sizes = [1, 7, 27, 28, 29, 100, 333, 640, 1000, 1080, 1920, 4096, 9999];
        for &width in &sizes {
            for &height in &sizes {
                let ratio = f64::from(width.max(height)) / f64::from(width.min(height));
                if ratio > MAX_ASPECT_RATIO {
                    continue;
                }
                let aligned = smart_resize(dims(width, height), 28, QWEN_MIN, QWEN_MAX).unwrap();
                assert_eq!(aligned.width % 28, 0, "{}x{}", width, height);
                assert_eq!(aligned.height % 28, 0, "{}x{}", width, height);
                assert!(aligned.width >= 28 && aligned.height >= 28);
                assert!(
                    (QWEN_MIN..=QWEN_MAX).contains(&aligned.area()),
                    "{}x{} -> {}",
                    width,
                    height,
                    aligned
                );
            }
        }
    }

    #[test]
    fn test_tight_bounds_fall_back_to_clamping() {
        // no multiple of 28 has an area in [1000, 1500]
        let aligned = smart_resize(dims(30, 40), 28, 1000, 1500).unwrap();
        assert_eq!(aligned.width % 28, 0);
        assert_eq!(aligned.height % 28, 0);
        assert!(aligned.area() >= 1000);
    }

    #[test]
    fn test_tile_grid_selection() {
        // square images: 1x1 first, 2x2 ties and wins while the image covers half of it
        assert_eq!(optimal_tile_grid(dims(800, 800), 448, 1, 12), (2, 2));
        assert_eq!(optimal_tile_grid(dims(300, 300), 448, 1, 12), (1, 1));
        assert_eq!(optimal_tile_grid(dims(1400, 1400), 448, 1, 12), (3, 3));
        // exact aspect matches tie with larger grids that the image still fills
        assert_eq!(optimal_tile_grid(dims(1600, 800), 448, 1, 12), (4, 2));
        assert_eq!(optimal_tile_grid(dims(3000, 1000), 448, 1, 12), (6, 2));
        assert_eq!(optimal_tile_grid(dims(1024, 768), 448, 1, 12), (4, 3));
    }

    #[test]
    fn test_align_dispatches_on_layout() {
        let gemma = ModelFamily::Gemma3.config();
        assert_eq!(
            align(dims(1920, 1080), &gemma).unwrap(),
            AlignedDimensions::new(896, 896)
        );

        let internvl = ModelFamily::InternVl3.config();
        assert_eq!(
            align(dims(800, 800), &internvl).unwrap(),
            AlignedDimensions::new(896, 896)
        );

        let llava = ModelFamily::Llava.config();
        assert_eq!(
            align(dims(50, 4000), &llava).unwrap(),
            AlignedDimensions::new(336, 336)
        );
    }
}
