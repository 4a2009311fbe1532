//! Ordered dithering to the 16-level e-ink gray palette
//!
//! Quantizes 8-bit luminance to multiples of 17 (0, 17, 34, … 255) with an
//! 8×8 ordered threshold matrix. The matrix is ImageMagick's `o8x8` preset,
//! so output matches what `convert -ordered-dither o8x8,16` produces.

use crate::color::div_255;

/// Number of output levels minus one
const LEVELS: u32 = 15;

/// Fixed-point precision of the pre-scaled value (6 bits, one per
/// threshold step)
const QUANTUM_SHIFT: u32 = 6;

/// ImageMagick `o8x8` threshold map, row-major, values 1..=64.
pub const O8X8: [u8; 64] = [
    1, 49, 13, 61, 4, 52, 16, 64, //
    33, 17, 45, 29, 36, 20, 48, 32, //
    9, 57, 5, 53, 12, 60, 8, 56, //
    41, 25, 37, 21, 44, 28, 40, 24, //
    3, 51, 15, 63, 2, 50, 14, 62, //
    35, 19, 47, 31, 34, 18, 46, 30, //
    11, 59, 7, 55, 10, 58, 6, 54, //
    43, 27, 39, 23, 42, 26, 38, 22, //
];

/// Dither one luminance value at logical position (x, y).
///
/// `x` and `y` are the coordinates of the *source* pixel, so the pattern
/// stays anchored to the content when it is blitted at an offset.
#[inline]
pub fn dither_o8x8(x: usize, y: usize, v: u8) -> u8 {
    let t = div_255(v as u32 * ((LEVELS << QUANTUM_SHIFT) + 1));
    let level = t >> QUANTUM_SHIFT;
    let remainder = t - (level << QUANTUM_SHIFT);
    let threshold = O8X8[(x & 7) + 8 * (y & 7)] as u32;
    let q = (level + u32::from(remainder >= threshold)) * 17;
    q.min(255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_is_on_palette() {
        for v in 0..=255u8 {
            for y in 0..8 {
                for x in 0..8 {
                    let q = dither_o8x8(x, y, v);
                    assert_eq!(q % 17, 0, "v={} at ({}, {}) gave {}", v, x, y, q);
                }
            }
        }
    }

    #[test]
    fn test_extremes_are_fixed_points() {
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(dither_o8x8(x, y, 0), 0);
                assert_eq!(dither_o8x8(x, y, 255), 255);
            }
        }
    }

    #[test]
    fn test_palette_values_stay_within_one_level() {
        for level in 0..=15u8 {
            let v = level * 17;
            let mut exact = 0;
            for y in 0..8 {
                for x in 0..8 {
                    let q = dither_o8x8(x, y, v);
                    assert!(q == v || q == v + 17, "v={} gave {}", v, q);
                    if q == v {
                        exact += 1;
                    }
                }
            }
            // Only the lowest threshold cell may round up.
            assert!(exact >= 63, "v={} kept only {} cells", v, exact);
        }
    }

    #[test]
    fn test_pattern_repeats_every_eight_pixels() {
        for v in [30u8, 100, 200] {
            assert_eq!(dither_o8x8(3, 5, v), dither_o8x8(11, 13, v));
            assert_eq!(dither_o8x8(0, 0, v), dither_o8x8(64, 8, v));
        }
    }

    #[test]
    fn test_matrix_is_a_permutation() {
        let mut seen = [false; 65];
        for &t in O8X8.iter() {
            assert!(!seen[t as usize], "duplicate threshold {}", t);
            seen[t as usize] = true;
        }
        assert!(seen[1..].iter().all(|&s| s));
    }
}
