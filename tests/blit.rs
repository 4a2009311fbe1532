//! Tests for the copying blits: blit_to, add_blit_from, invert_blit_from

mod common;

use blitbuffer::{BlitBuffer, BlitError, Color8, ColorRgb32, Pixel, PixelFormat, Rect, Rotation};
use common::{all_layouts, all_pairs, assert_outside_unchanged, colorful, ramp, snapshot, surface};

// ============================================================================
// blit_to
// ============================================================================

#[test]
fn test_blit_to_converts_every_pair() {
    for (dst_format, src_format) in all_pairs() {
        let src = colorful(6, 5, src_format);
        let mut dst = BlitBuffer::alloc(8, 8, dst_format);
        let before = snapshot(&dst);
        let rect = Rect::new(2, 3, 4, 3);
        src.blit_to(&mut dst, rect, 1, 2);

        for j in 0..rect.h {
            for i in 0..rect.w {
                let s = src.get_pixel(1 + i, 2 + j);
                let expected = with_format(dst_format, s);
                assert_eq!(
                    dst.get_pixel(rect.x + i, rect.y + j),
                    expected,
                    "{} <- {} at ({}, {})",
                    dst_format,
                    src_format,
                    i,
                    j
                );
            }
        }
        assert_outside_unchanged(&dst, &before, rect);
    }
}

/// What a surface of `format` reads back after storing `color`
fn with_format(format: PixelFormat, color: ColorRgb32) -> ColorRgb32 {
    let mut bb = BlitBuffer::alloc(1, 1, format);
    bb.set_pixel(0, 0, color);
    bb.get_pixel(0, 0)
}

#[test]
fn test_blit_between_rotations() {
    for (format, rotation) in all_layouts() {
        let src = ramp(5, 4, format);
        for dst_rotation in Rotation::ALL {
            let src = BlitBuffer::new(src.data(), 5, 4, format)
                .unwrap()
                .with_rotation(rotation);
            let mut dst = surface(9, 9, format, dst_rotation);
            let rect = Rect::new(3, 2, src.width(), src.height());
            src.blit_to(&mut dst, rect, 0, 0);

            for y in 0..src.height() {
                for x in 0..src.width() {
                    assert_eq!(
                        dst.get_pixel(3 + x, 2 + y),
                        src.get_pixel(x, y),
                        "{} {:?} -> {:?} at ({}, {})",
                        format,
                        rotation,
                        dst_rotation,
                        x,
                        y
                    );
                }
            }
        }
    }
}

#[test]
fn test_blit_with_padded_strides() {
    let src_data: Vec<u8> = (0..=255u8).collect();
    let src = BlitBuffer::with_pixel_stride(&src_data[..], 10, 16, 16, PixelFormat::Gray8)
        .unwrap();
    let mut dst_data = vec![0u8; 12 * 4];
    let mut dst =
        BlitBuffer::with_pixel_stride(&mut dst_data[..], 8, 4, 12, PixelFormat::Gray8).unwrap();
    src.blit_to(&mut dst, Rect::sized(8, 4), 2, 3);

    for y in 0..4 {
        for x in 0..8 {
            assert_eq!(dst.luminance(x, y), ((3 + y) * 16 + 2 + x) as u8);
        }
    }
    for row in dst_data.chunks(12) {
        assert_eq!(&row[8..], &[0, 0, 0, 0]);
    }
}

#[test]
fn test_empty_rect_is_noop() {
    let src = colorful(4, 4, PixelFormat::Rgb32);
    let mut dst = BlitBuffer::alloc(4, 4, PixelFormat::Gray8);
    src.blit_to(&mut dst, Rect::new(2, 2, 0, 3), 0, 0);
    src.dither_blit_to(&mut dst, Rect::new(2, 2, 3, 0), 0, 0);
    assert!(dst.data().iter().all(|&b| b == 0));
}

// ============================================================================
// add_blit_from
// ============================================================================

#[test]
fn test_add_blit_rejects_mixed_formats() {
    let src = BlitBuffer::alloc(4, 4, PixelFormat::Rgb24);
    let mut dst = BlitBuffer::alloc(4, 4, PixelFormat::Gray8);
    dst.fill(0x33);
    let err = dst
        .add_blit_from(&src, Rect::sized(4, 4), 0, 0, 0x80)
        .unwrap_err();
    assert_eq!(
        err,
        BlitError::IncompatibleFormats {
            op: "add_blit_from",
            dst: PixelFormat::Gray8,
            src: PixelFormat::Rgb24,
        }
    );
    assert!(dst.data().iter().all(|&b| b == 0x33));
}

#[test]
fn test_add_blit_alpha_levels() {
    for format in PixelFormat::ALL {
        let src = colorful(4, 4, format);
        let base = ramp(4, 4, format);

        let mut dst = ramp(4, 4, format);
        dst.add_blit_from(&src, Rect::sized(4, 4), 0, 0, 0).unwrap();
        assert_eq!(dst.data(), base.data(), "alpha 0: {}", format);

        let mut dst = ramp(4, 4, format);
        dst.add_blit_from(&src, Rect::new(1, 1, 2, 2), 2, 2, 0xFF)
            .unwrap();
        for (x, y) in [(1, 1), (2, 1), (1, 2), (2, 2)] {
            assert_eq!(
                dst.get_pixel(x, y),
                src.get_pixel(x + 1, y + 1),
                "alpha 255: {}",
                format
            );
        }
    }
}

#[test]
fn test_add_blit_blends_channels() {
    let mut src = BlitBuffer::alloc(1, 1, PixelFormat::Gray8);
    src.fill(0xFF);
    let mut dst = BlitBuffer::alloc(1, 1, PixelFormat::Gray8);
    dst.fill(0x00);
    dst.add_blit_from(&src, Rect::sized(1, 1), 0, 0, 0x40).unwrap();
    assert_eq!(dst.pixel::<Color8>(0, 0), Some(Color8(0x40)));
}

// ============================================================================
// invert_blit_from
// ============================================================================

#[test]
fn test_invert_blit_every_format() {
    for (format, rotation) in all_layouts() {
        let src = colorful(4, 3, format);
        let mut dst = surface(4, 3, format, rotation);
        dst.invert_blit_from(&src, Rect::sized(4, 3), 0, 0).unwrap();
        for y in 0..3 {
            for x in 0..4 {
                let s = with_pixel_inverted(&src, x, y);
                assert_eq!(dst.get_pixel(x, y), s, "{} {:?}", format, rotation);
            }
        }
    }
}

fn with_pixel_inverted(src: &BlitBuffer<Vec<u8>>, x: usize, y: usize) -> ColorRgb32 {
    let mut one = BlitBuffer::alloc(1, 1, src.format());
    src.blit_to(&mut one, Rect::sized(1, 1), x, y);
    one.invert_rect(Rect::sized(1, 1));
    one.get_pixel(0, 0)
}

#[test]
fn test_invert_blit_rejects_mixed_formats() {
    let src = BlitBuffer::alloc(2, 2, PixelFormat::Rgb32);
    let mut dst = BlitBuffer::alloc(2, 2, PixelFormat::Rgb24);
    assert!(matches!(
        dst.invert_blit_from(&src, Rect::sized(2, 2), 0, 0),
        Err(BlitError::IncompatibleFormats { .. })
    ));
}

#[test]
fn test_invert_blit_copies_alpha() {
    let mut src = BlitBuffer::alloc(1, 1, PixelFormat::Rgb32);
    src.set_pixel(0, 0, ColorRgb32::new(0, 0x0F, 0xF0, 0x77));
    let mut dst = BlitBuffer::alloc(1, 1, PixelFormat::Rgb32);
    dst.invert_blit_from(&src, Rect::sized(1, 1), 0, 0).unwrap();
    assert_eq!(
        dst.pixel::<ColorRgb32>(0, 0),
        Some(ColorRgb32::new(0xFF, 0xF0, 0x0F, 0x77))
    );
    assert_eq!(dst.pixel::<ColorRgb32>(0, 0).map(|p| p.alpha()), Some(0x77));
}
