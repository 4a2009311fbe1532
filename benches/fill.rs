//! Benchmarks for single-surface operators
//!
//! Run with: cargo bench --bench fill

use blitbuffer::{Color8, ColorRgb32, PixelFormat, Rect, Rotation};

mod support;

use support::{screen, SCREEN};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

const FORMATS: [PixelFormat; 5] = PixelFormat::ALL;

fn full_screen() -> Rect {
    Rect::sized(SCREEN.0, SCREEN.1)
}

// ============================================================================
// Fills
// ============================================================================

#[divan::bench(args = FORMATS)]
fn fill_screen(bencher: divan::Bencher, format: PixelFormat) {
    let mut bb = screen(format, Rotation::Upright);
    bencher.bench_local(|| {
        bb.fill(divan::black_box(0x80));
    });
}

/// Half-width rect: one fill per scanline instead of one bulk fill
#[divan::bench(args = FORMATS)]
fn fill_rect_half(bencher: divan::Bencher, format: PixelFormat) {
    let mut bb = screen(format, Rotation::Upright);
    let rect = Rect::new(SCREEN.0 / 4, 0, SCREEN.0 / 2, SCREEN.1);
    bencher.bench_local(|| {
        bb.fill_rect(rect, divan::black_box(0x40));
    });
}

#[divan::bench(args = Rotation::ALL)]
fn fill_rect_rotated(bencher: divan::Bencher, rotation: Rotation) {
    let mut bb = screen(PixelFormat::Gray8, rotation);
    let rect = Rect::new(10, 10, 500, 500);
    bencher.bench_local(|| {
        bb.fill_rect(rect, divan::black_box(0x40));
    });
}

// ============================================================================
// Blend / invert / hatch
// ============================================================================

#[divan::bench(args = FORMATS)]
fn blend_screen(bencher: divan::Bencher, format: PixelFormat) {
    let mut bb = screen(format, Rotation::Upright);
    let color = ColorRgb32::new(0x20, 0x40, 0x60, 0x80);
    bencher.bench_local(|| {
        bb.blend_rect_rgb32(full_screen(), divan::black_box(color));
    });
}

#[divan::bench(args = FORMATS)]
fn invert_screen(bencher: divan::Bencher, format: PixelFormat) {
    let mut bb = screen(format, Rotation::Upright);
    bencher.bench_local(|| {
        bb.invert_rect(divan::black_box(full_screen()));
    });
}

#[divan::bench(args = [1, 4, 16])]
fn hatch_screen(bencher: divan::Bencher, stripe: usize) {
    let mut bb = screen(PixelFormat::Gray8, Rotation::Upright);
    bencher.bench_local(|| {
        bb.hatch_rect(full_screen(), stripe, Color8(0), divan::black_box(0xA0));
    });
}

#[divan::bench(args = [8, 32, 128])]
fn rounded_corner(bencher: divan::Bencher, radius: usize) {
    let mut bb = screen(PixelFormat::Gray8, Rotation::Upright);
    let rect = Rect::new(100, 100, 600, 400);
    bencher.bench_local(|| {
        bb.paint_rounded_corner(rect, 4, divan::black_box(radius), 0);
    });
}
