//! Format dispatch
//!
//! Operators are generic over [`Pixel`](crate::color::Pixel); these macros
//! turn a runtime [`PixelFormat`](crate::format::PixelFormat) tag into the
//! matching concrete type so the generic body is monomorphized per format.

/// Bind `$P` to the pixel type of `$format` and evaluate `$body`.
///
/// ```ignore
/// with_pixel!(surface.format(), |P| surface.map_physical::<P>(rect, |p| p.inverted()))
/// ```
macro_rules! with_pixel {
    ($format:expr, |$P:ident| $body:expr) => {
        match $format {
            $crate::format::PixelFormat::Gray8 => {
                type $P = $crate::color::Color8;
                $body
            }
            $crate::format::PixelFormat::Gray8A => {
                type $P = $crate::color::Color8A;
                $body
            }
            $crate::format::PixelFormat::Rgb565 => {
                type $P = $crate::color::ColorRgb16;
                $body
            }
            $crate::format::PixelFormat::Rgb24 => {
                type $P = $crate::color::ColorRgb24;
                $body
            }
            $crate::format::PixelFormat::Rgb32 => {
                type $P = $crate::color::ColorRgb32;
                $body
            }
        }
    };
}
