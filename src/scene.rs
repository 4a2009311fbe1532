//! Scene files
//!
//! A scene is a declarative render job: a canvas description plus a list of
//! compositing operations applied in order. Scenes are stored as YAML or
//! JSON, chosen by file extension. `bbrender` turns them into PNGs; tests use
//! them to drive whole operator pipelines.
//!
//! ```yaml
//! name: badge
//! width: 200
//! height: 120
//! format: rgb24
//! ops:
//!   - op: fill_rect
//!     rect: [10, 10, 50, 50]
//!     value: 0
//!   - op: blit
//!     at: [20, 20]
//!     mode: alpha
//!     layer:
//!       width: 64
//!       height: 64
//!       format: gray8a
//!       pattern: { kind: gradient, from: { r: 0, g: 0, b: 0 }, to: { r: 255, g: 255, b: 255, alpha: 0 } }
//! ```
//!
//! Rectangles are `[x, y, w, h]` in the canvas's logical space and are
//! clipped to the canvas before an operator runs.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::buffer::BlitBuffer;
use crate::color::{div_255, Color8, Color8A, ColorRgb32, Pixel};
use crate::error::BlitError;
use crate::format::PixelFormat;
use crate::geometry::Rect;
use crate::rotation::Rotation;

/// Errors from loading or rendering a scene
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML in {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported scene file {} (expected .yaml, .yml or .json)", .0.display())]
    UnknownExtension(PathBuf),

    #[error("scene op #{index} ({op}) failed: {source}")]
    Render {
        index: usize,
        op: &'static str,
        #[source]
        source: BlitError,
    },
}

// ============================================================================
// Schema
// ============================================================================

/// A render job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub name: String,
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    #[serde(default = "default_format")]
    pub format: PixelFormat,
    #[serde(default)]
    pub rotation: Rotation,
    /// Gray value the canvas is cleared to before the first op
    #[serde(default = "default_background")]
    pub background: u8,
    #[serde(default)]
    pub ops: Vec<SceneOp>,
}

fn default_width() -> usize {
    600
}
fn default_height() -> usize {
    800
}
fn default_format() -> PixelFormat {
    PixelFormat::Gray8
}
fn default_background() -> u8 {
    0xFF
}
fn opaque() -> u8 {
    0xFF
}

/// One compositing step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SceneOp {
    Fill {
        value: u8,
    },
    FillRect {
        rect: Rect,
        value: u8,
    },
    FillRectRgb {
        rect: Rect,
        color: ColorRgb32,
    },
    BlendRect {
        rect: Rect,
        color: Color8A,
    },
    BlendRectRgb {
        rect: Rect,
        color: ColorRgb32,
    },
    /// Multiply by `color`, blended in with the color's alpha
    MultiplyRect {
        rect: Rect,
        color: ColorRgb32,
    },
    InvertRect {
        rect: Rect,
    },
    HatchRect {
        rect: Rect,
        stripe: usize,
        value: u8,
        #[serde(default = "opaque")]
        alpha: u8,
    },
    RoundedCorner {
        rect: Rect,
        border: usize,
        radius: usize,
        value: u8,
        /// Blend arc edges by coverage instead of stepping them
        #[serde(default)]
        anti_aliasing: bool,
    },
    /// Composite a generated layer onto the canvas with its top-left corner
    /// at `at`.
    Blit {
        layer: Layer,
        #[serde(default)]
        at: [usize; 2],
        #[serde(default)]
        mode: BlitMode,
        /// Uniform alpha for `add`
        #[serde(default = "opaque")]
        alpha: u8,
        /// Paint color for `color` and `color_rgb`
        #[serde(default = "black")]
        color: ColorRgb32,
    },
}

fn black() -> ColorRgb32 {
    ColorRgb32::BLACK
}

/// Which blit operator composites a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlitMode {
    #[default]
    Copy,
    Dither,
    Add,
    Alpha,
    DitherAlpha,
    Pmul,
    DitherPmul,
    Invert,
    /// Layer luminance or alpha as a mask for the gray of `color`
    Color,
    ColorRgb,
}

/// A generated source surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub width: usize,
    pub height: usize,
    #[serde(default = "default_format")]
    pub format: PixelFormat,
    #[serde(default)]
    pub rotation: Rotation,
    pub pattern: Pattern,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Pattern {
    Solid {
        color: ColorRgb32,
    },
    /// Linear ramp across the layer, alpha included
    Gradient {
        from: ColorRgb32,
        to: ColorRgb32,
        #[serde(default)]
        vertical: bool,
    },
    Checker {
        size: usize,
        a: ColorRgb32,
        b: ColorRgb32,
    },
}

/// Command-line overrides applied on top of a loaded scene
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneOverrides {
    pub format: Option<PixelFormat>,
    pub rotation: Option<Rotation>,
}

// ============================================================================
// Loading
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Encoding {
    Yaml,
    Json,
}

fn encoding_for(path: &Path) -> Result<Encoding, SceneError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml" | "yml") => Ok(Encoding::Yaml),
        Some("json") => Ok(Encoding::Json),
        _ => Err(SceneError::UnknownExtension(path.to_path_buf())),
    }
}

/// True if `path` has an extension [`Scene::load`] understands
pub fn is_scene_file(path: &Path) -> bool {
    encoding_for(path).is_ok()
}

impl Scene {
    /// Load a scene, picking the parser from the file extension.
    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let encoding = encoding_for(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let scene: Scene = match encoding {
            Encoding::Yaml => {
                serde_yaml::from_str(&content).map_err(|source| SceneError::Yaml {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            Encoding::Json => {
                serde_json::from_str(&content).map_err(|source| SceneError::Json {
                    path: path.to_path_buf(),
                    source,
                })?
            }
        };

        tracing::info!(
            "Loaded scene '{}' ({} ops) from {}",
            scene.name,
            scene.ops.len(),
            path.display()
        );
        Ok(scene)
    }

    /// Write the scene back out in the encoding its extension names.
    pub fn save(&self, path: &Path) -> Result<(), SceneError> {
        let content = match encoding_for(path)? {
            Encoding::Yaml => serde_yaml::to_string(self).map_err(|source| SceneError::Yaml {
                path: path.to_path_buf(),
                source,
            })?,
            Encoding::Json => {
                serde_json::to_string_pretty(self).map_err(|source| SceneError::Json {
                    path: path.to_path_buf(),
                    source,
                })?
            }
        };

        std::fs::write(path, content).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!("Saved scene '{}' to {}", self.name, path.display());
        Ok(())
    }

    pub fn apply_overrides(&mut self, overrides: &SceneOverrides) {
        if let Some(format) = overrides.format {
            self.format = format;
        }
        if let Some(rotation) = overrides.rotation {
            self.rotation = rotation;
        }
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Render into a freshly allocated canvas.
    ///
    /// `width` and `height` are the logical size; the native buffer is
    /// allocated transposed for odd rotations.
    pub fn render(&self) -> Result<BlitBuffer<Vec<u8>>, SceneError> {
        let _span = tracing::debug_span!("render", scene = %self.name).entered();
        let mut canvas = alloc_logical(self.width, self.height, self.format, self.rotation);
        // Opaque background; `fill` would keep the zeroed alpha
        let background = ColorRgb32::gray(self.background);
        let bounds = canvas.bounds();
        with_pixel!(self.format, |P| {
            let pixel = P::from_rgb32(background);
            canvas.map_physical::<P>(bounds, |_| pixel)
        });

        for (index, op) in self.ops.iter().enumerate() {
            tracing::debug!(index, op = op.name(), "applying");
            op.apply(&mut canvas).map_err(|source| SceneError::Render {
                index,
                op: op.name(),
                source,
            })?;
        }
        Ok(canvas)
    }
}

fn alloc_logical(
    width: usize,
    height: usize,
    format: PixelFormat,
    rotation: Rotation,
) -> BlitBuffer<Vec<u8>> {
    let (native_w, native_h) = rotation.logical_size(width, height);
    BlitBuffer::alloc(native_w, native_h, format).with_rotation(rotation)
}

impl SceneOp {
    pub fn name(&self) -> &'static str {
        match self {
            SceneOp::Fill { .. } => "fill",
            SceneOp::FillRect { .. } => "fill_rect",
            SceneOp::FillRectRgb { .. } => "fill_rect_rgb",
            SceneOp::BlendRect { .. } => "blend_rect",
            SceneOp::BlendRectRgb { .. } => "blend_rect_rgb",
            SceneOp::MultiplyRect { .. } => "multiply_rect",
            SceneOp::InvertRect { .. } => "invert_rect",
            SceneOp::HatchRect { .. } => "hatch_rect",
            SceneOp::RoundedCorner { .. } => "rounded_corner",
            SceneOp::Blit { .. } => "blit",
        }
    }

    /// Run this op against `canvas`, clipping its geometry first.
    ///
    /// Rectangles whose far edge overflows `usize` are rejected with
    /// [`BlitError::InvalidRect`].
    pub fn apply(&self, canvas: &mut BlitBuffer<Vec<u8>>) -> Result<(), BlitError> {
        let bounds = canvas.bounds();
        let op = self.name();
        let checked = |rect: &Rect| {
            if rect.is_addressable() {
                Ok(*rect)
            } else {
                Err(BlitError::InvalidRect { op, rect: *rect })
            }
        };
        let clip = |rect: &Rect| checked(rect).map(|r| r.intersect(&bounds).unwrap_or_default());

        match self {
            SceneOp::Fill { value } => canvas.fill(*value),
            SceneOp::FillRect { rect, value } => canvas.fill_rect(clip(rect)?, *value),
            SceneOp::FillRectRgb { rect, color } => canvas.fill_rect_rgb32(clip(rect)?, *color)?,
            SceneOp::BlendRect { rect, color } => canvas.blend_rect(clip(rect)?, *color),
            SceneOp::BlendRectRgb { rect, color } => canvas.blend_rect_rgb32(clip(rect)?, *color),
            SceneOp::MultiplyRect { rect, color } => {
                canvas.multiply_rect_rgb32(clip(rect)?, *color)
            }
            SceneOp::InvertRect { rect } => canvas.invert_rect(clip(rect)?),
            SceneOp::HatchRect {
                rect,
                stripe,
                value,
                alpha,
            } => canvas.hatch_rect(clip(rect)?, *stripe, Color8(*value), *alpha),
            // Corner painting clamps every write itself
            SceneOp::RoundedCorner {
                rect,
                border,
                radius,
                value,
                anti_aliasing,
            } => {
                let rect = checked(rect)?;
                if *anti_aliasing {
                    canvas.paint_rounded_corner_antialiased(rect, *border, *radius, *value)
                } else {
                    canvas.paint_rounded_corner(rect, *border, *radius, *value)
                }
            }
            SceneOp::Blit {
                layer,
                at,
                mode,
                alpha,
                color,
            } => {
                let placed = checked(&Rect::new(at[0], at[1], layer.width, layer.height))?;
                let Some(rect) = placed.intersect(&bounds) else {
                    return Ok(());
                };
                let src = layer.render();
                // Clipping the left/top edge shifts the source origin too
                let (sx, sy) = (rect.x - placed.x, rect.y - placed.y);
                blit(canvas, &src, rect, sx, sy, *mode, *alpha, *color)?;
            }
        }
        Ok(())
    }
}

#[allow(clippy::too_many_arguments)]
fn blit(
    canvas: &mut BlitBuffer<Vec<u8>>,
    src: &BlitBuffer<Vec<u8>>,
    rect: Rect,
    sx: usize,
    sy: usize,
    mode: BlitMode,
    alpha: u8,
    color: ColorRgb32,
) -> Result<(), BlitError> {
    match mode {
        BlitMode::Copy => src.blit_to(canvas, rect, sx, sy),
        BlitMode::Dither => src.dither_blit_to(canvas, rect, sx, sy),
        BlitMode::Add => canvas.add_blit_from(src, rect, sx, sy, alpha)?,
        BlitMode::Alpha => canvas.alpha_blit_from(src, rect, sx, sy)?,
        BlitMode::DitherAlpha => canvas.dither_alpha_blit_from(src, rect, sx, sy)?,
        BlitMode::Pmul => canvas.pmulalpha_blit_from(src, rect, sx, sy)?,
        BlitMode::DitherPmul => canvas.dither_pmulalpha_blit_from(src, rect, sx, sy)?,
        BlitMode::Invert => canvas.invert_blit_from(src, rect, sx, sy)?,
        BlitMode::Color => canvas.color_blit_from(
            src,
            rect,
            sx,
            sy,
            Color8A::new(color.luminance(), color.alpha),
        ),
        BlitMode::ColorRgb => canvas.color_blit_from_rgb32(src, rect, sx, sy, color),
    }
    Ok(())
}

impl Layer {
    /// Generate the layer's pixels.
    pub fn render(&self) -> BlitBuffer<Vec<u8>> {
        let mut bb = alloc_logical(self.width, self.height, self.format, self.rotation);
        for y in 0..self.height {
            for x in 0..self.width {
                bb.set_pixel(x, y, self.pattern.color_at(x, y, self.width, self.height));
            }
        }
        bb
    }
}

impl Pattern {
    fn color_at(&self, x: usize, y: usize, width: usize, height: usize) -> ColorRgb32 {
        match *self {
            Pattern::Solid { color } => color,
            Pattern::Gradient { from, to, vertical } => {
                let (pos, len) = if vertical { (y, height) } else { (x, width) };
                let t = if len > 1 {
                    (pos * 0xFF / (len - 1)) as u32
                } else {
                    0
                };
                let lerp = |a: u8, b: u8| div_255(a as u32 * (0xFF - t) + b as u32 * t) as u8;
                ColorRgb32::new(
                    lerp(from.r, to.r),
                    lerp(from.g, to.g),
                    lerp(from.b, to.b),
                    lerp(from.alpha, to.alpha),
                )
            }
            Pattern::Checker { size, a, b } => {
                let size = size.max(1);
                if (x / size + y / size) % 2 == 0 {
                    a
                } else {
                    b
                }
            }
        }
    }
}
