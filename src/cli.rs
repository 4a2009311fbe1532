//! Command-line argument parsing for `bbrender`
//!
//! Supports:
//! - Rendering one or more scene files
//! - Rendering every scene in a directory
//! - Overriding the canvas format and rotation of every scene

use clap::Parser;
use std::path::PathBuf;

use crate::format::PixelFormat;
use crate::rotation::Rotation;
use crate::scene::SceneOverrides;

/// Render BlitBuffer scene files to PNG
#[derive(Parser, Debug)]
#[command(name = "bbrender", version, about = "Render BlitBuffer scene files to PNG")]
pub struct CliArgs {
    /// Scene files (.yaml, .yml or .json)
    #[arg(value_name = "SCENES")]
    pub scenes: Vec<PathBuf>,

    /// Render every scene in the scenes directory
    #[arg(short, long)]
    pub all: bool,

    /// Directory searched by --all
    #[arg(long, value_name = "DIR", default_value = "samples/scenes")]
    pub scenes_dir: PathBuf,

    /// Directory for output PNG files
    #[arg(short, long, value_name = "DIR", default_value = "samples/output")]
    pub out_dir: PathBuf,

    /// Override the canvas pixel format of every scene
    #[arg(long, value_parser = parse_format)]
    pub format: Option<PixelFormat>,

    /// Override the canvas rotation (quarter turns, 0-3)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=3))]
    pub rotation: Option<u8>,

    /// Also write debug logs to DIR/bbrender.log
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

fn parse_format(name: &str) -> Result<PixelFormat, String> {
    PixelFormat::from_name(name).ok_or_else(|| {
        let names: Vec<_> = PixelFormat::ALL.iter().map(|f| f.name()).collect();
        format!("unknown format '{}' (expected one of {})", name, names.join(", "))
    })
}

/// Where scenes come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneSource {
    Files(Vec<PathBuf>),
    Directory(PathBuf),
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub source: SceneSource,
    pub out_dir: PathBuf,
    pub overrides: SceneOverrides,
    pub log_dir: Option<PathBuf>,
}

impl CliArgs {
    /// Convert parsed CLI args into a render configuration
    pub fn into_config(self) -> Result<RenderConfig, String> {
        let source = match (self.all, self.scenes.is_empty()) {
            (true, true) => SceneSource::Directory(self.scenes_dir),
            (false, false) => SceneSource::Files(self.scenes),
            (true, false) => return Err("--all cannot be combined with scene files".to_string()),
            (false, true) => return Err("specify scene files or --all".to_string()),
        };

        Ok(RenderConfig {
            source,
            out_dir: self.out_dir,
            overrides: SceneOverrides {
                format: self.format,
                rotation: self.rotation.map(Rotation::from_quarter_turns),
            },
            log_dir: self.log_dir,
        })
    }
}
