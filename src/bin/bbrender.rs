//! Scene renderer for BlitBuffer
//!
//! Renders YAML/JSON scene definitions to PNG files.
//!
//! Usage:
//!   cargo run --bin bbrender -- samples/scenes/badge.yaml
//!   cargo run --bin bbrender -- --all
//!   cargo run --bin bbrender -- --all --format rgb565 --rotation 1 --out-dir /tmp/out

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use blitbuffer::cli::{CliArgs, RenderConfig, SceneSource};
use blitbuffer::scene::{self, Scene};
use blitbuffer::{export, BlitBuffer};

// ---------------------------------------------------------------------------
// Scene collection
// ---------------------------------------------------------------------------

fn collect_scenes(source: &SceneSource) -> Result<Vec<(PathBuf, Scene)>> {
    let mut scenes = Vec::new();

    match source {
        SceneSource::Files(paths) => {
            for path in paths {
                let scene = Scene::load(path)
                    .with_context(|| format!("loading scene {}", path.display()))?;
                scenes.push((path.clone(), scene));
            }
        }
        SceneSource::Directory(dir) => {
            if !dir.exists() {
                anyhow::bail!("scenes directory does not exist: {}", dir.display());
            }
            let mut entries: Vec<_> = std::fs::read_dir(dir)
                .with_context(|| format!("reading scenes dir {}", dir.display()))?
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| scene::is_scene_file(p))
                .collect();
            entries.sort();

            for path in entries {
                match Scene::load(&path) {
                    Ok(scene) => scenes.push((path, scene)),
                    Err(e) => eprintln!("Warning: skipping {}: {}", path.display(), e),
                }
            }

            if scenes.is_empty() {
                anyhow::bail!("no scene files found in {}", dir.display());
            }
        }
    }

    Ok(scenes)
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

fn save_png(surface: &BlitBuffer<Vec<u8>>, path: &Path) -> Result<()> {
    let img = export::to_image(surface).context("failed to create image buffer")?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }

    img.save(path)
        .with_context(|| format!("saving PNG to {}", path.display()))?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let args = CliArgs::parse();
    let config: RenderConfig = args.into_config().map_err(anyhow::Error::msg)?;
    blitbuffer::tracing::init(config.log_dir.as_deref());

    let scenes = collect_scenes(&config.source)?;

    eprintln!(
        "Rendering {} scene(s) → {}",
        scenes.len(),
        config.out_dir.display()
    );

    for (path, mut scene) in scenes {
        scene.apply_overrides(&config.overrides);
        eprint!("  {} ({}, rotation {}) ...", scene.name, scene.format, scene.rotation.quarter_turns());

        let surface = scene
            .render()
            .with_context(|| format!("rendering {}", path.display()))?;

        let out_path = config.out_dir.join(format!("{}.png", scene.name));
        save_png(&surface, &out_path)?;
        tracing::debug!(scene = %scene.name, out = %out_path.display(), "saved");
        eprintln!(" saved {}", out_path.display());
    }

    eprintln!("Done!");
    Ok(())
}
