// The render driver: config -> seed -> generations -> canvas -> file

use crate::canvas::{count_pixels, render_triangles, stage, stage_image, StagedFile};
use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::generation::{expand_with, Generation};
use crate::geometry::{equilateral_triangle, Triangle};

use image::RgbImage;
use serde::Serialize;

use std::path::{Path, PathBuf};

/// What a finished render produced
#[derive(Clone, Debug, PartialEq)]
pub struct RenderSummary {
    /// Number of triangles in the final generation
    pub triangles: usize,
    /// Depth of the final generation
    pub depth: u32,
    /// Pixels painted with the fill colour
    pub filled_pixels: usize,
    /// Where the image was written
    pub output: PathBuf,
}

/// The seed triangle described by `config`
pub fn seed_triangle(config: &RenderConfig) -> Triangle {
    equilateral_triangle(config.side, config.offset_x, config.offset_y)
}

/// Validate `config` and run every subdivision round
///
/// `on_generation` is called after each round with the new generation, which
/// is how the CLI drives its progress bar.
pub fn build_generation<F>(
    config: &RenderConfig,
    on_generation: F,
) -> Result<Generation, RenderError>
where
    F: FnMut(&Generation),
{
    config.validate()?;

    Ok(expand_with(
        seed_triangle(config),
        config.iterations,
        config.parallel,
        on_generation,
    ))
}

/// Render the fractal described by `config` into memory
pub fn render_image<F>(
    config: &RenderConfig,
    on_generation: F,
) -> Result<(RgbImage, Generation), RenderError>
where
    F: FnMut(&Generation),
{
    let generation = build_generation(config, on_generation)?;
    let img = render_triangles(
        generation.triangles(),
        config.width,
        config.height,
        config.background,
        config.fill,
    );
    Ok((img, generation))
}

/// Render the fractal described by `config` and write it to `config.output`
///
/// Nothing is drawn if the config is invalid. The image and the optional
/// triangle dump are both fully written to temporary files before either is
/// renamed into place, so a failure in either leaves no new output behind.
pub fn render_to_file<F>(
    config: &RenderConfig,
    on_generation: F,
) -> Result<RenderSummary, RenderError>
where
    F: FnMut(&Generation),
{
    let (img, generation) = render_image(config, on_generation)?;

    let image_file = stage_image(&img, &config.output)?;
    let dump_file = config
        .dump_triangles
        .as_deref()
        .map(|path| stage_triangles_json(&generation, path))
        .transpose()?;

    image_file.commit()?;
    if let Some(dump) = dump_file {
        dump.commit()?;
    }

    Ok(RenderSummary {
        triangles: generation.len(),
        depth: generation.depth(),
        filled_pixels: count_pixels(&img, config.fill),
        output: config.output.clone(),
    })
}

/// Serialize a generation as JSON into a staged file
///
/// Layout: `{ "depth": n, "triangles": [{ "p1": {"x", "y"}, ... }, ...] }`
pub fn stage_triangles_json(
    generation: &Generation,
    path: &Path,
) -> Result<StagedFile, RenderError> {
    #[derive(Serialize)]
    struct Dump<'a> {
        depth: u32,
        triangles: &'a [Triangle],
    }

    stage(path, |writer| {
        serde_json::to_writer(
            writer,
            &Dump {
                depth: generation.depth(),
                triangles: generation.triangles(),
            },
        )?;
        Ok(())
    })
}

/// Write a generation as JSON to `path`, replacing it atomically
pub fn write_triangles_json(generation: &Generation, path: &Path) -> Result<(), RenderError> {
    stage_triangles_json(generation, path)?.commit()
}
