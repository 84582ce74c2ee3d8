// Import our geometry types
use crate::error::RenderError;
use crate::geometry::{is_collinear, Point, Triangle};

// Image types from the image crate
// Rgb = Red, Green, Blue (no alpha: every triangle is fully opaque)
// RgbImage = 2D image with RGB pixels
use image::{ImageFormat, Rgb, RgbImage};

// Drawing functions from imageproc
use imageproc::drawing::draw_polygon_mut;
use imageproc::point::Point as PixelPoint;

// Atomic file replacement
use tempfile::NamedTempFile;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// A blank canvas filled with the background colour
pub fn blank_canvas(width: u32, height: u32, background: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb(background))
}

/// Fill one triangle as a solid polygon
///
/// Returns `false` if the triangle collapsed to a line once snapped to pixels
/// and was skipped. That only happens once triangles shrink to about a pixel,
/// far beyond the default iteration count.
pub fn fill_triangle(img: &mut RgbImage, triangle: &Triangle, color: [u8; 3]) -> bool {
    let pixels = triangle.vertices().map(Point::to_pixel);

    // Snapped coordinates are small integers, so the f64 cross product is exact
    let snapped = pixels.map(|(x, y)| Point::new(x as f64, y as f64));
    if is_collinear(&snapped) {
        return false;
    }

    // Convert our vertices to imageproc's Point type
    let points: Vec<PixelPoint<i32>> = pixels
        .iter()
        .map(|&(x, y)| PixelPoint::new(x, y))
        .collect();

    draw_polygon_mut(img, &points, Rgb(color));
    true
}

/// Draw a whole generation onto a fresh canvas
///
/// The triangles of a generation never overlap, so drawing order does not
/// change the result.
pub fn render_triangles(
    triangles: &[Triangle],
    width: u32,
    height: u32,
    background: [u8; 3],
    fill: [u8; 3],
) -> RgbImage {
    let mut img = blank_canvas(width, height, background);

    for triangle in triangles {
        fill_triangle(&mut img, triangle, fill);
    }

    img
}

/// Count pixels that exactly match `color`
pub fn count_pixels(img: &RgbImage, color: [u8; 3]) -> usize {
    img.pixels().filter(|p| p.0 == color).count()
}

/// A fully written file waiting to be renamed onto its destination
///
/// Dropping it without `commit` deletes the temporary file.
pub struct StagedFile {
    tmp: NamedTempFile,
    dest: PathBuf,
}

impl StagedFile {
    /// Atomically move the staged file to its destination
    pub fn commit(self) -> Result<(), RenderError> {
        self.tmp.persist(&self.dest).map_err(|e| e.error)?;
        Ok(())
    }
}

/// Write a file next to `path` without touching `path` itself
///
/// The temporary file lives in the destination directory so the final rename
/// never crosses filesystems. It gets the permissions a plain `File::create`
/// would give (0o666 minus the umask), or the existing destination's
/// permissions when overwriting.
pub fn stage<F>(path: &Path, write: F) -> Result<StagedFile, RenderError>
where
    F: FnOnce(&mut BufWriter<&File>) -> Result<(), RenderError>,
{
    // `Path::new("out.png").parent()` is `Some("")`, which means "here"
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let tmp = builder.tempfile_in(dir)?;

    if let Ok(existing) = fs::metadata(path) {
        tmp.as_file().set_permissions(existing.permissions())?;
    }

    {
        let mut writer = BufWriter::new(tmp.as_file());
        write(&mut writer)?;
        writer.flush()?;
    }

    Ok(StagedFile {
        tmp,
        dest: path.to_path_buf(),
    })
}

/// Encode the canvas into a staged file; the format follows the extension
///
/// # Errors
/// - `RenderError::Image` for an unknown extension or an encoding failure
/// - `RenderError::Io` if the temporary file cannot be created
pub fn stage_image(img: &RgbImage, path: &Path) -> Result<StagedFile, RenderError> {
    let format = ImageFormat::from_path(path)?;
    stage(path, |writer| Ok(img.write_to(writer, format)?))
}

/// Save the canvas to `path`, or leave nothing behind on failure
pub fn save_atomic(img: &RgbImage, path: &Path) -> Result<(), RenderError> {
    stage_image(img, path)?.commit()
}
