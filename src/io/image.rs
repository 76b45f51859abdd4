//! PNG preview export of a composition's density cells

use std::path::Path;

use image::{ImageBuffer, Rgb as Pixel, RgbImage};

use crate::{
    algorithm::executor::Composition,
    io::error::{FoldfieldError, Result, invalid_parameter},
    palette::{Palette, colors::Rgb},
};

/// Share of the text colour blended over the background at each level
pub const LEVEL_BLEND: [f64; 4] = [0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0];

/// Colour of a cell at a density level
pub fn cell_color(palette: &Palette, level: u8, accent: bool) -> Rgb {
    if level == 0 {
        return palette.background;
    }
    if accent {
        return palette.accent;
    }
    let blend = LEVEL_BLEND
        .get(level as usize)
        .copied()
        .unwrap_or(1.0);
    palette.background.blend(palette.text, blend)
}

/// Render the density cells onto a background-filled raster
///
/// Cells are placed by the layout scaled from reference space to the output
/// size. Overlapping cells are painted in row-major order.
pub fn render_preview(composition: &Composition, width: u32, height: u32) -> RgbImage {
    let palette = &composition.palette;
    let background = Pixel(palette.background.channels());
    let mut img: RgbImage = ImageBuffer::from_pixel(width, height, background);

    let scaled = composition
        .layout
        .scaled(&composition.reference, width, height);
    let density = &composition.density;

    for row in 0..composition.layout.rows {
        for col in 0..composition.layout.cols {
            let level = density.level(col, row);
            if level == 0 {
                continue;
            }
            let color = Pixel(cell_color(palette, level, density.is_accent(col, row)).channels());

            let rect = scaled.cell_rect(col, row);
            let x0 = rect.x.round().max(0.0) as u32;
            let y0 = rect.y.round().max(0.0) as u32;
            let x1 = ((rect.x + rect.width).round().max(0.0) as u32).min(width);
            let y1 = ((rect.y + rect.height).round().max(0.0) as u32).min(height);

            for y in y0..y1 {
                for x in x0..x1 {
                    img.put_pixel(x, y, color);
                }
            }
        }
    }

    img
}

/// Render and save a preview PNG
///
/// # Errors
///
/// Returns an error if:
/// - Either output dimension is zero
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_preview_png(
    composition: &Composition,
    width: u32,
    height: u32,
    output_path: &Path,
) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(invalid_parameter(
            "output size",
            &format!("{width}x{height}"),
            &"both dimensions must be positive",
        ));
    }

    let img = render_preview(composition, width, height);

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| FoldfieldError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| FoldfieldError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    log::debug!("wrote preview {}", output_path.display());
    Ok(())
}
