//! PNG export of generated and sample grids

use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::spatial::tiles::Tile;
use image::{Rgba, RgbaImage};
use ndarray::Array2;
use std::path::Path;

/// Paint a grid of RGBA colors with `scale` pixels per cell
pub fn paint_cells(colors: &Array2<[u8; 4]>, scale: u32) -> RgbaImage {
    let scale = scale.max(1);
    let (rows, cols) = colors.dim();
    let mut img = RgbaImage::new(cols as u32 * scale, rows as u32 * scale);

    for ((row, col), &color) in colors.indexed_iter() {
        for dy in 0..scale {
            for dx in 0..scale {
                img.put_pixel(col as u32 * scale + dx, row as u32 * scale + dy, Rgba(color));
            }
        }
    }

    img
}

/// Create the parent directory of `path` if it does not exist
///
/// # Errors
///
/// Returns [`AlgorithmError::FileSystem`] if the directory cannot be created
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }
    Ok(())
}

/// Export a resolved grid as a PNG image
///
/// # Errors
///
/// Returns an error if:
/// - The grid has no cells
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_tiles_as_png(tiles: &Array2<Tile>, output_path: &Path, scale: u32) -> Result<()> {
    if tiles.is_empty() {
        return Err(invalid_parameter(
            "tiles",
            &format!("{:?}", tiles.dim()),
            &"cannot export an empty grid",
        ));
    }

    let img = paint_cells(&tiles.mapv(Tile::color), scale);

    ensure_parent_dir(output_path)?;
    img.save(output_path)
        .map_err(|e| AlgorithmError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
