//! Frame capture and GIF generation for solver visualization

use crate::algorithm::bitset::Superposition;
use crate::io::configuration::GIF_FINAL_FRAME_HOLD;
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::io::image::{ensure_parent_dir, paint_cells};
use crate::io::render::superposition_color;
use image::{Delay, Frame};
use ndarray::Array2;
use std::path::Path;

/// Captures the superposition grid after each solver iteration
///
/// Frames are stored as cell colors so memory stays proportional to the grid,
/// not to the exported image size.
#[derive(Debug, Default)]
pub struct VisualizationCapture {
    pub(crate) frames: Vec<Array2<[u8; 4]>>,
}

impl VisualizationCapture {
    /// Create an empty capture
    pub const fn new() -> Self {
        Self { frames: Vec::new() }
    }

    /// Record the current superpositions as one frame
    pub fn record(&mut self, superpositions: &Array2<Superposition>) {
        self.frames.push(superpositions.map(superposition_color));
    }

    /// Number of captured frames
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Export the captured frames as an animated GIF
    ///
    /// The last frame is held for [`GIF_FINAL_FRAME_HOLD`] frame delays.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No frames were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32, scale: u32) -> Result<()> {
        let Some(last) = self.frames.last() else {
            return Err(invalid_parameter(
                "frames",
                &0,
                &"no frames captured for visualization",
            ));
        };

        let delay = Delay::from_numer_denom_ms(frame_delay_ms, 1);
        let mut frames: Vec<Frame> = self
            .frames
            .iter()
            .map(|colors| Frame::from_parts(paint_cells(colors, scale), 0, 0, delay))
            .collect();
        frames.push(Frame::from_parts(
            paint_cells(last, scale),
            0,
            0,
            Delay::from_numer_denom_ms(frame_delay_ms.saturating_mul(GIF_FINAL_FRAME_HOLD), 1),
        ));

        ensure_parent_dir(output_path)?;
        let file = std::fs::File::create(output_path).map_err(|e| AlgorithmError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| AlgorithmError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }
}
