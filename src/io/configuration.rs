//! Generation constants and runtime configuration defaults

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Default number of generated columns
pub const DEFAULT_WIDTH: usize = 32;

/// Default number of generated rows
pub const DEFAULT_HEIGHT: usize = 10;

/// Default number of solves attempted before giving up on contradictions
pub const DEFAULT_ATTEMPTS: usize = 1;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

/// Sample used when no sample file is given
pub const DEFAULT_SAMPLE: &str = "\
sscss
sclcc
sclcs
clllc
";

// Output settings
/// Side length in pixels of one cell in exported images
pub const CELL_PIXELS: u32 = 8;
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 40;
/// How many frames the final GIF frame lasts
pub const GIF_FINAL_FRAME_HOLD: u32 = 25;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
