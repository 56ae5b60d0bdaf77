//! Tests for configuration defaults and limits

#[cfg(test)]
mod tests {
    use simpletiled::analysis::patterns::SampleGrid;
    use simpletiled::io::configuration::{
        CELL_PIXELS, DEFAULT_ATTEMPTS, DEFAULT_HEIGHT, DEFAULT_SAMPLE, DEFAULT_WIDTH,
        GIF_FINAL_FRAME_HOLD, GIF_FRAME_DELAY_MS, MAX_GRID_DIMENSION,
    };
    use simpletiled::spatial::tiles::Tile;

    // Verifies the default dimensions fit inside the safety limit
    #[test]
    fn test_defaults_within_limits() {
        assert!(DEFAULT_WIDTH > 0 && DEFAULT_WIDTH <= MAX_GRID_DIMENSION);
        assert!(DEFAULT_HEIGHT > 0 && DEFAULT_HEIGHT <= MAX_GRID_DIMENSION);
        assert!(DEFAULT_ATTEMPTS >= 1);
    }

    #[test]
    fn test_output_settings_are_positive() {
        assert!(CELL_PIXELS > 0);
        assert!(GIF_FRAME_DELAY_MS > 0);
        assert!(GIF_FINAL_FRAME_HOLD > 0);
    }

    // The built-in sample uses the whole alphabet
    #[test]
    fn test_default_sample_is_valid() {
        let model = SampleGrid::parse(DEFAULT_SAMPLE)
            .expect("Built-in sample must parse")
            .learn();
        for tile in Tile::ALL {
            assert!(model.weights.weight(tile) > 0, "{tile} never occurs");
        }
        assert!(!model.rules.is_empty());
    }
}
