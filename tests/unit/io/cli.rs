//! Tests for argument parsing and the generation pipeline

#[cfg(test)]
mod tests {
    use clap::Parser;
    use simpletiled::AlgorithmError;
    use simpletiled::algorithm::propagation::PropagationMode;
    use simpletiled::analysis::patterns::SampleGrid;
    use simpletiled::io::cli::{Cli, Generator};
    use simpletiled::io::configuration::{DEFAULT_HEIGHT, DEFAULT_SEED, DEFAULT_WIDTH};
    use simpletiled::io::render::TextStyle;
    use std::fs;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("simpletiled").chain(args.iter().copied()))
            .expect("Arguments should parse")
    }

    /// Every tile pair occurs in every direction, so solves never contradict
    fn permissive_sample() -> String {
        let sequence: Vec<char> = "sscslcclls".chars().collect();
        let len = sequence.len();
        (0..len)
            .map(|row| {
                (0..len)
                    .filter_map(|col| sequence.get((row + col) % len))
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_defaults() {
        let args = cli(&[]);
        assert_eq!(args.seed, DEFAULT_SEED);
        assert_eq!(args.width, DEFAULT_WIDTH);
        assert_eq!(args.height, DEFAULT_HEIGHT);
        assert!(args.sample.is_none());
        assert!(args.should_show_progress());
        assert_eq!(args.text_style(), TextStyle::Ansi);
        assert_eq!(args.solver_config().mode, PropagationMode::SingleHop);
    }

    #[test]
    fn test_flags() {
        let args = cli(&[
            "map.txt", "-s", "7", "-w", "5", "-H", "3", "-c", "-q", "--no-color",
        ]);
        assert_eq!(args.sample.as_deref(), Some(std::path::Path::new("map.txt")));
        assert!(!args.should_show_progress());
        assert_eq!(args.text_style(), TextStyle::Plain);

        let config = args.solver_config();
        assert_eq!((config.width, config.height), (5, 3));
        assert_eq!(config.mode, PropagationMode::Cascade);
    }

    // Attempts walk forward from the base seed
    #[test]
    fn test_attempt_seed() {
        let args = cli(&["-s", "10"]);
        assert_eq!(args.attempt_seed(0), 10);
        assert_eq!(args.attempt_seed(3), 13);

        let wrapping = cli(&["-s", &u64::MAX.to_string()]);
        assert_eq!(wrapping.attempt_seed(1), 0);
    }

    #[test]
    fn test_load_builtin_sample() {
        let generator = Generator::new(cli(&["-q"]));
        let sample = generator.load_sample().expect("Built-in sample must parse");
        assert_eq!((sample.rows(), sample.cols()), (4, 5));
    }

    #[test]
    fn test_generate_from_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let sample_path = temp_dir.path().join("sample.txt");
        fs::write(&sample_path, permissive_sample()).expect("Failed to write sample");
        let path = sample_path.to_string_lossy().to_string();

        let mut generator = Generator::new(cli(&[&path, "-q", "-w", "6", "-H", "4"]));
        let model = generator.load_sample().expect("Valid sample").learn();
        let generation = generator.generate(&model).expect("Permissive rules cannot contradict");

        assert_eq!(generation.tiles.dim(), (4, 6));
        assert_eq!(generation.attempts, 1);
        assert_eq!(generation.seed, DEFAULT_SEED);
        assert!(generation.visualization.is_none());
    }

    // Every attempt contradicts, so the last contradiction is returned
    #[test]
    fn test_generate_exhausts_attempts() {
        // Nothing may follow land to the right, so wide maps always dead-end
        let model = SampleGrid::parse("sc\ncl").expect("Valid sample").learn();
        let mut generator = Generator::new(cli(&["-q", "-c", "-w", "8", "-H", "8", "-a", "3"]));

        match generator.generate(&model) {
            Err(error) => assert!(error.is_contradiction(), "Unexpected error: {error}"),
            Ok(_) => unreachable!("Expected every attempt to contradict"),
        }
    }

    #[test]
    fn test_zero_attempts_is_rejected() {
        let model = SampleGrid::parse(&permissive_sample())
            .expect("Valid sample")
            .learn();
        let mut generator = Generator::new(cli(&["-q", "-a", "0"]));
        assert!(matches!(
            generator.generate(&model),
            Err(AlgorithmError::InvalidParameter {
                parameter: "attempts",
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_size_is_rejected() {
        let model = SampleGrid::parse(&permissive_sample())
            .expect("Valid sample")
            .learn();
        let mut generator = Generator::new(cli(&["-q", "-w", "0"]));
        assert!(generator.generate(&model).is_err());
    }

    // The whole pipeline writes both requested images
    #[test]
    fn test_process_exports_images() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let sample_path = temp_dir.path().join("sample.txt");
        fs::write(&sample_path, permissive_sample()).expect("Failed to write sample");
        let png = temp_dir.path().join("out").join("map.png");
        let gif = temp_dir.path().join("out").join("solve.gif");

        let mut generator = Generator::new(cli(&[
            &sample_path.to_string_lossy(),
            "-q",
            "--no-color",
            "-r",
            "-w",
            "4",
            "-H",
            "3",
            "-o",
            &png.to_string_lossy(),
            "-v",
            &gif.to_string_lossy(),
        ]));
        generator.process().expect("Pipeline should succeed");

        assert!(png.exists());
        assert!(gif.exists());
    }

    #[test]
    fn test_missing_sample_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let missing = temp_dir.path().join("absent.txt");
        let mut generator = Generator::new(cli(&[&missing.to_string_lossy(), "-q"]));
        assert!(matches!(
            generator.process(),
            Err(AlgorithmError::FileSystem { .. })
        ));
    }
}
