//! Tests for error display and context enrichment

#[cfg(test)]
mod tests {
    use ndarray::Array2;
    use simpletiled::AlgorithmError;
    use simpletiled::io::error::{
        ContradictionReport, ErrorContext, WithContext, invalid_parameter, invalid_sample,
    };
    use simpletiled::spatial::tiles::{Direction, Tile};
    use std::error::Error;
    use std::path::PathBuf;

    fn contradiction() -> AlgorithmError {
        AlgorithmError::Contradiction(Box::new(ContradictionReport {
            row: 2,
            col: 5,
            direction: Direction::Left,
            tile: Tile::Coast,
            iteration: 0,
            snapshot: Array2::default((3, 6)),
        }))
    }

    #[test]
    fn test_contradiction_display_names_direction_and_value() {
        let message = contradiction().to_string();
        assert!(message.contains("row 2"));
        assert!(message.contains("column 5"));
        assert!(message.contains("LEFT"));
        assert!(message.contains("COAST"));
    }

    #[test]
    fn test_is_contradiction() {
        assert!(contradiction().is_contradiction());
        assert!(!invalid_sample(&"ragged").is_contradiction());
        assert!(
            !AlgorithmError::EmptySuperposition {
                operation: "collapse"
            }
            .is_contradiction()
        );
    }

    #[test]
    fn test_iteration_context() {
        let result: Result<(), AlgorithmError> = Err(contradiction());
        match result.with_iteration(12) {
            Err(AlgorithmError::Contradiction(report)) => assert_eq!(report.iteration, 12),
            other => unreachable!("Expected Contradiction, got {other:?}"),
        }
    }

    // Line context fills in where a symbol was found
    #[test]
    fn test_line_context() {
        let result: Result<(), AlgorithmError> = Err(AlgorithmError::UnrecognizedSymbol {
            symbol: '#',
            line: 0,
            column: 4,
        });
        let enriched = result.with_context(ErrorContext {
            line: Some(3),
            ..Default::default()
        });
        match enriched {
            Err(error @ AlgorithmError::UnrecognizedSymbol { .. }) => {
                assert_eq!(
                    error.to_string(),
                    "Unrecognized symbol '#' at line 3, column 4"
                );
            }
            other => unreachable!("Expected UnrecognizedSymbol, got {other:?}"),
        }
    }

    // Context leaves unrelated errors alone
    #[test]
    fn test_context_ignores_other_errors() {
        let result: Result<(), AlgorithmError> = Err(invalid_sample(&"empty"));
        let enriched = result.with_iteration(5);
        assert!(matches!(
            enriched,
            Err(AlgorithmError::InvalidSampleData { ref reason }) if reason == "empty"
        ));
    }

    #[test]
    fn test_io_error_conversion_keeps_source() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let error: AlgorithmError = io_error.into();
        assert!(matches!(error, AlgorithmError::FileSystem { .. }));
        assert!(error.source().is_some());

        let explicit = AlgorithmError::FileSystem {
            path: PathBuf::from("sample.txt"),
            operation: "read sample",
            source: std::io::Error::other("denied"),
        };
        assert!(explicit.to_string().contains("sample.txt"));
    }

    #[test]
    fn test_invalid_parameter_display() {
        let error = invalid_parameter("width", &0, &"must be positive");
        assert_eq!(
            error.to_string(),
            "Invalid parameter 'width' = '0': must be positive"
        );
        assert!(error.source().is_none());
    }
}
