//! End-to-end integration tests
//!
//! These tests validate the complete quoting pipeline using predefined CSV
//! fixtures. Each test:
//! 1. Reads input.csv from a fixture directory
//! 2. Prices every quote against the bundled catalog and refund schedule
//! 3. Generates output CSV
//! 4. Compares actual output with expected.csv
//!
//! Test fixtures are located in tests/fixtures/ and cover:
//! - Basic pricing with and without promotions, including a domestic price
//!   too small to compare against
//! - Every store's promotions, including capped and tiered rules
//! - Reward overwrite order when several voucher rules are chosen
//! - Refund bracket boundaries, rounding and zero amounts
//! - Rejected quotes (unknown store or promotion, bad amounts, duplicates)
//!
//! Each test is run twice: once with the synchronous strategy and once with
//! the async strategy.

#[cfg(test)]
mod tests {
    use dutyfree_pricing::cli::StrategyType;
    use dutyfree_pricing::strategy::{create_strategy, BatchConfig};
    use dutyfree_pricing::PricingConfig;
    use rstest::rstest;
    use std::fs;
    use std::io::Write;
    use std::path::Path;
    use std::sync::Arc;
    use tempfile::NamedTempFile;

    const RATE_NOTICE: &str = "2025年01月01日 09:00，10000韩元=50人民币";

    /// Run a fixture by processing input.csv and comparing with expected.csv
    fn run_test_fixture(fixture_name: &str, strategy_type: StrategyType, config: Option<BatchConfig>) {
        let fixture_dir = format!("tests/fixtures/{}", fixture_name);
        let input_path = format!("{}/input.csv", fixture_dir);
        let expected_path = format!("{}/expected.csv", fixture_dir);

        assert!(
            Path::new(&input_path).exists(),
            "Input file not found: {}",
            input_path
        );
        assert!(
            Path::new(&expected_path).exists(),
            "Expected file not found: {}",
            expected_path
        );

        let context = PricingConfig {
            rate: Some(RATE_NOTICE.to_string()),
            ..PricingConfig::default()
        }
        .load()
        .unwrap_or_else(|e| panic!("Failed to load bundled data: {}", e));
        let strategy = create_strategy(strategy_type, config, Arc::new(context));

        let mut temp_output = NamedTempFile::new().expect("Failed to create temp file");
        strategy
            .process(Path::new(&input_path), &mut temp_output)
            .unwrap_or_else(|e| panic!("Failed to process quotes: {}", e));
        temp_output.flush().expect("Failed to flush temp file");

        let actual_output = fs::read_to_string(temp_output.path())
            .unwrap_or_else(|e| panic!("Failed to read temp output file: {}", e));
        let expected_output = fs::read_to_string(&expected_path)
            .unwrap_or_else(|e| panic!("Failed to read expected file {}: {}", expected_path, e));

        assert_eq!(
            actual_output, expected_output,
            "\n\nOutput mismatch for fixture: {} (strategy: {:?})\n\nActual output:\n{}\n\nExpected output:\n{}\n",
            fixture_name, strategy_type, actual_output, expected_output
        );
    }

    #[rstest]
    #[case("basic_pricing")]
    #[case("store_promotions")]
    #[case("last_voucher_wins")]
    #[case("boundary_values")]
    #[case("rejected_quotes")]
    fn test_fixtures(
        #[case] fixture: &str,
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        run_test_fixture(fixture, strategy, None);
    }

    /// Tiny batches spread duplicates and reused IDs over several batches
    #[rstest]
    #[case("store_promotions")]
    #[case("rejected_quotes")]
    fn test_fixtures_small_batches(#[case] fixture: &str) {
        run_test_fixture(fixture, StrategyType::Async, Some(BatchConfig::new(2, 2)));
    }
}
