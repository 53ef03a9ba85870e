//! Runtime configuration
//!
//! `PricingConfig` says where the reference data comes from; `load` turns it
//! into the immutable [`PricingContext`] every engine shares. Omitted paths
//! fall back to the data bundled with the crate.

use crate::core::{ExchangeRate, PricingContext, RefundOverflow};
use crate::io::config_loader::{
    builtin_catalog, builtin_refund_schedule, read_catalog, read_refund_schedule_file,
};
use crate::types::PricingError;
use std::path::PathBuf;
use tracing::{info, warn};

pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// Sources of the pricing reference data
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PricingConfig {
    /// Catalog JSON file, `None` for the bundled catalog
    pub catalog: Option<PathBuf>,

    /// Refund schedule CSV file, `None` for the bundled schedule
    pub refund_schedule: Option<PathBuf>,

    pub refund_overflow: RefundOverflow,

    /// Raw exchange rate, a number or a rate notice string
    pub rate: Option<String>,
}

impl PricingConfig {
    /// Load the catalog and schedule and resolve the exchange rate
    ///
    /// # Errors
    ///
    /// Any failure to read or validate the catalog or the schedule. An
    /// unparseable rate is not an error: it is logged and yuan figures are
    /// left out.
    pub fn load(&self) -> Result<PricingContext, PricingError> {
        let catalog = match &self.catalog {
            Some(path) => read_catalog(path)?,
            None => builtin_catalog()?,
        };
        info!(
            stores = catalog.stores().len(),
            version = catalog.version().unwrap_or("unversioned"),
            "discount catalog loaded"
        );

        let schedule = match &self.refund_schedule {
            Some(path) => read_refund_schedule_file(path, self.refund_overflow)?,
            None => builtin_refund_schedule(self.refund_overflow)?,
        };
        info!(
            brackets = schedule.brackets().len(),
            overflow = ?schedule.overflow(),
            "refund schedule loaded"
        );

        Ok(PricingContext::new(catalog, schedule, self.exchange_rate()))
    }

    /// Parsed exchange rate, `None` when absent or unparseable
    pub fn exchange_rate(&self) -> Option<ExchangeRate> {
        let raw = self.rate.as_deref()?;
        let rate = ExchangeRate::parse(raw);
        if rate.is_none() {
            warn!(rate = raw, "unparseable exchange rate, yuan figures disabled");
        }
        rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_loads_bundled_data() {
        let context = PricingConfig::default().load().unwrap();

        assert_eq!(context.catalog().stores().len(), 7);
        assert_eq!(context.schedule().overflow(), RefundOverflow::ClampToLast);
        assert_eq!(context.rate(), None);
    }

    #[test]
    fn test_rate_notice_is_parsed() {
        let config = PricingConfig {
            rate: Some("2025年01月01日，10000韩元=50.34人民币".to_string()),
            ..PricingConfig::default()
        };

        let rate = config.exchange_rate().map(|rate| rate.yuan_per_10000_won());

        assert_eq!(rate, Some(Decimal::new(5034, 2)));
    }

    #[test]
    fn test_unparseable_rate_is_dropped() {
        let config = PricingConfig {
            rate: Some("暂无汇率".to_string()),
            ..PricingConfig::default()
        };
        assert_eq!(config.load().unwrap().rate(), None);
    }

    #[test]
    fn test_custom_schedule_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "lower,upper,refund\n30000,99999,2500\n").unwrap();
        let config = PricingConfig {
            refund_schedule: Some(file.path().to_path_buf()),
            refund_overflow: RefundOverflow::Zero,
            ..PricingConfig::default()
        };

        let context = config.load().unwrap();

        assert_eq!(context.schedule().lookup(Decimal::from(50_000)), Decimal::from(2_500));
        assert_eq!(context.schedule().lookup(Decimal::from(100_000)), Decimal::ZERO);
    }

    #[test]
    fn test_missing_catalog_file_is_fatal() {
        let config = PricingConfig {
            catalog: Some(PathBuf::from("missing/catalog.json")),
            ..PricingConfig::default()
        };
        assert!(matches!(
            config.load(),
            Err(PricingError::FileNotFound { .. })
        ));
    }
}
