//! Error types for the duty-free pricing engine
//!
//! This module defines all error types that can occur while loading reference
//! data and pricing quotes. Errors are designed to be descriptive and
//! user-friendly for CLI output.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: File not found, permission denied, etc.
//! - **Data Errors**: Malformed CSV rows, catalog JSON or refund schedules
//! - **Configuration Errors**: Unknown store or promotion requested by a caller
//! - **Quote Errors**: Invalid amounts, duplicate quote IDs
//!
//! The pricing pipeline itself never fails; data-quality problems found while
//! pricing are reported as [`crate::types::PricingAnomaly`] values instead.

use thiserror::Error;

/// Main error type for the pricing engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// File not found at the specified path
    ///
    /// This is a fatal error that prevents processing from starting.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    ///
    /// This is a recoverable error for quote input - the malformed record is
    /// skipped and processing continues with the next record.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Discount catalog could not be decoded or is inconsistent
    #[error("Invalid discount catalog: {message}")]
    CatalogFormat {
        /// Description of the problem
        message: String,
    },

    /// Refund schedule ranges are not ascending, contiguous and closed
    #[error("Invalid refund schedule: {message}")]
    InvalidSchedule {
        /// Description of the problem
        message: String,
    },

    /// Requested store is not in the catalog
    ///
    /// A wrong store name is a caller error; pricing never silently falls
    /// back to an empty rule set.
    #[error("Store '{store}' not found in discount catalog")]
    StoreNotFound {
        /// The store name that was requested
        store: String,
    },

    /// Requested promotion is not offered by the store
    #[error("Discount '{discount}' is not offered by store '{store}'")]
    DiscountNotFound {
        /// Store whose catalog entry was searched
        store: String,
        /// The promotion name that was requested
        discount: String,
    },

    /// Invalid amount value (negative or malformed)
    #[error("Invalid amount '{amount}' for quote {quote}")]
    InvalidAmount {
        /// The invalid amount string
        amount: String,
        /// Quote ID
        quote: u32,
    },

    /// Duplicate quote ID encountered
    ///
    /// Quote IDs must be unique. The first quote with an ID wins, later
    /// duplicates are rejected.
    #[error("Duplicate quote ID {quote}")]
    DuplicateQuote {
        /// Quote ID that is duplicated
        quote: u32,
    },
}

// Conversion from io::Error to PricingError
impl From<std::io::Error> for PricingError {
    fn from(error: std::io::Error) -> Self {
        PricingError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to PricingError
impl From<csv::Error> for PricingError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        PricingError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Conversion from serde_json::Error to PricingError
impl From<serde_json::Error> for PricingError {
    fn from(error: serde_json::Error) -> Self {
        PricingError::CatalogFormat {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl PricingError {
    /// Create a FileNotFound error
    pub fn file_not_found(path: &str) -> Self {
        PricingError::FileNotFound {
            path: path.to_string(),
        }
    }

    /// Create a CatalogFormat error
    pub fn catalog_format(message: impl Into<String>) -> Self {
        PricingError::CatalogFormat {
            message: message.into(),
        }
    }

    /// Create an InvalidSchedule error
    pub fn invalid_schedule(message: impl Into<String>) -> Self {
        PricingError::InvalidSchedule {
            message: message.into(),
        }
    }

    /// Create a StoreNotFound error
    pub fn store_not_found(store: &str) -> Self {
        PricingError::StoreNotFound {
            store: store.to_string(),
        }
    }

    /// Create a DiscountNotFound error
    pub fn discount_not_found(store: &str, discount: &str) -> Self {
        PricingError::DiscountNotFound {
            store: store.to_string(),
            discount: discount.to_string(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: &str, quote: u32) -> Self {
        PricingError::InvalidAmount {
            amount: amount.to_string(),
            quote,
        }
    }

    /// Create a DuplicateQuote error
    pub fn duplicate_quote(quote: u32) -> Self {
        PricingError::DuplicateQuote { quote }
    }
}
