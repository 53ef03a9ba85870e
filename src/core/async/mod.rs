//! Asynchronous implementations of core components
//!
//! Thread-safe counterparts of the synchronous quote engine, built on DashMap
//! and shared through `Arc`:
//!
//! - **AsyncQuoteLedger**: concurrent quote storage with atomic duplicate checks
//! - **AsyncQuoteEngine**: prices and records quotes from any task
//! - **BatchProcessor**: partitions batches by quote ID and spawns tokio tasks
//!
//! The pricing context they read is immutable, so the ledger is the only
//! synchronized state.

pub mod batch_processor;
pub mod engine;
pub mod ledger;

pub use batch_processor::{BatchProcessor, ProcessingResult};
pub use engine::AsyncQuoteEngine;
pub use ledger::AsyncQuoteLedger;
