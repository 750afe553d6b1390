//! Observability for TurboCommerce storefront pages.
//!
//! This crate provides:
//! - `StructuredLogger` - Structured logging with page and component context
//! - `LogSink` - Where formatted entries go (browser console, stderr, memory)

mod logging;
mod sink;

pub use logging::*;
pub use sink::*;
