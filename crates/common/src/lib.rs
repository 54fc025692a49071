//! AnswerForge Common Library
//!
//! The answer formatting engine and the shared code around it:
//! - Data model for generated answers and formatted content
//! - Formatting engine (segmentation, scoring, citations, rendering, extraction)
//! - Error types and handling
//! - Configuration management
//! - Metrics and observability

pub mod config;
pub mod errors;
pub mod formatting;
pub mod metrics;
pub mod models;

// Re-export commonly used types
pub use crate::config::AppConfig;
pub use crate::errors::{AppError, Result};
pub use crate::formatting::{AnswerFormatOptions, AnswerFormatOptionsUpdate, AnswerFormatter};
pub use crate::models::{Citation, ContentSection, FormattedContent, GeneratedAnswer};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
