//! Data model shared by the formatter and its hosts

mod answer;
mod formatted;

pub use answer::{Citation, GeneratedAnswer};
pub use formatted::{ContentSection, FormattedContent, Importance, SectionType, StructuredData};
