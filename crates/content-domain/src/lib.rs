// content-domain library entry point
pub mod content_type;
pub mod error;
pub mod metrics;
pub mod summary;
pub use content_type::ContentType;
pub use error::DomainError;
pub use metrics::{difficulty, is_word_separator, reading_time, trim_content, word_count, Difficulty};
pub use summary::{summarize, summary_seed};
