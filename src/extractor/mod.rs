pub mod content_extractor;

pub use content_extractor::{ContentExtractor, ExtractedContent};
