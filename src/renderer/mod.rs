pub mod output_writer;
pub mod page_template;

pub use output_writer::{ConversionProgress, ConversionReport, OutputWriter, PageInfo};
pub use page_template::{derive_title, format_size, render_index, render_page, IndexEntry};
