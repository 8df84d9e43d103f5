//! Processing pipeline components.

mod coordinator;
mod processor;

pub use coordinator::{RunSummary, classify_batch, collect_input_files, is_image_file};
pub use processor::{load_image, process_file};
