pub mod confusion;
pub mod density;
pub mod extract;
pub mod pipeline;
pub mod recognizer;
pub mod types;

pub use confusion::{correct_name, correct_price, PRICE_CONFUSIONS};
pub use density::digit_ratio;
pub use extract::{classify, read_price, split_lines, Extractor};
pub use pipeline::{ListingCapture, ListingPipeline, PipelineError};
pub use recognizer::{join_fragments, FixedRecognizer, OcrBackend, OcrError};
pub use types::{ClassifiedLine, ExtractedListing, ExtractedRecord, LineRole, PriceReading};

#[cfg(feature = "tesseract")]
pub use recognizer::tesseract_backend::TesseractRecognizer;
