use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

use crate::extract::Extractor;
use crate::recognizer::{OcrBackend, OcrError};
use crate::types::ExtractedRecord;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("OCR recognition failed: {0}")]
    Ocr(#[from] OcrError),
}

/// One captured listing, ready to be reviewed and stored by the caller.
#[derive(Debug, Clone, Serialize)]
pub struct ListingCapture {
    /// Raw OCR text output.
    pub ocr_text: String,
    pub record: ExtractedRecord,
    /// The price could not be read and was replaced by `"0"`.
    pub price_fell_back: bool,
    pub captured_at: NaiveDateTime,
}

impl ListingCapture {
    pub fn new(ocr_text: impl Into<String>, captured_at: NaiveDateTime) -> Self {
        let ocr_text = ocr_text.into();
        let listing = Extractor::extract_detailed(&ocr_text);

        if listing.price_fell_back {
            let raw = listing.lines.last().map(|l| l.raw.as_str()).unwrap_or_default();
            tracing::warn!(price_line = raw, "Unreadable listing price, using 0");
        }
        tracing::debug!(
            item_name = %listing.record.item_name,
            item_price = %listing.record.item_price,
            lines = listing.lines.len(),
            "Listing extracted"
        );

        Self {
            ocr_text,
            record: listing.record,
            price_fell_back: listing.price_fell_back,
            captured_at,
        }
    }

    /// Capture time rendered with a chrono `strftime` layout.
    pub fn date_stamp(&self, format: &str) -> String {
        self.captured_at.format(format).to_string()
    }
}

/// Orchestrates: read → OCR → extract → timestamp.
pub struct ListingPipeline<R: OcrBackend> {
    recognizer: R,
}

impl<R: OcrBackend> ListingPipeline<R> {
    pub fn new(recognizer: R) -> Self {
        Self { recognizer }
    }

    /// Process an image file on disk.
    pub async fn process_file(&self, path: &Path) -> Result<ListingCapture, PipelineError> {
        tracing::info!("Processing listing capture: {}", path.display());
        let bytes = tokio::fs::read(path).await?;
        self.process_bytes(&bytes)
    }

    /// Process raw image bytes (from a screen grab or file read).
    pub fn process_bytes(&self, data: &[u8]) -> Result<ListingCapture, PipelineError> {
        let ocr_text = self.recognizer.recognize(data)?;
        Ok(ListingCapture::new(ocr_text, Local::now().naive_local()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognizer::FixedRecognizer;
    use chrono::NaiveDate;

    struct Unreadable;

    impl OcrBackend for Unreadable {
        fn recognize(&self, _image_bytes: &[u8]) -> Result<String, OcrError> {
            Err(OcrError::ImageDecode("not an image".into()))
        }
    }

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap().and_hms_opt(12, 7, 0).unwrap()
    }

    #[test]
    fn capture_extracts_record() {
        let c = ListingCapture::new("Small\nHealth\nPotion\n50\n", noon());
        assert_eq!(c.record, ExtractedRecord::new("Small Health Potion", "50"));
        assert!(!c.price_fell_back);
        assert_eq!(c.captured_at, noon());
    }

    #[test]
    fn capture_flags_fallback_price() {
        let c = ListingCapture::new("Red Potion\n???", noon());
        assert_eq!(c.record.item_price, "0");
        assert!(c.price_fell_back);
    }

    #[test]
    fn date_stamp_uses_given_format() {
        let c = ListingCapture::new("", noon());
        assert_eq!(c.date_stamp(nosmarket_core::DEFAULT_DATE_FORMAT), "05-03-2024 12:07");
        assert_eq!(c.date_stamp("%Y-%m-%d"), "2024-03-05");
    }

    #[test]
    fn capture_serializes_to_json() {
        let c = ListingCapture::new("Red Potion\n5000", noon());
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["record"]["item_name"], "Red Potion");
        assert_eq!(json["record"]["item_price"], "5000");
        assert_eq!(json["price_fell_back"], false);
    }

    #[test]
    fn process_bytes_runs_recognizer_and_extractor() {
        let pipeline =
            ListingPipeline::new(FixedRecognizer::from_fragments(["Ho1y Water", "1,2OO"]));
        let c = pipeline.process_bytes(b"png bytes").unwrap();
        assert_eq!(c.ocr_text, "Ho1y Water\n1,2OO\n");
        assert_eq!(c.record.into_pair(), ("Holy Water".into(), "1200".into()));
    }

    #[test]
    fn process_bytes_propagates_ocr_errors() {
        let pipeline = ListingPipeline::new(Unreadable);
        assert!(matches!(pipeline.process_bytes(b""), Err(PipelineError::Ocr(_))));
    }

    #[tokio::test]
    async fn process_file_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listing.png");
        tokio::fs::write(&path, b"fake image").await.unwrap();

        let pipeline = ListingPipeline::new(FixedRecognizer::new("Red Potion\n000"));
        let c = pipeline.process_file(&path).await.unwrap();
        assert_eq!(c.record.item_price, "1000");
    }

    #[tokio::test]
    async fn process_file_missing_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = ListingPipeline::new(FixedRecognizer::new("irrelevant"));
        let err = pipeline.process_file(&dir.path().join("gone.png")).await.unwrap_err();
        assert!(matches!(err, PipelineError::Io(_)));
    }
}
