use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Image decode error: {0}")]
    ImageDecode(String),
    #[error("OCR engine error: {0}")]
    Engine(String),
    #[error("Tesseract not available: build with `tesseract` feature")]
    NotAvailable,
}

/// Something that turns the bytes of a captured listing image into text, one
/// recognized line per text line.
pub trait OcrBackend: Send + Sync {
    fn recognize(&self, image_bytes: &[u8]) -> Result<String, OcrError>;
}

impl<T: OcrBackend + ?Sized> OcrBackend for Box<T> {
    fn recognize(&self, image_bytes: &[u8]) -> Result<String, OcrError> {
        (**self).recognize(image_bytes)
    }
}

/// Join engine results that come back as separate fragments into one text block.
/// Each fragment becomes its own newline-terminated line.
pub fn join_fragments<I, S>(fragments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    fragments.into_iter().fold(String::new(), |mut text, fragment| {
        text.push_str(fragment.as_ref());
        text.push('\n');
        text
    })
}

// ── Fixed backend (always available, used for tests and replays) ──────────────

/// Returns the same text for every image.
pub struct FixedRecognizer {
    pub text: String,
}

impl FixedRecognizer {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn from_fragments<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self { text: join_fragments(fragments) }
    }
}

impl OcrBackend for FixedRecognizer {
    fn recognize(&self, _image_bytes: &[u8]) -> Result<String, OcrError> {
        Ok(self.text.clone())
    }
}

// ── Tesseract backend (optional, gated behind `tesseract` feature) ─────────────

#[cfg(feature = "tesseract")]
pub mod tesseract_backend {
    use super::{OcrBackend, OcrError};
    use leptess::LepTess;
    use nosmarket_core::OcrSettings;

    pub struct TesseractRecognizer {
        data_path: Option<String>,
        lang: String,
    }

    impl TesseractRecognizer {
        pub fn new(data_path: Option<String>, lang: &str) -> Self {
            Self { data_path, lang: lang.to_string() }
        }

        pub fn from_settings(settings: &OcrSettings) -> Self {
            Self::new(settings.data_path.clone(), &settings.lang)
        }
    }

    impl OcrBackend for TesseractRecognizer {
        fn recognize(&self, image_bytes: &[u8]) -> Result<String, OcrError> {
            let mut lt = LepTess::new(self.data_path.as_deref(), &self.lang)
                .map_err(|e| OcrError::Engine(e.to_string()))?;
            lt.set_image_from_mem(image_bytes)
                .map_err(|e| OcrError::ImageDecode(e.to_string()))?;
            lt.get_utf8_text().map_err(|e| OcrError::Engine(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl OcrBackend for Broken {
        fn recognize(&self, _image_bytes: &[u8]) -> Result<String, OcrError> {
            Err(OcrError::Engine("no model loaded".into()))
        }
    }

    #[test]
    fn fixed_returns_preset_text() {
        let r = FixedRecognizer::new("Red Potion\n5000");
        assert_eq!(r.recognize(b"fake image data").unwrap(), "Red Potion\n5000");
        assert_eq!(r.recognize(b"").unwrap(), "Red Potion\n5000");
    }

    #[test]
    fn fragments_are_newline_terminated() {
        assert_eq!(join_fragments(["Red Potion", "5000"]), "Red Potion\n5000\n");
        assert_eq!(join_fragments(Vec::<String>::new()), "");
        let r = FixedRecognizer::from_fragments(vec!["Holy".to_string(), "Water".to_string()]);
        assert_eq!(r.text, "Holy\nWater\n");
    }

    #[test]
    fn boxed_backend_delegates() {
        let boxed: Box<dyn OcrBackend> = Box::new(FixedRecognizer::new("50"));
        assert_eq!(boxed.recognize(b"").unwrap(), "50");

        let broken: Box<dyn OcrBackend> = Box::new(Broken);
        assert!(matches!(broken.recognize(b""), Err(OcrError::Engine(_))));
    }

    #[test]
    fn not_available_message_names_the_feature() {
        assert!(OcrError::NotAvailable.to_string().contains("tesseract"));
    }
}
