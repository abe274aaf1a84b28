use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, thiserror::Error)]
pub enum BrandNameValidationError {
    #[error("Brand cannot be empty")]
    EmptyOrWhitespace,
    #[error("Brand must be shorter than 256 characters")]
    TooLong,
}

/// The brand whose competitors are being watched, e.g. "Dior".
#[derive(Debug, Clone)]
pub struct BrandName(String);

impl BrandName {
    pub fn parse(s: String) -> Result<Self, BrandNameValidationError> {
        if s.trim().is_empty() {
            Err(BrandNameValidationError::EmptyOrWhitespace)
        } else if s.graphemes(true).count() > 256 {
            Err(BrandNameValidationError::TooLong)
        } else {
            Ok(Self(s))
        }
    }
}

impl AsRef<str> for BrandName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
