use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, thiserror::Error)]
pub enum ProductNameValidationError {
    #[error("Product cannot be empty")]
    EmptyOrWhitespace,
    #[error("Product must be shorter than 256 characters")]
    TooLong,
}

/// The product category a watch is scoped to, e.g. "perfume".
#[derive(Debug, Clone)]
pub struct ProductName(String);

impl ProductName {
    pub fn parse(s: String) -> Result<Self, ProductNameValidationError> {
        if s.trim().is_empty() {
            Err(ProductNameValidationError::EmptyOrWhitespace)
        } else if s.graphemes(true).count() > 256 {
            Err(ProductNameValidationError::TooLong)
        } else {
            Ok(Self(s))
        }
    }
}

impl AsRef<str> for ProductName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
