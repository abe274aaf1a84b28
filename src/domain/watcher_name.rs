use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, thiserror::Error)]
pub enum WatcherNameValidationError {
    #[error("Name cannot be empty")]
    EmptyOrWhitespace,
    #[error("Name must be shorter than 256 characters")]
    TooLong,
    #[error("Name may not contain any of the following characters: /()\"<>\\{{}}")]
    ForbiddenCharacters,
}

/// The recipient's name, as rendered into the digest email greeting.
#[derive(Debug, Clone)]
pub struct WatcherName(String);

impl WatcherName {
    pub fn parse(s: String) -> Result<Self, WatcherNameValidationError> {
        let forbidden_chars = ['/', '(', ')', '"', '<', '>', '\\', '{', '}'];

        if s.trim().is_empty() {
            Err(WatcherNameValidationError::EmptyOrWhitespace)
        } else if s.graphemes(true).count() > 256 {
            Err(WatcherNameValidationError::TooLong)
        } else if s.chars().any(|c| forbidden_chars.contains(&c)) {
            Err(WatcherNameValidationError::ForbiddenCharacters)
        } else {
            Ok(Self(s))
        }
    }
}

impl AsRef<str> for WatcherName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
