use {serde::Deserialize, validator::validate_email};

/// The address a trend digest is delivered to.
#[derive(Clone, Debug, Deserialize)]
pub struct WatcherEmail(String);

impl WatcherEmail {
    pub fn parse(s: String) -> Option<Self> {
        if validate_email(&s) {
            Some(Self(s))
        } else {
            None
        }
    }
}

impl AsRef<str> for WatcherEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WatcherEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
