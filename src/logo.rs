//! Header logo state.
//!
//! The logo is either the bundled asset, a file the user picked (held as an
//! object URL), or the text placeholder. Object URLs pin their blob in memory
//! until revoked, so replacing an uploaded logo hands the old URL back to the
//! caller for revocation.

use serde::{Deserialize, Serialize};

use crate::config::PosterOptions;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "src")]
pub enum LogoSource {
    Bundled(String),
    Uploaded(String),
    Placeholder,
}

impl LogoSource {
    pub fn from_options(options: &PosterOptions) -> Self {
        match options.logo.as_deref() {
            Some(path) if !path.trim().is_empty() => Self::Bundled(path.to_string()),
            _ => Self::Placeholder,
        }
    }

    /// Image URL to render, if any.
    pub fn src(&self) -> Option<&str> {
        match self {
            Self::Bundled(src) | Self::Uploaded(src) => Some(src),
            Self::Placeholder => None,
        }
    }

    /// Object URL owned by this source, if it came from an upload.
    pub fn object_url(&self) -> Option<&str> {
        match self {
            Self::Uploaded(url) => Some(url),
            _ => None,
        }
    }
}

/// Current logo plus the source to fall back to on reset.
#[derive(Debug, Clone)]
pub struct LogoState {
    initial: LogoSource,
    current: LogoSource,
}

impl LogoState {
    pub fn new(initial: LogoSource) -> Self {
        Self {
            current: initial.clone(),
            initial,
        }
    }

    pub fn source(&self) -> &LogoSource {
        &self.current
    }

    /// Switch to an uploaded file. Returns the object URL it displaces, if any.
    pub fn upload(&mut self, object_url: String) -> Option<String> {
        let previous = std::mem::replace(&mut self.current, LogoSource::Uploaded(object_url));
        match previous {
            LogoSource::Uploaded(url) => Some(url),
            _ => None,
        }
    }

    /// Return to the configured source. Returns the displaced object URL, if any.
    pub fn reset(&mut self) -> Option<String> {
        let previous = std::mem::replace(&mut self.current, self.initial.clone());
        match previous {
            LogoSource::Uploaded(url) => Some(url),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_use_bundled_logo() {
        let source = LogoSource::from_options(&PosterOptions::default());
        assert_eq!(source, LogoSource::Bundled("nhs.jpeg".into()));
        assert_eq!(source.object_url(), None);
    }

    #[test]
    fn test_blank_logo_is_placeholder() {
        let options = PosterOptions {
            logo: Some("  ".into()),
            ..PosterOptions::default()
        };
        assert_eq!(LogoSource::from_options(&options), LogoSource::Placeholder);
    }

    #[test]
    fn test_first_upload_displaces_nothing() {
        let mut state = LogoState::new(LogoSource::Bundled("nhs.jpeg".into()));
        assert_eq!(state.upload("blob:1".into()), None);
        assert_eq!(state.source().src(), Some("blob:1"));
    }

    #[test]
    fn test_second_upload_returns_previous_url() {
        let mut state = LogoState::new(LogoSource::Placeholder);
        state.upload("blob:1".into());
        assert_eq!(state.upload("blob:2".into()).unwrap(), "blob:1");
        assert_eq!(state.source().object_url(), Some("blob:2"));
    }

    #[test]
    fn test_reset_restores_initial_and_releases_upload() {
        let mut state = LogoState::new(LogoSource::Placeholder);
        state.upload("blob:1".into());
        assert_eq!(state.reset().unwrap(), "blob:1");
        assert_eq!(state.source(), &LogoSource::Placeholder);
        assert_eq!(state.reset(), None);
    }
}
