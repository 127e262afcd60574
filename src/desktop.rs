//! Best-effort hooks into the desktop: clipboard and system browser.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard write failed: {0}")]
    Write(String),
}

pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The OS clipboard. A fresh handle per write; some platforms drop the
/// connection when idle.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        clipboard
            .set_text(text.to_owned())
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }
}

/// Copy `text`, returning whether the copy landed. Failures are logged
/// and otherwise swallowed.
pub fn copy_text(clipboard: &mut dyn Clipboard, text: &str) -> bool {
    match clipboard.set_text(text) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Copy failed: {e}");
            false
        }
    }
}

/// Open `url` in the default browser.
pub fn open_link(url: &str) {
    tracing::info!("Opening {url}");
    if let Err(e) = open::that_detached(url) {
        tracing::warn!("Could not open {url}: {e}");
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;

    /// Records what was copied; optionally refuses like a headless session.
    #[derive(Debug, Default)]
    pub struct FakeClipboard {
        pub contents: Option<String>,
        pub broken: bool,
    }

    impl Clipboard for FakeClipboard {
        fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            if self.broken {
                return Err(ClipboardError::Unavailable("no display".into()));
            }
            self.contents = Some(text.to_owned());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FakeClipboard;
    use super::*;

    #[test]
    fn test_copy_success() {
        let mut clip = FakeClipboard::default();
        assert!(copy_text(&mut clip, "a@b.c"));
        assert_eq!(clip.contents.as_deref(), Some("a@b.c"));
    }

    #[test]
    fn test_copy_failure_is_silent() {
        let mut clip = FakeClipboard { broken: true, ..Default::default() };
        assert!(!copy_text(&mut clip, "a@b.c"));
        assert!(clip.contents.is_none());
    }
}
