//! Verbatim HTML download wrapper.
//!
//! Landing pages come back from the model as complete HTML. Nothing is
//! rewritten on the way out; this type only pairs the bytes with a
//! suggested filename for the download response.

/// Suggested filename for a landing-page download.
pub const LANDING_FILENAME: &str = "landing_page.html";

/// A downloadable HTML file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandingPageFile {
    /// Filename offered to the browser.
    pub filename: String,
    /// Verbatim HTML bytes.
    pub bytes: Vec<u8>,
}

impl LandingPageFile {
    /// Wrap model-produced HTML for download, byte for byte.
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            filename: LANDING_FILENAME.to_string(),
            bytes: html.into().into_bytes(),
        }
    }

    /// Override the suggested filename.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_passes_through_unmodified() {
        let html = "<!DOCTYPE html>\n<html><body><h1>Buy now</h1></body></html>";
        let file = LandingPageFile::new(html);

        assert_eq!(file.bytes, html.as_bytes());
        assert_eq!(file.filename, LANDING_FILENAME);
    }

    #[test]
    fn filename_can_be_overridden() {
        let file = LandingPageFile::new("<p>hi</p>").with_filename("offer.html");
        assert_eq!(file.filename, "offer.html");
    }
}
