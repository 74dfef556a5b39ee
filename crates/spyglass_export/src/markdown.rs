//! Markdown digest of the drafted chapters.

use spyglass_core::Chapter;
use spyglass_error::{ExportError, ExportErrorKind, SpyglassResult};

/// Suggested filename for the Markdown export.
pub const MARKDOWN_FILENAME: &str = "ebook_draft.md";

/// Concatenate chapters into a single Markdown document: the book title as
/// an H1, then an H2 heading and body per chapter in insertion order.
///
/// # Examples
///
/// ```
/// use spyglass_core::Chapter;
/// use spyglass_export::markdown_digest;
///
/// let chapters = vec![Chapter::new("Intro", "Welcome aboard.")];
/// let digest = markdown_digest("My E-Book", &chapters)?;
/// assert!(digest.starts_with("# My E-Book\n"));
/// assert!(digest.contains("## Intro"));
/// # Ok::<(), spyglass_error::SpyglassError>(())
/// ```
pub fn markdown_digest(title: &str, chapters: &[Chapter]) -> SpyglassResult<String> {
    if chapters.is_empty() {
        return Err(ExportError::new(ExportErrorKind::NoChapters).into());
    }

    let mut digest = format!("# {title}\n");
    for chapter in chapters {
        digest.push_str("\n## ");
        digest.push_str(&chapter.title);
        digest.push_str("\n\n");
        digest.push_str(chapter.body.trim_end());
        digest.push('\n');
    }
    Ok(digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chapters_appear_in_insertion_order() -> anyhow::Result<()> {
        let chapters = vec![
            Chapter::new("Alpha", "First body."),
            Chapter::new("Beta", "Second body."),
            Chapter::new("Gamma", "Third body."),
        ];

        let digest = markdown_digest("Ordered Book", &chapters)?;

        let alpha = digest.find("## Alpha").expect("alpha present");
        let beta = digest.find("## Beta").expect("beta present");
        let gamma = digest.find("## Gamma").expect("gamma present");
        assert!(alpha < beta && beta < gamma);
        Ok(())
    }

    #[test]
    fn headings_and_bodies_are_separated_by_blank_lines() -> anyhow::Result<()> {
        let chapters = vec![Chapter::new("Solo", "Only body.")];
        let digest = markdown_digest("Title", &chapters)?;

        assert_eq!(digest, "# Title\n\n## Solo\n\nOnly body.\n");
        Ok(())
    }

    #[test]
    fn trailing_body_whitespace_is_normalized() -> anyhow::Result<()> {
        let chapters = vec![Chapter::new("Messy", "Body text.\n\n\n")];
        let digest = markdown_digest("Title", &chapters)?;

        assert!(digest.ends_with("Body text.\n"));
        Ok(())
    }

    #[test]
    fn empty_chapter_list_is_rejected() {
        let err = markdown_digest("Title", &[]).expect_err("nothing to export");
        assert!(format!("{err}").contains("no chapters"));
    }
}
