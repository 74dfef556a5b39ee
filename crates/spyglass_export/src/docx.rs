//! Minimal DOCX writer.
//!
//! A `.docx` file is a zip package holding WordprocessingML parts. Drafted
//! chapters only need headings and plain paragraphs, so the package is
//! assembled directly: `[Content_Types].xml`, `_rels/.rels`, and
//! `word/document.xml` with one `Heading1` paragraph and one body paragraph
//! per chapter.

use spyglass_core::Chapter;
use spyglass_error::{ExportError, ExportErrorKind, SpyglassResult};
use std::io::{Cursor, Write};
use tracing::debug;
use zip::ZipWriter;
use zip::write::FileOptions;

/// Suggested filename for the chapter export.
pub const DOCX_FILENAME: &str = "ebook_draft.docx";

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#;

const RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

#[derive(Debug, Clone)]
enum Block {
    Heading(String),
    Paragraph(String),
}

/// In-memory word-processor document built block by block.
///
/// # Examples
///
/// ```
/// use spyglass_export::DocxDocument;
///
/// let mut doc = DocxDocument::new();
/// doc.add_heading("Chapter 1: Why Keto Fails");
/// doc.add_paragraph("Most diets collapse in week two.");
/// let bytes = doc.into_bytes()?;
/// assert_eq!(&bytes[..2], b"PK");
/// # Ok::<(), spyglass_error::SpyglassError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct DocxDocument {
    blocks: Vec<Block>,
}

impl DocxDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a `Heading1` paragraph.
    pub fn add_heading(&mut self, text: impl Into<String>) {
        self.blocks.push(Block::Heading(text.into()));
    }

    /// Append a body paragraph. Newlines become line breaks within the
    /// paragraph rather than new paragraphs.
    pub fn add_paragraph(&mut self, text: impl Into<String>) {
        self.blocks.push(Block::Paragraph(text.into()));
    }

    /// True when no blocks have been added.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    fn document_xml(&self) -> String {
        let mut body = String::new();
        for block in &self.blocks {
            match block {
                Block::Heading(text) => {
                    body.push_str(r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r>"#);
                    body.push_str(&text_runs(text));
                    body.push_str("</w:r></w:p>");
                }
                Block::Paragraph(text) => {
                    body.push_str("<w:p><w:r>");
                    body.push_str(&text_runs(text));
                    body.push_str("</w:r></w:p>");
                }
            }
        }

        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
        )
    }

    /// Package the document into `.docx` bytes.
    pub fn into_bytes(self) -> SpyglassResult<Vec<u8>> {
        let block_count = self.blocks.len();
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        let parts = [
            ("[Content_Types].xml", CONTENT_TYPES_XML.to_string()),
            ("_rels/.rels", RELS_XML.to_string()),
            ("word/document.xml", self.document_xml()),
        ];

        for (name, content) in parts {
            zip.start_file(name, options)
                .map_err(|e| ExportError::new(ExportErrorKind::Packaging(e.to_string())))?;
            zip.write_all(content.as_bytes())
                .map_err(|e| ExportError::new(ExportErrorKind::Io(e.to_string())))?;
        }

        let cursor = zip
            .finish()
            .map_err(|e| ExportError::new(ExportErrorKind::Packaging(e.to_string())))?;
        let bytes = cursor.into_inner();

        debug!(blocks = block_count, bytes = bytes.len(), "packaged document");
        Ok(bytes)
    }
}

/// One heading and one paragraph per chapter, in insertion order.
pub fn build_docx(chapters: &[Chapter]) -> SpyglassResult<DocxDocument> {
    if chapters.is_empty() {
        return Err(ExportError::new(ExportErrorKind::NoChapters).into());
    }

    let mut doc = DocxDocument::new();
    for chapter in chapters {
        doc.add_heading(&chapter.title);
        doc.add_paragraph(&chapter.body);
    }
    Ok(doc)
}

/// Escape text for an XML text node.
fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Run content for a block of text, turning newlines into `<w:br/>`.
fn text_runs(text: &str) -> String {
    let lines: Vec<String> = text
        .split('\n')
        .map(|line| escape_xml(line.trim_end_matches('\r')))
        .collect();

    format!(
        r#"<w:t xml:space="preserve">{}</w:t>"#,
        lines.join(r#"</w:t><w:br/><w:t xml:space="preserve">"#)
    )
}
