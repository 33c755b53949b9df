//! DOCX container handling: detection, body splicing, repacking.
//!
//! A DOCX file is a ZIP archive whose main content lives in the
//! `word/document.xml` part. Merging works at that level: the appended
//! documents' body children are spliced into the base document before
//! its trailing section properties, separated by page breaks. Styles,
//! numbering and media of the appended documents are not carried over;
//! the base document's formatting wins.

use std::io::{Cursor, Read, Write};

use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// MIME type of DOCX uploads.
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Main document part inside the archive.
const DOCUMENT_PART: &str = "word/document.xml";

/// Paragraph holding a single page break, inserted between merged
/// documents.
const PAGE_BREAK: &str = r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#;

#[derive(Debug, thiserror::Error)]
pub enum DocxError {
    #[error("not a DOCX document")]
    NotDocx,
    #[error("malformed document part: {0}")]
    Malformed(&'static str),
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of merging a base document with appended members.
#[derive(Debug)]
pub struct MergeOutcome {
    /// Repacked DOCX bytes.
    pub bytes: Vec<u8>,
    /// How many appended buffers were skipped for not being DOCX.
    pub skipped: usize,
}

/// Whether the buffer looks like a DOCX container: a ZIP archive that
/// carries a `word/document.xml` part.
pub fn is_docx(bytes: &[u8]) -> bool {
    if !bytes.starts_with(b"PK") {
        return false;
    }
    let Ok(mut archive) = ZipArchive::new(Cursor::new(bytes)) else {
        return false;
    };
    let has_document_part = archive.by_name(DOCUMENT_PART).is_ok();
    has_document_part
}

/// Merge appended DOCX buffers into a base document.
///
/// Appended bodies land before the base document's trailing section
/// properties, each preceded by a page break; the appended documents'
/// own trailing `sectPr` is dropped so the base page layout applies
/// throughout. Buffers that are not DOCX are skipped and counted, not
/// fatal. A base that is not DOCX is an error.
pub fn merge_documents(base: &[u8], appends: &[Vec<u8>]) -> Result<MergeOutcome, DocxError> {
    if !is_docx(base) {
        return Err(DocxError::NotDocx);
    }
    let base_xml = document_xml(base)?;
    let body_close = base_xml
        .rfind("</w:body>")
        .ok_or(DocxError::Malformed("missing </w:body>"))?;
    let insert_at = match base_xml[..body_close].rfind("<w:sectPr") {
        Some(idx) => idx,
        None => body_close,
    };

    let mut spliced = String::new();
    let mut skipped = 0;
    for buffer in appends {
        if !is_docx(buffer) {
            skipped += 1;
            continue;
        }
        let xml = document_xml(buffer)?;
        spliced.push_str(PAGE_BREAK);
        spliced.push_str(strip_trailing_sect_pr(body_inner(&xml)?));
    }

    let mut merged = String::with_capacity(base_xml.len() + spliced.len());
    merged.push_str(&base_xml[..insert_at]);
    merged.push_str(&spliced);
    merged.push_str(&base_xml[insert_at..]);

    let bytes = replace_document_part(base, &merged)?;
    Ok(MergeOutcome { bytes, skipped })
}

/// Read the main document part out of a DOCX buffer.
pub(crate) fn document_xml(bytes: &[u8]) -> Result<String, DocxError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut part = archive.by_name(DOCUMENT_PART)?;
    let mut xml = String::new();
    part.read_to_string(&mut xml)?;
    Ok(xml)
}

// ---- private helpers ----

/// The children of `<w:body>`, exclusive of the tags themselves.
fn body_inner(xml: &str) -> Result<&str, DocxError> {
    let open = xml
        .find("<w:body")
        .ok_or(DocxError::Malformed("missing <w:body>"))?;
    let open_end = open
        + xml[open..]
            .find('>')
            .ok_or(DocxError::Malformed("unterminated <w:body>"))?
        + 1;
    let close = xml
        .rfind("</w:body>")
        .ok_or(DocxError::Malformed("missing </w:body>"))?;
    if close < open_end {
        return Err(DocxError::Malformed("body tags out of order"));
    }
    Ok(&xml[open_end..close])
}

/// Drop the trailing `sectPr` element from a body fragment, if the
/// fragment ends with one.
fn strip_trailing_sect_pr(body: &str) -> &str {
    let Some(start) = body.rfind("<w:sectPr") else {
        return body;
    };
    let after = &body[start..];
    let end = if let Some(close) = after.find("</w:sectPr>") {
        start + close + "</w:sectPr>".len()
    } else if let Some(close) = after.find("/>") {
        start + close + 2
    } else {
        return body;
    };
    if body[end..].trim().is_empty() {
        &body[..start]
    } else {
        body
    }
}

/// Repack the base archive with `word/document.xml` replaced. All
/// other parts are copied through without recompression.
fn replace_document_part(base: &[u8], document: &str) -> Result<Vec<u8>, DocxError> {
    let mut archive = ZipArchive::new(Cursor::new(base))?;
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for index in 0..archive.len() {
        let entry = archive.by_index_raw(index)?;
        if entry.name() == DOCUMENT_PART {
            continue;
        }
        writer.raw_copy_file(entry)?;
    }
    writer.start_file(DOCUMENT_PART, SimpleFileOptions::default())?;
    writer.write_all(document.as_bytes())?;
    let cursor = writer.finish()?;
    Ok(cursor.into_inner())
}

// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal but complete DOCX with the given body children.
    fn docx_with_body(children: &str) -> Vec<u8> {
        let document = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{children}<w:sectPr><w:pgSz w:w="11906" w:h="16838"/></w:sectPr></w:body></w:document>"#
        );
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        writer.start_file("[Content_Types].xml", options).unwrap();
        writer
            .write_all(br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/></Types>"#)
            .unwrap();
        writer.start_file("word/document.xml", options).unwrap();
        writer.write_all(document.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    fn paragraph(text: &str) -> String {
        format!("<w:p><w:r><w:t>{text}</w:t></w:r></w:p>")
    }

    #[test]
    fn test_is_docx_accepts_real_archive() {
        let bytes = docx_with_body(&paragraph("hello"));
        assert!(is_docx(&bytes));
    }

    #[test]
    fn test_is_docx_rejects_plain_bytes() {
        assert!(!is_docx(b"just some text"));
        assert!(!is_docx(b""));
    }

    #[test]
    fn test_is_docx_rejects_zip_without_document_part() {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("readme.txt", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"not a docx").unwrap();
        let bytes = writer.finish().unwrap().into_inner();
        assert!(!is_docx(&bytes));
    }

    #[test]
    fn test_merge_splices_bodies_in_order() {
        let base = docx_with_body(&paragraph("base"));
        let first = docx_with_body(&paragraph("first"));
        let second = docx_with_body(&paragraph("second"));

        let outcome = merge_documents(&base, &[first, second]).unwrap();
        assert_eq!(outcome.skipped, 0);

        let xml = document_xml(&outcome.bytes).unwrap();
        let base_at = xml.find("base").unwrap();
        let first_at = xml.find("first").unwrap();
        let second_at = xml.find("second").unwrap();
        assert!(base_at < first_at && first_at < second_at);
    }

    #[test]
    fn test_merge_keeps_single_trailing_sect_pr() {
        let base = docx_with_body(&paragraph("base"));
        let appended = docx_with_body(&paragraph("appended"));

        let outcome = merge_documents(&base, &[appended]).unwrap();
        let xml = document_xml(&outcome.bytes).unwrap();
        assert_eq!(xml.matches("<w:sectPr").count(), 1);
        // The surviving sectPr sits after all content.
        assert!(xml.rfind("<w:sectPr").unwrap() > xml.rfind("appended").unwrap());
    }

    #[test]
    fn test_merge_inserts_page_break_between_documents() {
        let base = docx_with_body(&paragraph("base"));
        let appended = docx_with_body(&paragraph("appended"));

        let outcome = merge_documents(&base, &[appended]).unwrap();
        let xml = document_xml(&outcome.bytes).unwrap();
        let break_at = xml.find(r#"<w:br w:type="page"/>"#).unwrap();
        assert!(break_at > xml.find("base").unwrap());
        assert!(break_at < xml.find("appended").unwrap());
    }

    #[test]
    fn test_merge_skips_non_docx_members() {
        let base = docx_with_body(&paragraph("base"));
        let appended = docx_with_body(&paragraph("appended"));
        let junk = b"%PDF-1.7 pretend".to_vec();

        let outcome = merge_documents(&base, &[junk, appended]).unwrap();
        assert_eq!(outcome.skipped, 1);
        let xml = document_xml(&outcome.bytes).unwrap();
        assert!(xml.contains("appended"));
    }

    #[test]
    fn test_merge_rejects_non_docx_base() {
        let result = merge_documents(b"nope", &[]);
        assert!(matches!(result, Err(DocxError::NotDocx)));
    }

    #[test]
    fn test_merge_with_no_appends_round_trips() {
        let base = docx_with_body(&paragraph("alone"));
        let outcome = merge_documents(&base, &[]).unwrap();
        assert_eq!(outcome.skipped, 0);
        let xml = document_xml(&outcome.bytes).unwrap();
        assert!(xml.contains("alone"));
        assert!(!xml.contains(r#"<w:br w:type="page"/>"#));
    }

    #[test]
    fn test_strip_trailing_sect_pr_leaves_inline_ones() {
        // A sectPr buried mid-body (end of a section) must survive.
        let body = r#"<w:p><w:pPr><w:sectPr><w:pgSz/></w:sectPr></w:pPr></w:p><w:p/>"#;
        assert_eq!(strip_trailing_sect_pr(body), body);

        let trailing = r#"<w:p/><w:sectPr><w:pgSz/></w:sectPr>"#;
        assert_eq!(strip_trailing_sect_pr(trailing), "<w:p/>");
    }
}
