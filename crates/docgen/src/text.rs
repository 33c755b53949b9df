//! Plain-text extraction from uploaded syllabus files.
//!
//! Dispatches on the filename extension: `.txt` is read as UTF-8,
//! `.docx` has its document part stripped of markup, `.pdf` goes
//! through `pdf-extract`. Anything else is rejected before any model
//! call is made.

use crate::docx;

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("File extension not found")]
    MissingExtension,
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("file is not valid UTF-8")]
    NotUtf8,
    #[error(transparent)]
    Docx(#[from] docx::DocxError),
    #[error("PDF text extraction failed: {0}")]
    Pdf(String),
}

/// Extract the readable text of an uploaded file.
pub fn read_file_as_text(filename: &str, bytes: &[u8]) -> Result<String, ExtractError> {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .ok_or(ExtractError::MissingExtension)?;

    match extension.as_str() {
        "txt" => String::from_utf8(bytes.to_vec()).map_err(|_| ExtractError::NotUtf8),
        "docx" => docx_text(bytes),
        "pdf" => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|err| ExtractError::Pdf(err.to_string())),
        other => Err(ExtractError::UnsupportedType(format!(".{other}"))),
    }
}

// ---- private helpers ----

fn docx_text(bytes: &[u8]) -> Result<String, ExtractError> {
    if !docx::is_docx(bytes) {
        return Err(ExtractError::Docx(docx::DocxError::NotDocx));
    }
    let xml = docx::document_xml(bytes)?;
    Ok(strip_markup(&xml))
}

/// Reduce WordprocessingML to its text content. Paragraph ends and
/// explicit breaks become newlines, tabs stay tabs.
fn strip_markup(xml: &str) -> String {
    let with_breaks = xml
        .replace("</w:p>", "\n")
        .replace("<w:br/>", "\n")
        .replace("<w:tab/>", "\t");

    let mut text = String::with_capacity(with_breaks.len());
    let mut in_tag = false;
    for ch in with_breaks.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => text.push(c),
            _ => {}
        }
    }
    unescape_entities(&text)
}

fn unescape_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

// ---------------------------------------------------------------------------
