//! Appendix table generation for the final curriculum document.
//!
//! The curriculum builder submits the elective grids as structured
//! JSON; this module renders them as WordprocessingML tables and
//! packages the result as a minimal single-part DOCX so the appendix
//! can be merged like any uploaded document.

use std::io::{Cursor, Write};

use serde::Deserialize;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::docx::DocxError;

const FONT: &str = "Cambria";
/// Font size in half-points (11pt).
const FONT_SIZE: &str = "22";
/// Width of one vertical column, in twentieths of a point.
const COLUMN_WIDTH_DXA: u32 = 2460;

const PROFESSIONAL_HEADING: &str = "APPENDIX A: PROFESSIONAL ELECTIVE COURSES VERTICALS";
const OPEN_HEADING: &str = "APPENDIX B: OPEN ELECTIVE COURSES";
const MANDATORY_HEADING: &str = "APPENDIX C: MANDATORY COURSES";

const VERTICALS_NOTE: &str = "*Students are permitted to choose all the Professional \
Electives from a particular vertical or from different verticals. However, Students \
are restricted to select from not more than 2 verticals.";

/// One course code/title pair.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseCell {
    #[serde(default)]
    pub course_code: String,
    #[serde(default)]
    pub course_title: String,
}

impl CourseCell {
    fn is_blank(&self) -> bool {
        self.course_code.trim().is_empty() && self.course_title.trim().is_empty()
    }
}

/// One vertical of the professional electives grid: a numbered, named
/// column of courses.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectiveVertical {
    #[serde(default)]
    pub vertical_number: String,
    #[serde(default)]
    pub vertical_name: String,
    #[serde(default)]
    pub cells: Vec<CourseCell>,
}

/// Appendix form data as submitted by the curriculum builder.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendixData {
    #[serde(default)]
    pub professional_electives: Vec<ElectiveVertical>,
    #[serde(default)]
    pub open_electives: Vec<CourseCell>,
    #[serde(default)]
    pub mandatory_courses: Vec<CourseCell>,
}

impl AppendixData {
    /// Whether there is nothing to render at all.
    pub fn is_empty(&self) -> bool {
        self.professional_electives.is_empty()
            && self.open_electives.is_empty()
            && self.mandatory_courses.is_empty()
    }
}

/// Render the appendix sections and package them as a DOCX buffer.
///
/// Sections without data are omitted entirely, heading included.
pub fn build_appendix_docx(data: &AppendixData) -> Result<Vec<u8>, DocxError> {
    let mut body = String::new();

    if !data.professional_electives.is_empty() {
        body.push_str(&heading_paragraph(PROFESSIONAL_HEADING));
        body.push_str(&verticals_table(&data.professional_electives));
        body.push_str(&note_paragraph(VERTICALS_NOTE));
    }
    if !data.open_electives.is_empty() {
        body.push_str(&heading_paragraph(OPEN_HEADING));
        body.push_str(&course_table(&data.open_electives));
    }
    if !data.mandatory_courses.is_empty() {
        body.push_str(&heading_paragraph(MANDATORY_HEADING));
        body.push_str(&course_table(&data.mandatory_courses));
    }

    pack_single_part_docx(&body)
}

// ---- private helpers ----

fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn run(text: &str, bold: bool) -> String {
    let bold_tag = if bold { "<w:b/>" } else { "" };
    format!(
        r#"<w:r><w:rPr><w:rFonts w:ascii="{FONT}" w:hAnsi="{FONT}"/>{bold_tag}<w:sz w:val="{FONT_SIZE}"/><w:szCs w:val="{FONT_SIZE}"/></w:rPr><w:t xml:space="preserve">{}</w:t></w:r>"#,
        xml_escape(text)
    )
}

fn centered_paragraph(text: &str, bold: bool) -> String {
    format!(
        r#"<w:p><w:pPr><w:jc w:val="center"/></w:pPr>{}</w:p>"#,
        run(text, bold)
    )
}

fn plain_paragraph(text: &str, bold: bool) -> String {
    format!("<w:p>{}</w:p>", run(text, bold))
}

fn heading_paragraph(text: &str) -> String {
    centered_paragraph(text, true)
}

fn note_paragraph(text: &str) -> String {
    format!(
        r#"<w:p><w:pPr><w:spacing w:before="400" w:after="200"/></w:pPr>{}</w:p>"#,
        run(text, false)
    )
}

/// A table cell of the given width holding pre-rendered paragraphs.
fn cell(width_dxa: u32, paragraphs: &str) -> String {
    format!(
        r#"<w:tc><w:tcPr><w:tcW w:w="{width_dxa}" w:type="dxa"/></w:tcPr>{paragraphs}</w:tc>"#
    )
}

fn table_open(column_widths: &[u32]) -> String {
    let grid: String = column_widths
        .iter()
        .map(|w| format!(r#"<w:gridCol w:w="{w}"/>"#))
        .collect();
    format!(
        r#"<w:tbl><w:tblPr><w:tblW w:w="5000" w:type="pct"/><w:tblLayout w:type="fixed"/><w:tblBorders><w:top w:val="single" w:sz="4"/><w:left w:val="single" w:sz="4"/><w:bottom w:val="single" w:sz="4"/><w:right w:val="single" w:sz="4"/><w:insideH w:val="single" w:sz="4"/><w:insideV w:val="single" w:sz="4"/></w:tblBorders></w:tblPr><w:tblGrid>{grid}</w:tblGrid>"#
    )
}

/// The professional electives grid: one column per vertical, header
/// row with the vertical number and name, then one course per row.
/// Shorter verticals are padded with empty cells so every row is full.
fn verticals_table(verticals: &[ElectiveVertical]) -> String {
    let widths = vec![COLUMN_WIDTH_DXA; verticals.len()];
    let mut table = table_open(&widths);

    table.push_str("<w:tr>");
    for vertical in verticals {
        let header = format!(
            "{}{}",
            centered_paragraph(&vertical.vertical_number, true),
            centered_paragraph(&vertical.vertical_name, true),
        );
        table.push_str(&cell(COLUMN_WIDTH_DXA, &header));
    }
    table.push_str("</w:tr>");

    let max_rows = verticals.iter().map(|v| v.cells.len()).max().unwrap_or(0);
    for row in 0..max_rows {
        table.push_str("<w:tr>");
        for vertical in verticals {
            let content = match vertical.cells.get(row) {
                Some(course) if !course.is_blank() => format!(
                    "{}{}",
                    plain_paragraph(&course.course_code, true),
                    plain_paragraph(&course.course_title, false),
                ),
                _ => plain_paragraph("", false),
            };
            table.push_str(&cell(COLUMN_WIDTH_DXA, &content));
        }
        table.push_str("</w:tr>");
    }

    table.push_str("</w:tbl>");
    table
}

/// A two-column code/title table for the open-elective and mandatory
/// course lists.
fn course_table(courses: &[CourseCell]) -> String {
    const CODE_WIDTH: u32 = 2460;
    const TITLE_WIDTH: u32 = 6540;

    let mut table = table_open(&[CODE_WIDTH, TITLE_WIDTH]);
    table.push_str("<w:tr>");
    table.push_str(&cell(CODE_WIDTH, &centered_paragraph("Course Code", true)));
    table.push_str(&cell(TITLE_WIDTH, &centered_paragraph("Course Title", true)));
    table.push_str("</w:tr>");
    for course in courses {
        table.push_str("<w:tr>");
        table.push_str(&cell(CODE_WIDTH, &plain_paragraph(&course.course_code, true)));
        table.push_str(&cell(TITLE_WIDTH, &plain_paragraph(&course.course_title, false)));
        table.push_str("</w:tr>");
    }
    table.push_str("</w:tbl>");
    table
}

/// Wrap rendered body children into a minimal three-part DOCX:
/// content types, package relationships, and the document itself.
fn pack_single_part_docx(body_children: &str) -> Result<Vec<u8>, DocxError> {
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body_children}<w:sectPr><w:pgSz w:w="11906" w:h="16838"/></w:sectPr></w:body></w:document>"#
    );

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    writer.start_file("[Content_Types].xml", options)?;
    writer.write_all(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#,
    )?;

    writer.start_file("_rels/.rels", options)?;
    writer.write_all(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#,
    )?;

    writer.start_file("word/document.xml", options)?;
    writer.write_all(document.as_bytes())?;

    let cursor = writer.finish()?;
    Ok(cursor.into_inner())
}

// ---------------------------------------------------------------------------
