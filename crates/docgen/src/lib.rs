//! Document generation and extraction for the syllabus portal.
//!
//! Covers the document side of the curriculum workflow: DOCX container
//! handling (detection and merge), generation of the appendix course
//! tables, plain-text extraction from uploaded files, and the client
//! for the generative model behind syllabus extraction.

pub mod docx;
pub mod model;
pub mod tables;
pub mod text;
