// src/pdf_renderer.rs
//! An in-memory PDF renderer using the `lopdf` library. It builds the
//! document's object graph from laid-out pages and writes it to the output
//! stream. All text is drawn in the base-14 Courier font, so no font data
//! needs embedding.

use crate::layout_engine::{Page, PAGE_HEIGHT, PAGE_WIDTH};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("PDF construction error: {0}")]
    Pdf(#[from] lopdf::Error),
}

pub struct PdfRenderer {
    document: Document,
    pages_id: ObjectId,
    resources_id: ObjectId,
    page_ids: Vec<ObjectId>,
}

impl PdfRenderer {
    pub fn new() -> Self {
        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();
        let resources_id = document.new_object_id();

        Self {
            document,
            pages_id,
            resources_id,
            page_ids: Vec::new(),
        }
    }

    /// Renders the pages and returns the finished PDF bytes.
    pub fn render(mut self, pages: &[Page]) -> Result<Vec<u8>, RenderError> {
        self.begin_document();
        for page in pages {
            self.render_page(page)?;
        }
        self.finalize()
    }

    fn begin_document(&mut self) {
        let font_id = self.document.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
            "Encoding" => "WinAnsiEncoding",
        });

        // The central resources dictionary for the entire document; every
        // page refers to Courier as /F1.
        let resources_dict = dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        };
        self.document
            .objects
            .insert(self.resources_id, Object::Dictionary(resources_dict));

        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![],
            "Count" => 0,
        };
        self.document
            .objects
            .insert(self.pages_id, Object::Dictionary(pages_dict));

        let catalog_id = self
            .document
            .add_object(dictionary! { "Type" => "Catalog", "Pages" => self.pages_id });
        self.document.trailer.set("Root", catalog_id);
    }

    fn render_page(&mut self, page: &Page) -> Result<(), RenderError> {
        let mut content = Content { operations: Vec::new() };
        let mut current_size = 0.0f32;

        for line in &page.lines {
            content.operations.push(Operation::new("BT", vec![]));
            if line.font_size != current_size {
                content.operations.push(Operation::new(
                    "Tf",
                    vec![Object::Name(b"F1".to_vec()), line.font_size.into()],
                ));
                current_size = line.font_size;
            }
            content
                .operations
                .push(Operation::new("Td", vec![line.x.into(), line.y.into()]));
            content.operations.push(Operation::new(
                "Tj",
                vec![Object::String(to_win_ansi(&line.text), StringFormat::Literal)],
            ));
            content.operations.push(Operation::new("ET", vec![]));
        }

        let content_stream = Stream::new(Dictionary::new(), content.encode()?);
        let content_id = self.document.add_object(content_stream);

        let page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
            "Contents" => content_id,
            "Resources" => self.resources_id,
        };
        let page_id = self.document.add_object(page_dict);
        self.page_ids.push(page_id);

        Ok(())
    }

    fn finalize(mut self) -> Result<Vec<u8>, RenderError> {
        if let Some(Object::Dictionary(pages_dict)) = self.document.objects.get_mut(&self.pages_id)
        {
            let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::from(*id)).collect();
            pages_dict.set("Kids", kids);
            pages_dict.set("Count", self.page_ids.len() as i32);
        }

        self.document.compress();
        let mut buffer = Vec::new();
        self.document.save_to(&mut buffer)?;
        Ok(buffer)
    }
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// PDF literal strings in WinAnsiEncoding; anything outside Latin-1 degrades
/// to a question mark.
fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| if c as u32 <= 255 { c as u8 } else { b'?' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout_engine::PositionedLine;

    fn one_line_page(text: &str) -> Page {
        Page {
            number: 1,
            lines: vec![PositionedLine {
                x: 108.0,
                y: 720.0,
                text: text.to_string(),
                font_size: 12.0,
            }],
        }
    }

    #[test]
    fn renders_a_loadable_pdf() {
        let bytes = PdfRenderer::new()
            .render(&[one_line_page("INT. ROOM - DAY")])
            .unwrap();
        assert!(bytes.starts_with(b"%PDF-1.7"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn one_pdf_page_per_layout_page() {
        let pages = vec![one_line_page("First"), one_line_page("Second")];
        let bytes = PdfRenderer::new().render(&pages).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn drawn_text_is_extractable() {
        let bytes = PdfRenderer::new()
            .render(&[one_line_page("Hello screenplay")])
            .unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        let text = doc.extract_text(&[1]).unwrap();
        assert!(text.contains("Hello screenplay"));
    }

    #[test]
    fn empty_page_list_still_produces_a_document() {
        let bytes = PdfRenderer::new().render(&[]).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 0);
    }

    #[test]
    fn non_latin_text_degrades_to_question_marks() {
        assert_eq!(to_win_ansi("café"), b"caf\xe9".to_vec());
        assert_eq!(to_win_ansi("日本"), b"??".to_vec());
    }
}
