// src/layout_engine.rs
//! Turns a classified block sequence into pages of positioned text lines.
//! All measurements are in PDF points with a bottom-left origin; the renderer
//! draws whatever this stage placed without further decisions.

use crate::parser::{Block, BlockKind};
use crate::settings::{FormatStyle, Settings, TitleStyle};
use thiserror::Error;

pub const PAGE_WIDTH: f32 = 612.0;
pub const PAGE_HEIGHT: f32 = 792.0;
pub const INCH: f32 = 72.0;
pub const FONT_SIZE: f32 = 12.0;
pub const PAGE_NUMBER_FONT_SIZE: f32 = 10.0;
/// Vertical advance between lines.
pub const LEADING: f32 = 15.0;
/// Horizontal advance of one Courier glyph at 12pt.
pub const CHAR_WIDTH: f32 = 7.2;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("no margins configured for '{0}' blocks")]
    MissingMargins(&'static str),
}

/// A single run of text at an absolute position on one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedLine {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub font_size: f32,
}

#[derive(Debug, Default)]
pub struct Page {
    pub number: usize,
    pub lines: Vec<PositionedLine>,
}

/// Title-page material pulled out of the block stream before body layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TitlePage {
    pub title: String,
    pub author: String,
    pub draft_date: String,
    pub cast: Vec<String>,
}

/// Splits metadata and cast blocks off into a `TitlePage`, returning the
/// remaining body blocks in order. The title is upper-cased for display and
/// only the first draft date is kept.
pub fn extract_title_page(blocks: &[Block]) -> (TitlePage, Vec<&Block>) {
    let mut front = TitlePage::default();
    let mut body = Vec::new();

    for block in blocks {
        match block {
            Block::Metadata(text) => {
                if let Some(value) = text.strip_prefix("Title:") {
                    front.title = value.trim().to_uppercase();
                } else if let Some(value) = text.strip_prefix("Author:") {
                    front.author = value.trim().to_string();
                } else if let Some(value) = text.strip_prefix("Draft date:") {
                    if front.draft_date.is_empty() {
                        front.draft_date = value.trim().to_string();
                    }
                }
                // Credit lines are classified but not drawn.
            }
            Block::Cast(names) => front.cast = names.clone(),
            other => body.push(other),
        }
    }

    (front, body)
}

/// Greedy word wrap to a column budget measured in characters.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.len() + 1 + word.len() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

pub struct LayoutEngine<'a> {
    settings: &'a Settings,
    pages: Vec<Page>,
    y: f32,
    page_number: usize,
    label_title: String,
}

impl<'a> LayoutEngine<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        LayoutEngine {
            settings,
            pages: Vec::new(),
            y: PAGE_HEIGHT - INCH,
            page_number: 0,
            label_title: String::new(),
        }
    }

    /// Lays out the whole block sequence and returns the finished pages.
    pub fn paginate(mut self, blocks: &[Block]) -> Result<Vec<Page>, LayoutError> {
        let (front, body) = extract_title_page(blocks);
        self.label_title = front.title.clone();

        match self.settings.title_style {
            TitleStyle::Titlepage => {
                self.layout_title_page(&front);
                // The body starts on a fresh page numbered 1, but only when
                // there is body content to draw.
                if !body.is_empty() {
                    self.page_number = 1;
                    self.start_body_page();
                }
            }
            TitleStyle::Inbody => {
                self.page_number = 1;
                self.start_body_page();
                self.layout_inbody_header(&front);
            }
        }

        for block in body {
            self.layout_block(block)?;
        }

        Ok(self.pages)
    }

    fn layout_title_page(&mut self, front: &TitlePage) {
        self.pages.push(Page { number: 0, lines: Vec::new() });

        let mut y = PAGE_HEIGHT - 3.0 * INCH;
        if !front.title.is_empty() {
            self.push_centered(&front.title, y);
            y -= 40.0;
        }
        if !front.author.is_empty() {
            self.push_centered(&front.author, y);
            y -= LEADING;
        }
        if !front.draft_date.is_empty() {
            self.push_centered(&front.draft_date, y);
        }

        // The cast list is anchored near the bottom left, independent of how
        // much title material sits above it.
        if !front.cast.is_empty() {
            self.push_line(1.5 * INCH, INCH + 50.0, "CAST".to_string(), FONT_SIZE);
            let mut cast_y = INCH + 30.0;
            for name in &front.cast {
                self.push_line(1.5 * INCH, cast_y, name.clone(), FONT_SIZE);
                cast_y -= LEADING;
            }
        }
    }

    fn layout_inbody_header(&mut self, front: &TitlePage) {
        let x = 1.5 * INCH;
        if !front.title.is_empty() {
            self.push_line(x, self.y, format!("\"{}\"", front.title), FONT_SIZE);
            self.y -= LEADING;
        }
        if !front.author.is_empty() {
            self.push_line(x, self.y, front.author.clone(), FONT_SIZE);
            self.y -= LEADING;
        }
        if !front.draft_date.is_empty() {
            self.push_line(x, self.y, front.draft_date.clone(), FONT_SIZE);
            self.y -= 30.0;
        }
        if !front.cast.is_empty() {
            self.push_line(x, self.y, "CAST".to_string(), FONT_SIZE);
            self.y -= LEADING;
            for name in &front.cast {
                self.push_line(x, self.y, name.clone(), FONT_SIZE);
                self.y -= LEADING;
            }
        }
        self.y -= 30.0;
    }

    fn layout_block(&mut self, block: &Block) -> Result<(), LayoutError> {
        let kind = block.kind();
        let rule = self
            .settings
            .margins_for(kind)
            .ok_or(LayoutError::MissingMargins(kind.as_str()))?;

        let left = rule.left_margin * INCH;
        let right_edge = PAGE_WIDTH - rule.right_margin * INCH;
        let max_width = right_edge - left;

        let mut text = block.text();
        if kind == BlockKind::Action
            && self.settings.format_style == FormatStyle::ParentheticalActions
        {
            text = format!("({})", text);
        }

        let lines = match kind {
            BlockKind::Scene | BlockKind::Action | BlockKind::Dialogue => {
                wrap_text(&text, (max_width / CHAR_WIDTH) as usize)
            }
            _ => vec![text],
        };

        for line in lines {
            self.place_body_line(left, line);
        }

        // Double spacing for everything except speakers and parentheticals.
        if !matches!(kind, BlockKind::Character | BlockKind::Parenthetical) {
            self.y -= LEADING;
        }
        Ok(())
    }

    fn place_body_line(&mut self, x: f32, text: String) {
        if self.y < INCH {
            self.page_number += 1;
            self.start_body_page();
        }
        self.push_line(x, self.y, text, FONT_SIZE);
        self.y -= LEADING;
    }

    /// Opens a fresh body page, stamping its page-number label up front.
    fn start_body_page(&mut self) {
        self.pages.push(Page { number: self.page_number, lines: Vec::new() });
        self.y = PAGE_HEIGHT - INCH;

        if self.settings.page_numbers {
            let label = if self.settings.title_with_page_number && !self.label_title.is_empty() {
                format!("{} - {}.", self.label_title, self.page_number)
            } else {
                format!("{}.", self.page_number)
            };
            // Right-aligned one inch from the right edge, half an inch down.
            let x = PAGE_WIDTH - INCH - label.len() as f32 * PAGE_NUMBER_FONT_SIZE * 0.6;
            self.push_line(x, PAGE_HEIGHT - 0.5 * INCH, label, PAGE_NUMBER_FONT_SIZE);
        }
    }

    fn push_centered(&mut self, text: &str, y: f32) {
        let x = (PAGE_WIDTH - text.len() as f32 * CHAR_WIDTH) / 2.0;
        self.push_line(x, y, text.to_string(), FONT_SIZE);
    }

    fn push_line(&mut self, x: f32, y: f32, text: String, font_size: f32) {
        if let Some(page) = self.pages.last_mut() {
            page.lines.push(PositionedLine { x, y, text, font_size });
        }
    }
}
