//! Compiles Fountain-style screenplay markup into formatted PDFs.
//!
//! The pipeline has three stages: the block classifier ([`parser`]) turns raw
//! lines into typed blocks, the [`layout_engine`] places those blocks on
//! pages using per-kind margins from [`settings`], and the [`pdf_renderer`]
//! draws the pages with `lopdf`.

pub mod error;
pub mod layout_engine;
pub mod parser;
pub mod pdf_renderer;
pub mod settings;

pub use error::PipelineError;
pub use layout_engine::{LayoutEngine, Page, PositionedLine};
pub use parser::{Block, BlockKind, ParseError, classify_lines, parse_file};
pub use pdf_renderer::PdfRenderer;
pub use settings::{FormatStyle, MarginRule, Settings, TitleStyle};

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Ties the stages together for one settings document.
pub struct ScreenplayPipeline {
    settings: Settings,
}

impl ScreenplayPipeline {
    pub fn new(settings: Settings) -> Self {
        ScreenplayPipeline { settings }
    }

    pub fn from_settings_json(json: &str) -> Result<Self, PipelineError> {
        Ok(Self::new(Settings::from_json(json)?))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Lays out and renders an already-classified block sequence.
    pub fn generate_pdf(&self, blocks: &[Block]) -> Result<Vec<u8>, PipelineError> {
        let pages = LayoutEngine::new(&self.settings).paginate(blocks)?;
        log::debug!("laid out {} blocks across {} pages", blocks.len(), pages.len());
        Ok(PdfRenderer::new().render(&pages)?)
    }

    /// Parses a script file and writes the rendered PDF to `output`.
    pub fn generate_pdf_file<P, Q>(&self, input: P, output: Q) -> Result<(), PipelineError>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let blocks = parse_file(input)?;
        let bytes = self.generate_pdf(&blocks)?;
        fs::write(output, bytes)?;
        Ok(())
    }

    /// A plain-text listing of each block with its resolved margins, used by
    /// the CLI's verbose mode instead of rendering.
    pub fn describe_blocks(&self, blocks: &[Block]) -> String {
        let mut out = String::new();
        for block in blocks {
            let kind = block.kind();
            let margins = match self.settings.margins_for(kind) {
                Some(rule) => format!(
                    "Left Margin: {}in, Right Margin: {}in",
                    rule.left_margin, rule.right_margin
                ),
                None => "Left Margin: N/A, Right Margin: N/A".to_string(),
            };
            // Infallible for String targets.
            let _ = writeln!(
                out,
                "[{}] {}\n{}\n",
                kind.as_str().to_uppercase(),
                margins,
                block.text()
            );
        }
        out
    }
}
