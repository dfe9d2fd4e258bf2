// src/error.rs
use crate::layout_engine::LayoutError;
use crate::parser::ParseError;
use crate::pdf_renderer::RenderError;
use crate::settings::SettingsError;
use thiserror::Error;

/// A comprehensive error type for the entire compilation pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Parsing failed: {0}")]
    Parse(#[from] ParseError),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
