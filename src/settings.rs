// src/settings.rs
//! The renderer settings document: per-block-kind margins plus a handful of
//! presentation options, loaded from JSON. The classifier never consumes
//! these; they belong to the layout and rendering stages.

use crate::parser::BlockKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Left and right margins for one block kind, in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarginRule {
    pub left_margin: f32,
    pub right_margin: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleStyle {
    /// Dedicated title page before the screenplay body.
    Titlepage,
    /// Title, author, date, and cast at the top of page one.
    Inbody,
}

impl Default for TitleStyle {
    fn default() -> Self {
        TitleStyle::Titlepage
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatStyle {
    Standard,
    /// Every action block is wrapped in parentheses.
    ParentheticalActions,
}

impl Default for FormatStyle {
    fn default() -> Self {
        FormatStyle::Standard
    }
}

/// All style and layout information for one compilation.
///
/// Any top-level key that is not a known option is treated as a block-kind
/// margin entry, so unknown kinds parse without error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub title_style: TitleStyle,
    #[serde(default)]
    pub format_style: FormatStyle,
    #[serde(default = "default_page_numbers")]
    pub page_numbers: bool,
    #[serde(default)]
    pub title_with_page_number: bool,
    #[serde(flatten)]
    pub margins: HashMap<String, MarginRule>,
}

fn default_page_numbers() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            title_style: TitleStyle::default(),
            format_style: FormatStyle::default(),
            page_numbers: true,
            title_with_page_number: false,
            margins: HashMap::new(),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn margins_for(&self, kind: BlockKind) -> Option<&MarginRule> {
        self.margins.get(kind.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"{
        "title_style": "inbody",
        "format_style": "parenthetical_actions",
        "page_numbers": false,
        "title_with_page_number": true,
        "scene": { "left_margin": 1.5, "right_margin": 1.0 },
        "action": { "left_margin": 1.5, "right_margin": 1.0 },
        "character": { "left_margin": 3.7, "right_margin": 1.0 },
        "parenthetical": { "left_margin": 3.1, "right_margin": 1.0 },
        "dialogue": { "left_margin": 2.5, "right_margin": 1.5 },
        "transition": { "left_margin": 5.5, "right_margin": 1.0 }
    }"#;

    #[test]
    fn parses_full_document() {
        let settings = Settings::from_json(FULL).unwrap();
        assert_eq!(settings.title_style, TitleStyle::Inbody);
        assert_eq!(settings.format_style, FormatStyle::ParentheticalActions);
        assert!(!settings.page_numbers);
        assert!(settings.title_with_page_number);

        let dialogue = settings.margins_for(BlockKind::Dialogue).unwrap();
        assert_eq!(dialogue.left_margin, 2.5);
        assert_eq!(dialogue.right_margin, 1.5);
    }

    #[test]
    fn options_default_when_omitted() {
        let settings =
            Settings::from_json(r#"{ "action": { "left_margin": 1.5, "right_margin": 1.0 } }"#)
                .unwrap();
        assert_eq!(settings.title_style, TitleStyle::Titlepage);
        assert_eq!(settings.format_style, FormatStyle::Standard);
        assert!(settings.page_numbers);
        assert!(!settings.title_with_page_number);
    }

    #[test]
    fn unknown_kinds_still_parse() {
        let settings =
            Settings::from_json(r#"{ "lyrics": { "left_margin": 2.0, "right_margin": 2.0 } }"#)
                .unwrap();
        assert!(settings.margins.contains_key("lyrics"));
        assert!(settings.margins_for(BlockKind::Action).is_none());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(SettingsError::Json(_))
        ));
    }
}
