use fountaineer::ScreenplayPipeline;
use lopdf::Document as LopdfDocument;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// A screenplay exercising every block kind.
pub const SAMPLE_SCRIPT: &str = "\
Title: The Long Wait
Author: Jo Writer
Draft date: 2024-03-01
Cast: [Alice, Bob]

INT. KITCHEN - DAY

Alice stands at the window.

ALICE
(quietly)
I can't believe
this is happening.

BOB
Get out.

He walks in.
She stares.

FADE TO BLACK.
";

pub const SAMPLE_SETTINGS: &str = r#"{
    "scene": { "left_margin": 1.5, "right_margin": 1.0 },
    "action": { "left_margin": 1.5, "right_margin": 1.0 },
    "character": { "left_margin": 3.7, "right_margin": 1.0 },
    "parenthetical": { "left_margin": 3.1, "right_margin": 1.0 },
    "dialogue": { "left_margin": 2.5, "right_margin": 1.5 },
    "transition": { "left_margin": 5.5, "right_margin": 1.0 }
}"#;

/// Wrapper around a generated PDF with helper methods.
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Extracts the text of every page, joined with newlines.
    pub fn all_text(&self) -> Result<String, Box<dyn std::error::Error>> {
        let mut text = String::new();
        for page_num in 1..=self.page_count() {
            text.push_str(&self.doc.extract_text(&[page_num as u32])?);
            text.push('\n');
        }
        Ok(text)
    }
}

/// Classifies a script and renders it with the given settings JSON.
pub fn compile_script(
    script: &str,
    settings_json: &str,
) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    let pipeline = ScreenplayPipeline::from_settings_json(settings_json)?;
    let blocks = fountaineer::classify_lines(script.lines());
    let bytes = pipeline.generate_pdf(&blocks)?;
    GeneratedPdf::from_bytes(bytes)
}
