// src/parser.rs
//! The block classifier: a one-pass, line-at-a-time state machine that turns
//! raw screenplay text into a sequence of typed blocks. The classifier never
//! rejects input; a line that matches nothing else becomes an `Action` block.

use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors produced while reading a script. Classification itself cannot fail.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),
}

/// One classified unit of screenplay text.
///
/// `Cast` is the only variant carrying a list; everything else is a single
/// string, so consumers pattern-match instead of type-checking at use sites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Metadata(String),
    Cast(Vec<String>),
    Transition(String),
    Character(String),
    Parenthetical(String),
    Scene(String),
    Dialogue(String),
    Action(String),
}

/// The kind discriminant, doubling as the settings lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Metadata,
    Cast,
    Transition,
    Character,
    Parenthetical,
    Scene,
    Dialogue,
    Action,
}

impl BlockKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Metadata => "metadata",
            BlockKind::Cast => "cast",
            BlockKind::Transition => "transition",
            BlockKind::Character => "character",
            BlockKind::Parenthetical => "parenthetical",
            BlockKind::Scene => "scene",
            BlockKind::Dialogue => "dialogue",
            BlockKind::Action => "action",
        }
    }
}

impl Block {
    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Metadata(_) => BlockKind::Metadata,
            Block::Cast(_) => BlockKind::Cast,
            Block::Transition(_) => BlockKind::Transition,
            Block::Character(_) => BlockKind::Character,
            Block::Parenthetical(_) => BlockKind::Parenthetical,
            Block::Scene(_) => BlockKind::Scene,
            Block::Dialogue(_) => BlockKind::Dialogue,
            Block::Action(_) => BlockKind::Action,
        }
    }

    /// The block content as a single string. Cast names join with `", "`.
    pub fn text(&self) -> String {
        match self {
            Block::Metadata(s)
            | Block::Transition(s)
            | Block::Character(s)
            | Block::Parenthetical(s)
            | Block::Scene(s)
            | Block::Dialogue(s)
            | Block::Action(s) => s.clone(),
            Block::Cast(names) => names.join(", "),
        }
    }
}

/// The single in-progress block awaiting continuation or closure.
///
/// Metadata, cast, and transition lines are emitted immediately and never
/// pass through here.
#[derive(Debug)]
enum Pending {
    Character(String),
    Parenthetical(String),
    Scene(String),
    Dialogue(String),
    Action(String),
}

impl Pending {
    fn into_block(self) -> Block {
        match self {
            Pending::Character(s) => Block::Character(s),
            Pending::Parenthetical(s) => Block::Parenthetical(s),
            Pending::Scene(s) => Block::Scene(s),
            Pending::Dialogue(s) => Block::Dialogue(s),
            Pending::Action(s) => Block::Action(s),
        }
    }
}

const METADATA_PREFIXES: [&str; 4] = ["Title:", "Credit:", "Author:", "Draft date:"];
const TRANSITIONS: [&str; 3] = ["BLACKOUT", "FADE OUT.", "FADE TO BLACK."];

fn flush(pending: &mut Option<Pending>, blocks: &mut Vec<Block>) {
    if let Some(open) = pending.take() {
        blocks.push(open.into_block());
    }
}

fn is_scene_heading(line: &str) -> bool {
    line.starts_with("INT.") || line.starts_with("EXT.")
}

/// True when the line contains at least one letter and no lowercase letters.
fn is_all_caps(line: &str) -> bool {
    line.chars().any(|c| c.is_alphabetic()) && !line.chars().any(|c| c.is_lowercase())
}

fn parse_cast(value: &str) -> Vec<String> {
    value
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

/// Classifies an ordered sequence of raw lines into blocks.
///
/// The rule order is load-bearing: metadata, cast, transition, character,
/// parenthetical, scene heading, dialogue opening, dialogue accumulation,
/// action. A line matching an earlier rule never falls through to a later
/// one. Any line type that opens or emits a block first flushes the pending
/// block, so output stays in source line order.
pub fn classify_lines<'a, I>(lines: I) -> Vec<Block>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut blocks = Vec::new();
    let mut pending: Option<Pending> = None;

    for (index, raw) in lines.into_iter().enumerate() {
        let line = raw.trim();
        log::trace!("line {}: {:?} (pending: {:?})", index, line, pending);

        // A blank line is the only thing that closes dialogue or action
        // accumulation mid-stream.
        if line.is_empty() {
            flush(&mut pending, &mut blocks);
            continue;
        }

        if METADATA_PREFIXES.iter().any(|p| line.starts_with(p)) {
            flush(&mut pending, &mut blocks);
            blocks.push(Block::Metadata(line.to_string()));
        } else if let Some(value) = line.strip_prefix("Cast:") {
            flush(&mut pending, &mut blocks);
            blocks.push(Block::Cast(parse_cast(value)));
        } else if TRANSITIONS.contains(&line) || line.ends_with("TO:") {
            flush(&mut pending, &mut blocks);
            blocks.push(Block::Transition(line.to_string()));
        } else if is_all_caps(line) && !is_scene_heading(line) {
            flush(&mut pending, &mut blocks);
            pending = Some(Pending::Character(line.to_string()));
        } else if line.starts_with('(') && line.ends_with(')') {
            flush(&mut pending, &mut blocks);
            pending = Some(Pending::Parenthetical(line.to_string()));
        } else if is_scene_heading(line) {
            flush(&mut pending, &mut blocks);
            pending = Some(Pending::Scene(line.to_string()));
        } else if matches!(pending, Some(Pending::Character(_) | Pending::Parenthetical(_))) {
            // First dialogue line after a speaker cue or parenthetical.
            flush(&mut pending, &mut blocks);
            pending = Some(Pending::Dialogue(line.to_string()));
        } else if let Some(Pending::Dialogue(text)) = pending.as_mut() {
            // Multi-line dialogue folds into one paragraph.
            text.push(' ');
            text.push_str(line);
        } else {
            // Default case. Note that consecutive action lines do NOT merge:
            // each non-blank line lands here again, flushes the previous
            // single-line action, and opens a fresh one.
            flush(&mut pending, &mut blocks);
            pending = Some(Pending::Action(line.to_string()));
        }
    }

    flush(&mut pending, &mut blocks);
    blocks
}

/// Reads a script file and classifies its lines.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<Block>, ParseError> {
    let source = fs::read_to_string(path)?;
    Ok(classify_lines(source.lines()))
}
