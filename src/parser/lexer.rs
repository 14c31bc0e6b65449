//! Line lexer for Post machine programs
//!
//! Converts raw program text into a flat [`Line`] stream consumed by the parser.
//! Blank lines and `#` comments are dropped here, so the parser only ever sees
//! label declarations and instructions.

use super::ast::SourceLocation;
use crate::interpreter::constants::{COMMENT_MARKER, LABEL_SUFFIX};

/// A meaningful line of program text.
///
/// Every variant carries a [`SourceLocation`] so that runtime errors can point
/// back at the offending line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// `name:`
    Label(String, SourceLocation),
    /// `COMMAND [ARGUMENT]`; further tokens are discarded
    Instruction {
        command: String,
        argument: Option<String>,
        location: SourceLocation,
    },
}

impl Line {
    /// Returns the source location where this line appears.
    pub fn location(&self) -> SourceLocation {
        match self {
            Line::Label(_, loc) => *loc,
            Line::Instruction { location, .. } => *location,
        }
    }
}

pub struct Lexer<'a> {
    source: &'a str,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Lexer { source }
    }

    pub fn tokenize(&mut self) -> Vec<Line> {
        self.source
            .lines()
            .enumerate()
            .filter_map(|(index, raw)| Self::classify(raw, SourceLocation::new(index + 1)))
            .collect()
    }

    fn classify(raw: &str, location: SourceLocation) -> Option<Line> {
        let line = raw.trim_end();
        let content = line.trim_start();
        if content.is_empty() || content.starts_with(COMMENT_MARKER) {
            return None;
        }

        if let Some(name) = line.strip_suffix(LABEL_SUFFIX) {
            return Some(Line::Label(name.trim().to_string(), location));
        }

        let mut parts = content.split_whitespace();
        // content is non-empty, so there is always a first token
        let command = parts.next()?.to_string();
        let argument = parts.next().map(str::to_string);
        Some(Line::Instruction {
            command,
            argument,
            location,
        })
    }
}
