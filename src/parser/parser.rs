use crate::parser::ast::*;
use crate::parser::lexer::{Lexer, Line};
use rustc_hash::FxHashMap;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The machine needs at least one label to use as its entry point
    #[error("Program must declare at least one label")]
    EmptyProgram,
}

/// Builds a [`Program`] from lexed lines.
///
/// Parsing only records instructions and label positions. Command names and
/// label references are checked when an instruction executes, so a program
/// with an unreachable bad branch still runs.
pub struct Parser {
    lines: Vec<Line>,
}

impl Parser {
    pub fn new(source: &str) -> Self {
        let mut lexer = Lexer::new(source);
        Self {
            lines: lexer.tokenize(),
        }
    }

    /// Parse the whole program
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut instructions = Vec::new();
        let mut labels: FxHashMap<String, usize> = FxHashMap::default();
        let mut declaration_order = Vec::new();
        let mut current_label: Option<String> = None;

        for line in self.lines.drain(..) {
            match line {
                Line::Label(name, _) => {
                    // Redeclaring keeps the first position in declaration
                    // order but rebinds the index.
                    if labels.insert(name.clone(), instructions.len()).is_none() {
                        declaration_order.push(name.clone());
                    }
                    current_label = Some(name);
                }
                Line::Instruction {
                    command,
                    argument,
                    location,
                } => {
                    instructions.push(Instruction {
                        command: Command::from_token(&command),
                        argument,
                        label: current_label.take(),
                        target: Target::Missing,
                        location,
                    });
                }
            }
        }

        if declaration_order.is_empty() {
            return Err(ParseError::EmptyProgram);
        }

        // Resolve against the final table so later declarations win
        for instruction in &mut instructions {
            instruction.target = resolve_target(instruction.argument.as_deref(), &labels);
        }

        Ok(Program::new(instructions, labels, declaration_order))
    }
}

fn resolve_target(argument: Option<&str>, labels: &FxHashMap<String, usize>) -> Target {
    match argument {
        None => Target::Missing,
        Some(name) => match labels.get(name) {
            Some(&index) => Target::Resolved {
                label: name.to_string(),
                index,
            },
            None => Target::Undefined(name.to_string()),
        },
    }
}

/// Parse program text in one call
pub fn parse(source: &str) -> Result<Program, ParseError> {
    Parser::new(source).parse_program()
}
