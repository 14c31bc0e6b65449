// Program representation for the Post machine

use rustc_hash::FxHashMap;
use std::fmt;

/// Source location information for error reporting
///
/// Lines are 1-based and refer to the raw program text, comments and blank
/// lines included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub line: usize,
}

impl SourceLocation {
    pub fn new(line: usize) -> Self {
        Self { line }
    }
}

/// The decoded command token of an instruction.
///
/// Unrecognized tokens are kept as [`Command::Unknown`] so that the error is
/// raised only if the instruction is ever executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Mark,
    Erase,
    Left,
    Right,
    If1,
    If0,
    Goto,
    Halt,
    Unknown(String),
}

impl Command {
    /// Decode a command token (case-insensitive)
    pub fn from_token(token: &str) -> Self {
        match token.to_ascii_uppercase().as_str() {
            "MARK" => Command::Mark,
            "ERASE" => Command::Erase,
            "LEFT" => Command::Left,
            "RIGHT" => Command::Right,
            "IF1" => Command::If1,
            "IF0" => Command::If0,
            "GOTO" => Command::Goto,
            "HALT" => Command::Halt,
            _ => Command::Unknown(token.to_ascii_uppercase()),
        }
    }

    /// Whether this command takes a label argument
    pub fn is_branch(&self) -> bool {
        matches!(self, Command::If1 | Command::If0 | Command::Goto)
    }

    pub fn mnemonic(&self) -> &str {
        match self {
            Command::Mark => "MARK",
            Command::Erase => "ERASE",
            Command::Left => "LEFT",
            Command::Right => "RIGHT",
            Command::If1 => "IF1",
            Command::If0 => "IF0",
            Command::Goto => "GOTO",
            Command::Halt => "HALT",
            Command::Unknown(token) => token,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Where a branch instruction jumps to, resolved once when the program is built
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// No argument was given
    Missing,
    /// The argument names a declared label
    Resolved { label: String, index: usize },
    /// The argument names a label that was never declared
    Undefined(String),
}

/// A single parsed instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub command: Command,
    /// Raw argument token, if one was present
    pub argument: Option<String>,
    /// Label declared immediately before this instruction
    pub label: Option<String>,
    pub target: Target,
    pub location: SourceLocation,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.argument {
            Some(arg) => write!(f, "{} {}", self.command, arg),
            None => write!(f, "{}", self.command),
        }
    }
}

/// A parsed program: instructions, label table and entry point
///
/// Only the parser builds programs, so every `Program` has at least one label.
#[derive(Debug, Clone)]
pub struct Program {
    instructions: Vec<Instruction>,
    labels: FxHashMap<String, usize>,
    /// Label names in the order they were first declared
    declaration_order: Vec<String>,
}

impl Program {
    pub(crate) fn new(
        instructions: Vec<Instruction>,
        labels: FxHashMap<String, usize>,
        declaration_order: Vec<String>,
    ) -> Self {
        debug_assert!(!declaration_order.is_empty());
        Program {
            instructions,
            labels,
            declaration_order,
        }
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Instruction> {
        self.instructions.get(index)
    }

    /// Instruction index bound to a label
    pub fn label(&self, name: &str) -> Option<usize> {
        self.labels.get(name).copied()
    }

    /// Label names in first-declaration order
    pub fn labels(&self) -> impl Iterator<Item = (&str, usize)> {
        self.declaration_order
            .iter()
            .map(|name| (name.as_str(), self.labels[name]))
    }

    /// The first label declared in the source
    pub fn entry_label(&self) -> &str {
        &self.declaration_order[0]
    }

    /// Index the program counter starts at
    pub fn entry_point(&self) -> usize {
        self.labels[self.entry_label()]
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, instruction) in self.instructions.iter().enumerate() {
            for (name, bound) in self.labels() {
                if bound == index {
                    writeln!(f, "{}:", name)?;
                }
            }
            writeln!(f, "    {}", instruction)?;
        }
        for (name, bound) in self.labels() {
            if bound == self.instructions.len() {
                writeln!(f, "{}:", name)?;
            }
        }
        Ok(())
    }
}
