//! Post machine program parser
//!
//! This module transforms program text into a [`ast::Program`]:
//! - [`lexer`]: Line classification (source text → label / instruction lines)
//! - [`parser`]: Program building (lines → instructions + label table)
//! - [`ast`]: Instruction and program definitions
//!
//! # Program Format
//!
//! ```text
//! # comment
//! start:
//!     MARK
//!     RIGHT
//!     IF0 start
//!     HALT
//! ```
//!
//! - One directive per line; blank lines and `#` comments are ignored
//! - `name:` declares a label bound to the next instruction
//! - Commands are case-insensitive, label names are not
//! - The first declared label is the entry point
//!
//! Unknown commands and undefined labels are not parse errors. They are
//! reported by the interpreter when (and only if) the instruction runs.

pub mod ast;
pub mod lexer;
pub mod parser;
