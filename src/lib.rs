//! # Introduction
//!
//! A Post machine interpreter: programs of eight commands move a single head
//! over an unbounded binary tape and branch on labels.
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Lexer → Parser → Program → Machine → Tape → Report
//! ```
//!
//! 1. [`parser`] — classifies lines and builds a [`parser::ast::Program`]
//!    with its label table.
//! 2. [`interpreter`] — the [`interpreter::engine::Machine`], stepping the
//!    program under a step budget.
//! 3. [`memory`] — the sparse [`memory::Tape`].
//! 4. [`snapshot`] — formatted state lines and the optional step history.
//! 5. [`storage`] — named programs and inputs behind the [`storage::Store`]
//!    trait.
//! 6. [`report`] — reading a finished run back as binary and decimal values.
//!
//! ## Example
//!
//! ```
//! use post_machine::interpreter::{config::MachineConfig, engine::Machine};
//! use post_machine::memory::Tape;
//!
//! let source = "start:\n    MARK\n    RIGHT\n    MARK\n    HALT\n";
//! let mut machine = Machine::from_source(source, Tape::new(), MachineConfig::default()).unwrap();
//! assert_eq!(machine.run(), Ok(true));
//! assert_eq!(machine.range_string(0, 1), "11");
//! ```

pub mod interpreter;
pub mod memory;
pub mod parser;
pub mod report;
pub mod snapshot;
pub mod storage;
