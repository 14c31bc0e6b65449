//! Runtime error types for the Post machine
//!
//! This module defines [`RuntimeError`], which represents all errors that can occur
//! during program execution (as opposed to parse errors or storage errors).
//!
//! All runtime errors are fatal - they move the machine into the faulted state and
//! are returned again by every later step.

use crate::memory::Address;
use crate::parser::ast::SourceLocation;

/// Runtime errors that can occur during execution
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// The step budget ran out before the program halted
    #[error("Step limit of {limit} exceeded")]
    StepLimitExceeded { limit: usize },

    /// The program counter left the instruction sequence (usually by falling
    /// off the end without HALT)
    #[error("Program counter {pc} is outside the program (0..{len})")]
    ProgramCounterOutOfRange { pc: usize, len: usize },

    /// IF1, IF0 or GOTO without a label
    #[error("{command} requires a label at line {}", .location.line)]
    MissingLabelArgument {
        command: String,
        location: SourceLocation,
    },

    /// Jump to a label that was never declared
    #[error("Undefined label '{label}' at line {}", .location.line)]
    UndefinedLabel {
        label: String,
        location: SourceLocation,
    },

    /// Command token that is not part of the instruction set
    #[error("Unknown command '{command}' at line {}", .location.line)]
    UnknownCommand {
        command: String,
        location: SourceLocation,
    },

    /// Head moved past the end of the address space
    #[error("Head moved out of the address space from {head}")]
    HeadOverflow { head: Address },
}

impl RuntimeError {
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            RuntimeError::MissingLabelArgument { location, .. } => Some(location),
            RuntimeError::UndefinedLabel { location, .. } => Some(location),
            RuntimeError::UnknownCommand { location, .. } => Some(location),
            RuntimeError::StepLimitExceeded { .. } => None,
            RuntimeError::ProgramCounterOutOfRange { .. } => None,
            RuntimeError::HeadOverflow { .. } => None,
        }
    }

    /// Whether the program simply ran out of steps.
    ///
    /// Callers usually report this as "did not halt" rather than as a bug in
    /// the program.
    pub fn is_step_limit(&self) -> bool {
        matches!(self, RuntimeError::StepLimitExceeded { .. })
    }
}
