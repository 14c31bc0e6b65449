//! Post machine execution engine
//!
//! This module provides the core execution logic:
//! - [`engine`]: The [`engine::Machine`] with single-step and run-to-halt execution
//! - [`errors`]: Runtime error types
//! - [`config`]: Step budget, initial head and history settings
//! - [`constants`]: Defaults and syntax characters
//!
//! # Execution Model
//!
//! The machine starts at the first declared label and executes one instruction
//! per step:
//!
//! | Command  | Effect                    | Next pc                         |
//! |----------|---------------------------|---------------------------------|
//! | `MARK`   | write 1 under the head    | pc + 1                          |
//! | `ERASE`  | write 0 under the head    | pc + 1                          |
//! | `LEFT`   | head - 1                  | pc + 1                          |
//! | `RIGHT`  | head + 1                  | pc + 1                          |
//! | `IF1 L`  |                           | L if the cell is 1, else pc + 1 |
//! | `IF0 L`  |                           | L if the cell is 0, else pc + 1 |
//! | `GOTO L` |                           | L                               |
//! | `HALT`   | stop                      | unchanged                       |
//!
//! Every step counts toward the step budget. Running out of budget is reported
//! as [`errors::RuntimeError::StepLimitExceeded`], which is the normal outcome
//! for a program that never halts.

pub mod config;
pub mod constants;
pub mod engine;
pub mod errors;
