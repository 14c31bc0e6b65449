//! Memory model for the Post machine
//!
//! The machine has a single memory: an unbounded binary [`tape::Tape`] read and
//! written through one head.
//!
//! # Sparsity
//!
//! Cells default to zero and only marked cells are stored:
//! ```text
//! address:  -2 -1  0  1  2  3
//! cells:     0  0  1  0  1  1     stored = {0, 2, 3}
//! ```
//!
//! Rendering a range (see [`tape::Tape::range_string`]) fills the gaps with `0`.

pub mod tape;

pub use tape::{Address, Bit, Tape};
