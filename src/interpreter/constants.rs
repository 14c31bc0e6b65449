// Constants for the Post machine interpreter

use crate::memory::Address;

/// Step budget used when none is configured
pub const DEFAULT_STEP_LIMIT: usize = 10_000;

/// Head position used when none is configured
pub const DEFAULT_HEAD: Address = 0;

/// Number of cells shown on each side of the head in a state line
pub const TRACE_WINDOW: Address = 10;

/// Lines starting with this character (after indentation) are ignored
pub const COMMENT_MARKER: char = '#';

/// A line ending with this character declares a label
pub const LABEL_SUFFIX: char = ':';
