//! Result interpretation
//!
//! Turns a finished [`Machine`] into something a person can read. Everything
//! here is built from the machine's span and range queries only:
//! - [`normalize`]: the marked region with its offset and the relative head
//! - [`RunReport`]: the full summary of a run over a binary input
//! - [`session`]: load a named program and input from a store and run them

pub mod session;

use crate::interpreter::engine::Machine;
use crate::memory::Address;
use std::fmt;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Halted,
    /// The step budget ran out first
    DidNotHalt { limit: usize },
}

/// The marked region of the tape, re-based so that its first cell is 0
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedTape {
    /// Cells from the first to the last mark; `"0"` for an empty tape
    pub bits: String,
    /// Address of the first character of `bits`
    pub offset: Address,
    /// Head position relative to `offset`
    pub head: Address,
}

/// Cut the tape down to the region between its first and last mark
pub fn normalize(machine: &Machine) -> NormalizedTape {
    if machine.tape().is_empty() {
        return NormalizedTape {
            bits: "0".to_string(),
            offset: 0,
            head: machine.head(),
        };
    }

    // Both ends of the span are marks, so the rendering needs no trimming
    let (left, right) = machine.span();
    NormalizedTape {
        bits: machine.range_string(left, right),
        offset: left,
        head: machine.head() - left,
    }
}

/// Value of a binary string.
///
/// Anything that is not a binary number counts as 0, matching how an empty
/// result is shown. Returns `None` only if the value does not fit in a `u128`.
pub fn binary_to_int(bits: &str) -> Option<u128> {
    if bits.is_empty() || !bits.chars().all(|ch| ch == '0' || ch == '1') {
        return Some(0);
    }
    u128::from_str_radix(bits, 2).ok()
}

/// Summary of a run over a binary input placed at address 0
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub input: String,
    pub steps: usize,
    pub outcome: Outcome,
    /// Union of the input range and the marked span
    pub range: (Address, Address),
    /// Cells over `range`
    pub raw: String,
    /// Marked span and its cells; `None` when the tape ended up blank
    pub marked: Option<(Address, Address, String)>,
    /// `raw` without leading zeros
    pub readable: String,
    pub head: Address,
}

impl RunReport {
    pub fn new(machine: &Machine, input: &str, outcome: Outcome) -> Self {
        let input_left: Address = 0;
        let input_right = input.chars().count() as Address - 1;

        let marked = if machine.tape().is_empty() {
            None
        } else {
            let (left, right) = machine.span();
            Some((left, right, machine.range_string(left, right)))
        };

        let range = match &marked {
            Some((left, right, _)) => ((*left).min(input_left), (*right).max(input_right)),
            None => (input_left, input_right),
        };
        let raw = machine.range_string(range.0, range.1);

        let trimmed = raw.trim_start_matches('0');
        let readable = if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        };

        RunReport {
            input: input.to_string(),
            steps: machine.steps(),
            outcome,
            range,
            raw,
            marked,
            readable,
            head: machine.head(),
        }
    }

    /// Address the report's cells are counted from
    pub fn offset(&self) -> Address {
        self.range.0
    }

    /// Head position relative to [`RunReport::offset`]
    pub fn normalized_head(&self) -> Address {
        self.head - self.offset()
    }

    pub fn input_value(&self) -> Option<u128> {
        binary_to_int(&self.input)
    }

    pub fn value(&self) -> Option<u128> {
        binary_to_int(&self.readable)
    }
}

fn write_value(f: &mut fmt::Formatter<'_>, value: Option<u128>) -> fmt::Result {
    match value {
        Some(v) => write!(f, "{}", v),
        None => write!(f, "too large"),
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Input: {} (decimal: ", self.input)?;
        write_value(f, self.input_value())?;
        writeln!(f, ")")?;
        writeln!(f, "Steps: {}", self.steps)?;
        match self.outcome {
            Outcome::Halted => writeln!(f, "Outcome: halted")?,
            Outcome::DidNotHalt { limit } => {
                writeln!(f, "Outcome: did not halt within {} steps", limit)?
            }
        }
        writeln!(f)?;
        writeln!(f, "Tape [{} .. {}]: {}", self.range.0, self.range.1, self.raw)?;
        match &self.marked {
            Some((left, right, cells)) => writeln!(f, "Marked [{} .. {}]: {}", left, right, cells)?,
            None => writeln!(f, "Marked: none")?,
        }
        writeln!(f)?;
        writeln!(f, "Binary: {}", self.readable)?;
        write!(f, "Decimal: ")?;
        write_value(f, self.value())?;
        writeln!(f)?;
        writeln!(f)?;
        writeln!(f, "Offset: {}", self.offset())?;
        writeln!(f, "Head: {}", self.head)?;
        write!(f, "Head (normalized): {}", self.normalized_head())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::config::MachineConfig;
    use crate::memory::Tape;

    fn run(source: &str, input: &str, head: Address) -> Machine {
        let config = MachineConfig::new().with_head(head);
        let mut machine =
            Machine::from_source(source, Tape::from_binary_str(input, 0), config).unwrap();
        machine.run().unwrap();
        machine
    }

    #[test]
    fn test_normalize_empty_tape() {
        let machine = run("start:\nRIGHT\nRIGHT\nHALT", "", 0);
        let norm = normalize(&machine);
        assert_eq!(norm.bits, "0");
        assert_eq!(norm.offset, 0);
        assert_eq!(norm.head, 2);
    }

    #[test]
    fn test_normalize_marked_region() {
        let machine = run("start:\nLEFT\nMARK\nHALT", "0101", 3);
        let norm = normalize(&machine);
        assert_eq!(norm.bits, "111");
        assert_eq!(norm.offset, 1);
        assert_eq!(norm.head, 1);
    }

    #[test]
    fn test_binary_to_int() {
        assert_eq!(binary_to_int("10011"), Some(19));
        assert_eq!(binary_to_int("0"), Some(0));
        assert_eq!(binary_to_int(""), Some(0));
        assert_eq!(binary_to_int("10a1"), Some(0));
        assert_eq!(binary_to_int(&"1".repeat(129)), None);
    }

    #[test]
    fn test_report_extends_to_input_range() {
        // erase the lower marked bit of "0110"
        let machine = run("start:\nLEFT\nERASE\nHALT", "0110", 3);
        let report = RunReport::new(&machine, "0110", Outcome::Halted);

        assert_eq!(report.range, (0, 3));
        assert_eq!(report.raw, "0100");
        assert_eq!(report.marked, Some((1, 1, "1".to_string())));
        assert_eq!(report.readable, "100");
        assert_eq!(report.value(), Some(4));
        assert_eq!(report.input_value(), Some(6));
        assert_eq!(report.normalized_head(), 2);
    }

    #[test]
    fn test_report_blank_tape() {
        let machine = run("start:\nERASE\nHALT", "1", 0);
        let report = RunReport::new(&machine, "1", Outcome::Halted);

        assert_eq!(report.marked, None);
        assert_eq!(report.raw, "0");
        assert_eq!(report.readable, "0");
        assert_eq!(report.value(), Some(0));
    }

    #[test]
    fn test_report_display() {
        let machine = run("start:\nLEFT\nMARK\nHALT", "1", 0);
        let report = RunReport::new(&machine, "1", Outcome::Halted);
        let text = report.to_string();

        assert!(text.contains("Input: 1 (decimal: 1)"));
        assert!(text.contains("Tape [-1 .. 0]: 11"));
        assert!(text.contains("Decimal: 3"));
        assert!(text.contains("Head (normalized): 0"));
    }
}
