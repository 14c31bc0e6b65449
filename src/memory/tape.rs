//! Sparse binary tape
//!
//! Only marked cells are stored. An address that is not in the set reads as
//! [`Bit::Zero`], and writing zero removes the address, so the tape never holds
//! an explicit zero cell.

use rustc_hash::FxHashSet;
use std::fmt;

/// Tape address. The tape extends without bound in both directions.
pub type Address = i64;

/// Value of a single tape cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bit {
    Zero,
    One,
}

impl Bit {
    pub fn as_char(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }
}

impl From<bool> for Bit {
    fn from(marked: bool) -> Self {
        if marked {
            Bit::One
        } else {
            Bit::Zero
        }
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// The machine tape
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tape {
    marked: FxHashSet<Address>,
}

impl Tape {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tape from a binary string, placing `s[i]` at `left_index + i`.
    ///
    /// Only `'1'` characters mark a cell; every other character leaves it blank.
    pub fn from_binary_str(s: &str, left_index: Address) -> Self {
        let marked = s
            .chars()
            .zip(left_index..)
            .filter(|&(ch, _)| ch == '1')
            .map(|(_, address)| address)
            .collect();
        Tape { marked }
    }

    pub fn read(&self, address: Address) -> Bit {
        Bit::from(self.marked.contains(&address))
    }

    pub fn write(&mut self, address: Address, bit: Bit) {
        match bit {
            Bit::One => {
                self.marked.insert(address);
            }
            Bit::Zero => {
                self.marked.remove(&address);
            }
        }
    }

    /// Number of marked cells
    pub fn len(&self) -> usize {
        self.marked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marked.is_empty()
    }

    /// Lowest and highest marked addresses, or `(0, 0)` for an empty tape.
    ///
    /// `(0, 0)` is also the span of a tape whose only mark is at 0, so callers
    /// that care must check [`Tape::is_empty`].
    pub fn span(&self) -> (Address, Address) {
        let min = self.marked.iter().min();
        let max = self.marked.iter().max();
        match (min, max) {
            (Some(&min), Some(&max)) => (min, max),
            _ => (0, 0),
        }
    }

    /// Render cells `left..=right` as `'0'`/`'1'` characters.
    ///
    /// Returns an empty string when `left > right`.
    pub fn range_string(&self, left: Address, right: Address) -> String {
        if left > right {
            return String::new();
        }
        (left..=right).map(|addr| self.read(addr).as_char()).collect()
    }

    /// Marked addresses in ascending order
    pub fn marked_addresses(&self) -> Vec<Address> {
        let mut addresses: Vec<Address> = self.marked.iter().copied().collect();
        addresses.sort_unstable();
        addresses
    }
}

impl FromIterator<Address> for Tape {
    fn from_iter<I: IntoIterator<Item = Address>>(iter: I) -> Self {
        Tape {
            marked: iter.into_iter().collect(),
        }
    }
}

impl FromIterator<(Address, Bit)> for Tape {
    fn from_iter<I: IntoIterator<Item = (Address, Bit)>>(iter: I) -> Self {
        let mut tape = Tape::new();
        for (address, bit) in iter {
            tape.write(address, bit);
        }
        tape
    }
}
