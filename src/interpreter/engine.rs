// Execution engine for the Post machine

use crate::interpreter::config::MachineConfig;
use crate::interpreter::constants::TRACE_WINDOW;
use crate::interpreter::errors::RuntimeError;
use crate::memory::{Address, Bit, Tape};
use crate::parser::ast::{Command, Instruction, Program, Target};
use crate::parser::parser::{ParseError, Parser};
use crate::snapshot::{Snapshot, SnapshotManager};
use log::{debug, trace};

/// Lifecycle of a machine. `Halted` and `Faulted` are terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MachineState {
    Running,
    Halted,
    Faulted(RuntimeError),
}

/// The Post machine: a program, a tape and a single head
pub struct Machine {
    /// Parsed program with resolved branch targets
    program: Program,

    /// Tape, exclusively owned; only `step` writes to it
    tape: Tape,

    /// Head position
    head: Address,

    /// Index of the next instruction to execute
    pc: usize,

    /// Steps executed so far
    steps: usize,

    /// Maximum number of steps before the run is aborted
    step_limit: usize,

    state: MachineState,

    /// Recent per-step snapshots (empty unless enabled in the config)
    history: SnapshotManager,
}

impl Machine {
    /// Create a machine positioned at the program's entry label
    pub fn new(program: Program, tape: Tape, config: MachineConfig) -> Self {
        let pc = program.entry_point();
        debug!(
            "Loaded program: {} instructions, {} labels, entry '{}' at {}",
            program.len(),
            program.labels().count(),
            program.entry_label(),
            pc
        );

        Machine {
            program,
            tape,
            head: config.head,
            pc,
            steps: 0,
            step_limit: config.step_limit,
            state: MachineState::Running,
            history: SnapshotManager::new(config.history_limit),
        }
    }

    /// Parse `source` and build a machine over `tape`
    pub fn from_source(source: &str, tape: Tape, config: MachineConfig) -> Result<Self, ParseError> {
        let program = Parser::new(source).parse_program()?;
        Ok(Self::new(program, tape, config))
    }

    /// Run until the machine halts.
    ///
    /// Returns `Ok(true)` once halted. Any fault stops the run and is returned
    /// as is; `StepLimitExceeded` is how a non-terminating program ends.
    pub fn run(&mut self) -> Result<bool, RuntimeError> {
        while !self.is_halted() {
            self.step()?;
        }
        Ok(true)
    }

    /// Execute a single instruction.
    ///
    /// A halted machine ignores the call. A faulted machine returns the same
    /// fault again without touching its state.
    pub fn step(&mut self) -> Result<(), RuntimeError> {
        match &self.state {
            MachineState::Halted => return Ok(()),
            MachineState::Faulted(err) => return Err(err.clone()),
            MachineState::Running => {}
        }

        match self.execute_next() {
            Ok(()) => {
                if self.history.capacity() > 0 {
                    let snapshot = self.snapshot(TRACE_WINDOW);
                    self.history.push(snapshot);
                }
                Ok(())
            }
            Err(err) => {
                debug!("Execution faulted at step {}: {}", self.steps, err);
                self.state = MachineState::Faulted(err.clone());
                Err(err)
            }
        }
    }

    fn execute_next(&mut self) -> Result<(), RuntimeError> {
        if self.steps >= self.step_limit {
            return Err(RuntimeError::StepLimitExceeded {
                limit: self.step_limit,
            });
        }

        let instruction =
            self.program
                .get(self.pc)
                .ok_or(RuntimeError::ProgramCounterOutOfRange {
                    pc: self.pc,
                    len: self.program.len(),
                })?;

        self.steps += 1;
        trace!(
            "step={} pc={} head={} {}",
            self.steps,
            self.pc,
            self.head,
            instruction
        );

        let next_pc = match &instruction.command {
            Command::Mark => {
                self.tape.write(self.head, Bit::One);
                self.pc + 1
            }
            Command::Erase => {
                self.tape.write(self.head, Bit::Zero);
                self.pc + 1
            }
            Command::Left => {
                self.head = self
                    .head
                    .checked_sub(1)
                    .ok_or(RuntimeError::HeadOverflow { head: self.head })?;
                self.pc + 1
            }
            Command::Right => {
                self.head = self
                    .head
                    .checked_add(1)
                    .ok_or(RuntimeError::HeadOverflow { head: self.head })?;
                self.pc + 1
            }
            Command::If1 | Command::If0 => {
                require_label(instruction)?;
                let wanted = if instruction.command == Command::If1 {
                    Bit::One
                } else {
                    Bit::Zero
                };
                // The label is only looked up when the branch is taken
                if self.tape.read(self.head) == wanted {
                    jump_target(instruction)?
                } else {
                    self.pc + 1
                }
            }
            Command::Goto => jump_target(instruction)?,
            Command::Halt => {
                self.state = MachineState::Halted;
                debug!("Halted after {} steps", self.steps);
                self.pc
            }
            Command::Unknown(token) => {
                return Err(RuntimeError::UnknownCommand {
                    command: token.clone(),
                    location: instruction.location,
                });
            }
        };

        self.pc = next_pc;
        Ok(())
    }

    // ========== State capture ==========

    /// Capture the current state with `window` cells on each side of the head
    pub fn snapshot(&self, window: Address) -> Snapshot {
        Snapshot::capture(self.steps, self.pc, self.head, &self.tape, window)
    }

    /// One-line description of the current state
    pub fn format_state(&self, window: Address) -> String {
        self.snapshot(window).to_string()
    }

    /// Recent per-step snapshots
    pub fn history(&self) -> &SnapshotManager {
        &self.history
    }

    // ========== Tape queries ==========

    /// Lowest and highest marked addresses; `(0, 0)` when the tape is empty
    pub fn span(&self) -> (Address, Address) {
        self.tape.span()
    }

    /// Cells `left..=right` as a string of `0`/`1`
    pub fn range_string(&self, left: Address, right: Address) -> String {
        self.tape.range_string(left, right)
    }

    pub fn cell(&self, address: Address) -> Bit {
        self.tape.read(address)
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Consume the machine and hand back its tape
    pub fn into_tape(self) -> Tape {
        self.tape
    }

    // ========== Getters ==========

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn head(&self) -> Address {
        self.head
    }

    pub fn pc(&self) -> usize {
        self.pc
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn step_limit(&self) -> usize {
        self.step_limit
    }

    pub fn state(&self) -> &MachineState {
        &self.state
    }

    pub fn is_halted(&self) -> bool {
        self.state == MachineState::Halted
    }

    /// The fault that stopped the machine, if any
    pub fn fault(&self) -> Option<&RuntimeError> {
        match &self.state {
            MachineState::Faulted(err) => Some(err),
            _ => None,
        }
    }
}

fn require_label(instruction: &Instruction) -> Result<(), RuntimeError> {
    if instruction.target == Target::Missing {
        return Err(RuntimeError::MissingLabelArgument {
            command: instruction.command.to_string(),
            location: instruction.location,
        });
    }
    Ok(())
}

fn jump_target(instruction: &Instruction) -> Result<usize, RuntimeError> {
    match &instruction.target {
        Target::Resolved { index, .. } => Ok(*index),
        Target::Undefined(label) => Err(RuntimeError::UndefinedLabel {
            label: label.clone(),
            location: instruction.location,
        }),
        Target::Missing => Err(RuntimeError::MissingLabelArgument {
            command: instruction.command.to_string(),
            location: instruction.location,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::SourceLocation;

    fn machine(source: &str) -> Machine {
        Machine::from_source(source, Tape::new(), MachineConfig::default()).unwrap()
    }

    #[test]
    fn test_halt_only() {
        let mut m = machine("start:\nHALT");
        assert_eq!(m.run(), Ok(true));
        assert_eq!(m.steps(), 1);
        assert_eq!(m.head(), 0);
        assert_eq!(m.pc(), 0);
        assert!(m.tape().is_empty());
    }

    #[test]
    fn test_step_after_halt_is_noop() {
        let mut m = machine("start:\nMARK\nHALT");
        m.run().unwrap();
        let before = (m.steps(), m.pc(), m.head(), m.tape().clone());
        for _ in 0..5 {
            assert_eq!(m.step(), Ok(()));
        }
        assert_eq!((m.steps(), m.pc(), m.head(), m.tape().clone()), before);
    }

    #[test]
    fn test_fault_is_sticky() {
        let mut m = machine("start:\nRIGHT\nFLY");
        assert_eq!(m.step(), Ok(()));
        let err = m.step().unwrap_err();
        assert_eq!(
            err,
            RuntimeError::UnknownCommand {
                command: "FLY".to_string(),
                location: SourceLocation::new(3),
            }
        );
        let steps = m.steps();
        assert_eq!(m.step(), Err(err.clone()));
        assert_eq!(m.run(), Err(err.clone()));
        assert_eq!(m.steps(), steps);
        assert_eq!(m.fault(), Some(&err));
    }

    #[test]
    fn test_falling_off_the_end() {
        let mut m = machine("start:\nMARK");
        assert_eq!(
            m.run(),
            Err(RuntimeError::ProgramCounterOutOfRange { pc: 1, len: 1 })
        );
        assert_eq!(m.steps(), 1);
        assert_eq!(m.cell(0), Bit::One);
    }

    #[test]
    fn test_trailing_label_is_out_of_range() {
        let mut m = machine("start:\nGOTO end\nend:");
        assert_eq!(
            m.run(),
            Err(RuntimeError::ProgramCounterOutOfRange { pc: 1, len: 1 })
        );
    }

    #[test]
    fn test_missing_label_argument() {
        // raised even when the branch would not be taken
        let mut m = machine("start:\nIF1\nHALT");
        assert!(matches!(
            m.run(),
            Err(RuntimeError::MissingLabelArgument { ref command, .. }) if command == "IF1"
        ));

        let mut m = machine("start:\nGOTO");
        assert!(matches!(
            m.run(),
            Err(RuntimeError::MissingLabelArgument { ref command, .. }) if command == "GOTO"
        ));
    }

    #[test]
    fn test_untaken_branch_to_undefined_label() {
        // cell is 0, so IF1 falls through without looking up "missing"
        let mut m = machine("start:\nIF1 missing\nHALT");
        assert_eq!(m.run(), Ok(true));
        assert_eq!(m.steps(), 2);

        let mut m = machine("start:\nIF0 missing\nHALT");
        assert!(matches!(
            m.run(),
            Err(RuntimeError::UndefinedLabel { ref label, .. }) if label == "missing"
        ));
    }

    #[test]
    fn test_step_limit_boundary() {
        let config = MachineConfig::new().with_step_limit(3);
        let mut m = Machine::from_source("loop:\nGOTO loop", Tape::new(), config).unwrap();
        assert_eq!(m.run(), Err(RuntimeError::StepLimitExceeded { limit: 3 }));
        assert_eq!(m.steps(), 3);
    }

    #[test]
    fn test_zero_step_limit() {
        let config = MachineConfig::new().with_step_limit(0);
        let mut m = Machine::from_source("start:\nHALT", Tape::new(), config).unwrap();
        assert_eq!(m.step(), Err(RuntimeError::StepLimitExceeded { limit: 0 }));
        assert_eq!(m.steps(), 0);
    }

    #[test]
    fn test_head_overflow() {
        let config = MachineConfig::new().with_head(Address::MIN);
        let mut m = Machine::from_source("start:\nLEFT\nHALT", Tape::new(), config).unwrap();
        assert_eq!(
            m.run(),
            Err(RuntimeError::HeadOverflow { head: Address::MIN })
        );
        assert_eq!(m.head(), Address::MIN);
    }

    #[test]
    fn test_entry_point_is_first_declared_label() {
        let source = "second:\nHALT\nfirst:\nMARK\nGOTO second";
        // "second" is declared first, so the MARK never runs
        let mut m = machine(source);
        m.run().unwrap();
        assert!(m.tape().is_empty());
        assert_eq!(m.steps(), 1);
    }

    #[test]
    fn test_history_records_steps() {
        let config = MachineConfig::new().with_history(2);
        let mut m =
            Machine::from_source("start:\nMARK\nRIGHT\nMARK\nHALT", Tape::new(), config).unwrap();
        m.run().unwrap();

        let history = m.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history.dropped(), 2);
        assert_eq!(history.latest().map(|s| s.step), Some(4));
        assert_eq!(history.get(0).map(|s| s.step), Some(3));
    }

    #[test]
    fn test_format_state() {
        let config = MachineConfig::new().with_head(1);
        let mut m =
            Machine::from_source("start:\nMARK\nHALT", Tape::from_binary_str("1", 0), config)
                .unwrap();
        m.step().unwrap();
        assert_eq!(m.format_state(1), "step=   1 pc=  1 head=   1 tape[0..2]=110");
    }
}
