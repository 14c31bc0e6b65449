// Running stored programs against stored inputs

use super::{Outcome, RunReport};
use crate::interpreter::config::MachineConfig;
use crate::interpreter::engine::Machine;
use crate::interpreter::errors::RuntimeError;
use crate::memory::{Address, Tape};
use crate::parser::parser::ParseError;
use crate::storage::{StorageError, Store};
use log::debug;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("Input must be a non-empty binary string (for example 1011), got '{0}'")]
    InvalidInput(String),
}

/// Run program text over a binary input string.
///
/// The input is written from address 0 and the head starts on its last
/// character. Running out of steps is reported as [`Outcome::DidNotHalt`];
/// every other fault is an error.
pub fn run_input(
    code: &str,
    data: &str,
    config: MachineConfig,
) -> Result<RunReport, SessionError> {
    if data.is_empty() || !data.chars().all(|ch| ch == '0' || ch == '1') {
        return Err(SessionError::InvalidInput(data.to_string()));
    }

    let tape = Tape::from_binary_str(data, 0);
    let head = data.len() as Address - 1;
    let mut machine = Machine::from_source(code, tape, config.with_head(head))?;

    let outcome = match machine.run() {
        Ok(_) => Outcome::Halted,
        Err(err) if err.is_step_limit() => Outcome::DidNotHalt {
            limit: machine.step_limit(),
        },
        Err(err) => return Err(err.into()),
    };
    debug!("Run finished after {} steps: {:?}", machine.steps(), outcome);

    Ok(RunReport::new(&machine, data, outcome))
}

/// Load a program and an input by name and run them
pub fn run_stored<S: Store + ?Sized>(
    store: &S,
    program_name: &str,
    input_name: &str,
    config: MachineConfig,
) -> Result<RunReport, SessionError> {
    let code = store.load_program(program_name)?;
    let data = store.load_input(input_name)?;
    debug!("Running program '{}' on input '{}'", program_name, input_name);
    run_input(&code, &data, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, Namespace};

    #[test]
    fn test_full_cycle_run() {
        let mut store = MemoryStore::new();
        store
            .save_program("double_mark", "start:\n    MARK\n    RIGHT\n    MARK\n    HALT\n")
            .unwrap();
        store.save_input("input_zero", "0").unwrap();

        let report = run_stored(&store, "double_mark", "input_zero", MachineConfig::default())
            .unwrap();

        assert_eq!(report.outcome, Outcome::Halted);
        assert!(report.marked.as_ref().unwrap().2.matches('1').count() >= 2);
        assert_eq!(report.readable, "11");
    }

    #[test]
    fn test_missing_names() {
        let mut store = MemoryStore::new();
        store.save_input("x", "1").unwrap();

        let err = run_stored(&store, "nope", "x", MachineConfig::default()).unwrap_err();
        assert_eq!(
            err,
            SessionError::Storage(StorageError::NotFound {
                namespace: Namespace::Programs,
                name: "nope".to_string(),
            })
        );
    }

    #[test]
    fn test_invalid_input() {
        let code = "start:\nHALT";
        assert!(matches!(
            run_input(code, "", MachineConfig::default()),
            Err(SessionError::InvalidInput(_))
        ));
        assert!(matches!(
            run_input(code, "10x", MachineConfig::default()),
            Err(SessionError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_step_limit_is_an_outcome() {
        let config = MachineConfig::new().with_step_limit(50);
        let report = run_input("spin:\nGOTO spin", "1", config).unwrap();

        assert_eq!(report.outcome, Outcome::DidNotHalt { limit: 50 });
        assert_eq!(report.steps, 50);
    }

    #[test]
    fn test_other_faults_are_errors() {
        let err = run_input("start:\nMARK", "1", MachineConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Runtime(RuntimeError::ProgramCounterOutOfRange { .. })
        ));

        let err = run_input("MARK", "1", MachineConfig::default()).unwrap_err();
        assert_eq!(err, SessionError::Parse(ParseError::EmptyProgram));
    }

    #[test]
    fn test_head_starts_on_last_character() {
        let report = run_input("start:\nRIGHT\nMARK\nHALT", "101", MachineConfig::default())
            .unwrap();
        assert_eq!(report.head, 3);
        assert_eq!(report.readable, "1011");
    }
}
