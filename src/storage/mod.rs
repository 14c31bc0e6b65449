//! Named storage for programs and inputs
//!
//! Programs and tape inputs are kept in two independent namespaces, each a
//! mapping from a unique name to a text payload. [`Store`] is the contract the
//! rest of the crate relies on; [`MemoryStore`] implements it in memory.
//!
//! Saving under an existing name replaces the payload and moves the entry to
//! the end of the listing, the way a re-inserted row gets a fresh id.

use log::debug;
use rustc_hash::FxHashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Programs,
    Inputs,
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Namespace::Programs => write!(f, "program"),
            Namespace::Inputs => write!(f, "input"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("No {namespace} named '{name}'")]
    NotFound { namespace: Namespace, name: String },
}

/// Name → payload storage with one table per [`Namespace`]
pub trait Store {
    /// Insert or replace
    fn save(&mut self, namespace: Namespace, name: &str, payload: &str)
        -> Result<(), StorageError>;

    /// All names, oldest first
    fn list(&self, namespace: Namespace) -> Result<Vec<String>, StorageError>;

    fn load(&self, namespace: Namespace, name: &str) -> Result<String, StorageError>;

    fn save_program(&mut self, name: &str, code: &str) -> Result<(), StorageError> {
        self.save(Namespace::Programs, name, code)
    }

    fn save_input(&mut self, name: &str, data: &str) -> Result<(), StorageError> {
        self.save(Namespace::Inputs, name, data)
    }

    fn list_programs(&self) -> Result<Vec<String>, StorageError> {
        self.list(Namespace::Programs)
    }

    fn list_inputs(&self) -> Result<Vec<String>, StorageError> {
        self.list(Namespace::Inputs)
    }

    fn load_program(&self, name: &str) -> Result<String, StorageError> {
        self.load(Namespace::Programs, name)
    }

    fn load_input(&self, name: &str) -> Result<String, StorageError> {
        self.load(Namespace::Inputs, name)
    }
}

#[derive(Debug, Clone)]
struct Row {
    id: u64,
    payload: String,
}

#[derive(Debug, Clone, Default)]
struct Table {
    rows: FxHashMap<String, Row>,
    next_id: u64,
}

impl Table {
    fn upsert(&mut self, name: &str, payload: &str) {
        self.next_id += 1;
        self.rows.insert(
            name.to_string(),
            Row {
                id: self.next_id,
                payload: payload.to_string(),
            },
        );
    }

    fn names(&self) -> Vec<String> {
        let mut rows: Vec<(&String, u64)> =
            self.rows.iter().map(|(name, row)| (name, row.id)).collect();
        rows.sort_unstable_by_key(|&(_, id)| id);
        rows.into_iter().map(|(name, _)| name.clone()).collect()
    }
}

/// In-memory [`Store`]
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    programs: Table,
    inputs: Table,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self, namespace: Namespace) -> &Table {
        match namespace {
            Namespace::Programs => &self.programs,
            Namespace::Inputs => &self.inputs,
        }
    }

    fn table_mut(&mut self, namespace: Namespace) -> &mut Table {
        match namespace {
            Namespace::Programs => &mut self.programs,
            Namespace::Inputs => &mut self.inputs,
        }
    }
}

impl Store for MemoryStore {
    fn save(
        &mut self,
        namespace: Namespace,
        name: &str,
        payload: &str,
    ) -> Result<(), StorageError> {
        debug!("Saving {} '{}' ({} bytes)", namespace, name, payload.len());
        self.table_mut(namespace).upsert(name, payload);
        Ok(())
    }

    fn list(&self, namespace: Namespace) -> Result<Vec<String>, StorageError> {
        Ok(self.table(namespace).names())
    }

    fn load(&self, namespace: Namespace, name: &str) -> Result<String, StorageError> {
        self.table(namespace)
            .rows
            .get(name)
            .map(|row| row.payload.clone())
            .ok_or_else(|| StorageError::NotFound {
                namespace,
                name: name.to_string(),
            })
    }
}
