//! Built-in serialization handlers.
//!
//! Handlers receive units instead of having them written to a file. Any
//! closure `Fn(&dyn Serializable) -> Result<(), HandlerError>` works as a
//! handler too; these cover the common cases.

use std::{
    io::{self, Write},
    sync::{Arc, Mutex, PoisonError},
};

use texkit_core::{HandlerError, Serializable, Serializer};

/// Prints every unit it receives to stdout, one per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stdout;

impl Serializer for Stdout {
    fn serialize(&self, unit: &dyn Serializable) -> Result<(), HandlerError> {
        let mut out = io::stdout().lock();
        writeln!(out, "{}", unit.serialize())?;
        Ok(())
    }
}

/// Collects serialized units in memory, in the order they are received.
///
/// Clones share the same buffer, so one clone can be used as a target while
/// another one is kept around to inspect the output.
#[derive(Debug, Clone, Default)]
pub struct Collector {
    entries: Arc<Mutex<Vec<String>>>,
}

impl Collector {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a copy of the collected entries.
    pub fn entries(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Take the collected entries, leaving the collector empty.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.entries.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Serializer for Collector {
    fn serialize(&self, unit: &dyn Serializable) -> Result<(), HandlerError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(unit.serialize());
        Ok(())
    }
}
