//! Named handlers that manifest targets can refer to.

use std::{fmt, sync::Arc};

use indexmap::IndexMap;
use texkit::{Serializer, Stdout};

/// Handlers available to `target = { handler = "<name>" }`.
#[derive(Clone, Default)]
pub struct Handlers {
    handlers: IndexMap<String, Arc<dyn Serializer>>,
}

impl Handlers {
    /// Create an empty handler set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handlers shipped with texkit (`stdout`).
    pub fn builtin() -> Self {
        let mut handlers = Self::new();
        handlers.register("stdout", Stdout);
        handlers
    }

    /// Register a handler under the given name, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, handler: impl Serializer + 'static) {
        self.handlers.insert(name.into(), Arc::new(handler));
    }

    /// Look up a handler by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Serializer>> {
        self.handlers.get(name).cloned()
    }

    /// Names of all registered handlers.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }
}

impl fmt::Debug for Handlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
