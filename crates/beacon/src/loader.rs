//! Module loading seam used by `bring`

use indexmap::IndexMap;

use crate::ast::Node;

/// Turns a source path into top-level statements.
///
/// Reading and parsing source text happens outside the runtime; an
/// embedder plugs its loader in with [`Interpreter::with_loader`].
///
/// [`Interpreter::with_loader`]: crate::Interpreter::with_loader
pub trait ModuleLoader {
    /// Load and parse the module at `path`.
    fn load(&self, path: &str) -> anyhow::Result<Vec<Node>>;
}

impl<F> ModuleLoader for F
where
    F: Fn(&str) -> anyhow::Result<Vec<Node>>,
{
    fn load(&self, path: &str) -> anyhow::Result<Vec<Node>> {
        self(path)
    }
}

/// Loader serving pre-built modules from memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    modules: IndexMap<String, Vec<Node>>,
}

impl MemoryLoader {
    /// Empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module under `path`.
    pub fn with_module(mut self, path: impl Into<String>, statements: Vec<Node>) -> Self {
        self.modules.insert(path.into(), statements);
        self
    }
}

impl ModuleLoader for MemoryLoader {
    fn load(&self, path: &str) -> anyhow::Result<Vec<Node>> {
        self.modules
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no module at `{}`", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_loader() {
        let loader = MemoryLoader::new().with_module("m.bcn", vec![Node::number(1.0)]);
        assert_eq!(loader.load("m.bcn").unwrap(), vec![Node::number(1.0)]);
        let err = loader.load("other.bcn").unwrap_err();
        assert_eq!(err.to_string(), "no module at `other.bcn`");
    }

    #[test]
    fn test_closure_loader() {
        let loader = |path: &str| -> anyhow::Result<Vec<Node>> { Ok(vec![Node::string(path)]) };
        assert_eq!(loader.load("x").unwrap(), vec![Node::string("x")]);
    }
}
