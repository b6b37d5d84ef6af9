//! Per-scope symbol tables

use super::{NodeId, Span};
use crate::interp::Warning;

/// One `(name value)` entry of a `let`
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub id: String,
    /// Bound expression, owned by the arena
    pub value: NodeId,
    pub span: Span,
}

/// Bindings introduced by a single scope, in insertion order.
///
/// Names are unique within one table: the first insertion of a name wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolTable {
    entries: Vec<Binding>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find `name` among this table's own entries
    pub fn lookup(&self, name: &str) -> Option<&Binding> {
        self.entries.iter().find(|binding| binding.id == name)
    }

    /// Add a binding unless its name is already bound here.
    ///
    /// A duplicate leaves the table unchanged and comes back as a warning.
    pub fn insert(&mut self, binding: Binding) -> Result<(), Warning> {
        if self.lookup(&binding.id).is_some() {
            return Err(Warning::duplicate_binding(&binding.id).at(binding.span));
        }
        self.entries.push(binding);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interp::WarningKind;

    fn binding(id: &str, value: usize) -> Binding {
        Binding {
            id: id.to_string(),
            value: NodeId(value),
            span: Span::default(),
        }
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut table = SymbolTable::new();
        table.insert(binding("x", 1)).unwrap();
        table.insert(binding("y", 2)).unwrap();
        assert_eq!(table.lookup("x").map(|b| b.value), Some(NodeId(1)));
        assert_eq!(table.lookup("y").map(|b| b.value), Some(NodeId(2)));
        assert!(table.lookup("z").is_none());
    }

    #[test]
    fn test_duplicate_keeps_first() {
        let mut table = SymbolTable::new();
        table.insert(binding("x", 1)).unwrap();
        let warning = table.insert(binding("x", 2)).unwrap_err();
        assert_eq!(warning.kind, WarningKind::DuplicateBinding);
        assert!(warning.message.contains('x'));
        assert_eq!(table.lookup("x").map(|b| b.value), Some(NodeId(1)));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_iter_preserves_insertion_order() {
        let mut table = SymbolTable::new();
        for (i, name) in ["c", "a", "b"].iter().enumerate() {
            table.insert(binding(name, i)).unwrap();
        }
        let names: Vec<_> = table.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_empty_table() {
        let table = SymbolTable::new();
        assert!(table.is_empty());
        assert!(table.lookup("anything").is_none());
    }
}
