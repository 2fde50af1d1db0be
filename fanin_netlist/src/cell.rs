//! Cell instances and their identifiers.

use indexmap::IndexMap;
use std::fmt;

use crate::wire::SigSpec;

// ---------------------------------------------------------------------------
// CellId
// ---------------------------------------------------------------------------

/// Arena index of a cell within its owning module.
///
/// Stands in for reference identity: two ids are the same cell iff they are
/// equal, and an id stays valid for the lifetime of the module.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId {
    inner: u32,
}

impl CellId {
    /// Creates a cell id from a raw arena slot.
    pub const fn new(id: u32) -> Self {
        Self { inner: id }
    }

    /// Returns the index as a usize for array access.
    pub const fn as_usize(self) -> usize {
        self.inner as usize
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.inner)
    }
}

impl From<usize> for CellId {
    #[inline]
    fn from(id: usize) -> Self {
        Self { inner: id as u32 }
    }
}

impl From<CellId> for usize {
    #[inline]
    fn from(id: CellId) -> Self {
        id.inner as Self
    }
}

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// An instance of a logic primitive inside a module.
///
/// Port connections keep their insertion order, so enumerating them is
/// reproducible across runs of the same construction sequence.
#[derive(Clone, Debug)]
pub struct Cell {
    name: String,
    ty: String,
    connections: IndexMap<String, SigSpec>,
}

impl Cell {
    pub(crate) fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            connections: IndexMap::new(),
        }
    }

    /// Returns the instance name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the cell type name, e.g. `$and`.
    #[must_use]
    pub fn ty(&self) -> &str {
        &self.ty
    }

    /// Returns the signal connected to `port`, if any.
    #[must_use]
    pub fn connection(&self, port: &str) -> Option<&SigSpec> {
        self.connections.get(port)
    }

    /// Iterates port connections in insertion order.
    pub fn connections(&self) -> impl Iterator<Item = (&str, &SigSpec)> {
        self.connections
            .iter()
            .map(|(port, spec)| (port.as_str(), spec))
    }

    pub(crate) fn has_connection(&self, port: &str) -> bool {
        self.connections.contains_key(port)
    }

    pub(crate) fn set_connection(&mut self, port: impl Into<String>, spec: SigSpec) {
        self.connections.insert(port.into(), spec);
    }
}
