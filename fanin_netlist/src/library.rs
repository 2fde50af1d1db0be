//! The capability table for recognized cell types.

use std::collections::{BTreeSet, HashMap};

/// Per-type port directions.
#[derive(Clone, Debug, Default)]
struct PortDirs {
    inputs: BTreeSet<String>,
    outputs: BTreeSet<String>,
}

/// Reports which cell types are recognized primitives and which of their
/// ports drive signals.
///
/// Anything not registered here is invisible to driver indexing: its outputs
/// look like boundary bits. Keeping sequential primitives out of the table
/// is what restricts fan-in traversal to combinational logic.
#[derive(Clone, Debug, Default)]
pub struct CellLibrary {
    types: HashMap<String, PortDirs>,
}

impl CellLibrary {
    /// Creates an empty library that recognizes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard combinational primitive set.
    ///
    /// Single-output gates with `A`/`B`/`C`/`D` data inputs, `S` select on
    /// the mux, and `Y` output.
    #[must_use]
    pub fn combinational() -> Self {
        let mut lib = Self::new();
        for ty in ["$buf", "$not"] {
            lib.register(ty, &["A"], &["Y"]);
        }
        for ty in [
            "$and", "$nand", "$or", "$nor", "$xor", "$xnor", "$andnot", "$ornot",
        ] {
            lib.register(ty, &["A", "B"], &["Y"]);
        }
        lib.register("$mux", &["A", "B", "S"], &["Y"]);
        for ty in ["$aoi3", "$oai3"] {
            lib.register(ty, &["A", "B", "C"], &["Y"]);
        }
        for ty in ["$aoi4", "$oai4"] {
            lib.register(ty, &["A", "B", "C", "D"], &["Y"]);
        }
        lib
    }

    /// Registers a cell type with its input and output port names.
    ///
    /// Re-registering a type replaces its previous port table.
    pub fn register(&mut self, ty: impl Into<String>, inputs: &[&str], outputs: &[&str]) {
        self.types.insert(
            ty.into(),
            PortDirs {
                inputs: inputs.iter().map(|port| (*port).to_owned()).collect(),
                outputs: outputs.iter().map(|port| (*port).to_owned()).collect(),
            },
        );
    }

    /// Returns true if the cell type is a recognized primitive.
    #[must_use]
    pub fn is_known(&self, ty: &str) -> bool {
        self.types.contains_key(ty)
    }

    /// Returns true if `port` of `ty` drives a signal.
    ///
    /// Unknown types and unlisted ports get the input verdict, so a port is
    /// only ever treated as a driver when the library says so explicitly.
    #[must_use]
    pub fn port_is_output(&self, ty: &str, port: &str) -> bool {
        self.types
            .get(ty)
            .is_some_and(|dirs| dirs.outputs.contains(port))
    }

    /// Returns true if `port` of `ty` is a declared input.
    #[must_use]
    pub fn port_is_input(&self, ty: &str, port: &str) -> bool {
        self.types
            .get(ty)
            .is_some_and(|dirs| dirs.inputs.contains(port))
    }
}
