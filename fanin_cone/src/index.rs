//! The driver index built once over a module snapshot.

use std::collections::{BTreeSet, HashMap};
use std::time::Instant;

use fanin_netlist::{Cell, CellId, CellLibrary, Module, SigBit, SigMap};

use crate::cone::{CellCone, ConeInputs, WireCone};

/// Read-only connectivity index over one module.
///
/// Two tables are derived in a single pass over the cell arena: which
/// recognized cell drives each signal bit, and the canonical input bits each
/// recognized cell consumes. Cells the [`CellLibrary`] does not know are
/// skipped entirely, so their outputs behave like boundary bits downstream.
///
/// The index is immutable after construction and safe to share across
/// threads; every traversal constructed from it carries its own private
/// state.
///
/// No validation happens here. If several recognized cells drive the same
/// bit, the last one in arena order wins and nothing is reported; rejecting
/// such netlists is the caller's business.
#[derive(Clone, Debug)]
pub struct NetlistIndex<'m> {
    module: &'m Module,
    sigmap: SigMap,
    driver_of: HashMap<SigBit, CellId>,
    inputs_of: HashMap<CellId, Vec<SigBit>>,
}

impl<'m> NetlistIndex<'m> {
    /// Builds the index, deriving the signal map from the module's own alias
    /// connections.
    #[must_use]
    pub fn build(module: &'m Module, library: &CellLibrary) -> Self {
        let sigmap = SigMap::build(module);
        Self::with_sigmap(module, library, sigmap)
    }

    /// Builds the index with a caller-supplied signal map.
    #[must_use]
    pub fn with_sigmap(module: &'m Module, library: &CellLibrary, sigmap: SigMap) -> Self {
        let start = Instant::now();

        let mut driver_of: HashMap<SigBit, CellId> = HashMap::new();
        let mut inputs_of: HashMap<CellId, Vec<SigBit>> = HashMap::new();

        for (id, cell) in module.cells() {
            if !library.is_known(cell.ty()) {
                continue;
            }

            let mut inputs: BTreeSet<SigBit> = BTreeSet::new();
            let mut outputs: BTreeSet<SigBit> = BTreeSet::new();
            for (port, spec) in cell.connections() {
                let bits = sigmap.expand(spec);
                if library.port_is_output(cell.ty(), port) {
                    outputs.extend(bits);
                } else {
                    inputs.extend(bits);
                }
            }

            inputs_of.insert(id, inputs.into_iter().collect());
            for bit in outputs {
                driver_of.insert(bit, id);
            }
        }

        tracing::debug!(
            "driver index built in {:?} for module `{}`: {} of {} cells indexed",
            start.elapsed(),
            module.name(),
            inputs_of.len(),
            module.num_cells()
        );

        Self {
            module,
            sigmap,
            driver_of,
            inputs_of,
        }
    }

    /// Returns the module this index was built over.
    #[must_use]
    pub fn module(&self) -> &'m Module {
        self.module
    }

    /// Returns the signal map used to canonicalize bits.
    #[must_use]
    pub const fn sigmap(&self) -> &SigMap {
        &self.sigmap
    }

    /// Returns the recognized cell driving `bit`, if any.
    ///
    /// The bit is canonicalized first, so aliased references resolve to the
    /// same driver.
    #[must_use]
    pub fn driver_of(&self, bit: SigBit) -> Option<CellId> {
        self.driver_of
            .get(&self.sigmap.canonical_bit(bit))
            .copied()
    }

    /// Like [`NetlistIndex::driver_of`], but resolves the id to the cell.
    #[must_use]
    pub fn driver_cell(&self, bit: SigBit) -> Option<&'m Cell> {
        self.driver_of(bit).map(|id| self.module.cell(id))
    }

    /// Returns the canonical input bits of an indexed cell, sorted and
    /// deduplicated. Empty for cells the index does not know.
    #[must_use]
    pub fn input_bits(&self, cell: CellId) -> &[SigBit] {
        self.inputs_of.get(&cell).map_or(&[], Vec::as_slice)
    }

    /// Returns the number of cells entered into the index.
    #[must_use]
    pub fn num_drivers(&self) -> usize {
        self.inputs_of.len()
    }

    // -- entry points -------------------------------------------------------

    /// Starts a wire cone traversal from `bit`.
    ///
    /// The start bit is canonicalized; the traversal yields it first and then
    /// every bit reachable by substituting a bit with its driver's inputs,
    /// in depth-first pre-order. Single-pass; construct again to re-walk.
    #[must_use]
    pub fn cone(&self, bit: SigBit) -> WireCone<'_, 'm> {
        WireCone::new(self, self.sigmap.canonical_bit(bit))
    }

    /// Starts a cell cone traversal from `bit`: each driving cell in the
    /// fan-in cone, exactly once, in first-encounter order.
    #[must_use]
    pub fn cell_cone(&self, bit: SigBit) -> CellCone<'_, 'm> {
        CellCone::new(self.cone(bit))
    }

    /// Starts a boundary-input traversal from `bit`: the driverless bits the
    /// cone ultimately depends on, one emission per consuming edge.
    #[must_use]
    pub fn cone_inputs(&self, bit: SigBit) -> ConeInputs<'_, 'm> {
        ConeInputs::new(self.cone(bit))
    }
}
