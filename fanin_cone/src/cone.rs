//! Lazy fan-in cone traversals.
//!
//! [`WireCone`] is the underlying depth-first walk: starting from one
//! canonical bit, it yields every bit reachable by repeatedly substituting a
//! bit with its driver's inputs. [`CellCone`] and [`ConeInputs`] ride on top
//! of it, filtering the same walk down to first-time driver cells and to
//! boundary bits respectively.
//!
//! All three are single-pass pull iterators with private state; none of them
//! mutate the index they borrow, so any number may run over one index at
//! the same time.

use std::collections::HashSet;

use fanin_netlist::{CellId, SigBit};

use crate::index::NetlistIndex;

/// One open ancestor cell on the DFS path: a positional cursor into its
/// sorted input-bit slice.
#[derive(Clone, Copy, Debug)]
struct Frame {
    cell: CellId,
    cursor: usize,
}

// ---------------------------------------------------------------------------
// WireCone
// ---------------------------------------------------------------------------

/// Depth-first pre-order walk over the fan-in cone of one bit.
///
/// The walk expands each driving cell at most once per traversal, which is
/// what bounds it on reconvergent fanout (and, defensively, on cyclic
/// input): the frontier stack can never hold more frames than the module
/// has cells. A bit consumed by several cells inside the cone is re-emitted
/// once per consuming edge, but the logic above it is only walked on the
/// first emission.
///
/// The order is fully determined by the index: each cell's inputs are
/// visited in their sorted order, so the same index and start bit always
/// replay the same sequence.
#[derive(Clone, Debug)]
pub struct WireCone<'i, 'm> {
    index: &'i NetlistIndex<'m>,
    cur: Option<SigBit>,
    stack: Vec<Frame>,
    expanded: HashSet<CellId>,
    opened: Option<CellId>,
}

impl<'i, 'm> WireCone<'i, 'm> {
    pub(crate) fn new(index: &'i NetlistIndex<'m>, start: SigBit) -> Self {
        Self {
            index,
            cur: Some(start),
            stack: Vec::new(),
            expanded: HashSet::new(),
            opened: None,
        }
    }

    /// Returns the index this traversal walks.
    #[must_use]
    pub fn index(&self) -> &'i NetlistIndex<'m> {
        self.index
    }

    /// Returns the cell whose expansion the last [`Iterator::next`] call
    /// triggered, if it triggered one.
    ///
    /// A cell is expanded exactly once per traversal, at the moment the walk
    /// moves past the first bit it drives; this is the capability
    /// [`CellCone`] filters on.
    #[must_use]
    pub fn last_opened(&self) -> Option<CellId> {
        self.opened
    }

    /// Returns true if `cell` has already been expanded by this traversal.
    #[must_use]
    pub fn was_expanded(&self, cell: CellId) -> bool {
        self.expanded.contains(&cell)
    }

    /// Returns true once the walk has produced its last bit.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.cur.is_none()
    }

    /// Opens a fresh frame over `cell`'s inputs and descends into the first
    /// one. With an empty input set the frame is exhausted immediately and
    /// the walk resumes in the enclosing frame.
    #[contracts::debug_requires(!self.expanded.contains(&cell))]
    #[contracts::debug_ensures(self.expanded.contains(&cell))]
    fn open(&mut self, cell: CellId) -> Option<SigBit> {
        self.expanded.insert(cell);
        self.opened = Some(cell);
        self.stack.push(Frame { cell, cursor: 0 });
        match self.index.input_bits(cell).first() {
            Some(&first) => Some(first),
            None => self.resume(),
        }
    }

    /// Advances the innermost open frame to its next input bit, popping
    /// exhausted frames. `None` means every frame is spent and the walk is
    /// done.
    fn resume(&mut self) -> Option<SigBit> {
        while let Some(frame) = self.stack.last_mut() {
            frame.cursor += 1;
            let cursor = frame.cursor;
            let inputs = self.index.input_bits(frame.cell);
            if let Some(&bit) = inputs.get(cursor) {
                return Some(bit);
            }
            self.stack.pop();
        }
        None
    }
}

impl Iterator for WireCone<'_, '_> {
    type Item = SigBit;

    fn next(&mut self) -> Option<SigBit> {
        let bit = self.cur.take()?;
        self.opened = None;
        self.cur = match self.index.driver_of(bit) {
            Some(cell) if !self.expanded.contains(&cell) => self.open(cell),
            _ => self.resume(),
        };
        Some(bit)
    }
}

// ---------------------------------------------------------------------------
// CellCone
// ---------------------------------------------------------------------------

/// The driving cells of a fan-in cone, each exactly once, in the order their
/// expansion is first triggered by the underlying [`WireCone`].
#[derive(Clone, Debug)]
pub struct CellCone<'i, 'm> {
    wires: WireCone<'i, 'm>,
}

impl<'i, 'm> CellCone<'i, 'm> {
    pub(crate) fn new(wires: WireCone<'i, 'm>) -> Self {
        Self { wires }
    }
}

impl Iterator for CellCone<'_, '_> {
    type Item = CellId;

    fn next(&mut self) -> Option<CellId> {
        // Every cell expansion happens while some bit is yielded, so
        // draining the wire walk and watching its step results surfaces each
        // driver exactly once. A driven start bit reports its driver on the
        // very first step.
        loop {
            self.wires.next()?;
            if let Some(cell) = self.wires.last_opened() {
                return Some(cell);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// ConeInputs
// ---------------------------------------------------------------------------

/// The boundary bits of a fan-in cone: every emission of the underlying
/// [`WireCone`] that has no recorded driver.
///
/// These are the bits the cone ultimately depends on — primary inputs,
/// sequential-cell outputs, and outputs of unrecognized cells. As with the
/// wire walk itself, a boundary bit consumed by several cells in the cone is
/// emitted once per consuming edge.
#[derive(Clone, Debug)]
pub struct ConeInputs<'i, 'm> {
    wires: WireCone<'i, 'm>,
}

impl<'i, 'm> ConeInputs<'i, 'm> {
    pub(crate) fn new(wires: WireCone<'i, 'm>) -> Self {
        Self { wires }
    }
}

impl Iterator for ConeInputs<'_, '_> {
    type Item = SigBit;

    fn next(&mut self) -> Option<SigBit> {
        loop {
            let bit = self.wires.next()?;
            if self.wires.index().driver_of(bit).is_none() {
                return Some(bit);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fanin_netlist::{CellLibrary, Module, WireId};

    #[test]
    fn test_cone_over_empty_module_is_singleton() {
        let module = Module::new("top");
        let index = NetlistIndex::build(&module, &CellLibrary::combinational());
        let bit = SigBit::new(WireId::new(0), 0);

        let bits: Vec<SigBit> = index.cone(bit).collect();
        assert_eq!(bits, vec![bit]);
        assert_eq!(index.cell_cone(bit).count(), 0);
        assert_eq!(index.cone_inputs(bit).collect::<Vec<_>>(), vec![bit]);
    }

    #[test]
    fn test_done_state_is_terminal() {
        let module = Module::new("top");
        let index = NetlistIndex::build(&module, &CellLibrary::combinational());
        let mut cone = index.cone(SigBit::new(WireId::new(0), 0));

        assert!(!cone.is_done());
        assert!(cone.next().is_some());
        assert!(cone.is_done());
        assert_eq!(cone.next(), None);
        assert_eq!(cone.next(), None);
    }

    #[test]
    fn test_expansion_is_observable_per_step() {
        let mut module = Module::new("top");
        let a = module.add_wire("a", 1);
        let y = module.add_wire("y", 1);
        let inv = module.add_cell("u0", "$not");
        module.connect_port(inv, "A", SigBit::new(a, 0)).unwrap();
        module.connect_port(inv, "Y", SigBit::new(y, 0)).unwrap();

        let index = NetlistIndex::build(&module, &CellLibrary::combinational());
        let mut cone = index.cone(SigBit::new(y, 0));

        assert!(!cone.was_expanded(inv));
        assert_eq!(cone.next(), Some(SigBit::new(y, 0)));
        assert_eq!(cone.last_opened(), Some(inv));
        assert!(cone.was_expanded(inv));

        assert_eq!(cone.next(), Some(SigBit::new(a, 0)));
        assert_eq!(cone.last_opened(), None);
        assert_eq!(cone.next(), None);
    }

    #[test]
    fn test_cell_with_no_inputs_still_counts_as_expanded() {
        let mut module = Module::new("top");
        let y = module.add_wire("y", 1);
        let cell = module.add_cell("u0", "$and");
        module.connect_port(cell, "Y", SigBit::new(y, 0)).unwrap();

        let index = NetlistIndex::build(&module, &CellLibrary::combinational());
        let bits: Vec<SigBit> = index.cone(SigBit::new(y, 0)).collect();
        assert_eq!(bits, vec![SigBit::new(y, 0)]);

        let cells: Vec<CellId> = index.cell_cone(SigBit::new(y, 0)).collect();
        assert_eq!(cells, vec![cell]);

        // The output bit is driven, so it is not a boundary bit.
        assert_eq!(index.cone_inputs(SigBit::new(y, 0)).count(), 0);
    }
}
