//! The owning container for one flattened circuit scope.

use crate::cell::{Cell, CellId};
use crate::error::NetlistError;
use crate::wire::{SigBit, SigSpec, Wire, WireId};

/// A flattened module: arenas of wires and cells plus the list of
/// point-to-point alias connections between signals.
///
/// The module owns everything; derived structures such as signal maps and
/// driver indexes borrow it and must not outlive it. Arena ids are handed
/// out in insertion order and stay stable for the module's lifetime.
#[derive(Clone, Debug, Default)]
pub struct Module {
    name: String,
    wires: Vec<Wire>,
    cells: Vec<Cell>,
    connections: Vec<(SigSpec, SigSpec)>,
}

impl Module {
    /// Creates an empty module.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            wires: Vec::new(),
            cells: Vec::new(),
            connections: Vec::new(),
        }
    }

    /// Returns the module name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    // -- wires --------------------------------------------------------------

    /// Adds a wire and returns its arena id.
    pub fn add_wire(&mut self, name: impl Into<String>, width: u32) -> WireId {
        let id = WireId::from(self.wires.len());
        self.wires.push(Wire::new(name, width));
        id
    }

    /// Returns the wire for an id handed out by [`Module::add_wire`].
    #[must_use]
    pub fn wire(&self, id: WireId) -> &Wire {
        &self.wires[id.as_usize()]
    }

    /// Looks up a wire by name.
    ///
    /// # Errors
    /// Returns [`NetlistError::UnknownWire`] if no wire has that name.
    pub fn find_wire(&self, name: &str) -> Result<WireId, NetlistError> {
        self.wires
            .iter()
            .position(|wire| wire.name() == name)
            .map(WireId::from)
            .ok_or_else(|| NetlistError::UnknownWire(name.to_owned()))
    }

    /// Returns the full bit vector of a wire, LSB first.
    #[must_use]
    pub fn wire_bits(&self, id: WireId) -> SigSpec {
        SigSpec::wire(id, self.wire(id).width())
    }

    /// Iterates wires in arena order.
    pub fn wires(&self) -> impl Iterator<Item = (WireId, &Wire)> {
        self.wires
            .iter()
            .enumerate()
            .map(|(idx, wire)| (WireId::from(idx), wire))
    }

    /// Formats a bit as `name[offset]` using the owning wire's name.
    #[must_use]
    pub fn bit_name(&self, bit: SigBit) -> String {
        format!("{}[{}]", self.wire(bit.wire()).name(), bit.offset())
    }

    // -- cells --------------------------------------------------------------

    /// Adds a cell with no connections yet and returns its arena id.
    pub fn add_cell(&mut self, name: impl Into<String>, ty: impl Into<String>) -> CellId {
        let id = CellId::from(self.cells.len());
        self.cells.push(Cell::new(name, ty));
        id
    }

    /// Returns the cell for an id handed out by [`Module::add_cell`].
    #[must_use]
    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.as_usize()]
    }

    /// Iterates cells in arena order.
    pub fn cells(&self) -> impl Iterator<Item = (CellId, &Cell)> {
        self.cells
            .iter()
            .enumerate()
            .map(|(idx, cell)| (CellId::from(idx), cell))
    }

    /// Returns the number of cells.
    #[must_use]
    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    /// Connects a signal to a named port of a cell.
    ///
    /// # Errors
    /// Returns [`NetlistError::PortReconnected`] if the port already has a
    /// connection.
    pub fn connect_port(
        &mut self,
        cell: CellId,
        port: impl Into<String>,
        spec: impl Into<SigSpec>,
    ) -> Result<(), NetlistError> {
        let port = port.into();
        let slot = &mut self.cells[cell.as_usize()];
        if slot.has_connection(&port) {
            return Err(NetlistError::PortReconnected { cell, port });
        }
        slot.set_connection(port, spec.into());
        Ok(())
    }

    // -- alias connections --------------------------------------------------

    /// Records a point-to-point connection aliasing two signals bit-by-bit.
    ///
    /// # Errors
    /// Returns [`NetlistError::WidthMismatch`] if the signals differ in
    /// width.
    pub fn connect(
        &mut self,
        lhs: impl Into<SigSpec>,
        rhs: impl Into<SigSpec>,
    ) -> Result<(), NetlistError> {
        let lhs = lhs.into();
        let rhs = rhs.into();
        if lhs.len() != rhs.len() {
            return Err(NetlistError::WidthMismatch {
                lhs: lhs.len(),
                rhs: rhs.len(),
            });
        }
        self.connections.push((lhs, rhs));
        Ok(())
    }

    /// Returns the recorded alias connections in insertion order.
    #[must_use]
    pub fn connections(&self) -> &[(SigSpec, SigSpec)] {
        &self.connections
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_lookup() {
        let mut module = Module::new("top");
        let a = module.add_wire("a", 1);
        let b = module.add_wire("b", 4);

        assert_eq!(module.find_wire("a"), Ok(a));
        assert_eq!(module.find_wire("b"), Ok(b));
        assert_eq!(
            module.find_wire("missing"),
            Err(NetlistError::UnknownWire("missing".to_owned()))
        );
        assert_eq!(module.wire_bits(b).len(), 4);
    }

    #[test]
    fn test_port_reconnection_is_rejected() {
        let mut module = Module::new("top");
        let a = module.add_wire("a", 1);
        let gate = module.add_cell("u0", "$not");

        module
            .connect_port(gate, "A", SigBit::new(a, 0))
            .expect("first connection");
        let err = module
            .connect_port(gate, "A", SigBit::new(a, 0))
            .expect_err("second connection");
        assert_eq!(
            err,
            NetlistError::PortReconnected {
                cell: gate,
                port: "A".to_owned()
            }
        );
    }

    #[test]
    fn test_alias_width_mismatch_is_rejected() {
        let mut module = Module::new("top");
        let a = module.add_wire("a", 2);
        let b = module.add_wire("b", 3);
        let lhs = module.wire_bits(a);
        let rhs = module.wire_bits(b);

        let err = module.connect(lhs, rhs).expect_err("widths differ");
        assert_eq!(err, NetlistError::WidthMismatch { lhs: 2, rhs: 3 });
    }

    #[test]
    fn test_bit_name_resolves_wire_name() {
        let mut module = Module::new("top");
        let data = module.add_wire("data", 8);
        assert_eq!(module.bit_name(SigBit::new(data, 5)), "data[5]");
    }
}
