//! Backward cone traversal over flattened netlists.
//!
//! Given a [`fanin_netlist::Module`] and a [`fanin_netlist::CellLibrary`]
//! describing its recognized combinational primitives, this crate answers
//! one question lazily: which signal bits and which driving cells lie in the
//! logic cone feeding a given bit?
//!
//! Build a [`NetlistIndex`] once per module snapshot, then construct as many
//! independent traversals from it as needed:
//!
//! - [`NetlistIndex::cone`] walks the bits of the fan-in cone in
//!   depth-first pre-order.
//! - [`NetlistIndex::cell_cone`] yields each driving cell exactly once, in
//!   first-encounter order.
//! - [`NetlistIndex::cone_inputs`] restricts the walk to the driverless
//!   boundary bits the cone depends on.
//!
//! Sequential cells never enter the index, so traversal stops at register
//! outputs by construction. Malformed netlists degrade to defined behavior
//! instead of failing: the engine has no error paths.

pub mod cone;
pub mod index;

pub use cone::{CellCone, ConeInputs, WireCone};
pub use index::NetlistIndex;
