//! In-memory netlist model for the fanin toolchain.
//!
//! This crate owns the flattened module representation the cone engine and
//! the synthesis passes operate on:
//! - [`Module`]: the owning container of wires and cells for one circuit scope.
//! - [`Wire`] / [`SigBit`] / [`SigSpec`]: named nets and bit-level references.
//! - [`Cell`]: a logic primitive instance with named port connections.
//! - [`CellLibrary`]: which cell types are recognized primitives, and which of
//!   their ports drive signals.
//! - [`SigMap`]: canonicalization of aliased nets into representative bits.

pub mod cell;
pub mod error;
pub mod library;
pub mod module;
pub mod sigmap;
pub mod wire;

pub use cell::{Cell, CellId};
pub use error::NetlistError;
pub use library::CellLibrary;
pub use module::Module;
pub use sigmap::SigMap;
pub use wire::{SigBit, SigSpec, Wire, WireId};
