//! Error type for the netlist builder surface.

use thiserror::Error;

use crate::cell::CellId;

/// Errors raised while constructing or querying a module.
///
/// Only the builder surface is fallible; read-only traversal of a finished
/// module never produces one of these.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NetlistError {
    /// A point-to-point connection joined signals of different widths.
    #[error("connection width mismatch: {lhs} bits vs {rhs} bits")]
    WidthMismatch {
        /// Bit count of the left-hand signal.
        lhs: usize,
        /// Bit count of the right-hand signal.
        rhs: usize,
    },

    /// A wire name lookup found nothing.
    #[error("unknown wire `{0}`")]
    UnknownWire(String),

    /// A cell port was connected twice.
    #[error("port `{port}` of cell {cell} is already connected")]
    PortReconnected {
        /// The cell whose port was reconnected.
        cell: CellId,
        /// The offending port name.
        port: String,
    },
}
