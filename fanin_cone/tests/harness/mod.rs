#![allow(dead_code)]

use std::sync::Once;

use fanin_netlist::{CellId, Module, SigBit};

static INIT: Once = Once::new();

/// Configures logging for the test runner.
pub fn setup_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Adds a single-output gate with the given input port connections.
pub fn gate(
    module: &mut Module,
    name: &str,
    ty: &str,
    inputs: &[(&str, SigBit)],
    output: SigBit,
) -> CellId {
    let cell = module.add_cell(name, ty);
    for (port, bit) in inputs {
        module
            .connect_port(cell, *port, *bit)
            .expect("fresh gate port");
    }
    module
        .connect_port(cell, "Y", output)
        .expect("fresh gate output");
    cell
}

/// Formats bits as `name[offset]` strings, for readable assertions.
pub fn bit_names(module: &Module, bits: &[SigBit]) -> Vec<String> {
    bits.iter().map(|&bit| module.bit_name(bit)).collect()
}

/// Maps yielded cell ids to their instance names.
pub fn cell_names(module: &Module, cells: &[CellId]) -> Vec<String> {
    cells
        .iter()
        .map(|&cell| module.cell(cell).name().to_owned())
        .collect()
}
