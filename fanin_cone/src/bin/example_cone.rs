//! Builds a small reconvergent netlist inline and prints its cones.

use fanin_cone::NetlistIndex;
use fanin_netlist::{CellLibrary, Module, SigBit};
use itertools::Itertools;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut module = Module::new("reconverge");

    let a = module.add_wire("a", 1);
    let w = module.add_wire("w", 1);
    let e1 = module.add_wire("e1", 1);
    let e2 = module.add_wire("e2", 1);
    let f = module.add_wire("f", 1);

    let shared = module.add_cell("shared", "$buf");
    module.connect_port(shared, "A", SigBit::new(a, 0))?;
    module.connect_port(shared, "Y", SigBit::new(w, 0))?;

    let left = module.add_cell("left", "$not");
    module.connect_port(left, "A", SigBit::new(w, 0))?;
    module.connect_port(left, "Y", SigBit::new(e1, 0))?;

    let right = module.add_cell("right", "$buf");
    module.connect_port(right, "A", SigBit::new(w, 0))?;
    module.connect_port(right, "Y", SigBit::new(e2, 0))?;

    let join = module.add_cell("join", "$and");
    module.connect_port(join, "A", SigBit::new(e1, 0))?;
    module.connect_port(join, "B", SigBit::new(e2, 0))?;
    module.connect_port(join, "Y", SigBit::new(f, 0))?;

    let index = NetlistIndex::build(&module, &CellLibrary::combinational());
    let out = SigBit::new(f, 0);

    println!(
        "cone({}): {}",
        module.bit_name(out),
        index.cone(out).map(|bit| module.bit_name(bit)).join(" -> ")
    );
    println!(
        "cell_cone({}): {}",
        module.bit_name(out),
        index
            .cell_cone(out)
            .map(|cell| module.cell(cell).name().to_owned())
            .join(", ")
    );
    println!(
        "cone_inputs({}): {}",
        module.bit_name(out),
        index
            .cone_inputs(out)
            .map(|bit| module.bit_name(bit))
            .join(", ")
    );

    Ok(())
}
