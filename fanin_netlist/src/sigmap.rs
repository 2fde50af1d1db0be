//! Canonicalization of aliased signal bits.

use std::collections::HashMap;

use crate::module::Module;
use crate::wire::{SigBit, SigSpec};

/// Maps any signal bit to the canonical representative of its alias class.
///
/// Point-to-point connections make several wire bits name the same physical
/// net. The map is built once per module snapshot by unioning the bits of
/// every recorded connection; the representative of each class is its lowest
/// `(wire, offset)` bit, so canonical forms are stable across rebuilds.
///
/// Bits that were never aliased canonicalize to themselves.
#[derive(Clone, Debug, Default)]
pub struct SigMap {
    canonical: HashMap<SigBit, SigBit>,
}

impl SigMap {
    /// Builds the map from a module's alias connections.
    #[must_use]
    pub fn build(module: &Module) -> Self {
        let mut parent: HashMap<SigBit, SigBit> = HashMap::new();

        for (lhs, rhs) in module.connections() {
            for (a, b) in lhs.iter().zip(rhs.iter()) {
                union(&mut parent, a, b);
            }
        }

        // Flatten: every aliased bit points straight at its class root.
        let bits: Vec<SigBit> = parent.keys().copied().collect();
        let mut canonical = HashMap::with_capacity(bits.len());
        for bit in bits {
            let root = find(&mut parent, bit);
            if root != bit {
                canonical.insert(bit, root);
            }
        }

        tracing::debug!(
            "signal map built for module `{}`: {} aliased bits",
            module.name(),
            canonical.len()
        );

        Self { canonical }
    }

    /// Returns the canonical representative of a bit.
    #[must_use]
    pub fn canonical_bit(&self, bit: SigBit) -> SigBit {
        self.canonical.get(&bit).copied().unwrap_or(bit)
    }

    /// Expands a signal into its canonical bits, in order.
    #[must_use]
    pub fn expand(&self, spec: &SigSpec) -> Vec<SigBit> {
        spec.iter().map(|bit| self.canonical_bit(bit)).collect()
    }

    /// Canonicalizes a signal bit-by-bit, preserving width and order.
    #[must_use]
    pub fn canonical_spec(&self, spec: &SigSpec) -> SigSpec {
        SigSpec::new(self.expand(spec))
    }
}

fn find(parent: &mut HashMap<SigBit, SigBit>, bit: SigBit) -> SigBit {
    let mut root = bit;
    while let Some(&next) = parent.get(&root) {
        if next == root {
            break;
        }
        root = next;
    }
    // Path compression keeps later lookups short.
    let mut cur = bit;
    while cur != root {
        let next = parent[&cur];
        parent.insert(cur, root);
        cur = next;
    }
    root
}

fn union(parent: &mut HashMap<SigBit, SigBit>, a: SigBit, b: SigBit) {
    parent.entry(a).or_insert(a);
    parent.entry(b).or_insert(b);
    let ra = find(parent, a);
    let rb = find(parent, b);
    if ra == rb {
        return;
    }
    // The lower bit wins, making representatives order-independent.
    let (winner, loser) = if ra < rb { (ra, rb) } else { (rb, ra) };
    parent.insert(loser, winner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::WireId;

    fn bit(wire: u32, offset: u32) -> SigBit {
        SigBit::new(WireId::new(wire), offset)
    }

    #[test]
    fn test_unaliased_bit_is_its_own_representative() {
        let module = Module::new("top");
        let map = SigMap::build(&module);
        assert_eq!(map.canonical_bit(bit(0, 0)), bit(0, 0));
    }

    #[test]
    fn test_alias_chain_collapses_to_lowest_bit() {
        let mut module = Module::new("top");
        let a = module.add_wire("a", 1);
        let b = module.add_wire("b", 1);
        let c = module.add_wire("c", 1);
        module.connect(SigBit::new(b, 0), SigBit::new(c, 0)).unwrap();
        module.connect(SigBit::new(a, 0), SigBit::new(b, 0)).unwrap();

        let map = SigMap::build(&module);
        assert_eq!(map.canonical_bit(SigBit::new(c, 0)), SigBit::new(a, 0));
        assert_eq!(map.canonical_bit(SigBit::new(b, 0)), SigBit::new(a, 0));
        assert_eq!(map.canonical_bit(SigBit::new(a, 0)), SigBit::new(a, 0));
    }

    #[test]
    fn test_vector_connection_aliases_bitwise() {
        let mut module = Module::new("top");
        let bus = module.add_wire("bus", 3);
        let tap = module.add_wire("tap", 3);
        let lhs = module.wire_bits(bus);
        let rhs = module.wire_bits(tap);
        module.connect(lhs, rhs).unwrap();

        let map = SigMap::build(&module);
        for offset in 0..3 {
            assert_eq!(
                map.canonical_bit(SigBit::new(tap, offset)),
                SigBit::new(bus, offset)
            );
        }
    }

    #[test]
    fn test_expand_canonicalizes_in_order() {
        let mut module = Module::new("top");
        let a = module.add_wire("a", 1);
        let b = module.add_wire("b", 1);
        module.connect(SigBit::new(a, 0), SigBit::new(b, 0)).unwrap();

        let map = SigMap::build(&module);
        let mut spec = SigSpec::bit(SigBit::new(b, 0));
        spec.concat(&SigSpec::bit(SigBit::new(a, 0)));
        assert_eq!(map.expand(&spec), vec![SigBit::new(a, 0), SigBit::new(a, 0)]);
        assert_eq!(map.canonical_spec(&spec).bits(), map.expand(&spec));
    }
}
