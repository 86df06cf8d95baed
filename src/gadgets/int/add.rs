use super::IntWires;
use crate::{CircuitContext, gadgets::basic};

/// Ripple-carry sum modulo `2^n`.
pub fn add<C: CircuitContext>(circuit: &mut C, a: &IntWires, b: &IntWires) -> IntWires {
    assert_eq!(a.len(), b.len());

    let mut carry = circuit.constant_wire(false);
    let bits = a
        .iter()
        .zip(b.iter())
        .map(|(&a_i, &b_i)| basic::full_adder(circuit, a_i, b_i, &mut carry))
        .collect();

    IntWires { bits }
}

/// Two's-complement negation: invert every bit, then add one.
pub fn negate<C: CircuitContext>(circuit: &mut C, a: &IntWires) -> IntWires {
    let inverted = IntWires::from_bits(a.iter().map(|&bit| circuit.invert(bit)));
    let one = IntWires::from_bits((0..a.len()).map(|i| circuit.constant_wire(i == 0)));
    add(circuit, &inverted, &one)
}

pub fn sub<C: CircuitContext>(circuit: &mut C, a: &IntWires, b: &IntWires) -> IntWires {
    assert_eq!(a.len(), b.len());
    let neg_b = negate(circuit, b);
    add(circuit, a, &neg_b)
}
