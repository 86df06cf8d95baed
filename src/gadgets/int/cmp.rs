use super::IntWires;
use crate::{
    CircuitContext, WireId,
    gadgets::basic::{and, or, xor},
};

/// `a_i == b_i` as one wire.
fn bit_equal<C: CircuitContext>(circuit: &mut C, a: WireId, b: WireId) -> WireId {
    let differ = xor(circuit, a, b);
    circuit.invert(differ)
}

/// Walk the bits below the MSB from high to low, OR-ing in `!a_i & b_i` while
/// every higher bit pair was equal. `seed` is the MSB decision.
fn less_from_msb<C: CircuitContext>(
    circuit: &mut C,
    a: &IntWires,
    b: &IntWires,
    seed: WireId,
) -> WireId {
    assert_eq!(a.len(), b.len());
    let n = a.len();

    let mut result = seed;
    let mut equal_so_far = circuit.constant_wire(true);
    let msb_equal = bit_equal(circuit, a.bits[n - 1], b.bits[n - 1]);
    equal_so_far = and(circuit, equal_so_far, msb_equal);

    for i in (0..n - 1).rev() {
        let not_a = circuit.invert(a.bits[i]);
        let below = and(circuit, not_a, b.bits[i]);
        let decided = and(circuit, below, equal_so_far);
        result = or(circuit, result, decided);

        if i > 0 {
            let same = bit_equal(circuit, a.bits[i], b.bits[i]);
            equal_so_far = and(circuit, equal_so_far, same);
        }
    }

    result
}

/// Signed `a < b`.
pub fn less_than<C: CircuitContext>(circuit: &mut C, a: &IntWires, b: &IntWires) -> WireId {
    assert_eq!(a.len(), b.len());
    let not_b = circuit.invert(b.msb());
    let seed = and(circuit, a.msb(), not_b);
    less_from_msb(circuit, a, b, seed)
}

/// Unsigned `a < b`.
pub fn less_than_unsigned<C: CircuitContext>(
    circuit: &mut C,
    a: &IntWires,
    b: &IntWires,
) -> WireId {
    assert_eq!(a.len(), b.len());
    let not_a = circuit.invert(a.msb());
    let seed = and(circuit, not_a, b.msb());
    less_from_msb(circuit, a, b, seed)
}

pub fn equal<C: CircuitContext>(circuit: &mut C, a: &IntWires, b: &IntWires) -> WireId {
    assert_eq!(a.len(), b.len());

    let mut result = circuit.constant_wire(true);
    for (&a_i, &b_i) in a.iter().zip(b.iter()) {
        let same = bit_equal(circuit, a_i, b_i);
        result = and(circuit, result, same);
    }
    result
}

/// Signed `a <= b`.
pub fn less_or_equal<C: CircuitContext>(circuit: &mut C, a: &IntWires, b: &IntWires) -> WireId {
    let lt = less_than(circuit, a, b);
    let eq = equal(circuit, a, b);
    or(circuit, lt, eq)
}

pub fn less_or_equal_unsigned<C: CircuitContext>(
    circuit: &mut C,
    a: &IntWires,
    b: &IntWires,
) -> WireId {
    let lt = less_than_unsigned(circuit, a, b);
    let eq = equal(circuit, a, b);
    or(circuit, lt, eq)
}
