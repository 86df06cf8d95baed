use std::iter;

use super::{IntWires, less_or_equal_unsigned, negate, sub};
use crate::{
    CircuitContext, WireId,
    gadgets::basic::{select, xor},
};

fn select_int<C: CircuitContext>(
    circuit: &mut C,
    sel: WireId,
    when_true: &IntWires,
    when_false: &IntWires,
) -> IntWires {
    assert_eq!(when_true.len(), when_false.len());
    IntWires::from_bits(
        when_true
            .iter()
            .zip(when_false.iter())
            .map(|(&t, &f)| select(circuit, sel, t, f)),
    )
}

/// Magnitude of a signed value, read as unsigned. `-2^(n-1)` maps to `2^(n-1)`.
fn abs<C: CircuitContext>(circuit: &mut C, a: &IntWires) -> IntWires {
    let negated = negate(circuit, a);
    select_int(circuit, a.msb(), &negated, a)
}

/// One restoring-division step over unsigned operands.
///
/// Returns the next remainder and the quotient bit: when `divisor <= remainder`
/// the divisor is subtracted and the bit is set, otherwise the remainder passes
/// through unchanged.
pub fn division_step<C: CircuitContext>(
    circuit: &mut C,
    remainder: &IntWires,
    divisor: &IntWires,
) -> (IntWires, WireId) {
    let take = less_or_equal_unsigned(circuit, divisor, remainder);
    let reduced = sub(circuit, remainder, divisor);
    (select_int(circuit, take, &reduced, remainder), take)
}

/// Signed division truncating toward zero, modulo `2^n`.
///
/// The quotient for a zero divisor is an unspecified bit pattern.
pub fn div<C: CircuitContext>(circuit: &mut C, a: &IntWires, b: &IntWires) -> IntWires {
    assert_eq!(a.len(), b.len());
    let n = a.len();

    let dividend = abs(circuit, a);
    let divisor = abs(circuit, b);

    let mut remainder = IntWires::from_bits(iter::repeat_with(|| circuit.constant_wire(false)).take(n));
    let mut quotient = Vec::with_capacity(n);

    for i in (0..n).rev() {
        let shifted = IntWires::from_bits(
            iter::once(dividend.bits[i]).chain(remainder.bits[..n - 1].iter().copied()),
        );
        let (next, bit) = division_step(circuit, &shifted, &divisor);
        remainder = next;
        quotient.insert(0, bit);
    }

    let quotient = IntWires { bits: quotient };
    let negated = negate(circuit, &quotient);
    let signs_differ = xor(circuit, a.msb(), b.msb());
    select_int(circuit, signs_differ, &negated, &quotient)
}
