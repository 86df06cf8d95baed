use crate::{CircuitContext, GateFunction, WireId};

pub fn xor<C: CircuitContext>(circuit: &mut C, a: WireId, b: WireId) -> WireId {
    circuit.add_gate(GateFunction::XOR, a, b)
}

pub fn and<C: CircuitContext>(circuit: &mut C, a: WireId, b: WireId) -> WireId {
    circuit.add_gate(GateFunction::AND, a, b)
}

pub fn or<C: CircuitContext>(circuit: &mut C, a: WireId, b: WireId) -> WireId {
    circuit.add_gate(GateFunction::OR, a, b)
}

/// `a AND NOT b`
pub fn and_not<C: CircuitContext>(circuit: &mut C, a: WireId, b: WireId) -> WireId {
    circuit.add_gate(GateFunction::NIMP, a, b)
}

/// One ripple stage. Returns the sum bit and replaces `carry` with the
/// carry-out.
pub fn full_adder<C: CircuitContext>(
    circuit: &mut C,
    a: WireId,
    b: WireId,
    carry: &mut WireId,
) -> WireId {
    let axb = xor(circuit, a, b);
    let sum = xor(circuit, axb, *carry);

    let both = and(circuit, a, b);
    let propagated = and(circuit, axb, *carry);
    *carry = or(circuit, both, propagated);

    sum
}

/// `sel ? when_true : when_false`, built from AND/OR over `sel` and its
/// complement.
pub fn select<C: CircuitContext>(
    circuit: &mut C,
    sel: WireId,
    when_true: WireId,
    when_false: WireId,
) -> WireId {
    let not_sel = circuit.invert(sel);
    let t = and(circuit, when_true, sel);
    let f = and(circuit, when_false, not_sel);
    or(circuit, t, f)
}

#[cfg(test)]
mod tests {
    use itertools::iproduct;
    use test_log::test;

    use super::*;
    use crate::Circuit;

    fn run(inputs: &[bool], build: impl FnOnce(&mut Circuit, &[WireId]) -> Vec<WireId>) -> Vec<bool> {
        let mut circuit = Circuit::new();
        let wires = inputs
            .iter()
            .map(|_| circuit.issue_input_wire())
            .collect::<Vec<_>>();
        for (&wire, &value) in wires.iter().zip(inputs) {
            circuit.assign(wire, value).unwrap();
        }

        for output in build(&mut circuit, &wires) {
            circuit.make_output(output).unwrap();
        }

        circuit.execute().unwrap();
        circuit.output_values().unwrap()
    }

    #[test]
    fn primitives() {
        for (a, b) in iproduct!([false, true], [false, true]) {
            let outputs = run(&[a, b], |circuit, w| {
                vec![
                    xor(circuit, w[0], w[1]),
                    and(circuit, w[0], w[1]),
                    or(circuit, w[0], w[1]),
                    and_not(circuit, w[0], w[1]),
                ]
            });
            assert_eq!(outputs, vec![a ^ b, a & b, a | b, a & !b], "a={a} b={b}");
        }
    }

    #[test]
    fn test_full_adder() {
        for (a, b, c) in iproduct!([false, true], [false, true], [false, true]) {
            let outputs = run(&[a, b, c], |circuit, w| {
                let mut carry = w[2];
                let sum = full_adder(circuit, w[0], w[1], &mut carry);
                vec![sum, carry]
            });

            let total = u8::from(a) + u8::from(b) + u8::from(c);
            assert_eq!(outputs, vec![total & 1 == 1, total >= 2], "{a} {b} {c}");
        }
    }

    #[test]
    fn test_select() {
        for (sel, t, f) in iproduct!([false, true], [false, true], [false, true]) {
            let outputs = run(&[sel, t, f], |circuit, w| {
                vec![select(circuit, w[0], w[1], w[2])]
            });
            assert_eq!(outputs, vec![if sel { t } else { f }]);
        }
    }

    #[test]
    fn select_over_gate_output_and_constant() {
        for (a, b) in iproduct!([false, true], [false, true]) {
            let outputs = run(&[a, b], |circuit, w| {
                let sel = xor(circuit, w[0], w[1]);
                let one = circuit.constant_wire(true);
                vec![select(circuit, sel, w[0], one)]
            });
            assert_eq!(outputs, vec![if a ^ b { a } else { true }]);
        }
    }
}
