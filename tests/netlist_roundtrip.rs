use std::path::PathBuf;

use gatecirc::{
    Circuit, CircuitError, IntWires,
    gadgets::int::{self, BigInt},
};
use itertools::iproduct;
use test_log::test;

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("demos")
        .join(name)
}

fn scratch(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("gatecirc-{}-{name}", std::process::id()))
}

#[test]
fn demo_xor_netlist() {
    let mut circuit = Circuit::from_netlist_file(demo("xor.circ")).unwrap();
    circuit.load_values_file(demo("xor.in")).unwrap();
    circuit.execute().unwrap();
    assert_eq!(circuit.output_bits().unwrap(), "1");
}

#[test]
fn demo_polarity_netlist_is_nand() {
    let mut circuit = Circuit::from_netlist_file(demo("nimp.circ")).unwrap();

    for (a, b) in iproduct!([false, true], [false, true]) {
        let values = format!("0 {}\n2 {}\n", u8::from(a), u8::from(b));
        circuit.load_values_str(&values).unwrap();
        circuit.execute().unwrap();

        let expected = if a && b { "0" } else { "1" };
        assert_eq!(circuit.output_bits().unwrap(), expected, "a={a} b={b}");
    }
}

#[test]
fn missing_value_file_reports_path() {
    let mut circuit = Circuit::from_netlist_file(demo("xor.circ")).unwrap();
    let err = circuit
        .load_values_file(demo("does-not-exist.in"))
        .unwrap_err();
    assert!(matches!(err, CircuitError::Io { .. }));
    assert!(err.to_string().contains("does-not-exist.in"));
}

/// A synthesized divider written to disk and parsed back evaluates to the
/// same output bits.
#[test]
fn synthesized_divider_survives_a_file_round_trip() {
    const WIDTH: usize = 4;
    let circuit_path = scratch("div.circ");
    let values_path = scratch("div.in");

    let mut circuit = Circuit::new();
    let a = IntWires::new_input(&mut circuit, WIDTH);
    let b = IntWires::new_input(&mut circuit, WIDTH);
    let quotient = int::div(&mut circuit, &a, &b);
    quotient.mark_output(&mut circuit).unwrap();

    for (x, y) in iproduct!(-8i64..8, -8i64..8) {
        if y == 0 {
            continue;
        }
        a.assign(&mut circuit, &BigInt::from(x)).unwrap();
        b.assign(&mut circuit, &BigInt::from(y)).unwrap();
        circuit.execute().unwrap();
        let expected = circuit.output_bits().unwrap();

        circuit.write_netlist_file(&circuit_path).unwrap();
        circuit.write_values_file(&values_path).unwrap();

        let mut reloaded = Circuit::from_netlist_file(&circuit_path).unwrap();
        reloaded.load_values_file(&values_path).unwrap();
        reloaded.execute().unwrap();

        let bits = reloaded.output_bits().unwrap();
        assert_eq!(bits, expected, "{x} / {y}");

        // -8 / -1 wraps around at this width.
        let q = x / y;
        let q = if q >= 8 { q - 16 } else { q };
        assert_eq!(
            int::signed_from_bit_string(&bits).unwrap(),
            BigInt::from(q),
            "{x} / {y}"
        );
        assert_eq!(reloaded.num_gates(), circuit.num_gates());
    }

    std::fs::remove_file(circuit_path).unwrap();
    std::fs::remove_file(values_path).unwrap();
}
