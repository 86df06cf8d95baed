//! Text formats: `.circ` netlists and `<idx> <val>` value files.
//!
//! Netlist lines, one per statement:
//! - `I:<idx>` input wire
//! - `O:<idx>` or `O:<idx>:<val>` output wire, optionally pre-seeded
//! - `<out> <funct> <in0> <in1>` gate
//!
//! Every index encodes `id = idx / 2` with odd indices meaning inverted.
//! Lines containing `#` are comments; other line shapes are ignored.

use std::{fmt::Write as _, fs, path::Path};

use tracing::debug;

use super::{Circuit, CircuitError, Origin};
use crate::{GateFunction, WireId};

const COMMENT: char = '#';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Statement {
    Input {
        id: WireId,
        inverted: bool,
    },
    Output {
        id: WireId,
        inverted: bool,
        value: Option<bool>,
    },
    Gate {
        function: GateFunction,
        out: WireId,
        in0: (WireId, bool),
        in1: (WireId, bool),
    },
    Skip,
}

fn parse_index(token: &str) -> Result<usize, CircuitError> {
    token
        .parse()
        .map_err(|_| CircuitError::InvalidToken(token.to_owned()))
}

fn parse_bit(token: &str) -> Result<bool, CircuitError> {
    match token {
        "0" => Ok(false),
        "1" => Ok(true),
        other => Err(CircuitError::NonBinaryValue(other.to_owned())),
    }
}

fn parse_function(token: &str) -> Result<GateFunction, CircuitError> {
    let code: u64 = token
        .parse()
        .map_err(|_| CircuitError::InvalidToken(token.to_owned()))?;

    u8::try_from(code)
        .ok()
        .and_then(GateFunction::new)
        .filter(|function| function.code() != 0)
        .ok_or(CircuitError::FunctionOutOfRange(code))
}

impl Statement {
    fn parse(line: &str) -> Result<Self, CircuitError> {
        if line.contains(COMMENT) {
            return Ok(Self::Skip);
        }

        let tokens = line.split_whitespace().collect::<Vec<_>>();
        match tokens.as_slice() {
            [single] => Self::parse_declaration(single),
            [out, funct, in0, in1] => {
                let function = parse_function(funct)?;
                let out_idx = parse_index(out)?;
                if out_idx % 2 == 1 {
                    return Err(CircuitError::InvertedGateOutput(out_idx));
                }

                Ok(Self::Gate {
                    function,
                    out: WireId::from_netlist_index(out_idx).0,
                    in0: WireId::from_netlist_index(parse_index(in0)?),
                    in1: WireId::from_netlist_index(parse_index(in1)?),
                })
            }
            _ => Ok(Self::Skip),
        }
    }

    fn parse_declaration(token: &str) -> Result<Self, CircuitError> {
        let fields = token.split(':').collect::<Vec<_>>();
        match fields.as_slice() {
            ["I", idx] => {
                let (id, inverted) = WireId::from_netlist_index(parse_index(idx)?);
                Ok(Self::Input { id, inverted })
            }
            ["O", idx] | ["O", idx, _] => {
                let (id, inverted) = WireId::from_netlist_index(parse_index(idx)?);
                let value = fields.get(2).map(|val| parse_bit(val)).transpose()?;
                Ok(Self::Output {
                    id,
                    inverted,
                    value,
                })
            }
            ["I" | "O", ..] => Err(CircuitError::InvalidToken(token.to_owned())),
            _ => Ok(Self::Skip),
        }
    }
}

fn read_file(path: &Path) -> Result<String, CircuitError> {
    fs::read_to_string(path).map_err(|source| CircuitError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, contents: &str) -> Result<(), CircuitError> {
    fs::write(path, contents).map_err(|source| CircuitError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl Circuit {
    /// Build a circuit from netlist text. Any malformed or inconsistent line
    /// aborts the whole parse.
    pub fn from_netlist_str(text: &str) -> Result<Self, CircuitError> {
        let mut circuit = Circuit::with_origin(Origin::Netlist);

        for (index, line) in text.lines().enumerate() {
            Statement::parse(line)
                .and_then(|statement| circuit.apply(statement))
                .map_err(|err| err.at_line(index + 1))?;
        }

        circuit.check_structure()?;

        debug!(
            inputs = circuit.input_ids.len(),
            outputs = circuit.output_ids.len(),
            gates = circuit.gates.len(),
            "netlist parsed"
        );
        Ok(circuit)
    }

    pub fn from_netlist_file(path: impl AsRef<Path>) -> Result<Self, CircuitError> {
        Self::from_netlist_str(&read_file(path.as_ref())?)
    }

    fn apply(&mut self, statement: Statement) -> Result<(), CircuitError> {
        match statement {
            Statement::Input { id, inverted } => self.declare_input(id, inverted),
            Statement::Output {
                id,
                inverted,
                value,
            } => self.declare_output(id, inverted, value),
            Statement::Gate {
                function,
                out,
                in0,
                in1,
            } => self.create_gate(function, out, in0, in1),
            Statement::Skip => Ok(()),
        }
    }

    /// Every output must have a driver, and no gate may read a gate output
    /// that is evaluated after it.
    fn check_structure(&self) -> Result<(), CircuitError> {
        for &(id, _) in &self.output_ids {
            let driven = self.input_ids.contains(&id)
                || self.gates.contains_key(&id)
                || self.wires.get(id)?.value.is_some();
            if !driven {
                return Err(CircuitError::UndrivenOutput(id));
            }
        }

        for gate in self.gates.values() {
            for wire in [gate.wire_a, gate.wire_b] {
                if self.gates.contains_key(&wire) && wire > gate.wire_c {
                    return Err(CircuitError::OutOfOrder {
                        gate: gate.wire_c,
                        wire,
                    });
                }
            }
        }

        Ok(())
    }

    /// Assign input values from `<idx> <val>` lines. A leading `input <n>`
    /// header is accepted and skipped.
    pub fn load_values_str(&mut self, text: &str) -> Result<(), CircuitError> {
        for (index, line) in text.lines().enumerate() {
            self.load_value_line(line)
                .map_err(|err| err.at_line(index + 1))?;
        }
        Ok(())
    }

    pub fn load_values_file(&mut self, path: impl AsRef<Path>) -> Result<(), CircuitError> {
        self.load_values_str(&read_file(path.as_ref())?)
    }

    fn load_value_line(&mut self, line: &str) -> Result<(), CircuitError> {
        if line.contains(COMMENT) {
            return Ok(());
        }

        match line.split_whitespace().collect::<Vec<_>>().as_slice() {
            ["input", _] => Ok(()),
            [idx, val] => {
                let (id, _) = WireId::from_netlist_index(parse_index(idx)?);
                let value = parse_bit(val)?;
                self.assign(id, value)
            }
            _ => Ok(()),
        }
    }

    /// Wires that become `I:` lines when written: inputs, input complements and
    /// anything else pre-solved that no gate drives.
    fn netlist_inputs(&self) -> impl Iterator<Item = (WireId, bool, Option<bool>)> + '_ {
        self.wires
            .iter()
            .filter(move |(wire, _)| !self.gates.contains_key(&wire.id))
            .filter(move |(wire, _)| {
                self.input_ids.contains(&wire.id)
                    || wire.value.is_some()
                    || self.complement_of(wire.id).is_some()
            })
            .map(|(wire, instance)| (wire.id, instance.is_inverted(), wire.value))
    }

    fn polarity(&self, id: WireId) -> bool {
        self.wires
            .instance(id)
            .map(|instance| instance.is_inverted())
            .unwrap_or(false)
    }

    /// Render the circuit as netlist text that parses back into an equivalent
    /// circuit. Pre-solved wires (constants, input complements) are emitted as
    /// inputs; their values go to [`Circuit::values_to_string`].
    pub fn to_netlist(&self) -> String {
        let mut out = String::new();

        // Writing into a `String` cannot fail.
        let _ = writeln!(
            out,
            "# {} wires, {} gates",
            self.wires.len(),
            self.gates.len()
        );

        for (id, inverted, _) in self.netlist_inputs() {
            let _ = writeln!(out, "I:{}", id.netlist_index(inverted));
        }

        for &(id, inverted) in &self.output_ids {
            let _ = writeln!(out, "O:{}", id.netlist_index(inverted));
        }

        for gate in self.gates.values() {
            let _ = writeln!(
                out,
                "{} {} {} {}",
                gate.wire_c.netlist_index(false),
                gate.function.code(),
                gate.wire_a.netlist_index(self.polarity(gate.wire_a)),
                gate.wire_b.netlist_index(self.polarity(gate.wire_b)),
            );
        }

        out
    }

    /// Values of every netlist input that currently has one, as raw
    /// `<2*id> <val>` lines.
    pub fn values_to_string(&self) -> String {
        let mut out = String::new();
        for (id, _, value) in self.netlist_inputs() {
            if let Some(value) = value {
                let _ = writeln!(out, "{} {}", id.netlist_index(false), u8::from(value));
            }
        }
        out
    }

    pub fn write_netlist_file(&self, path: impl AsRef<Path>) -> Result<(), CircuitError> {
        write_file(path.as_ref(), &self.to_netlist())
    }

    pub fn write_values_file(&self, path: impl AsRef<Path>) -> Result<(), CircuitError> {
        write_file(path.as_ref(), &self.values_to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statement_shapes() {
        assert_eq!(
            Statement::parse("I:3").unwrap(),
            Statement::Input {
                id: WireId(1),
                inverted: true
            }
        );
        assert_eq!(
            Statement::parse("O:8:1").unwrap(),
            Statement::Output {
                id: WireId(4),
                inverted: false,
                value: Some(true)
            }
        );
        assert_eq!(
            Statement::parse("  10 8 3 4 ").unwrap(),
            Statement::Gate {
                function: GateFunction::AND,
                out: WireId(5),
                in0: (WireId(1), true),
                in1: (WireId(2), false),
            }
        );
        assert_eq!(Statement::parse("").unwrap(), Statement::Skip);
        assert_eq!(Statement::parse("4 6 0 2 # xor").unwrap(), Statement::Skip);
        assert_eq!(Statement::parse("X:1").unwrap(), Statement::Skip);
        assert_eq!(Statement::parse("1 2 3").unwrap(), Statement::Skip);
    }

    #[test]
    fn malformed_statements() {
        assert!(matches!(
            Statement::parse("I:x"),
            Err(CircuitError::InvalidToken(token)) if token == "x"
        ));
        assert!(matches!(
            Statement::parse("I:1:2"),
            Err(CircuitError::InvalidToken(_))
        ));
        assert!(matches!(
            Statement::parse("O:4:2"),
            Err(CircuitError::NonBinaryValue(value)) if value == "2"
        ));
        assert!(matches!(
            Statement::parse("4 0 0 2"),
            Err(CircuitError::FunctionOutOfRange(0))
        ));
        assert!(matches!(
            Statement::parse("4 16 0 2"),
            Err(CircuitError::FunctionOutOfRange(16))
        ));
        assert!(matches!(
            Statement::parse("5 6 0 2"),
            Err(CircuitError::InvertedGateOutput(5))
        ));
        assert!(matches!(
            Statement::parse("4 6 a 2"),
            Err(CircuitError::InvalidToken(_))
        ));
    }
}
