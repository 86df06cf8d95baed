use tracing::{debug, trace};

use super::{Circuit, CircuitError};
use crate::{Gate, WireId, core::progress::maybe_log_progress, core::wire::Wires};

impl Circuit {
    /// Evaluate every gate once, in ascending output-id order.
    ///
    /// Gate outputs from a previous pass are overwritten. Input complements
    /// built during synthesis are recomputed from their inputs first, so new
    /// assignments take effect.
    pub fn execute(&mut self) -> Result<(), CircuitError> {
        for &(input, complement) in &self.input_complements {
            if let Some(value) = self.wires.effective(input)? {
                self.wires.set_value(complement, !value)?;
            }
        }

        for (gate_index, gate) in self.gates.values().enumerate() {
            let a = read_input(&self.wires, gate, gate.wire_a)?;
            let b = read_input(&self.wires, gate, gate.wire_b)?;

            maybe_log_progress("executed", gate_index);

            let c = gate.execute(a, b);
            trace!("out wire {} val: {}", gate.wire_c, u8::from(c));
            self.wires.set_value(gate.wire_c, c)?;
        }

        debug!(
            gates = self.gates.len(),
            wires = self.wires.len(),
            "circuit executed"
        );
        Ok(())
    }

    /// Output values in declaration order, each with its declared polarity
    /// applied to the raw wire value.
    pub fn output_values(&self) -> Result<Vec<bool>, CircuitError> {
        self.output_ids
            .iter()
            .map(|&(id, inverted)| {
                self.wires
                    .get(id)?
                    .value
                    .map(|raw| raw ^ inverted)
                    .ok_or(CircuitError::UnassignedOutput(id))
            })
            .collect()
    }

    /// Output bits as an MSB-first string: the first declared output is the
    /// rightmost character.
    pub fn output_bits(&self) -> Result<String, CircuitError> {
        Ok(self
            .output_values()?
            .into_iter()
            .rev()
            .map(|bit| if bit { '1' } else { '0' })
            .collect())
    }
}

#[inline]
fn read_input(wires: &Wires, gate: &Gate, wire: WireId) -> Result<bool, CircuitError> {
    wires
        .effective(wire)?
        .ok_or(CircuitError::UnassignedInput {
            gate: gate.wire_c,
            wire,
        })
}
