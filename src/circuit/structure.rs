use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use tracing::trace;

use super::{CircuitContext, CircuitError};
use crate::{
    Gate, GateFunction, WireId,
    core::{
        gate_type::GateCount,
        wire::{Wire, WireInstance, Wires},
    },
};

/// How a circuit was populated. The two ways are mutually exclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Origin {
    #[default]
    Empty,
    Netlist,
    Synthesis,
}

/// Wire and gate registries of one combinational circuit.
///
/// Gates are keyed by their output wire and evaluated in ascending key order,
/// so every builder must hand out strictly increasing ids downstream.
#[derive(Debug, Default)]
pub struct Circuit {
    pub(crate) wires: Wires,
    pub(crate) gates: BTreeMap<WireId, Gate>,
    pub(crate) input_ids: BTreeSet<WireId>,
    /// Declared outputs with their own polarity, applied to the raw value.
    pub(crate) output_ids: Vec<(WireId, bool)>,
    output_set: HashSet<WireId>,
    /// Symmetric: if `a -> b` is present then so is `b -> a`.
    complements: HashMap<WireId, WireId>,
    /// `(input, complement)` pairs built by `invert`, refreshed on every execute.
    pub(crate) input_complements: Vec<(WireId, WireId)>,
    next_wire: usize,
    pub(crate) origin: Origin,
    gate_count: GateCount,
}

impl Circuit {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_origin(origin: Origin) -> Self {
        Self {
            origin,
            ..Self::default()
        }
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn wire(&self, id: WireId) -> Result<&Wire, CircuitError> {
        Ok(self.wires.get(id)?)
    }

    pub fn instance(&self, id: WireId) -> Result<&WireInstance, CircuitError> {
        Ok(self.wires.instance(id)?)
    }

    /// Current value of `id` with the registered polarity applied.
    pub fn value(&self, id: WireId) -> Result<Option<bool>, CircuitError> {
        Ok(self.wires.effective(id)?)
    }

    pub fn gate(&self, id: WireId) -> Option<&Gate> {
        self.gates.get(&id)
    }

    /// Gates in evaluation order.
    pub fn gates(&self) -> impl Iterator<Item = &Gate> {
        self.gates.values()
    }

    pub fn is_input(&self, id: WireId) -> bool {
        self.input_ids.contains(&id)
    }

    pub fn is_gate_output(&self, id: WireId) -> bool {
        self.gates.contains_key(&id)
    }

    pub fn input_ids(&self) -> impl Iterator<Item = WireId> + '_ {
        self.input_ids.iter().copied()
    }

    pub fn output_ids(&self) -> impl Iterator<Item = WireId> + '_ {
        self.output_ids.iter().map(|&(id, _)| id)
    }

    /// Outputs in declaration order as `(wire, inverted)`.
    pub fn outputs(&self) -> &[(WireId, bool)] {
        &self.output_ids
    }

    pub fn complement_of(&self, id: WireId) -> Option<WireId> {
        self.complements.get(&id).copied()
    }

    pub fn num_wires(&self) -> usize {
        self.wires.len()
    }

    pub fn num_gates(&self) -> usize {
        self.gates.len()
    }

    pub fn gate_count(&self) -> &GateCount {
        &self.gate_count
    }

    /// Write a raw value into an existing wire.
    pub fn assign(&mut self, id: WireId, value: bool) -> Result<(), CircuitError> {
        Ok(self.wires.set_value(id, value)?)
    }

    pub(crate) fn register_gate(&mut self, gate: Gate) -> Result<(), CircuitError> {
        if self.gates.contains_key(&gate.id()) {
            return Err(CircuitError::DuplicateGate(gate.id()));
        }

        trace!("add gate {gate}");
        self.gate_count.handle(gate.function);
        self.gates.insert(gate.id(), gate);
        Ok(())
    }

    pub(crate) fn declare_input(&mut self, id: WireId, inverted: bool) -> Result<(), CircuitError> {
        self.wires.insert(WireInstance::new(id, inverted), None)?;
        self.input_ids.insert(id);
        Ok(())
    }

    pub(crate) fn declare_output(
        &mut self,
        id: WireId,
        inverted: bool,
        value: Option<bool>,
    ) -> Result<(), CircuitError> {
        if self.output_set.contains(&id) {
            return Err(CircuitError::DuplicateOutput(id));
        }

        // The inversion belongs to this output only; gate readers keep
        // the registered instance.
        if !self.wires.contains(id) {
            self.wires.insert(WireInstance::new(id, false), None)?;
        }

        if let Some(value) = value {
            self.wires.set_value(id, value)?;
        }

        self.output_set.insert(id);
        self.output_ids.push((id, inverted));
        Ok(())
    }

    /// Netlist gate declaration. Inputs are `(id, inverted)` as decoded from
    /// their indices and must already exist.
    pub(crate) fn create_gate(
        &mut self,
        function: GateFunction,
        out: WireId,
        in0: (WireId, bool),
        in1: (WireId, bool),
    ) -> Result<(), CircuitError> {
        if self.gates.contains_key(&out) {
            return Err(CircuitError::DuplicateGate(out));
        }
        if self.input_ids.contains(&out) {
            return Err(CircuitError::GateDrivesInput(out));
        }

        for (wire, _) in [in0, in1] {
            if wire == out || !self.wires.contains(wire) {
                return Err(CircuitError::MissingInput { gate: out, wire });
            }
        }

        if !self.wires.contains(out) {
            self.wires.insert(WireInstance::new(out, false), None)?;
        }

        self.match_polarity(in0.0, in0.1)?;
        self.match_polarity(in1.0, in1.1)?;

        self.register_gate(Gate::new(function, in0.0, in1.0, out))
    }

    /// Flip the registered instance of `id` if its polarity differs.
    fn match_polarity(&mut self, id: WireId, inverted: bool) -> Result<(), CircuitError> {
        let instance = self.wires.instance_mut(id)?;
        if instance.is_inverted() != inverted {
            instance.invert()?;
        }
        Ok(())
    }

    pub fn issue_input_wire(&mut self) -> WireId {
        let wire = self.issue_wire();
        self.input_ids.insert(wire);
        wire
    }

    /// Append a synthesized wire to the ordered output list. The output reads
    /// the wire the way gates do, with its registered polarity.
    pub fn make_output(&mut self, id: WireId) -> Result<(), CircuitError> {
        let inverted = self.wires.instance(id)?.is_inverted();
        if !self.output_set.insert(id) {
            return Err(CircuitError::DuplicateOutput(id));
        }
        self.output_ids.push((id, inverted));
        Ok(())
    }

    fn begin_synthesis(&mut self) {
        assert_ne!(
            self.origin,
            Origin::Netlist,
            "synthesis is not available on a circuit loaded from a netlist"
        );
        self.origin = Origin::Synthesis;
    }

    fn fresh_wire(&mut self, inverted: bool, value: Option<bool>) -> WireId {
        self.begin_synthesis();

        let id = WireId(self.next_wire);
        self.next_wire += 1;

        if let Err(err) = self.wires.insert(WireInstance::new(id, inverted), value) {
            panic!("wire counter handed out an unusable id: {err}");
        }
        id
    }

    fn remember_complement(&mut self, a: WireId, b: WireId) {
        self.complements.insert(a, b);
        self.complements.insert(b, a);
    }
}

impl CircuitContext for Circuit {
    #[inline]
    fn issue_wire(&mut self) -> WireId {
        self.fresh_wire(false, None)
    }

    fn constant_wire(&mut self, bit: bool) -> WireId {
        self.fresh_wire(false, Some(bit))
    }

    fn add_gate(&mut self, function: GateFunction, a: WireId, b: WireId) -> WireId {
        assert!(
            self.wires.contains(a) && self.wires.contains(b),
            "gate inputs {a} and {b} must exist before the gate"
        );

        let out = self.issue_wire();
        if let Err(err) = self.register_gate(Gate::new(function, a, b, out)) {
            panic!("fresh gate output collides: {err}");
        }
        out
    }

    fn invert(&mut self, wire: WireId) -> WireId {
        if let Some(complement) = self.complement_of(wire) {
            return complement;
        }

        let value = self
            .wires
            .effective(wire)
            .unwrap_or_else(|err| panic!("cannot invert: {err}"));

        if self.input_ids.contains(&wire) {
            let complement = self.fresh_wire(false, value.map(|v| !v));
            self.remember_complement(wire, complement);
            self.input_complements.push((wire, complement));
            return complement;
        }

        if let Some(gate) = self.gates.get(&wire).copied() {
            // Cloning the driving gate with flipped output polarity is the
            // complement without an extra inverter.
            let (raw, inverted) = match (self.wires.get(wire), self.wires.instance(wire)) {
                (Ok(original), Ok(instance)) => (original.value, instance.is_inverted()),
                _ => unreachable!("gate output {wire} is registered"),
            };

            let complement = self.fresh_wire(!inverted, raw);
            if let Err(err) = self.register_gate(gate.with_output(complement)) {
                panic!("fresh gate output collides: {err}");
            }
            self.remember_complement(wire, complement);
            return complement;
        }

        match value {
            Some(bit) => self.constant_wire(!bit),
            None => panic!("wire {wire} is neither an input, a gate output nor a constant"),
        }
    }
}
