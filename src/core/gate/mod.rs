use std::fmt;

pub use crate::GateFunction;
use crate::WireId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Gate {
    pub function: GateFunction,
    pub wire_a: WireId,
    pub wire_b: WireId,
    /// Output wire; also the identity of the gate.
    pub wire_c: WireId,
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.function, self.wire_a, self.wire_b, self.wire_c
        )
    }
}

impl Gate {
    #[must_use]
    pub fn new(function: GateFunction, a: WireId, b: WireId, c: WireId) -> Self {
        Self {
            function,
            wire_a: a,
            wire_b: b,
            wire_c: c,
        }
    }

    #[must_use]
    pub fn and(wire_a: WireId, wire_b: WireId, wire_c: WireId) -> Self {
        Self::new(GateFunction::AND, wire_a, wire_b, wire_c)
    }

    #[must_use]
    pub fn nimp(wire_a: WireId, wire_b: WireId, wire_c: WireId) -> Self {
        Self::new(GateFunction::NIMP, wire_a, wire_b, wire_c)
    }

    #[must_use]
    pub fn or(wire_a: WireId, wire_b: WireId, wire_c: WireId) -> Self {
        Self::new(GateFunction::OR, wire_a, wire_b, wire_c)
    }

    #[must_use]
    pub fn xor(wire_a: WireId, wire_b: WireId, wire_c: WireId) -> Self {
        Self::new(GateFunction::XOR, wire_a, wire_b, wire_c)
    }

    pub fn id(&self) -> WireId {
        self.wire_c
    }

    /// Same function and inputs, driving another output wire.
    #[must_use]
    pub fn with_output(&self, wire_c: WireId) -> Self {
        Self { wire_c, ..*self }
    }

    /// Evaluate on polarity-resolved input values.
    #[inline]
    pub fn execute(&self, a: bool, b: bool) -> bool {
        self.function.eval(a, b)
    }
}
