use crate::{GateFunction, WireId};

/// Gate-building surface used by the gadgets.
///
/// Implementors only allocate wires and register gates; they never look at the
/// values flowing through them, so every gadget stays branch-free.
pub trait CircuitContext: Sized {
    /// Allocates a new wire and returns its identifier
    fn issue_wire(&mut self) -> WireId;

    /// Allocates a pre-solved wire that already holds `bit`
    fn constant_wire(&mut self, bit: bool) -> WireId;

    /// Registers a gate over `a` and `b` on a fresh output wire
    fn add_gate(&mut self, function: GateFunction, a: WireId, b: WireId) -> WireId;

    /// Logical complement of `wire`, reusing a previously built one if present
    fn invert(&mut self, wire: WireId) -> WireId;
}
