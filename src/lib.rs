pub mod circuit;
mod core;
pub mod gadgets;
pub mod logging;

pub use crate::core::{
    gate::Gate,
    gate_type::{GateCount, GateFunction},
    progress::GATE_LOG_STEP,
    wire::{Wire, WireError, WireId, WireInstance},
};
pub use circuit::{Circuit, CircuitContext, CircuitError, ErrorKind, Origin};
pub use gadgets::{IntWires, int::IntError};
pub use logging::init_tracing;
