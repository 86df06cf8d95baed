mod circuit_context_trait;
pub mod errors;
mod evaluation;
mod netlist;
mod structure;

pub use circuit_context_trait::CircuitContext;
pub use errors::{CircuitError, ErrorKind};
pub use structure::{Circuit, Origin};
