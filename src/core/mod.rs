pub mod gate;
pub mod gate_type;
pub mod progress;
pub mod wire;
