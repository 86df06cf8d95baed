use std::{io, path::PathBuf};

use crate::{WireError, WireId};

/// Coarse classification of a [`CircuitError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad tokens, out-of-range codes, non-binary values.
    Malformed,
    /// Duplicate or missing wires and gates, a gate driving an input, double
    /// inversion, evaluation order.
    Structural,
    /// A referenced file could not be read or written.
    Resource,
}

#[derive(Debug, thiserror::Error)]
pub enum CircuitError {
    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<CircuitError>,
    },

    #[error("invalid token `{0}`")]
    InvalidToken(String),
    #[error("gate function code {0} is outside 1..=15")]
    FunctionOutOfRange(u64),
    #[error("gate output index {0} is odd; gate outputs are declared non-inverted")]
    InvertedGateOutput(usize),
    #[error("value `{0}` is not binary")]
    NonBinaryValue(String),

    #[error("gate driving wire {0} is defined twice")]
    DuplicateGate(WireId),
    #[error("gate drives wire {0}, which is declared as an input")]
    GateDrivesInput(WireId),
    #[error("wire {0} is declared as output twice")]
    DuplicateOutput(WireId),
    #[error("gate {gate} references undeclared wire {wire}")]
    MissingInput { gate: WireId, wire: WireId },
    #[error("gate {gate} reads gate output {wire}, which is evaluated later")]
    OutOfOrder { gate: WireId, wire: WireId },
    #[error("output wire {0} is neither an input, a gate output nor pre-seeded")]
    UndrivenOutput(WireId),
    #[error("gate {gate} reads wire {wire} before it was assigned")]
    UnassignedInput { gate: WireId, wire: WireId },
    #[error("output wire {0} has no value")]
    UnassignedOutput(WireId),
    #[error(transparent)]
    Wire(#[from] WireError),

    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CircuitError {
    pub(crate) fn at_line(self, line: usize) -> Self {
        match self {
            already @ Self::Line { .. } => already,
            other => Self::Line {
                line,
                source: Box::new(other),
            },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Line { source, .. } => source.kind(),
            Self::InvalidToken(_)
            | Self::FunctionOutOfRange(_)
            | Self::InvertedGateOutput(_)
            | Self::NonBinaryValue(_) => ErrorKind::Malformed,
            Self::DuplicateGate(_)
            | Self::GateDrivesInput(_)
            | Self::DuplicateOutput(_)
            | Self::MissingInput { .. }
            | Self::OutOfOrder { .. }
            | Self::UndrivenOutput(_)
            | Self::UnassignedInput { .. }
            | Self::UnassignedOutput(_)
            | Self::Wire(_) => ErrorKind::Structural,
            Self::Io { .. } => ErrorKind::Resource,
        }
    }

    /// The error without its line wrapper.
    pub fn root(&self) -> &CircuitError {
        match self {
            Self::Line { source, .. } => source.root(),
            other => other,
        }
    }
}
