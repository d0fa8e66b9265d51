use thiserror::Error;

use crate::enums::{Action, SequenceKind, State};
use crate::transitions::ByteRange;

/// Defect found while validating the transition rules.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    #[error("{rules} rules: {first} overlaps {second}")]
    Overlap {
        rules: &'static str,
        first: ByteRange,
        second: ByteRange,
    },

    #[error("{rules} rules: inverted range {range}")]
    Inverted {
        rules: &'static str,
        range: ByteRange,
    },
}

/// An action fired while the sequence it needs was not in the expected
/// state. Malformed input can never cause this, only a broken table.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    #[error("collect fired in state {state}")]
    Collect { state: State },

    #[error("param fired with {sequence} sequence open")]
    Param { sequence: SequenceKind },

    #[error("{action} fired with {sequence} sequence open")]
    Sequence {
        action: Action,
        sequence: SequenceKind,
    },
}
