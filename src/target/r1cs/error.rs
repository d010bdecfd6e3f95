//! Errors

use r1cs_fields::{FieldT, FieldV};
use std::fmt::{self, Display, Formatter};
use thiserror::Error;

use super::{HintId, Visibility};

/// A misuse of the [Compiler](super::Compiler) API. These indicate bugs in the circuit.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UsageError {
    /// An input was allocated after [Compiler::fix_schema](super::Compiler::fix_schema)
    #[error("cannot allocate {0} input '{1}' after the schema is fixed")]
    InputAfterSchema(Visibility, String),
    /// The schema was fixed twice
    #[error("the schema is already fixed")]
    SchemaAlreadyFixed,
    /// A hint must produce at least one wire
    #[error("hint {0} must have at least one output")]
    HintWithoutOutputs(HintId),
    /// Only 0 and 1 are boolean
    #[error("constant {0} is not boolean")]
    NonBooleanConstant(FieldV),
    /// A variable with no terms was used as a value
    #[error("variable is unset")]
    UnsetVariable,
}

/// Inputs (and hint outputs) that no constraint depends on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnconstrainedInputs {
    /// Names of unconstrained secret inputs, in allocation order
    pub secret: Vec<String>,
    /// Names of unconstrained public inputs, in allocation order
    pub public: Vec<String>,
    /// How many hint outputs are unconstrained
    pub hint_outputs: usize,
}

impl Display for UnconstrainedInputs {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if !self.secret.is_empty() {
            writeln!(f, "{} unconstrained secret input(s):", self.secret.len())?;
            for name in &self.secret {
                writeln!(f, "{}", name)?;
            }
            writeln!(f)?;
        }
        if !self.public.is_empty() {
            writeln!(f, "{} unconstrained public input(s):", self.public.len())?;
            for name in &self.public {
                writeln!(f, "{}", name)?;
            }
            writeln!(f)?;
        }
        if self.hint_outputs != 0 {
            writeln!(f, "{} unconstrained hints", self.hint_outputs)?;
        }
        Ok(())
    }
}

impl std::error::Error for UnconstrainedInputs {}

/// Why [Compiler::compile](super::Compiler::compile) failed.
#[derive(Debug, Error)]
pub enum CompileError {
    /// API misuse while defining the circuit
    #[error(transparent)]
    Usage(#[from] UsageError),
    /// Some inputs are not constrained
    #[error("{0}")]
    Unconstrained(#[from] UnconstrainedInputs),
    /// No constraint-system backend for this field
    #[error("no constraint system for field {0}")]
    UnsupportedField(FieldT),
}

impl CompileError {
    /// Is this a bug in the circuit or configuration (as opposed to a validation failure)?
    pub fn is_fatal(&self) -> bool {
        !matches!(self, CompileError::Unconstrained(_))
    }
}

/// Why [Solver::solve](super::Solver::solve) failed.
#[derive(Debug, Error)]
pub enum SolveError {
    /// Wrong number of input values
    #[error("expected {expected} {visibility} inputs, got {got}")]
    InputCount {
        /// public or secret
        visibility: Visibility,
        /// number of wires of that class (not counting the constant wire)
        expected: usize,
        /// number of values given
        got: usize,
    },
    /// Wrong number of wire values
    #[error("expected {expected} wire values, got {got}")]
    WitnessLength {
        /// number of wires
        expected: usize,
        /// number of values given
        got: usize,
    },
    /// No function registered for a hint
    #[error("no function registered for hint {0}")]
    MissingHint(HintId),
    /// A hint function failed
    #[error("hint {id} failed: {msg}")]
    Hint {
        /// which hint
        id: HintId,
        /// its message
        msg: String,
    },
    /// A fully-assigned constraint does not hold
    #[error("constraint #{index} is not satisfied:\n{detail}")]
    Unsatisfied {
        /// constraint index
        index: usize,
        /// the constraint and its values
        detail: String,
    },
    /// A constraint has more than one unsolved wire
    #[error("constraint #{index} has more than one unsolved wire")]
    TooManyUnknowns {
        /// constraint index
        index: usize,
    },
    /// A constraint's single unsolved wire cannot be computed from it
    #[error("constraint #{index} cannot solve wire {wire}: {reason}")]
    Unsolvable {
        /// constraint index
        index: usize,
        /// the wire
        wire: usize,
        /// why
        reason: &'static str,
    },
    /// Some wire was never solved
    #[error("wire {wire} ({name}) has no value after solving")]
    Unassigned {
        /// the wire
        wire: usize,
        /// its name
        name: String,
    },
    /// Another error, at a constraint with debug information
    #[error("{source}\n  at {debug}")]
    WithDebug {
        /// the rendered debug entry
        debug: String,
        /// the error
        #[source]
        source: Box<SolveError>,
    },
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unconstrained_report() {
        let e = UnconstrainedInputs {
            secret: vec!["x".into(), "y".into()],
            public: vec!["z".into()],
            hint_outputs: 2,
        };
        assert_eq!(
            e.to_string(),
            "2 unconstrained secret input(s):\nx\ny\n\n1 unconstrained public input(s):\nz\n\n2 unconstrained hints\n"
        );
        let c = CompileError::from(e);
        assert!(!c.is_fatal());
        assert!(CompileError::from(UsageError::SchemaAlreadyFixed).is_fatal());
    }
}
