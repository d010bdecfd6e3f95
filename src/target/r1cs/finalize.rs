//! Finalization: the `[public | secret | internal]` wire layout

use log::debug;
use r1cs_fields::{FieldT, FieldV};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::*;

/// Maps per-class wire numbers to positions in `[public | secret | internal]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireShift {
    num_public: usize,
    num_secret: usize,
}

impl WireShift {
    /// A layout with `num_public` public wires (counting the constant wire) and `num_secret`
    /// secret wires.
    pub fn new(num_public: usize, num_secret: usize) -> Self {
        WireShift {
            num_public,
            num_secret,
        }
    }

    /// Public and secret wires
    pub fn num_inputs(&self) -> usize {
        self.num_public + self.num_secret
    }

    /// The final number of wire `wire` of class `vis`
    pub fn apply(&self, wire: usize, vis: Visibility) -> usize {
        match vis {
            Visibility::Public | Visibility::Unset => wire,
            Visibility::Secret => wire + self.num_public,
            Visibility::Internal => self.internal(wire),
        }
    }

    /// The final number of internal wire `wire`
    pub fn internal(&self, wire: usize) -> usize {
        wire + self.num_inputs()
    }

    /// `t`, renumbered
    pub fn term(&self, t: Term) -> Term {
        t.with_wire(self.apply(t.wire_id(), t.visibility()))
    }
}

impl Compiler {
    /// Check inputs (unless configured not to), renumber all wires, and compute levels.
    pub fn compile(self) -> Result<R1csFinal, CompileError> {
        if !self.opt.ignore_unconstrained_inputs {
            check_variables(&self)?;
        }
        if !self.field.is_builtin() {
            return Err(CompileError::UnsupportedField(self.field));
        }
        let Compiler {
            field,
            public,
            secret,
            num_internal,
            constraints,
            coeffs,
            hints,
            debug,
            counters,
            ..
        } = self;
        let shift = WireShift::new(public.len(), secret.len());
        let constraints: Vec<R1c> = constraints.iter().map(|c| c.shifted(&shift)).collect();
        let hints = hints.shifted(&shift);
        let debug = debug.shifted(&shift);
        let levels = build_levels(&constraints, &hints, shift.num_inputs());
        debug!(
            "Compiled: {} public, {} secret, {} internal wires; {} constraints in {} levels; {} hints",
            public.len(),
            secret.len(),
            num_internal,
            constraints.len(),
            levels.len(),
            hints.len()
        );
        Ok(R1csFinal {
            field,
            public,
            secret,
            num_internal,
            constraints,
            coeffs: coeffs.into_coeffs(),
            hints,
            debug,
            levels,
            counters,
        })
    }
}

/// A finalized constraint system.
///
/// Wire `i` is public for `i < num_public`, then secret, then internal. Wire 0 is the constant 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct R1csFinal {
    field: FieldT,
    public: Vec<String>,
    secret: Vec<String>,
    num_internal: usize,
    constraints: Vec<R1c>,
    coeffs: Vec<FieldV>,
    hints: HintRegistry,
    debug: DebugData,
    levels: Vec<Vec<usize>>,
    counters: Vec<Counter>,
}

impl R1csFinal {
    /// The field
    pub fn field(&self) -> &FieldT {
        &self.field
    }
    /// Number of public wires, including the constant wire
    pub fn num_public(&self) -> usize {
        self.public.len()
    }
    /// Number of secret wires
    pub fn num_secret(&self) -> usize {
        self.secret.len()
    }
    /// Number of internal wires
    pub fn num_internal(&self) -> usize {
        self.num_internal
    }
    /// Total number of wires
    pub fn num_wires(&self) -> usize {
        self.public.len() + self.secret.len() + self.num_internal
    }
    /// Names of the public wires (the first is `one`)
    pub fn public_names(&self) -> &[String] {
        &self.public
    }
    /// Names of the secret wires
    pub fn secret_names(&self) -> &[String] {
        &self.secret
    }
    /// The constraints
    pub fn constraints(&self) -> &[R1c] {
        &self.constraints
    }
    /// Coefficient values, by [CoeffId]
    pub fn coeffs(&self) -> &[FieldV] {
        &self.coeffs
    }
    /// The value of a coefficient
    pub fn coeff(&self, id: CoeffId) -> &FieldV {
        &self.coeffs[id.index()]
    }
    /// Hints, keyed by final output wires
    pub fn hints(&self) -> &HintRegistry {
        &self.hints
    }
    /// Log and debug entries, in final numbering
    pub fn debug(&self) -> &DebugData {
        &self.debug
    }
    /// Constraint indices, grouped into levels
    pub fn levels(&self) -> &[Vec<usize>] {
        &self.levels
    }
    /// Counters recorded while building
    pub fn counters(&self) -> &[Counter] {
        &self.counters
    }

    /// A name for wire `w`
    pub fn wire_name(&self, w: usize) -> String {
        let np = self.public.len();
        let ns = self.secret.len();
        if w < np {
            self.public[w].clone()
        } else if w < np + ns {
            self.secret[w - np].clone()
        } else {
            format!("internal_{}", w - np - ns)
        }
    }

    /// Get a nice string represenation of the combination `lc`.
    pub fn format_lc(&self, lc: &LinearExpression) -> String {
        format_lc(&self.field, &self.coeffs, lc, |t| self.wire_name(t.wire_id()))
    }

    /// Evaluate `lc`, given a value for every wire.
    pub fn eval(&self, lc: &LinearExpression, values: &[FieldV]) -> FieldV {
        let mut acc = self.field.zero();
        for t in lc {
            acc += values[t.wire_id()].clone() * self.coeff(t.coeff_id());
        }
        acc
    }

    /// Check constraint `index` against a value for every wire.
    pub fn check(&self, index: usize, values: &[FieldV]) -> Result<(), SolveError> {
        let c = &self.constraints[index];
        let av = self.eval(&c.l, values);
        let bv = self.eval(&c.r, values);
        let cv = self.eval(&c.o, values);
        if av.clone() * &bv != cv {
            return Err(SolveError::Unsatisfied {
                index,
                detail: format!(
                    "Error! Bad constraint:\n    {} (value {})\n  * {} (value {})\n  = {} (value {})",
                    self.format_lc(&c.l),
                    av,
                    self.format_lc(&c.r),
                    bv,
                    self.format_lc(&c.o),
                    cv
                ),
            });
        }
        Ok(())
    }

    /// Check all constraints
    pub fn check_all(&self, values: &[FieldV]) -> Result<(), SolveError> {
        if values.len() != self.num_wires() {
            return Err(SolveError::WitnessLength {
                expected: self.num_wires(),
                got: values.len(),
            });
        }
        (0..self.constraints.len())
            .into_par_iter()
            .try_for_each(|i| self.check(i, values))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn shift() {
        let s = WireShift::new(3, 4);
        assert_eq!(s.apply(5, Visibility::Internal), 12);
        assert_eq!(s.apply(2, Visibility::Secret), 5);
        assert_eq!(s.apply(1, Visibility::Public), 1);
        let t = Term::new(2, CoeffId::TWO, Visibility::Secret);
        assert_eq!(s.term(t).unpack(), (CoeffId::TWO, 5, Visibility::Secret));
    }
}
