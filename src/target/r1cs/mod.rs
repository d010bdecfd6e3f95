//! Rank 1 Constraint Systems
//!
//! A [Compiler] allocates wires and emits constraints `L * R = O` over [LinearExpression]s.
//! [Compiler::compile] checks that every input is constrained, renumbers the wires into the
//! layout `[public | secret | internal]`, and partitions the constraints into levels that a
//! [Solver] can process in parallel.
//!
//! Wires are identified by a number *and* a [Visibility]: each visibility class numbers its wires
//! from zero until finalization. Public wire 0 is bound to the constant 1; a constant `c` is the
//! expression `c * one`.

use fxhash::FxHasher;
use itertools::Itertools;
use r1cs_fields::{FieldT, FieldV};
use rug::Integer;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::Hasher;

mod check;
pub mod coeff;
mod compiler;
pub mod debug;
pub mod error;
mod finalize;
pub mod hint;
mod levels;
pub mod solve;


pub use check::check_variables;
pub use coeff::{CoeffId, CoeffTable};
pub use compiler::Compiler;
pub use debug::{Counter, DebugData, DebugInfoId, LogEntry, Tag};
pub use error::{CompileError, SolveError, UnconstrainedInputs, UsageError};
pub use finalize::{R1csFinal, WireShift};
pub use hint::{Hint, HintFunctions, HintId, HintInput, HintRegistry};
pub use levels::build_levels;
pub use solve::Solver;

/// The class of a wire.
///
/// The order of the variants is the order of terms in a sorted [LinearExpression].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Visibility {
    /// An instance input. Public wire 0 is the constant 1.
    Public,
    /// A witness input
    Secret,
    /// A wire allocated by the compiler
    Internal,
    /// Not yet classified
    Unset,
}

impl Visibility {
    fn code(self) -> u64 {
        match self {
            Visibility::Public => 0b000,
            Visibility::Secret => 0b001,
            Visibility::Internal => 0b010,
            Visibility::Unset => 0b011,
        }
    }
    fn from_code(c: u64) -> Self {
        match c {
            0b000 => Visibility::Public,
            0b001 => Visibility::Secret,
            0b010 => Visibility::Internal,
            0b011 => Visibility::Unset,
            c => panic!("Bad visibility code {}", c),
        }
    }
}

impl Display for Visibility {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Secret => write!(f, "secret"),
            Visibility::Internal => write!(f, "internal"),
            Visibility::Unset => write!(f, "unset"),
        }
    }
}

/// A coefficient times a wire, packed into 64 bits.
///
/// From the most significant end: 3 bits of [Visibility], 31 bits of wire number, 30 bits of
/// [CoeffId]. The integer order is therefore (visibility, wire, coefficient).
#[derive(Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Term(u64);

impl Term {
    const COEFF_BITS: u32 = 30;
    const WIRE_BITS: u32 = 31;
    const COEFF_MASK: u64 = (1 << Self::COEFF_BITS) - 1;
    const WIRE_MASK: u64 = (1 << Self::WIRE_BITS) - 1;
    const WIRE_SHIFT: u32 = Self::COEFF_BITS;
    const VIS_SHIFT: u32 = Self::COEFF_BITS + Self::WIRE_BITS;

    /// The largest wire number a term can hold
    pub const MAX_WIRE: usize = Self::WIRE_MASK as usize;

    /// Pack `coeff * wire`.
    #[track_caller]
    pub fn new(wire: usize, coeff: CoeffId, vis: Visibility) -> Self {
        let wire = wire as u64;
        let coeff = coeff.index() as u64;
        assert!(
            wire & !Self::WIRE_MASK == 0,
            "Wire {} does not fit in a term",
            wire
        );
        assert!(
            coeff & !Self::COEFF_MASK == 0,
            "Coefficient {} does not fit in a term",
            coeff
        );
        Term(vis.code() << Self::VIS_SHIFT | wire << Self::WIRE_SHIFT | coeff)
    }

    /// The coefficient
    pub fn coeff_id(&self) -> CoeffId {
        CoeffId::from_index((self.0 & Self::COEFF_MASK) as usize)
    }

    /// The wire number
    pub fn wire_id(&self) -> usize {
        ((self.0 >> Self::WIRE_SHIFT) & Self::WIRE_MASK) as usize
    }

    /// The wire's class
    pub fn visibility(&self) -> Visibility {
        Visibility::from_code(self.0 >> Self::VIS_SHIFT)
    }

    /// (coefficient, wire, visibility)
    pub fn unpack(&self) -> (CoeffId, usize, Visibility) {
        (self.coeff_id(), self.wire_id(), self.visibility())
    }

    /// The same wire, with coefficient `coeff`
    pub fn with_coeff(self, coeff: CoeffId) -> Self {
        Term::new(self.wire_id(), coeff, self.visibility())
    }

    /// The same coefficient and class, on wire `wire`
    pub fn with_wire(self, wire: usize) -> Self {
        Term::new(wire, self.coeff_id(), self.visibility())
    }

    /// Do these terms refer to the same wire?
    pub fn same_wire(&self, other: &Term) -> bool {
        self.0 >> Self::WIRE_SHIFT == other.0 >> Self::WIRE_SHIFT
    }

    /// Is this a multiple of the constant wire?
    pub fn is_constant(&self) -> bool {
        self.wire_id() == 0 && self.visibility() == Visibility::Public
    }
}

impl Debug for Term {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "c{}*{}({})",
            self.coeff_id().index(),
            self.visibility(),
            self.wire_id()
        )
    }
}

/// A sum of [Term]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinearExpression(Vec<Term>);

impl LinearExpression {
    /// Build from terms, as given
    pub fn new(terms: Vec<Term>) -> Self {
        LinearExpression(terms)
    }

    /// The terms
    pub fn terms(&self) -> &[Term] {
        &self.0
    }

    /// Take the terms
    pub fn into_terms(self) -> Vec<Term> {
        self.0
    }

    /// Number of terms
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// No terms?
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over terms
    pub fn iter(&self) -> std::slice::Iter<'_, Term> {
        self.0.iter()
    }

    /// Are the terms in ascending order?
    pub fn is_sorted(&self) -> bool {
        self.0.windows(2).all(|w| w[0] <= w[1])
    }

    /// Sort the terms by (visibility, wire, coefficient).
    pub fn sort(&mut self) {
        if !self.is_sorted() {
            self.0.sort_unstable();
        }
    }

    /// A hash of the terms, in their current order.
    pub fn hash_code(&self) -> u64 {
        let mut h = FxHasher::default();
        for t in &self.0 {
            h.write_u64(t.0);
        }
        h.finish()
    }

    /// A copy with every wire renumbered by `shift`
    pub fn shifted(&self, shift: &WireShift) -> Self {
        self.0.iter().map(|t| shift.term(*t)).collect()
    }
}

impl FromIterator<Term> for LinearExpression {
    fn from_iter<I: IntoIterator<Item = Term>>(iter: I) -> Self {
        LinearExpression(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a LinearExpression {
    type Item = &'a Term;
    type IntoIter = std::slice::Iter<'a, Term>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A circuit value: a linear expression over wires.
///
/// The default variable is *unset*; it has no terms and cannot be used where a value is needed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variable {
    lin_exp: LinearExpression,
}

impl Variable {
    pub(crate) fn new(lin_exp: LinearExpression) -> Self {
        Self { lin_exp }
    }

    pub(crate) fn from_term(t: Term) -> Self {
        Self::new(LinearExpression(vec![t]))
    }

    /// The underlying expression
    pub fn lin_exp(&self) -> &LinearExpression {
        &self.lin_exp
    }

    /// Take the underlying expression
    pub fn into_lin_exp(self) -> LinearExpression {
        self.lin_exp
    }

    /// Has this variable been given a value?
    pub fn is_set(&self) -> bool {
        !self.lin_exp.is_empty()
    }

    /// Error unless [Variable::is_set]
    pub fn assert_is_set(&self) -> Result<(), UsageError> {
        if self.is_set() {
            Ok(())
        } else {
            Err(UsageError::UnsetVariable)
        }
    }
}

/// Anything the [Compiler] accepts as a value: a variable, or an integer constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A circuit variable
    Variable(Variable),
    /// A constant, reduced into the field on use
    Constant(Integer),
}

impl From<Variable> for Input {
    fn from(v: Variable) -> Self {
        Input::Variable(v)
    }
}

impl From<&Variable> for Input {
    fn from(v: &Variable) -> Self {
        Input::Variable(v.clone())
    }
}

impl From<Integer> for Input {
    fn from(i: Integer) -> Self {
        Input::Constant(i)
    }
}

impl From<&Integer> for Input {
    fn from(i: &Integer) -> Self {
        Input::Constant(i.clone())
    }
}

impl From<FieldV> for Input {
    fn from(v: FieldV) -> Self {
        Input::Constant(v.into())
    }
}

impl From<&FieldV> for Input {
    fn from(v: &FieldV) -> Self {
        Input::Constant(v.i())
    }
}

macro_rules! input_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Input {
                fn from(i: $t) -> Self {
                    Input::Constant(Integer::from(i))
                }
            }
        )*
    };
}

input_from_int!(i32, i64, u32, u64, usize);

/// A rank-1 constraint, `l * r = o`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct R1c {
    /// Left factor
    pub l: LinearExpression,
    /// Right factor
    pub r: LinearExpression,
    /// Product
    pub o: LinearExpression,
}

impl R1c {
    /// Build `l * r = o` from copies of the arguments. If `l` has more terms than `r`, the
    /// factors are swapped.
    pub fn new(l: &LinearExpression, r: &LinearExpression, o: &LinearExpression) -> Self {
        let (l, r) = if l.len() > r.len() { (r, l) } else { (l, r) };
        R1c {
            l: l.clone(),
            r: r.clone(),
            o: o.clone(),
        }
    }

    /// `[l, r, o]`
    pub fn exprs(&self) -> [&LinearExpression; 3] {
        [&self.l, &self.r, &self.o]
    }

    /// All terms of `l`, then `r`, then `o`
    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        self.l.iter().chain(self.r.iter()).chain(self.o.iter())
    }

    pub(crate) fn shifted(&self, shift: &WireShift) -> Self {
        R1c {
            l: self.l.shifted(shift),
            r: self.r.shifted(shift),
            o: self.o.shifted(shift),
        }
    }
}

/// Render `lc` as a signed sum, naming wires with `name`.
pub(crate) fn format_lc(
    field: &FieldT,
    coeffs: &[FieldV],
    lc: &LinearExpression,
    name: impl Fn(&Term) -> String,
) -> String {
    let half_m: Integer = field.modulus().clone() / 2;
    let abs = |i: Integer| {
        if i <= half_m {
            i
        } else {
            field.modulus() - i
        }
    };
    let sign = |i: &Integer| if i <= &half_m { "+" } else { "-" };
    let format_i = |i: &FieldV| {
        let ii: Integer = i.into();
        format!("{}{}", sign(&ii), abs(ii))
    };
    if lc.is_empty() {
        return "+0".into();
    }
    lc.iter()
        .map(|t| {
            let c = &coeffs[t.coeff_id().index()];
            if t.is_constant() {
                format_i(c)
            } else {
                format!("{} {}", format_i(c), name(t))
            }
        })
        .join(" ")
}
