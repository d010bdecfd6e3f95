//! Hints: wires computed outside the constraint system
//!
//! A hint is a function run by the [Solver](super::Solver). Its outputs are internal wires that no
//! constraint defines; the circuit must constrain them itself.

use fxhash::FxHashMap as HashMap;
use log::trace;
use r1cs_fields::{FieldT, FieldV};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display, Formatter};

use super::{LinearExpression, WireShift};

/// Identifies a hint function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HintId(u32);

impl HintId {
    /// The id of the function called `name`
    pub fn from_name(name: &str) -> Self {
        HintId(fxhash::hash32(name))
    }

    /// An explicit id
    pub fn new(id: u32) -> Self {
        HintId(id)
    }
}

impl Display for HintId {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// An argument to a hint function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HintInput {
    /// The value of an expression
    Expression(LinearExpression),
    /// A constant
    Constant(FieldV),
}

/// One call of a hint function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    /// The function
    pub id: HintId,
    /// Its arguments
    pub inputs: Vec<HintInput>,
    /// The wires it writes, in order
    pub wires: Vec<usize>,
}

impl Hint {
    fn shifted(&self, shift: &WireShift) -> Self {
        Hint {
            id: self.id,
            inputs: self
                .inputs
                .iter()
                .map(|i| match i {
                    HintInput::Expression(e) => HintInput::Expression(e.shifted(shift)),
                    HintInput::Constant(c) => HintInput::Constant(c.clone()),
                })
                .collect(),
            wires: self.wires.iter().map(|w| shift.internal(*w)).collect(),
        }
    }
}

/// All hint calls of one compilation, reachable from each of their output wires.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Hint>", into = "Vec<Hint>")]
pub struct HintRegistry {
    hints: Vec<Hint>,
    by_wire: HashMap<usize, usize>,
}

impl HintRegistry {
    /// Record `hint`; each of its wires must be fresh.
    pub fn insert(&mut self, hint: Hint) {
        let idx = self.hints.len();
        for w in &hint.wires {
            let prev = self.by_wire.insert(*w, idx);
            assert!(prev.is_none(), "Wire {} is already a hint output", w);
        }
        trace!("Hint {}: {} inputs -> {:?}", hint.id, hint.inputs.len(), hint.wires);
        self.hints.push(hint);
    }

    /// The hint that writes `wire`
    pub fn get(&self, wire: usize) -> Option<&Hint> {
        self.by_wire.get(&wire).map(|i| &self.hints[*i])
    }

    /// Is `wire` written by a hint?
    pub fn is_output(&self, wire: usize) -> bool {
        self.by_wire.contains_key(&wire)
    }

    /// Total number of hint output wires
    pub fn num_outputs(&self) -> usize {
        self.by_wire.len()
    }

    /// Number of hint calls
    pub fn len(&self) -> usize {
        self.hints.len()
    }

    /// No hint calls?
    pub fn is_empty(&self) -> bool {
        self.hints.is_empty()
    }

    /// Hint calls, in creation order
    pub fn iter(&self) -> std::slice::Iter<'_, Hint> {
        self.hints.iter()
    }

    /// A copy in which every call is renumbered once.
    pub fn shifted(&self, shift: &WireShift) -> Self {
        self.hints.iter().map(|h| h.shifted(shift)).collect::<Vec<_>>().into()
    }
}

impl From<Vec<Hint>> for HintRegistry {
    fn from(hints: Vec<Hint>) -> Self {
        let mut r = HintRegistry::default();
        for h in hints {
            r.insert(h);
        }
        r
    }
}

impl From<HintRegistry> for Vec<Hint> {
    fn from(r: HintRegistry) -> Self {
        r.hints
    }
}

/// The signature of a hint function: `(field, inputs, outputs)`.
///
/// `outputs` arrives zeroed, with one slot per output wire.
pub type HintFn = dyn Fn(&FieldT, &[FieldV], &mut [FieldV]) -> Result<(), String> + Send + Sync;

/// Hint implementations, by id.
#[derive(Default)]
pub struct HintFunctions {
    fns: HashMap<HintId, Box<HintFn>>,
}

impl HintFunctions {
    /// No functions
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `f` as the implementation of `id`, replacing any previous one.
    pub fn register<F>(&mut self, id: HintId, f: F)
    where
        F: Fn(&FieldT, &[FieldV], &mut [FieldV]) -> Result<(), String> + Send + Sync + 'static,
    {
        self.fns.insert(id, Box::new(f));
    }

    /// The implementation of `id`
    pub fn get(&self, id: HintId) -> Option<&HintFn> {
        self.fns.get(&id).map(|f| f.as_ref())
    }
}

impl Debug for HintFunctions {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&HintId> = self.fns.keys().collect();
        ids.sort();
        f.debug_set().entries(ids).finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn hint(id: &str, wires: Vec<usize>) -> Hint {
        Hint {
            id: HintId::from_name(id),
            inputs: Vec::new(),
            wires,
        }
    }

    #[test]
    fn shared_record() {
        let mut r = HintRegistry::default();
        r.insert(hint("a", vec![0, 1, 2]));
        r.insert(hint("b", vec![3]));
        assert_eq!(r.len(), 2);
        assert_eq!(r.num_outputs(), 4);
        assert!(std::ptr::eq(r.get(0).unwrap(), r.get(2).unwrap()));
        assert_eq!(r.get(3).unwrap().id, HintId::from_name("b"));
        assert!(r.get(4).is_none());
    }

    #[test]
    #[should_panic]
    fn wire_written_twice() {
        let mut r = HintRegistry::default();
        r.insert(hint("a", vec![0, 1]));
        r.insert(hint("b", vec![1]));
    }

    #[test]
    fn shift_once_per_record() {
        let mut r = HintRegistry::default();
        r.insert(hint("a", vec![0, 1, 2]));
        let s = r.shifted(&WireShift::new(2, 3));
        assert_eq!(s.len(), 1);
        assert_eq!(s.get(5).unwrap().wires, vec![5, 6, 7]);
        assert!(!s.is_output(0));
    }

    #[test]
    fn ids_by_name() {
        assert_eq!(HintId::from_name("inverse"), HintId::from_name("inverse"));
        assert_ne!(HintId::from_name("inverse"), HintId::from_name("sqrt"));
    }
}
