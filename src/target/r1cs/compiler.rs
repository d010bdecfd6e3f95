//! The constraint builder

use fxhash::FxHashMap as HashMap;
use log::{debug, trace};
use r1cs_fields::{FieldT, FieldV};
use r1cs_opt::R1csOpt;
use rug::Integer;
use std::panic::Location;
use std::path::Path;

use super::*;
use crate::cfg::CompileCfg;

/// Builds a constraint system, one API call at a time.
///
/// Inputs are allocated first, then [Compiler::fix_schema] closes the schema, then the circuit
/// emits constraints. [Compiler::compile] consumes the builder.
#[derive(Debug, Clone)]
pub struct Compiler {
    pub(super) field: FieldT,
    pub(super) opt: R1csOpt,
    pub(super) public: Vec<String>,
    pub(super) secret: Vec<String>,
    pub(super) num_internal: usize,
    pub(super) constraints: Vec<R1c>,
    pub(super) coeffs: CoeffTable,
    pub(super) hints: HintRegistry,
    /// hash code of a sorted expression -> expressions known to be 0 or 1
    booleans: HashMap<u64, Vec<LinearExpression>>,
    pub(super) debug: DebugData,
    pub(super) counters: Vec<Counter>,
    schema_fixed: bool,
}

/// An [Input], with constants recognized.
enum Resolved {
    Constant(FieldV),
    Expression(LinearExpression),
}

impl Compiler {
    /// A builder over `field`. Public wire 0 (named `one`) is allocated.
    pub fn new(field: FieldT, opt: R1csOpt) -> Self {
        Compiler {
            coeffs: CoeffTable::new(field.clone()),
            field,
            public: vec!["one".into()],
            secret: Vec::new(),
            num_internal: 0,
            constraints: Vec::with_capacity(opt.capacity),
            hints: Default::default(),
            booleans: Default::default(),
            debug: Default::default(),
            counters: Vec::new(),
            schema_fixed: false,
            opt,
        }
    }

    /// A builder configured by `cfg`
    pub fn from_cfg(cfg: &CompileCfg) -> Self {
        Self::new(cfg.field().clone(), cfg.r1cs.clone())
    }

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

    /// Names of the public wires
    pub fn public_names(&self) -> &[String] {
        &self.public
    }

    /// Names of the secret wires
    pub fn secret_names(&self) -> &[String] {
        &self.secret
    }

    /// Constraints emitted so far
    pub fn constraints(&self) -> &[R1c] {
        &self.constraints
    }

    /// The coefficient table
    pub fn coeffs(&self) -> &CoeffTable {
        &self.coeffs
    }

    /// Hints created so far
    pub fn hints(&self) -> &HintRegistry {
        &self.hints
    }

    /// Has [Compiler::fix_schema] been called?
    pub fn is_schema_fixed(&self) -> bool {
        self.schema_fixed
    }

    fn allocate_input(&mut self, vis: Visibility, name: String) -> Result<Variable, UsageError> {
        if self.schema_fixed {
            return Err(UsageError::InputAfterSchema(vis, name));
        }
        let names = match vis {
            Visibility::Public => &mut self.public,
            Visibility::Secret => &mut self.secret,
            _ => unreachable!(),
        };
        trace!("{} input {}: {}", vis, names.len(), name);
        names.push(name);
        Ok(Variable::from_term(Term::new(
            names.len() - 1,
            CoeffId::ONE,
            vis,
        )))
    }

    /// Allocate a public input
    pub fn allocate_public(&mut self, name: impl Into<String>) -> Result<Variable, UsageError> {
        self.allocate_input(Visibility::Public, name.into())
    }

    /// Allocate a secret input
    pub fn allocate_secret(&mut self, name: impl Into<String>) -> Result<Variable, UsageError> {
        self.allocate_input(Visibility::Secret, name.into())
    }

    /// Allocate a fresh internal wire
    pub fn allocate_internal(&mut self) -> Variable {
        Variable::from_term(Term::new(self.next_internal(), CoeffId::ONE, Visibility::Internal))
    }

    fn next_internal(&mut self) -> usize {
        self.num_internal += 1;
        self.num_internal - 1
    }

    /// Close the input schema: no further public or secret inputs.
    pub fn fix_schema(&mut self) -> Result<(), UsageError> {
        if self.schema_fixed {
            return Err(UsageError::SchemaAlreadyFixed);
        }
        debug!(
            "Schema: {} public, {} secret",
            self.public.len(),
            self.secret.len()
        );
        self.schema_fixed = true;
        Ok(())
    }

    /// The constant 1
    pub fn one(&self) -> Variable {
        Variable::from_term(Term::new(0, CoeffId::ONE, Visibility::Public))
    }

    fn constant(&mut self, v: FieldV) -> Variable {
        if v.is_one() {
            self.one()
        } else {
            let id = self.coeffs.intern_value(v);
            Variable::from_term(Term::new(0, id, Visibility::Public))
        }
    }

    /// The variable for `input`; a constant becomes a multiple of the constant wire.
    pub fn to_variable(&mut self, input: impl Into<Input>) -> Variable {
        match input.into() {
            Input::Variable(v) => v,
            Input::Constant(c) => {
                let v = self.field.new_v(c);
                self.constant(v)
            }
        }
    }

    fn resolve(&self, input: Input) -> Result<Resolved, UsageError> {
        match input {
            Input::Constant(c) => Ok(Resolved::Constant(self.field.new_v(c))),
            Input::Variable(v) => {
                v.assert_is_set()?;
                let e = v.into_lin_exp();
                let constant = match e.terms() {
                    [t] if t.is_constant() => Some(t.coeff_id()),
                    _ => None,
                };
                Ok(match constant {
                    Some(id) => Resolved::Constant(self.coeffs.get(id).clone()),
                    None => Resolved::Expression(e),
                })
            }
        }
    }

    /// The value of `input`, if it is a constant.
    pub fn constant_value(&self, input: impl Into<Input>) -> Result<Option<FieldV>, UsageError> {
        Ok(match self.resolve(input.into())? {
            Resolved::Constant(c) => Some(c),
            Resolved::Expression(_) => None,
        })
    }

    /// Sort the terms of `v` and merge terms on the same wire.
    pub fn reduce(&mut self, v: Variable) -> Variable {
        let mut e = v.into_lin_exp();
        e.sort();
        let mut out: Vec<Term> = Vec::with_capacity(e.len());
        for t in e.into_terms() {
            if let Some(last) = out.last_mut() {
                if last.same_wire(&t) {
                    let sum =
                        self.coeffs.get(last.coeff_id()).clone() + self.coeffs.get(t.coeff_id());
                    *last = last.with_coeff(self.coeffs.intern_value(sum));
                    continue;
                }
            }
            out.push(t);
        }
        Variable::new(LinearExpression::new(out))
    }

    /// Emit `l * r = o`, returning the constraint's index.
    pub fn add_constraint(
        &mut self,
        l: &Variable,
        r: &Variable,
        o: &Variable,
    ) -> Result<usize, UsageError> {
        l.assert_is_set()?;
        r.assert_is_set()?;
        o.assert_is_set()?;
        let c = R1c::new(l.lin_exp(), r.lin_exp(), o.lin_exp());
        debug!(
            "Constraint {}:\n    {}\n  * {}\n  = {}",
            self.constraints.len(),
            self.format_lc(&c.l),
            self.format_lc(&c.r),
            self.format_lc(&c.o)
        );
        self.constraints.push(c);
        Ok(self.constraints.len() - 1)
    }

    /// Emit `l * r = o` with the debug entry `info` attached.
    pub fn add_constraint_with_debug(
        &mut self,
        l: &Variable,
        r: &Variable,
        o: &Variable,
        info: DebugInfoId,
    ) -> Result<usize, UsageError> {
        let idx = self.add_constraint(l, r, o)?;
        self.debug.attach(idx, info);
        Ok(idx)
    }

    fn boolean_key(e: &LinearExpression) -> LinearExpression {
        let mut e = e.clone();
        e.sort();
        e
    }

    /// Record that `input` is 0 or 1. Constants are checked instead.
    pub fn mark_boolean(&mut self, input: impl Into<Input>) -> Result<(), UsageError> {
        match self.resolve(input.into())? {
            Resolved::Constant(c) => {
                if c.is_zero() || c.is_one() {
                    Ok(())
                } else {
                    Err(UsageError::NonBooleanConstant(c))
                }
            }
            Resolved::Expression(e) => {
                let e = Self::boolean_key(&e);
                let bucket = self.booleans.entry(e.hash_code()).or_default();
                if !bucket.contains(&e) {
                    bucket.push(e);
                }
                Ok(())
            }
        }
    }

    /// Is `input` known to be 0 or 1? Unset variables are not.
    pub fn is_boolean(&self, input: impl Into<Input>) -> bool {
        match self.resolve(input.into()) {
            Err(_) => false,
            Ok(Resolved::Constant(c)) => c.is_zero() || c.is_one(),
            Ok(Resolved::Expression(e)) => {
                let e = Self::boolean_key(&e);
                self.booleans
                    .get(&e.hash_code())
                    .map_or(false, |bucket| bucket.contains(&e))
            }
        }
    }

    /// Create `n_outputs` internal wires computed by hint `id` from `inputs` at solve time.
    pub fn new_hint<I>(
        &mut self,
        id: HintId,
        n_outputs: usize,
        inputs: I,
    ) -> Result<Vec<Variable>, UsageError>
    where
        I: IntoIterator,
        I::Item: Into<Input>,
    {
        if n_outputs == 0 {
            return Err(UsageError::HintWithoutOutputs(id));
        }
        let inputs = inputs
            .into_iter()
            .map(|i| -> Result<HintInput, UsageError> {
                match i.into() {
                    Input::Variable(v) => {
                        v.assert_is_set()?;
                        Ok(HintInput::Expression(v.into_lin_exp()))
                    }
                    Input::Constant(c) => Ok(HintInput::Constant(self.field.new_v(c))),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        let wires: Vec<usize> = (0..n_outputs).map(|_| self.next_internal()).collect();
        let outputs = wires
            .iter()
            .map(|w| Variable::from_term(Term::new(*w, CoeffId::ONE, Visibility::Internal)))
            .collect();
        self.hints.insert(Hint { id, inputs, wires });
        Ok(outputs)
    }

    fn negate_coeff(&mut self, c: CoeffId) -> CoeffId {
        let minus_one = self.coeffs.minus_one();
        match c {
            CoeffId::ZERO => CoeffId::ZERO,
            CoeffId::ONE => minus_one,
            c if c == minus_one => CoeffId::ONE,
            c => {
                let v = -self.coeffs.get(c).clone();
                self.coeffs.intern_value(v)
            }
        }
    }

    fn set_lin_exp(&mut self, input: impl Into<Input>) -> Result<LinearExpression, UsageError> {
        let v = self.to_variable(input);
        v.assert_is_set()?;
        Ok(v.into_lin_exp())
    }

    /// `a + b`
    pub fn add(
        &mut self,
        a: impl Into<Input>,
        b: impl Into<Input>,
    ) -> Result<Variable, UsageError> {
        let mut terms = self.set_lin_exp(a)?.into_terms();
        terms.extend(self.set_lin_exp(b)?.into_terms());
        Ok(self.reduce(Variable::new(LinearExpression::new(terms))))
    }

    /// `-a`
    pub fn neg(&mut self, a: impl Into<Input>) -> Result<Variable, UsageError> {
        let terms = self.set_lin_exp(a)?.into_terms();
        let negated = terms
            .into_iter()
            .map(|t| t.with_coeff(self.negate_coeff(t.coeff_id())))
            .collect();
        Ok(self.reduce(Variable::new(negated)))
    }

    /// `a - b`
    pub fn sub(
        &mut self,
        a: impl Into<Input>,
        b: impl Into<Input>,
    ) -> Result<Variable, UsageError> {
        let b = self.neg(b)?;
        self.add(a, b)
    }

    /// `k * a`, for a constant `k`
    pub fn scale(
        &mut self,
        a: impl Into<Input>,
        k: impl Into<Integer>,
    ) -> Result<Variable, UsageError> {
        let k = self.field.new_v(k.into());
        let terms = self.set_lin_exp(a)?.into_terms();
        let scaled = terms
            .into_iter()
            .map(|t| {
                let c = match t.coeff_id() {
                    CoeffId::ZERO => CoeffId::ZERO,
                    CoeffId::ONE => self.coeffs.intern_value(k.clone()),
                    c => {
                        let v = self.coeffs.get(c).clone() * &k;
                        self.coeffs.intern_value(v)
                    }
                };
                t.with_coeff(c)
            })
            .collect();
        Ok(self.reduce(Variable::new(scaled)))
    }

    /// Record a debug entry: `format` with one `{}` per argument, filled at solve time.
    #[track_caller]
    pub fn new_debug_info(&mut self, format: &str, args: &[&Variable]) -> DebugInfoId {
        let e = LogEntry::new(
            Location::caller(),
            format,
            args.iter().map(|a| a.lin_exp().clone()).collect(),
        );
        self.debug.add_debug_info(e)
    }

    /// Record a log entry, rendered by the solver: `format` with one `{}` per argument.
    #[track_caller]
    pub fn println(&mut self, format: &str, args: &[&Variable]) {
        let e = LogEntry::new(
            Location::caller(),
            format,
            args.iter().map(|a| a.lin_exp().clone()).collect(),
        );
        self.debug.add_log(e);
    }

    /// Mark the current point of construction.
    #[track_caller]
    pub fn tag(&self, name: &str) -> Tag {
        let loc = Location::caller();
        let file = Path::new(loc.file())
            .file_name()
            .map_or_else(|| loc.file().into(), |f| f.to_string_lossy());
        Tag {
            name: format!("{}[{}:{}]", name, file, loc.line()),
            vid: self.num_internal,
            cid: self.constraints.len(),
        }
    }

    /// Record the wires and constraints created between `from` and `to`.
    pub fn add_counter(&mut self, from: &Tag, to: &Tag) {
        self.counters.push(Counter {
            from: from.name.clone(),
            to: to.name.clone(),
            num_variables: to.vid - from.vid,
            num_constraints: to.cid - from.cid,
        });
    }

    /// Counters recorded so far
    pub fn counters(&self) -> &[Counter] {
        &self.counters
    }

    /// A readable rendering of `lc`
    pub fn format_lc(&self, lc: &LinearExpression) -> String {
        format_lc(&self.field, self.coeffs.as_slice(), lc, |t| {
            let w = t.wire_id();
            match t.visibility() {
                Visibility::Public => self.public[w].clone(),
                Visibility::Secret => self.secret[w].clone(),
                v => format!("{}_{}", v, w),
            }
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use quickcheck::{Arbitrary, Gen};
    use quickcheck_macros::quickcheck;
    use std::sync::Arc;

    fn small_field() -> FieldT {
        FieldT::IntField(Arc::new(Integer::from(101)))
    }

    fn builder() -> Compiler {
        Compiler::new(small_field(), R1csOpt::default())
    }

    /// An expression over a handful of wires, with repeats
    #[derive(Clone, Debug)]
    struct RawExpr(Vec<(usize, i64, u8)>);

    impl Arbitrary for RawExpr {
        fn arbitrary(g: &mut Gen) -> Self {
            let n = usize::arbitrary(g) % 8 + 1;
            RawExpr(
                (0..n)
                    .map(|_| {
                        (
                            usize::arbitrary(g) % 4,
                            i64::arbitrary(g) % 1000,
                            u8::arbitrary(g) % 3,
                        )
                    })
                    .collect(),
            )
        }
    }

    fn build(c: &mut Compiler, raw: &RawExpr) -> Variable {
        let vis = [Visibility::Public, Visibility::Secret, Visibility::Internal];
        let terms = raw
            .0
            .iter()
            .map(|(w, k, v)| Term::new(*w, c.coeffs.intern(*k), vis[*v as usize]))
            .collect();
        Variable::new(terms)
    }

    #[quickcheck]
    fn reduce_idempotent(raw: RawExpr) -> bool {
        let mut c = builder();
        let v = build(&mut c, &raw);
        let once = c.reduce(v);
        let twice = c.reduce(once.clone());
        once == twice && once.lin_exp().is_sorted()
    }

    #[quickcheck]
    fn reduce_sums_coefficients(raw: RawExpr) -> bool {
        let mut c = builder();
        let v = build(&mut c, &raw);
        let r = c.reduce(v);
        let terms = r.lin_exp().terms();
        let unique = terms.windows(2).all(|w| !w[0].same_wire(&w[1]));
        let sums = terms.iter().all(|t| {
            let expected = raw
                .0
                .iter()
                .filter(|(w, _, v)| *w == t.wire_id() && t.visibility().code() == *v as u64)
                .fold(Integer::from(0), |acc, (_, k, _)| acc + *k);
            c.coeffs.get(t.coeff_id()).i() == expected.rem_euc(&Integer::from(101))
        });
        unique && sums
    }

    #[test]
    fn reduce_keeps_zero_terms() {
        let mut c = builder();
        let x = c.allocate_secret("x").unwrap();
        let y = c.scale(&x, -1).unwrap();
        let z = c.add(&x, &y).unwrap();
        assert_eq!(z.lin_exp().len(), 1);
        assert_eq!(z.lin_exp().terms()[0].coeff_id(), CoeffId::ZERO);
    }

    #[test]
    fn negation_in_tiny_fields() {
        for p in [2, 3, 5] {
            let mut c = Compiler::new(
                FieldT::IntField(Arc::new(Integer::from(p))),
                R1csOpt::default(),
            );
            let x = c.allocate_secret("x").unwrap();
            let negated = c.neg(&x).unwrap();
            let scaled = c.scale(&x, -1).unwrap();
            assert_eq!(negated, scaled);
            assert_eq!(c.neg(&negated).unwrap(), x);
            c.mark_boolean(&negated).unwrap();
            assert!(c.is_boolean(&scaled));
        }
    }

    #[test]
    fn same_calls_same_state() {
        let run = || {
            let mut c = builder();
            let xs: Vec<Variable> = (0..6)
                .map(|i| c.allocate_secret(format!("x{}", i)).unwrap())
                .collect();
            for (i, x) in xs.iter().enumerate() {
                let y = c.scale(x, i as i64 + 2).unwrap();
                let s = c.add(&y, &xs[(i + 1) % xs.len()]).unwrap();
                c.mark_boolean(&s).unwrap();
                c.new_hint(HintId::from_name("h"), i % 3 + 1, [&s, x])
                    .unwrap();
            }
            c
        };
        let (a, b) = (run(), run());
        assert_eq!(a.hints(), b.hints());
        let buckets = |c: &Compiler| {
            c.booleans
                .iter()
                .map(|(k, v)| (*k, v.clone()))
                .collect::<Vec<_>>()
        };
        assert_eq!(buckets(&a), buckets(&b));
        assert_eq!(a.coeffs().as_slice(), b.coeffs().as_slice());
    }

    #[test]
    fn built_from_cfg() {
        let mut opt = crate::cfg::CompileOpt::default();
        opt.field.custom_modulus = "101".into();
        opt.r1cs.ignore_unconstrained_inputs = true;
        let c = Compiler::from_cfg(&CompileCfg::from(opt));
        assert_eq!(c.field(), &small_field());
        assert!(c.opt.ignore_unconstrained_inputs);
    }

    #[test]
    fn swap_rule() {
        let mut c = builder();
        let x = c.allocate_secret("x").unwrap();
        let y = c.allocate_secret("y").unwrap();
        let xy = c.add(&x, &y).unwrap();
        let o = c.allocate_internal();
        c.add_constraint(&xy, &x, &o).unwrap();
        c.add_constraint(&x, &xy, &o).unwrap();
        c.add_constraint(&x, &y, &xy).unwrap();
        for r1c in c.constraints() {
            assert!(r1c.l.len() <= r1c.r.len());
        }
        assert_eq!(c.constraints()[0], c.constraints()[1]);
        assert_eq!(&c.constraints()[2].l, x.lin_exp());
        assert_eq!(&c.constraints()[2].o, xy.lin_exp());
    }

    #[test]
    fn constants() {
        let mut c = builder();
        let one = c.to_variable(102);
        assert_eq!(one, c.one());
        let five = c.to_variable(5);
        assert_eq!(c.constant_value(&five).unwrap().unwrap().i(), 5);
        assert_eq!(c.constant_value(-1).unwrap().unwrap().i(), 100);
        let x = c.allocate_public("x").unwrap();
        assert_eq!(c.constant_value(&x).unwrap(), None);
        let x5 = c.add(&x, 5).unwrap();
        assert_eq!(c.constant_value(&x5).unwrap(), None);
        assert_eq!(
            c.constant_value(&Variable::default()),
            Err(UsageError::UnsetVariable)
        );
        let s = c.sub(5, &five).unwrap();
        assert!(c.constant_value(&s).unwrap().unwrap().is_zero());
    }

    #[test]
    fn booleans() {
        let mut c = builder();
        let x = c.allocate_secret("x").unwrap();
        let y = c.allocate_secret("y").unwrap();
        let xy = c.add(&x, &y).unwrap();
        let yx = Variable::new(LinearExpression::new(
            xy.lin_exp().terms().iter().rev().copied().collect(),
        ));
        assert!(!c.is_boolean(&x));
        c.mark_boolean(&x).unwrap();
        c.mark_boolean(&yx).unwrap();
        assert!(c.is_boolean(&x));
        assert!(c.is_boolean(&xy));
        assert!(!c.is_boolean(&y));
        assert!(c.is_boolean(0));
        assert!(c.is_boolean(1));
        assert!(!c.is_boolean(2));
        assert!(!c.is_boolean(Variable::default()));
        c.mark_boolean(1).unwrap();
        assert_eq!(
            c.mark_boolean(2),
            Err(UsageError::NonBooleanConstant(c.field.new_v(2)))
        );
    }

    #[test]
    fn boolean_collision() {
        let mut c = builder();
        let x = c.allocate_secret("x").unwrap();
        let y = c.allocate_secret("y").unwrap();
        // put y in the bucket of x, as a colliding hash would
        c.booleans
            .entry(x.lin_exp().hash_code())
            .or_default()
            .push(y.lin_exp().clone());
        assert!(!c.is_boolean(&x));
        c.mark_boolean(&x).unwrap();
        assert!(c.is_boolean(&x));
        assert_eq!(c.booleans[&x.lin_exp().hash_code()].len(), 2);
        c.mark_boolean(&x).unwrap();
        assert_eq!(c.booleans[&x.lin_exp().hash_code()].len(), 2);
    }

    #[test]
    fn schema() {
        let mut c = builder();
        c.allocate_public("a").unwrap();
        c.fix_schema().unwrap();
        assert_eq!(c.fix_schema(), Err(UsageError::SchemaAlreadyFixed));
        assert_eq!(
            c.allocate_secret("b"),
            Err(UsageError::InputAfterSchema(Visibility::Secret, "b".into()))
        );
        assert!(matches!(
            c.allocate_public("c"),
            Err(UsageError::InputAfterSchema(Visibility::Public, _))
        ));
        assert_eq!(c.num_public(), 2);
        assert_eq!(c.num_secret(), 0);
    }

    #[test]
    fn hints() {
        let mut c = builder();
        let x = c.allocate_secret("x").unwrap();
        let id = HintId::from_name("split");
        assert_eq!(
            c.new_hint(id, 0, [&x]),
            Err(UsageError::HintWithoutOutputs(id))
        );
        assert_eq!(
            c.new_hint(id, 1, [Variable::default()]),
            Err(UsageError::UnsetVariable)
        );
        let before = c.allocate_internal();
        let outs = c
            .new_hint(id, 3, [Input::from(&x), Input::from(7)])
            .unwrap();
        assert_eq!(outs.len(), 3);
        let wires: Vec<usize> = outs.iter().map(|o| o.lin_exp().terms()[0].wire_id()).collect();
        assert_eq!(wires, vec![1, 2, 3]);
        assert_ne!(before, outs[0]);
        assert_eq!(c.hints().len(), 1);
        let h = c.hints().get(2).unwrap();
        assert_eq!(h.wires, wires);
        assert_eq!(h.inputs[1], HintInput::Constant(c.field.new_v(7)));
    }

    #[test]
    fn unset_in_constraint() {
        let mut c = builder();
        let x = c.allocate_secret("x").unwrap();
        assert_eq!(
            c.add_constraint(&x, &Variable::default(), &x),
            Err(UsageError::UnsetVariable)
        );
        assert!(c.constraints().is_empty());
    }

    #[test]
    fn tags() {
        let mut c = builder();
        let t0 = c.tag("start");
        let a = c.allocate_internal();
        let b = c.allocate_internal();
        c.add_constraint(&a, &a, &b).unwrap();
        let t1 = c.tag("end");
        c.add_counter(&t0, &t1);
        assert!(t0.name.starts_with("start[compiler.rs:"));
        assert_eq!(c.counters()[0].num_variables, 2);
        assert_eq!(c.counters()[0].num_constraints, 1);
    }
}
