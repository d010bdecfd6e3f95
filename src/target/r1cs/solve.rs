//! Witness solving, level by level
//!
//! Every constraint of a level is solved from the wires of earlier levels, so the constraints of
//! a level run concurrently; their results are written back once the whole level is done.

use fxhash::FxHashMap as HashMap;
use log::{info, trace};
use r1cs_fields::FieldV;
use rayon::prelude::*;
use rug::Integer;

use super::*;

/// Computes a full wire assignment for an [R1csFinal].
pub struct Solver<'a> {
    r1cs: &'a R1csFinal,
    functions: &'a HintFunctions,
    parallel: bool,
}

/// Values found while solving one constraint
type Found = HashMap<usize, FieldV>;

/// The sum `base + coeff * unknown` of a partially evaluated expression
struct Partial {
    base: FieldV,
    coeff: FieldV,
}

impl<'a> Solver<'a> {
    /// A parallel solver for `r1cs`, calling hints from `functions`
    pub fn new(r1cs: &'a R1csFinal, functions: &'a HintFunctions) -> Self {
        Solver {
            r1cs,
            functions,
            parallel: true,
        }
    }

    /// Solve the constraints of a level concurrently?
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Given the public inputs (without the constant wire) and the secret inputs, compute every
    /// wire.
    pub fn solve(&self, public: &[Integer], secret: &[Integer]) -> Result<Vec<FieldV>, SolveError> {
        let r = self.r1cs;
        let field = r.field();
        let check_count = |visibility, expected: usize, got: usize| {
            if expected == got {
                Ok(())
            } else {
                Err(SolveError::InputCount {
                    visibility,
                    expected,
                    got,
                })
            }
        };
        check_count(Visibility::Public, r.num_public() - 1, public.len())?;
        check_count(Visibility::Secret, r.num_secret(), secret.len())?;

        let mut values: Vec<Option<FieldV>> = Vec::with_capacity(r.num_wires());
        values.push(Some(field.one()));
        values.extend(public.iter().chain(secret).map(|i| Some(field.new_v(i.clone()))));
        values.resize(r.num_wires(), None);

        for (i, level) in r.levels().iter().enumerate() {
            let solve_one = |cid: &usize| {
                self.solve_constraint(*cid, &values)
                    .map_err(|e| self.with_debug(*cid, &values, e))
            };
            let found: Vec<Found> = if self.parallel {
                level.par_iter().map(solve_one).collect::<Result<_, _>>()?
            } else {
                level.iter().map(solve_one).collect::<Result<_, _>>()?
            };
            let mut n = 0;
            for (w, v) in found.into_iter().flatten() {
                values[w] = Some(v);
                n += 1;
            }
            trace!("Level {}: {} constraints, {} wires solved", i, level.len(), n);
        }

        for e in r.debug().logs() {
            info!("{}", e.render(|lc| eval_known(r, lc, &values, &Found::default())));
        }

        values
            .into_iter()
            .enumerate()
            .map(|(w, v)| {
                v.ok_or_else(|| SolveError::Unassigned {
                    wire: w,
                    name: r.wire_name(w),
                })
            })
            .collect()
    }

    fn with_debug(&self, cid: usize, values: &[Option<FieldV>], e: SolveError) -> SolveError {
        match self.r1cs.debug().for_constraint(cid) {
            Some(entry) => SolveError::WithDebug {
                debug: format!(
                    "{} ({})",
                    entry.render(|lc| eval_known(self.r1cs, lc, values, &Found::default())),
                    entry.location
                ),
                source: Box::new(e),
            },
            None => e,
        }
    }

    fn solve_constraint(&self, cid: usize, values: &[Option<FieldV>]) -> Result<Found, SolveError> {
        let r = self.r1cs;
        let c = &r.constraints()[cid];
        let mut found = Found::default();
        for t in c.terms() {
            let w = t.wire_id();
            if lookup(values, &found, w).is_none() && r.hints().is_output(w) {
                self.run_hint(cid, w, values, &mut found)?;
            }
        }

        let mut unknown = None;
        for t in c.terms() {
            let w = t.wire_id();
            if lookup(values, &found, w).is_none() {
                match unknown {
                    None => unknown = Some(w),
                    Some(u) if u == w => {}
                    Some(_) => return Err(SolveError::TooManyUnknowns { index: cid }),
                }
            }
        }

        let [l, rr, o] = c
            .exprs()
            .map(|e| self.partial(e, values, &found, unknown));
        match unknown {
            None => {
                let lhs = l.base.clone() * &rr.base;
                if lhs != o.base {
                    let dense: Vec<FieldV> = (0..values.len())
                        .map(|w| {
                            lookup(values, &found, w)
                                .cloned()
                                .unwrap_or_else(|| r.field().zero())
                        })
                        .collect();
                    r.check(cid, &dense)?;
                }
            }
            Some(w) => {
                // (a + αx)(b + βx) = c + γx
                if !l.coeff.is_zero() && !rr.coeff.is_zero() {
                    return Err(SolveError::Unsolvable {
                        index: cid,
                        wire: w,
                        reason: "the wire appears in both factors",
                    });
                }
                let k = l.coeff.clone() * &rr.base + rr.coeff.clone() * &l.base - o.coeff;
                let rhs = o.base - l.base * &rr.base;
                let x = k.checked_recip().ok_or(SolveError::Unsolvable {
                    index: cid,
                    wire: w,
                    reason: "the wire's coefficient is zero",
                })? * &rhs;
                found.insert(w, x);
            }
        }
        Ok(found)
    }

    fn partial(
        &self,
        lc: &LinearExpression,
        values: &[Option<FieldV>],
        found: &Found,
        unknown: Option<usize>,
    ) -> Partial {
        let field = self.r1cs.field();
        let mut p = Partial {
            base: field.zero(),
            coeff: field.zero(),
        };
        for t in lc {
            let c = self.r1cs.coeff(t.coeff_id());
            match lookup(values, found, t.wire_id()) {
                Some(v) => p.base += v.clone() * c,
                None => {
                    debug_assert_eq!(Some(t.wire_id()), unknown);
                    p.coeff += c;
                }
            }
        }
        p
    }

    /// Run the hint writing `wire`, first running any hint its inputs need.
    fn run_hint(
        &self,
        cid: usize,
        wire: usize,
        values: &[Option<FieldV>],
        found: &mut Found,
    ) -> Result<(), SolveError> {
        let r = self.r1cs;
        let h = match r.hints().get(wire) {
            Some(h) => h,
            None => return Ok(()),
        };
        let mut inputs = Vec::with_capacity(h.inputs.len());
        for input in &h.inputs {
            match input {
                HintInput::Constant(c) => inputs.push(c.clone()),
                HintInput::Expression(e) => {
                    for t in e {
                        let w = t.wire_id();
                        if lookup(values, found, w).is_none() && r.hints().is_output(w) {
                            self.run_hint(cid, w, values, found)?;
                        }
                    }
                    let v = eval_known(r, e, values, found);
                    inputs.push(v.ok_or(SolveError::Unsolvable {
                        index: cid,
                        wire,
                        reason: "a hint input is not solved",
                    })?);
                }
            }
        }
        let f = self
            .functions
            .get(h.id)
            .ok_or(SolveError::MissingHint(h.id))?;
        let mut outputs = vec![r.field().zero(); h.wires.len()];
        f(r.field(), &inputs, &mut outputs).map_err(|msg| SolveError::Hint { id: h.id, msg })?;
        trace!("Hint {} -> {:?}", h.id, h.wires);
        found.extend(h.wires.iter().copied().zip(outputs));
        Ok(())
    }
}

fn lookup<'v>(values: &'v [Option<FieldV>], found: &'v Found, w: usize) -> Option<&'v FieldV> {
    values[w].as_ref().or_else(|| found.get(&w))
}

fn eval_known(
    r: &R1csFinal,
    lc: &LinearExpression,
    values: &[Option<FieldV>],
    found: &Found,
) -> Option<FieldV> {
    let mut acc = r.field().zero();
    for t in lc {
        acc += lookup(values, found, t.wire_id())?.clone() * r.coeff(t.coeff_id());
    }
    Some(acc)
}
