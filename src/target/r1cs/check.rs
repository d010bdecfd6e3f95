//! Detection of unconstrained inputs

use fxhash::FxHashSet as HashSet;
use log::trace;

use super::{CoeffId, Compiler, UnconstrainedInputs, Visibility};

/// Check that every input (except the constant wire) and every hint output appears with a
/// non-zero coefficient in some constraint.
pub fn check_variables(cs: &Compiler) -> Result<(), UnconstrainedInputs> {
    let mut public_seen = vec![false; cs.num_public()];
    public_seen[0] = true;
    let mut secret_seen = vec![false; cs.num_secret()];
    let mut hint_outputs: HashSet<usize> = cs
        .hints()
        .iter()
        .flat_map(|h| h.wires.iter().copied())
        .collect();
    let mut public_left = cs.num_public() - 1;
    let mut secret_left = cs.num_secret();

    let done = |p: usize, s: usize, h: &HashSet<usize>| p == 0 && s == 0 && h.is_empty();
    if done(public_left, secret_left, &hint_outputs) {
        return Ok(());
    }

    for (i, c) in cs.constraints().iter().enumerate() {
        for t in c.terms() {
            if t.coeff_id() == CoeffId::ZERO {
                continue;
            }
            let w = t.wire_id();
            match t.visibility() {
                Visibility::Public => {
                    if !public_seen[w] {
                        public_seen[w] = true;
                        public_left -= 1;
                    }
                }
                Visibility::Secret => {
                    if !secret_seen[w] {
                        secret_seen[w] = true;
                        secret_left -= 1;
                    }
                }
                Visibility::Internal => {
                    hint_outputs.remove(&w);
                }
                Visibility::Unset => {}
            }
        }
        if done(public_left, secret_left, &hint_outputs) {
            trace!("All inputs constrained by constraint {}", i);
            return Ok(());
        }
    }

    let unseen = |seen: &[bool], names: &[String], skip: usize| -> Vec<String> {
        seen.iter()
            .zip(names)
            .skip(skip)
            .filter(|(s, _)| !**s)
            .map(|(_, n)| n.clone())
            .collect()
    };
    Err(UnconstrainedInputs {
        secret: unseen(&secret_seen, cs.secret_names(), 0),
        public: unseen(&public_seen, cs.public_names(), 1),
        hint_outputs: hint_outputs.len(),
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::target::r1cs::{HintId, UsageError};
    use r1cs_fields::FieldT;
    use r1cs_opt::R1csOpt;

    #[test]
    fn empty_system_is_fine() {
        let c = Compiler::new(FieldT::FBn254, R1csOpt::default());
        assert_eq!(check_variables(&c), Ok(()));
    }

    #[test]
    fn reports_everything() -> Result<(), UsageError> {
        let mut c = Compiler::new(FieldT::FBn254, R1csOpt::default());
        let p = c.allocate_public("p")?;
        let q = c.allocate_public("q")?;
        let x = c.allocate_secret("x")?;
        let y = c.allocate_secret("y")?;
        c.fix_schema()?;
        let h = c.new_hint(HintId::from_name("h"), 2, [&x])?;
        // y only with a zero coefficient
        let zero_y = c.scale(&y, 0)?;
        let xy = c.add(&x, &zero_y)?;
        c.add_constraint(&xy, &p, &h[0])?;
        let e = check_variables(&c).unwrap_err();
        assert_eq!(e.secret, vec!["y".to_string()]);
        assert_eq!(e.public, vec!["q".to_string()]);
        assert_eq!(e.hint_outputs, 1);

        c.add_constraint(&y, &q, &h[1])?;
        assert_eq!(check_variables(&c), Ok(()));
        Ok(())
    }
}
