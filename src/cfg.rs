//! Compiler configuration
//!
//! [CompileCfg] resolves a [CompileOpt] into the field a compilation runs over. A binary stores
//! one for the whole process with [set] and reads it back with [cfg]; library code takes its
//! options explicitly, e.g. through [Compiler::from_cfg](crate::target::r1cs::Compiler::from_cfg).

use once_cell::sync::OnceCell;
use r1cs_fields::FieldT;
use rug::Integer;

/// Re-export of the clap used by [CompileOpt]
pub use r1cs_opt::clap;
pub use r1cs_opt::CompileOpt;
use r1cs_opt::BuiltinField;

/// Resolved options: the parsed [CompileOpt] and its field.
#[derive(Clone, Debug)]
pub struct CompileCfg {
    opt: CompileOpt,
    field: FieldT,
}

static CFG: OnceCell<CompileCfg> = OnceCell::new();

/// Store the process configuration built from `o`. Panics if it is already stored.
pub fn set(o: &CompileOpt) {
    set_cfg(CompileCfg::from(o.clone()))
}

/// Store `c` as the process configuration. Panics if one is already stored.
pub fn set_cfg(c: CompileCfg) {
    if let Err(c) = CFG.set(c) {
        panic!("Compiler configuration set twice; rejected:\n{:#?}", c);
    }
}

/// The process configuration. Panics unless [set] was called.
pub fn cfg() -> &'static CompileCfg {
    CFG.get()
        .expect("Compiler configuration read before `cfg::set` was called")
}

/// Parse a decimal prime; a modulus of a builtin field maps to that field.
fn custom_field(modulus: &str) -> FieldT {
    let i = Integer::from_str_radix(modulus, 10)
        .unwrap_or_else(|_| panic!("Field modulus '{}' is not an integer", modulus));
    if i.is_probably_prime(30) == rug::integer::IsPrime::No {
        panic!("Field modulus '{}' is not prime", modulus);
    }
    FieldT::from(i)
}

fn builtin_field(b: BuiltinField) -> FieldT {
    match b {
        BuiltinField::Bn254 => FieldT::FBn254,
        BuiltinField::Bls12377 => FieldT::FBls12377,
        BuiltinField::Bls12381 => FieldT::FBls12381,
        BuiltinField::Bls24315 => FieldT::FBls24315,
        BuiltinField::Bw6633 => FieldT::FBw6633,
        BuiltinField::Bw6761 => FieldT::FBw6761,
    }
}

impl From<CompileOpt> for CompileCfg {
    /// A non-empty custom modulus overrides the builtin field; panics if it is not prime.
    fn from(opt: CompileOpt) -> Self {
        let field = match opt.field.custom_modulus.as_str() {
            "" => builtin_field(opt.field.builtin),
            m => custom_field(m),
        };
        CompileCfg { opt, field }
    }
}

impl std::ops::Deref for CompileCfg {
    type Target = CompileOpt;

    fn deref(&self) -> &Self::Target {
        &self.opt
    }
}

impl CompileCfg {
    /// The field constraints are built over
    pub fn field(&self) -> &FieldT {
        &self.field
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn custom_modulus_builtin_value() {
        let mut opt = CompileOpt::default();
        opt.field.custom_modulus = FieldT::FBls12381.modulus().to_string();
        assert_eq!(CompileCfg::from(opt).field(), &FieldT::FBls12381);
    }

    #[test]
    fn custom_modulus_small() {
        let mut opt = CompileOpt::default();
        opt.field.custom_modulus = "101".into();
        let cfg = CompileCfg::from(opt);
        assert!(!cfg.field().is_builtin());
        assert_eq!(cfg.field().modulus(), &Integer::from(101));
    }

    #[test]
    #[should_panic]
    fn custom_modulus_composite() {
        let mut opt = CompileOpt::default();
        opt.field.custom_modulus = "100".into();
        let _ = CompileCfg::from(opt);
    }

    #[test]
    fn process_cfg_is_set_once() {
        let mut opt = CompileOpt::default();
        opt.field.builtin = BuiltinField::Bls12377;
        set(&opt);
        assert_eq!(cfg().field(), &FieldT::FBls12377);
        assert!(std::panic::catch_unwind(|| set(&CompileOpt::default())).is_err());
        assert_eq!(cfg().field(), &FieldT::FBls12377);
    }
}
