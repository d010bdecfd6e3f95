//! Options for the R1CS compiler.
//!
//! ## Contents
//!
//! * A type for compiler options [CompileOpt] containing fields for module options:
//!    * `r1cs`: [R1csOpt]
//!    * `field`: [FieldOpt]
//!    * `solver`: [SolverOpt]
//!    * all options types implement:
//!       * std's [Default]
//!       * clap's [Args]; all options are settable by
//!          * environmental variable (SHOUTY_SNEK_CASE), e.g., `"R1CS_CAPACITY"`
//!          * long option (kebab-case), e.g., `"--r1cs-capacity"`
//!       * these are guaranteed to agree (and we test this)
//!
//! ## Constructing custom options in a binary
//!
//! Use our (rexported) version of clap ([crate::clap]) and include [CompileOpt] in your
//! [clap::Parser].
//!
//! ```rust
//! use r1cs_opt::{CompileOpt, clap::Parser};
//!
//! #[derive(Parser, Debug)]
//! struct BinaryOpt {
//!     #[command(flatten)]
//!     pub compile: CompileOpt,
//! }
//!
//! fn main() {
//!     let opt = BinaryOpt::parse();
//! }
//! ```

use clap::{ArgAction, Args, ValueEnum};

use std::default::Default;

/// Re-export our version of clap.
pub use clap;

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
/// Options that configure a compilation
pub struct CompileOpt {
    /// Options for constraint-system construction
    #[command(flatten)]
    pub r1cs: R1csOpt,
    /// Options for the prime field used
    #[command(flatten)]
    pub field: FieldOpt,
    /// Options for the witness solver
    #[command(flatten)]
    pub solver: SolverOpt,
}

/// Options for constraint-system construction
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct R1csOpt {
    /// Skip the check that every input and hint output appears in some constraint
    #[arg(
        long = "r1cs-ignore-unconstrained-inputs",
        env = "R1CS_IGNORE_UNCONSTRAINED_INPUTS",
        action = ArgAction::Set,
        default_value = "false"
    )]
    pub ignore_unconstrained_inputs: bool,

    #[arg(long = "r1cs-capacity", env = "R1CS_CAPACITY", default_value = "0")]
    /// initial capacity of the constraint list
    pub capacity: usize,
}

/// Options for the prime field used
#[derive(Args, Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldOpt {
    /// Which field to use
    #[arg(
        long = "field-builtin",
        env = "FIELD_BUILTIN",
        value_enum,
        default_value = "bn254"
    )]
    pub builtin: BuiltinField,

    /// Which modulus to use (overrides [FieldOpt::builtin])
    #[arg(
        long = "field-custom-modulus",
        env = "FIELD_CUSTOM_MODULUS",
        default_value = ""
    )]
    pub custom_modulus: String,
}

#[derive(ValueEnum, Debug, PartialEq, Eq, Clone, Copy)]
/// Which field to use
pub enum BuiltinField {
    /// BN-254 scalar field
    Bn254,
    /// BLS12-377 scalar field
    Bls12377,
    /// BLS12-381 scalar field
    Bls12381,
    /// BLS24-315 scalar field
    Bls24315,
    /// BW6-633 scalar field
    Bw6633,
    /// BW6-761 scalar field
    Bw6761,
}

impl Default for BuiltinField {
    fn default() -> Self {
        BuiltinField::Bn254
    }
}

/// Options for the witness solver
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct SolverOpt {
    /// Solve the constraints of one level in parallel
    #[arg(
        long = "solver-parallel",
        env = "SOLVER_PARALLEL",
        action = ArgAction::Set,
        default_value = "true"
    )]
    pub parallel: bool,
}

impl Default for SolverOpt {
    fn default() -> Self {
        Self { parallel: true }
    }
}

#[cfg(test)]
mod test {

    use super::*;

    use clap::{CommandFactory, Parser};
    use heck::{ToKebabCase, ToShoutySnekCase};

    #[derive(Parser, Debug)]
    struct BinaryOpt {
        #[command(flatten)]
        pub compile: CompileOpt,
    }

    #[test]
    fn std_and_clap_defaults_agree() {
        let std_default: CompileOpt = Default::default();
        let clap_default: CompileOpt =
            BinaryOpt::parse_from::<_, &str>(std::iter::empty()).compile;
        assert_eq!(std_default, clap_default);
    }

    #[test]
    fn flags_parse() {
        let opt = BinaryOpt::parse_from([
            "bin",
            "--field-builtin",
            "bw6761",
            "--r1cs-capacity",
            "16",
            "--solver-parallel",
            "false",
        ])
        .compile;
        assert_eq!(opt.field.builtin, BuiltinField::Bw6761);
        assert_eq!(opt.r1cs.capacity, 16);
        assert!(!opt.solver.parallel);
        assert!(!opt.r1cs.ignore_unconstrained_inputs);
    }

    #[test]
    fn long_and_env_names_agree() {
        for arg in BinaryOpt::command().get_arguments() {
            if let Some(long_name) = arg.get_long() {
                if let Some(env_name) = arg.get_env() {
                    let env_name = env_name.to_str().unwrap();
                    assert_eq!(
                        env_name,
                        long_name.TO_SHOUTY_SNEK_CASE(),
                        "The long name\n    '{}'\ndoes not match the envvar name\n    '{}'\n",
                        long_name,
                        env_name,
                    );
                    assert_eq!(
                        long_name,
                        long_name.to_kebab_case(),
                        "The long name '{}' is not in kebab-case",
                        long_name,
                    );
                } else {
                    panic!("Long option '{}' has no envvar", long_name);
                }
            } else if let Some(env_name) = arg.get_env() {
                let env_name = env_name.to_str().unwrap();
                panic!("Envar option '{}' has no long_name", env_name);
            }
        }
    }
}
