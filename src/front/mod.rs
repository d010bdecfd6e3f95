//! Circuit front-ends
//!
//! A [Circuit] declares its inputs and then its constraints against a [Compiler]; [compile]
//! drives both phases and finalizes the result.

pub mod circuits;

use log::debug;
use r1cs_fields::FieldT;
use r1cs_opt::R1csOpt;

use crate::target::r1cs::{CompileError, Compiler, R1csFinal, UsageError};

/// A circuit definition
pub trait Circuit {
    /// Allocate the public and secret inputs
    fn allocate(&mut self, api: &mut Compiler) -> Result<(), UsageError>;

    /// Emit the constraints
    fn define(&self, api: &mut Compiler) -> Result<(), UsageError>;
}

/// Build `circuit` over `field` and finalize it.
pub fn compile<C: Circuit + ?Sized>(
    field: FieldT,
    opt: R1csOpt,
    circuit: &mut C,
) -> Result<R1csFinal, CompileError> {
    let mut api = Compiler::new(field, opt);
    circuit.allocate(&mut api)?;
    api.fix_schema()?;
    circuit.define(&mut api)?;
    debug!(
        "Defined: {} constraints, {} internal wires",
        api.constraints().len(),
        api.num_internal()
    );
    api.compile()
}
