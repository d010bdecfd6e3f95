//! Small sample circuits

use r1cs_fields::FieldT;
use rug::Integer;

use super::Circuit;
use crate::target::r1cs::{Compiler, HintFunctions, HintId, UsageError, Variable};

/// Name of the field-inversion hint
pub const INVERSE_HINT: &str = "inverse";

/// Hint functions used by the circuits of this module
pub fn hint_functions() -> HintFunctions {
    let mut fns = HintFunctions::new();
    fns.register(HintId::from_name(INVERSE_HINT), |_, inputs, outputs| {
        let x = inputs.first().ok_or("inverse takes one input")?;
        outputs[0] = x.checked_recip().ok_or("zero has no inverse")?;
        Ok(())
    });
    fns
}

/// `x^3 + x + 5 = y`, for secret `x` and public `y`
#[derive(Debug, Default)]
pub struct Cubic {
    x: Variable,
    y: Variable,
}

impl Circuit for Cubic {
    fn allocate(&mut self, api: &mut Compiler) -> Result<(), UsageError> {
        self.y = api.allocate_public("y")?;
        self.x = api.allocate_secret("x")?;
        Ok(())
    }

    fn define(&self, api: &mut Compiler) -> Result<(), UsageError> {
        let x2 = api.allocate_internal();
        api.add_constraint(&self.x, &self.x, &x2)?;
        let x3 = api.allocate_internal();
        api.add_constraint(&x2, &self.x, &x3)?;
        let sum = api.add(&x3, &self.x)?;
        let sum = api.add(&sum, 5)?;
        let one = api.one();
        api.add_constraint(&sum, &one, &self.y)?;
        api.println("x = {}, x^3 = {}", &[&self.x, &x3]);
        Ok(())
    }
}

/// `x * y = 1`, with `y` public and the inverse computed by a hint
#[derive(Debug, Default)]
pub struct Reciprocal {
    x: Variable,
    y: Variable,
}

impl Circuit for Reciprocal {
    fn allocate(&mut self, api: &mut Compiler) -> Result<(), UsageError> {
        self.y = api.allocate_public("y")?;
        self.x = api.allocate_secret("x")?;
        Ok(())
    }

    fn define(&self, api: &mut Compiler) -> Result<(), UsageError> {
        let inv = api
            .new_hint(HintId::from_name(INVERSE_HINT), 1, [&self.x])?
            .remove(0);
        let one = api.one();
        let info = api.new_debug_info("{} * {} != 1", &[&self.x, &inv]);
        api.add_constraint_with_debug(&self.x, &inv, &one, info)?;
        api.add_constraint(&inv, &one, &self.y)?;
        Ok(())
    }
}

/// `x^(2^rounds) = y`, by repeated squaring
#[derive(Debug, Default)]
pub struct SquareChain {
    rounds: usize,
    x: Variable,
    y: Variable,
}

impl SquareChain {
    /// A chain of `rounds` squarings
    pub fn new(rounds: usize) -> Self {
        SquareChain {
            rounds,
            ..Default::default()
        }
    }
}

impl Circuit for SquareChain {
    fn allocate(&mut self, api: &mut Compiler) -> Result<(), UsageError> {
        self.y = api.allocate_public("y")?;
        self.x = api.allocate_secret("x")?;
        Ok(())
    }

    fn define(&self, api: &mut Compiler) -> Result<(), UsageError> {
        let start = api.tag("squares");
        let mut cur = self.x.clone();
        for _ in 0..self.rounds {
            let next = api.allocate_internal();
            api.add_constraint(&cur, &cur, &next)?;
            cur = next;
        }
        let end = api.tag("squares");
        api.add_counter(&start, &end);
        let one = api.one();
        api.add_constraint(&cur, &one, &self.y)?;
        Ok(())
    }
}

/// The circuits of this module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sample {
    /// [Cubic]
    Cubic,
    /// [Reciprocal]
    Reciprocal,
    /// [SquareChain] with this many rounds
    SquareChain(usize),
}

impl Sample {
    /// A fresh instance
    pub fn circuit(&self) -> Box<dyn Circuit> {
        match self {
            Sample::Cubic => Box::<Cubic>::default(),
            Sample::Reciprocal => Box::<Reciprocal>::default(),
            Sample::SquareChain(n) => Box::new(SquareChain::new(*n)),
        }
    }

    /// `(public, secret)` inputs that satisfy the circuit, for secret `x`
    pub fn inputs(&self, field: &FieldT, x: u64) -> (Vec<Integer>, Vec<Integer>) {
        let xv = field.new_v(x);
        let y = match self {
            Sample::Cubic => xv.clone() * &xv * &xv + &xv + field.new_v(5),
            Sample::Reciprocal => xv.checked_recip().unwrap_or_else(|| field.zero()),
            Sample::SquareChain(n) => {
                let mut y = xv;
                for _ in 0..*n {
                    y = y.clone() * &y;
                }
                y
            }
        };
        (vec![y.i()], vec![Integer::from(x)])
    }
}
