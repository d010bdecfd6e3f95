//! Prime fields for the R1CS compiler

mod elem;
#[cfg(test)]
mod test;

pub use elem::FieldV;

use lazy_static::lazy_static;
use rug::Integer;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

macro_rules! def_modulus {
    ($fmod: ident, $fmod_arc: ident, $mod: literal, $doc: literal) => {
        lazy_static! {
            #[doc = $doc]
            pub static ref $fmod: Integer = Integer::from_str_radix($mod, 10).unwrap();
            #[doc = $doc]
            pub static ref $fmod_arc: Arc<Integer> = Arc::new($fmod.clone());
        }
    };
}

/// Scalar-field moduli of the supported curves.
pub mod moduli {
    use super::*;

    def_modulus!(
        F_BN254_FMOD,
        F_BN254_FMOD_ARC,
        "21888242871839275222246405745257275088548364400416034343698204186575808495617",
        "BN254 scalar field modulus"
    );
    def_modulus!(
        F_BLS12377_FMOD,
        F_BLS12377_FMOD_ARC,
        "8444461749428370424248824938781546531375899335154063827935233455917409239041",
        "BLS12-377 scalar field modulus"
    );
    def_modulus!(
        F_BLS12381_FMOD,
        F_BLS12381_FMOD_ARC,
        "52435875175126190479447740508185965837690552500527637822603658699938581184513",
        "BLS12-381 scalar field modulus"
    );
    def_modulus!(
        F_BLS24315_FMOD,
        F_BLS24315_FMOD_ARC,
        "11502027791375260645628074404575422495959608200132055716665986169834464870401",
        "BLS24-315 scalar field modulus"
    );
    def_modulus!(
        F_BW6633_FMOD,
        F_BW6633_FMOD_ARC,
        "39705142709513438335025689890408969744933502416914749335064285505637884093126342347073617133569",
        "BW6-633 scalar field modulus"
    );
    def_modulus!(
        F_BW6761_FMOD,
        F_BW6761_FMOD_ARC,
        "258664426012969094010652733694893533536393512754914660539884262666720468348340822774968888139573360124440321458177",
        "BW6-761 scalar field modulus"
    );
}

use moduli::*;

/// A prime field.
///
/// The named variants are the scalar fields of the curves a constraint system can be finalized
/// for. [FieldT::IntField] is any other prime; it supports arithmetic but has no backend.
#[derive(PartialEq, Eq, Clone, Debug, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FieldT {
    FBn254,
    FBls12377,
    FBls12381,
    FBls24315,
    FBw6633,
    FBw6761,
    IntField(Arc<Integer>),
}

impl Display for FieldT {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::FBn254 => write!(f, "FieldT::FBn254"),
            Self::FBls12377 => write!(f, "FieldT::FBls12377"),
            Self::FBls12381 => write!(f, "FieldT::FBls12381"),
            Self::FBls24315 => write!(f, "FieldT::FBls24315"),
            Self::FBw6633 => write!(f, "FieldT::FBw6633"),
            Self::FBw6761 => write!(f, "FieldT::FBw6761"),
            Self::IntField(m) => write!(f, "FieldT::(mod {})", &*m),
        }
    }
}

impl From<Arc<Integer>> for FieldT {
    fn from(m: Arc<Integer>) -> Self {
        Self::builtin_for(&m).unwrap_or(Self::IntField(m))
    }
}

impl From<Integer> for FieldT {
    fn from(m: Integer) -> Self {
        Self::builtin_for(&m).unwrap_or_else(|| Self::IntField(Arc::new(m)))
    }
}

impl From<&Integer> for FieldT {
    fn from(m: &Integer) -> Self {
        Self::builtin_for(m).unwrap_or_else(|| Self::IntField(Arc::new(m.clone())))
    }
}

impl FieldT {
    /// The curve-backed fields.
    pub const BUILTIN: [FieldT; 6] = [
        FieldT::FBn254,
        FieldT::FBls12377,
        FieldT::FBls12381,
        FieldT::FBls24315,
        FieldT::FBw6633,
        FieldT::FBw6761,
    ];

    fn builtin_for(m: &Integer) -> Option<Self> {
        Self::BUILTIN.into_iter().find(|f| f.modulus() == m)
    }

    /// Is this the scalar field of a supported curve?
    #[inline]
    pub fn is_builtin(&self) -> bool {
        !matches!(self, Self::IntField(_))
    }

    #[inline]
    pub fn modulus(&self) -> &Integer {
        match self {
            Self::FBn254 => &*F_BN254_FMOD,
            Self::FBls12377 => &*F_BLS12377_FMOD,
            Self::FBls12381 => &*F_BLS12381_FMOD,
            Self::FBls24315 => &*F_BLS24315_FMOD,
            Self::FBw6633 => &*F_BW6633_FMOD,
            Self::FBw6761 => &*F_BW6761_FMOD,
            Self::IntField(m) => m.as_ref(),
        }
    }

    #[inline]
    pub fn modulus_arc(&self) -> Arc<Integer> {
        match self {
            Self::FBn254 => F_BN254_FMOD_ARC.clone(),
            Self::FBls12377 => F_BLS12377_FMOD_ARC.clone(),
            Self::FBls12381 => F_BLS12381_FMOD_ARC.clone(),
            Self::FBls24315 => F_BLS24315_FMOD_ARC.clone(),
            Self::FBw6633 => F_BW6633_FMOD_ARC.clone(),
            Self::FBw6761 => F_BW6761_FMOD_ARC.clone(),
            Self::IntField(m) => m.clone(),
        }
    }

    #[inline]
    pub fn zero(&self) -> FieldV {
        self.new_v(0)
    }

    #[inline]
    pub fn one(&self) -> FieldV {
        self.new_v(1)
    }

    /// Reduce `i` into this field.
    #[inline]
    pub fn new_v<I>(&self, i: I) -> FieldV
    where
        Integer: From<I>,
    {
        FieldV::new(Integer::from(i), self.modulus_arc())
    }
}
