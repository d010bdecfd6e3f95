//! Field elements, as integers reduced modulo a prime

use paste::paste;
use rug::{
    ops::{RemRounding, RemRoundingAssign},
    Integer,
};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::ops::Deref;
use std::sync::Arc;

use super::FieldT;

/// An element of a prime field.
#[derive(PartialEq, Eq, Clone, Debug, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FieldV {
    i: Integer,
    m: Arc<Integer>,
}

impl Display for FieldV {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.i.significant_bits() + 1 < self.m.significant_bits() {
            write!(f, "#f{}m{}", self.i, self.m)
        } else {
            write!(f, "#f-{}m{}", self.m.deref().clone() - &self.i, self.m)
        }
    }
}

#[allow(clippy::from_over_into)]
impl Into<Integer> for FieldV {
    fn into(self) -> Integer {
        self.i
    }
}

#[allow(clippy::from_over_into)]
impl Into<Integer> for &FieldV {
    fn into(self) -> Integer {
        self.i.clone()
    }
}

impl FieldV {
    #[track_caller]
    #[inline]
    /// Check value in-range (debug only)
    pub fn check(&self, location: &str) {
        debug_assert!(
            self.i >= 0,
            "Negative field elem: {}\nat {}",
            self,
            location
        );
        debug_assert!(
            self.i < *self.m,
            "Field elem too big: {}\nat {}",
            self,
            location
        );
    }

    /// Construct a new element, reducing `i` modulo `m`
    pub fn new(mut i: Integer, m: Arc<Integer>) -> Self {
        if i < 0 || i >= *m {
            i.rem_floor_assign(&*m);
        }
        Self { i, m }
    }

    /// The field this element lives in
    pub fn ty(&self) -> FieldT {
        FieldT::from(self.m.clone())
    }

    /// Get a ref to the modulus
    pub fn modulus(&self) -> &Integer {
        &self.m
    }

    /// Get an Arc of the modulus
    pub fn modulus_arc(&self) -> Arc<Integer> {
        self.m.clone()
    }

    /// The canonical integer representative, in `[0, p)`
    pub fn i(&self) -> Integer {
        self.i.clone()
    }

    /// Borrow the canonical integer representative
    pub fn as_integer(&self) -> &Integer {
        &self.i
    }

    /// Check if this value is equal to zero
    pub fn is_zero(&self) -> bool {
        self.check("is_zero");
        self.i == 0
    }

    /// Check if this value is equal to one
    pub fn is_one(&self) -> bool {
        self.i == 1
    }

    /// Invert mod p; `None` for zero
    pub fn checked_recip(&self) -> Option<Self> {
        let i = self.i.clone().invert(&self.m).ok()?;
        let r = Self {
            i,
            m: self.m.clone(),
        };
        r.check("recip");
        Some(r)
    }
}

macro_rules! arith_impl {
    ($Trait: ident, $fn: ident) => {
        impl $Trait for FieldV {
            type Output = Self;
            fn $fn(self, other: Self) -> Self {
                assert_eq!(self.m, other.m);
                let r = Self {
                    i: (self.i.$fn(other.i)).rem_floor(&*self.m),
                    m: self.m,
                };
                r.check(std::stringify!($fn));
                r
            }
        }

        impl $Trait<&FieldV> for FieldV {
            type Output = Self;
            fn $fn(self, other: &Self) -> Self {
                assert_eq!(self.m, other.m);
                let r = Self {
                    i: (self.i.$fn(&other.i)).rem_floor(&*self.m),
                    m: self.m,
                };
                r.check(std::stringify!($fn));
                r
            }
        }

        impl $Trait<FieldV> for &FieldV {
            type Output = FieldV;
            fn $fn(self, other: FieldV) -> FieldV {
                assert_eq!(self.m, other.m);
                let r = FieldV {
                    i: (Integer::from((&self.i).$fn(&other.i))).rem_floor(&*other.m),
                    m: other.m,
                };
                r.check(std::stringify!($fn));
                r
            }
        }

        paste! {
            impl [<$Trait Assign>]<&FieldV> for FieldV {
                fn [<$fn _assign>](&mut self, other: &FieldV) {
                    assert_eq!(self.m, other.m);
                    self.i.[<$fn _assign>](&other.i);
                    self.i.rem_floor_assign(&*self.m);
                }
            }

            impl [<$Trait Assign>]<FieldV> for FieldV {
                fn [<$fn _assign>](&mut self, other: FieldV) {
                    self.[<$fn _assign>](&other);
                }
            }

            impl [<$Trait Assign>]<i64> for FieldV {
                fn [<$fn _assign>](&mut self, other: i64) {
                    self.i.[<$fn _assign>](other);
                    self.i.rem_floor_assign(&*self.m);
                }
            }
        }
    };
}

use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
arith_impl!(Add, add);
arith_impl!(Sub, sub);
arith_impl!(Mul, mul);

impl Neg for FieldV {
    type Output = Self;
    fn neg(self) -> Self {
        let r = Self {
            i: (-self.i).rem_floor(&*self.m),
            m: self.m,
        };
        r.check("neg");
        r
    }
}

impl Neg for &FieldV {
    type Output = FieldV;
    fn neg(self) -> FieldV {
        -self.clone()
    }
}
