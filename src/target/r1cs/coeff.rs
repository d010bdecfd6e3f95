//! Interned coefficients

use fxhash::FxHashMap as HashMap;
use r1cs_fields::{FieldT, FieldV};
use rug::Integer;
use serde::{Deserialize, Serialize};

/// The index of a field element in a [CoeffTable].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct CoeffId(u32);

impl CoeffId {
    /// 0
    pub const ZERO: CoeffId = CoeffId(0);
    /// 1
    pub const ONE: CoeffId = CoeffId(1);
    /// 2
    pub const TWO: CoeffId = CoeffId(2);
    /// -1
    pub const MINUS_ONE: CoeffId = CoeffId(3);

    /// Position in the table
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn from_index(i: usize) -> Self {
        assert!(i <= u32::MAX as usize, "Too many coefficients");
        CoeffId(i as u32)
    }
}

/// Deduplicates the coefficients of one compilation.
///
/// `0`, `1`, `2` and `-1` always occupy ids 0 through 3.
#[derive(Debug, Clone)]
pub struct CoeffTable {
    field: FieldT,
    coeffs: Vec<FieldV>,
    ids: HashMap<Integer, CoeffId>,
    /// the id `-1` interns to; [CoeffId::MINUS_ONE] unless the reserved values collide
    minus_one: CoeffId,
}

impl CoeffTable {
    /// An table over `field`, holding only the reserved constants.
    pub fn new(field: FieldT) -> Self {
        let mut table = CoeffTable {
            field,
            coeffs: Vec::new(),
            ids: Default::default(),
            minus_one: CoeffId::MINUS_ONE,
        };
        for c in [0, 1, 2, -1] {
            let v = table.field.new_v(c);
            let id = CoeffId::from_index(table.coeffs.len());
            // in tiny fields the reserved values collide; the first id wins
            table.ids.entry(v.i()).or_insert(id);
            table.coeffs.push(v);
        }
        table.minus_one = table.ids[table.get(CoeffId::MINUS_ONE).as_integer()];
        table
    }

    /// The id of `v`, adding it if it is new.
    pub fn intern_value(&mut self, v: FieldV) -> CoeffId {
        debug_assert_eq!(v.modulus(), self.field.modulus());
        if let Some(id) = self.ids.get(v.as_integer()) {
            return *id;
        }
        let id = CoeffId::from_index(self.coeffs.len());
        self.ids.insert(v.i(), id);
        self.coeffs.push(v);
        id
    }

    /// The id of `i mod p`, adding it if it is new.
    pub fn intern<I>(&mut self, i: I) -> CoeffId
    where
        Integer: From<I>,
    {
        let v = self.field.new_v(i);
        self.intern_value(v)
    }

    /// The value of `id`
    pub fn get(&self, id: CoeffId) -> &FieldV {
        &self.coeffs[id.index()]
    }

    /// The id of `-1`. Equals [CoeffId::ONE] or [CoeffId::TWO] when `p` is 2 or 3.
    pub fn minus_one(&self) -> CoeffId {
        self.minus_one
    }

    /// Number of distinct coefficients (plus reserved duplicates)
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    /// Never true: the reserved constants are always present
    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// All coefficients, by id
    pub fn as_slice(&self) -> &[FieldV] {
        &self.coeffs
    }

    /// Take the coefficients, by id
    pub fn into_coeffs(self) -> Vec<FieldV> {
        self.coeffs
    }

    /// The field
    pub fn field(&self) -> &FieldT {
        &self.field
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn reserved() {
        let t = CoeffTable::new(FieldT::FBn254);
        assert!(t.get(CoeffId::ZERO).is_zero());
        assert!(t.get(CoeffId::ONE).is_one());
        assert_eq!(t.get(CoeffId::TWO).i(), 2);
        assert_eq!(t.get(CoeffId::MINUS_ONE).i(), FieldT::FBn254.modulus().clone() - 1);
        assert_eq!(t.len(), 4);
        assert_eq!(t.minus_one(), CoeffId::MINUS_ONE);
    }

    #[test]
    fn interning_is_by_value() {
        let f = FieldT::IntField(Arc::new(Integer::from(101)));
        let mut t = CoeffTable::new(f);
        let a = t.intern(7);
        let b = t.intern(108);
        let c = t.intern(-94);
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(t.intern(100), CoeffId::MINUS_ONE);
        assert_eq!(t.intern(202), CoeffId::ZERO);
        assert_eq!(t.intern(103), CoeffId::TWO);
        assert_eq!(t.len(), 5);
        assert_ne!(t.intern(8), a);
    }

    #[test]
    fn tiny_field() {
        let f = FieldT::IntField(Arc::new(Integer::from(2)));
        let mut t = CoeffTable::new(f);
        assert_eq!(t.intern(2), CoeffId::ZERO);
        assert_eq!(t.intern(-1), CoeffId::ONE);
        assert_eq!(t.minus_one(), CoeffId::ONE);
        assert_eq!(t.len(), 4);

        let mut t = CoeffTable::new(FieldT::IntField(Arc::new(Integer::from(3))));
        assert_eq!(t.minus_one(), CoeffId::TWO);
        assert_eq!(t.intern(-1), t.minus_one());
    }
}
