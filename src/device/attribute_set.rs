//! A compact, typed bitmap of small integer codes.
//!
//! Used both for device capability bitmaps (which codes a family
//! advertises) and the key-shadow tracker (which keys are currently held).

use bitvec::prelude::*;
use std::fmt;

/// An owned collection of bits representing device capability or state,
/// indexed by an [`EvdevEnum`].
#[derive(Clone, Default)]
pub struct AttributeSet<T> {
    bits: BitVec<u8, Lsb0>,
    _indexer: std::marker::PhantomData<T>,
}

impl<T: EvdevEnum> AttributeSet<T> {
    pub fn new() -> Self {
        Self {
            bits: BitVec::new(),
            _indexer: std::marker::PhantomData,
        }
    }

    /// Builds a set from a raw bitmask, as returned by an `EVIOCGBIT`-style
    /// ioctl: LSB-first, one bit per code.
    pub fn from_raw(bytes: &[u8]) -> Self {
        Self {
            bits: BitVec::from_slice(bytes),
            _indexer: std::marker::PhantomData,
        }
    }

    #[inline]
    pub fn contains(&self, attr: T) -> bool {
        self.bits.get(attr.to_index()).map_or(false, |b| *b)
    }

    /// Adds `attr` to the set, growing the backing storage if needed.
    pub fn insert(&mut self, attr: T) {
        self.set(attr, true);
    }

    /// Sets the membership of `attr`, growing the backing storage if needed.
    pub fn set(&mut self, attr: T, value: bool) {
        let idx = attr.to_index();
        if idx >= self.bits.len() {
            self.bits.resize(idx + 1, false);
        }
        self.bits.set(idx, value);
    }

    pub fn is_empty(&self) -> bool {
        !self.bits.any()
    }

    /// Iterates over every set bit.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.bits.iter_ones().map(T::from_index)
    }

    /// Set union, writing into `self`.
    pub fn union_with(&mut self, other: &Self) {
        if other.bits.len() > self.bits.len() {
            self.bits.resize(other.bits.len(), false);
        }
        for i in other.bits.iter_ones() {
            self.bits.set(i, true);
        }
    }

    /// `self &= !other` — removes every bit set in `other`.
    pub fn difference_with(&mut self, other: &Self) {
        for i in other.bits.iter_ones() {
            if i < self.bits.len() {
                self.bits.set(i, false);
            }
        }
    }
}

impl<T: EvdevEnum + fmt::Debug> fmt::Debug for AttributeSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

pub trait EvdevEnum: Copy + 'static {
    fn from_index(i: usize) -> Self;
    fn to_index(self) -> usize;
}

macro_rules! evdev_enum {
    ($t:ty, $($(#[$attr:meta])* $c:ident = $val:expr,)*) => {
        impl $t {
            $($(#[$attr])* pub const $c: Self = Self($val);)*
        }
        impl std::fmt::Debug for $t {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                match *self {
                    $(Self::$c => f.pad(stringify!($c)),)*
                    _ => write!(f, "unknown code: {}", self.0),
                }
            }
        }
        impl $crate::device::attribute_set::EvdevEnum for $t {
            #[inline]
            fn from_index(i: usize) -> Self {
                Self(i as _)
            }
            #[inline]
            fn to_index(self) -> usize {
                self.0 as _
            }
        }
    }
}

pub(crate) use evdev_enum;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::constants::KeyCode;

    #[test]
    fn starts_empty() {
        let set = AttributeSet::<KeyCode>::new();
        assert!(set.is_empty());
        assert!(!set.contains(KeyCode::KEY_A));
    }

    #[test]
    fn insert_grows_and_sets() {
        let mut set = AttributeSet::<KeyCode>::new();
        set.insert(KeyCode::KEY_A);
        assert!(set.contains(KeyCode::KEY_A));
        assert!(!set.is_empty());
    }

    #[test]
    fn set_false_clears_bit() {
        let mut set = AttributeSet::<KeyCode>::new();
        set.set(KeyCode::KEY_A, true);
        set.set(KeyCode::KEY_A, false);
        assert!(!set.contains(KeyCode::KEY_A));
    }

    #[test]
    fn iter_yields_every_member_once() {
        let mut set = AttributeSet::<KeyCode>::new();
        set.insert(KeyCode::KEY_A);
        set.insert(KeyCode::KEY_B);
        let mut codes: Vec<u16> = set.iter().map(|c| c.0).collect();
        codes.sort();
        assert_eq!(codes, vec![KeyCode::KEY_A.0, KeyCode::KEY_B.0]);
    }

    #[test]
    fn union_with_merges_bits() {
        let mut a = AttributeSet::<KeyCode>::new();
        a.insert(KeyCode::KEY_A);
        let mut b = AttributeSet::<KeyCode>::new();
        b.insert(KeyCode::KEY_B);
        a.union_with(&b);
        assert!(a.contains(KeyCode::KEY_A));
        assert!(a.contains(KeyCode::KEY_B));
    }

    #[test]
    fn difference_with_removes_bits() {
        let mut a = AttributeSet::<KeyCode>::new();
        a.insert(KeyCode::KEY_A);
        a.insert(KeyCode::KEY_B);
        let mut b = AttributeSet::<KeyCode>::new();
        b.insert(KeyCode::KEY_A);
        a.difference_with(&b);
        assert!(!a.contains(KeyCode::KEY_A));
        assert!(a.contains(KeyCode::KEY_B));
    }

    #[test]
    fn from_raw_reads_lsb_first() {
        // byte 0: bits 0 and 2 set -> codes 0 and 2
        let set = AttributeSet::<KeyCode>::from_raw(&[0b0000_0101]);
        assert!(set.contains(KeyCode(0)));
        assert!(!set.contains(KeyCode(1)));
        assert!(set.contains(KeyCode(2)));
    }
}
