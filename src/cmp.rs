//! Ordering and equality.
//!
//! Every comparison in this crate, whether between two [`Uuid7`] values or against a
//! [`uuid::Uuid`], goes through [`compare_bytes`]: unsigned comparison of the 16 bytes in
//! big-endian order.

use std::{any::Any, cmp::Ordering};

use crate::Uuid7;

/// Compares two big-endian 16-byte values as unsigned 128-bit integers.
///
/// This is equivalent to lexicographic comparison of the bytes as `u8`.
#[inline]
pub(crate) fn compare_bytes(a: &[u8; 16], b: &[u8; 16]) -> Ordering {
    u128::from_be_bytes(*a).cmp(&u128::from_be_bytes(*b))
}

impl Ord for Uuid7 {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_bytes(self.as_bytes(), other.as_bytes())
    }
}

impl PartialOrd for Uuid7 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq<uuid::Uuid> for Uuid7 {
    fn eq(&self, other: &uuid::Uuid) -> bool {
        compare_bytes(self.as_bytes(), other.as_bytes()).is_eq()
    }
}

impl PartialEq<Uuid7> for uuid::Uuid {
    fn eq(&self, other: &Uuid7) -> bool {
        other == self
    }
}

impl PartialOrd<uuid::Uuid> for Uuid7 {
    fn partial_cmp(&self, other: &uuid::Uuid) -> Option<Ordering> {
        Some(compare_bytes(self.as_bytes(), other.as_bytes()))
    }
}

impl PartialOrd<Uuid7> for uuid::Uuid {
    fn partial_cmp(&self, other: &Uuid7) -> Option<Ordering> {
        Some(compare_bytes(self.as_bytes(), other.as_bytes()))
    }
}

impl Uuid7 {
    /// Returns the bytes of a type-erased [`Uuid7`] or [`uuid::Uuid`].
    fn downcast_bytes(other: &dyn Any) -> Option<&[u8; 16]> {
        if let Some(e) = other.downcast_ref::<Uuid7>() {
            Some(e.as_bytes())
        } else {
            other.downcast_ref::<uuid::Uuid>().map(uuid::Uuid::as_bytes)
        }
    }

    /// Tests equality against a type-erased, possibly absent value.
    ///
    /// This entry point is meant for generic or reflective code that handles values as
    /// [`Any`]. It never panics: an absent value or a value of any type other than [`Uuid7`] and
    /// [`uuid::Uuid`] is simply not equal.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::any::Any;
    /// use uuid7_id::Uuid7;
    ///
    /// let x = uuid7_id::uuid7();
    /// assert!(x.eq_dyn(Some(&x as &dyn Any)));
    /// assert!(x.eq_dyn(Some(&uuid::Uuid::from(x) as &dyn Any)));
    /// assert!(!x.eq_dyn(None));
    /// assert!(!x.eq_dyn(Some(&"text" as &dyn Any)));
    /// ```
    pub fn eq_dyn(&self, other: Option<&dyn Any>) -> bool {
        other
            .and_then(Self::downcast_bytes)
            .is_some_and(|e| compare_bytes(self.as_bytes(), e).is_eq())
    }

    /// Compares against a type-erased, possibly absent value.
    ///
    /// An absent value orders before every identifier, so `None` yields
    /// `Some(Ordering::Greater)`. A value that is neither a [`Uuid7`] nor a [`uuid::Uuid`] is not
    /// comparable and yields `None`.
    pub fn cmp_dyn(&self, other: Option<&dyn Any>) -> Option<Ordering> {
        match other {
            None => Some(Ordering::Greater),
            Some(e) => Self::downcast_bytes(e).map(|e| compare_bytes(self.as_bytes(), e)),
        }
    }
}
