// -*- mode: rust; -*-
//
// This file is part of zed25519.
// See LICENSE for licensing information.

//! Common traits for the point representations.

use subtle::ConstantTimeEq;

/// Trait for getting the identity element of a point type.
pub(crate) trait Identity {
    /// Returns the identity element of the curve.
    /// Can be used as a constructor.
    fn identity() -> Self;
}

/// Trait for testing if a curve point is equivalent to the identity point.
pub(crate) trait IsIdentity {
    /// Return true if this element is the identity element of the curve.
    fn is_identity(&self) -> bool;
}

/// Implement generic identity equality testing for point representations
/// with constant-time equality testing and a defined identity constructor.
impl<T> IsIdentity for T
where
    T: ConstantTimeEq + Identity,
{
    fn is_identity(&self) -> bool {
        self.ct_eq(&T::identity()).into()
    }
}

/// Trait for checking whether a point is on the curve.
///
/// Only for debugging and testing; users of the crate cannot construct an
/// invalid point through the public API.
#[cfg(test)]
pub(crate) trait ValidityCheck {
    /// Checks whether the point is on the curve. Not CT.
    fn is_valid(&self) -> bool;
}
