// -*- mode: rust; -*-
//
// This file is part of zed25519.
// See LICENSE for licensing information.

//! Curve and scalar constants: the 64-bit limbs of the Edwards curve
//! parameters, the basepoint, and the Montgomery-arithmetic constants for
//! the scalar field.

use once_cell::sync::Lazy;

use crate::edwards::{EdwardsBasepointTable, ExtendedPoint};
use crate::field::FieldElement;
use crate::scalar::UnpackedScalar;

/// Edwards `d` value, equal to `-121665/121666 mod p`.
pub(crate) const EDWARDS_D: FieldElement = FieldElement([
    929955233495203,
    466365720129213,
    1662059464998953,
    2033849074728123,
    1442794654840575,
]);

/// Edwards `2*d` value, equal to `2*(-121665/121666) mod p`.
pub(crate) const EDWARDS_D2: FieldElement = FieldElement([
    1859910466990425,
    932731440258426,
    1072319116312658,
    1815898335770999,
    633789495995903,
]);

/// Precomputed value of one of the square roots of -1 (mod p).
pub(crate) const SQRT_M1: FieldElement = FieldElement([
    1718705420411056,
    234908883556509,
    2233514472574048,
    2117202627021982,
    765476049583133,
]);

/// `L` is the order of the base point,
/// i.e. \\(2\^{252} + 27742317777372353535851937790883648493\\),
/// as five 52-bit limbs.
pub(crate) const L: UnpackedScalar = UnpackedScalar([
    0x0002631a5cf5d3ed,
    0x000dea2f79cd6581,
    0x000000000014def9,
    0x0000000000000000,
    0x0000100000000000,
]);

/// `L` * `LFACTOR` = -1 (mod 2^52)
pub(crate) const LFACTOR: u64 = 0x51da312547e1b;

/// `R` = R % L where R = 2^260
pub(crate) const R: UnpackedScalar = UnpackedScalar([
    0x000f48bd6721e6ed,
    0x0003bab5ac67e45a,
    0x000fffffeb35e51b,
    0x000fffffffffffff,
    0x00000fffffffffff,
]);

/// `RR` = (R^2) % L where R = 2^260
pub(crate) const RR: UnpackedScalar = UnpackedScalar([
    0x0009d265e952d13b,
    0x000d63c715bea69f,
    0x0005be65cb687604,
    0x0003dceec73d217f,
    0x000009411b7c309a,
]);

/// The Ed25519 basepoint, as an `ExtendedPoint`.
///
/// This is called `_POINT` to distinguish it from
/// `ED25519_BASEPOINT_TABLE`, which should be used for scalar
/// multiplication (it's much faster).
pub(crate) const ED25519_BASEPOINT_POINT: ExtendedPoint = ExtendedPoint {
    X: FieldElement([
        1738742601995546,
        1146398526822698,
        2070867633025821,
        562264141797630,
        587772402128613,
    ]),
    Y: FieldElement([
        1801439850948184,
        1351079888211148,
        450359962737049,
        900719925474099,
        1801439850948198,
    ]),
    Z: FieldElement([1, 0, 0, 0, 0]),
    T: FieldElement([
        1841354044333475,
        16398895984059,
        755974180946558,
        900171276175154,
        1821297809914039,
    ]),
};

/// A radix-16 table of multiples of the basepoint, built once on first
/// use and shared for the lifetime of the process.
///
/// The table is ~30KB, which is why it is built lazily instead of being
/// embedded as a generated constant.
pub(crate) static ED25519_BASEPOINT_TABLE: Lazy<EdwardsBasepointTable> =
    Lazy::new(|| EdwardsBasepointTable::create(&ED25519_BASEPOINT_POINT));

/// A point of order eight on the curve, used by tests to exercise the
/// small-order rejection paths.
#[cfg(test)]
pub(crate) const EIGHT_TORSION_GENERATOR: ExtendedPoint = ExtendedPoint {
    X: FieldElement([
        358744748052810,
        1691584618240980,
        977650209285361,
        1429865912637724,
        560044844278676,
    ]),
    Y: FieldElement([
        84926274344903,
        473620666599931,
        365590438845504,
        1028470286882429,
        2146499180330972,
    ]),
    Z: FieldElement([1, 0, 0, 0, 0]),
    T: FieldElement([
        1448326834587521,
        1857896831960481,
        1093722731865333,
        1677408490711241,
        1915505153018406,
    ]),
};
