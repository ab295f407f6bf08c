// -*- mode: rust; -*-
//
// This file is part of zed25519.
// See LICENSE for licensing information.

//! Arithmetic on scalars modulo the group order
//! \\(\ell = 2\^{252} + 27742317777372353535851937790883648493\\).
//!
//! A `Scalar` is stored as 32 little-endian bytes, allowing easy access to
//! its bits when multiplying a point by a scalar.  For arithmetic between
//! two scalars, the `UnpackedScalar` form is used: five 52-bit unsigned
//! limbs, multiplied with Montgomery reduction.
//!
//! 51-bit limbs would cover the desired bit range (253 bits), but aren't
//! large enough to reduce a 512-bit number with Montgomery multiplication,
//! so 52 bits are used instead.  The largest limb in a 5x5 product of
//! 52-bit limbs is
//!
//! ```text
//! (0xfffffffffffff^2) * 5 = 0x4ffffffffffff60000000000005 (107 bits),
//! ```
//!
//! which fits a `u128` with room for the carry chain.

use core::fmt::Debug;
use core::ops::Neg;
use core::ops::{Add, AddAssign};
use core::ops::{Mul, MulAssign};

use digest::generic_array::typenum::U64;
use digest::Digest;

use subtle::Choice;
use subtle::ConstantTimeEq;

use zeroize::Zeroize;

use crate::constants;

/// An element of \\(\mathbb Z / \ell \mathbb Z\\), stored as 32 bytes in
/// little-endian order.
///
/// Most scalars in this crate are *reduced* (less than \\(\ell\\)); the
/// exception is clamped secret scalars and derivation blinds, which are
/// 255-bit integers loaded with [`Scalar::from_bits`] and only reduced
/// implicitly by arithmetic.
#[derive(Copy, Clone, Default)]
pub struct Scalar {
    pub(crate) bytes: [u8; 32],
}

impl Debug for Scalar {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        write!(f, "Scalar{{\n\tbytes: {:?},\n}}", &self.bytes)
    }
}

impl Eq for Scalar {}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.bytes.ct_eq(&other.bytes)
    }
}

impl Zeroize for Scalar {
    fn zeroize(&mut self) {
        self.bytes.zeroize();
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a Scalar {
    type Output = Scalar;
    fn mul(self, _rhs: &'b Scalar) -> Scalar {
        UnpackedScalar::mul(&self.unpack(), &_rhs.unpack()).pack()
    }
}

impl<'b> MulAssign<&'b Scalar> for Scalar {
    fn mul_assign(&mut self, _rhs: &'b Scalar) {
        *self = UnpackedScalar::mul(&self.unpack(), &_rhs.unpack()).pack();
    }
}

define_mul_variants!(LHS = Scalar, RHS = Scalar, Output = Scalar);
define_mul_assign_variants!(LHS = Scalar, RHS = Scalar);

impl<'a, 'b> Add<&'b Scalar> for &'a Scalar {
    type Output = Scalar;
    /// Compute `self + rhs (mod l)`.  Both inputs must be reduced.
    fn add(self, _rhs: &'b Scalar) -> Scalar {
        UnpackedScalar::add(&self.unpack(), &_rhs.unpack()).pack()
    }
}

impl<'b> AddAssign<&'b Scalar> for Scalar {
    fn add_assign(&mut self, _rhs: &'b Scalar) {
        *self = &*self + _rhs;
    }
}

define_add_variants!(LHS = Scalar, RHS = Scalar, Output = Scalar);
define_add_assign_variants!(LHS = Scalar, RHS = Scalar);

impl<'a> Neg for &'a Scalar {
    type Output = Scalar;
    fn neg(self) -> Scalar {
        // (x·R)/R = x (mod l), which canonicalizes x before negation.
        let self_R = UnpackedScalar::mul_internal(&self.unpack(), &constants::R);
        let self_mod_l = UnpackedScalar::montgomery_reduce(&self_R);
        UnpackedScalar::sub(&UnpackedScalar::ZERO, &self_mod_l).pack()
    }
}

impl Neg for Scalar {
    type Output = Scalar;
    fn neg(self) -> Scalar {
        -&self
    }
}

impl Scalar {
    /// Construct a `Scalar` from the low 255 bits of a 256-bit integer.
    ///
    /// This function is intended for applications like Ed25519 which
    /// require specific bit-patterns when performing scalar
    /// multiplication; the value is **not** reduced modulo \\(\ell\\).
    pub(crate) const fn from_bits(bytes: [u8; 32]) -> Scalar {
        let mut s = Scalar { bytes };
        // Ensure that s < 2^255 by masking the high bit
        s.bytes[31] &= 0b0111_1111;
        s
    }

    /// Construct a `Scalar` by reducing a 512-bit little-endian integer
    /// modulo the group order \\(\ell\\).
    pub(crate) fn from_bytes_mod_order_wide(input: &[u8; 64]) -> Scalar {
        UnpackedScalar::from_bytes_wide(input).pack()
    }

    /// Attempt to construct a `Scalar` from a canonical byte
    /// representation.
    ///
    /// Returns `None` if the input's 256-bit little-endian value is not
    /// strictly less than the group order; this is the wire-format check
    /// applied to the `s` and `h` components of signatures and proofs.
    pub(crate) fn from_canonical_bytes(bytes: [u8; 32]) -> Option<Scalar> {
        let high_bit_unset: bool = (bytes[31] >> 7) == 0;
        let candidate = Scalar { bytes };
        if high_bit_unset && bool::from(candidate.is_canonical()) {
            Some(candidate)
        } else {
            None
        }
    }

    /// Construct a scalar from an existing `Digest` instance producing 64
    /// bytes (512 bits) of output, reducing modulo \\(\ell\\).
    ///
    /// Streaming data into the `Digest` and handing it over avoids
    /// assembling the concatenated protocol transcripts in memory.
    pub(crate) fn from_hash<D>(hash: D) -> Scalar
    where
        D: Digest<OutputSize = U64>,
    {
        let mut output = [0u8; 64];
        output.copy_from_slice(hash.finalize().as_slice());
        Scalar::from_bytes_mod_order_wide(&output)
    }

    /// View this `Scalar` as a sequence of bytes.
    pub(crate) fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Convert this `Scalar` to its underlying sequence of bytes.
    pub(crate) fn to_bytes(&self) -> [u8; 32] {
        self.bytes
    }

    /// Clamp a 256-bit little-endian integer for use as an Ed25519 secret
    /// scalar: clear the low three bits, clear the top two bits, set bit
    /// 254.
    pub(crate) const fn clamp_integer(mut bytes: [u8; 32]) -> [u8; 32] {
        bytes[0] &= 248;
        bytes[31] &= 63;
        bytes[31] |= 64;
        bytes
    }

    /// Reduce this `Scalar` modulo \\(\ell\\).
    fn reduce(&self) -> Scalar {
        // (x·R)/R = x (mod l)
        let x = self.unpack();
        let xR = UnpackedScalar::mul_internal(&x, &constants::R);
        let x_mod_l = UnpackedScalar::montgomery_reduce(&xR);
        x_mod_l.pack()
    }

    /// Check whether this `Scalar` is the canonical representative mod
    /// \\(\ell\\), i.e. whether its 256-bit little-endian value is
    /// strictly less than the group order.
    ///
    /// Verification paths use this to reject non-canonical `s` and `h`
    /// components rather than silently reducing them.
    pub(crate) fn is_canonical(&self) -> Choice {
        self.ct_eq(&self.reduce())
    }

    /// Unpack this `Scalar` to its five-limb form.
    pub(crate) fn unpack(&self) -> UnpackedScalar {
        UnpackedScalar::from_bytes(&self.bytes)
    }

    /// Get the bits of the scalar, least significant first.
    fn bits(&self) -> [i8; 256] {
        let mut bits = [0i8; 256];
        for i in 0..256 {
            // As i runs from 0..256, the bottom 3 bits index the bit,
            // while the upper bits index the byte.
            bits[i] = ((self.bytes[i >> 3] >> (i & 7)) & 1u8) as i8;
        }
        bits
    }

    /// Compute a width-5 "Non-Adjacent Form" of this scalar.
    ///
    /// A width-`w` NAF of a positive integer `k` is an expression
    /// `k = sum(k[i]*2^i for i in range(l))`, where each nonzero
    /// coefficient `k[i]` is odd and bounded by `|k[i]| < 2^(w-1)`,
    /// `k[l-1]` is nonzero, and at most one of any `w` consecutive
    /// coefficients is nonzero.  (Hankerson, Menezes, Vanstone; def 3.32).
    pub(crate) fn non_adjacent_form(&self) -> [i8; 256] {
        // Step 1: write out bits of the scalar
        let mut naf = self.bits();

        // Step 2: zero coefficients by carrying them upwards or downwards
        'bits: for i in 0..256 {
            if naf[i] == 0 {
                continue 'bits;
            }
            'window: for b in 1..6 {
                if i + b >= 256 {
                    break 'window;
                }
                if naf[i + b] == 0 {
                    continue 'window;
                }
                let potential_carry = naf[i + b] << b;
                if naf[i + b] + potential_carry <= 15 {
                    // Eliminate naf[i+b] by carrying its value onto naf[i]
                    naf[i] += potential_carry;
                    naf[i + b] = 0;
                } else if naf[i + b] - potential_carry >= -15 {
                    // Eliminate naf[i+b] by carrying its value upwards.
                    naf[i] -= potential_carry; // Subtract 2^(i+b)
                    'carry: for k in i + b..256 {
                        if naf[k] != 0 {
                            // Since naf[k] = 0 or 1 for k > i, naf[k] == 1.
                            naf[k] = 0; // Subtract 2^k
                        } else {
                            // By now we have subtracted 2^k =
                            // 2^(i+b) + 2^(i+b) + 2^(i+b+1) + ... + 2^(k-1).
                            naf[k] = 1; // Add back 2^k.
                            break 'carry;
                        }
                    }
                }
            }
        }

        naf
    }

    /// Write this scalar in radix 16, with coefficients in `[-8,8)`,
    /// i.e., compute `a_i` such that
    ///
    ///    a = a_0 + a_1*16^1 + ... + a_63*16^63,
    ///
    /// with `-8 <= a_i < 8` for `0 <= i < 63` and `-8 <= a_63 <= 8`.
    ///
    /// Precondition: self\[31\] <= 127.  This is the case whenever `self`
    /// is reduced or clamped.
    pub(crate) fn to_radix_16(&self) -> [i8; 64] {
        debug_assert!(self.bytes[31] <= 127);
        let mut output = [0i8; 64];

        // Step 1: change radix.
        // Convert from radix 256 (bytes) to radix 16 (nibbles)
        #[inline(always)]
        fn bot_half(x: u8) -> u8 {
            x & 15
        }
        #[inline(always)]
        fn top_half(x: u8) -> u8 {
            (x >> 4) & 15
        }

        for i in 0..32 {
            output[2 * i] = bot_half(self.bytes[i]) as i8;
            output[2 * i + 1] = top_half(self.bytes[i]) as i8;
        }
        // Precondition note: since self[31] <= 127, output[63] <= 7

        // Step 2: recenter coefficients from [0,16) to [-8,8)
        for i in 0..63 {
            let carry = (output[i] + 8) >> 4;
            output[i] -= carry << 4;
            output[i + 1] += carry;
        }
        // Precondition note: output[63] is not recentered.  It increases
        // by carry <= 1.  Thus output[63] <= 8.

        output
    }
}

/// The `UnpackedScalar` struct represents an element in
/// \\(\mathbb Z / \ell \mathbb Z\\) as five 52-bit limbs.
#[derive(Copy, Clone)]
pub(crate) struct UnpackedScalar(pub(crate) [u64; 5]);

/// u64 * u64 = u128 multiply helper
#[inline(always)]
const fn m(x: u64, y: u64) -> u128 {
    (x as u128) * (y as u128)
}

impl UnpackedScalar {
    /// The scalar \\( 0 \\).
    pub const ZERO: UnpackedScalar = UnpackedScalar([0, 0, 0, 0, 0]);

    /// Unpack a 32 byte / 256 bit scalar into five 52-bit limbs.
    #[rustfmt::skip] // keep alignment of s[*] calculations
    pub fn from_bytes(bytes: &[u8; 32]) -> UnpackedScalar {
        let mut words = [0u64; 4];
        for i in 0..4 {
            for j in 0..8 {
                words[i] |= (bytes[(i * 8) + j] as u64) << (j * 8);
            }
        }

        let mask = (1u64 << 52) - 1;
        let top_mask = (1u64 << 48) - 1;

        UnpackedScalar([
              words[0]                            & mask,
            ((words[0] >> 52) | (words[1] << 12)) & mask,
            ((words[1] >> 40) | (words[2] << 24)) & mask,
            ((words[2] >> 28) | (words[3] << 36)) & mask,
             (words[3] >> 16)                     & top_mask,
        ])
    }

    /// Reduce a 64 byte / 512 bit scalar mod \\(\ell\\).
    #[rustfmt::skip] // keep alignment of lo[*] and hi[*] calculations
    pub fn from_bytes_wide(bytes: &[u8; 64]) -> UnpackedScalar {
        let mut words = [0u64; 8];
        for i in 0..8 {
            for j in 0..8 {
                words[i] |= (bytes[(i * 8) + j] as u64) << (j * 8);
            }
        }

        let mask = (1u64 << 52) - 1;
        let lo = UnpackedScalar([
              words[0]                            & mask,
            ((words[0] >> 52) | (words[1] << 12)) & mask,
            ((words[1] >> 40) | (words[2] << 24)) & mask,
            ((words[2] >> 28) | (words[3] << 36)) & mask,
            ((words[3] >> 16) | (words[4] << 48)) & mask,
        ]);
        let hi = UnpackedScalar([
             (words[4] >>  4)                     & mask,
            ((words[4] >> 56) | (words[5] <<  8)) & mask,
            ((words[5] >> 44) | (words[6] << 20)) & mask,
            ((words[6] >> 32) | (words[7] << 32)) & mask,
              words[7] >> 20,
        ]);

        let lo = UnpackedScalar::montgomery_mul(&lo, &constants::R);  // (lo * R) / R = lo
        let hi = UnpackedScalar::montgomery_mul(&hi, &constants::RR); // (hi * R^2) / R = hi * R

        UnpackedScalar::add(&hi, &lo)
    }

    /// Pack the limbs of this `UnpackedScalar` into a `Scalar`.
    #[rustfmt::skip] // keep alignment of s[*] calculations
    pub fn pack(&self) -> Scalar {
        let mut s = Scalar { bytes: [0u8; 32] };

        s.bytes[ 0] =  (self.0[0] >>  0)                    as u8;
        s.bytes[ 1] =  (self.0[0] >>  8)                    as u8;
        s.bytes[ 2] =  (self.0[0] >> 16)                    as u8;
        s.bytes[ 3] =  (self.0[0] >> 24)                    as u8;
        s.bytes[ 4] =  (self.0[0] >> 32)                    as u8;
        s.bytes[ 5] =  (self.0[0] >> 40)                    as u8;
        s.bytes[ 6] = ((self.0[0] >> 48) | (self.0[1] << 4)) as u8;
        s.bytes[ 7] =  (self.0[1] >>  4)                    as u8;
        s.bytes[ 8] =  (self.0[1] >> 12)                    as u8;
        s.bytes[ 9] =  (self.0[1] >> 20)                    as u8;
        s.bytes[10] =  (self.0[1] >> 28)                    as u8;
        s.bytes[11] =  (self.0[1] >> 36)                    as u8;
        s.bytes[12] =  (self.0[1] >> 44)                    as u8;
        s.bytes[13] =  (self.0[2] >>  0)                    as u8;
        s.bytes[14] =  (self.0[2] >>  8)                    as u8;
        s.bytes[15] =  (self.0[2] >> 16)                    as u8;
        s.bytes[16] =  (self.0[2] >> 24)                    as u8;
        s.bytes[17] =  (self.0[2] >> 32)                    as u8;
        s.bytes[18] =  (self.0[2] >> 40)                    as u8;
        s.bytes[19] = ((self.0[2] >> 48) | (self.0[3] << 4)) as u8;
        s.bytes[20] =  (self.0[3] >>  4)                    as u8;
        s.bytes[21] =  (self.0[3] >> 12)                    as u8;
        s.bytes[22] =  (self.0[3] >> 20)                    as u8;
        s.bytes[23] =  (self.0[3] >> 28)                    as u8;
        s.bytes[24] =  (self.0[3] >> 36)                    as u8;
        s.bytes[25] =  (self.0[3] >> 44)                    as u8;
        s.bytes[26] =  (self.0[4] >>  0)                    as u8;
        s.bytes[27] =  (self.0[4] >>  8)                    as u8;
        s.bytes[28] =  (self.0[4] >> 16)                    as u8;
        s.bytes[29] =  (self.0[4] >> 24)                    as u8;
        s.bytes[30] =  (self.0[4] >> 32)                    as u8;
        s.bytes[31] =  (self.0[4] >> 40)                    as u8;

        s
    }

    /// Compute `a + b` (mod \\(\ell\\)).  Both inputs must be reduced.
    pub fn add(a: &UnpackedScalar, b: &UnpackedScalar) -> UnpackedScalar {
        let mut sum = UnpackedScalar::ZERO;
        let mask = (1u64 << 52) - 1;

        // a + b
        let mut carry: u64 = 0;
        for i in 0..5 {
            carry = a.0[i] + b.0[i] + (carry >> 52);
            sum.0[i] = carry & mask;
        }

        // subtract l if the sum is >= l
        UnpackedScalar::sub(&sum, &constants::L)
    }

    /// Compute `a - b` (mod \\(\ell\\)).
    pub fn sub(a: &UnpackedScalar, b: &UnpackedScalar) -> UnpackedScalar {
        let mut difference = UnpackedScalar::ZERO;
        let mask = (1u64 << 52) - 1;

        // a - b
        let mut borrow: u64 = 0;
        for i in 0..5 {
            borrow = a.0[i].wrapping_sub(b.0[i] + (borrow >> 63));
            difference.0[i] = borrow & mask;
        }

        // conditionally add l if the difference is negative
        let underflow_mask = ((borrow >> 63) ^ 1).wrapping_sub(1);
        let mut carry: u64 = 0;
        for i in 0..5 {
            carry = (carry >> 52) + difference.0[i] + (constants::L.0[i] & underflow_mask);
            difference.0[i] = carry & mask;
        }

        difference
    }

    /// Compute `a * b` as a 9-limb double-width product.
    #[inline(always)]
    #[rustfmt::skip] // keep alignment of z[*] calculations
    pub(crate) fn mul_internal(a: &UnpackedScalar, b: &UnpackedScalar) -> [u128; 9] {
        let a = a.0;
        let b = b.0;
        let mut z = [0u128; 9];

        z[0] = m(a[0], b[0]);
        z[1] = m(a[0], b[1]) + m(a[1], b[0]);
        z[2] = m(a[0], b[2]) + m(a[1], b[1]) + m(a[2], b[0]);
        z[3] = m(a[0], b[3]) + m(a[1], b[2]) + m(a[2], b[1]) + m(a[3], b[0]);
        z[4] = m(a[0], b[4]) + m(a[1], b[3]) + m(a[2], b[2]) + m(a[3], b[1]) + m(a[4], b[0]);
        z[5] =                 m(a[1], b[4]) + m(a[2], b[3]) + m(a[3], b[2]) + m(a[4], b[1]);
        z[6] =                                 m(a[2], b[4]) + m(a[3], b[3]) + m(a[4], b[2]);
        z[7] =                                                 m(a[3], b[4]) + m(a[4], b[3]);
        z[8] =                                                                 m(a[4], b[4]);

        z
    }

    /// Compute `limbs/R` (mod \\(\ell\\)), where R is the Montgomery
    /// modulus 2^260.
    #[inline(always)]
    #[rustfmt::skip] // keep alignment of n* and r* calculations
    pub(crate) fn montgomery_reduce(limbs: &[u128; 9]) -> UnpackedScalar {
        #[inline(always)]
        fn part1(sum: u128) -> (u128, u64) {
            let p = (sum as u64).wrapping_mul(constants::LFACTOR) & ((1u64 << 52) - 1);
            ((sum + m(p, constants::L.0[0])) >> 52, p)
        }

        #[inline(always)]
        fn part2(sum: u128) -> (u128, u64) {
            let w = (sum as u64) & ((1u64 << 52) - 1);
            (sum >> 52, w)
        }

        // note: l[3] is zero, so its multiples can be skipped
        let l = &constants::L.0;

        // the first half computes the Montgomery adjustment factor n, and
        // begins adding n*l to make limbs divisible by R
        let (carry, n0) = part1(        limbs[0]);
        let (carry, n1) = part1(carry + limbs[1] + m(n0, l[1]));
        let (carry, n2) = part1(carry + limbs[2] + m(n0, l[2]) + m(n1, l[1]));
        let (carry, n3) = part1(carry + limbs[3]               + m(n1, l[2]) + m(n2, l[1]));
        let (carry, n4) = part1(carry + limbs[4] + m(n0, l[4])               + m(n2, l[2]) + m(n3, l[1]));

        // limbs is divisible by R now, so we can divide by R by simply
        // storing the upper half as the result
        let (carry, r0) = part2(carry + limbs[5]               + m(n1, l[4])               + m(n3, l[2]) + m(n4, l[1]));
        let (carry, r1) = part2(carry + limbs[6]                             + m(n2, l[4])               + m(n4, l[2]));
        let (carry, r2) = part2(carry + limbs[7]                                           + m(n3, l[4]));
        let (carry, r3) = part2(carry + limbs[8]                                                         + m(n4, l[4]));
        let         r4 = carry as u64;

        // result may be >= l, so attempt to subtract l
        UnpackedScalar::sub(&UnpackedScalar([r0, r1, r2, r3, r4]), &constants::L)
    }

    /// Compute `a * b` (mod \\(\ell\\)).
    #[inline(never)]
    pub fn mul(a: &UnpackedScalar, b: &UnpackedScalar) -> UnpackedScalar {
        let ab = UnpackedScalar::montgomery_reduce(&UnpackedScalar::mul_internal(a, b));
        UnpackedScalar::montgomery_reduce(&UnpackedScalar::mul_internal(&ab, &constants::RR))
    }

    /// Compute `(a * b) / R` (mod \\(\ell\\)), where R is the Montgomery
    /// modulus 2^260.
    #[inline(never)]
    pub fn montgomery_mul(a: &UnpackedScalar, b: &UnpackedScalar) -> UnpackedScalar {
        UnpackedScalar::montgomery_reduce(&UnpackedScalar::mul_internal(a, b))
    }
}
