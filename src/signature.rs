// -*- mode: rust; -*-
//
// This file is part of zed25519.
// See LICENSE for licensing information.

//! Ed25519 signatures.

use core::fmt::Debug;

use crate::edwards::CompressedEdwardsY;
use crate::scalar::Scalar;

/// The length of an ed25519 signature in bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// An Ed25519 signature.
///
/// The 64-byte wire form is `R ‖ s`: the compressed commitment point
/// followed by the response scalar, little-endian.  This is bit-compatible
/// with RFC 8032 signatures.
#[allow(non_snake_case)]
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Signature {
    /// `R` is an `ExtendedPoint`, formed by taking the sampled scalar
    /// nonce `r` and multiplying it by the Ed25519 basepoint.
    pub(crate) R: CompressedEdwardsY,

    /// `s` is a `Scalar`, formed from the hash of the commitment, the
    /// public key, and the message, times the secret scalar, plus the
    /// nonce: `s = r + h·a (mod ℓ)`.
    pub(crate) s: Scalar,
}

impl Debug for Signature {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        write!(f, "Signature( R: {:?}, s: {:?} )", self.R, self.s)
    }
}

impl Signature {
    /// Convert this `Signature` to its 64-byte wire form.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut bytes = [0u8; SIGNATURE_LENGTH];
        bytes[..32].copy_from_slice(&self.R.to_bytes());
        bytes[32..].copy_from_slice(&self.s.to_bytes());
        bytes
    }

    /// Parse a `Signature` from its 64-byte wire form.
    ///
    /// Returns `None` if the input is not 64 bytes, if the top three bits
    /// of the final byte are set (a cheap pre-filter equivalent to
    /// `s < 2^253`), or if the `s` component is not a canonical scalar.
    /// The `R` component is only parsed, not validated; whether it
    /// decompresses to a curve point is checked during verification.
    pub fn from_bytes(bytes: &[u8]) -> Option<Signature> {
        if bytes.len() != SIGNATURE_LENGTH {
            return None;
        }

        // A cheap pre-filter on the `s` bits, per the RFC 8032
        // malleability check: any of the top three bits set means
        // s >= 2^253 > l.
        if bytes[63] & 0b1110_0000 != 0 {
            return None;
        }

        let mut lower = [0u8; 32];
        let mut upper = [0u8; 32];
        lower.copy_from_slice(&bytes[..32]);
        upper.copy_from_slice(&bytes[32..]);

        let s = Scalar::from_canonical_bytes(upper)?;

        Some(Signature {
            R: CompressedEdwardsY(lower),
            s,
        })
    }
}
