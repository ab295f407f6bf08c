// -*- mode: rust; -*-
//
// This file is part of zed25519.
// See LICENSE for licensing information.

//! The proof type and helpers for the verifiable random function.
//!
//! The VRF here is in the spirit of Signal's VXEdDSA, with deliberate
//! differences:
//!
//! - The math is done on the Edwards form of the curve, so the VRF is
//!   directly compatible with Ed25519 keypairs, rather than on the
//!   isomorphic Montgomery form (X25519) that VXEdDSA uses.
//!
//! - Instead of Elligator 2, hashing to a point uses a guess-and-check
//!   loop.  This is secure but variable-time; it is only ever applied to
//!   public data (the compressed public key concatenated with the VRF
//!   input), where the timing reveals nothing an observer does not
//!   already know.
//!
//! - Nonce generation is purely deterministic, from the secret prefix
//!   and the compressed evaluation point; no caller-supplied randomness
//!   enters the computation.
//!
//! - The output is truncated to 256 bits.  The value hashed is a point
//!   with roughly 2^252 possible values, so emitting the full 512-bit
//!   digest would misrepresent the amount of information in the result.

use core::fmt::Debug;

use sha2::{Digest, Sha512};

use crate::edwards::{CompressedEdwardsY, ExtendedPoint};
use crate::scalar::Scalar;

/// The length of a VRF proof in bytes.
pub const VRF_PROOF_LENGTH: usize = 96;

/// The length of a VRF output in bytes.
pub const VRF_OUTPUT_LENGTH: usize = 32;

/// A proof that a VRF output was correctly evaluated for some input
/// under the secret key matching a known public key.
///
/// The 96-byte wire form is `V ‖ h ‖ s`: the compressed evaluation point,
/// the challenge scalar, and the response scalar.
#[allow(non_snake_case)]
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct VrfProof {
    /// The evaluation point `V = a·B_v`, compressed.
    pub(crate) V: CompressedEdwardsY,

    /// The challenge scalar binding the public key, the evaluation
    /// point, both commitments, and the input.
    pub(crate) h: Scalar,

    /// The response scalar `s = r + h·a (mod ℓ)`.
    pub(crate) s: Scalar,
}

impl Debug for VrfProof {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        write!(
            f,
            "VrfProof( V: {:?}, h: {:?}, s: {:?} )",
            self.V, self.h, self.s
        )
    }
}

impl VrfProof {
    /// Convert this `VrfProof` to its 96-byte wire form.
    pub fn to_bytes(&self) -> [u8; VRF_PROOF_LENGTH] {
        let mut bytes = [0u8; VRF_PROOF_LENGTH];
        bytes[..32].copy_from_slice(&self.V.to_bytes());
        bytes[32..64].copy_from_slice(&self.h.to_bytes());
        bytes[64..].copy_from_slice(&self.s.to_bytes());
        bytes
    }

    /// Parse a `VrfProof` from its 96-byte wire form.
    ///
    /// Returns `None` if the input is not 96 bytes or if either scalar
    /// component is not canonical.  The `V` component is only parsed;
    /// whether it decompresses to a curve point is checked during
    /// verification.
    #[allow(non_snake_case)]
    pub fn from_bytes(bytes: &[u8]) -> Option<VrfProof> {
        if bytes.len() != VRF_PROOF_LENGTH {
            return None;
        }

        let mut V_bytes = [0u8; 32];
        let mut h_bytes = [0u8; 32];
        let mut s_bytes = [0u8; 32];
        V_bytes.copy_from_slice(&bytes[..32]);
        h_bytes.copy_from_slice(&bytes[32..64]);
        s_bytes.copy_from_slice(&bytes[64..]);

        let h = Scalar::from_canonical_bytes(h_bytes)?;
        let s = Scalar::from_canonical_bytes(s_bytes)?;

        Some(VrfProof {
            V: CompressedEdwardsY(V_bytes),
            h,
            s,
        })
    }
}

/// Hash arbitrary bytes to a curve point in the same subgroup as the
/// basepoint.
///
/// Initialize a 64-byte buffer with the hash of the input and zero its
/// first byte, treating that byte as a counter.  Each iteration hashes
/// the buffer and tries to decompress each half of the digest as a curve
/// point; each attempt succeeds with probability about one half, so
/// exhausting all 512 attempts (256 counter values, two halves each) has
/// probability around 2^-512 and never happens in practice.  The counter
/// increments with wraparound for the same reason.  The found point is
/// multiplied by the cofactor before returning, which guarantees the
/// result lies in the prime-order subgroup.
///
/// This is a VARIABLE TIME algorithm: the number of iterations, and the
/// failure pattern inside `decompress`, depend on the input.  Callers
/// must only pass public data.
pub(crate) fn hash_to_point_vartime(input: &[u8]) -> ExtendedPoint {
    let mut ib = [0u8; 64];
    ib.copy_from_slice(&Sha512::digest(input));
    ib[0] = 0;

    loop {
        let mut ob = [0u8; 64];
        ob.copy_from_slice(&Sha512::digest(ib));

        let mut half = [0u8; 32];
        half.copy_from_slice(&ob[..32]);
        if let Some(p) = CompressedEdwardsY(half).decompress() {
            return p.mul_by_cofactor();
        }

        half.copy_from_slice(&ob[32..]);
        if let Some(p) = CompressedEdwardsY(half).decompress() {
            return p.mul_by_cofactor();
        }

        ib[0] = ib[0].wrapping_add(1);
    }
}

/// Compute the VRF output for an evaluation point `V`: the first 32 bytes
/// of `SHA-512(compress(8·V))`.
///
/// The secret scalar is a multiple of eight by clamping, so `V` is
/// already in the prime-order subgroup and the cofactor multiplication
/// is redundant on the prove side; it is applied anyway for uniformity
/// with verification, where `V` comes off the wire.
#[allow(non_snake_case)]
pub(crate) fn vrf_output(V: &ExtendedPoint) -> [u8; VRF_OUTPUT_LENGTH] {
    let cV = V.mul_by_cofactor();
    let digest = Sha512::digest(cV.compress().as_bytes());
    let mut output = [0u8; VRF_OUTPUT_LENGTH];
    output.copy_from_slice(&digest[..VRF_OUTPUT_LENGTH]);
    output
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::traits::ValidityCheck;

    #[test]
    fn hash_to_point_is_on_curve() {
        for input in [&b"zed"[..], &b"25519"[..], &[0u8; 32][..]] {
            let p = hash_to_point_vartime(input);
            assert!(p.is_valid());
            // Cofactor was cleared, so the point cannot have small order
            // (unless the hash landed exactly on a torsion point, which
            // would mean a broken hash).
            assert!(!p.is_small_order());
        }
    }

    #[test]
    fn hash_to_point_is_deterministic() {
        let p = hash_to_point_vartime(b"determinism");
        let q = hash_to_point_vartime(b"determinism");
        assert_eq!(p.compress(), q.compress());
    }

    #[test]
    fn hash_to_point_separates_inputs() {
        let p = hash_to_point_vartime(b"input one");
        let q = hash_to_point_vartime(b"input two");
        assert_ne!(p.compress(), q.compress());
    }

    #[test]
    fn proof_wrong_length_rejected() {
        assert!(VrfProof::from_bytes(&[0u8; 95]).is_none());
        assert!(VrfProof::from_bytes(&[0u8; 97]).is_none());
        assert!(VrfProof::from_bytes(&[]).is_none());
    }

    #[test]
    fn proof_non_canonical_scalars_rejected() {
        // l in the h position
        let ell: [u8; 32] = [
            0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9,
            0xde, 0x14, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x10,
        ];
        let mut bytes = [0u8; 96];
        bytes[32..64].copy_from_slice(&ell);
        assert!(VrfProof::from_bytes(&bytes).is_none());

        // l in the s position
        let mut bytes = [0u8; 96];
        bytes[64..].copy_from_slice(&ell);
        assert!(VrfProof::from_bytes(&bytes).is_none());
    }

    #[test]
    fn proof_round_trip() {
        let mut bytes = [0u8; 96];
        bytes[0] = 0x99;
        bytes[32] = 0x01;
        bytes[64] = 0x02;
        let proof = VrfProof::from_bytes(&bytes).unwrap();
        assert_eq!(proof.to_bytes()[..], bytes[..]);
    }
}
