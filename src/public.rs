// -*- mode: rust; -*-
//
// This file is part of zed25519.
// See LICENSE for licensing information.

//! Ed25519 public keys: signature verification, VRF verification, and
//! public derivation.

use core::fmt::Debug;

use sha2::{Digest, Sha512};

use crate::derive;
use crate::edwards::{vartime, CompressedEdwardsY, ExtendedPoint};
use crate::errors::ZedError;
use crate::scalar::Scalar;
use crate::signature::Signature;
use crate::vrf::{self, VrfProof, VRF_OUTPUT_LENGTH};

/// The length of a canonical public key encoding, in bytes.
pub const PUBLIC_LENGTH: usize = 32;

/// The working form of an Ed25519 public key.
///
/// Holds the curve point `A` in extended coordinates together with its
/// canonical compressed encoding, which every protocol hash consumes.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Public {
    pub(crate) compressed: CompressedEdwardsY,
    pub(crate) point: ExtendedPoint,
}

impl Debug for Public {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        write!(f, "Public({:?})", self.compressed)
    }
}

impl Public {
    /// Build a `Public` from the canonical 32-byte compressed encoding,
    /// which is the form accepted by Ed25519 applications and protocols.
    ///
    /// # Returns
    ///
    /// A `Result` whose okay value is a `Public`, or whose error value is
    /// a `ZedError` describing the failure: a wrong input length, or an
    /// encoding that is not a curve point.
    pub fn from_encoding(bytes: &[u8]) -> Result<Public, ZedError> {
        if bytes.len() != PUBLIC_LENGTH {
            return Err(ZedError::BytesLength {
                name: "Public",
                length: PUBLIC_LENGTH,
            });
        }

        let mut compressed_bytes = [0u8; 32];
        compressed_bytes.copy_from_slice(bytes);

        let point = CompressedEdwardsY(compressed_bytes)
            .decompress()
            .ok_or(ZedError::PointDecompression)?;

        // Re-compress rather than caching the input bytes: every protocol
        // hash consumes compress(A), and compression canonicalizes inputs
        // whose field encoding was not reduced.
        Ok(Public {
            compressed: point.compress(),
            point,
        })
    }

    /// Get the canonical 32-byte compressed encoding of this public key.
    pub fn encoding(&self) -> [u8; PUBLIC_LENGTH] {
        self.compressed.to_bytes()
    }

    /// Check whether `signature` is a valid Ed25519 signature on
    /// `message` under this public key, proving it was produced by a
    /// party holding the corresponding secret key.
    ///
    /// The signature is rejected if it is not 64 bytes, if any of the
    /// top three bits of its final byte are set, if its `R` component
    /// does not decompress, or if its `s` component is not a canonical
    /// scalar; otherwise the verification equation `s·B = R + k·A` is
    /// checked.  Cofactor multiplication is not applied; this is the
    /// strict RFC 8032 equation without the small-order rejection step
    /// that batch verifiers need.
    #[allow(non_snake_case)]
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        let signature = match Signature::from_bytes(signature) {
            Some(signature) => signature,
            None => return false,
        };

        let R = match signature.R.decompress() {
            Some(point) => point,
            None => return false,
        };

        // k = SHA-512(R ‖ A ‖ m) mod l
        let mut h = Sha512::new();
        h.update(signature.R.as_bytes());
        h.update(self.compressed.as_bytes());
        h.update(message);
        let k = Scalar::from_hash(h);

        // s·B = R + k·A  <=>  R = s·B - k·A.
        // Inputs here are public, so the variable-time double-base
        // multiplication is fine.
        let minus_k = -&k;
        let R_check = vartime::double_scalar_mul_basepoint(&minus_k, &self.point, &signature.s);

        R_check == R
    }

    /// Verify a 96-byte VRF proof for `input`, recomputing the 32-byte
    /// output.
    ///
    /// # Returns
    ///
    /// `(output, true)` if the proof attests that `output` is the VRF
    /// evaluation of `input` under the secret key matching this public
    /// key; `([0u8; 32], false)` otherwise.
    ///
    /// The proof is rejected if it is not 96 bytes, if its evaluation
    /// point does not decompress, if either scalar component is not
    /// canonical, if any of `8·A`, `8·V`, `8·B_v` is the identity, or if
    /// the recomputed challenge does not match.
    #[allow(non_snake_case)]
    pub fn vrf_verify(&self, input: &[u8], proof: &[u8]) -> ([u8; VRF_OUTPUT_LENGTH], bool) {
        // all-zeroes result for validation failure
        let zeros = [0u8; VRF_OUTPUT_LENGTH];

        let proof = match VrfProof::from_bytes(proof) {
            Some(proof) => proof,
            None => return (zeros, false),
        };

        let V = match proof.V.decompress() {
            Some(point) => point,
            None => return (zeros, false),
        };

        // B_v = hash-to-point(A ‖ input)
        let mut point_input = Vec::with_capacity(32 + input.len());
        point_input.extend_from_slice(self.compressed.as_bytes());
        point_input.extend_from_slice(input);
        let B_v = vrf::hash_to_point_vartime(&point_input);

        // Subgroup checks: none of 8·A, 8·V, 8·B_v may be the identity.
        if self.point.is_small_order() || V.is_small_order() || B_v.is_small_order() {
            return (zeros, false);
        }

        // R = s·B - h·A
        let minus_h = -&proof.h;
        let R = vartime::double_scalar_mul_basepoint(&minus_h, &self.point, &proof.s);

        // R_v = s·B_v - h·V
        let R_v = vartime::multiscalar_mul(&[proof.s, minus_h], &[B_v, V]);

        // h' = SHA-512(A ‖ V ‖ R ‖ R_v ‖ input) mod l
        let mut hash = Sha512::new();
        hash.update(self.compressed.as_bytes());
        hash.update(proof.V.as_bytes());
        hash.update(R.compress().as_bytes());
        hash.update(R_v.compress().as_bytes());
        hash.update(input);
        let h_check = Scalar::from_hash(hash);

        if h_check != proof.h {
            return (zeros, false);
        }

        (vrf::vrf_output(&V), true)
    }

    /// Derive a child public key for `index`.
    ///
    /// The derivation blind is computed from this key's encoding, so any
    /// holder of the public key derives the same child; the result
    /// matches the skey-less mode of [`crate::Secret::derive`] on the
    /// corresponding secret key.
    pub fn derive(&self, index: &[u8]) -> Public {
        let blind = derive::blind_public(self.compressed.as_bytes(), index);

        // A' = blind·A
        let point = &blind * &self.point;
        Public {
            compressed: point.compress(),
            point,
        }
    }
}

#[cfg(feature = "serde")]
use serde::de::Error as SerdeError;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[cfg(feature = "serde")]
impl Serialize for Public {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bytes(self.compressed.as_bytes())
    }
}

#[cfg(feature = "serde")]
impl<'d> Deserialize<'d> for Public {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'d>,
    {
        struct PublicVisitor;

        impl<'d> serde::de::Visitor<'d> for PublicVisitor {
            type Value = Public;

            fn expecting(&self, formatter: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                formatter.write_str("a 32-byte compressed Ed25519 public key")
            }

            fn visit_bytes<E>(self, bytes: &[u8]) -> Result<Public, E>
            where
                E: SerdeError,
            {
                Public::from_encoding(bytes).map_err(SerdeError::custom)
            }
        }

        deserializer.deserialize_bytes(PublicVisitor)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bad_encoding_lengths_rejected() {
        for len in [0usize, 16, 31, 33, 64] {
            let bytes = vec![0u8; len];
            assert_eq!(
                Public::from_encoding(&bytes).unwrap_err(),
                ZedError::BytesLength {
                    name: "Public",
                    length: PUBLIC_LENGTH,
                },
            );
        }
    }

    #[test]
    fn non_point_encoding_rejected() {
        // y = 2 is not the y-coordinate of any curve point.
        let mut bytes = [0u8; 32];
        bytes[0] = 2;
        assert_eq!(
            Public::from_encoding(&bytes).unwrap_err(),
            ZedError::PointDecompression,
        );
    }

    #[test]
    fn encoding_round_trip() {
        let secret = crate::Secret::from_seed(&[9u8; 32]).unwrap();
        let public = secret.public();
        let restored = Public::from_encoding(&public.encoding()).unwrap();
        assert_eq!(public.encoding(), restored.encoding());
    }
}
