// -*- mode: rust; -*-
//
// This file is part of zed25519.
// See LICENSE for licensing information.

//! Ed25519 secret keys: signing, VRF evaluation, and derivation.

use core::fmt::Debug;

use rand_core::{CryptoRng, RngCore};

use sha2::{Digest, Sha512};

use zeroize::Zeroize;

use crate::derive;
use crate::edwards::ExtendedPoint;
use crate::errors::ZedError;
use crate::public::Public;
use crate::scalar::Scalar;
use crate::signature::Signature;
use crate::vrf::{self, VrfProof, VRF_OUTPUT_LENGTH};

/// The length of a seed, in bytes.
pub const SEED_LENGTH: usize = 32;

/// The length of the internal secret encoding, in bytes.
pub const SECRET_LENGTH: usize = 64;

/// The working form of an Ed25519 secret key: the private scalar `a` and
/// the private prefix `p`.
///
/// The scalar is the piece of data which allows valid signatures to be
/// produced for the corresponding public key.  The prefix is not strictly
/// needed to produce valid signatures, but drives the secret
/// deterministic selection of nonces; leaking it could allow an
/// adversary to recover the private scalar from any valid signature.
///
/// # Serialization
///
/// The 64-byte encoding of a `Secret` is `scalar ‖ prefix`.  This is
/// **not** the RFC 8032 form, which stores either the 32-byte seed or the
/// seed concatenated with the public key.  Storing the working values
/// directly is what makes derived keys serializable at all: a derived
/// key's scalar is the product of a blind and its parent's scalar, and no
/// seed generating it is feasible to find.
///
/// Instances are overwritten with zeroes when they fall out of scope.
pub struct Secret {
    pub(crate) scalar: Scalar,
    pub(crate) prefix: [u8; 32],
}

impl Drop for Secret {
    fn drop(&mut self) {
        self.scalar.zeroize();
        self.prefix.zeroize();
    }
}

impl Debug for Secret {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        write!(f, "Secret{{ scalar: {:?}, prefix: {:?} }}", &self.scalar, &self.prefix)
    }
}

impl Secret {
    /// Derive a `Secret` from a 32-byte seed by the original Ed25519
    /// key-expansion algorithm, for full compatibility with other
    /// Ed25519 implementations.
    ///
    /// A 64-byte input is also accepted, in which case its first 32
    /// bytes are used as the seed.
    ///
    /// The seed is expanded with SHA-512; the lower half becomes the
    /// private scalar after clamping (clear the low three bits, clear
    /// the top bit, set bit 254) and the upper half becomes the prefix.
    ///
    /// # Returns
    ///
    /// A `Result` whose okay value is a `Secret`, or whose error value is
    /// a `ZedError` describing the invalid input length.
    pub fn from_seed(seed: &[u8]) -> Result<Secret, ZedError> {
        if seed.len() != SEED_LENGTH && seed.len() != SECRET_LENGTH {
            return Err(ZedError::BytesLength {
                name: "Secret seed",
                length: SEED_LENGTH,
            });
        }

        let mut seed_bytes = [0u8; SEED_LENGTH];
        seed_bytes.copy_from_slice(&seed[..SEED_LENGTH]);

        Ok(Secret::expand(&seed_bytes))
    }

    /// Expand a 32-byte seed into the working scalar and prefix.
    fn expand(seed: &[u8; SEED_LENGTH]) -> Secret {
        let digest = Sha512::digest(seed);

        let mut lower = [0u8; 32];
        let mut upper = [0u8; 32];
        lower.copy_from_slice(&digest[..32]);
        upper.copy_from_slice(&digest[32..]);

        Secret {
            scalar: Scalar::from_bits(Scalar::clamp_integer(lower)),
            prefix: upper,
        }
    }

    /// Build a `Secret` from its 64-byte internal encoding
    /// `scalar ‖ prefix` (see the type-level docs: this is not the
    /// RFC 8032 form).
    ///
    /// The scalar half is loaded as a 255-bit integer; no further
    /// validation is applied.
    pub fn from_encoding(bytes: &[u8]) -> Result<Secret, ZedError> {
        if bytes.len() != SECRET_LENGTH {
            return Err(ZedError::BytesLength {
                name: "Secret",
                length: SECRET_LENGTH,
            });
        }

        let mut scalar = [0u8; 32];
        let mut prefix = [0u8; 32];
        scalar.copy_from_slice(&bytes[..32]);
        prefix.copy_from_slice(&bytes[32..]);

        Ok(Secret {
            scalar: Scalar::from_bits(scalar),
            prefix,
        })
    }

    /// Generate a `Secret` from a fresh random seed drawn from `csprng`.
    pub fn generate<T>(csprng: &mut T) -> Secret
    where
        T: CryptoRng + RngCore,
    {
        let mut seed = [0u8; SEED_LENGTH];
        csprng.fill_bytes(&mut seed);

        let secret = Secret::expand(&seed);
        seed.zeroize();
        secret
    }

    /// Get the 64-byte internal encoding `scalar ‖ prefix` of this
    /// secret key.
    pub fn encoding(&self) -> [u8; SECRET_LENGTH] {
        let mut bytes = [0u8; SECRET_LENGTH];
        bytes[..32].copy_from_slice(self.scalar.as_bytes());
        bytes[32..].copy_from_slice(&self.prefix);
        bytes
    }

    /// Create the corresponding public key for this secret key, by
    /// fixed-base multiplication `A = a·B`.
    pub fn public(&self) -> Public {
        let point = ExtendedPoint::mul_base(&self.scalar);
        Public {
            compressed: point.compress(),
            point,
        }
    }

    /// Produce a standard Ed25519 signature on `message`.
    ///
    /// Signing is deterministic per RFC 8032: the nonce is derived from
    /// the prefix and the message, and no randomness is drawn.  The same
    /// key and message always produce byte-identical signatures.
    #[allow(non_snake_case)]
    pub fn sign(&self, message: &[u8]) -> Signature {
        let A_s = self.public().compressed;

        // r = SHA-512(p ‖ m) mod l
        let mut h = Sha512::new();
        h.update(self.prefix);
        h.update(message);
        let r = Scalar::from_hash(h);

        // R = r·B
        let R = ExtendedPoint::mul_base(&r).compress();

        // k = SHA-512(R ‖ A ‖ m) mod l
        let mut h = Sha512::new();
        h.update(R.as_bytes());
        h.update(A_s.as_bytes());
        h.update(message);
        let k = Scalar::from_hash(h);

        // s = (k·a + r) mod l
        let s = &(&k * &self.scalar) + &r;

        Signature { R, s }
    }

    /// Evaluate the VRF on an input of arbitrary length, producing a
    /// 32-byte deterministic pseudo-random output together with a
    /// 96-byte proof that the output is correct for this key and input.
    ///
    /// The output cannot be predicted by any party who does not hold
    /// this secret key, but given the proof it can be checked by any
    /// party holding the corresponding public key, via
    /// [`Public::vrf_verify`].
    ///
    /// Both multiplications involving the private scalar use the
    /// constant-time variable-base multiplication; the variable-time
    /// paths are confined to verification, where every input is public.
    #[allow(non_snake_case)]
    pub fn vrf_eval(&self, input: &[u8]) -> ([u8; VRF_OUTPUT_LENGTH], VrfProof) {
        let A_s = self.public().compressed;

        // B_v = hash-to-point(A ‖ input)
        let mut point_input = Vec::with_capacity(32 + input.len());
        point_input.extend_from_slice(A_s.as_bytes());
        point_input.extend_from_slice(input);
        let B_v = vrf::hash_to_point_vartime(&point_input);

        // V = a·B_v
        let V = &self.scalar * &B_v;
        let V_s = V.compress();

        // r = SHA-512(p ‖ V) mod l
        let mut h = Sha512::new();
        h.update(self.prefix);
        h.update(V_s.as_bytes());
        let r = Scalar::from_hash(h);

        // R = r·B, R_v = r·B_v
        let R_s = ExtendedPoint::mul_base(&r).compress();
        let R_vs = (&r * &B_v).compress();

        // h = SHA-512(A ‖ V ‖ R ‖ R_v ‖ input) mod l
        let mut hash = Sha512::new();
        hash.update(A_s.as_bytes());
        hash.update(V_s.as_bytes());
        hash.update(R_s.as_bytes());
        hash.update(R_vs.as_bytes());
        hash.update(input);
        let h = Scalar::from_hash(hash);

        // s = (h·a + r) mod l
        let s = &(&h * &self.scalar) + &r;

        let output = vrf::vrf_output(&V);

        (output, VrfProof { V: V_s, h, s })
    }

    /// Derive a child secret key for `index`.
    ///
    /// Without `skey`, the derivation blind is computed from this key's
    /// *public* encoding, consistently with [`Public::derive`]:
    ///
    /// ```
    /// # use zed25519::Secret;
    /// let parent = Secret::from_seed(&[7u8; 32]).unwrap();
    /// let child_public = parent.derive(b"child", None).public();
    /// assert_eq!(
    ///     child_public.encoding(),
    ///     parent.public().derive(b"child").encoding(),
    /// );
    /// ```
    ///
    /// With `skey`, the blind is computed from the private scalar and
    /// `skey` instead, and the child's public key is unlinkable to the
    /// parent's given only public information.
    ///
    /// The child scalar is `blind·a (mod ℓ)`, with the blind clamped
    /// before the multiplication; clamping zeroes the blind's low three
    /// bits at every level (see `derive` module docs).  The child prefix
    /// is `SHA-512(p ‖ p)[0..32]`, the parent prefix hashed twice over;
    /// derived keys therefore have no recoverable seed and survive only
    /// in the 64-byte internal encoding.
    pub fn derive(&self, index: &[u8], skey: Option<&[u8]>) -> Secret {
        let blind = match skey {
            Some(skey) => derive::blind_secret(&self.scalar, index, skey),
            None => derive::blind_public(self.public().compressed.as_bytes(), index),
        };

        // a' = blind·a (mod l)
        let scalar = &blind * &self.scalar;

        // p' = SHA-512(p ‖ p)[0..32]
        let mut h = Sha512::new();
        h.update(self.prefix);
        h.update(self.prefix);
        let digest = h.finalize();
        let mut prefix = [0u8; 32];
        prefix.copy_from_slice(&digest[..32]);

        Secret { scalar, prefix }
    }
}

#[cfg(feature = "serde")]
use serde::de::Error as SerdeError;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[cfg(feature = "serde")]
impl Serialize for Secret {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bytes(&self.encoding())
    }
}

#[cfg(feature = "serde")]
impl<'d> Deserialize<'d> for Secret {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'d>,
    {
        struct SecretVisitor;

        impl<'d> serde::de::Visitor<'d> for SecretVisitor {
            type Value = Secret;

            fn expecting(&self, formatter: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                formatter.write_str("a 64-byte scalar-and-prefix secret key")
            }

            fn visit_bytes<E>(self, bytes: &[u8]) -> Result<Secret, E>
            where
                E: SerdeError,
            {
                Secret::from_encoding(bytes).map_err(SerdeError::custom)
            }
        }

        deserializer.deserialize_bytes(SecretVisitor)
    }
}
