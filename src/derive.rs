// -*- mode: rust; -*-
//
// This file is part of zed25519.
// See LICENSE for licensing information.

//! The key-derivation blind.
//!
//! Hierarchical derivation produces a child keypair from a parent by
//! multiplying both halves of the keypair by a *blind*: the child secret
//! scalar is `blind·a (mod ℓ)` and the child public point is `blind·A`,
//! so the two sides stay consistent without either needing the other's
//! private material.  The construction follows the blinding scheme used
//! by Tor's next-generation hidden service identities.
//!
//! The blind itself comes from a two-pass SHA3-512 KDF over a
//! domain-separation constant, the parent key material, and the
//! caller-chosen index:
//!
//! ```text
//! key   = SHA3-512(context ‖ key material)
//! kmac  = SHA3-512(key ‖ index)
//! blind = clamp(kmac mod ℓ)
//! ```
//!
//! Two contexts exist.  The *public* context feeds the compressed public
//! key into the KDF, so anyone holding the public key can derive the
//! matching child public key.  The *secret* context feeds the private
//! scalar and a caller secret instead; children derived this way are
//! unlinkable to the parent given only public information.

use sha3::{Digest, Sha3_512};

use crate::scalar::Scalar;

/// Domain-separation constant for publicly-derivable blinds.
pub(crate) const DERIVE_CONTEXT_PUBLIC: &[u8; 32] = b"zed25519_derivation_index_public";

/// Domain-separation constant for secret-only blinds.
pub(crate) const DERIVE_CONTEXT_SECRET: &[u8; 32] = b"zed25519_derivation_index_secret";

/// Run the two-pass KDF and reduce the result to a scalar.
fn kdf(context: &[u8; 32], key_material: &[&[u8]], index: &[u8]) -> Scalar {
    let mut hash = Sha3_512::new();
    hash.update(context);
    for part in key_material {
        hash.update(part);
    }
    let key = hash.finalize();

    let mut hash = Sha3_512::new();
    hash.update(&key);
    hash.update(index);
    let kmac = hash.finalize();

    let mut wide = [0u8; 64];
    wide.copy_from_slice(&kmac);
    Scalar::from_bytes_mod_order_wide(&wide)
}

/// Apply the Ed25519 clamp to a freshly derived blind.
///
/// Clamping keeps the blind in the same coset as ordinary secret scalars,
/// but it also zeroes the blind's low three bits at every derivation
/// level.
// TODO: quantify the distribution loss from re-clamping at each level,
// or switch to a reduction that preserves those bits.
fn clamp_blind(blind: Scalar) -> Scalar {
    Scalar::from_bits(Scalar::clamp_integer(blind.to_bytes()))
}

/// Compute the derivation blind for `index` in public mode, from a
/// compressed public key.
///
/// `Public::derive` and the skey-less mode of `Secret::derive` both use
/// this blind, which is what makes their results agree.
pub(crate) fn blind_public(public_encoding: &[u8; 32], index: &[u8]) -> Scalar {
    clamp_blind(kdf(DERIVE_CONTEXT_PUBLIC, &[public_encoding], index))
}

/// Compute the derivation blind for `index` in secret mode, from the
/// parent's private scalar and a caller-held secret.
pub(crate) fn blind_secret(scalar: &Scalar, index: &[u8], skey: &[u8]) -> Scalar {
    clamp_blind(kdf(DERIVE_CONTEXT_SECRET, &[scalar.as_bytes(), skey], index))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn context_constants_are_32_bytes() {
        assert_eq!(DERIVE_CONTEXT_PUBLIC.len(), 32);
        assert_eq!(DERIVE_CONTEXT_SECRET.len(), 32);
        assert_eq!(&DERIVE_CONTEXT_PUBLIC[..], b"zed25519_derivation_index_public");
        assert_eq!(&DERIVE_CONTEXT_SECRET[..], b"zed25519_derivation_index_secret");
    }

    #[test]
    fn blinds_are_clamped() {
        let blind = blind_public(&[7u8; 32], b"index");
        let bytes = blind.to_bytes();
        assert_eq!(bytes[0] & 0b0000_0111, 0);
        assert_eq!(bytes[31] & 0b1000_0000, 0);
        assert_eq!(bytes[31] & 0b0100_0000, 0b0100_0000);
    }

    #[test]
    fn modes_are_domain_separated() {
        let scalar = Scalar::from_bits([7u8; 32]);
        let public = blind_public(&[7u8; 32], b"index");
        let secret = blind_secret(&scalar, b"index", b"");
        assert_ne!(public.to_bytes(), secret.to_bytes());
    }

    #[test]
    fn index_changes_blind() {
        let one = blind_public(&[7u8; 32], b"child1");
        let two = blind_public(&[7u8; 32], b"child2");
        assert_ne!(one.to_bytes(), two.to_bytes());
    }
}
