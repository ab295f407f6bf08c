// -*- mode: rust; -*-
//
// This file is part of zed25519.
// See LICENSE for licensing information.

//! Integration tests for Ed25519 signing and verification.

use zed25519::{Public, Secret};

use hex_literal::hex;

mod vectors {
    use super::*;

    /// RFC 8032 test vector 1: empty message.
    #[test]
    fn rfc8032_test_vector_1() {
        let seed = hex!("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60");
        let public = hex!("d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a");
        let sig = hex!(
            "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e06522490155"
            "5fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b"
        );

        let secret = Secret::from_seed(&seed).unwrap();
        assert_eq!(secret.public().encoding(), public);
        assert_eq!(secret.sign(b"").to_bytes(), sig);
        assert!(secret.public().verify(b"", &sig));
    }

    /// RFC 8032 test vector 2: one-byte message.
    #[test]
    fn rfc8032_test_vector_2() {
        let seed = hex!("4ccd089b28ff96da9db6c346ec114e0f5b8a319f35aba624da8cf6ed4fb8a6fb");
        let public = hex!("3d4017c3e843895a92b70aa74d1b7ebc9c982ccf2ec4968cc0cd55f12af4660c");
        let msg = hex!("72");
        let sig = hex!(
            "92a009a9f0d4cab8720e820b5f642540a2b27b5416503f8fb3762223ebdb69da"
            "085ac1e43e15996e458f3613d0f11d8c387b2eaeb4302aeeb00d291612bb0c00"
        );

        let secret = Secret::from_seed(&seed).unwrap();
        assert_eq!(secret.public().encoding(), public);
        assert_eq!(secret.sign(&msg).to_bytes(), sig);
        assert!(secret.public().verify(&msg, &sig));
    }

    /// RFC 8032 test vector 3: two-byte message.
    #[test]
    fn rfc8032_test_vector_3() {
        let seed = hex!("c5aa8df43f9f837bedb7442f31dcb7b166d38535076f094b85ce3a2e0b4458f7");
        let public = hex!("fc51cd8e6218a1a38da47ed00230f0580816ed13ba3303ac5deb911548908025");
        let msg = hex!("af82");
        let sig = hex!(
            "6291d657deec24024827e69c3abe01a30ce548a284743a445e3680d7db5ac3ac"
            "18ff9b538d16f290ae67f760984dc6594a7c15e9716ed28dc027beceea1ec40a"
        );

        let secret = Secret::from_seed(&seed).unwrap();
        assert_eq!(secret.public().encoding(), public);
        assert_eq!(secret.sign(&msg).to_bytes(), sig);
        assert!(secret.public().verify(&msg, &sig));
    }
}

#[test]
fn sign_verify_round_trip() {
    let secret = Secret::from_seed(&[0u8; 32]).unwrap();
    let public = secret.public();
    let sig = secret.sign(b"test message");
    assert!(public.verify(b"test message", &sig.to_bytes()));
}

#[test]
fn verify_rejects_different_message() {
    let secret = Secret::from_seed(&[0u8; 32]).unwrap();
    let public = secret.public();
    let sig = secret.sign(b"test message");
    assert!(!public.verify(b"test messagf", &sig.to_bytes()));
    assert!(!public.verify(b"", &sig.to_bytes()));
}

#[test]
fn verify_rejects_different_key() {
    let secret = Secret::from_seed(&[0u8; 32]).unwrap();
    let other = Secret::from_seed(&[1u8; 32]).unwrap();
    let sig = secret.sign(b"test message");
    assert!(!other.public().verify(b"test message", &sig.to_bytes()));
}

#[test]
fn signing_is_deterministic() {
    let secret = Secret::from_seed(&[3u8; 32]).unwrap();
    let one = secret.sign(b"determinism");
    let two = secret.sign(b"determinism");
    assert_eq!(one.to_bytes(), two.to_bytes());
}

#[test]
fn verify_rejects_bad_lengths() {
    let secret = Secret::from_seed(&[0u8; 32]).unwrap();
    let public = secret.public();
    let sig = secret.sign(b"msg").to_bytes();
    assert!(!public.verify(b"msg", &sig[..63]));
    let mut long = [0u8; 65];
    long[..64].copy_from_slice(&sig);
    assert!(!public.verify(b"msg", &long));
    assert!(!public.verify(b"msg", &[]));
}

#[test]
fn verify_rejects_high_bits_in_s() {
    let secret = Secret::from_seed(&[0u8; 32]).unwrap();
    let public = secret.public();
    let sig = secret.sign(b"msg").to_bytes();

    // Any of the top three bits of sig[63] set must be rejected.
    for bit in [0b0010_0000u8, 0b0100_0000, 0b1000_0000] {
        let mut tampered = sig;
        tampered[63] |= bit;
        assert!(!public.verify(b"msg", &tampered));
    }
}

#[test]
fn verify_rejects_s_equal_to_group_order() {
    let secret = Secret::from_seed(&[0u8; 32]).unwrap();
    let public = secret.public();

    // A signature whose s component is exactly l.  The encoding passes
    // the top-bits pre-filter (l < 2^253) but fails the canonical-range
    // check.
    let mut sig = secret.sign(b"msg").to_bytes();
    let ell = hex!("edd3f55c1a631258d69cf7a2def9de1400000000000000000000000000000010");
    sig[32..].copy_from_slice(&ell);
    assert!(!public.verify(b"msg", &sig));
}

#[test]
fn verify_rejects_tampered_r() {
    let secret = Secret::from_seed(&[0u8; 32]).unwrap();
    let public = secret.public();
    let mut sig = secret.sign(b"msg").to_bytes();
    sig[0] ^= 1;
    assert!(!public.verify(b"msg", &sig));
}

#[test]
fn public_encoding_round_trip() {
    let secret = Secret::from_seed(&[5u8; 32]).unwrap();
    let public = secret.public();
    let restored = Public::from_encoding(&public.encoding()).unwrap();
    assert_eq!(restored.encoding(), public.encoding());
}

#[test]
fn secret_encoding_round_trip() {
    let secret = Secret::from_seed(&[5u8; 32]).unwrap();
    let restored = Secret::from_encoding(&secret.encoding()).unwrap();
    assert_eq!(restored.encoding(), secret.encoding());

    // The restored key signs identically.
    assert_eq!(
        restored.sign(b"round trip").to_bytes(),
        secret.sign(b"round trip").to_bytes(),
    );
}

#[test]
fn generated_keys_sign_and_verify() {
    let mut csprng = rand::rngs::OsRng;
    let secret = Secret::generate(&mut csprng);
    let public = secret.public();
    let sig = secret.sign(b"generated");
    assert!(public.verify(b"generated", &sig.to_bytes()));
}

#[test]
fn signatures_verify_across_encoding_round_trips() {
    let secret = Secret::from_seed(&[11u8; 32]).unwrap();
    let sig = secret.sign(b"wire trip");

    // Parse the signature back through the byte form and verify with a
    // re-parsed public key.
    let public = Public::from_encoding(&secret.public().encoding()).unwrap();
    assert!(public.verify(b"wire trip", &sig.to_bytes()));
}

#[cfg(feature = "serde")]
mod serde {
    use super::*;

    #[test]
    fn serde_cbor_public_round_trip() {
        let secret = Secret::from_seed(&[19u8; 32]).unwrap();
        let public = secret.public();
        let output = serde_cbor::to_vec(&public).unwrap();
        let parsed: Public = serde_cbor::from_slice(&output).unwrap();
        assert_eq!(parsed.encoding(), public.encoding());
    }

    #[test]
    fn serde_cbor_secret_round_trip() {
        let secret = Secret::from_seed(&[19u8; 32]).unwrap();
        let output = serde_cbor::to_vec(&secret).unwrap();
        let parsed: Secret = serde_cbor::from_slice(&output).unwrap();
        assert_eq!(parsed.encoding()[..], secret.encoding()[..]);
    }

    #[test]
    fn serde_cbor_decode_invalid_public_fails() {
        let secret = Secret::from_seed(&[19u8; 32]).unwrap();
        let mut output = serde_cbor::to_vec(&secret.public()).unwrap();
        // CBOR has two bytes of overhead for a 32-byte string.  Set the
        // low byte of the compressed point to 2 (not a curve point).
        output[2] = 2;
        output[3..34].fill(0);
        let parsed: Result<Public, _> = serde_cbor::from_slice(&output);
        assert!(parsed.is_err());
    }
}
