// -*- mode: rust; -*-
//
// This file is part of zed25519.
// See LICENSE for licensing information.

//! Integration tests for VRF evaluation and verification.

use zed25519::{Public, Secret, VRF_OUTPUT_LENGTH, VRF_PROOF_LENGTH};

#[test]
fn eval_verify_round_trip() {
    let secret = Secret::from_seed(&[0u8; 32]).unwrap();
    let public = secret.public();

    let (output, proof) = secret.vrf_eval(b"hello");
    let (recomputed, valid) = public.vrf_verify(b"hello", &proof.to_bytes());

    assert!(valid);
    assert_eq!(recomputed, output);
}

#[test]
fn eval_is_deterministic() {
    let secret = Secret::from_seed(&[13u8; 32]).unwrap();
    let (out1, proof1) = secret.vrf_eval(b"input");
    let (out2, proof2) = secret.vrf_eval(b"input");
    assert_eq!(out1, out2);
    assert_eq!(proof1.to_bytes(), proof2.to_bytes());
}

#[test]
fn outputs_differ_per_input() {
    let secret = Secret::from_seed(&[13u8; 32]).unwrap();
    let (out1, _) = secret.vrf_eval(b"input one");
    let (out2, _) = secret.vrf_eval(b"input two");
    assert_ne!(out1, out2);
}

#[test]
fn outputs_differ_per_key() {
    let (out1, _) = Secret::from_seed(&[1u8; 32]).unwrap().vrf_eval(b"input");
    let (out2, _) = Secret::from_seed(&[2u8; 32]).unwrap().vrf_eval(b"input");
    assert_ne!(out1, out2);
}

#[test]
fn verify_rejects_wrong_input() {
    let secret = Secret::from_seed(&[0u8; 32]).unwrap();
    let public = secret.public();

    let (_, proof) = secret.vrf_eval(b"hello");
    let (output, valid) = public.vrf_verify(b"goodbye", &proof.to_bytes());

    assert!(!valid);
    assert_eq!(output, [0u8; VRF_OUTPUT_LENGTH]);
}

#[test]
fn verify_rejects_wrong_key() {
    let secret = Secret::from_seed(&[0u8; 32]).unwrap();
    let other = Secret::from_seed(&[1u8; 32]).unwrap();

    let (_, proof) = secret.vrf_eval(b"hello");
    let (output, valid) = other.public().vrf_verify(b"hello", &proof.to_bytes());

    assert!(!valid);
    assert_eq!(output, [0u8; VRF_OUTPUT_LENGTH]);
}

#[test]
fn verify_rejects_bit_flips_anywhere_in_proof() {
    let secret = Secret::from_seed(&[0u8; 32]).unwrap();
    let public = secret.public();
    let (_, proof) = secret.vrf_eval(b"hello");
    let proof_bytes = proof.to_bytes();

    // Flip one bit in each component: V, h, and s.
    for index in [0usize, 32, 64] {
        let mut tampered = proof_bytes;
        tampered[index] ^= 1;
        let (output, valid) = public.vrf_verify(b"hello", &tampered);
        assert!(!valid, "bit flip at byte {} accepted", index);
        assert_eq!(output, [0u8; VRF_OUTPUT_LENGTH]);
    }
}

#[test]
fn verify_rejects_bad_proof_lengths() {
    let secret = Secret::from_seed(&[0u8; 32]).unwrap();
    let public = secret.public();
    let (_, proof) = secret.vrf_eval(b"hello");
    let proof_bytes = proof.to_bytes();

    let (output, valid) = public.vrf_verify(b"hello", &proof_bytes[..VRF_PROOF_LENGTH - 1]);
    assert!(!valid);
    assert_eq!(output, [0u8; VRF_OUTPUT_LENGTH]);

    let (_, valid) = public.vrf_verify(b"hello", &[]);
    assert!(!valid);
}

#[test]
fn verify_rejects_small_order_evaluation_point() {
    let secret = Secret::from_seed(&[0u8; 32]).unwrap();
    let public = secret.public();
    let (_, proof) = secret.vrf_eval(b"hello");

    // Replace V with the identity encoding; 8·V is then the identity and
    // the subgroup check must fire.
    let mut tampered = proof.to_bytes();
    tampered[..32].copy_from_slice(&{
        let mut identity = [0u8; 32];
        identity[0] = 1;
        identity
    });
    let (output, valid) = public.vrf_verify(b"hello", &tampered);
    assert!(!valid);
    assert_eq!(output, [0u8; VRF_OUTPUT_LENGTH]);
}

#[test]
fn verify_rejects_non_canonical_proof_scalars() {
    let secret = Secret::from_seed(&[0u8; 32]).unwrap();
    let public = secret.public();
    let (_, proof) = secret.vrf_eval(b"hello");

    // l, little-endian
    let ell: [u8; 32] = [
        0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9, 0xde,
        0x14, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x10,
    ];

    let mut bad_h = proof.to_bytes();
    bad_h[32..64].copy_from_slice(&ell);
    assert!(!public.vrf_verify(b"hello", &bad_h).1);

    let mut bad_s = proof.to_bytes();
    bad_s[64..].copy_from_slice(&ell);
    assert!(!public.vrf_verify(b"hello", &bad_s).1);
}

#[test]
fn empty_input_works() {
    let secret = Secret::from_seed(&[21u8; 32]).unwrap();
    let public = secret.public();
    let (output, proof) = secret.vrf_eval(b"");
    assert_eq!(public.vrf_verify(b"", &proof.to_bytes()), (output, true));
}

#[test]
fn long_input_works() {
    let secret = Secret::from_seed(&[22u8; 32]).unwrap();
    let public = secret.public();
    let input = vec![0x5a; 4096];
    let (output, proof) = secret.vrf_eval(&input);
    assert_eq!(public.vrf_verify(&input, &proof.to_bytes()), (output, true));
}

#[test]
fn proof_round_trip_through_bytes() {
    let secret = Secret::from_seed(&[23u8; 32]).unwrap();
    let (_, proof) = secret.vrf_eval(b"wire");
    let parsed = zed25519::VrfProof::from_bytes(&proof.to_bytes()).unwrap();
    assert_eq!(parsed.to_bytes(), proof.to_bytes());
}

#[test]
fn derived_keys_evaluate_and_verify() {
    let parent = Secret::from_seed(&[31u8; 32]).unwrap();
    let child = parent.derive(b"vrf child", None);
    let child_public = Public::from_encoding(&child.public().encoding()).unwrap();

    let (output, proof) = child.vrf_eval(b"derived vrf");
    assert_eq!(
        child_public.vrf_verify(b"derived vrf", &proof.to_bytes()),
        (output, true),
    );
}
