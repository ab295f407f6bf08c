// -*- mode: rust; -*-
//
// This file is part of zed25519.
// See LICENSE for licensing information.

use criterion::{criterion_group, criterion_main, Criterion};

use zed25519::Secret;

fn sign(c: &mut Criterion) {
    let secret = Secret::from_seed(&[0u8; 32]).unwrap();
    let msg = b"benchmark message";

    c.bench_function("Ed25519 signing", move |b| b.iter(|| secret.sign(msg)));
}

fn verify(c: &mut Criterion) {
    let secret = Secret::from_seed(&[0u8; 32]).unwrap();
    let public = secret.public();
    let msg = b"benchmark message";
    let sig = secret.sign(msg).to_bytes();

    c.bench_function("Ed25519 signature verification", move |b| {
        b.iter(|| public.verify(msg, &sig))
    });
}

fn vrf_eval(c: &mut Criterion) {
    let secret = Secret::from_seed(&[0u8; 32]).unwrap();
    let input = b"benchmark input";

    c.bench_function("VRF evaluation", move |b| b.iter(|| secret.vrf_eval(input)));
}

fn vrf_verify(c: &mut Criterion) {
    let secret = Secret::from_seed(&[0u8; 32]).unwrap();
    let public = secret.public();
    let input = b"benchmark input";
    let (_, proof) = secret.vrf_eval(input);
    let proof = proof.to_bytes();

    c.bench_function("VRF verification", move |b| {
        b.iter(|| public.vrf_verify(input, &proof))
    });
}

fn derive(c: &mut Criterion) {
    let secret = Secret::from_seed(&[0u8; 32]).unwrap();
    let public = secret.public();

    c.bench_function("public key derivation", move |b| {
        b.iter(|| public.derive(b"bench child"))
    });
    c.bench_function("secret key derivation", move |b| {
        b.iter(|| secret.derive(b"bench child", None))
    });
}

criterion_group! {
    name = zed25519_benches;
    config = Criterion::default();
    targets = sign, verify, vrf_eval, vrf_verify, derive,
}
criterion_main!(zed25519_benches);
