// -*- mode: rust; -*-
//
// This file is part of zed25519.
// See LICENSE for licensing information.

#![deny(missing_docs)]
#![doc(html_root_url = "https://docs.rs/zed25519")]

//! # zed25519
//!
//! Three interlocking capabilities over a single Ed25519 keypair:
//!
//! * **Signatures** — deterministic EdDSA per RFC 8032, bit-compatible
//!   with standard Ed25519 implementations.
//! * **A verifiable random function** — in the spirit of VXEdDSA, but
//!   evaluated directly on the Edwards form of the curve so that
//!   ordinary Ed25519 keypairs can be used unmodified.  `vrf_eval`
//!   produces a 32-byte pseudo-random output and a 96-byte proof; any
//!   holder of the public key can check the proof and recompute the
//!   output.
//! * **Hierarchical key derivation** — child keypairs obtained by
//!   blinding the parent scalar and point with a SHA3-derived factor.
//!   Public derivation of the child public key agrees with secret
//!   derivation of the child secret key, and a secret-only mode
//!   produces children unlinkable to the parent.
//!
//! The arithmetic layers are a reimplementation of the ref10 Ed25519
//! primitives: field elements as five 51-bit limbs, scalars as five
//! 52-bit limbs with Montgomery reduction, and the extended /
//! projective / completed / Niels point models with the Hisil–Wong–
//! Carter–Dawson addition formulas.
//!
//! ## Example
//!
//! ```
//! use zed25519::{Public, Secret};
//!
//! let secret = Secret::from_seed(&[7u8; 32]).unwrap();
//! let public = secret.public();
//!
//! // Sign and verify.
//! let sig = secret.sign(b"a message");
//! assert!(public.verify(b"a message", &sig.to_bytes()));
//!
//! // Evaluate and verify the VRF.
//! let (output, proof) = secret.vrf_eval(b"an input");
//! assert_eq!(public.vrf_verify(b"an input", &proof.to_bytes()), (output, true));
//!
//! // Derive a child keypair; both sides agree.
//! let child_secret = secret.derive(b"child", None);
//! let child_public = public.derive(b"child");
//! assert_eq!(child_secret.public().encoding(), child_public.encoding());
//! ```
//!
//! ## Timing
//!
//! The field and scalar layers are constant-time on secret inputs, as is
//! the scalar multiplication used on the private scalar during signing
//! and VRF evaluation.  Three operations are variable-time and are only
//! ever applied to public data: hashing to a curve point, point
//! decompression during verification, and the double-base/multiscalar
//! multiplications on the verify side.
//!
//! ## Secret serialization
//!
//! `Secret::encoding` is the 64-byte form `scalar ‖ prefix`, **not** the
//! RFC 8032 seed-based form.  Derived secrets have no recoverable seed,
//! so the working values are serialized directly; see [`Secret`].

#[macro_use]
mod macros;

mod constants;
mod curve_models;
mod derive;
mod edwards;
mod errors;
mod field;
mod public;
mod scalar;
mod secret;
mod signature;
mod traits;
mod vrf;
mod window;

pub use crate::errors::ZedError;
pub use crate::public::{Public, PUBLIC_LENGTH};
pub use crate::secret::{Secret, SECRET_LENGTH, SEED_LENGTH};
pub use crate::signature::{Signature, SIGNATURE_LENGTH};
pub use crate::vrf::{VrfProof, VRF_OUTPUT_LENGTH, VRF_PROOF_LENGTH};
