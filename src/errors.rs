// -*- mode: rust; -*-
//
// This file is part of zed25519.
// See LICENSE for licensing information.

//! Errors which may occur when parsing keys from their byte forms.
//!
//! Only input malformation is an error: a wrong byte length for a seed,
//! secret encoding, or public encoding, or a public encoding that is not
//! a curve point.  Cryptographic rejection (a bad signature, a bad VRF
//! proof) is never an error; the verify operations report it through
//! their return values.

use core::fmt;
use core::fmt::Display;

/// Errors which may occur while constructing keys from bytes.
///
/// This error may arise due to:
///
/// * Being given bytes with a length different to what was expected.
///
/// * A problem decompressing the curve point in a `Public` encoding.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ZedError {
    /// The compressed public key was not the encoding of a curve point.
    PointDecompression,
    /// An error in the length of bytes handed to a constructor.
    ///
    /// `name` is the name of the type which returned the error, and
    /// `length` is the length in bytes which its constructor expects.
    BytesLength {
        /// The name of the type rejecting the input.
        name: &'static str,
        /// The length in bytes the constructor expects.
        length: usize,
    },
}

impl Display for ZedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ZedError::PointDecompression => write!(f, "Cannot decompress Edwards point"),
            ZedError::BytesLength { name: n, length: l } => {
                write!(f, "{} must be {} bytes in length", n, l)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ZedError {}
