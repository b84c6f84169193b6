//! Curvl is an elliptic-curve cryptography core.
//!
//! This library implements the arithmetic and protocol layers for the
//! standard elliptic curves of three families, and exposes the usual
//! protocols over them:
//!
//!  - short Weierstraß curves (NIST P-192, P-224, P-256, P-384, P-521,
//!    and secp256k1): ECDSA (with public key recovery and DER
//!    encoding), the legacy and tagged-hash Schnorr signature schemes
//!    (including batch verification), raw ECDH, and hashing to the
//!    curve (simplified SWU or Shallue-van de Woestijne, with inverse
//!    maps);
//!
//!  - Montgomery curves (Curve25519, Curve448): the X25519 and X448
//!    key-exchange functions of RFC 7748, with key utilities and
//!    Elligator 2 public-key encodings;
//!
//!  - (twisted) Edwards curves (edwards25519, edwards448, Curve1174):
//!    EdDSA per RFC 8032 (Ed25519, Ed448, and the analogous Ed1174),
//!    with cofactor-multiplied and batch verification, and hashing to
//!    the curve through the Montgomery isomorphisms.
//!
//! Each curve lives in its own module; the per-curve types (`Point`,
//! `Scalar`, `PrivateKey`, `PublicKey`) and free functions follow the
//! same conventions everywhere. Operations that use the conventional
//! generator go through a per-curve `Curve` context, which holds the
//! precomputed generator tables (built at runtime by `Curve::new()`)
//! and an optional blinding state refreshed by `randomize()`; a
//! context is created once and reused. The `registry` (`CurveId`)
//! maps the ASCII curve identifiers to their metadata.
//!
//! Finite fields are implemented by a generic 64-bit Montgomery
//! backend (`backend` module), instantiated per modulus through the
//! `define_gfgen` macro.
//!
//! # Conventions
//!
//! All implemented functions are strictly constant-time, unless their
//! name contains `vartime` (or their documentation states otherwise);
//! variable-time functions MUST NOT receive secret data. In order to
//! avoid unwanted side-channel leaks through compiler optimization of
//! `bool` values, potentially-secret Boolean values are exchanged as
//! `u32` masks: 0xFFFFFFFF means "true", 0x00000000 means "false",
//! and no other value shall ever be used. For the same reason, the
//! `Eq`/`PartialEq` traits are not implemented; use the `equals()`
//! functions. Secret intermediates held in byte buffers are wiped
//! with `zeroize` on exit paths.
//!
//! Algebraic operations on field elements, scalars and curve points
//! use the usual operators (`+`, `-`, `*`, `/`); functions that
//! modify the object in place have a name in `set_*()`.
//!
//! # Usage
//!
//! The library is "mostly `no_std`": by default it compiles against
//! the standard library, and it can be compiled without it (the full
//! functionality is retained; contexts and scratch structures use
//! only inline arrays).

#![no_std]

#[cfg(feature = "std")]
#[macro_use]
extern crate std;

pub use rand_core::{CryptoRng, RngCore, Error as RngError};

pub mod backend;
pub mod field;
pub mod drbg;
pub(crate) mod asn1;
pub mod wei;
pub mod edwards;
pub mod p192;
pub mod p224;
pub mod p256;
pub mod p384;
pub mod p521;
pub mod secp256k1;
pub mod x25519;
pub mod x448;
pub mod ed25519;
pub mod ed448;
pub mod ed1174;

/// Hash functions pinned by the curves (for message digesting, nonce
/// generation and challenge derivation).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HashId {
    Sha256,
    Sha384,
    Sha512,
    Shake256,
}

/// Curve identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CurveId {
    P192,
    P224,
    P256,
    P384,
    P521,
    Secp256k1,
    X25519,
    X448,
    Ed25519,
    Ed448,
    Ed1174,
}

/// Static metadata for a curve.
#[derive(Clone, Copy, Debug)]
pub struct CurveInfo {
    /// Curve identifier.
    pub id: CurveId,
    /// ASCII name, as used by `CurveId::from_name()`.
    pub name: &'static str,
    /// Field element encoded length, in bytes.
    pub field_size: usize,
    /// Scalar encoded length, in bytes.
    pub scalar_size: usize,
    /// Public key / point encoded length, in bytes (compressed SEC1
    /// for Weierstraß curves, u coordinate for Montgomery curves,
    /// RFC 8032 form for Edwards curves).
    pub pubkey_size: usize,
    /// Signature or shared-secret length, in bytes (0 when the curve
    /// has no signature scheme of its own).
    pub sig_size: usize,
    /// Hash function pinned by the curve.
    pub hash: HashId,
}

static CURVES: [CurveInfo; 11] = [
    CurveInfo { id: CurveId::P192, name: "P192",
        field_size: 24, scalar_size: 24, pubkey_size: 25,
        sig_size: 48, hash: HashId::Sha256 },
    CurveInfo { id: CurveId::P224, name: "P224",
        field_size: 28, scalar_size: 28, pubkey_size: 29,
        sig_size: 56, hash: HashId::Sha256 },
    CurveInfo { id: CurveId::P256, name: "P256",
        field_size: 32, scalar_size: 32, pubkey_size: 33,
        sig_size: 64, hash: HashId::Sha256 },
    CurveInfo { id: CurveId::P384, name: "P384",
        field_size: 48, scalar_size: 48, pubkey_size: 49,
        sig_size: 96, hash: HashId::Sha384 },
    CurveInfo { id: CurveId::P521, name: "P521",
        field_size: 66, scalar_size: 66, pubkey_size: 67,
        sig_size: 132, hash: HashId::Sha512 },
    CurveInfo { id: CurveId::Secp256k1, name: "SECP256K1",
        field_size: 32, scalar_size: 32, pubkey_size: 33,
        sig_size: 64, hash: HashId::Sha256 },
    CurveInfo { id: CurveId::X25519, name: "X25519",
        field_size: 32, scalar_size: 32, pubkey_size: 32,
        sig_size: 32, hash: HashId::Sha256 },
    CurveInfo { id: CurveId::X448, name: "X448",
        field_size: 56, scalar_size: 56, pubkey_size: 56,
        sig_size: 56, hash: HashId::Sha256 },
    CurveInfo { id: CurveId::Ed25519, name: "ED25519",
        field_size: 32, scalar_size: 32, pubkey_size: 32,
        sig_size: 64, hash: HashId::Sha512 },
    CurveInfo { id: CurveId::Ed448, name: "ED448",
        field_size: 56, scalar_size: 56, pubkey_size: 57,
        sig_size: 114, hash: HashId::Shake256 },
    CurveInfo { id: CurveId::Ed1174, name: "ED1174",
        field_size: 32, scalar_size: 32, pubkey_size: 32,
        sig_size: 64, hash: HashId::Sha512 },
];

impl CurveId {

    /// Resolves an ASCII curve identifier. Unknown names yield
    /// `None`.
    pub fn from_name(name: &str) -> Option<CurveId> {
        for ci in CURVES.iter() {
            if ci.name == name {
                return Some(ci.id);
            }
        }
        None
    }

    /// Gets the metadata for this curve.
    pub fn info(self) -> &'static CurveInfo {
        for ci in CURVES.iter() {
            if ci.id == self {
                return ci;
            }
        }
        unreachable!();
    }
}
