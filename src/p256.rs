//! NIST P-256 curve implementation.
//!
//! This module implements generic group operations on the NIST P-256
//! elliptic curve, a short Weierstraß curve with equation `y^2 = x^3 -
//! 3*x + b` for a given constant `b`. This curve is standardized in
//! FIPS 186-4 (and in SEC 2 and ANSI X9.62), and also known under the
//! names "secp256r1" and "prime256v1". Its standard hash function is
//! SHA-256.
//!
//! The curve has prime order. "Scalars" are integers modulo that
//! order, implemented by the `Scalar` structure; curve points are
//! represented by the `Point` structure, with the usual arithmetic
//! operators. All operations on points are complete and constant-time,
//! except for the functions whose name includes `vartime`, which must
//! only be used on public data.
//!
//! The `Curve` structure holds the precomputed generator tables and
//! the blinding state; it must be instantiated (once) for key
//! generation, signing, and verification. `PrivateKey` and `PublicKey`
//! implement ECDSA (deterministic signatures through HMAC-DRBG seeded
//! with the private scalar and the reduced message, which makes them
//! match RFC 6979 up to the low-S normalization), public key recovery,
//! DER encoding/decoding (strict and lax), and raw ECDH. The Schnorr
//! signature variants (legacy and tagged-hash) are available as well,
//! since the field modulus is equal to 3 modulo 4.
//!
//! Points can be encoded in compressed (33 bytes) or uncompressed (65
//! bytes) formats; the hybrid format (first byte 0x06 or 0x07) is
//! accepted on decoding. The nominal encoding of the point-at-infinity
//! is a single byte of value 0x00. Hashing to the curve uses the
//! simplified SWU map with z = -10.

// Projective/fractional coordinates traditionally use uppercase letters,
// using lowercase only for affine coordinates.
#![allow(non_snake_case)]

use crate::field::GFp256;
use crate::backend::define_gfgen;

/// Integers modulo the curve order n (a 256-bit prime).
struct ScalarParams;
impl ScalarParams {
    const MODULUS: [u64; 4] = [
        0xF3B9CAC2FC632551,
        0xBCE6FAADA7179E84,
        0xFFFFFFFFFFFFFFFF,
        0xFFFFFFFF00000000,
    ];
    // Square roots are never computed modulo the group order.
    const QNR: u32 = 0;
}
define_gfgen!(Scalar, ScalarParams, scalarmod, true);

/// Curve constants.
struct CurveParams;
impl CurveParams {
    /// Curve equation parameter b.
    const B: GFp256 = GFp256::w64be([
        0x5AC635D8AA3A93E7,
        0xB3EBBD55769886BC,
        0x651D06B0CC53B0F6,
        0x3BCE3C3E27D2604B,
    ]);

    /// Generator coordinates.
    const GX: GFp256 = GFp256::w64be([
        0x6B17D1F2E12C4247,
        0xF8BCE6E563A440F2,
        0x77037D812DEB33A0,
        0xF4A13945D898C296,
    ]);
    const GY: GFp256 = GFp256::w64be([
        0x4FE342E2FE1A7F9B,
        0x8EE7EB4A7C0F9E16,
        0x2BCE33576B315ECE,
        0xCBB6406837BF51F5,
    ]);

    /// Map parameter (a non-square in the field).
    const Z: i32 = -10;
}

crate::define_wei_common!{GFp256, Scalar, CurveParams}
crate::define_wei_kernels!{minus3, GFp256, CurveParams}
crate::define_wei_mul_plain!{GFp256, Scalar}
crate::define_wei_map_sswu!{GFp256, Scalar, CurveParams}
crate::define_wei_ecdsa!{GFp256, Scalar, CurveParams, sha2::Sha256,
    b"curvl P-256"}
crate::define_wei_schnorr!{GFp256, Scalar, CurveParams, sha2::Sha256}

// ========================================================================
