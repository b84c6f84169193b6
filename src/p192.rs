//! NIST P-192 curve implementation.
//!
//! Short Weierstraß curve `y^2 = x^3 - 3*x + b` standardized in FIPS
//! 186-4 (also known as "secp192r1" and "prime192v1"); its standard
//! hash function is SHA-256. See the `p256` module documentation for
//! the API conventions; everything there applies here with 24-byte
//! field elements and scalars. Hashing to the curve uses the
//! simplified SWU map with z = -5.

#![allow(non_snake_case)]

use crate::field::GFp192;
use crate::backend::define_gfgen;

/// Integers modulo the curve order n (a 192-bit prime).
struct ScalarParams;
impl ScalarParams {
    const MODULUS: [u64; 3] = [
        0x146BC9B1B4D22831,
        0xFFFFFFFF99DEF836,
        0xFFFFFFFFFFFFFFFF,
    ];
    // Square roots are never computed modulo the group order.
    const QNR: u32 = 0;
}
define_gfgen!(Scalar, ScalarParams, scalarmod, true);

/// Curve constants.
struct CurveParams;
impl CurveParams {
    const B: GFp192 = GFp192::w64be([
        0x64210519E59C80E7,
        0x0FA7E9AB72243049,
        0xFEB8DEECC146B9B1,
    ]);
    const GX: GFp192 = GFp192::w64be([
        0x188DA80EB03090F6,
        0x7CBF20EB43A18800,
        0xF4FF0AFD82FF1012,
    ]);
    const GY: GFp192 = GFp192::w64be([
        0x07192B95FFC8DA78,
        0x631011ED6B24CDD5,
        0x73F977A11E794811,
    ]);
    const Z: i32 = -5;
}

crate::define_wei_common!{GFp192, Scalar, CurveParams}
crate::define_wei_kernels!{minus3, GFp192, CurveParams}
crate::define_wei_mul_plain!{GFp192, Scalar}
crate::define_wei_map_sswu!{GFp192, Scalar, CurveParams}
crate::define_wei_ecdsa!{GFp192, Scalar, CurveParams, sha2::Sha256,
    b"curvl P-192"}
crate::define_wei_schnorr!{GFp192, Scalar, CurveParams, sha2::Sha256}

// ========================================================================
