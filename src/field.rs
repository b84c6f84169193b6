//! Finite fields.
//!
//! This module defines the base fields of all supported curves, as
//! instantiations of the generic backend (`define_gfgen`). Each field
//! is described by a parameter structure providing the modulus (as
//! 64-bit limbs in little-endian order) and a small quadratic
//! non-residue (`QNR`, used by square root extraction when the modulus
//! is equal to 1 modulo 8, and by the field test suite).
//!
//! Scalar fields (integers modulo a group order) are defined in the
//! relevant curve modules, with the same macro.

use crate::backend::define_gfgen;
use crate::backend::define_gfgen_tests;

/// Field for curve P-192: integers modulo p = 2^192 - 2^64 - 1.
pub struct GFp192Params;
impl GFp192Params {
    const MODULUS: [u64; 3] = [
        0xFFFFFFFFFFFFFFFF,
        0xFFFFFFFFFFFFFFFE,
        0xFFFFFFFFFFFFFFFF,
    ];
    const QNR: u32 = 11;
}
define_gfgen!(GFp192, GFp192Params, gfp192mod, false);
define_gfgen_tests!(GFp192, 11, tests_gfp192mod);

/// Field for curve P-224: integers modulo p = 2^224 - 2^96 + 1.
///
/// This is the only supported field with p = 1 mod 8; square roots
/// use Tonelli-Shanks with the non-residue 11.
pub struct GFp224Params;
impl GFp224Params {
    const MODULUS: [u64; 4] = [
        0x0000000000000001,
        0xFFFFFFFF00000000,
        0xFFFFFFFFFFFFFFFF,
        0x00000000FFFFFFFF,
    ];
    const QNR: u32 = 11;
}
define_gfgen!(GFp224, GFp224Params, gfp224mod, false);
define_gfgen_tests!(GFp224, 11, tests_gfp224mod);

/// Field for curve P-256: integers modulo p = 2^256 - 2^224 + 2^192
/// + 2^96 - 1.
pub struct GFp256Params;
impl GFp256Params {
    const MODULUS: [u64; 4] = [
        0xFFFFFFFFFFFFFFFF,
        0x00000000FFFFFFFF,
        0x0000000000000000,
        0xFFFFFFFF00000001,
    ];
    const QNR: u32 = 3;
}
define_gfgen!(GFp256, GFp256Params, gfp256mod, false);
define_gfgen_tests!(GFp256, 3, tests_gfp256mod);

/// Field for curve P-384: integers modulo p = 2^384 - 2^128 - 2^96
/// + 2^32 - 1.
pub struct GFp384Params;
impl GFp384Params {
    const MODULUS: [u64; 6] = [
        0x00000000FFFFFFFF,
        0xFFFFFFFF00000000,
        0xFFFFFFFFFFFFFFFE,
        0xFFFFFFFFFFFFFFFF,
        0xFFFFFFFFFFFFFFFF,
        0xFFFFFFFFFFFFFFFF,
    ];
    const QNR: u32 = 19;
}
define_gfgen!(GFp384, GFp384Params, gfp384mod, false);
define_gfgen_tests!(GFp384, 19, tests_gfp384mod);

/// Field for curve P-521: integers modulo p = 2^521 - 1.
pub struct GFp521Params;
impl GFp521Params {
    const MODULUS: [u64; 9] = [
        0xFFFFFFFFFFFFFFFF,
        0xFFFFFFFFFFFFFFFF,
        0xFFFFFFFFFFFFFFFF,
        0xFFFFFFFFFFFFFFFF,
        0xFFFFFFFFFFFFFFFF,
        0xFFFFFFFFFFFFFFFF,
        0xFFFFFFFFFFFFFFFF,
        0xFFFFFFFFFFFFFFFF,
        0x00000000000001FF,
    ];
    const QNR: u32 = 3;
}
define_gfgen!(GFp521, GFp521Params, gfp521mod, false);
define_gfgen_tests!(GFp521, 3, tests_gfp521mod);

/// Field for curve secp256k1: integers modulo p = 2^256 - 2^32 - 977.
pub struct GFsecp256k1Params;
impl GFsecp256k1Params {
    const MODULUS: [u64; 4] = [
        0xFFFFFFFEFFFFFC2F,
        0xFFFFFFFFFFFFFFFF,
        0xFFFFFFFFFFFFFFFF,
        0xFFFFFFFFFFFFFFFF,
    ];
    const QNR: u32 = 3;
}
define_gfgen!(GFsecp256k1, GFsecp256k1Params, gfsecp256k1mod, false);
define_gfgen_tests!(GFsecp256k1, 3, tests_gfsecp256k1mod);

/// Field for Curve25519/Edwards25519: integers modulo p = 2^255 - 19.
pub struct GF25519Params;
impl GF25519Params {
    const MODULUS: [u64; 4] = [
        0xFFFFFFFFFFFFFFED,
        0xFFFFFFFFFFFFFFFF,
        0xFFFFFFFFFFFFFFFF,
        0x7FFFFFFFFFFFFFFF,
    ];
    const QNR: u32 = 2;
}
define_gfgen!(GF25519, GF25519Params, gf25519mod, false);
define_gfgen_tests!(GF25519, 2, tests_gf25519mod);

/// Field for Curve448/Edwards448: integers modulo p = 2^448 - 2^224 - 1.
pub struct GF448Params;
impl GF448Params {
    const MODULUS: [u64; 7] = [
        0xFFFFFFFFFFFFFFFF,
        0xFFFFFFFFFFFFFFFF,
        0xFFFFFFFFFFFFFFFF,
        0xFFFFFFFEFFFFFFFF,
        0xFFFFFFFFFFFFFFFF,
        0xFFFFFFFFFFFFFFFF,
        0xFFFFFFFFFFFFFFFF,
    ];
    const QNR: u32 = 7;
}
define_gfgen!(GF448, GF448Params, gf448mod, false);
define_gfgen_tests!(GF448, 7, tests_gf448mod);

/// Field for Curve1174/Edwards1174: integers modulo p = 2^251 - 9.
pub struct GF251Params;
impl GF251Params {
    const MODULUS: [u64; 4] = [
        0xFFFFFFFFFFFFFFF7,
        0xFFFFFFFFFFFFFFFF,
        0xFFFFFFFFFFFFFFFF,
        0x07FFFFFFFFFFFFFF,
    ];
    const QNR: u32 = 7;
}
define_gfgen!(GF251, GF251Params, gf251mod, false);
define_gfgen_tests!(GF251, 7, tests_gf251mod);
