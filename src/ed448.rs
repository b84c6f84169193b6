//! Edwards448 curve and Ed448 signatures.
//!
//! This module implements generic group operations on the Edwards
//! curve edwards448 ("Goldilocks"), with equation `x^2 + y^2 = 1 +
//! d*x^2*y^2` over the field of integers modulo p = 2^448 - 2^224 - 1
//! (d = -39081), and the Ed448 signature algorithm, as specified in
//! [RFC 8032]. The hash function is SHAKE-256 with a fixed 114-byte
//! output.
//!
//! The subgroup of interest has prime order L; the complete curve
//! contains 4*L points. Curve points (`Point`) use extended
//! coordinates with complete, constant-time addition formulas; the
//! `Curve` context holds the precomputed generator tables and the
//! blinding state. All RFC 8032 modes are provided (Ed448, Ed448ph,
//! always with the dom4 separation string), along with the
//! cofactor-multiplied "single" verification, batch verification, and
//! hashing to the curve (Elligator 2 through the Montgomery
//! isomorphism; note that the isomorphic Montgomery curve is not
//! Curve448, which is related to edwards448 by a 4-isogeny instead).
//!
//! [RFC 8032]: https://datatracker.ietf.org/doc/html/rfc8032

// Projective/fractional coordinates traditionally use uppercase letters,
// using lowercase only for affine coordinates.
#![allow(non_snake_case)]

use super::field::GF448;
use crate::backend::define_gfgen;
use sha3::{Shake256, digest::{Update, ExtendableOutputReset, XofReader}};

/// Integers modulo the subgroup prime order L = 2^446 -
/// 13818066809895115352007386748515426880336692474882178609894547503885.
struct ScalarParams;
impl ScalarParams {
    const MODULUS: [u64; 7] = [
        0x2378C292AB5844F3,
        0x216CC2728DC58F55,
        0xC44EDB49AED63690,
        0xFFFFFFFF7CCA23E9,
        0xFFFFFFFFFFFFFFFF,
        0xFFFFFFFFFFFFFFFF,
        0x3FFFFFFFFFFFFFFF,
    ];
    // Square roots are never computed modulo the group order.
    const QNR: u32 = 0;
}
define_gfgen!(Scalar, ScalarParams, scalarmod, true);

/// Curve constants.
struct CurveParams;
impl CurveParams {
    /// Curve equation parameter d = -39081.
    const D: GF448 = GF448::w64be([
        0xFFFFFFFFFFFFFFFF,
        0xFFFFFFFFFFFFFFFF,
        0xFFFFFFFFFFFFFFFF,
        0xFFFFFFFEFFFFFFFF,
        0xFFFFFFFFFFFFFFFF,
        0xFFFFFFFFFFFFFFFF,
        0xFFFFFFFFFFFF6756,
    ]);

    /// Generator coordinates.
    const GX: GF448 = GF448::w64be([
        0x4F1970C66BED0DED,
        0x221D15A622BF36DA,
        0x9E146570470F1767,
        0xEA6DE324A3D3A464,
        0x12AE1AF72AB66511,
        0x433B80E18B00938E,
        0x2626A82BC70CC05E,
    ]);
    const GY: GF448 = GF448::w64be([
        0x693F46716EB6BC24,
        0x8876203756C9C762,
        0x4BEA73736CA39840,
        0x87789C1E05A0C2D7,
        0x3AD3FF1CE67C39C4,
        0xFDBD132C4ED7C8AD,
        0x9808795BF230FA14,
    ]);

    /// Elligator 2 map parameter (-1 is a non-square mod p).
    const Z: i32 = -1;

    /// Montgomery isomorphism: inverted convention, with the Mont448
    /// scaling factor.
    const INVERT: bool = true;
    const C: GF448 = GF448::w64be([
        0x4136D02F925D530D,
        0x4B1D9E178310F2CB,
        0xDD18A3E7C3A767A8,
        0x48E6DB198C3D0631,
        0x1E725A0DB991D0C6,
        0xC3D1120F0EFA59F5,
        0x4BF38E82B0E1E028,
    ]);

    /// Cofactor 4.
    const COFACTOR_LOG: u32 = 2;
}

/// SHAKE-256 adapter for the EdDSA layer (fixed 114-byte output).
struct EdHash;
impl EdHash {
    fn hash(parts: &[&[u8]]) -> [u8; 114] {
        let mut sh = Shake256::default();
        for p in parts.iter() {
            sh.update(p);
        }
        let mut out = [0u8; 114];
        sh.finalize_xof_reset().read(&mut out);
        out
    }
}

/// RFC 8032 clamping for Ed448 secret scalars.
fn clamp_scalar(b: &mut [u8; 56]) {
    b[0] &= 252;
    b[55] |= 128;
}

crate::define_edwards!{one, GF448, Scalar, CurveParams}
crate::define_eddsa!{GF448, Scalar, CurveParams, EdHash, clamp_scalar,
    true, b"SigEd448"}

impl Point {

    /// Maps this point to Curve448 through the 4-isogeny and returns
    /// the u coordinate of the resulting point (0 for the neutral and
    /// the points with x = 0).
    pub fn to_montgomery_u(&self) -> GF448 {
        // u = y^2 / x^2
        (self.Y / self.X).square()
    }

    /// Builds the point corresponding to the Curve448 point of the
    /// provided u coordinate, through the dual 4-isogeny; the sign
    /// bit selects the parity of the Curve448 v coordinate before
    /// the mapping. Returns `None` if u is not the coordinate of a
    /// curve point. The exceptional cases (u = 0, and the invalid
    /// u = 1) are handled by masking, as for the identity.
    pub fn from_montgomery_u(u: &GF448, sign: u32) -> Option<Point> {
        // v^2 = u^3 + A*u^2 + u (A = 156326).
        let (mut v, ok) = ((u.square() + u.mul_small(156326) + GF448::ONE)
            * u).sqrt();
        if ok == 0 {
            return None;
        }
        let ws = ((((v.encode()[0] as u32) ^ sign) & 1)).wrapping_neg();
        v.set_cond(&-v, ws);

        // 4-isogeny maps for M(2-4d, 1) -> E(1, d):
        //   x = 4*v*(u^2 - 1) / (u^4 - 2*u^2 + 4*v^2 + 1)
        //   y = -(u^5 - 2*u^3 - 4*u*v^2 + u)
        //      / (u^5 - 2*u^2*v^2 - 2*u^3 - 2*v^2 + u)
        // The points with u = 0 (2-torsion) map to the neutral.
        let tor = u.iszero();
        let u2 = u.square();
        let u3 = u2 * u;
        let u4 = u3 * u;
        let u5 = u4 * u;
        let v2 = v.square();

        let xx = v.mul4() * (u2 - GF448::ONE);
        let xz = u4 - u2.mul2() + v2.mul4() + GF448::ONE;
        let yy = -(u5 - u3.mul2() - (v2 * u).mul4() + u);
        let yz = u5 - (u2 * v2).mul2() - u3.mul2() - v2.mul2() + u;

        let mut P = Self {
            X: xx * yz,
            Y: yy * xz,
            Z: xz * yz,
            T: xx * yy,
        };
        P.X.set_cond(&GF448::ZERO, tor);
        P.Y.set_cond(&GF448::ONE, tor);
        P.Z.set_cond(&GF448::ONE, tor);
        P.T.set_cond(&GF448::ZERO, tor);
        Some(P)
    }
}

// ========================================================================
