//! Curve secp256k1 implementation.
//!
//! This module implements generic group operations on the secp256k1
//! curve, a short Weierstraß curve with equation `y^2 = x^3 + 7` used
//! by Bitcoin and standardized in SEC 2. Its standard hash function is
//! SHA-256.
//!
//! The curve admits an efficiently computable endomorphism
//! zeta(x, y) = (beta*x, y) with beta a non-trivial cube root of 1 in
//! the field; on the group, zeta is multiplication by a cube root of 1
//! modulo the order (lambda). Constant-time point multiplication
//! splits the scalar into two half-width parts with precomputed
//! rounded constants and runs two interleaved windowed ladders (GLV
//! method). The decomposition satisfies k = k1 + k2*lambda with both
//! halves below 2^(128.1) in absolute value.
//!
//! See the `p256` module documentation for the API conventions.
//! ECDSA, public key recovery, DER handling, and both Schnorr variants
//! (legacy and tagged-hash with x-only keys, including batch
//! verification) are available; hashing to the curve uses the
//! Shallue-van de Woestijne map (the curve has a = 0) with z = 1.

// Projective/fractional coordinates traditionally use uppercase letters,
// using lowercase only for affine coordinates.
#![allow(non_snake_case)]

use crate::field::GFsecp256k1;
use crate::backend::define_gfgen;

/// Integers modulo the curve order n (a 256-bit prime).
struct ScalarParams;
impl ScalarParams {
    const MODULUS: [u64; 4] = [
        0xBFD25E8CD0364141,
        0xBAAEDCE6AF48A03B,
        0xFFFFFFFFFFFFFFFE,
        0xFFFFFFFFFFFFFFFF,
    ];
    // Square roots are never computed modulo the group order.
    const QNR: u32 = 0;
}
define_gfgen!(Scalar, ScalarParams, scalarmod, true);

/// Curve constants.
struct CurveParams;
impl CurveParams {
    /// Curve equation parameter b (= 7).
    const B: GFsecp256k1 = GFsecp256k1::w64be([0, 0, 0, 7]);

    /// 3*b, as a small multiplier for the a = 0 formulas.
    const B3_SMALL: u32 = 21;

    /// Generator coordinates.
    const GX: GFsecp256k1 = GFsecp256k1::w64be([
        0x79BE667EF9DCBBAC,
        0x55A06295CE870B07,
        0x029BFCDB2DCE28D9,
        0x59F2815B16F81798,
    ]);
    const GY: GFsecp256k1 = GFsecp256k1::w64be([
        0x483ADA7726A3C465,
        0x5DA4FBFC0E1108A8,
        0xFD17B448A6855419,
        0x9C47D08FFB10D4B8,
    ]);

    /// Map parameter for the SVDW map.
    const Z: i32 = 1;

    /// sqrt(-3*Z^2) in the field (for the SVDW map).
    const C: GFsecp256k1 = GFsecp256k1::w64be([
        0x0A2D2BA93507F1DF,
        0x233770C2A797962C,
        0xC61F6D15DA14ECD4,
        0x7D8D27AE1CD5F852,
    ]);

    /// Endomorphism constant beta (a cube root of 1 in the field).
    const BETA: GFsecp256k1 = GFsecp256k1::w64be([
        0x7AE96A2B657C0710,
        0x6E64479EAC3434E9,
        0x9CF0497512F58995,
        0xC1396C28719501EE,
    ]);

    // Scalar decomposition constants. The size-reduced lattice basis
    // for the lambda decomposition is v1 = (a1, b1), v2 = (a2, b2)
    // with b1 < 0; the values stored here are -b1, -b2 mod n,
    // -lambda mod n, and the rounded multipliers
    // g1 = round(2^272 * b2 / n), g2 = round(2^272 * (-b1) / n).
    const MINUS_B1: Scalar = Scalar::w64be([
        0x0000000000000000,
        0x0000000000000000,
        0xE4437ED6010E8828,
        0x6F547FA90ABFE4C3,
    ]);
    const MINUS_B2: Scalar = Scalar::w64be([
        0xFFFFFFFFFFFFFFFF,
        0xFFFFFFFFFFFFFFFE,
        0x8A280AC50774346D,
        0xD765CDA83DB1562C,
    ]);
    const MINUS_LAMBDA: Scalar = Scalar::w64be([
        0xAC9C52B33FA3CF1F,
        0x5AD9E3FD77ED9BA4,
        0xA880B9FC8EC739C2,
        0xE0CFC810B51283CF,
    ]);
    const G1: Scalar = Scalar::w64be([
        0x0000000000000000,
        0x0000000000003086,
        0xD221A7D46BCDE86C,
        0x90E49284EB153DAB,
    ]);
    const G2: Scalar = Scalar::w64be([
        0x0000000000000000,
        0x000000000000E443,
        0x7ED6010E88286F54,
        0x7FA90ABFE4C42212,
    ]);
}

crate::define_wei_common!{GFsecp256k1, Scalar, CurveParams}
crate::define_wei_kernels!{zero, GFsecp256k1, CurveParams}
crate::define_wei_map_svdw!{GFsecp256k1, Scalar, CurveParams}
crate::define_wei_ecdsa!{GFsecp256k1, Scalar, CurveParams, sha2::Sha256,
    b"curvl secp256k1"}
crate::define_wei_schnorr!{GFsecp256k1, Scalar, CurveParams, sha2::Sha256}

impl Point {

    /// Applies the curve endomorphism zeta(x, y) = (beta*x, y).
    #[inline]
    fn zeta(self) -> Self {
        Self {
            X: self.X * CurveParams::BETA,
            Y: self.Y,
            Z: self.Z,
        }
    }

    /// Splits a scalar k into two signed half-width parts (k1, k2)
    /// such that k = k1 + k2*lambda modulo the order. The returned
    /// values are (|k1|, sgn(k1), |k2|, sgn(k2)), the magnitudes
    /// being scalars of at most 129 bits and the signs 0xFFFFFFFF
    /// masks for negative parts. Fully constant-time.
    pub(crate) fn split_lambda(k: &Scalar) -> (Scalar, u32, Scalar, u32) {
        // c1 = round(k*g1 / 2^(bits+16))
        // c2 = round(k*g2 / 2^(bits+16))
        // k2 = c1*(-b1) + c2*(-b2)
        // k1 = k2*(-lambda) + k
        const SHIFT: usize = Scalar::BITLEN + 16;
        let c1 = Scalar::mul_shift(k, &CurveParams::G1, SHIFT);
        let c2 = Scalar::mul_shift(k, &CurveParams::G2, SHIFT);
        let t = c1 * CurveParams::MINUS_B1 + c2 * CurveParams::MINUS_B2;
        let mut k1 = t * CurveParams::MINUS_LAMBDA + k;
        let mut k2 = t;
        let s1 = k1.set_minimize();
        let s2 = k2.set_minimize();
        (k1, s1, k2, s2)
    }

    /// Recodes a half-width (at most 129-bit) scalar into 27 signed
    /// 5-bit digits.
    fn recode_half(n: &Scalar) -> [i8; 27] {
        let mut sd = [0i8; 27];
        let bb = n.encode();
        let mut cc: u32 = 0;
        let mut i: usize = 0;
        let mut acc: u32 = 0;
        let mut acc_len: i32 = 0;
        for j in 0..27 {
            if acc_len < 5 && i < 17 {
                acc |= (bb[i] as u32) << acc_len;
                acc_len += 8;
                i += 1;
            }
            let d = (acc & 0x1F) + cc;
            acc >>= 5;
            acc_len -= 5;
            let m = 16u32.wrapping_sub(d) >> 8;
            sd[j] = (d.wrapping_sub(m & 32)) as i8;
            cc = m & 1;
        }
        sd
    }

    /// Multiplies this point by a scalar (in place), using the
    /// endomorphism split: each half-width part drives its own
    /// windowed ladder, with the second window built from the zeta
    /// images of the first.
    ///
    /// This operation is constant-time with regard to both the point
    /// and the scalar.
    pub fn set_mul(&mut self, n: &Scalar) {
        let (k1, s1, k2, s2) = Self::split_lambda(n);

        // win0[i] = (i+1)*sgn(k1)*P
        // win1[i] = (i+1)*sgn(k2)*zeta(P)
        let mut win0 = [Self::NEUTRAL; 16];
        win0[0] = *self;
        win0[0].set_condneg(s1);
        for i in 1..8 {
            let j = 2 * i;
            win0[j - 1] = win0[i - 1].double();
            win0[j] = win0[j - 1] + win0[0];
        }
        win0[15] = win0[7].double();
        let mut win1 = [Self::NEUTRAL; 16];
        for i in 0..16 {
            win1[i] = win0[i].zeta();
            win1[i].set_condneg(s1 ^ s2);
        }

        let sd0 = Self::recode_half(&k1);
        let sd1 = Self::recode_half(&k2);

        *self = Self::lookup(&win0, sd0[26]);
        self.set_add(&Self::lookup(&win1, sd1[26]));
        for i in (0..26).rev() {
            self.set_xdouble(5);
            self.set_add(&Self::lookup(&win0, sd0[i]));
            self.set_add(&Self::lookup(&win1, sd1[i]));
        }
    }
}

// ========================================================================

#[cfg(test)]
mod tests {

    use super::{Point, Scalar, Curve, CurveParams, PrivateKey, PublicKey,
        VerifyScratch};
    use super::{sig_normalize, schnorr_sign, schnorr_verify,
        schnorr_verify_batch, schnorr_pubkey_create, SCHNORR_SIG_LEN};
    use sha2::{Sha256, Digest};

    #[test]
    fn base_arith() {
        // Encoding of neutral.
        const EP0: [u8; 1] = [ 0 ];

        // For a point P (randomly generated on the curve with Sage),
        // points i*P for i = 0 to 6, encoded (compressed).
        // (Point 0*P is here represented as 33 bytes of value 0x00.)
        const EPC: [[u8; 33]; 7] = [
            [
                0x00,
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00
            ],
            [
                0x02,
                0x85, 0xFC, 0x56, 0xC5, 0xD6, 0xCC, 0xD9, 0x8A,
                0x3D, 0x61, 0x14, 0xAB, 0x0C, 0x8B, 0x09, 0xCD,
                0x5E, 0x8F, 0xD9, 0x0D, 0x6C, 0x96, 0x6E, 0xD9,
                0xF9, 0xE1, 0x92, 0xB2, 0xF7, 0x39, 0x42, 0x88
            ],
            [
                0x02,
                0x1E, 0x15, 0x0E, 0x10, 0x08, 0x66, 0x3C, 0xAA,
                0xB3, 0x54, 0xD9, 0x24, 0x55, 0x31, 0x0A, 0xCF,
                0x5A, 0x51, 0xD1, 0x4C, 0xCA, 0xEB, 0x1B, 0xEC,
                0xB1, 0x48, 0xD7, 0xDD, 0x79, 0x7E, 0xA5, 0x5A
            ],
            [
                0x02,
                0x60, 0x0C, 0x54, 0xB9, 0x68, 0x05, 0xC8, 0xAD,
                0xF7, 0x11, 0xEC, 0xF0, 0x35, 0xEF, 0xFB, 0x42,
                0x60, 0x9F, 0x4C, 0xE5, 0x80, 0x12, 0xBE, 0xF1,
                0xA6, 0x8C, 0xE6, 0x43, 0x22, 0x5B, 0x6D, 0xBF
            ],
            [
                0x02,
                0xCA, 0xA2, 0x44, 0xDD, 0xBF, 0x5E, 0xD5, 0xCB,
                0x13, 0x84, 0xA4, 0x68, 0x9E, 0xEC, 0xCA, 0xAA,
                0x08, 0x40, 0x80, 0xAA, 0x53, 0xCC, 0xA3, 0x4B,
                0xC5, 0x2F, 0xBC, 0x90, 0xA5, 0x3E, 0xB1, 0xE1
            ],
            [
                0x03,
                0x6B, 0xD1, 0x67, 0x5D, 0x24, 0x45, 0xC1, 0x84,
                0xE0, 0xCD, 0x49, 0xED, 0x12, 0x5E, 0x98, 0x89,
                0x6B, 0xB6, 0xF0, 0xBB, 0xD0, 0x1F, 0x3F, 0x49,
                0xDF, 0x67, 0xC8, 0xBA, 0x58, 0xD5, 0xE6, 0x16
            ],
            [
                0x03,
                0x56, 0xFF, 0xC1, 0x9E, 0xAE, 0xD6, 0xD4, 0x6B,
                0xD7, 0x3A, 0x0E, 0x3F, 0xB4, 0x77, 0x59, 0xC9,
                0xFA, 0x58, 0xFF, 0x10, 0xA6, 0x37, 0xF4, 0xBF,
                0x5E, 0x1E, 0x96, 0xE2, 0x08, 0xAD, 0x42, 0x66
            ],
        ];

        // Same points, but with uncompressed encoding.
        // (Point 0*P is here represented as 65 bytes of value 0x00.)
        const EPU: [[u8; 65]; 7] = [
            [
                0x00,
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00
            ],
            [
                0x04,
                0x85, 0xFC, 0x56, 0xC5, 0xD6, 0xCC, 0xD9, 0x8A,
                0x3D, 0x61, 0x14, 0xAB, 0x0C, 0x8B, 0x09, 0xCD,
                0x5E, 0x8F, 0xD9, 0x0D, 0x6C, 0x96, 0x6E, 0xD9,
                0xF9, 0xE1, 0x92, 0xB2, 0xF7, 0x39, 0x42, 0x88,
                0x9B, 0x59, 0x87, 0xFF, 0x8B, 0x5B, 0x16, 0x12,
                0x86, 0x43, 0xB8, 0x3D, 0xF2, 0x6F, 0xF7, 0x66,
                0x24, 0x45, 0x62, 0x70, 0xE8, 0x6B, 0x4F, 0xE4,
                0x92, 0x13, 0x0F, 0x61, 0x3B, 0x95, 0x04, 0x72
            ],
            [
                0x04,
                0x1E, 0x15, 0x0E, 0x10, 0x08, 0x66, 0x3C, 0xAA,
                0xB3, 0x54, 0xD9, 0x24, 0x55, 0x31, 0x0A, 0xCF,
                0x5A, 0x51, 0xD1, 0x4C, 0xCA, 0xEB, 0x1B, 0xEC,
                0xB1, 0x48, 0xD7, 0xDD, 0x79, 0x7E, 0xA5, 0x5A,
                0x23, 0x3A, 0xF4, 0x50, 0xE5, 0x46, 0x3A, 0x91,
                0x3A, 0x53, 0xE3, 0xCC, 0xFC, 0x92, 0x77, 0x94,
                0xB8, 0x6C, 0x43, 0x9D, 0x43, 0xAD, 0x31, 0x52,
                0xD1, 0xB1, 0x05, 0x3C, 0x16, 0x26, 0x9B, 0x32
            ],
            [
                0x04,
                0x60, 0x0C, 0x54, 0xB9, 0x68, 0x05, 0xC8, 0xAD,
                0xF7, 0x11, 0xEC, 0xF0, 0x35, 0xEF, 0xFB, 0x42,
                0x60, 0x9F, 0x4C, 0xE5, 0x80, 0x12, 0xBE, 0xF1,
                0xA6, 0x8C, 0xE6, 0x43, 0x22, 0x5B, 0x6D, 0xBF,
                0xC8, 0x45, 0x8C, 0xCB, 0xA6, 0x41, 0xB7, 0x18,
                0x0D, 0x47, 0xE9, 0xC0, 0x64, 0xCB, 0x6C, 0xF4,
                0x9E, 0xD6, 0x26, 0x7D, 0xBC, 0x4C, 0xA4, 0xA0,
                0xB6, 0xB5, 0x9C, 0xDD, 0xF3, 0x07, 0xC1, 0xF6
            ],
            [
                0x04,
                0xCA, 0xA2, 0x44, 0xDD, 0xBF, 0x5E, 0xD5, 0xCB,
                0x13, 0x84, 0xA4, 0x68, 0x9E, 0xEC, 0xCA, 0xAA,
                0x08, 0x40, 0x80, 0xAA, 0x53, 0xCC, 0xA3, 0x4B,
                0xC5, 0x2F, 0xBC, 0x90, 0xA5, 0x3E, 0xB1, 0xE1,
                0x19, 0xD0, 0x27, 0x56, 0x2B, 0x06, 0x31, 0xE9,
                0x77, 0x35, 0xB7, 0x71, 0x88, 0x90, 0xAF, 0x11,
                0x18, 0x19, 0x97, 0x12, 0xD4, 0x73, 0x63, 0x2C,
                0x59, 0x4A, 0x56, 0x64, 0x8E, 0x89, 0xD0, 0x44
            ],
            [
                0x04,
                0x6B, 0xD1, 0x67, 0x5D, 0x24, 0x45, 0xC1, 0x84,
                0xE0, 0xCD, 0x49, 0xED, 0x12, 0x5E, 0x98, 0x89,
                0x6B, 0xB6, 0xF0, 0xBB, 0xD0, 0x1F, 0x3F, 0x49,
                0xDF, 0x67, 0xC8, 0xBA, 0x58, 0xD5, 0xE6, 0x16,
                0xA0, 0x10, 0x2A, 0xDB, 0xEE, 0x27, 0x3B, 0x6B,
                0xA3, 0x02, 0x66, 0xC3, 0x36, 0xEC, 0x5C, 0xC2,
                0xBA, 0x3D, 0x3B, 0x25, 0xCB, 0xD6, 0x93, 0xAA,
                0xD4, 0x72, 0x0F, 0x72, 0x9E, 0x6B, 0x5F, 0x81
            ],
            [
                0x04,
                0x56, 0xFF, 0xC1, 0x9E, 0xAE, 0xD6, 0xD4, 0x6B,
                0xD7, 0x3A, 0x0E, 0x3F, 0xB4, 0x77, 0x59, 0xC9,
                0xFA, 0x58, 0xFF, 0x10, 0xA6, 0x37, 0xF4, 0xBF,
                0x5E, 0x1E, 0x96, 0xE2, 0x08, 0xAD, 0x42, 0x66,
                0x42, 0xDA, 0xDD, 0x63, 0xF7, 0xCB, 0x8B, 0x3B,
                0x0F, 0x77, 0x34, 0x5D, 0x98, 0xEA, 0xDF, 0x4B,
                0xBC, 0x71, 0xE0, 0x6B, 0x6C, 0x51, 0x86, 0xEE,
                0xAA, 0x55, 0x29, 0x1F, 0x13, 0x28, 0xDB, 0x0F
            ],
        ];

        let P0 = Point::decode(&EP0).unwrap();
        assert!(P0.isneutral() == 0xFFFFFFFF);

        let mut PP = [P0; 7];
        for i in 1..7 {
            let P = Point::decode(&EPC[i]).unwrap();
            let Q = Point::decode(&EPU[i]).unwrap();
            assert!(P.isneutral() == 0);
            assert!(Q.isneutral() == 0);
            assert!(P.equals(Q) == 0xFFFFFFFF);
            assert!(P.encode_compressed() == EPC[i]);
            assert!(P.encode_uncompressed() == EPU[i]);
            PP[i] = P;
        }

        let P0 = PP[0];
        let P1 = PP[1];
        let P2 = PP[2];
        let P3 = PP[3];
        let P4 = PP[4];
        let P5 = PP[5];
        let P6 = PP[6];

        for i in 1..7 {
            assert!(PP[i].equals(PP[i - 1]) == 0);
            let Q = PP[i - 1] + PP[1];
            assert!(PP[i].equals(Q) == 0xFFFFFFFF);
            assert!((Q + Point::NEUTRAL).equals(Q) == 0xFFFFFFFF);
            let R = Q + P0;
            assert!(PP[i].equals(R) == 0xFFFFFFFF);
        }

        let Q2 = P1 + P1;
        assert!(Q2.encode_compressed() == EPC[2]);
        assert!(Q2.equals(P2) == 0xFFFFFFFF);
        let R2 = P1.double();
        assert!(R2.encode_compressed() == EPC[2]);
        assert!(R2.equals(P2) == 0xFFFFFFFF);
        assert!(R2.equals(Q2) == 0xFFFFFFFF);

        let Q3 = P2 + P1;
        assert!(Q3.encode_compressed() == EPC[3]);
        assert!(Q3.equals(P3) == 0xFFFFFFFF);
        let R3 = Q2 + P1;
        assert!(R3.encode_compressed() == EPC[3]);
        assert!(R3.equals(P3) == 0xFFFFFFFF);
        assert!(R3.equals(Q3) == 0xFFFFFFFF);

        let Q4 = Q2.double();
        assert!(Q4.encode_compressed() == EPC[4]);
        assert!(Q4.equals(P4) == 0xFFFFFFFF);
        let R4 = P1.xdouble(2);
        assert!(R4.encode_compressed() == EPC[4]);
        assert!(R4.equals(P4) == 0xFFFFFFFF);
        assert!(R4.equals(Q4) == 0xFFFFFFFF);
        let R4 = P1 + Q3;
        assert!(R4.encode_compressed() == EPC[4]);
        assert!(R4.equals(P4) == 0xFFFFFFFF);
        assert!(R4.equals(Q4) == 0xFFFFFFFF);

        let Q5 = Q3 + R2;
        assert!(Q5.encode_compressed() == EPC[5]);
        assert!(Q5.equals(P5) == 0xFFFFFFFF);
        let R5 = R3 + Q2;
        assert!(R5.encode_compressed() == EPC[5]);
        assert!(R5.equals(P5) == 0xFFFFFFFF);
        assert!(R5.equals(Q5) == 0xFFFFFFFF);

        assert!((R5 - Q3).equals(Q2) == 0xFFFFFFFF);

        let Q6 = Q3.double();
        assert!(Q6.encode_compressed() == EPC[6]);
        assert!(Q6.equals(P6) == 0xFFFFFFFF);
        let R6 = Q2 + Q4;
        assert!(R6.encode_compressed() == EPC[6]);
        assert!(R6.equals(P6) == 0xFFFFFFFF);
        assert!(R6.equals(Q6) == 0xFFFFFFFF);

        let mut P = Q6;
        let mut Q = R6;
        for _ in 0..8 {
            P += P;
        }
        Q.set_xdouble(8);
        assert!(P.equals(Q) == 0xFFFFFFFF);

        let P = P1 + P0.double();
        assert!(P.equals(P1) == 0xFFFFFFFF);
        assert!(P.equals(P2) == 0x00000000);
    }


    #[test]
    fn split_lambda() {
        // lambda = -MINUS_LAMBDA; check the decomposition identity
        // and the size bound on the halves.
        let lambda = -CurveParams::MINUS_LAMBDA;
        let mut sh = Sha256::new();
        for i in 0..100 {
            sh.update(&(i as u64).to_le_bytes());
            let k: Scalar = Scalar::decode_reduce(&sh.finalize_reset());
            let (k1, s1, k2, s2) = Point::split_lambda(&k);
            let t1 = if s1 != 0 { -k1 } else { k1 };
            let t2 = if s2 != 0 { -k2 } else { k2 };
            assert!((t1 + t2 * lambda).equals(k) == 0xFFFFFFFF);

            // |k1| and |k2| fit in 129 bits.
            for t in [k1, k2].iter() {
                let bb = t.encode();
                assert!(bb[16] <= 1);
                for j in 17..32 {
                    assert!(bb[j] == 0);
                }
            }
        }
    }

    #[test]
    fn mulgen() {
        // Test vector generated randomly with Sage.
        let s = Scalar::w64be([0xF0FCA55C06488D1C, 0x6CA454ED29573B6C,
                               0x89D4F76592F96F10, 0x98BD4A5F08DF863E]);
        let enc: [u8; 33] = [
            0x02,
            0x08, 0x28, 0x9C, 0x90, 0x62, 0x82, 0x49, 0x71,
            0x94, 0x38, 0x9E, 0xA3, 0x2B, 0xD6, 0x35, 0x18,
            0xAD, 0xEA, 0xE8, 0x4C, 0x17, 0x9F, 0xEA, 0x6F,
            0xD2, 0x53, 0x1A, 0x71, 0x14, 0x4C, 0x94, 0xFA
        ];

        let R = Point::decode(&enc).unwrap();
        // GLV path.
        let P = Point::BASE * s;
        assert!(P.equals(R) == 0xFFFFFFFF);
        assert!(P.encode_compressed() == enc);
        // Plain windowed ladder (must agree with the GLV path).
        let mut P2 = Point::BASE;
        P2.set_mul_window(&s);
        assert!(P2.equals(R) == 0xFFFFFFFF);
        // Generator comb.
        let cv = Curve::new();
        let Q = cv.mulgen(&s);
        assert!(Q.equals(R) == 0xFFFFFFFF);
        assert!(Q.encode_compressed() == enc);
    }

    #[test]
    fn mul() {
        let cv = Curve::new();
        let mut sh = Sha256::new();
        for i in 0..20 {
            // Build pseudorandom s1 and s2
            sh.update(((2 * i + 0) as u64).to_le_bytes());
            let v1 = sh.finalize_reset();
            sh.update(((2 * i + 1) as u64).to_le_bytes());
            let v2 = sh.finalize_reset();

            let s1 = Scalar::decode_reduce(&v1);
            let s2 = Scalar::decode_reduce(&v2);
            let s3 = s1 * s2;
            let P1 = cv.mulgen(&s1);
            let Q1 = s1 * Point::BASE;
            assert!(P1.equals(Q1) == 0xFFFFFFFF);
            let P2 = cv.mulgen(&s3);
            let Q2 = s2 * Q1;
            assert!(P2.equals(Q2) == 0xFFFFFFFF);

            // GLV and plain window paths must agree on arbitrary
            // points as well.
            let mut R1 = Q1;
            R1.set_mul(&s2);
            let mut R2 = Q1;
            R2.set_mul_window(&s2);
            assert!(R1.equals(R2) == 0xFFFFFFFF);
        }
    }

    #[test]
    fn mul_add_mulgen() {
        let cv = Curve::new();
        let mut sh = Sha256::new();
        for i in 0..20 {
            // Build pseudorandom A, u and v
            sh.update(((3 * i + 0) as u64).to_le_bytes());
            let v1 = sh.finalize_reset();
            sh.update(((3 * i + 1) as u64).to_le_bytes());
            let v2 = sh.finalize_reset();
            sh.update(((3 * i + 2) as u64).to_le_bytes());
            let v3 = sh.finalize_reset();
            let A = cv.mulgen(&Scalar::decode_reduce(&v1));
            let u = Scalar::decode_reduce(&v2);
            let v = Scalar::decode_reduce(&v3);

            // Compute u*A + v*B in two different ways; check that they
            // match.
            let R1 = u * A + cv.mulgen(&v);
            let R2 = cv.mul_add_mulgen_vartime(&A, &u, &v);
            assert!(R1.equals(R2) == 0xFFFFFFFF);
        }
    }

    #[test]
    fn signatures() {
        // Test vector from project Wycheproof
        // (ecdsa_secp256k1_sha256_p1363_test.json); the vector's s is
        // high, so it is normalized before verification.
        let pub_enc: [u8; 65] = [
            0x04,
            0xB8, 0x38, 0xFF, 0x44, 0xE5, 0xBC, 0x17, 0x7B,
            0xF2, 0x11, 0x89, 0xD0, 0x76, 0x60, 0x82, 0xFC,
            0x9D, 0x84, 0x32, 0x26, 0x88, 0x7F, 0xC9, 0x76,
            0x03, 0x71, 0x10, 0x0B, 0x7E, 0xE2, 0x0A, 0x6F,
            0xF0, 0xC9, 0xD7, 0x5B, 0xFB, 0xA7, 0xB3, 0x1A,
            0x6B, 0xCA, 0x19, 0x74, 0x49, 0x6E, 0xEB, 0x56,
            0xDE, 0x35, 0x70, 0x71, 0x95, 0x5D, 0x83, 0xC4,
            0xB1, 0xBA, 0xDA, 0xA0, 0xB2, 0x18, 0x32, 0xE9,
        ];
        let msg = b"123400";
        let sig: [u8; 64] = [
            0x81, 0x3E, 0xF7, 0x9C, 0xCE, 0xFA, 0x9A, 0x56,
            0xF7, 0xBA, 0x80, 0x5F, 0x0E, 0x47, 0x85, 0x84,
            0xFE, 0x5F, 0x0D, 0xD5, 0xF5, 0x67, 0xBC, 0x09,
            0xB5, 0x12, 0x3C, 0xCB, 0xC9, 0x83, 0x23, 0x65,
            0x90, 0x0E, 0x75, 0xAD, 0x23, 0x3F, 0xCC, 0x90,
            0x85, 0x09, 0xDB, 0xFF, 0x59, 0x22, 0x64, 0x7D,
            0xB3, 0x7C, 0x21, 0xF4, 0xAF, 0xD3, 0x20, 0x3A,
            0xE8, 0xDC, 0x4A, 0xE7, 0x79, 0x4B, 0x0F, 0x87,
        ];

        let cv = Curve::new();
        let pkey = PublicKey::decode(&pub_enc).unwrap();
        let mut sh = Sha256::new();
        sh.update(&msg);
        let hv1: [u8; 32] = sh.finalize_reset().into();
        sh.update(&msg);
        sh.update(&[0u8]);
        let hv2: [u8; 32] = sh.finalize_reset().into();
        let nsig = sig_normalize(&sig).unwrap();
        assert!(pkey.verify_hash(&cv, &nsig, &hv1));
        assert!(!pkey.verify_hash(&cv, &nsig, &hv2));

        for i in 0..10 {
            sh.update((i as u64).to_le_bytes());
            let seed: [u8; 32] = sh.finalize_reset().into();
            let sk = PrivateKey::from_seed(&seed);
            let pk = sk.to_public_key(&cv);
            let (sig1, _) = sk.sign_hash(&cv, &hv1);
            let (sig2, _) = sk.sign_hash(&cv, &hv2);
            assert!(pk.verify_hash(&cv, &sig1, &hv1));
            assert!(pk.verify_hash(&cv, &sig2, &hv2));
            assert!(!pk.verify_hash(&cv, &sig1, &hv2));
            assert!(!pk.verify_hash(&cv, &sig2, &hv1));
            assert!(!pkey.verify_hash(&cv, &sig1, &hv1));
            assert!(!pkey.verify_hash(&cv, &sig2, &hv2));
        }
    }

    #[test]
    fn schnorr_batch() {
        // A batch of 64 tagged-hash Schnorr signatures; corrupting
        // any single s must break the whole batch.
        let cv = Curve::new();
        let mut scratch = VerifyScratch::new();

        const N: usize = 64;
        let mut msgs_buf = [[0u8; 32]; N];
        let mut sigs_buf = [[0u8; SCHNORR_SIG_LEN]; N];
        let mut pubs_buf = [[0u8; 32]; N];
        for i in 0..N {
            let skey = PrivateKey::from_seed(&(i as u64).to_le_bytes());
            msgs_buf[i][0] = i as u8;
            msgs_buf[i][1] = 0xA7;
            sigs_buf[i] = schnorr_sign(&cv, &msgs_buf[i], &skey).unwrap();
            pubs_buf[i] = schnorr_pubkey_create(&cv, &skey).unwrap();
            assert!(schnorr_verify(&cv, &msgs_buf[i], &sigs_buf[i],
                &pubs_buf[i]));
        }
        let msgs: [&[u8]; N] = core::array::from_fn(|i| &msgs_buf[i][..]);
        let sigs: [&[u8]; N] = core::array::from_fn(|i| &sigs_buf[i][..]);
        let pubs: [&[u8]; N] = core::array::from_fn(|i| &pubs_buf[i][..]);
        assert!(schnorr_verify_batch(&cv, &msgs, &sigs, &pubs,
            &mut scratch));

        for t in [0usize, 20, 63].iter() {
            let mut bad = sigs_buf[*t];
            bad[SCHNORR_SIG_LEN - 1] ^= 0x01;
            let sigs2: [&[u8]; N] = core::array::from_fn(
                |i| if i == *t { &bad[..] } else { &sigs_buf[i][..] });
            assert!(!schnorr_verify_batch(&cv, &msgs, &sigs2, &pubs,
                &mut scratch));
        }
    }

    #[test]
    fn hash_to_curve() {
        // SVDW map on this curve.
        let mut sh = Sha256::new();
        for i in 0..10 {
            sh.update((i as u64).to_le_bytes());
            let b: [u8; 32] = sh.finalize_reset().into();
            let P = Point::from_uniform(&b);
            assert!(P.isneutral() == 0);
            let enc = P.encode_compressed();
            assert!(Point::decode(&enc).unwrap().equals(P) == 0xFFFFFFFF);
            let mut hint = 0u32;
            loop {
                if let Some(b2) = P.to_uniform(hint) {
                    assert!(Point::from_uniform(&b2).equals(P)
                        == 0xFFFFFFFF);
                    break;
                }
                hint += 1;
                assert!(hint < 32);
            }

            // Wide input, and preimage sampling.
            sh.update(((i + 500) as u64).to_le_bytes());
            let h2: [u8; 32] = sh.finalize_reset().into();
            let mut wide = [0u8; 64];
            wide[..32].copy_from_slice(&b);
            wide[32..].copy_from_slice(&h2);
            let P2 = Point::from_hash(&wide);
            let u = P2.to_hash(&h2).unwrap();
            assert!(Point::from_hash(&u).equals(P2) == 0xFFFFFFFF);
        }
    }
}
