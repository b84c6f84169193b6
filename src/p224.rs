//! NIST P-224 curve implementation.
//!
//! Short Weierstraß curve `y^2 = x^3 - 3*x + b` standardized in FIPS
//! 186-4 (also known as "secp224r1"); its standard hash function is
//! SHA-256. See the `p256` module documentation for the API
//! conventions; everything there applies here with 28-byte field
//! elements and scalars.
//!
//! The field modulus is equal to 1 modulo 8, so point decompression
//! relies on the Tonelli-Shanks square root in the backend, and the
//! Schnorr variants (which require p = 3 mod 4) are not available on
//! this curve (the functions report failure). Hashing to the curve
//! uses the simplified SWU map with z = 31.

#![allow(non_snake_case)]

use crate::field::GFp224;
use crate::backend::define_gfgen;

/// Integers modulo the curve order n (a 224-bit prime).
struct ScalarParams;
impl ScalarParams {
    const MODULUS: [u64; 4] = [
        0x13DD29455C5C2A3D,
        0xFFFF16A2E0B8F03E,
        0xFFFFFFFFFFFFFFFF,
        0x00000000FFFFFFFF,
    ];
    // Square roots are never computed modulo the group order.
    const QNR: u32 = 0;
}
define_gfgen!(Scalar, ScalarParams, scalarmod, true);

/// Curve constants.
struct CurveParams;
impl CurveParams {
    const B: GFp224 = GFp224::w64be([
        0x00000000B4050A85,
        0x0C04B3ABF5413256,
        0x5044B0B7D7BFD8BA,
        0x270B39432355FFB4,
    ]);
    const GX: GFp224 = GFp224::w64be([
        0x00000000B70E0CBD,
        0x6BB4BF7F321390B9,
        0x4A03C1D356C21122,
        0x343280D6115C1D21,
    ]);
    const GY: GFp224 = GFp224::w64be([
        0x00000000BD376388,
        0xB5F723FB4C22DFE6,
        0xCD4375A05A074764,
        0x44D5819985007E34,
    ]);
    const Z: i32 = 31;
}

crate::define_wei_common!{GFp224, Scalar, CurveParams}
crate::define_wei_kernels!{minus3, GFp224, CurveParams}
crate::define_wei_mul_plain!{GFp224, Scalar}
crate::define_wei_map_sswu!{GFp224, Scalar, CurveParams}
crate::define_wei_ecdsa!{GFp224, Scalar, CurveParams, sha2::Sha256,
    b"curvl P-224"}
crate::define_wei_schnorr!{GFp224, Scalar, CurveParams, sha2::Sha256}

// ========================================================================

#[cfg(test)]
mod tests {

    use super::{Point, Scalar, Curve, PrivateKey};
    use super::{schnorr_legacy_sign, schnorr_sign};
    use sha2::{Sha256, Digest};

    #[test]
    fn base_arith() {
        let G = Point::BASE;
        // Decompression goes through Tonelli-Shanks on this curve.
        let encc = G.encode_compressed();
        let encu = G.encode_uncompressed();
        assert!(Point::decode(&encc).unwrap().equals(G) == 0xFFFFFFFF);
        assert!(Point::decode(&encu).unwrap().equals(G) == 0xFFFFFFFF);

        let G2 = G.double();
        let G3 = G2 + G;
        let G4 = G2.double();
        assert!((G3 + G).equals(G4) == 0xFFFFFFFF);
        assert!((G4 - G3).equals(G) == 0xFFFFFFFF);
        assert!((G - G).isneutral() == 0xFFFFFFFF);
        let encc2 = G2.encode_compressed();
        assert!(Point::decode(&encc2).unwrap().equals(G2) == 0xFFFFFFFF);
    }

    #[test]
    fn mulgen() {
        let cv = Curve::new();
        assert!(cv.mulgen(&Scalar::ZERO).isneutral() == 0xFFFFFFFF);
        assert!(cv.mulgen(&Scalar::ONE).equals(Point::BASE) == 0xFFFFFFFF);
        assert!(cv.mulgen(&-Scalar::ONE).equals(-Point::BASE) == 0xFFFFFFFF);
        let mut sh = Sha256::new();
        for i in 0..10 {
            sh.update(((2 * i + 0) as u64).to_le_bytes());
            let u = Scalar::decode_reduce(&sh.finalize_reset());
            sh.update(((2 * i + 1) as u64).to_le_bytes());
            let v = Scalar::decode_reduce(&sh.finalize_reset());
            let P = cv.mulgen(&u);
            assert!(P.equals(Point::BASE * u) == 0xFFFFFFFF);
            let A = cv.mulgen(&v);
            let R1 = u * A + cv.mulgen(&v);
            let R2 = cv.mul_add_mulgen_vartime(&A, &u, &v);
            assert!(R1.equals(R2) == 0xFFFFFFFF);
        }
    }

    #[test]
    fn signatures() {
        let cv = Curve::new();
        let skey = PrivateKey::from_seed(&[14u8; 32]);
        let pkey = skey.to_public_key(&cv);
        let mut sh = Sha256::new();
        sh.update(b"p224 sample");
        let hv: [u8; 32] = sh.finalize_reset().into();
        let (sig, _) = skey.sign_hash(&cv, &hv);
        assert!(pkey.verify_hash(&cv, &sig, &hv));
        let mut bad = sig;
        bad[5] ^= 0x02;
        assert!(!pkey.verify_hash(&cv, &bad, &hv));
    }

    #[test]
    fn no_schnorr() {
        // p = 1 mod 4: the square-y conventions do not apply.
        let cv = Curve::new();
        let skey = PrivateKey::from_seed(&[15u8; 32]);
        assert!(schnorr_legacy_sign(&cv, &[0u8; 32], &skey).is_none());
        assert!(schnorr_sign(&cv, &[0u8; 32], &skey).is_none());
    }

    #[test]
    fn hash_to_curve() {
        let mut sh = Sha256::new();
        for i in 0..10 {
            sh.update((i as u64).to_le_bytes());
            let h: [u8; 32] = sh.finalize_reset().into();
            let mut b = [0u8; 28];
            b.copy_from_slice(&h[..28]);
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
                assert!(hint < 16);
            }
        }
    }
}
