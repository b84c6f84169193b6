//! NIST P-521 curve implementation.
//!
//! Short Weierstraß curve `y^2 = x^3 - 3*x + b` standardized in FIPS
//! 186-4 (also known as "secp521r1"); its standard hash function is
//! SHA-512. See the `p256` module documentation for the API
//! conventions; everything there applies here with 66-byte field
//! elements and scalars (the field has 521 bits, so the top 7 bits of
//! the leading byte are always zero). Hashing to the curve uses the
//! simplified SWU map with z = -4.

#![allow(non_snake_case)]

use crate::field::GFp521;
use crate::backend::define_gfgen;

/// Integers modulo the curve order n (a 521-bit prime).
struct ScalarParams;
impl ScalarParams {
    const MODULUS: [u64; 9] = [
        0xBB6FB71E91386409,
        0x3BB5C9B8899C47AE,
        0x7FCC0148F709A5D0,
        0x51868783BF2F966B,
        0xFFFFFFFFFFFFFFFA,
        0xFFFFFFFFFFFFFFFF,
        0xFFFFFFFFFFFFFFFF,
        0xFFFFFFFFFFFFFFFF,
        0x00000000000001FF,
    ];
    // Square roots are never computed modulo the group order.
    const QNR: u32 = 0;
}
define_gfgen!(Scalar, ScalarParams, scalarmod, true);

/// Curve constants.
struct CurveParams;
impl CurveParams {
    const B: GFp521 = GFp521::w64be([
        0x0000000000000051,
        0x953EB9618E1C9A1F,
        0x929A21A0B68540EE,
        0xA2DA725B99B315F3,
        0xB8B489918EF109E1,
        0x56193951EC7E937B,
        0x1652C0BD3BB1BF07,
        0x3573DF883D2C34F1,
        0xEF451FD46B503F00,
    ]);
    const GX: GFp521 = GFp521::w64be([
        0x00000000000000C6,
        0x858E06B70404E9CD,
        0x9E3ECB662395B442,
        0x9C648139053FB521,
        0xF828AF606B4D3DBA,
        0xA14B5E77EFE75928,
        0xFE1DC127A2FFA8DE,
        0x3348B3C1856A429B,
        0xF97E7E31C2E5BD66,
    ]);
    const GY: GFp521 = GFp521::w64be([
        0x0000000000000118,
        0x39296A789A3BC004,
        0x5C8A5FB42C7D1BD9,
        0x98F54449579B4468,
        0x17AFBD17273E662C,
        0x97EE72995EF42640,
        0xC550B9013FAD0761,
        0x353C7086A272C240,
        0x88BE94769FD16650,
    ]);
    const Z: i32 = -4;
}

crate::define_wei_common!{GFp521, Scalar, CurveParams}
crate::define_wei_kernels!{minus3, GFp521, CurveParams}
crate::define_wei_mul_plain!{GFp521, Scalar}
crate::define_wei_map_sswu!{GFp521, Scalar, CurveParams}
crate::define_wei_ecdsa!{GFp521, Scalar, CurveParams, sha2::Sha512,
    b"curvl P-521"}
crate::define_wei_schnorr!{GFp521, Scalar, CurveParams, sha2::Sha512}

// ========================================================================

#[cfg(test)]
mod tests {

    use super::{Point, Scalar, Curve, PrivateKey, VerifyScratch};
    use super::{schnorr_legacy_sign, schnorr_legacy_verify,
        schnorr_sign, schnorr_verify, schnorr_verify_batch,
        schnorr_pubkey_create};
    use sha2::{Sha512, Digest};

    #[test]
    fn base_arith() {
        let G = Point::BASE;
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
    }

    #[test]
    fn mulgen() {
        let cv = Curve::new();
        assert!(cv.mulgen(&Scalar::ZERO).isneutral() == 0xFFFFFFFF);
        assert!(cv.mulgen(&Scalar::ONE).equals(Point::BASE) == 0xFFFFFFFF);
        assert!(cv.mulgen(&-Scalar::ONE).equals(-Point::BASE) == 0xFFFFFFFF);
        let mut sh = Sha512::new();
        for i in 0..5 {
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
        let skey = PrivateKey::from_seed(&[31u8; 32]);
        let pkey = skey.to_public_key(&cv);
        let mut sh = Sha512::new();
        sh.update(b"p521 sample");
        let hv: [u8; 64] = sh.finalize_reset().into();
        let (sig, _) = skey.sign_hash(&cv, &hv);
        assert!(pkey.verify_hash(&cv, &sig, &hv));
        let mut bad = sig;
        bad[100] ^= 0x08;
        assert!(!pkey.verify_hash(&cv, &bad, &hv));
    }

    #[test]
    fn schnorr() {
        let cv = Curve::new();
        let mut scratch = VerifyScratch::new();
        let skey = PrivateKey::from_seed(&[32u8; 32]);
        let pkey = skey.to_public_key(&cv);
        let msg = [3u8; 32];
        let sig = schnorr_legacy_sign(&cv, &msg, &skey).unwrap();
        assert!(schnorr_legacy_verify(&cv, &msg, &sig, &pkey));

        let pub_x = schnorr_pubkey_create(&cv, &skey).unwrap();
        let sig = schnorr_sign(&cv, &msg, &skey).unwrap();
        assert!(schnorr_verify(&cv, &msg, &sig, &pub_x));

        let msgs: [&[u8]; 2] = [&msg, &msg];
        let sigs: [&[u8]; 2] = [&sig, &sig];
        let pubs: [&[u8]; 2] = [&pub_x, &pub_x];
        assert!(schnorr_verify_batch(&cv, &msgs, &sigs, &pubs,
            &mut scratch));
    }

    #[test]
    fn hash_to_curve() {
        let mut sh = Sha512::new();
        for i in 0..5 {
            sh.update((i as u64).to_le_bytes());
            let h1: [u8; 64] = sh.finalize_reset().into();
            sh.update(((i + 50) as u64).to_le_bytes());
            let h2: [u8; 64] = sh.finalize_reset().into();
            let mut b = [0u8; 66];
            b[..64].copy_from_slice(&h1);
            b[64..].copy_from_slice(&h2[..2]);
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
