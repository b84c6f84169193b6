//! NIST P-384 curve implementation.
//!
//! Short Weierstraß curve `y^2 = x^3 - 3*x + b` standardized in FIPS
//! 186-4 (also known as "secp384r1"); its standard hash function is
//! SHA-384. See the `p256` module documentation for the API
//! conventions; everything there applies here with 48-byte field
//! elements and scalars. Hashing to the curve uses the simplified SWU
//! map with z = -12.

#![allow(non_snake_case)]

use crate::field::GFp384;
use crate::backend::define_gfgen;

/// Integers modulo the curve order n (a 384-bit prime).
struct ScalarParams;
impl ScalarParams {
    const MODULUS: [u64; 6] = [
        0xECEC196ACCC52973,
        0x581A0DB248B0A77A,
        0xC7634D81F4372DDF,
        0xFFFFFFFFFFFFFFFF,
        0xFFFFFFFFFFFFFFFF,
        0xFFFFFFFFFFFFFFFF,
    ];
    // Square roots are never computed modulo the group order.
    const QNR: u32 = 0;
}
define_gfgen!(Scalar, ScalarParams, scalarmod, true);

/// Curve constants.
struct CurveParams;
impl CurveParams {
    const B: GFp384 = GFp384::w64be([
        0xB3312FA7E23EE7E4,
        0x988E056BE3F82D19,
        0x181D9C6EFE814112,
        0x0314088F5013875A,
        0xC656398D8A2ED19D,
        0x2A85C8EDD3EC2AEF,
    ]);
    const GX: GFp384 = GFp384::w64be([
        0xAA87CA22BE8B0537,
        0x8EB1C71EF320AD74,
        0x6E1D3B628BA79B98,
        0x59F741E082542A38,
        0x5502F25DBF55296C,
        0x3A545E3872760AB7,
    ]);
    const GY: GFp384 = GFp384::w64be([
        0x3617DE4A96262C6F,
        0x5D9E98BF9292DC29,
        0xF8F41DBD289A147C,
        0xE9DA3113B5F0B8C0,
        0x0A60B1CE1D7E819D,
        0x7A431D7C90EA0E5F,
    ]);
    const Z: i32 = -12;
}

crate::define_wei_common!{GFp384, Scalar, CurveParams}
crate::define_wei_kernels!{minus3, GFp384, CurveParams}
crate::define_wei_mul_plain!{GFp384, Scalar}
crate::define_wei_map_sswu!{GFp384, Scalar, CurveParams}
crate::define_wei_ecdsa!{GFp384, Scalar, CurveParams, sha2::Sha384,
    b"curvl P-384"}
crate::define_wei_schnorr!{GFp384, Scalar, CurveParams, sha2::Sha384}

// ========================================================================

#[cfg(test)]
mod tests {

    use super::{Point, Scalar, Curve, PrivateKey, VerifyScratch};
    use super::{schnorr_legacy_sign, schnorr_legacy_verify,
        schnorr_sign, schnorr_verify, schnorr_verify_batch,
        schnorr_pubkey_create};
    use sha2::{Sha384, Sha512, Digest};

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
        assert!(G.xdouble(4).equals(G4.xdouble(2)) == 0xFFFFFFFF);
    }

    #[test]
    fn mulgen() {
        let cv = Curve::new();
        assert!(cv.mulgen(&Scalar::ZERO).isneutral() == 0xFFFFFFFF);
        assert!(cv.mulgen(&Scalar::ONE).equals(Point::BASE) == 0xFFFFFFFF);
        assert!(cv.mulgen(&-Scalar::ONE).equals(-Point::BASE) == 0xFFFFFFFF);
        let mut sh = Sha512::new();
        for i in 0..8 {
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
        let skey = PrivateKey::from_seed(&[21u8; 32]);
        let pkey = skey.to_public_key(&cv);
        let mut sh = Sha384::new();
        sh.update(b"p384 sample");
        let hv: [u8; 48] = sh.finalize_reset().into();
        let (sig, _) = skey.sign_hash(&cv, &hv);
        assert!(pkey.verify_hash(&cv, &sig, &hv));
        let mut bad = sig;
        bad[50] ^= 0x10;
        assert!(!pkey.verify_hash(&cv, &bad, &hv));
    }

    #[test]
    fn schnorr() {
        let cv = Curve::new();
        let mut scratch = VerifyScratch::new();
        let skey = PrivateKey::from_seed(&[22u8; 32]);
        let pkey = skey.to_public_key(&cv);
        let msg = [2u8; 32];
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
        let mut sh = Sha384::new();
        for i in 0..8 {
            sh.update((i as u64).to_le_bytes());
            let h: [u8; 48] = sh.finalize_reset().into();
            let P = Point::from_uniform(&h);
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
