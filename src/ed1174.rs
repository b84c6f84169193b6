//! Curve1174 and Ed1174 signatures.
//!
//! This module implements generic group operations on Curve1174, the
//! Edwards curve `x^2 + y^2 = 1 - 1174*x^2*y^2` over the field of
//! integers modulo p = 2^251 - 9 (Bernstein-Hamburg-Krasnova, the
//! curve originally introduced alongside the Elligator maps), and an
//! EdDSA instantiation over it ("Ed1174") patterned after RFC 8032:
//! SHA-512 as the hash function, a "SigEd1174" dom prefix (always
//! applied, as for Ed448), and 32-byte keys and scalars.
//!
//! There is no standard for signatures over this curve; the scheme
//! here follows the same construction as Ed25519/Ed448 and is
//! interoperable only with itself. The curve remains useful as the
//! original Elligator demonstration target: hashing to the curve uses
//! Elligator 2 through the Montgomery isomorphism, as for the other
//! Edwards curves.
//!
//! The subgroup of interest has prime order L; the complete curve
//! contains 4*L points.

// Projective/fractional coordinates traditionally use uppercase letters,
// using lowercase only for affine coordinates.
#![allow(non_snake_case)]

use super::field::GF251;
use crate::backend::define_gfgen;
use sha2::{Sha512, Digest};

/// Integers modulo the subgroup prime order L (a 249-bit prime).
struct ScalarParams;
impl ScalarParams {
    const MODULUS: [u64; 4] = [
        0x8944D45FD166C971,
        0xF77965C4DFD30734,
        0xFFFFFFFFFFFFFFFF,
        0x01FFFFFFFFFFFFFF,
    ];
    // Square roots are never computed modulo the group order.
    const QNR: u32 = 0;
}
define_gfgen!(Scalar, ScalarParams, scalarmod, true);

/// Curve constants.
struct CurveParams;
impl CurveParams {
    /// Curve equation parameter d = -1174.
    const D: GF251 = GF251::w64be([
        0x07FFFFFFFFFFFFFF,
        0xFFFFFFFFFFFFFFFF,
        0xFFFFFFFFFFFFFFFF,
        0xFFFFFFFFFFFFFB61,
    ]);

    /// Generator coordinates.
    const GX: GF251 = GF251::w64be([
        0x037FBB0CEA308C47,
        0x9343AEE7C029A190,
        0xC021D96A492ECD65,
        0x16123F27BCE29EDA,
    ]);
    const GY: GF251 = GF251::w64be([
        0x06B72F82D47FB7CC,
        0x6656841169840E0C,
        0x4FE2DEE2AF3F976B,
        0xA4CCB1BF9B46360E,
    ]);

    /// Elligator 2 map parameter (-1 is a non-square mod p).
    const Z: i32 = -1;

    /// Montgomery isomorphism: inverted convention; the scaling
    /// factor gives a Montgomery curve with B = 1.
    const INVERT: bool = true;
    const C: GF251 = GF251::w64be([
        0x005A7A03FB02F719,
        0x5E441CD2E3F708F9,
        0x6F8FFBE8359548BA,
        0x8276ACE6BBE7DFD2,
    ]);

    /// Cofactor 4.
    const COFACTOR_LOG: u32 = 2;
}

/// SHA-512 adapter for the EdDSA layer.
struct EdHash;
impl EdHash {
    fn hash(parts: &[&[u8]]) -> [u8; 64] {
        let mut sh = Sha512::new();
        for p in parts.iter() {
            sh.update(p);
        }
        sh.finalize().into()
    }
}

/// Clamping for Ed1174 secret scalars: clear the two cofactor bits,
/// keep 250 bits, set bit 249.
fn clamp_scalar(b: &mut [u8; 32]) {
    b[0] &= 252;
    b[31] &= 3;
    b[31] |= 2;
}

crate::define_edwards!{one, GF251, Scalar, CurveParams}
crate::define_eddsa!{GF251, Scalar, CurveParams, EdHash, clamp_scalar,
    true, b"SigEd1174"}

// ========================================================================

#[cfg(test)]
mod tests {

    use super::{Point, Scalar, Curve, PrivateKey, PublicKey, VerifyScratch};
    use super::verify_batch;
    use sha2::{Sha256, Sha512, Digest};

    #[test]
    fn base_arith() {
        let cv = Curve::new();
        let G = Point::base();
        let enc = G.encode();
        assert!(Point::decode(&enc).unwrap().equals(G) == 0xFFFFFFFF);

        let G2 = G.double();
        let G3 = G2 + G;
        let G4 = G2.double();
        assert!((G3 + G).equals(G4) == 0xFFFFFFFF);
        assert!((G4 - G3).equals(G) == 0xFFFFFFFF);
        assert!((G - G).isneutral() == 0xFFFFFFFF);

        assert!(cv.mulgen(&Scalar::ZERO).isneutral() == 0xFFFFFFFF);
        assert!(cv.mulgen(&Scalar::ONE).equals(G) == 0xFFFFFFFF);
        assert!(cv.mulgen(&-Scalar::ONE).equals(-G) == 0xFFFFFFFF);
        assert!(G.is_torsion_free() == 0xFFFFFFFF);
        assert!(G.has_low_order() == 0);
    }

    #[test]
    fn mulgen() {
        let cv = Curve::new();
        let mut sh = Sha256::new();
        for i in 0..10 {
            sh.update(((2 * i + 0) as u64).to_le_bytes());
            let u = Scalar::decode_reduce(&sh.finalize_reset());
            sh.update(((2 * i + 1) as u64).to_le_bytes());
            let v = Scalar::decode_reduce(&sh.finalize_reset());
            let P = cv.mulgen(&u);
            let Q = Point::base() * u;
            assert!(P.equals(Q) == 0xFFFFFFFF);
            let A = cv.mulgen(&v);
            let R1 = u * A + cv.mulgen(&v);
            let R2 = cv.mul_add_mulgen_vartime(&A, &u, &v);
            assert!(R1.equals(R2) == 0xFFFFFFFF);
        }
    }

    #[test]
    fn signatures() {
        let cv = Curve::new();
        let skey = PrivateKey::from_seed(&cv, &[42u8; 32]);
        let pkey = skey.public_key;
        let msg = b"ed1174 sample";
        let sig = skey.sign_raw(&cv, msg);
        assert!(pkey.verify_raw(&cv, &sig, msg));
        assert!(pkey.verify_single_raw(&cv, &sig, msg));
        assert!(!pkey.verify_raw(&cv, &sig, b"ed1174 sampld"));
        let mut bad = sig;
        bad[17] ^= 0x01;
        assert!(!pkey.verify_raw(&cv, &bad, msg));

        // Context and pre-hashed modes.
        let sig2 = skey.sign_ctx(&cv, b"ctx", msg);
        assert!(pkey.verify_ctx(&cv, &sig2, b"ctx", msg));
        assert!(!pkey.verify_ctx(&cv, &sig2, b"ctY", msg));
        let mut sh = Sha512::new();
        sh.update(&msg[..]);
        let hm: [u8; 64] = sh.finalize().into();
        let sig3 = skey.sign_ph(&cv, b"", &hm);
        assert!(pkey.verify_ph(&cv, &sig3, b"", &hm));
        assert!(!pkey.verify_raw(&cv, &sig3, &hm));

        // Round trip through encode/decode of keys.
        let pkey2 = PublicKey::decode(&pkey.encode()).unwrap();
        assert!(pkey2.verify_raw(&cv, &sig, msg));
        let skey2 = PrivateKey::decode(&cv, &skey.encode()).unwrap();
        assert!(skey2.sign_raw(&cv, msg) == sig);
    }

    #[test]
    fn batch() {
        let cv = Curve::new();
        let mut scratch = VerifyScratch::new();

        const N: usize = 10;
        let mut msgs_buf = [[0u8; 32]; N];
        let mut sigs_buf = [[0u8; 64]; N];
        let mut pubs = [PublicKey { point: Point::NEUTRAL,
            encoded: [0u8; 32] }; N];
        for i in 0..N {
            let mut seed = [0u8; 32];
            seed[0] = i as u8;
            seed[1] = 0x74;
            let skey = PrivateKey::from_seed(&cv, &seed);
            msgs_buf[i][0] = i as u8;
            sigs_buf[i] = skey.sign_raw(&cv, &msgs_buf[i]);
            pubs[i] = skey.public_key;
        }
        let msgs: [&[u8]; N] = core::array::from_fn(|i| &msgs_buf[i][..]);
        let sigs: [&[u8]; N] = core::array::from_fn(|i| &sigs_buf[i][..]);
        assert!(verify_batch(&cv, &msgs, &sigs, &pubs, -1, &[],
            &mut scratch));

        let mut bad = sigs_buf[5];
        bad[50] ^= 0x04;
        let sigs2: [&[u8]; N] = core::array::from_fn(
            |i| if i == 5 { &bad[..] } else { &sigs_buf[i][..] });
        assert!(!verify_batch(&cv, &msgs, &sigs2, &pubs, -1, &[],
            &mut scratch));
    }

    #[test]
    fn hash_to_curve() {
        let mut sh = Sha512::new();
        for i in 0..10 {
            sh.update(&(i as u64).to_le_bytes());
            let v = sh.finalize_reset();
            let mut b = [0u8; 32];
            b.copy_from_slice(&v[..32]);
            let P = Point::from_uniform(&b);
            let enc = P.encode();
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
