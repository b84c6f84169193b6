//! Edwards25519 curve and Ed25519 signatures.
//!
//! This module implements generic group operations on the twisted
//! Edwards curve edwards25519, with equation `-x^2 + y^2 = 1 +
//! d*x^2*y^2` over the field of integers modulo p = 2^255 - 19 (d =
//! -121665/121666), and the Ed25519 signature algorithm, as specified
//! in [RFC 8032]. The hash function is SHA-512.
//!
//! The subgroup of interest has prime order L; "scalars" are integers
//! modulo L, implemented by the `Scalar` structure. Curve points
//! (`Point`) use extended coordinates with complete, constant-time
//! addition formulas. The `Curve` context holds the precomputed
//! generator tables and the blinding state, and is required for key
//! generation and signing. All three RFC 8032 modes are provided
//! (Ed25519, Ed25519ctx, Ed25519ph), along with the
//! cofactor-multiplied "single" verification, batch verification, and
//! hashing to the curve (Elligator 2 through the birational map to
//! Curve25519).
//!
//! Point decoding enforces canonical encodings, and accepts points
//! outside the prime-order subgroup (the torsion tests are available
//! separately).
//!
//! [RFC 8032]: https://datatracker.ietf.org/doc/html/rfc8032

// Projective/fractional coordinates traditionally use uppercase letters,
// using lowercase only for affine coordinates.
#![allow(non_snake_case)]

use super::field::GF25519;
use crate::backend::define_gfgen;
use sha2::{Sha512, Digest};

/// Integers modulo the subgroup prime order L = 2^252 +
/// 27742317777372353535851937790883648493.
struct ScalarParams;
impl ScalarParams {
    const MODULUS: [u64; 4] = [
        0x5812631A5CF5D3ED,
        0x14DEF9DEA2F79CD6,
        0x0000000000000000,
        0x1000000000000000,
    ];
    // Square roots are never computed modulo the group order.
    const QNR: u32 = 0;
}
define_gfgen!(Scalar, ScalarParams, scalarmod, true);

/// Curve constants.
struct CurveParams;
impl CurveParams {
    /// Curve equation parameter d = -121665/121666.
    const D: GF25519 = GF25519::w64be([
        0x52036CEE2B6FFE73,
        0x8CC740797779E898,
        0x00700A4D4141D8AB,
        0x75EB4DCA135978A3,
    ]);

    /// Generator coordinates (y = 4/5).
    const GX: GF25519 = GF25519::w64be([
        0x216936D3CD6E53FE,
        0xC0A4E231FDD6DC5C,
        0x692CC7609525A7B2,
        0xC9562D608F25D51A,
    ]);
    const GY: GF25519 = GF25519::w64be([
        0x6666666666666666,
        0x6666666666666666,
        0x6666666666666666,
        0x6666666666666658,
    ]);

    /// Elligator 2 map parameter (2 is a non-square mod p).
    const Z: i32 = 2;

    /// Montgomery isomorphism: direct convention, scaling factor
    /// c = sqrt(-486664) (mapping to Curve25519).
    const INVERT: bool = false;
    const C: GF25519 = GF25519::w64be([
        0x0F26EDF460A006BB,
        0xD27B08DC03FC4F7E,
        0xC5A1D3D14B7D1A82,
        0xCC6E04AAFF457E06,
    ]);

    /// Cofactor 8.
    const COFACTOR_LOG: u32 = 3;
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

/// RFC 8032 clamping for Ed25519 secret scalars.
fn clamp_scalar(b: &mut [u8; 32]) {
    b[0] &= 248;
    b[31] &= 127;
    b[31] |= 64;
}

crate::define_edwards!{minus1, GF25519, Scalar, CurveParams}
crate::define_eddsa!{GF25519, Scalar, CurveParams, EdHash, clamp_scalar,
    false, b"SigEd25519 no Ed25519 collisions"}

impl Point {

    /// Maps this point to the corresponding Montgomery curve
    /// (Curve25519) and returns the u coordinate of the resulting
    /// point (0 for the neutral).
    pub fn to_montgomery_u(&self) -> GF25519 {
        (self.Z + self.Y) / (self.Z - self.Y)
    }

    /// Builds the point corresponding to the Curve25519 point of the
    /// provided u coordinate, through the birational map; the sign
    /// bit selects the parity of the Edwards x coordinate. Returns
    /// `None` if u is not the coordinate of a curve point (i.e. the
    /// point lies on the quadratic twist).
    pub fn from_montgomery_u(u: &GF25519, sign: u32) -> Option<Point> {
        // v^2 = u^3 + A*u^2 + u (A = 486662); u = 0 is the 2-torsion
        // point (0, 0), mapped to (0, -1) by the conversion.
        let (v, ok) = ((u.square() + u.mul_small(486662) + GF25519::ONE)
            * u).sqrt();
        if ok == 0 {
            return None;
        }
        let mut P = Self::from_mont_point(u, &v, 0);
        let ws = ((((P.X * P.Z.invert()).encode()[0] as u32) ^ sign) & 1)
            .wrapping_neg();
        P.set_condneg(ws);
        Some(P)
    }
}

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
        // Encoding of the generator (y = 4/5, even x).
        let enc = G.encode();
        assert!(Point::decode(&enc).unwrap().equals(G) == 0xFFFFFFFF);

        let G2 = G.double();
        let G3 = G2 + G;
        let G4 = G2.double();
        assert!((G3 + G).equals(G4) == 0xFFFFFFFF);
        assert!((G4 - G3).equals(G) == 0xFFFFFFFF);
        assert!((G - G).isneutral() == 0xFFFFFFFF);
        assert!((G + Point::NEUTRAL).equals(G) == 0xFFFFFFFF);

        // L*G = O and (L-1)*G = -G.
        assert!(cv.mulgen(&Scalar::ZERO).isneutral() == 0xFFFFFFFF);
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
    fn x25519_agreement() {
        // The birational map must agree with the X25519 ladder on the
        // base point.
        let cv = Curve::new();
        let mut sh = Sha256::new();
        for i in 0..10 {
            sh.update(&(i as u64).to_le_bytes());
            let v = sh.finalize_reset();
            let mut kb = [0u8; 32];
            kb.copy_from_slice(&v);
            let um = crate::x25519::x25519_base(&kb);

            // Same computation through the Edwards curve.
            kb[0] &= 248;
            kb[31] &= 127;
            kb[31] |= 64;
            let s = Scalar::decode_reduce(&kb);
            let P = cv.mulgen(&s);
            let u = P.to_montgomery_u();
            assert!(u.encode() == um);

            // The reverse map recovers the point (the sign bit
            // selects between P and -P).
            let sign = ((P.X / P.Z).encode()[0] & 1) as u32;
            let Q = Point::from_montgomery_u(&u, sign).unwrap();
            assert!(Q.equals(P) == 0xFFFFFFFF);
        }
    }

    struct Ed25519TestVector<'a> {
        s: &'a str,
        Q: &'a str,
        m: &'a str,
        dom: bool,
        ph: bool,
        ctx: &'a str,
        sig: &'a str,
    }

    // Test vectors from RFC 8032.
    const TEST_VECTORS: [Ed25519TestVector; 6] = [
        Ed25519TestVector {
            s:   "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60",
            Q:   "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a",
            m:   "",
            dom: false,
            ph:  false,
            ctx: "",
            sig: "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e065224901555fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b",
        },
        Ed25519TestVector {
            s:   "4ccd089b28ff96da9db6c346ec114e0f5b8a319f35aba624da8cf6ed4fb8a6fb",
            Q:   "3d4017c3e843895a92b70aa74d1b7ebc9c982ccf2ec4968cc0cd55f12af4660c",
            m:   "72",
            dom: false,
            ph:  false,
            ctx: "",
            sig: "92a009a9f0d4cab8720e820b5f642540a2b27b5416503f8fb3762223ebdb69da085ac1e43e15996e458f3613d0f11d8c387b2eaeb4302aeeb00d291612bb0c00",
        },
        Ed25519TestVector {
            s:   "c5aa8df43f9f837bedb7442f31dcb7b166d38535076f094b85ce3a2e0b4458f7",
            Q:   "fc51cd8e6218a1a38da47ed00230f0580816ed13ba3303ac5deb911548908025",
            m:   "af82",
            dom: false,
            ph:  false,
            ctx: "",
            sig: "6291d657deec24024827e69c3abe01a30ce548a284743a445e3680d7db5ac3ac18ff9b538d16f290ae67f760984dc6594a7c15e9716ed28dc027beceea1ec40a",
        },
        Ed25519TestVector {
            s:   "833fe62409237b9d62ec77587520911e9a759cec1d19755b7da901b96dca3d42",
            Q:   "ec172b93ad5e563bf4932c70e1245034c35467ef2efd4d64ebf819683467e2bf",
            m:   "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f",
            dom: false,
            ph:  false,
            ctx: "",
            sig: "dc2a4459e7369633a52b1bf277839a00201009a3efbf3ecb69bea2186c26b58909351fc9ac90b3ecfdfbc7c66431e0303dca179c138ac17ad9bef1177331a704",
        },
        Ed25519TestVector {
            s:   "ab9c2853ce297ddab85c993b3ae14bcad39b2c682beabc27d6d4eb20711d6560",
            Q:   "0f1d1274943b91415889152e893d80e93275a1fc0b65fd71b4b0dda10ad7d772",
            m:   "f726936d19c800494e3fdaff20b276a8",
            dom: true,
            ph:  false,
            ctx: "666f6f",
            sig: "21655b5f1aa965996b3f97b3c849eafba922a0a62992f73b3d1b73106a84ad85e9b86a7b6005ea868337ff2d20a7f5fbd4cd10b0be49a68da2b2e0dc0ad8960f",
        },
        Ed25519TestVector {
            s:   "833fe62409237b9d62ec77587520911e9a759cec1d19755b7da901b96dca3d42",
            Q:   "ec172b93ad5e563bf4932c70e1245034c35467ef2efd4d64ebf819683467e2bf",
            m:   "616263",
            dom: true,
            ph:  true,
            ctx: "",
            sig: "98a70222f0b8121aa9d30f813d683f809e462b469c7ff87639499bb94e6dae4131f85042463c2a355a2003d062adf5aaa10b8c61e636062aaad11c2a26083406",
        },
    ];

    #[test]
    fn signatures() {
        let cv = Curve::new();
        for tv in TEST_VECTORS.iter() {
            let seed = hex::decode(tv.s).unwrap();
            let Q_enc = hex::decode(tv.Q).unwrap();
            let msg = hex::decode(tv.m).unwrap();
            let ctx = hex::decode(tv.ctx).unwrap();
            let mut sig = [0u8; 64];
            hex::decode_to_slice(tv.sig, &mut sig[..]).unwrap();

            let skey = PrivateKey::from_seed(&cv, &seed[..]);
            assert!(&Q_enc[..] == skey.public_key.encode());
            if tv.dom {
                if tv.ph {
                    let mut sh = Sha512::new();
                    sh.update(&msg[..]);
                    let hm = sh.finalize();
                    assert!(skey.sign_ph(&cv, &ctx[..], &hm) == sig);
                } else {
                    assert!(skey.sign_ctx(&cv, &ctx[..], &msg[..]) == sig);
                }
            } else {
                assert!(skey.sign_raw(&cv, &msg[..]) == sig);
            }

            let pkey = PublicKey::decode(&Q_enc[..]).unwrap();
            if tv.dom {
                if tv.ph {
                    let mut sh = Sha512::new();
                    sh.update(&msg[..]);
                    let mut hm = sh.finalize();
                    assert!(pkey.verify_ph(&cv, &sig, &ctx[..], &hm));
                    assert!(!pkey.verify_ph(&cv, &sig, &[1u8], &hm));
                    hm[42] ^= 0x08;
                    assert!(!pkey.verify_ph(&cv, &sig, &ctx[..], &hm));
                } else {
                    assert!(pkey.verify_ctx(&cv, &sig, &ctx[..], &msg[..]));
                    assert!(!pkey.verify_ctx(&cv, &sig, &[1u8], &msg[..]));
                    assert!(!pkey.verify_ctx(&cv, &sig, &ctx[..], &[0u8]));
                }
            } else {
                assert!(pkey.verify_raw(&cv, &sig, &msg[..]));
                assert!(!pkey.verify_raw(&cv, &sig, &[0u8]));
            }
        }
    }

    #[test]
    fn batch() {
        let cv = Curve::new();
        let mut scratch = VerifyScratch::new();

        const N: usize = 20;
        let mut msgs_buf = [[0u8; 32]; N];
        let mut sigs_buf = [[0u8; 64]; N];
        let mut pubs = [PublicKey { point: Point::NEUTRAL,
            encoded: [0u8; 32] }; N];
        for i in 0..N {
            let mut seed = [0u8; 32];
            seed[0] = i as u8;
            seed[1] = 0x5C;
            let skey = PrivateKey::from_seed(&cv, &seed);
            msgs_buf[i][0] = i as u8;
            sigs_buf[i] = skey.sign_raw(&cv, &msgs_buf[i]);
            pubs[i] = skey.public_key;
            assert!(pubs[i].verify_raw(&cv, &sigs_buf[i], &msgs_buf[i]));
            assert!(pubs[i].verify_single_raw(&cv, &sigs_buf[i],
                &msgs_buf[i]));
        }
        let msgs: [&[u8]; N] = core::array::from_fn(|i| &msgs_buf[i][..]);
        let sigs: [&[u8]; N] = core::array::from_fn(|i| &sigs_buf[i][..]);
        assert!(verify_batch(&cv, &msgs, &sigs, &pubs, -1, &[],
            &mut scratch));

        let mut bad = sigs_buf[7];
        bad[40] ^= 0x02;
        let sigs2: [&[u8]; N] = core::array::from_fn(
            |i| if i == 7 { &bad[..] } else { &sigs_buf[i][..] });
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
            // On curve: round trip through the canonical encoding.
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

            // Wide-input map and its sampling inverse.
            let mut wide = [0u8; 64];
            wide.copy_from_slice(&v);
            let P2 = Point::from_hash(&wide);
            if P2.isneutral() == 0 {
                let u = P2.to_hash(&v[..32]).unwrap();
                assert!(Point::from_hash(&u).equals(P2) == 0xFFFFFFFF);
            }
        }
    }

    #[test]
    fn blinding() {
        let cv1 = Curve::new();
        let mut cv2 = Curve::new();
        cv2.randomize(&[123u8; 32]);
        let skey1 = PrivateKey::from_seed(&cv1, &[77u8; 32]);
        let skey2 = PrivateKey::from_seed(&cv2, &[77u8; 32]);
        let msg = b"blinding test";
        assert!(skey1.sign_raw(&cv1, msg) == skey2.sign_raw(&cv2, msg));
        assert!(skey1.public_key.encode() == skey2.public_key.encode());
    }
}
