//! X448 key-exchange algorithm.
//!
//! This module implements the X448 primitive, as defined by [RFC
//! 7748]: multiplication of a point on Curve448 (a Montgomery curve
//! with equation `y^2 = x^3 + 156326*x^2 + x`) or on its quadratic
//! twist, by a clamped scalar, everything being exchanged as 56-byte
//! little-endian u coordinates. The `x448()` function implements
//! exactly the process described in RFC 7748 (section 5); no input is
//! filtered out (low-order points are processed like any other).
//!
//! On top of the raw primitive, the module provides the Diffie-Hellman
//! utilities of a key-exchange API: private key generation and
//! clamping, public key derivation, shared-secret derivation (with
//! rejection of the all-zero output), x-only small-subgroup membership
//! and torsion-freeness tests, and the Elligator 2 encoding of public
//! keys as uniform-looking 56-byte strings (with its inverse).
//!
//! [RFC 7748]: https://datatracker.ietf.org/doc/html/rfc7748

// Projective/fractional coordinates traditionally use uppercase letters,
// using lowercase only for affine coordinates.
#![allow(non_snake_case)]

use super::field::GF448;
use super::{CryptoRng, RngCore};

/// Curve constant A (Montgomery form).
const CURVE_A: u32 = 156326;

/// Ladder constant (A - 2)/4.
const A24: u32 = 39081;

/// Clamps a 56-byte scalar for use with X448: the two low bits are
/// cleared (cofactor 4) and the top bit is set.
pub fn clamp(scalar: &[u8; 56]) -> [u8; 56] {
    let mut s = *scalar;
    s[0] &= 252;
    s[55] |= 128;
    s
}

// Montgomery ladder core (see x25519.rs for the structure; the
// conditional swap is driven by the XOR of successive scalar bits).
fn ladder(x1: GF448, s: &[u8], nbits: usize) -> (GF448, GF448) {
    let mut x2 = GF448::ONE;
    let mut z2 = GF448::ZERO;
    let mut x3 = x1;
    let mut z3 = GF448::ONE;
    let mut swap = 0u32;

    for t in (0..nbits).rev() {
        let kt = (((s[t >> 3] >> (t & 7)) & 1) as u32).wrapping_neg();
        swap ^= kt;
        GF448::cswap(&mut x2, &mut x3, swap);
        GF448::cswap(&mut z2, &mut z3, swap);
        swap = kt;

        let A = x2 + z2;
        let B = x2 - z2;
        let AA = A.square();
        let BB = B.square();
        let C = x3 + z3;
        let D = x3 - z3;
        let E = AA - BB;
        let DA = D * A;
        let CB = C * B;
        x3 = (DA + CB).square();
        z3 = x1 * (DA - CB).square();
        x2 = AA * BB;
        z2 = E * (AA + E.mul_small(A24));
    }
    GF448::cswap(&mut x2, &mut x3, swap);
    GF448::cswap(&mut z2, &mut z3, swap);

    (x2, z2)
}

/// X448 function (from RFC 7748), general case.
///
/// The source point is provided as an array of 56 bytes (`point`), as
/// well as the scalar (`scalar`). In RFC 7748 terminology, the `point`
/// parameter is the little-endian encoding of the u coordinate of a
/// point on the Montgomery curve or on its quadratic twist, and the
/// `scalar` parameter is the little-endian encoding of the scalar. The
/// function "clamps" the scalar (bits 0 and 1 are cleared, bit 447 is
/// set) then interprets the clamped scalar as an integer (little-endian
/// convention), with which the provided curve point is multiplied; the u
/// coordinate of the resulting point is then encoded and returned.
pub fn x448(point: &[u8; 56], scalar: &[u8; 56]) -> [u8; 56] {
    // Make clamped scalar.
    let s = clamp(scalar);

    // Decode the source point. As per RFC 7748 rules, non-canonical
    // values are acceptable.
    let x1 = GF448::decode_reduce(point);

    // Apply the RFC 7748 section 5 algorithm.
    let (x2, z2) = ladder(x1, &s, 448);
    (x2 / z2).encode()
}

/// Specialized version of X448, when applied to the conventional
/// generator point (u = 5).
///
/// See `x448()` for details.
pub fn x448_base(scalar: &[u8; 56]) -> [u8; 56] {
    let mut u5 = [0u8; 56];
    u5[0] = 5;
    x448(&u5, scalar)
}

// ========================================================================
// Diffie-Hellman utilities.

/// Generates a new X448 private key (56 random bytes, clamped) from a
/// cryptographically secure RNG.
pub fn privkey_generate<T: CryptoRng + RngCore>(rng: &mut T) -> [u8; 56] {
    let mut s = [0u8; 56];
    rng.fill_bytes(&mut s);
    clamp(&s)
}

/// Computes the public key for a private key.
pub fn pubkey_create(priv_key: &[u8; 56]) -> [u8; 56] {
    x448_base(priv_key)
}

/// Derives the shared secret between a private key and a peer public
/// key. The all-zero output (produced by low-order peer points) is
/// rejected.
pub fn derive(pub_key: &[u8; 56], priv_key: &[u8; 56]) -> Option<[u8; 56]> {
    let shared = x448(pub_key, priv_key);
    let mut acc = 0u8;
    for b in shared.iter() {
        acc |= b;
    }
    if acc == 0 {
        return None;
    }
    Some(shared)
}

// Doubles a point in x-only projective coordinates.
fn pge_double(X: GF448, Zc: GF448) -> (GF448, GF448) {
    let a = (X + Zc).square();
    let b = (X - Zc).square();
    let c = a - b;  // 4*X*Z
    (a * b, c * (a + c.mul_small(A24)))
}

/// Tests whether a public key lies in the small (cofactor) subgroup.
pub fn pubkey_is_small(pub_key: &[u8; 56]) -> bool {
    let mut X = GF448::decode_reduce(pub_key);
    let mut Zc = GF448::ONE;
    // Cofactor is 4.
    for _ in 0..2 {
        let (nx, nz) = pge_double(X, Zc);
        X = nx;
        Zc = nz;
    }
    Zc.iszero() != 0
}

/// Tests whether a public key is free of torsion components (the
/// point, multiplied by the prime subgroup order, must yield the
/// identity).
pub fn pubkey_is_torsion_free(pub_key: &[u8; 56]) -> bool {
    let mut lb = [0u8; 56];
    let mut j = 0;
    for w in crate::ed448::Scalar::MODULUS.iter() {
        lb[j..(j + 8)].copy_from_slice(&w.to_le_bytes());
        j += 8;
    }
    let x1 = GF448::decode_reduce(pub_key);
    let (_, z) = ladder(x1, &lb, 446);
    z.iszero() != 0
}

// ========================================================================
// Elligator 2 (with z = -1, a non-square since p = 3 mod 4).

// Computes g(x) = x^3 + A*x^2 + x.
fn solve_y2(x: &GF448) -> GF448 {
    (x.square() + x.mul_small(CURVE_A) + GF448::ONE) * x
}

/// Maps a uniform 56-byte string to the u coordinate of a curve point
/// (Elligator 2). The output is always the u coordinate of a point on
/// the curve (never on the twist); the map is constant-time, and
/// covers about half of the curve.
pub fn pubkey_from_uniform(bytes: &[u8; 56]) -> [u8; 56] {
    let u = GF448::decode_reduce(bytes);

    // x1 = -A / (1 + z*u^2)   (x1 = -A when the divisor is zero)
    // x2 = -x1 - A
    // x = x1 if g(x1) is square, x2 otherwise
    let mut d = GF448::ONE - u.square();
    d.set_cond(&GF448::ONE, d.iszero());
    let x1 = -GF448::from_u32(CURVE_A) / d;
    let x2 = -x1 - GF448::from_u32(CURVE_A);

    let g1 = solve_y2(&x1);
    let alpha = !((g1.legendre() >> 1) as u32);
    let x = GF448::select(&x2, &x1, alpha);
    x.encode()
}

/// Inverts the Elligator 2 map on a public key: produces a 56-byte
/// string that maps back to the same u coordinate. The low bit of
/// `hint` selects the preimage branch; the sign of the preimage
/// follows the parity of the lifted y coordinate. Returns `None` when
/// the selected branch has no preimage (a random hint succeeds with
/// probability about 1/2), or when the input is not the u coordinate
/// of a curve point.
pub fn pubkey_to_uniform(pub_key: &[u8; 56], hint: u32) -> Option<[u8; 56]> {
    let (x, xok) = GF448::decode_ct(pub_key);
    if xok == 0 {
        return None;
    }

    let (y, yok) = solve_y2(&x).sqrt();
    if yok == 0 {
        return None;
    }

    // u1^2 = -(x + A) / (x*z)
    // u2^2 = -x / ((x + A)*z)
    let xa = x + GF448::from_u32(CURVE_A);
    let mut n = xa;
    let mut d = x;
    GF448::cswap(&mut n, &mut d, (hint & 1).wrapping_neg());
    // z = -1: the two negations cancel.
    let (mut u, ok) = n.isqrt(&d);
    if ok == 0 {
        return None;
    }

    let ws = (((u.encode()[0] ^ y.encode()[0]) & 1) as u32).wrapping_neg();
    u.set_cond(&-u, ws);

    Some(u.encode())
}

// ========================================================================

#[cfg(test)]
mod tests {

    use super::{x448, x448_base, pubkey_create, pubkey_from_uniform,
        pubkey_to_uniform, pubkey_is_small, pubkey_is_torsion_free};
    use sha2::{Sha512, Digest};

    #[test]
    fn x448_rfc7748() {
        // RFC 7748, section 5.2 test vector.
        let mut scalar = [0u8; 56];
        hex::decode_to_slice("3d262fddf9ec8e88495266fea19a34d28882acef045104d0d1aae121700a779c984c24f8cdd78fbff44943eba368f54b29259a4f1c600ad3", &mut scalar[..]).unwrap();
        let mut point = [0u8; 56];
        hex::decode_to_slice("06fce640fa3487bfda5f6cf2d5263f8aad88334cbd07437f020f08f9814dc031ddbdc38c19c6da2583fa5429db94ada18aa7a7fb4ef8a086", &mut point[..]).unwrap();
        let mut expected = [0u8; 56];
        hex::decode_to_slice("ce3e4ff95a60dc6697da1db1d85e6afbdf79b50a2412d7546d5f239fe14fbaadeb445fc66a01b0779d98223961111e21766282f73dd96b6f", &mut expected[..]).unwrap();
        assert!(x448(&point, &scalar) == expected);

        // RFC 7748, section 6.2 (Diffie-Hellman).
        let mut priv_a = [0u8; 56];
        hex::decode_to_slice("9a8f4925d1519f5775cf46b04b5800d4ee9ee8bae8bc5565d498c28dd9c9baf574a9419744897391006382a6f127ab1d9ac2d8c0a598726b", &mut priv_a[..]).unwrap();
        let mut priv_b = [0u8; 56];
        hex::decode_to_slice("1c306a7ac2a0e2e0990b294470cba339e6453772b075811d8fad0d1d6927c120bb5ee8972b0d3e21374c9c921b09d1b0366f10b65173992d", &mut priv_b[..]).unwrap();
        let mut pub_a = [0u8; 56];
        hex::decode_to_slice("9b08f7cc31b7e3e67d22d5aea121074a273bd2b83de09c63faa73d2c22c5d9bbc836647241d953d40c5b12da88120d53177f80e532c41fa0", &mut pub_a[..]).unwrap();
        let mut pub_b = [0u8; 56];
        hex::decode_to_slice("3eb7a829b0cd20f5bcfc0b599b6feccf6da4627107bdb0d4f345b43027d8b972fc3e34fb4232a13ca706dcb57aec3dae07bdc1c67bf33609", &mut pub_b[..]).unwrap();
        let mut shared = [0u8; 56];
        hex::decode_to_slice("07fff4181ac6cc95ec1c16a94a0f74d12da232ce40a77552281d282bb60c0b56fd2464c335543936521c24403085d59a449a5037514a879d", &mut shared[..]).unwrap();
        assert!(pubkey_create(&priv_a) == pub_a);
        assert!(pubkey_create(&priv_b) == pub_b);
        assert!(x448(&pub_b, &priv_a) == shared);
        assert!(x448(&pub_a, &priv_b) == shared);
    }

    #[test]
    fn x448_mc() {
        let mut k = [0u8; 56];
        k[0] = 5;
        let mut u = k;
        let mut ref1 = [0u8; 56];
        hex::decode_to_slice("3f482c8a9f19b01e6c46ee9711d9dc14fd4bf67af30765c2ae2b846a4d23a8cd0db897086239492caf350b51f833868b9bc2b3bca9cf4113", &mut ref1[..]).unwrap();
        for i in 0..100 {
            let old_k = k;
            k = x448(&u, &k);
            u = old_k;
            if i == 0 {
                assert!(k == ref1);
            }
        }
    }

    #[test]
    fn x448_basepoint() {
        let mut sh = Sha512::new();
        let mut b = [0u8; 56];
        b[0] = 5;
        for i in 0..10 {
            sh.update(&(i as u64).to_le_bytes());
            let v = sh.finalize_reset();
            let mut k = [0u8; 56];
            k[..].copy_from_slice(&v[..56]);
            assert!(x448(&b, &k) == x448_base(&k));
        }
    }

    #[test]
    fn subgroups() {
        let mut b = [0u8; 56];
        b[0] = 5;
        assert!(!pubkey_is_small(&b));
        assert!(pubkey_is_torsion_free(&b));

        let zero = [0u8; 56];
        assert!(pubkey_is_small(&zero));
        assert!(!pubkey_is_torsion_free(&zero));
    }

    #[test]
    fn elligator() {
        let mut sh = Sha512::new();
        for i in 0..10 {
            sh.update(&(i as u64).to_le_bytes());
            let v = sh.finalize_reset();
            let mut r = [0u8; 56];
            r.copy_from_slice(&v[..56]);
            let u = pubkey_from_uniform(&r);
            let mut hint = 0u32;
            loop {
                if let Some(r2) = pubkey_to_uniform(&u, hint) {
                    assert!(pubkey_from_uniform(&r2) == u);
                    break;
                }
                hint += 1;
                assert!(hint < 16);
            }
        }
    }
}
