//! X25519 key-exchange algorithm.
//!
//! This module implements the X25519 primitive, as defined by [RFC
//! 7748]: multiplication of a point on Curve25519 (a Montgomery curve
//! with equation `y^2 = x^3 + 486662*x^2 + x`) or on its quadratic
//! twist, by a clamped scalar, everything being exchanged as 32-byte
//! little-endian u coordinates. The `x25519()` function implements
//! exactly the process described in RFC 7748 (section 5); as per the
//! RFC rules, the top bit of the input point is ignored, and no input
//! is filtered out (low-order points are processed like any other).
//!
//! On top of the raw primitive, the module provides the Diffie-Hellman
//! utilities of a key-exchange API: private key generation and
//! clamping, public key derivation, shared-secret derivation (with
//! rejection of the all-zero output), x-only small-subgroup membership
//! and torsion-freeness tests, and the Elligator 2 encoding of public
//! keys as uniform-looking 32-byte strings (with its inverse).
//!
//! [RFC 7748]: https://datatracker.ietf.org/doc/html/rfc7748

// Projective/fractional coordinates traditionally use uppercase letters,
// using lowercase only for affine coordinates.
#![allow(non_snake_case)]

use super::field::GF25519;
use super::{CryptoRng, RngCore};

/// Curve constant A (Montgomery form).
const CURVE_A: u32 = 486662;

/// Ladder constant (A - 2)/4.
const A24: u32 = 121665;

/// Non-square used by the Elligator 2 map.
const Z: i32 = 2;

/// Clamps a 32-byte scalar for use with X25519: the three low bits
/// are cleared (cofactor 8), the top bit is cleared, and bit 254 is
/// set.
pub fn clamp(scalar: &[u8; 32]) -> [u8; 32] {
    let mut s = *scalar;
    s[0] &= 248;
    s[31] &= 127;
    s[31] |= 64;
    s
}

// Montgomery ladder core: multiplies the point of u coordinate x1 by
// the integer encoded in the (already clamped, little-endian) scalar
// bytes, scanning the provided number of bits. Returns the projective
// (X:Z) result. The conditional swap is driven by the XOR of
// successive scalar bits, so that no secret-dependent transition is
// exposed.
fn ladder(x1: GF25519, s: &[u8], nbits: usize) -> (GF25519, GF25519) {
    let mut x2 = GF25519::ONE;
    let mut z2 = GF25519::ZERO;
    let mut x3 = x1;
    let mut z3 = GF25519::ONE;
    let mut swap = 0u32;

    for t in (0..nbits).rev() {
        let kt = (((s[t >> 3] >> (t & 7)) & 1) as u32).wrapping_neg();
        swap ^= kt;
        GF25519::cswap(&mut x2, &mut x3, swap);
        GF25519::cswap(&mut z2, &mut z3, swap);
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
    GF25519::cswap(&mut x2, &mut x3, swap);
    GF25519::cswap(&mut z2, &mut z3, swap);

    (x2, z2)
}

/// X25519 function (from RFC 7748), general case.
///
/// The source point is provided as an array of 32 bytes (`point`), as
/// well as the scalar (`scalar`). In RFC 7748 terminology, the `point`
/// parameter is the little-endian encoding of the u coordinate of a
/// point on the Montgomery curve or on its quadratic twist, and the
/// `scalar` parameter is the little-endian encoding of the scalar. The
/// function "clamps" the scalar (bits 0, 1, 2 and 255 are cleared, bit
/// 254 is set) then interprets the clamped scalar as an integer
/// (little-endian convention), with which the provided curve point is
/// multiplied; the u coordinate of the resulting point is then encoded
/// and returned.
pub fn x25519(point: &[u8; 32], scalar: &[u8; 32]) -> [u8; 32] {
    // Make clamped scalar.
    let s = clamp(scalar);

    // Decode the source point. As per RFC 7748 rules, the top bit is
    // ignored, and non-canonical values are acceptable.
    let mut u = *point;
    u[31] &= 127;
    let x1 = GF25519::decode_reduce(&u[..]);

    // Apply the RFC 7748 section 5 algorithm.
    let (x2, z2) = ladder(x1, &s, 255);
    (x2 / z2).encode()
}

/// Specialized version of X25519, when applied to the conventional
/// generator point (u = 9).
///
/// See `x25519()` for details.
pub fn x25519_base(scalar: &[u8; 32]) -> [u8; 32] {
    let mut u9 = [0u8; 32];
    u9[0] = 9;
    x25519(&u9, scalar)
}

// ========================================================================
// Diffie-Hellman utilities.

/// Generates a new X25519 private key (32 random bytes, clamped) from
/// a cryptographically secure RNG.
pub fn privkey_generate<T: CryptoRng + RngCore>(rng: &mut T) -> [u8; 32] {
    let mut s = [0u8; 32];
    rng.fill_bytes(&mut s);
    clamp(&s)
}

/// Computes the public key for a private key.
pub fn pubkey_create(priv_key: &[u8; 32]) -> [u8; 32] {
    x25519_base(priv_key)
}

/// Derives the shared secret between a private key and a peer public
/// key. The all-zero output (produced by low-order peer points) is
/// rejected.
pub fn derive(pub_key: &[u8; 32], priv_key: &[u8; 32]) -> Option<[u8; 32]> {
    let shared = x25519(pub_key, priv_key);
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
fn pge_double(X: GF25519, Zc: GF25519) -> (GF25519, GF25519) {
    let a = (X + Zc).square();
    let b = (X - Zc).square();
    let c = a - b;  // 4*X*Z
    (a * b, c * (a + c.mul_small(A24)))
}

/// Tests whether a public key lies in the small (cofactor) subgroup:
/// multiplying by the cofactor must yield the identity. Such keys
/// produce a constant shared secret and must be rejected where
/// contributory behaviour matters.
pub fn pubkey_is_small(pub_key: &[u8; 32]) -> bool {
    let mut u = *pub_key;
    u[31] &= 127;
    let mut X = GF25519::decode_reduce(&u[..]);
    let mut Zc = GF25519::ONE;
    // Cofactor is 8.
    for _ in 0..3 {
        let (nx, nz) = pge_double(X, Zc);
        X = nx;
        Zc = nz;
    }
    Zc.iszero() != 0
}

/// Tests whether a public key is free of torsion components: the
/// point, multiplied by the prime subgroup order, must yield the
/// identity.
pub fn pubkey_is_torsion_free(pub_key: &[u8; 32]) -> bool {
    // Subgroup order L = 2^252 + 27742317777372353535851937790883648493,
    // in little-endian bytes.
    let mut lb = [0u8; 32];
    let mut j = 0;
    for w in crate::ed25519::Scalar::MODULUS.iter() {
        lb[j..(j + 8)].copy_from_slice(&w.to_le_bytes());
        j += 8;
    }
    let mut u = *pub_key;
    u[31] &= 127;
    let x1 = GF25519::decode_reduce(&u[..]);
    let (_, z) = ladder(x1, &lb, 253);
    z.iszero() != 0
}

// ========================================================================
// Elligator 2.

// Computes g(x) = x^3 + A*x^2 + x.
fn solve_y2(x: &GF25519) -> GF25519 {
    (x.square() + x.mul_small(CURVE_A) + GF25519::ONE) * x
}

/// Maps a uniform 32-byte string to the u coordinate of a curve point
/// (Elligator 2). The top bit of the input is ignored. The output is
/// always the u coordinate of a point on the curve (never on the
/// twist); the map is constant-time, and covers about half of the
/// curve.
pub fn pubkey_from_uniform(bytes: &[u8; 32]) -> [u8; 32] {
    let mut tmp = *bytes;
    tmp[31] &= 127;
    let u = GF25519::decode_reduce(&tmp[..]);

    // x1 = -A / (1 + z*u^2)   (x1 = -A when the divisor is zero)
    // x2 = -x1 - A
    // x = x1 if g(x1) is square, x2 otherwise
    let mut d = GF25519::ONE + u.square().mul_small(Z as u32);
    d.set_cond(&GF25519::ONE, d.iszero());
    let x1 = -GF25519::from_u32(CURVE_A) / d;
    let x2 = -x1 - GF25519::from_u32(CURVE_A);

    let g1 = solve_y2(&x1);
    let alpha = !((g1.legendre() >> 1) as u32);
    let x = GF25519::select(&x2, &x1, alpha);
    x.encode()
}

/// Inverts the Elligator 2 map on a public key: produces a 32-byte
/// string that maps back to the same u coordinate. The low bit of
/// `hint` selects the preimage branch, bits 8 and up fill the unused
/// top bit of the output; the sign of the preimage follows the parity
/// of the lifted y coordinate. Returns `None` when the selected
/// branch has no preimage (a random hint succeeds with probability
/// about 1/2), or when the input is not the u coordinate of a curve
/// point.
pub fn pubkey_to_uniform(pub_key: &[u8; 32], hint: u32) -> Option<[u8; 32]> {
    let mut tmp = *pub_key;
    tmp[31] &= 127;
    let x = GF25519::decode_reduce(&tmp[..]);

    // The point must be on the curve (g(x) square), with a known y.
    let (y, yok) = solve_y2(&x).sqrt();
    if yok == 0 {
        return None;
    }

    // u1^2 = -(x + A) / (x*z)
    // u2^2 = -x / ((x + A)*z)
    let xa = x + GF25519::from_u32(CURVE_A);
    let mut n = xa;
    let mut d = x;
    GF25519::cswap(&mut n, &mut d, (hint & 1).wrapping_neg());
    let (mut u, ok) = (-n).isqrt(&d.mul_small(Z as u32));
    if ok == 0 {
        return None;
    }

    // The sign of u follows the sign of y.
    let ws = (((u.encode()[0] ^ y.encode()[0]) & 1) as u32).wrapping_neg();
    u.set_cond(&-u, ws);

    let mut out = u.encode();
    out[31] |= ((hint >> 8) as u8) & 0x80;
    Some(out)
}

// ========================================================================

#[cfg(test)]
mod tests {

    use super::{x25519, x25519_base, pubkey_from_uniform,
        pubkey_to_uniform, pubkey_is_small, pubkey_is_torsion_free,
        pubkey_create};
    use sha2::{Sha256, Digest};

    #[test]
    fn x25519_rfc7748() {
        // RFC 7748, section 5.2 test vectors.
        let mut scalar = [0u8; 32];
        hex::decode_to_slice("a546e36bf0527c9d3b16154b82465edd62144c0ac1fc5a18506a2244ba449ac4", &mut scalar[..]).unwrap();
        let mut point = [0u8; 32];
        hex::decode_to_slice("e6db6867583030db3594c1a424b15f7c726624ec26b3353b10a903a6d0ab1c4c", &mut point[..]).unwrap();
        let mut expected = [0u8; 32];
        hex::decode_to_slice("c3da55379de9c6908e94ea4df28d084f32eccf03491c71f754b4075577a28552", &mut expected[..]).unwrap();
        assert!(x25519(&point, &scalar) == expected);

        // RFC 7748, section 6.1 (Diffie-Hellman).
        let mut priv_a = [0u8; 32];
        hex::decode_to_slice("77076d0a7318a57d3c16c17251b26645df4c2f87ebc0992ab177fba51db92c2a", &mut priv_a[..]).unwrap();
        let mut priv_b = [0u8; 32];
        hex::decode_to_slice("5dab087e624a8a4b79e17f8b83800ee66f3bb1292618b6fd1c2f8b27ff88e0eb", &mut priv_b[..]).unwrap();
        let mut pub_a = [0u8; 32];
        hex::decode_to_slice("8520f0098930a754748b7ddcb43ef75a0dbf3a0d26381af4eba4a98eaa9b4e6a", &mut pub_a[..]).unwrap();
        let mut pub_b = [0u8; 32];
        hex::decode_to_slice("de9edb7d7b7dc1b4d35b61c2ece435373f8343c85b78674dadfc7e146f882b4f", &mut pub_b[..]).unwrap();
        let mut shared = [0u8; 32];
        hex::decode_to_slice("4a5d9d5ba4ce2de1728e3bf480350f25e07e21c947d19e3376f09b3c1e161742", &mut shared[..]).unwrap();
        assert!(pubkey_create(&priv_a) == pub_a);
        assert!(pubkey_create(&priv_b) == pub_b);
        assert!(x25519(&pub_b, &priv_a) == shared);
        assert!(x25519(&pub_a, &priv_b) == shared);
    }

    #[test]
    fn x25519_mc() {
        let mut k = [0u8; 32];
        k[0] = 9;
        let mut u = k;
        let mut ref1 = [0u8; 32];
        hex::decode_to_slice("422c8e7a6227d7bca1350b3e2bb7279f7897b87bb6854b783c60e80311ae3079", &mut ref1[..]).unwrap();
        for i in 0..100 {
            let old_k = k;
            k = x25519(&u, &k);
            u = old_k;
            if i == 0 {
                assert!(k == ref1);
            }
        }
    }

    #[test]
    fn x25519_basepoint() {
        let mut sh = Sha256::new();
        let mut b = [0u8; 32];
        b[0] = 9;
        for i in 0..10 {
            sh.update(&(i as u64).to_le_bytes());
            let v = sh.finalize_reset();
            let mut k = [0u8; 32];
            k[..].copy_from_slice(&v);
            assert!(x25519(&b, &k) == x25519_base(&k));
        }
    }

    #[test]
    fn subgroups() {
        // The base point generates the prime-order subgroup.
        let mut b = [0u8; 32];
        b[0] = 9;
        assert!(!pubkey_is_small(&b));
        assert!(pubkey_is_torsion_free(&b));

        // u = 0 is a point of order 2.
        let zero = [0u8; 32];
        assert!(pubkey_is_small(&zero));
        assert!(!pubkey_is_torsion_free(&zero));
    }

    #[test]
    fn elligator() {
        let mut sh = Sha256::new();
        for i in 0..10 {
            sh.update(&(i as u64).to_le_bytes());
            let r: [u8; 32] = sh.finalize_reset().into();
            let u = pubkey_from_uniform(&r);
            // Round trip through the inverse map.
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
