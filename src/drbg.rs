//! HMAC-DRBG.
//!
//! Deterministic random bit generator built on HMAC (SP 800-90A
//! profile, no personalization string). This is the generator used for
//! ECDSA nonces (where, seeded with the concatenation of the private
//! scalar and the reduced message, it reproduces the RFC 6979
//! process), for sampling batch-verification coefficients, and for the
//! retry loops of point-to-hash encodings. The hash function is a type
//! parameter; curves pin their own hash.

use hmac::{Mac, SimpleHmac};
use hmac::digest::{Digest, FixedOutputReset, Output};
use hmac::digest::core_api::BlockSizeUser;
use zeroize::Zeroize;

/// HMAC-DRBG state (key and chaining value).
pub struct HmacDrbg<D: Digest + BlockSizeUser + FixedOutputReset> {
    k: Output<D>,
    v: Output<D>,
}

impl<D: Digest + BlockSizeUser + FixedOutputReset> HmacDrbg<D> {

    /// Creates a new instance from the provided seed material.
    pub fn new(seed: &[u8]) -> Self {
        let mut r = Self {
            k: Output::<D>::default(),
            v: Output::<D>::default(),
        };
        for b in r.v.iter_mut() {
            *b = 0x01;
        }
        r.reseed(seed);
        r
    }

    fn hmac(key: &[u8], parts: &[&[u8]]) -> Output<D> {
        let mut hm = <SimpleHmac<D> as Mac>::new_from_slice(key)
            .expect("HMAC accepts any key length");
        for p in parts.iter() {
            Mac::update(&mut hm, p);
        }
        hm.finalize().into_bytes()
    }

    /// Injects additional seed material into the state.
    pub fn reseed(&mut self, seed: &[u8]) {
        self.k = Self::hmac(&self.k, &[&self.v, &[0x00u8], seed]);
        self.v = Self::hmac(&self.k, &[&self.v]);
        if seed.len() > 0 {
            self.k = Self::hmac(&self.k, &[&self.v, &[0x01u8], seed]);
            self.v = Self::hmac(&self.k, &[&self.v]);
        }
    }

    /// Fills `out` with pseudorandom bytes.
    pub fn generate(&mut self, out: &mut [u8]) {
        let mut off = 0;
        while off < out.len() {
            self.v = Self::hmac(&self.k, &[&self.v]);
            let clen = core::cmp::min(self.v.len(), out.len() - off);
            out[off..(off + clen)].copy_from_slice(&self.v[..clen]);
            off += clen;
        }
        self.k = Self::hmac(&self.k, &[&self.v, &[0x00u8]]);
        self.v = Self::hmac(&self.k, &[&self.v]);
    }
}

impl<D: Digest + BlockSizeUser + FixedOutputReset> Drop for HmacDrbg<D> {
    fn drop(&mut self) {
        self.k.as_mut_slice().zeroize();
        self.v.as_mut_slice().zeroize();
    }
}

#[cfg(test)]
mod tests {

    use super::HmacDrbg;
    use sha2::Sha256;

    #[test]
    fn determinism() {
        let mut d1 = HmacDrbg::<Sha256>::new(&[1, 2, 3, 4]);
        let mut d2 = HmacDrbg::<Sha256>::new(&[1, 2, 3, 4]);
        let mut a = [0u8; 75];
        let mut b = [0u8; 75];
        d1.generate(&mut a);
        d2.generate(&mut b);
        assert!(a == b);
        d1.generate(&mut a);
        d2.generate(&mut b);
        assert!(a == b);
        let mut d3 = HmacDrbg::<Sha256>::new(&[1, 2, 3, 5]);
        d3.generate(&mut b);
        assert!(a != b);
    }

    #[test]
    fn reseed_changes_stream() {
        let mut d1 = HmacDrbg::<Sha256>::new(&[9u8; 32]);
        let mut d2 = HmacDrbg::<Sha256>::new(&[9u8; 32]);
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        d1.generate(&mut a);
        d2.reseed(&[1u8]);
        d2.generate(&mut b);
        assert!(a != b);
    }
}
