#![allow(non_snake_case)]

mod util;
use util::core_cycles;

use curvl::p256::{Curve, PrivateKey};

fn bench_mulgen(cv: &Curve) -> (f64, u8) {
    let z = core_cycles();
    let mut seed = [0u8; 32];
    seed[..8].copy_from_slice(&z.to_le_bytes());
    let skey = PrivateKey::from_seed(&seed);
    let mut pp = skey.to_public_key(cv).point;
    let mut tt = [0; 30];
    for i in 0..tt.len() {
        let begin = core_cycles();
        for _ in 0..30 {
            let s = curvl::p256::Scalar::decode_reduce(&pp.encode_compressed());
            pp = cv.mulgen(&s);
        }
        let end = core_cycles();
        tt[i] = end.wrapping_sub(begin);
    }
    tt.sort();
    ((tt[tt.len() >> 1] as f64) / 30.0, pp.encode_compressed()[1])
}

fn bench_sign(cv: &Curve) -> (f64, u8) {
    let z = core_cycles();
    let mut seed = [0u8; 32];
    seed[..8].copy_from_slice(&z.to_le_bytes());
    let skey = PrivateKey::from_seed(&seed);
    let mut hv = [0u8; 32];
    hv[..8].copy_from_slice(&z.to_le_bytes());
    let mut tt = [0; 30];
    let mut x = 0u8;
    for i in 0..tt.len() {
        let begin = core_cycles();
        for _ in 0..30 {
            let (sig, _) = skey.sign_hash(cv, &hv);
            hv[..32].copy_from_slice(&sig[..32]);
            x ^= sig[40];
        }
        let end = core_cycles();
        tt[i] = end.wrapping_sub(begin);
    }
    tt.sort();
    ((tt[tt.len() >> 1] as f64) / 30.0, x)
}

fn bench_verify(cv: &Curve) -> (f64, u8) {
    let z = core_cycles();
    let mut seed = [0u8; 32];
    seed[..8].copy_from_slice(&z.to_le_bytes());
    let skey = PrivateKey::from_seed(&seed);
    let pkey = skey.to_public_key(cv);
    let hv = [69u8; 32];
    let (sig, _) = skey.sign_hash(cv, &hv);
    let mut tt = [0; 30];
    let mut x = 0u8;
    for i in 0..tt.len() {
        let begin = core_cycles();
        for _ in 0..30 {
            x ^= pkey.verify_hash(cv, &sig, &hv) as u8;
        }
        let end = core_cycles();
        tt[i] = end.wrapping_sub(begin);
    }
    tt.sort();
    ((tt[tt.len() >> 1] as f64) / 30.0, x)
}

fn main() {
    let cv = Curve::new();
    let mut bx = 0u8;

    let (v, x) = bench_mulgen(&cv);
    bx ^= x;
    println!("P-256 mulgen:                  {:13.2}", v);
    let (v, x) = bench_sign(&cv);
    bx ^= x;
    println!("P-256 ECDSA sign:              {:13.2}", v);
    let (v, x) = bench_verify(&cv);
    bx ^= x;
    println!("P-256 ECDSA verify:            {:13.2}", v);

    println!("{}", bx);
}
