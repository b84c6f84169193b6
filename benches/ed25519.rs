#![allow(non_snake_case)]

mod util;
use util::core_cycles;

use curvl::ed25519::{Curve, PrivateKey};

fn bench_sign(cv: &Curve) -> (f64, u8) {
    let z = core_cycles();
    let mut seed = [0u8; 32];
    seed[..8].copy_from_slice(&z.to_le_bytes());
    let skey = PrivateKey::from_seed(cv, &seed);
    let mut msg = [0u8; 32];
    msg[..8].copy_from_slice(&z.to_le_bytes());
    let mut tt = [0; 30];
    let mut x = 0u8;
    for i in 0..tt.len() {
        let begin = core_cycles();
        for _ in 0..30 {
            let sig = skey.sign_raw(cv, &msg);
            msg[..32].copy_from_slice(&sig[..32]);
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
    let skey = PrivateKey::from_seed(cv, &seed);
    let pkey = skey.public_key;
    let msg = [37u8; 32];
    let sig = skey.sign_raw(cv, &msg);
    let mut tt = [0; 30];
    let mut x = 0u8;
    for i in 0..tt.len() {
        let begin = core_cycles();
        for _ in 0..30 {
            x ^= pkey.verify_raw(cv, &sig, &msg) as u8;
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

    let (v, x) = bench_sign(&cv);
    bx ^= x;
    println!("Ed25519 sign:                  {:13.2}", v);
    let (v, x) = bench_verify(&cv);
    bx ^= x;
    println!("Ed25519 verify:                {:13.2}", v);

    println!("{}", bx);
}
