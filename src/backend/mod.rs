//! Field backend.
//!
//! This module provides the arithmetic backend on which all curve
//! fields and scalar fields are built. A single generic implementation
//! is used: the `define_gfgen` macro produces, for a given odd modulus
//! (provided as 64-bit limbs in a parameter structure), a dedicated
//! structure type implementing constant-time modular arithmetic with
//! Montgomery multiplication. The macro-generated type covers the
//! backend contract expected by the curve layers:
//!
//!  - An instance encapsulates a field element; `Self::ZERO`,
//!    `Self::ONE`, `Self::TWO`, `Self::THREE` and `Self::MINUS_ONE`
//!    are provided as constants, and arbitrary constants can be
//!    defined with the const-qualified `w64le()` and `w64be()`
//!    functions.
//!
//!  - Usual arithmetic operators (`+`, `-`, `*`, `/`, and compound
//!    assignments) work on both values and references. Division by
//!    zero yields zero.
//!
//!  - `set_cond()`, `select()` and `cswap()` perform constant-time
//!    conditional assignment, selection and swap, driven by a `u32`
//!    mask (0xFFFFFFFF for true, 0x00000000 for false; no other value
//!    shall be used).
//!
//!  - `square()`, `xsquare()`, `half()`, `mul2()`, `mul3()`, `mul4()`,
//!    `mul8()`, `mul16()`, `mul32()` and `mul_small()` provide the
//!    cheap derived operations used by curve formulas.
//!
//!  - `invert()` and `batch_invert()` compute inversions (the inverse
//!    of zero is zero); `legendre()` returns the quadratic residue
//!    status; `sqrt()` and `sqrt_ext()` compute square roots for
//!    moduli equal to 3, 5 or 7 modulo 8, and also for moduli equal
//!    to 1 modulo 8 when the parameter structure supplies a quadratic
//!    non-residue (`QNR`); `isqrt()` computes sqrt(u/v).
//!
//!  - `encode()`, `decode_ct()`, `decode()` and `decode_reduce()`
//!    convert to/from unsigned little-endian bytes; decoding enforces
//!    canonicality except for the explicitly reducing variant.
//!
//!  - For scalar fields, `is_high()` (value greater than half the
//!    modulus), `minimize()` (conditional negation to the low range,
//!    returning the sign mask) and `mul_shift()` (integer product
//!    followed by a rounded right shift) support signature
//!    normalization and endomorphism splitting.
//!
//! All operations are constant-time unless explicitly documented
//! otherwise. The implementation uses 64-bit limbs; there is no
//! 32-bit backend in this crate.

#[cfg(not(target_pointer_width = "64"))]
compile_error!("this crate requires a target with 64-bit pointers");

pub mod w64;

pub use crate::define_gfgen;
pub use crate::define_gfgen_tests;
