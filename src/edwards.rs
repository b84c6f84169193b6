//! Twisted Edwards group layer.
//!
//! This module defines the macros that generate, for a given base
//! field, scalar field and parameter block, the group and protocol
//! implementation of a (twisted) Edwards curve `a*x^2 + y^2 = 1 +
//! d*x^2*y^2`:
//!
//!  - `define_edwards!` produces the `Point` type in extended
//!    coordinates (X : Y : Z : T) with T = X*Y/Z, the unified
//!    complete addition and doubling kernels (Hisil-Wong-Carter-Dawson
//!    2008, with the multiplication by `a` inlined for the two
//!    supported cases a = -1 and a = 1), the RFC 8032 point encoding
//!    (y with the sign of x in the top bit), constant-time windowed
//!    scalar multiplication, the `Curve` context (runtime-built
//!    generator tables, additive blinding), variable-time double and
//!    multi scalar multiplication, cofactor and torsion tests, the
//!    conversions to/from the isomorphic Montgomery curve, and
//!    hashing to the curve with Elligator 2 through that isomorphism
//!    (forward and inverse maps).
//!
//!  - `define_eddsa!` produces the EdDSA key types and operations per
//!    RFC 8032: key expansion (hash, split, clamp), pure/context/
//!    pre-hashed signing and verification with the dom separation
//!    string, the cofactor-multiplied ("single") verification
//!    variant, batch verification, and key tweaking. The hash is
//!    supplied by the invoking module as a small adapter type, since
//!    the registry mixes SHA-512 and SHAKE-256.
//!
//! The completeness of the addition law requires `d` to be a
//! non-square in the field, and `a` to be 1 or a square (-1 is a
//! square for the a = -1 curve of the registry, whose field has
//! p = 1 mod 4); all curves in the registry satisfy this, so no
//! secret-dependent special case exists anywhere in the kernels.
//! The same `u32` mask conventions as in the rest of the crate apply,
//! and `vartime` functions must only receive public data. Byte
//! encodings on these curves are little-endian throughout.

#[doc(hidden)]
#[macro_export]
macro_rules! define_edwards_mul_a {
    (minus1, $gf:ident) => {
        // a = -1
        #[inline(always)]
        fn edwards_mul_a(x: &$gf) -> $gf {
            -x
        }
    };
    (one, $gf:ident) => {
        // a = 1
        #[inline(always)]
        fn edwards_mul_a(x: &$gf) -> $gf {
            *x
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! define_edwards {
    ($akind:tt, $gf:ident, $scalar:ident, $params:ident) => {

    $crate::define_edwards_mul_a!{$akind, $gf}

    /// A point on the curve, in extended coordinates: x = X/Z,
    /// y = Y/Z, T = X*Y/Z, with Z != 0 for all points.
    #[derive(Clone, Copy, Debug)]
    pub struct Point {
        pub(crate) X: $gf,
        pub(crate) Y: $gf,
        pub(crate) Z: $gf,
        pub(crate) T: $gf,
    }

    /// A point in affine coordinates, with the precomputed x*y
    /// product (used for the generator tables and mixed additions).
    #[derive(Clone, Copy, Debug)]
    pub(crate) struct PointAffine {
        pub(crate) x: $gf,
        pub(crate) y: $gf,
        pub(crate) t: $gf,
    }

    impl Point {

        // Encoded lengths, in bytes. The "adjusted" length appends a
        // sign byte when the field length is an exact byte count.
        pub(crate) const FLEN: usize = $gf::ENC_LEN;
        pub(crate) const ADJ_LEN: usize = $gf::ENC_LEN
            + ((($gf::BITLEN & 7) == 0) as usize);

        // Signed-digit counts for the multiplication ladders, and the
        // wNAF digit count.
        pub(crate) const NDIG5: usize = ($scalar::BITLEN + 4) / 5;
        pub(crate) const NDIG4: usize = (($scalar::BITLEN + 3) / 4) + 1;
        pub(crate) const NAFLEN: usize = $scalar::BITLEN + 1;

        /// The group neutral; affine coordinates (0, 1).
        pub const NEUTRAL: Self = Self {
            X: $gf::ZERO,
            Y: $gf::ONE,
            Z: $gf::ONE,
            T: $gf::ZERO,
        };

        /// The conventional generator.
        pub fn base() -> Self {
            Self {
                X: $params::GX,
                Y: $params::GY,
                Z: $gf::ONE,
                T: $params::GX * $params::GY,
            }
        }

        /// Tries to decode a point from its RFC 8032 encoding (y in
        /// little-endian, sign of x in the top bit). On success,
        /// 0xFFFFFFFF is returned; on failure, this point is set to
        /// the neutral and 0x00000000 is returned. The decoded value
        /// does not leak through side channels (the outcome may).
        pub fn set_decode(&mut self, buf: &[u8]) -> u32 {
            *self = Self::NEUTRAL;
            if buf.len() != Self::ADJ_LEN {
                return 0;
            }

            // Extract the sign bit; decode y (canonical encodings
            // only). When a separate sign byte is used, its low seven
            // bits must be zero.
            let mut yb = [0u8; Self::FLEN];
            yb.copy_from_slice(&buf[..Self::FLEN]);
            let sign_x;
            let mut r = 0xFFFFFFFFu32;
            if Self::ADJ_LEN > Self::FLEN {
                sign_x = buf[Self::FLEN] >> 7;
                r &= ((((buf[Self::FLEN] & 0x7F) as i32) - 1) >> 8) as u32;
            } else {
                sign_x = yb[Self::FLEN - 1] >> 7;
                yb[Self::FLEN - 1] &= 0x7F;
            }
            let (y, ry) = $gf::decode_ct(&yb);
            r &= ry;

            // x^2 = (y^2 - 1) / (d*y^2 - a)
            let y2 = y.square();
            let u = y2 - $gf::ONE;
            let v = $params::D * y2 - edwards_mul_a(&$gf::ONE);
            let (mut x, rx) = u.isqrt(&v);
            r &= rx | u.iszero();

            // Select the root whose parity matches the sign bit; if
            // x = 0, a sign bit of 1 is an invalid encoding.
            let nx = (((x.encode()[0] ^ sign_x) & 0x01) as u32)
                .wrapping_neg();
            r &= !(x.iszero() & nx);
            x.set_cond(&-x, nx);

            x.set_cond(&$gf::ZERO, !r);
            let y = $gf::select(&$gf::ONE, &y, r);

            self.X = x;
            self.Y = y;
            self.Z = $gf::ONE;
            self.T = x * y;
            r
        }

        /// Tries to decode a point (see `set_decode()`).
        pub fn decode(buf: &[u8]) -> Option<Point> {
            let mut P = Point::NEUTRAL;
            if P.set_decode(buf) != 0 {
                Some(P)
            } else {
                None
            }
        }

        /// Encodes this point (y in little-endian, sign of x in the
        /// top bit of the last byte).
        pub fn encode(self) -> [u8; Self::ADJ_LEN] {
            let iZ = $gf::ONE / self.Z;
            let x = self.X * iZ;
            let y = self.Y * iZ;
            let mut b = [0u8; Self::ADJ_LEN];
            b[..Self::FLEN].copy_from_slice(&y.encode());
            b[Self::ADJ_LEN - 1] |= (x.encode()[0] & 0x01) << 7;
            b
        }

        /// Adds point `rhs` to `self`. The formulas are unified and
        /// complete: they work for all combinations of inputs.
        pub(crate) fn set_add(&mut self, rhs: &Self) {
            let (X1, Y1, Z1, T1) = (&self.X, &self.Y, &self.Z, &self.T);
            let (X2, Y2, Z2, T2) = (&rhs.X, &rhs.Y, &rhs.Z, &rhs.T);

            // Extended unified addition (Hisil-Wong-Carter-Dawson
            // 2008, section 3.1).
            let A = X1 * X2;
            let B = Y1 * Y2;
            let C = $params::D * T1 * T2;
            let D = Z1 * Z2;
            let E = (X1 + Y1) * (X2 + Y2) - A - B;
            let F = D - C;
            let G = D + C;
            let H = B - edwards_mul_a(&A);

            self.X = E * F;
            self.Y = G * H;
            self.Z = F * G;
            self.T = E * H;
        }

        /// Adds the affine point `rhs` to `self`.
        ///
        /// If the point to add is the neutral, then the coordinates
        /// of `rhs` can be arbitrary and `rz` is 0xFFFFFFFF;
        /// otherwise, `rz` is 0x00000000.
        pub(crate) fn set_add_affine(&mut self, rhs: &PointAffine, rz: u32) {
            let (X1, Y1, Z1, T1) = (&self.X, &self.Y, &self.Z, &self.T);
            let (x2, y2, t2) = (&rhs.x, &rhs.y, &rhs.t);

            // Same formulas as in set_add(), with Z2 = 1.
            let A = X1 * x2;
            let B = Y1 * y2;
            let C = $params::D * T1 * t2;
            let E = (X1 + Y1) * (x2 + y2) - A - B;
            let F = Z1 - C;
            let G = Z1 + C;
            let H = B - edwards_mul_a(&A);

            let X3 = E * F;
            let Y3 = G * H;
            let Z3 = F * G;
            let T3 = E * H;

            self.X.set_cond(&X3, !rz);
            self.Y.set_cond(&Y3, !rz);
            self.Z.set_cond(&Z3, !rz);
            self.T.set_cond(&T3, !rz);
        }

        /// Subtracts the affine point `rhs` from `self` (same `rz`
        /// convention as `set_add_affine()`).
        pub(crate) fn set_sub_affine(&mut self, rhs: &PointAffine, rz: u32) {
            self.set_add_affine(&PointAffine {
                x: -rhs.x, y: rhs.y, t: -rhs.t }, rz);
        }

        /// Doubles this point (in place).
        pub fn set_double(&mut self) {
            let (X1, Y1, Z1) = (&self.X, &self.Y, &self.Z);

            // Extended doubling (dbl-2008-hwcd).
            let A = X1.square();
            let B = Y1.square();
            let C = Z1.square().mul2();
            let D = edwards_mul_a(&A);
            let E = (X1 + Y1).square() - A - B;
            let G = D + B;
            let F = G - C;
            let H = D - B;

            self.X = E * F;
            self.Y = G * H;
            self.Z = F * G;
            self.T = E * H;
        }

        /// Doubles this point n times (in place).
        pub fn set_xdouble(&mut self, n: u32) {
            for _ in 0..n {
                self.set_double();
            }
        }

        /// Doubles this point.
        #[inline(always)]
        pub fn double(self) -> Self {
            let mut r = self;
            r.set_double();
            r
        }

        /// Doubles this point n times.
        #[inline(always)]
        pub fn xdouble(self, n: u32) -> Self {
            let mut r = self;
            r.set_xdouble(n);
            r
        }

        /// Negates this point (in place).
        #[inline(always)]
        pub fn set_neg(&mut self) {
            self.X.set_neg();
            self.T.set_neg();
        }

        /// Subtracts point `rhs` from `self`.
        pub(crate) fn set_sub(&mut self, rhs: &Self) {
            self.set_add(&-rhs);
        }

        /// Compares two points for equality (0xFFFFFFFF on equality,
        /// 0x00000000 otherwise).
        #[inline]
        pub fn equals(self, rhs: Self) -> u32 {
            (self.X * rhs.Z).equals(rhs.X * self.Z)
            & (self.Y * rhs.Z).equals(rhs.Y * self.Z)
        }

        /// Tests whether this point is the neutral.
        #[inline]
        pub fn isneutral(self) -> u32 {
            self.X.iszero() & self.Y.equals(self.Z)
        }

        /// Conditionally copies the provided point (`P`) into `self`
        /// (if `ctl` is 0xFFFFFFFF). `ctl` MUST be 0x00000000 or
        /// 0xFFFFFFFF.
        #[inline]
        pub fn set_cond(&mut self, P: &Self, ctl: u32) {
            self.X.set_cond(&P.X, ctl);
            self.Y.set_cond(&P.Y, ctl);
            self.Z.set_cond(&P.Z, ctl);
            self.T.set_cond(&P.T, ctl);
        }

        /// Returns `P0` (if `ctl` is 0x00000000) or `P1` (if `ctl` is
        /// 0xFFFFFFFF).
        #[inline(always)]
        pub fn select(P0: &Self, P1: &Self, ctl: u32) -> Self {
            let mut P = *P0;
            P.set_cond(P1, ctl);
            P
        }

        /// Conditionally negates this point (if `ctl` is 0xFFFFFFFF).
        #[inline]
        pub fn set_condneg(&mut self, ctl: u32) {
            self.X.set_cond(&-self.X, ctl);
            self.T.set_cond(&-self.T, ctl);
        }

        /// Multiplies this point by the curve cofactor (in place).
        pub fn set_mulh(&mut self) {
            self.set_xdouble($params::COFACTOR_LOG);
        }

        /// Tests whether this point has low order (multiplying by the
        /// cofactor yields the neutral, while the point itself is not
        /// the neutral).
        pub fn has_low_order(self) -> u32 {
            let mut P = self;
            P.set_mulh();
            P.isneutral() & !self.isneutral()
        }

        /// Tests whether this point is free of torsion components:
        /// multiplying by the prime subgroup order must yield the
        /// neutral. (The addition pattern depends only on the public
        /// group order, so this is constant-time with regard to the
        /// point.)
        pub fn is_torsion_free(self) -> u32 {
            // Multiply by L with a plain double-and-add over its bits.
            let mut lb = [0u8; $scalar::ENC_LEN];
            let mut j = 0;
            for w in $scalar::MODULUS.iter() {
                if j + 8 <= $scalar::ENC_LEN {
                    lb[j..(j + 8)].copy_from_slice(&w.to_le_bytes());
                }
                j += 8;
            }
            let mut P = Self::NEUTRAL;
            for i in (0..$scalar::BITLEN).rev() {
                P.set_double();
                if ((lb[i >> 3] >> (i & 7)) & 1) != 0 {
                    P.set_add(&self);
                }
            }
            P.isneutral()
        }

        /// Recodes a scalar into `NDIG5` signed 5-bit digits (each in
        /// -15..+16).
        fn recode_scalar(n: &$scalar) -> [i8; Self::NDIG5] {
            let mut sd = [0i8; Self::NDIG5];
            let bb = n.encode();
            let mut cc: u32 = 0;
            let mut i: usize = 0;
            let mut acc: u32 = 0;
            let mut acc_len: i32 = 0;
            for j in 0..Self::NDIG5 {
                if acc_len < 5 && i < bb.len() {
                    acc |= (bb[i] as u32) << acc_len;
                    acc_len += 8;
                    i += 1;
                }
                let d = (acc & 0x1F) + cc;
                acc >>= 5;
                acc_len -= 5;
                let m = 16u32.wrapping_sub(d) >> 8;
                sd[j] = (d.wrapping_sub(m & 32)) as i8;
                cc = m & 1;
            }
            sd
        }

        /// Recodes a scalar into `NDIG4` signed 4-bit digits (each in
        /// -7..+8).
        fn recode_scalar4(n: &$scalar) -> [i8; Self::NDIG4] {
            let mut sd = [0i8; Self::NDIG4];
            let bb = n.encode();
            let mut cc: u32 = 0;
            for j in 0..Self::NDIG4 {
                let b = if (j >> 1) < bb.len() {
                        bb[j >> 1] as u32
                    } else {
                        0
                    };
                let d = ((b >> ((j & 1) << 2)) & 0x0F) + cc;
                let m = 8u32.wrapping_sub(d) >> 8;
                sd[j] = (d.wrapping_sub(m & 16)) as i8;
                cc = m & 1;
            }
            sd
        }

        /// Lookups a point from a 16-entry window, with sign handling
        /// (constant-time; every entry is read).
        fn lookup(win: &[Self; 16], k: i8) -> Self {
            let s = ((k as i32) >> 8) as u32;
            let f = ((k as u32) ^ s).wrapping_sub(s);
            let mut P = Self::NEUTRAL;
            for i in 0..16 {
                let j = (i as u32) + 1;
                let w = !(f.wrapping_sub(j) | j.wrapping_sub(f));
                let w = ((w as i32) >> 31) as u32;

                P.X.set_cond(&win[i].X, w);
                P.Y.set_cond(&win[i].Y, w);
                P.Z.set_cond(&win[i].Z, w);
                P.T.set_cond(&win[i].T, w);
            }
            P.set_condneg(s);
            P
        }

        /// Lookups a point from an 8-entry affine window, with sign
        /// handling (constant-time); also returns the neutral mask
        /// (for digit 0).
        fn lookup8_affine(win: &[PointAffine; 8], k: i8) -> (PointAffine, u32) {
            let s = ((k as i32) >> 8) as u32;
            let f = ((k as u32) ^ s).wrapping_sub(s);
            let mut P = PointAffine {
                x: $gf::ZERO, y: $gf::ONE, t: $gf::ZERO };
            for i in 0..8 {
                let j = (i as u32) + 1;
                let w = !(f.wrapping_sub(j) | j.wrapping_sub(f));
                let w = ((w as i32) >> 31) as u32;

                P.x.set_cond(&win[i].x, w);
                P.y.set_cond(&win[i].y, w);
                P.t.set_cond(&win[i].t, w);
            }
            P.x.set_cond(&-P.x, s);
            P.t.set_cond(&-P.t, s);
            let fz = (((f as i32) - 1) >> 8) as u32;
            (P, fz)
        }

        /// Multiplies this point by a scalar (in place).
        ///
        /// This operation is constant-time with regard to both the
        /// point and the scalar.
        pub fn set_mul(&mut self, n: &$scalar) {
            // Make a 5-bit window: win[i] contains (i+1)*P.
            let mut win = [Self::NEUTRAL; 16];
            win[0] = *self;
            for i in 1..8 {
                let j = 2 * i;
                win[j - 1] = win[i - 1].double();
                win[j] = win[j - 1] + win[0];
            }
            win[15] = win[7].double();

            let sd = Self::recode_scalar(n);
            *self = Self::lookup(&win, sd[Self::NDIG5 - 1]);
            for i in (0..(Self::NDIG5 - 1)).rev() {
                self.set_xdouble(5);
                self.set_add(&Self::lookup(&win, sd[i]));
            }
        }

        /// Converts a slice of points to affine coordinates, with a
        /// single shared inversion. (Z is never zero on these
        /// curves, so this works for all points.)
        fn to_affine_batch(pp: &[Self], out: &mut [PointAffine]) {
            let mut zz = [$gf::ZERO; 64];
            let n = pp.len();
            assert!(n <= 64 && n == out.len());
            for i in 0..n {
                zz[i] = pp[i].Z;
            }
            $gf::batch_invert(&mut zz[..n]);
            for i in 0..n {
                let x = pp[i].X * zz[i];
                let y = pp[i].Y * zz[i];
                out[i] = PointAffine { x, y, t: x * y };
            }
        }
    }

    // ====================================================================
    // Variable-time recodings (shared shapes with the Weierstrass
    // layer; digits are produced from the canonical little-endian
    // scalar bytes).

    fn get_bits_le(bb: &[u8], bit: usize, w: u32) -> u32 {
        let mut v = 0u32;
        for i in 0..w {
            let j = bit + (i as usize);
            if (j >> 3) < bb.len() {
                v |= (((bb[j >> 3] >> (j & 7)) & 1) as u32) << i;
            }
        }
        v
    }

    // Width-w NAF recoding; NOT constant-time.
    fn naf_recode(bb: &[u8], w: u32, sd: &mut [i16]) {
        for d in sd.iter_mut() {
            *d = 0;
        }
        let mut carry = 0u32;
        let mut bit = 0usize;
        while bit < sd.len() {
            if get_bits_le(bb, bit, 1) == carry {
                bit += 1;
                continue;
            }
            let word = get_bits_le(bb, bit, w) + carry;
            carry = (word >> (w - 1)) & 1;
            sd[bit] = (word as i32 - ((carry as i32) << w)) as i16;
            bit += w as usize;
        }
    }

    // Joint sparse form of two scalars; digit convention: +-1 for P1,
    // +-7 for P2, +-3 for P1+P2, +-5 for P1-P2. NOT constant-time.
    fn jsf_recode(b1: &[u8; $scalar::ENC_LEN], b2: &[u8; $scalar::ENC_LEN],
        sd: &mut [i16])
    {
        const TABLE: [i16; 9] = [ -3, -1, -5, -7, 0, 7, 5, 1, 3 ];

        fn shr1(k: &mut [u8; $scalar::ENC_LEN]) {
            let mut cc = 0u8;
            for i in (0..$scalar::ENC_LEN).rev() {
                let w = k[i];
                k[i] = (w >> 1) | (cc << 7);
                cc = w & 1;
            }
        }

        let mut k1 = *b1;
        let mut k2 = *b2;
        let mut d1 = 0i32;
        let mut d2 = 0i32;
        for i in 0..sd.len() {
            let mut m14 = (((k1[0] & 3) as i32) + d1) & 3;
            let mut m24 = (((k2[0] & 3) as i32) + d2) & 3;
            if m14 == 3 {
                m14 = -1;
            }
            if m24 == 3 {
                m24 = -1;
            }

            let mut u1 = 0i32;
            if (m14 & 1) != 0 {
                let m8 = (((k1[0] & 7) as i32) + d1) & 7;
                u1 = if (m8 == 3 || m8 == 5) && m24 == 2 { -m14 } else { m14 };
            }
            let mut u2 = 0i32;
            if (m24 & 1) != 0 {
                let m8 = (((k2[0] & 7) as i32) + d2) & 7;
                u2 = if (m8 == 3 || m8 == 5) && m14 == 2 { -m24 } else { m24 };
            }

            sd[i] = TABLE[((u1 + 1) * 3 + (u2 + 1)) as usize];

            if 2 * d1 == u1 + 1 {
                d1 = 1 - d1;
            }
            if 2 * d2 == u2 + 1 {
                d2 = 1 - d2;
            }
            shr1(&mut k1);
            shr1(&mut k2);
        }
    }

    // ====================================================================
    // Curve context.

    /// Per-curve context: precomputed generator tables (4-bit comb
    /// and width-8 wNAF) and the additive blinding state. Built once,
    /// refreshed with `randomize()`; concurrent use requires external
    /// synchronization.
    pub struct Curve {
        comb: [[PointAffine; 8]; Point::NDIG4],
        naf: [PointAffine; 64],
        blind: $scalar,
        unblind: Point,
    }

    impl Curve {

        /// Builds the context for this curve.
        pub fn new() -> Self {
            let dummy = PointAffine {
                x: $gf::ZERO, y: $gf::ONE, t: $gf::ZERO };
            let mut comb = [[dummy; 8]; Point::NDIG4];
            let mut Q = Point::base();
            for i in 0..Point::NDIG4 {
                let mut row = [Point::NEUTRAL; 8];
                row[0] = Q;
                for j in 1..8 {
                    row[j] = row[j - 1] + Q;
                }
                Point::to_affine_batch(&row, &mut comb[i]);
                Q = Q.xdouble(4);
            }

            let mut tt = [Point::NEUTRAL; 64];
            tt[0] = Point::base();
            let G2 = Point::base().double();
            for i in 1..64 {
                tt[i] = tt[i - 1] + G2;
            }
            let mut naf = [dummy; 64];
            Point::to_affine_batch(&tt, &mut naf);

            Self {
                comb: comb,
                naf: naf,
                blind: $scalar::ZERO,
                unblind: Point::NEUTRAL,
            }
        }

        /// Samples a non-zero scalar from the provided generator.
        fn scalar_random(rng: &mut $crate::drbg::HmacDrbg<sha2::Sha256>)
            -> $scalar
        {
            let mut bb = [0u8; $scalar::ENC_LEN];
            loop {
                rng.generate(&mut bb);
                if $scalar::BITLEN & 7 != 0 {
                    bb[$scalar::ENC_LEN - 1] &=
                        (1u8 << ($scalar::BITLEN & 7)) - 1;
                }
                let (x, r) = $scalar::decode_ct(&bb);
                if r != 0 && x.iszero() == 0 {
                    use zeroize::Zeroize;
                    bb.zeroize();
                    return x;
                }
            }
        }

        /// Refreshes the blinding state from the provided entropy.
        /// This is the only mutating operation on a context.
        pub fn randomize(&mut self, entropy: &[u8]) {
            let mut rng = $crate::drbg::HmacDrbg::<sha2::Sha256>::new(entropy);
            let b = Self::scalar_random(&mut rng);
            let B = self.mulgen(&b);
            self.blind = -b;
            self.unblind = B;
        }

        /// Multiplies the conventional generator by the provided
        /// scalar (constant-time; blinded when randomized).
        pub fn mulgen(&self, n: &$scalar) -> Point {
            let k0 = n + self.blind;
            let sd = Point::recode_scalar4(&k0);
            let mut P = self.unblind;
            for i in 0..Point::NDIG4 {
                let (Q, rz) = Point::lookup8_affine(&self.comb[i], sd[i]);
                P.set_add_affine(&Q, rz);
            }
            P
        }

        /// Given scalars `u` and `v` and a point `A`, computes
        /// u*A + v*G. NOT constant-time.
        pub fn mul_add_mulgen_vartime(&self, A: &Point,
            u: &$scalar, v: &$scalar) -> Point
        {
            let mut sdu = [0i16; Point::NAFLEN];
            let mut sdv = [0i16; Point::NAFLEN];
            naf_recode(&u.encode(), 5, &mut sdu);
            naf_recode(&v.encode(), 8, &mut sdv);

            let mut win = [Point::NEUTRAL; 8];
            let Q = A.double();
            win[0] = *A;
            for i in 1..8 {
                win[i] = win[i - 1] + Q;
            }

            let mut P = Point::NEUTRAL;
            let mut zz = true;
            let mut ndbl = 0u32;
            for i in (0..Point::NAFLEN).rev() {
                ndbl += 1;
                let e1 = sdu[i];
                let e2 = sdv[i];
                if e1 == 0 && e2 == 0 {
                    continue;
                }
                if zz {
                    zz = false;
                } else {
                    P.set_xdouble(ndbl);
                }
                ndbl = 0;
                if e1 > 0 {
                    P.set_add(&win[(e1 as usize - 1) >> 1]);
                } else if e1 < 0 {
                    P.set_sub(&win[((-e1) as usize - 1) >> 1]);
                }
                if e2 > 0 {
                    P.set_add_affine(&self.naf[(e2 as usize - 1) >> 1], 0);
                } else if e2 < 0 {
                    P.set_sub_affine(&self.naf[((-e2) as usize - 1) >> 1], 0);
                }
            }
            if !zz && ndbl > 0 {
                P.set_xdouble(ndbl);
            }
            P
        }

        /// Computes k0*G + sum(coeffs[i]*points[i]); the number of
        /// points must be even and at most 64. NOT constant-time.
        pub fn mul_multi_vartime(&self, k0: &$scalar,
            points: &[Point], coeffs: &[$scalar],
            scratch: &mut VerifyScratch) -> Point
        {
            let len = points.len();
            assert!(len == coeffs.len());
            assert!((len & 1) == 0 && len <= 64);
            let np = len >> 1;

            let mut naf0 = [0i16; Point::NAFLEN];
            naf_recode(&k0.encode(), 8, &mut naf0);

            for j in 0..np {
                let P1 = points[2 * j];
                let P2 = points[2 * j + 1];
                scratch.wnds[j][0] = P1;
                scratch.wnds[j][1] = P1 + P2;
                scratch.wnds[j][2] = P1 - P2;
                scratch.wnds[j][3] = P2;
                jsf_recode(&coeffs[2 * j].encode(),
                    &coeffs[2 * j + 1].encode(), &mut scratch.nafs[j]);
            }

            let mut P = Point::NEUTRAL;
            for i in (0..Point::NAFLEN).rev() {
                if i != Point::NAFLEN - 1 {
                    P.set_double();
                }
                let z0 = naf0[i];
                if z0 > 0 {
                    P.set_add_affine(&self.naf[(z0 as usize - 1) >> 1], 0);
                } else if z0 < 0 {
                    P.set_sub_affine(&self.naf[((-z0) as usize - 1) >> 1], 0);
                }
                for j in 0..np {
                    let z = scratch.nafs[j][i];
                    if z > 0 {
                        P.set_add(&scratch.wnds[j][(z as usize - 1) >> 1]);
                    } else if z < 0 {
                        P.set_sub(&scratch.wnds[j][((-z) as usize - 1) >> 1]);
                    }
                }
            }
            P
        }
    }

    /// Reusable buffers for batch verification (capacity: 64 points,
    /// i.e. 32 signatures per flush).
    pub struct VerifyScratch {
        nafs: [[i16; Point::NAFLEN]; 32],
        wnds: [[Point; 4]; 32],
    }

    impl VerifyScratch {

        /// Creates a (zeroed) scratch structure.
        pub fn new() -> Self {
            Self {
                nafs: [[0i16; Point::NAFLEN]; 32],
                wnds: [[Point::NEUTRAL; 4]; 32],
            }
        }
    }

    // ====================================================================
    // Montgomery isomorphism and Elligator 2.

    // Constants of the isomorphic Montgomery curve y^2 = x^3 + A*x^2
    // + B*x, derived from (a, d) and the precomputed scaling factor c
    // (c^2 = (A +- 2) / (B*a), the sign depending on the `invert`
    // convention of the curve). Cheap enough to recompute at each
    // (cold) use.
    fn iso_constants() -> ($gf, $gf, $gf, $gf, $gf) {
        let a = edwards_mul_a(&$gf::ONE);
        let (u, v) = if $params::INVERT {
                (($params::D + a).mul2(), $params::D - a)
            } else {
                ((a + $params::D).mul2(), a - $params::D)
            };
        let A = u / v;
        let t = if $params::INVERT {
                A - $gf::TWO
            } else {
                A + $gf::TWO
            };
        let B = t / (a * $params::C.square());
        let Bi = B.invert();
        // Normalized curve for the Elligator map: A0 = A/B, B0 = 1/B^2.
        let A0 = A * Bi;
        let B0 = Bi.square();
        (A, B, Bi, A0, B0)
    }

    impl Point {

        /// Converts a point of the isomorphic Montgomery curve to
        /// this curve. The `inf` mask (0xFFFFFFFF for the point at
        /// infinity) and the exceptional 2-torsion case (x = 0) are
        /// handled by masking, so the conversion is constant-time and
        /// total.
        pub(crate) fn from_mont_point(x: &$gf, y: &$gf, inf: u32) -> Self {
            let tor = x.iszero() & !inf;
            let xx;
            let xz;
            let yy;
            let yz;
            if $params::INVERT {
                // x' = c*u/v, y' = (u + 1)/(u - 1)
                xx = $params::C * x;
                xz = $gf::select(y, &$gf::ONE, tor);
                yy = x + $gf::ONE;
                yz = x - $gf::ONE;
            } else {
                // x' = c*u/v, y' = (u - 1)/(u + 1)
                xx = $params::C * x;
                xz = $gf::select(y, &$gf::ONE, tor);
                yy = x - $gf::ONE;
                yz = x + $gf::ONE;
            }

            let mut P = Self {
                X: xx * yz,
                Y: yy * xz,
                Z: xz * yz,
                T: xx * yy,
            };
            // The point at infinity maps to the neutral; the
            // 2-torsion point (0, 0) maps to (0, -1), which the
            // formulas above already produce thanks to the xz
            // substitution.
            P.X.set_cond(&$gf::ZERO, inf);
            P.Y.set_cond(&$gf::ONE, inf);
            P.Z.set_cond(&$gf::ONE, inf);
            P.T.set_cond(&$gf::ZERO, inf);
            P
        }

        /// Converts this point to the isomorphic Montgomery curve.
        /// Returns (x, y, inf): the affine coordinates, and the
        /// "point at infinity" mask. Constant-time and total (the
        /// 2-torsion point (0, -1) maps to (0, 0)).
        pub(crate) fn to_mont_point(self) -> ($gf, $gf, u32) {
            let zero = self.X.iszero();
            let inf = zero & self.Y.equals(self.Z);
            let tor = zero & !inf;

            let uu;
            let uz;
            let vv;
            let vz;
            if $params::INVERT {
                // u = (y + 1)/(y - 1), v = c*u/x
                uu = self.Y + self.Z;
                uz = self.Y - self.Z;
                vv = $params::C * self.Z * uu;
                vz = self.X * uz;
            } else {
                // u = (1 + y)/(1 - y), v = c*u/x
                uu = self.Z + self.Y;
                uz = self.Z - self.Y;
                vv = $params::C * self.Z * uu;
                vz = self.X * uz;
            }

            let d = (uz * vz).invert();
            let mut x = uu * vz * d;
            let mut y = vv * uz * d;
            x.set_cond(&$gf::ZERO, tor);
            y.set_cond(&$gf::ZERO, tor);
            (x, y, inf)
        }

        /// Maps a field element to a curve point: Elligator 2 on the
        /// isomorphic Montgomery curve, then conversion. The map is
        /// constant-time; the output lies on the curve (possibly
        /// outside the prime-order subgroup, as the map covers the
        /// whole curve group).
        pub fn map_to_curve(u: &$gf) -> Self {
            let (_, b, _, a0, b0) = iso_constants();
            let z = $gf::from_i32($params::Z);

            // g(x) = x^3 + A0*x^2 + B0*x on the normalized curve.
            // x1 = -A0/(1 + z*u^2)  (x1 = -A0 when the divisor is 0)
            // x2 = -x1 - A0
            let mut dd = $gf::ONE + z * u.square();
            dd.set_cond(&$gf::ONE, dd.iszero());
            let x1 = -a0 / dd;
            let x2 = -x1 - a0;

            let g1 = ((x1 + a0) * x1 + b0) * x1;
            let g2 = ((x2 + a0) * x2 + b0) * x2;

            let alpha = !((g1.legendre() >> 1) as u32);
            let x = $gf::select(&x2, &x1, alpha);
            let g = $gf::select(&g2, &g1, alpha);
            let (mut y, _) = g.sqrt();

            // The sign of y follows the sign of u.
            let ws = ((((y.encode()[0] ^ u.encode()[0]) & 1) as u32))
                .wrapping_neg();
            y.set_cond(&-y, ws);

            // Rescale onto the (A, B) curve and convert.
            Self::from_mont_point(&(x * b), &(y * b), 0)
        }

        /// Inverts the map for this point, with a 1-bit branch hint
        /// (the sign of the preimage follows the sign of the
        /// Montgomery y coordinate). Returns the preimage and a
        /// success mask.
        pub(crate) fn map_invert(self, hint: u32) -> ($gf, u32) {
            let (_, _, bi, a0, _) = iso_constants();
            let z = $gf::from_i32($params::Z);

            let (x, y, inf) = self.to_mont_point();
            let x0 = x * bi;
            let y0 = y * bi;

            // u1^2 = -(x + A0) / (x*z)
            // u2^2 = -x / ((x + A0)*z)
            let mut n = x0 + a0;
            let mut d = x0;
            $gf::cswap(&mut n, &mut d, (hint & 1).wrapping_neg());
            let (mut u, ok) = (-n).isqrt(&(d * z));

            let ws = (((u.encode()[0] ^ y0.encode()[0]) & 1) as u32)
                .wrapping_neg();
            u.set_cond(&-u, ws);

            (u, ok & !inf)
        }

        /// Maps a uniformly random byte string (little-endian, of
        /// field length) to a curve point (the unused top bits are
        /// masked off).
        pub fn from_uniform(bytes: &[u8; Self::FLEN]) -> Self {
            let mut tmp = *bytes;
            if $gf::BITLEN & 7 != 0 {
                tmp[Self::FLEN - 1] &= (1u8 << ($gf::BITLEN & 7)) - 1;
            }
            let u = $gf::decode_reduce(&tmp);
            Self::map_to_curve(&u)
        }

        /// Inverts `from_uniform()` on this point; the hint selects
        /// the preimage branch (low bit) and fills the unused top
        /// bits of the output (bits 8 and up). Returns `None` when
        /// the selected branch has no preimage.
        pub fn to_uniform(self, hint: u32) -> Option<[u8; Self::FLEN]> {
            let (u, ok) = self.map_invert(hint);
            if ok == 0 {
                return None;
            }
            let mut out = u.encode();
            if $gf::BITLEN & 7 != 0 {
                let mask = (1u8 << ($gf::BITLEN & 7)) - 1;
                out[Self::FLEN - 1] |= ((hint >> 8) as u8) & !mask;
            }
            Some(out)
        }

        /// Maps a 2*field-length byte string to a curve point
        /// (sum of the images of the two halves).
        pub fn from_hash(bytes: &[u8; 2 * Self::FLEN]) -> Self {
            use core::convert::TryFrom;
            let b1 = <&[u8; Self::FLEN]>::try_from(
                &bytes[..Self::FLEN]).unwrap();
            let b2 = <&[u8; Self::FLEN]>::try_from(
                &bytes[Self::FLEN..]).unwrap();
            Self::from_uniform(b1) + Self::from_uniform(b2)
        }

        /// Inverts `from_hash()` on this point, producing a uniform
        /// preimage ([SQUARED] sampling, with retries driven by a
        /// generator seeded from `entropy`). The point must not be
        /// the neutral.
        pub fn to_hash(self, entropy: &[u8]) -> Option<[u8; 2 * Self::FLEN]> {
            if self.isneutral() != 0 {
                return None;
            }
            let mut rng = $crate::drbg::HmacDrbg::<sha2::Sha256>::new(entropy);
            let mut out = [0u8; 2 * Self::FLEN];
            loop {
                let mut b1 = [0u8; Self::FLEN];
                rng.generate(&mut b1);
                let (_, ok) = $gf::decode_ct(&b1);
                if ok == 0 {
                    continue;
                }
                let P1 = Self::from_uniform(&b1);
                // Avoid the 2-torsion image (Montgomery y = 0), which
                // has no invertible preimage on the other side.
                if P1.X.iszero() != 0 {
                    continue;
                }
                let P2 = self - P1;
                let mut hb = [0u8; 4];
                rng.generate(&mut hb);
                let hint = u32::from_le_bytes(hb);
                if let Some(b2) = P2.to_uniform(hint) {
                    out[..Self::FLEN].copy_from_slice(&b1);
                    out[Self::FLEN..].copy_from_slice(&b2);
                    return Some(out);
                }
            }
        }
    }

    // ====================================================================
    // Operator traits on points.

    impl core::ops::Add<Point> for Point {
        type Output = Point;
        #[inline(always)]
        fn add(self, other: Point) -> Point {
            let mut r = self;
            r.set_add(&other);
            r
        }
    }

    impl core::ops::Add<&Point> for Point {
        type Output = Point;
        #[inline(always)]
        fn add(self, other: &Point) -> Point {
            let mut r = self;
            r.set_add(other);
            r
        }
    }

    impl core::ops::Add<Point> for &Point {
        type Output = Point;
        #[inline(always)]
        fn add(self, other: Point) -> Point {
            let mut r = *self;
            r.set_add(&other);
            r
        }
    }

    impl core::ops::AddAssign<Point> for Point {
        #[inline(always)]
        fn add_assign(&mut self, other: Point) {
            self.set_add(&other);
        }
    }

    impl core::ops::AddAssign<&Point> for Point {
        #[inline(always)]
        fn add_assign(&mut self, other: &Point) {
            self.set_add(other);
        }
    }

    impl core::ops::Sub<Point> for Point {
        type Output = Point;
        #[inline(always)]
        fn sub(self, other: Point) -> Point {
            let mut r = self;
            r.set_sub(&other);
            r
        }
    }

    impl core::ops::Sub<&Point> for Point {
        type Output = Point;
        #[inline(always)]
        fn sub(self, other: &Point) -> Point {
            let mut r = self;
            r.set_sub(other);
            r
        }
    }

    impl core::ops::SubAssign<Point> for Point {
        #[inline(always)]
        fn sub_assign(&mut self, other: Point) {
            self.set_sub(&other);
        }
    }

    impl core::ops::Neg for Point {
        type Output = Point;
        #[inline(always)]
        fn neg(self) -> Point {
            let mut r = self;
            r.set_neg();
            r
        }
    }

    impl core::ops::Neg for &Point {
        type Output = Point;
        #[inline(always)]
        fn neg(self) -> Point {
            let mut r = *self;
            r.set_neg();
            r
        }
    }

    impl core::ops::Mul<$scalar> for Point {
        type Output = Point;
        #[inline(always)]
        fn mul(self, other: $scalar) -> Point {
            let mut r = self;
            r.set_mul(&other);
            r
        }
    }

    impl core::ops::Mul<&$scalar> for Point {
        type Output = Point;
        #[inline(always)]
        fn mul(self, other: &$scalar) -> Point {
            let mut r = self;
            r.set_mul(other);
            r
        }
    }

    impl core::ops::Mul<Point> for $scalar {
        type Output = Point;
        #[inline(always)]
        fn mul(self, other: Point) -> Point {
            let mut r = other;
            r.set_mul(&self);
            r
        }
    }

    impl core::ops::MulAssign<$scalar> for Point {
        #[inline(always)]
        fn mul_assign(&mut self, other: $scalar) {
            self.set_mul(&other);
        }
    }

    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! define_eddsa {
    ($gf:ident, $scalar:ident, $params:ident, $hasher:ident,
     $clamp:ident, $ctxflag:expr, $prefix:expr) => {

    // Hash-to-scalar helpers. The wide hash output is interpreted in
    // little-endian convention and reduced modulo the group order;
    // the dom separation prefix (curve string, prehash flag, context
    // length and context) is injected when the curve mandates it, a
    // prehash mode is selected, or a non-empty context is provided.

    fn eddsa_dom_needed(ph: i32, ctx: &[u8]) -> bool {
        $ctxflag || ph >= 0 || ctx.len() > 0
    }

    fn eddsa_hash_am(ph: i32, ctx: &[u8],
        prefix: &[u8; Point::ADJ_LEN], m: &[u8]) -> $scalar
    {
        assert!(ctx.len() <= 255);
        let phb = [(ph > 0) as u8];
        let cl = [ctx.len() as u8];
        let hv = if eddsa_dom_needed(ph, ctx) {
                $hasher::hash(&[$prefix, &phb, &cl, ctx, prefix, m])
            } else {
                $hasher::hash(&[prefix, m])
            };
        $scalar::decode_reduce(&hv)
    }

    fn eddsa_hash_ram(ph: i32, ctx: &[u8], rraw: &[u8], araw: &[u8],
        m: &[u8]) -> $scalar
    {
        assert!(ctx.len() <= 255);
        let phb = [(ph > 0) as u8];
        let cl = [ctx.len() as u8];
        let hv = if eddsa_dom_needed(ph, ctx) {
                $hasher::hash(&[$prefix, &phb, &cl, ctx, rraw, araw, m])
            } else {
                $hasher::hash(&[rraw, araw, m])
            };
        $scalar::decode_reduce(&hv)
    }

    /// An EdDSA private key: built from a seed, from which the secret
    /// scalar and the signing prefix are derived (RFC 8032 key
    /// expansion). The corresponding public key is kept alongside.
    #[derive(Clone, Copy, Debug)]
    pub struct PrivateKey {
        s: $scalar,                    // secret scalar
        seed: [u8; Point::ADJ_LEN],    // source seed
        h: [u8; Point::ADJ_LEN],       // signing prefix
        pub public_key: PublicKey,     // public key
    }

    /// An EdDSA public key: the curve point and its encoding (the
    /// two fields must match if modified directly).
    #[derive(Clone, Copy, Debug)]
    pub struct PublicKey {
        pub point: Point,
        pub encoded: [u8; Point::ADJ_LEN],
    }

    impl PrivateKey {

        /// Signature length, in bytes.
        pub const SIG_LEN: usize = 2 * Point::ADJ_LEN;

        /// Generates a new private key from a cryptographically
        /// secure RNG.
        pub fn generate<T: $crate::CryptoRng + $crate::RngCore>(
            cv: &Curve, rng: &mut T) -> Self
        {
            let mut seed = [0u8; Point::ADJ_LEN];
            rng.fill_bytes(&mut seed);
            let r = Self::from_seed(cv, &seed);
            use zeroize::Zeroize;
            seed.zeroize();
            r
        }

        /// Instantiates a private key from the provided seed, whose
        /// length MUST match the curve's key length (a panic is
        /// triggered otherwise). The seed is hashed; the first half
        /// is clamped into the secret scalar, the second half becomes
        /// the signing prefix.
        pub fn from_seed(cv: &Curve, seed: &[u8]) -> Self {
            assert!(seed.len() == Point::ADJ_LEN);
            let mut bseed = [0u8; Point::ADJ_LEN];
            bseed.copy_from_slice(seed);

            let hh = $hasher::hash(&[seed]);
            let mut sb = [0u8; $scalar::ENC_LEN];
            sb.copy_from_slice(&hh[..$scalar::ENC_LEN]);
            $clamp(&mut sb);
            let s = $scalar::decode_reduce(&sb);
            use zeroize::Zeroize;
            sb.zeroize();

            let mut h = [0u8; Point::ADJ_LEN];
            h.copy_from_slice(&hh[Point::ADJ_LEN..]);

            let public_key = PublicKey::from_point(&cv.mulgen(&s));

            Self { s, seed: bseed, h, public_key }
        }

        /// Decodes a private key (i.e. a seed of the right length).
        pub fn decode(cv: &Curve, buf: &[u8]) -> Option<Self> {
            if buf.len() == Point::ADJ_LEN {
                Some(Self::from_seed(cv, buf))
            } else {
                None
            }
        }

        /// Encodes this private key (returns a copy of the seed).
        pub fn encode(self) -> [u8; Point::ADJ_LEN] {
            self.seed
        }

        /// Signs a message (pure mode: no pre-hashing, no context).
        pub fn sign_raw(self, cv: &Curve, m: &[u8])
            -> [u8; Self::SIG_LEN]
        {
            self.sign_inner(cv, -1, &[0u8; 0], m)
        }

        /// Signs a message with a context string (at most 255 bytes).
        pub fn sign_ctx(self, cv: &Curve, ctx: &[u8], m: &[u8])
            -> [u8; Self::SIG_LEN]
        {
            self.sign_inner(cv, 0, ctx, m)
        }

        /// Signs a pre-hashed message (the caller hashes the message
        /// itself); a context string may be provided.
        pub fn sign_ph(self, cv: &Curve, ctx: &[u8], hm: &[u8])
            -> [u8; Self::SIG_LEN]
        {
            self.sign_inner(cv, 1, ctx, hm)
        }

        fn sign_inner(self, cv: &Curve, ph: i32, ctx: &[u8], m: &[u8])
            -> [u8; Self::SIG_LEN]
        {
            sign_with_expanded(cv, &self.s, &self.h,
                &self.public_key.encoded, ph, ctx, m)
        }
    }

    /// Signs with an already-expanded key (secret scalar, signing
    /// prefix, and encoded public key). This entry point supports
    /// signing with tweaked scalars; normal use goes through
    /// `PrivateKey`.
    pub fn sign_with_expanded(cv: &Curve, s: &$scalar,
        prefix: &[u8; Point::ADJ_LEN], pub_enc: &[u8; Point::ADJ_LEN],
        ph: i32, ctx: &[u8], m: &[u8])
        -> [u8; 2 * Point::ADJ_LEN]
    {
        // k = H(dom || prefix || m) mod L, R = k*G
        let k = eddsa_hash_am(ph, ctx, prefix, m);
        let R = cv.mulgen(&k);
        let r_enc = R.encode();

        // e = H(dom || R || A || m) mod L, s' = k + e*s mod L
        let e = eddsa_hash_ram(ph, ctx, &r_enc, pub_enc, m);
        let sv = k + e * s;

        let mut sig = [0u8; 2 * Point::ADJ_LEN];
        sig[..Point::ADJ_LEN].copy_from_slice(&r_enc);
        sig[Point::ADJ_LEN..(Point::ADJ_LEN + $scalar::ENC_LEN)]
            .copy_from_slice(&sv.encode());
        sig
    }

    impl PublicKey {

        /// Creates an instance from a curve point.
        pub fn from_point(point: &Point) -> Self {
            Self { point: *point, encoded: point.encode() }
        }

        /// Decodes a public key. Success does not guarantee that the
        /// point lies in the prime-order subgroup (it may carry a
        /// torsion component, or even have low order).
        pub fn decode(buf: &[u8]) -> Option<PublicKey> {
            let point = Point::decode(buf)?;
            let mut encoded = [0u8; Point::ADJ_LEN];
            encoded.copy_from_slice(buf);
            Some(Self { point, encoded })
        }

        /// Encodes this public key.
        pub fn encode(self) -> [u8; Point::ADJ_LEN] {
            self.encoded
        }

        /// Verifies a signature (pure mode). Not constant-time.
        pub fn verify_raw(self, cv: &Curve, sig: &[u8], m: &[u8]) -> bool {
            self.verify_inner(cv, sig, -1, &[0u8; 0], m, false)
        }

        /// Verifies a signature made with a context string. Not
        /// constant-time.
        pub fn verify_ctx(self, cv: &Curve, sig: &[u8], ctx: &[u8],
            m: &[u8]) -> bool
        {
            self.verify_inner(cv, sig, 0, ctx, m, false)
        }

        /// Verifies a signature on a pre-hashed message. Not
        /// constant-time.
        pub fn verify_ph(self, cv: &Curve, sig: &[u8], ctx: &[u8],
            hm: &[u8]) -> bool
        {
            self.verify_inner(cv, sig, 1, ctx, hm, false)
        }

        /// Verifies a signature (pure mode) with the
        /// cofactor-multiplied equation (strict RFC 8032 single
        /// verification: both sides are multiplied by the cofactor,
        /// which makes the check agree with batch verification on
        /// torsion-carrying keys). Not constant-time.
        pub fn verify_single_raw(self, cv: &Curve, sig: &[u8],
            m: &[u8]) -> bool
        {
            self.verify_inner(cv, sig, -1, &[0u8; 0], m, true)
        }

        /// Cofactor-multiplied variant of `verify_ctx()`.
        pub fn verify_single_ctx(self, cv: &Curve, sig: &[u8],
            ctx: &[u8], m: &[u8]) -> bool
        {
            self.verify_inner(cv, sig, 0, ctx, m, true)
        }

        /// Cofactor-multiplied variant of `verify_ph()`.
        pub fn verify_single_ph(self, cv: &Curve, sig: &[u8],
            ctx: &[u8], hm: &[u8]) -> bool
        {
            self.verify_inner(cv, sig, 1, ctx, hm, true)
        }

        fn verify_inner(self, cv: &Curve, sig: &[u8], ph: i32,
            ctx: &[u8], m: &[u8], cofactor: bool) -> bool
        {
            if sig.len() != 2 * Point::ADJ_LEN {
                return false;
            }
            let r_enc = &sig[..Point::ADJ_LEN];
            let R = match Point::decode(r_enc) {
                Some(R) => R,
                None => return false,
            };
            let (S, ok) = $scalar::decode_ct(
                &sig[Point::ADJ_LEN..(Point::ADJ_LEN + $scalar::ENC_LEN)]);
            if ok == 0 {
                return false;
            }
            // Check the padding bits of the s half.
            for i in (Point::ADJ_LEN + $scalar::ENC_LEN)..sig.len() {
                if sig[i] != 0 {
                    return false;
                }
            }

            let e = eddsa_hash_ram(ph, ctx, r_enc, &self.encoded, m);

            // R' = S*G - e*A; plain verification requires R' = R,
            // the cofactor variant only requires h*(R' - R) = O.
            let Re = cv.mul_add_mulgen_vartime(&-self.point, &e, &S);
            if cofactor {
                let mut T = Re - R;
                T.set_mulh();
                T.isneutral() != 0
            } else {
                Re.equals(R) != 0
            }
        }

        /// Adds `tweak*G` to this public key.
        pub fn tweak_add(self, cv: &Curve, tweak: &[u8]) -> Option<Self> {
            if tweak.len() != $scalar::ENC_LEN {
                return None;
            }
            let t = $scalar::decode_reduce(tweak);
            let P = self.point + cv.mulgen(&t);
            Some(Self::from_point(&P))
        }

        /// Multiplies this public key by a tweak.
        pub fn tweak_mul(self, tweak: &[u8]) -> Option<Self> {
            if tweak.len() != $scalar::ENC_LEN {
                return None;
            }
            let t = $scalar::decode_reduce(tweak);
            let mut P = self.point;
            P.set_mul(&t);
            Some(Self::from_point(&P))
        }

        /// Sums several public keys into one.
        pub fn combine(pubs: &[PublicKey]) -> Self {
            let mut P = Point::NEUTRAL;
            for pk in pubs.iter() {
                P += &pk.point;
            }
            Self::from_point(&P)
        }

        /// Negates this public key.
        pub fn negate(self) -> Self {
            Self::from_point(&-self.point)
        }
    }

    /// Adds two scalars given in their canonical encodings (used for
    /// key tweaking on expanded keys).
    pub fn scalar_tweak_add(s: &[u8; $scalar::ENC_LEN],
        t: &[u8; $scalar::ENC_LEN]) -> [u8; $scalar::ENC_LEN]
    {
        ($scalar::decode_reduce(s) + $scalar::decode_reduce(t)).encode()
    }

    /// Multiplies two scalars given in their canonical encodings.
    pub fn scalar_tweak_mul(s: &[u8; $scalar::ENC_LEN],
        t: &[u8; $scalar::ENC_LEN]) -> [u8; $scalar::ENC_LEN]
    {
        ($scalar::decode_reduce(s) * $scalar::decode_reduce(t)).encode()
    }

    /// Verifies a batch of signatures (all in the same ph/ctx mode).
    /// Random multipliers are derived from a hash of the whole batch;
    /// the accumulated equation is checked after multiplication by
    /// the cofactor, so the batch accepts exactly what
    /// `verify_single_*` accepts. Not constant-time.
    pub fn verify_batch(cv: &Curve, msgs: &[&[u8]], sigs: &[&[u8]],
        pubs: &[PublicKey], ph: i32, ctx: &[u8],
        scratch: &mut VerifyScratch) -> bool
    {
        let len = msgs.len();
        if sigs.len() != len || pubs.len() != len {
            return false;
        }

        let mut rng = {
            use sha2::Digest;
            let mut sh = sha2::Sha512::new();
            for i in 0..len {
                Digest::update(&mut sh, msgs[i]);
                Digest::update(&mut sh, sigs[i]);
                Digest::update(&mut sh, &pubs[i].encoded);
            }
            $crate::drbg::HmacDrbg::<sha2::Sha256>::new(&sh.finalize())
        };

        let mut points = [Point::NEUTRAL; 64];
        let mut coeffs = [$scalar::ZERO; 64];
        let mut sum = $scalar::ZERO;
        let mut j = 0;

        for i in 0..len {
            let sig = sigs[i];
            if sig.len() != 2 * Point::ADJ_LEN {
                return false;
            }
            let r_enc = &sig[..Point::ADJ_LEN];
            let R = match Point::decode(r_enc) {
                Some(R) => R,
                None => return false,
            };
            let (S, ok) = $scalar::decode_ct(
                &sig[Point::ADJ_LEN..(Point::ADJ_LEN + $scalar::ENC_LEN)]);
            if ok == 0 {
                return false;
            }
            for t in (Point::ADJ_LEN + $scalar::ENC_LEN)..sig.len() {
                if sig[t] != 0 {
                    return false;
                }
            }

            let e = eddsa_hash_ram(ph, ctx, r_enc, &pubs[i].encoded,
                msgs[i]);

            let a = if j == 0 {
                    $scalar::ONE
                } else {
                    Curve::scalar_random(&mut rng)
                };

            sum += a * S;
            points[j] = R;
            points[j + 1] = pubs[i].point;
            coeffs[j] = a;
            coeffs[j + 1] = e * a;
            j += 2;

            if j == 64 {
                let mut T = cv.mul_multi_vartime(&-sum,
                    &points[..j], &coeffs[..j], scratch);
                T.set_mulh();
                if T.isneutral() == 0 {
                    return false;
                }
                sum = $scalar::ZERO;
                j = 0;
            }
        }

        if j > 0 {
            let mut T = cv.mul_multi_vartime(&-sum,
                &points[..j], &coeffs[..j], scratch);
            T.set_mulh();
            if T.isneutral() == 0 {
                return false;
            }
        }
        true
    }

    };
}
