//! Color combiner descriptors.
//!
//! Combiner inputs are small codes whose meaning depends on the slot they sit
//! in, and several symbolic names share a code (`CENTER`, `SCALE` and `ONE` are
//! all 6 in the color combiner). They are modeled as newtypes with associated
//! constants instead of enums so aliases stay aliases.
//!
//! Each cycle computes `(a - b) * c + d` for color and alpha separately. Slot
//! widths differ: color `a`/`b` are 4 bits, `c` is 5, `d` is 3, and every alpha
//! slot is 3. A code too wide for its slot is truncated, which is how `ZERO`
//! (31 in the color mux) lands on the right value in the narrower slots.

use crate::field::{opcode, pack};
use crate::opcode::Opcode;
use crate::validate;

/// Color combiner input code, 0..=31.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorMux(u8);

impl ColorMux {
    pub const COMBINED: Self = Self(0);
    pub const TEXEL0: Self = Self(1);
    pub const TEXEL1: Self = Self(2);
    pub const PRIMITIVE: Self = Self(3);
    pub const SHADE: Self = Self(4);
    pub const ENVIRONMENT: Self = Self(5);
    pub const CENTER: Self = Self(6);
    pub const SCALE: Self = Self(6);
    pub const ONE: Self = Self(6);
    pub const COMBINED_ALPHA: Self = Self(7);
    pub const NOISE: Self = Self(7);
    pub const K4: Self = Self(7);
    pub const TEXEL0_ALPHA: Self = Self(8);
    pub const TEXEL1_ALPHA: Self = Self(9);
    pub const PRIMITIVE_ALPHA: Self = Self(10);
    pub const SHADE_ALPHA: Self = Self(11);
    pub const ENV_ALPHA: Self = Self(12);
    pub const LOD_FRACTION: Self = Self(13);
    pub const PRIM_LOD_FRAC: Self = Self(14);
    pub const K5: Self = Self(15);
    pub const ZERO: Self = Self(31);

    pub const fn new(code: u8) -> Self {
        validate::assert_combine_code(code, 5);
        Self(code)
    }

    #[inline]
    pub const fn code(self) -> u32 {
        self.0 as u32
    }
}

/// Alpha combiner input code, 0..=7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlphaMux(u8);

impl AlphaMux {
    pub const COMBINED: Self = Self(0);
    pub const LOD_FRACTION: Self = Self(0);
    pub const TEXEL0: Self = Self(1);
    pub const TEXEL1: Self = Self(2);
    pub const PRIMITIVE: Self = Self(3);
    pub const SHADE: Self = Self(4);
    pub const ENVIRONMENT: Self = Self(5);
    pub const PRIM_LOD_FRAC: Self = Self(6);
    pub const ONE: Self = Self(6);
    pub const ZERO: Self = Self(7);

    pub const fn new(code: u8) -> Self {
        validate::assert_combine_code(code, 3);
        Self(code)
    }

    #[inline]
    pub const fn code(self) -> u32 {
        self.0 as u32
    }
}

/// One combiner cycle: `(a - b) * c + d` for color, then for alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CombineCycle {
    pub a: ColorMux,
    pub b: ColorMux,
    pub c: ColorMux,
    pub d: ColorMux,
    pub aa: AlphaMux,
    pub ab: AlphaMux,
    pub ac: AlphaMux,
    pub ad: AlphaMux,
}

macro_rules! cc {
    ($a:ident, $b:ident, $c:ident, $d:ident, $aa:ident, $ab:ident, $ac:ident, $ad:ident) => {
        CombineCycle {
            a: ColorMux::$a,
            b: ColorMux::$b,
            c: ColorMux::$c,
            d: ColorMux::$d,
            aa: AlphaMux::$aa,
            ab: AlphaMux::$ab,
            ac: AlphaMux::$ac,
            ad: AlphaMux::$ad,
        }
    };
}

impl CombineCycle {
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        a: ColorMux,
        b: ColorMux,
        c: ColorMux,
        d: ColorMux,
        aa: AlphaMux,
        ab: AlphaMux,
        ac: AlphaMux,
        ad: AlphaMux,
    ) -> Self {
        Self {
            a,
            b,
            c,
            d,
            aa,
            ab,
            ac,
            ad,
        }
    }

    pub const PRIMITIVE: Self = cc!(ZERO, ZERO, ZERO, PRIMITIVE, ZERO, ZERO, ZERO, PRIMITIVE);
    pub const SHADE: Self = cc!(ZERO, ZERO, ZERO, SHADE, ZERO, ZERO, ZERO, SHADE);

    pub const MODULATEI: Self = cc!(TEXEL0, ZERO, SHADE, ZERO, ZERO, ZERO, ZERO, SHADE);
    pub const MODULATEIA: Self = cc!(TEXEL0, ZERO, SHADE, ZERO, TEXEL0, ZERO, SHADE, ZERO);
    pub const MODULATEIDECALA: Self = cc!(TEXEL0, ZERO, SHADE, ZERO, ZERO, ZERO, ZERO, TEXEL0);
    pub const MODULATERGB: Self = Self::MODULATEI;
    pub const MODULATERGBA: Self = Self::MODULATEIA;
    pub const MODULATERGBDECALA: Self = Self::MODULATEIDECALA;

    pub const MODULATEI_PRIM: Self =
        cc!(TEXEL0, ZERO, PRIMITIVE, ZERO, ZERO, ZERO, ZERO, PRIMITIVE);
    pub const MODULATEIA_PRIM: Self =
        cc!(TEXEL0, ZERO, PRIMITIVE, ZERO, TEXEL0, ZERO, PRIMITIVE, ZERO);
    pub const MODULATEIDECALA_PRIM: Self =
        cc!(TEXEL0, ZERO, PRIMITIVE, ZERO, ZERO, ZERO, ZERO, TEXEL0);
    pub const MODULATERGB_PRIM: Self = Self::MODULATEI_PRIM;
    pub const MODULATERGBA_PRIM: Self = Self::MODULATEIA_PRIM;
    pub const MODULATERGBDECALA_PRIM: Self = Self::MODULATEIDECALA_PRIM;

    pub const DECALRGB: Self = cc!(ZERO, ZERO, ZERO, TEXEL0, ZERO, ZERO, ZERO, SHADE);
    pub const DECALRGBA: Self = cc!(ZERO, ZERO, ZERO, TEXEL0, ZERO, ZERO, ZERO, TEXEL0);

    pub const BLENDI: Self = cc!(ENVIRONMENT, SHADE, TEXEL0, SHADE, ZERO, ZERO, ZERO, SHADE);
    pub const BLENDIA: Self = cc!(ENVIRONMENT, SHADE, TEXEL0, SHADE, TEXEL0, ZERO, SHADE, ZERO);
    pub const BLENDIDECALA: Self = cc!(ENVIRONMENT, SHADE, TEXEL0, SHADE, ZERO, ZERO, ZERO, TEXEL0);
    pub const BLENDRGBA: Self = cc!(TEXEL0, SHADE, TEXEL0_ALPHA, SHADE, ZERO, ZERO, ZERO, SHADE);
    pub const BLENDRGBDECALA: Self =
        cc!(TEXEL0, SHADE, TEXEL0_ALPHA, SHADE, ZERO, ZERO, ZERO, TEXEL0);

    pub const ADDRGB: Self = cc!(ONE, ZERO, TEXEL0, SHADE, ZERO, ZERO, ZERO, SHADE);
    pub const ADDRGBDECALA: Self = cc!(ONE, ZERO, TEXEL0, SHADE, ZERO, ZERO, ZERO, TEXEL0);
    pub const REFLECTRGB: Self = cc!(ENVIRONMENT, ZERO, TEXEL0, SHADE, ZERO, ZERO, ZERO, SHADE);
    pub const REFLECTRGBDECALA: Self =
        cc!(ENVIRONMENT, ZERO, TEXEL0, SHADE, ZERO, ZERO, ZERO, TEXEL0);
    pub const HILITERGB: Self = cc!(PRIMITIVE, SHADE, TEXEL0, SHADE, ZERO, ZERO, ZERO, SHADE);
    pub const HILITERGBA: Self =
        cc!(PRIMITIVE, SHADE, TEXEL0, SHADE, PRIMITIVE, SHADE, TEXEL0, SHADE);
    pub const HILITERGBDECALA: Self =
        cc!(PRIMITIVE, SHADE, TEXEL0, SHADE, ZERO, ZERO, ZERO, TEXEL0);
    pub const SHADEDECALA: Self = cc!(ZERO, ZERO, ZERO, SHADE, ZERO, ZERO, ZERO, TEXEL0);

    pub const BLENDPE: Self =
        cc!(PRIMITIVE, ENVIRONMENT, TEXEL0, ENVIRONMENT, TEXEL0, ZERO, SHADE, ZERO);
    pub const BLENDPEDECALA: Self =
        cc!(PRIMITIVE, ENVIRONMENT, TEXEL0, ENVIRONMENT, ZERO, ZERO, ZERO, TEXEL0);
    pub const BLENDPE_ALT: Self =
        cc!(ENVIRONMENT, PRIMITIVE, TEXEL0, PRIMITIVE, TEXEL0, ZERO, SHADE, ZERO);
    pub const BLENDPEDECALA_ALT: Self =
        cc!(ENVIRONMENT, PRIMITIVE, TEXEL0, PRIMITIVE, ZERO, ZERO, ZERO, TEXEL0);
    pub const TWOCOLORTEX: Self = cc!(PRIMITIVE, SHADE, TEXEL0, SHADE, ZERO, ZERO, ZERO, SHADE);
    pub const SPARSEST: Self = cc!(
        PRIMITIVE,
        TEXEL0,
        LOD_FRACTION,
        TEXEL0,
        PRIMITIVE,
        TEXEL0,
        LOD_FRACTION,
        TEXEL0
    );

    pub const TEMPLERP: Self = cc!(
        TEXEL1,
        TEXEL0,
        PRIM_LOD_FRAC,
        TEXEL0,
        TEXEL1,
        TEXEL0,
        PRIM_LOD_FRAC,
        TEXEL0
    );
    pub const TRILERP: Self =
        cc!(TEXEL1, TEXEL0, LOD_FRACTION, TEXEL0, TEXEL1, TEXEL0, LOD_FRACTION, TEXEL0);
    pub const INTERFERENCE: Self = cc!(TEXEL0, ZERO, TEXEL1, ZERO, TEXEL0, ZERO, TEXEL1, ZERO);

    /// YUV to RGB in one cycle, alpha from shade.
    pub const YUV2RGB_1CYCLE: Self = cc!(TEXEL0, K4, K5, TEXEL0, ZERO, ZERO, ZERO, SHADE);
    pub const YUV2RGB: Self = cc!(TEXEL1, K4, K5, TEXEL1, ZERO, ZERO, ZERO, ZERO);

    /* ---- Second-cycle modes ---- */

    pub const PASS2: Self = cc!(ZERO, ZERO, ZERO, COMBINED, ZERO, ZERO, ZERO, COMBINED);
    pub const MODULATEI2: Self = cc!(COMBINED, ZERO, SHADE, ZERO, ZERO, ZERO, ZERO, SHADE);
    pub const MODULATEIA2: Self = cc!(COMBINED, ZERO, SHADE, ZERO, COMBINED, ZERO, SHADE, ZERO);
    pub const MODULATERGB2: Self = Self::MODULATEI2;
    pub const MODULATERGBA2: Self = Self::MODULATEIA2;
    pub const MODULATEI_PRIM2: Self =
        cc!(COMBINED, ZERO, PRIMITIVE, ZERO, ZERO, ZERO, ZERO, PRIMITIVE);
    pub const MODULATEIA_PRIM2: Self =
        cc!(COMBINED, ZERO, PRIMITIVE, ZERO, COMBINED, ZERO, PRIMITIVE, ZERO);
    pub const MODULATERGB_PRIM2: Self = Self::MODULATEI_PRIM2;
    pub const MODULATERGBA_PRIM2: Self = Self::MODULATEIA_PRIM2;
    pub const DECALRGB2: Self = cc!(ZERO, ZERO, ZERO, COMBINED, ZERO, ZERO, ZERO, SHADE);
    pub const BLENDI2: Self = cc!(ENVIRONMENT, SHADE, COMBINED, SHADE, ZERO, ZERO, ZERO, SHADE);
    pub const BLENDIA2: Self =
        cc!(ENVIRONMENT, SHADE, COMBINED, SHADE, COMBINED, ZERO, SHADE, ZERO);
    pub const CHROMA_KEY2: Self = cc!(TEXEL0, CENTER, SCALE, ZERO, ZERO, ZERO, ZERO, ZERO);
    pub const HILITERGB2: Self =
        cc!(ENVIRONMENT, COMBINED, TEXEL0, COMBINED, ZERO, ZERO, ZERO, SHADE);
    pub const HILITERGBA2: Self = cc!(
        ENVIRONMENT,
        COMBINED,
        TEXEL0,
        COMBINED,
        ENVIRONMENT,
        COMBINED,
        TEXEL0,
        COMBINED
    );
    pub const HILITERGBDECALA2: Self =
        cc!(ENVIRONMENT, COMBINED, TEXEL0, COMBINED, ZERO, ZERO, ZERO, TEXEL0);
    pub const HILITERGBPASSA2: Self =
        cc!(ENVIRONMENT, COMBINED, TEXEL0, COMBINED, ZERO, ZERO, ZERO, COMBINED);
}

/// Both combiner cycles. One-cycle rendering repeats the same cycle twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CombineMode {
    pub cycle1: CombineCycle,
    pub cycle2: CombineCycle,
}

impl CombineMode {
    pub const fn new(cycle1: CombineCycle, cycle2: CombineCycle) -> Self {
        Self { cycle1, cycle2 }
    }

    pub const fn one_cycle(cycle: CombineCycle) -> Self {
        Self::new(cycle, cycle)
    }

    /// The `(muxs0, muxs1)` pair: 24 bits for `hi` below the opcode, and `lo`.
    pub const fn muxes(self) -> (u32, u32) {
        let c0 = self.cycle1;
        let c1 = self.cycle2;
        let muxs0 = pack(c0.a.code(), 20, 4)
            | pack(c0.c.code(), 15, 5)
            | pack(c0.aa.code(), 12, 3)
            | pack(c0.ac.code(), 9, 3)
            | pack(c1.a.code(), 5, 4)
            | pack(c1.c.code(), 0, 5);
        let muxs1 = pack(c0.b.code(), 28, 4)
            | pack(c0.d.code(), 15, 3)
            | pack(c0.ab.code(), 12, 3)
            | pack(c0.ad.code(), 9, 3)
            | pack(c1.b.code(), 24, 4)
            | pack(c1.aa.code(), 21, 3)
            | pack(c1.ac.code(), 18, 3)
            | pack(c1.d.code(), 6, 3)
            | pack(c1.ab.code(), 3, 3)
            | pack(c1.ad.code(), 0, 3);
        (muxs0, muxs1)
    }

    /// Full `(hi, lo)` of the SETCOMBINE word.
    pub const fn encode(self) -> (u32, u32) {
        let (muxs0, muxs1) = self.muxes();
        (opcode(Opcode::SetCombine.byte()) | pack(muxs0, 0, 24), muxs1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_share_codes() {
        assert_eq!(ColorMux::ONE, ColorMux::CENTER);
        assert_eq!(ColorMux::NOISE, ColorMux::K4);
        assert_eq!(AlphaMux::LOD_FRACTION, AlphaMux::COMBINED);
        assert_eq!(AlphaMux::ONE, AlphaMux::PRIM_LOD_FRAC);
        assert_eq!(CombineCycle::MODULATERGBA, CombineCycle::MODULATEIA);
    }

    #[test]
    fn shade_one_cycle() {
        // The familiar 0xFCFFFFFF 0xFFFE793C.
        let (hi, lo) = CombineMode::one_cycle(CombineCycle::SHADE).encode();
        assert_eq!(hi, 0xFCFF_FFFF);
        assert_eq!(lo, 0xFFFE_793C);
    }

    #[test]
    fn second_cycle_decal_keeps_combined_rgb() {
        let c = CombineCycle::DECALRGB2;
        assert_eq!([c.a, c.b, c.c], [ColorMux::ZERO; 3]);
        assert_eq!(c.d, ColorMux::COMBINED);
        assert_eq!(c.ad, AlphaMux::SHADE);
    }

    #[test]
    fn modulate_two_cycle() {
        let (hi, lo) = CombineMode::new(CombineCycle::MODULATEIA, CombineCycle::PASS2).encode();
        assert_eq!(hi, 0xFC12_19FF);
        assert_eq!(lo, 0xFFFF_FE38);
        assert_eq!(hi >> 24, Opcode::SetCombine.byte() as u32);
    }
}
