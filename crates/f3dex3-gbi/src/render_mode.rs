//! Render-mode words for the low othermode register.
//!
//! A render mode is the OR of coverage/depth flag groups and one blender
//! equation. The equation's four 2-bit selectors sit at different offsets for
//! the first and second pipeline cycle, so every preset comes in both forms.

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RenderModeFlags: u32 {
        /// Alpha-compare dither, carried by the point-cloud presets.
        const AC_DITHER = 0x0003;
        const AA_EN = 0x0008;
        const Z_CMP = 0x0010;
        const Z_UPD = 0x0020;
        const IM_RD = 0x0040;
        const CLR_ON_CVG = 0x0080;
        const CVG_X_ALPHA = 0x1000;
        const ALPHA_CVG_SEL = 0x2000;
        const FORCE_BL = 0x4000;
    }
}

impl RenderModeFlags {
    pub const TEX_EDGE: Self = Self::empty();
}

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoverageDest {
    Clamp = 0x000,
    Wrap = 0x100,
    Full = 0x200,
    Save = 0x300,
}

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZMode {
    Opa = 0x000,
    Inter = 0x400,
    Xlu = 0x800,
    Dec = 0xC00,
}

/// Color input of the blender (P and M selectors).
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendColor {
    In = 0,
    Mem = 1,
    Bl = 2,
    Fog = 3,
}

/// First alpha input (A selector).
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendAlphaA {
    In = 0,
    Fog = 1,
    Shade = 2,
    Zero = 3,
}

/// Second alpha input (B selector).
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendAlphaB {
    OneMinusA = 0,
    Mem = 1,
    One = 2,
    Zero = 3,
}

/// `(P * A + M * B) / (A + B)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlendEquation {
    pub p: BlendColor,
    pub a: BlendAlphaA,
    pub m: BlendColor,
    pub b: BlendAlphaB,
}

impl BlendEquation {
    pub const fn new(p: BlendColor, a: BlendAlphaA, m: BlendColor, b: BlendAlphaB) -> Self {
        Self { p, a, m, b }
    }

    pub const fn cycle1(self) -> u32 {
        (self.p as u32) << 30
            | (self.a as u32) << 26
            | (self.m as u32) << 22
            | (self.b as u32) << 18
    }

    pub const fn cycle2(self) -> u32 {
        (self.p as u32) << 28
            | (self.a as u32) << 24
            | (self.m as u32) << 20
            | (self.b as u32) << 16
    }
}

/// A finished render-mode value, ready to be OR'd with its other-cycle partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RenderMode(pub u32);

impl RenderMode {
    /// Cycle-1 blend that mixes fog color in by shade alpha.
    pub const FOG_SHADE_A: Self = Self(
        BlendEquation::new(
            BlendColor::Fog,
            BlendAlphaA::Shade,
            BlendColor::In,
            BlendAlphaB::OneMinusA,
        )
        .cycle1(),
    );
    /// Cycle-1 blend that mixes fog color in by fog alpha.
    pub const FOG_PRIM_A: Self = Self(
        BlendEquation::new(
            BlendColor::Fog,
            BlendAlphaA::Fog,
            BlendColor::In,
            BlendAlphaB::OneMinusA,
        )
        .cycle1(),
    );
    pub const PASS: Self = Self(BL_PASS.cycle1());

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// The data word of a SetRenderMode for a cycle-1 / cycle-2 pair.
    pub const fn combine(c1: Self, c2: Self) -> Self {
        Self(c1.0 | c2.0)
    }
}

/// Flag groups plus blend equation, not yet bound to a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderModePreset {
    pub flags: RenderModeFlags,
    pub coverage: CoverageDest,
    pub zmode: ZMode,
    pub blend: BlendEquation,
}

const F_AA: u32 = RenderModeFlags::AA_EN.bits();
const F_ZC: u32 = RenderModeFlags::Z_CMP.bits();
const F_ZU: u32 = RenderModeFlags::Z_UPD.bits();
const F_RD: u32 = RenderModeFlags::IM_RD.bits();
const F_COC: u32 = RenderModeFlags::CLR_ON_CVG.bits();
const F_CXA: u32 = RenderModeFlags::CVG_X_ALPHA.bits();
const F_ACS: u32 = RenderModeFlags::ALPHA_CVG_SEL.bits();
const F_FBL: u32 = RenderModeFlags::FORCE_BL.bits();
const F_ACD: u32 = RenderModeFlags::AC_DITHER.bits();

/// Opaque blend: `IN * A_IN + MEM * A_MEM`.
const BL_OPA: BlendEquation =
    BlendEquation::new(BlendColor::In, BlendAlphaA::In, BlendColor::Mem, BlendAlphaB::Mem);
/// Translucent blend: `IN * A_IN + MEM * (1 - A)`.
const BL_XLU: BlendEquation =
    BlendEquation::new(BlendColor::In, BlendAlphaA::In, BlendColor::Mem, BlendAlphaB::OneMinusA);
/// Pass-through: `IN * 0 + IN * 1`.
const BL_PASS: BlendEquation =
    BlendEquation::new(BlendColor::In, BlendAlphaA::Zero, BlendColor::In, BlendAlphaB::One);

const fn preset(
    flags: u32,
    coverage: CoverageDest,
    zmode: ZMode,
    blend: BlendEquation,
) -> RenderModePreset {
    RenderModePreset {
        flags: RenderModeFlags::from_bits_truncate(flags),
        coverage,
        zmode,
        blend,
    }
}

use CoverageDest::{Clamp, Full, Save, Wrap};
use ZMode::{Dec, Inter, Opa, Xlu};

impl RenderModePreset {
    pub const AA_ZB_OPA_SURF: Self = preset(F_AA | F_ZC | F_ZU | F_RD | F_ACS, Clamp, Opa, BL_OPA);
    pub const RA_ZB_OPA_SURF: Self = preset(F_AA | F_ZC | F_ZU | F_ACS, Clamp, Opa, BL_OPA);
    pub const AA_ZB_XLU_SURF: Self = preset(F_AA | F_ZC | F_RD | F_COC | F_FBL, Wrap, Xlu, BL_XLU);
    pub const AA_ZB_OPA_DECAL: Self = preset(F_AA | F_ZC | F_RD | F_ACS, Wrap, Dec, BL_OPA);
    pub const RA_ZB_OPA_DECAL: Self = preset(F_AA | F_ZC | F_ACS, Wrap, Dec, BL_OPA);
    pub const AA_ZB_XLU_DECAL: Self = preset(F_AA | F_ZC | F_RD | F_COC | F_FBL, Wrap, Dec, BL_XLU);
    pub const AA_ZB_OPA_INTER: Self =
        preset(F_AA | F_ZC | F_ZU | F_RD | F_ACS, Clamp, Inter, BL_OPA);
    pub const RA_ZB_OPA_INTER: Self = preset(F_AA | F_ZC | F_ZU | F_ACS, Clamp, Inter, BL_OPA);
    pub const AA_ZB_XLU_INTER: Self =
        preset(F_AA | F_ZC | F_RD | F_COC | F_FBL, Wrap, Inter, BL_XLU);
    pub const AA_ZB_XLU_LINE: Self =
        preset(F_AA | F_ZC | F_RD | F_CXA | F_ACS | F_FBL, Clamp, Xlu, BL_XLU);
    pub const AA_ZB_DEC_LINE: Self =
        preset(F_AA | F_ZC | F_RD | F_CXA | F_ACS | F_FBL, Save, Dec, BL_XLU);
    pub const AA_ZB_TEX_EDGE: Self =
        preset(F_AA | F_ZC | F_ZU | F_RD | F_CXA | F_ACS, Clamp, Opa, BL_OPA);
    pub const AA_ZB_TEX_INTER: Self =
        preset(F_AA | F_ZC | F_ZU | F_RD | F_CXA | F_ACS, Clamp, Inter, BL_OPA);
    pub const AA_ZB_SUB_SURF: Self = preset(F_AA | F_ZC | F_ZU | F_RD | F_ACS, Full, Opa, BL_OPA);
    pub const AA_ZB_PCL_SURF: Self = preset(F_AA | F_ZC | F_ZU | F_RD | F_ACD, Clamp, Opa, BL_XLU);
    pub const AA_ZB_OPA_TERR: Self = preset(F_AA | F_ZC | F_ZU | F_RD | F_ACS, Clamp, Opa, BL_XLU);
    pub const AA_ZB_TEX_TERR: Self =
        preset(F_AA | F_ZC | F_ZU | F_RD | F_CXA | F_ACS, Clamp, Opa, BL_XLU);
    pub const AA_ZB_SUB_TERR: Self = preset(F_AA | F_ZC | F_ZU | F_RD | F_ACS, Full, Opa, BL_XLU);

    pub const AA_OPA_SURF: Self = preset(F_AA | F_RD | F_ACS, Clamp, Opa, BL_OPA);
    pub const RA_OPA_SURF: Self = preset(F_AA | F_ACS, Clamp, Opa, BL_OPA);
    pub const AA_XLU_SURF: Self = preset(F_AA | F_RD | F_COC | F_FBL, Wrap, Opa, BL_XLU);
    pub const AA_XLU_LINE: Self = preset(F_AA | F_RD | F_CXA | F_ACS | F_FBL, Clamp, Opa, BL_XLU);
    pub const AA_DEC_LINE: Self = preset(F_AA | F_RD | F_CXA | F_ACS | F_FBL, Full, Opa, BL_XLU);
    pub const AA_TEX_EDGE: Self = preset(F_AA | F_RD | F_CXA | F_ACS, Clamp, Opa, BL_OPA);
    pub const AA_SUB_SURF: Self = preset(F_AA | F_RD | F_ACS, Full, Opa, BL_OPA);
    pub const AA_PCL_SURF: Self = preset(F_AA | F_RD | F_ACD, Clamp, Opa, BL_XLU);
    pub const AA_OPA_TERR: Self = preset(F_AA | F_RD | F_ACS, Clamp, Opa, BL_XLU);
    pub const AA_TEX_TERR: Self = preset(F_AA | F_RD | F_CXA | F_ACS, Clamp, Opa, BL_XLU);
    pub const AA_SUB_TERR: Self = preset(F_AA | F_RD | F_ACS, Full, Opa, BL_XLU);

    pub const ZB_OPA_SURF: Self = preset(F_ZC | F_ZU | F_ACS, Full, Opa, BL_OPA);
    pub const ZB_XLU_SURF: Self = preset(F_ZC | F_RD | F_FBL, Full, Xlu, BL_XLU);
    pub const ZB_OPA_DECAL: Self = preset(F_ZC | F_ACS, Full, Dec, BL_OPA);
    pub const ZB_XLU_DECAL: Self = preset(F_ZC | F_RD | F_FBL, Full, Dec, BL_XLU);
    pub const ZB_CLD_SURF: Self = preset(F_ZC | F_RD | F_FBL, Save, Xlu, BL_XLU);
    pub const ZB_OVL_SURF: Self = preset(F_ZC | F_RD | F_FBL, Save, Dec, BL_XLU);
    pub const ZB_PCL_SURF: Self = preset(F_ZC | F_ZU | F_ACD, Full, Opa, BL_PASS);

    pub const OPA_SURF: Self = preset(F_FBL, Clamp, Opa, BL_PASS);
    pub const XLU_SURF: Self = preset(F_RD | F_FBL, Full, Opa, BL_XLU);
    pub const TEX_EDGE: Self = preset(F_CXA | F_ACS | F_FBL | F_AA, Clamp, Opa, BL_PASS);
    pub const CLD_SURF: Self = preset(F_RD | F_FBL, Save, Opa, BL_XLU);
    pub const PCL_SURF: Self = preset(F_FBL | F_ACD, Full, Opa, BL_PASS);
    pub const ADD: Self = preset(
        F_RD | F_FBL,
        Save,
        Opa,
        BlendEquation::new(BlendColor::In, BlendAlphaA::Fog, BlendColor::Mem, BlendAlphaB::One),
    );
    pub const NOOP: Self = preset(
        0,
        Clamp,
        Opa,
        BlendEquation::new(BlendColor::In, BlendAlphaA::In, BlendColor::In, BlendAlphaB::OneMinusA),
    );
    pub const VISCVG: Self = preset(
        F_RD | F_FBL,
        Clamp,
        Opa,
        BlendEquation::new(BlendColor::In, BlendAlphaA::Zero, BlendColor::Bl, BlendAlphaB::Mem),
    );
    /// For rendering to an 8-bit framebuffer.
    pub const OPA_CI: Self = preset(0, Clamp, Opa, BL_PASS);

    const fn base(self) -> u32 {
        self.flags.bits() | self.coverage as u32 | self.zmode as u32
    }

    pub const fn cycle1(self) -> RenderMode {
        RenderMode(self.base() | self.blend.cycle1())
    }

    pub const fn cycle2(self) -> RenderMode {
        RenderMode(self.base() | self.blend.cycle2())
    }
}
