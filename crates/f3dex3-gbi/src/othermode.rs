//! Othermode fields.
//!
//! Each field is an enum whose discriminant is the raw code; [`OtherModeField`]
//! ties it to the word (high or low), bit offset and width it occupies, so one
//! generic encoder covers every per-field setter.

use crate::opcode::Opcode;

/* ---- Low word shifts ---- */
pub const G_MDSFT_ALPHACOMPARE: u32 = 0;
pub const G_MDSFT_ZSRCSEL: u32 = 2;
pub const G_MDSFT_RENDERMODE: u32 = 3;
pub const G_MDSFT_BLENDER: u32 = 16;

/* ---- High word shifts ---- */
pub const G_MDSFT_BLENDMASK: u32 = 0;
pub const G_MDSFT_ALPHADITHER: u32 = 4;
pub const G_MDSFT_RGBDITHER: u32 = 6;
pub const G_MDSFT_COMBKEY: u32 = 8;
pub const G_MDSFT_TEXTCONV: u32 = 9;
pub const G_MDSFT_TEXTFILT: u32 = 12;
pub const G_MDSFT_TEXTLUT: u32 = 14;
pub const G_MDSFT_TEXTLOD: u32 = 16;
pub const G_MDSFT_TEXTDETAIL: u32 = 17;
pub const G_MDSFT_TEXTPERSP: u32 = 19;
pub const G_MDSFT_CYCLETYPE: u32 = 20;
pub const G_MDSFT_COLORDITHER: u32 = 22;
pub const G_MDSFT_PIPELINE: u32 = 23;

/// One field of the othermode register pair.
pub trait OtherModeField: Copy {
    /// `SetOtherModeH` or `SetOtherModeL`.
    const OPCODE: Opcode;
    const SHIFT: u32;
    const LEN: u32;

    /// Field value already shifted into place.
    fn bits(self) -> u32;
}

macro_rules! othermode_field {
    (
        $(#[$meta:meta])*
        $name:ident: $op:ident, $shift:expr, $len:literal {
            $($variant:ident = $value:expr),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(u32)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant = $value),+
        }

        impl OtherModeField for $name {
            const OPCODE: Opcode = Opcode::$op;
            const SHIFT: u32 = $shift;
            const LEN: u32 = $len;

            #[inline]
            fn bits(self) -> u32 {
                (self as u32) << Self::SHIFT
            }
        }
    };
}

othermode_field! {
    PipelineMode: SetOtherModeH, G_MDSFT_PIPELINE, 1 {
        NPrimitive = 0,
        OnePrimitive = 1,
    }
}

othermode_field! {
    CycleType: SetOtherModeH, G_MDSFT_CYCLETYPE, 2 {
        OneCycle = 0,
        TwoCycle = 1,
        Copy = 2,
        Fill = 3,
    }
}

othermode_field! {
    TexturePersp: SetOtherModeH, G_MDSFT_TEXTPERSP, 1 {
        None = 0,
        Persp = 1,
    }
}

othermode_field! {
    TextureDetail: SetOtherModeH, G_MDSFT_TEXTDETAIL, 2 {
        Clamp = 0,
        Sharpen = 1,
        Detail = 2,
    }
}

othermode_field! {
    TextureLod: SetOtherModeH, G_MDSFT_TEXTLOD, 1 {
        Tile = 0,
        Lod = 1,
    }
}

othermode_field! {
    TextureLut: SetOtherModeH, G_MDSFT_TEXTLUT, 2 {
        None = 0,
        Rgba16 = 2,
        Ia16 = 3,
    }
}

othermode_field! {
    TextureFilter: SetOtherModeH, G_MDSFT_TEXTFILT, 2 {
        Point = 0,
        Bilerp = 2,
        Average = 3,
    }
}

othermode_field! {
    TextureConvert: SetOtherModeH, G_MDSFT_TEXTCONV, 3 {
        Conv = 0,
        FiltConv = 5,
        Filt = 6,
    }
}

othermode_field! {
    CombineKey: SetOtherModeH, G_MDSFT_COMBKEY, 1 {
        None = 0,
        Key = 1,
    }
}

othermode_field! {
    /// RGB dithering, set through the RGBDITHER slot.
    ColorDither: SetOtherModeH, G_MDSFT_RGBDITHER, 2 {
        MagicSq = 0,
        Bayer = 1,
        Noise = 2,
        Disable = 3,
    }
}

othermode_field! {
    AlphaDither: SetOtherModeH, G_MDSFT_ALPHADITHER, 2 {
        Pattern = 0,
        NotPattern = 1,
        Noise = 2,
        Disable = 3,
    }
}

othermode_field! {
    AlphaCompare: SetOtherModeL, G_MDSFT_ALPHACOMPARE, 2 {
        None = 0,
        Threshold = 1,
        Dither = 3,
    }
}

othermode_field! {
    DepthSource: SetOtherModeL, G_MDSFT_ZSRCSEL, 1 {
        Pixel = 0,
        Prim = 1,
    }
}

/// Full othermode register pair, for the RDP `SetOtherMode` command.
///
/// `hi` holds the 24 meaningful bits of the high word; `lo` is the whole low
/// word including the render mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OtherMode {
    pub hi: u32,
    pub lo: u32,
}

impl OtherMode {
    pub const fn new(hi: u32, lo: u32) -> Self {
        Self { hi, lo }
    }

    /// Replaces one field, leaving the rest of its word untouched.
    pub fn with<F: OtherModeField>(mut self, field: F) -> Self {
        let mask = crate::field::mask(F::LEN) << F::SHIFT;
        let word = match F::OPCODE {
            Opcode::SetOtherModeH => &mut self.hi,
            _ => &mut self.lo,
        };
        *word = (*word & !mask) | (field.bits() & mask);
        self
    }

    pub fn with_render_mode(mut self, mode: crate::render_mode::RenderMode) -> Self {
        let mask = crate::field::mask(29) << G_MDSFT_RENDERMODE;
        self.lo = (self.lo & !mask) | (mode.bits() & mask);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_positions() {
        assert_eq!(CycleType::TwoCycle.bits(), 0x0010_0000);
        assert_eq!(CycleType::Fill.bits(), 0x0030_0000);
        assert_eq!(PipelineMode::OnePrimitive.bits(), 0x0080_0000);
        assert_eq!(TexturePersp::Persp.bits(), 0x0008_0000);
        assert_eq!(TextureFilter::Bilerp.bits(), 0x2000);
        assert_eq!(TextureConvert::Filt.bits(), 0xC00);
        assert_eq!(TextureLut::Rgba16.bits(), 0x8000);
        assert_eq!(ColorDither::Disable.bits(), 0xC0);
        assert_eq!(AlphaDither::Disable.bits(), 0x30);
        assert_eq!(AlphaCompare::Dither.bits(), 3);
        assert_eq!(DepthSource::Prim.bits(), 4);
        assert_eq!(<DepthSource as OtherModeField>::OPCODE, Opcode::SetOtherModeL);
    }

    #[test]
    fn field_extents() {
        assert_eq!((PipelineMode::SHIFT, PipelineMode::LEN), (23, 1));
        assert_eq!((CycleType::SHIFT, CycleType::LEN), (20, 2));
        assert_eq!((TextureConvert::SHIFT, TextureConvert::LEN), (9, 3));
        assert_eq!((AlphaCompare::SHIFT, AlphaCompare::LEN), (0, 2));
        assert_eq!((DepthSource::SHIFT, DepthSource::LEN), (2, 1));
        assert_eq!(<CycleType as OtherModeField>::OPCODE, Opcode::SetOtherModeH);
    }

    #[test]
    fn composed_register_replaces_fields() {
        let m = OtherMode::default()
            .with(CycleType::Fill)
            .with(CycleType::TwoCycle)
            .with(TexturePersp::Persp)
            .with(AlphaCompare::Threshold);
        assert_eq!(m.hi, 0x0018_0000);
        assert_eq!(m.lo, 1);
    }
}
