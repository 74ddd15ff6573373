//! Image formats, texel sizes and the per-size load parameters.

use bitflags::bitflags;

use crate::{GbiError, Result};

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Rgba = 0,
    Yuv = 1,
    Ci = 2,
    Ia = 3,
    I = 4,
}

impl TryFrom<u8> for ImageFormat {
    type Error = GbiError;

    fn try_from(v: u8) -> Result<Self> {
        Ok(match v {
            0 => Self::Rgba,
            1 => Self::Yuv,
            2 => Self::Ci,
            3 => Self::Ia,
            4 => Self::I,
            _ => return Err(GbiError::UnknownImageFormat(v)),
        })
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TexelSize {
    Bits4 = 0,
    Bits8 = 1,
    Bits16 = 2,
    Bits32 = 3,
    /// Depth-difference image; no texture load parameters exist for it.
    Dd = 5,
}

impl TryFrom<u8> for TexelSize {
    type Error = GbiError;

    fn try_from(v: u8) -> Result<Self> {
        Ok(match v {
            0 => Self::Bits4,
            1 => Self::Bits8,
            2 => Self::Bits16,
            3 => Self::Bits32,
            5 => Self::Dd,
            _ => return Err(GbiError::UnknownTexelSize(v)),
        })
    }
}

/// Load parameters for one texel size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeDescriptor {
    pub size: TexelSize,
    /// Bytes per texel (0 for 4-bit, which is handled by `shift`/`incr`).
    pub bytes: u32,
    /// Bytes per texel on the load tile line.
    pub tile_bytes: u32,
    /// Bytes per texel on the render tile line.
    pub line_bytes: u32,
    /// Size the texels are loaded as by LOADBLOCK.
    pub load_block: TexelSize,
    pub shift: u32,
    pub incr: u32,
}

pub const SIZE_DESCRIPTORS: [SizeDescriptor; 4] = [
    SizeDescriptor {
        size: TexelSize::Bits4,
        bytes: 0,
        tile_bytes: 0,
        line_bytes: 0,
        load_block: TexelSize::Bits16,
        shift: 2,
        incr: 3,
    },
    SizeDescriptor {
        size: TexelSize::Bits8,
        bytes: 1,
        tile_bytes: 1,
        line_bytes: 1,
        load_block: TexelSize::Bits16,
        shift: 1,
        incr: 1,
    },
    SizeDescriptor {
        size: TexelSize::Bits16,
        bytes: 2,
        tile_bytes: 2,
        line_bytes: 2,
        load_block: TexelSize::Bits16,
        shift: 0,
        incr: 0,
    },
    SizeDescriptor {
        size: TexelSize::Bits32,
        bytes: 4,
        tile_bytes: 2,
        line_bytes: 2,
        load_block: TexelSize::Bits32,
        shift: 0,
        incr: 0,
    },
];

impl TexelSize {
    pub const fn descriptor(self) -> Option<SizeDescriptor> {
        match self {
            Self::Bits4 => Some(SIZE_DESCRIPTORS[0]),
            Self::Bits8 => Some(SIZE_DESCRIPTORS[1]),
            Self::Bits16 => Some(SIZE_DESCRIPTORS[2]),
            Self::Bits32 => Some(SIZE_DESCRIPTORS[3]),
            Self::Dd => None,
        }
    }

    pub fn try_descriptor(self) -> Result<SizeDescriptor> {
        self.descriptor().ok_or(GbiError::NoSizeDescriptor(self))
    }
}

/* ---- Tiles ---- */

pub const G_TX_LOADTILE: u8 = 7;
pub const G_TX_RENDERTILE: u8 = 0;
pub const G_TX_NOMASK: u8 = 0;
pub const G_TX_NOLOD: u8 = 0;

/// First TMEM word of the palette half.
pub const G_TLUT_TMEM: u16 = 256;

bitflags! {
    /// Per-axis addressing of a tile.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TileWrap: u8 {
        const MIRROR = 0x1;
        const CLAMP = 0x2;
    }
}

impl TileWrap {
    pub const WRAP: Self = Self::empty();
    pub const NOMIRROR: Self = Self::empty();
}

/// Palette and addressing fields shared by the load and render tiles of a
/// texture load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TileParams {
    pub palette: u8,
    pub cms: TileWrap,
    pub cmt: TileWrap,
    pub masks: u8,
    pub maskt: u8,
    pub shifts: u8,
    pub shiftt: u8,
}

impl TileParams {
    pub const fn new(
        palette: u8,
        cms: TileWrap,
        cmt: TileWrap,
        masks: u8,
        maskt: u8,
        shifts: u8,
        shiftt: u8,
    ) -> Self {
        Self {
            palette,
            cms,
            cmt,
            masks,
            maskt,
            shifts,
            shiftt,
        }
    }
}

/* ---- LOADBLOCK dxt ---- */

pub const G_TX_DXT_FRAC: u32 = 11;
/// Largest lrs a single LOADBLOCK can take.
pub const G_TX_LDBLK_MAX_TXL: u32 = 2047;

/// 64-bit words in a line of `txls` texels of `b_txl` bytes, at least one.
pub const fn txl2words(txls: u32, b_txl: u32) -> u32 {
    let words = txls * b_txl / 8;
    if words > 1 {
        words
    } else {
        1
    }
}

/// Reciprocal line length in 1.11 fixed point, rounded up.
pub const fn calc_dxt(width: u32, b_txl: u32) -> u32 {
    let words = txl2words(width, b_txl);
    ((1 << G_TX_DXT_FRAC) + words - 1) / words
}

pub const fn txl2words_4b(txls: u32) -> u32 {
    let words = txls / 16;
    if words > 1 {
        words
    } else {
        1
    }
}

pub const fn calc_dxt_4b(width: u32) -> u32 {
    let words = txl2words_4b(width);
    ((1 << G_TX_DXT_FRAC) + words - 1) / words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_table() {
        let d32 = TexelSize::Bits32.descriptor().expect("32b has a descriptor");
        assert_eq!((d32.bytes, d32.tile_bytes, d32.line_bytes), (4, 2, 2));
        assert_eq!(d32.load_block, TexelSize::Bits32);

        let d4 = TexelSize::Bits4.descriptor().expect("4b has a descriptor");
        assert_eq!((d4.shift, d4.incr, d4.load_block), (2, 3, TexelSize::Bits16));

        for d in SIZE_DESCRIPTORS {
            assert_eq!(d.size.descriptor(), Some(d));
        }
        assert_eq!(
            TexelSize::Dd.try_descriptor(),
            Err(GbiError::NoSizeDescriptor(TexelSize::Dd))
        );
    }

    #[test]
    fn raw_codes() {
        assert_eq!(ImageFormat::try_from(3), Ok(ImageFormat::Ia));
        assert_eq!(ImageFormat::try_from(5), Err(GbiError::UnknownImageFormat(5)));
        assert_eq!(TexelSize::try_from(5), Ok(TexelSize::Dd));
        assert_eq!(TexelSize::try_from(4), Err(GbiError::UnknownTexelSize(4)));
    }

    #[test]
    fn dxt_rounds_up() {
        // 32 texels of 16 bits are 8 words per line: 2048 / 8.
        assert_eq!(calc_dxt(32, 2), 256);
        // 24 texels of 8 bits are 3 words: ceil(2048 / 3).
        assert_eq!(calc_dxt(24, 1), 683);
        assert_eq!(txl2words(1, 1), 1);
        assert_eq!(calc_dxt_4b(64), 512);
        assert_eq!(calc_dxt_4b(8), 2048);
    }
}
