//! Command opcode registry.
//!
//! Vector-stage (RSP) and rasterizer-stage (RDP) commands share one byte
//! namespace. The RSP owns `0x00..=0x09`, `0xD3..=0xE3` and `0xF1`; the RDP owns
//! the rest of `0xE4..=0xFF`. The eight generated triangle opcodes in
//! `0xC8..=0xCF` are described separately by [`TriangleKind`].

use bitflags::bitflags;

use crate::{GbiError, Result};

/// Pipeline stage that interprets an opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Vector,
    Rasterizer,
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /* ---- RSP ---- */
    Noop = 0x00,
    Vtx = 0x01,
    ModifyVtx = 0x02,
    CullDl = 0x03,
    BranchZ = 0x04,
    Tri1 = 0x05,
    Tri2 = 0x06,
    Quad = 0x07,
    TriStrip = 0x08,
    TriFan = 0x09,
    Special3 = 0xD3,
    Special2 = 0xD4,
    Special1 = 0xD5,
    DmaIo = 0xD6,
    Texture = 0xD7,
    PopMtx = 0xD8,
    GeometryMode = 0xD9,
    Mtx = 0xDA,
    MoveWord = 0xDB,
    MoveMem = 0xDC,
    LoadUcode = 0xDD,
    Dl = 0xDE,
    EndDl = 0xDF,
    SpNoop = 0xE0,
    RdpHalf1 = 0xE1,
    SetOtherModeL = 0xE2,
    SetOtherModeH = 0xE3,
    RdpHalf2 = 0xF1,

    /* ---- RDP ---- */
    TexRect = 0xE4,
    TexRectFlip = 0xE5,
    RdpLoadSync = 0xE6,
    RdpPipeSync = 0xE7,
    RdpTileSync = 0xE8,
    RdpFullSync = 0xE9,
    SetKeyGb = 0xEA,
    SetKeyR = 0xEB,
    SetConvert = 0xEC,
    SetScissor = 0xED,
    SetPrimDepth = 0xEE,
    RdpSetOtherMode = 0xEF,
    LoadTlut = 0xF0,
    SetTileSize = 0xF2,
    LoadBlock = 0xF3,
    LoadTile = 0xF4,
    SetTile = 0xF5,
    FillRect = 0xF6,
    SetFillColor = 0xF7,
    SetFogColor = 0xF8,
    SetBlendColor = 0xF9,
    SetPrimColor = 0xFA,
    SetEnvColor = 0xFB,
    SetCombine = 0xFC,
    SetTImg = 0xFD,
    SetZImg = 0xFE,
    SetCImg = 0xFF,
}

impl Opcode {
    pub const fn from_u8(v: u8) -> Option<Self> {
        Some(match v {
            0x00 => Self::Noop,
            0x01 => Self::Vtx,
            0x02 => Self::ModifyVtx,
            0x03 => Self::CullDl,
            0x04 => Self::BranchZ,
            0x05 => Self::Tri1,
            0x06 => Self::Tri2,
            0x07 => Self::Quad,
            0x08 => Self::TriStrip,
            0x09 => Self::TriFan,
            0xD3 => Self::Special3,
            0xD4 => Self::Special2,
            0xD5 => Self::Special1,
            0xD6 => Self::DmaIo,
            0xD7 => Self::Texture,
            0xD8 => Self::PopMtx,
            0xD9 => Self::GeometryMode,
            0xDA => Self::Mtx,
            0xDB => Self::MoveWord,
            0xDC => Self::MoveMem,
            0xDD => Self::LoadUcode,
            0xDE => Self::Dl,
            0xDF => Self::EndDl,
            0xE0 => Self::SpNoop,
            0xE1 => Self::RdpHalf1,
            0xE2 => Self::SetOtherModeL,
            0xE3 => Self::SetOtherModeH,
            0xE4 => Self::TexRect,
            0xE5 => Self::TexRectFlip,
            0xE6 => Self::RdpLoadSync,
            0xE7 => Self::RdpPipeSync,
            0xE8 => Self::RdpTileSync,
            0xE9 => Self::RdpFullSync,
            0xEA => Self::SetKeyGb,
            0xEB => Self::SetKeyR,
            0xEC => Self::SetConvert,
            0xED => Self::SetScissor,
            0xEE => Self::SetPrimDepth,
            0xEF => Self::RdpSetOtherMode,
            0xF0 => Self::LoadTlut,
            0xF1 => Self::RdpHalf2,
            0xF2 => Self::SetTileSize,
            0xF3 => Self::LoadBlock,
            0xF4 => Self::LoadTile,
            0xF5 => Self::SetTile,
            0xF6 => Self::FillRect,
            0xF7 => Self::SetFillColor,
            0xF8 => Self::SetFogColor,
            0xF9 => Self::SetBlendColor,
            0xFA => Self::SetPrimColor,
            0xFB => Self::SetEnvColor,
            0xFC => Self::SetCombine,
            0xFD => Self::SetTImg,
            0xFE => Self::SetZImg,
            0xFF => Self::SetCImg,
            _ => return None,
        })
    }

    #[inline]
    pub const fn byte(self) -> u8 {
        self as u8
    }

    pub const fn stage(self) -> Stage {
        match self as u8 {
            0x00..=0x09 | 0xD3..=0xE3 | 0xF1 => Stage::Vector,
            _ => Stage::Rasterizer,
        }
    }

    /// Opcodes that only carry the first or second half of a linked command.
    pub const fn is_half_word(self) -> bool {
        matches!(self, Self::RdpHalf1 | Self::RdpHalf2)
    }
}

impl TryFrom<u8> for Opcode {
    type Error = GbiError;

    fn try_from(v: u8) -> Result<Self> {
        Self::from_u8(v).ok_or(GbiError::UnknownOpcode(v))
    }
}

impl From<Opcode> for u8 {
    fn from(op: Opcode) -> u8 {
        op as u8
    }
}

bitflags! {
    /// Feature bits of the generated triangle opcodes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TriangleFlags: u8 {
        const FILL = 0x08;
        const SHADE = 0x04;
        const TXTR = 0x02;
        const ZBUFF = 0x01;
    }
}

/// The eight assigned triangle opcodes.
///
/// The flag bits span sixteen combinations but only those with
/// [`TriangleFlags::FILL`] set are real commands.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriangleKind {
    Fill = 0xC8,
    Shade = 0xCC,
    Txtr = 0xCA,
    ShadeTxtr = 0xCE,
    FillZbuff = 0xC9,
    ShadeZbuff = 0xCD,
    TxtrZbuff = 0xCB,
    ShadeTxtrZbuff = 0xCF,
}

impl TriangleKind {
    pub const BASE: u8 = 0xC0;

    pub const ALL: [Self; 8] = [
        Self::Fill,
        Self::Shade,
        Self::Txtr,
        Self::ShadeTxtr,
        Self::FillZbuff,
        Self::ShadeZbuff,
        Self::TxtrZbuff,
        Self::ShadeTxtrZbuff,
    ];

    pub const fn from_flags(flags: TriangleFlags) -> Option<Self> {
        Self::from_u8(Self::BASE | flags.bits())
    }

    pub const fn from_u8(v: u8) -> Option<Self> {
        Some(match v {
            0xC8 => Self::Fill,
            0xCC => Self::Shade,
            0xCA => Self::Txtr,
            0xCE => Self::ShadeTxtr,
            0xC9 => Self::FillZbuff,
            0xCD => Self::ShadeZbuff,
            0xCB => Self::TxtrZbuff,
            0xCF => Self::ShadeTxtrZbuff,
            _ => return None,
        })
    }

    pub const fn flags(self) -> TriangleFlags {
        TriangleFlags::from_bits_truncate(self as u8 & 0x0F)
    }

    #[inline]
    pub const fn byte(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_byte_round_trips_or_is_unknown() {
        let mut known = 0;
        for b in 0..=u8::MAX {
            match Opcode::from_u8(b) {
                Some(op) => {
                    assert_eq!(op.byte(), b);
                    known += 1;
                }
                None => assert_eq!(Opcode::try_from(b), Err(GbiError::UnknownOpcode(b))),
            }
        }
        assert_eq!(known, 55);
    }

    #[test]
    fn stage_partition() {
        assert_eq!(Opcode::Tri2.stage(), Stage::Vector);
        assert_eq!(Opcode::SetOtherModeH.stage(), Stage::Vector);
        assert_eq!(Opcode::RdpHalf2.stage(), Stage::Vector);
        assert_eq!(Opcode::TexRect.stage(), Stage::Rasterizer);
        assert_eq!(Opcode::LoadTlut.stage(), Stage::Rasterizer);
        assert_eq!(Opcode::SetTileSize.stage(), Stage::Rasterizer);
        assert_eq!(Opcode::SetCImg.stage(), Stage::Rasterizer);
    }

    #[test]
    fn triangle_kinds_require_fill_bit() {
        for bits in 0u8..16 {
            let flags = TriangleFlags::from_bits_truncate(bits);
            let kind = TriangleKind::from_flags(flags);
            assert_eq!(kind.is_some(), flags.contains(TriangleFlags::FILL), "bits {bits:#x}");
            if let Some(kind) = kind {
                assert_eq!(kind.flags(), flags);
                assert_eq!(kind.byte(), 0xC0 | bits);
            }
        }
        assert_eq!(
            TriangleKind::from_flags(
                TriangleFlags::FILL | TriangleFlags::SHADE | TriangleFlags::TXTR
            ),
            Some(TriangleKind::ShadeTxtr)
        );
        assert_eq!(TriangleKind::from_u8(0xC4), None);
        assert_eq!(TriangleKind::ALL.len(), 8);
    }
}
