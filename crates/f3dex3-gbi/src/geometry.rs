//! Geometry-mode bits, matrix flags and the DMEM indices used by MOVEMEM/MOVEWORD.

use bitflags::bitflags;

bitflags! {
    /// RSP geometry-mode word.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct GeometryMode: u32 {
        const ZBUFFER = 0x0000_0001;
        const SHADE = 0x0000_0004;
        const ATTROFFSET_ST_ENABLE = 0x0000_0100;
        const CULL_FRONT = 0x0000_0200;
        const CULL_BACK = 0x0000_0400;
        const CULL_BOTH = 0x0000_0600;
        const ATTROFFSET_Z_ENABLE = 0x0000_0800;
        const PACKED_NORMALS = 0x0000_1000;
        const LIGHTTOALPHA = 0x0000_2000;
        const AMBOCCLUSION = 0x0000_4000;
        const FOG = 0x0001_0000;
        const LIGHTING = 0x0002_0000;
        const TEXTURE_GEN = 0x0004_0000;
        const TEXTURE_GEN_LINEAR = 0x0008_0000;
        const LOD = 0x0010_0000;
        const SHADING_SMOOTH = 0x0020_0000;
        const LIGHTING_POSITIONAL = 0x0040_0000;
        const CLIPPING = 0x0080_0000;
    }
}

impl GeometryMode {
    /// Texturing is always on in F3DEX3; kept so old mode lists still read naturally.
    pub const TEXTURE_ENABLE: Self = Self::empty();
}

bitflags! {
    /// Parameter bits of the MTX command.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MtxFlags: u8 {
        const PUSH = 0x01;
        const LOAD = 0x02;
        const PROJECTION = 0x04;
    }
}

impl MtxFlags {
    pub const NOPUSH: Self = Self::empty();
    pub const MUL: Self = Self::empty();
    pub const MODELVIEW: Self = Self::empty();
}

/// Whether a display-list call returns to the caller.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DlPush {
    Push = 0,
    NoPush = 1,
}

/* ---- MOVEMEM indices ---- */
pub const G_MV_MMTX: u8 = 2;
pub const G_MV_PMTX: u8 = 6;
pub const G_MV_VIEWPORT: u8 = 8;
pub const G_MV_LIGHT: u8 = 10;

/* ---- MOVEWORD indices ---- */
pub const G_MW_MODS: u8 = 0x00;
pub const G_MW_NUMLIGHT: u8 = 0x02;
pub const G_MW_PERSPNORM: u8 = 0x04;
pub const G_MW_SEGMENT: u8 = 0x06;
pub const G_MW_FOG: u8 = 0x08;
pub const G_MW_LIGHTCOL: u8 = 0x0A;

/* ---- MOVEWORD offsets ---- */
pub const G_MWO_NUMLIGHT: u16 = 0x00;
pub const G_MWO_FOG: u16 = 0x00;
pub const G_MWO_CLIP_MOD_SETTINGS: u16 = 0x00;
pub const G_MWO_AMB_OCCLUSION: u16 = 0x04;
pub const G_MWO_FRESNEL: u16 = 0x08;
pub const G_MWO_ATTR_OFFSET_ST: u16 = 0x0C;
pub const G_MWO_ATTR_OFFSET_Z: u16 = 0x10;
pub const G_MWO_POINT_RGBA: u16 = 0x10;
pub const G_MWO_POINT_ST: u16 = 0x14;
pub const G_MWO_POINT_XYSCREEN: u16 = 0x18;
pub const G_MWO_POINT_ZSCREEN: u16 = 0x1C;

/// Byte offset of segment `seg` in the segment table.
pub const fn g_mwo_segment(seg: u8) -> u16 {
    (seg as u16 & 0xF) * 4
}

/// Lights live 16 bytes apart, starting after the 8-byte lookat pair.
pub const fn light_offset(n: u8) -> u16 {
    (n as u16).wrapping_sub(1).wrapping_mul(0x10).wrapping_add(8)
}

/// Segment number of a segmented address.
pub const fn segment_of(addr: u32) -> u8 {
    ((addr >> 24) & 0x0F) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_values() {
        assert_eq!(GeometryMode::CULL_BOTH, GeometryMode::CULL_FRONT | GeometryMode::CULL_BACK);
        assert_eq!(
            (GeometryMode::ZBUFFER | GeometryMode::SHADE | GeometryMode::SHADING_SMOOTH).bits(),
            0x0020_0005
        );
        assert!(GeometryMode::TEXTURE_ENABLE.is_empty());
        assert_eq!((MtxFlags::PROJECTION | MtxFlags::LOAD | MtxFlags::NOPUSH).bits(), 6);
        assert_eq!(g_mwo_segment(0x6), 0x18);
        assert_eq!(light_offset(1), 0x08);
        assert_eq!(light_offset(3), 0x28);
        assert_eq!(segment_of(0x0600_1234), 6);
    }
}
