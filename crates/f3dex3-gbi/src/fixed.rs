//! Fixed-point conversions and screen-depth remapping.

/// 10 bits of integer screen-Z precision.
pub const G_MAXZ: u32 = 0x03FF;
/// Largest value the depth buffer can hold.
pub const G_MAXFBZ: u32 = 0x3FFF;

pub const G_TEXTURE_IMAGE_FRAC: u32 = 2;
pub const G_TEXTURE_SCALE_FRAC: u32 = 16;
pub const G_SCALE_FRAC: u32 = 8;
pub const G_ROTATE_FRAC: u32 = 16;

/// Float to s15.16, truncating toward zero.
#[inline]
pub fn ftofix32(x: f32) -> i32 {
    (x * 65536.0) as i32
}

/// High half of the s15.16 value, as stored in a matrix record.
#[inline]
pub fn int_part(x: f32) -> u16 {
    ((ftofix32(x) >> 16) & 0xFFFF) as u16
}

/// Low half of the s15.16 value.
#[inline]
pub fn frac_part(x: f32) -> u16 {
    (ftofix32(x) & 0xFFFF) as u16
}

#[inline]
pub fn split(x: f32) -> (u16, u16) {
    (int_part(x), frac_part(x))
}

/// Reassembles a split pair; used when reading matrices back.
#[inline]
pub fn join(int: u16, frac: u16) -> f32 {
    (((int as u32) << 16 | frac as u32) as i32) as f32 / 65536.0
}

/// Depth interpolation used by [`depth_to_screen_z`].
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DepthProjection {
    #[default]
    Perspective = 0,
    Orthographic = 1,
}

/// Integer screen-Z range the remapped depth is spread over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthRange {
    pub zmin: u32,
    pub zmax: u32,
}

impl Default for DepthRange {
    fn default() -> Self {
        Self { zmin: 0, zmax: G_MAXZ }
    }
}

/// Maps an eye-space depth to the s15.16 screen Z the branch command compares against.
///
/// The span is forced even and the arithmetic wraps at 32 bits, matching what
/// the microcode expects to see for out-of-range inputs.
pub fn depth_to_screen_z(
    z: f32,
    near: f32,
    far: f32,
    projection: DepthProjection,
    range: DepthRange,
) -> u32 {
    let ratio = match projection {
        DepthProjection::Perspective => (1.0 - near / z) / (1.0 - near / far),
        DepthProjection::Orthographic => (z - near) / (far - near),
    };
    let span = (range.zmax.wrapping_sub(range.zmin) as i32 & !1) as u32;
    (ftofix32(ratio) as u32)
        .wrapping_mul(span)
        .wrapping_add(ftofix32(range.zmin as f32) as u32)
}
