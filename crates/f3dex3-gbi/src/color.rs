//! Color and depth packers for fill and blend registers.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// `r` in the top byte, `a` in the bottom byte.
    pub const fn to_u32(self) -> u32 {
        u32::from_be_bytes([self.r, self.g, self.b, self.a])
    }

    pub const fn from_u32(v: u32) -> Self {
        let [r, g, b, a] = v.to_be_bytes();
        Self { r, g, b, a }
    }
}

impl From<Rgba> for u32 {
    fn from(c: Rgba) -> u32 {
        c.to_u32()
    }
}

/// 5/5/5/1 pixel as used by 16-bit color images and fill colors.
pub const fn rgba16(r: u8, g: u8, b: u8, a: u8) -> u16 {
    let (r, g, b, a) = (r as u32, g as u32, b as u32, a as u32);
    (((r << 8) & 0xF800) | ((g << 3) & 0x7C0) | ((b >> 2) & 0x3E) | (a & 0x1)) as u16
}

pub const fn ia16(i: u8, a: u8) -> u16 {
    ((i as u16) << 8) | a as u16
}

/// Depth buffer word: 14-bit z over a 2-bit delta-z exponent.
pub const fn zdz(z: u16, dz: u16) -> u16 {
    (z << 2) | dz
}

/// Fill color for a 16-bit framebuffer: the same pixel twice.
pub const fn fill_color16(pixel: u16) -> u32 {
    ((pixel as u32) << 16) | pixel as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packers() {
        assert_eq!(rgba16(0xFF, 0xFF, 0xFF, 1), 0xFFFF);
        assert_eq!(rgba16(0xFF, 0, 0, 0), 0xF800);
        assert_eq!(rgba16(0, 0xFF, 0, 0), 0x07C0);
        assert_eq!(rgba16(0, 0, 0xFF, 0), 0x003E);
        assert_eq!(ia16(0x12, 0x34), 0x1234);
        assert_eq!(zdz(0x3FFF, 0), 0xFFFC);
        assert_eq!(fill_color16(rgba16(0, 0, 0, 1)), 0x0001_0001);
        assert_eq!(Rgba::new(1, 2, 3, 4).to_u32(), 0x0102_0304);
        assert_eq!(Rgba::from_u32(0x0102_0304), Rgba::new(1, 2, 3, 4));
    }
}
