//! Fixed binary records moved into DMEM by MOVEMEM, VTX and MTX.
//!
//! Each record is a big-endian byte buffer of its exact hardware size with
//! accessors for the fields. There are no overlapping views: a vertex built
//! with normals is read back with the normal accessors, the buffer itself does
//! not remember which variant it holds.

use crate::fixed;
use crate::format::{ImageFormat, TexelSize, TileWrap};
use crate::word::CommandWord;
use crate::{GbiError, Result};

/// Byte view shared by all records.
pub trait Record {
    const SIZE_BYTES: usize;

    fn as_bytes(&self) -> &[u8];
}

const fn put_u16<const N: usize>(mut b: [u8; N], off: usize, v: u16) -> [u8; N] {
    let be = v.to_be_bytes();
    b[off] = be[0];
    b[off + 1] = be[1];
    b
}

const fn put_u32<const N: usize>(mut b: [u8; N], off: usize, v: u32) -> [u8; N] {
    let be = v.to_be_bytes();
    b[off] = be[0];
    b[off + 1] = be[1];
    b[off + 2] = be[2];
    b[off + 3] = be[3];
    b
}

const fn get_u16<const N: usize>(b: &[u8; N], off: usize) -> u16 {
    u16::from_be_bytes([b[off], b[off + 1]])
}

const fn get_u32<const N: usize>(b: &[u8; N], off: usize) -> u32 {
    u32::from_be_bytes([b[off], b[off + 1], b[off + 2], b[off + 3]])
}

fn read_exact<const N: usize>(bytes: &[u8]) -> Result<[u8; N]> {
    bytes
        .get(..N)
        .and_then(|b| b.try_into().ok())
        .ok_or(GbiError::BufferTooSmall {
            needed: N,
            found: bytes.len(),
        })
}

macro_rules! impl_record {
    ($name:ident, $size:expr) => {
        impl $name {
            pub const SIZE_BYTES: usize = $size;

            pub const fn to_bytes(&self) -> [u8; $size] {
                self.0
            }

            pub const fn from_raw(bytes: [u8; $size]) -> Self {
                Self(bytes)
            }

            /// Reads a record from the front of `bytes`.
            pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
                read_exact::<$size>(bytes).map(Self)
            }
        }

        impl Record for $name {
            const SIZE_BYTES: usize = $size;

            fn as_bytes(&self) -> &[u8] {
                &self.0
            }
        }
    };
}

/* ---- Vertex ---- */

/// 16-byte vertex: position, flag/packed normal, texture coordinate, then
/// either a color or a normal plus alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Vtx([u8; 16]);

impl_record!(Vtx, 16);

impl Vtx {
    const fn base(ob: [i16; 3], flag: u16, tc: [i16; 2]) -> [u8; 16] {
        let mut b = [0u8; 16];
        b = put_u16(b, 0, ob[0] as u16);
        b = put_u16(b, 2, ob[1] as u16);
        b = put_u16(b, 4, ob[2] as u16);
        b = put_u16(b, 6, flag);
        b = put_u16(b, 8, tc[0] as u16);
        b = put_u16(b, 10, tc[1] as u16);
        b
    }

    /// Vertex carrying a color. `flag` holds the packed normal when
    /// `PACKED_NORMALS` is enabled.
    pub const fn with_color(ob: [i16; 3], flag: u16, tc: [i16; 2], cn: [u8; 4]) -> Self {
        let mut b = Self::base(ob, flag, tc);
        b[12] = cn[0];
        b[13] = cn[1];
        b[14] = cn[2];
        b[15] = cn[3];
        Self(b)
    }

    pub const fn with_normal(ob: [i16; 3], flag: u16, tc: [i16; 2], n: [i8; 3], a: u8) -> Self {
        let mut b = Self::base(ob, flag, tc);
        b[12] = n[0] as u8;
        b[13] = n[1] as u8;
        b[14] = n[2] as u8;
        b[15] = a;
        Self(b)
    }

    pub const fn ob(&self) -> [i16; 3] {
        [
            get_u16(&self.0, 0) as i16,
            get_u16(&self.0, 2) as i16,
            get_u16(&self.0, 4) as i16,
        ]
    }

    pub const fn flag(&self) -> u16 {
        get_u16(&self.0, 6)
    }

    pub const fn tc(&self) -> [i16; 2] {
        [get_u16(&self.0, 8) as i16, get_u16(&self.0, 10) as i16]
    }

    pub const fn color(&self) -> [u8; 4] {
        [self.0[12], self.0[13], self.0[14], self.0[15]]
    }

    pub const fn normal(&self) -> [i8; 3] {
        [self.0[12] as i8, self.0[13] as i8, self.0[14] as i8]
    }

    pub const fn alpha(&self) -> u8 {
        self.0[15]
    }
}

/// Triangle face for CPU-side meshes; never DMA'd on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Tri([u8; 4]);

impl_record!(Tri, 4);

impl Tri {
    pub const fn new(flag: u8, v: [u8; 3]) -> Self {
        Self([flag, v[0], v[1], v[2]])
    }

    pub const fn flag(&self) -> u8 {
        self.0[0]
    }

    pub const fn vertices(&self) -> [u8; 3] {
        [self.0[1], self.0[2], self.0[3]]
    }
}

/* ---- Matrix ---- */

/// 4x4 s15.16 matrix: sixteen integer halves, then sixteen fraction halves.
///
/// Halves are stored in `[i][j]` order of the row-vector convention, where
/// the translation lives in row 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mtx([u8; 64]);

impl_record!(Mtx, 64);

impl Mtx {
    pub const IDENTITY: Self = Self::from_parts(
        [[1, 0, 0, 0], [0, 1, 0, 0], [0, 0, 1, 0], [0, 0, 0, 1]],
        [[0; 4]; 4],
    );

    pub const fn from_parts(int: [[u16; 4]; 4], frac: [[u16; 4]; 4]) -> Self {
        let mut b = [0u8; 64];
        let mut i = 0;
        while i < 4 {
            let mut j = 0;
            while j < 4 {
                b = put_u16(b, (i * 4 + j) * 2, int[i][j]);
                b = put_u16(b, 32 + (i * 4 + j) * 2, frac[i][j]);
                j += 1;
            }
            i += 1;
        }
        Self(b)
    }

    /// From a float matrix in `[i][j]` order.
    pub fn from_f32(m: [[f32; 4]; 4]) -> Self {
        let mut int = [[0u16; 4]; 4];
        let mut frac = [[0u16; 4]; 4];
        for i in 0..4 {
            for j in 0..4 {
                (int[i][j], frac[i][j]) = fixed::split(m[i][j]);
            }
        }
        Self::from_parts(int, frac)
    }

    /// From sixteen values given row by row as `xx, xy, xz, xw, yx, ...`.
    ///
    /// The first word then pairs `xx` with `yx`, the second `zx` with `wx`,
    /// and so on down each column.
    pub fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        let mut m = [[0f32; 4]; 4];
        for (i, row) in m.iter_mut().enumerate() {
            for (j, v) in row.iter_mut().enumerate() {
                *v = rows[j][i];
            }
        }
        Self::from_f32(m)
    }

    pub const fn int_part(&self, i: usize, j: usize) -> u16 {
        get_u16(&self.0, (i * 4 + j) * 2)
    }

    pub const fn frac_part(&self, i: usize, j: usize) -> u16 {
        get_u16(&self.0, 32 + (i * 4 + j) * 2)
    }

    /// The sixteen 32-bit words as transferred.
    pub const fn words(&self) -> [u32; 16] {
        let mut out = [0u32; 16];
        let mut k = 0;
        while k < 16 {
            out[k] = get_u32(&self.0, k * 4);
            k += 1;
        }
        out
    }

    pub fn to_f32(&self) -> [[f32; 4]; 4] {
        let mut m = [[0f32; 4]; 4];
        for (i, row) in m.iter_mut().enumerate() {
            for (j, v) in row.iter_mut().enumerate() {
                *v = fixed::join(self.int_part(i, j), self.frac_part(i, j));
            }
        }
        m
    }
}

impl Default for Mtx {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/* ---- Viewport ---- */

/// Scale and translation with 2 fraction bits each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Vp([u8; 16]);

impl_record!(Vp, 16);

impl Vp {
    pub const fn new(vscale: [i16; 4], vtrans: [i16; 4]) -> Self {
        let mut b = [0u8; 16];
        let mut k = 0;
        while k < 4 {
            b = put_u16(b, k * 2, vscale[k] as u16);
            b = put_u16(b, 8 + k * 2, vtrans[k] as u16);
            k += 1;
        }
        Self(b)
    }

    /// Full-screen viewport for a `width` x `height` framebuffer with the
    /// standard `G_MAXZ / 2` depth scale and offset.
    pub const fn full_screen(width: i16, height: i16) -> Self {
        let z = (fixed::G_MAXZ / 2) as i16;
        Self::new([width * 2, height * 2, z, 0], [width * 2, height * 2, z, 0])
    }

    pub const fn vscale(&self) -> [i16; 4] {
        [
            get_u16(&self.0, 0) as i16,
            get_u16(&self.0, 2) as i16,
            get_u16(&self.0, 4) as i16,
            get_u16(&self.0, 6) as i16,
        ]
    }

    pub const fn vtrans(&self) -> [i16; 4] {
        [
            get_u16(&self.0, 8) as i16,
            get_u16(&self.0, 10) as i16,
            get_u16(&self.0, 12) as i16,
            get_u16(&self.0, 14) as i16,
        ]
    }
}

/* ---- Lighting ---- */

/// Directional light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Light([u8; 16]);

impl_record!(Light, 16);

impl Light {
    pub const fn new(col: [u8; 3], dir: [i8; 3]) -> Self {
        Self([
            col[0],
            col[1],
            col[2],
            0,
            col[0],
            col[1],
            col[2],
            0,
            dir[0] as u8,
            dir[1] as u8,
            dir[2] as u8,
            0,
            0,
            0,
            0,
            0,
        ])
    }

    pub const fn color(&self) -> [u8; 3] {
        [self.0[0], self.0[1], self.0[2]]
    }

    pub const fn dir(&self) -> [i8; 3] {
        [self.0[8] as i8, self.0[9] as i8, self.0[10] as i8]
    }
}

/// Point light with attenuation, or a directional light in the same layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PosLight([u8; 16]);

impl_record!(PosLight, 16);

impl PosLight {
    /// `kc` must be nonzero for the microcode to treat the light as positional.
    pub const fn new(col: [u8; 3], pos: [i16; 3], kc: u8, kl: u8, kq: u8) -> Self {
        let mut b = [0u8; 16];
        b[0] = col[0];
        b[1] = col[1];
        b[2] = col[2];
        b[3] = kc;
        b[4] = col[0];
        b[5] = col[1];
        b[6] = col[2];
        b[7] = kl;
        b = put_u16(b, 8, pos[0] as u16);
        b = put_u16(b, 10, pos[1] as u16);
        b = put_u16(b, 12, pos[2] as u16);
        b[14] = kq;
        Self(b)
    }

    /// Directional light: `kc = 0`, the direction bytes land in the first
    /// three position bytes.
    pub const fn infinite(col: [u8; 3], dir: [i8; 3]) -> Self {
        let x = dir[0] as u8 as u16;
        let y = dir[1] as u8 as u16;
        let z = dir[2] as u8 as u16;
        Self::new(col, [((x << 8) | y) as i16, (z << 8) as i16, 0], 0, 0, 0)
    }

    pub const fn is_positional(&self) -> bool {
        self.0[3] != 0
    }

    pub const fn color(&self) -> [u8; 3] {
        [self.0[0], self.0[1], self.0[2]]
    }

    pub const fn pos(&self) -> [i16; 3] {
        [
            get_u16(&self.0, 8) as i16,
            get_u16(&self.0, 10) as i16,
            get_u16(&self.0, 12) as i16,
        ]
    }

    /// `(kc, kl, kq)`.
    pub const fn attenuation(&self) -> (u8, u8, u8) {
        (self.0[3], self.0[7], self.0[14])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Ambient([u8; 8]);

impl_record!(Ambient, 8);

impl Ambient {
    pub const fn new(col: [u8; 3]) -> Self {
        Self([col[0], col[1], col[2], 0, col[0], col[1], col[2], 0])
    }

    pub const fn color(&self) -> [u8; 3] {
        [self.0[0], self.0[1], self.0[2]]
    }
}

/// Camera right and up directions for texture generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LookAt([u8; 8]);

impl_record!(LookAt, 8);

impl LookAt {
    pub const fn new(right: [i8; 3], up: [i8; 3]) -> Self {
        Self([
            right[0] as u8,
            right[1] as u8,
            right[2] as u8,
            0,
            up[0] as u8,
            up[1] as u8,
            up[2] as u8,
            0,
        ])
    }

    pub const fn right(&self) -> [i8; 3] {
        [self.0[0] as i8, self.0[1] as i8, self.0[2] as i8]
    }

    pub const fn up(&self) -> [i8; 3] {
        [self.0[4] as i8, self.0[5] as i8, self.0[6] as i8]
    }
}

/// Texture offsets for the two specular highlight tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Hilite([u8; 16]);

impl_record!(Hilite, 16);

impl Hilite {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        let mut b = [0u8; 16];
        b = put_u32(b, 0, x1 as u32);
        b = put_u32(b, 4, y1 as u32);
        b = put_u32(b, 8, x2 as u32);
        b = put_u32(b, 12, y2 as u32);
        Self(b)
    }

    pub const fn x1(&self) -> i32 {
        get_u32(&self.0, 0) as i32
    }

    pub const fn y1(&self) -> i32 {
        get_u32(&self.0, 4) as i32
    }

    pub const fn x2(&self) -> i32 {
        get_u32(&self.0, 8) as i32
    }

    pub const fn y2(&self) -> i32 {
        get_u32(&self.0, 12) as i32
    }
}

/// `N` lights followed by the ambient term, as loaded by `SetLights`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LightSet<L, const N: usize> {
    pub lights: [L; N],
    pub ambient: Ambient,
}

pub type Lights<const N: usize> = LightSet<Light, N>;
pub type PosLights<const N: usize> = LightSet<PosLight, N>;

impl<L: Record, const N: usize> LightSet<L, N> {
    /// The microcode handles at most seven lights plus ambient.
    pub const MAX_LIGHTS: usize = 7;
    pub const SIZE_BYTES: usize = N * 16 + Ambient::SIZE_BYTES;
    const COUNT_OK: () = assert!(N <= 7, "at most seven lights fit in DMEM");

    pub fn new(ambient: [u8; 3], lights: [L; N]) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::COUNT_OK;
        Self {
            lights,
            ambient: Ambient::new(ambient),
        }
    }

    pub const fn count(&self) -> u8 {
        N as u8
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::SIZE_BYTES);
        for l in &self.lights {
            out.extend_from_slice(l.as_bytes());
        }
        out.extend_from_slice(self.ambient.as_bytes());
        out
    }
}

/* ---- Tile descriptor ---- */

/// The 8-byte RDP tile descriptor, laid out exactly as a SETTILE word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TileDescriptor([u8; 8]);

impl_record!(TileDescriptor, 8);

impl TileDescriptor {
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        fmt: ImageFormat,
        siz: TexelSize,
        line: u16,
        tmem: u16,
        tile: u8,
        palette: u8,
        cmt: TileWrap,
        maskt: u8,
        shiftt: u8,
        cms: TileWrap,
        masks: u8,
        shifts: u8,
    ) -> Self {
        let w = crate::dp::set_tile(
            fmt, siz, line, tmem, tile, palette, cmt, maskt, shiftt, cms, masks, shifts,
        );
        Self(w.to_be_bytes())
    }

    pub const fn word(&self) -> CommandWord {
        CommandWord::from_be_bytes(self.0)
    }

    pub const fn line(&self) -> u16 {
        ((self.word().hi >> 9) & 0x1FF) as u16
    }

    pub const fn tmem(&self) -> u16 {
        (self.word().hi & 0x1FF) as u16
    }

    pub const fn tile(&self) -> u8 {
        ((self.word().lo >> 24) & 0x7) as u8
    }

    pub const fn palette(&self) -> u8 {
        ((self.word().lo >> 20) & 0xF) as u8
    }

    pub fn format(&self) -> Result<ImageFormat> {
        ImageFormat::try_from(((self.word().hi >> 21) & 0x7) as u8)
    }

    pub fn size(&self) -> Result<TexelSize> {
        TexelSize::try_from(((self.word().hi >> 19) & 0x3) as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_layout() {
        let v = Vtx::with_color([-1, 2, 3], 0xABCD, [0x100, -0x100], [10, 20, 30, 255]);
        assert_eq!(
            v.to_bytes(),
            [0xFF, 0xFF, 0, 2, 0, 3, 0xAB, 0xCD, 0x01, 0x00, 0xFF, 0x00, 10, 20, 30, 255]
        );
        assert_eq!(v.ob(), [-1, 2, 3]);
        assert_eq!(v.tc(), [0x100, -0x100]);

        let n = Vtx::with_normal([0; 3], 0, [0; 2], [127, -128, 0], 0x80);
        assert_eq!(n.normal(), [127, -128, 0]);
        assert_eq!(n.alpha(), 0x80);
        assert_eq!(n.color(), [0x7F, 0x80, 0, 0x80]);
    }

    #[test]
    fn lights_layout() {
        let l = Light::new([1, 2, 3], [-1, 0, 127]);
        assert_eq!(l.to_bytes(), [1, 2, 3, 0, 1, 2, 3, 0, 0xFF, 0, 0x7F, 0, 0, 0, 0, 0]);

        let inf = PosLight::infinite([1, 2, 3], [-1, 0, 127]);
        assert!(!inf.is_positional());
        assert_eq!(&inf.to_bytes()[8..11], &[0xFF, 0, 0x7F]);
        assert_eq!(inf.to_bytes()[..8], l.to_bytes()[..8]);

        let p = PosLight::new([9, 9, 9], [100, -100, 0x1234], 8, 4, 2);
        assert_eq!(p.pos(), [100, -100, 0x1234]);
        assert_eq!(p.attenuation(), (8, 4, 2));
        assert!(p.is_positional());

        let set = Lights::<2>::new([5, 5, 5], [l, l]);
        assert_eq!(Lights::<2>::SIZE_BYTES, 40);
        let bytes = set.to_bytes();
        assert_eq!(bytes.len(), 40);
        assert_eq!(&bytes[32..], &Ambient::new([5, 5, 5]).to_bytes());
        assert_eq!(Lights::<0>::new([1, 1, 1], []).to_bytes().len(), 8);
    }

    #[test]
    fn lookat_and_hilite() {
        let la = LookAt::new([127, 0, 0], [0, 127, 0]);
        assert_eq!(la.to_bytes(), [127, 0, 0, 0, 0, 127, 0, 0]);
        let h = Hilite::new(-4, 8, 0x1000, 0);
        assert_eq!((h.x1(), h.y1(), h.x2(), h.y2()), (-4, 8, 0x1000, 0));
    }

    #[test]
    fn from_bytes_checks_length() {
        assert_eq!(
            Vtx::from_bytes(&[0u8; 15]),
            Err(GbiError::BufferTooSmall { needed: 16, found: 15 })
        );
        let v = Vtx::with_color([1, 2, 3], 0, [4, 5], [6, 7, 8, 9]);
        assert_eq!(Vtx::from_bytes(&v.to_bytes()), Ok(v));
    }

    #[test]
    fn every_dma_record_is_word_aligned() {
        assert_eq!(Vtx::SIZE_BYTES % 8, 0);
        assert_eq!(Mtx::SIZE_BYTES % 8, 0);
        assert_eq!(Vp::SIZE_BYTES % 8, 0);
        assert_eq!(Light::SIZE_BYTES % 8, 0);
        assert_eq!(PosLight::SIZE_BYTES % 8, 0);
        assert_eq!(Ambient::SIZE_BYTES % 8, 0);
        assert_eq!(LookAt::SIZE_BYTES % 8, 0);
        assert_eq!(Hilite::SIZE_BYTES % 8, 0);
        assert_eq!(TileDescriptor::SIZE_BYTES % 8, 0);
        assert_eq!(Tri::SIZE_BYTES, 4);
    }
}
