//! Vector-stage (RSP) command encoders.
//!
//! Every encoder is a pure function of its arguments. Single-word commands
//! return a [`CommandWord`]; linked commands return an array whose first word
//! carries the RDPHALF_1 payload.

use crate::field::{opcode, pack, put};
use crate::fixed::{depth_to_screen_z, DepthProjection, DepthRange, G_MAXZ};
use crate::geometry::{
    light_offset, DlPush, GeometryMode, MtxFlags, G_MV_LIGHT, G_MV_VIEWPORT, G_MWO_AMB_OCCLUSION,
    G_MWO_ATTR_OFFSET_ST, G_MWO_ATTR_OFFSET_Z, G_MWO_CLIP_MOD_SETTINGS, G_MWO_FOG, G_MWO_NUMLIGHT,
    G_MW_FOG, G_MW_LIGHTCOL, G_MW_MODS, G_MW_NUMLIGHT, G_MW_PERSPNORM, G_MW_SEGMENT,
};
use crate::opcode::Opcode;
use crate::records::{Ambient, Light, LookAt, Mtx, Vp};
use crate::word::CommandWord;

/// Size of the microcode data section loaded by [`load_ucode`].
pub const SP_UCODE_DATA_SIZE: u32 = 0x800;

/// Default ambient-occlusion factors: ambient fully, directional at 62%.
pub const AMB_OCCLUSION_DEFAULT: (u16, u16) = (0xFFFF, 0xA000);

/* ---- Generic packet shapes ---- */

/// `cmd | l[0:24]`, `s`.
#[inline]
pub const fn dma0p(op: Opcode, s: u32, l: u32) -> CommandWord {
    CommandWord::new(opcode(op.byte()) | put(l, 0, 24), s)
}

/// `cmd | p[16:8] | l[0:16]`, `s`.
#[inline]
pub const fn dma1p(op: Opcode, s: u32, l: u32, p: u32) -> CommandWord {
    CommandWord::new(opcode(op.byte()) | put(p, 16, 8) | put(l, 0, 16), s)
}

/// DMA of `len` bytes at `adrs` into DMEM table `idx` at byte offset `ofs`.
#[inline]
pub const fn dma2p(op: Opcode, adrs: u32, len: u32, idx: u8, ofs: u32) -> CommandWord {
    CommandWord::new(
        opcode(op.byte())
            | put(len.wrapping_sub(1) / 8, 19, 5)
            | put(ofs / 8, 8, 8)
            | put(idx as u32, 0, 8),
        adrs,
    )
}

/// Immediate word with no fields in `hi`.
#[inline]
pub const fn immp1(op: Opcode, p: u32) -> CommandWord {
    CommandWord::new(opcode(op.byte()), p)
}

#[inline]
pub const fn move_word(index: u8, offset: u16, data: u32) -> CommandWord {
    dma1p(Opcode::MoveWord, data, offset as u32, index as u32)
}

/// Writes `len` bits at `sft` of the othermode word selected by `op`.
#[inline]
pub const fn set_other_mode(op: Opcode, sft: u32, len: u32, data: u32) -> CommandWord {
    CommandWord::new(
        opcode(op.byte())
            | put(32u32.wrapping_sub(sft).wrapping_sub(len), 8, 8)
            | put(len.wrapping_sub(1), 0, 8),
        data,
    )
}

/* ---- Calls and matrices ---- */

pub const fn no_op() -> CommandWord {
    dma0p(Opcode::SpNoop, 0, 0)
}

/// Loads or multiplies the matrix at `m`. The push bit is inverted on the wire.
pub const fn matrix(m: u32, flags: MtxFlags) -> CommandWord {
    dma2p(
        Opcode::Mtx,
        m,
        Mtx::SIZE_BYTES as u32,
        flags.bits() ^ MtxFlags::PUSH.bits(),
        0,
    )
}

/// Loads `n` vertices from `v` into the buffer so that the last lands at `v0 + n - 1`.
pub const fn vertex(v: u32, n: u8, v0: u8) -> CommandWord {
    CommandWord::new(
        opcode(Opcode::Vtx.byte()) | put(n as u32, 12, 8) | put(v0 as u32 + n as u32, 1, 7),
        v,
    )
}

pub const fn viewport(v: u32) -> CommandWord {
    dma2p(Opcode::MoveMem, v, Vp::SIZE_BYTES as u32, G_MV_VIEWPORT, 0)
}

pub const fn display_list(dl: u32) -> CommandWord {
    dma1p(Opcode::Dl, dl, 0, DlPush::Push as u32)
}

pub const fn branch_list(dl: u32) -> CommandWord {
    dma1p(Opcode::Dl, dl, 0, DlPush::NoPush as u32)
}

pub const fn end_display_list() -> CommandWord {
    CommandWord::new(opcode(Opcode::EndDl.byte()), 0)
}

/// Skips the rest of the list when vertices `vstart..=vend` are all off screen.
pub const fn cull_display_list(vstart: u16, vend: u16) -> CommandWord {
    CommandWord::new(
        opcode(Opcode::CullDl.byte()) | put(vstart as u32 * 2, 0, 16),
        put(vend as u32 * 2, 0, 16),
    )
}

/// Branches to `dl` when the screen Z of `vtx` is at most `zval`.
pub const fn branch_less_z_raw(dl: u32, vtx: u16, zval: u32) -> [CommandWord; 2] {
    let v = vtx as u32;
    [
        immp1(Opcode::RdpHalf1, dl),
        CommandWord::new(
            opcode(Opcode::BranchZ.byte()) | put(v * 5, 12, 12) | put(v * 2, 0, 12),
            zval,
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
pub fn branch_less_z_rg(
    dl: u32,
    vtx: u16,
    zval: f32,
    near: f32,
    far: f32,
    projection: DepthProjection,
    range: DepthRange,
) -> [CommandWord; 2] {
    branch_less_z_raw(dl, vtx, depth_to_screen_z(zval, near, far, projection, range))
}

/// [`branch_less_z_rg`] over `0..=G_MAXZ`.
pub fn branch_less_z(
    dl: u32,
    vtx: u16,
    zval: f32,
    near: f32,
    far: f32,
    projection: DepthProjection,
) -> [CommandWord; 2] {
    branch_less_z_rg(
        dl,
        vtx,
        zval,
        near,
        far,
        projection,
        DepthRange { zmin: 0, zmax: G_MAXZ },
    )
}

/// Loads microcode text from `start` and `dsize` bytes of data from `dstart`.
pub const fn load_ucode_ex(start: u32, dstart: u32, dsize: u32) -> [CommandWord; 2] {
    [
        immp1(Opcode::RdpHalf1, dstart),
        CommandWord::new(
            opcode(Opcode::LoadUcode.byte()) | put(dsize.wrapping_sub(1), 0, 16),
            start,
        ),
    ]
}

pub const fn load_ucode(start: u32, dstart: u32) -> [CommandWord; 2] {
    load_ucode_ex(start, dstart, SP_UCODE_DATA_SIZE)
}

/// Debug DMA between DMEM/IMEM and DRAM; `write` copies toward DRAM.
pub const fn dma_io(write: bool, dmem: u16, dram: u32, size: u32) -> CommandWord {
    CommandWord::new(
        opcode(Opcode::DmaIo.byte())
            | put(write as u32, 23, 1)
            | put(dmem as u32 / 8, 13, 10)
            | put(size.wrapping_sub(1), 0, 12),
        dram,
    )
}

pub const fn dma_read(dmem: u16, dram: u32, size: u32) -> CommandWord {
    dma_io(false, dmem, dram, size)
}

pub const fn dma_write(dmem: u16, dram: u32, size: u32) -> CommandWord {
    dma_io(true, dmem, dram, size)
}

/* ---- Triangles ---- */

const fn tri_indices(v0: u8, v1: u8, v2: u8) -> u32 {
    put(v0 as u32 * 2, 16, 8) | put(v1 as u32 * 2, 8, 8) | put(v2 as u32 * 2, 0, 8)
}

/// `flag` picks which vertex is emitted first (its flat-shading color wins).
const fn tri_rotated(v0: u8, v1: u8, v2: u8, flag: u8) -> u32 {
    match flag {
        0 => tri_indices(v0, v1, v2),
        1 => tri_indices(v1, v2, v0),
        _ => tri_indices(v2, v0, v1),
    }
}

pub const fn one_triangle(v0: u8, v1: u8, v2: u8, flag: u8) -> CommandWord {
    CommandWord::new(opcode(Opcode::Tri1.byte()) | tri_rotated(v0, v1, v2, flag), 0)
}

#[allow(clippy::too_many_arguments)]
pub const fn two_triangles(
    v00: u8,
    v01: u8,
    v02: u8,
    flag0: u8,
    v10: u8,
    v11: u8,
    v12: u8,
    flag1: u8,
) -> CommandWord {
    CommandWord::new(
        opcode(Opcode::Tri2.byte()) | tri_rotated(v00, v01, v02, flag0),
        tri_rotated(v10, v11, v12, flag1),
    )
}

pub const fn one_quadrangle(v0: u8, v1: u8, v2: u8, v3: u8, flag: u8) -> CommandWord {
    let (hi, lo) = match flag {
        0 => (tri_indices(v0, v1, v2), tri_indices(v0, v2, v3)),
        1 => (tri_indices(v1, v2, v3), tri_indices(v1, v3, v0)),
        2 => (tri_indices(v2, v3, v0), tri_indices(v2, v0, v1)),
        _ => (tri_indices(v3, v0, v1), tri_indices(v3, v1, v2)),
    };
    CommandWord::new(opcode(Opcode::Quad.byte()) | hi, lo)
}

/* ---- Words ---- */

pub const fn segment(seg: u8, base: u32) -> CommandWord {
    move_word(G_MW_SEGMENT, seg as u16 * 4, base)
}

/// Overwrites the word at byte offset `field` (one of the `G_MWO_POINT_*`
/// values) of buffered vertex `vtx`.
pub const fn modify_vertex(vtx: u16, field: u16, val: u32) -> CommandWord {
    CommandWord::new(
        opcode(Opcode::ModifyVtx.byte()) | put(field as u32, 16, 8) | put(vtx as u32 * 2, 0, 16),
        val,
    )
}

/* ---- Lighting ---- */

/// Directional/point light count, 0..=7. The ambient light is always present.
pub const fn num_lights(n: u8) -> CommandWord {
    move_word(G_MW_NUMLIGHT, G_MWO_NUMLIGHT, n as u32 * 0x10)
}

/// Loads a `Light` or `PosLight` into light slot `n` (1-based).
pub const fn light(l: u32, n: u8) -> CommandWord {
    dma2p(Opcode::MoveMem, l, Light::SIZE_BYTES as u32, G_MV_LIGHT, light_offset(n) as u32)
}

pub const fn ambient(l: u32, n: u8) -> CommandWord {
    dma2p(Opcode::MoveMem, l, Ambient::SIZE_BYTES as u32, G_MV_LIGHT, light_offset(n) as u32)
}

/// Recolors light `n` without reloading its direction.
pub const fn light_color(n: u8, col: u32) -> [CommandWord; 2] {
    light_color2(n, col, col)
}

/// As [`light_color`], with independent words so a point light's `kc` and
/// `kl` (the alpha bytes) can differ.
pub const fn light_color2(n: u8, col1: u32, col2: u32) -> [CommandWord; 2] {
    let base = (n as u16).wrapping_sub(1).wrapping_mul(0x10);
    [
        move_word(G_MW_LIGHTCOL, base, col1),
        move_word(G_MW_LIGHTCOL, base.wrapping_add(4), col2),
    ]
}

/// Loads `n` lights plus the ambient term from `addr` in one transfer.
pub const fn set_lights(n: u8, addr: u32) -> [CommandWord; 2] {
    [
        num_lights(n),
        dma2p(Opcode::MoveMem, addr, n as u32 * 0x10 + 8, G_MV_LIGHT, 8),
    ]
}

pub const fn look_at(la: u32) -> CommandWord {
    dma2p(Opcode::MoveMem, la, LookAt::SIZE_BYTES as u32, G_MV_LIGHT, 0)
}

/// Both lookat directions travel in one [`LookAt`] record now.
pub const fn look_at_x(la: u32) -> CommandWord {
    look_at(la)
}

/// No-op: [`look_at_x`] already loaded both directions.
pub const fn look_at_y(_la: u32) -> CommandWord {
    no_op()
}

/* ---- Removed commands ---- */

/// Clip ratio is fixed by the microcode. Emits a no-op.
pub const fn clip_ratio(_ratio: u32) -> CommandWord {
    no_op()
}

/// The microcode tracks matrix changes itself. Emits a no-op.
pub const fn force_matrix(_mptr: u32) -> CommandWord {
    no_op()
}

/* ---- MOVEWORD settings ---- */

pub const fn fog_factor(fm: i16, fo: i16) -> CommandWord {
    move_word(
        G_MW_FOG,
        G_MWO_FOG,
        put(fm as u16 as u32, 16, 16) | put(fo as u16 as u32, 0, 16),
    )
}

/// Fog from `min` to `max` on a 0..1000 near-to-far scale.
///
/// # Panics
///
/// If `min == max`.
pub const fn fog_position(min: i32, max: i32) -> CommandWord {
    let span = max.wrapping_sub(min);
    let fm = 128_000 / span;
    let fo = 500i32.wrapping_sub(min).wrapping_mul(256).wrapping_div(span);
    move_word(G_MW_FOG, G_MWO_FOG, pack(fm as u32, 16, 16) | pack(fo as u32, 0, 16))
}

/// `cr` should be 2; `large` is the triangle height in scanlines above which
/// clipping switches strategy (default 60).
pub const fn clip_mod_settings(cr: u16, large: u16) -> CommandWord {
    move_word(
        G_MW_MODS,
        G_MWO_CLIP_MOD_SETTINGS,
        put(cr as u32, 16, 16) | put(large as u32, 2, 14),
    )
}

pub const fn attr_offset_st(s: i16, t: i16) -> CommandWord {
    move_word(
        G_MW_MODS,
        G_MWO_ATTR_OFFSET_ST,
        put(s as u16 as u32, 16, 16) | put(t as u16 as u32, 0, 16),
    )
}

pub const fn attr_offset_z(z: i16) -> CommandWord {
    move_word(G_MW_MODS, G_MWO_ATTR_OFFSET_Z, put(z as u16 as u32, 16, 16))
}

pub const fn amb_occlusion(amb: u16, dir: u16) -> CommandWord {
    move_word(
        G_MW_MODS,
        G_MWO_AMB_OCCLUSION,
        put(amb as u32, 16, 16) | put(dir as u32, 0, 16),
    )
}

pub const fn persp_normalize(s: u16) -> CommandWord {
    move_word(G_MW_PERSPNORM, 0, s as u32)
}

/* ---- Texture, matrix stack, geometry mode ---- */

/// Texture coordinate scale (0.16) and the tile and LOD level count.
pub const fn texture(s: u16, t: u16, level: u8, tile: u8, on: bool) -> CommandWord {
    texture_l(s, t, level, 0, tile, on)
}

/// [`texture`] with the reserved `xparam` byte.
pub const fn texture_l(s: u16, t: u16, level: u8, xparam: u8, tile: u8, on: bool) -> CommandWord {
    CommandWord::new(
        opcode(Opcode::Texture.byte())
            | put(xparam as u32, 16, 8)
            | put(level as u32, 11, 3)
            | put(tile as u32, 8, 3)
            | put(on as u32, 1, 7),
        put(s as u32, 16, 16) | put(t as u32, 0, 16),
    )
}

/// Pops `num` modelview matrices.
pub const fn pop_matrix_n(num: u32) -> CommandWord {
    dma2p(Opcode::PopMtx, num.wrapping_mul(64), 64, 2, 0)
}

pub const fn pop_matrix() -> CommandWord {
    pop_matrix_n(1)
}

/// Clears then sets geometry-mode bits in one command.
pub const fn geometry_mode(clear: GeometryMode, set: GeometryMode) -> CommandWord {
    geometry_mode_raw(clear.bits(), set.bits())
}

const fn geometry_mode_raw(clear: u32, set: u32) -> CommandWord {
    CommandWord::new(opcode(Opcode::GeometryMode.byte()) | pack(!clear, 0, 24), set)
}

pub const fn set_geometry_mode(mode: GeometryMode) -> CommandWord {
    geometry_mode_raw(0, mode.bits())
}

pub const fn clear_geometry_mode(mode: GeometryMode) -> CommandWord {
    geometry_mode_raw(mode.bits(), 0)
}

/// Replaces the whole geometry-mode word.
pub const fn load_geometry_mode(mode: GeometryMode) -> CommandWord {
    geometry_mode_raw(u32::MAX, mode.bits())
}

/* ---- Rectangles ---- */

const fn rect_opener(op: Opcode, xl: u16, yl: u16, xh: u16, yh: u16, tile: u8) -> CommandWord {
    CommandWord::new(
        opcode(op.byte()) | put(xh as u32, 12, 12) | put(yh as u32, 0, 12),
        put(tile as u32, 24, 3) | put(xl as u32, 12, 12) | put(yl as u32, 0, 12),
    )
}

pub(crate) const fn st_pair(s: i16, t: i16) -> u32 {
    pack(s as u16 as u32, 16, 16) | pack(t as u16 as u32, 0, 16)
}

#[allow(clippy::too_many_arguments)]
const fn texture_rectangle_op(
    op: Opcode,
    xl: u16,
    yl: u16,
    xh: u16,
    yh: u16,
    tile: u8,
    s: i16,
    t: i16,
    dsdx: i16,
    dtdy: i16,
) -> [CommandWord; 3] {
    [
        rect_opener(op, xl, yl, xh, yh, tile),
        immp1(Opcode::RdpHalf1, st_pair(s, t)),
        immp1(Opcode::RdpHalf2, st_pair(dsdx, dtdy)),
    ]
}

/// Textured rectangle with 10.2 screen coordinates, S10.5 texture
/// coordinates and S5.10 slopes.
#[allow(clippy::too_many_arguments)]
pub const fn texture_rectangle(
    xl: u16,
    yl: u16,
    xh: u16,
    yh: u16,
    tile: u8,
    s: i16,
    t: i16,
    dsdx: i16,
    dtdy: i16,
) -> [CommandWord; 3] {
    texture_rectangle_op(Opcode::TexRect, xl, yl, xh, yh, tile, s, t, dsdx, dtdy)
}

#[allow(clippy::too_many_arguments)]
pub const fn texture_rectangle_flip(
    xl: u16,
    yl: u16,
    xh: u16,
    yh: u16,
    tile: u8,
    s: i16,
    t: i16,
    dsdx: i16,
    dtdy: i16,
) -> [CommandWord; 3] {
    texture_rectangle_op(Opcode::TexRectFlip, xl, yl, xh, yh, tile, s, t, dsdx, dtdy)
}

const fn clamp_coord(v: i16) -> u16 {
    if v < 0 {
        0
    } else {
        v as u16
    }
}

/// Amount the texture origin moves when the left or top edge is clipped at 0.
const fn scissor_shift(edge: i16, slope: i16) -> i32 {
    if edge >= 0 {
        return 0;
    }
    let d = (edge as i32 * slope as i32) >> 7;
    if slope < 0 {
        if d > 0 {
            d
        } else {
            0
        }
    } else if d < 0 {
        d
    } else {
        0
    }
}

/// [`texture_rectangle`] that accepts negative screen coordinates, clipping
/// at the screen edge and shifting `s`/`t` to match.
#[allow(clippy::too_many_arguments)]
pub const fn scis_texture_rectangle(
    xl: i16,
    yl: i16,
    xh: i16,
    yh: i16,
    tile: u8,
    s: i16,
    t: i16,
    dsdx: i16,
    dtdy: i16,
) -> [CommandWord; 3] {
    let s = (s as i32 - scissor_shift(xl, dsdx)) as i16;
    let t = (t as i32 - scissor_shift(yl, dtdy)) as i16;
    texture_rectangle_op(
        Opcode::TexRect,
        clamp_coord(xl),
        clamp_coord(yl),
        clamp_coord(xh),
        clamp_coord(yh),
        tile,
        s,
        t,
        dsdx,
        dtdy,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_push_bit_is_inverted() {
        let w = matrix(0x0100_0000, MtxFlags::PROJECTION | MtxFlags::LOAD | MtxFlags::NOPUSH);
        assert_eq!(w.hi, 0xDA38_0007);
        assert_eq!(w.lo, 0x0100_0000);
        let w = matrix(0x0100_0000, MtxFlags::MODELVIEW | MtxFlags::MUL | MtxFlags::PUSH);
        assert_eq!(w.hi, 0xDA38_0000);
    }

    #[test]
    fn vertex_load() {
        let w = vertex(0x0600_0000, 32, 0);
        assert_eq!(w.hi, 0x0102_0040);
        let w = vertex(0x0600_0000, 4, 8);
        assert_eq!(w.hi, 0x0100_4018);
    }

    #[test]
    fn triangles_rotate_by_flag() {
        assert_eq!(one_triangle(1, 2, 3, 0).hi, 0x0502_0406);
        assert_eq!(one_triangle(1, 2, 3, 1).hi, 0x0504_0602);
        assert_eq!(one_triangle(1, 2, 3, 2).hi, 0x0506_0204);
        let w = two_triangles(0, 1, 2, 0, 2, 3, 0, 0);
        assert_eq!((w.hi, w.lo), (0x0600_0204, 0x0004_0600));
        let q = one_quadrangle(0, 1, 2, 3, 0);
        assert_eq!((q.hi, q.lo), (0x0700_0204, 0x0000_0406));
        let q = one_quadrangle(0, 1, 2, 3, 3);
        assert_eq!((q.hi, q.lo), (0x0706_0002, 0x0006_0204));
    }

    #[test]
    fn movemem_shapes() {
        assert_eq!(viewport(0x8000_0000).hi, 0xDC08_0008);
        assert_eq!(light(0x0600_0000, 1).hi, 0xDC08_010A);
        assert_eq!(light(0x0600_0000, 3).hi, 0xDC08_050A);
        assert_eq!(ambient(0x0600_0000, 2).hi, 0xDC00_030A);
        assert_eq!(look_at(0x0600_0000).hi, 0xDC00_000A);
        let [n, mem] = set_lights(2, 0x0600_0100);
        assert_eq!((n.hi, n.lo), (0xDB02_0000, 0x20));
        assert_eq!((mem.hi, mem.lo), (0xDC20_010A, 0x0600_0100));
        assert_eq!(pop_matrix().hi, 0xD838_0002);
        assert_eq!(pop_matrix().lo, 64);
    }

    #[test]
    fn extreme_arguments_wrap() {
        assert_eq!(pop_matrix_n(u32::MAX).lo, 64u32.wrapping_neg());
        assert_eq!(pop_matrix_n(0x0400_0001).lo, 64);
        // span wraps to -1, so fm = -128000 and fo wraps.
        let w = fog_position(i32::MIN, i32::MAX);
        assert_eq!(w.lo >> 16, (-128_000i32) as u32 & 0xFFFF);
        let _ = fog_position(i32::MAX, i32::MIN);
    }

    #[test]
    fn movewords() {
        let w = segment(6, 0x0012_3400);
        assert_eq!((w.hi, w.lo), (0xDB06_0018, 0x0012_3400));
        assert_eq!(fog_factor(0x100, -0x80).lo, 0x0100_FF80);
        // 128000 / 1000 = 128, (500 - 0) * 256 / 1000 = 128.
        assert_eq!(fog_position(0, 1000).lo, 0x0080_0080);
        assert_eq!(fog_position(980, 1000).lo, ((6400u32) << 16) | ((-6144i32) as u32 & 0xFFFF));
        assert_eq!(clip_mod_settings(2, 60).lo, 0x0002_00F0);
        assert_eq!(attr_offset_z(-2).lo, 0xFFFE_0000);
        let [a, b] = light_color(2, 0xFF80_4000);
        assert_eq!((a.hi, b.hi), (0xDB0A_0010, 0xDB0A_0014));
        assert_eq!(amb_occlusion(AMB_OCCLUSION_DEFAULT.0, AMB_OCCLUSION_DEFAULT.1).lo, 0xFFFF_A000);
    }

    #[test]
    fn geometry_mode_words() {
        let set = set_geometry_mode(GeometryMode::LIGHTING | GeometryMode::ZBUFFER);
        assert_eq!((set.hi, set.lo), (0xD9FF_FFFF, 0x0002_0001));
        let clr = clear_geometry_mode(GeometryMode::FOG);
        assert_eq!((clr.hi, clr.lo), (0xD9FE_FFFF, 0));
        let load = load_geometry_mode(GeometryMode::SHADE);
        assert_eq!((load.hi, load.lo), (0xD900_0000, 4));
    }

    #[test]
    fn texture_words() {
        let w = texture(0xFFFF, 0x8000, 0, 0, true);
        assert_eq!((w.hi, w.lo), (0xD700_0002, 0xFFFF_8000));
        assert_eq!(texture_l(0, 0, 1, 0x12, 2, false).hi, 0xD712_0A00);
    }

    #[test]
    fn linked_pairs() {
        let [h, b] = branch_less_z_raw(0x0600_0000, 3, 0x1234);
        assert_eq!((h.hi, h.lo), (0xE100_0000, 0x0600_0000));
        assert_eq!((b.hi, b.lo), (0x0400_F006, 0x1234));

        let [h, u] = load_ucode(0x8010_0000, 0x8020_0000);
        assert_eq!((h.hi, h.lo), (0xE100_0000, 0x8020_0000));
        assert_eq!((u.hi, u.lo), (0xDD00_07FF, 0x8010_0000));

        let [_, z] = branch_less_z(0, 0, 100.0, 10.0, 100.0, DepthProjection::Perspective);
        assert_eq!(z.lo, 0x10000 * 0x3FE);
    }

    #[test]
    fn rectangles() {
        let one = 1 << 10;
        let [r, h1, h2] = texture_rectangle(8 << 2, 8 << 2, 40 << 2, 40 << 2, 0, 0, 0, one, one);
        assert_eq!((r.hi, r.lo), (0xE40A_00A0, 0x0002_0020));
        assert_eq!((h1.hi, h1.lo), (0xE100_0000, 0));
        assert_eq!((h2.hi, h2.lo), (0xF100_0000, 0x0400_0400));

        // Left edge 16 px off screen at 1:1 scale moves s right by 16 texels.
        let [r, h1, _] = scis_texture_rectangle(-16 << 2, 0, 16 << 2, 32 << 2, 0, 0, 0, one, one);
        assert_eq!(r.lo & 0x00FF_F000, 0);
        assert_eq!(h1.lo >> 16, 16 << 5);
        let [flip, _, _] = texture_rectangle_flip(0, 0, 4, 4, 1, 0, 0, 0, 0);
        assert_eq!(flip.opcode(), Some(Opcode::TexRectFlip));
    }

    #[test]
    fn misc() {
        assert_eq!(no_op(), CommandWord::new(0xE000_0000, 0));
        assert_eq!(end_display_list(), CommandWord::new(0xDF00_0000, 0));
        assert_eq!(display_list(0x0700_0000).hi, 0xDE00_0000);
        assert_eq!(branch_list(0x0700_0000).hi, 0xDE01_0000);
        let c = cull_display_list(0, 7);
        assert_eq!((c.hi, c.lo), (0x0300_0000, 14));
        assert_eq!(modify_vertex(5, crate::geometry::G_MWO_POINT_ST, 0x1000_2000).hi, 0x0214_000A);
        assert_eq!(dma_write(0x400, 0x8000_0000, 0x100).hi, 0xD690_00FF);
        assert_eq!(set_other_mode(Opcode::SetOtherModeH, 20, 2, 0).hi, 0xE300_0A01);
    }
}
