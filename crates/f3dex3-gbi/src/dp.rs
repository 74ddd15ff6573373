//! Rasterizer-stage (RDP) command encoders.
//!
//! Othermode setters are included here even though the microcode applies them:
//! they only ever change rasterizer state.

use crate::color::Rgba;
use crate::combine::{CombineCycle, CombineMode};
use crate::field::{opcode, pack, put};
use crate::format::{ImageFormat, TexelSize, TileWrap, G_TX_LDBLK_MAX_TXL};
use crate::opcode::Opcode;
use crate::othermode::{
    AlphaCompare, AlphaDither, ColorDither, CombineKey, CycleType, DepthSource, OtherMode,
    OtherModeField, PipelineMode, TextureConvert, TextureDetail, TextureFilter, TextureLod,
    TextureLut, TexturePersp,
    G_MDSFT_RENDERMODE,
};
use crate::records::Hilite;
use crate::render_mode::RenderMode;
use crate::sp::{dma1p, immp1, set_other_mode as sp_set_other_mode, st_pair};
use crate::word::CommandWord;

/// YUV to RGB conversion coefficients K0..K5.
pub const G_CV_K: [i16; 6] = [175, -43, -89, 222, 114, 42];

/// Scanline selection of the scissor box.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScissorMode {
    #[default]
    NonInterlace = 0,
    EvenInterlace = 2,
    OddInterlace = 3,
}

/// Payload kinds of the tagged no-op, read by debuggers and emulators.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoOpTag {
    Here = 1,
    String = 2,
    Word = 3,
    Float = 4,
    /// Quiet (`n == 0`) or verbose.
    Verbose = 5,
    Callback = 6,
    OpenDisp = 7,
    CloseDisp = 8,
}

/* ---- Generic shapes ---- */

#[inline]
pub const fn no_param(op: Opcode) -> CommandWord {
    CommandWord::new(opcode(op.byte()), 0)
}

#[inline]
pub const fn param(op: Opcode, p: u32) -> CommandWord {
    CommandWord::new(opcode(op.byte()), p)
}

#[inline]
pub const fn set_color(op: Opcode, d: u32) -> CommandWord {
    param(op, d)
}

/// `fmt | siz | width - 1` over a DRAM address.
pub const fn set_image(
    op: Opcode,
    fmt: ImageFormat,
    siz: TexelSize,
    width: u32,
    addr: u32,
) -> CommandWord {
    CommandWord::new(
        opcode(op.byte())
            | put(fmt as u32, 21, 3)
            | put(siz as u32, 19, 2)
            | put(width.wrapping_sub(1), 0, 12),
        addr,
    )
}

/// Shared shape of SETTILESIZE and LOADTILE; coordinates are 10.2.
pub const fn load_tile_generic(
    op: Opcode,
    tile: u8,
    uls: u32,
    ult: u32,
    lrs: u32,
    lrt: u32,
) -> CommandWord {
    CommandWord::new(
        opcode(op.byte()) | put(uls, 12, 12) | put(ult, 0, 12),
        put(tile as u32, 24, 3) | put(lrs, 12, 12) | put(lrt, 0, 12),
    )
}

/* ---- Othermode ---- */

/// Writes one othermode field.
pub fn set_other_mode_field<F: OtherModeField>(field: F) -> CommandWord {
    sp_set_other_mode(F::OPCODE, F::SHIFT, F::LEN, field.bits())
}

macro_rules! othermode_setters {
    ($($name:ident($ty:ty)),+ $(,)?) => {
        $(
            pub const fn $name(value: $ty) -> CommandWord {
                sp_set_other_mode(
                    <$ty as OtherModeField>::OPCODE,
                    <$ty as OtherModeField>::SHIFT,
                    <$ty as OtherModeField>::LEN,
                    (value as u32) << <$ty as OtherModeField>::SHIFT,
                )
            }
        )+
    };
}

othermode_setters! {
    pipeline_mode(PipelineMode),
    set_cycle_type(CycleType),
    set_texture_persp(TexturePersp),
    set_texture_detail(TextureDetail),
    set_texture_lod(TextureLod),
    set_texture_lut(TextureLut),
    set_texture_filter(TextureFilter),
    set_texture_convert(TextureConvert),
    set_combine_key(CombineKey),
    set_color_dither(ColorDither),
    set_alpha_dither(AlphaDither),
    set_alpha_compare(AlphaCompare),
    set_depth_source(DepthSource),
}

/// Render mode for both cycles; pass the cycle-2 form as `c2`.
pub const fn set_render_mode(c1: RenderMode, c2: RenderMode) -> CommandWord {
    sp_set_other_mode(
        Opcode::SetOtherModeL,
        G_MDSFT_RENDERMODE,
        29,
        RenderMode::combine(c1, c2).bits(),
    )
}

/// The whole othermode pair in one RDP command.
pub const fn set_other_mode(mode: OtherMode) -> CommandWord {
    CommandWord::new(opcode(Opcode::RdpSetOtherMode.byte()) | pack(mode.hi, 0, 24), mode.lo)
}

/* ---- Images and combiner ---- */

pub const fn set_color_image(
    fmt: ImageFormat,
    siz: TexelSize,
    width: u32,
    addr: u32,
) -> CommandWord {
    set_image(Opcode::SetCImg, fmt, siz, width, addr)
}

pub const fn set_texture_image(
    fmt: ImageFormat,
    siz: TexelSize,
    width: u32,
    addr: u32,
) -> CommandWord {
    set_image(Opcode::SetTImg, fmt, siz, width, addr)
}

pub const fn set_depth_image(addr: u32) -> CommandWord {
    set_image(Opcode::SetZImg, ImageFormat::Rgba, TexelSize::Bits4, 1, addr)
}

pub const fn set_mask_image(addr: u32) -> CommandWord {
    set_depth_image(addr)
}

pub const fn set_combine(muxs0: u32, muxs1: u32) -> CommandWord {
    CommandWord::new(opcode(Opcode::SetCombine.byte()) | pack(muxs0, 0, 24), muxs1)
}

pub const fn set_combine_mode(mode: CombineMode) -> CommandWord {
    let (muxs0, muxs1) = mode.muxes();
    set_combine(muxs0, muxs1)
}

/// Combiner from the sixteen operands, given as two cycles.
pub const fn set_combine_lerp(cycle1: CombineCycle, cycle2: CombineCycle) -> CommandWord {
    set_combine_mode(CombineMode::new(cycle1, cycle2))
}

/* ---- Colors ---- */

pub const fn set_env_color(c: Rgba) -> CommandWord {
    set_color(Opcode::SetEnvColor, c.to_u32())
}

pub const fn set_blend_color(c: Rgba) -> CommandWord {
    set_color(Opcode::SetBlendColor, c.to_u32())
}

pub const fn set_fog_color(c: Rgba) -> CommandWord {
    set_color(Opcode::SetFogColor, c.to_u32())
}

/// Raw fill word; see [`crate::color::fill_color16`] for 16-bit targets.
pub const fn set_fill_color(d: u32) -> CommandWord {
    set_color(Opcode::SetFillColor, d)
}

pub const fn set_prim_depth(z: u16, dz: u16) -> CommandWord {
    CommandWord::new(
        opcode(Opcode::SetPrimDepth.byte()),
        put(z as u32, 16, 16) | put(dz as u32, 0, 16),
    )
}

/// Primitive color with minimum LOD level `m` and LOD fraction `l`.
pub const fn set_prim_color(m: u8, l: u8, c: Rgba) -> CommandWord {
    CommandWord::new(
        opcode(Opcode::SetPrimColor.byte()) | put(m as u32, 8, 8) | put(l as u32, 0, 8),
        c.to_u32(),
    )
}

/* ---- Tiles and loads ---- */

#[allow(clippy::too_many_arguments)]
pub const fn set_tile(
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
) -> CommandWord {
    CommandWord::new(
        opcode(Opcode::SetTile.byte())
            | put(fmt as u32, 21, 3)
            | put(siz as u32, 19, 2)
            | put(line as u32, 9, 9)
            | put(tmem as u32, 0, 9),
        put(tile as u32, 24, 3)
            | put(palette as u32, 20, 4)
            | put(cmt.bits() as u32, 18, 2)
            | put(maskt as u32, 14, 4)
            | put(shiftt as u32, 10, 4)
            | put(cms.bits() as u32, 8, 2)
            | put(masks as u32, 4, 4)
            | put(shifts as u32, 0, 4),
    )
}

pub const fn set_tile_size(tile: u8, uls: u32, ult: u32, lrs: u32, lrt: u32) -> CommandWord {
    load_tile_generic(Opcode::SetTileSize, tile, uls, ult, lrs, lrt)
}

pub const fn load_tile(tile: u8, uls: u32, ult: u32, lrs: u32, lrt: u32) -> CommandWord {
    load_tile_generic(Opcode::LoadTile, tile, uls, ult, lrs, lrt)
}

/// `lrs` is clamped to the largest count one LOADBLOCK accepts.
pub const fn load_block(tile: u8, uls: u32, ult: u32, lrs: u32, dxt: u32) -> CommandWord {
    let lrs = if lrs < G_TX_LDBLK_MAX_TXL { lrs } else { G_TX_LDBLK_MAX_TXL };
    CommandWord::new(
        opcode(Opcode::LoadBlock.byte()) | put(uls, 12, 12) | put(ult, 0, 12),
        put(tile as u32, 24, 3) | put(lrs, 12, 12) | put(dxt, 0, 12),
    )
}

/// Loads `count + 1` palette entries through `tile`.
pub const fn load_tlut_cmd(tile: u8, count: u16) -> CommandWord {
    CommandWord::new(
        opcode(Opcode::LoadTlut.byte()),
        put(tile as u32, 24, 3) | put(count as u32, 14, 10),
    )
}

const fn hilite_tile(tile: u8, x: i32, y: i32, width: i32, height: i32) -> CommandWord {
    set_tile_size(
        tile,
        (x & 0xFFF) as u32,
        (y & 0xFFF) as u32,
        (((width - 1) * 4 + x) & 0xFFF) as u32,
        (((height - 1) * 4 + y) & 0xFFF) as u32,
    )
}

pub const fn set_hilite1_tile(tile: u8, hilite: &Hilite, width: i32, height: i32) -> CommandWord {
    hilite_tile(tile, hilite.x1(), hilite.y1(), width, height)
}

pub const fn set_hilite2_tile(tile: u8, hilite: &Hilite, width: i32, height: i32) -> CommandWord {
    hilite_tile(tile, hilite.x2(), hilite.y2(), width, height)
}

/* ---- Scissor and rectangles ---- */

/// Scissor box from pixel coordinates; fractions below a quarter pixel are dropped.
pub fn set_scissor(mode: ScissorMode, ulx: f32, uly: f32, lrx: f32, lry: f32) -> CommandWord {
    let q = |v: f32| (v * 4.0) as i32 as u32;
    set_scissor_frac(mode, q(ulx), q(uly), q(lrx), q(lry))
}

/// Scissor box in 10.2 fixed point.
pub const fn set_scissor_frac(
    mode: ScissorMode,
    ulx: u32,
    uly: u32,
    lrx: u32,
    lry: u32,
) -> CommandWord {
    CommandWord::new(
        opcode(Opcode::SetScissor.byte()) | pack(ulx, 12, 12) | pack(uly, 0, 12),
        put(mode as u32, 24, 2) | pack(lrx, 12, 12) | pack(lry, 0, 12),
    )
}

/// Fill or copy-mode rectangle in whole pixels, both corners inclusive.
pub const fn fill_rectangle(ulx: u16, uly: u16, lrx: u16, lry: u16) -> CommandWord {
    CommandWord::new(
        opcode(Opcode::FillRect.byte()) | put(lrx as u32, 14, 10) | put(lry as u32, 2, 10),
        put(ulx as u32, 14, 10) | put(uly as u32, 2, 10),
    )
}

const fn non_negative(v: i16) -> u16 {
    if v < 0 {
        0
    } else {
        v as u16
    }
}

/// [`fill_rectangle`] that clamps negative coordinates to the screen edge.
pub const fn scis_fill_rectangle(ulx: i16, uly: i16, lrx: i16, lry: i16) -> CommandWord {
    fill_rectangle(non_negative(ulx), non_negative(uly), non_negative(lrx), non_negative(lry))
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
) -> [CommandWord; 2] {
    [
        CommandWord::new(
            opcode(op.byte()) | put(xh as u32, 12, 12) | put(yh as u32, 0, 12),
            put(tile as u32, 24, 3) | put(xl as u32, 12, 12) | put(yl as u32, 0, 12),
        ),
        CommandWord::new(st_pair(s, t), st_pair(dsdx, dtdy)),
    ]
}

/// The raw 128-bit RDP rectangle. Display lists run through the microcode
/// should use [`crate::sp::texture_rectangle`] instead.
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
) -> [CommandWord; 2] {
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
) -> [CommandWord; 2] {
    texture_rectangle_op(Opcode::TexRectFlip, xl, yl, xh, yh, tile, s, t, dsdx, dtdy)
}

/* ---- Misc ---- */

const fn k(v: i16) -> u32 {
    v as i32 as u32
}

/// Signed 9-bit coefficients; `k2` straddles the two subwords.
pub const fn set_convert(k0: i16, k1: i16, k2: i16, k3: i16, k4: i16, k5: i16) -> CommandWord {
    CommandWord::new(
        opcode(Opcode::SetConvert.byte())
            | pack(k(k0), 13, 9)
            | pack(k(k1), 4, 9)
            | pack(k(k2) >> 5, 0, 4),
        pack(k(k2), 27, 5) | pack(k(k3), 18, 9) | pack(k(k4), 9, 9) | pack(k(k5), 0, 9),
    )
}

pub const fn set_key_r(cr: u8, sr: u8, wr: u16) -> CommandWord {
    CommandWord::new(
        opcode(Opcode::SetKeyR.byte()),
        put(wr as u32, 16, 12) | put(cr as u32, 8, 8) | put(sr as u32, 0, 8),
    )
}

pub const fn set_key_gb(cg: u8, sg: u8, wg: u16, cb: u8, sb: u8, wb: u16) -> CommandWord {
    CommandWord::new(
        opcode(Opcode::SetKeyGb.byte()) | put(wg as u32, 12, 12) | put(wb as u32, 0, 12),
        put(cg as u32, 24, 8) | put(sg as u32, 16, 8) | put(cb as u32, 8, 8) | put(sb as u32, 0, 8),
    )
}

/// Passes a raw 64-bit RDP word through the microcode.
pub const fn word(hi: u32, lo: u32) -> [CommandWord; 2] {
    [immp1(Opcode::RdpHalf1, hi), immp1(Opcode::RdpHalf2, lo)]
}

/* ---- Syncs ---- */

pub const fn full_sync() -> CommandWord {
    no_param(Opcode::RdpFullSync)
}

pub const fn tile_sync() -> CommandWord {
    no_param(Opcode::RdpTileSync)
}

pub const fn pipe_sync() -> CommandWord {
    no_param(Opcode::RdpPipeSync)
}

pub const fn load_sync() -> CommandWord {
    no_param(Opcode::RdpLoadSync)
}

/* ---- No-ops ---- */

/// The blend mask register is gone; kept as a rasterizer no-op.
pub const fn set_blend_mask(_mask: u32) -> CommandWord {
    no_op()
}

pub const fn no_op() -> CommandWord {
    no_param(Opcode::Noop)
}

pub const fn no_op_tag(tag: u32) -> CommandWord {
    param(Opcode::Noop, tag)
}

pub const fn no_op_tag3(kind: NoOpTag, data: u32, n: u16) -> CommandWord {
    dma1p(Opcode::Noop, data, n as u32, kind as u32)
}

pub const fn no_op_here(file: u32, line: u16) -> CommandWord {
    no_op_tag3(NoOpTag::Here, file, line)
}

pub const fn no_op_string(data: u32, n: u16) -> CommandWord {
    no_op_tag3(NoOpTag::String, data, n)
}

pub const fn no_op_word(data: u32, n: u16) -> CommandWord {
    no_op_tag3(NoOpTag::Word, data, n)
}

pub const fn no_op_float(data: u32, n: u16) -> CommandWord {
    no_op_tag3(NoOpTag::Float, data, n)
}

pub const fn no_op_quiet() -> CommandWord {
    no_op_tag3(NoOpTag::Verbose, 0, 0)
}

pub const fn no_op_verbose(n: u16) -> CommandWord {
    no_op_tag3(NoOpTag::Verbose, 0, n)
}

pub const fn no_op_callback(callback: u32, arg: u16) -> CommandWord {
    no_op_tag3(NoOpTag::Callback, callback, arg)
}

pub const fn no_op_open_disp(file: u32, line: u16) -> CommandWord {
    no_op_tag3(NoOpTag::OpenDisp, file, line)
}

pub const fn no_op_close_disp(file: u32, line: u16) -> CommandWord {
    no_op_tag3(NoOpTag::CloseDisp, file, line)
}
