//! Multi-command texture and palette loads.
//!
//! The RDP pipelines tile setup, TMEM loads and rendering, so each load is a
//! fixed sequence with syncs in exact positions. The sequences are assembled
//! through step-typed builders: every step consumes the builder and returns it
//! in the next state, and `finish` exists only on the final state, so a
//! sequence with a step missing or out of order does not compile.
//!
//! The `load_*` functions cover every load variant on top of the builders.

use core::marker::PhantomData;

use crate::dp;
use crate::fixed::G_TEXTURE_IMAGE_FRAC;
use crate::format::{
    calc_dxt, calc_dxt_4b, ImageFormat, SizeDescriptor, TexelSize, TileParams, TileWrap,
    G_TLUT_TMEM, G_TX_LOADTILE, G_TX_RENDERTILE,
};
use crate::word::CommandWord;

/// Build steps shared by the load builders.
pub mod step {
    #[derive(Debug)]
    pub struct Start;
    #[derive(Debug)]
    pub struct Image;
    #[derive(Debug)]
    pub struct TileSynced;
    #[derive(Debug)]
    pub struct LoadTile;
    #[derive(Debug)]
    pub struct LoadSynced;
    #[derive(Debug)]
    pub struct Loaded;
    #[derive(Debug)]
    pub struct PipeSynced;
    #[derive(Debug)]
    pub struct RenderTile;
    #[derive(Debug)]
    pub struct Done;
}

use step::*;

pub const TEXTURE_LOAD_LEN: usize = 7;
pub const TLUT_LOAD_LEN: usize = 6;

/// Builder for the 7-word texture load:
/// image, load tile, load-sync, load, pipe-sync, render tile, tile size.
#[derive(Debug)]
pub struct TextureLoad<S> {
    words: [CommandWord; TEXTURE_LOAD_LEN],
    _step: PhantomData<S>,
}

impl<S> TextureLoad<S> {
    const fn put<N>(self, index: usize, word: CommandWord) -> TextureLoad<N> {
        let mut words = self.words;
        words[index] = word;
        TextureLoad {
            words,
            _step: PhantomData,
        }
    }
}

impl TextureLoad<Start> {
    pub const fn new() -> Self {
        Self {
            words: [CommandWord::new(0, 0); TEXTURE_LOAD_LEN],
            _step: PhantomData,
        }
    }

    pub const fn set_texture_image(
        self,
        fmt: ImageFormat,
        siz: TexelSize,
        width: u32,
        timg: u32,
    ) -> TextureLoad<Image> {
        self.put(0, dp::set_texture_image(fmt, siz, width, timg))
    }
}

impl Default for TextureLoad<Start> {
    fn default() -> Self {
        Self::new()
    }
}

impl TextureLoad<Image> {
    pub const fn set_load_tile(
        self,
        fmt: ImageFormat,
        siz: TexelSize,
        line: u16,
        tmem: u16,
        tile: &TileParams,
    ) -> TextureLoad<LoadTile> {
        self.put(1, tile_word(fmt, siz, line, tmem, G_TX_LOADTILE, 0, tile))
    }
}

impl TextureLoad<LoadTile> {
    pub const fn load_sync(self) -> TextureLoad<LoadSynced> {
        self.put(2, dp::load_sync())
    }
}

impl TextureLoad<LoadSynced> {
    pub const fn load_block(self, lrs: u32, dxt: u32) -> TextureLoad<Loaded> {
        self.put(3, dp::load_block(G_TX_LOADTILE, 0, 0, lrs, dxt))
    }

    pub const fn load_tile(self, uls: u32, ult: u32, lrs: u32, lrt: u32) -> TextureLoad<Loaded> {
        self.put(3, dp::load_tile(G_TX_LOADTILE, uls, ult, lrs, lrt))
    }
}

impl TextureLoad<Loaded> {
    pub const fn pipe_sync(self) -> TextureLoad<PipeSynced> {
        self.put(4, dp::pipe_sync())
    }
}

impl TextureLoad<PipeSynced> {
    pub const fn set_render_tile(
        self,
        fmt: ImageFormat,
        siz: TexelSize,
        line: u16,
        tmem: u16,
        render_tile: u8,
        tile: &TileParams,
    ) -> TextureLoad<RenderTile> {
        self.put(5, tile_word(fmt, siz, line, tmem, render_tile, tile.palette, tile))
    }
}

impl TextureLoad<RenderTile> {
    pub const fn set_tile_size(
        self,
        render_tile: u8,
        uls: u32,
        ult: u32,
        lrs: u32,
        lrt: u32,
    ) -> TextureLoad<Done> {
        self.put(6, dp::set_tile_size(render_tile, uls, ult, lrs, lrt))
    }
}

impl TextureLoad<Done> {
    pub const fn finish(self) -> [CommandWord; TEXTURE_LOAD_LEN] {
        self.words
    }
}

/// Builder for the 6-word palette load:
/// image, tile-sync, load tile, load-sync, LOADTLUT, pipe-sync.
#[derive(Debug)]
pub struct TlutLoad<S> {
    words: [CommandWord; TLUT_LOAD_LEN],
    _step: PhantomData<S>,
}

impl<S> TlutLoad<S> {
    const fn put<N>(self, index: usize, word: CommandWord) -> TlutLoad<N> {
        let mut words = self.words;
        words[index] = word;
        TlutLoad {
            words,
            _step: PhantomData,
        }
    }
}

impl TlutLoad<Start> {
    pub const fn new() -> Self {
        Self {
            words: [CommandWord::new(0, 0); TLUT_LOAD_LEN],
            _step: PhantomData,
        }
    }

    pub const fn set_texture_image(self, dram: u32) -> TlutLoad<Image> {
        self.put(0, dp::set_texture_image(ImageFormat::Rgba, TexelSize::Bits16, 1, dram))
    }
}

impl Default for TlutLoad<Start> {
    fn default() -> Self {
        Self::new()
    }
}

impl TlutLoad<Image> {
    pub const fn tile_sync(self) -> TlutLoad<TileSynced> {
        self.put(1, dp::tile_sync())
    }
}

impl TlutLoad<TileSynced> {
    pub const fn set_load_tile(self, tmem: u16) -> TlutLoad<LoadTile> {
        self.put(
            2,
            dp::set_tile(
                ImageFormat::Rgba,
                TexelSize::Bits4,
                0,
                tmem,
                G_TX_LOADTILE,
                0,
                TileWrap::empty(),
                0,
                0,
                TileWrap::empty(),
                0,
                0,
            ),
        )
    }
}

impl TlutLoad<LoadTile> {
    pub const fn load_sync(self) -> TlutLoad<LoadSynced> {
        self.put(3, dp::load_sync())
    }
}

impl TlutLoad<LoadSynced> {
    pub const fn load_tlut(self, count: u16) -> TlutLoad<Loaded> {
        self.put(4, dp::load_tlut_cmd(G_TX_LOADTILE, count.wrapping_sub(1)))
    }
}

impl TlutLoad<Loaded> {
    pub const fn pipe_sync(self) -> TlutLoad<Done> {
        self.put(5, dp::pipe_sync())
    }
}

impl TlutLoad<Done> {
    pub const fn finish(self) -> [CommandWord; TLUT_LOAD_LEN] {
        self.words
    }
}

const fn tile_word(
    fmt: ImageFormat,
    siz: TexelSize,
    line: u16,
    tmem: u16,
    tile: u8,
    palette: u8,
    p: &TileParams,
) -> CommandWord {
    dp::set_tile(
        fmt, siz, line, tmem, tile, palette, p.cmt, p.maskt, p.shiftt, p.cms, p.masks, p.shifts,
    )
}

/* ---- Load parameters ---- */

/// A texture in DRAM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureImage {
    pub timg: u32,
    pub fmt: ImageFormat,
    pub width: u32,
    pub height: u32,
}

impl TextureImage {
    pub const fn new(timg: u32, fmt: ImageFormat, width: u32, height: u32) -> Self {
        Self {
            timg,
            fmt,
            width,
            height,
        }
    }
}

/// Where a load lands: TMEM word address, render tile and its addressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSlot {
    pub tmem: u16,
    pub render_tile: u8,
    pub params: TileParams,
}

impl TileSlot {
    pub const fn new(params: TileParams) -> Self {
        Self {
            tmem: 0,
            render_tile: G_TX_RENDERTILE,
            params,
        }
    }

    pub const fn with_tmem(mut self, tmem: u16) -> Self {
        self.tmem = tmem;
        self
    }

    pub const fn with_render_tile(mut self, render_tile: u8) -> Self {
        self.render_tile = render_tile;
        self
    }
}

impl Default for TileSlot {
    fn default() -> Self {
        Self::new(TileParams::default())
    }
}

/// How LOADBLOCK handles odd lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineSwap {
    /// The RDP swaps odd lines while loading (`dxt` from the line width).
    #[default]
    Hardware,
    /// Odd lines are already word-swapped in DRAM (`dxt = 0`).
    PreSwapped,
}

/// Texel rectangle of a tile load, inclusive, in whole texels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TexelRect {
    pub uls: u32,
    pub ult: u32,
    pub lrs: u32,
    pub lrt: u32,
}

impl TexelRect {
    pub const fn new(uls: u32, ult: u32, lrs: u32, lrt: u32) -> Self {
        Self { uls, ult, lrs, lrt }
    }

    const fn width(&self) -> u32 {
        self.lrs.wrapping_sub(self.uls).wrapping_add(1)
    }
}

const fn frac(v: u32) -> u32 {
    v << G_TEXTURE_IMAGE_FRAC
}

/* ---- Block loads ---- */

const fn block_sequence(
    img: &TextureImage,
    load_siz: TexelSize,
    render_siz: TexelSize,
    lrs: u32,
    dxt: u32,
    line: u32,
    slot: &TileSlot,
) -> [CommandWord; TEXTURE_LOAD_LEN] {
    TextureLoad::new()
        .set_texture_image(img.fmt, load_siz, 1, img.timg)
        .set_load_tile(img.fmt, load_siz, 0, slot.tmem, &slot.params)
        .load_sync()
        .load_block(lrs, dxt)
        .pipe_sync()
        .set_render_tile(
            img.fmt,
            render_siz,
            line as u16,
            slot.tmem,
            slot.render_tile,
            &slot.params,
        )
        .set_tile_size(
            slot.render_tile,
            0,
            0,
            frac(img.width.wrapping_sub(1)),
            frac(img.height.wrapping_sub(1)),
        )
        .finish()
}

const fn block_lrs(img: &TextureImage, d: &SizeDescriptor) -> u32 {
    ((img.width * img.height + d.incr) >> d.shift).wrapping_sub(1)
}

/// Loads a whole texture with one LOADBLOCK.
///
/// Covers the tmem/render-tile and pre-swapped forms through `slot` and `swap`.
pub const fn load_texture_block(
    img: &TextureImage,
    siz: &SizeDescriptor,
    slot: &TileSlot,
    swap: LineSwap,
) -> [CommandWord; TEXTURE_LOAD_LEN] {
    let dxt = match swap {
        LineSwap::Hardware => calc_dxt(img.width, siz.bytes),
        LineSwap::PreSwapped => 0,
    };
    let line = ((img.width * siz.line_bytes) + 7) >> 3;
    block_sequence(img, siz.load_block, siz.size, block_lrs(img, siz), dxt, line, slot)
}

/// Block load of a YUV texture; the render tile line counts one byte per texel.
pub const fn load_texture_block_yuv(
    img: &TextureImage,
    siz: &SizeDescriptor,
    slot: &TileSlot,
    swap: LineSwap,
) -> [CommandWord; TEXTURE_LOAD_LEN] {
    let dxt = match swap {
        LineSwap::Hardware => calc_dxt(img.width, siz.bytes),
        LineSwap::PreSwapped => 0,
    };
    let line = (img.width + 7) >> 3;
    block_sequence(img, siz.load_block, siz.size, block_lrs(img, siz), dxt, line, slot)
}

/// Block load of a 4-bit texture, moved as 16-bit texels.
pub const fn load_texture_block_4b(
    img: &TextureImage,
    slot: &TileSlot,
    swap: LineSwap,
) -> [CommandWord; TEXTURE_LOAD_LEN] {
    let dxt = match swap {
        LineSwap::Hardware => calc_dxt_4b(img.width),
        LineSwap::PreSwapped => 0,
    };
    let lrs = ((img.width * img.height + 3) >> 2).wrapping_sub(1);
    let line = ((img.width >> 1) + 7) >> 3;
    block_sequence(img, TexelSize::Bits16, TexelSize::Bits4, lrs, dxt, line, slot)
}

/* ---- Tile loads ---- */

/// Loads the `rect` sub-rectangle of a texture with LOADTILE.
pub const fn load_texture_tile(
    img: &TextureImage,
    siz: &SizeDescriptor,
    slot: &TileSlot,
    rect: &TexelRect,
) -> [CommandWord; TEXTURE_LOAD_LEN] {
    let load_line = ((rect.width() * siz.tile_bytes) + 7) >> 3;
    let render_line = ((rect.width() * siz.line_bytes) + 7) >> 3;
    TextureLoad::new()
        .set_texture_image(img.fmt, siz.size, img.width, img.timg)
        .set_load_tile(img.fmt, siz.size, load_line as u16, slot.tmem, &slot.params)
        .load_sync()
        .load_tile(frac(rect.uls), frac(rect.ult), frac(rect.lrs), frac(rect.lrt))
        .pipe_sync()
        .set_render_tile(
            img.fmt,
            siz.size,
            render_line as u16,
            slot.tmem,
            slot.render_tile,
            &slot.params,
        )
        .set_tile_size(
            slot.render_tile,
            frac(rect.uls),
            frac(rect.ult),
            frac(rect.lrs),
            frac(rect.lrt),
        )
        .finish()
}

/// Tile load of a 4-bit texture, moved as 8-bit texels at half the width.
pub const fn load_texture_tile_4b(
    img: &TextureImage,
    slot: &TileSlot,
    rect: &TexelRect,
) -> [CommandWord; TEXTURE_LOAD_LEN] {
    let line = (((rect.width() >> 1) + 7) >> 3) as u16;
    let half = G_TEXTURE_IMAGE_FRAC - 1;
    TextureLoad::new()
        .set_texture_image(img.fmt, TexelSize::Bits8, img.width >> 1, img.timg)
        .set_load_tile(img.fmt, TexelSize::Bits8, line, slot.tmem, &slot.params)
        .load_sync()
        .load_tile(rect.uls << half, frac(rect.ult), rect.lrs << half, frac(rect.lrt))
        .pipe_sync()
        .set_render_tile(img.fmt, TexelSize::Bits4, line, slot.tmem, slot.render_tile, &slot.params)
        .set_tile_size(
            slot.render_tile,
            frac(rect.uls),
            frac(rect.ult),
            frac(rect.lrs),
            frac(rect.lrt),
        )
        .finish()
}

/* ---- Palette loads ---- */

/// Loads `count` 16-bit palette entries from `dram` to TMEM word `tmem`.
pub const fn load_tlut(count: u16, tmem: u16, dram: u32) -> [CommandWord; TLUT_LOAD_LEN] {
    TlutLoad::new()
        .set_texture_image(dram)
        .tile_sync()
        .set_load_tile(tmem)
        .load_sync()
        .load_tlut(count)
        .pipe_sync()
        .finish()
}

/// One of the sixteen 16-entry palettes used by CI4 textures.
pub const fn load_tlut_pal16(pal: u8, dram: u32) -> [CommandWord; TLUT_LOAD_LEN] {
    load_tlut(16, G_TLUT_TMEM + (pal as u16 & 0xF) * 16, dram)
}

pub const fn load_tlut_pal256(dram: u32) -> [CommandWord; TLUT_LOAD_LEN] {
    load_tlut(256, G_TLUT_TMEM, dram)
}
