//! Growable display-list builder.
//!
//! [`GfxWriter`] appends encoded command words to a buffer, one method per
//! command, and hands back either the words or their big-endian bytes. The
//! free functions in [`crate::sp`], [`crate::dp`] and [`crate::sequence`] stay
//! the source of truth for every encoding; the writer only adds buffering,
//! configuration and logging.

use crate::color::Rgba;
use crate::combine::{CombineCycle, CombineMode};
use crate::dp::{self, NoOpTag, ScissorMode};
use crate::fixed::{DepthProjection, DepthRange};
use crate::format::{ImageFormat, SizeDescriptor, TexelSize, TileWrap};
use crate::geometry::{GeometryMode, MtxFlags};
use crate::othermode::{
    AlphaCompare, AlphaDither, ColorDither, CombineKey, CycleType, DepthSource, OtherMode,
    OtherModeField, PipelineMode, TextureConvert, TextureDetail, TextureFilter, TextureLod,
    TextureLut, TexturePersp,
};
use crate::records::Hilite;
use crate::render_mode::RenderMode;
use crate::sequence::{self, LineSwap, TexelRect, TextureImage, TileSlot};
use crate::sp::{self, SP_UCODE_DATA_SIZE};
use crate::validate::{self, LinkScanner};
use crate::word::{words_to_be_bytes, CommandWord};

/// Writer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GfxWriterConfig {
    /// Data section size used by [`GfxWriter::load_ucode`].
    pub ucode_data_size: u32,
    /// Screen-Z range used by [`GfxWriter::branch_less_z`].
    pub depth_range: DepthRange,
    /// Trace every single command, not only compound sequences.
    pub verbose: bool,
    /// Words reserved up front.
    pub capacity: usize,
}

impl Default for GfxWriterConfig {
    fn default() -> Self {
        Self {
            ucode_data_size: SP_UCODE_DATA_SIZE,
            depth_range: DepthRange::default(),
            verbose: false,
            capacity: 64,
        }
    }
}

/// Display-list builder.
#[derive(Debug, Clone)]
pub struct GfxWriter {
    words: Vec<CommandWord>,
    config: GfxWriterConfig,
    links: LinkScanner,
}

impl Default for GfxWriter {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! single {
    ($(
        $(#[$meta:meta])*
        $name:ident => $module:ident :: $enc:ident ( $($arg:ident : $ty:ty),* );
    )+) => {
        $(
            $(#[$meta])*
            pub fn $name(&mut self, $($arg: $ty),*) -> &mut Self {
                let word = $module::$enc($($arg),*);
                self.command(stringify!($name), word)
            }
        )+
    };
}

macro_rules! linked {
    ($(
        $(#[$meta:meta])*
        $name:ident => $module:ident :: $enc:ident ( $($arg:ident : $ty:ty),* );
    )+) => {
        $(
            $(#[$meta])*
            pub fn $name(&mut self, $($arg: $ty),*) -> &mut Self {
                let words = $module::$enc($($arg),*);
                self.sequence(stringify!($name), &words)
            }
        )+
    };
}

impl GfxWriter {
    pub fn new() -> Self {
        Self::with_config(GfxWriterConfig::default())
    }

    pub fn with_config(config: GfxWriterConfig) -> Self {
        Self {
            words: Vec::with_capacity(config.capacity),
            config,
            links: LinkScanner::new(),
        }
    }

    pub fn config(&self) -> &GfxWriterConfig {
        &self.config
    }

    pub fn reset(&mut self) {
        self.words.clear();
        self.links = LinkScanner::new();
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn as_words(&self) -> &[CommandWord] {
        &self.words
    }

    pub fn to_be_bytes(&self) -> Vec<u8> {
        words_to_be_bytes(&self.words)
    }

    /// Takes the finished list.
    ///
    /// # Panics
    ///
    /// With validation enabled, if the list ends inside a linked pair or a load.
    pub fn finish(self) -> Vec<CommandWord> {
        if validate::ENABLED {
            if let Err(err) = self.links.finish() {
                panic!("unterminated display list: {err}");
            }
        }
        self.words
    }

    /// Appends one pre-encoded word.
    pub fn push(&mut self, word: CommandWord) -> &mut Self {
        self.append(word);
        self
    }

    /// Appends pre-encoded words in order.
    pub fn extend(&mut self, words: &[CommandWord]) -> &mut Self {
        for &w in words {
            self.append(w);
        }
        self
    }

    fn append(&mut self, word: CommandWord) {
        if validate::ENABLED {
            if let Err(err) = self.links.feed(word) {
                panic!("display list word {} rejected: {err}", self.words.len());
            }
        }
        self.words.push(word);
    }

    fn command(&mut self, name: &'static str, word: CommandWord) -> &mut Self {
        if self.config.verbose {
            tracing::trace!(command = name, hi = word.hi, lo = word.lo, index = self.words.len());
        }
        self.append(word);
        self
    }

    fn sequence(&mut self, name: &'static str, words: &[CommandWord]) -> &mut Self {
        tracing::trace!(sequence = name, words = words.len(), index = self.words.len());
        self.extend(words)
    }

    fn removed(&mut self, name: &'static str, word: CommandWord) -> &mut Self {
        tracing::debug!(command = name, "command no longer exists; emitting a no-op");
        self.append(word);
        self
    }

    /* ---- Vector stage ---- */

    single! {
        sp_no_op => sp::no_op();
        matrix => sp::matrix(m: u32, flags: MtxFlags);
        vertex => sp::vertex(v: u32, n: u8, v0: u8);
        viewport => sp::viewport(v: u32);
        display_list => sp::display_list(dl: u32);
        branch_list => sp::branch_list(dl: u32);
        end_display_list => sp::end_display_list();
        cull_display_list => sp::cull_display_list(vstart: u16, vend: u16);
        dma_read => sp::dma_read(dmem: u16, dram: u32, size: u32);
        dma_write => sp::dma_write(dmem: u16, dram: u32, size: u32);
        one_triangle => sp::one_triangle(v0: u8, v1: u8, v2: u8, flag: u8);
        one_quadrangle => sp::one_quadrangle(v0: u8, v1: u8, v2: u8, v3: u8, flag: u8);
        segment => sp::segment(seg: u8, base: u32);
        modify_vertex => sp::modify_vertex(vtx: u16, field: u16, val: u32);
        num_lights => sp::num_lights(n: u8);
        light => sp::light(l: u32, n: u8);
        ambient => sp::ambient(l: u32, n: u8);
        look_at => sp::look_at(la: u32);
        look_at_x => sp::look_at_x(la: u32);
        fog_factor => sp::fog_factor(fm: i16, fo: i16);
        clip_mod_settings => sp::clip_mod_settings(cr: u16, large: u16);
        attr_offset_st => sp::attr_offset_st(s: i16, t: i16);
        attr_offset_z => sp::attr_offset_z(z: i16);
        amb_occlusion => sp::amb_occlusion(amb: u16, dir: u16);
        persp_normalize => sp::persp_normalize(s: u16);
        texture => sp::texture(s: u16, t: u16, level: u8, tile: u8, on: bool);
        texture_l => sp::texture_l(s: u16, t: u16, level: u8, xparam: u8, tile: u8, on: bool);
        pop_matrix_n => sp::pop_matrix_n(num: u32);
        pop_matrix => sp::pop_matrix();
        geometry_mode => sp::geometry_mode(clear: GeometryMode, set: GeometryMode);
        set_geometry_mode => sp::set_geometry_mode(mode: GeometryMode);
        clear_geometry_mode => sp::clear_geometry_mode(mode: GeometryMode);
        load_geometry_mode => sp::load_geometry_mode(mode: GeometryMode);
    }

    linked! {
        branch_less_z_raw => sp::branch_less_z_raw(dl: u32, vtx: u16, zval: u32);
        load_ucode_ex => sp::load_ucode_ex(start: u32, dstart: u32, dsize: u32);
        light_color => sp::light_color(n: u8, col: u32);
        light_color2 => sp::light_color2(n: u8, col1: u32, col2: u32);
        set_lights => sp::set_lights(n: u8, addr: u32);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn two_triangles(
        &mut self,
        v00: u8,
        v01: u8,
        v02: u8,
        flag0: u8,
        v10: u8,
        v11: u8,
        v12: u8,
        flag1: u8,
    ) -> &mut Self {
        self.command(
            "two_triangles",
            sp::two_triangles(v00, v01, v02, flag0, v10, v11, v12, flag1),
        )
    }

    /// Z-branch over the configured depth range.
    pub fn branch_less_z(
        &mut self,
        dl: u32,
        vtx: u16,
        zval: f32,
        near: f32,
        far: f32,
        projection: DepthProjection,
    ) -> &mut Self {
        let range = self.config.depth_range;
        let words = sp::branch_less_z_rg(dl, vtx, zval, near, far, projection, range);
        self.sequence("branch_less_z", &words)
    }

    /// Microcode load with the configured data size.
    pub fn load_ucode(&mut self, start: u32, dstart: u32) -> &mut Self {
        let words = sp::load_ucode_ex(start, dstart, self.config.ucode_data_size);
        self.sequence("load_ucode", &words)
    }

    /// See [`sp::fog_position`].
    pub fn fog_position(&mut self, min: i32, max: i32) -> &mut Self {
        self.command("fog_position", sp::fog_position(min, max))
    }

    pub fn look_at_y(&mut self, la: u32) -> &mut Self {
        self.removed("look_at_y", sp::look_at_y(la))
    }

    pub fn clip_ratio(&mut self, ratio: u32) -> &mut Self {
        self.removed("clip_ratio", sp::clip_ratio(ratio))
    }

    pub fn force_matrix(&mut self, mptr: u32) -> &mut Self {
        self.removed("force_matrix", sp::force_matrix(mptr))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn texture_rectangle(
        &mut self,
        xl: u16,
        yl: u16,
        xh: u16,
        yh: u16,
        tile: u8,
        s: i16,
        t: i16,
        dsdx: i16,
        dtdy: i16,
    ) -> &mut Self {
        let words = sp::texture_rectangle(xl, yl, xh, yh, tile, s, t, dsdx, dtdy);
        self.sequence("texture_rectangle", &words)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn texture_rectangle_flip(
        &mut self,
        xl: u16,
        yl: u16,
        xh: u16,
        yh: u16,
        tile: u8,
        s: i16,
        t: i16,
        dsdx: i16,
        dtdy: i16,
    ) -> &mut Self {
        let words = sp::texture_rectangle_flip(xl, yl, xh, yh, tile, s, t, dsdx, dtdy);
        self.sequence("texture_rectangle_flip", &words)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn scis_texture_rectangle(
        &mut self,
        xl: i16,
        yl: i16,
        xh: i16,
        yh: i16,
        tile: u8,
        s: i16,
        t: i16,
        dsdx: i16,
        dtdy: i16,
    ) -> &mut Self {
        let words = sp::scis_texture_rectangle(xl, yl, xh, yh, tile, s, t, dsdx, dtdy);
        self.sequence("scis_texture_rectangle", &words)
    }

    /* ---- Rasterizer stage ---- */

    single! {
        pipeline_mode => dp::pipeline_mode(mode: PipelineMode);
        set_cycle_type => dp::set_cycle_type(cycle: CycleType);
        set_texture_persp => dp::set_texture_persp(persp: TexturePersp);
        set_texture_detail => dp::set_texture_detail(detail: TextureDetail);
        set_texture_lod => dp::set_texture_lod(lod: TextureLod);
        set_texture_lut => dp::set_texture_lut(lut: TextureLut);
        set_texture_filter => dp::set_texture_filter(filter: TextureFilter);
        set_texture_convert => dp::set_texture_convert(convert: TextureConvert);
        set_combine_key => dp::set_combine_key(key: CombineKey);
        set_color_dither => dp::set_color_dither(dither: ColorDither);
        set_alpha_dither => dp::set_alpha_dither(dither: AlphaDither);
        set_alpha_compare => dp::set_alpha_compare(compare: AlphaCompare);
        set_depth_source => dp::set_depth_source(source: DepthSource);
        set_render_mode => dp::set_render_mode(c1: RenderMode, c2: RenderMode);
        set_other_mode => dp::set_other_mode(mode: OtherMode);
        set_color_image =>
            dp::set_color_image(fmt: ImageFormat, siz: TexelSize, width: u32, addr: u32);
        set_texture_image =>
            dp::set_texture_image(fmt: ImageFormat, siz: TexelSize, width: u32, addr: u32);
        set_depth_image => dp::set_depth_image(addr: u32);
        set_mask_image => dp::set_mask_image(addr: u32);
        set_combine => dp::set_combine(muxs0: u32, muxs1: u32);
        set_combine_mode => dp::set_combine_mode(mode: CombineMode);
        set_combine_lerp => dp::set_combine_lerp(cycle1: CombineCycle, cycle2: CombineCycle);
        set_env_color => dp::set_env_color(c: Rgba);
        set_blend_color => dp::set_blend_color(c: Rgba);
        set_fog_color => dp::set_fog_color(c: Rgba);
        set_fill_color => dp::set_fill_color(d: u32);
        set_prim_depth => dp::set_prim_depth(z: u16, dz: u16);
        set_prim_color => dp::set_prim_color(m: u8, l: u8, c: Rgba);
        set_tile_size => dp::set_tile_size(tile: u8, uls: u32, ult: u32, lrs: u32, lrt: u32);
        load_tile => dp::load_tile(tile: u8, uls: u32, ult: u32, lrs: u32, lrt: u32);
        load_block => dp::load_block(tile: u8, uls: u32, ult: u32, lrs: u32, dxt: u32);
        load_tlut_cmd => dp::load_tlut_cmd(tile: u8, count: u16);
        set_hilite1_tile =>
            dp::set_hilite1_tile(tile: u8, hilite: &Hilite, width: i32, height: i32);
        set_hilite2_tile =>
            dp::set_hilite2_tile(tile: u8, hilite: &Hilite, width: i32, height: i32);
        set_scissor_frac =>
            dp::set_scissor_frac(mode: ScissorMode, ulx: u32, uly: u32, lrx: u32, lry: u32);
        fill_rectangle => dp::fill_rectangle(ulx: u16, uly: u16, lrx: u16, lry: u16);
        scis_fill_rectangle => dp::scis_fill_rectangle(ulx: i16, uly: i16, lrx: i16, lry: i16);
        set_convert => dp::set_convert(k0: i16, k1: i16, k2: i16, k3: i16, k4: i16, k5: i16);
        set_key_r => dp::set_key_r(cr: u8, sr: u8, wr: u16);
        set_key_gb => dp::set_key_gb(cg: u8, sg: u8, wg: u16, cb: u8, sb: u8, wb: u16);
        full_sync => dp::full_sync();
        tile_sync => dp::tile_sync();
        pipe_sync => dp::pipe_sync();
        load_sync => dp::load_sync();
        dp_no_op => dp::no_op();
        no_op_tag => dp::no_op_tag(tag: u32);
        no_op_tag3 => dp::no_op_tag3(kind: NoOpTag, data: u32, n: u16);
        no_op_here => dp::no_op_here(file: u32, line: u16);
        no_op_string => dp::no_op_string(data: u32, n: u16);
        no_op_word => dp::no_op_word(data: u32, n: u16);
        no_op_float => dp::no_op_float(data: u32, n: u16);
        no_op_quiet => dp::no_op_quiet();
        no_op_verbose => dp::no_op_verbose(n: u16);
        no_op_callback => dp::no_op_callback(callback: u32, arg: u16);
        no_op_open_disp => dp::no_op_open_disp(file: u32, line: u16);
        no_op_close_disp => dp::no_op_close_disp(file: u32, line: u16);
    }

    linked! {
        dp_word => dp::word(hi: u32, lo: u32);
    }

    /// Any othermode field, picked by its type.
    pub fn set_other_mode_field<F: OtherModeField>(&mut self, field: F) -> &mut Self {
        self.command("set_other_mode_field", dp::set_other_mode_field(field))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn set_tile(
        &mut self,
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
    ) -> &mut Self {
        let word = dp::set_tile(
            fmt, siz, line, tmem, tile, palette, cmt, maskt, shiftt, cms, masks, shifts,
        );
        self.command("set_tile", word)
    }

    pub fn set_scissor(
        &mut self,
        mode: ScissorMode,
        ulx: f32,
        uly: f32,
        lrx: f32,
        lry: f32,
    ) -> &mut Self {
        self.command("set_scissor", dp::set_scissor(mode, ulx, uly, lrx, lry))
    }

    pub fn set_blend_mask(&mut self, mask: u32) -> &mut Self {
        self.removed("set_blend_mask", dp::set_blend_mask(mask))
    }

    /// The raw two-word RDP rectangle.
    #[allow(clippy::too_many_arguments)]
    pub fn dp_texture_rectangle(
        &mut self,
        xl: u16,
        yl: u16,
        xh: u16,
        yh: u16,
        tile: u8,
        s: i16,
        t: i16,
        dsdx: i16,
        dtdy: i16,
    ) -> &mut Self {
        let words = dp::texture_rectangle(xl, yl, xh, yh, tile, s, t, dsdx, dtdy);
        self.sequence("dp_texture_rectangle", &words)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn dp_texture_rectangle_flip(
        &mut self,
        xl: u16,
        yl: u16,
        xh: u16,
        yh: u16,
        tile: u8,
        s: i16,
        t: i16,
        dsdx: i16,
        dtdy: i16,
    ) -> &mut Self {
        let words = dp::texture_rectangle_flip(xl, yl, xh, yh, tile, s, t, dsdx, dtdy);
        self.sequence("dp_texture_rectangle_flip", &words)
    }

    /* ---- Compound loads ---- */

    pub fn load_texture_block(
        &mut self,
        img: &TextureImage,
        siz: &SizeDescriptor,
        slot: &TileSlot,
        swap: LineSwap,
    ) -> &mut Self {
        let words = sequence::load_texture_block(img, siz, slot, swap);
        self.sequence("load_texture_block", &words)
    }

    pub fn load_texture_block_yuv(
        &mut self,
        img: &TextureImage,
        siz: &SizeDescriptor,
        slot: &TileSlot,
        swap: LineSwap,
    ) -> &mut Self {
        let words = sequence::load_texture_block_yuv(img, siz, slot, swap);
        self.sequence("load_texture_block_yuv", &words)
    }

    pub fn load_texture_block_4b(
        &mut self,
        img: &TextureImage,
        slot: &TileSlot,
        swap: LineSwap,
    ) -> &mut Self {
        let words = sequence::load_texture_block_4b(img, slot, swap);
        self.sequence("load_texture_block_4b", &words)
    }

    pub fn load_texture_tile(
        &mut self,
        img: &TextureImage,
        siz: &SizeDescriptor,
        slot: &TileSlot,
        rect: &TexelRect,
    ) -> &mut Self {
        let words = sequence::load_texture_tile(img, siz, slot, rect);
        self.sequence("load_texture_tile", &words)
    }

    pub fn load_texture_tile_4b(
        &mut self,
        img: &TextureImage,
        slot: &TileSlot,
        rect: &TexelRect,
    ) -> &mut Self {
        let words = sequence::load_texture_tile_4b(img, slot, rect);
        self.sequence("load_texture_tile_4b", &words)
    }

    pub fn load_tlut(&mut self, count: u16, tmem: u16, dram: u32) -> &mut Self {
        let words = sequence::load_tlut(count, tmem, dram);
        self.sequence("load_tlut", &words)
    }

    pub fn load_tlut_pal16(&mut self, pal: u8, dram: u32) -> &mut Self {
        let words = sequence::load_tlut_pal16(pal, dram);
        self.sequence("load_tlut_pal16", &words)
    }

    pub fn load_tlut_pal256(&mut self, dram: u32) -> &mut Self {
        let words = sequence::load_tlut_pal256(dram);
        self.sequence("load_tlut_pal256", &words)
    }
}
