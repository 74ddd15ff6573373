use f3dex3_gbi::format::{ImageFormat, TexelSize, TileParams, TileWrap, G_TX_LOADTILE};
use f3dex3_gbi::sequence::{
    load_texture_block, load_texture_block_4b, load_texture_block_yuv, load_texture_tile, load_tlut,
    LineSwap, TexelRect, TextureImage, TextureLoad, TileSlot,
};
use f3dex3_gbi::{dp, CommandWord, GfxWriter, Opcode};

const BLOCK_ORDER: [Opcode; 7] = [
    Opcode::SetTImg,
    Opcode::SetTile,
    Opcode::RdpLoadSync,
    Opcode::LoadBlock,
    Opcode::RdpPipeSync,
    Opcode::SetTile,
    Opcode::SetTileSize,
];

fn opcodes(words: &[CommandWord]) -> Vec<Opcode> {
    words.iter().filter_map(|w| w.opcode()).collect()
}

fn siz_field(word: CommandWord) -> u32 {
    (word.hi >> 19) & 3
}

#[test]
fn block_load_order_holds_for_every_size() {
    let params = TileParams::new(0, TileWrap::CLAMP, TileWrap::MIRROR, 5, 5, 0, 0);
    let slot = TileSlot::new(params);
    for siz in [TexelSize::Bits8, TexelSize::Bits16, TexelSize::Bits32] {
        let d = siz.try_descriptor().expect("descriptor");
        for fmt in [ImageFormat::Rgba, ImageFormat::Ia, ImageFormat::I, ImageFormat::Ci] {
            let img = TextureImage::new(0x0600_0000, fmt, 32, 32);
            for swap in [LineSwap::Hardware, LineSwap::PreSwapped] {
                let words = load_texture_block(&img, &d, &slot, swap);
                assert_eq!(opcodes(&words), BLOCK_ORDER, "{fmt:?} {siz:?} {swap:?}");
                assert_eq!(siz_field(words[0]), d.load_block as u32);
                assert_eq!(siz_field(words[5]), siz as u32);
                assert_eq!((words[5].hi >> 21) & 7, fmt as u32);
            }
        }
    }
    let img = TextureImage::new(0, ImageFormat::Ci, 16, 16);
    assert_eq!(opcodes(&load_texture_block_4b(&img, &slot, LineSwap::Hardware)), BLOCK_ORDER);
}

#[test]
fn tile_params_reach_both_tiles() {
    let params = TileParams::new(3, TileWrap::CLAMP, TileWrap::MIRROR, 5, 4, 1, 2);
    let img = TextureImage::new(0, ImageFormat::Ci, 32, 16);
    let d = TexelSize::Bits8.try_descriptor().expect("descriptor");
    let words = load_texture_block(&img, &d, &TileSlot::new(params), LineSwap::Hardware);
    let expect_lo = |tile: u32, palette: u32| {
        (tile << 24) | (palette << 20) | (1 << 18) | (4 << 14) | (2 << 10) | (2 << 8) | (5 << 4) | 1
    };
    // The load tile never carries the palette.
    assert_eq!(words[1].lo, expect_lo(G_TX_LOADTILE as u32, 0));
    assert_eq!(words[5].lo, expect_lo(0, 3));
}

#[test]
fn yuv_block_uses_byte_lines() {
    let img = TextureImage::new(0, ImageFormat::Yuv, 64, 8);
    let d = TexelSize::Bits16.try_descriptor().expect("descriptor");
    let yuv = load_texture_block_yuv(&img, &d, &TileSlot::default(), LineSwap::Hardware);
    let rgba = load_texture_block(&img, &d, &TileSlot::default(), LineSwap::Hardware);
    assert_eq!((yuv[5].hi >> 9) & 0x1FF, 8);
    assert_eq!((rgba[5].hi >> 9) & 0x1FF, 16);
    assert_eq!(yuv[..5], rgba[..5]);
}

#[test]
fn large_block_lrs_is_clamped() {
    let img = TextureImage::new(0, ImageFormat::Rgba, 64, 64);
    let d = TexelSize::Bits16.try_descriptor().expect("descriptor");
    let words = load_texture_block(&img, &d, &TileSlot::default(), LineSwap::Hardware);
    assert_eq!((words[3].lo >> 12) & 0xFFF, 2047);
}

#[test]
fn tile_load_order() {
    let img = TextureImage::new(0x0600_0000, ImageFormat::Rgba, 64, 64);
    let d = TexelSize::Bits16.try_descriptor().expect("descriptor");
    let words = load_texture_tile(&img, &d, &TileSlot::default(), &TexelRect::new(0, 0, 15, 15));
    let mut order = BLOCK_ORDER;
    order[3] = Opcode::LoadTile;
    assert_eq!(opcodes(&words), order);
}

#[test]
fn hand_built_sequence_matches_helper() {
    let img = TextureImage::new(0x0600_0000, ImageFormat::Rgba, 32, 32);
    let d = TexelSize::Bits16.try_descriptor().expect("descriptor");
    let params = TileParams::default();
    let manual = TextureLoad::new()
        .set_texture_image(ImageFormat::Rgba, TexelSize::Bits16, 1, 0x0600_0000)
        .set_load_tile(ImageFormat::Rgba, TexelSize::Bits16, 0, 0, &params)
        .load_sync()
        .load_block(1023, 256)
        .pipe_sync()
        .set_render_tile(ImageFormat::Rgba, TexelSize::Bits16, 8, 0, 0, &params)
        .set_tile_size(0, 0, 0, 31 << 2, 31 << 2)
        .finish();
    assert_eq!(manual, load_texture_block(&img, &d, &TileSlot::default(), LineSwap::Hardware));
}

#[test]
fn tlut_load_words() {
    let words = load_tlut(64, 0x140, 0x0600_2000);
    assert_eq!(
        words,
        [
            dp::set_texture_image(ImageFormat::Rgba, TexelSize::Bits16, 1, 0x0600_2000),
            dp::tile_sync(),
            CommandWord::new(0xF500_0140, 0x0700_0000),
            dp::load_sync(),
            dp::load_tlut_cmd(G_TX_LOADTILE, 63),
            dp::pipe_sync(),
        ]
    );
}

#[test]
fn writer_appends_sequences_in_order() {
    let img = TextureImage::new(0x0600_0000, ImageFormat::Ci, 32, 32);
    let d = TexelSize::Bits8.try_descriptor().expect("descriptor");
    let mut w = GfxWriter::new();
    w.load_tlut_pal256(0x0600_1000)
        .load_texture_block(&img, &d, &TileSlot::default(), LineSwap::Hardware)
        .end_display_list();
    assert_eq!(w.len(), 6 + 7 + 1);
    assert_eq!(w.as_words()[6].opcode(), Some(Opcode::SetTImg));
    assert_eq!(w.as_words()[13].opcode(), Some(Opcode::EndDl));
}
