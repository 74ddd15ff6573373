//! Runs only with `--features validate`; the panicking cases additionally
//! need debug assertions.

use f3dex3_gbi::validate::{self, check_linked_words};
use f3dex3_gbi::color::Rgba;
use f3dex3_gbi::format::{ImageFormat, TexelSize};
use f3dex3_gbi::sequence::{load_texture_block, load_tlut_pal256, LineSwap, TextureImage, TileSlot};
use f3dex3_gbi::{dp, sp, GbiError, GfxWriter, GfxWriterConfig};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

#[test]
fn well_formed_list_passes() {
    init_tracing();
    let mut w = GfxWriter::with_config(GfxWriterConfig {
        verbose: true,
        ..GfxWriterConfig::default()
    });
    w.segment(6, 0x0010_0000)
        .load_ucode(0x8000_0000, 0x8001_0000)
        .branch_less_z_raw(0x0600_0000, 0, 0x100)
        .texture_rectangle(0, 0, 40, 40, 0, 0, 0, 1 << 10, 1 << 10)
        .dp_word(1, 2)
        .force_matrix(0)
        .end_display_list();
    let words = w.finish();
    assert_eq!(check_linked_words(&words), Ok(()));
}

#[test]
#[cfg_attr(debug_assertions, should_panic(expected = "rejected"))]
fn split_pair_panics() {
    init_tracing();
    let [half, branch] = sp::branch_less_z_raw(0x0600_0000, 0, 0x100);
    let mut w = GfxWriter::new();
    w.push(half).pipe_sync().push(branch);
    assert!(!validate::ENABLED);
}

#[test]
#[cfg_attr(debug_assertions, should_panic(expected = "interrupts the load"))]
fn foreign_command_inside_a_texture_load_panics() {
    init_tracing();
    let img = TextureImage::new(0x0600_0000, ImageFormat::Rgba, 16, 16);
    let d = TexelSize::Bits16.try_descriptor().expect("descriptor");
    let load = load_texture_block(&img, &d, &TileSlot::default(), LineSwap::Hardware);
    let mut w = GfxWriter::new();
    w.extend(&load[..3])
        .set_env_color(Rgba::new(0xFF, 0, 0, 0xFF))
        .extend(&load[3..])
        .full_sync();
    let words = w.finish();
    assert!(matches!(
        check_linked_words(&words),
        Err(GbiError::InterruptedLoad { start: 0, index: 3, .. })
    ));
}

#[test]
#[cfg_attr(debug_assertions, should_panic(expected = "unterminated"))]
fn truncated_palette_load_panics_on_finish() {
    let mut w = GfxWriter::new();
    w.extend(&load_tlut_pal256(0x0600_1000)[..5]);
    let words = w.finish();
    assert_eq!(check_linked_words(&words), Err(GbiError::UnfinishedLoad { start: 0 }));
}

#[test]
#[cfg_attr(debug_assertions, should_panic(expected = "unterminated"))]
fn dangling_half_panics_on_finish() {
    let mut w = GfxWriter::new();
    w.push(sp::load_ucode(0, 0)[0]);
    let words = w.finish();
    assert_eq!(
        check_linked_words(&words),
        Err(GbiError::DanglingLink { index: 0 })
    );
}

#[test]
#[cfg_attr(debug_assertions, should_panic(expected = "does not fit"))]
fn oversized_field_panics() {
    // v0 + n = 300 overflows the 7-bit end index.
    let _ = sp::vertex(0x0600_0000, 200, 100);
    let _ = dp::set_fill_color(0);
    assert!(!validate::ENABLED);
}
