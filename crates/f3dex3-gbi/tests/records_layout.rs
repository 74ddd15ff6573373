use f3dex3_gbi::format::{ImageFormat, TexelSize, TileWrap};
use f3dex3_gbi::records::{Light, Lights, Mtx, PosLight, PosLights, TileDescriptor, Vp};
use f3dex3_gbi::word::{words_from_be_bytes, words_to_be_bytes};
use f3dex3_gbi::{dp, sp, GbiError};

#[test]
fn identity_matrix_words() {
    let w = Mtx::IDENTITY.words();
    assert_eq!(
        w[..8],
        [0x0001_0000, 0, 0x0000_0001, 0, 0, 0x0001_0000, 0, 0x0000_0001]
    );
    assert!(w[8..].iter().all(|&f| f == 0));
    assert_eq!(Mtx::default(), Mtx::IDENTITY);
}

#[test]
fn float_matrix_splits_into_halves() {
    let m = Mtx::from_f32([
        [0.5, 0.0, 0.0, 0.0],
        [0.0, -1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [10.25, 0.0, 0.0, 1.0],
    ]);
    assert_eq!((m.int_part(0, 0), m.frac_part(0, 0)), (0, 0x8000));
    assert_eq!((m.int_part(1, 1), m.frac_part(1, 1)), (0xFFFF, 0));
    assert_eq!((m.int_part(3, 0), m.frac_part(3, 0)), (10, 0x4000));
    assert_eq!(m.to_f32()[3][0], 10.25);

    // Row-major input lands transposed.
    let rows = Mtx::from_rows([
        [1.0, 0.0, 0.0, 7.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);
    assert_eq!(rows.int_part(3, 0), 7);
}

#[test]
fn viewport_record() {
    let vp = Vp::full_screen(320, 240);
    assert_eq!(vp.vscale(), [640, 480, 511, 0]);
    assert_eq!(vp.vtrans(), [640, 480, 511, 0]);
    assert_eq!(vp.to_bytes().len(), 16);
}

#[test]
fn light_sets_feed_set_lights() {
    let set = Lights::<3>::new([0x20, 0x20, 0x20], [Light::new([0xFF, 0, 0], [0, 127, 0]); 3]);
    assert_eq!(set.count(), 3);
    let bytes = set.to_bytes();
    assert_eq!(bytes.len(), Lights::<3>::SIZE_BYTES);

    let [num, load] = sp::set_lights(set.count(), 0x0600_0100);
    assert_eq!(num, sp::num_lights(3));
    // (len - 1) / 8 in bits 19..24 covers all three lights plus ambient.
    assert_eq!((load.hi >> 19) & 0x1F, (bytes.len() as u32 - 1) / 8);

    let pos = PosLights::<1>::new([0; 3], [PosLight::new([1, 1, 1], [0, 100, 0], 0, 8, 0)]);
    assert_eq!(pos.to_bytes().len(), 24);
}

#[test]
fn tile_descriptor_mirrors_set_tile() {
    let d = TileDescriptor::new(
        ImageFormat::Ci,
        TexelSize::Bits4,
        2,
        0x100,
        1,
        4,
        TileWrap::CLAMP,
        4,
        0,
        TileWrap::MIRROR,
        5,
        0,
    );
    let word = dp::set_tile(
        ImageFormat::Ci,
        TexelSize::Bits4,
        2,
        0x100,
        1,
        4,
        TileWrap::CLAMP,
        4,
        0,
        TileWrap::MIRROR,
        5,
        0,
    );
    assert_eq!(d.word(), word);
    assert_eq!(d.format(), Ok(ImageFormat::Ci));
    assert_eq!(d.size(), Ok(TexelSize::Bits4));
    assert_eq!((d.line(), d.tmem(), d.tile(), d.palette()), (2, 0x100, 1, 4));
}

#[test]
fn word_stream_bytes() {
    let words = [sp::segment(6, 0x0010_0000), sp::end_display_list()];
    let bytes = words_to_be_bytes(&words);
    assert_eq!(words_from_be_bytes(&bytes), Ok(words.to_vec()));
    assert_eq!(
        words_from_be_bytes(&bytes[..12]),
        Err(GbiError::UnalignedLength { len: 12, alignment: 8 })
    );
}
