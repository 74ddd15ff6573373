//! Checks behind the `validate` feature.
//!
//! The assertions are compiled in only when the feature is enabled *and* the
//! build has debug assertions; a release build with `validate` still packs
//! fields by plain truncation. [`check_linked_words`] itself is always
//! available for inspecting a finished stream.

use crate::field;
use crate::format::G_TX_LOADTILE;
use crate::opcode::Opcode;
use crate::word::CommandWord;
use crate::{GbiError, Result};

pub const ENABLED: bool = cfg!(all(feature = "validate", debug_assertions));

#[inline]
pub const fn assert_field_fits(value: u32, width: u32) {
    if ENABLED {
        assert!(field::fits(value, width), "value does not fit its command field");
    }
}

#[inline]
pub const fn assert_combine_code(code: u8, width: u32) {
    if ENABLED {
        assert!(field::fits(code as u32, width), "combiner slot code out of range");
    }
}

/// Opcodes of a texture load, one slot per word.
const TEXTURE_LOAD_SHAPE: &[&[Opcode]] = &[
    &[Opcode::SetTImg],
    &[Opcode::SetTile],
    &[Opcode::RdpLoadSync],
    &[Opcode::LoadBlock, Opcode::LoadTile],
    &[Opcode::RdpPipeSync],
    &[Opcode::SetTile],
    &[Opcode::SetTileSize],
];

/// Opcodes of a palette load, one slot per word.
const TLUT_LOAD_SHAPE: &[&[Opcode]] = &[
    &[Opcode::SetTImg],
    &[Opcode::RdpTileSync],
    &[Opcode::SetTile],
    &[Opcode::RdpLoadSync],
    &[Opcode::LoadTlut],
    &[Opcode::RdpPipeSync],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum LinkState {
    #[default]
    Idle,
    /// After a rectangle opener: either an RDPHALF_1 (SP form) or one raw word (DP form).
    AfterTexRect,
    /// After the second word of a rectangle whose top byte reads as RDPHALF_1.
    /// An RDPHALF_2 completes the SP form; anything else means the DP form
    /// already ended.
    AfterRectHalf1,
    /// After RDPHALF_1 at the given index.
    AfterHalf1(usize),
    /// After a SETTIMG at the given index that may open a load.
    AfterImage(usize),
    /// Inside a load that started at `start`; `next` is the slot expected next.
    InLoad {
        shape: &'static [&'static [Opcode]],
        start: usize,
        next: usize,
    },
}

/// Incremental checker for linked command pairs and compound loads.
///
/// Every RDPHALF_1 must be followed directly by RDPHALF_2, BRANCH_Z or
/// LOAD_UCODE, and those three may only appear in that position.
///
/// A SETTIMG followed by a SETTILE on the load tile, or by a TILESYNC, opens a
/// texture or palette load; the remaining words of that load must follow
/// without anything in between.
#[derive(Debug, Clone, Default)]
pub struct LinkScanner {
    state: LinkState,
    index: usize,
}

impl LinkScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, word: CommandWord) -> Result<()> {
        let index = self.index;
        self.index += 1;
        let op = word.opcode();

        self.state = match (self.state, op) {
            (LinkState::AfterTexRect, Some(Opcode::RdpHalf1)) => LinkState::AfterRectHalf1,
            // DP rectangle continuation: raw s/t and slopes, no opcode.
            (LinkState::AfterTexRect, _) => LinkState::Idle,
            (LinkState::AfterRectHalf1, Some(Opcode::RdpHalf2)) => LinkState::Idle,
            (LinkState::AfterRectHalf1, _) => Self::idle_step(index, word)?,
            (
                LinkState::AfterHalf1(_),
                Some(Opcode::RdpHalf2 | Opcode::BranchZ | Opcode::LoadUcode),
            ) => LinkState::Idle,
            (LinkState::AfterHalf1(_), _) => {
                return Err(GbiError::BrokenLink {
                    index,
                    opcode: word.opcode_byte(),
                })
            }
            (LinkState::AfterImage(start), Some(Opcode::SetTile))
                if field::extract(word.lo, 24, 3) == G_TX_LOADTILE as u32 =>
            {
                LinkState::InLoad {
                    shape: TEXTURE_LOAD_SHAPE,
                    start,
                    next: 2,
                }
            }
            (LinkState::AfterImage(start), Some(Opcode::RdpTileSync)) => LinkState::InLoad {
                shape: TLUT_LOAD_SHAPE,
                start,
                next: 2,
            },
            (LinkState::AfterImage(_), _) => Self::idle_step(index, word)?,
            (LinkState::InLoad { shape, start, next }, op) => match op {
                Some(op) if shape[next].contains(&op) => {
                    if next + 1 == shape.len() {
                        LinkState::Idle
                    } else {
                        LinkState::InLoad {
                            shape,
                            start,
                            next: next + 1,
                        }
                    }
                }
                _ => {
                    return Err(GbiError::InterruptedLoad {
                        start,
                        index,
                        opcode: word.opcode_byte(),
                    })
                }
            },
            (LinkState::Idle, _) => Self::idle_step(index, word)?,
        };
        Ok(())
    }

    fn idle_step(index: usize, word: CommandWord) -> Result<LinkState> {
        match word.opcode() {
            Some(Opcode::RdpHalf2 | Opcode::BranchZ | Opcode::LoadUcode) => {
                Err(GbiError::BrokenLink {
                    index,
                    opcode: word.opcode_byte(),
                })
            }
            Some(Opcode::RdpHalf1) => Ok(LinkState::AfterHalf1(index)),
            Some(Opcode::TexRect | Opcode::TexRectFlip) => Ok(LinkState::AfterTexRect),
            Some(Opcode::SetTImg) => Ok(LinkState::AfterImage(index)),
            _ => Ok(LinkState::Idle),
        }
    }

    /// Fails if the last word fed opened a pair or a load that was never closed.
    pub fn finish(&self) -> Result<()> {
        match self.state {
            LinkState::AfterHalf1(index) => Err(GbiError::DanglingLink { index }),
            LinkState::InLoad { start, .. } => Err(GbiError::UnfinishedLoad { start }),
            _ => Ok(()),
        }
    }
}

/// Validates the linked-pair and load structure of a complete stream.
pub fn check_linked_words(words: &[CommandWord]) -> Result<()> {
    let mut scanner = LinkScanner::new();
    for &w in words {
        scanner.feed(w)?;
    }
    scanner.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{ImageFormat, TexelSize};
    use crate::sequence::{self, LineSwap, TextureImage, TileSlot};
    use crate::{dp, sp};

    #[test]
    fn linked_encoders_pass() {
        let mut words = Vec::new();
        words.extend_from_slice(&sp::branch_less_z_raw(0x0600_0000, 3, 0x1234));
        words.extend_from_slice(&sp::load_ucode_ex(0x8000_0000, 0x8001_0000, 0x800));
        words.extend_from_slice(&sp::texture_rectangle(0, 0, 40, 40, 0, 0, 0, 1 << 10, 1 << 10));
        words.extend_from_slice(&dp::texture_rectangle(0, 0, 40, 40, 0, -32, 0, 1 << 10, 1 << 10));
        words.extend_from_slice(&dp::word(1, 2));
        words.push(sp::end_display_list());
        assert_eq!(check_linked_words(&words), Ok(()));
    }

    #[test]
    fn dp_rectangle_continuation_may_look_like_a_half_word() {
        // s = -7936 puts 0xE1 in the top byte of the raw continuation.
        let rect = dp::texture_rectangle(0, 0, 4, 4, 0, -7936, 0, 0, 0);
        assert_eq!(rect[1].opcode(), Some(Opcode::RdpHalf1));
        assert_eq!(check_linked_words(&rect), Ok(()));
    }

    #[test]
    fn interrupted_pair_is_reported() {
        let [half, branch] = sp::branch_less_z_raw(0x0600_0000, 3, 0x1234);
        let words = [half, dp::pipe_sync(), branch];
        assert_eq!(
            check_linked_words(&words),
            Err(GbiError::BrokenLink { index: 1, opcode: 0xE7 })
        );
        assert_eq!(check_linked_words(&[half]), Err(GbiError::DanglingLink { index: 0 }));
        assert_eq!(
            check_linked_words(&[branch]),
            Err(GbiError::BrokenLink { index: 0, opcode: 0x04 })
        );
    }

    #[test]
    fn whole_loads_pass() {
        let img = TextureImage::new(0x0600_0000, ImageFormat::Ci, 16, 16);
        let mut words = sequence::load_tlut_pal16(2, 0x0600_1000).to_vec();
        words.extend_from_slice(&sequence::load_texture_block_4b(
            &img,
            &TileSlot::default(),
            LineSwap::Hardware,
        ));
        words.push(dp::set_texture_image(ImageFormat::Rgba, TexelSize::Bits16, 1, 0));
        words.push(dp::set_tile_size(0, 0, 0, 60, 60));
        assert_eq!(check_linked_words(&words), Ok(()));
    }

    #[test]
    fn foreign_word_inside_a_load_is_reported() {
        let img = TextureImage::new(0x0600_0000, ImageFormat::Ci, 16, 16);
        let load = sequence::load_texture_block_4b(&img, &TileSlot::default(), LineSwap::Hardware);
        let mut words = load[..3].to_vec();
        words.push(dp::full_sync());
        words.extend_from_slice(&load[3..]);
        assert_eq!(
            check_linked_words(&words),
            Err(GbiError::InterruptedLoad {
                start: 0,
                index: 3,
                opcode: 0xE9,
            })
        );
        assert_eq!(
            check_linked_words(&load[..5]),
            Err(GbiError::UnfinishedLoad { start: 0 })
        );

        let tlut = sequence::load_tlut_pal256(0x0600_1000);
        let mut words = vec![sp::end_display_list()];
        words.extend_from_slice(&tlut[..4]);
        words.push(sp::end_display_list());
        assert_eq!(
            check_linked_words(&words),
            Err(GbiError::InterruptedLoad {
                start: 1,
                index: 5,
                opcode: 0xDF,
            })
        );
    }
}
