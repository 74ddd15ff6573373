//! The 64-bit command word and its big-endian wire form.

use crate::opcode::Opcode;
use crate::{GbiError, Result};

/// One display-list instruction: two 32-bit subwords, opcode in the top byte of `hi`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CommandWord {
    pub hi: u32,
    pub lo: u32,
}

impl CommandWord {
    pub const SIZE_BYTES: usize = 8;

    #[inline]
    pub const fn new(hi: u32, lo: u32) -> Self {
        Self { hi, lo }
    }

    #[inline]
    pub const fn opcode_byte(self) -> u8 {
        (self.hi >> 24) as u8
    }

    /// `None` for bytes outside the registry, which includes the generated
    /// triangle opcodes and raw continuation words.
    #[inline]
    pub const fn opcode(self) -> Option<Opcode> {
        Opcode::from_u8(self.opcode_byte())
    }

    pub const fn to_u64(self) -> u64 {
        ((self.hi as u64) << 32) | self.lo as u64
    }

    pub const fn from_u64(v: u64) -> Self {
        Self {
            hi: (v >> 32) as u32,
            lo: v as u32,
        }
    }

    pub const fn to_be_bytes(self) -> [u8; 8] {
        self.to_u64().to_be_bytes()
    }

    pub const fn from_be_bytes(bytes: [u8; 8]) -> Self {
        Self::from_u64(u64::from_be_bytes(bytes))
    }

    /// Reads one word from the front of `bytes`.
    pub fn from_be_slice(bytes: &[u8]) -> Result<Self> {
        let head: [u8; Self::SIZE_BYTES] = bytes
            .get(..Self::SIZE_BYTES)
            .and_then(|b| b.try_into().ok())
            .ok_or(GbiError::BufferTooSmall {
                needed: Self::SIZE_BYTES,
                found: bytes.len(),
            })?;
        Ok(Self::from_be_bytes(head))
    }
}

impl From<CommandWord> for u64 {
    fn from(w: CommandWord) -> u64 {
        w.to_u64()
    }
}

/// Serializes a word stream the way the coprocessor fetches it.
pub fn words_to_be_bytes(words: &[CommandWord]) -> Vec<u8> {
    let mut out = Vec::with_capacity(words.len() * CommandWord::SIZE_BYTES);
    for w in words {
        out.extend_from_slice(&w.to_be_bytes());
    }
    out
}

pub fn words_from_be_bytes(bytes: &[u8]) -> Result<Vec<CommandWord>> {
    if bytes.len() % CommandWord::SIZE_BYTES != 0 {
        return Err(GbiError::UnalignedLength {
            len: bytes.len(),
            alignment: CommandWord::SIZE_BYTES,
        });
    }
    bytes
        .chunks_exact(CommandWord::SIZE_BYTES)
        .map(CommandWord::from_be_slice)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_order_is_hi_then_lo_big_endian() {
        let w = CommandWord::new(0xDE01_0000, 0x0600_1234);
        assert_eq!(w.to_be_bytes(), [0xDE, 0x01, 0x00, 0x00, 0x06, 0x00, 0x12, 0x34]);
        assert_eq!(w.opcode(), Some(Opcode::Dl));
        assert_eq!(CommandWord::from_be_bytes(w.to_be_bytes()), w);
    }

    #[test]
    fn stream_length_must_be_word_aligned() {
        let words = [CommandWord::new(0xE700_0000, 0), CommandWord::new(0xDF00_0000, 0)];
        let bytes = words_to_be_bytes(&words);
        assert_eq!(bytes.len(), 16);
        assert_eq!(words_from_be_bytes(&bytes).expect("aligned stream must decode").len(), 2);
        assert_eq!(
            words_from_be_bytes(&bytes[..15]),
            Err(GbiError::UnalignedLength { len: 15, alignment: 8 })
        );
        assert_eq!(
            CommandWord::from_be_slice(&bytes[..3]),
            Err(GbiError::BufferTooSmall { needed: 8, found: 3 })
        );
    }
}
