use thiserror::Error;

use crate::format::TexelSize;

pub type Result<T> = std::result::Result<T, GbiError>;

/// Errors for byte-level input handed back to the crate.
///
/// Encoders never fail; these only surface when reading words or records out of
/// caller-supplied bytes, or when converting raw codes into typed values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GbiError {
    #[error("buffer too small (need {needed} bytes, found {found} bytes)")]
    BufferTooSmall { needed: usize, found: usize },

    #[error("byte length {len} is not a multiple of {alignment}")]
    UnalignedLength { len: usize, alignment: usize },

    #[error("unknown opcode byte {0:#04x}")]
    UnknownOpcode(u8),

    #[error("unknown image format code {0}")]
    UnknownImageFormat(u8),

    #[error("unknown texel size code {0}")]
    UnknownTexelSize(u8),

    #[error("texel size {0:?} has no load descriptor")]
    NoSizeDescriptor(TexelSize),

    #[error("word {index} (opcode {opcode:#04x}) breaks a linked command pair")]
    BrokenLink { index: usize, opcode: u8 },

    #[error("stream ends inside a linked command pair started at word {index}")]
    DanglingLink { index: usize },

    #[error("word {index} (opcode {opcode:#04x}) interrupts the load started at word {start}")]
    InterruptedLoad {
        start: usize,
        index: usize,
        opcode: u8,
    },

    #[error("stream ends inside the load started at word {start}")]
    UnfinishedLoad { start: usize },
}
