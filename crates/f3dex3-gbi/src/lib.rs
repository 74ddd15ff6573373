//! `f3dex3-gbi` encodes display lists for the F3DEX3 microcode.
//!
//! Every command is a 64-bit [`CommandWord`] built by a pure `const fn`, so
//! static display lists can be assembled at compile time:
//!
//! - [`sp`]: vector-stage commands (matrices, vertices, triangles, lighting).
//! - [`dp`]: rasterizer-stage commands (othermode, tiles, images, syncs).
//! - [`sequence`]: multi-command texture and palette loads, assembled through
//!   step-typed builders that cannot be finished out of order.
//! - [`records`]: byte-exact layouts of the blocks those commands transfer.
//! - [`GfxWriter`]: a growable list with configuration and tracing.
//!
//! Out-of-range arguments are truncated to their field widths. Building with
//! the `validate` feature in a debug profile asserts instead.

mod error;

pub mod color;
pub mod combine;
pub mod dp;
pub mod field;
pub mod fixed;
pub mod format;
pub mod geometry;
pub mod opcode;
pub mod othermode;
pub mod records;
pub mod render_mode;
pub mod sequence;
pub mod sp;
pub mod validate;
pub mod word;
pub mod writer;

pub use error::{GbiError, Result};
pub use opcode::Opcode;
pub use word::CommandWord;
pub use writer::{GfxWriter, GfxWriterConfig};
