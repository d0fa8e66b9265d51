//! Table driven decoder for the DEC/ECMA-48 escape sequence grammar.
//!
//! Input bytes or codepoints are walked through a fixed transition table and
//! turned into calls on an [`Actor`]: printable output, single-byte controls
//! and the begin/put/end lifecycle of control sequences, device control
//! strings and operating system commands.
//!
//! ```
//! use otty_decoder::{Actor, DecodeState, decode_slice};
//!
//! #[derive(Default)]
//! struct Text(String);
//!
//! impl Actor for Text {
//!     fn print(&mut self, c: char) {
//!         self.0.push(c);
//!     }
//! }
//!
//! let mut text = Text::default();
//! let state = decode_slice(b"\x1b[1mbold\x1b[0m", &mut text, DecodeState::default());
//!
//! assert_eq!(text.0, "bold");
//! assert!(state.is_ground());
//! ```
mod actor;
mod decode;
mod enums;
mod error;
mod parser;
mod substitute;
#[cfg(test)]
mod testing;
mod transitions;
mod utf8;

pub use actor::{Actor, Trigger};
pub use decode::{
    decode_byte, decode_bytes, decode_char, decode_chars, decode_slice,
    decode_str,
};
pub use enums::{Action, STATE_COUNT, SequenceKind, State};
pub use error::{Fault, TableError};
pub use parser::DecodeState;
pub use transitions::{
    ByteRange, Predicate, ROW_WIDTH, Row, SLOT_ENTER, SLOT_LEAVE, Table, table,
    validate,
};
pub use utf8::Decoder;
