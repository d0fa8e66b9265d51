//! Entry points for driving a decoding session.
//!
//! Every function takes the state left behind by the previous call (or
//! [`DecodeState::default`] to start in ground) and returns the residual
//! state, so input can be fed in arbitrary chunks.
//!
//! Byte inputs are read as Latin-1: bytes 0x00..=0x9f are ASCII and C1
//! controls, bytes 0xa0..=0xff are the codepoints U+00A0..=U+00FF. UTF-8
//! encoded input goes through [`Decoder`](crate::Decoder) instead.
use crate::actor::Actor;
use crate::parser::DecodeState;

/// Decode a single byte.
pub fn decode_byte<A: Actor + ?Sized>(
    byte: u8,
    actor: &mut A,
    state: DecodeState,
) -> DecodeState {
    decode_chars([char::from(byte)], actor, state)
}

/// Decode a single codepoint.
pub fn decode_char<A: Actor + ?Sized>(
    c: char,
    actor: &mut A,
    state: DecodeState,
) -> DecodeState {
    decode_chars([c], actor, state)
}

/// Decode a sequence of bytes.
pub fn decode_bytes<I, A>(
    bytes: I,
    actor: &mut A,
    state: DecodeState,
) -> DecodeState
where
    I: IntoIterator<Item = u8>,
    A: Actor + ?Sized,
{
    decode_chars(bytes.into_iter().map(char::from), actor, state)
}

/// Decode a sequence of codepoints.
pub fn decode_chars<I, A>(
    chars: I,
    actor: &mut A,
    mut state: DecodeState,
) -> DecodeState
where
    I: IntoIterator<Item = char>,
    A: Actor + ?Sized,
{
    let diagnostics = actor.diagnostics();
    if diagnostics {
        actor.diag_decode_begin();
    }

    for c in chars {
        if diagnostics {
            actor.diag_decode_put(c);
        }
        state.put_char(c, actor);
    }

    if diagnostics {
        actor.diag_decode_end();
    }

    state
}

/// Decode a byte string.
pub fn decode_slice<A: Actor + ?Sized>(
    bytes: &[u8],
    actor: &mut A,
    state: DecodeState,
) -> DecodeState {
    decode_bytes(bytes.iter().copied(), actor, state)
}

/// Decode a codepoint string.
pub fn decode_str<A: Actor + ?Sized>(
    text: &str,
    actor: &mut A,
    state: DecodeState,
) -> DecodeState {
    decode_chars(text.chars(), actor, state)
}
