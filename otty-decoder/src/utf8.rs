use std::fmt;

use utf8parse::Receiver;

use crate::actor::Actor;
use crate::parser::DecodeState;

/// Receives at most one codepoint per byte from `utf8parse`.
#[derive(Default)]
struct Codepoint {
    inner: Option<char>,
}

impl Receiver for Codepoint {
    fn codepoint(&mut self, c: char) {
        self.inner.replace(c);
    }

    fn invalid_sequence(&mut self) {
        self.codepoint(char::REPLACEMENT_CHARACTER);
    }
}

/// Incremental decoder for UTF-8 encoded terminal output.
///
/// Bytes are first assembled into codepoints, which may be split across
/// [`advance`](Decoder::advance) calls, and then fed to the escape sequence
/// automaton. C1 controls are only recognized in their UTF-8 encoded form
/// (e.g. `C2 9B` for CSI); a stray 8-bit control byte is an invalid sequence
/// and decodes to U+FFFD.
#[derive(Default)]
pub struct Decoder {
    state: DecodeState,
    utf8: utf8parse::Parser,
}

impl Decoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume a session from a previously saved state.
    #[must_use]
    pub fn with_state(state: DecodeState) -> Self {
        Self {
            state,
            utf8: utf8parse::Parser::new(),
        }
    }

    /// Automaton state after the last complete codepoint.
    pub fn state(&self) -> DecodeState {
        self.state
    }

    /// Drop any partial codepoint and return to ground.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn advance<A: Actor + ?Sized>(&mut self, bytes: &[u8], actor: &mut A) {
        let diagnostics = actor.diagnostics();
        if diagnostics {
            actor.diag_decode_begin();
        }

        for &byte in bytes {
            let mut codepoint = Codepoint::default();
            self.utf8.advance(&mut codepoint, byte);

            let Some(c) = codepoint.inner else {
                continue;
            };

            if diagnostics {
                actor.diag_decode_put(c);
            }
            self.state.put_char(c, actor);
        }

        if diagnostics {
            actor.diag_decode_end();
        }
    }
}

impl fmt::Debug for Decoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decoder")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::{SequenceKind, State};
    use crate::testing::{Event, Recorder};

    fn parse(bytes: &[u8]) -> Vec<Event> {
        let mut decoder = Decoder::new();
        let mut actor = Recorder::default();
        decoder.advance(bytes, &mut actor);
        actor.events
    }

    #[test]
    fn print_utf8() {
        assert_eq!(parse("\u{af}".as_bytes()), vec![Event::Print('\u{af}')]);
        assert_eq!(
            parse("ж😀".as_bytes()),
            vec![Event::Print('ж'), Event::Print('😀')]
        );
    }

    #[test]
    fn osc_utf8() {
        assert_eq!(
            parse("\x1b]2;заголовок\x1b\\".as_bytes())
                .into_iter()
                .filter_map(|event| match event {
                    Event::OscPut(c) => Some(c),
                    _ => None,
                })
                .collect::<String>(),
            "2;заголовок"
        );
    }

    #[test]
    fn osc_fedora_vte() {
        assert_eq!(
            parse("\u{9d}777;preexec\u{9c}".as_bytes()),
            vec![
                Event::OscBegin,
                Event::OscPut('7'),
                Event::OscPut('7'),
                Event::OscPut('7'),
                Event::OscPut(';'),
                Event::OscPut('p'),
                Event::OscPut('r'),
                Event::OscPut('e'),
                Event::OscPut('e'),
                Event::OscPut('x'),
                Event::OscPut('e'),
                Event::OscPut('c'),
                Event::OscEnd(false),
            ]
        );
    }

    #[test]
    fn utf8_control() {
        assert_eq!(parse("\u{8d}".as_bytes()), vec![Event::Execute(0x8d)]);
    }

    #[test]
    fn invalid_bytes_are_replaced() {
        assert_eq!(
            parse(b"a\xffb"),
            vec![
                Event::Print('a'),
                Event::Print(char::REPLACEMENT_CHARACTER),
                Event::Print('b'),
            ]
        );
    }

    #[test]
    fn codepoint_split_across_chunks() {
        let input = "\x1b[1m€uro\x1b[0m".as_bytes();

        let whole = parse(input);

        let mut decoder = Decoder::new();
        let mut actor = Recorder::default();
        for chunk in input.chunks(1) {
            decoder.advance(chunk, &mut actor);
        }

        assert_eq!(actor.events, whole);
        assert!(decoder.state().is_ground());
    }

    #[test]
    fn resumes_from_saved_state() {
        let mut first = Decoder::new();
        let mut actor = Recorder::default();
        first.advance(b"\x1b[3", &mut actor);

        let saved = first.state();
        assert_eq!(saved.state, State::CsiParam);
        assert_eq!(saved.sequence, SequenceKind::Control);

        let mut second = Decoder::with_state(saved);
        second.advance(b"1m", &mut actor);

        assert_eq!(
            actor.events,
            vec![
                Event::ControlBegin,
                Event::ControlPut('3'),
                Event::ControlPut('1'),
                Event::ControlEnd {
                    final_byte: Some(b'm'),
                    cancel: false
                },
            ]
        );
        assert!(second.state().is_ground());
    }

    #[test]
    fn reset_returns_to_ground() {
        let mut decoder = Decoder::new();
        decoder.advance(b"\x1bP1", &mut Recorder::default());
        assert_eq!(decoder.state().state, State::DcsParam);

        decoder.reset();
        assert_eq!(decoder.state(), DecodeState::default());
    }
}
