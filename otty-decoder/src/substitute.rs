//! Lets codepoints the table has no row for ride through the automaton.
//!
//! The table only knows ASCII and C1 bytes. A wider codepoint is fed to the
//! automaton as a space, which in every state is printed, collected into the
//! open sequence or ignored, and never dispatches or terminates anything. The
//! [`Substitutor`] sits between the automaton and the real actor and swaps the
//! space back for the original codepoint wherever it surfaces.
use crate::actor::{Actor, Trigger};
use crate::enums::{Action, State};

/// Byte driven through the automaton in place of a wide codepoint.
pub(crate) const PLACEHOLDER: u8 = b' ';

pub(crate) struct Substitutor<'a, A: Actor + ?Sized> {
    actor: &'a mut A,
    original: char,
}

impl<'a, A: Actor + ?Sized> Substitutor<'a, A> {
    pub(crate) fn new(actor: &'a mut A, original: char) -> Self {
        Self { actor, original }
    }

    fn input(&self, trigger: Trigger) -> Trigger {
        match trigger {
            Trigger::Input(_) => Trigger::Input(self.original),
            other => other,
        }
    }
}

impl<A: Actor + ?Sized> Actor for Substitutor<'_, A> {
    fn print(&mut self, _: char) {
        self.actor.print(self.original);
    }

    fn execute(&mut self, byte: u8) {
        self.actor.execute(byte);
    }

    fn control_begin(&mut self) {
        self.actor.control_begin();
    }

    fn control_put(&mut self, _: char) {
        self.actor.control_put(self.original);
    }

    fn control_end(&mut self, final_byte: Option<u8>, cancel: bool) {
        self.actor.control_end(final_byte, cancel);
    }

    fn dcs_begin(&mut self) {
        self.actor.dcs_begin();
    }

    fn dcs_put(&mut self, _: char) {
        self.actor.dcs_put(self.original);
    }

    fn dcs_end(&mut self, cancel: bool) {
        self.actor.dcs_end(cancel);
    }

    fn osc_begin(&mut self) {
        self.actor.osc_begin();
    }

    fn osc_put(&mut self, _: char) {
        self.actor.osc_put(self.original);
    }

    fn osc_end(&mut self, cancel: bool) {
        self.actor.osc_end(cancel);
    }

    fn diagnostics(&self) -> bool {
        self.actor.diagnostics()
    }

    fn diag_decode_begin(&mut self) {
        self.actor.diag_decode_begin();
    }

    fn diag_decode_put(&mut self, _: char) {
        self.actor.diag_decode_put(self.original);
    }

    fn diag_decode_end(&mut self) {
        self.actor.diag_decode_end();
    }

    fn diag_action(&mut self, action: Action, trigger: Trigger) {
        let trigger = self.input(trigger);
        self.actor.diag_action(action, trigger);
    }

    fn diag_transition(&mut self, from: State, to: State, _: char) {
        self.actor.diag_transition(from, to, self.original);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::DecodeState;
    use crate::testing::{Event, Recorder};

    #[test]
    fn payload_callbacks_carry_the_original() {
        let mut recorder = Recorder::default();
        let mut substitutor = Substitutor::new(&mut recorder, 'λ');

        substitutor.print(' ');
        substitutor.control_put(' ');
        substitutor.dcs_put(' ');
        substitutor.osc_put(' ');

        assert_eq!(
            recorder.events,
            vec![
                Event::Print('λ'),
                Event::ControlPut('λ'),
                Event::DcsPut('λ'),
                Event::OscPut('λ'),
            ]
        );
    }

    #[test]
    fn lifecycle_callbacks_are_forwarded() {
        let mut recorder = Recorder::default();
        let mut substitutor = Substitutor::new(&mut recorder, 'λ');

        substitutor.control_begin();
        substitutor.control_end(Some(b'm'), false);
        substitutor.dcs_begin();
        substitutor.dcs_end(true);
        substitutor.osc_begin();
        substitutor.osc_end(false);
        substitutor.execute(0x07);

        assert_eq!(
            recorder.events,
            vec![
                Event::ControlBegin,
                Event::ControlEnd {
                    final_byte: Some(b'm'),
                    cancel: false
                },
                Event::DcsBegin,
                Event::DcsEnd(true),
                Event::OscBegin,
                Event::OscEnd(false),
                Event::Execute(0x07),
            ]
        );
    }

    #[test]
    fn diagnostics_report_the_original_input() {
        let mut recorder = Recorder::with_diagnostics();
        let mut substitutor = Substitutor::new(&mut recorder, '€');

        assert!(substitutor.diagnostics());
        substitutor.diag_action(Action::Print, Trigger::Input(' '));
        substitutor.diag_action(Action::Clear, Trigger::Enter(State::Escape));
        substitutor.diag_transition(State::CsiEntry, State::CsiIntermediate, ' ');

        assert_eq!(
            recorder.events,
            vec![
                Event::Action(Action::Print, Trigger::Input('€')),
                Event::Action(Action::Clear, Trigger::Enter(State::Escape)),
                Event::Transition(State::CsiEntry, State::CsiIntermediate, '€'),
            ]
        );
    }

    fn decode_in(state: State, c: char) -> (Vec<Event>, DecodeState) {
        let sequence = match state {
            State::CsiEntry
            | State::CsiParam
            | State::CsiIntermediate
            | State::CsiIgnore => crate::SequenceKind::Control,
            State::DcsEntry
            | State::DcsParam
            | State::DcsIntermediate
            | State::DcsPassthrough
            | State::DcsIgnore => crate::SequenceKind::DeviceControl,
            State::OscString => crate::SequenceKind::Osc,
            _ => crate::SequenceKind::None,
        };

        let mut decode = DecodeState { state, sequence };
        let mut recorder = Recorder::default();
        decode.put_char(c, &mut recorder);
        (recorder.events, decode)
    }

    #[test]
    fn wide_codepoint_in_each_sequence_family() {
        let wide = '\u{1f600}';

        let (events, state) = decode_in(State::Ground, wide);
        assert_eq!(events, vec![Event::Print(wide)]);
        assert_eq!(state.state, State::Ground);

        let (events, state) = decode_in(State::CsiParam, wide);
        assert_eq!(events, vec![Event::ControlPut(wide)]);
        assert_eq!(state.state, State::CsiIntermediate);

        let (events, state) = decode_in(State::DcsEntry, wide);
        assert_eq!(events, vec![Event::DcsPut(wide)]);
        assert_eq!(state.state, State::DcsIntermediate);

        let (events, _) = decode_in(State::DcsPassthrough, wide);
        assert_eq!(events, vec![Event::DcsPut(wide)]);

        let (events, _) = decode_in(State::OscString, wide);
        assert_eq!(events, vec![Event::OscPut(wide)]);

        for state in [State::CsiIgnore, State::DcsIgnore, State::SosPmApcString] {
            let (events, after) = decode_in(state, wide);
            assert!(events.is_empty(), "{state}: {events:?}");
            assert_eq!(after.state, state);
        }
    }

    #[test]
    fn wide_codepoint_after_escape_opens_control_sequence() {
        let (events, state) = decode_in(State::Escape, 'é');
        assert_eq!(events, vec![Event::ControlBegin]);
        assert_eq!(state.state, State::EscapeIntermediate);
        assert_eq!(state.sequence, crate::SequenceKind::Control);
    }

    #[test]
    fn low_byte_collisions_are_substituted() {
        // U+011B has the low byte of ESC, U+0118 that of CAN.
        for c in ['\u{11b}', '\u{118}', '\u{19c}'] {
            let (events, state) = decode_in(State::Ground, c);
            assert_eq!(events, vec![Event::Print(c)]);
            assert!(state.is_ground());
        }
    }
}
