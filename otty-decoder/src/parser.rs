use std::mem;

use log::{error, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::actor::{Actor, Trigger};
use crate::enums::{Action, SequenceKind, State};
use crate::error::Fault;
use crate::substitute::{PLACEHOLDER, Substitutor};
use crate::transitions;

/// Where a decoding session stands between two inputs.
///
/// The state is a plain value: copy it to checkpoint a session, pass it back
/// to any `decode_*` function to resume, or drop it to end the session.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecodeState {
    /// Current automaton state.
    pub state: State,
    /// Sequence currently open, derived from the actions run so far.
    pub sequence: SequenceKind,
}

impl DecodeState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: State::Ground,
            sequence: SequenceKind::None,
        }
    }

    /// `true` when resting in ground with no sequence open.
    pub fn is_ground(&self) -> bool {
        self.state == State::Ground && self.sequence == SequenceKind::None
    }

    /// Decode a single codepoint.
    ///
    /// Codepoints that fit the table (ASCII and C1) are driven through the
    /// automaton as they are. Everything else is driven as a space through a
    /// [`Substitutor`], which hands the real codepoint to `actor`.
    pub(crate) fn put_char<A: Actor + ?Sized>(&mut self, c: char, actor: &mut A) {
        let code = u32::from(c);
        match u8::try_from(code) {
            Ok(byte @ 0x00..=0x9f) => self.advance(byte, actor),
            _ => {
                let mut substitutor = Substitutor::new(actor, c);
                self.advance(PLACEHOLDER, &mut substitutor);
            },
        }
    }

    /// Run one byte through the automaton.
    fn advance<A: Actor + ?Sized>(&mut self, byte: u8, actor: &mut A) {
        let table = transitions::table();
        let predicate = table.lookup(self.state, byte);
        let input = char::from(byte);

        if let Some(target) = predicate.target {
            if actor.diagnostics() {
                actor.diag_transition(self.state, target, input);
            }
            trace!("{} -> {} on {byte:#04x}", self.state, target);

            let leave = table.row(self.state).on_leave().action;
            if leave != Action::None {
                self.perform(leave, Trigger::Leave(self.state), byte, actor);
            }

            self.state = target;

            let enter = table.row(target).on_enter().action;
            if enter != Action::None {
                self.perform(enter, Trigger::Enter(target), byte, actor);
            }
        }

        if predicate.action != Action::None {
            self.perform(predicate.action, Trigger::Input(input), byte, actor);
        }
    }

    fn perform<A: Actor + ?Sized>(
        &mut self,
        action: Action,
        trigger: Trigger,
        byte: u8,
        actor: &mut A,
    ) {
        if actor.diagnostics() {
            actor.diag_action(action, trigger);
        }

        let c = char::from(byte);
        match action {
            Action::None | Action::Ignore => {},
            Action::Print => actor.print(c),
            Action::Execute => actor.execute(byte),
            Action::Clear => self.clear(actor),
            Action::Collect => self.collect(c, actor),
            Action::Param => self.param(c, actor),
            Action::EscDispatch => self.esc_dispatch(byte, actor),
            Action::CsiDispatch => self.csi_dispatch(byte, actor),
            Action::Hook | Action::Put => self.dcs_put(action, c, actor),
            Action::Unhook => self.unhook(actor),
            Action::OscStart => self.osc_start(actor),
            Action::OscPut => self.osc_put(c, actor),
            Action::OscEnd => self.osc_end(actor),
        }
    }

    /// Abandon whatever sequence is open.
    fn cancel<A: Actor + ?Sized>(&mut self, actor: &mut A) {
        match mem::take(&mut self.sequence) {
            SequenceKind::None => {},
            SequenceKind::Control => actor.control_end(None, true),
            SequenceKind::DeviceControl => actor.dcs_end(true),
            SequenceKind::Osc => actor.osc_end(true),
        }
    }

    /// Runs on entering escape, csi entry and dcs entry. The state has
    /// already changed, so it tells which sequence, if any, is starting.
    fn clear<A: Actor + ?Sized>(&mut self, actor: &mut A) {
        self.cancel(actor);

        self.sequence = match self.state {
            State::CsiEntry => {
                actor.control_begin();
                SequenceKind::Control
            },
            State::DcsEntry => {
                actor.dcs_begin();
                SequenceKind::DeviceControl
            },
            _ => SequenceKind::None,
        };
    }

    fn collect<A: Actor + ?Sized>(&mut self, c: char, actor: &mut A) {
        match self.state {
            State::CsiIntermediate | State::CsiParam => actor.control_put(c),
            State::DcsIntermediate | State::DcsParam => actor.dcs_put(c),
            // Intermediates after a bare ESC begin a control sequence. They
            // are not part of the payload.
            State::EscapeIntermediate => {
                actor.control_begin();
                self.sequence = SequenceKind::Control;
            },
            state => fault(Fault::Collect { state }),
        }
    }

    fn param<A: Actor + ?Sized>(&mut self, c: char, actor: &mut A) {
        match self.sequence {
            SequenceKind::Control => actor.control_put(c),
            SequenceKind::DeviceControl => actor.dcs_put(c),
            sequence => fault(Fault::Param { sequence }),
        }
    }

    fn esc_dispatch<A: Actor + ?Sized>(&mut self, byte: u8, actor: &mut A) {
        match self.sequence {
            // Bare escape sequences such as `ESC 7` end without a begin.
            SequenceKind::None | SequenceKind::Control => {},
            sequence => {
                return fault(Fault::Sequence {
                    action: Action::EscDispatch,
                    sequence,
                });
            },
        }

        actor.control_end(Some(byte), false);
        self.sequence = SequenceKind::None;
    }

    fn csi_dispatch<A: Actor + ?Sized>(&mut self, byte: u8, actor: &mut A) {
        if !self.expect(Action::CsiDispatch, SequenceKind::Control) {
            return;
        }

        actor.control_end(Some(byte), false);
        self.sequence = SequenceKind::None;
    }

    fn dcs_put<A: Actor + ?Sized>(
        &mut self,
        action: Action,
        c: char,
        actor: &mut A,
    ) {
        if self.expect(action, SequenceKind::DeviceControl) {
            actor.dcs_put(c);
        }
    }

    fn unhook<A: Actor + ?Sized>(&mut self, actor: &mut A) {
        if self.expect(Action::Unhook, SequenceKind::DeviceControl) {
            actor.dcs_end(false);
            self.sequence = SequenceKind::None;
        }
    }

    fn osc_start<A: Actor + ?Sized>(&mut self, actor: &mut A) {
        // Only clear cancels. A sequence interrupted by the 8-bit OSC
        // introducer is replaced without an end.
        actor.osc_begin();
        self.sequence = SequenceKind::Osc;
    }

    fn osc_put<A: Actor + ?Sized>(&mut self, c: char, actor: &mut A) {
        if self.expect(Action::OscPut, SequenceKind::Osc) {
            actor.osc_put(c);
        }
    }

    fn osc_end<A: Actor + ?Sized>(&mut self, actor: &mut A) {
        if self.expect(Action::OscEnd, SequenceKind::Osc) {
            actor.osc_end(false);
            self.sequence = SequenceKind::None;
        }
    }

    fn expect(&self, action: Action, expected: SequenceKind) -> bool {
        if self.sequence == expected {
            return true;
        }

        fault(Fault::Sequence {
            action,
            sequence: self.sequence,
        });
        false
    }
}

/// Report a broken table. Loud in debug builds, logged and skipped in
/// release builds.
#[cold]
fn fault(fault: Fault) {
    error!("decoder invariant violated: {fault}");
    debug_assert!(false, "decoder invariant violated: {fault}");
}
