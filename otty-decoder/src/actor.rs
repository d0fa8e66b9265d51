//! Callbacks invoked by the decoder.
//!
//! The decoder walks through a byte or codepoint stream and reports what it
//! sees to an [`Actor`]: printable output, single-byte controls, and the
//! begin/put/end lifecycle of the three bracketed sequence families. The
//! decoder never buffers payloads, so an actor that needs the parameters of a
//! control sequence collects them from the `*_put` calls itself.
//!
//! Every method has an empty default body; implement only the ones you need.
use crate::enums::{Action, State};

/// Why the decoder is about to run an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// The enter slot of a state that was just entered.
    Enter(State),
    /// The leave slot of a state that is being left.
    Leave(State),
    /// An input codepoint.
    Input(char),
}

/// Consumer-facing interface for the events emitted by the decoder.
///
/// ## Sequence lifecycle
///
/// A sequence is opened with `*_begin`, receives zero or more `*_put` calls
/// and is closed by exactly one `*_end`. `cancel` is `true` when the sequence
/// was abandoned because another sequence started (for example an `ESC`
/// arriving in the middle of a CSI). At most one sequence is open at a time.
///
/// ## Control sequences
///
/// CSI sequences and escape sequences with intermediates are both reported
/// as control sequences. Parameter and intermediate bytes arrive through
/// [`control_put`](Actor::control_put) and the final byte through
/// [`control_end`](Actor::control_end).
#[allow(unused_variables)]
pub trait Actor {
    /// Emits a single printable codepoint.
    fn print(&mut self, c: char) {}

    /// Executes a single-byte C0/C1 control that is not part of a sequence
    /// (e.g. `BEL`, `BS`, `CR`, `CAN`, `NEL`).
    fn execute(&mut self, byte: u8) {}

    /// A control sequence has begun.
    fn control_begin(&mut self) {}

    /// A parameter or intermediate codepoint of the open control sequence.
    fn control_put(&mut self, c: char) {}

    /// The control sequence has ended.
    ///
    /// `final_byte` is the dispatching byte (`m` in `CSI 31 m`) and is `None`
    /// on cancellation.
    fn control_end(&mut self, final_byte: Option<u8>, cancel: bool) {}

    /// A device control string (DCS) has begun.
    fn dcs_begin(&mut self) {}

    /// A codepoint of the open device control string, including its
    /// parameters, intermediates, final byte and passthrough payload.
    fn dcs_put(&mut self, c: char) {}

    /// The device control string has ended.
    fn dcs_end(&mut self, cancel: bool) {}

    /// An operating system command (OSC) has begun.
    fn osc_begin(&mut self) {}

    /// A codepoint of the open operating system command.
    fn osc_put(&mut self, c: char) {}

    /// The operating system command has ended.
    fn osc_end(&mut self, cancel: bool) {}

    /// Enables the `diag_*` callbacks below.
    ///
    /// The engine consults this before each action or transition callback.
    /// The `diag_decode_*` bracket reads it once per decode call.
    fn diagnostics(&self) -> bool {
        false
    }

    /// A decode call has begun.
    fn diag_decode_begin(&mut self) {}

    /// A raw codepoint was handed to the decoder.
    fn diag_decode_put(&mut self, c: char) {}

    /// A decode call has ended.
    fn diag_decode_end(&mut self) {}

    /// The decoder is about to run `action`.
    fn diag_action(&mut self, action: Action, trigger: Trigger) {}

    /// The decoder is about to move from `from` to `to` because of `input`.
    fn diag_transition(&mut self, from: State, to: State, input: char) {}
}

impl<A: Actor + ?Sized> Actor for &mut A {
    fn print(&mut self, c: char) {
        (**self).print(c);
    }

    fn execute(&mut self, byte: u8) {
        (**self).execute(byte);
    }

    fn control_begin(&mut self) {
        (**self).control_begin();
    }

    fn control_put(&mut self, c: char) {
        (**self).control_put(c);
    }

    fn control_end(&mut self, final_byte: Option<u8>, cancel: bool) {
        (**self).control_end(final_byte, cancel);
    }

    fn dcs_begin(&mut self) {
        (**self).dcs_begin();
    }

    fn dcs_put(&mut self, c: char) {
        (**self).dcs_put(c);
    }

    fn dcs_end(&mut self, cancel: bool) {
        (**self).dcs_end(cancel);
    }

    fn osc_begin(&mut self) {
        (**self).osc_begin();
    }

    fn osc_put(&mut self, c: char) {
        (**self).osc_put(c);
    }

    fn osc_end(&mut self, cancel: bool) {
        (**self).osc_end(cancel);
    }

    fn diagnostics(&self) -> bool {
        (**self).diagnostics()
    }

    fn diag_decode_begin(&mut self) {
        (**self).diag_decode_begin();
    }

    fn diag_decode_put(&mut self, c: char) {
        (**self).diag_decode_put(c);
    }

    fn diag_decode_end(&mut self) {
        (**self).diag_decode_end();
    }

    fn diag_action(&mut self, action: Action, trigger: Trigger) {
        (**self).diag_action(action, trigger);
    }

    fn diag_transition(&mut self, from: State, to: State, input: char) {
        (**self).diag_transition(from, to, input);
    }
}
