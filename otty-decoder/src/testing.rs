use crate::actor::{Actor, Trigger};
use crate::enums::{Action, State};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    Print(char),
    Execute(u8),
    ControlBegin,
    ControlPut(char),
    ControlEnd { final_byte: Option<u8>, cancel: bool },
    DcsBegin,
    DcsPut(char),
    DcsEnd(bool),
    OscBegin,
    OscPut(char),
    OscEnd(bool),
    DecodeBegin,
    DecodePut(char),
    DecodeEnd,
    Action(Action, Trigger),
    Transition(State, State, char),
}

/// Actor recording every callback in order.
#[derive(Debug, Default)]
pub(crate) struct Recorder {
    pub(crate) events: Vec<Event>,
    pub(crate) diagnostics: bool,
}

impl Recorder {
    pub(crate) fn with_diagnostics() -> Self {
        Self {
            events: Vec::new(),
            diagnostics: true,
        }
    }
}

impl Actor for Recorder {
    fn print(&mut self, c: char) {
        self.events.push(Event::Print(c));
    }

    fn execute(&mut self, byte: u8) {
        self.events.push(Event::Execute(byte));
    }

    fn control_begin(&mut self) {
        self.events.push(Event::ControlBegin);
    }

    fn control_put(&mut self, c: char) {
        self.events.push(Event::ControlPut(c));
    }

    fn control_end(&mut self, final_byte: Option<u8>, cancel: bool) {
        self.events.push(Event::ControlEnd { final_byte, cancel });
    }

    fn dcs_begin(&mut self) {
        self.events.push(Event::DcsBegin);
    }

    fn dcs_put(&mut self, c: char) {
        self.events.push(Event::DcsPut(c));
    }

    fn dcs_end(&mut self, cancel: bool) {
        self.events.push(Event::DcsEnd(cancel));
    }

    fn osc_begin(&mut self) {
        self.events.push(Event::OscBegin);
    }

    fn osc_put(&mut self, c: char) {
        self.events.push(Event::OscPut(c));
    }

    fn osc_end(&mut self, cancel: bool) {
        self.events.push(Event::OscEnd(cancel));
    }

    fn diagnostics(&self) -> bool {
        self.diagnostics
    }

    fn diag_decode_begin(&mut self) {
        self.events.push(Event::DecodeBegin);
    }

    fn diag_decode_put(&mut self, c: char) {
        self.events.push(Event::DecodePut(c));
    }

    fn diag_decode_end(&mut self) {
        self.events.push(Event::DecodeEnd);
    }

    fn diag_action(&mut self, action: Action, trigger: Trigger) {
        self.events.push(Event::Action(action, trigger));
    }

    fn diag_transition(&mut self, from: State, to: State, input: char) {
        self.events.push(Event::Transition(from, to, input));
    }
}
