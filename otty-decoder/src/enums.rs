use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of automaton states, and therefore of rows in the [`Table`](crate::Table).
pub const STATE_COUNT: usize = 14;

/// Automaton state.
///
/// The discriminant doubles as the row index into the transition table.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum State {
    #[default]
    Ground = 0,
    Escape,
    EscapeIntermediate,
    CsiEntry,
    CsiParam,
    CsiIntermediate,
    CsiIgnore,
    DcsEntry,
    DcsParam,
    DcsIntermediate,
    DcsPassthrough,
    DcsIgnore,
    OscString,
    SosPmApcString,
}

impl State {
    /// Every state in row order.
    pub const ALL: [State; STATE_COUNT] = [
        State::Ground,
        State::Escape,
        State::EscapeIntermediate,
        State::CsiEntry,
        State::CsiParam,
        State::CsiIntermediate,
        State::CsiIgnore,
        State::DcsEntry,
        State::DcsParam,
        State::DcsIntermediate,
        State::DcsPassthrough,
        State::DcsIgnore,
        State::OscString,
        State::SosPmApcString,
    ];

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Stable name used in logs and diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            State::Ground => "ground",
            State::Escape => "escape",
            State::EscapeIntermediate => "escape_intermediate",
            State::CsiEntry => "csi_entry",
            State::CsiParam => "csi_param",
            State::CsiIntermediate => "csi_intermediate",
            State::CsiIgnore => "csi_ignore",
            State::DcsEntry => "dcs_entry",
            State::DcsParam => "dcs_param",
            State::DcsIntermediate => "dcs_intermediate",
            State::DcsPassthrough => "dcs_passthrough",
            State::DcsIgnore => "dcs_ignore",
            State::OscString => "osc_string",
            State::SosPmApcString => "sos_pm_apc_string",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Action attached to a table slot.
///
/// `None` means there is nothing to run; `Ignore` is an explicit no-op that
/// still shows up in diagnostics.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    #[default]
    None,
    Ignore,
    Print,
    Execute,
    Clear,
    Collect,
    Param,
    EscDispatch,
    CsiDispatch,
    Hook,
    Put,
    Unhook,
    OscStart,
    OscPut,
    OscEnd,
}

impl Action {
    pub const fn name(self) -> &'static str {
        match self {
            Action::None => "none",
            Action::Ignore => "ignore",
            Action::Print => "print",
            Action::Execute => "execute",
            Action::Clear => "clear",
            Action::Collect => "collect",
            Action::Param => "param",
            Action::EscDispatch => "esc_dispatch",
            Action::CsiDispatch => "csi_dispatch",
            Action::Hook => "hook",
            Action::Put => "put",
            Action::Unhook => "unhook",
            Action::OscStart => "osc_start",
            Action::OscPut => "osc_put",
            Action::OscEnd => "osc_end",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which bracketed sequence, if any, is currently open.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SequenceKind {
    #[default]
    None,
    /// Control sequence: CSI or an escape sequence with intermediates.
    Control,
    DeviceControl,
    Osc,
}

impl SequenceKind {
    pub const fn name(self) -> &'static str {
        match self {
            SequenceKind::None => "none",
            SequenceKind::Control => "control",
            SequenceKind::DeviceControl => "device_control",
            SequenceKind::Osc => "osc",
        }
    }
}

impl fmt::Display for SequenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_index_matches_row_order() {
        for (idx, state) in State::ALL.iter().enumerate() {
            assert_eq!(state.index(), idx);
        }
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<_> = State::ALL.iter().map(|s| s.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), STATE_COUNT);
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(State::SosPmApcString.to_string(), "sos_pm_apc_string");
        assert_eq!(Action::EscDispatch.to_string(), "esc_dispatch");
        assert_eq!(SequenceKind::DeviceControl.to_string(), "device_control");
    }
}
