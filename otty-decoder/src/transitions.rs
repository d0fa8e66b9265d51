//! Transition table for the `otty-decoder` finite state machine.
//!
//! The decoder is driven by a table that mirrors the DEC/ECMA-48 parser
//! described by Paul Williams. Every state owns an ordered list of byte range
//! rules; the first matching rule decides the [`Predicate`] for a byte, and a
//! shared list of rules that apply from any state covers whatever a state
//! does not claim for itself (CAN, SUB, ESC and the C1 controls).
//!
//! The rule lists are expanded into a dense [`Table`] during constant
//! evaluation, so a lookup on the hot path is a pair of array indexes. Rule
//! lists must not contain overlapping ranges: [`Table::build`] refuses to
//! compile such a table and [`validate`] reports the offending ranges.

use std::fmt;

use crate::enums::{Action as A, STATE_COUNT, State as S};
use crate::error::TableError;

/// Slots in a [`Row`]: one per ASCII byte plus the enter and leave slots.
pub const ROW_WIDTH: usize = 130;

/// Slot holding the action run when a state is entered.
pub const SLOT_ENTER: usize = 128;

/// Slot holding the action run when a state is left.
pub const SLOT_LEAVE: usize = 129;

/// Number of C1 control bytes (0x80..=0x9f).
const C1_WIDTH: usize = 32;

/// Inclusive byte range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ByteRange {
    pub lower: u8,
    pub upper: u8,
}

impl ByteRange {
    pub const fn new(lower: u8, upper: u8) -> Self {
        Self { lower, upper }
    }

    pub const fn single(byte: u8) -> Self {
        Self::new(byte, byte)
    }

    #[inline(always)]
    pub const fn contains(self, byte: u8) -> bool {
        self.lower <= byte && byte <= self.upper
    }

    pub const fn overlaps(self, other: ByteRange) -> bool {
        self.lower <= other.upper && other.lower <= self.upper
    }
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lower == self.upper {
            write!(f, "{:#04x}", self.lower)
        } else {
            write!(f, "{:#04x}..={:#04x}", self.lower, self.upper)
        }
    }
}

/// What to do with a byte: an action and an optional state to move to first.
///
/// A `target` of `None` keeps the automaton in its current state.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Predicate {
    pub action: A,
    pub target: Option<S>,
}

impl Predicate {
    pub const NONE: Predicate = Predicate {
        action: A::None,
        target: None,
    };

    pub const IGNORE: Predicate = Predicate::act(A::Ignore);

    pub const fn act(action: A) -> Self {
        Self {
            action,
            target: None,
        }
    }

    pub const fn act_to(action: A, target: S) -> Self {
        Self {
            action,
            target: Some(target),
        }
    }

    pub const fn to(target: S) -> Self {
        Self::act_to(A::None, target)
    }
}

type Rule = (ByteRange, Predicate);

const fn on(lower: u8, upper: u8, action: A) -> Rule {
    (ByteRange::new(lower, upper), Predicate::act(action))
}

const fn go(lower: u8, upper: u8, action: A, target: S) -> Rule {
    (ByteRange::new(lower, upper), Predicate::act_to(action, target))
}

/// Rules for a single state.
struct Plan {
    state: S,
    enter: A,
    leave: A,
    rules: &'static [Rule],
}

/// Rules applied from any state when the state's own rules do not match.
const ANYWHERE: &[Rule] = &[
    go(0x18, 0x18, A::Execute, S::Ground),
    go(0x1a, 0x1a, A::Execute, S::Ground),
    go(0x80, 0x8f, A::Execute, S::Ground),
    go(0x91, 0x97, A::Execute, S::Ground),
    go(0x99, 0x99, A::Execute, S::Ground),
    go(0x9a, 0x9a, A::Execute, S::Ground),
    // String Terminator (ST) in 8-bit form.
    go(0x9c, 0x9c, A::None, S::Ground),
    go(0x1b, 0x1b, A::None, S::Escape),
    go(0x98, 0x98, A::None, S::SosPmApcString),
    go(0x9e, 0x9f, A::None, S::SosPmApcString),
    go(0x90, 0x90, A::None, S::DcsEntry),
    go(0x9d, 0x9d, A::None, S::OscString),
    go(0x9b, 0x9b, A::None, S::CsiEntry),
];

const GROUND: &[Rule] = &[
    on(0x00, 0x17, A::Execute),
    on(0x19, 0x19, A::Execute),
    on(0x1c, 0x1f, A::Execute),
    on(0x20, 0x7f, A::Print),
];

const ESCAPE: &[Rule] = &[
    on(0x00, 0x17, A::Execute),
    on(0x19, 0x19, A::Execute),
    on(0x1c, 0x1f, A::Execute),
    on(0x7f, 0x7f, A::Ignore),
    go(0x20, 0x2f, A::Collect, S::EscapeIntermediate),
    go(0x30, 0x4f, A::EscDispatch, S::Ground),
    go(0x51, 0x57, A::EscDispatch, S::Ground),
    go(0x59, 0x5a, A::EscDispatch, S::Ground),
    go(0x5c, 0x5c, A::EscDispatch, S::Ground),
    go(0x60, 0x7e, A::EscDispatch, S::Ground),
    go(0x5b, 0x5b, A::None, S::CsiEntry),
    go(0x5d, 0x5d, A::None, S::OscString),
    go(0x50, 0x50, A::None, S::DcsEntry),
    go(0x58, 0x58, A::None, S::SosPmApcString),
    go(0x5e, 0x5f, A::None, S::SosPmApcString),
];

const ESCAPE_INTERMEDIATE: &[Rule] = &[
    on(0x00, 0x17, A::Execute),
    on(0x19, 0x19, A::Execute),
    on(0x1c, 0x1f, A::Execute),
    on(0x20, 0x2f, A::Collect),
    on(0x7f, 0x7f, A::Ignore),
    go(0x30, 0x7e, A::EscDispatch, S::Ground),
];

const CSI_ENTRY: &[Rule] = &[
    on(0x00, 0x17, A::Execute),
    on(0x19, 0x19, A::Execute),
    on(0x1c, 0x1f, A::Execute),
    on(0x7f, 0x7f, A::Ignore),
    go(0x20, 0x2f, A::Collect, S::CsiIntermediate),
    go(0x3a, 0x3a, A::None, S::CsiIgnore),
    go(0x30, 0x39, A::Param, S::CsiParam),
    go(0x3b, 0x3b, A::Param, S::CsiParam),
    go(0x3c, 0x3f, A::Collect, S::CsiParam),
    go(0x40, 0x7e, A::CsiDispatch, S::Ground),
];

const CSI_PARAM: &[Rule] = &[
    on(0x00, 0x17, A::Execute),
    on(0x19, 0x19, A::Execute),
    on(0x1c, 0x1f, A::Execute),
    on(0x30, 0x39, A::Param),
    on(0x3b, 0x3b, A::Param),
    on(0x7f, 0x7f, A::Ignore),
    go(0x3a, 0x3a, A::None, S::CsiIgnore),
    go(0x3c, 0x3f, A::None, S::CsiIgnore),
    go(0x20, 0x2f, A::Collect, S::CsiIntermediate),
    go(0x40, 0x7e, A::CsiDispatch, S::Ground),
];

const CSI_INTERMEDIATE: &[Rule] = &[
    on(0x00, 0x17, A::Execute),
    on(0x19, 0x19, A::Execute),
    on(0x1c, 0x1f, A::Execute),
    on(0x20, 0x2f, A::Collect),
    on(0x7f, 0x7f, A::Ignore),
    go(0x30, 0x3f, A::None, S::CsiIgnore),
    go(0x40, 0x7e, A::CsiDispatch, S::Ground),
];

const CSI_IGNORE: &[Rule] = &[
    on(0x00, 0x17, A::Execute),
    on(0x19, 0x19, A::Execute),
    on(0x1c, 0x1f, A::Execute),
    on(0x20, 0x3f, A::Ignore),
    on(0x7f, 0x7f, A::Ignore),
    go(0x40, 0x7e, A::None, S::Ground),
];

const DCS_ENTRY: &[Rule] = &[
    on(0x00, 0x17, A::Ignore),
    on(0x19, 0x19, A::Ignore),
    on(0x1c, 0x1f, A::Ignore),
    on(0x7f, 0x7f, A::Ignore),
    go(0x3a, 0x3a, A::None, S::DcsIgnore),
    go(0x20, 0x2f, A::Collect, S::DcsIntermediate),
    go(0x30, 0x39, A::Param, S::DcsParam),
    go(0x3b, 0x3b, A::Param, S::DcsParam),
    go(0x3c, 0x3f, A::Collect, S::DcsParam),
    go(0x40, 0x7e, A::None, S::DcsPassthrough),
];

const DCS_PARAM: &[Rule] = &[
    on(0x00, 0x17, A::Ignore),
    on(0x19, 0x19, A::Ignore),
    on(0x1c, 0x1f, A::Ignore),
    on(0x30, 0x39, A::Param),
    on(0x3b, 0x3b, A::Param),
    on(0x7f, 0x7f, A::Ignore),
    go(0x3a, 0x3a, A::None, S::DcsIgnore),
    go(0x3c, 0x3f, A::None, S::DcsIgnore),
    go(0x20, 0x2f, A::Collect, S::DcsIntermediate),
    go(0x40, 0x7e, A::None, S::DcsPassthrough),
];

const DCS_INTERMEDIATE: &[Rule] = &[
    on(0x00, 0x17, A::Ignore),
    on(0x19, 0x19, A::Ignore),
    on(0x1c, 0x1f, A::Ignore),
    on(0x20, 0x2f, A::Collect),
    on(0x7f, 0x7f, A::Ignore),
    go(0x30, 0x3f, A::None, S::DcsIgnore),
    go(0x40, 0x7e, A::None, S::DcsPassthrough),
];

const DCS_PASSTHROUGH: &[Rule] = &[
    on(0x00, 0x17, A::Put),
    on(0x19, 0x19, A::Put),
    on(0x1c, 0x1f, A::Put),
    on(0x20, 0x7e, A::Put),
    on(0x7f, 0x7f, A::Ignore),
];

const DCS_IGNORE: &[Rule] = &[
    on(0x00, 0x17, A::Ignore),
    on(0x19, 0x19, A::Ignore),
    on(0x1c, 0x1f, A::Ignore),
    on(0x20, 0x7f, A::Ignore),
];

const OSC_STRING: &[Rule] = &[
    on(0x00, 0x17, A::Ignore),
    on(0x19, 0x19, A::Ignore),
    on(0x1c, 0x1f, A::Ignore),
    on(0x20, 0x7f, A::OscPut),
];

const SOS_PM_APC_STRING: &[Rule] = &[
    on(0x00, 0x17, A::Ignore),
    on(0x19, 0x19, A::Ignore),
    on(0x1c, 0x1f, A::Ignore),
    on(0x20, 0x7f, A::Ignore),
];

/// Plans in row order.
const PLANS: [Plan; STATE_COUNT] = [
    Plan {
        state: S::Ground,
        enter: A::None,
        leave: A::None,
        rules: GROUND,
    },
    Plan {
        state: S::Escape,
        enter: A::Clear,
        leave: A::None,
        rules: ESCAPE,
    },
    Plan {
        state: S::EscapeIntermediate,
        enter: A::None,
        leave: A::None,
        rules: ESCAPE_INTERMEDIATE,
    },
    Plan {
        state: S::CsiEntry,
        enter: A::Clear,
        leave: A::None,
        rules: CSI_ENTRY,
    },
    Plan {
        state: S::CsiParam,
        enter: A::None,
        leave: A::None,
        rules: CSI_PARAM,
    },
    Plan {
        state: S::CsiIntermediate,
        enter: A::None,
        leave: A::None,
        rules: CSI_INTERMEDIATE,
    },
    Plan {
        state: S::CsiIgnore,
        enter: A::None,
        leave: A::None,
        rules: CSI_IGNORE,
    },
    Plan {
        state: S::DcsEntry,
        enter: A::Clear,
        leave: A::None,
        rules: DCS_ENTRY,
    },
    Plan {
        state: S::DcsParam,
        enter: A::None,
        leave: A::None,
        rules: DCS_PARAM,
    },
    Plan {
        state: S::DcsIntermediate,
        enter: A::None,
        leave: A::None,
        rules: DCS_INTERMEDIATE,
    },
    Plan {
        state: S::DcsPassthrough,
        enter: A::Hook,
        leave: A::Unhook,
        rules: DCS_PASSTHROUGH,
    },
    Plan {
        state: S::DcsIgnore,
        enter: A::None,
        leave: A::None,
        rules: DCS_IGNORE,
    },
    Plan {
        state: S::OscString,
        enter: A::OscStart,
        leave: A::OscEnd,
        rules: OSC_STRING,
    },
    Plan {
        state: S::SosPmApcString,
        enter: A::None,
        leave: A::None,
        rules: SOS_PM_APC_STRING,
    },
];

/// Structural problem in a rule list, by rule index.
enum Defect {
    Inverted(usize),
    Overlap(usize, usize),
}

const fn find_defect(rules: &[Rule]) -> Option<Defect> {
    let mut i = 0;
    while i < rules.len() {
        let range = rules[i].0;
        if range.lower > range.upper {
            return Some(Defect::Inverted(i));
        }

        let mut j = i + 1;
        while j < rules.len() {
            if range.overlaps(rules[j].0) {
                return Some(Defect::Overlap(i, j));
            }
            j += 1;
        }
        i += 1;
    }

    None
}

/// First matching rule wins.
const fn resolve(rules: &[Rule], byte: u8) -> Option<Predicate> {
    let mut i = 0;
    while i < rules.len() {
        let (range, predicate) = rules[i];
        if range.contains(byte) {
            return Some(predicate);
        }
        i += 1;
    }

    None
}

const fn resolve_or_anywhere(rules: &[Rule], byte: u8) -> Predicate {
    match resolve(rules, byte) {
        Some(predicate) => predicate,
        None => match resolve(ANYWHERE, byte) {
            Some(predicate) => predicate,
            None => Predicate::IGNORE,
        },
    }
}

/// Predicates of a single state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Row {
    slots: [Predicate; ROW_WIDTH],
}

impl Row {
    const EMPTY: Row = Row {
        slots: [Predicate::NONE; ROW_WIDTH],
    };

    const fn build(plan: &Plan) -> Row {
        let mut row = Row::EMPTY;

        let mut byte = 0;
        while byte < SLOT_ENTER {
            row.slots[byte] = resolve_or_anywhere(plan.rules, byte as u8);
            byte += 1;
        }

        row.slots[SLOT_ENTER] = Predicate::act(plan.enter);
        row.slots[SLOT_LEAVE] = Predicate::act(plan.leave);
        row
    }

    /// Predicate for an ASCII byte. C1 bytes live in the table's shared C1
    /// row; use [`Table::lookup`] for those.
    #[inline(always)]
    pub(crate) fn get(&self, byte: u8) -> Predicate {
        debug_assert!(byte < 0x80, "{byte:#04x} is not ASCII");
        self.slots[usize::from(byte & 0x7f)]
    }

    #[inline(always)]
    pub fn on_enter(&self) -> Predicate {
        self.slots[SLOT_ENTER]
    }

    #[inline(always)]
    pub fn on_leave(&self) -> Predicate {
        self.slots[SLOT_LEAVE]
    }

    pub fn slots(&self) -> &[Predicate; ROW_WIDTH] {
        &self.slots
    }
}

/// Dense transition table: one [`Row`] per [`State`](crate::State), plus the
/// predicates for C1 controls, which do not depend on the current state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Table {
    rows: [Row; STATE_COUNT],
    c1: [Predicate; C1_WIDTH],
}

static TABLE: Table = Table::build();

/// The process wide transition table.
#[inline(always)]
pub fn table() -> &'static Table {
    &TABLE
}

impl Table {
    /// Expand the rule lists into a table.
    ///
    /// # Panics
    ///
    /// Panics if a rule list has an inverted or overlapping range. The shipped
    /// table is built during constant evaluation, so this surfaces as a
    /// compile error.
    pub const fn build() -> Table {
        if find_defect(ANYWHERE).is_some() {
            panic!("defective anywhere transition rules");
        }

        let mut rows = [Row::EMPTY; STATE_COUNT];
        let mut idx = 0;
        while idx < STATE_COUNT {
            let plan = &PLANS[idx];
            assert!(plan.state.index() == idx, "transition plans out of order");
            if find_defect(plan.rules).is_some() {
                panic!("defective state transition rules");
            }

            rows[idx] = Row::build(plan);
            idx += 1;
        }

        let mut c1 = [Predicate::IGNORE; C1_WIDTH];
        let mut idx = 0;
        while idx < C1_WIDTH {
            if let Some(predicate) = resolve(ANYWHERE, 0x80 + idx as u8) {
                c1[idx] = predicate;
            }
            idx += 1;
        }

        Table { rows, c1 }
    }

    #[inline(always)]
    pub fn row(&self, state: S) -> &Row {
        &self.rows[state.index()]
    }

    /// Predicate for `byte` in `state`.
    ///
    /// Bytes past the C1 range never reach the automaton directly; they map
    /// to [`Predicate::IGNORE`].
    #[inline(always)]
    pub fn lookup(&self, state: S, byte: u8) -> Predicate {
        match byte {
            0x00..=0x7f => self.rows[state.index()].get(byte),
            0x80..=0x9f => self.c1[usize::from(byte - 0x80)],
            _ => Predicate::IGNORE,
        }
    }
}

fn check_rules(name: &'static str, rules: &[Rule]) -> Result<(), TableError> {
    match find_defect(rules) {
        None => Ok(()),
        Some(Defect::Inverted(idx)) => Err(TableError::Inverted {
            rules: name,
            range: rules[idx].0,
        }),
        Some(Defect::Overlap(first, second)) => Err(TableError::Overlap {
            rules: name,
            first: rules[first].0,
            second: rules[second].0,
        }),
    }
}

/// Check every rule list for inverted or overlapping ranges.
///
/// # Errors
///
/// Returns the first defect found.
pub fn validate() -> Result<(), TableError> {
    check_rules("anywhere", ANYWHERE)?;
    for plan in &PLANS {
        check_rules(plan.state.name(), plan.rules)?;
    }

    Ok(())
}
