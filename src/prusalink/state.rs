//! Printer state reduction.
//!
//! The legacy `/api/printer` payload reports its state as a bag of independent
//! boolean flags that are frequently set together (an SL1 that is ready is also
//! operational). The exporter reduces them to one ordinal by a fixed priority.

use serde::Deserialize;

/// Raw state flags as reported under `state.flags` of `/api/printer`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatusFlags {
    pub operational: bool,
    pub prepared: bool,
    pub paused: bool,
    pub printing: bool,
    pub cancelling: bool,
    pub pausing: bool,
    pub error: bool,
    pub sd_ready: bool,
    pub closed_or_error: bool,
    pub closed_on_error: bool,
    pub ready: bool,
    pub busy: bool,
    pub finished: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum StateOrdinal {
    Unknown = 0,
    Operational = 1,
    Prepared = 2,
    Paused = 3,
    Printing = 4,
    Cancelling = 5,
    Pausing = 6,
    Error = 7,
    SdReady = 8,
    ClosedOrError = 9,
    Ready = 10,
    Busy = 11,
    Finished = 12,
}

impl StateOrdinal {
    pub fn value(self) -> f64 {
        self as u8 as f64
    }
}

/// First matching flag wins; the order is not alphabetical nor by severity.
pub fn reduce(flags: &StatusFlags) -> StateOrdinal {
    let priority = [
        (flags.operational, StateOrdinal::Operational),
        (flags.prepared, StateOrdinal::Prepared),
        (flags.paused, StateOrdinal::Paused),
        (flags.printing, StateOrdinal::Printing),
        (flags.cancelling, StateOrdinal::Cancelling),
        (flags.pausing, StateOrdinal::Pausing),
        (flags.error, StateOrdinal::Error),
        (flags.sd_ready, StateOrdinal::SdReady),
        (
            flags.closed_or_error || flags.closed_on_error,
            StateOrdinal::ClosedOrError,
        ),
        (flags.ready, StateOrdinal::Ready),
        (flags.busy, StateOrdinal::Busy),
        (flags.finished, StateOrdinal::Finished),
    ];

    priority
        .into_iter()
        .find_map(|(set, state)| set.then_some(state))
        .unwrap_or(StateOrdinal::Unknown)
}
