use proptest::prelude::*;

use crate::{
    state::{Event, Step},
    types::{ApplicationList, ApplicationRef},
};

// ─── State machine generators ───────────────────────────────────────────────

pub fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        Just(Step::Setup),
        Just(Step::RegisterApps),
        Just(Step::PrintApplications),
        Just(Step::Teardown),
    ]
}

pub fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        4 => Just(Event::IdleTick),
        1 => Just(Event::ShutdownRequested),
    ]
}

// ─── Registry content generators ────────────────────────────────────────────

pub fn arb_application_ref() -> impl Strategy<Value = ApplicationRef> {
    (1u32..=9, 1u32..=999, "[a-z0-9_]{1,12}").prop_map(|(major, minor, leaf)| {
        ApplicationRef::new(
            format!(":{major}.{minor}"),
            format!("/org/a11y/atspi/accessible/{leaf}"),
        )
    })
}

pub fn arb_application_list() -> impl Strategy<Value = ApplicationList> {
    prop::collection::vec(arb_application_ref(), 0..12).prop_map(ApplicationList::new)
}
