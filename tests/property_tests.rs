//! Property-based tests for the tracking core.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated histories and inputs.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use waybill::core::{
    progress_percent, progress_percent_for_label, ShipmentId, State, TrackingHistory,
    TrackingStatus, DISPLAY_SEQUENCE, MIN_PROGRESS,
};
use waybill::machine::{Correction, TrackingMachine, TransitionError, UpdateCandidate};

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()
}

prop_compose! {
    fn arbitrary_status()(index in 0..TrackingStatus::ALL.len()) -> TrackingStatus {
        TrackingStatus::ALL[index]
    }
}

prop_compose! {
    fn open_status()(
        status in arbitrary_status().prop_filter("open", |s| !s.is_final())
    ) -> TrackingStatus {
        status
    }
}

prop_compose! {
    fn final_status()(
        status in arbitrary_status().prop_filter("final", |s| s.is_final())
    ) -> TrackingStatus {
        status
    }
}

prop_compose! {
    // A status observed some minutes before or after the base time.
    fn timed_status()(
        status in arbitrary_status(),
        offset_minutes in -600i64..600,
    ) -> (TrackingStatus, i64) {
        (status, offset_minutes)
    }
}

/// Feed statuses through the machine, one minute apart.
fn build_history(machine: &TrackingMachine, statuses: &[TrackingStatus]) -> TrackingHistory {
    let mut history = TrackingHistory::new(ShipmentId::new());
    for (i, status) in statuses.iter().enumerate() {
        let candidate = UpdateCandidate::new(status.as_str(), format!("scan {i}"))
            .observed_at(base_time() + Duration::minutes(i as i64));
        let update = machine
            .apply(&history, &candidate)
            .expect("open history accepts updates");
        history = history.record(update);
    }
    history
}

/// Vary case and separators without changing the normalized label.
fn respell(label: &str, upper: bool, hyphens: bool) -> String {
    let cased = if upper {
        label.to_ascii_uppercase()
    } else {
        label.to_string()
    };
    let spelled = if hyphens {
        cased.replace('_', "-")
    } else {
        cased
    };
    format!("  {spelled} ")
}

#[test]
fn empty_history_is_pending_at_minimum_progress() {
    let history = TrackingHistory::new(ShipmentId::new());

    assert_eq!(history.current_status(), TrackingStatus::Pending);
    assert_eq!(progress_percent(history.current_status()), MIN_PROGRESS);
    assert!(!history.is_closed());
}

proptest! {
    #[test]
    fn accepted_update_becomes_current_status(
        prefix in prop::collection::vec(open_status(), 0..6),
        next in arbitrary_status(),
    ) {
        let machine = TrackingMachine::new();
        let history = build_history(&machine, &prefix);

        let candidate = UpdateCandidate::new(next.as_str(), "latest scan")
            .observed_at(base_time() + Duration::hours(1));
        let update = machine.apply(&history, &candidate).unwrap();
        let history = history.record(update);

        prop_assert_eq!(history.current_status(), next);
        prop_assert_eq!(history.len(), prefix.len() + 1);
    }

    #[test]
    fn final_status_locks_the_shipment(
        prefix in prop::collection::vec(open_status(), 0..5),
        terminal in final_status(),
        next in arbitrary_status(),
    ) {
        let machine = TrackingMachine::new();
        let mut statuses = prefix.clone();
        statuses.push(terminal);
        let history = build_history(&machine, &statuses);

        let candidate = UpdateCandidate::new(next.as_str(), "after the end")
            .observed_at(base_time() + Duration::hours(2));
        let result = machine.apply(&history, &candidate);

        prop_assert_eq!(result, Err(TransitionError::ShipmentClosed { status: terminal }));
        prop_assert_eq!(history.len(), statuses.len());
        prop_assert_eq!(history.current_status(), terminal);
    }

    #[test]
    fn lock_follows_current_status_for_any_arrival_order(
        events in prop::collection::vec(timed_status(), 1..12),
    ) {
        let machine = TrackingMachine::new();
        let mut history = TrackingHistory::new(ShipmentId::new());

        for (i, (status, offset)) in events.iter().enumerate() {
            let candidate = UpdateCandidate::new(status.as_str(), format!("scan {i}"))
                .observed_at(base_time() + Duration::minutes(*offset));
            let current = history.current_status();

            match machine.apply(&history, &candidate) {
                Ok(update) => {
                    prop_assert!(!current.is_final());
                    history = history.record(update);
                }
                Err(TransitionError::ShipmentClosed { status: closed_by }) => {
                    prop_assert!(current.is_final());
                    prop_assert_eq!(closed_by, current);
                }
                Err(other) => prop_assert!(false, "unexpected rejection: {:?}", other),
            }
            prop_assert_eq!(history.is_closed(), history.current_status().is_final());
        }
    }

    #[test]
    fn backdated_final_event_keeps_shipment_open(
        prefix in prop::collection::vec(open_status(), 1..5),
        terminal in final_status(),
        days_back in 1i64..30,
        next in arbitrary_status(),
    ) {
        let machine = TrackingMachine::new();
        let history = build_history(&machine, &prefix);

        let late = UpdateCandidate::new(terminal.as_str(), "late upload")
            .observed_at(base_time() - Duration::days(days_back));
        let history = history.record(machine.apply(&history, &late).unwrap());

        prop_assert_eq!(history.current_status(), *prefix.last().unwrap());
        prop_assert!(!history.is_closed());

        let candidate = UpdateCandidate::new(next.as_str(), "newer scan")
            .observed_at(base_time() + Duration::hours(1));
        let history = history.record(machine.apply(&history, &candidate).unwrap());
        prop_assert_eq!(history.current_status(), next);
    }

    #[test]
    fn corrections_bypass_the_lock_without_reopening(
        prefix in prop::collection::vec(open_status(), 0..5),
        terminal in final_status(),
        replacement in open_status(),
    ) {
        let machine = TrackingMachine::new();
        let mut statuses = prefix;
        statuses.push(terminal);
        let history = build_history(&machine, &statuses);
        let last = history.updates().last().unwrap().clone();

        let corrected = machine
            .correct(&history, last.id, &Correction::default().status(replacement.as_str()))
            .unwrap();
        let history = history.replace(corrected.clone()).unwrap();

        prop_assert_eq!(corrected.status, replacement);
        prop_assert_eq!(corrected.original_status, Some(terminal));
        prop_assert_eq!(corrected.timestamp, last.timestamp);
        prop_assert_eq!(corrected.sequence, last.sequence);
        prop_assert!(history.is_closed());
        prop_assert_eq!(
            machine.apply(&history, &UpdateCandidate::new("arrived", "after correction")),
            Err(TransitionError::ShipmentClosed { status: terminal })
        );
    }

    #[test]
    fn derived_status_is_stable_across_reads(
        statuses in prop::collection::vec(open_status(), 0..8),
    ) {
        let machine = TrackingMachine::new();
        let history = build_history(&machine, &statuses);

        let first = history.current_status();
        let second = history.current_status();

        prop_assert_eq!(first, second);
        prop_assert_eq!(progress_percent(first), progress_percent(second));
    }

    #[test]
    fn progress_stays_in_bounds(status in arbitrary_status()) {
        let percent = progress_percent(status);
        prop_assert!((MIN_PROGRESS..=100.0).contains(&percent));
    }

    #[test]
    fn progress_follows_display_sequence(
        a in 0..DISPLAY_SEQUENCE.len(),
        b in 0..DISPLAY_SEQUENCE.len(),
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(
            progress_percent_for_label(DISPLAY_SEQUENCE[low])
                <= progress_percent_for_label(DISPLAY_SEQUENCE[high])
        );
    }

    #[test]
    fn status_labels_survive_respelling(
        status in arbitrary_status(),
        upper in any::<bool>(),
        hyphens in any::<bool>(),
    ) {
        let label = respell(status.as_str(), upper, hyphens);
        prop_assert_eq!(TrackingStatus::from_label(&label), Some(status));
    }

    #[test]
    fn unknown_labels_are_rejected(label in "[a-z]{1,12}x[0-9]") {
        let machine = TrackingMachine::new();
        let history = TrackingHistory::new(ShipmentId::new());

        let result = machine.apply(&history, &UpdateCandidate::new(label.clone(), "scan"));

        prop_assert_eq!(result, Err(TransitionError::InvalidStatus { value: label }));
    }

    #[test]
    fn history_roundtrip_serialization(
        statuses in prop::collection::vec(open_status(), 0..6),
    ) {
        let machine = TrackingMachine::new();
        let history = build_history(&machine, &statuses);

        let json = serde_json::to_string(&history).unwrap();
        let restored: TrackingHistory = serde_json::from_str(&json).unwrap();

        prop_assert_eq!(restored.current_status(), history.current_status());
        prop_assert_eq!(restored.status_path(), history.status_path());
    }
}
