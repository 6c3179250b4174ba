//! Tracking operations as effects over [`TrackingEnv`].
//!
//! Every operation is a plain function over `&TrackingEnv` wrapped in
//! `from_fn`, so the decision logic stays in [`crate::machine`] and the
//! I/O stays here.

use crate::core::{
    progress_percent, ShipmentId, TrackingHistory, TrackingStatus, TrackingUpdate,
    TrackingUpdateId, UserId,
};
use crate::machine::{Correction, TransitionError, UpdateCandidate};
use crate::service::env::TrackingEnv;
use crate::service::error::TrackingError;
use crate::service::notifier::StatusNotice;
use crate::shipment::{estimate_delivery, Shipment, ShipmentDraft, TrackingNumber};
use crate::store::{ShipmentFilter, ShipmentKey, ShipmentPage, ShipmentRecord, StoreError};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use stillwater::effect::Effect;
use stillwater::prelude::*;
use tracing::{debug, info, warn};

/// What a tracking lookup returns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackingView {
    pub shipment_id: ShipmentId,
    pub tracking_number: TrackingNumber,
    pub current_status: TrackingStatus,
    pub progress_percent: f64,
    pub is_closed: bool,
    pub estimated_delivery: NaiveDate,
    /// Events ordered by (timestamp, sequence), oldest first
    pub history: Vec<TrackingUpdate>,
}

impl TrackingView {
    fn from_record(record: ShipmentRecord) -> Self {
        let current_status = record.history.current_status();
        let is_closed = record.history.is_closed();
        let mut history = record.history.updates().to_vec();
        history.sort_by_key(|update| (update.timestamp, update.sequence));

        Self {
            shipment_id: record.shipment.id,
            tracking_number: record.shipment.tracking_number,
            current_status,
            progress_percent: progress_percent(current_status),
            is_closed,
            estimated_delivery: record.shipment.estimated_delivery,
            history,
        }
    }
}

/// Look a shipment up by tracking number. Reads never mutate.
pub fn track_shipment(
    tracking_number: impl Into<String>,
) -> impl Effect<Output = TrackingView, Error = TrackingError, Env = TrackingEnv> {
    let tracking_number = tracking_number.into();
    from_fn(move |env: &TrackingEnv| track(env, &tracking_number))
}

/// Append a tracking update to a shipment.
pub fn record_update(
    shipment_id: ShipmentId,
    candidate: UpdateCandidate,
) -> impl Effect<Output = TrackingUpdate, Error = TrackingError, Env = TrackingEnv> {
    from_fn(move |env: &TrackingEnv| record(env, shipment_id, &candidate))
}

/// Rewrite an existing event in place.
pub fn correct_update(
    event_id: TrackingUpdateId,
    correction: Correction,
) -> impl Effect<Output = TrackingUpdate, Error = TrackingError, Env = TrackingEnv> {
    from_fn(move |env: &TrackingEnv| correct(env, event_id, &correction))
}

/// Register a shipment under a freshly generated tracking number.
pub fn create_shipment(
    draft: ShipmentDraft,
) -> impl Effect<Output = Shipment, Error = TrackingError, Env = TrackingEnv> {
    from_fn(move |env: &TrackingEnv| create(env, &draft))
}

/// Page through shipments, newest first, optionally for one owner.
pub fn list_shipments(
    user_id: Option<UserId>,
    page: u32,
    page_size: Option<u32>,
) -> impl Effect<Output = ShipmentPage, Error = TrackingError, Env = TrackingEnv> {
    from_fn(move |env: &TrackingEnv| {
        let filter = ShipmentFilter {
            user_id,
            page: page.max(1),
            page_size: env.config.page_size(page_size),
        };
        Ok(env.store.list_shipments(&filter)?)
    })
}

fn track(env: &TrackingEnv, tracking_number: &str) -> Result<TrackingView, TrackingError> {
    let key = ShipmentKey::TrackingNumber(TrackingNumber::normalize(tracking_number));
    let record = load(env, &key)?;
    Ok(TrackingView::from_record(record))
}

fn load(env: &TrackingEnv, key: &ShipmentKey) -> Result<ShipmentRecord, TrackingError> {
    env.store.shipment_with_history(key)?.ok_or_else(|| {
        TrackingError::from(TransitionError::ShipmentNotFound {
            key: key.to_string(),
        })
    })
}

fn record(
    env: &TrackingEnv,
    shipment_id: ShipmentId,
    candidate: &UpdateCandidate,
) -> Result<TrackingUpdate, TrackingError> {
    let key = ShipmentKey::Id(shipment_id);
    let attempts = env.config.max_append_attempts.max(1);

    for attempt in 1..=attempts {
        let ShipmentRecord { shipment, history } = load(env, &key)?;
        let previous = history.current_status();

        let update = env.machine.apply(&history, candidate).map_err(|error| {
            debug!(%shipment_id, %error, "tracking update rejected");
            error
        })?;

        match env.store.append_tracking_update(update, history.len()) {
            Ok(stored) => {
                info!(
                    %shipment_id,
                    event_id = %stored.id,
                    status = %stored.status,
                    sequence = stored.sequence,
                    "tracking update recorded"
                );
                let current = history.record(stored.clone()).current_status();
                notify(env, &shipment, previous, current, &stored);
                return Ok(stored);
            }
            Err(StoreError::Conflict {
                expected, found, ..
            }) => {
                warn!(
                    %shipment_id,
                    attempt,
                    expected,
                    found,
                    "concurrent append detected, re-reading history"
                );
            }
            Err(error) => return Err(error.into()),
        }
    }

    Err(TrackingError::ConflictRetriesExhausted {
        shipment_id,
        attempts,
    })
}

fn correct(
    env: &TrackingEnv,
    event_id: TrackingUpdateId,
    correction: &Correction,
) -> Result<TrackingUpdate, TrackingError> {
    let shipment_id = env
        .store
        .shipment_for_event(event_id)?
        .ok_or(TransitionError::EventNotFound { id: event_id })?;
    let ShipmentRecord { shipment, history } = load(env, &ShipmentKey::Id(shipment_id))?;
    let previous = history.current_status();

    let corrected = env.machine.correct(&history, event_id, correction)?;
    let stored = env.store.replace_tracking_update(corrected)?;
    info!(
        %shipment_id,
        %event_id,
        status = %stored.status,
        original_status = ?stored.original_status,
        "tracking update corrected"
    );

    if let Some(current) = history
        .replace(stored.clone())
        .as_ref()
        .map(TrackingHistory::current_status)
    {
        notify(env, &shipment, previous, current, &stored);
    }
    Ok(stored)
}

fn create(env: &TrackingEnv, draft: &ShipmentDraft) -> Result<Shipment, TrackingError> {
    let created_at = Utc::now();
    let estimated_delivery =
        estimate_delivery(created_at, draft.service_type, &env.config.transit_days);
    let attempts = env.config.max_tracking_number_attempts.max(1);

    for attempt in 1..=attempts {
        let tracking_number =
            TrackingNumber::generate(&env.config.tracking_prefix, &mut rand::thread_rng());
        let shipment = Shipment::from_draft(
            draft.clone(),
            tracking_number,
            created_at,
            estimated_delivery,
        );

        match env.store.insert_shipment(shipment.clone()) {
            Ok(()) => {
                info!(
                    shipment_id = %shipment.id,
                    tracking_number = %shipment.tracking_number,
                    service = %shipment.service_type,
                    pieces = shipment.total_pieces(),
                    weight_kg = shipment.total_weight(),
                    %estimated_delivery,
                    "shipment created"
                );
                return Ok(shipment);
            }
            Err(StoreError::DuplicateTrackingNumber { tracking_number }) => {
                debug!(%tracking_number, attempt, "tracking number taken, regenerating");
            }
            Err(error) => return Err(error.into()),
        }
    }

    Err(TrackingError::TrackingNumbersExhausted { attempts })
}

fn notify(
    env: &TrackingEnv,
    shipment: &Shipment,
    previous: TrackingStatus,
    current: TrackingStatus,
    update: &TrackingUpdate,
) {
    if previous == current {
        return;
    }
    let notice = StatusNotice {
        shipment_id: shipment.id,
        tracking_number: shipment.tracking_number.clone(),
        recipient_email: shipment.recipient.email.clone(),
        previous,
        current,
        update: update.clone(),
    };
    if let Err(error) = env.notifier.status_changed(&notice) {
        warn!(shipment_id = %shipment.id, %error, "status notification failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::notifier::{Notifier, NotifyError};
    use crate::shipment::{Address, Package, Recipient, ShipmentDraftBuilder};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct RecordingNotifier {
        notices: Mutex<Vec<(TrackingStatus, TrackingStatus)>>,
    }

    impl Notifier for RecordingNotifier {
        fn status_changed(&self, notice: &StatusNotice) -> Result<(), NotifyError> {
            self.notices
                .lock()
                .unwrap()
                .push((notice.previous, notice.current));
            Ok(())
        }
    }

    struct FailingNotifier;

    impl Notifier for FailingNotifier {
        fn status_changed(&self, _notice: &StatusNotice) -> Result<(), NotifyError> {
            Err(NotifyError("smtp down".to_string()))
        }
    }

    fn address(city: &str) -> Address {
        Address {
            street: "1 Dock Road".to_string(),
            city: city.to_string(),
            state: "Merseyside".to_string(),
            postal_code: "L3 4AA".to_string(),
            country: "GB".to_string(),
        }
    }

    fn draft() -> ShipmentDraft {
        ShipmentDraftBuilder::new()
            .origin(address("Liverpool"))
            .destination(address("Leeds"))
            .service("express")
            .package(Package {
                weight: 1.2,
                length: 20.0,
                width: 15.0,
                height: 10.0,
                declared_value: 40.0,
                description: "Books".to_string(),
                pieces: 1,
                dangerous_goods: false,
                insured: false,
            })
            .recipient(Recipient {
                name: "Grace Hopper".to_string(),
                email: "grace@example.com".to_string(),
                phone: "0151 000 0000".to_string(),
                company: None,
            })
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn created_shipment_is_pending_at_ten_percent() {
        let env = TrackingEnv::in_memory();
        let shipment = create_shipment(draft()).run(&env).await.unwrap();

        assert!(shipment.tracking_number.as_str().starts_with("SHP-"));
        assert!(!shipment.is_paid);

        let view = track_shipment(shipment.tracking_number.as_str())
            .run(&env)
            .await
            .unwrap();
        assert_eq!(view.current_status, TrackingStatus::Pending);
        assert_eq!(view.progress_percent, 10.0);
        assert!(view.history.is_empty());
        assert_eq!(view.estimated_delivery, shipment.estimated_delivery);
    }

    #[tokio::test]
    async fn lookup_ignores_tracking_number_case() {
        let env = TrackingEnv::in_memory();
        let shipment = create_shipment(draft()).run(&env).await.unwrap();

        let lowered = shipment.tracking_number.as_str().to_lowercase();
        let view = track_shipment(format!("  {lowered} ")).run(&env).await.unwrap();

        assert_eq!(view.shipment_id, shipment.id);
    }

    #[tokio::test]
    async fn unknown_tracking_number_is_not_found() {
        let env = TrackingEnv::in_memory();

        let error = track_shipment("SHP-NOPE0000").run(&env).await.unwrap_err();

        assert!(error.is_not_found());
    }

    #[tokio::test]
    async fn recording_notifies_on_status_change_only() {
        let notifier = Arc::new(RecordingNotifier::default());
        let env = TrackingEnv::in_memory().with_notifier(notifier.clone());
        let shipment = create_shipment(draft()).run(&env).await.unwrap();

        record_update(shipment.id, UpdateCandidate::new("in_transit", "Left hub"))
            .run(&env)
            .await
            .unwrap();
        record_update(shipment.id, UpdateCandidate::new("in_transit", "Arrived hub"))
            .run(&env)
            .await
            .unwrap();

        assert_eq!(
            *notifier.notices.lock().unwrap(),
            vec![(TrackingStatus::Pending, TrackingStatus::InTransit)]
        );
    }

    #[tokio::test]
    async fn notifier_failure_does_not_fail_the_update() {
        let env = TrackingEnv::in_memory().with_notifier(Arc::new(FailingNotifier));
        let shipment = create_shipment(draft()).run(&env).await.unwrap();

        let stored = record_update(shipment.id, UpdateCandidate::new("picked_up", "Collected"))
            .run(&env)
            .await
            .unwrap();

        assert_eq!(stored.status, TrackingStatus::PickedUp);
    }

    #[tokio::test]
    async fn update_for_unknown_shipment_is_not_found() {
        let env = TrackingEnv::in_memory();

        let error = record_update(ShipmentId::new(), UpdateCandidate::new("in_transit", "x"))
            .run(&env)
            .await
            .unwrap_err();

        assert!(error.is_not_found());
    }

    #[tokio::test]
    async fn correcting_unknown_event_is_not_found() {
        let env = TrackingEnv::in_memory();

        let error = correct_update(TrackingUpdateId::new(), Correction::default())
            .run(&env)
            .await
            .unwrap_err();

        assert!(matches!(
            error.transition(),
            Some(TransitionError::EventNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn listing_clamps_page_size_to_configured_maximum() {
        let env = TrackingEnv::in_memory();
        for _ in 0..3 {
            create_shipment(draft()).run(&env).await.unwrap();
        }

        let page = list_shipments(None, 0, Some(10_000)).run(&env).await.unwrap();

        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, env.config.max_page_size);
        assert_eq!(page.total_count, 3);
        assert_eq!(page.items.len(), 3);
    }
}
