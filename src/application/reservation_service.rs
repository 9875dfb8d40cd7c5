//! Reservation service
//!
//! Application-level use cases over the reservation store: create, partial
//! update, lookup, listing, the guest confirm-reschedule entry point, and
//! the staff dashboard aggregation. Status-changing saves run the transition
//! processor and dispatch the resulting notifications best-effort — dispatch
//! happens after the save and can never roll it back.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};

use super::dto::{CreateReservation, UpdateReservation};
use super::transitions;
use crate::domain::{
    DomainError, DomainResult, GuestRef, RequestIdentity, Reservation, ReservationRepository,
    ReservationStatus,
};
use crate::notifications::{NotificationGateway, NotificationRequest};

/// Staff dashboard aggregation: one group per status, empty groups included.
///
/// The four groups mirror the [`ReservationStatus`] variants; a new status
/// variant needs a matching group here.
#[derive(Debug, Default)]
pub struct DashboardData {
    pub pending: Vec<Reservation>,
    pub approved: Vec<Reservation>,
    pub reschedule_requested: Vec<Reservation>,
    pub cancelled: Vec<Reservation>,
}

pub struct ReservationService {
    repository: Arc<dyn ReservationRepository>,
    gateway: Arc<dyn NotificationGateway>,
}

impl ReservationService {
    pub fn new(
        repository: Arc<dyn ReservationRepository>,
        gateway: Arc<dyn NotificationGateway>,
    ) -> Self {
        Self {
            repository,
            gateway,
        }
    }

    /// Create a reservation for the authenticated guest. Always persisted
    /// as `pending`.
    pub async fn create(
        &self,
        data: CreateReservation,
        identity: &RequestIdentity,
    ) -> DomainResult<Reservation> {
        let date = data
            .date
            .ok_or_else(|| DomainError::Validation("date: this field is required".into()))?;
        let time = data
            .time
            .ok_or_else(|| DomainError::Validation("time: this field is required".into()))?;
        let guests = data
            .guests
            .ok_or_else(|| DomainError::Validation("guests: this field is required".into()))?;
        if guests <= 0 {
            return Err(DomainError::Validation(
                "guests: must be a positive integer".into(),
            ));
        }

        let mut reservation = Reservation::new_pending(
            Some(GuestRef {
                id: identity.user_id.clone(),
                username: identity.username.clone(),
            }),
            date,
            time,
            guests,
        );
        reservation.first_name = data.first_name;
        reservation.last_name = data.last_name;
        reservation.email = data.email;
        reservation.mobile_number = data.mobile_number;
        reservation.special_request = data.special_request.unwrap_or_default();

        match self.repository.insert(reservation).await {
            Ok(saved) => {
                info!(
                    reservation_id = saved.id,
                    guest = %identity.username,
                    "reservation created"
                );
                Ok(saved)
            }
            Err(e) => {
                error!("reservation save failed: {}", e);
                Err(e)
            }
        }
    }

    /// Fetch a single reservation
    pub async fn get(&self, id: i32) -> DomainResult<Reservation> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Reservation",
                field: "id",
                value: id.to_string(),
            })
    }

    /// List reservations in creation order, optionally filtered by status
    pub async fn list(
        &self,
        status: Option<ReservationStatus>,
    ) -> DomainResult<Vec<Reservation>> {
        self.repository.find_all(status).await
    }

    /// Apply a partial update, re-validate, persist, and fire notifications
    /// for any status change.
    pub async fn update(&self, id: i32, data: UpdateReservation) -> DomainResult<Reservation> {
        let previous = self.get(id).await?;
        let mut updated = previous.clone();

        if let Some(status) = data.status.as_deref() {
            updated.status = ReservationStatus::parse(status).ok_or_else(|| {
                DomainError::Validation(format!("status: unknown value '{}'", status))
            })?;
        }
        if data.first_name.is_some() {
            updated.first_name = data.first_name;
        }
        if data.last_name.is_some() {
            updated.last_name = data.last_name;
        }
        if data.email.is_some() {
            updated.email = data.email;
        }
        if data.mobile_number.is_some() {
            updated.mobile_number = data.mobile_number;
        }
        if let Some(date) = data.date {
            updated.date = date;
        }
        if let Some(time) = data.time {
            updated.time = time;
        }
        if let Some(guests) = data.guests {
            updated.guests = guests;
        }
        if let Some(request) = data.special_request {
            updated.special_request = request;
        }
        if data.proposed_date.is_some() {
            updated.proposed_date = data.proposed_date;
        }
        if data.proposed_time.is_some() {
            updated.proposed_time = data.proposed_time;
        }

        if updated.guests <= 0 {
            return Err(DomainError::Validation(
                "guests: must be a positive integer".into(),
            ));
        }

        updated.record_cancellation(Utc::now());
        let saved = self.repository.update(updated).await?;

        self.dispatch(transitions::on_status_change(&previous, &saved))
            .await;
        Ok(saved)
    }

    /// Guest-initiated confirmation of a staff-proposed reschedule.
    ///
    /// Only the owning guest may confirm. Sets `guest_confirmed`, approves
    /// the reservation, and always announces the confirmation regardless of
    /// whether the proposed date/time are still populated.
    pub async fn confirm_reschedule(
        &self,
        id: i32,
        identity: &RequestIdentity,
    ) -> DomainResult<Reservation> {
        let reservation = self.get(id).await?;
        if !reservation.is_owned_by(&identity.user_id) {
            return Err(DomainError::Forbidden(
                "only the reservation owner may confirm a reschedule".into(),
            ));
        }

        let mut updated = reservation;
        updated.guest_confirmed = true;
        updated.status = ReservationStatus::Approved;
        let saved = self.repository.update(updated).await?;

        info!(reservation_id = saved.id, "guest confirmed reschedule");
        self.dispatch(transitions::notifications_for(&saved)).await;
        Ok(saved)
    }

    /// Staff-only aggregation of all reservations into the four status
    /// groups. Read-only.
    pub async fn dashboard(&self, identity: &RequestIdentity) -> DomainResult<DashboardData> {
        if !identity.is_staff {
            return Err(DomainError::Forbidden(
                "dashboard data is restricted to staff".into(),
            ));
        }

        let mut data = DashboardData::default();
        for reservation in self.repository.find_all(None).await? {
            match reservation.status {
                ReservationStatus::Pending => data.pending.push(reservation),
                ReservationStatus::Approved => data.approved.push(reservation),
                ReservationStatus::RescheduleRequested => {
                    data.reschedule_requested.push(reservation)
                }
                ReservationStatus::Cancelled => data.cancelled.push(reservation),
            }
        }
        Ok(data)
    }

    /// Fire-and-forget notification dispatch. The gateway logs its own
    /// delivery problems; nothing here surfaces to the caller.
    async fn dispatch(&self, requests: Vec<NotificationRequest>) {
        if requests.is_empty() {
            return;
        }
        info!(count = requests.len(), "dispatching notifications");
        for request in requests {
            match request {
                NotificationRequest::Email(message) => self.gateway.send_email(&message).await,
                NotificationRequest::WhatsApp(message) => {
                    self.gateway.send_whatsapp(&message).await
                }
            }
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{Duration, NaiveDate, NaiveTime};

    use super::*;
    use crate::infrastructure::storage::memory::MemoryReservationRepository;
    use crate::notifications::{EmailMessage, WhatsAppMessage};

    /// Gateway that records every message instead of delivering it
    #[derive(Default)]
    struct RecordingGateway {
        sent: Mutex<Vec<NotificationRequest>>,
    }

    impl RecordingGateway {
        fn sent(&self) -> Vec<NotificationRequest> {
            self.sent.lock().unwrap().clone()
        }

        fn clear(&self) {
            self.sent.lock().unwrap().clear();
        }
    }

    #[async_trait]
    impl NotificationGateway for RecordingGateway {
        async fn send_email(&self, message: &EmailMessage) {
            self.sent
                .lock()
                .unwrap()
                .push(NotificationRequest::Email(message.clone()));
        }

        async fn send_whatsapp(&self, message: &WhatsAppMessage) {
            self.sent
                .lock()
                .unwrap()
                .push(NotificationRequest::WhatsApp(message.clone()));
        }
    }

    fn service() -> (ReservationService, Arc<RecordingGateway>) {
        let gateway = Arc::new(RecordingGateway::default());
        let service = ReservationService::new(
            Arc::new(MemoryReservationRepository::new()),
            gateway.clone(),
        );
        (service, gateway)
    }

    fn guest() -> RequestIdentity {
        RequestIdentity::new("u-1", "alice", false)
    }

    fn staff() -> RequestIdentity {
        RequestIdentity::new("s-1", "manager", true)
    }

    fn create_data(date: NaiveDate, time: NaiveTime) -> CreateReservation {
        CreateReservation {
            mobile_number: Some("+998901234567".into()),
            email: Some("alice@example.com".into()),
            date: Some(date),
            time: Some(time),
            guests: Some(4),
            ..Default::default()
        }
    }

    /// Reservation scheduled `hours` from the current wall clock
    fn data_hours_ahead(hours: i64) -> CreateReservation {
        let scheduled = Utc::now().naive_utc() + Duration::hours(hours);
        create_data(scheduled.date(), scheduled.time())
    }

    #[tokio::test]
    async fn create_defaults_to_pending_and_links_guest() {
        let (service, _) = service();
        let saved = service.create(data_hours_ahead(48), &guest()).await.unwrap();

        assert_eq!(saved.status, ReservationStatus::Pending);
        assert_eq!(saved.guests, 4);
        assert!(saved.id > 0);
        assert!(saved.is_owned_by("u-1"));
        assert_eq!(saved.guest.as_ref().unwrap().username, "alice");
    }

    #[tokio::test]
    async fn create_requires_date_time_and_guests() {
        let (service, _) = service();

        let mut missing_date = data_hours_ahead(48);
        missing_date.date = None;
        let err = service.create(missing_date, &guest()).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("date")));

        let mut missing_guests = data_hours_ahead(48);
        missing_guests.guests = None;
        let err = service.create(missing_guests, &guest()).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("guests")));
    }

    #[tokio::test]
    async fn create_rejects_nonpositive_party_size() {
        let (service, _) = service();
        let mut data = data_hours_ahead(48);
        data.guests = Some(0);
        let err = service.create(data, &guest()).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn get_unknown_id_is_not_found() {
        let (service, _) = service();
        assert!(matches!(
            service.get(99).await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn list_keeps_creation_order_and_filters() {
        let (service, _) = service();
        let first = service.create(data_hours_ahead(48), &guest()).await.unwrap();
        let second = service.create(data_hours_ahead(72), &guest()).await.unwrap();

        service
            .update(
                second.id,
                UpdateReservation {
                    status: Some("approved".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let all = service.list(None).await.unwrap();
        assert_eq!(
            all.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![first.id, second.id]
        );

        let approved = service
            .list(Some(ReservationStatus::Approved))
            .await
            .unwrap();
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].id, second.id);
    }

    #[tokio::test]
    async fn update_rejects_unknown_status() {
        let (service, _) = service();
        let saved = service.create(data_hours_ahead(48), &guest()).await.unwrap();

        let err = service
            .update(
                saved.id,
                UpdateReservation {
                    status: Some("no_show".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("no_show")));
    }

    #[tokio::test]
    async fn late_cancellation_sets_fee_and_timestamp_once() {
        let (service, gateway) = service();
        // Scheduled 2h out: inside the 24h fee window
        let saved = service.create(data_hours_ahead(2), &guest()).await.unwrap();

        let cancelled = service
            .update(
                saved.id,
                UpdateReservation {
                    status: Some("cancelled".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(cancelled.cancellation_fee_due);
        let stamped = cancelled.cancelled_at.expect("cancelled_at set");
        assert_eq!(gateway.sent().len(), 1); // cancellation whatsapp

        // Re-saving the already-cancelled record must not touch either field
        let resaved = service
            .update(
                saved.id,
                UpdateReservation {
                    special_request: Some("window table".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(resaved.cancelled_at, Some(stamped));
        assert!(resaved.cancellation_fee_due);
    }

    #[tokio::test]
    async fn early_cancellation_has_no_fee() {
        let (service, _) = service();
        let saved = service.create(data_hours_ahead(72), &guest()).await.unwrap();

        let cancelled = service
            .update(
                saved.id,
                UpdateReservation {
                    status: Some("cancelled".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(!cancelled.cancellation_fee_due);
        assert!(cancelled.cancelled_at.is_some());
    }

    #[tokio::test]
    async fn approval_dispatches_email_and_whatsapp() {
        let (service, gateway) = service();
        let saved = service.create(data_hours_ahead(48), &guest()).await.unwrap();

        service
            .update(
                saved.id,
                UpdateReservation {
                    status: Some("approved".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let sent = gateway.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent.iter().filter(|r| r.is_email()).count(), 1);
        assert_eq!(sent.iter().filter(|r| r.is_whatsapp()).count(), 1);
    }

    #[tokio::test]
    async fn reschedule_without_proposal_is_silent() {
        let (service, gateway) = service();
        let saved = service.create(data_hours_ahead(48), &guest()).await.unwrap();

        service
            .update(
                saved.id,
                UpdateReservation {
                    status: Some("reschedule_requested".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(gateway.sent().is_empty());
    }

    #[tokio::test]
    async fn confirm_reschedule_by_owner() {
        let (service, gateway) = service();
        let saved = service.create(data_hours_ahead(48), &guest()).await.unwrap();

        service
            .update(
                saved.id,
                UpdateReservation {
                    status: Some("reschedule_requested".into()),
                    proposed_date: NaiveDate::from_ymd_opt(2025, 6, 18),
                    proposed_time: NaiveTime::from_hms_opt(20, 0, 0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        gateway.clear();

        let confirmed = service.confirm_reschedule(saved.id, &guest()).await.unwrap();
        assert_eq!(confirmed.status, ReservationStatus::Approved);
        assert!(confirmed.guest_confirmed);

        let sent = gateway.sent();
        let whatsapp: Vec<_> = sent
            .iter()
            .filter_map(|r| match r {
                NotificationRequest::WhatsApp(wa) => Some(wa),
                _ => None,
            })
            .collect();
        assert_eq!(whatsapp.len(), 1);
        assert!(whatsapp[0].body.contains("thanks for confirming"));
    }

    #[tokio::test]
    async fn confirm_reschedule_by_non_owner_is_forbidden() {
        let (service, gateway) = service();
        let saved = service.create(data_hours_ahead(48), &guest()).await.unwrap();
        gateway.clear();

        let intruder = RequestIdentity::new("u-2", "mallory", false);
        let err = service
            .confirm_reschedule(saved.id, &intruder)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
        assert!(gateway.sent().is_empty());

        // Record untouched
        let reloaded = service.get(saved.id).await.unwrap();
        assert_eq!(reloaded.status, ReservationStatus::Pending);
        assert!(!reloaded.guest_confirmed);
    }

    #[tokio::test]
    async fn dashboard_groups_by_status() {
        let (service, _) = service();
        for status in ["pending", "approved", "approved", "cancelled"] {
            let saved = service.create(data_hours_ahead(48), &guest()).await.unwrap();
            if status != "pending" {
                service
                    .update(
                        saved.id,
                        UpdateReservation {
                            status: Some(status.into()),
                            ..Default::default()
                        },
                    )
                    .await
                    .unwrap();
            }
        }

        let data = service.dashboard(&staff()).await.unwrap();
        assert_eq!(data.pending.len(), 1);
        assert_eq!(data.approved.len(), 2);
        assert_eq!(data.reschedule_requested.len(), 0);
        assert_eq!(data.cancelled.len(), 1);
    }

    #[tokio::test]
    async fn dashboard_is_staff_only() {
        let (service, _) = service();
        let err = service.dashboard(&guest()).await.unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }
}
