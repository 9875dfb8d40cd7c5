//! Reservation domain entity

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Reservation status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationStatus {
    /// Submitted by a guest, awaiting staff action
    Pending,
    /// Approved by staff (or confirmed by the guest after a reschedule)
    Approved,
    /// Cancelled by staff or guest
    Cancelled,
    /// Staff proposed an alternate date/time, awaiting guest confirmation
    RescheduleRequested,
}

impl ReservationStatus {
    pub const ALL: [ReservationStatus; 4] = [
        Self::Pending,
        Self::Approved,
        Self::Cancelled,
        Self::RescheduleRequested,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Cancelled => "cancelled",
            Self::RescheduleRequested => "reschedule_requested",
        }
    }

    /// Parse a status string, case-insensitively. Unknown values are
    /// rejected rather than coerced so invalid client input surfaces as a
    /// validation error.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "cancelled" => Some(Self::Cancelled),
            "reschedule_requested" => Some(Self::RescheduleRequested),
            _ => None,
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Link to the guest identity that owns a reservation.
///
/// `username` is denormalized from the identity provider at creation time
/// and serialized as the read-only `guest_name` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestRef {
    pub id: String,
    pub username: String,
}

/// A guest's request for a table at a date/time with a party size
#[derive(Debug, Clone)]
pub struct Reservation {
    /// Unique reservation ID
    pub id: i32,
    /// Owning guest identity, if the record is guest-linked
    pub guest: Option<GuestRef>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    /// Internationally formatted phone number (leading `+`) for WhatsApp
    pub mobile_number: Option<String>,
    /// Scheduled date
    pub date: NaiveDate,
    /// Scheduled time
    pub time: NaiveTime,
    /// Party size (> 0)
    pub guests: i32,
    pub special_request: String,
    /// Current status
    pub status: ReservationStatus,
    /// Staff-proposed alternate date, set while a reschedule is pending
    pub proposed_date: Option<NaiveDate>,
    /// Staff-proposed alternate time, set while a reschedule is pending
    pub proposed_time: Option<NaiveTime>,
    /// Guest accepted a staff-proposed reschedule
    pub guest_confirmed: bool,
    /// Late cancellation (within 24h of the scheduled instant)
    pub cancellation_fee_due: bool,
    /// Set exactly once, at the first transition to cancelled
    pub cancelled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    /// Create a new pending reservation. Status is forced to `pending`
    /// regardless of what the caller asked for.
    pub fn new_pending(
        guest: Option<GuestRef>,
        date: NaiveDate,
        time: NaiveTime,
        guests: i32,
    ) -> Self {
        Self {
            id: 0,
            guest,
            first_name: None,
            last_name: None,
            email: None,
            mobile_number: None,
            date,
            time,
            guests,
            special_request: String::new(),
            status: ReservationStatus::Pending,
            proposed_date: None,
            proposed_time: None,
            guest_confirmed: false,
            cancellation_fee_due: false,
            cancelled_at: None,
            created_at: Utc::now(),
        }
    }

    /// The scheduled instant, `combine(date, time)` in the service
    /// reference timezone (UTC).
    pub fn scheduled_instant(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// Whether `user_id` is the owning guest
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.guest.as_ref().is_some_and(|g| g.id == user_id)
    }

    /// Display name for notification messages: contact name first, then the
    /// linked identity's username, then a generic fallback.
    pub fn guest_display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.clone(),
            (None, Some(last)) => last.clone(),
            (None, None) => self
                .guest
                .as_ref()
                .map(|g| g.username.clone())
                .unwrap_or_else(|| "Guest".to_string()),
        }
    }

    /// WhatsApp recipient, present only when `mobile_number` is set and
    /// internationally formatted (leading `+`).
    pub fn whatsapp_recipient(&self) -> Option<&str> {
        self.mobile_number
            .as_deref()
            .filter(|m| m.starts_with('+') && m.len() > 1)
    }

    /// Save-time cancellation bookkeeping.
    ///
    /// On the first save where status is `cancelled`, stamps `cancelled_at`
    /// and evaluates the 24-hour fee rule: the fee is due when the scheduled
    /// instant is less than 24 hours away (or already past) at the moment of
    /// cancellation. Idempotent — re-saving an already-cancelled record
    /// neither overwrites `cancelled_at` nor re-runs the fee computation.
    pub fn record_cancellation(&mut self, now: DateTime<Utc>) {
        if self.status != ReservationStatus::Cancelled || self.cancelled_at.is_some() {
            return;
        }
        self.cancelled_at = Some(now);
        self.cancellation_fee_due =
            self.scheduled_instant() - now.naive_utc() < Duration::hours(24);
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_reservation() -> Reservation {
        let mut r = Reservation::new_pending(
            Some(GuestRef {
                id: "u-1".into(),
                username: "alice".into(),
            }),
            NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
            NaiveTime::from_hms_opt(19, 30, 0).unwrap(),
            4,
        );
        r.id = 1;
        r
    }

    fn instant(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn new_reservation_is_pending() {
        let r = sample_reservation();
        assert_eq!(r.status, ReservationStatus::Pending);
        assert!(!r.guest_confirmed);
        assert!(!r.cancellation_fee_due);
        assert!(r.cancelled_at.is_none());
    }

    #[test]
    fn status_parse_roundtrip() {
        for status in ReservationStatus::ALL {
            assert_eq!(ReservationStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn status_parse_is_case_insensitive() {
        assert_eq!(
            ReservationStatus::parse("Approved"),
            Some(ReservationStatus::Approved)
        );
        assert_eq!(
            ReservationStatus::parse("RESCHEDULE_REQUESTED"),
            Some(ReservationStatus::RescheduleRequested)
        );
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert_eq!(ReservationStatus::parse("no_show"), None);
        assert_eq!(ReservationStatus::parse(""), None);
    }

    #[test]
    fn scheduled_instant_combines_date_and_time() {
        let r = sample_reservation();
        assert_eq!(
            r.scheduled_instant(),
            NaiveDate::from_ymd_opt(2025, 6, 15)
                .unwrap()
                .and_hms_opt(19, 30, 0)
                .unwrap()
        );
    }

    #[test]
    fn late_cancellation_incurs_fee() {
        // 19:30 reservation cancelled the same morning
        let mut r = sample_reservation();
        r.status = ReservationStatus::Cancelled;
        r.record_cancellation(instant(2025, 6, 15, 9, 0));
        assert!(r.cancellation_fee_due);
        assert_eq!(r.cancelled_at, Some(instant(2025, 6, 15, 9, 0)));
    }

    #[test]
    fn early_cancellation_has_no_fee() {
        // cancelled three days ahead
        let mut r = sample_reservation();
        r.status = ReservationStatus::Cancelled;
        r.record_cancellation(instant(2025, 6, 12, 19, 30));
        assert!(!r.cancellation_fee_due);
        assert!(r.cancelled_at.is_some());
    }

    #[test]
    fn exactly_24h_ahead_has_no_fee() {
        let mut r = sample_reservation();
        r.status = ReservationStatus::Cancelled;
        r.record_cancellation(instant(2025, 6, 14, 19, 30));
        assert!(!r.cancellation_fee_due);
    }

    #[test]
    fn cancelling_past_reservation_incurs_fee() {
        let mut r = sample_reservation();
        r.status = ReservationStatus::Cancelled;
        r.record_cancellation(instant(2025, 6, 20, 12, 0));
        assert!(r.cancellation_fee_due);
    }

    #[test]
    fn cancellation_bookkeeping_runs_once() {
        let mut r = sample_reservation();
        r.status = ReservationStatus::Cancelled;
        let first = instant(2025, 6, 12, 10, 0);
        r.record_cancellation(first);
        assert!(!r.cancellation_fee_due);

        // Second save while already cancelled, now inside the fee window —
        // must not restamp or recompute.
        r.record_cancellation(instant(2025, 6, 15, 12, 0));
        assert_eq!(r.cancelled_at, Some(first));
        assert!(!r.cancellation_fee_due);
    }

    #[test]
    fn bookkeeping_is_noop_unless_cancelled() {
        let mut r = sample_reservation();
        r.record_cancellation(instant(2025, 6, 15, 12, 0));
        assert!(r.cancelled_at.is_none());
        assert!(!r.cancellation_fee_due);
    }

    #[test]
    fn ownership_check() {
        let r = sample_reservation();
        assert!(r.is_owned_by("u-1"));
        assert!(!r.is_owned_by("u-2"));

        let mut anon = sample_reservation();
        anon.guest = None;
        assert!(!anon.is_owned_by("u-1"));
    }

    #[test]
    fn whatsapp_recipient_requires_plus_prefix() {
        let mut r = sample_reservation();
        assert_eq!(r.whatsapp_recipient(), None);

        r.mobile_number = Some("998901234567".into());
        assert_eq!(r.whatsapp_recipient(), None);

        r.mobile_number = Some("+998901234567".into());
        assert_eq!(r.whatsapp_recipient(), Some("+998901234567"));
    }

    #[test]
    fn display_name_prefers_contact_fields() {
        let mut r = sample_reservation();
        r.first_name = Some("Bob".into());
        r.last_name = Some("Smith".into());
        assert_eq!(r.guest_display_name(), "Bob Smith");

        r.last_name = None;
        assert_eq!(r.guest_display_name(), "Bob");

        r.first_name = None;
        assert_eq!(r.guest_display_name(), "alice");

        r.guest = None;
        assert_eq!(r.guest_display_name(), "Guest");
    }
}
