//! Status transition processor
//!
//! Derives notification intents from reservation status changes. Sits
//! beside persistence (not inside it) so the rules are testable without any
//! I/O: the functions here are pure except for diagnostics logging, and the
//! caller dispatches the returned [`NotificationRequest`]s through a
//! gateway after the save has been persisted.

use tracing::debug;

use crate::domain::{Reservation, ReservationStatus};
use crate::notifications::{EmailMessage, NotificationRequest, WhatsAppMessage};

/// Notifications for an update that changed `status`.
///
/// Rules are evaluated on the new status only; the previous state is used
/// purely to detect that a transition happened at all.
pub fn on_status_change(previous: &Reservation, updated: &Reservation) -> Vec<NotificationRequest> {
    if previous.status == updated.status {
        return Vec::new();
    }
    notifications_for(updated)
}

/// Notifications for a reservation in its current state.
///
/// Used directly by the guest confirm-reschedule entry point, which always
/// announces the confirmation even when the stored status did not change.
pub fn notifications_for(reservation: &Reservation) -> Vec<NotificationRequest> {
    let mut requests = Vec::new();

    match reservation.status {
        ReservationStatus::Pending => {}
        ReservationStatus::Approved => {
            if let Some(email) = reservation.email.as_deref() {
                requests.push(NotificationRequest::Email(confirmation_email(
                    reservation,
                    email,
                )));
            }
            let body = if reservation.guest_confirmed {
                confirmed_after_reschedule_text(reservation)
            } else {
                reservation_confirmed_text(reservation)
            };
            push_whatsapp(&mut requests, reservation, body);
        }
        ReservationStatus::RescheduleRequested => {
            if let (Some(date), Some(time)) = (reservation.proposed_date, reservation.proposed_time)
            {
                let body = format!(
                    "Hi {}, we would like to move your reservation to {} at {}. \
                     Please confirm if the new time works for you.",
                    reservation.guest_display_name(),
                    date.format("%Y-%m-%d"),
                    time.format("%H:%M"),
                );
                push_whatsapp(&mut requests, reservation, body);
            } else {
                debug!(
                    reservation_id = reservation.id,
                    "reschedule requested without proposed date/time, nothing to announce"
                );
            }
        }
        ReservationStatus::Cancelled => {
            let body = format!(
                "Hi {}, your reservation for {} at {} has been cancelled.",
                reservation.guest_display_name(),
                reservation.date.format("%Y-%m-%d"),
                reservation.time.format("%H:%M"),
            );
            push_whatsapp(&mut requests, reservation, body);
        }
    }

    requests
}

/// Append a WhatsApp request if the reservation has a usable recipient.
/// A missing or non-international mobile number is a logged no-op.
fn push_whatsapp(requests: &mut Vec<NotificationRequest>, reservation: &Reservation, body: String) {
    match reservation.whatsapp_recipient() {
        Some(to) => requests.push(NotificationRequest::WhatsApp(WhatsAppMessage {
            to: to.to_string(),
            body,
        })),
        None => debug!(
            reservation_id = reservation.id,
            mobile = ?reservation.mobile_number,
            "skipping whatsapp notification: no internationally formatted mobile number"
        ),
    }
}

fn confirmation_email(reservation: &Reservation, to: &str) -> EmailMessage {
    EmailMessage {
        to: to.to_string(),
        subject: "Your reservation is confirmed".to_string(),
        body: format!(
            "Dear {},\n\nYour reservation for {} at {} has been confirmed. \
             We look forward to welcoming you.\n",
            reservation.guest_display_name(),
            reservation.date.format("%Y-%m-%d"),
            reservation.time.format("%H:%M"),
        ),
    }
}

fn confirmed_after_reschedule_text(reservation: &Reservation) -> String {
    format!(
        "Hi {}, thanks for confirming the new time. Your reservation is booked for {} at {}.",
        reservation.guest_display_name(),
        reservation.date.format("%Y-%m-%d"),
        reservation.time.format("%H:%M"),
    )
}

fn reservation_confirmed_text(reservation: &Reservation) -> String {
    format!(
        "Hi {}, your reservation for {} at {} has been confirmed.",
        reservation.guest_display_name(),
        reservation.date.format("%Y-%m-%d"),
        reservation.time.format("%H:%M"),
    )
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GuestRef;
    use chrono::{NaiveDate, NaiveTime};

    fn reservation(status: ReservationStatus) -> Reservation {
        let mut r = Reservation::new_pending(
            Some(GuestRef {
                id: "u-1".into(),
                username: "alice".into(),
            }),
            NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
            NaiveTime::from_hms_opt(19, 30, 0).unwrap(),
            2,
        );
        r.id = 7;
        r.email = Some("alice@example.com".into());
        r.mobile_number = Some("+998901234567".into());
        r.status = status;
        r
    }

    #[test]
    fn approval_sends_email_and_whatsapp() {
        let r = reservation(ReservationStatus::Approved);
        let requests = notifications_for(&r);
        assert_eq!(requests.len(), 2);
        assert!(requests[0].is_email());
        assert!(requests[1].is_whatsapp());

        let NotificationRequest::WhatsApp(wa) = &requests[1] else {
            unreachable!()
        };
        assert!(wa.body.contains("has been confirmed"));
        assert!(wa.body.contains("2025-06-15"));
        assert!(wa.body.contains("19:30"));
    }

    #[test]
    fn guest_confirmed_approval_uses_reschedule_wording() {
        let mut r = reservation(ReservationStatus::Approved);
        r.guest_confirmed = true;
        let requests = notifications_for(&r);

        let wa = requests
            .iter()
            .find_map(|req| match req {
                NotificationRequest::WhatsApp(wa) => Some(wa),
                _ => None,
            })
            .expect("whatsapp request");
        assert!(wa.body.contains("thanks for confirming"));
    }

    #[test]
    fn approval_without_email_sends_only_whatsapp() {
        let mut r = reservation(ReservationStatus::Approved);
        r.email = None;
        let requests = notifications_for(&r);
        assert_eq!(requests.len(), 1);
        assert!(requests[0].is_whatsapp());
    }

    #[test]
    fn missing_mobile_skips_whatsapp() {
        let mut r = reservation(ReservationStatus::Approved);
        r.mobile_number = None;
        let requests = notifications_for(&r);
        assert_eq!(requests.len(), 1);
        assert!(requests[0].is_email());
    }

    #[test]
    fn non_international_mobile_skips_whatsapp() {
        let mut r = reservation(ReservationStatus::Cancelled);
        r.mobile_number = Some("901234567".into());
        assert!(notifications_for(&r).is_empty());
    }

    #[test]
    fn reschedule_proposal_announces_proposed_slot() {
        let mut r = reservation(ReservationStatus::RescheduleRequested);
        r.proposed_date = NaiveDate::from_ymd_opt(2025, 6, 18);
        r.proposed_time = NaiveTime::from_hms_opt(20, 0, 0);
        let requests = notifications_for(&r);
        assert_eq!(requests.len(), 1);

        let NotificationRequest::WhatsApp(wa) = &requests[0] else {
            unreachable!()
        };
        assert!(wa.body.contains("2025-06-18"));
        assert!(wa.body.contains("20:00"));
        assert_eq!(wa.to, "+998901234567");
    }

    #[test]
    fn reschedule_without_proposed_slot_is_silent() {
        let r = reservation(ReservationStatus::RescheduleRequested);
        assert!(notifications_for(&r).is_empty());

        let mut half = reservation(ReservationStatus::RescheduleRequested);
        half.proposed_date = NaiveDate::from_ymd_opt(2025, 6, 18);
        assert!(notifications_for(&half).is_empty());
    }

    #[test]
    fn cancellation_sends_whatsapp_notice() {
        let r = reservation(ReservationStatus::Cancelled);
        let requests = notifications_for(&r);
        assert_eq!(requests.len(), 1);

        let NotificationRequest::WhatsApp(wa) = &requests[0] else {
            unreachable!()
        };
        assert!(wa.body.contains("cancelled"));
    }

    #[test]
    fn pending_is_silent() {
        let r = reservation(ReservationStatus::Pending);
        assert!(notifications_for(&r).is_empty());
    }

    #[test]
    fn unchanged_status_produces_nothing() {
        let previous = reservation(ReservationStatus::Approved);
        let updated = reservation(ReservationStatus::Approved);
        assert!(on_status_change(&previous, &updated).is_empty());
    }

    #[test]
    fn status_change_fires_rules_for_new_status() {
        let previous = reservation(ReservationStatus::Pending);
        let updated = reservation(ReservationStatus::Cancelled);
        let requests = on_status_change(&previous, &updated);
        assert_eq!(requests.len(), 1);
        assert!(requests[0].is_whatsapp());
    }
}
