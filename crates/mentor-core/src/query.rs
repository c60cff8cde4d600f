//! Query rules - how a user's appointments split into upcoming and past
//!
//! Upcoming: starts at or after now, neither cancelled nor completed, earliest first.
//! Past: started before now, or completed regardless of date, latest first.
//! A completed appointment dated in the future therefore lists as past.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::entities::Appointment;
use crate::value_objects::{AppointmentStatus, Role, UserId};

/// Dashboard counters for one user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AppointmentStats {
    pub upcoming: usize,
    pub pending: usize,
    pub completed: usize,
    /// Distinct mentors (for a student) or students (for a mentor)
    pub counterparts: usize,
}

/// Appointments where `user_id` plays `role`
pub fn for_user(appointments: Vec<Appointment>, user_id: UserId, role: Role) -> Vec<Appointment> {
    appointments
        .into_iter()
        .filter(|a| role.party_of(a) == user_id)
        .collect()
}

pub fn is_upcoming(appointment: &Appointment, now: NaiveDateTime) -> bool {
    !is_past(appointment, now) && appointment.status != AppointmentStatus::Cancelled
}

pub fn is_past(appointment: &Appointment, now: NaiveDateTime) -> bool {
    appointment.slot.is_past(now) || appointment.status == AppointmentStatus::Completed
}

/// Upcoming appointments, ascending by slot
pub fn upcoming(appointments: Vec<Appointment>, now: NaiveDateTime) -> Vec<Appointment> {
    let mut out: Vec<_> = appointments
        .into_iter()
        .filter(|a| is_upcoming(a, now))
        .collect();
    out.sort_by_key(|a| a.slot);
    out
}

/// Past appointments, descending by slot
pub fn past(appointments: Vec<Appointment>, now: NaiveDateTime) -> Vec<Appointment> {
    let mut out: Vec<_> = appointments
        .into_iter()
        .filter(|a| is_past(a, now))
        .collect();
    out.sort_by(|a, b| b.slot.cmp(&a.slot));
    out
}

/// Counters over one user's appointments
pub fn stats(appointments: &[Appointment], role: Role, now: NaiveDateTime) -> AppointmentStats {
    let counterparts: HashSet<UserId> = appointments.iter().map(|a| role.counterpart_of(a)).collect();
    AppointmentStats {
        upcoming: appointments.iter().filter(|a| is_upcoming(a, now)).count(),
        pending: appointments
            .iter()
            .filter(|a| a.status == AppointmentStatus::Pending)
            .count(),
        completed: appointments
            .iter()
            .filter(|a| a.status == AppointmentStatus::Completed)
            .count(),
        counterparts: counterparts.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::BookingDraft;
    use crate::value_objects::{AppointmentId, Meeting, Slot};
    use chrono::Utc;

    fn at(date: &str, time: &str, student: UserId, mentor: UserId) -> Appointment {
        let draft = BookingDraft {
            student_id: student,
            mentor_id: mentor,
            slot: Slot::parse(date, time).unwrap(),
            appointment_type: "Mock interview".to_string(),
            meeting: Meeting::virtual_link("https://meet.example/q"),
            notes: None,
        };
        Appointment::from_draft(AppointmentId::new_v4(), draft, 60, Utc::now())
    }

    fn now() -> NaiveDateTime {
        Slot::parse("2025-06-10", "12:00").unwrap().instant()
    }

    #[test]
    fn test_for_user_filters_by_role() {
        let s = UserId::new_v4();
        let m = UserId::new_v4();
        let all = vec![at("2025-06-11", "10:00", s, m), at("2025-06-11", "11:00", m, s)];

        let as_student = for_user(all.clone(), s, Role::Student);
        assert_eq!(as_student.len(), 1);
        assert_eq!(as_student[0].student_id, s);
        assert_eq!(for_user(all, m, Role::Mentor).len(), 1);
    }

    #[test]
    fn test_upcoming_and_past_ordering() {
        let s = UserId::new_v4();
        let m = UserId::new_v4();
        let all = vec![
            at("2025-06-12", "09:00", s, m),
            at("2025-06-08", "10:00", s, m),
            at("2025-06-11", "15:00", s, m),
            at("2025-06-09", "16:00", s, m),
            at("2025-06-10", "12:00", s, m),
        ];

        let up = upcoming(all.clone(), now());
        assert_eq!(up.len(), 3);
        assert!(up.windows(2).all(|w| w[0].slot <= w[1].slot));
        assert_eq!(up[0].slot, Slot::parse("2025-06-10", "12:00").unwrap());

        let gone = past(all, now());
        assert_eq!(gone.len(), 2);
        assert!(gone.windows(2).all(|w| w[0].slot >= w[1].slot));
    }

    #[test]
    fn test_cancelled_future_is_neither() {
        let mut a = at("2025-06-12", "09:00", UserId::new_v4(), UserId::new_v4());
        a.cancel(a.student_id, Utc::now()).unwrap();
        assert!(!is_upcoming(&a, now()));
        assert!(!is_past(&a, now()));
    }

    #[test]
    fn test_completed_future_is_past() {
        let mut a = at("2025-06-20", "09:00", UserId::new_v4(), UserId::new_v4());
        a.status = AppointmentStatus::Completed;
        assert!(is_past(&a, now()));
        assert!(!is_upcoming(&a, now()));
        assert_eq!(past(vec![a], now()).len(), 1);
    }

    #[test]
    fn test_stats() {
        let s = UserId::new_v4();
        let m1 = UserId::new_v4();
        let m2 = UserId::new_v4();
        let mut done = at("2025-06-01", "10:00", s, m1);
        done.status = AppointmentStatus::Completed;
        let all = vec![done, at("2025-06-11", "10:00", s, m1), at("2025-06-12", "10:00", s, m2)];

        let st = stats(&all, Role::Student, now());
        assert_eq!(
            st,
            AppointmentStats {
                upcoming: 2,
                pending: 2,
                completed: 1,
                counterparts: 2,
            }
        );
    }
}
