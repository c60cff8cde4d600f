//! In-memory implementation of AppointmentRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;

use mentor_core::entities::Appointment;
use mentor_core::error::DomainError;
use mentor_core::traits::{AppointmentRepository, RepoResult};
use mentor_core::value_objects::{AppointmentId, AppointmentStatus, Role, UserId};

/// Appointment store backed by a vector behind one lock
///
/// Insertion order is kept so listings are stable for equal slots.
#[derive(Debug, Default)]
pub struct MemoryAppointmentRepository {
    appointments: RwLock<Vec<Appointment>>,
}

impl MemoryAppointmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an appointment as-is, bypassing the slot check
    ///
    /// For fixtures that need states the lifecycle cannot reach directly.
    pub fn insert_unchecked(&self, appointment: Appointment) {
        self.appointments.write().push(appointment);
    }

    pub fn len(&self) -> usize {
        self.appointments.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.read().is_empty()
    }

    fn collect(&self, pred: impl Fn(&Appointment) -> bool) -> Vec<Appointment> {
        let mut out: Vec<_> = self
            .appointments
            .read()
            .iter()
            .filter(|a| pred(a))
            .cloned()
            .collect();
        out.sort_by_key(|a| a.slot);
        out
    }
}

#[async_trait]
impl AppointmentRepository for MemoryAppointmentRepository {
    async fn find_by_id(&self, id: AppointmentId) -> RepoResult<Option<Appointment>> {
        Ok(self.appointments.read().iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_user(&self, user_id: UserId, role: Role) -> RepoResult<Vec<Appointment>> {
        Ok(self.collect(|a| role.party_of(a) == user_id))
    }

    async fn find_by_mentor_date(
        &self,
        mentor_id: UserId,
        date: NaiveDate,
    ) -> RepoResult<Vec<Appointment>> {
        Ok(self.collect(|a| a.mentor_id == mentor_id && a.slot.date == date))
    }

    async fn insert_if_slot_free(&self, appointment: &Appointment) -> RepoResult<()> {
        let mut appointments = self.appointments.write();
        if appointments
            .iter()
            .any(|a| a.occupies(appointment.mentor_id, appointment.slot))
        {
            return Err(DomainError::SlotConflict {
                mentor_id: appointment.mentor_id,
                slot: appointment.slot,
                reason: "already booked",
            });
        }
        if appointments.iter().any(|a| a.id == appointment.id) {
            return Err(DomainError::InternalError(format!(
                "duplicate appointment id {}",
                appointment.id
            )));
        }
        appointments.push(appointment.clone());
        Ok(())
    }

    async fn update_status(
        &self,
        appointment: &Appointment,
        previous: AppointmentStatus,
    ) -> RepoResult<()> {
        let mut appointments = self.appointments.write();
        let stored = appointments
            .iter_mut()
            .find(|a| a.id == appointment.id)
            .ok_or(DomainError::AppointmentNotFound(appointment.id))?;

        if stored.status != previous {
            return Err(DomainError::ConcurrentUpdate(appointment.id));
        }
        stored.status = appointment.status;
        stored.updated_at = stored.updated_at.max(appointment.updated_at);
        Ok(())
    }

    async fn delete(&self, id: AppointmentId) -> RepoResult<bool> {
        let mut appointments = self.appointments.write();
        let before = appointments.len();
        appointments.retain(|a| a.id != id);
        Ok(appointments.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mentor_core::entities::BookingDraft;
    use mentor_core::value_objects::{Meeting, Slot};

    fn appointment(mentor_id: UserId, time: &str) -> Appointment {
        let draft = BookingDraft {
            student_id: UserId::new_v4(),
            mentor_id,
            slot: Slot::parse("2025-06-02", time).unwrap(),
            appointment_type: "Study plan".to_string(),
            meeting: Meeting::virtual_link("https://meet.example/m"),
            notes: None,
        };
        Appointment::from_draft(AppointmentId::new_v4(), draft, 60, Utc::now())
    }

    #[tokio::test]
    async fn test_insert_rejects_occupied_slot() {
        let repo = MemoryAppointmentRepository::new();
        let mentor = UserId::new_v4();
        repo.insert_if_slot_free(&appointment(mentor, "10:00")).await.unwrap();

        let err = repo
            .insert_if_slot_free(&appointment(mentor, "10:00"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::SlotConflict { .. }));

        repo.insert_if_slot_free(&appointment(UserId::new_v4(), "10:00"))
            .await
            .unwrap();
        assert_eq!(repo.len(), 2);
    }

    #[tokio::test]
    async fn test_cancelled_appointment_frees_slot() {
        let repo = MemoryAppointmentRepository::new();
        let mentor = UserId::new_v4();
        let mut first = appointment(mentor, "10:00");
        repo.insert_if_slot_free(&first).await.unwrap();

        let previous = first.cancel(first.student_id, Utc::now()).unwrap();
        repo.update_status(&first, previous).await.unwrap();

        let day = repo.find_by_mentor_date(mentor, first.slot.date).await.unwrap();
        assert!(!day.iter().any(|a| a.occupies(mentor, first.slot)));
        repo.insert_if_slot_free(&appointment(mentor, "10:00")).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_status_is_compare_and_set() {
        let repo = MemoryAppointmentRepository::new();
        let mut a = appointment(UserId::new_v4(), "11:00");
        repo.insert_if_slot_free(&a).await.unwrap();

        a.confirm(a.mentor_id, Utc::now()).unwrap();
        let err = repo
            .update_status(&a, AppointmentStatus::Confirmed)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ConcurrentUpdate(_)));

        repo.update_status(&a, AppointmentStatus::Pending).await.unwrap();
        let stored = repo.find_by_id(a.id).await.unwrap().unwrap();
        assert_eq!(stored.status, AppointmentStatus::Confirmed);
    }

    #[tokio::test]
    async fn test_find_by_user_and_delete() {
        let repo = MemoryAppointmentRepository::new();
        let mentor = UserId::new_v4();
        let late = appointment(mentor, "15:00");
        let early = appointment(mentor, "09:00");
        repo.insert_if_slot_free(&late).await.unwrap();
        repo.insert_if_slot_free(&early).await.unwrap();

        let found = repo.find_by_user(mentor, Role::Mentor).await.unwrap();
        assert_eq!(found.iter().map(|a| a.id).collect::<Vec<_>>(), vec![early.id, late.id]);
        assert_eq!(repo.find_by_user(early.student_id, Role::Student).await.unwrap().len(), 1);

        assert!(repo.delete(early.id).await.unwrap());
        assert!(!repo.delete(early.id).await.unwrap());
        assert_eq!(repo.len(), 1);
    }
}
