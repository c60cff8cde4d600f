//! API Integration Tests
//!
//! Each test spawns the real router on an ephemeral port with in-memory
//! storage, the demo cast of users and freshly generated availability.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_error, assert_json, assert_status, fixtures::*, TestServer,
};
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn server() -> TestServer {
    TestServer::start().await.expect("Failed to start server")
}

async fn first_slot(server: &TestServer, mentor: mentor_core::UserId) -> SlotBody {
    let response = server
        .get(&format!("/api/v1/mentors/{mentor}/availability"))
        .await
        .expect("Request failed");
    let availability: AvailabilityBody = assert_json(response, StatusCode::OK).await.unwrap();
    availability
        .slots
        .into_iter()
        .next()
        .expect("Seeded mentor has availability")
}

async fn book(server: &TestServer, request: &BookingRequest, student: mentor_core::UserId) -> reqwest::Response {
    server
        .post_as("/api/v1/appointments", Some(student), request)
        .await
        .expect("Request failed")
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = server().await;
    let response = server.get("/health").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_health_ready() {
    let server = server().await;
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["backend"], "memory");
}

// ============================================================================
// Mentor Directory Tests
// ============================================================================

#[tokio::test]
async fn test_list_mentors_filters_by_specialty() {
    let server = server().await;

    let response = server.get("/api/v1/mentors").await.expect("Request failed");
    let all: Vec<MentorBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(all.len(), 5);

    let response = server
        .get("/api/v1/mentors?specialty=career%20advice")
        .await
        .expect("Request failed");
    let career: Vec<MentorBody> = assert_json(response, StatusCode::OK).await.unwrap();
    let names: Vec<_> = career.iter().map(|m| m.full_name.as_str()).collect();
    assert_eq!(names, vec!["Michael Chen", "James Rodriguez"]);
    assert!(career
        .iter()
        .all(|m| m.specialty.iter().any(|s| s == "Career Advice")));
}

#[tokio::test]
async fn test_get_mentor_errors() {
    let server = server().await;

    let response = server
        .get(&format!("/api/v1/mentors/{}", server.cast.mentor(0)))
        .await
        .expect("Request failed");
    let mentor: MentorBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(mentor.full_name, "Sarah Johnson");

    let response = server
        .get("/api/v1/mentors/00000000-0000-4000-8000-000000000000")
        .await
        .expect("Request failed");
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_USER");

    let response = server
        .get("/api/v1/mentors/not-a-uuid")
        .await
        .expect("Request failed");
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_PATH_PARAMETER");

    let response = server
        .get(&format!("/api/v1/mentors/{}", server.cast.student(0)))
        .await
        .expect("Request failed");
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "NOT_A_MENTOR");
}

#[tokio::test]
async fn test_availability_and_slot_board() {
    let server = server().await;
    let mentor = server.cast.mentor(2);

    let response = server
        .get(&format!("/api/v1/mentors/{mentor}/availability"))
        .await
        .expect("Request failed");
    let availability: AvailabilityBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(availability.mentor_id, mentor.to_string());
    assert!(!availability.slots.is_empty());
    assert!(availability.slots.iter().all(|s| s.duration_minutes == 60));

    let day = availability.slots[0].date.clone();
    let response = server
        .get(&format!("/api/v1/mentors/{mentor}/slots?date={day}"))
        .await
        .expect("Request failed");
    let board: Vec<SlotViewBody> = assert_json(response, StatusCode::OK).await.unwrap();
    let offered = availability.slots.iter().filter(|s| s.date == day).count();
    assert_eq!(board.len(), offered);
    assert!(board.iter().all(|s| s.bookable && !s.booked && !s.past));
    assert!(board.windows(2).all(|w| w[0].time < w[1].time));

    let response = server
        .get(&format!("/api/v1/mentors/{mentor}/slots?date=June"))
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_regenerate_availability_is_mentor_only() {
    let server = server().await;
    let mentor = server.cast.mentor(0);
    let path = format!("/api/v1/mentors/{mentor}/availability/regenerate");

    let response = server
        .action_as(&path, server.cast.mentor(1))
        .await
        .expect("Request failed");
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "PERMISSION_DENIED");

    let response = server.action_as(&path, mentor).await.expect("Request failed");
    let availability: AvailabilityBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!availability.slots.is_empty());
}

// ============================================================================
// Identity Tests
// ============================================================================

#[tokio::test]
async fn test_identity_is_required() {
    let server = server().await;
    let slot = first_slot(&server, server.cast.mentor(1)).await;
    let request = BookingRequest::virtual_session(server.cast.mentor(1), &slot);

    let response = server
        .post_as("/api/v1/appointments", None, &request)
        .await
        .expect("Request failed");
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "MISSING_IDENTITY");

    let response = server
        .post_as(
            "/api/v1/appointments",
            Some(mentor_core::UserId::new_v4()),
            &request,
        )
        .await
        .expect("Request failed");
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "UNKNOWN_CALLER");

    let response = server
        .client
        .get(format!("{}/api/v1/users/@me/stats", server.base_url()))
        .header("x-user-id", "nobody")
        .send()
        .await
        .expect("Request failed");
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "INVALID_IDENTITY");
}

// ============================================================================
// Booking Lifecycle Tests
// ============================================================================

#[tokio::test]
async fn test_booking_lifecycle() {
    let server = server().await;
    let mentor = server.cast.mentor(1);
    let (alex, priya) = (server.cast.student(0), server.cast.student(1));
    let slot = first_slot(&server, mentor).await;
    let request = BookingRequest::virtual_session(mentor, &slot);

    // Book
    let booked: AppointmentBody = assert_json(book(&server, &request, alex).await, StatusCode::CREATED)
        .await
        .unwrap();
    assert_eq!(booked.status, "pending");
    assert_eq!(booked.student_id, alex.to_string());
    assert_eq!(booked.mentor_id, mentor.to_string());
    assert_eq!((booked.date.as_str(), booked.time.as_str()), (slot.date.as_str(), slot.time.as_str()));
    assert_eq!(booked.meeting_type, "virtual");
    assert_eq!(booked.meeting_link.as_deref(), Some("https://meet.example/session"));

    // Same slot again
    let code = assert_error(book(&server, &request, priya).await, StatusCode::CONFLICT)
        .await
        .unwrap();
    assert_eq!(code, "SLOT_CONFLICT");

    // The board shows it as taken
    let response = server
        .get(&format!("/api/v1/mentors/{mentor}/slots?date={}", slot.date))
        .await
        .expect("Request failed");
    let board: Vec<SlotViewBody> = assert_json(response, StatusCode::OK).await.unwrap();
    let taken = board.iter().find(|s| s.time == slot.time).unwrap();
    assert!(taken.booked && !taken.bookable);

    // Only the mentor confirms
    let confirm = format!("/api/v1/appointments/{}/confirm", booked.id);
    let response = server.action_as(&confirm, alex).await.expect("Request failed");
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "NOT_APPOINTMENT_MENTOR");

    let response = server.action_as(&confirm, mentor).await.expect("Request failed");
    let confirmed: AppointmentBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(confirmed.status, "confirmed");

    // Strangers cannot see or cancel it
    let response = server
        .get_as(&format!("/api/v1/appointments/{}", booked.id), priya)
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    // The student cancels, freeing the slot
    let response = server
        .action_as(&format!("/api/v1/appointments/{}/cancel", booked.id), alex)
        .await
        .expect("Request failed");
    let cancelled: AppointmentBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(cancelled.status, "cancelled");

    let response = server.action_as(&confirm, mentor).await.expect("Request failed");
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "INVALID_TRANSITION");

    let rebooked: AppointmentBody = assert_json(book(&server, &request, priya).await, StatusCode::CREATED)
        .await
        .unwrap();
    assert_ne!(rebooked.id, booked.id);
}

#[tokio::test]
async fn test_decline_by_mentor() {
    let server = server().await;
    let mentor = server.cast.mentor(3);
    let slot = first_slot(&server, mentor).await;
    let request = BookingRequest::virtual_session(mentor, &slot);
    let booked: AppointmentBody =
        assert_json(book(&server, &request, server.cast.student(0)).await, StatusCode::CREATED)
            .await
            .unwrap();

    let response = server
        .action_as(&format!("/api/v1/appointments/{}/decline", booked.id), mentor)
        .await
        .expect("Request failed");
    let declined: AppointmentBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(declined.status, "cancelled");
}

#[tokio::test]
async fn test_complete_waits_for_the_slot() {
    let server = server().await;
    let mentor = server.cast.mentor(4);
    let slot = first_slot(&server, mentor).await;
    let request = BookingRequest::virtual_session(mentor, &slot);
    let booked: AppointmentBody =
        assert_json(book(&server, &request, server.cast.student(0)).await, StatusCode::CREATED)
            .await
            .unwrap();

    let response = server
        .action_as(&format!("/api/v1/appointments/{}/complete", booked.id), mentor)
        .await
        .expect("Request failed");
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "NOT_YET_ELAPSED");
}

#[tokio::test]
async fn test_booking_validation() {
    let server = server().await;
    let mentor = server.cast.mentor(1);
    let alex = server.cast.student(0);
    let slot = first_slot(&server, mentor).await;

    // Virtual without a link
    let mut request = BookingRequest::virtual_session(mentor, &slot);
    request.meeting_link = None;
    let code = assert_error(book(&server, &request, alex).await, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
    assert_eq!(code, "VALIDATION_ERROR");

    // In the past
    let mut request = BookingRequest::virtual_session(mentor, &slot);
    request.date = last_week();
    let code = assert_error(book(&server, &request, alex).await, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
    assert_eq!(code, "SLOT_PAST");

    // Malformed time
    let mut request = BookingRequest::virtual_session(mentor, &slot);
    request.time = "25:99".to_string();
    assert_status(book(&server, &request, alex).await, StatusCode::BAD_REQUEST)
        .await
        .unwrap();

    // Not JSON we understand
    let response = server
        .post_as("/api/v1/appointments", Some(alex), &json!({ "mentor_id": 7 }))
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    // Mentors do not book
    let request = BookingRequest::virtual_session(mentor, &slot);
    let response = book(&server, &request, server.cast.mentor(0)).await;
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    // Physical needs a location, and gets one
    let mut request = BookingRequest::virtual_session(mentor, &slot);
    request.meeting_type = "physical".to_string();
    request.meeting_link = None;
    request.location = Some("Library, room 2".to_string());
    let booked: Value = assert_json(book(&server, &request, alex).await, StatusCode::CREATED)
        .await
        .unwrap();
    assert_eq!(booked["meeting_type"], "physical");
    assert_eq!(booked["location"], "Library, room 2");
}

#[tokio::test]
async fn test_delete_frees_the_slot() {
    let server = server().await;
    let mentor = server.cast.mentor(0);
    let alex = server.cast.student(0);
    let slot = first_slot(&server, mentor).await;
    let request = BookingRequest::virtual_session(mentor, &slot);
    let booked: AppointmentBody = assert_json(book(&server, &request, alex).await, StatusCode::CREATED)
        .await
        .unwrap();

    let path = format!("/api/v1/appointments/{}", booked.id);
    let response = server
        .delete_as(&path, server.cast.student(1))
        .await
        .expect("Request failed");
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "NOT_APPOINTMENT_PARTICIPANT");

    let response = server.delete_as(&path, alex).await.expect("Request failed");
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get_as(&path, alex).await.expect("Request failed");
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_APPOINTMENT");

    let response = server.delete_as(&path, alex).await.expect("Request failed");
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    assert_status(book(&server, &request, alex).await, StatusCode::CREATED)
        .await
        .unwrap();
}

// ============================================================================
// Caller View Tests
// ============================================================================

#[tokio::test]
async fn test_my_appointments_and_stats() {
    let server = server().await;
    let alex = server.cast.student(0);
    let (chen, patel) = (server.cast.mentor(1), server.cast.mentor(4));

    let mut booked = Vec::new();
    for mentor in [patel, chen] {
        let slot = first_slot(&server, mentor).await;
        let request = BookingRequest::virtual_session(mentor, &slot);
        let body: AppointmentBody = assert_json(book(&server, &request, alex).await, StatusCode::CREATED)
            .await
            .unwrap();
        booked.push(body);
    }

    let response = server
        .get_as("/api/v1/users/@me/appointments?scope=upcoming", alex)
        .await
        .expect("Request failed");
    let upcoming: Vec<AppointmentBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(upcoming.len(), 2);
    let key = |a: &AppointmentBody| (parse_date(&a.date), a.time.clone());
    assert!(key(&upcoming[0]) <= key(&upcoming[1]));

    let response = server
        .get_as("/api/v1/users/@me/appointments?scope=past", alex)
        .await
        .expect("Request failed");
    let past: Vec<AppointmentBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(past.is_empty());

    let response = server
        .get_as("/api/v1/users/@me/appointments?scope=later", alex)
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    // The mentor sees their side only
    let response = server
        .get_as("/api/v1/users/@me/appointments", chen)
        .await
        .expect("Request failed");
    let mine: Vec<AppointmentBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].mentor_id, chen.to_string());

    let response = server
        .get_as("/api/v1/users/@me/stats", alex)
        .await
        .expect("Request failed");
    let stats: StatsBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(stats.upcoming, 2);
    assert_eq!(stats.pending, 2);
    assert_eq!(stats.completed, 0);
    assert_eq!(stats.counterparts, 2);
}
