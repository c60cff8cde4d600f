//! Demo seed data
//!
//! Five mentors and two students, so a fresh memory-backed server has
//! somebody to book with.

use chrono::NaiveDate;
use tracing::info;

use mentor_core::availability::AvailabilityPolicy;
use mentor_core::entities::User;
use mentor_core::traits::{AvailabilityRepository, RepoResult};
use mentor_core::value_objects::{Role, UserId};

/// (first, last, email, bio, specialties)
const DEMO_MENTORS: [(&str, &str, &str, &str, [&str; 2]); 5] = [
    (
        "Sarah",
        "Johnson",
        "sarah.johnson@mentor.com",
        "Licensed counselor specializing in mental health and wellness. 10+ years of experience helping students navigate stress and anxiety.",
        ["Mental Health", "Stress Management"],
    ),
    (
        "Michael",
        "Chen",
        "michael.chen@mentor.com",
        "Career advisor with expertise in tech industry transitions. Former software engineer turned career coach.",
        ["Career Advice", "Tech Industry"],
    ),
    (
        "Emily",
        "Williams",
        "dr.williams@mentor.com",
        "Academic advisor with Ph.D. in Education. Specializing in study strategies and academic planning.",
        ["Academic Advising", "Study Skills"],
    ),
    (
        "James",
        "Rodriguez",
        "james.rodriguez@mentor.com",
        "Career counselor focusing on resume building, interview prep, and professional development.",
        ["Career Advice", "Interview Prep"],
    ),
    (
        "Lisa",
        "Patel",
        "lisa.patel@mentor.com",
        "Mental health counselor specializing in student wellness, mindfulness, and work-life balance.",
        ["Mental Health", "Mindfulness"],
    ),
];

const DEMO_STUDENTS: [(&str, &str, &str); 2] = [
    ("Alex", "Morgan", "alex.morgan@student.edu"),
    ("Priya", "Nair", "priya.nair@student.edu"),
];

/// The demo mentor profiles, with fresh ids
pub fn demo_mentors() -> Vec<User> {
    DEMO_MENTORS
        .iter()
        .map(|(first, last, email, bio, specialty)| {
            User::new(UserId::new_v4(), Role::Mentor, *first, *last, *email)
                .with_bio(*bio)
                .with_specialty(*specialty)
        })
        .collect()
}

/// The demo student profiles, with fresh ids
pub fn demo_students() -> Vec<User> {
    DEMO_STUDENTS
        .iter()
        .map(|(first, last, email)| User::new(UserId::new_v4(), Role::Student, *first, *last, *email))
        .collect()
}

/// Every demo profile, mentors first
pub fn demo_users() -> Vec<User> {
    let mut users = demo_mentors();
    users.extend(demo_students());
    users
}

/// Generate and store availability for every mentor in `users`
pub async fn seed_directory<A>(
    users: &[User],
    availability: &A,
    policy: &dyn AvailabilityPolicy,
    today: NaiveDate,
) -> RepoResult<usize>
where
    A: AvailabilityRepository + ?Sized,
{
    let mut total = 0;
    for mentor in users.iter().filter(|u| u.is_mentor()) {
        let slots = policy.generate(today);
        total += slots.len();
        availability.replace(mentor.id, &slots).await?;
    }
    info!(users = users.len(), slots = total, "Seeded demo directory");
    Ok(total)
}
