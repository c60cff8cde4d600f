//! Availability model - how mentors' bookable slots are produced
//!
//! A policy turns "today" into a set of future slots. Whatever the policy,
//! its output must satisfy [`AvailabilityRules::honours_contract`]: strictly
//! in the future, never on a weekend, and of the configured duration.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::entities::AvailabilitySlot;
use crate::value_objects::Slot;

/// Parameters shared by every availability policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityRules {
    /// Number of days generated, starting tomorrow
    pub horizon_days: u32,
    /// Times of day a slot may start at
    pub candidate_times: Vec<NaiveTime>,
    pub min_slots_per_day: usize,
    pub max_slots_per_day: usize,
    pub slot_minutes: u32,
}

impl Default for AvailabilityRules {
    fn default() -> Self {
        let candidate_times = [(9, 0), (10, 0), (11, 0), (14, 0), (15, 0), (16, 0)]
            .into_iter()
            .filter_map(|(h, m)| NaiveTime::from_hms_opt(h, m, 0))
            .collect();
        Self {
            horizon_days: 14,
            candidate_times,
            min_slots_per_day: 2,
            max_slots_per_day: 4,
            slot_minutes: 60,
        }
    }
}

impl AvailabilityRules {
    /// Whether `slot` may be offered when generated at `now`
    pub fn honours_contract(&self, slot: &AvailabilitySlot, now: NaiveDateTime) -> bool {
        let s = slot.slot();
        s.instant() > now && !s.is_weekend() && slot.duration_minutes == self.slot_minutes
    }

    /// Dates covered by one generation run
    pub fn horizon(&self, today: NaiveDate) -> impl Iterator<Item = NaiveDate> {
        (1..=u64::from(self.horizon_days))
            .filter_map(move |offset| today.checked_add_days(Days::new(offset)))
    }

    /// Per-day slot count bounds, clamped to the number of candidates
    fn bounds(&self) -> (usize, usize) {
        let max = self.max_slots_per_day.min(self.candidate_times.len());
        let min = self.min_slots_per_day.min(max);
        (min, max)
    }
}

/// Produces a mentor's availability
pub trait AvailabilityPolicy: Send + Sync {
    fn rules(&self) -> &AvailabilityRules;

    /// Generate slots for the horizon following `today`, sorted by slot
    fn generate(&self, today: NaiveDate) -> Vec<AvailabilitySlot>;
}

/// Weekdays only, a random subset of the candidate times per day
#[derive(Debug)]
pub struct WeekdayRandomPolicy {
    rules: AvailabilityRules,
    rng: Mutex<StdRng>,
}

impl WeekdayRandomPolicy {
    pub fn new(rules: AvailabilityRules) -> Self {
        Self {
            rules,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic output for a given seed
    pub fn seeded(rules: AvailabilityRules, seed: u64) -> Self {
        Self {
            rules,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for WeekdayRandomPolicy {
    fn default() -> Self {
        Self::new(AvailabilityRules::default())
    }
}

impl AvailabilityPolicy for WeekdayRandomPolicy {
    fn rules(&self) -> &AvailabilityRules {
        &self.rules
    }

    fn generate(&self, today: NaiveDate) -> Vec<AvailabilitySlot> {
        let (min, max) = self.rules.bounds();
        let mut rng = self.rng.lock();
        let mut slots = Vec::new();

        for date in self.rules.horizon(today) {
            let slot = Slot::new(date, NaiveTime::MIN);
            if slot.is_weekend() {
                continue;
            }
            let count = rng.gen_range(min..=max);
            slots.extend(
                self.rules
                    .candidate_times
                    .choose_multiple(&mut *rng, count)
                    .map(|&time| {
                        AvailabilitySlot::new(Slot::new(date, time), self.rules.slot_minutes)
                    }),
            );
        }

        slots.sort_by_key(AvailabilitySlot::slot);
        slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use std::collections::BTreeMap;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
    }

    #[test]
    fn test_generated_slots_honour_contract() {
        let policy = WeekdayRandomPolicy::seeded(AvailabilityRules::default(), 7);
        let now = monday().and_hms_opt(23, 59, 0).unwrap();
        let slots = policy.generate(monday());

        assert!(!slots.is_empty());
        for slot in &slots {
            assert!(policy.rules().honours_contract(slot, now), "{slot:?}");
            assert!(slot.date > monday());
        }
    }

    #[test]
    fn test_per_day_counts_within_bounds() {
        let policy = WeekdayRandomPolicy::seeded(AvailabilityRules::default(), 42);
        let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        for slot in policy.generate(monday()) {
            *per_day.entry(slot.date).or_default() += 1;
        }

        // Jun 3 ..= Jun 16 holds ten weekdays
        assert_eq!(per_day.len(), 10);
        assert!(per_day.values().all(|&n| (2..=4).contains(&n)));
        assert!(per_day.keys().all(|d| d.weekday().number_from_monday() <= 5));
    }

    #[test]
    fn test_output_is_sorted_and_unique() {
        let policy = WeekdayRandomPolicy::seeded(AvailabilityRules::default(), 3);
        let slots = policy.generate(monday());
        assert!(slots.windows(2).all(|w| w[0].slot() < w[1].slot()));
    }

    #[test]
    fn test_same_seed_same_output() {
        let a = WeekdayRandomPolicy::seeded(AvailabilityRules::default(), 11).generate(monday());
        let b = WeekdayRandomPolicy::seeded(AvailabilityRules::default(), 11).generate(monday());
        assert_eq!(a, b);
    }

    #[test]
    fn test_bounds_clamped_to_candidates() {
        let rules = AvailabilityRules {
            candidate_times: vec![NaiveTime::from_hms_opt(9, 0, 0).unwrap()],
            ..AvailabilityRules::default()
        };
        let slots = WeekdayRandomPolicy::seeded(rules, 1).generate(monday());
        assert_eq!(slots.len(), 10);
    }

    #[test]
    fn test_contract_rejects_weekend_and_wrong_duration() {
        let rules = AvailabilityRules::default();
        let now = monday().and_hms_opt(8, 0, 0).unwrap();
        let saturday = Slot::parse("2025-06-07", "10:00").unwrap();
        let tuesday = Slot::parse("2025-06-03", "10:00").unwrap();

        assert!(!rules.honours_contract(&AvailabilitySlot::new(saturday, 60), now));
        assert!(!rules.honours_contract(&AvailabilitySlot::new(tuesday, 30), now));
        assert!(rules.honours_contract(&AvailabilitySlot::new(tuesday, 60), now));
    }
}
