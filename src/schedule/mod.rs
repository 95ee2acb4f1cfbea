pub mod types;
pub mod slot_utils;
pub mod validator;
pub mod error;
pub mod parallel;
pub mod fixed;
pub mod free;

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::SchedulerConfig;

pub use types::{Schedule, SchedulingRequest};
pub use slot_utils::{format_day, format_time};
pub use error::SchedulingError;
pub use fixed::assign_fixed;
pub use free::assign_free;

/// Attempt budget for a stage with `n` restart units
pub fn attempt_budget(n: usize, factor: usize) -> usize {
    factor.saturating_mul(n).saturating_mul(n)
}

/// Schedules the pre-assigned mentors first, then fits the free mentors
/// around them. The result is sorted for reproducible export.
pub fn build_schedule<R: Rng + ?Sized>(
    request: &SchedulingRequest,
    config: &SchedulerConfig,
    rng: &mut R,
) -> Result<Schedule, SchedulingError> {
    info!(
        "Scheduling {} pre-assigned and {} free meetings ({} free mentors)",
        request.fixed_requests.len(),
        request.free_requests.len(),
        request.free_mentors.len()
    );
    let fixed = assign_fixed(&request.fixed_requests, config, rng)?;
    let full = assign_free(&request.free_mentors, &request.free_requests, &fixed, config, rng)?;
    Ok(full.normalized())
}

/// Runs `build_schedule` with an RNG seeded from the config, or from entropy
pub fn solve(request: &SchedulingRequest, config: &SchedulerConfig) -> Result<Schedule, SchedulingError> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    build_schedule(request, config, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::types::{Day, HalfDayBlock, MeetingAssignment, MeetingRequest, PreAssignedMeetingRequest, TimeSlot};
    use crate::schedule::validator::is_valid;
    use crate::schedule::error::Stage;

    fn two_mentor_request() -> SchedulingRequest {
        SchedulingRequest {
            fixed_requests: vec![
                PreAssignedMeetingRequest::new("A", "X", Day::Monday, HalfDayBlock::AM),
                PreAssignedMeetingRequest::new("A", "Y", Day::Monday, HalfDayBlock::AM),
            ],
            free_mentors: vec!["B".to_string()],
            free_requests: vec![MeetingRequest::new("B", "X"), MeetingRequest::new("B", "Y")],
        }
    }

    #[test]
    fn test_end_to_end_two_mentors() {
        for seed in 0..30 {
            let config = SchedulerConfig { seed: Some(seed), ..SchedulerConfig::default() };
            let schedule = solve(&two_mentor_request(), &config).unwrap();

            assert_eq!(schedule.len(), 4);
            assert!(is_valid(&schedule));

            let a_times: Vec<TimeSlot> = schedule.iter().filter(|a| a.mentor == "A").map(|a| a.slot).collect();
            assert_eq!(
                a_times,
                vec![
                    TimeSlot { day: Day::Monday, hour: 9, minute: 0 },
                    TimeSlot { day: Day::Monday, hour: 9, minute: 20 },
                ]
            );

            let b: Vec<&MeetingAssignment> = schedule.iter().filter(|a| a.mentor == "B").collect();
            assert_eq!(b.len(), 2);
            assert_eq!(b[0].slot.day, b[1].slot.day);
            assert_ne!(b[0].slot, b[1].slot);
        }
    }

    #[test]
    fn test_same_seed_gives_same_schedule() {
        let config = SchedulerConfig { seed: Some(42), ..SchedulerConfig::default() };
        let first = solve(&two_mentor_request(), &config).unwrap();
        let second = solve(&two_mentor_request(), &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_fixed_stage_failure_stops_the_run() {
        let request = SchedulingRequest {
            fixed_requests: (0..9)
                .map(|i| PreAssignedMeetingRequest::new("A", format!("C{}", i), Day::Monday, HalfDayBlock::AM))
                .collect(),
            free_mentors: vec!["B".to_string()],
            free_requests: vec![MeetingRequest::new("B", "C0")],
        };
        let config = SchedulerConfig { seed: Some(1), ..SchedulerConfig::default() };
        let err = solve(&request, &config).unwrap_err();
        assert!(matches!(
            err,
            SchedulingError::NoFeasibleSchedule { stage: Stage::Fixed, .. }
        ));
    }

    #[test]
    fn test_empty_request_yields_empty_schedule() {
        let schedule = solve(&SchedulingRequest::default(), &SchedulerConfig::default()).unwrap();
        assert!(schedule.is_empty());
    }

    #[test]
    fn test_attempt_budget_is_quadratic() {
        assert_eq!(attempt_budget(9, 2), 162);
        assert_eq!(attempt_budget(1, 2), 2);
        assert_eq!(attempt_budget(0, 2), 0);
    }
}
