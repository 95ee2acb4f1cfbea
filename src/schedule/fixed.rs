use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::SchedulerConfig;
use super::error::{AttemptExhausted, SchedulingError, Stage};
use super::parallel::first_success;
use super::slot_utils::time_slot;
use super::types::{Day, HalfDayBlock, MeetingAssignment, MeetingRequest, PreAssignedMeetingRequest, Schedule};
use super::validator::is_valid;
use super::attempt_budget;

/// Adds `request` at the earliest slot index of (day, block) that keeps
/// `context` plus `candidate` conflict-free.
/// Leaves `candidate` untouched and returns false if every index conflicts.
pub(super) fn place_first_fit(
    candidate: &mut Vec<MeetingAssignment>,
    context: &Schedule,
    request: &MeetingRequest,
    day: Day,
    block: HalfDayBlock,
    slots_per_block: u8,
) -> bool {
    for index in 0..slots_per_block {
        candidate.push(MeetingAssignment::new(request, time_slot(day, block, index)));
        if is_valid(context.iter().chain(candidate.iter())) {
            return true;
        }
        candidate.pop();
    }
    false
}

/// One randomized pass over the pre-assigned meetings.
///
/// Shuffles the requests, then gives each one the first slot index that keeps
/// the growing candidate valid. Gives up on the first request that fits nowhere.
pub fn attempt_fixed<R: Rng + ?Sized>(
    requests: &[PreAssignedMeetingRequest],
    slots_per_block: u8,
    rng: &mut R,
) -> Result<Schedule, AttemptExhausted> {
    let mut order: Vec<&PreAssignedMeetingRequest> = requests.iter().collect();
    order.shuffle(rng);

    let context = Schedule::new();
    let mut candidate = Vec::with_capacity(order.len());
    for pre in order {
        if !place_first_fit(&mut candidate, &context, &pre.request, pre.day, pre.block, slots_per_block) {
            return Err(AttemptExhausted::new(pre.request.clone()));
        }
    }
    Ok(Schedule::from(candidate))
}

/// Schedules every pre-assigned meeting, restarting from scratch up to
/// `budget_factor * n^2` times.
pub fn assign_fixed<R: Rng + ?Sized>(
    requests: &[PreAssignedMeetingRequest],
    config: &SchedulerConfig,
    rng: &mut R,
) -> Result<Schedule, SchedulingError> {
    if requests.is_empty() {
        return Ok(Schedule::new());
    }
    let budget = attempt_budget(requests.len(), config.budget_factor);
    let slots = config.fixed_slots_per_block;

    if config.workers > 1 {
        let seeds: Vec<u64> = (0..config.workers).map(|_| rng.gen()).collect();
        let found = first_success(budget, &seeds, |worker_rng| {
            attempt_fixed(requests, slots, worker_rng)
                .ok()
                .filter(|candidate| is_valid(candidate))
        });
        return match found {
            Some(schedule) => {
                info!("Placed {} pre-assigned meetings using {} workers", schedule.len(), config.workers);
                Ok(schedule)
            }
            None => Err(SchedulingError::no_feasible_schedule(Stage::Fixed, budget)),
        };
    }

    for attempt in 1..=budget {
        match attempt_fixed(requests, slots, rng) {
            Ok(candidate) if is_valid(&candidate) => {
                info!("Placed {} pre-assigned meetings on attempt {}/{}", candidate.len(), attempt, budget);
                return Ok(candidate);
            }
            Ok(_) => debug!("Fixed attempt {} produced an invalid candidate", attempt),
            Err(exhausted) => debug!("Fixed attempt {} abandoned at {}", attempt, exhausted.request()),
        }
    }
    Err(SchedulingError::no_feasible_schedule(Stage::Fixed, budget))
}
