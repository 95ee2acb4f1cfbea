use std::collections::{BTreeSet, HashMap};

use log::{debug, info};
use rand::Rng;

use crate::config::SchedulerConfig;
use super::error::{AttemptExhausted, SchedulingError, Stage};
use super::fixed::place_first_fit;
use super::parallel::first_success;
use super::types::{Day, FreeMeetingRequest, HalfDayBlock, Mentor, Schedule};
use super::validator::is_valid;
use super::attempt_budget;

/// Mentors whose day must be sampled: the declared free mentors plus any
/// mentor referenced by a free request
fn mentors_to_sample<'a>(mentors: &'a [Mentor], requests: &'a [FreeMeetingRequest]) -> Vec<&'a str> {
    let all: BTreeSet<&str> = mentors
        .iter()
        .map(String::as_str)
        .chain(requests.iter().map(|r| r.mentor.as_str()))
        .collect();
    all.into_iter().collect()
}

/// Picks a uniformly random (day, half-day) per mentor
fn sample_days<'a, R: Rng + ?Sized>(mentors: &[&'a str], rng: &mut R) -> HashMap<&'a str, (Day, HalfDayBlock)> {
    mentors
        .iter()
        .map(|&mentor| {
            let day = Day::ALL[rng.gen_range(0..Day::ALL.len())];
            let block = HalfDayBlock::ALL[rng.gen_range(0..HalfDayBlock::ALL.len())];
            (mentor, (day, block))
        })
        .collect()
}

/// One randomized pass over the free meetings.
///
/// Every mentor gets a random (day, half-day) shared by all of their meetings,
/// then each request takes the first slot index that keeps the candidate plus
/// `context` conflict-free. Returns the union of `context` and the new meetings.
pub fn attempt_free<R: Rng + ?Sized>(
    mentors: &[Mentor],
    requests: &[FreeMeetingRequest],
    context: &Schedule,
    slots_per_block: u8,
    rng: &mut R,
) -> Result<Schedule, AttemptExhausted> {
    let sampled = mentors_to_sample(mentors, requests);
    let days = sample_days(&sampled, rng);

    let mut candidate = Vec::with_capacity(requests.len());
    for request in requests {
        let Some(&(day, block)) = days.get(request.mentor.as_str()) else {
            return Err(AttemptExhausted::new(request.clone()));
        };
        if !place_first_fit(&mut candidate, context, request, day, block, slots_per_block) {
            return Err(AttemptExhausted::new(request.clone()));
        }
    }

    let mut union = context.assignments.clone();
    union.extend(candidate);
    let union = Schedule::from(union);
    debug_assert!(context.iter().all(|a| union.contains(a)));
    Ok(union)
}

/// Schedules every free meeting around the read-only `context`, restarting
/// from scratch up to `budget_factor * m^2` times for m free mentors.
pub fn assign_free<R: Rng + ?Sized>(
    mentors: &[Mentor],
    requests: &[FreeMeetingRequest],
    context: &Schedule,
    config: &SchedulerConfig,
    rng: &mut R,
) -> Result<Schedule, SchedulingError> {
    if requests.is_empty() {
        return Ok(context.clone());
    }
    let budget = attempt_budget(mentors_to_sample(mentors, requests).len(), config.budget_factor);
    let slots = config.free_slots_per_block;

    if config.workers > 1 {
        let seeds: Vec<u64> = (0..config.workers).map(|_| rng.gen()).collect();
        let found = first_success(budget, &seeds, |worker_rng| {
            attempt_free(mentors, requests, context, slots, worker_rng)
                .ok()
                .filter(|union| is_valid(union))
        });
        return match found {
            Some(schedule) => {
                info!("Placed {} free meetings using {} workers", requests.len(), config.workers);
                Ok(schedule)
            }
            None => Err(SchedulingError::no_feasible_schedule(Stage::Free, budget)),
        };
    }

    for attempt in 1..=budget {
        match attempt_free(mentors, requests, context, slots, rng) {
            Ok(union) if is_valid(&union) => {
                info!("Placed {} free meetings on attempt {}/{}", requests.len(), attempt, budget);
                return Ok(union);
            }
            Ok(_) => debug!("Free attempt {} produced an invalid candidate", attempt),
            Err(exhausted) => debug!("Free attempt {} abandoned at {}", attempt, exhausted.request()),
        }
    }
    Err(SchedulingError::no_feasible_schedule(Stage::Free, budget))
}
