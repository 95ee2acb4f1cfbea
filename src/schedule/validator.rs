use std::collections::{HashMap, HashSet};

use super::types::{MeetingAssignment, TimeSlot};

/// Checks a full candidate set for scheduling conflicts.
///
/// Returns false if two assignments share a time slot while also sharing a
/// mentor or a company. The whole set is rechecked on every call; callers
/// never rely on an earlier result.
pub fn is_valid<'a, I>(assignments: I) -> bool
where
    I: IntoIterator<Item = &'a MeetingAssignment>,
{
    let mut mentor_slots: HashMap<&str, HashSet<TimeSlot>> = HashMap::new();
    let mut company_slots: HashMap<&str, HashSet<TimeSlot>> = HashMap::new();

    for assignment in assignments {
        let mentor_free = mentor_slots
            .entry(assignment.mentor.as_str())
            .or_default()
            .insert(assignment.slot);
        let company_free = company_slots
            .entry(assignment.company.as_str())
            .or_default()
            .insert(assignment.slot);
        if !mentor_free || !company_free {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::types::Day;

    fn meeting(mentor: &str, company: &str, day: Day, hour: u8, minute: u8) -> MeetingAssignment {
        MeetingAssignment {
            mentor: mentor.to_string(),
            company: company.to_string(),
            slot: TimeSlot { day, hour, minute },
        }
    }

    #[test]
    fn test_empty_schedule_is_valid() {
        assert!(is_valid(&Vec::new()));
    }

    #[test]
    fn test_mentor_double_booking_is_invalid() {
        let schedule = vec![
            meeting("A", "X", Day::Monday, 9, 0),
            meeting("A", "Y", Day::Monday, 9, 0),
        ];
        assert!(!is_valid(&schedule));
    }

    #[test]
    fn test_company_double_booking_is_invalid() {
        let schedule = vec![
            meeting("A", "X", Day::Monday, 9, 0),
            meeting("B", "X", Day::Monday, 9, 0),
        ];
        assert!(!is_valid(&schedule));
    }

    #[test]
    fn test_same_time_different_parties_is_valid() {
        let schedule = vec![
            meeting("A", "X", Day::Monday, 9, 0),
            meeting("B", "Y", Day::Monday, 9, 0),
            meeting("A", "Y", Day::Monday, 9, 20),
            meeting("B", "X", Day::Monday, 9, 20),
        ];
        assert!(is_valid(&schedule));
    }

    #[test]
    fn test_same_clock_time_on_other_day_is_valid() {
        let schedule = vec![
            meeting("A", "X", Day::Monday, 9, 0),
            meeting("A", "X", Day::Tuesday, 9, 0),
        ];
        assert!(is_valid(&schedule));
    }

    #[test]
    fn test_conflict_across_chained_sets_is_detected() {
        let context = vec![meeting("A", "X", Day::Friday, 12, 0)];
        let candidate = vec![meeting("B", "X", Day::Friday, 12, 0)];
        assert!(is_valid(&context));
        assert!(is_valid(&candidate));
        assert!(!is_valid(context.iter().chain(candidate.iter())));
    }

    #[test]
    fn test_revalidation_is_idempotent() {
        let schedule = vec![
            meeting("A", "X", Day::Monday, 9, 0),
            meeting("A", "Y", Day::Monday, 9, 20),
        ];
        assert!(is_valid(&schedule));
        assert!(is_valid(&schedule));
    }
}
