use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Mentors and companies are identified by their display names
pub type Mentor = String;
pub type Company = String;

/// Working day of the scheduling week (ordinal 1 = Monday .. 5 = Friday)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
}

impl Day {
    pub const ALL: [Day; 5] = [Day::Monday, Day::Tuesday, Day::Wednesday, Day::Thursday, Day::Friday];

    #[cfg(test)]
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Day> {
        match ordinal {
            1..=5 => Some(Day::ALL[(ordinal - 1) as usize]),
            _ => None,
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl FromStr for Day {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(ordinal) = s.trim().parse::<u8>() {
            return Day::from_ordinal(ordinal).ok_or_else(|| format!("day ordinal {} out of range", ordinal));
        }
        match s.trim().to_lowercase().as_str() {
            "monday" | "mon" => Ok(Day::Monday),
            "tuesday" | "tue" => Ok(Day::Tuesday),
            "wednesday" | "wed" => Ok(Day::Wednesday),
            "thursday" | "thu" | "thur" => Ok(Day::Thursday),
            "friday" | "fri" => Ok(Day::Friday),
            other => Err(format!("unknown day '{}'", other)),
        }
    }
}

/// Morning or afternoon half of a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HalfDayBlock {
    AM,
    PM,
}

impl HalfDayBlock {
    pub const ALL: [HalfDayBlock; 2] = [HalfDayBlock::AM, HalfDayBlock::PM];
}

impl fmt::Display for HalfDayBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HalfDayBlock::AM => write!(f, "AM"),
            HalfDayBlock::PM => write!(f, "PM"),
        }
    }
}

impl FromStr for HalfDayBlock {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "AM" => Ok(HalfDayBlock::AM),
            "PM" => Ok(HalfDayBlock::PM),
            other => Err(format!("unknown half-day block '{}'", other)),
        }
    }
}

/// Position of a slot inside a half-day block's grid
pub type SlotIndex = u8;

/// Resolved wall-clock meeting time. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    pub day: Day,
    pub hour: u8,
    pub minute: u8,
}

/// A required mentor/company pairing
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MeetingRequest {
    pub mentor: Mentor,
    pub company: Company,
}

impl MeetingRequest {
    pub fn new(mentor: impl Into<Mentor>, company: impl Into<Company>) -> Self {
        Self {
            mentor: mentor.into(),
            company: company.into(),
        }
    }
}

impl fmt::Display for MeetingRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.mentor, self.company)
    }
}

/// Meeting whose mentor already committed to a day and half-day
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PreAssignedMeetingRequest {
    pub request: MeetingRequest,
    pub day: Day,
    pub block: HalfDayBlock,
}

impl PreAssignedMeetingRequest {
    pub fn new(mentor: impl Into<Mentor>, company: impl Into<Company>, day: Day, block: HalfDayBlock) -> Self {
        Self {
            request: MeetingRequest::new(mentor, company),
            day,
            block,
        }
    }
}

/// Meeting whose mentor has no day preference yet
pub type FreeMeetingRequest = MeetingRequest;

/// A fully resolved meeting
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MeetingAssignment {
    pub mentor: Mentor,
    pub company: Company,
    pub slot: TimeSlot,
}

impl MeetingAssignment {
    pub fn new(request: &MeetingRequest, slot: TimeSlot) -> Self {
        Self {
            mentor: request.mentor.clone(),
            company: request.company.clone(),
            slot,
        }
    }
}

/// Collection of meeting assignments produced by the assigners
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub assignments: Vec<MeetingAssignment>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MeetingAssignment> {
        self.assignments.iter()
    }

    pub fn contains(&self, assignment: &MeetingAssignment) -> bool {
        self.assignments.contains(assignment)
    }

    /// Sorts by mentor, then time, then company so exports are reproducible
    pub fn normalized(mut self) -> Self {
        self.assignments
            .sort_by(|a, b| (&a.mentor, a.slot, &a.company).cmp(&(&b.mentor, b.slot, &b.company)));
        self
    }
}

impl From<Vec<MeetingAssignment>> for Schedule {
    fn from(assignments: Vec<MeetingAssignment>) -> Self {
        Self { assignments }
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a MeetingAssignment;
    type IntoIter = std::slice::Iter<'a, MeetingAssignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.assignments.iter()
    }
}

/// Immutable input of the solver, built entirely before it runs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingRequest {
    pub fixed_requests: Vec<PreAssignedMeetingRequest>,
    pub free_mentors: Vec<Mentor>,
    pub free_requests: Vec<FreeMeetingRequest>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_ordinals_round_trip() {
        for day in Day::ALL {
            assert_eq!(Day::from_ordinal(day.ordinal()), Some(day));
        }
        assert_eq!(Day::from_ordinal(0), None);
        assert_eq!(Day::from_ordinal(6), None);
        assert_eq!(Day::Monday.ordinal(), 1);
        assert_eq!(Day::Friday.ordinal(), 5);
    }

    #[test]
    fn test_day_and_block_parse_case_insensitively() {
        assert_eq!("Monday".parse::<Day>(), Ok(Day::Monday));
        assert_eq!(" thur ".parse::<Day>(), Ok(Day::Thursday));
        assert!("Saturday".parse::<Day>().is_err());
        assert_eq!("3".parse::<Day>(), Ok(Day::Wednesday));
        assert!("6".parse::<Day>().is_err());
        assert_eq!("pm".parse::<HalfDayBlock>(), Ok(HalfDayBlock::PM));
        assert!("Undefined".parse::<HalfDayBlock>().is_err());
    }

    #[test]
    fn test_time_slots_order_chronologically() {
        let early = TimeSlot { day: Day::Monday, hour: 14, minute: 40 };
        let late = TimeSlot { day: Day::Tuesday, hour: 9, minute: 0 };
        assert!(early < late);
        assert!(TimeSlot { day: Day::Monday, hour: 9, minute: 20 } < TimeSlot { day: Day::Monday, hour: 9, minute: 40 });
    }

    #[test]
    fn test_normalized_sorts_by_mentor_then_time() {
        let slot = |hour| TimeSlot { day: Day::Monday, hour, minute: 0 };
        let schedule = Schedule::from(vec![
            MeetingAssignment { mentor: "B".into(), company: "X".into(), slot: slot(9) },
            MeetingAssignment { mentor: "A".into(), company: "Y".into(), slot: slot(10) },
            MeetingAssignment { mentor: "A".into(), company: "X".into(), slot: slot(9) },
        ])
        .normalized();
        let order: Vec<(&str, &str)> = schedule.iter().map(|a| (a.mentor.as_str(), a.company.as_str())).collect();
        assert_eq!(order, vec![("A", "X"), ("A", "Y"), ("B", "X")]);
    }
}
