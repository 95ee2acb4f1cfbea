use std::fmt;

use super::types::MeetingRequest;

/// Which assignment stage ran out of attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Fixed,
    Free,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Fixed => write!(f, "pre-assigned mentors"),
            Stage::Free => write!(f, "unassigned mentors"),
        }
    }
}

/// Terminal failure of the solver
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SchedulingError {
    NoFeasibleSchedule { stage: Stage, attempts: usize },
}

impl SchedulingError {
    pub fn no_feasible_schedule(stage: Stage, attempts: usize) -> Self {
        SchedulingError::NoFeasibleSchedule { stage, attempts }
    }
}

impl fmt::Display for SchedulingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulingError::NoFeasibleSchedule { stage, attempts } => write!(
                f,
                "No solution found: no conflict-free schedule for {} after {} attempts",
                stage, attempts
            ),
        }
    }
}

impl std::error::Error for SchedulingError {}

/// A single attempt could not place `request` in any slot.
/// Only ever seen by the restart loops.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttemptExhausted {
    request: MeetingRequest,
}

impl AttemptExhausted {
    #[inline]
    pub fn new(request: MeetingRequest) -> Self {
        Self { request }
    }

    #[inline]
    pub fn request(&self) -> &MeetingRequest {
        &self.request
    }
}

impl fmt::Display for AttemptExhausted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no free slot left for meeting {}", self.request)
    }
}

impl std::error::Error for AttemptExhausted {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_feasible_schedule_message_names_stage_and_attempts() {
        let err = SchedulingError::no_feasible_schedule(Stage::Fixed, 162);
        let message = err.to_string();
        assert!(message.starts_with("No solution found"));
        assert!(message.contains("pre-assigned mentors"));
        assert!(message.contains("162"));
    }

    #[test]
    fn test_attempt_exhausted_keeps_request() {
        let err = AttemptExhausted::new(MeetingRequest::new("A", "X"));
        assert_eq!(err.request().mentor, "A");
        assert_eq!(err.to_string(), "no free slot left for meeting A / X");
    }
}
