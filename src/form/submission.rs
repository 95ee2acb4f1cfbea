use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::schedule::types::{Day, HalfDayBlock};

/// Availability and company picks sent by a single mentor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentorSubmission {
    pub name: String,
    pub day: Option<Day>,
    pub block: Option<HalfDayBlock>,
    pub companies: Vec<String>,
}

impl MentorSubmission {
    /// Fixed (day, half-day), or `None` if the mentor left it to the scheduler
    pub fn preference(&self) -> Option<(Day, HalfDayBlock)> {
        self.day.zip(self.block)
    }
}

/// Validates a mentor submission
pub fn validate_submission(req: &MentorSubmission) -> Result<(), String> {
    if req.name.trim().is_empty() {
        return Err("Mentor name is required".to_string());
    }

    if req.day.is_some() != req.block.is_some() {
        return Err("Day and time must both be chosen or both left undefined".to_string());
    }

    if req.companies.is_empty() {
        return Err("At least one company must be selected".to_string());
    }

    let mut seen = HashSet::new();
    for company in &req.companies {
        let company = company.trim();
        if company.is_empty() {
            return Err("Company names cannot be blank".to_string());
        }
        if !seen.insert(company) {
            return Err(format!("Company '{}' was selected twice", company));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> MentorSubmission {
        MentorSubmission {
            name: "Alice".to_string(),
            day: Some(Day::Monday),
            block: Some(HalfDayBlock::AM),
            companies: vec!["Acme".to_string(), "Globex".to_string()],
        }
    }

    #[test]
    fn test_valid_submission_passes() {
        assert_eq!(validate_submission(&submission()), Ok(()));
        assert_eq!(submission().preference(), Some((Day::Monday, HalfDayBlock::AM)));
    }

    #[test]
    fn test_half_specified_preference_is_rejected() {
        let req = MentorSubmission { block: None, ..submission() };
        assert!(validate_submission(&req).is_err());
    }

    #[test]
    fn test_free_mentor_is_accepted() {
        let req = MentorSubmission { day: None, block: None, ..submission() };
        assert_eq!(validate_submission(&req), Ok(()));
        assert_eq!(req.preference(), None);
    }

    #[test]
    fn test_duplicate_and_blank_companies_are_rejected() {
        let dup = MentorSubmission { companies: vec!["Acme".into(), " Acme ".into()], ..submission() };
        assert_eq!(validate_submission(&dup), Err("Company 'Acme' was selected twice".to_string()));
        let blank = MentorSubmission { companies: vec!["  ".into()], ..submission() };
        assert!(validate_submission(&blank).is_err());
        let none = MentorSubmission { companies: vec![], ..submission() };
        assert!(validate_submission(&none).is_err());
    }

    #[test]
    fn test_submission_parses_from_json() {
        let req: MentorSubmission =
            serde_json::from_str(r#"{"name":"Bob","day":null,"block":null,"companies":["Acme"]}"#).unwrap();
        assert_eq!(req.name, "Bob");
        assert_eq!(req.preference(), None);
    }
}
