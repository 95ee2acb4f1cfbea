use csv::ReaderBuilder;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::schedule::types::{
    Company, Day, HalfDayBlock, MeetingRequest, Mentor, PreAssignedMeetingRequest, SchedulingRequest,
};

/// Marker used in the availability sheet for "no preference"
pub const UNDEFINED: &str = "Undefined";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    EmptyList { what: &'static str },
    UnknownDay { row: usize, value: String },
    UnknownBlock { row: usize, value: String },
    MissingName { row: usize },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::EmptyList { what } => write!(f, "Error: no {} provided", what),
            InputError::UnknownDay { row, value } => write!(f, "row {}: unknown day '{}'", row, value),
            InputError::UnknownBlock { row, value } => write!(f, "row {}: unknown time '{}'", row, value),
            InputError::MissingName { row } => write!(f, "row {}: mentor name is empty", row),
        }
    }
}

impl std::error::Error for InputError {}

/// Everything collected about mentors and companies before scheduling
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    /// Mentor -> fixed (day, half-day), `None` when the solver should choose
    pub mentors: BTreeMap<Mentor, Option<(Day, HalfDayBlock)>>,
    /// Companies in the order they were listed
    pub companies: Vec<Company>,
    /// Company -> mentors it has to meet
    pub assignments: BTreeMap<Company, BTreeSet<Mentor>>,
}

impl Roster {
    pub fn new(mentors: Vec<Mentor>, companies: Vec<Company>) -> Self {
        let mut roster = Roster::default();
        for mentor in mentors {
            roster.mentors.entry(mentor).or_insert(None);
        }
        for company in companies {
            roster.add_company(&company);
        }
        roster
    }

    pub fn add_company(&mut self, company: &str) {
        if !self.companies.iter().any(|c| c == company) {
            self.companies.push(company.to_string());
        }
        self.assignments.entry(company.to_string()).or_default();
    }

    /// Records a mentor's preference and the companies they meet
    pub fn set_mentor(&mut self, mentor: &str, preference: Option<(Day, HalfDayBlock)>, companies: &[String]) {
        self.mentors.insert(mentor.to_string(), preference);
        for company in companies {
            self.add_company(company);
            self.assignments
                .entry(company.clone())
                .or_default()
                .insert(mentor.to_string());
        }
    }

    /// Rejects a roster without mentors or without companies
    pub fn validate(&self) -> Result<(), InputError> {
        if self.mentors.is_empty() {
            return Err(InputError::EmptyList { what: "mentors" });
        }
        if self.companies.is_empty() {
            return Err(InputError::EmptyList { what: "companies" });
        }
        Ok(())
    }

    /// Splits the roster into fixed and free meeting requests
    pub fn to_request(&self) -> Result<SchedulingRequest, InputError> {
        self.validate()?;
        let mut request = SchedulingRequest {
            free_mentors: self
                .mentors
                .iter()
                .filter(|(_, preference)| preference.is_none())
                .map(|(mentor, _)| mentor.clone())
                .collect(),
            ..SchedulingRequest::default()
        };

        for (company, mentors) in &self.assignments {
            for mentor in mentors {
                match self.mentors.get(mentor).copied().flatten() {
                    Some((day, block)) => request
                        .fixed_requests
                        .push(PreAssignedMeetingRequest::new(mentor.as_str(), company.as_str(), day, block)),
                    None => request.free_requests.push(MeetingRequest::new(mentor.as_str(), company.as_str())),
                }
            }
        }
        validate_request(&request)?;
        Ok(request)
    }
}

/// Rejects a request that carries no meetings at all
pub fn validate_request(request: &SchedulingRequest) -> Result<(), InputError> {
    if request.fixed_requests.is_empty() && request.free_requests.is_empty() {
        return Err(InputError::EmptyList { what: "meetings" });
    }
    Ok(())
}

/// Parses the Day/Time cells of a sheet row; "Undefined" in either means free
fn parse_preference(row: usize, day: &str, time: &str) -> Result<Option<(Day, HalfDayBlock)>, InputError> {
    let (day, time) = (day.trim(), time.trim());
    if day.is_empty() || time.is_empty() || day.eq_ignore_ascii_case(UNDEFINED) || time.eq_ignore_ascii_case(UNDEFINED) {
        return Ok(None);
    }
    let day: Day = day
        .parse()
        .map_err(|_| InputError::UnknownDay { row, value: day.to_string() })?;
    let block: HalfDayBlock = time
        .parse()
        .map_err(|_| InputError::UnknownBlock { row, value: time.to_string() })?;
    Ok(Some((day, block)))
}

/// Reads a newline separated list of names, skipping blank lines
pub fn load_name_list<P: AsRef<Path>>(path: P, what: &'static str) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    Ok(parse_name_list(&content, what)?)
}

pub fn parse_name_list(content: &str, what: &'static str) -> Result<Vec<String>, InputError> {
    let names: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    if names.is_empty() {
        return Err(InputError::EmptyList { what });
    }
    Ok(names)
}

/// Reads an availability sheet (`Name, Day, Time, Company...` with a header
/// row) into `roster`. Rows may have any number of company cells.
pub fn read_availability<R: Read>(reader: R, roster: &mut Roster) -> Result<(), Box<dyn std::error::Error>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    for (i, result) in reader.records().enumerate() {
        let record = result?;
        // Header is line 1
        let row = i + 2;

        let name = record.get(0).unwrap_or("").trim();
        if name.is_empty() {
            if record.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            return Err(InputError::MissingName { row }.into());
        }
        let preference = parse_preference(row, record.get(1).unwrap_or(""), record.get(2).unwrap_or(""))?;
        let companies: Vec<String> = record
            .iter()
            .skip(3)
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();

        roster.set_mentor(name, preference, &companies);
    }
    Ok(())
}

pub fn load_availability<P: AsRef<Path>>(path: P, roster: &mut Roster) -> Result<(), Box<dyn std::error::Error>> {
    let file = fs::File::open(path)?;
    read_availability(file, roster)
}

/// Loads a ready-made scheduling request from JSON
pub fn load_request_json<P: AsRef<Path>>(path: P) -> Result<SchedulingRequest, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let request: SchedulingRequest = serde_json::from_str(&content)?;
    validate_request(&request)?;
    Ok(request)
}
