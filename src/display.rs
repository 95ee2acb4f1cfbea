use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use csv::Writer;
use serde::Serialize;

use crate::schedule::types::{Company, Mentor, Schedule, TimeSlot};
use crate::schedule::{format_day, format_time};

/// One exported row: a mentor, the day of their first meeting and every meeting in time order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MentorRow {
    pub name: String,
    pub day: String,
    pub meetings: Vec<String>,
}

/// Groups a schedule per mentor, each list sorted by time slot
pub fn group_by_mentor(schedule: &Schedule) -> BTreeMap<Mentor, Vec<(TimeSlot, Company)>> {
    let mut grouped: BTreeMap<Mentor, Vec<(TimeSlot, Company)>> = BTreeMap::new();
    for assignment in schedule {
        grouped
            .entry(assignment.mentor.clone())
            .or_default()
            .push((assignment.slot, assignment.company.clone()));
    }
    for meetings in grouped.values_mut() {
        meetings.sort();
    }
    grouped
}

/// Formats a meeting cell as "H:MM AM: Company"
pub fn format_meeting(slot: &TimeSlot, company: &str) -> String {
    format!("{}: {}", format_time(slot), company)
}

/// Builds the export rows, mentors sorted by name
pub fn schedule_rows(schedule: &Schedule) -> Vec<MentorRow> {
    group_by_mentor(schedule)
        .into_iter()
        .filter_map(|(name, meetings)| {
            let day = format_day(meetings.first()?.0.day).to_string();
            let meetings = meetings
                .iter()
                .map(|(slot, company)| format_meeting(slot, company))
                .collect();
            Some(MentorRow { name, day, meetings })
        })
        .collect()
}

/// Header `Name, Day, Meeting 1 .. Meeting K`
pub fn header_row(meeting_columns: usize) -> Vec<String> {
    let mut header = vec!["Name".to_string(), "Day".to_string()];
    header.extend((1..=meeting_columns).map(|i| format!("Meeting {}", i)));
    header
}

/// Writes the schedule sheet to any writer. Rows shorter than the header are
/// left ragged, as in a hand-filled spreadsheet.
pub fn write_schedule_csv<W: Write>(
    writer: W,
    schedule: &Schedule,
    meeting_columns: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(writer);
    write_rows(&mut wtr, schedule, meeting_columns)?;
    wtr.flush()?;
    Ok(())
}

fn write_rows<W: Write>(
    wtr: &mut Writer<W>,
    schedule: &Schedule,
    meeting_columns: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    wtr.write_record(header_row(meeting_columns))?;
    for row in schedule_rows(schedule) {
        let mut record = vec![row.name, row.day];
        record.extend(row.meetings);
        wtr.write_record(&record)?;
    }
    Ok(())
}

/// Writes the schedule sheet to `path`
pub fn write_schedule_to_file<P: AsRef<Path>>(
    path: P,
    schedule: &Schedule,
    meeting_columns: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = std::fs::File::create(path)?;
    write_schedule_csv(file, schedule, meeting_columns)
}

/// Prints the schedule in a readable format
pub fn print_schedule(schedule: &Schedule) {
    println!("\n=== Meeting Schedule ===");
    println!("Total meetings scheduled: {}", schedule.len());
    for row in schedule_rows(schedule) {
        println!("\n{} ({})", row.name, row.day);
        for meeting in &row.meetings {
            println!("  {}", meeting);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::types::{Day, MeetingAssignment};

    fn meeting(mentor: &str, company: &str, day: Day, hour: u8, minute: u8) -> MeetingAssignment {
        MeetingAssignment {
            mentor: mentor.to_string(),
            company: company.to_string(),
            slot: TimeSlot { day, hour, minute },
        }
    }

    fn sample() -> Schedule {
        Schedule::from(vec![
            meeting("Bob", "Acme", Day::Wednesday, 12, 20),
            meeting("Alice", "Globex", Day::Monday, 9, 20),
            meeting("Bob", "Globex", Day::Wednesday, 12, 0),
            meeting("Alice", "Acme", Day::Monday, 9, 0),
        ])
    }

    #[test]
    fn test_group_by_mentor_sorts_by_time() {
        let grouped = group_by_mentor(&sample());
        let bob: Vec<&str> = grouped["Bob"].iter().map(|(_, c)| c.as_str()).collect();
        assert_eq!(bob, vec!["Globex", "Acme"]);
    }

    #[test]
    fn test_schedule_rows_format_cells() {
        let rows = schedule_rows(&sample());
        assert_eq!(
            rows,
            vec![
                MentorRow {
                    name: "Alice".into(),
                    day: "Mon".into(),
                    meetings: vec!["9:00 AM: Acme".into(), "9:20 AM: Globex".into()],
                },
                MentorRow {
                    name: "Bob".into(),
                    day: "Wed".into(),
                    meetings: vec!["12:00 PM: Globex".into(), "12:20 PM: Acme".into()],
                },
            ]
        );
    }

    #[test]
    fn test_csv_output_is_stable() {
        let mut out = Vec::new();
        write_schedule_csv(&mut out, &sample(), 3).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Name,Day,Meeting 1,Meeting 2,Meeting 3\n\
             Alice,Mon,9:00 AM: Acme,9:20 AM: Globex\n\
             Bob,Wed,12:00 PM: Globex,12:20 PM: Acme\n"
        );
    }

    #[test]
    fn test_empty_schedule_writes_header_only() {
        let mut out = Vec::new();
        write_schedule_csv(&mut out, &Schedule::new(), 1).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Name,Day,Meeting 1\n");
    }
}
