use crate::form::submission::MentorSubmission;
use crate::parser::UNDEFINED;
use std::path::Path;
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::io::Write;

/// Appends a single mentor submission to the availability sheet, in the same
/// `Name, Day, Time, Company...` layout the parser reads
pub fn export_submission_to_csv(
    submission: &MentorSubmission,
    csv_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let file_exists = csv_path.exists();

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(csv_path)?;

    if !file_exists {
        writeln!(file, "Name,Day,Time,Companies")?;
    }

    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_writer(file);

    let (day, time) = match submission.preference() {
        Some((day, block)) => (day.to_string(), block.to_string()),
        None => (UNDEFINED.to_string(), UNDEFINED.to_string()),
    };

    let mut record = vec![submission.name.trim().to_string(), day, time];
    record.extend(submission.companies.iter().map(|c| c.trim().to_string()));
    wtr.write_record(&record)?;

    wtr.flush()?;
    Ok(())
}
