mod config;
mod parser;
mod schedule;
mod display;
mod form;
mod web;

use std::error::Error;
use std::path::{Path, PathBuf};

use log::{error, info};

use config::SchedulerConfig;
use display::{print_schedule, write_schedule_to_file};
use parser::{load_availability, load_name_list, load_request_json, Roster};
use schedule::{solve, SchedulingError, SchedulingRequest};

const USAGE: &str = "usage: mentor-scheduler <availability.csv|request.json> [--mentors FILE] [--companies FILE] [--output FILE]\n       mentor-scheduler web [port]";

/// Command line options for a one-shot run
struct CliArgs {
    input: PathBuf,
    mentors: Option<PathBuf>,
    companies: Option<PathBuf>,
    output: PathBuf,
}

fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut input = None;
    let mut mentors = None;
    let mut companies = None;
    let mut output = PathBuf::from("output.csv");

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .map(PathBuf::from)
                .ok_or_else(|| format!("{} needs a file argument", flag))
        };
        match arg.as_str() {
            "--mentors" => mentors = Some(value("--mentors")?),
            "--companies" => companies = Some(value("--companies")?),
            "--output" => output = value("--output")?,
            flag if flag.starts_with("--") => return Err(format!("unknown option {}", flag)),
            path if input.is_none() => input = Some(PathBuf::from(path)),
            extra => return Err(format!("unexpected argument {}", extra)),
        }
    }

    Ok(CliArgs {
        input: input.ok_or_else(|| "missing input file".to_string())?,
        mentors,
        companies,
        output,
    })
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// Builds the scheduling request from a JSON request or an availability sheet.
/// Empty rosters and requests without meetings are rejected.
fn load_request(input: &Path, roster: &mut Roster) -> Result<SchedulingRequest, Box<dyn Error>> {
    if is_json(input) {
        info!("Loading scheduling request from {}", input.display());
        let request = load_request_json(input)?;
        for pre in &request.fixed_requests {
            roster.add_company(&pre.request.company);
        }
        for free in &request.free_requests {
            roster.add_company(&free.company);
        }
        Ok(request)
    } else {
        info!("Loading availability from {}", input.display());
        load_availability(input, roster)?;
        info!("Loaded {} mentors and {} companies", roster.mentors.len(), roster.companies.len());
        Ok(roster.to_request()?)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let config = SchedulerConfig::from_env()?;

    // Web mode
    if args.len() > 1 && args[1] == "web" {
        let port = args.get(2)
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8080);
        let password = std::env::var("ADMIN_PASSWORD")
            .unwrap_or_else(|_| "admin123".to_string());
        let availability = std::env::var("AVAILABILITY_CSV")
            .unwrap_or_else(|_| "availability.csv".to_string());

        info!("Starting web server on port {}", port);
        info!("Access the site at http://localhost:{}", port);

        web::start_server(port, web::AppState::new(password, PathBuf::from(availability), config)).await?;
        return Ok(());
    }

    let cli = match parse_args(&args[1..]) {
        Ok(cli) => cli,
        Err(message) => {
            eprintln!("{}\n{}", message, USAGE);
            std::process::exit(2);
        }
    };

    let mentors = match &cli.mentors {
        Some(path) => load_name_list(path, "mentors")?,
        None => Vec::new(),
    };
    let companies = match &cli.companies {
        Some(path) => load_name_list(path, "companies")?,
        None => Vec::new(),
    };
    let mut roster = Roster::new(mentors, companies);

    let request = load_request(&cli.input, &mut roster)?;

    let schedule = match solve(&request, &config) {
        Ok(schedule) => schedule,
        Err(e @ SchedulingError::NoFeasibleSchedule { .. }) => {
            error!("{}", e);
            println!("No solution found");
            return Ok(());
        }
    };

    print_schedule(&schedule);
    write_schedule_to_file(&cli.output, &schedule, roster.companies.len())?;
    println!("\nSchedule saved to {}", cli.output.display());

    Ok(())
}
