use std::{
    env,
    io::{self, Write},
    process::{Command, Stdio},
    sync::Arc,
};

use chrono::{Local, NaiveDate};

use studio_deadlines::{
    calendar::{DeadlineCalendar, EventsForDate},
    dashboard::Role,
    sync::deadline_loader::DeadlineLoader,
    CalendarEvent,
};

const USAGE: &str = "Usage: studio-deadlines [--agenda [YYYY-MM-DD]] [--role ROLE]";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CliOptions {
    pub agenda: Option<NaiveDate>,
    pub role: Option<Role>,
}

pub fn parse_cli_mode() -> Result<CliOptions, String> {
    parse_args(env::args().skip(1), Local::now().date_naive())
}

fn parse_args(args: impl Iterator<Item = String>, today: NaiveDate) -> Result<CliOptions, String> {
    let mut options = CliOptions { agenda: None, role: None };
    let mut args = args.peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--agenda" => {
                let target_date = match args.next_if(|next| !next.starts_with("--")) {
                    Some(date_str) => NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
                        .map_err(|_| format!("Invalid date '{}'. Use YYYY-MM-DD.", date_str))?,
                    None => today,
                };
                options.agenda = Some(target_date);
            }
            "--role" => {
                let role = args.next().ok_or("--role requires a role name")?;
                options.role = Some(role.parse()?);
            }
            "--help" => {
                println!("{}", USAGE);
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown argument: {}", arg)),
        }
    }

    Ok(options)
}

pub fn usage() -> &'static str {
    USAGE
}

pub async fn run_agenda_mode(
    date: NaiveDate,
    date_format: &str,
    loader: Arc<DeadlineLoader>,
) -> Result<(), io::Error> {
    let profile = loader.profile();
    let mut calendar = DeadlineCalendar::new(profile.grouping, profile.dedup);

    loader.load_into(&mut calendar).await;
    for kind in loader.sources() {
        if !calendar.is_loaded(kind) {
            eprintln!("Could not load {} deadlines, see the log for details", kind.as_str());
        }
    }

    let agenda = format_agenda_text(date, date_format, &calendar.select_date(date));
    display_with_pager(&agenda)
}

fn format_agenda_text(date: NaiveDate, date_format: &str, events: &EventsForDate) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Deadlines – {}", date.format(date_format)));
    lines.push(String::new());

    if events.is_empty() {
        lines.push("Nothing due.".to_string());
        return lines.join("\n");
    }

    match events {
        EventsForDate::Merged(events) => {
            lines.extend(events.iter().map(agenda_line));
        }
        EventsForDate::ByKind(groups) => {
            for (kind, events) in groups {
                lines.push(format!("{}:", kind.heading()));
                lines.extend(events.iter().map(agenda_line));
                lines.push(String::new());
            }
            lines.pop();
        }
    }

    lines.join("\n")
}

fn agenda_line(event: &CalendarEvent) -> String {
    format!("- {}", event.label())
}

fn display_with_pager(text: &str) -> Result<(), io::Error> {
    let pager_value = env::var("PAGER").unwrap_or_else(|_| "less".to_string());
    let mut parts = pager_value.split_whitespace();
    let cmd = match parts.next() {
        Some(c) => c,
        None => {
            println!("{text}");
            return Ok(());
        }
    };
    let args: Vec<&str> = parts.collect();

    match Command::new(cmd)
        .args(&args)
        .stdin(Stdio::piped())
        .spawn()
    {
        Ok(mut child) => {
            if let Some(stdin) = child.stdin.as_mut() {
                stdin.write_all(text.as_bytes())?;
            }
            let _ = child.wait();
        }
        Err(_) => {
            println!("{text}");
        }
    }

    Ok(())
}
