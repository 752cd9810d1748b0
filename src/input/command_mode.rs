use chrono::NaiveDate;

#[derive(Debug, PartialEq)]
pub enum Command {
    Quit,
    Refresh,
    Goto(NaiveDate),
    Meet(Option<String>),
    Theme(String),
    Help,
    Error(String),
}

pub fn parse_command(input: &str) -> Command {
    let Some(command_text) = input.trim().strip_prefix(':') else {
        return Command::Error("Commands must start with ':'".to_string());
    };

    let parts: Vec<&str> = command_text.split_whitespace().collect();
    let Some((&name, args)) = parts.split_first() else {
        return Command::Error("Empty command".to_string());
    };

    match name {
        "q" | "quit" => Command::Quit,
        "r" | "refresh" => Command::Refresh,
        "help" => Command::Help,
        "goto" => match args.first() {
            None => Command::Error("goto requires a date argument".to_string()),
            Some(arg) => NaiveDate::parse_from_str(arg, "%Y-%m-%d")
                .map(Command::Goto)
                .unwrap_or_else(|_| Command::Error(format!("Invalid date format: {}", arg))),
        },
        "meet" => {
            if args.is_empty() {
                Command::Meet(None)
            } else {
                Command::Meet(Some(args.join(" ")))
            }
        }
        "theme" => match args.first() {
            None => Command::Error("theme requires a theme name".to_string()),
            Some(theme) => Command::Theme(theme.to_string()),
        },
        _ => Command::Error(format!("Unknown command: {}", name)),
    }
}
