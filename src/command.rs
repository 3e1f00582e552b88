use rustplot::config::MAX_SAMPLES;
use thiserror::Error;

/// One line typed into an interactive shell.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Quit,
    Clear,
    Help,
    Range(f64, f64),
    Ceiling(f64),
    /// `None` goes back to one sample per pixel.
    Samples(Option<usize>),
    Plot(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    #[error("Usage: range <x_min> <x_max>")]
    RangeUsage,
    #[error("x_min must be less than x_max")]
    EmptyRange,
    #[error("Usage: ceiling <positive number>")]
    CeilingUsage,
    #[error("Usage: samples <count from 2 to {}> | auto", MAX_SAMPLES)]
    SamplesUsage,
}

impl Command {
    /// Returns `None` for blank input.
    pub fn parse(input: &str) -> Option<Result<Command, CommandError>> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        let mut words = input.split_whitespace();
        let keyword = words.next().unwrap_or_default().to_lowercase();
        let args: Vec<&str> = words.collect();

        let command = match keyword.as_str() {
            "quit" | "exit" | "q" if args.is_empty() => Ok(Command::Quit),
            "clear" | "reset" if args.is_empty() => Ok(Command::Clear),
            "help" if args.is_empty() => Ok(Command::Help),
            "range" => parse_range(&args),
            "ceiling" => match args.as_slice() {
                [c] => match c.parse::<f64>() {
                    Ok(c) if c.is_finite() && c > 0.0 => Ok(Command::Ceiling(c)),
                    _ => Err(CommandError::CeilingUsage),
                },
                _ => Err(CommandError::CeilingUsage),
            },
            "samples" => match args.as_slice() {
                [a] if a.eq_ignore_ascii_case("auto") => Ok(Command::Samples(None)),
                [n] => match n.parse::<usize>() {
                    Ok(n) if (2..=MAX_SAMPLES).contains(&n) => Ok(Command::Samples(Some(n))),
                    _ => Err(CommandError::SamplesUsage),
                },
                _ => Err(CommandError::SamplesUsage),
            },
            _ => Ok(Command::Plot(input.to_string())),
        };
        Some(command)
    }
}

fn parse_range(args: &[&str]) -> Result<Command, CommandError> {
    let [min, max] = args else {
        return Err(CommandError::RangeUsage);
    };
    let (Ok(min), Ok(max)) = (min.parse::<f64>(), max.parse::<f64>()) else {
        return Err(CommandError::RangeUsage);
    };
    if !(min.is_finite() && max.is_finite()) {
        return Err(CommandError::RangeUsage);
    }
    if min >= max {
        return Err(CommandError::EmptyRange);
    }
    Ok(Command::Range(min, max))
}
