//! Keyboard commands.

/// Commands that can be sent from the input thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Gc,
    Quit,
    Help,
    Unknown(String),
}

pub fn parse_command(input: &str) -> Command {
    match input.trim().to_lowercase().as_str() {
        "s" | "start" => Command::Start,
        "x" | "stop" => Command::Stop,
        "g" | "gc" => Command::Gc,
        "q" | "quit" | "exit" => Command::Quit,
        "help" | "h" | "?" => Command::Help,
        other => Command::Unknown(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("s"), Command::Start);
        assert_eq!(parse_command(" START "), Command::Start);
        assert_eq!(parse_command("x"), Command::Stop);
        assert_eq!(parse_command("gc"), Command::Gc);
        assert_eq!(parse_command("exit"), Command::Quit);
        assert_eq!(parse_command("?"), Command::Help);
    }

    #[test]
    fn test_unknown_command_keeps_input() {
        assert_eq!(
            parse_command("Leak"),
            Command::Unknown("leak".to_string())
        );
        assert_eq!(parse_command(""), Command::Unknown(String::new()));
    }
}
