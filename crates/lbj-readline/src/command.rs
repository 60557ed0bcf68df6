//! Parsing of REPL input lines.

/// Standard requests offered on the welcome screen, one per specialist.
pub const STARTER_PROMPTS: [&str; 4] = [
    "Process these leads and draft qualification steps",
    "Create a creative concept for a luxury brand refresh",
    "Audit my project timeline and identify risks",
    "Draft a multi-channel campaign for a Q3 product launch",
];

/// Slash commands understood by the REPL, with a one-line description.
pub const COMMANDS: &[(&str, &str)] = &[
    ("/attach", "Attach a file to the next request: /attach <path>"),
    ("/detach", "Drop the pending attachment"),
    ("/example", "Load a standard request for editing: /example <1-4>"),
    ("/status", "Show the specialist grid"),
    ("/history", "Replay this session's conversation"),
    ("/help", "Show this help"),
    ("/quit", "Exit"),
];

/// One line of user input, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Empty,
    Attach(Option<String>),
    Detach,
    /// A starter prompt to pre-fill, or `None` to list them.
    Example(Option<&'static str>),
    Status,
    History,
    Help,
    Quit,
    /// Anything starting with `/` that is not a known command.
    Unknown(String),
    /// Free text to route. Carried untrimmed.
    Prompt(String),
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }
        if matches!(trimmed, "quit" | "exit") {
            return Self::Quit;
        }
        if !trimmed.starts_with('/') {
            return Self::Prompt(line.to_string());
        }

        let (name, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (trimmed, ""),
        };

        match name {
            "/attach" => Self::Attach((!rest.is_empty()).then(|| rest.to_string())),
            "/detach" => Self::Detach,
            "/example" => Self::Example(
                rest.parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| STARTER_PROMPTS.get(i).copied()),
            ),
            "/status" => Self::Status,
            "/history" => Self::History,
            "/help" => Self::Help,
            "/quit" | "/exit" => Self::Quit,
            other => Self::Unknown(other.to_string()),
        }
    }
}
