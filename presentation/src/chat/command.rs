//! REPL line parsing

use livechat_application::UserAction;
use livechat_domain::LogFilter;

/// What a line typed at the chat prompt asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplInput {
    /// Forward to the conversation.
    Action(UserAction),
    /// Print the protocol log, switching the view filter first if one is given.
    Logs(Option<LogFilter>),
    Help,
    Unknown(String),
}

/// Parse a prompt line. Anything not starting with `/` is chat text and is
/// passed through verbatim; blank lines are forwarded too and ignored by the
/// conversation.
pub fn parse_line(line: &str) -> ReplInput {
    let trimmed = line.trim();
    if !trimmed.starts_with('/') {
        return ReplInput::Action(UserAction::Submit(line.to_string()));
    }

    let mut words = trimmed.split_whitespace();
    let command = words.next().unwrap_or_default();
    let arg = words.next();

    match command {
        "/end" => ReplInput::Action(UserAction::End),
        "/export" => ReplInput::Action(UserAction::Export),
        "/quit" | "/exit" | "/q" => ReplInput::Action(UserAction::Quit),
        "/help" | "/h" | "/?" => ReplInput::Help,
        "/logs" => match arg.map(str::parse::<LogFilter>) {
            None => ReplInput::Logs(None),
            Some(Ok(filter)) => ReplInput::Logs(Some(filter)),
            Some(Err(_)) => ReplInput::Unknown(trimmed.to_string()),
        },
        _ => ReplInput::Unknown(trimmed.to_string()),
    }
}

pub const HELP: &str = "\
Commands:
  /end              - Finish the conversation and ask for an evaluation
  /export           - Save the concluded conversation
  /logs [filter]    - Show the protocol log, switching filter if given
                      (tools, conversations, none)
  /help, /h, /?     - Show this help
  /quit, /exit, /q  - Exit chat";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_submitted_verbatim() {
        assert_eq!(
            parse_line("  hello there "),
            ReplInput::Action(UserAction::Submit("  hello there ".to_string()))
        );
        assert_eq!(
            parse_line(""),
            ReplInput::Action(UserAction::Submit(String::new()))
        );
    }

    #[test]
    fn test_commands() {
        assert_eq!(parse_line("/end"), ReplInput::Action(UserAction::End));
        assert_eq!(parse_line(" /export "), ReplInput::Action(UserAction::Export));
        assert_eq!(parse_line("/q"), ReplInput::Action(UserAction::Quit));
        assert_eq!(parse_line("/?"), ReplInput::Help);
    }

    #[test]
    fn test_logs_filter() {
        assert_eq!(parse_line("/logs"), ReplInput::Logs(None));
        assert_eq!(
            parse_line("/logs tools"),
            ReplInput::Logs(Some(LogFilter::Tools))
        );
        assert_eq!(
            parse_line("/logs bogus"),
            ReplInput::Unknown("/logs bogus".to_string())
        );
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            parse_line("/models"),
            ReplInput::Unknown("/models".to_string())
        );
    }
}
