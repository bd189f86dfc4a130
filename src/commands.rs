//! Parsing of the host shell's command lines.

use std::collections::BTreeSet;

use hotelpush_bridge::notification::{
    ActionIdentifier, Capability, DeviceToken, NotificationOption, NotificationPayload,
    UnknownOptionError,
};

pub const HELP: &str = "\
commands:
  setup                       request permission, obtain and register the device token
  auth [alert|sound|badge..]  request the given capabilities (all when omitted)
  token                       obtain a device token from the platform
  register <token> <user>     register a device token for a user
  push [option..]             trigger a push (mutable-content, content-available)
  action <id>                 simulate pressing a notification button
  present [json object]       simulate a notification arriving in the foreground
  config                      print the active configuration
  help                        print this message
  quit                        exit";

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Setup,
    Authorize(BTreeSet<Capability>),
    Token,
    Register { token: DeviceToken, user_id: String },
    Push(Vec<NotificationOption>),
    Action(ActionIdentifier),
    Present(NotificationPayload),
    Config,
    Help,
    Quit,
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),
    #[error("`{command}` expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error(transparent)]
    Option(#[from] UnknownOptionError),
    #[error("{0}")]
    Capability(String),
    #[error("invalid payload: {0}")]
    Payload(String),
}

fn all_capabilities() -> BTreeSet<Capability> {
    BTreeSet::from([Capability::Alert, Capability::Sound, Capability::Badge])
}

/// Parses one input line.
pub fn parse(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let mut args = rest.split_whitespace();

    match name {
        "" => Err(CommandError::Empty),
        "setup" => Ok(Command::Setup),
        "auth" => {
            let capabilities = args
                .map(str::parse)
                .collect::<Result<BTreeSet<Capability>, _>>()
                .map_err(CommandError::Capability)?;
            if capabilities.is_empty() {
                Ok(Command::Authorize(all_capabilities()))
            } else {
                Ok(Command::Authorize(capabilities))
            }
        }
        "token" => Ok(Command::Token),
        "register" => match (args.next(), args.next()) {
            (Some(token), Some(user_id)) => Ok(Command::Register {
                token: DeviceToken::new(token),
                user_id: user_id.to_string(),
            }),
            _ => Err(CommandError::MissingArgument {
                command: "register",
                expected: "a token and a user id",
            }),
        },
        "push" => Ok(Command::Push(
            args.map(str::parse)
                .collect::<Result<Vec<NotificationOption>, _>>()?,
        )),
        "action" => args
            .next()
            .map(|id| Command::Action(id.into()))
            .ok_or(CommandError::MissingArgument {
                command: "action",
                expected: "an action identifier",
            }),
        "present" => {
            let rest = rest.trim();
            if rest.is_empty() {
                return Ok(Command::Present(NotificationPayload::new()));
            }
            serde_json::from_str(rest)
                .map(Command::Present)
                .map_err(|e| CommandError::Payload(e.to_string()))
        }
        "config" => Ok(Command::Config),
        "help" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}
