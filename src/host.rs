//! Interactive stand-in for the platform application.
//!
//! The shell reads commands from stdin and forwards them to the backend,
//! playing the part of the platform callbacks (button presses, foreground
//! deliveries). Backend events are logged from a separate thread.

use std::{
    io::{BufRead, Write},
    thread::{self, JoinHandle},
};

use anyhow::Context;
use hotelpush_bridge::{
    MessageFromBackend, MessageToBackend,
    notification::{Completion, NotificationType},
};
use log::{error, info, warn};
use tokio::sync::mpsc::{Receiver, Sender};

use crate::commands::{self, Command};

/// Logs every backend event until the backend drops its sender.
pub fn spawn_event_logger(mut rx: Receiver<MessageFromBackend>) -> JoinHandle<()> {
    thread::spawn(move || {
        while let Some(message) = rx.blocking_recv() {
            match message {
                MessageFromBackend::NotificationMessage(message) => {
                    match message.notification_type {
                        NotificationType::Error => error!("{}", message.message),
                        NotificationType::Warning => warn!("{}", message.message),
                        NotificationType::Info | NotificationType::Success => {
                            info!("{}", message.message)
                        }
                    }
                }
                MessageFromBackend::ConfigurationResponse(config) => {
                    info!("Configuration: {config:#?}")
                }
                MessageFromBackend::AuthorizationResponse(outcome) => {
                    info!("Authorization: {outcome:?}")
                }
                MessageFromBackend::DeviceTokenObtained(token) => info!("Device token: {token}"),
                MessageFromBackend::RegistrationResponse(result) => {
                    info!("Registration: {result:?}")
                }
                MessageFromBackend::TriggerResponse(body) => info!("Response string: {body:?}"),
            }
        }
    })
}

fn forward(tx: &Sender<MessageToBackend>, message: MessageToBackend) -> anyhow::Result<()> {
    tx.blocking_send(message)
        .context("notification backend stopped")
}

/// Runs the startup sequence, then executes stdin commands until `quit` or
/// end of input. Returning drops `tx`, which stops the backend.
pub fn run_shell(tx: Sender<MessageToBackend>) -> anyhow::Result<()> {
    forward(&tx, MessageToBackend::SetUpNotifications)?;
    println!("{}", commands::HELP);

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let command = match commands::parse(&line?) {
            Ok(command) => command,
            Err(commands::CommandError::Empty) => continue,
            Err(e) => {
                warn!("{e}");
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => println!("{}", commands::HELP),
            Command::Setup => forward(&tx, MessageToBackend::SetUpNotifications)?,
            Command::Authorize(capabilities) => {
                forward(&tx, MessageToBackend::AuthorizationRequest(capabilities))?
            }
            Command::Token => forward(&tx, MessageToBackend::DeviceTokenRequest)?,
            Command::Register { token, user_id } => {
                forward(&tx, MessageToBackend::RegisterDeviceToken { token, user_id })?
            }
            Command::Push(options) => forward(&tx, MessageToBackend::TriggerRequest(options))?,
            Command::Config => forward(&tx, MessageToBackend::ConfigurationRequest)?,
            Command::Action(action_id) => {
                let (completion, completed) = Completion::new();
                forward(
                    &tx,
                    MessageToBackend::ActionReceived {
                        action_id: action_id.clone(),
                        completion,
                    },
                )?;
                completed
                    .blocking_recv()
                    .context("backend dropped the action completion")?;
                info!("Action {action_id} completed");
            }
            Command::Present(payload) => {
                let (completion, presented) = Completion::new();
                forward(
                    &tx,
                    MessageToBackend::WillPresent {
                        payload,
                        completion,
                    },
                )?;
                let options = presented
                    .blocking_recv()
                    .context("backend dropped the presentation completion")?;
                info!("Presenting with {options:?}");
            }
        }
    }

    Ok(())
}
