use std::io;

use crossbeam_channel::select;
use thiserror::Error;
use tracing::info;

use dispatcher::Dispatcher;
use shared_resources::config::SimulationConfig;
use shared_resources::error::{ConfigError, DispatchError};

mod debug;
mod input;

use debug::Debug;
use input::Command;

#[derive(Error, Debug)]
pub enum ShellError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),
}

pub fn run() -> Result<(), ShellError> {
    // READ CONFIGURATION
    let config = SimulationConfig::get()?;

    // INITIALIZE DISPATCHER AND MOVEMENT WORKERS
    let (mut dispatcher, event_rx) = Dispatcher::new(&config.elevator)?;

    // INITIALIZE INPUT THREAD
    let command_rx = input::init()?;

    let mut debug = Debug::new();
    debug.printstatus(&dispatcher)?;

    loop {
        select! {
            recv(command_rx) -> msg => {
                // stdin closed
                let Ok(parsed) = msg else { break };
                debug.input_echoed();
                match parsed {
                    Ok(Command::Request(floor)) => {
                        if let Err(e) = dispatcher.submit_request(floor) {
                            debug.log(e.to_string());
                        }
                    },
                    Ok(Command::Move) => {
                        if !dispatcher.has_pending() {
                            debug.log(String::from("No pending requests to move."));
                        }
                        dispatcher.dispatch_pending();
                    },
                    Ok(Command::Reset) => dispatcher.reset(),
                    Ok(Command::Quit) => break,
                    Err(e) => debug.log(e.to_string()),
                }
            },
            recv(event_rx) -> msg => {
                let Ok(event) = msg else { break };
                debug.record(event);
            },
        }
        debug.printstatus(&dispatcher)?;
    }

    info!(dispatched = dispatcher.dispatched_count(), "STOPPING PROGRAM...");
    Ok(())
}
