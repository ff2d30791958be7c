use std::process::ExitCode;

use tracing::error;

mod modules;

fn main() -> ExitCode {
    shared_resources::logging::init();

    match modules::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        },
    }
}
