use std::process::ExitCode;

use git_cli::ui::output;

fn main() -> ExitCode {
    match git_cli::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(err);
            ExitCode::FAILURE
        }
    }
}
