use std::process::ExitCode;

use namekit::ui::output;

fn main() -> ExitCode {
    match namekit::cli::run() {
        Ok(code) => code,
        Err(e) => {
            output::error(format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
