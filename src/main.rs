use std::process::ExitCode;

use blueprint_copy::output as out;

mod app;
mod logging;

fn main() -> ExitCode {
    let args = blueprint_copy::cli::parse();
    match app::run(args) {
        Ok(status) => ExitCode::from(status),
        Err(e) => {
            out::print_error(&format!("{e:#}"));
            ExitCode::from(app::exit_code_for(&e))
        }
    }
}
