use std::process::ExitCode;

fn main() -> ExitCode {
    pricecheck_cli::run()
}
