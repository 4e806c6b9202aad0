use std::process::ExitCode;

fn main() -> ExitCode {
    safari_cli::run()
}
