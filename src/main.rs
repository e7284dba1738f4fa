use std::process::ExitCode;

fn main() -> ExitCode {
    heritage::cli::run()
}
