use std::process::ExitCode;

mod cli;

fn main() -> ExitCode {
	env_logger::init();
	cli::run()
}
