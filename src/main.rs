use std::env;
use std::process::ExitCode;

use rocks_core::config::RunConfig;
use rocks_core::rocks;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let print_ast = args.iter().any(|arg| arg == "--ast");
    let script: Vec<&String> = args.iter().filter(|arg| arg.as_str() != "--ast").collect();

    let config = RunConfig::default();
    let mut rocks = rocks::new();

    match script.len() {
        0 => {
            rocks.run_prompt(&config, print_ast);
            ExitCode::SUCCESS
        }
        1 => rocks.run_file(script[0], &config, print_ast),
        _ => {
            println!("Usage: rocks [script]");
            ExitCode::from(64)
        }
    }
}
