use std::process::ExitCode;

fn main() -> ExitCode {
    let matches = perfgraph_cli::cli().get_matches();
    perfgraph_cli::init_tracing(matches.get_count("verbose"), matches.get_flag("log-json"));

    let stdout = std::io::stdout();
    match perfgraph_cli::run(&matches, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}
