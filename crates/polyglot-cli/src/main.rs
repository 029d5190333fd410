use std::process::ExitCode;

fn main() -> ExitCode {
    let registry = polyglot_cli::default_registry();
    let matches = registry.build_cli().get_matches();

    let mut out = std::io::stdout().lock();
    match registry.execute(&matches, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("polyglot: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
