//! psh - Standalone shell binary.

use psh::cli::CliArgs;
use psh::shell::Shell;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = CliArgs::parse_args();
    log::debug!("CLI arguments: {:?}", args);

    let mut shell = Shell::new();
    let exit_code = if let Some(command) = &args.command {
        shell.execute_command(command)
    } else if let Some(script) = &args.script {
        match shell.execute_script(script) {
            Ok(status) => status,
            Err(err) => {
                eprintln!("psh: {:#}", err);
                1
            }
        }
    } else {
        shell.run()
    };

    std::process::exit(exit_code);
}
