use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use mptime::cli::{Cli, Commands};
use mptime::commands::migrate::MigrateCommand;
use mptime::formatting::FormattingConfig;
use mptime::MigrateError;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbosity);

    let code = match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            err.downcast_ref::<MigrateError>()
                .map_or(1, MigrateError::exit_code)
        }
    };
    std::process::exit(code);
}

fn run(command: Commands) -> Result<i32> {
    match command {
        Commands::Migrate {
            files,
            config,
            dry_run,
            format,
            plain,
        } => mptime::commands::migrate::handle_migrate(MigrateCommand {
            files,
            config,
            dry_run,
            format,
            formatting: create_formatting_config(plain),
        }),
        Commands::Convert { values } => {
            mptime::commands::convert::handle_convert(&values)?;
            Ok(0)
        }
        Commands::Init { force } => {
            let cwd = std::env::current_dir()?;
            mptime::commands::init::init_config(&cwd, force)?;
            Ok(0)
        }
    }
}

// Pure function to create formatting configuration
fn create_formatting_config(plain: bool) -> FormattingConfig {
    if plain {
        FormattingConfig::plain()
    } else {
        FormattingConfig::from_env()
    }
}

// -v: info, -vv: debug, -vvv: trace; RUST_LOG still wins when set
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}
