// ipkeep: public address tracker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Update | Show | Resolve | Push | Options | Inis | Version
//! ```

use std::process::ExitCode;

use ipkeep::cli::global::GlobalOptions;
use ipkeep::cli::{self, Command};
use ipkeep::cmd::config::{run_inis_command, run_options_command};
use ipkeep::cmd::push::run_push_command;
use ipkeep::cmd::resolve::run_resolve_command;
use ipkeep::cmd::tracker::{run_show_command, run_update_command};
use ipkeep::config::Config;
use ipkeep::config::loader::ConfigLoader;
use ipkeep::logging::init_logging;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            return ExitCode::SUCCESS;
        }
        Some(Command::Inis) => {
            return match build_config_loader(&cli.global) {
                Ok(loader) => {
                    run_inis_command(&loader.format_loaded_files());
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error: {e:#}");
                    ExitCode::FAILURE
                }
            };
        }
        _ => {}
    }

    let config = match load_config(&cli.global) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match init_logging(&config.global.log_config()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli, &config).await
}

async fn dispatch_command(cli: &cli::Cli, config: &Config) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Options) => {
            run_options_command(config);
            Ok(())
        }
        Some(Command::Resolve) => run_resolve_command(config).await,
        Some(Command::Update(args)) => run_update_command(args, config).await,
        Some(Command::Show(args)) => run_show_command(args, config),
        Some(Command::Push(args)) => run_push_command(args, config),
        // Handled before the configuration is loaded
        Some(Command::Version | Command::Inis) => Ok(()),
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> ipkeep::error::Result<ConfigLoader> {
    let mut loader = ConfigLoader::new().add_toml_file_optional("ipkeep.toml");
    for ini_path in &global.inis {
        loader = loader.add_toml_file(ini_path);
    }
    loader = loader.with_env_prefix("IPKEEP");
    for assignment in global.to_config_overrides() {
        loader = loader.set_override(&assignment)?;
    }
    Ok(loader)
}

fn load_config(global: &GlobalOptions) -> ipkeep::error::Result<Config> {
    build_config_loader(global)?.build()
}
