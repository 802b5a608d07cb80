//! Docker Monitor - start/stop a watched set of Docker containers

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use docker_monitor::cli::{self, Cli, Commands};
use docker_monitor::monitor::Monitor;
use docker_monitor::tui;

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::var("DOCKERMONITOR_DEBUG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter("docker_monitor=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    let Cli {
        config_dir,
        command,
    } = Cli::parse();
    let open_monitor = || Monitor::open(config_dir.as_deref());

    match command {
        // These don't need the watchlist or docker
        Some(Commands::Completion { shell }) => {
            generate(shell, &mut Cli::command(), "dmon", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::About) => {
            cli::print_about();
            Ok(())
        }
        Some(Commands::Status(args)) => cli::status::run(&mut open_monitor()?, args),
        Some(Commands::Start(args)) => cli::control::run_start(&mut open_monitor()?, args),
        Some(Commands::Stop(args)) => cli::control::run_stop(&mut open_monitor()?, args),
        Some(Commands::Apply(args)) => cli::control::run_apply(&mut open_monitor()?, args),
        Some(Commands::Watch { command }) => cli::watch::run(&mut open_monitor()?, command),
        None => tui::run(open_monitor()?).await,
    }
}
