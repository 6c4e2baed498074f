//! Command-line entry point (native).

#[cfg(feature = "native")]
mod cli {
    use clap::{Parser, Subcommand};
    use floorplan_app::{App, AppConfig, AppError, Session, ShortcutRegistry};
    use floorplan_core::storage::DesignPublisher;
    use std::path::PathBuf;
    use std::sync::Arc;

    /// Headless floor-plan editor.
    #[derive(Debug, Parser)]
    #[command(name = "floorplan", version, about)]
    pub struct Cli {
        /// Path to a JSON config file
        #[arg(long, short, env = "FLOORPLAN_CONFIG")]
        pub config: Option<PathBuf>,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Subcommand)]
    pub enum Command {
        /// Replay a recorded session and publish the result to the shared store
        Replay {
            /// Session file with UI actions and input events
            session: PathBuf,
            /// Write an SVG preview of the final plan
            #[arg(long)]
            svg: Option<PathBuf>,
            /// Store directory, overriding the config
            #[arg(long)]
            data_dir: Option<PathBuf>,
        },
        /// List keyboard shortcuts
        Shortcuts,
    }

    pub fn run(cli: Cli) -> Result<(), AppError> {
        let mut config = AppConfig::load(cli.config.as_deref())?;
        match cli.command {
            Command::Shortcuts => {
                ShortcutRegistry::print_all();
                Ok(())
            }
            Command::Replay { session, svg, data_dir } => {
                if data_dir.is_some() {
                    config.data_dir = data_dir;
                }
                log::info!("Starting {}", config.title);

                let session = Session::load(&session)?;
                let mut app = App::new(config);
                let report = app.replay(&session);
                if !report.rejected.is_empty() {
                    log::warn!("{} steps were rejected", report.rejected.len());
                }

                let storage = Arc::new(app.open_storage()?);
                let mut publisher = DesignPublisher::new(storage);
                if pollster::block_on(app.publish(&mut publisher))? {
                    log::info!("Design and cost records published");
                }

                if let Some(path) = svg {
                    let document = app.render_svg()?;
                    std::fs::write(&path, document).map_err(|source| AppError::Io { path: path.clone(), source })?;
                }

                println!("{}", app.status_line());
                Ok(())
            }
        }
    }
}

#[cfg(feature = "native")]
fn main() {
    use clap::Parser;

    env_logger::init();

    if let Err(e) = cli::run(cli::Cli::parse()) {
        log::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
