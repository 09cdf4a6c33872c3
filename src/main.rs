use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use glasspane::config::{Command, Config, Settings};
use glasspane::launch::Launcher;
use glasspane::wrap::EditorRunner;

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Config::parse_args();

    // Setup logging
    setup_logging(cli.debug);

    // Load settings
    let mut settings = Settings::load(cli.config.as_ref())?;
    settings.merge_cli(&cli);
    settings.validate();

    match cli.command {
        Some(Command::Wrap { args }) => {
            let code = EditorRunner::new(settings).run(&args)?;
            std::process::exit(code);
        }
        Some(Command::Launch { args }) => Launcher::new(settings).run(&args),
        None => Launcher::new(settings).run(&[]),
    }
}

fn setup_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("glasspane=debug")
    } else {
        EnvFilter::new("glasspane=info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
