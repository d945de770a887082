//! Imagegen - prompt-to-image CLI over a hosted generation function.

mod adapters;
mod cassette;
mod cli;
mod config;
mod context;
mod error;
mod logging;
mod output;
mod ports;
mod view;

use std::path::Path;
use std::process;

use clap::Parser;

use crate::adapters::live::console::ConsoleNotifier;
use crate::cassette::config::{recording_enabled, RECORD_ENV, REPLAY_ENV};
use crate::cli::{Cli, PromptSource};
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::ImageError;
use crate::view::ImageGeneratorView;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli).await {
        Ok(()) => {}
        Err(Failure::Notified) => process::exit(1),
        Err(Failure::Unreported(e)) => {
            eprintln!("Error: {}", e.user_message());
            process::exit(1);
        }
    }
}

/// How a run failed.
enum Failure {
    /// The view already showed the error through its notifier.
    Notified,
    /// Nobody has told the user yet.
    Unreported(ImageError),
}

impl From<ImageError> for Failure {
    fn from(e: ImageError) -> Self {
        Self::Unreported(e)
    }
}

impl From<std::io::Error> for Failure {
    fn from(e: std::io::Error) -> Self {
        Self::Unreported(e.into())
    }
}

async fn run(cli: Cli) -> Result<(), Failure> {
    if cli.list_examples {
        print!("{}", cli::example_listing());
        return Ok(());
    }

    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path).map_err(ImageError::Config)?;

    let prompt = cli.resolve_prompt()?;

    // Create context based on mode (live / recording / replaying)
    let replay_path = std::env::var(REPLAY_ENV).ok();
    let is_recording = recording_enabled(std::env::var(RECORD_ENV).ok().as_deref());

    let (ctx, recording_session) = if let Some(ref cassette_path) = replay_path {
        log::debug!("replaying from {cassette_path}");
        (ServiceContext::replaying(Path::new(cassette_path))?, None)
    } else if is_recording {
        log::debug!("recording mode enabled");
        let (ctx, session) = ServiceContext::recording(&config)?;
        (ctx, Some(session))
    } else {
        (ServiceContext::live(&config)?, None)
    };

    let mut view = ImageGeneratorView::from_context(ctx, Box::new(ConsoleNotifier));
    match prompt {
        PromptSource::Text(text) => view.set_prompt(text),
        PromptSource::Example(index) => {
            let text = view.select_example(index)?;
            log::info!("using example prompt: {text}");
        }
    }

    let outcome = view.generate().await.map(str::to_string);

    // Finish recording whether or not generation succeeded
    if let Some(session) = recording_session {
        match session.finish() {
            Ok(path) => log::info!("cassette saved: {}", path.display()),
            Err(e) => log::warn!("failed to save cassette: {e}"),
        }
    }

    println!("{}", outcome.map_err(|_| Failure::Notified)?);

    if cli.download {
        let dir = cli.output_dir.as_deref().unwrap_or(&config.defaults.output_dir);
        if let Some(path) = view.download(dir).await.map_err(|_| Failure::Notified)? {
            eprintln!("Saved: {}", path.display());
        }
    }

    Ok(())
}
