//! CLI argument parsing with clap.

use std::path::PathBuf;

use clap::Parser;

use crate::view::EXAMPLE_PROMPTS;

/// Highest accepted `--example` number.
const LAST_EXAMPLE: i64 = 4;
const _: () = assert!(EXAMPLE_PROMPTS.len() == 4, "LAST_EXAMPLE must match EXAMPLE_PROMPTS");

/// Generate an image from a text prompt and optionally download it.
#[derive(Parser, Debug)]
#[command(name = "imagegen", version, about)]
pub struct Cli {
    /// Text prompt describing the desired image.
    #[arg(conflicts_with_all = ["prompt_file", "example"])]
    pub prompt: Option<String>,

    /// Path to a file containing the prompt text.
    #[arg(short = 'p', long, conflicts_with_all = ["prompt", "example"])]
    pub prompt_file: Option<String>,

    /// Use example prompt N (see --list-examples).
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..=LAST_EXAMPLE))]
    pub example: Option<u16>,

    /// Print the example prompts and exit.
    #[arg(long)]
    pub list_examples: bool,

    /// Save the image as generated-image.png after generating it.
    #[arg(short, long)]
    pub download: bool,

    /// Directory the download is written to (defaults to the config value, then `.`).
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Where the prompt for this run comes from.
#[derive(Debug, PartialEq, Eq)]
pub enum PromptSource {
    /// Literal text.
    Text(String),
    /// Zero-based index into the example prompts.
    Example(usize),
}

impl Cli {
    /// Resolve the prompt source from the positional argument, file, or example flag.
    ///
    /// With none of them given the prompt is empty, which the view rejects.
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt file cannot be read.
    pub fn resolve_prompt(&self) -> Result<PromptSource, std::io::Error> {
        if let Some(n) = self.example {
            Ok(PromptSource::Example(usize::from(n) - 1))
        } else if let Some(ref text) = self.prompt {
            Ok(PromptSource::Text(text.clone()))
        } else if let Some(ref path) = self.prompt_file {
            std::fs::read_to_string(path).map(PromptSource::Text)
        } else {
            Ok(PromptSource::Text(String::new()))
        }
    }
}

/// Numbered listing of the example prompts, one per line.
#[must_use]
pub fn example_listing() -> String {
    EXAMPLE_PROMPTS
        .iter()
        .enumerate()
        .map(|(i, text)| format!("{}. {text}\n", i + 1))
        .collect()
}
