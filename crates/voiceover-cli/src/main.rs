use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use voiceover_core::{
    CombineOutcome, DEFAULT_COMBINED_FILENAME, GenerateOptions, RunReport,
    try_generate_from_text, try_generate_voiceover,
};
use voiceover_speech::providers::piper::{DEFAULT_VOICE, PredefinedVoice};

#[derive(Parser, Debug)]
#[command(name = "quickcall-voiceover", version)]
#[command(about = "QuickCall VoiceOver - Generate voice-over audio with Piper TTS", long_about = None)]
struct Cli {
    /// Path to the voice-over JSON config
    #[arg(required_unless_present_any = ["interactive", "voices"])]
    config: Option<PathBuf>,

    /// Directory for generated audio files
    #[arg(short, long, default_value = "./output")]
    output: PathBuf,

    /// Directory holding (and caching) voice models
    #[arg(short, long, default_value = "./models")]
    models: PathBuf,

    /// Also concatenate all segments into a single file
    #[arg(short, long)]
    combine: bool,

    /// File name of the combined output inside the output directory
    #[arg(long, default_value = DEFAULT_COMBINED_FILENAME)]
    combined_name: String,

    /// Piper executable
    #[arg(long, default_value = "piper")]
    piper: String,

    /// Extra argument passed before Piper's own flags (repeatable)
    #[arg(long = "piper-arg", allow_hyphen_values = true)]
    piper_args: Vec<String>,

    /// Fail instead of downloading a missing voice model
    #[arg(long)]
    no_download: bool,

    /// Read text lines from stdin instead of a config file
    #[arg(short, long, conflicts_with = "config")]
    interactive: bool,

    /// Voice for interactive mode (default: en_US-hfc_male-medium)
    #[arg(long, conflicts_with = "config")]
    voice: Option<String>,

    /// List well-known voices and exit
    #[arg(long, conflicts_with_all = ["config", "interactive"])]
    voices: bool,
}

impl Cli {
    fn options(&self) -> GenerateOptions {
        GenerateOptions {
            output_dir: self.output.clone(),
            models_dir: self.models.clone(),
            combine: self.combine,
            combined_filename: self.combined_name.clone(),
            piper_program: self.piper.clone(),
            piper_args: self.piper_args.clone(),
            download: !self.no_download,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if cli.voices {
        print_voices();
        return Ok(ExitCode::SUCCESS);
    }

    let options = cli.options();
    let report = if cli.interactive {
        let lines = read_lines().context("Failed to read text from stdin")?;
        if lines.is_empty() {
            anyhow::bail!("No text entered");
        }
        let voice = cli.voice.as_deref().unwrap_or(DEFAULT_VOICE);
        try_generate_from_text(&lines, voice, &options).await
    } else {
        let config = cli
            .config
            .as_deref()
            .context("A config file is required")?;
        if !config.is_file() {
            anyhow::bail!("Config file not found: {}", config.display());
        }
        log::info!("Loading config from {}", config.display());
        try_generate_voiceover(config, &options).await
    };
    let report = report.context("Voice-over generation failed")?;

    print_summary(&report, &options);

    Ok(if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Collect lines until an empty line or EOF
fn read_lines() -> io::Result<Vec<String>> {
    println!("Enter text, one segment per line. Finish with an empty line.");
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = Vec::new();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();
        if input.is_empty() {
            break;
        }
        lines.push(input.to_string());
    }

    Ok(lines)
}

fn print_voices() {
    println!("Available voices:\n");
    for voice in PredefinedVoice::all() {
        println!("  {:<28} {}", voice.identifier(), voice.description());
    }
    println!("\nAny voice from https://huggingface.co/rhasspy/piper-voices can be used by name.");
}

fn print_summary(report: &RunReport, options: &GenerateOptions) {
    println!("\n========== VoiceOver Summary ==========");
    println!(
        "Generated {}/{} segment(s), {} failed",
        report.succeeded(),
        report.total(),
        report.failed()
    );
    for result in &report.results {
        match &result.error {
            None => println!("  ok      {}", result.path.display()),
            Some(error) => println!("  FAILED  {}: {}", result.id, error),
        }
    }

    match &report.combine {
        CombineOutcome::NotRequested => {}
        CombineOutcome::Skipped => println!("Combine skipped: no segments were generated"),
        CombineOutcome::Written(path) => println!("Combined: {}", path.display()),
        CombineOutcome::Failed(message) => println!("Combine failed: {message}"),
    }
    println!("Output directory: {}", options.output_dir.display());
    println!("========================================\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["quickcall-voiceover", "voiceover.json"]).unwrap();
        let options = cli.options();

        assert_eq!(cli.config, Some(PathBuf::from("voiceover.json")));
        assert_eq!(options.output_dir, PathBuf::from("./output"));
        assert_eq!(options.models_dir, PathBuf::from("./models"));
        assert_eq!(options.combined_filename, "combined_voiceover.wav");
        assert_eq!(options.piper_program, "piper");
        assert!(!options.combine);
        assert!(options.download);
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "quickcall-voiceover",
            "script.json",
            "-o",
            "out",
            "-m",
            "voices",
            "-c",
            "--combined-name",
            "all.wav",
            "--piper",
            "python3",
            "--piper-arg",
            "-m",
            "--piper-arg",
            "piper",
            "--no-download",
        ])
        .unwrap();
        let options = cli.options();

        assert_eq!(options.output_dir, PathBuf::from("out"));
        assert_eq!(options.models_dir, PathBuf::from("voices"));
        assert!(options.combine);
        assert_eq!(
            options.combined_path().unwrap(),
            PathBuf::from("out").join("all.wav")
        );
        assert_eq!(options.piper_program, "python3");
        assert_eq!(options.piper_args, vec!["-m", "piper"]);
        assert!(!options.download);
    }

    #[test]
    fn test_config_required_unless_interactive_or_listing() {
        assert!(Cli::try_parse_from(["quickcall-voiceover"]).is_err());
        assert!(Cli::try_parse_from(["quickcall-voiceover", "--voices"]).is_ok());

        let cli = Cli::try_parse_from([
            "quickcall-voiceover",
            "--interactive",
            "--voice",
            "en_GB-alan-medium",
        ])
        .unwrap();
        assert!(cli.interactive);
        assert_eq!(cli.voice.as_deref(), Some("en_GB-alan-medium"));
    }

    #[test]
    fn test_conflicting_modes_rejected() {
        assert!(Cli::try_parse_from(["quickcall-voiceover", "a.json", "--interactive"]).is_err());
        assert!(Cli::try_parse_from(["quickcall-voiceover", "--voice", "x", "a.json"]).is_err());
        assert!(Cli::try_parse_from(["quickcall-voiceover", "a.json", "--voice", "x"]).is_err());
        assert!(Cli::try_parse_from(["quickcall-voiceover", "--voice", "x"]).is_err());
    }
}
