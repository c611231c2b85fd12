use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;

use mic_scribe::{
    capture_and_transcribe, init_logger, paths, save_transcription, Phase, Provider, Session,
    Settings, SUPPORTED_LANGUAGES,
};

/// Microphone transcription from the command line.
#[derive(Parser)]
#[command(name = "mic-scribe", version)]
struct Cli {
    /// Transcription provider: remote or offline.
    #[arg(long)]
    provider: Option<String>,

    /// Language tag: en-US, fr-FR, es-ES, de-DE or it-IT.
    #[arg(long)]
    language: Option<String>,

    /// Remote API endpoint (full URL).
    #[arg(long)]
    remote_url: Option<String>,

    /// Remote API model name.
    #[arg(long)]
    remote_model: Option<String>,

    /// Path to a local whisper model file.
    #[arg(long)]
    model: Option<String>,

    /// Seconds to wait for speech before giving up.
    #[arg(long)]
    timeout: Option<u64>,

    /// Default filename for the save command.
    #[arg(long, default_value = "transcription.txt")]
    output: String,

    /// Settings file (default: platform config dir).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Capture and transcribe a single utterance, print it, and exit.
    #[arg(long)]
    once: bool,
}

fn load_settings(cli: &Cli) -> Result<Settings, String> {
    let path = cli.config.clone().unwrap_or_else(paths::settings_path);
    let mut settings = Settings::load_or_default(&path).map_err(|e| e.to_string())?;

    if let Some(ref provider) = cli.provider {
        settings.recognition.provider = provider.parse::<Provider>().map_err(|e| e.to_string())?;
    }
    if let Some(ref language) = cli.language {
        settings.recognition.language = language.clone();
    }
    if let Some(ref url) = cli.remote_url {
        settings.remote.base_url = url.clone();
    }
    if let Some(ref model) = cli.remote_model {
        settings.remote.model = model.clone();
    }
    if let Some(ref model) = cli.model {
        settings.offline.model_path = Some(model.clone());
    }
    if let Some(timeout) = cli.timeout {
        settings.listen.timeout_secs = timeout;
    }

    settings.validate().map_err(|e| {
        format!(
            "{} (supported languages: {})",
            e,
            SUPPORTED_LANGUAGES.join(", ")
        )
    })?;
    Ok(settings)
}

fn main() {
    let cli = Cli::parse();

    let _ = paths::ensure_directories();
    if let Err(e) = init_logger() {
        eprintln!("warning: failed to initialize logging: {}", e);
    }

    let settings = match load_settings(&cli) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    };

    if cli.once {
        match capture_and_transcribe(&settings) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    run_interactive(&cli, &settings);
}

fn run_interactive(cli: &Cli, settings: &Settings) {
    println!(
        "mic-scribe: {} provider, language {}",
        settings.recognition.provider, settings.recognition.language
    );
    println!("Commands: start, pause, save [name], status, quit");

    let mut session = Session::new();
    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error: {}", e);
                break;
            }
        }
        let mut words = line.split_whitespace();
        match words.next() {
            Some("start") | Some("s") => {
                if session.capture_with(|| {
                    println!("Please speak into the microphone...");
                    capture_and_transcribe(settings)
                }) {
                    match session.phase() {
                        Phase::Done(text) => println!("Transcription: {}", text),
                        Phase::Failed(e) => println!("Error: {}", e),
                        _ => {}
                    }
                } else {
                    println!("Transcription is paused. Resume to start.");
                }
            }
            Some("pause") | Some("resume") | Some("p") => {
                if session.toggle_pause() {
                    println!("Transcription paused. Type 'resume' to continue.");
                } else {
                    println!("Transcription resumed.");
                }
            }
            Some("save") => match session.transcription() {
                Some(text) => {
                    let name = words.next().unwrap_or(&cli.output);
                    match save_transcription(text, name) {
                        Ok(path) => println!("Transcription saved as {}", path.display()),
                        Err(e) => println!("Error: {}", e),
                    }
                }
                None => println!("No transcription to save."),
            },
            Some("status") => {
                let phase = match session.phase() {
                    Phase::Idle => "idle",
                    Phase::Capturing => "capturing",
                    Phase::Done(_) => "done",
                    Phase::Failed(_) => "failed",
                };
                println!(
                    "phase: {}, paused: {}",
                    phase,
                    if session.paused() { "yes" } else { "no" }
                );
            }
            Some("quit") | Some("q") | Some("exit") => break,
            Some(other) => println!("Unknown command: {}", other),
            None => {}
        }
    }
}
