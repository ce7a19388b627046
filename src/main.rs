//! tts-console-rs CLI entry point.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Local};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tts_console_rs::backend::{
    DEFAULT_BASE_URL, HttpBackend, SettingsUpdate, create_backend,
};
use tts_console_rs::cli::{Args, Command, GenerateArgs, HistoryAction, SettingsAction, VoiceAction};
use tts_console_rs::config::ConfigStore;
use tts_console_rs::present::ConsolePresenter;
use tts_console_rs::sync::{CatalogSync, DEFAULT_TICK, SyncError, SyncSnapshot};

type Client = CatalogSync<HttpBackend, ConsolePresenter>;

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    init_logging(args.verbose);

    let store = ConfigStore::new().context("Failed to locate config directory")?;
    let config = store.load().context("Failed to read config file")?;

    let base_url = args
        .url
        .clone()
        .or(config.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let tick = config
        .progress_interval_ms
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_TICK);
    tracing::debug!(%base_url, ?tick, "starting");

    let presenter = Arc::new(ConsolePresenter::new(args.yes));
    let sync = CatalogSync::new(create_backend(&base_url), presenter).with_tick_interval(tick);
    let preferred = config.preferred_voice.as_deref();

    let outcome = match args.command {
        Command::Voices { action } => voices(&sync, &store, preferred, action),
        Command::History { action } => history(&sync, action),
        Command::Generate(generate) => generate_speech(&sync, preferred, &base_url, generate),
        Command::Settings { action } => settings(&sync, action),
        Command::Cleanup => cleanup(&sync),
        Command::SetUrl { url } => set_url(&store, &url),
    };

    settle(outcome)
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Map a command outcome to an exit code.
///
/// Sync failures have already been shown by the presenter, so only the
/// exit status is left to decide. Other errors propagate to anyhow.
fn settle(outcome: Result<()>) -> Result<ExitCode> {
    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => match err.downcast_ref::<SyncError>() {
            Some(SyncError::Declined) => {
                println!("Cancelled.");
                Ok(ExitCode::SUCCESS)
            }
            Some(sync_err) => {
                tracing::debug!(error = %sync_err, "command failed");
                Ok(ExitCode::FAILURE)
            }
            None => Err(err),
        },
    }
}

fn set_url(store: &ConfigStore, url: &str) -> Result<()> {
    store
        .update(|c| c.base_url = Some(url.to_string()))
        .context("Failed to save backend URL")?;
    println!("Backend URL saved: {url}");
    Ok(())
}

/// Load the catalog and restore the remembered selection when possible.
fn load_catalog(sync: &Client, preferred: Option<&str>) -> Result<()> {
    sync.load_voices()?;

    if let Some(key) = preferred
        && sync.voices().contains_key(key)
    {
        sync.select_voice(key)?;
    }

    Ok(())
}

fn voices(
    sync: &Client,
    store: &ConfigStore,
    preferred: Option<&str>,
    action: Option<VoiceAction>,
) -> Result<()> {
    load_catalog(sync, preferred)?;

    match action.unwrap_or(VoiceAction::List) {
        VoiceAction::List => {}
        VoiceAction::Add {
            key,
            name,
            voice_id,
            description,
        } => {
            let key = sync.add_voice(&key, &name, &voice_id, &description)?;
            remember_selection(sync, store, &key)?;
        }
        VoiceAction::Delete { key } => {
            sync.delete_voice(&key)?;
            if preferred == Some(key.as_str()) {
                store
                    .update(|c| c.preferred_voice = None)
                    .context("Failed to update config")?;
            }
        }
        VoiceAction::Select { key } => {
            sync.select_voice(&key)?;
            remember_selection(sync, store, &key)?;
        }
    }

    print_voices(&sync.snapshot());
    Ok(())
}

/// Persist the selection if the catalog actually selected `key`.
fn remember_selection(sync: &Client, store: &ConfigStore, key: &str) -> Result<()> {
    if sync.selected_voice().as_deref() == Some(key) {
        store
            .update(|c| c.preferred_voice = Some(key.to_string()))
            .context("Failed to save preferred voice")?;
    }
    Ok(())
}

fn print_voices(snapshot: &SyncSnapshot) {
    if snapshot.voices.is_empty() {
        println!("No voices found.");
        return;
    }

    println!("Available voices:");
    for (key, voice) in &snapshot.voices {
        let marker = if snapshot.selected.as_deref() == Some(key.as_str()) {
            '*'
        } else {
            ' '
        };
        let custom = if voice.custom { " [custom]" } else { "" };

        println!("{marker} {key}: {}{custom}", voice.name);
        println!("    Id: {}", voice.id);
        if !voice.description.is_empty() {
            println!("    {}", voice.description);
        }
    }
}

fn history(sync: &Client, action: Option<HistoryAction>) -> Result<()> {
    match action.unwrap_or(HistoryAction::List) {
        HistoryAction::List => load_history(sync)?,
        HistoryAction::Delete { filename } => sync.delete_history_entry(&filename)?,
        HistoryAction::Clear => {
            let report = sync.clear_all_history()?;
            for (filename, reason) in &report.failed {
                eprintln!("  {filename}: {reason}");
            }
        }
        HistoryAction::Download { filename, output } => {
            load_history(sync)?;
            let entry = sync
                .snapshot()
                .history
                .into_iter()
                .find(|e| e.filename == filename)
                .with_context(|| format!("No history entry named '{filename}'"))?;

            let output = output.unwrap_or_else(|| PathBuf::from(&entry.filename));
            save_audio(sync, &entry.download_url, &output)?;
            return Ok(());
        }
    }

    print_history(&sync.snapshot());
    Ok(())
}

/// History refresh failures are log-only in the sync layer; an explicit
/// listing still has to tell the user it failed.
fn load_history(sync: &Client) -> Result<()> {
    sync.load_history()
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!("Failed to load history: {e}"))
}

fn print_history(snapshot: &SyncSnapshot) {
    if snapshot.history.is_empty() {
        println!("No history found.");
        return;
    }

    println!("History ({} files):", snapshot.history_count());
    for entry in &snapshot.history {
        let created = DateTime::from_timestamp(entry.created, 0)
            .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| entry.created.to_string());

        println!("  {}", entry.filename);
        println!(
            "    Size: {:.2} KB  Created: {created}",
            entry.size as f64 / 1024.0
        );
    }
}

fn generate_speech(
    sync: &Client,
    preferred: Option<&str>,
    base_url: &str,
    args: GenerateArgs,
) -> Result<()> {
    load_catalog(sync, preferred)?;

    if let Some(voice) = &args.voice {
        sync.select_voice(voice)?;
    }

    if let Some(voice) = sync.selected_voice() {
        println!("Generating speech...");
        println!("  Voice: {voice}");
    }

    let playback = sync.generate_speech(&args.text)?;

    let base_url = base_url.trim_end_matches('/');
    println!("  File: {}", playback.filename);
    println!("  Play: {base_url}{}", playback.play_url);
    println!("  Download: {base_url}{}", playback.download_url);

    if let Some(output) = &args.output {
        save_audio(sync, &playback.download_url, output)?;
    }

    Ok(())
}

fn save_audio(sync: &Client, locator: &str, output: &Path) -> Result<()> {
    let audio_data = sync.fetch_audio(locator)?;

    fs::write(output, &audio_data)
        .with_context(|| format!("Failed to write audio to: {}", output.display()))?;

    println!("Audio saved to: {}", output.display());
    println!("  Size: {} bytes", audio_data.len());
    Ok(())
}

fn settings(sync: &Client, action: Option<SettingsAction>) -> Result<()> {
    match action.unwrap_or(SettingsAction::Show) {
        SettingsAction::Show => {
            let settings = sync.settings()?;
            println!("Cleanup interval: {} minutes", settings.cleanup_interval);
        }
        SettingsAction::Set {
            api_token,
            cleanup_interval,
        } => {
            let update = SettingsUpdate {
                api_token,
                cleanup_interval,
            };
            if update.is_empty() {
                bail!("Nothing to change: pass --api-token or --cleanup-interval");
            }
            sync.save_settings(&update)?;
        }
    }

    Ok(())
}

fn cleanup(sync: &Client) -> Result<()> {
    sync.cleanup_now()?;
    println!("{} files remain in history.", sync.history_count());
    Ok(())
}
