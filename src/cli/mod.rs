//! CLI argument parsing.

mod args;

pub use args::{Args, Command, GenerateArgs, HistoryAction, SettingsAction, VoiceAction};

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};
    use std::path::PathBuf;

    #[test]
    fn test_cli_parser_builds() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_global_flags() {
        let args = Args::parse_from([
            "tts-console-rs",
            "--url",
            "http://tts.local:8080",
            "--yes",
            "history",
            "clear",
        ]);

        assert_eq!(args.url.as_deref(), Some("http://tts.local:8080"));
        assert!(args.yes);
        assert_eq!(
            args.command,
            Command::History {
                action: Some(HistoryAction::Clear)
            }
        );
    }

    #[test]
    fn test_parse_voices_without_action_lists() {
        let args = Args::parse_from(["tts-console-rs", "voices"]);
        assert_eq!(args.command, Command::Voices { action: None });
    }

    #[test]
    fn test_parse_add_voice() {
        let args = Args::parse_from([
            "tts-console-rs",
            "voices",
            "add",
            "--key",
            "My Voice",
            "--name",
            "Mine",
            "--voice-id",
            "abc-123",
        ]);

        assert_eq!(
            args.command,
            Command::Voices {
                action: Some(VoiceAction::Add {
                    key: "My Voice".to_string(),
                    name: "Mine".to_string(),
                    voice_id: "abc-123".to_string(),
                    description: String::new(),
                })
            }
        );
    }

    #[test]
    fn test_parse_generate() {
        let args = Args::parse_from([
            "tts-console-rs",
            "generate",
            "Hello world",
            "--voice",
            "liam",
            "-o",
            "out.mp3",
        ]);

        assert_eq!(
            args.command,
            Command::Generate(GenerateArgs {
                text: "Hello world".to_string(),
                voice: Some("liam".to_string()),
                output: Some(PathBuf::from("out.mp3")),
            })
        );
    }

    #[test]
    fn test_parse_settings_rejects_zero_interval() {
        let result = Args::try_parse_from([
            "tts-console-rs",
            "settings",
            "set",
            "--cleanup-interval",
            "0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_history_download() {
        let args = Args::parse_from(["tts-console-rs", "history", "download", "speech_1.mp3"]);
        assert_eq!(
            args.command,
            Command::History {
                action: Some(HistoryAction::Download {
                    filename: "speech_1.mp3".to_string(),
                    output: None,
                })
            }
        );
    }

    #[test]
    fn test_parse_set_url() {
        let args = Args::parse_from(["tts-console-rs", "set-url", "http://tts.local:8080/tts/"]);
        assert_eq!(
            args.command,
            Command::SetUrl {
                url: "http://tts.local:8080/tts/".to_string()
            }
        );
    }
}
