//! Integration tests for mic-scribe.

use mic_scribe::{
    save_transcription, select_backend, Phase, Provider, ScribeError, Session, Settings,
    TranscribeError,
};

#[test]
fn settings_round_trip_through_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(
        &path,
        r#"{
            "recognition": { "provider": "offline", "language": "fr-FR" },
            "listen": { "timeout_secs": 5, "silence_hangover_ms": 400 },
            "offline": { "model_path": "/models/ggml-base.bin" }
        }"#,
    )
    .unwrap();

    let settings = Settings::from_file(&path).unwrap();
    assert_eq!(settings.recognition.provider, Provider::Offline);
    assert_eq!(settings.recognition.language, "fr-FR");
    assert_eq!(settings.listen.timeout_secs, 5);
    assert_eq!(
        settings.offline.model_path.as_deref(),
        Some("/models/ggml-base.bin")
    );
    // Unspecified settings keep their defaults
    assert_eq!(settings.output.default_filename, "transcription.txt");
}

#[test]
fn missing_settings_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.json");
    let settings = Settings::load_or_default(&path).unwrap();
    assert_eq!(settings.listen.timeout_secs, 15);
}

#[test]
fn malformed_settings_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(Settings::from_file(&path).is_err());
}

#[test]
fn backend_validation_happens_before_any_capture() {
    // An unconfigured offline backend must be rejected up front; no audio
    // device is touched on this path.
    let mut settings = Settings::default();
    settings.recognition.provider = Provider::Offline;
    settings.offline.model_path = None;
    let err = select_backend(&settings).unwrap_err();
    assert!(matches!(err, ScribeError::Transcribe(_)));
}

#[test]
fn unsupported_provider_name_yields_literal() {
    let err = "bing".parse::<Provider>().unwrap_err();
    assert_eq!(err.to_string(), "Unsupported provider");
}

#[test]
fn session_flow_capture_save() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::new();

    assert!(session.capture_with(|| Ok("it was the best of times".to_string())));
    let text = session.transcription().unwrap().to_string();

    let name = dir.path().join("notes");
    let path = save_transcription(&text, &name.to_string_lossy()).unwrap();
    assert!(path.to_string_lossy().ends_with("notes.txt"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), text);
}

#[test]
fn paused_session_suppresses_capture() {
    let mut session = Session::new();
    session.capture_with(|| Ok("kept".to_string()));
    session.toggle_pause();

    let ran = session.capture_with(|| panic!("capture must not run while paused"));
    assert!(!ran);
    assert_eq!(session.transcription(), Some("kept"));

    session.toggle_pause();
    assert!(session.capture_with(|| Ok("replaced".to_string())));
    assert_eq!(session.transcription(), Some("replaced"));
}

#[test]
fn failed_capture_suppresses_save() {
    let mut session = Session::new();
    session.capture_with(|| Err(TranscribeError::Unintelligible.into()));
    assert!(session.transcription().is_none());
    match session.phase() {
        Phase::Failed(e) => assert_eq!(e.to_string(), "could not understand the audio"),
        other => panic!("expected Failed phase, got {:?}", other),
    }
}
