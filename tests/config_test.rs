use gmplayer::config::{
    ConfigError, DEFAULT_ALBUM_NAMING, DEFAULT_API_URL, DEFAULT_MUSIC_DIRECTORY, DEFAULT_PLAYER,
    DEFAULT_PLAYLIST_NAMING, DEFAULT_TRACK_NAMING, PLACEHOLDER_EMAIL, Settings, load_settings,
};

#[tokio::test]
async fn test_first_run_creates_placeholder_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("home").join(".gmplayerrc");

    let result = load_settings(&path).await;

    assert!(matches!(result, Err(ConfigError::Created { .. })));
    let written: Settings =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written, Settings::default());
    assert_eq!(written.email, PLACEHOLDER_EMAIL);

    // untouched placeholder file stops the second run too
    let again = load_settings(&path).await;
    assert!(matches!(again, Err(ConfigError::Placeholder { .. })));
}

#[tokio::test]
async fn test_missing_naming_keys_fall_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".gmplayerrc");
    std::fs::write(&path, r#"{"email":"me@example.com","password":"secret"}"#).unwrap();

    let settings = load_settings(&path).await.unwrap();

    assert_eq!(settings.email, "me@example.com");
    assert_eq!(settings.musicdirectory, DEFAULT_MUSIC_DIRECTORY);
    assert_eq!(settings.tracknaming, DEFAULT_TRACK_NAMING);
    assert_eq!(settings.albumnaming, DEFAULT_ALBUM_NAMING);
    assert_eq!(settings.playlistnaming, DEFAULT_PLAYLIST_NAMING);
    assert_eq!(settings.apiurl, None);
}

#[tokio::test]
async fn test_settings_values_are_kept() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".gmplayerrc");
    std::fs::write(
        &path,
        r#"{"email":"me@example.com","password":"secret","musicdirectory":"/srv/music",
            "tracknaming":"{trackNumber} {title}","apiurl":"http://catalog.local/api/"}"#,
    )
    .unwrap();

    let settings = load_settings(&path).await.unwrap();

    assert_eq!(settings.musicdirectory, "/srv/music");
    assert_eq!(settings.tracknaming, "{trackNumber} {title}");
    assert_eq!(settings.apiurl.as_deref(), Some("http://catalog.local/api/"));
}

#[tokio::test]
async fn test_invalid_json_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".gmplayerrc");
    std::fs::write(&path, "email = me").unwrap();

    let result = load_settings(&path).await;

    assert!(matches!(result, Err(ConfigError::Json(_))));
}

#[test]
fn test_overrides_replace_file_values() {
    let settings = Settings {
        email: "me@example.com".to_string(),
        apiurl: Some("http://from-file/api/".to_string()),
        ..Settings::default()
    };

    let settings = settings.with_overrides(
        Some("http://from-env/api".to_string()),
        Some("mpv".to_string()),
    );

    assert_eq!(settings.api_url(), "http://from-env/api");
    assert_eq!(settings.player(), "mpv");
}

#[test]
fn test_missing_or_empty_overrides_keep_file_values() {
    let settings = Settings {
        apiurl: Some("http://from-file/api/".to_string()),
        ..Settings::default()
    };

    let settings = settings.with_overrides(Some(String::new()), None);

    // trailing slash is dropped, player falls back to the default
    assert_eq!(settings.api_url(), "http://from-file/api");
    assert_eq!(settings.player(), DEFAULT_PLAYER);
    assert_eq!(Settings::default().api_url(), DEFAULT_API_URL);
}
