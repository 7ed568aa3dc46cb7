use seabattle::{ConfigError, MatchConfig, BOARD_SIZE, DEFAULT_AI_DELAY_MS, MAX_COLS, SHIP_SIZES};

#[test]
fn test_default_config() {
    let config = MatchConfig::default();
    assert_eq!((config.rows, config.cols), (BOARD_SIZE, BOARD_SIZE));
    assert_eq!(config.ship_sizes, SHIP_SIZES.to_vec());
    assert_eq!(config.ai_delay_ms, DEFAULT_AI_DELAY_MS);
    config.validate().unwrap();
}

#[test]
fn test_json_accepts_ships_alias_and_defaults() {
    let config = MatchConfig::from_json_str(r#"{"rows": 8, "cols": 12, "ships": [4, 3, 2]}"#).unwrap();
    assert_eq!(config.rows, 8);
    assert_eq!(config.cols, 12);
    assert_eq!(config.ship_sizes, vec![4, 3, 2]);
    assert_eq!(config.ai_delay_ms, DEFAULT_AI_DELAY_MS);

    let config = MatchConfig::from_json_str(r#"{"ship_sizes": [2], "ai_delay_ms": 0}"#).unwrap();
    assert_eq!(config.rows, BOARD_SIZE);
    assert_eq!(config.ai_delay_ms, 0);
}

#[test]
fn test_validation_errors() {
    assert!(matches!(
        MatchConfig::new(0, 5, vec![2]).validate(),
        Err(ConfigError::EmptyBoard { rows: 0, cols: 5 })
    ));
    assert!(matches!(
        MatchConfig::new(5, 5, vec![]).validate(),
        Err(ConfigError::EmptyRoster)
    ));
    assert!(matches!(
        MatchConfig::new(5, 5, vec![2, 0]).validate(),
        Err(ConfigError::ZeroSizedShip { index: 1 })
    ));
    assert!(matches!(
        MatchConfig::new(3, 4, vec![5]).validate(),
        Err(ConfigError::ShipTooLong { index: 0, size: 5, .. })
    ));
    assert!(matches!(
        MatchConfig::new(5, 27, vec![2]).validate(),
        Err(ConfigError::TooManyColumns { cols: 27, max: 26 })
    ));
    MatchConfig::new(5, MAX_COLS, vec![2]).validate().unwrap();
    let config = MatchConfig {
        placement_attempts: 0,
        ..MatchConfig::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::NoPlacementAttempts)));
}

#[test]
fn test_bad_json_and_missing_file() {
    assert!(matches!(
        MatchConfig::from_json_str("{rows: 10"),
        Err(ConfigError::Json(_))
    ));
    assert!(matches!(
        MatchConfig::from_json_str(r#"{"ships": []}"#),
        Err(ConfigError::EmptyRoster)
    ));
    assert!(matches!(
        MatchConfig::from_path("/nonexistent/seabattle.json"),
        Err(ConfigError::Io { .. })
    ));
}

#[test]
fn test_from_path_reads_file() {
    let path = std::env::temp_dir().join(format!("seabattle-config-{}.json", std::process::id()));
    std::fs::write(&path, r#"{"rows": 6, "cols": 6, "ships": [3, 2]}"#).unwrap();
    let config = MatchConfig::from_path(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(config.ship_sizes, vec![3, 2]);
}
