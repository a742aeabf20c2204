//! Adapter protocol tests - commands in, observations and errors out

use blockshot::adapter::{
    apply_command, parse_command_line, ErrorCode, ErrorMessage, ObservationMessage,
};
use blockshot::core::{GameConfig, GameSession};
use blockshot::types::{GameIntent, PolicyKind};

#[test]
fn test_observation_json_lines_parse_back() {
    let config = GameConfig {
        spawn_interval: 5,
        ..GameConfig::for_policy(PolicyKind::FirstFit)
    };
    let mut session = GameSession::new(config, 31).unwrap();
    session.apply_intent(GameIntent::Fire);
    for _ in 0..20 {
        session.tick();
    }

    let obs = ObservationMessage::from_snapshot(1, &session.snapshot());
    let line = serde_json::to_string(&obs).unwrap();
    assert!(!line.contains('\n'));

    let back: ObservationMessage = serde_json::from_str(&line).unwrap();
    assert_eq!(back, obs);
    assert_eq!(back.frame, 20);
    assert_eq!(back.pieces.len(), session.pieces().len());
    for piece in &back.pieces {
        assert!(piece.kind.is_some());
        assert!(piece.mask.iter().flatten().all(|&c| c <= 1));
        assert!((1..=4).contains(&piece.color));
    }
}

#[test]
fn test_target_match_observation_lists_targets() {
    let config = GameConfig {
        target_count: 2,
        ..GameConfig::for_policy(PolicyKind::TargetMatch)
    };
    let session = GameSession::new(config, 8).unwrap();
    let obs = ObservationMessage::from_snapshot(1, &session.snapshot());

    assert_eq!(obs.targets.len(), 2);
    for target in &obs.targets {
        assert_eq!(target.cells.len(), 4);
        // targets live in the upper quarter of the grid
        assert!(target.cells.iter().all(|&[col, row]| col < 13 && row < 5));
    }

    let json = serde_json::to_value(&obs).unwrap();
    assert_eq!(json["policy"], "target-match");
    assert_eq!(json["targets"].as_array().map(Vec::len), Some(2));
}

#[test]
fn test_single_cell_pieces_omit_kind() {
    let config = GameConfig {
        spawn_interval: 1,
        ..GameConfig::default()
    };
    let mut session = GameSession::new(config, 4).unwrap();
    session.tick();

    let obs = ObservationMessage::from_snapshot(1, &session.snapshot());
    let json = serde_json::to_value(&obs).unwrap();
    let piece = &json["pieces"][0];
    assert!(piece.get("kind").is_none());
    assert_eq!(piece["mask"], serde_json::json!([[1]]));
}

#[test]
fn test_command_stream_drives_a_session() {
    let mut session = GameSession::new(GameConfig::default(), 1).unwrap();
    let lines = [
        r#"{"type":"command","seq":1,"intents":["moveRight","moveRight"]}"#,
        r#"{"seq":2,"intents":["fire"]}"#,
        r#"{"seq":3,"intents":["warp"]}"#,
        r#"{"seq":4,"intents":["restart"]}"#,
    ];

    let mut errors = Vec::new();
    for line in lines {
        match parse_command_line(line) {
            Ok(command) => {
                apply_command(&mut session, &command);
                session.tick();
            }
            Err(err) => errors.push(ErrorMessage::from(&err)),
        }
    }

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, ErrorCode::InvalidCommand);
    assert!(errors[0].message.contains("warp"));

    // the restart wiped the moves and the projectile
    assert_eq!(session.episode_id(), 1);
    assert_eq!(session.frame(), 1);
    assert!(session.projectiles().is_empty());
    assert_eq!(session.player().rect.x, 185.0);
}

#[test]
fn test_error_messages_serialize_with_stable_codes() {
    let cases = [
        ("[1,2", "invalid_json"),
        (r#"{"type":"observation","seq":1}"#, "unknown_type"),
        (r#"{"seq":"one"}"#, "invalid_command"),
    ];
    for (line, code) in cases {
        let err = parse_command_line(line).unwrap_err();
        let json = serde_json::to_value(ErrorMessage::from(&err)).unwrap();
        assert_eq!(json["type"], "error");
        assert_eq!(json["code"], code, "{line}");
    }
}
