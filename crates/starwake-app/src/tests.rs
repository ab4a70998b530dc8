#[cfg(test)]
mod tests {
    use std::sync::mpsc;
    use std::time::Duration;

    use starwake_core::commands::PlayerCommand;
    use starwake_core::config::GameConfig;
    use starwake_core::enums::{EntityKind, SimPhase};
    use starwake_sim::input::KeyEvent;

    use crate::error::AppError;
    use crate::game_loop::{run_headless, spawn_game_loop, Session};
    use crate::script::{Script, ScriptEntry};
    use crate::state::LoopCommand;

    fn down(key: &str) -> KeyEvent {
        KeyEvent::Down(key.to_string())
    }

    fn up(key: &str) -> KeyEvent {
        KeyEvent::Up(key.to_string())
    }

    // ---- Commands ----

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<LoopCommand>();

        tx.send(LoopCommand::Key(down("<up>"))).unwrap();
        tx.send(LoopCommand::Player(PlayerCommand::Fire)).unwrap();
        tx.send(LoopCommand::Shutdown).unwrap();

        let commands: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            commands,
            vec![
                LoopCommand::Key(down("<up>")),
                LoopCommand::Player(PlayerCommand::Fire),
                LoopCommand::Shutdown,
            ]
        );
    }

    #[test]
    fn test_session_handle_stops_on_shutdown() {
        let mut session = Session::new(GameConfig::default()).unwrap();
        assert!(session.handle(LoopCommand::Pause));
        assert_eq!(session.engine().phase(), SimPhase::Paused);
        assert!(session.handle(LoopCommand::Resume));
        assert!(!session.handle(LoopCommand::Shutdown));
    }

    #[test]
    fn test_session_rejects_invalid_config() {
        let mut config = GameConfig::default();
        config.physics.max_substeps = 0;
        let err = Session::new(config).err().unwrap();
        assert!(matches!(err, AppError::Config(_)));
    }

    // ---- Script ----

    #[test]
    fn test_script_parses_and_orders_by_tick() {
        let json = r#"[
            {"tick": 5, "event": {"type": "Up", "key": "<up>"}},
            {"tick": 0, "event": {"type": "Down", "key": "<up>"}},
            {"tick": 5, "event": {"type": "Down", "key": "<space>"}}
        ]"#;
        let script = Script::from_json(json).unwrap();

        assert_eq!(script.len(), 3);
        assert_eq!(script.last_tick(), Some(5));
        assert_eq!(script.events_at(0).collect::<Vec<_>>(), vec![&down("<up>")]);
        assert_eq!(
            script.events_at(5).collect::<Vec<_>>(),
            vec![&up("<up>"), &down("<space>")]
        );
        assert_eq!(script.events_at(3).count(), 0);
    }

    #[test]
    fn test_script_parse_error() {
        let err = Script::from_json("[{\"tick\": \"soon\"}]").unwrap_err();
        assert!(matches!(err, AppError::ScriptParse(_)));
    }

    #[test]
    fn test_missing_script_file() {
        let err = Script::load("/nonexistent/starwake-script.json").unwrap_err();
        assert!(matches!(err, AppError::ScriptIo { .. }));
    }

    // ---- Headless ----

    #[test]
    fn test_headless_script_drives_player() {
        let script = Script::new(vec![
            ScriptEntry { tick: 0, event: down("<up>") },
            ScriptEntry { tick: 30, event: up("<up>") },
        ]);
        let mut session = Session::new(GameConfig::default()).unwrap();
        let mut out = Vec::new();

        let snap = run_headless(&mut session, 40, &script, None, &mut out).unwrap();

        let player = snap.player.unwrap();
        assert!(player.velocity.y > 0.0);
        assert_eq!(snap.time.tick, 40);
        assert!(out.is_empty());
        assert_eq!(session.stats().frames(), 40);
        assert_eq!(session.recorder().frames(), 40);
    }

    #[test]
    fn test_headless_fire_spawns_bullets() {
        let script = Script::new(vec![ScriptEntry { tick: 0, event: down("<space>") }]);
        let mut session = Session::new(GameConfig::default()).unwrap();

        let snap = run_headless(&mut session, 30, &script, None, &mut Vec::new()).unwrap();

        // 0.5s of held fire at 0.1s reload.
        let bullets = snap.entities.iter().filter(|e| e.kind == EntityKind::Bullet).count();
        assert!((4..=6).contains(&bullets), "bullets = {bullets}");
    }

    #[test]
    fn test_snapshot_lines_every_n() {
        let mut session = Session::new(GameConfig::default()).unwrap();
        let mut out = Vec::new();
        run_headless(&mut session, 10, &Script::default(), Some(5), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(value.get("entities").is_some());
        }
    }

    #[test]
    fn test_headless_runs_are_deterministic() {
        let script = Script::new(vec![
            ScriptEntry { tick: 0, event: down("<up>") },
            ScriptEntry { tick: 3, event: down("Q") },
            ScriptEntry { tick: 8, event: down("<space>") },
        ]);
        let run = || {
            let mut session = Session::new(GameConfig::default()).unwrap();
            let mut out = Vec::new();
            run_headless(&mut session, 20, &script, Some(1), &mut out).unwrap();
            out
        };
        assert_eq!(run(), run());
    }

    // ---- Threaded loop ----

    #[test]
    fn test_game_loop_thread_lifecycle() {
        let session = Session::new(GameConfig::default()).unwrap();
        let handle = spawn_game_loop(session).unwrap();

        assert!(handle.send(LoopCommand::Key(down("<up>"))));
        std::thread::sleep(Duration::from_millis(100));
        assert!(handle.latest_snapshot().is_some());

        assert!(handle.send(LoopCommand::Pause));
        std::thread::sleep(Duration::from_millis(50));
        let paused = handle.latest_snapshot().unwrap();
        assert_eq!(paused.phase, SimPhase::Paused);

        let stats = handle.shutdown().unwrap();
        assert!(stats.frames() > 0);
    }
}
