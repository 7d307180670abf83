//! End-to-end pipeline tests: host event -> classification -> gate ->
//! snapshot -> submission -> status bus, with every external collaborator
//! mocked at its port.

use std::sync::{Arc, Mutex};

use keyhunt_client::ports::{
    MockGameStatePort, MockHostActionPort, MockValidationApiPort, PlayerState,
};
use keyhunt_client::{ConfigStore, KeyhuntPlugin, PluginDeps, PluginEvent};
use keyhunt_domain::{ItemStack, MenuAction, ScenePoint, TriggerKind, WorldPoint, DIG_ANIMATION};
use keyhunt_protocol::{ApiResult, GameStateSubmission};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "keyhunt_client=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

fn player_with_spade() -> MockGameStatePort {
    let mut game_state = MockGameStatePort::new();
    game_state.expect_local_player().return_const(Some(PlayerState {
        world: WorldPoint::new(3222, 3218, 0),
        scene: ScenePoint::new(52, 50),
        display_name: Some("Zezima".to_string()),
    }));
    game_state
        .expect_inventory()
        .return_const(vec![Some(ItemStack::new(952, 1)), None, None]);
    game_state.expect_equipment().return_const(Vec::new());
    game_state
}

fn plugin_with(
    game_state: MockGameStatePort,
    host: MockHostActionPort,
    api: MockValidationApiPort,
) -> (KeyhuntPlugin, tempfile::TempDir) {
    init_logging();
    let dir = tempfile::tempdir().expect("tempdir");
    let config = ConfigStore::open(dir.path().join("config.json"));
    let plugin = KeyhuntPlugin::new(PluginDeps {
        game_state: Arc::new(game_state),
        host: Arc::new(host),
        api: Arc::new(api),
        config,
        runtime: tokio::runtime::Handle::current(),
    });
    (plugin, dir)
}

fn record_events(plugin: &KeyhuntPlugin) -> Arc<Mutex<Vec<PluginEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    plugin.status_bus().subscribe(move |event| {
        if let Ok(mut seen) = sink.lock() {
            seen.push(event);
        }
    });
    events
}

#[tokio::test]
async fn dig_capture_flows_from_key_setup_to_success_echo() {
    let game_state = player_with_spade();

    let mut host = MockHostActionPort::new();
    host.expect_send_chat_message()
        .withf(|message: &str| message.starts_with("[Keyhunt] \u{2713}"))
        .times(1)
        .return_const(());
    // Celebration flags default to on
    host.expect_play_sound().times(1..).return_const(());
    host.expect_play_player_graphic().times(1).return_const(());

    let mut api = MockValidationApiPort::new();
    api.expect_validate_key()
        .withf(|key: &str| key == "abc123")
        .times(1)
        .returning(|_| ApiResult::ok("exists"));
    api.expect_submit_guess()
        .withf(|submission: &GameStateSubmission| {
            submission.event_key == "abc123"
                && submission.emote_id.is_none()
                && submission.npc_id.is_none()
                && submission.inventory.len() == 1
                && submission.inventory[0].slot == 0
                && submission.worn_items.is_empty()
                && submission.rsn.as_deref() == Some("Zezima")
        })
        .times(1)
        .returning(|_| ApiResult::ok("Correct! Puzzle solved."));

    let (plugin, _dir) = plugin_with(game_state, host, api);
    let events = record_events(&plugin);

    plugin.event_keys().set_key("abc123").await.expect("key accepted");

    let task = plugin.on_animation_changed(DIG_ANIMATION).expect("capture dispatched");
    task.await.expect("join");

    // Give the celebration's delayed sound stage time to run
    tokio::time::sleep(std::time::Duration::from_millis(700)).await;

    let events = events.lock().expect("lock");
    assert!(matches!(&events[0], PluginEvent::KeySet { key } if key == "abc123"));
    assert!(matches!(
        &events[1],
        PluginEvent::CaptureStarted { trigger: TriggerKind::Dig, event_key, .. }
            if event_key == "abc123"
    ));
    assert!(matches!(
        &events[2],
        PluginEvent::CaptureCompleted { result } if result.success
    ));
}

#[tokio::test]
async fn no_key_means_no_traffic_and_no_status() {
    let game_state = MockGameStatePort::new();
    let host = MockHostActionPort::new();
    let mut api = MockValidationApiPort::new();
    api.expect_submit_guess().times(0);

    let (plugin, _dir) = plugin_with(game_state, host, api);
    let events = record_events(&plugin);

    assert!(plugin.on_animation_changed(DIG_ANIMATION).is_none());
    assert!(plugin.on_menu_option_clicked(MenuAction::NpcFirstOption, 3077, "Talk-to").is_none());
    assert!(plugin.submit_manual().is_none());

    assert!(events.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn unlisted_animation_is_ignored_even_with_a_key() {
    let game_state = MockGameStatePort::new();
    let host = MockHostActionPort::new();
    let mut api = MockValidationApiPort::new();
    api.expect_validate_key().returning(|_| ApiResult::ok("exists"));
    api.expect_submit_guess().times(0);

    let (plugin, _dir) = plugin_with(game_state, host, api);
    plugin.event_keys().set_key("abc123").await.expect("key accepted");

    assert!(plugin.on_animation_changed(4444).is_none());
}

#[tokio::test]
async fn overlapping_captures_race_and_both_complete() {
    let game_state = player_with_spade();
    let mut host = MockHostActionPort::new();
    host.expect_send_chat_message().return_const(());
    host.expect_play_sound().return_const(());
    host.expect_play_player_graphic().return_const(());

    let mut api = MockValidationApiPort::new();
    api.expect_validate_key().returning(|_| ApiResult::ok("exists"));
    api.expect_submit_guess()
        .times(2)
        .returning(|_| ApiResult::ok("Correct!"));

    let (plugin, _dir) = plugin_with(game_state, host, api);
    let events = record_events(&plugin);

    plugin.event_keys().set_key("abc123").await.expect("key accepted");

    // No in-flight guard: both dispatch, both run to completion
    let first = plugin.submit_manual().expect("first capture");
    let second = plugin.on_animation_changed(862).expect("second capture");
    first.await.expect("join");
    second.await.expect("join");

    tokio::time::sleep(std::time::Duration::from_millis(700)).await;

    let events = events.lock().expect("lock");
    let completed = events
        .iter()
        .filter(|event| matches!(event, PluginEvent::CaptureCompleted { .. }))
        .count();
    assert_eq!(completed, 2);
}

#[tokio::test]
async fn failed_submission_reaches_observers_with_the_server_message() {
    let game_state = player_with_spade();
    let host = MockHostActionPort::new();

    let mut api = MockValidationApiPort::new();
    api.expect_validate_key().returning(|_| ApiResult::ok("exists"));
    api.expect_submit_guess()
        .returning(|_| ApiResult::error("Server error 502: upstream down"));

    let (plugin, _dir) = plugin_with(game_state, host, api);
    let events = record_events(&plugin);

    plugin.event_keys().set_key("abc123").await.expect("key accepted");
    let task = plugin.submit_manual().expect("capture dispatched");
    task.await.expect("join");

    let events = events.lock().expect("lock");
    assert!(matches!(
        events.last(),
        Some(PluginEvent::CaptureCompleted { result })
            if !result.success && result.message == "Server error 502: upstream down"
    ));
}
