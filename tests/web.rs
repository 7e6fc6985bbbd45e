#![cfg(target_arch = "wasm32")]

use card_combat::{
    create_game_state, data, end_turn, play_card, resume_player_turn, start_combat, GameEngine,
    GamePhase, GameState,
};
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn start_combat_by_id_logs_opening_line() {
    let mut engine = GameEngine::new(None, Some(7)).expect("engine should build");
    let json = engine
        .start_combat_by_id("cultist")
        .expect("cultist is in the catalog");
    assert!(json.contains("Combat started against Cultist!"));
}

#[wasm_bindgen_test]
fn unknown_enemy_is_an_error() {
    let mut engine = GameEngine::new(None, Some(7)).expect("engine should build");
    assert!(engine.start_combat_by_id("slime-boss").is_err());
}

#[wasm_bindgen_test]
async fn scheduled_resume_starts_next_turn() {
    let mut engine = GameEngine::new(None, Some(7)).expect("engine should build");
    engine.start_combat_by_id("cultist").expect("combat should start");
    engine.end_turn().expect("end turn should resolve");

    let value = JsFuture::from(engine.schedule_resume(Some(5)))
        .await
        .expect("promise should resolve");
    let json = value.as_string().expect("resume should produce a resolution");
    assert!(json.contains("Turn 2 begins."));
}

#[wasm_bindgen_test]
async fn reset_cancels_scheduled_resume() {
    let mut engine = GameEngine::new(None, Some(7)).expect("engine should build");
    engine.start_combat_by_id("cultist").expect("combat should start");
    engine.end_turn().expect("end turn should resolve");

    let promise = engine.schedule_resume(Some(5));
    engine.reset().expect("reset should succeed");

    let value = JsFuture::from(promise).await.expect("promise should resolve");
    assert!(value.is_null());
}

#[wasm_bindgen_test]
fn free_functions_chain_state_snapshots() {
    let state = create_game_state(Some(3)).expect("state should build");
    let enemy = to_value(&data::cultist()).expect("enemy should serialize");
    let state = start_combat(state, enemy, Some(3)).expect("combat should start");

    let snapshot: GameState = from_value(state.clone()).expect("start_combat returns a state");
    let card_id = snapshot.player.hand[0].id.clone();

    let state = play_card(state, card_id).expect("card should resolve");
    let state = end_turn(state).expect("end turn should resolve");
    let state = resume_player_turn(state).expect("resume should resolve");

    let state: GameState = from_value(state).expect("chained calls return a state");
    assert_eq!(state.turn, 2);
    assert_eq!(state.phase, GamePhase::PlayerTurn);
    assert!(state
        .combat_log
        .iter()
        .any(|line| line.starts_with("Turn 2 begins.")));
}
