pub mod data;
pub mod game;

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use web_sys::js_sys::Promise;

pub use game::{
    combat_outcome, Card, CardEffect, CardId, CardType, CombatAction, CombatConfig, CombatEvent,
    CombatOutcome, CombatSession, Creature, EffectKind, Enemy, EnemyIntent, GamePhase, GameState,
    IntentType, Player, Rarity, ResumeTicket, RuleEngine, RuleError, RuleResolution, Side,
};

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn start() {
    set_panic_hook();
    web_sys::console::debug_1(&"card combat engine loaded".into());
}

fn to_js_error(error: RuleError) -> JsValue {
    to_value(&error).unwrap_or_else(|serialize_err| JsValue::from_str(&serialize_err.to_string()))
}

fn serde_to_js_error<E: std::fmt::Display>(error: E) -> JsValue {
    let message = error.to_string();
    web_sys::console::warn_1(&format!("card combat: {message}").into());
    to_js_error(RuleError::InvalidPayload { message })
}

fn make_resolution_json(resolution: &RuleResolution) -> Result<String, JsValue> {
    serde_json::to_string(resolution).map_err(serde_to_js_error)
}

fn rng_from(seed: Option<u32>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(u64::from(seed)),
        None => SmallRng::from_entropy(),
    }
}

/// 面向前端的战斗会话。所有动作按调用顺序依次处理。
#[wasm_bindgen]
pub struct GameEngine {
    session: Rc<RefCell<CombatSession>>,
    resume_delay_ms: u32,
}

#[wasm_bindgen]
impl GameEngine {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>, seed: Option<u32>) -> Result<GameEngine, JsValue> {
        let config: CombatConfig = match config_json {
            Some(json) => serde_json::from_str(&json).map_err(serde_to_js_error)?,
            None => CombatConfig::default(),
        };
        let session = CombatSession::new(RuleEngine::new(config), rng_from(seed));
        let resume_delay_ms = session.engine().config().resume_delay_ms;
        Ok(GameEngine {
            session: Rc::new(RefCell::new(session)),
            resume_delay_ms,
        })
    }

    pub fn state_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.session.borrow().state()).map_err(serde_to_js_error)
    }

    pub fn outcome(&self) -> Result<JsValue, JsValue> {
        to_value(&self.session.borrow().outcome()).map_err(JsValue::from)
    }

    pub fn dispatch_json(&mut self, action_json: &str) -> Result<String, JsValue> {
        let action: CombatAction = serde_json::from_str(action_json).map_err(serde_to_js_error)?;
        self.dispatch(action)
    }

    pub fn start_combat_json(&mut self, enemy_json: &str) -> Result<String, JsValue> {
        let enemy: Enemy = serde_json::from_str(enemy_json).map_err(serde_to_js_error)?;
        self.dispatch(CombatAction::StartCombat { enemy })
    }

    pub fn start_combat_by_id(&mut self, enemy_id: &str) -> Result<String, JsValue> {
        let enemy = data::enemy_by_id(enemy_id)
            .cloned()
            .ok_or_else(|| {
                to_js_error(RuleError::UnknownEnemy {
                    id: enemy_id.to_owned(),
                })
            })?;
        self.dispatch(CombatAction::StartCombat { enemy })
    }

    pub fn play_card(&mut self, card_id: &str) -> Result<String, JsValue> {
        self.dispatch(CombatAction::PlayCard {
            card_id: card_id.to_owned(),
        })
    }

    pub fn end_turn(&mut self) -> Result<String, JsValue> {
        self.dispatch(CombatAction::EndTurn)
    }

    /// 延迟后自动开始玩家回合。期间若重置或重新开战，Promise 以 `null` 结束且不改动状态。
    pub fn schedule_resume(&self, delay_ms: Option<u32>) -> Promise {
        let session = Rc::clone(&self.session);
        let ticket = session.borrow().pending();
        let delay = delay_ms.unwrap_or(self.resume_delay_ms);

        future_to_promise(async move {
            let Some(ticket) = ticket else {
                return Ok(JsValue::NULL);
            };
            if delay > 0 {
                TimeoutFuture::new(delay).await;
            }
            let resolution = session.borrow_mut().resume(ticket);
            match resolution {
                Some(resolution) => make_resolution_json(&resolution).map(|json| JsValue::from_str(&json)),
                None => Ok(JsValue::NULL),
            }
        })
    }

    pub fn resume_player_turn(&mut self) -> Result<String, JsValue> {
        self.dispatch(CombatAction::ResumePlayerTurn)
    }

    pub fn draw(&mut self, amount: usize) -> Result<String, JsValue> {
        self.dispatch(CombatAction::DrawCards { amount })
    }

    pub fn log(&mut self, message: &str) -> Result<String, JsValue> {
        self.dispatch(CombatAction::AddLog {
            message: message.to_owned(),
        })
    }

    pub fn reset(&mut self) -> Result<String, JsValue> {
        let mut session = self.session.borrow_mut();
        let state = session.reset();
        serde_json::to_string(state).map_err(serde_to_js_error)
    }

    fn dispatch(&mut self, action: CombatAction) -> Result<String, JsValue> {
        let resolution = self.session.borrow_mut().dispatch(&action);
        make_resolution_json(&resolution)
    }
}

fn resolve_with(state: JsValue, action: CombatAction, seed: Option<u32>) -> Result<RuleResolution, JsValue> {
    let state: GameState = from_value(state).map_err(JsValue::from)?;
    let engine = RuleEngine::default();
    Ok(engine.resolve(&state, &action, &mut rng_from(seed)))
}

/// 返回新的状态快照，可直接传给下一次调用。
fn next_state(state: JsValue, action: CombatAction, seed: Option<u32>) -> Result<JsValue, JsValue> {
    let resolution = resolve_with(state, action, seed)?;
    to_value(&resolution.state).map_err(JsValue::from)
}

/// 创建带有初始牌组、尚未开战的状态。
#[wasm_bindgen(js_name = "createGameState")]
pub fn create_game_state(seed: Option<u32>) -> Result<JsValue, JsValue> {
    let state = RuleEngine::default().new_game(&mut rng_from(seed));
    to_value(&state).map_err(JsValue::from)
}

#[wasm_bindgen(js_name = "startCombat")]
pub fn start_combat(state: JsValue, enemy: JsValue, seed: Option<u32>) -> Result<JsValue, JsValue> {
    let enemy: Enemy = from_value(enemy).map_err(JsValue::from)?;
    next_state(state, CombatAction::StartCombat { enemy }, seed)
}

#[wasm_bindgen(js_name = "playCard")]
pub fn play_card(state: JsValue, card_id: String) -> Result<JsValue, JsValue> {
    next_state(state, CombatAction::PlayCard { card_id }, None)
}

#[wasm_bindgen(js_name = "endTurn")]
pub fn end_turn(state: JsValue) -> Result<JsValue, JsValue> {
    next_state(state, CombatAction::EndTurn, None)
}

#[wasm_bindgen(js_name = "resumePlayerTurn")]
pub fn resume_player_turn(state: JsValue) -> Result<JsValue, JsValue> {
    next_state(state, CombatAction::ResumePlayerTurn, None)
}

#[wasm_bindgen(js_name = "drawCards")]
pub fn draw_cards(state: JsValue, amount: usize) -> Result<JsValue, JsValue> {
    next_state(state, CombatAction::DrawCards { amount }, None)
}

#[wasm_bindgen(js_name = "appendLog")]
pub fn append_log(state: JsValue, message: String) -> Result<JsValue, JsValue> {
    next_state(state, CombatAction::AddLog { message }, None)
}

/// 应用任意动作，返回 `{ state, events, outcome }`。
#[wasm_bindgen(js_name = "applyAction")]
pub fn apply_action(state: JsValue, action: JsValue, seed: Option<u32>) -> Result<JsValue, JsValue> {
    let action: CombatAction = from_value(action).map_err(JsValue::from)?;
    let resolution = resolve_with(state, action, seed)?;
    to_value(&resolution).map_err(JsValue::from)
}

#[wasm_bindgen(js_name = "combatOutcome")]
pub fn combat_outcome_js(state: JsValue) -> Result<JsValue, JsValue> {
    let state: GameState = from_value(state).map_err(JsValue::from)?;
    to_value(&combat_outcome(&state)).map_err(JsValue::from)
}

#[wasm_bindgen(js_name = "starterCards")]
pub fn starter_cards() -> Result<JsValue, JsValue> {
    to_value(data::starter_cards()).map_err(JsValue::from)
}

#[wasm_bindgen(js_name = "basicEnemies")]
pub fn basic_enemies() -> Result<JsValue, JsValue> {
    to_value(data::basic_enemies()).map_err(JsValue::from)
}

#[cfg(feature = "console_error_panic_hook")]
fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

#[cfg(not(feature = "console_error_panic_hook"))]
fn set_panic_hook() {}
