//! 一场战斗的编排层：持有当前快照、随机源，以及结束回合后待执行的恢复动作。

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::rules::{CombatAction, RuleEngine, RuleResolution};
use super::state::{CombatOutcome, Enemy, GamePhase, GameState};

/// 结束回合后发出的恢复凭据。重置或开始新战斗后旧凭据失效。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResumeTicket {
    generation: u64,
    turn: u32,
}

impl ResumeTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }
}

pub struct CombatSession<R = SmallRng> {
    engine: RuleEngine,
    state: GameState,
    rng: R,
    generation: u64,
    pending: Option<ResumeTicket>,
}

impl CombatSession<SmallRng> {
    pub fn seeded(engine: RuleEngine, seed: u64) -> Self {
        Self::new(engine, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> CombatSession<R> {
    pub fn new(engine: RuleEngine, mut rng: R) -> Self {
        let state = engine.new_game(&mut rng);
        Self::with_state(engine, state, rng)
    }

    pub fn with_state(engine: RuleEngine, state: GameState, rng: R) -> Self {
        Self {
            engine,
            state,
            rng,
            generation: 0,
            pending: None,
        }
    }

    pub fn engine(&self) -> &RuleEngine {
        &self.engine
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn outcome(&self) -> CombatOutcome {
        self.state.outcome()
    }

    pub fn pending(&self) -> Option<ResumeTicket> {
        self.pending
    }

    /// 作废所有已发出的恢复凭据。
    pub fn cancel_pending(&mut self) {
        self.generation += 1;
        if let Some(ticket) = self.pending.take() {
            debug!(turn = ticket.turn, "pending resume cancelled");
        }
    }

    /// 依次处理一个动作，用结果快照替换当前状态。
    pub fn dispatch(&mut self, action: &CombatAction) -> RuleResolution {
        if matches!(action, CombatAction::StartCombat { .. }) {
            self.cancel_pending();
        }

        let before = self.state.phase;
        let resolution = self.engine.resolve(&self.state, action, &mut self.rng);
        self.state = resolution.state.clone();

        let entered_enemy_turn =
            before == GamePhase::PlayerTurn && self.state.phase == GamePhase::EnemyTurn;
        if entered_enemy_turn && !resolution.outcome.is_terminal() {
            let ticket = ResumeTicket {
                generation: self.generation,
                turn: self.state.turn,
            };
            debug!(turn = ticket.turn, "resume scheduled");
            self.pending = Some(ticket);
        } else if self.state.phase != GamePhase::EnemyTurn {
            self.pending = None;
        }

        resolution
    }

    pub fn start_combat(&mut self, enemy: &Enemy) -> &GameState {
        self.dispatch(&CombatAction::StartCombat {
            enemy: enemy.clone(),
        });
        &self.state
    }

    pub fn play_card(&mut self, card_id: &str) -> &GameState {
        self.dispatch(&CombatAction::PlayCard {
            card_id: card_id.to_owned(),
        });
        &self.state
    }

    /// 结束回合；若需要自动开始下一回合则返回对应凭据。
    pub fn end_turn(&mut self) -> Option<ResumeTicket> {
        self.dispatch(&CombatAction::EndTurn);
        self.pending
    }

    /// 凭据仍有效时开始玩家回合，否则不做任何事。
    pub fn resume(&mut self, ticket: ResumeTicket) -> Option<RuleResolution> {
        if self.pending != Some(ticket) {
            debug!(turn = ticket.turn, "stale resume ignored");
            return None;
        }
        self.pending = None;
        Some(self.dispatch(&CombatAction::ResumePlayerTurn))
    }

    pub fn draw(&mut self, amount: usize) -> &GameState {
        self.dispatch(&CombatAction::DrawCards { amount });
        &self.state
    }

    pub fn log(&mut self, message: impl Into<String>) -> &GameState {
        self.dispatch(&CombatAction::AddLog {
            message: message.into(),
        });
        &self.state
    }

    /// 开始新的一局：新牌组、无敌人，旧的恢复凭据全部失效。
    pub fn reset(&mut self) -> &GameState {
        self.cancel_pending();
        self.state = self.engine.new_game(&mut self.rng);
        &self.state
    }
}
