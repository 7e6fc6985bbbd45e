use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

use super::{
    config::CombatConfig,
    creatures::{creatures_attack, damage_creatures_then_player},
    deck::{draw, gather_into_draw_pile, starter_deck},
    effects,
    resolve,
    state::{
        CardEffect, CardId, CombatEvent, CombatOutcome, EffectKind, Enemy, GamePhase, GameState,
        Player,
    },
};

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum RuleError {
    #[error("Not enough energy!")]
    InsufficientEnergy { required: u32, available: u32 },
    #[error("Unknown enemy: {id}")]
    UnknownEnemy { id: String },
    #[error("Invalid payload: {message}")]
    InvalidPayload { message: String },
}

/// 辅助调整的作用对象。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player,
    Enemy,
}

/// 外部可提交的全部动作。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CombatAction {
    StartCombat { enemy: Enemy },
    PlayCard { card_id: CardId },
    EndTurn,
    ResumePlayerTurn,
    DrawCards { amount: usize },
    DealDamage { target: Side, amount: u32 },
    ApplyBlock { target: Side, amount: u32 },
    AddEffect { target: Side, effect: CardEffect },
    RemoveEffect { target: Side, kind: EffectKind },
    AddLog { message: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleResolution {
    pub state: GameState,
    /// 本次动作新增的事件，顺序与日志一致。
    pub events: Vec<CombatEvent>,
    pub outcome: CombatOutcome,
}

/// 结算过程中的累积器：当前状态与尚未写入日志的事件。
#[derive(Debug, Clone)]
struct Turn {
    state: GameState,
    events: Vec<CombatEvent>,
}

impl Turn {
    fn begin(state: &GameState) -> Self {
        Self {
            state: state.clone(),
            events: Vec::new(),
        }
    }

    fn record(mut self, event: CombatEvent) -> Self {
        self.events.push(event);
        self
    }

    fn then(self, step: impl FnOnce(Turn) -> Turn) -> Turn {
        step(self)
    }

    fn into_resolution(self) -> RuleResolution {
        let Turn { mut state, events } = self;
        state
            .combat_log
            .extend(events.iter().map(ToString::to_string));
        let outcome = state.outcome();
        RuleResolution {
            state,
            events,
            outcome,
        }
    }

    fn finish(self) -> GameState {
        self.into_resolution().state
    }
}

/// 随从依次攻击敌人。
fn creatures_strike(turn: Turn) -> Turn {
    let Some(enemy) = turn.state.enemy.as_ref() else {
        return turn;
    };
    if turn.state.player.creatures.is_empty() {
        return turn;
    }

    let (enemy, total) = creatures_attack(&turn.state.player.creatures, enemy);
    let target = enemy.name.clone();
    let mut turn = turn;
    turn.state.enemy = Some(enemy);
    trace!(total, "creatures attacked");
    if total > 0 {
        turn.record(CombatEvent::CreaturesStruck {
            amount: total,
            target,
        })
    } else {
        turn
    }
}

/// 敌人按意图数值攻击，伤害先由随从承受。
fn enemy_strikes(turn: Turn) -> Turn {
    let Some(enemy) = turn.state.enemy.as_ref() else {
        return turn;
    };
    let amount = enemy.intent.value;
    if amount == 0 {
        return turn;
    }
    let enemy_name = enemy.name.clone();

    let absorbed = damage_creatures_then_player(&turn.state.player, amount);
    trace!(
        amount,
        to_player = absorbed.to_player,
        killed = absorbed.creatures_killed,
        "enemy attacked"
    );

    let mut turn = turn;
    turn.state.player = absorbed.player;
    if absorbed.creatures_killed > 0 {
        turn = turn.record(CombatEvent::CreaturesDied {
            count: absorbed.creatures_killed,
        });
    }
    turn.record(CombatEvent::EnemyAttacked {
        enemy: enemy_name,
        amount,
        to_player: absorbed.to_player,
        creatures_killed: absorbed.creatures_killed,
    })
}

fn enter_phase(phase: GamePhase) -> impl FnOnce(Turn) -> Turn {
    move |mut turn| {
        turn.state.phase = phase;
        turn
    }
}

pub fn combat_outcome(state: &GameState) -> CombatOutcome {
    state.outcome()
}

/// 战斗状态机。每个转换都接收一个快照并返回新的快照；非法转换原样返回。
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    config: CombatConfig,
}

impl RuleEngine {
    pub fn new(config: CombatConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    /// 使用初始牌组创建尚未进入战斗的状态。
    pub fn new_game<R: Rng + ?Sized>(&self, rng: &mut R) -> GameState {
        GameState::new(Player::from_config(&self.config, starter_deck(rng)))
    }

    fn can_act(state: &GameState, phase: GamePhase) -> bool {
        state.phase == phase && state.enemy.is_some()
    }

    fn start_combat_turn<R: Rng + ?Sized>(
        &self,
        state: &GameState,
        enemy: &Enemy,
        rng: &mut R,
    ) -> Turn {
        let mut player = gather_into_draw_pile(&state.player, rng);
        player.creatures.clear();
        player.effects.clear();
        player.block = 0;
        player.refill_energy();
        let (player, drawn) = draw(&player, self.config.opening_hand);

        let enemy = enemy.fresh();
        debug!(enemy = %enemy.id, drawn = drawn.len(), "combat started");
        let started = CombatEvent::CombatStarted {
            enemy: enemy.name.clone(),
        };

        let fresh = GameState {
            player,
            enemy: Some(enemy),
            turn: 1,
            phase: GamePhase::PlayerTurn,
            combat_log: Vec::new(),
            summon_seq: state.summon_seq,
        };
        Turn::begin(&fresh).record(started)
    }

    fn play_card_turn(&self, state: &GameState, card_id: &str) -> Turn {
        if !Self::can_act(state, GamePhase::PlayerTurn) {
            return Turn::begin(state);
        }
        let (Some(enemy), Some(card)) = (
            state.enemy.as_ref(),
            state.player.find_card_in_hand(card_id),
        ) else {
            return Turn::begin(state);
        };

        let sequence = state.summon_seq + 1;
        match resolve::play_card(card, &state.player, enemy, sequence) {
            Ok(played) => {
                debug!(
                    card = %card.id,
                    damage = ?played.damage_dealt,
                    block = ?played.block_gained,
                    "card played"
                );
                let target_name = played.target.name.clone();
                let mut turn = Turn::begin(state);
                turn.state.player = played.player;
                turn.state.enemy = Some(played.target);

                if let Some(creature) = played.creature_summoned {
                    turn.state.summon_seq = sequence;
                    turn = turn.record(CombatEvent::CreatureSummoned {
                        name: creature.name,
                        hp: creature.hp,
                        attack: creature.attack,
                    });
                }
                if let Some(amount) = played.damage_dealt.filter(|amount| *amount > 0) {
                    turn = turn.record(CombatEvent::DamageDealt {
                        amount,
                        target: target_name,
                    });
                }
                if let Some(amount) = played.block_gained {
                    turn = turn.record(CombatEvent::BlockGained { amount });
                }
                turn
            }
            Err(error) => {
                debug!(card = %card.id, %error, "card rejected");
                Turn::begin(state).record(CombatEvent::NotEnoughEnergy)
            }
        }
    }

    fn close_turn(&self, state: &GameState) -> Turn {
        if !Self::can_act(state, GamePhase::PlayerTurn) {
            return Turn::begin(state);
        }
        debug!(turn = state.turn, "player ended turn");
        Turn::begin(state)
            .then(creatures_strike)
            .then(enemy_strikes)
            .then(enter_phase(GamePhase::EnemyTurn))
    }

    fn resume_turn(&self, state: &GameState) -> Turn {
        if !Self::can_act(state, GamePhase::EnemyTurn) {
            return Turn::begin(state);
        }
        let (mut player, drawn) = draw(&state.player, self.config.draw_per_turn);
        player.refill_energy();
        player.block = 0;

        let mut turn = Turn::begin(state);
        turn.state.player = player;
        turn.state.turn += 1;
        debug!(turn = turn.state.turn, drawn = drawn.len(), "player turn resumed");
        let began = CombatEvent::TurnBegan {
            turn: turn.state.turn,
            drawn: drawn.len(),
        };
        turn.record(began).then(enter_phase(GamePhase::PlayerTurn))
    }

    fn draw_turn(state: &GameState, amount: usize) -> Turn {
        let mut turn = Turn::begin(state);
        turn.state.player = draw(&state.player, amount).0;
        turn
    }

    fn log_turn(state: &GameState, text: String) -> Turn {
        Turn::begin(state).record(CombatEvent::Message { text })
    }

    /// 对一方施加调整；敌人不存在时不做任何事。
    fn adjust(
        state: &GameState,
        target: Side,
        on_player: impl FnOnce(&Player) -> Player,
        on_enemy: impl FnOnce(&Enemy) -> Enemy,
    ) -> Turn {
        let mut turn = Turn::begin(state);
        match target {
            Side::Player => turn.state.player = on_player(&state.player),
            Side::Enemy => turn.state.enemy = state.enemy.as_ref().map(on_enemy),
        }
        turn
    }

    fn action_turn<R: Rng + ?Sized>(
        &self,
        state: &GameState,
        action: &CombatAction,
        rng: &mut R,
    ) -> Turn {
        match action {
            CombatAction::StartCombat { enemy } => self.start_combat_turn(state, enemy, rng),
            CombatAction::PlayCard { card_id } => self.play_card_turn(state, card_id),
            CombatAction::EndTurn => self.close_turn(state),
            CombatAction::ResumePlayerTurn => self.resume_turn(state),
            CombatAction::DrawCards { amount } => Self::draw_turn(state, *amount),
            CombatAction::AddLog { message } => Self::log_turn(state, message.clone()),
            CombatAction::DealDamage { target, amount } => Self::adjust(
                state,
                *target,
                |player| effects::apply_damage(player, *amount),
                |enemy| effects::apply_damage(enemy, *amount),
            ),
            CombatAction::ApplyBlock { target, amount } => Self::adjust(
                state,
                *target,
                |player| effects::apply_block(player, *amount),
                |enemy| effects::apply_block(enemy, *amount),
            ),
            CombatAction::AddEffect { target, effect } => Self::adjust(
                state,
                *target,
                |player| effects::add_effect(player, effect),
                |enemy| effects::add_effect(enemy, effect),
            ),
            CombatAction::RemoveEffect { target, kind } => Self::adjust(
                state,
                *target,
                |player| effects::remove_effect(player, *kind),
                |enemy| effects::remove_effect(enemy, *kind),
            ),
        }
    }

    /// 应用任意动作并返回新增事件与战斗结果。
    pub fn resolve<R: Rng + ?Sized>(
        &self,
        state: &GameState,
        action: &CombatAction,
        rng: &mut R,
    ) -> RuleResolution {
        self.action_turn(state, action, rng).into_resolution()
    }

    pub fn apply<R: Rng + ?Sized>(
        &self,
        state: &GameState,
        action: &CombatAction,
        rng: &mut R,
    ) -> GameState {
        self.action_turn(state, action, rng).finish()
    }

    pub fn start_combat<R: Rng + ?Sized>(
        &self,
        state: &GameState,
        enemy: &Enemy,
        rng: &mut R,
    ) -> GameState {
        self.start_combat_turn(state, enemy, rng).finish()
    }

    pub fn play_card(&self, state: &GameState, card_id: &str) -> GameState {
        self.play_card_turn(state, card_id).finish()
    }

    pub fn end_turn(&self, state: &GameState) -> GameState {
        self.close_turn(state).finish()
    }

    pub fn resume_player_turn(&self, state: &GameState) -> GameState {
        self.resume_turn(state).finish()
    }

    pub fn draw(&self, state: &GameState, amount: usize) -> GameState {
        Self::draw_turn(state, amount).finish()
    }

    pub fn log(&self, state: &GameState, message: impl Into<String>) -> GameState {
        Self::log_turn(state, message.into()).finish()
    }

    pub fn deal_damage(&self, state: &GameState, target: Side, amount: u32) -> GameState {
        Self::adjust(
            state,
            target,
            |player| effects::apply_damage(player, amount),
            |enemy| effects::apply_damage(enemy, amount),
        )
        .finish()
    }

    pub fn apply_block(&self, state: &GameState, target: Side, amount: u32) -> GameState {
        Self::adjust(
            state,
            target,
            |player| effects::apply_block(player, amount),
            |enemy| effects::apply_block(enemy, amount),
        )
        .finish()
    }

    pub fn add_effect(&self, state: &GameState, target: Side, effect: CardEffect) -> GameState {
        Self::adjust(
            state,
            target,
            |player| effects::add_effect(player, &effect),
            |enemy| effects::add_effect(enemy, &effect),
        )
        .finish()
    }

    pub fn remove_effect(&self, state: &GameState, target: Side, kind: EffectKind) -> GameState {
        Self::adjust(
            state,
            target,
            |player| effects::remove_effect(player, kind),
            |enemy| effects::remove_effect(enemy, kind),
        )
        .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data;
    use crate::game::state::{Card, Creature};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    fn engine() -> RuleEngine {
        RuleEngine::default()
    }

    fn in_combat() -> GameState {
        let engine = engine();
        let mut rng = rng();
        let fresh = engine.new_game(&mut rng);
        engine.start_combat(&fresh, &data::cultist(), &mut rng)
    }

    fn with_hand(mut state: GameState, hand: Vec<Card>) -> GameState {
        state.player.hand = hand;
        state
    }

    fn creature(id: &str, hp: u32, attack: u32) -> Creature {
        Creature {
            id: id.into(),
            name: id.into(),
            hp,
            max_hp: hp,
            attack,
            card_id: "strike-0".into(),
        }
    }

    #[test]
    fn start_combat_draws_opening_hand_and_logs_once() {
        let state = in_combat();
        assert_eq!(state.phase, GamePhase::PlayerTurn);
        assert_eq!(state.turn, 1);
        assert_eq!(state.player.hand.len(), 5);
        assert_eq!(state.player.draw_pile.len(), 5);
        assert!(state.player.deck.is_empty());
        assert_eq!(state.combat_log, vec!["Combat started against Cultist!"]);

        let enemy = state.enemy.as_ref().expect("enemy should be set");
        assert_eq!(enemy.hp, enemy.max_hp);
        assert_eq!(enemy.block, 0);
    }

    #[test]
    fn restarting_combat_recollects_every_card() {
        let engine = engine();
        let mut rng = rng();
        let mut state = in_combat();
        state.player.discard_pile.push(state.player.hand.remove(0));
        state.player.creatures.push(creature("old", 3, 3));

        let restarted = engine.start_combat(&state, &data::jaw_worm(), &mut rng);
        assert_eq!(restarted.player.card_count(), 10);
        assert_eq!(restarted.player.hand.len(), 5);
        assert!(restarted.player.discard_pile.is_empty());
        assert!(restarted.player.creatures.is_empty());
        assert_eq!(restarted.combat_log.len(), 1);
    }

    #[test]
    fn playing_strike_summons_and_logs() {
        let strike = data::strike().copy_with_id("strike-0");
        let state = with_hand(in_combat(), vec![strike]);

        let next = engine().play_card(&state, "strike-0");
        assert_eq!(next.player.energy, 2);
        assert_eq!(next.player.creatures.len(), 1);
        assert_eq!(next.enemy, state.enemy, "summoning replaces direct damage");
        assert_eq!(
            next.combat_log.last().map(String::as_str),
            Some("Summoned Strike (5 HP, 6 ATK)")
        );
        assert_eq!(next.summon_seq, state.summon_seq + 1);
    }

    #[test]
    fn playing_same_card_twice_gives_unique_creatures() {
        let state = with_hand(
            in_combat(),
            vec![
                data::strike().copy_with_id("strike-0"),
                data::strike().copy_with_id("strike-1"),
            ],
        );
        let engine = engine();
        let once = engine.play_card(&state, "strike-0");
        let twice = engine.play_card(&once, "strike-1");
        let ids: Vec<_> = twice.player.creatures.iter().map(|c| c.id.clone()).collect();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn damage_and_block_lines_follow_fixed_order() {
        let hybrid = Card::new("guarded-slash-0", "Guarded Slash", 1, crate::game::CardType::Attack)
            .with_damage(4)
            .with_block(3);
        let state = with_hand(in_combat(), vec![hybrid]);

        let next = engine().play_card(&state, "guarded-slash-0");
        let new_lines = &next.combat_log[state.combat_log.len()..];
        assert_eq!(new_lines, ["Dealt 4 damage to Cultist", "Gained 3 block"]);
        assert_eq!(next.player.block, 3);
        assert_eq!(next.enemy.as_ref().map(|e| e.hp), Some(46));
    }

    #[test]
    fn insufficient_energy_only_appends_one_line() {
        let mut state = with_hand(in_combat(), vec![data::bash().copy_with_id("bash-0")]);
        state.player.energy = 1;

        let next = engine().play_card(&state, "bash-0");
        assert_eq!(next.combat_log.len(), state.combat_log.len() + 1);
        assert_eq!(next.combat_log.last().map(String::as_str), Some("Not enough energy!"));

        let mut without_log = next.clone();
        without_log.combat_log.pop();
        assert_eq!(without_log, state);
    }

    #[test]
    fn play_card_is_noop_outside_player_turn_or_without_enemy() {
        let engine = engine();
        let state = with_hand(in_combat(), vec![data::defend().copy_with_id("defend-0")]);

        let enemy_turn = state.clone().with_phase(GamePhase::EnemyTurn);
        assert_eq!(engine.play_card(&enemy_turn, "defend-0"), enemy_turn);

        let mut no_enemy = state.clone();
        no_enemy.enemy = None;
        assert_eq!(engine.play_card(&no_enemy, "defend-0"), no_enemy);

        assert_eq!(engine.play_card(&state, "missing"), state);
    }

    #[test]
    fn end_turn_routes_enemy_damage_through_creatures() {
        let mut state = in_combat();
        state.player.creatures = vec![creature("small", 3, 0), creature("big", 10, 0)];
        if let Some(enemy) = state.enemy.as_mut() {
            enemy.intent.value = 7;
        }

        let next = engine().end_turn(&state);
        assert_eq!(next.phase, GamePhase::EnemyTurn);
        assert_eq!(next.turn, state.turn);
        assert_eq!(next.player.hp, state.player.hp);
        assert_eq!(next.player.creatures.len(), 1);
        assert_eq!(next.player.creatures[0].hp, 6);

        let new_lines = &next.combat_log[state.combat_log.len()..];
        assert_eq!(new_lines, ["1 creature(s) died!", "Cultist attacks for 7 damage!"]);
    }

    #[test]
    fn end_turn_creatures_attack_before_enemy() {
        let mut state = in_combat();
        state.player.creatures = vec![creature("a", 20, 6)];

        let next = engine().end_turn(&state);
        let new_lines = &next.combat_log[state.combat_log.len()..];
        assert_eq!(
            new_lines,
            [
                "Your creatures dealt 6 damage to Cultist!",
                "Cultist attacks for 6 damage! All damage absorbed by creatures.",
            ]
        );
        assert_eq!(next.enemy.as_ref().map(|e| e.hp), Some(44));
        assert_eq!(next.player.creatures[0].hp, 14);
    }

    #[test]
    fn end_turn_without_creatures_hits_player_block_first() {
        let mut state = in_combat();
        state.player.block = 2;

        let next = engine().end_turn(&state);
        assert_eq!(next.player.hp, state.player.hp - 4);
        assert_eq!(
            next.combat_log.last().map(String::as_str),
            Some("Cultist attacks for 6 damage! 6 damage dealt to you.")
        );
    }

    #[test]
    fn zero_intent_adds_no_enemy_line() {
        let mut state = in_combat();
        if let Some(enemy) = state.enemy.as_mut() {
            enemy.intent.value = 0;
        }
        let next = engine().end_turn(&state);
        assert_eq!(next.combat_log, state.combat_log);
        assert_eq!(next.phase, GamePhase::EnemyTurn);
    }

    #[test]
    fn end_turn_is_noop_when_illegal() {
        let engine = engine();
        let enemy_turn = in_combat().with_phase(GamePhase::EnemyTurn);
        assert_eq!(engine.end_turn(&enemy_turn), enemy_turn);

        let mut no_enemy = in_combat();
        no_enemy.enemy = None;
        assert_eq!(engine.end_turn(&no_enemy), no_enemy);
    }

    #[test]
    fn resume_refreshes_player_and_increments_turn() {
        let engine = engine();
        let mut state = engine.end_turn(&in_combat());
        state.player.energy = 0;
        state.player.block = 7;

        let next = engine.resume_player_turn(&state);
        assert_eq!(next.phase, GamePhase::PlayerTurn);
        assert_eq!(next.turn, 2);
        assert_eq!(next.player.energy, next.player.max_energy);
        assert_eq!(next.player.block, 0);
        assert_eq!(next.player.hand.len(), state.player.hand.len() + 5);
        assert_eq!(
            next.combat_log.last().map(String::as_str),
            Some("Turn 2 begins. Drew 5 cards.")
        );

        assert_eq!(engine.resume_player_turn(&next), next, "only legal in enemy turn");
    }

    #[test]
    fn resume_with_short_pile_reports_actual_draw() {
        let engine = engine();
        let mut state = engine.end_turn(&in_combat());
        state.player.draw_pile.truncate(2);

        let next = engine.resume_player_turn(&state);
        assert!(next.player.draw_pile.is_empty());
        assert_eq!(
            next.combat_log.last().map(String::as_str),
            Some("Turn 2 begins. Drew 2 cards.")
        );
    }

    #[test]
    fn draw_and_log_work_in_any_phase() {
        let engine = engine();
        let state = engine.end_turn(&in_combat());

        let drawn = engine.draw(&state, 2);
        assert_eq!(drawn.player.hand.len(), state.player.hand.len() + 2);
        assert_eq!(drawn.combat_log, state.combat_log);

        let logged = engine.log(&drawn, "A chill runs down your spine.");
        assert_eq!(
            logged.combat_log.last().map(String::as_str),
            Some("A chill runs down your spine.")
        );
    }

    #[test]
    fn auxiliary_adjustments_respect_missing_enemy() {
        let engine = engine();
        let fresh = engine.new_game(&mut rng());
        assert_eq!(engine.deal_damage(&fresh, Side::Enemy, 5), fresh);

        let hurt = engine.deal_damage(&fresh, Side::Player, 5);
        assert_eq!(hurt.player.hp, fresh.player.hp - 5);

        let state = in_combat();
        let blocked = engine.apply_block(&state, Side::Enemy, 4);
        assert_eq!(blocked.enemy.as_ref().map(|e| e.block), Some(4));

        let weak = CardEffect::new(EffectKind::Weak, 1);
        let debuffed = engine.add_effect(&state, Side::Player, weak);
        assert_eq!(debuffed.player.effects.len(), 1);
        let cleansed = engine.remove_effect(&debuffed, Side::Player, EffectKind::Weak);
        assert!(cleansed.player.effects.is_empty());
    }

    #[test]
    fn direct_calls_match_dispatched_actions() {
        let engine = engine();
        let state = in_combat();

        let drawn = engine.apply(&state, &CombatAction::DrawCards { amount: 2 }, &mut rng());
        assert_eq!(engine.draw(&state, 2), drawn);
        assert_eq!(drawn.player.hand.len(), state.player.hand.len() + 2);
        assert_eq!(drawn.combat_log, state.combat_log, "manual draw is not logged");

        let hit = CombatAction::DealDamage {
            target: Side::Enemy,
            amount: 7,
        };
        assert_eq!(
            engine.apply(&state, &hit, &mut rng()),
            engine.deal_damage(&state, Side::Enemy, 7)
        );

        let noted = CombatAction::AddLog {
            message: "Focus.".into(),
        };
        assert_eq!(
            engine.apply(&state, &noted, &mut rng()),
            engine.log(&state, "Focus.")
        );
    }

    #[test]
    fn resolve_reports_events_and_outcome() {
        let engine = engine();
        let mut state = in_combat();
        if let Some(enemy) = state.enemy.as_mut() {
            enemy.hp = 3;
        }
        state.player.creatures = vec![creature("a", 5, 6)];

        let resolution = engine.resolve(&state, &CombatAction::EndTurn, &mut rng());
        assert_eq!(resolution.outcome, CombatOutcome::Victory);
        assert_eq!(
            resolution.events.first(),
            Some(&CombatEvent::CreaturesStruck {
                amount: 3,
                target: "Cultist".into()
            })
        );
        assert_eq!(combat_outcome(&resolution.state), CombatOutcome::Victory);
    }

    #[test]
    fn apply_dispatches_start_combat_with_injected_rng() {
        let engine = engine();
        let fresh = engine.new_game(&mut rng());
        let action = CombatAction::StartCombat {
            enemy: data::jaw_worm(),
        };

        let first = engine.apply(&fresh, &action, &mut rng());
        let second = engine.apply(&fresh, &action, &mut rng());
        assert_eq!(first, second, "same seed gives the same opening hand");
        assert_eq!(first.combat_log, vec!["Combat started against Jaw Worm!"]);
    }

    #[test]
    fn actions_deserialize_from_tagged_json() {
        let action: CombatAction =
            serde_json::from_str(r#"{ "type": "PLAY_CARD", "card_id": "strike-0" }"#)
                .expect("action should parse");
        assert_eq!(
            action,
            CombatAction::PlayCard {
                card_id: "strike-0".into()
            }
        );
    }
}
