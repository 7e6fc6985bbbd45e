//! 战斗核心逻辑（状态、结算与回合状态机）。

pub mod config;
pub mod creatures;
pub mod deck;
pub mod effects;
pub mod resolve;
pub mod rules;
pub mod session;
pub mod state;

pub use config::CombatConfig;
pub use creatures::{creatures_attack, damage_creatures_then_player, summon, AbsorbResult};
pub use deck::{build_deck, draw, shuffle, starter_deck};
pub use effects::{add_effect, apply_block, apply_damage, remove_effect, Combatant};
pub use resolve::{can_play_card, CardPlay};
pub use rules::{combat_outcome, CombatAction, RuleEngine, RuleError, RuleResolution, Side};
pub use session::{CombatSession, ResumeTicket};
pub use state::{
    Card,
    CardEffect,
    CardId,
    CardType,
    CombatEvent,
    CombatOutcome,
    Creature,
    CreatureId,
    EffectKind,
    Enemy,
    EnemyId,
    EnemyIntent,
    GamePhase,
    GameState,
    IntentType,
    Player,
    Rarity,
};
