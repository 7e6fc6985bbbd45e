use std::fmt;

use serde::{Deserialize, Serialize};

use super::config::CombatConfig;

/// 卡牌实例标识，每张复制牌唯一。
pub type CardId = String;
/// 召唤物标识。
pub type CreatureId = String;
/// 敌人模板标识。
pub type EnemyId = String;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Attack,
    Skill,
    Power,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
}

impl Default for Rarity {
    fn default() -> Self {
        Rarity::Common
    }
}

/// 状态效果种类。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EffectKind {
    Vulnerable,
    Weak,
    Strength,
    Dexterity,
}

/// 附着在战斗单位上的状态效果，同类效果叠加数值。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardEffect {
    #[serde(rename = "type")]
    pub kind: EffectKind,
    pub value: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

impl CardEffect {
    pub fn new(kind: EffectKind, value: u32) -> Self {
        Self {
            kind,
            value,
            duration: None,
        }
    }

    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = Some(duration);
        self
    }
}

/// 卡牌模板。打出后不会被修改，只在各个牌区之间移动。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Card {
    pub id: CardId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub cost: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<u32>,
    #[serde(rename = "type")]
    pub card_type: CardType,
    #[serde(default)]
    pub rarity: Rarity,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<CardEffect>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creature_hp: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creature_attack: Option<u32>,
}

impl Card {
    pub fn new(
        id: impl Into<CardId>,
        name: impl Into<String>,
        cost: u32,
        card_type: CardType,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            cost,
            damage: None,
            block: None,
            card_type,
            rarity: Rarity::default(),
            effects: Vec::new(),
            creature_hp: None,
            creature_attack: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_damage(mut self, damage: u32) -> Self {
        self.damage = Some(damage);
        self
    }

    pub fn with_block(mut self, block: u32) -> Self {
        self.block = Some(block);
        self
    }

    pub fn with_creature(mut self, hp: u32, attack: u32) -> Self {
        self.creature_hp = Some(hp);
        self.creature_attack = Some(attack);
        self
    }

    pub fn with_effect(mut self, effect: CardEffect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    /// 生命值与攻击力都存在且非零时返回召唤物属性。
    pub fn creature_stats(&self) -> Option<(u32, u32)> {
        match (self.creature_hp, self.creature_attack) {
            (Some(hp), Some(attack)) if hp > 0 && attack > 0 => Some((hp, attack)),
            _ => None,
        }
    }

    pub fn summons_creature(&self) -> bool {
        self.card_type == CardType::Attack && self.creature_stats().is_some()
    }

    pub fn copy_with_id(&self, id: impl Into<CardId>) -> Self {
        Self {
            id: id.into(),
            ..self.clone()
        }
    }
}

/// 玩家召唤出的随从。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Creature {
    pub id: CreatureId,
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    pub attack: u32,
    pub card_id: CardId,
}

impl Creature {
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

/// 玩家状态，包括能量、格挡、四个牌区与随从。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub hp: u32,
    pub max_hp: u32,
    pub energy: u32,
    pub max_energy: u32,
    #[serde(default)]
    pub block: u32,
    #[serde(default)]
    pub deck: Vec<Card>,
    #[serde(default)]
    pub hand: Vec<Card>,
    #[serde(default)]
    pub draw_pile: Vec<Card>,
    #[serde(default)]
    pub discard_pile: Vec<Card>,
    #[serde(default)]
    pub effects: Vec<CardEffect>,
    #[serde(default)]
    pub creatures: Vec<Creature>,
}

impl Player {
    pub fn new(max_hp: u32, max_energy: u32, deck: Vec<Card>) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            energy: max_energy,
            max_energy,
            block: 0,
            deck,
            hand: Vec::new(),
            draw_pile: Vec::new(),
            discard_pile: Vec::new(),
            effects: Vec::new(),
            creatures: Vec::new(),
        }
    }

    pub fn from_config(config: &CombatConfig, deck: Vec<Card>) -> Self {
        Self::new(config.player_max_hp, config.max_energy, deck)
    }

    pub fn find_card_in_hand_index(&self, card_id: &str) -> Option<usize> {
        self.hand.iter().position(|card| card.id == card_id)
    }

    pub fn find_card_in_hand(&self, card_id: &str) -> Option<&Card> {
        self.hand.iter().find(|card| card.id == card_id)
    }

    pub fn remove_card_from_hand(&mut self, card_id: &str) -> Option<Card> {
        let idx = self.find_card_in_hand_index(card_id)?;
        Some(self.hand.remove(idx))
    }

    /// 四个牌区的总张数。
    pub fn card_count(&self) -> usize {
        self.deck.len() + self.hand.len() + self.draw_pile.len() + self.discard_pile.len()
    }

    pub fn spend_energy(&mut self, amount: u32) {
        self.energy = self.energy.saturating_sub(amount);
    }

    pub fn refill_energy(&mut self) {
        self.energy = self.max_energy;
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IntentType {
    Attack,
    Block,
    Buff,
    Debuff,
}

/// 敌人预先设定的下一步行动。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnemyIntent {
    #[serde(rename = "type")]
    pub intent_type: IntentType,
    pub value: u32,
    #[serde(default)]
    pub description: String,
}

impl EnemyIntent {
    pub fn attack(value: u32) -> Self {
        Self {
            intent_type: IntentType::Attack,
            value,
            description: format!("Attacks for {value} damage"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Enemy {
    pub id: EnemyId,
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    pub intent: EnemyIntent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<u32>,
    #[serde(default)]
    pub block: u32,
    #[serde(default)]
    pub effects: Vec<CardEffect>,
}

impl Enemy {
    pub fn new(
        id: impl Into<EnemyId>,
        name: impl Into<String>,
        max_hp: u32,
        intent: EnemyIntent,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            hp: max_hp,
            max_hp,
            intent,
            damage: None,
            block: 0,
            effects: Vec::new(),
        }
    }

    pub fn with_damage(mut self, damage: u32) -> Self {
        self.damage = Some(damage);
        self
    }

    /// 以模板为基础生成满血、无格挡、无状态的敌人。
    pub fn fresh(&self) -> Self {
        Self {
            hp: self.max_hp,
            block: 0,
            effects: Vec::new(),
            ..self.clone()
        }
    }
}

/// 战斗阶段。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GamePhase {
    PlayerTurn,
    EnemyTurn,
    CombatEnd,
}

impl Default for GamePhase {
    fn default() -> Self {
        Self::PlayerTurn
    }
}

/// 由状态推导出的战斗结果。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CombatOutcome {
    Ongoing,
    Victory,
    Defeat,
}

impl CombatOutcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, CombatOutcome::Ongoing)
    }
}

/// 战斗事件，`Display` 输出即战斗日志文本。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum CombatEvent {
    CombatStarted {
        enemy: String,
    },
    CreatureSummoned {
        name: String,
        hp: u32,
        attack: u32,
    },
    DamageDealt {
        amount: u32,
        target: String,
    },
    BlockGained {
        amount: u32,
    },
    NotEnoughEnergy,
    CreaturesStruck {
        amount: u32,
        target: String,
    },
    CreaturesDied {
        count: usize,
    },
    EnemyAttacked {
        enemy: String,
        amount: u32,
        to_player: u32,
        creatures_killed: usize,
    },
    TurnBegan {
        turn: u32,
        drawn: usize,
    },
    Message {
        text: String,
    },
}

impl fmt::Display for CombatEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombatEvent::CombatStarted { enemy } => write!(f, "Combat started against {enemy}!"),
            CombatEvent::CreatureSummoned { name, hp, attack } => {
                write!(f, "Summoned {name} ({hp} HP, {attack} ATK)")
            }
            CombatEvent::DamageDealt { amount, target } => {
                write!(f, "Dealt {amount} damage to {target}")
            }
            CombatEvent::BlockGained { amount } => write!(f, "Gained {amount} block"),
            CombatEvent::NotEnoughEnergy => write!(f, "Not enough energy!"),
            CombatEvent::CreaturesStruck { amount, target } => {
                write!(f, "Your creatures dealt {amount} damage to {target}!")
            }
            CombatEvent::CreaturesDied { count } => write!(f, "{count} creature(s) died!"),
            CombatEvent::EnemyAttacked {
                enemy,
                amount,
                to_player,
                creatures_killed,
            } => {
                if *to_player > 0 {
                    write!(
                        f,
                        "{enemy} attacks for {amount} damage! {to_player} damage dealt to you."
                    )
                } else if *creatures_killed == 0 {
                    write!(
                        f,
                        "{enemy} attacks for {amount} damage! All damage absorbed by creatures."
                    )
                } else {
                    write!(f, "{enemy} attacks for {amount} damage!")
                }
            }
            CombatEvent::TurnBegan { turn, drawn } => {
                write!(f, "Turn {turn} begins. Drew {drawn} cards.")
            }
            CombatEvent::Message { text } => f.write_str(text),
        }
    }
}

/// 整场战斗的不可变快照。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameState {
    pub player: Player,
    #[serde(default)]
    pub enemy: Option<Enemy>,
    pub turn: u32,
    #[serde(default)]
    pub phase: GamePhase,
    #[serde(default)]
    pub combat_log: Vec<String>,
    #[serde(default)]
    pub summon_seq: u64,
}

impl GameState {
    pub fn new(player: Player) -> Self {
        Self {
            player,
            enemy: None,
            turn: 1,
            phase: GamePhase::default(),
            combat_log: Vec::new(),
            summon_seq: 0,
        }
    }

    pub fn with_phase(mut self, phase: GamePhase) -> Self {
        self.phase = phase;
        self
    }

    pub fn with_enemy(mut self, enemy: Enemy) -> Self {
        self.enemy = Some(enemy);
        self
    }

    /// 敌人生命归零为胜利，玩家生命归零为失败。
    pub fn outcome(&self) -> CombatOutcome {
        match &self.enemy {
            None => CombatOutcome::Ongoing,
            Some(enemy) if enemy.hp == 0 => CombatOutcome::Victory,
            Some(_) if self.player.hp == 0 => CombatOutcome::Defeat,
            Some(_) => CombatOutcome::Ongoing,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.outcome().is_terminal()
    }
}
