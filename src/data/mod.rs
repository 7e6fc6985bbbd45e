//! 静态数据：初始卡牌与基础敌人模板。

use once_cell::sync::Lazy;

use crate::game::{Card, CardEffect, CardType, EffectKind, Enemy, EnemyIntent};

static STARTER_CARDS: Lazy<Vec<Card>> = Lazy::new(|| vec![strike(), defend(), bash()]);

static BASIC_ENEMIES: Lazy<Vec<Enemy>> = Lazy::new(|| vec![cultist(), jaw_worm()]);

pub fn strike() -> Card {
    Card::new("strike", "Strike", 1, CardType::Attack)
        .with_damage(6)
        .with_creature(5, 6)
        .with_description("Summon a creature with 5 HP that attacks for 6 damage each turn.")
}

pub fn defend() -> Card {
    Card::new("defend", "Defend", 1, CardType::Skill)
        .with_block(5)
        .with_description("Gain 5 block.")
}

pub fn bash() -> Card {
    Card::new("bash", "Bash", 2, CardType::Attack)
        .with_damage(8)
        .with_creature(8, 8)
        .with_effect(CardEffect::new(EffectKind::Vulnerable, 2).with_duration(2))
        .with_description(
            "Summon a creature with 8 HP that attacks for 8 damage each turn. Apply 2 vulnerable.",
        )
}

pub fn cultist() -> Enemy {
    Enemy::new("cultist", "Cultist", 50, EnemyIntent::attack(6)).with_damage(6)
}

pub fn jaw_worm() -> Enemy {
    Enemy::new("jaw-worm", "Jaw Worm", 40, EnemyIntent::attack(11)).with_damage(11)
}

pub fn starter_cards() -> &'static [Card] {
    &STARTER_CARDS
}

pub fn basic_enemies() -> &'static [Enemy] {
    &BASIC_ENEMIES
}

pub fn card_by_id(id: &str) -> Option<&'static Card> {
    STARTER_CARDS.iter().find(|card| card.id == id)
}

pub fn enemy_by_id(id: &str) -> Option<&'static Enemy> {
    BASIC_ENEMIES.iter().find(|enemy| enemy.id == id)
}

/// 生成满血、无格挡、无状态的敌人。
pub fn create_enemy(template: &Enemy) -> Enemy {
    template.fresh()
}
