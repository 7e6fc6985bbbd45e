//! 随从：召唤、回合末攻击，以及替玩家承受敌人伤害。

use super::effects::apply_damage;
use super::state::{Card, Creature, Enemy, Player};

/// 敌人攻击经过随从后的结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbsorbResult {
    pub player: Player,
    /// 穿过所有随从、落到玩家身上的伤害。
    pub to_player: u32,
    pub creatures_killed: usize,
}

/// 卡牌带有完整随从属性时生成随从。`sequence` 由调用方保证递增，用于区分同一张牌的多次召唤。
pub fn summon(card: &Card, sequence: u64) -> Option<Creature> {
    let (hp, attack) = card.creature_stats()?;
    Some(Creature {
        id: format!("{}#{sequence}", card.id),
        name: card.name.clone(),
        hp,
        max_hp: hp,
        attack,
        card_id: card.id.clone(),
    })
}

/// 随从按召唤顺序依次攻击，返回敌人新状态与实际扣除的生命总量。
pub fn creatures_attack(creatures: &[Creature], enemy: &Enemy) -> (Enemy, u32) {
    creatures
        .iter()
        .fold((enemy.clone(), 0), |(current, total), creature| {
            let next = apply_damage(&current, creature.attack);
            let removed = current.hp - next.hp;
            (next, total + removed)
        })
}

/// 伤害从左到右依次由随从吸收，前一个随从耗尽后才轮到下一个，剩余部分再作用于玩家。
pub fn damage_creatures_then_player(player: &Player, amount: u32) -> AbsorbResult {
    let mut remaining = amount;
    let mut creatures_killed = 0;
    let mut survivors = Vec::with_capacity(player.creatures.len());

    for creature in &player.creatures {
        let mut creature = creature.clone();
        if remaining > 0 {
            let absorbed = remaining.min(creature.hp);
            creature.hp -= absorbed;
            remaining -= absorbed;
            if !creature.is_alive() {
                creatures_killed += 1;
            }
        }
        if creature.is_alive() {
            survivors.push(creature);
        }
    }

    let mut next = player.clone();
    next.creatures = survivors;
    if remaining > 0 {
        next = apply_damage(&next, remaining);
    }

    AbsorbResult {
        player: next,
        to_player: remaining,
        creatures_killed,
    }
}
