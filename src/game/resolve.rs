use super::creatures::summon;
use super::effects::{apply_damage, apply_effects, Combatant};
use super::rules::RuleError;
use super::state::{Card, Creature, Player};

/// 单张卡牌结算后的结果，附带用于日志的可选信息。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardPlay<T> {
    pub player: Player,
    pub target: T,
    pub damage_dealt: Option<u32>,
    pub block_gained: Option<u32>,
    pub creature_summoned: Option<Creature>,
}

pub fn can_play_card(card: &Card, player: &Player) -> bool {
    player.energy >= card.cost
}

/// 结算一张卡牌。能量不足时直接返回错误，不产生任何副作用。
///
/// 带随从属性的攻击牌只召唤随从，不对目标造成直接伤害。格挡总是加给出牌者。
pub fn play_card<T: Combatant>(
    card: &Card,
    player: &Player,
    target: &T,
    sequence: u64,
) -> Result<CardPlay<T>, RuleError> {
    if !can_play_card(card, player) {
        return Err(RuleError::InsufficientEnergy {
            required: card.cost,
            available: player.energy,
        });
    }

    let mut next_player = player.clone();
    next_player.spend_energy(card.cost);
    if let Some(idx) = next_player.find_card_in_hand_index(&card.id) {
        next_player.hand.remove(idx);
    }
    next_player.discard_pile.push(card.clone());

    let mut next_target = target.clone();
    let mut damage_dealt = None;
    let mut creature_summoned = None;

    if card.summons_creature() {
        if let Some(creature) = summon(card, sequence) {
            next_player.creatures.push(creature.clone());
            creature_summoned = Some(creature);
        }
    } else if let Some(damage) = card.damage.filter(|damage| *damage > 0) {
        let hit = apply_damage(&next_target, damage);
        damage_dealt = Some(next_target.hp() - hit.hp());
        next_target = hit;
    }

    let block_gained = card.block.filter(|block| *block > 0);
    if let Some(block) = block_gained {
        next_player.block = next_player.block.saturating_add(block);
    }

    let next_target = apply_effects(&next_target, &card.effects);

    Ok(CardPlay {
        player: next_player,
        target: next_target,
        damage_dealt,
        block_gained,
        creature_summoned,
    })
}
