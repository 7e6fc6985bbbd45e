//! 伤害、格挡与状态效果的基础运算。所有函数都返回新的持有者，不修改输入。

use super::state::{CardEffect, EffectKind, Enemy, Player};

/// 可以承受伤害、获得格挡与状态效果的战斗单位。
pub trait Combatant: Clone {
    fn hp(&self) -> u32;
    fn max_hp(&self) -> u32;
    fn block(&self) -> u32;
    fn effects(&self) -> &[CardEffect];

    fn set_hp(&mut self, hp: u32);
    fn set_block(&mut self, block: u32);
    fn effects_mut(&mut self) -> &mut Vec<CardEffect>;

    fn effect(&self, kind: EffectKind) -> Option<&CardEffect> {
        self.effects().iter().find(|effect| effect.kind == kind)
    }
}

impl Combatant for Player {
    fn hp(&self) -> u32 {
        self.hp
    }

    fn max_hp(&self) -> u32 {
        self.max_hp
    }

    fn block(&self) -> u32 {
        self.block
    }

    fn effects(&self) -> &[CardEffect] {
        &self.effects
    }

    fn set_hp(&mut self, hp: u32) {
        self.hp = hp.min(self.max_hp);
    }

    fn set_block(&mut self, block: u32) {
        self.block = block;
    }

    fn effects_mut(&mut self) -> &mut Vec<CardEffect> {
        &mut self.effects
    }
}

impl Combatant for Enemy {
    fn hp(&self) -> u32 {
        self.hp
    }

    fn max_hp(&self) -> u32 {
        self.max_hp
    }

    fn block(&self) -> u32 {
        self.block
    }

    fn effects(&self) -> &[CardEffect] {
        &self.effects
    }

    fn set_hp(&mut self, hp: u32) {
        self.hp = hp.min(self.max_hp);
    }

    fn set_block(&mut self, block: u32) {
        self.block = block;
    }

    fn effects_mut(&mut self) -> &mut Vec<CardEffect> {
        &mut self.effects
    }
}

/// 格挡先吸收伤害，溢出部分扣除生命。格挡按原始伤害量消耗。
pub fn apply_damage<T: Combatant>(holder: &T, amount: u32) -> T {
    let mut next = holder.clone();
    let actual = amount.saturating_sub(holder.block());
    next.set_hp(holder.hp().saturating_sub(actual));
    next.set_block(holder.block().saturating_sub(amount));
    next
}

pub fn apply_block<T: Combatant>(holder: &T, amount: u32) -> T {
    let mut next = holder.clone();
    next.set_block(holder.block().saturating_add(amount));
    next
}

/// 同类效果只累加数值，持续时间保持原记录。
pub fn add_effect<T: Combatant>(holder: &T, effect: &CardEffect) -> T {
    let mut next = holder.clone();
    let effects = next.effects_mut();
    match effects.iter().position(|existing| existing.kind == effect.kind) {
        Some(idx) => effects[idx].value = effects[idx].value.saturating_add(effect.value),
        None => effects.push(effect.clone()),
    }
    next
}

pub fn remove_effect<T: Combatant>(holder: &T, kind: EffectKind) -> T {
    let mut next = holder.clone();
    next.effects_mut().retain(|effect| effect.kind != kind);
    next
}

/// 按卡牌顺序依次叠加全部效果。
pub fn apply_effects<T: Combatant>(holder: &T, effects: &[CardEffect]) -> T {
    effects
        .iter()
        .fold(holder.clone(), |acc, effect| add_effect(&acc, effect))
}
