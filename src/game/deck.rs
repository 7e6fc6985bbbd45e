//! 牌库工具：洗牌、抽牌与构建牌组。

use rand::seq::SliceRandom;
use rand::Rng;

use super::state::{Card, Player};
use crate::data;

/// 返回输入的一个均匀随机排列，不修改输入。
pub fn shuffle<R: Rng + ?Sized>(deck: &[Card], rng: &mut R) -> Vec<Card> {
    let mut shuffled = deck.to_vec();
    shuffled.shuffle(rng);
    shuffled
}

/// 从抽牌堆末尾依次取牌放入手牌，抽牌堆不足时提前停止。
pub fn draw(player: &Player, count: usize) -> (Player, Vec<Card>) {
    let mut next = player.clone();
    let mut drawn = Vec::with_capacity(count.min(next.draw_pile.len()));
    for _ in 0..count {
        let Some(card) = next.draw_pile.pop() else {
            break;
        };
        drawn.push(card.clone());
        next.hand.push(card);
    }
    (next, drawn)
}

/// 把外部卡牌集合展开为有序牌组，每张复制牌获得 `{模板id}-{序号}` 形式的唯一标识。
pub fn build_deck(collection: &[(Card, usize)]) -> Vec<Card> {
    collection
        .iter()
        .flat_map(|(template, copies)| {
            (0..*copies).map(move |index| template.copy_with_id(format!("{}-{index}", template.id)))
        })
        .collect()
}

/// 5 张打击、4 张防御与 1 张重击，洗好后返回。
pub fn starter_deck<R: Rng + ?Sized>(rng: &mut R) -> Vec<Card> {
    let collection = [
        (data::strike(), 5),
        (data::defend(), 4),
        (data::bash(), 1),
    ];
    shuffle(&build_deck(&collection), rng)
}

/// 收回所有牌区的牌，洗成新的抽牌堆，清空手牌与弃牌堆。
pub fn gather_into_draw_pile<R: Rng + ?Sized>(player: &Player, rng: &mut R) -> Player {
    let mut next = player.clone();
    let mut all = std::mem::take(&mut next.deck);
    all.append(&mut next.draw_pile);
    all.append(&mut next.hand);
    all.append(&mut next.discard_pile);
    next.draw_pile = shuffle(&all, rng);
    next
}
