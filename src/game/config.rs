use serde::{Deserialize, Serialize};

const DEFAULT_OPENING_HAND: usize = 5;
const DEFAULT_DRAW_PER_TURN: usize = 5;
const DEFAULT_PLAYER_MAX_HP: u32 = 80;
const DEFAULT_MAX_ENERGY: u32 = 3;
const DEFAULT_RESUME_DELAY_MS: u32 = 1000;

/// 战斗参数。缺省字段使用默认值，便于前端只传入需要覆盖的部分。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CombatConfig {
    pub opening_hand: usize,
    pub draw_per_turn: usize,
    pub player_max_hp: u32,
    pub max_energy: u32,
    /// 结束回合到自动开始下一回合之间的延迟。
    pub resume_delay_ms: u32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            opening_hand: DEFAULT_OPENING_HAND,
            draw_per_turn: DEFAULT_DRAW_PER_TURN,
            player_max_hp: DEFAULT_PLAYER_MAX_HP,
            max_energy: DEFAULT_MAX_ENERGY,
            resume_delay_ms: DEFAULT_RESUME_DELAY_MS,
        }
    }
}
