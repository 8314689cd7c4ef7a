//! Reputation - 担当者の評判スコアと等級
//!
//! スコアはタスクの完了・評価で増え、キャンセルで減ります（0 未満にはならない）。
//! 等級はスコアの区間から一意に決まります。
//!
//! | 等級        | スコア       |
//! |-------------|--------------|
//! | Newcomer    | 0 - 100      |
//! | Apprentice  | 101 - 300    |
//! | Skilled     | 301 - 600    |
//! | Expert      | 601 - 1000   |
//! | Master      | 1001 - 1500  |
//! | Legendary   | 1501 -       |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::task::Difficulty;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum ReputationLevel {
    #[default]
    Newcomer,
    Apprentice,
    Skilled,
    Expert,
    Master,
    Legendary,
}

impl ReputationLevel {
    pub const ALL: [ReputationLevel; 6] = [
        ReputationLevel::Newcomer,
        ReputationLevel::Apprentice,
        ReputationLevel::Skilled,
        ReputationLevel::Expert,
        ReputationLevel::Master,
        ReputationLevel::Legendary,
    ];

    pub const fn from_score(score: u32) -> Self {
        match score {
            0..=100 => ReputationLevel::Newcomer,
            101..=300 => ReputationLevel::Apprentice,
            301..=600 => ReputationLevel::Skilled,
            601..=1000 => ReputationLevel::Expert,
            1001..=1500 => ReputationLevel::Master,
            _ => ReputationLevel::Legendary,
        }
    }

    pub const fn min_score(self) -> u32 {
        match self {
            ReputationLevel::Newcomer => 0,
            ReputationLevel::Apprentice => 101,
            ReputationLevel::Skilled => 301,
            ReputationLevel::Expert => 601,
            ReputationLevel::Master => 1001,
            ReputationLevel::Legendary => 1501,
        }
    }

    /// Legendary は上限なし
    pub const fn max_score(self) -> Option<u32> {
        match self.next() {
            Some(next) => Some(next.min_score() - 1),
            None => None,
        }
    }

    pub const fn next(self) -> Option<Self> {
        match self {
            ReputationLevel::Newcomer => Some(ReputationLevel::Apprentice),
            ReputationLevel::Apprentice => Some(ReputationLevel::Skilled),
            ReputationLevel::Skilled => Some(ReputationLevel::Expert),
            ReputationLevel::Expert => Some(ReputationLevel::Master),
            ReputationLevel::Master => Some(ReputationLevel::Legendary),
            ReputationLevel::Legendary => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ReputationLevel::Newcomer => "Newcomer",
            ReputationLevel::Apprentice => "Apprentice",
            ReputationLevel::Skilled => "Skilled",
            ReputationLevel::Expert => "Expert",
            ReputationLevel::Master => "Master",
            ReputationLevel::Legendary => "Legendary",
        }
    }
}

impl fmt::Display for ReputationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ReputationRules はスコア計算の係数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReputationRules {
    pub base_score: u32,
    /// 難易度 1 あたりの加点
    pub difficulty_bonus: u32,
    pub cancellation_penalty: u32,
}

impl Default for ReputationRules {
    fn default() -> Self {
        Self {
            base_score: 10,
            difficulty_bonus: 2,
            cancellation_penalty: 5,
        }
    }
}

impl ReputationRules {
    /// 評価 1〜5 に対する base_score の倍率（%）。範囲外は 0。
    pub const fn rating_multiplier(rating: u8) -> u32 {
        match rating {
            1 => 50,
            2 => 75,
            3 => 100,
            4 => 125,
            5 => 150,
            _ => 0,
        }
    }

    /// 完了時の加点: base_score + difficulty * difficulty_bonus
    pub fn completion_points(&self, difficulty: Difficulty) -> u32 {
        self.base_score
            .saturating_add(u32::from(difficulty.get()).saturating_mul(self.difficulty_bonus))
    }

    /// 評価時の加点: base_score * 倍率 / 100
    pub fn rating_points(&self, rating: u8) -> u32 {
        self.base_score.saturating_mul(Self::rating_multiplier(rating)) / 100
    }
}

/// スコア更新の前後
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreChange {
    pub old_score: u32,
    pub new_score: u32,
    pub old_level: ReputationLevel,
    pub new_level: ReputationLevel,
}

impl ScoreChange {
    pub fn leveled_up(&self) -> bool {
        self.new_level > self.old_level
    }
}

/// UserReputation はアカウントごとの評判
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserReputation {
    pub total_score: u32,
    pub level: ReputationLevel,
    pub completed_tasks: u32,
    pub cancelled_tasks: u32,
    pub total_ratings: u32,
    pub rating_sum: u32,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl UserReputation {
    /// 評価がなければ 0.0
    pub fn average_rating(&self) -> f64 {
        if self.total_ratings == 0 {
            0.0
        } else {
            f64::from(self.rating_sum) / f64::from(self.total_ratings)
        }
    }

    /// 完了 / (完了 + キャンセル)、パーセント
    pub fn completion_rate(&self) -> f64 {
        let finished = u64::from(self.completed_tasks) + u64::from(self.cancelled_tasks);
        if finished == 0 {
            0.0
        } else {
            self.completed_tasks as f64 * 100.0 / finished as f64
        }
    }

    /// 次の等級までの残りスコア（Legendary は None）
    pub fn points_to_next_level(&self) -> Option<u32> {
        self.level
            .next()
            .map(|next| next.min_score().saturating_sub(self.total_score))
    }

    /// 現在の等級内での進み具合（パーセント）
    pub fn level_progress(&self) -> f64 {
        let Some(max) = self.level.max_score() else {
            return 100.0;
        };
        let min = self.level.min_score();
        let progress = self.total_score.saturating_sub(min);
        f64::from(progress) * 100.0 / f64::from(max - min)
    }

    pub fn record_completion(
        &mut self,
        rules: &ReputationRules,
        difficulty: Difficulty,
        now: DateTime<Utc>,
    ) -> ScoreChange {
        self.completed_tasks = self.completed_tasks.saturating_add(1);
        let points = rules.completion_points(difficulty);
        self.rescore(self.total_score.saturating_add(points), now)
    }

    pub fn record_rating(
        &mut self,
        rules: &ReputationRules,
        rating: u8,
        now: DateTime<Utc>,
    ) -> ScoreChange {
        self.total_ratings = self.total_ratings.saturating_add(1);
        self.rating_sum = self.rating_sum.saturating_add(u32::from(rating));
        let points = rules.rating_points(rating);
        self.rescore(self.total_score.saturating_add(points), now)
    }

    pub fn record_cancellation(&mut self, rules: &ReputationRules, now: DateTime<Utc>) -> ScoreChange {
        self.cancelled_tasks = self.cancelled_tasks.saturating_add(1);
        self.rescore(
            self.total_score.saturating_sub(rules.cancellation_penalty),
            now,
        )
    }

    fn rescore(&mut self, score: u32, now: DateTime<Utc>) -> ScoreChange {
        let change = ScoreChange {
            old_score: self.total_score,
            new_score: score,
            old_level: self.level,
            new_level: ReputationLevel::from_score(score),
        };
        self.total_score = score;
        self.level = change.new_level;
        self.last_updated = Some(now);
        change
    }
}
