//! Score types: the paired opportunity/challenge magnitudes every report carries.
//!
//! Leaf-tier invariant: `net = clamp(opportunities - challenges + 50, 0, 100)`.
//! Aggregate tiers relax both the range and the derivation (see the engine's
//! aggregator); the types here stay agnostic and store whatever the producing
//! tier computed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Neutral midpoint around which a leaf net score balances.
pub const NEUTRAL_MIDPOINT: f32 = 50.0;

/// The five life domains scored independently for every time unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Career,
    Wealth,
    Love,
    Health,
    Study,
}

impl Category {
    /// Returns all category variants as a fixed-size array.
    pub fn all() -> [Category; 5] {
        [
            Self::Career,
            Self::Wealth,
            Self::Love,
            Self::Health,
            Self::Study,
        ]
    }

    /// Stable index used by fixed per-category tables.
    pub fn index(&self) -> usize {
        match self {
            Self::Career => 0,
            Self::Wealth => 1,
            Self::Love => 2,
            Self::Health => 3,
            Self::Study => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Career => "career",
            Self::Wealth => "wealth",
            Self::Love => "love",
            Self::Health => "health",
            Self::Study => "study",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Leaf-tier net balance: `clamp(opportunities - challenges + 50, 0, 100)`.
pub fn leaf_net(opportunities: f32, challenges: f32) -> f32 {
    (opportunities - challenges + NEUTRAL_MIDPOINT).clamp(0.0, 100.0)
}

/// Paired favorable/unfavorable magnitudes with a derived net balance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    /// Favorable influence magnitude.
    pub opportunities: f32,
    /// Unfavorable influence magnitude.
    pub challenges: f32,
    /// Summary balance of the two sides.
    pub net: f32,
}

impl CategoryScore {
    /// Build a leaf-tier score: both sides clamped to [0, 100], net derived.
    pub fn from_raw(opportunities: f32, challenges: f32) -> Self {
        let opportunities = opportunities.clamp(0.0, 100.0);
        let challenges = challenges.clamp(0.0, 100.0);
        Self {
            opportunities,
            challenges,
            net: leaf_net(opportunities, challenges),
        }
    }

    /// Assemble a score whose parts were computed elsewhere (aggregate tiers
    /// derive net under different rules and may exceed the leaf range).
    pub fn from_parts(opportunities: f32, challenges: f32, net: f32) -> Self {
        Self {
            opportunities,
            challenges,
            net,
        }
    }

    /// Neutral starting point: 50 opportunities, 50 challenges, net 50.
    pub fn neutral() -> Self {
        Self::from_raw(NEUTRAL_MIDPOINT, NEUTRAL_MIDPOINT)
    }
}

/// Fixed map of `overall` plus the five categories.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FortuneScores {
    pub overall: CategoryScore,
    pub career: CategoryScore,
    pub wealth: CategoryScore,
    pub love: CategoryScore,
    pub health: CategoryScore,
    pub study: CategoryScore,
}

impl FortuneScores {
    /// Build from per-category scores, deriving `overall` as the leaf-rule
    /// average: mean opportunities and challenges across the five
    /// categories, net re-derived from those means (not averaged directly).
    pub fn from_categories(mut score_for: impl FnMut(Category) -> CategoryScore) -> Self {
        let career = score_for(Category::Career);
        let wealth = score_for(Category::Wealth);
        let love = score_for(Category::Love);
        let health = score_for(Category::Health);
        let study = score_for(Category::Study);
        let categories = [career, wealth, love, health, study];
        let opp = categories.iter().map(|s| s.opportunities).sum::<f32>() / 5.0;
        let chal = categories.iter().map(|s| s.challenges).sum::<f32>() / 5.0;
        Self {
            overall: CategoryScore::from_raw(opp, chal),
            career,
            wealth,
            love,
            health,
            study,
        }
    }

    /// Score for a single category.
    pub fn get(&self, category: Category) -> &CategoryScore {
        match category {
            Category::Career => &self.career,
            Category::Wealth => &self.wealth,
            Category::Love => &self.love,
            Category::Health => &self.health,
            Category::Study => &self.study,
        }
    }

    /// Iterate the five categories in fixed order.
    pub fn categories(&self) -> impl Iterator<Item = (Category, &CategoryScore)> {
        Category::all().into_iter().map(move |c| (c, self.get(c)))
    }
}
