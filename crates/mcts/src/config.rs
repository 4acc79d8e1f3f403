//! UCT configuration parameters.
//!
//! These parameters control the budget, the selection heuristic, the
//! outcome convention and the final decision rule of a search.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use uct_core::Neighborhood;

/// How long a search runs.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Budget {
    /// Run exactly this many iterations.
    Iterations(usize),

    /// Keep starting iterations until this many seconds have elapsed.
    /// The deadline is checked between iterations only, so a search may
    /// overrun it by up to one iteration.
    TimeSeconds(f64),
}

impl Budget {
    /// Wall-clock limit, if this is a time budget.
    pub fn time_limit(&self) -> Option<Duration> {
        match *self {
            Budget::Iterations(_) => None,
            Budget::TimeSeconds(secs) => {
                Some(Duration::try_from_secs_f64(secs.max(0.0)).unwrap_or(Duration::MAX))
            }
        }
    }
}

/// Scale of the value backpropagated after each rollout, from the
/// searching agent's perspective.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeScale {
    /// Win 1, tie 0.5, loss 0.
    #[default]
    ZeroOneHalf,
    /// Win 1, tie 0.5, loss -1.
    Symmetric,
    /// Agent's score minus the opponent's score.
    ScoreDifferential,
}

/// Rule used to pick the move once the budget is exhausted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionRule {
    /// Root child with the most visits.
    #[default]
    MaxVisits,
    /// Root child with the best selection-heuristic score.
    MaxHeuristicScore,
}

/// Member of the UCB1 family used to rank children.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeuristicVariant {
    /// Every child is ranked by the agent's own win rate.
    #[default]
    Vanilla,
    /// On the opponent's turn the win rate is inverted.
    TurnAsymmetric,
    /// Turn-asymmetric, plus a tactical adjustment on the agent's turn.
    HeuristicAdjusted,
}

/// UCT configuration parameters.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct UctConfig {
    /// Exploration constant `C` in
    /// `exploit + C * sqrt(2 * ln(N_parent) / N_child)`.
    pub exploration_constant: f32,

    /// Iteration count or wall-clock deadline.
    pub budget: Budget,

    /// Outcome convention used during backpropagation.
    pub outcome_scale: OutcomeScale,

    /// Final move selection.
    pub decision_rule: DecisionRule,

    /// Child-ranking formula used during selection.
    pub heuristic: HeuristicVariant,

    /// Cells inspected around a move by the adjacency penalty
    /// (heuristic-adjusted variant only).
    pub neighborhood: Neighborhood,

    /// Added on the agent's turn when a move immediately resolves a
    /// scoring unit. Large enough to dominate every other term.
    pub completion_bonus: f32,

    /// Subtracted once per claimed line found around a move's target cell.
    pub adjacency_penalty: f32,
}

impl Default for UctConfig {
    fn default() -> Self {
        Self {
            exploration_constant: 2.0,
            budget: Budget::Iterations(1000),
            outcome_scale: OutcomeScale::ZeroOneHalf,
            decision_rule: DecisionRule::MaxVisits,
            heuristic: HeuristicVariant::Vanilla,
            neighborhood: Neighborhood::Moore,
            completion_bonus: 9001.0,
            adjacency_penalty: 100.0,
        }
    }
}

impl UctConfig {
    /// Plain UCT: fixed iteration count, win/tie/loss outcomes and
    /// most-visited final move.
    pub fn vanilla() -> Self {
        Self::default()
    }

    /// Tactical bot: ten second deadline, score-differential outcomes,
    /// heuristic-adjusted selection and heuristic final move.
    pub fn modified() -> Self {
        Self {
            budget: Budget::TimeSeconds(10.0),
            outcome_scale: OutcomeScale::ScoreDifferential,
            decision_rule: DecisionRule::MaxHeuristicScore,
            heuristic: HeuristicVariant::HeuristicAdjusted,
            ..Default::default()
        }
    }

    /// Create a new config with the specified number of iterations.
    pub fn with_iterations(iterations: usize) -> Self {
        Self {
            budget: Budget::Iterations(iterations),
            ..Default::default()
        }
    }

    /// Create a new config with a wall-clock deadline in seconds.
    pub fn with_time(seconds: f64) -> Self {
        Self {
            budget: Budget::TimeSeconds(seconds),
            ..Default::default()
        }
    }

    /// Replace the budget with a fixed iteration count.
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.budget = Budget::Iterations(iterations);
        self
    }

    /// Replace the budget with a wall-clock deadline.
    pub fn time_seconds(mut self, seconds: f64) -> Self {
        self.budget = Budget::TimeSeconds(seconds);
        self
    }

    /// Replace the heuristic variant.
    pub fn heuristic(mut self, heuristic: HeuristicVariant) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Replace the decision rule.
    pub fn decision_rule(mut self, rule: DecisionRule) -> Self {
        self.decision_rule = rule;
        self
    }

    /// Replace the outcome scale.
    pub fn outcome_scale(mut self, scale: OutcomeScale) -> Self {
        self.outcome_scale = scale;
        self
    }
}
