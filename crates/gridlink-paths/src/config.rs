use crate::heuristic::Heuristic;

/// Grid-wide search settings, shared by every query on one [`Grid`](crate::Grid).
///
/// `max_search_cost` and `max_steps` are the fallbacks used when a query's
/// [`PathOptions`](crate::PathOptions) leaves its own caps at 0.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct FinderConfig {
    pub heuristic: Heuristic,
    /// Allow diagonal steps on box grids.
    pub diagonals: bool,
    /// Multiplier applied to a cell's cost when it is entered diagonally.
    pub diagonal_cost: f32,
    pub max_search_cost: f32,
    pub max_steps: usize,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            heuristic: Heuristic::Euclidean,
            diagonals: false,
            diagonal_cost: std::f32::consts::SQRT_2,
            max_search_cost: 200_000.0,
            max_steps: 2_000,
        }
    }
}

impl FinderConfig {
    /// Set the heuristic (builder).
    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Enable or disable diagonal steps (builder).
    pub fn with_diagonals(mut self, diagonals: bool) -> Self {
        self.diagonals = diagonals;
        self
    }

    /// Set the diagonal cost multiplier (builder).
    pub fn with_diagonal_cost(mut self, cost: f32) -> Self {
        self.diagonal_cost = cost;
        self
    }

    /// Set the default caps (builder).
    pub fn with_limits(mut self, max_search_cost: f32, max_steps: usize) -> Self {
        self.max_search_cost = max_search_cost;
        self.max_steps = max_steps;
        self
    }
}
