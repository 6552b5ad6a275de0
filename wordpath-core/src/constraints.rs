//! Caller-supplied limits that decide whether a word pair makes a fair puzzle.

use crate::{Result, error::EngineError};

/// Default inclusive lower bound on optimal-path moves.
pub const DEFAULT_MIN_PATH_MOVES: usize = 4;
/// Default inclusive upper bound on optimal-path moves.
pub const DEFAULT_MAX_PATH_MOVES: usize = 5;
/// Default minimum out-degree of both puzzle words.
pub const DEFAULT_MIN_NODE_DEGREE: usize = 3;
/// Default minimum squared layout distance (20 units apart).
pub const DEFAULT_MIN_LAYOUT_DISTANCE_SQUARED: f64 = 400.0;
/// Default number of candidate pairs drawn before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 200;

/// Acceptance limits for puzzle pairs.
///
/// # Examples
/// ```
/// use wordpath_core::PuzzleConstraints;
///
/// let constraints = PuzzleConstraints::new()
///     .with_path_moves(2, 3)
///     .with_min_node_degree(1);
/// assert_eq!(constraints.min_path_moves(), 2);
/// assert_eq!(constraints.max_attempts(), 200);
/// constraints.validate()?;
/// # Ok::<(), wordpath_core::EngineError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PuzzleConstraints {
    min_path_moves: usize,
    max_path_moves: usize,
    min_node_degree: usize,
    min_layout_distance_squared: f64,
    max_attempts: usize,
}

impl Default for PuzzleConstraints {
    fn default() -> Self {
        Self {
            min_path_moves: DEFAULT_MIN_PATH_MOVES,
            max_path_moves: DEFAULT_MAX_PATH_MOVES,
            min_node_degree: DEFAULT_MIN_NODE_DEGREE,
            min_layout_distance_squared: DEFAULT_MIN_LAYOUT_DISTANCE_SQUARED,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl PuzzleConstraints {
    /// Creates constraints populated with the defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the inclusive range of optimal-path moves.
    #[must_use]
    pub const fn with_path_moves(mut self, min: usize, max: usize) -> Self {
        self.min_path_moves = min;
        self.max_path_moves = max;
        self
    }

    /// Sets the minimum out-degree required of both words.
    #[must_use]
    pub const fn with_min_node_degree(mut self, degree: usize) -> Self {
        self.min_node_degree = degree;
        self
    }

    /// Sets the minimum squared layout distance between the two words.
    #[must_use]
    pub const fn with_min_layout_distance_squared(mut self, distance_squared: f64) -> Self {
        self.min_layout_distance_squared = distance_squared;
        self
    }

    /// Sets how many candidates the generator may draw.
    #[must_use]
    pub const fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Inclusive lower bound on moves.
    #[must_use]
    pub const fn min_path_moves(&self) -> usize {
        self.min_path_moves
    }

    /// Inclusive upper bound on moves.
    #[must_use]
    pub const fn max_path_moves(&self) -> usize {
        self.max_path_moves
    }

    /// Minimum out-degree of both words.
    #[must_use]
    pub const fn min_node_degree(&self) -> usize {
        self.min_node_degree
    }

    /// Minimum squared layout distance.
    #[must_use]
    pub const fn min_layout_distance_squared(&self) -> f64 {
        self.min_layout_distance_squared
    }

    /// Candidate budget for the generator.
    #[must_use]
    pub const fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Returns `true` when `moves` falls inside the configured range.
    #[must_use]
    pub fn accepts_moves(&self, moves: usize) -> bool {
        (self.min_path_moves..=self.max_path_moves).contains(&moves)
    }

    /// Checks that the constraints can be satisfied at all.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidConstraints`] when the move range is
    /// inverted, the attempt budget is zero, or the layout threshold is
    /// negative or not finite.
    pub fn validate(&self) -> Result<()> {
        if self.min_path_moves > self.max_path_moves {
            return Err(EngineError::invalid_constraints(format!(
                "min_path_moves ({}) exceeds max_path_moves ({})",
                self.min_path_moves, self.max_path_moves
            )));
        }
        if self.max_attempts == 0 {
            return Err(EngineError::invalid_constraints(
                "max_attempts must be at least 1",
            ));
        }
        if !self.min_layout_distance_squared.is_finite() || self.min_layout_distance_squared < 0.0 {
            return Err(EngineError::invalid_constraints(
                "min_layout_distance_squared must be finite and non-negative",
            ));
        }
        Ok(())
    }
}
