//! # Crossword Solver
//!
//! Fill a crossword grid from a vocabulary by treating it as a constraint
//! satisfaction problem. Every slot of the grid is a variable whose domain is
//! the vocabulary; a solution assigns each variable a distinct word of the
//! right length such that crossing slots agree on their shared letters.
//!
//! The solver narrows the domains with node consistency and arc consistency
//! (AC-3), then runs a backtracking search ordered by the minimum remaining
//! values, degree, and least constraining value heuristics.

pub mod consistency;
pub mod crossword;
pub mod domains;
pub mod error;
pub mod heuristics;
pub mod propagation;
pub mod render;
pub mod solver;
pub mod vocabulary;
