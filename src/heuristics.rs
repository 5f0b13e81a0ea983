//! # Heuristics
//!
//! Herein are the ordering heuristics that steer the search: which variable to
//! assign next (minimum remaining values, then degree) and in which order to
//! try its candidates (least constraining value). Both are deterministic for a
//! fixed state, so the search is reproducible. Neither affects correctness.

use std::{cmp::Reverse, collections::HashMap};

use crate::{
	consistency::Assignment,
	crossword::{Crossword, Variable},
	domains::Domains,
	vocabulary::{letter_at, Word}
};

/// Select the next variable to assign: the unassigned variable with the fewest
/// remaining candidates, breaking ties by the most neighbors and then by
/// variable order.
///
/// # Arguments
///
/// * `crossword` - The puzzle.
/// * `domains` - The current domains.
/// * `assignment` - The current assignment.
///
/// # Returns
///
/// The selected variable, or `None` if every variable is assigned.
#[must_use]
pub fn select_unassigned_variable(
	crossword: &Crossword,
	domains: &Domains,
	assignment: &Assignment
) -> Option<Variable>
{
	crossword.variables()
		.iter()
		.filter(|variable| !assignment.contains(variable))
		.min_by_key(|variable| {
			(
				domains.len(variable),
				Reverse(crossword.degree(variable)),
				**variable
			)
		})
		.copied()
}

/// Order the candidates of a variable by how many candidates of its unassigned
/// neighbors each one would rule out, fewest first. Ties keep the domain
/// order.
///
/// # Arguments
///
/// * `crossword` - The puzzle.
/// * `domains` - The current domains.
/// * `variable` - The variable whose candidates should be ordered.
/// * `assignment` - The current assignment. Assigned neighbors are ignored.
///
/// # Returns
///
/// A permutation of the domain of `variable`.
#[must_use]
pub fn order_domain_values(
	crossword: &Crossword,
	domains: &Domains,
	variable: &Variable,
	assignment: &Assignment
) -> Vec<Word>
{
	// For every unassigned neighbor, tally its candidates by the letter at the
	// overlap. A candidate rules out every neighbor candidate that has a
	// different letter there.
	let tallies = crossword.neighbors(variable)
		.iter()
		.filter(|neighbor| !assignment.contains(neighbor))
		.filter_map(|neighbor| {
			let (ix, iy) = crossword.overlap(variable, neighbor)?;
			let mut tally = HashMap::<Option<u8>, usize>::new();
			for word in domains.candidates(neighbor)
			{
				*tally.entry(letter_at(word, iy)).or_default() += 1;
			}
			Some((ix, domains.len(neighbor), tally))
		})
		.collect::<Vec<_>>();
	let mut ordered = domains.candidates(variable)
		.map(|word| {
			let eliminated = tallies.iter()
				.map(|(ix, total, tally)| {
					let letter = letter_at(word, *ix);
					let agreeing = match letter
					{
						Some(_) => tally.get(&letter).copied().unwrap_or(0),
						None => 0
					};
					total - agreeing
				})
				.sum::<usize>();
			(eliminated, *word)
		})
		.collect::<Vec<_>>();
	ordered.sort_by_key(|(eliminated, _)| *eliminated);
	ordered.into_iter().map(|(_, word)| word).collect()
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////
