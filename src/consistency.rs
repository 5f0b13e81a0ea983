//! # Consistency
//!
//! Herein are [assignments](Assignment) and the check that decides whether an
//! assignment, partial or complete, violates any constraint of the puzzle.

use std::{
	collections::{btree_map, BTreeMap, BTreeSet},
	ops::Index
};

use crate::{
	crossword::{Crossword, Variable},
	vocabulary::{letter_at, Word}
};

////////////////////////////////////////////////////////////////////////////////
//                                Assignments.                                //
////////////////////////////////////////////////////////////////////////////////

/// A partial mapping from variables to words. Unassigned variables are simply
/// absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[must_use]
pub struct Assignment(BTreeMap<Variable, Word>);

impl Assignment
{
	/// Construct an empty assignment. Same as [`Default::default`].
	#[inline]
	pub fn new() -> Self { Self(Default::default()) }

	#[inline]
	#[must_use]
	pub fn is_empty(&self) -> bool { self.0.is_empty() }

	#[inline]
	#[must_use]
	pub fn len(&self) -> usize { self.0.len() }

	#[inline]
	#[must_use]
	pub fn get(&self, variable: &Variable) -> Option<&Word>
	{
		self.0.get(variable)
	}

	#[inline]
	#[must_use]
	pub fn contains(&self, variable: &Variable) -> bool
	{
		self.0.contains_key(variable)
	}

	/// Assign a word to a variable, replacing any previous word.
	///
	/// # Returns
	///
	/// The previous word, if any.
	#[inline]
	pub fn insert(&mut self, variable: Variable, word: Word) -> Option<Word>
	{
		self.0.insert(variable, word)
	}

	/// Unassign a variable.
	///
	/// # Returns
	///
	/// The word that was assigned, if any.
	#[inline]
	pub fn remove(&mut self, variable: &Variable) -> Option<Word>
	{
		self.0.remove(variable)
	}

	/// Get an iterator over the assigned variables and their words, in
	/// variable order.
	#[inline]
	pub fn iter(&self) -> btree_map::Iter<'_, Variable, Word>
	{
		self.0.iter()
	}

	/// Check whether every variable of the puzzle is assigned.
	#[inline]
	#[must_use]
	pub fn is_complete(&self, crossword: &Crossword) -> bool
	{
		crossword.variables().iter().all(|variable| self.contains(variable))
	}
}

impl Index<&Variable> for Assignment
{
	type Output = Word;

	#[inline]
	fn index(&self, variable: &Variable) -> &Self::Output
	{
		&self.0[variable]
	}
}

impl<'a> IntoIterator for &'a Assignment
{
	type Item = (&'a Variable, &'a Word);
	type IntoIter = btree_map::Iter<'a, Variable, Word>;

	#[inline]
	fn into_iter(self) -> Self::IntoIter
	{
		self.0.iter()
	}
}

impl FromIterator<(Variable, Word)> for Assignment
{
	fn from_iter<I: IntoIterator<Item = (Variable, Word)>>(iter: I) -> Self
	{
		Self(iter.into_iter().collect())
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                Consistency.                                //
////////////////////////////////////////////////////////////////////////////////

/// Check whether an assignment violates no constraint of the puzzle:
///
/// 1. No two variables are assigned the same word.
/// 2. Every word has the length of its variable.
/// 3. Every two assigned variables that overlap agree on the shared letter.
///
/// Unassigned variables constrain nothing.
///
/// # Arguments
///
/// * `crossword` - The puzzle.
/// * `assignment` - The assignment to check.
///
/// # Returns
///
/// `true` if the assignment is consistent, `false` otherwise.
#[must_use]
pub fn consistent(crossword: &Crossword, assignment: &Assignment) -> bool
{
	let distinct = assignment.iter()
		.map(|(_, word)| word)
		.collect::<BTreeSet<_>>();
	if distinct.len() != assignment.len()
	{
		return false
	}
	if assignment.iter().any(|(variable, word)| word.len() != variable.length())
	{
		return false
	}
	assignment.iter().all(|(x, word)| {
		crossword.neighbors(x).iter().all(|y| {
			match (assignment.get(y), crossword.overlap(x, y))
			{
				(Some(other), Some((ix, iy))) =>
					letter_at(word, ix) == letter_at(other, iy),
				_ => true
			}
		})
	})
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod test
{
	use crate::{
		consistency::{consistent, Assignment},
		crossword::{Crossword, Direction, Variable},
		vocabulary::Word
	};

	/// Three variables: an across and a down sharing their first cell, plus an
	/// across sharing the last cell of the down.
	#[must_use]
	fn puzzle() -> (Crossword, [Variable; 3])
	{
		let crossword = Crossword::from_layout("__\n_#\n__").unwrap();
		let top = Variable::new(0, 0, Direction::Across, 2);
		let left = Variable::new(0, 0, Direction::Down, 3);
		let bottom = Variable::new(2, 0, Direction::Across, 2);
		(crossword, [top, left, bottom])
	}

	/// Decide consistency the slow way: by examining every pair of assigned
	/// variables directly against the grid.
	#[must_use]
	fn brute_force(assignment: &Assignment) -> bool
	{
		let entries = assignment.iter().collect::<Vec<_>>();
		if entries.iter().any(|(x, a)| a.len() != x.length())
		{
			return false
		}
		for (i, (x, a)) in entries.iter().enumerate()
		{
			for (y, b) in &entries[i + 1 ..]
			{
				if a == b
				{
					return false
				}
				for (kx, cell) in x.cells().enumerate()
				{
					if let Some(ky) = y.cells().position(|c| c == cell)
					{
						if a.as_str().as_bytes().get(kx)
							!= b.as_str().as_bytes().get(ky)
						{
							return false
						}
					}
				}
			}
		}
		true
	}

	/// Ensure that the checker agrees with the brute-force oracle on every
	/// partial and complete assignment drawn from a small word list.
	#[test]
	fn test_consistent_exhaustive()
	{
		let (crossword, variables) = puzzle();
		let words = ["AB", "AC", "BA", "ABC", "ACB", "CB", "B"]
			.iter()
			.map(|w| Word::from(*w))
			.collect::<Vec<_>>();
		// Each variable is either unassigned or assigned one of the words.
		let choices = words.len() + 1;
		let mut checked = 0;
		for code in 0 .. choices.pow(variables.len() as u32)
		{
			let mut assignment = Assignment::new();
			let mut rest = code;
			for variable in variables
			{
				let choice = rest % choices;
				rest /= choices;
				if choice > 0
				{
					assignment.insert(variable, words[choice - 1]);
				}
			}
			assert_eq!(
				consistent(&crossword, &assignment),
				brute_force(&assignment),
				"{:?}",
				assignment
			);
			checked += 1;
		}
		assert_eq!(checked, 512);
	}

	/// Ensure that each constraint is enforced on its own.
	#[test]
	fn test_consistent()
	{
		let (crossword, [top, left, bottom]) = puzzle();
		let mut assignment = Assignment::new();
		assert!(consistent(&crossword, &assignment));

		assignment.insert(top, Word::from("EX"));
		assert!(consistent(&crossword, &assignment));

		// Length.
		assignment.insert(left, Word::from("EX"));
		assert!(!consistent(&crossword, &assignment));

		// Overlap.
		assignment.insert(left, Word::from("CAT"));
		assert!(!consistent(&crossword, &assignment));

		assignment.insert(left, Word::from("EYE"));
		assert!(consistent(&crossword, &assignment));

		// Distinctness, even between variables that do not overlap.
		assignment.insert(bottom, Word::from("EX"));
		assert!(!consistent(&crossword, &assignment));

		assignment.insert(bottom, Word::from("ED"));
		assert!(consistent(&crossword, &assignment));
		assert!(assignment.is_complete(&crossword));

		assert_eq!(assignment.remove(&left), Some(Word::from("EYE")));
		assert!(!assignment.is_complete(&crossword));
		assert!(consistent(&crossword, &assignment));
	}
}
