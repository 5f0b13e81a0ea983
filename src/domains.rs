//! # Domains
//!
//! The domain store holds the candidate words of every variable. Domains only
//! ever shrink: there is no way to add a word once the store is built.

use std::collections::{BTreeMap, BTreeSet};

use crate::{
	crossword::{Crossword, Variable},
	vocabulary::{Vocabulary, Word}
};

////////////////////////////////////////////////////////////////////////////////
//                                  Domains.                                  //
////////////////////////////////////////////////////////////////////////////////

/// The candidate words of a single variable, in lexicographic order.
pub type Domain = BTreeSet<Word>;

/// The candidate words of every variable of a puzzle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub struct Domains(BTreeMap<Variable, Domain>);

impl Domains
{
	/// Construct the domain store for the given puzzle, giving every variable
	/// a copy of the full vocabulary.
	///
	/// # Arguments
	///
	/// * `crossword` - The puzzle.
	/// * `vocabulary` - The candidate words.
	///
	/// # Returns
	///
	/// The initial domain store.
	pub fn new(crossword: &Crossword, vocabulary: &Vocabulary) -> Self
	{
		let words = vocabulary.words().collect::<Domain>();
		Self(
			crossword.variables()
				.iter()
				.map(|variable| (*variable, words.clone()))
				.collect()
		)
	}

	/// Get an iterator over the current candidates of a variable, in
	/// lexicographic order. Unknown variables have no candidates.
	#[inline]
	pub fn candidates(&self, variable: &Variable) -> impl Iterator<Item = &Word> + '_
	{
		self.0.get(variable).into_iter().flatten()
	}

	/// Get the number of remaining candidates of a variable.
	#[inline]
	#[must_use]
	pub fn len(&self, variable: &Variable) -> usize
	{
		self.0.get(variable).map_or(0, BTreeSet::len)
	}

	/// Check whether a variable has run out of candidates.
	#[inline]
	#[must_use]
	pub fn is_empty(&self, variable: &Variable) -> bool
	{
		self.len(variable) == 0
	}

	/// Remove a single candidate from a variable.
	///
	/// # Returns
	///
	/// `true` if the candidate was present, `false` otherwise.
	#[inline]
	pub fn remove(&mut self, variable: &Variable, word: &Word) -> bool
	{
		self.0.get_mut(variable).map_or(false, |domain| domain.remove(word))
	}

	/// Keep only the candidates of a variable that satisfy the predicate.
	///
	/// # Returns
	///
	/// `true` if any candidate was removed, `false` otherwise.
	pub fn retain<F>(&mut self, variable: &Variable, predicate: F) -> bool
		where F: FnMut(&Word) -> bool
	{
		match self.0.get_mut(variable)
		{
			Some(domain) =>
			{
				let before = domain.len();
				domain.retain(predicate);
				domain.len() != before
			},
			None => false
		}
	}

	/// Get an iterator over every variable and its domain, in variable order.
	#[inline]
	pub fn iter(&self) -> impl Iterator<Item = (&Variable, &Domain)> + '_
	{
		self.0.iter()
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod test
{
	use crate::{
		crossword::{Crossword, Direction, Variable},
		domains::Domains,
		vocabulary::{Vocabulary, Word}
	};

	/// Ensure that every variable starts with the whole vocabulary, and that
	/// removal and retention only ever narrow a domain.
	#[test]
	fn test_domains()
	{
		let crossword = Crossword::from_layout("___\n_##\n").unwrap();
		let vocabulary = ["cat", "ab", "dog"].iter().collect::<Vocabulary>();
		let mut domains = Domains::new(&crossword, &vocabulary);
		let across = Variable::new(0, 0, Direction::Across, 3);
		let down = Variable::new(0, 0, Direction::Down, 2);
		assert_eq!(domains.len(&across), 3);
		assert_eq!(domains.len(&down), 3);
		assert_eq!(
			domains.candidates(&across).copied().collect::<Vec<_>>(),
			vec![Word::from("AB"), Word::from("CAT"), Word::from("DOG")]
		);

		assert!(domains.remove(&across, &Word::from("DOG")));
		assert!(!domains.remove(&across, &Word::from("DOG")));
		assert_eq!(domains.len(&across), 2);
		assert_eq!(domains.len(&down), 3);

		assert!(domains.retain(&down, |word| word.len() == 2));
		assert!(!domains.retain(&down, |word| word.len() == 2));
		assert_eq!(
			domains.candidates(&down).copied().collect::<Vec<_>>(),
			vec![Word::from("AB")]
		);
		assert!(!domains.is_empty(&down));
		assert!(domains.retain(&down, |_| false));
		assert!(domains.is_empty(&down));

		let stranger = Variable::new(7, 7, Direction::Down, 2);
		assert_eq!(domains.len(&stranger), 0);
		assert!(!domains.remove(&stranger, &Word::from("AB")));
		assert_eq!(domains.candidates(&stranger).count(), 0);
	}
}
