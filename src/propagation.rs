//! # Propagation
//!
//! Herein are node consistency and arc consistency (AC-3). Both narrow the
//! [`Domains`] in place before the search begins, and neither ever adds a
//! candidate back.

use std::collections::{BTreeSet, VecDeque};

use log::{debug, trace};

use crate::{
	crossword::{Crossword, Variable},
	domains::Domains,
	vocabulary::letter_at
};

////////////////////////////////////////////////////////////////////////////////
//                             Node consistency.                              //
////////////////////////////////////////////////////////////////////////////////

/// Remove every candidate whose length differs from the length of its
/// variable. An emptied domain is not reported here; arc consistency or the
/// search will notice it.
///
/// # Arguments
///
/// * `crossword` - The puzzle.
/// * `domains` - The domains to narrow.
pub fn enforce_node_consistency(crossword: &Crossword, domains: &mut Domains)
{
	for variable in crossword.variables()
	{
		let length = variable.length();
		if domains.retain(variable, |word| word.len() == length)
		{
			trace!(
				"node consistency: {} has {} candidates",
				variable,
				domains.len(variable)
			);
		}
	}
}

////////////////////////////////////////////////////////////////////////////////
//                             Arc consistency.                               //
////////////////////////////////////////////////////////////////////////////////

/// A directed arc `(x, y)`: the domain of `x` must be supported by the domain
/// of `y`.
pub type DirectedArc = (Variable, Variable);

/// The order in which the AC-3 worklist yields its arcs. The discipline
/// affects only how quickly the fixed point is reached, never the fixed point
/// itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Discipline
{
	/// Most recently added arc first.
	#[default]
	Stack,

	/// Least recently added arc first.
	Queue
}

/// The outcome of running AC-3.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum Propagation
{
	/// Every arc is consistent and no domain is empty.
	Consistent
	{
		/// The number of calls to [`revise`] that removed something.
		revisions: usize
	},

	/// The domain of `variable` was emptied, so the puzzle has no solution
	/// (given the domains at the start of propagation).
	Wipeout
	{
		/// The variable whose domain was emptied.
		variable: Variable,

		/// The number of calls to [`revise`] that removed something.
		revisions: usize
	}
}

impl Propagation
{
	/// Check if propagation left every domain non-empty.
	///
	/// # Returns
	///
	/// `true` if no domain was wiped out, `false` otherwise.
	#[inline]
	#[must_use]
	pub fn is_consistent(&self) -> bool
	{
		matches!(self, Self::Consistent { .. })
	}

	/// Get the amount of pruning work done, whatever the outcome.
	///
	/// # Returns
	///
	/// The number of calls to [`revise`] that removed something.
	#[inline]
	#[must_use]
	pub fn revisions(&self) -> usize
	{
		match self
		{
			Self::Consistent { revisions } => *revisions,
			Self::Wipeout { revisions, .. } => *revisions
		}
	}
}

/// Make `x` arc consistent with `y`: remove every candidate of `x` whose letter
/// at the overlap matches no candidate of `y`. Variables that do not overlap
/// constrain nothing.
///
/// # Arguments
///
/// * `crossword` - The puzzle.
/// * `domains` - The domains to narrow.
/// * `x` - The variable to revise.
/// * `y` - The variable that must support `x`.
///
/// # Returns
///
/// `true` if the domain of `x` was narrowed, `false` otherwise.
pub fn revise(
	crossword: &Crossword,
	domains: &mut Domains,
	x: &Variable,
	y: &Variable
) -> bool
{
	let Some((ix, iy)) = crossword.overlap(x, y) else { return false };
	let supported = domains.candidates(y)
		.filter_map(|word| letter_at(word, iy))
		.collect::<BTreeSet<_>>();
	domains.retain(x, |word| {
		letter_at(word, ix).map_or(false, |letter| supported.contains(&letter))
	})
}

/// Enforce arc consistency with AC-3.
///
/// # Arguments
///
/// * `crossword` - The puzzle.
/// * `domains` - The domains to narrow.
/// * `arcs` - The initial worklist. `None` means every arc of the puzzle,
///   i.e., `(x, y)` for every variable `x` and every neighbor `y` of `x`.
///   Supply a subset to re-propagate after narrowing a few domains from
///   outside.
/// * `discipline` - The order in which the worklist yields arcs.
///
/// # Returns
///
/// [`Propagation::Consistent`] if the worklist drained, or
/// [`Propagation::Wipeout`] as soon as any domain is emptied.
pub fn ac3(
	crossword: &Crossword,
	domains: &mut Domains,
	arcs: Option<Vec<DirectedArc>>,
	discipline: Discipline
) -> Propagation
{
	let mut worklist = match arcs
	{
		Some(arcs) => VecDeque::from(arcs),
		None => all_arcs(crossword).collect()
	};
	trace!("ac3: {} initial arcs", worklist.len());
	let mut revisions = 0;
	loop
	{
		let next = match discipline
		{
			Discipline::Stack => worklist.pop_back(),
			Discipline::Queue => worklist.pop_front()
		};
		let Some((x, y)) = next else { break };
		if revise(crossword, domains, &x, &y)
		{
			revisions += 1;
			if domains.is_empty(&x)
			{
				debug!("ac3: domain wiped out: {}", x);
				return Propagation::Wipeout { variable: x, revisions }
			}
			// Narrowing x may have removed the only support of one of its
			// other neighbors.
			worklist.extend(
				crossword.neighbors(&x)
					.iter()
					.filter(|z| **z != y)
					.map(|z| (*z, x))
			);
		}
	}
	debug!("ac3: consistent after {} revisions", revisions);
	Propagation::Consistent { revisions }
}

/// Get every arc of the puzzle, in variable order.
pub fn all_arcs(crossword: &Crossword) -> impl Iterator<Item = DirectedArc> + '_
{
	crossword.variables()
		.iter()
		.flat_map(move |x| crossword.neighbors(x).iter().map(move |y| (*x, *y)))
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
		propagation::{
			ac3, all_arcs, enforce_node_consistency, revise,
			Discipline, Propagation
		},
		vocabulary::{letter_at, Vocabulary, Word}
	};

	/// The ring layout used throughout.
	#[inline]
	#[must_use]
	const fn ring() -> &'static str
	{
		"#___#\n#_##_\n#_##_\n#_##_\n#____\n"
	}

	/// The vocabulary used with the ring.
	#[must_use]
	fn numbers() -> Vocabulary
	{
		[
			"one", "two", "three", "four", "five",
			"six", "seven", "eight", "nine", "ten"
		].iter().collect()
	}

	/// Collect a domain into plain strings.
	#[must_use]
	fn words(domains: &Domains, variable: &Variable) -> Vec<String>
	{
		domains.candidates(variable).map(|w| w.to_string()).collect()
	}

	/// Ensure that every surviving candidate has the length of its variable.
	#[test]
	fn test_node_consistency()
	{
		let crossword = Crossword::from_layout(ring()).unwrap();
		let mut domains = Domains::new(&crossword, &numbers());
		enforce_node_consistency(&crossword, &mut domains);
		for (variable, domain) in domains.iter()
		{
			assert!(domain.iter().all(|w| w.len() == variable.length()));
		}
		let across3 = Variable::new(0, 1, Direction::Across, 3);
		assert_eq!(words(&domains, &across3), vec!["ONE", "SIX", "TEN", "TWO"]);
	}

	/// Ensure that node consistency empties a domain when nothing fits, without
	/// complaint.
	#[test]
	fn test_node_consistency_empties()
	{
		let crossword = Crossword::from_layout("___").unwrap();
		let vocabulary = ["ab", "xy"].iter().collect::<Vocabulary>();
		let mut domains = Domains::new(&crossword, &vocabulary);
		enforce_node_consistency(&crossword, &mut domains);
		let across = Variable::new(0, 0, Direction::Across, 3);
		assert!(domains.is_empty(&across));
	}

	/// Ensure that revision removes exactly the unsupported candidates.
	#[test]
	fn test_revise()
	{
		let crossword = Crossword::from_layout("__\n_#").unwrap();
		let across = Variable::new(0, 0, Direction::Across, 2);
		let down = Variable::new(0, 0, Direction::Down, 2);
		let vocabulary = ["ab", "ac", "ba", "cd"].iter().collect::<Vocabulary>();
		let mut domains = Domains::new(&crossword, &vocabulary);
		assert!(domains.remove(&down, &Word::from("CD")));
		assert!(revise(&crossword, &mut domains, &across, &down));
		assert_eq!(words(&domains, &across), vec!["AB", "AC", "BA"]);
		assert!(!revise(&crossword, &mut domains, &across, &down));
		assert!(!revise(&crossword, &mut domains, &down, &across));

		let stranger = Variable::new(5, 5, Direction::Across, 2);
		assert!(!revise(&crossword, &mut domains, &across, &stranger));
	}

	/// Ensure that AC-3 reaches the expected fixed point, and that the result
	/// is arc consistent.
	#[test]
	fn test_ac3()
	{
		let crossword = Crossword::from_layout(ring()).unwrap();
		for discipline in [Discipline::Stack, Discipline::Queue]
		{
			let mut domains = Domains::new(&crossword, &numbers());
			enforce_node_consistency(&crossword, &mut domains);
			let outcome = ac3(&crossword, &mut domains, None, discipline);
			assert!(outcome.is_consistent());
			assert!(outcome.revisions() > 0);
			assert_eq!(
				words(&domains, &Variable::new(0, 1, Direction::Across, 3)),
				vec!["SIX"]
			);
			assert_eq!(
				words(&domains, &Variable::new(0, 1, Direction::Down, 5)),
				vec!["SEVEN"]
			);
			assert_eq!(
				words(&domains, &Variable::new(1, 4, Direction::Down, 4)),
				vec!["FIVE", "NINE"]
			);
			assert_eq!(
				words(&domains, &Variable::new(4, 1, Direction::Across, 4)),
				vec!["NINE"]
			);
			for (x, y) in all_arcs(&crossword)
			{
				let (ix, iy) = crossword.overlap(&x, &y).unwrap();
				for word in domains.candidates(&x)
				{
					assert!(domains.candidates(&y).any(|other| {
						letter_at(word, ix) == letter_at(other, iy)
					}));
				}
			}
		}
	}

	/// Ensure that both worklist disciplines reach the same fixed point.
	#[test]
	fn test_ac3_disciplines_agree()
	{
		let crossword =
			Crossword::from_layout("____\n_##_\n____\n_##_").unwrap();
		let vocabulary = [
			"abcd", "aeia", "dcba", "efgh", "ahie", "heha", "defa", "adca",
			"bead", "deed", "aide", "ease", "dada", "haha", "idea", "echo"
		].iter().collect::<Vocabulary>();
		let mut stack = Domains::new(&crossword, &vocabulary);
		enforce_node_consistency(&crossword, &mut stack);
		let mut queue = stack.clone();
		let stack_outcome = ac3(&crossword, &mut stack, None, Discipline::Stack);
		let queue_outcome = ac3(&crossword, &mut queue, None, Discipline::Queue);
		assert_eq!(stack_outcome.is_consistent(), queue_outcome.is_consistent());
		if stack_outcome.is_consistent()
		{
			assert_eq!(stack, queue);
		}
	}

	/// Ensure that AC-3 reports a wipeout instead of draining the worklist.
	#[test]
	fn test_ac3_wipeout()
	{
		let crossword = Crossword::from_layout("__\n_#").unwrap();
		let vocabulary = ["ab", "cd"].iter().collect::<Vocabulary>();
		let mut domains = Domains::new(&crossword, &vocabulary);
		let across = Variable::new(0, 0, Direction::Across, 2);
		let down = Variable::new(0, 0, Direction::Down, 2);
		assert!(domains.remove(&across, &Word::from("CD")));
		assert!(domains.remove(&down, &Word::from("AB")));
		let outcome = ac3(&crossword, &mut domains, None, Discipline::Stack);
		assert!(!outcome.is_consistent());
		assert!(matches!(outcome, Propagation::Wipeout { .. }));
	}

	/// Ensure that an explicit worklist only propagates from the arcs given.
	#[test]
	fn test_ac3_explicit_arcs()
	{
		let crossword = Crossword::from_layout(ring()).unwrap();
		let mut domains = Domains::new(&crossword, &numbers());
		enforce_node_consistency(&crossword, &mut domains);
		let across3 = Variable::new(0, 1, Direction::Across, 3);
		let down5 = Variable::new(0, 1, Direction::Down, 5);
		let down4 = Variable::new(1, 4, Direction::Down, 4);
		let outcome = ac3(
			&crossword,
			&mut domains,
			Some(vec![(across3, down5)]),
			Discipline::Stack
		);
		assert_eq!(outcome, Propagation::Consistent { revisions: 1 });
		assert_eq!(words(&domains, &across3), vec!["SIX", "TEN", "TWO"]);
		assert_eq!(words(&domains, &down4), vec!["FIVE", "FOUR", "NINE"]);

		let outcome = ac3(&crossword, &mut domains, Some(vec![]), Discipline::Queue);
		assert_eq!(outcome, Propagation::Consistent { revisions: 0 });
	}
}
