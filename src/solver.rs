//! # Solver
//!
//! Herein is the solver for crossword puzzles: node consistency, then arc
//! consistency, then a backtracking search guided by the
//! [heuristics](crate::heuristics).

use std::{
	rc::Rc,
	time::{Duration, Instant}
};

use log::{debug, trace};

use crate::{
	consistency::{consistent, Assignment},
	crossword::{Crossword, Variable},
	domains::Domains,
	heuristics::{order_domain_values, select_unassigned_variable},
	propagation::{ac3, enforce_node_consistency, Discipline, Propagation},
	vocabulary::{Vocabulary, Word}
};

////////////////////////////////////////////////////////////////////////////////
//                               Configuration.                               //
////////////////////////////////////////////////////////////////////////////////

/// Tunable behavior of the [`Solver`]. None of these settings changes whether
/// a solution is found, only how quickly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolverConfig
{
	/// The order in which AC-3 processes its worklist.
	pub discipline: Discipline,

	/// Whether to re-establish arc consistency after every trial assignment.
	/// When disabled, the domains are fixed once the initial propagation is
	/// complete, and only the consistency check prunes the search.
	pub maintain_arc_consistency: bool
}

/// Counters describing the work done by a [`Solver`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Statistics
{
	/// The number of trial assignments.
	pub nodes: u64,

	/// The number of choice points abandoned after exhausting their candidates.
	pub backtracks: u64,

	/// The number of arc revisions that narrowed a domain.
	pub revisions: u64
}

////////////////////////////////////////////////////////////////////////////////
//                                  Solver.                                   //
////////////////////////////////////////////////////////////////////////////////

/// The complete context of the crossword solver. The search is driven by an
/// explicit stack of choice points rather than by recursion, so it can be
/// time-sliced: [`solve`](Self::solve) runs for a bounded quantum and answers
/// a continuation context.
#[derive(Clone, Debug)]
#[must_use]
pub struct Solver
{
	/// The puzzle to fill.
	crossword: Rc<Crossword>,

	/// How to solve the puzzle.
	config: SolverConfig,

	/// The candidate words of every variable.
	domains: Domains,

	/// The current partial assignment.
	assignment: Assignment,

	/// The choice points of the search, outermost first. The variable of every
	/// choice point but the topmost is assigned.
	stack: Vec<ChoicePoint>,

	/// How far along the solver is.
	phase: Phase,

	/// The work done so far.
	statistics: Statistics
}

/// The lifecycle of a [`Solver`].
#[derive(Clone, Debug, PartialEq, Eq)]
enum Phase
{
	/// The domains have not been narrowed yet.
	Propagating,

	/// The backtracking search is underway.
	Searching,

	/// The solver has terminated, with or without a solution.
	Finished(Option<Assignment>)
}

/// A single decision of the search: which word to assign to a variable.
#[derive(Clone, Debug)]
struct ChoicePoint
{
	/// The variable being decided.
	variable: Variable,

	/// The candidates for the variable, in the order they are tried.
	candidates: Vec<Word>,

	/// The index of the next candidate to try.
	next: usize,

	/// The domains as they were before the current trial narrowed them. Only
	/// used when maintaining arc consistency.
	saved: Option<Domains>
}

impl Solver
{
	/// Construct a new solver for the given puzzle. Every variable starts out
	/// with the whole vocabulary as its domain.
	///
	/// # Arguments
	///
	/// * `crossword` - The puzzle to fill.
	/// * `vocabulary` - The candidate words.
	/// * `config` - How to solve the puzzle.
	///
	/// # Returns
	///
	/// A new solver that has not yet done any work.
	pub fn new(
		crossword: Rc<Crossword>,
		vocabulary: &Vocabulary,
		config: SolverConfig
	) -> Self
	{
		let domains = Domains::new(&crossword, vocabulary);
		Self
		{
			crossword,
			config,
			domains,
			assignment: Assignment::new(),
			stack: Vec::new(),
			phase: Phase::Propagating,
			statistics: Statistics::default()
		}
	}

	/// Check if the solver is finished, either because it found a solution or
	/// because it exhausted the search space.
	#[inline]
	#[must_use]
	pub fn is_finished(&self) -> bool
	{
		matches!(self.phase, Phase::Finished(_))
	}

	/// Check if the solver found a solution.
	#[inline]
	#[must_use]
	pub fn is_solved(&self) -> bool
	{
		matches!(self.phase, Phase::Finished(Some(_)))
	}

	/// Get the solution, if the solver found one. Until the solver is
	/// [finished](Self::is_finished), there is no solution.
	#[inline]
	#[must_use]
	pub fn solution(&self) -> Option<&Assignment>
	{
		match &self.phase
		{
			Phase::Finished(solution) => solution.as_ref(),
			_ => None
		}
	}

	/// Consume the solver, answering its solution, if any.
	#[inline]
	#[must_use]
	pub fn into_solution(self) -> Option<Assignment>
	{
		match self.phase
		{
			Phase::Finished(solution) => solution,
			_ => None
		}
	}

	/// Get the puzzle being solved.
	///
	/// # Returns
	///
	/// The puzzle.
	#[inline]
	#[must_use]
	pub fn crossword(&self) -> &Crossword
	{
		&self.crossword
	}

	/// Get the current domains. Once the initial propagation has run, these
	/// are node and arc consistent.
	#[inline]
	#[must_use]
	pub fn domains(&self) -> &Domains
	{
		&self.domains
	}

	/// Get the work done so far.
	///
	/// # Returns
	///
	/// A snapshot of the counters.
	#[inline]
	#[must_use]
	pub fn statistics(&self) -> Statistics
	{
		self.statistics
	}

	/// Run the solver until it finishes or the specified quantum elapses.
	/// Always perform at least one step, even if the quantum is zero, to ensure
	/// that the solver always makes progress.
	///
	/// # Arguments
	///
	/// * `duration` - The maximum amount of time to run the solver before
	///   answering a continuation context.
	///
	/// # Returns
	///
	/// The continuation context. The caller should call
	/// [`is_finished`](Self::is_finished) to determine if there is any
	/// additional work to perform.
	pub fn solve(mut self, duration: Duration) -> Self
	{
		if self.is_finished()
		{
			trace!("solver is already finished");
			return self
		}
		let start_time = Instant::now();
		loop
		{
			match self.phase
			{
				Phase::Propagating => self.propagate(),
				Phase::Searching => self.step(),
				Phase::Finished(_) => unreachable!()
			}
			if self.is_finished()
			{
				debug!("solver finished: {:?}", self.statistics);
				return self
			}
			let elapsed = Instant::now().duration_since(start_time);
			if elapsed >= duration
			{
				trace!("quantum elapsed: {:?}", elapsed);
				return self
			}
		}
	}

	/// Run the solver until it finishes.
	pub fn solve_fully(mut self) -> Self
	{
		while !self.is_finished()
		{
			self = self.solve(Duration::MAX);
		}
		self
	}

	/// Narrow the domains with node consistency and then arc consistency. If
	/// any domain ends up empty, the puzzle has no solution and the search is
	/// skipped entirely.
	fn propagate(&mut self)
	{
		enforce_node_consistency(&self.crossword, &mut self.domains);
		let propagation =
			ac3(&self.crossword, &mut self.domains, None, self.config.discipline);
		self.statistics.revisions += propagation.revisions() as u64;
		if let Propagation::Wipeout { variable, .. } = propagation
		{
			debug!("no solution: arc consistency emptied {}", variable);
			self.phase = Phase::Finished(None);
			return
		}
		// Arc consistency has nothing to say about variables without
		// neighbors, so node consistency may have emptied one of them.
		if let Some(variable) = self.crossword.variables()
			.iter()
			.find(|variable| self.domains.is_empty(variable))
		{
			debug!("no solution: node consistency emptied {}", variable);
			self.phase = Phase::Finished(None);
			return
		}
		self.phase = Phase::Searching;
		self.descend();
	}

	/// Either accept the current assignment, if it is complete, or open a
	/// choice point for the next variable.
	fn descend(&mut self)
	{
		match select_unassigned_variable(
			&self.crossword,
			&self.domains,
			&self.assignment
		)
		{
			None =>
			{
				debug!("found solution: {:?}", self.assignment);
				self.phase = Phase::Finished(Some(self.assignment.clone()));
			},
			Some(variable) =>
			{
				let candidates = order_domain_values(
					&self.crossword,
					&self.domains,
					&variable,
					&self.assignment
				);
				trace!(
					"choosing {} from {} candidates",
					variable,
					candidates.len()
				);
				self.stack.push(ChoicePoint {
					variable,
					candidates,
					next: 0,
					saved: None
				});
			}
		}
	}

	/// Perform a single step of the search: undo the previous trial of the
	/// topmost choice point, then try its next candidate, or abandon the
	/// choice point if no candidates remain.
	fn step(&mut self)
	{
		let Some(top) = self.stack.last_mut() else {
			debug!("exhausted search space");
			self.phase = Phase::Finished(None);
			return
		};
		self.assignment.remove(&top.variable);
		if let Some(saved) = top.saved.take()
		{
			self.domains = saved;
		}
		let variable = top.variable;
		let Some(&word) = top.candidates.get(top.next) else {
			trace!("backtracking from {}", variable);
			self.stack.pop();
			self.statistics.backtracks += 1;
			if self.stack.is_empty()
			{
				debug!("exhausted search space");
				self.phase = Phase::Finished(None);
			}
			return
		};
		top.next += 1;
		self.statistics.nodes += 1;
		self.assignment.insert(variable, word);
		if !consistent(&self.crossword, &self.assignment)
		{
			trace!("rejected {} for {}", word, variable);
			self.assignment.remove(&variable);
			return
		}
		if self.config.maintain_arc_consistency
		{
			let saved = self.domains.clone();
			self.domains.retain(&variable, |candidate| *candidate == word);
			let arcs = self.crossword.neighbors(&variable)
				.iter()
				.map(|neighbor| (*neighbor, variable))
				.collect::<Vec<_>>();
			let propagation = ac3(
				&self.crossword,
				&mut self.domains,
				Some(arcs),
				self.config.discipline
			);
			self.statistics.revisions += propagation.revisions() as u64;
			if !propagation.is_consistent()
			{
				trace!("propagation rejected {} for {}", word, variable);
				self.domains = saved;
				self.assignment.remove(&variable);
				return
			}
			if let Some(top) = self.stack.last_mut()
			{
				top.saved = Some(saved);
			}
		}
		trace!("assigned {} to {}", word, variable);
		self.descend();
	}
}

/// Solve a puzzle with the default configuration.
///
/// # Arguments
///
/// * `crossword` - The puzzle to fill.
/// * `vocabulary` - The candidate words.
///
/// # Returns
///
/// A complete, consistent assignment, or `None` if the puzzle has no solution.
#[must_use]
pub fn solve(crossword: Rc<Crossword>, vocabulary: &Vocabulary) -> Option<Assignment>
{
	Solver::new(crossword, vocabulary, SolverConfig::default())
		.solve_fully()
		.into_solution()
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////
