//! # Errors
//!
//! Malformed input is reported through [`CrosswordError`]. Note that an
//! unsolvable puzzle is _not_ an error: the solver reports it as the absence
//! of a solution.

use std::{
	error::Error,
	fmt::{self, Display, Formatter},
	io
};

use crate::crossword::Variable;

////////////////////////////////////////////////////////////////////////////////
//                                  Errors.                                   //
////////////////////////////////////////////////////////////////////////////////

/// The complete enumeration of malformed input conditions.
#[derive(Debug)]
pub enum CrosswordError
{
	/// The layout contains no open cells at all.
	EmptyLayout,

	/// A variable has a length of zero.
	EmptyVariable(Variable),

	/// A variable is longer than the longest representable word.
	VariableTooLong(Variable),

	/// A variable extends past the edge of the grid, or covers a blocked
	/// cell.
	VariableOutOfGrid(Variable),

	/// An overlap references a variable that is not part of the puzzle.
	UnknownVariable(Variable),

	/// An overlap relates a variable to itself.
	SelfOverlap(Variable),

	/// An overlap index lies outside the referenced variable.
	OverlapOutOfBounds
	{
		/// The variable whose bounds were violated.
		variable: Variable,

		/// The offending index.
		index: usize
	},

	/// The overlap between two variables disagrees with another record for
	/// the same pair, or with the cells the variables actually share.
	ConflictingOverlap(Variable, Variable),

	/// A vocabulary entry cannot be used as a word.
	InvalidWord
	{
		/// The offending entry.
		word: String,

		/// Why the entry was rejected.
		reason: &'static str
	},

	/// An I/O error occurred while reading a puzzle.
	Io(io::Error)
}

impl Display for CrosswordError
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		match self
		{
			Self::EmptyLayout => write!(f, "layout has no open cells"),
			Self::EmptyVariable(v) => write!(f, "variable has no cells: {}", v),
			Self::VariableTooLong(v) =>
				write!(f, "variable is too long: {}", v),
			Self::VariableOutOfGrid(v) =>
				write!(f, "variable does not fit the grid: {}", v),
			Self::UnknownVariable(v) => write!(f, "unknown variable: {}", v),
			Self::SelfOverlap(v) =>
				write!(f, "variable overlaps itself: {}", v),
			Self::OverlapOutOfBounds { variable, index } => write!(
				f,
				"overlap index {} is out of bounds for {}",
				index,
				variable
			),
			Self::ConflictingOverlap(x, y) =>
				write!(f, "conflicting overlaps for {} and {}", x, y),
			Self::InvalidWord { word, reason } =>
				write!(f, "invalid word {:?}: {}", word, reason),
			Self::Io(e) => write!(f, "I/O error: {}", e)
		}
	}
}

impl Error for CrosswordError
{
	fn source(&self) -> Option<&(dyn Error + 'static)>
	{
		match self
		{
			Self::Io(e) => Some(e),
			_ => None
		}
	}
}

impl From<io::Error> for CrosswordError
{
	fn from(e: io::Error) -> Self
	{
		Self::Io(e)
	}
}

#[cfg(test)]
mod test
{
	use std::{error::Error, io};

	use crate::{
		crossword::{Direction, Variable},
		error::CrosswordError
	};

	/// Ensure that errors describe the offending input, and that I/O errors
	/// keep their cause.
	#[test]
	fn test_display()
	{
		let variable = Variable::new(1, 2, Direction::Down, 3);
		let error = CrosswordError::OverlapOutOfBounds { variable, index: 4 };
		assert_eq!(
			error.to_string(),
			"overlap index 4 is out of bounds for (1, 2) down 3"
		);
		assert!(error.source().is_none());

		let error = CrosswordError::from(
			io::Error::new(io::ErrorKind::NotFound, "missing")
		);
		assert_eq!(error.to_string(), "I/O error: missing");
		assert!(error.source().is_some());
	}
}
