//! # Rendering
//!
//! Text rendering of a filled (or partially filled) grid.

use std::fmt::{self, Display, Formatter};

use crate::{consistency::Assignment, crossword::Crossword};

/// The character drawn for a blocked cell.
pub const BLOCKED_CELL: char = '█';

/// Lay the words of an assignment out on the grid.
///
/// # Arguments
///
/// * `crossword` - The puzzle.
/// * `assignment` - The words to lay out.
///
/// # Returns
///
/// The letter of every cell, row by row, or `None` for cells that no assigned
/// word covers.
#[must_use]
pub fn letter_grid(crossword: &Crossword, assignment: &Assignment) -> Vec<Vec<Option<char>>>
{
	let mut letters = vec![vec![None; crossword.width()]; crossword.height()];
	for (variable, word) in assignment
	{
		for ((row, column), letter) in variable.cells().zip(word.as_str().chars())
		{
			if let Some(cell) = letters.get_mut(row).and_then(|r| r.get_mut(column))
			{
				*cell = Some(letter);
			}
		}
	}
	letters
}

/// A grid and its letters, ready for display. Blocked cells are drawn as
/// [`BLOCKED_CELL`], and open cells without a letter as spaces.
#[derive(Clone, Copy, Debug)]
#[must_use]
pub struct Rendering<'a>
{
	/// The puzzle.
	crossword: &'a Crossword,

	/// The words to draw.
	assignment: &'a Assignment
}

impl<'a> Rendering<'a>
{
	#[inline]
	pub fn new(crossword: &'a Crossword, assignment: &'a Assignment) -> Self
	{
		Self { crossword, assignment }
	}
}

impl Display for Rendering<'_>
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		let letters = letter_grid(self.crossword, self.assignment);
		for (row, line) in letters.iter().enumerate()
		{
			for (column, letter) in line.iter().enumerate()
			{
				let c = if self.crossword.is_open(row, column)
				{
					letter.unwrap_or(' ')
				}
				else
				{
					BLOCKED_CELL
				};
				write!(f, "{}", c)?;
			}
			writeln!(f)?;
		}
		Ok(())
	}
}
