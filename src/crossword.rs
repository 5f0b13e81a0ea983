//! # Crossword
//!
//! Herein is the puzzle structure: the grid of open and blocked cells, the
//! variables (slots) that words must fill, and the overlaps between them. The
//! structure is read-only once constructed; the solver only ever queries it.

use std::{
	collections::{BTreeMap, BTreeSet, HashMap},
	fmt::{self, Display, Formatter},
	fs,
	path::Path
};

use log::trace;

use crate::error::CrosswordError;

/// The longest word that fits in a [`Word`](crate::vocabulary::Word), in
/// bytes.
pub const MAX_WORD_LENGTH: usize = 31;

/// The layout character that denotes an open cell. Every other character
/// denotes a blocked cell.
pub const OPEN_CELL: char = '_';

////////////////////////////////////////////////////////////////////////////////
//                                 Variables.                                 //
////////////////////////////////////////////////////////////////////////////////

/// The direction in which a word is written into the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction
{
	/// Left to right.
	Across,

	/// Top to bottom.
	Down
}

impl Display for Direction
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		match self
		{
			Self::Across => write!(f, "across"),
			Self::Down => write!(f, "down")
		}
	}
}

/// A variable is a single slot in the grid, identified by its starting cell,
/// its direction, and its length. Two variables are equal iff all four
/// attributes are equal. The derived ordering (row, then column, then
/// direction, then length) fixes the iteration order used throughout the
/// solver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[must_use]
pub struct Variable
{
	/// The row of the first cell.
	row: usize,

	/// The column of the first cell.
	column: usize,

	/// The direction of the slot.
	direction: Direction,

	/// The number of cells in the slot.
	length: usize
}

impl Variable
{
	/// Construct a new variable.
	///
	/// # Arguments
	///
	/// * `row` - The row of the first cell.
	/// * `column` - The column of the first cell.
	/// * `direction` - The direction of the slot.
	/// * `length` - The number of cells in the slot.
	///
	/// # Returns
	///
	/// The requested variable. It is validated only when it becomes part of a
	/// [`Crossword`].
	#[inline]
	pub const fn new(
		row: usize,
		column: usize,
		direction: Direction,
		length: usize
	) -> Self
	{
		Self { row, column, direction, length }
	}

	/// Get the row of the first cell.
	///
	/// # Returns
	///
	/// The zero-based row index.
	#[inline]
	#[must_use]
	pub const fn row(&self) -> usize { self.row }

	/// Get the column of the first cell.
	///
	/// # Returns
	///
	/// The zero-based column index.
	#[inline]
	#[must_use]
	pub const fn column(&self) -> usize { self.column }

	/// Get the direction in which the variable extends from its first cell.
	///
	/// # Returns
	///
	/// The direction.
	#[inline]
	#[must_use]
	pub const fn direction(&self) -> Direction { self.direction }

	/// Get the number of cells, which is also the length of every word that
	/// fits the variable.
	///
	/// # Returns
	///
	/// The length.
	#[inline]
	#[must_use]
	pub const fn length(&self) -> usize { self.length }

	/// Get the grid coordinates of the `k`-th cell of the variable. `k` is not
	/// checked against the length.
	///
	/// # Arguments
	///
	/// * `k` - The index of the cell within the variable.
	///
	/// # Returns
	///
	/// The `(row, column)` of the cell.
	#[inline]
	#[must_use]
	pub const fn cell(&self, k: usize) -> (usize, usize)
	{
		match self.direction
		{
			Direction::Across => (self.row, self.column + k),
			Direction::Down => (self.row + k, self.column)
		}
	}

	/// Get an iterator over the grid coordinates of every cell of the
	/// variable, in word order.
	#[inline]
	pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_
	{
		(0 .. self.length).map(move |k| self.cell(k))
	}
}

impl Display for Variable
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		write!(
			f,
			"({}, {}) {} {}",
			self.row,
			self.column,
			self.direction,
			self.length
		)
	}
}

/// An overlap is the pair of positions, one in each word, whose letters must
/// agree: `(index into x, index into y)` for the ordered pair `(x, y)`.
pub type Overlap = (usize, usize);

////////////////////////////////////////////////////////////////////////////////
//                                 Crossword.                                 //
////////////////////////////////////////////////////////////////////////////////

/// Shared empty neighbor set, answered for variables that are not part of the
/// puzzle.
static NO_NEIGHBORS: BTreeSet<Variable> = BTreeSet::new();

/// The complete puzzle structure.
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub struct Crossword
{
	/// The number of rows in the grid.
	height: usize,

	/// The number of columns in the grid.
	width: usize,

	/// Which cells are open, linearized in row-major order.
	open: Vec<bool>,

	/// Every variable of the puzzle.
	variables: BTreeSet<Variable>,

	/// The overlap of every intersecting pair, recorded for both orderings.
	overlaps: HashMap<(Variable, Variable), Overlap>,

	/// The neighbors of every variable. Every variable has an entry, even if
	/// it has no neighbors.
	neighbors: BTreeMap<Variable, BTreeSet<Variable>>
}

impl Crossword
{
	/// Construct a crossword from a grid of cells and a set of variables. The
	/// overlaps are derived from the geometry: two variables overlap wherever
	/// they share a cell.
	///
	/// # Arguments
	///
	/// * `cells` - The grid, row by row; `true` denotes an open cell. Short
	///   rows are padded with blocked cells.
	/// * `variables` - The variables of the puzzle.
	///
	/// # Returns
	///
	/// The validated crossword.
	///
	/// # Errors
	///
	/// Any [`CrosswordError`] describing malformed input, including
	/// [`ConflictingOverlap`](CrosswordError::ConflictingOverlap) if two
	/// variables share more than one cell.
	pub fn new<I>(cells: Vec<Vec<bool>>, variables: I) -> Result<Self, CrosswordError>
		where I: IntoIterator<Item = Variable>
	{
		let variables = variables.into_iter().collect::<BTreeSet<_>>();
		let mut occupants = BTreeMap::<(usize, usize), Vec<(Variable, usize)>>::new();
		for variable in &variables
		{
			for (k, cell) in variable.cells().enumerate()
			{
				occupants.entry(cell).or_default().push((*variable, k));
			}
		}
		let mut overlaps = Vec::new();
		let mut seen = BTreeSet::new();
		for occupants in occupants.values()
		{
			for (i, &(x, ix)) in occupants.iter().enumerate()
			{
				for &(y, iy) in &occupants[i + 1 ..]
				{
					if !seen.insert((x, y))
					{
						return Err(CrosswordError::ConflictingOverlap(x, y))
					}
					overlaps.push((x, y, (ix, iy)));
				}
			}
		}
		Self::with_overlaps(cells, variables, overlaps)
	}

	/// Construct a crossword from a grid of cells, a set of variables, and an
	/// explicit list of overlaps. Every overlap is validated against the
	/// variables it references.
	///
	/// # Arguments
	///
	/// * `cells` - The grid, row by row; `true` denotes an open cell. Short
	///   rows are padded with blocked cells.
	/// * `variables` - The variables of the puzzle.
	/// * `overlaps` - The overlaps, as `(x, y, (index into x, index into y))`.
	///   Each unordered pair need only be given once.
	///
	/// # Returns
	///
	/// The validated crossword.
	///
	/// # Errors
	///
	/// Any [`CrosswordError`] describing malformed input.
	pub fn with_overlaps<I, J>(
		cells: Vec<Vec<bool>>,
		variables: I,
		overlaps: J
	) -> Result<Self, CrosswordError>
		where
			I: IntoIterator<Item = Variable>,
			J: IntoIterator<Item = (Variable, Variable, Overlap)>
	{
		let height = cells.len();
		let width = cells.iter().map(Vec::len).max().unwrap_or(0);
		let mut open = vec![false; height * width];
		for (row, line) in cells.iter().enumerate()
		{
			for (column, &cell) in line.iter().enumerate()
			{
				open[row * width + column] = cell;
			}
		}
		if !open.iter().any(|&cell| cell)
		{
			return Err(CrosswordError::EmptyLayout)
		}
		let mut crossword = Self {
			height,
			width,
			open,
			variables: BTreeSet::new(),
			overlaps: HashMap::new(),
			neighbors: BTreeMap::new()
		};
		for variable in variables
		{
			crossword.validate_variable(&variable)?;
			crossword.variables.insert(variable);
			crossword.neighbors.insert(variable, BTreeSet::new());
		}
		for (x, y, overlap) in overlaps
		{
			crossword.insert_overlap(x, y, overlap)?;
		}
		trace!(
			"built crossword: {}×{}, {} variables, {} overlaps",
			crossword.height,
			crossword.width,
			crossword.variables.len(),
			crossword.overlaps.len() / 2
		);
		Ok(crossword)
	}

	/// Parse a crossword from a textual layout. Each line is a row of the
	/// grid; [`OPEN_CELL`] denotes an open cell, and any other character
	/// denotes a blocked cell. Every maximal horizontal or vertical run of at
	/// least two open cells becomes a variable.
	///
	/// # Arguments
	///
	/// * `layout` - The layout text.
	///
	/// # Returns
	///
	/// The validated crossword.
	///
	/// # Errors
	///
	/// Any [`CrosswordError`] describing malformed input.
	pub fn from_layout(layout: &str) -> Result<Self, CrosswordError>
	{
		let mut cells = layout
			.lines()
			.map(|line| line.chars().map(|c| c == OPEN_CELL).collect::<Vec<_>>())
			.collect::<Vec<_>>();
		while cells.last().map_or(false, Vec::is_empty)
		{
			cells.pop();
		}
		let height = cells.len();
		let width = cells.iter().map(Vec::len).max().unwrap_or(0);
		let is_open = |row: usize, column: usize| {
			cells[row].get(column).copied().unwrap_or(false)
		};
		let mut variables = Vec::new();
		for row in 0 .. height
		{
			for column in 0 .. width
			{
				if !is_open(row, column)
				{
					continue
				}
				if column == 0 || !is_open(row, column - 1)
				{
					let length = (column .. width)
						.take_while(|&c| is_open(row, c))
						.count();
					if length > 1
					{
						variables.push(
							Variable::new(row, column, Direction::Across, length)
						);
					}
				}
				if row == 0 || !is_open(row - 1, column)
				{
					let length = (row .. height)
						.take_while(|&r| is_open(r, column))
						.count();
					if length > 1
					{
						variables.push(
							Variable::new(row, column, Direction::Down, length)
						);
					}
				}
			}
		}
		Self::new(cells, variables)
	}

	/// Read a crossword layout from the given file. See
	/// [`from_layout`](Self::from_layout) for the format.
	///
	/// # Arguments
	///
	/// * `path` - The layout file.
	///
	/// # Returns
	///
	/// The validated crossword.
	///
	/// # Errors
	///
	/// * [`CrosswordError::Io`] if the file cannot be read.
	/// * Any other [`CrosswordError`] describing malformed input.
	pub fn read_from_file<T: AsRef<Path>>(path: T) -> Result<Self, CrosswordError>
	{
		let layout = fs::read_to_string(path)?;
		Self::from_layout(&layout)
	}

	/// Get the height of the grid.
	///
	/// # Returns
	///
	/// The number of rows.
	#[inline]
	#[must_use]
	pub fn height(&self) -> usize { self.height }

	/// Get the width of the grid. Short rows in the layout are padded with
	/// blocked cells to this width.
	///
	/// # Returns
	///
	/// The number of columns.
	#[inline]
	#[must_use]
	pub fn width(&self) -> usize { self.width }

	/// Check whether the specified cell is open. Cells outside the grid are
	/// blocked.
	#[inline]
	#[must_use]
	pub fn is_open(&self, row: usize, column: usize) -> bool
	{
		row < self.height
			&& column < self.width
			&& self.open[row * self.width + column]
	}

	/// Get every variable of the puzzle, in variable order.
	#[inline]
	#[must_use]
	pub fn variables(&self) -> &BTreeSet<Variable>
	{
		&self.variables
	}

	/// Get the overlap between two variables.
	///
	/// # Arguments
	///
	/// * `x` - The first variable.
	/// * `y` - The second variable.
	///
	/// # Returns
	///
	/// `(index into x, index into y)`, or `None` if the variables do not
	/// intersect.
	#[inline]
	#[must_use]
	pub fn overlap(&self, x: &Variable, y: &Variable) -> Option<Overlap>
	{
		self.overlaps.get(&(*x, *y)).copied()
	}

	/// Get the neighbors of a variable, i.e., every other variable that
	/// overlaps it. Unknown variables have no neighbors.
	#[inline]
	#[must_use]
	pub fn neighbors(&self, x: &Variable) -> &BTreeSet<Variable>
	{
		self.neighbors.get(x).unwrap_or(&NO_NEIGHBORS)
	}

	/// Get the degree of a variable, i.e., its number of neighbors.
	#[inline]
	#[must_use]
	pub fn degree(&self, x: &Variable) -> usize
	{
		self.neighbors(x).len()
	}

	/// Ensure that the variable is nonempty, representable, and lies entirely
	/// on open cells.
	fn validate_variable(&self, variable: &Variable) -> Result<(), CrosswordError>
	{
		if variable.length == 0
		{
			return Err(CrosswordError::EmptyVariable(*variable))
		}
		if variable.length > MAX_WORD_LENGTH
		{
			return Err(CrosswordError::VariableTooLong(*variable))
		}
		if !variable.cells().all(|(row, column)| self.is_open(row, column))
		{
			return Err(CrosswordError::VariableOutOfGrid(*variable))
		}
		Ok(())
	}

	/// Record an overlap for both orderings of the pair, after validating it.
	fn insert_overlap(
		&mut self,
		x: Variable,
		y: Variable,
		(ix, iy): Overlap
	) -> Result<(), CrosswordError>
	{
		for v in [&x, &y]
		{
			if !self.variables.contains(v)
			{
				return Err(CrosswordError::UnknownVariable(*v))
			}
		}
		if x == y
		{
			return Err(CrosswordError::SelfOverlap(x))
		}
		for (variable, index) in [(x, ix), (y, iy)]
		{
			if index >= variable.length
			{
				return Err(CrosswordError::OverlapOutOfBounds { variable, index })
			}
		}
		if x.cell(ix) != y.cell(iy)
		{
			return Err(CrosswordError::ConflictingOverlap(x, y))
		}
		for (key, overlap) in [((x, y), (ix, iy)), ((y, x), (iy, ix))]
		{
			match self.overlaps.insert(key, overlap)
			{
				Some(previous) if previous != overlap =>
					return Err(CrosswordError::ConflictingOverlap(x, y)),
				_ => {}
			}
		}
		self.neighbors.entry(x).or_default().insert(y);
		self.neighbors.entry(y).or_default().insert(x);
		Ok(())
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////
