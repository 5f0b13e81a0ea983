//! # Crossword Solver
//!
//! This program fills a crossword grid with words from a vocabulary. The grid
//! is given as a layout file, one line per row, in which `_` denotes an open
//! cell and any other character a blocked cell. The vocabulary is a text file
//! with one word per line; a binary copy is cached alongside it to speed up
//! later runs.

use std::{
	error::Error,
	path::PathBuf,
	process::ExitCode,
	rc::Rc,
	time::{Duration, Instant}
};

use clap::{Parser, Subcommand};
use log::{debug, info, trace, warn};

use crossword_solver::{
	crossword::Crossword,
	propagation::Discipline,
	render::Rendering,
	solver::{Solver, SolverConfig},
	vocabulary::Vocabulary
};

////////////////////////////////////////////////////////////////////////////////
//                           Command line options.                            //
////////////////////////////////////////////////////////////////////////////////

/// CLI for filling crossword grids.
#[derive(Clone, Debug, Parser)]
#[command(version = "1.0")]
struct Opts
{
	/// The path to the directory containing the vocabulary files.
	#[arg(short = 'd', long, default_value = "data")]
	directory: PathBuf,

	/// The name of the vocabulary. This is the name shared by the text and
	/// binary files, sans the extension.
	#[arg(short = 'n', long, default_value = "words0")]
	vocabulary: String,

	#[command(subcommand)]
	command: Command
}

/// The subcommands of the CLI.
#[derive(Clone, Debug, Subcommand)]
enum Command
{
	/// Just generate the binary vocabulary and exit.
	Generate,

	/// Fill the grid described by a layout file and print it to standard
	/// output.
	Solve {
		/// The layout file.
		structure: PathBuf,

		/// Process the arc consistency worklist first in, first out, rather
		/// than last in, first out.
		#[arg(long)]
		queue: bool,

		/// Re-establish arc consistency after every trial assignment.
		#[arg(long)]
		mac: bool,

		/// Give up after this many seconds.
		#[arg(short = 't', long)]
		timeout: Option<u64>,

		/// Suppress emission of the filled grid to standard output.
		#[arg(short = 'q', long)]
		quiet: bool
	}
}

/// How long the solver runs between checks of the timeout.
const QUANTUM: Duration = Duration::from_millis(50);

////////////////////////////////////////////////////////////////////////////////
//                               Main program.                                //
////////////////////////////////////////////////////////////////////////////////

/// Parse the command line options and execute the appropriate subcommand.
/// Malformed input and I/O failures are reported on standard error.
fn main() -> ExitCode
{
	env_logger::init();
	match try_main()
	{
		Ok(code) => code,
		Err(e) =>
		{
			eprintln!("Error: {}", e);
			ExitCode::FAILURE
		}
	}
}

/// Execute the requested subcommand.
///
/// # Returns
///
/// The exit code: success if the grid was filled (or the vocabulary
/// generated), failure if the grid has no solution or the timeout expired.
///
/// # Errors
///
/// Any error that occurs while reading the vocabulary or the layout.
fn try_main() -> Result<ExitCode, Box<dyn Error>>
{
	let opts = Opts::parse();
	debug!("Command line options: {:?}", opts);

	let vocabulary = Vocabulary::open(&opts.directory, &opts.vocabulary)?;
	info!("Vocabulary has {} words", vocabulary.len());

	match opts.command
	{
		Command::Generate =>
		{
			trace!("Exiting after generating binary vocabulary");
			Ok(ExitCode::SUCCESS)
		},
		Command::Solve { structure, queue, mac, timeout, quiet } =>
		{
			let crossword = Rc::new(Crossword::read_from_file(&structure)?);
			info!(
				"Crossword has {} variables",
				crossword.variables().len()
			);
			let config = SolverConfig {
				discipline:
					if queue { Discipline::Queue } else { Discipline::Stack },
				maintain_arc_consistency: mac
			};
			let deadline = timeout
				.map(|seconds| Instant::now() + Duration::from_secs(seconds));
			let mut solver = Solver::new(crossword, &vocabulary, config);
			while !solver.is_finished()
			{
				solver = solver.solve(QUANTUM);
				trace!("progress: {:?}", solver.statistics());
				if !solver.is_finished()
					&& deadline.map_or(false, |deadline| Instant::now() >= deadline)
				{
					warn!("Gave up after {:?}", solver.statistics());
					println!("Timed out.");
					return Ok(ExitCode::FAILURE)
				}
			}
			info!("Finished: {:?}", solver.statistics());
			match solver.solution()
			{
				Some(solution) =>
				{
					if !quiet
					{
						print!("{}", Rendering::new(solver.crossword(), solution));
					}
					Ok(ExitCode::SUCCESS)
				},
				None =>
				{
					println!("No solution.");
					Ok(ExitCode::FAILURE)
				}
			}
		}
	}
}
