//! # Vocabulary
//!
//! Herein is support for vocabulary construction and caching. Every domain
//! starts out as a copy of the [`Vocabulary`], which is an ordered set of
//! upper-case words.

use std::{
	collections::BTreeSet,
	fs::File,
	io::{self, BufRead, BufReader, ErrorKind, Read, Write},
	path::Path
};

use fixedstr::str32;
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::{crossword::MAX_WORD_LENGTH, error::CrosswordError};

/// A candidate word. Words are short, so they are stored inline and copied
/// freely.
pub type Word = str32;

/// Get the letter at the given position of a word. Words are ASCII, so
/// letters are bytes.
///
/// # Arguments
///
/// * `word` - The word.
/// * `index` - The position of the letter.
///
/// # Returns
///
/// The letter, or `None` if the word is too short.
#[inline]
#[must_use]
pub fn letter_at(word: &Word, index: usize) -> Option<u8>
{
	word.as_str().as_bytes().get(index).copied()
}

/// Normalize a raw vocabulary entry: trim it and upper-case it.
///
/// # Arguments
///
/// * `entry` - The raw entry.
///
/// # Returns
///
/// The normalized word, or `None` if the entry is blank.
///
/// # Errors
///
/// [`CrosswordError::InvalidWord`] if the entry contains anything other than
/// printable ASCII, contains whitespace, or is longer than
/// [`MAX_WORD_LENGTH`].
fn normalize(entry: &str) -> Result<Option<String>, CrosswordError>
{
	let word = entry.trim();
	if word.is_empty()
	{
		return Ok(None)
	}
	if !word.chars().all(|c| c.is_ascii_graphic())
	{
		return Err(CrosswordError::InvalidWord {
			word: word.to_string(),
			reason: "not printable ASCII"
		})
	}
	if word.len() > MAX_WORD_LENGTH
	{
		return Err(CrosswordError::InvalidWord {
			word: word.to_string(),
			reason: "too long"
		})
	}
	Ok(Some(word.to_ascii_uppercase()))
}

////////////////////////////////////////////////////////////////////////////////
//                                Definitions.                                //
////////////////////////////////////////////////////////////////////////////////

/// A vocabulary is an ordered set of words. The ordering is lexicographic,
/// which fixes the iteration order of every domain derived from it. Every
/// word is normalized, so conversion to a [`Word`] never truncates.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[must_use]
pub struct Vocabulary(BTreeSet<String>);

/// The revision of the binary cache layout. Caches of any other revision are
/// treated as invalid data.
const CACHE_FORMAT: u32 = 1;

/// The binary cache, as written.
#[derive(Serialize)]
struct CacheRef<'a>
{
	/// The cache layout revision, always [`CACHE_FORMAT`].
	format: u32,

	/// The longest word the writer accepted.
	max_word_length: usize,

	/// The words, in lexicographic order.
	words: &'a BTreeSet<String>
}

/// The binary cache, as read. The words are untrusted until they pass through
/// [`Vocabulary::populate`].
#[derive(Deserialize)]
struct Cache
{
	/// The cache layout revision.
	format: u32,

	/// The longest word the writer accepted.
	max_word_length: usize,

	/// The words.
	words: Vec<String>
}

impl Vocabulary
{
	/// Construct an empty vocabulary. Same as [`Default::default`].
	#[inline]
	pub fn new() -> Self { Self(Default::default()) }

	/// Check if the vocabulary is empty.
	///
	/// # Returns
	///
	/// `true` if the vocabulary has no words, `false` otherwise.
	#[inline]
	#[must_use]
	pub fn is_empty(&self) -> bool { self.0.is_empty() }

	/// Get the number of words in the vocabulary.
	///
	/// # Returns
	///
	/// The number of distinct words.
	#[inline]
	#[must_use]
	pub fn len(&self) -> usize { self.0.len() }

	/// Check if the vocabulary contains the given word. The check is
	/// case-insensitive.
	#[inline]
	#[must_use]
	pub fn contains(&self, word: &str) -> bool
	{
		self.0.contains(&word.trim().to_ascii_uppercase())
	}

	/// Get an iterator over the words of the vocabulary, in lexicographic
	/// order.
	#[inline]
	pub fn words(&self) -> impl Iterator<Item = Word> + '_
	{
		self.0.iter().map(|word| Word::from(word.as_str()))
	}

	/// Populate the vocabulary with the given words. Each entry is trimmed
	/// and upper-cased; blank entries are skipped.
	///
	/// # Arguments
	///
	/// * `words` - The intended content of the vocabulary.
	///
	/// # Errors
	///
	/// [`CrosswordError::InvalidWord`] if an entry contains anything other
	/// than printable ASCII, contains whitespace, or is longer than
	/// [`MAX_WORD_LENGTH`]. Entries before the offending one remain in the
	/// vocabulary.
	pub fn populate<T: AsRef<str>>(&mut self, words: &[T]) -> Result<(), CrosswordError>
	{
		for word in words
		{
			if let Some(word) = normalize(word.as_ref())?
			{
				self.0.insert(word);
			}
		}
		Ok(())
	}

	/// Open a vocabulary with the given name. Only the specified directory will
	/// be searched. `name` denotes the vocabulary file, sans the extension. If
	/// a binary cache (`<name>.vocab`) exists _and_ is newer than the text file
	/// (`<name>.txt`), the cache is read. Otherwise, or if the cache holds
	/// invalid data, the text file is read and the cache is rewritten.
	///
	/// # Arguments
	///
	/// * `dir` - The directory to search.
	/// * `name` - The name of the vocabulary file.
	///
	/// # Returns
	///
	/// A vocabulary containing the words from the file.
	///
	/// # Errors
	///
	/// * If the file cannot be opened or read, an error is returned.
	/// * If the text file contains an invalid word, an
	///   [`ErrorKind::InvalidData`] is returned.
	pub fn open<T: AsRef<Path>>(dir: T, name: &str) -> Result<Self, io::Error>
	{
		let cache_path = dir.as_ref().join(format!("{}.vocab", name));
		let text_path = dir.as_ref().join(format!("{}.txt", name));
		if is_newer(&cache_path, &text_path)
		{
			match Self::deserialize_from_file(&cache_path)
			{
				Ok(vocabulary) =>
				{
					trace!("Read vocabulary cache: {}", cache_path.display());
					return Ok(vocabulary)
				},
				Err(e) if e.kind() == ErrorKind::InvalidData => warn!(
					"Ignoring invalid vocabulary cache: {}: {}",
					cache_path.display(),
					e
				),
				Err(e) => return Err(e)
			}
		}
		let vocabulary = Self::read_from_file(&text_path)?;
		debug!(
			"Read {} words from {}",
			vocabulary.len(),
			text_path.display()
		);
		if let Err(e) = vocabulary.serialize_to_file(&cache_path)
		{
			// The cache only saves time, so the vocabulary is still usable.
			warn!(
				"Failed to write vocabulary cache: {}: {}",
				cache_path.display(),
				e
			);
		}
		Ok(vocabulary)
	}

	/// Construct a vocabulary from the contents of the given file. Each line
	/// in the file is considered a single word.
	///
	/// # Arguments
	///
	/// * `path` - The target file.
	///
	/// # Returns
	///
	/// A vocabulary containing the words from the file.
	///
	/// # Errors
	///
	/// * If the file cannot be opened or read, an error is returned.
	/// * If a line is not a valid word, an [`ErrorKind::InvalidData`] wrapping
	///   the [`CrosswordError`] is returned.
	pub fn read_from_file<T: AsRef<Path>>(path: T) -> Result<Self, io::Error>
	{
		let file = File::open(path)?;
		let reader = BufReader::new(file);
		let words = reader.lines().collect::<Result<Vec<_>, _>>()?;
		let mut vocabulary = Self::new();
		vocabulary.populate(&words)
			.map_err(|e| io::Error::new(ErrorKind::InvalidData, e))?;
		Ok(vocabulary)
	}

	/// Read a vocabulary from a binary cache written by
	/// [`serialize_to_file`](Self::serialize_to_file). The cache is not
	/// trusted: every word is validated just as the text file's would be.
	///
	/// # Arguments
	///
	/// * `path` - The cache file.
	///
	/// # Returns
	///
	/// A vocabulary containing the cached words.
	///
	/// # Errors
	///
	/// * If the file cannot be opened or read, an error is returned.
	/// * If the file is not a cache of the current layout, or holds a word
	///   that is not valid, an [`ErrorKind::InvalidData`] is returned.
	pub fn deserialize_from_file<T: AsRef<Path>>(
		path: T
	) -> Result<Self, io::Error>
	{
		let mut content = Vec::new();
		BufReader::new(File::open(path)?).read_to_end(&mut content)?;
		let cache: Cache = bincode::deserialize(&content)
			.map_err(|e| io::Error::new(ErrorKind::InvalidData, e))?;
		if cache.format != CACHE_FORMAT
			|| cache.max_word_length != MAX_WORD_LENGTH
		{
			return Err(io::Error::new(
				ErrorKind::InvalidData,
				format!(
					"unsupported vocabulary cache: format {}, maximum length {}",
					cache.format,
					cache.max_word_length
				)
			))
		}
		let mut vocabulary = Self::new();
		vocabulary.populate(&cache.words)
			.map_err(|e| io::Error::new(ErrorKind::InvalidData, e))?;
		Ok(vocabulary)
	}

	/// Write the vocabulary to a binary cache, in [`bincode`](bincode) format.
	/// The cache records its layout revision and [`MAX_WORD_LENGTH`], so a
	/// cache written under different rules is rejected when read.
	///
	/// # Arguments
	///
	/// * `path` - The cache file.
	///
	/// # Errors
	///
	/// * If the file cannot be created or written, an error is returned.
	/// * If serialization fails, an [`ErrorKind::InvalidData`] is returned.
	pub fn serialize_to_file<T: AsRef<Path>>(
		&self,
		path: T
	) -> Result<(), io::Error>
	{
		let cache = CacheRef {
			format: CACHE_FORMAT,
			max_word_length: MAX_WORD_LENGTH,
			words: &self.0
		};
		let content = bincode::serialize(&cache)
			.map_err(|e| io::Error::new(ErrorKind::InvalidData, e))?;
		File::create(path)?.write_all(&content)?;
		Ok(())
	}
}

/// Check whether `path` was modified more recently than `other`. If either
/// modification time is unavailable, the answer is `false`, which makes the
/// text file authoritative.
fn is_newer(path: &Path, other: &Path) -> bool
{
	let modified =
		|path: &Path| path.metadata().and_then(|m| m.modified()).ok();
	match (modified(path), modified(other))
	{
		(Some(time), Some(other_time)) => time > other_time,
		_ => false
	}
}

impl<T: AsRef<str>> FromIterator<T> for Vocabulary
{
	/// Collect words into a vocabulary. Entries that are not valid words are
	/// logged and left out; use [`populate`](Vocabulary::populate) to treat
	/// them as errors instead.
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self
	{
		Self(
			iter.into_iter()
				.filter_map(|entry| match normalize(entry.as_ref())
				{
					Ok(word) => word,
					Err(e) =>
					{
						warn!("Skipping vocabulary entry: {}", e);
						None
					}
				})
				.collect()
		)
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////
