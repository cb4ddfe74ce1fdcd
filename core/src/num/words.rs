use std::fmt;
use std::ops::{Index, IndexMut};
use std::rc::Rc;
use std::slice;

/// Sequences up to this many words are stored without touching the heap.
pub const INLINE_WORDS: usize = 8;

#[derive(Clone)]
enum Repr {
	// len <= INLINE_WORDS
	Inline {
		len: usize,
		words: [u32; INLINE_WORDS],
	},
	// len > INLINE_WORDS, possibly aliased by clones
	Shared(Rc<Vec<u32>>),
}

impl Repr {
	fn inline_from(src: &[u32]) -> Self {
		let mut words = [0; INLINE_WORDS];
		words[..src.len()].copy_from_slice(src);
		Self::Inline {
			len: src.len(),
			words,
		}
	}
}

/// Growable little-endian sequence of 32-bit words.
///
/// Short sequences live inline. Longer ones are kept in a reference-counted
/// heap buffer: cloning the store only bumps the count, and the first write
/// through any of the aliases copies the buffer privately.
#[derive(Clone)]
pub struct WordStore {
	repr: Repr,
}

impl WordStore {
	pub fn new() -> Self {
		Self {
			repr: Repr::inline_from(&[]),
		}
	}

	pub fn from_slice(src: &[u32]) -> Self {
		if src.len() <= INLINE_WORDS {
			Self {
				repr: Repr::inline_from(src),
			}
		} else {
			Self {
				repr: Repr::Shared(Rc::new(src.to_vec())),
			}
		}
	}

	pub fn len(&self) -> usize {
		match &self.repr {
			Repr::Inline { len, .. } => *len,
			Repr::Shared(v) => v.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// True while no heap buffer is in use.
	pub fn is_inline(&self) -> bool {
		matches!(self.repr, Repr::Inline { .. })
	}

	/// True if the heap buffer is currently aliased by another store.
	pub fn is_shared(&self) -> bool {
		match &self.repr {
			Repr::Inline { .. } => false,
			Repr::Shared(v) => Rc::strong_count(v) > 1,
		}
	}

	pub fn as_slice(&self) -> &[u32] {
		match &self.repr {
			Repr::Inline { len, words } => &words[..*len],
			Repr::Shared(v) => v.as_slice(),
		}
	}

	/// Mutable view of the words. Unshares a heap buffer first.
	pub fn as_mut_slice(&mut self) -> &mut [u32] {
		match &mut self.repr {
			Repr::Inline { len, words } => &mut words[..*len],
			Repr::Shared(v) => Rc::make_mut(v).as_mut_slice(),
		}
	}

	pub fn iter(&self) -> slice::Iter<'_, u32> {
		self.as_slice().iter()
	}

	#[track_caller]
	pub fn get(&self, idx: usize) -> u32 {
		let len = self.len();
		assert!(idx < len, "word index {idx} out of range for length {len}");
		self.as_slice()[idx]
	}

	#[track_caller]
	pub fn set(&mut self, idx: usize, value: u32) {
		let len = self.len();
		assert!(idx < len, "word index {idx} out of range for length {len}");
		self.as_mut_slice()[idx] = value;
	}

	pub fn last(&self) -> Option<u32> {
		self.as_slice().last().copied()
	}

	pub fn push(&mut self, value: u32) {
		match &mut self.repr {
			Repr::Inline { len, words } => {
				if *len < INLINE_WORDS {
					words[*len] = value;
					*len += 1;
				} else {
					let mut v = Vec::with_capacity(INLINE_WORDS * 2);
					v.extend_from_slice(&words[..]);
					v.push(value);
					self.repr = Repr::Shared(Rc::new(v));
				}
			}
			Repr::Shared(v) => Rc::make_mut(v).push(value),
		}
	}

	pub fn pop(&mut self) -> Option<u32> {
		match &mut self.repr {
			Repr::Inline { len, words } => {
				if *len == 0 {
					return None;
				}
				*len -= 1;
				Some(words[*len])
			}
			Repr::Shared(v) => {
				let new_len = v.len() - 1;
				let popped = v[new_len];
				if new_len <= INLINE_WORDS {
					let demoted = Repr::inline_from(&v[..new_len]);
					self.repr = demoted;
				} else {
					Rc::make_mut(v).pop();
				}
				Some(popped)
			}
		}
	}

	/// Grows with zero words or shrinks to `new_len`.
	pub fn resize(&mut self, new_len: usize) {
		self.resize_with_fill(new_len, 0);
	}

	/// Grows with copies of `fill` or shrinks to `new_len`.
	pub fn resize_with_fill(&mut self, new_len: usize, fill: u32) {
		if new_len <= INLINE_WORDS {
			match &mut self.repr {
				Repr::Inline { len, words } => {
					if new_len > *len {
						words[*len..new_len].fill(fill);
					}
					*len = new_len;
				}
				Repr::Shared(v) => {
					// a shared buffer is always longer than INLINE_WORDS
					let demoted = Repr::inline_from(&v[..new_len]);
					self.repr = demoted;
				}
			}
		} else {
			match &mut self.repr {
				Repr::Inline { len, words } => {
					let mut v = Vec::with_capacity(new_len);
					v.extend_from_slice(&words[..*len]);
					v.resize(new_len, fill);
					self.repr = Repr::Shared(Rc::new(v));
				}
				Repr::Shared(v) => Rc::make_mut(v).resize(new_len, fill),
			}
		}
	}
}

impl Default for WordStore {
	fn default() -> Self {
		Self::new()
	}
}

impl Index<usize> for WordStore {
	type Output = u32;

	#[track_caller]
	fn index(&self, idx: usize) -> &u32 {
		let len = self.len();
		assert!(idx < len, "word index {idx} out of range for length {len}");
		&self.as_slice()[idx]
	}
}

impl IndexMut<usize> for WordStore {
	#[track_caller]
	fn index_mut(&mut self, idx: usize) -> &mut u32 {
		let len = self.len();
		assert!(idx < len, "word index {idx} out of range for length {len}");
		&mut self.as_mut_slice()[idx]
	}
}

impl PartialEq for WordStore {
	fn eq(&self, other: &Self) -> bool {
		self.as_slice() == other.as_slice()
	}
}

impl Eq for WordStore {}

impl fmt::Debug for WordStore {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.iter()).finish()
	}
}
