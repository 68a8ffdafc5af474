use getset::CopyGetters;
use itertools::Itertools;

use super::{error::RegisterError, field::FieldWrite, file::RegisterFile};

/// Field writes of a [`Transaction`] merged into a single word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct StagedWord {
    /// Address of the word.
    address: u32,
    /// Bits touched by the staged fields.
    mask: u32,
    /// New value of the touched bits.
    value: u32,
}

impl StagedWord {
    /// Replaces the touched bits of `word`.
    #[must_use]
    pub const fn apply(&self, word: u32) -> u32 {
        (word & !self.mask) | (self.value & self.mask)
    }
}

/// A set of field writes applied to the device all together.
///
/// Writes are staged first and committed at once. Fields sharing a word are merged so that each
/// word is written exactly once, and if any write fails the touched words are restored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Transaction {
    writes: Vec<FieldWrite>,
}

impl Transaction {
    /// Creates an empty [`Transaction`].
    #[must_use]
    pub const fn new() -> Self {
        Self { writes: Vec::new() }
    }

    /// Stages a field write. A later write to the same bits wins.
    pub fn push(&mut self, write: FieldWrite) {
        self.writes.push(write);
    }

    /// Staged field writes in staging order.
    #[must_use]
    pub fn writes(&self) -> &[FieldWrite] {
        &self.writes
    }

    /// Number of staged field writes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.writes.len()
    }

    /// Whether nothing is staged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    /// Merges the staged writes per word, in order of first touch.
    #[must_use]
    pub fn words(&self) -> Vec<StagedWord> {
        self.writes.iter().fold(Vec::new(), |mut words, w| {
            match words.iter_mut().find(|s| s.address == w.address()) {
                Some(s) => {
                    s.value = w.apply(s.value);
                    s.mask |= w.mask();
                }
                None => words.push(StagedWord {
                    address: w.address(),
                    mask: w.mask(),
                    value: w.value() & w.mask(),
                }),
            }
            words
        })
    }

    /// Writes all staged fields to `registers`.
    ///
    /// Each touched word is read once and written once. On failure, the words written so far are
    /// restored to their previous contents and the error of the failed write is returned.
    /// Returns the number of words written.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn commit<R: RegisterFile + ?Sized>(&self, registers: &mut R) -> Result<usize, RegisterError> {
        let words = self.words();
        let previous = words
            .iter()
            .map(|w| registers.read(w.address))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::trace!(
            "Commit: {}",
            words
                .iter()
                .zip(previous.iter())
                .format_with(", ", |(w, &p), f| f(&format_args!(
                    "[{:#06X}] {:#010X} -> {:#010X}",
                    w.address,
                    p,
                    w.apply(p)
                )))
        );

        let failed = words
            .iter()
            .zip(previous.iter())
            .enumerate()
            .find_map(|(i, (w, &p))| registers.write(w.address, w.apply(p)).err().map(|e| (i, e)));
        if let Some((i, e)) = failed {
            tracing::warn!(
                "Write to {:#06X} failed ({}), restoring {} words",
                words[i].address,
                e,
                i + 1
            );
            words[..=i]
                .iter()
                .zip(previous.iter())
                .rev()
                .for_each(|(w, &p)| {
                    if let Err(re) = registers.write(w.address, p) {
                        tracing::error!("Failed to restore {:#06X}: {}", w.address, re);
                    }
                });
            return Err(e);
        }

        tracing::debug!("Committed {} words", words.len());
        Ok(words.len())
    }
}

impl Extend<FieldWrite> for Transaction {
    fn extend<T: IntoIterator<Item = FieldWrite>>(&mut self, iter: T) {
        self.writes.extend(iter);
    }
}

impl FromIterator<FieldWrite> for Transaction {
    fn from_iter<T: IntoIterator<Item = FieldWrite>>(iter: T) -> Self {
        Self {
            writes: iter.into_iter().collect(),
        }
    }
}
