//! src/generator/iterator.rs
//!
//! `BatchIter`: the lazy, unbounded batch sequence returned by
//! `BatchGenerator::iter()`.
//!
//! - Each `next()` builds exactly one batch, synchronously.
//! - The sequence never ends on its own; stop pulling to stop it.
//! - If a batch fails, that error is yielded once and the sequence ends.

use crate::minibatch::MiniBatch;
use anyhow::Result;
use log::{debug, warn};
use rand::Rng;
use std::iter::FusedIterator;

use super::loader::BatchGenerator;

/// Iterator over batches of frames and steering labels.
///
/// Owns its RNG; borrows the generator. Several iterators may be created
/// from one generator, each with independent random state.
pub struct BatchIter<'a, R> {
    generator: &'a BatchGenerator,
    rng: R,
    batches_emitted: usize,
    failed: bool,
}

impl<'a, R: Rng> BatchIter<'a, R> {
    pub(crate) fn new(generator: &'a BatchGenerator, rng: R) -> Self {
        Self {
            generator,
            rng,
            batches_emitted: 0,
            failed: false,
        }
    }

    /// Number of batches successfully produced so far.
    pub fn batches_emitted(&self) -> usize {
        self.batches_emitted
    }
}

impl<R: Rng> Iterator for BatchIter<'_, R> {
    type Item = Result<MiniBatch>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        match self.generator.next_batch(&mut self.rng) {
            Ok(batch) => {
                self.batches_emitted += 1;
                debug!(
                    "Emitted batch {} ({} samples)",
                    self.batches_emitted,
                    batch.batch_size()
                );
                Some(Ok(batch))
            }
            Err(e) => {
                warn!(
                    "Batch generation stopped after {} batches: {:#}",
                    self.batches_emitted, e
                );
                self.failed = true;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            (0, Some(0))
        } else {
            (usize::MAX, None)
        }
    }
}

impl<R: Rng> FusedIterator for BatchIter<'_, R> {}
