use anyhow::{Context, Result};
use rand::Rng;
use std::marker::PhantomData;

/// Defines the core `Transform` trait for composable augmentation pipelines.
///
/// The `Transform<I, O>` trait represents a stateless operation converting
/// an input of type `I` to an output of type `O`. Randomized transforms draw
/// from the `rng` handle passed in by the caller; they hold no random state
/// of their own, so a seeded `rng` makes the whole pipeline reproducible.
/// Deterministic transforms simply ignore it.
///
/// Multiple `Transform` steps can be chained together via `.then(...)`.
///
/// Note: `then()` works only when:
/// 1. **Types align**: `self: Transform<I, O>`, `next: Transform<O, M>`
/// 2. **Owned**: `Self::Sized` (no trait objects, must be concrete)
pub trait Transform<I, O>: Send + Sync {
    /// Applies the transformation to the input
    fn apply<R: Rng + ?Sized>(&self, input: I, rng: &mut R) -> Result<O>;

    #[inline]
    fn then<T, M>(self, next: T) -> Chain<Self, T, O>
    where
        Self: Sized,
        T: Transform<O, M>,
    {
        Chain {
            first: self,
            second: next,
            _marker: PhantomData,
        }
    }
}

/// A chain of two transforms (`A` -> `B`)
/// - `PhantomData<M>` enforces intermediate type alignment.
#[derive(Debug)]
pub struct Chain<A, B, M> {
    first: A,
    second: B,
    _marker: PhantomData<fn() -> M>,
}

impl<A, B, M> Chain<A, B, M> {
    /// Creates a new transform chain.
    /// Use [`Transform::then`] for better ergonomics. `Chain::new` is
    /// useful when the pipeline is assembled from a configuration.
    pub fn new(first: A, second: B) -> Self {
        Self {
            first,
            second,
            _marker: PhantomData,
        }
    }
}

impl<I, M, O, A, B> Transform<I, O> for Chain<A, B, M>
where
    A: Transform<I, M>,
    B: Transform<M, O>,
{
    fn apply<R: Rng + ?Sized>(&self, input: I, rng: &mut R) -> Result<O> {
        let mid = self.first.apply(input, rng)?;
        self.second.apply(mid, rng).with_context(|| {
            format!(
                "Transform chain failed: {} → {} → {}",
                std::any::type_name::<A>(),
                std::any::type_name::<B>(),
                std::any::type_name::<O>()
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct AddNoise;
    impl Transform<f64, f64> for AddNoise {
        fn apply<R: Rng + ?Sized>(&self, input: f64, rng: &mut R) -> Result<f64> {
            Ok(input + rng.random_range(0.0..1.0))
        }
    }

    struct Double;
    impl Transform<f64, f64> for Double {
        fn apply<R: Rng + ?Sized>(&self, input: f64, _rng: &mut R) -> Result<f64> {
            Ok(input * 2.0)
        }
    }

    #[test]
    fn test_pipeline_construction_using_then() -> Result<()> {
        let pipeline = Double.then(Double);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(pipeline.apply(1.5, &mut rng)?, 6.0);
        Ok(())
    }

    #[test]
    fn test_pipeline_is_reproducible_under_seed() -> Result<()> {
        let chain = Chain::new(AddNoise, Double);
        let a = chain.apply(0.0, &mut StdRng::seed_from_u64(7))?;
        let b = chain.apply(0.0, &mut StdRng::seed_from_u64(7))?;
        assert_eq!(a, b);
        assert!((0.0..2.0).contains(&a));
        Ok(())
    }

    #[test]
    fn test_pipeline_chain_error_context() {
        struct Fail;
        impl Transform<f64, f64> for Fail {
            fn apply<R: Rng + ?Sized>(&self, _: f64, _rng: &mut R) -> Result<f64> {
                Err(anyhow!("Test error"))
            }
        }

        let chain = Chain::new(Double, Fail);
        let err = chain
            .apply(1.0, &mut StdRng::seed_from_u64(0))
            .unwrap_err();
        let msg = err.to_string();

        assert!(msg.contains("Transform chain failed"));
        assert!(msg.contains("Double"));
        assert!(msg.contains("Fail"));
    }
}
