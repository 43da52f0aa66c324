//! Shareable pure functions.

use std::fmt;
use std::sync::Arc;

/// A pure function `I -> O` behind a shared pointer.
///
/// Cloning is cheap and the function can be evaluated from several threads.
pub struct Procedural<I, O> {
    func: Arc<dyn Fn(I) -> O + Send + Sync>,
}

impl<I, O> Clone for Procedural<I, O> {
    fn clone(&self) -> Self {
        Self {
            func: Arc::clone(&self.func),
        }
    }
}

impl<I, O> fmt::Debug for Procedural<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Procedural(..)")
    }
}

impl<I: 'static, O: 'static> Procedural<I, O> {
    /// Wrap a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(I) -> O + Send + Sync + 'static,
    {
        Self { func: Arc::new(f) }
    }

    /// Evaluate.
    #[inline]
    pub fn eval(&self, x: I) -> O {
        (self.func)(x)
    }

    /// Post-compose: `x -> g(self(x))`.
    pub fn map<P: 'static, G>(&self, g: G) -> Procedural<I, P>
    where
        G: Fn(O) -> P + Send + Sync + 'static,
    {
        let f = Arc::clone(&self.func);
        Procedural::new(move |x| g(f(x)))
    }

    /// Pre-compose: `x -> self(g(x))`.
    pub fn remap<J: 'static, G>(&self, g: G) -> Procedural<J, O>
    where
        G: Fn(J) -> I + Send + Sync + 'static,
    {
        let f = Arc::clone(&self.func);
        Procedural::new(move |x| f(g(x)))
    }

    /// Combine with another function of the same input: `x -> g(self(x), other(x))`.
    pub fn zip<P: 'static, Q: 'static, G>(&self, other: &Procedural<I, P>, g: G) -> Procedural<I, Q>
    where
        I: Clone,
        G: Fn(O, P) -> Q + Send + Sync + 'static,
    {
        let f = Arc::clone(&self.func);
        let h = Arc::clone(&other.func);
        Procedural::new(move |x: I| g(f(x.clone()), h(x)))
    }
}
