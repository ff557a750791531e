//! Optional callbacks handed to a control by the panel that owns it.

use std::fmt;
use std::sync::Arc;

/// A callback that may be absent.
///
/// `Callback::noop()` (also the `Default`) swallows every emission, so the
/// control never has to check whether the panel registered anything.
pub struct Callback<A> {
    inner: Option<Arc<dyn Fn(A) + Send + Sync>>,
}

impl<A> Callback<A> {
    pub fn noop() -> Self {
        Self { inner: None }
    }

    pub fn from_fn(f: impl Fn(A) + Send + Sync + 'static) -> Self {
        Self {
            inner: Some(Arc::new(f)),
        }
    }

    pub fn emit(&self, value: A) {
        if let Some(f) = &self.inner {
            f(value);
        }
    }

    pub fn is_noop(&self) -> bool {
        self.inner.is_none()
    }
}

impl<A> Default for Callback<A> {
    fn default() -> Self {
        Self::noop()
    }
}

impl<A> Clone for Callback<A> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<A, F> From<F> for Callback<A>
where
    F: Fn(A) + Send + Sync + 'static,
{
    fn from(f: F) -> Self {
        Self::from_fn(f)
    }
}

impl<A> fmt::Debug for Callback<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_noop() { "Callback(noop)" } else { "Callback(..)" })
    }
}
