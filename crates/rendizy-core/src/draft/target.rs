//! Remote save target trait.
//!
//! The controller never talks to a backend directly; it calls a
//! `SaveTarget`. Implementations live in rendizy-infra (HTTP) or are
//! supplied by the caller as a closure through [`save_fn`].

use std::future::Future;
use std::sync::Arc;

use rendizy_types::error::SaveError;

/// Remote persistence for drafts of type `D`.
///
/// Uses RPITIT (return position `impl Trait` in traits) consistent with
/// all async traits in this project.
pub trait SaveTarget<D>: Send + Sync {
    /// Persist the draft upstream. Errors are reported, never retried here.
    fn save(&self, draft: &D) -> impl Future<Output = Result<(), SaveError>> + Send;
}

impl<D, T: SaveTarget<D>> SaveTarget<D> for Arc<T> {
    fn save(&self, draft: &D) -> impl Future<Output = Result<(), SaveError>> + Send {
        (**self).save(draft)
    }
}

/// Adapter turning an async closure into a `SaveTarget`.
pub struct SaveFn<F> {
    f: F,
}

/// Wrap `f` so it can be used as a `SaveTarget`.
///
/// The closure receives an owned clone of the draft.
pub fn save_fn<F>(f: F) -> SaveFn<F> {
    SaveFn { f }
}

impl<D, F, Fut> SaveTarget<D> for SaveFn<F>
where
    D: Clone + Send + Sync,
    F: Fn(D) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), SaveError>> + Send,
{
    fn save(&self, draft: &D) -> impl Future<Output = Result<(), SaveError>> + Send {
        (self.f)(draft.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_save_fn_invokes_closure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let target = save_fn(move |draft: String| {
            let counter = counter.clone();
            async move {
                assert_eq!(draft, "payload");
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<(), SaveError>(())
            }
        });

        target.save(&"payload".to_string()).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_save_fn_propagates_error() {
        let target = save_fn(|_: u32| async {
            Err::<(), _>(SaveError::Rejected("nope".to_string()))
        });
        let err = target.save(&1).await.unwrap_err();
        assert!(matches!(err, SaveError::Rejected(_)));
    }

    #[tokio::test]
    async fn test_arc_target_delegates() {
        let target = Arc::new(save_fn(|_: u32| async { Ok::<(), SaveError>(()) }));
        assert!(target.save(&7).await.is_ok());
    }
}
