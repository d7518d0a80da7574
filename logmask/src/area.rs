//! Scoped "masking is active" marker for [`MaskingMode::InArea`].
//!
//! [`SensitiveArea::enter`] returns an RAII guard; masking stays active for
//! whatever runs while the guard is alive, including nested areas. The
//! marker lives in a thread-local, so on its own it follows the thread, not
//! the logical flow: a future that migrates across worker threads at an
//! `.await` point would escape a bare guard. For async flows, wrap the
//! future with [`SensitiveFutureExt::in_sensitive_area`], which re-enters
//! the area around every poll and so follows the logical call chain without
//! leaking into sibling tasks.
//!
//! [`MaskingMode::InArea`]: crate::MaskingMode::InArea

use std::cell::Cell;
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::task::{Context, Poll};

thread_local! {
    static AREA_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// The sensitive-area marker. Carries no data; only its dynamic extent
/// matters.
#[derive(Clone, Copy, Debug)]
pub struct SensitiveArea;

impl SensitiveArea {
    /// Activates the area until the returned guard is dropped.
    #[must_use = "masking is active only while the guard is alive"]
    pub fn enter() -> SensitiveAreaGuard {
        AREA_DEPTH.with(|depth| depth.set(depth.get() + 1));
        SensitiveAreaGuard {
            _not_send: PhantomData,
        }
    }

    /// Whether the current thread is inside a sensitive area.
    pub fn is_active() -> bool {
        AREA_DEPTH.with(Cell::get) > 0
    }
}

/// Guard returned by [`SensitiveArea::enter`]. Deactivates the area (one
/// nesting level) on drop, also on early return or panic.
///
/// The guard is deliberately not `Send`: it must be dropped on the thread
/// that entered the area.
#[derive(Debug)]
pub struct SensitiveAreaGuard {
    _not_send: PhantomData<*const ()>,
}

impl Drop for SensitiveAreaGuard {
    fn drop(&mut self) {
        AREA_DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

pin_project_lite::pin_project! {
    /// A future that runs inside a sensitive area on every poll.
    ///
    /// Created by [`SensitiveFutureExt::in_sensitive_area`].
    #[derive(Debug)]
    #[must_use = "futures do nothing unless polled"]
    pub struct Sensitive<F> {
        #[pin]
        inner: F,
    }
}

impl<F: Future> Future for Sensitive<F> {
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let _area = SensitiveArea::enter();
        this.inner.poll(cx)
    }
}

/// Extension for scoping a whole async operation as sensitive.
///
/// ```
/// use logmask::{SensitiveArea, SensitiveFutureExt};
///
/// # let fut =
/// async {
///     assert!(SensitiveArea::is_active());
/// }
/// .in_sensitive_area();
/// ```
pub trait SensitiveFutureExt: Sized {
    /// Wraps the future so the sensitive area is entered around every poll.
    fn in_sensitive_area(self) -> Sensitive<Self> {
        Sensitive { inner: self }
    }
}

impl<F: Future> SensitiveFutureExt for F {}
