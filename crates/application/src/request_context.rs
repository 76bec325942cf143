//! Request context for propagating request metadata
//!
//! The HTTP middleware assigns each request an `X-Request-Id`; handlers wrap
//! it in a `RequestContext` and pass it to the dispatcher so that every log
//! line and upstream error can be correlated.
//!
//! # Examples
//!
//! ```
//! use application::RequestContext;
//!
//! let ctx = RequestContext::new();
//! assert!(!ctx.request_id().is_nil());
//! ```

use std::time::{Duration, Instant};

use uuid::Uuid;

/// Context for a single coaching request
#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: Uuid,
    received_at: Instant,
}

impl RequestContext {
    /// Create a context with a freshly generated request ID
    #[must_use]
    pub fn new() -> Self {
        Self::with_request_id(Uuid::now_v7())
    }

    /// Create a context for a request ID assigned upstream
    ///
    /// # Examples
    ///
    /// ```
    /// use application::RequestContext;
    /// use uuid::Uuid;
    ///
    /// let request_id = Uuid::now_v7();
    /// let ctx = RequestContext::with_request_id(request_id);
    /// assert_eq!(ctx.request_id(), request_id);
    /// ```
    #[must_use]
    pub fn with_request_id(request_id: Uuid) -> Self {
        Self {
            request_id,
            received_at: Instant::now(),
        }
    }

    /// Get the unique request identifier
    #[must_use]
    pub const fn request_id(&self) -> Uuid {
        self.request_id
    }

    /// Time elapsed since the request was received
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.received_at.elapsed()
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
