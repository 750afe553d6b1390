//! Transport seam.

use async_trait::async_trait;

use crate::{FetchError, Request, Response};

/// Sends a built request and yields the raw response.
///
/// Implementations run on the page's single thread, so futures are not
/// required to be `Send`. A transport must not turn non-2xx statuses into
/// errors; callers decide what a status means.
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, request: Request) -> Result<Response, FetchError>;
}
