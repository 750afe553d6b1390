//! Scheduling seam.

use std::time::Duration;

use futures::future::LocalBoxFuture;

/// Timers and task spawning on the page's single thread.
pub trait Platform: 'static {
    /// Run `task` once after `delay`. There is no way to cancel it.
    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>);

    /// Drive `task` to completion in the background.
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>);
}
