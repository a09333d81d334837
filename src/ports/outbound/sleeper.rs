use async_trait::async_trait;
use std::time::Duration;

/// Sleeper port for the back-off between database pages
///
/// Tests substitute a recording implementation so paging runs instantly.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

#[async_trait]
impl<T: Sleeper + ?Sized> Sleeper for &T {
    async fn sleep(&self, duration: Duration) {
        (**self).sleep(duration).await
    }
}
