use async_trait::async_trait;
use std::time::Duration;
use wg_chain_client::Timer;

/// `setTimeout`-backed sleeps for receipt polling and the post-confirmation refetch.
pub struct GlooTimer;

#[async_trait(?Send)]
impl Timer for GlooTimer {
    async fn sleep(&self, duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }
}
