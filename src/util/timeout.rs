//! Timeout helper.

use std::future::Future;
use std::time::Duration;

use crate::error::ChatError;

/// Wrap a future with a timeout, mapping expiry to [`ChatError::Timeout`].
pub async fn with_timeout<T>(
    duration: Duration,
    future: impl Future<Output = Result<T, ChatError>>,
) -> Result<T, ChatError> {
    match tokio::time::timeout(duration, future).await {
        Ok(result) => result,
        Err(_) => Err(ChatError::Timeout(duration.as_millis() as u64)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn expired_future_becomes_timeout_error() {
        let result = with_timeout(Duration::from_millis(250), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, ChatError>("late")
        })
        .await;

        assert!(matches!(result, Err(ChatError::Timeout(250))));
    }

    #[tokio::test]
    async fn completed_future_passes_through() {
        let result = with_timeout(Duration::from_secs(1), async { Ok::<_, ChatError>(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }
}
