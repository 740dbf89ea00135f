//! Image storage collaborator and its bounded retry policy.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{MinterError, UploadError};

/// Raw image bytes from the form's file input.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Storage backend that turns an image into a public URL.
#[async_trait(?Send)]
pub trait ImageStore {
    async fn upload(&self, image: &ImageFile) -> Result<String, UploadError>;
}

/// Delay source for retry backoff (setTimeout on wasm, recorded in tests).
#[async_trait(?Send)]
pub trait Sleeper {
    async fn sleep(&self, delay: Duration);
}

/// Upload attempts before the error surfaces.
pub const UPLOAD_ATTEMPTS: u32 = 3;

/// Upload with linear backoff: attempt, wait 1s, attempt, wait 2s, attempt.
/// The last error is the one reported.
pub async fn upload_with_retry<U, S>(
    store: &U,
    sleeper: &S,
    image: &ImageFile,
) -> Result<String, MinterError>
where
    U: ImageStore + ?Sized,
    S: Sleeper + ?Sized,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        match store.upload(image).await {
            Ok(url) => return Ok(url),
            Err(UploadError(reason)) if attempt >= UPLOAD_ATTEMPTS => {
                return Err(MinterError::UploadFailed {
                    attempts: UPLOAD_ATTEMPTS,
                    reason,
                });
            }
            Err(_) => {
                sleeper
                    .sleep(Duration::from_millis(1_000 * u64::from(attempt)))
                    .await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct FlakyStore {
        failures_before_success: u32,
        calls: RefCell<u32>,
    }

    #[async_trait(?Send)]
    impl ImageStore for FlakyStore {
        async fn upload(&self, _image: &ImageFile) -> Result<String, UploadError> {
            let mut calls = self.calls.borrow_mut();
            *calls += 1;
            if *calls <= self.failures_before_success {
                Err(UploadError("storage unavailable".to_string()))
            } else {
                Ok("https://storage.example/token.png".to_string())
            }
        }
    }

    #[derive(Default)]
    struct RecordingSleeper {
        delays: RefCell<Vec<Duration>>,
    }

    #[async_trait(?Send)]
    impl Sleeper for RecordingSleeper {
        async fn sleep(&self, delay: Duration) {
            self.delays.borrow_mut().push(delay);
        }
    }

    fn image() -> ImageFile {
        ImageFile {
            bytes: vec![0x89, 0x50, 0x4e, 0x47],
            content_type: "image/png".to_string(),
        }
    }

    #[tokio::test]
    async fn test_first_attempt_success_sleeps_never() {
        let store = FlakyStore {
            failures_before_success: 0,
            calls: RefCell::new(0),
        };
        let sleeper = RecordingSleeper::default();
        let url = upload_with_retry(&store, &sleeper, &image()).await.unwrap();
        assert_eq!(url, "https://storage.example/token.png");
        assert!(sleeper.delays.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_linear_backoff_between_attempts() {
        let store = FlakyStore {
            failures_before_success: 2,
            calls: RefCell::new(0),
        };
        let sleeper = RecordingSleeper::default();
        let url = upload_with_retry(&store, &sleeper, &image()).await.unwrap();
        assert_eq!(url, "https://storage.example/token.png");
        assert_eq!(*store.calls.borrow(), 3);
        assert_eq!(
            *sleeper.delays.borrow(),
            vec![Duration::from_secs(1), Duration::from_secs(2)]
        );
    }

    #[tokio::test]
    async fn test_gives_up_after_three_attempts() {
        let store = FlakyStore {
            failures_before_success: 10,
            calls: RefCell::new(0),
        };
        let sleeper = RecordingSleeper::default();
        let err = upload_with_retry(&store, &sleeper, &image())
            .await
            .unwrap_err();
        assert_eq!(*store.calls.borrow(), 3);
        match err {
            MinterError::UploadFailed { attempts, reason } => {
                assert_eq!(attempts, 3);
                assert_eq!(reason, "storage unavailable");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
