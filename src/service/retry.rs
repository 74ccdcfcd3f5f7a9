use crate::Error;
use std::future::Future;

/// Retry an operation after refreshing the credentials it runs with
///
/// B2 upload urls point at a single storage pod. When an upload fails the pod may be
/// full, busy or gone, and the remedy is a new url rather than the same request again
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct RetryPolicy {
    /// Attempts in total, including the first one
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy { max_attempts: 2 }
    }
}

impl RetryPolicy {
    /// Run 'op' with 'credentials'. Each failed attempt, except the last, calls 'refresh' and
    /// runs 'op' again with what it returns
    ///
    /// Returns the first success together with the credentials that produced it \
    /// Returns the error of the last attempt, or of 'refresh' if that failed
    pub async fn run<C, T, Op, OpFut, Refresh, RefreshFut>(
        &self,
        credentials: C,
        mut refresh: Refresh,
        mut op: Op,
    ) -> Result<(T, C), Error>
    where
        C: Clone,
        Op: FnMut(C) -> OpFut,
        OpFut: Future<Output = Result<T, Error>>,
        Refresh: FnMut() -> RefreshFut,
        RefreshFut: Future<Output = Result<C, Error>>,
    {
        let mut credentials = credentials;
        let mut attempt = 1;
        loop {
            match op(credentials.clone()).await {
                Ok(v) => return Ok((v, credentials)),
                Err(e) if attempt >= self.max_attempts => return Err(e),
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "attempt failed, refreshing before retry");
                    credentials = refresh().await?;
                    attempt += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    fn fail(code: &str) -> Error {
        Error::B2Error(crate::B2ApiError {
            status: 503,
            code: code.to_owned(),
            message: String::new(),
        })
    }

    #[tokio::test]
    async fn first_attempt_succeeds() {
        let refreshes = Cell::new(0);
        let (value, creds) = RetryPolicy::default()
            .run(
                "url-1".to_string(),
                || {
                    refreshes.set(refreshes.get() + 1);
                    async { Ok("url-2".to_string()) }
                },
                |creds: String| async move { Ok::<_, Error>(format!("done with {}", creds)) },
            )
            .await
            .unwrap();
        assert_eq!(value, "done with url-1");
        assert_eq!(creds, "url-1");
        assert_eq!(refreshes.get(), 0);
    }

    #[tokio::test]
    async fn retries_once_with_fresh_credentials() {
        let seen = RefCell::new(Vec::new());
        let (value, creds) = RetryPolicy::default()
            .run(
                "stale".to_string(),
                || async { Ok("fresh".to_string()) },
                |creds: String| {
                    seen.borrow_mut().push(creds.clone());
                    async move {
                        if creds == "stale" {
                            Err(fail("service_unavailable"))
                        } else {
                            Ok(creds.len())
                        }
                    }
                },
            )
            .await
            .unwrap();
        assert_eq!(value, 5);
        assert_eq!(creds, "fresh");
        assert_eq!(*seen.borrow(), vec!["stale".to_string(), "fresh".to_string()]);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let attempts = Cell::new(0);
        let refreshes = Cell::new(0);
        let err = RetryPolicy::default()
            .run(
                0u32,
                || {
                    refreshes.set(refreshes.get() + 1);
                    async { Ok(1u32) }
                },
                |creds: u32| {
                    attempts.set(attempts.get() + 1);
                    async move { Err::<(), _>(fail(&format!("try_{}", creds))) }
                },
            )
            .await
            .unwrap_err();
        assert_eq!(attempts.get(), 2);
        assert_eq!(refreshes.get(), 1);
        // The error of the retry, not the first one
        assert_eq!(err.b2_code(), Some("try_1"));
    }

    #[tokio::test]
    async fn refresh_failure_stops() {
        let attempts = Cell::new(0);
        let err = RetryPolicy::default()
            .run(
                (),
                || async { Err::<(), _>(fail("refresh_failed")) },
                |_| {
                    attempts.set(attempts.get() + 1);
                    async { Err::<(), _>(fail("upload_failed")) }
                },
            )
            .await
            .unwrap_err();
        assert_eq!(attempts.get(), 1);
        assert_eq!(err.b2_code(), Some("refresh_failed"));
    }
}
