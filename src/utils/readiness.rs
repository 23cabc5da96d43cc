use std::future::Future;
use std::time::Duration;
use tokio_retry::{RetryIf, strategy::FixedInterval};
use super::errors::{BootstrapError, ErrorCode};

///
/// Bounds a polling loop - a fixed pause between attempts, a maximum number of retries and an
/// overall deadline, whichever runs out first.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RetryPolicy {
    pub interval: Duration,
    pub attempts: usize,
    pub timeout: Duration,
}

///
/// Keep calling action until it succeeds, the policy is exhausted or it fails with an error that
/// isn't transient. Non-transient errors are returned untouched.
///
pub async fn wait_for<A, F, T>(what: &str, policy: &RetryPolicy, action: A) -> Result<T, BootstrapError>
where
    A: FnMut() -> F,
    F: Future<Output = Result<T, BootstrapError>>,
{
    tracing::debug!("Waiting for {} (every {:?}, up-to {} retries, {:?} overall)", what, policy.interval, policy.attempts, policy.timeout);

    let strategy = FixedInterval::new(policy.interval).take(policy.attempts);
    let retry = RetryIf::spawn(strategy, action, |err: &BootstrapError| {
        tracing::debug!("{} not ready yet: {}", what, err);
        err.is_transient()
    });

    match tokio::time::timeout(policy.timeout, retry).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) if err.is_transient() => Err(ErrorCode::ServerNotReady
            .with_msg(&format!("Gave up waiting for {} after {} retries: {}", what, policy.attempts, err.message()))),
        Ok(Err(err)) => Err(err),
        Err(_elapsed) => Err(ErrorCode::ReadinessTimeout
            .with_msg(&format!("Timed-out after {:?} waiting for {}", policy.timeout, what))),
    }
}
