//! Minimum-latency gate.

use std::future::Future;
use std::time::Duration;

/// Await `fut` but resolve no earlier than `floor` after the call.
///
/// The future and the floor timer are joined, so the caller waits for the
/// slower of the two. The output, success or error, is held until then.
pub async fn with_floor<F>(fut: F, floor: Duration) -> F::Output
where
    F: Future,
{
    let (out, ()) = tokio::join!(fut, tokio::time::sleep(floor));
    out
}
