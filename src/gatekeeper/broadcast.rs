use std::time::Duration;

/// Issues the same GET to every address concurrently and returns one slot
/// per input address, in input order.
///
/// A slot is `None` when its request failed or timed out; a failure never
/// aborts the rest of the batch and nothing is retried. Completion order is
/// irrelevant, slot identity is the only ordering contract. Dropping a
/// `reqwest::Response` releases its connection, so discarded responses do
/// not leak.
pub async fn broadcast_get(
    client: &reqwest::Client,
    path: &str,
    addresses: &[String],
    timeout: Duration,
) -> Vec<Option<reqwest::Response>> {
    let mut handles = Vec::with_capacity(addresses.len());
    for address in addresses {
        let url = format!("http://{}{}", address, path);
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            match client.get(&url).timeout(timeout).send().await {
                Ok(response) => Some(response),
                Err(e) => {
                    tracing::debug!("Broadcast request to {} failed: {}", url, e);
                    None
                }
            }
        }));
    }

    // Join barrier: every worker completes before the slots are read.
    let mut responses = Vec::with_capacity(handles.len());
    for handle in handles {
        responses.push(handle.await.unwrap_or(None));
    }

    responses
}
