use std::fmt::Display;
use std::future::Future;

/// Awaits a secondary data source. A failure is logged and turned into
/// `None` so the primary output still reaches the user. Primary sources must
/// not go through here.
pub async fn optional<T, E, Fut>(label: &str, source: Fut) -> Option<T>
where
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    match source.await {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!("{} unavailable, continuing without it: {}", label, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Api, QueryError};

    #[tokio::test]
    async fn success_passes_through() {
        let out = optional("PLACES", async { Ok::<_, QueryError>(3) }).await;
        assert_eq!(out, Some(3));
    }

    #[tokio::test]
    async fn failure_becomes_none() {
        let out: Option<u8> = optional("CMS", async {
            Err(QueryError::Upstream {
                api: Api::Cms,
                status: 502,
                body: String::new(),
            })
        })
        .await;
        assert_eq!(out, None);
    }
}
