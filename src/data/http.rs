use crate::domain::error::DomainError;
use anyhow::Result;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("recipe_catalog/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| DomainError::Internal(format!("Failed to build HTTP client: {}", e)).into())
}

pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Sends the request, mapping transport failures to `DomainError::Remote`
/// with status 0.
pub(crate) async fn send(request: RequestBuilder, context: &str) -> Result<Response> {
    request.send().await.map_err(|e| {
        warn!(context = context, error = %e, "Request failed before a response arrived");
        DomainError::Remote {
            status: e.status().map(|s| s.as_u16()).unwrap_or(0),
            context: format!("{}: {}", context, e),
        }
        .into()
    })
}

pub(crate) fn expect_status(response: &Response, expected: StatusCode, context: &str) -> Result<()> {
    let status = response.status();
    if status == expected {
        return Ok(());
    }
    Err(status_error(status, context))
}

/// Fails on any non-2xx status, then decodes the JSON body.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response, context: &str) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        return Err(status_error(status, context));
    }
    debug!(status = %status, context = context, "Decoding response body");
    response.json::<T>().await.map_err(|e| {
        DomainError::Remote {
            status: status.as_u16(),
            context: format!("{}: malformed body: {}", context, e),
        }
        .into()
    })
}

fn status_error(status: StatusCode, context: &str) -> anyhow::Error {
    let err = match status {
        StatusCode::NOT_FOUND => DomainError::NotFound(context.to_string()),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            DomainError::Unauthorized(context.to_string())
        }
        _ => DomainError::Remote {
            status: status.as_u16(),
            context: context.to_string(),
        },
    };
    err.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url_normalizes_slashes() {
        assert_eq!(join_url("https://dummyjson.com/", "/recipes"), "https://dummyjson.com/recipes");
        assert_eq!(join_url("http://localhost:9999", "carts"), "http://localhost:9999/carts");
    }

    #[test]
    fn test_status_error_maps_auth_and_missing() {
        let err = status_error(StatusCode::NOT_FOUND, "recipe 9");
        assert!(matches!(err.downcast_ref::<DomainError>(), Some(DomainError::NotFound(_))));

        let err = status_error(StatusCode::UNAUTHORIZED, "profile");
        assert!(matches!(err.downcast_ref::<DomainError>(), Some(DomainError::Unauthorized(_))));

        let err = status_error(StatusCode::BAD_GATEWAY, "tags");
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::Remote { status: 502, .. })
        ));
    }
}
