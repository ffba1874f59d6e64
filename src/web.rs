use hyper::body::Bytes;
use hyper::client::HttpConnector;
use hyper::header::LOCATION;
use hyper::http::HeaderMap;
use hyper::{Body, Request, StatusCode, Uri};
use hyper_rustls::HttpsConnector;

type HyperHttpsClient = hyper::client::Client<HttpsConnector<HttpConnector>, Body>;
type HyperHttpClient = hyper::client::Client<HttpConnector, Body>;

#[derive(Clone)]
pub struct HttpClient {
    https_client: HyperHttpsClient,
    http_client: HyperHttpClient,
}

impl HttpClient {
    pub fn new() -> Self {
        Self {
            https_client: new_hyper_https_client(),
            http_client: Default::default(),
        }
    }

    async fn request(&self, req: Request<Body>) -> Result<hyper::Response<Body>, HttpError> {
        let scheme = req.uri().scheme_str().unwrap_or("http");

        match scheme {
            "http" => Ok(self.http_client.request(req).await?),
            "https" => Ok(self.https_client.request(req).await?),
            other => Err(HttpError::UnsupportedScheme(other.to_string())),
        }
    }
}

fn new_hyper_https_client() -> HyperHttpsClient {
    let https = hyper_rustls::HttpsConnectorBuilder::new()
        .with_webpki_roots()
        .https_only()
        .enable_http1()
        .build();

    hyper::Client::builder().build(https)
}

async fn get(client: &HttpClient, uri: &Uri) -> Result<hyper::Response<Body>, HttpError> {
    let request = Request::get(uri).body(Body::empty())?;
    client.request(request).await
}

/// GETs `uri` and returns the headers and full body of a 2xx response.
///
/// At most one redirect is followed.
pub async fn simple_get(client: &HttpClient, uri: &Uri) -> Result<(HeaderMap, Bytes), HttpError> {
    let mut response = get(client, uri).await?;

    if response.status().is_redirection() {
        if let Some(target) = redirect_target(uri, response.headers()) {
            tracing::debug!(from = %uri, to = %target, status = %response.status(), "following redirect");
            response = get(client, &target).await?;
        }
    }

    let status = response.status();
    if !status.is_success() {
        return Err(HttpError::Status(status));
    }

    let headers = response.headers().clone();
    let bytes = hyper::body::to_bytes(response.into_body()).await?;

    Ok((headers, bytes))
}

/// Resolves the `Location` header against `base`. Relative targets keep the base scheme and authority.
fn redirect_target(base: &Uri, headers: &HeaderMap) -> Option<Uri> {
    let location: Uri = headers.get(LOCATION)?.to_str().ok()?.parse().ok()?;
    if location.scheme().is_some() {
        return Some(location);
    }

    let mut parts = location.into_parts();
    parts.scheme = base.scheme().cloned();
    parts.authority = base.authority().cloned();
    Uri::from_parts(parts).ok()
}

#[derive(thiserror::Error, Debug)]
pub enum HttpError {
    #[error("request failed: {0}")]
    Transport(#[from] hyper::Error),
    #[error("invalid request: {0}")]
    Request(#[from] hyper::http::Error),
    #[error("unsupported uri scheme {0:?}")]
    UnsupportedScheme(String),
    #[error("unexpected response status {0}")]
    Status(StatusCode),
}
