use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;

use super::{
    Catalog, CatalogError,
    dto::{
        AlbumDto, LibraryResponse, LoginRequest, LoginResponse, SearchResponse,
        StreamUrlResponse, normalize_search,
    },
    library,
};
use crate::{
    config::Settings,
    types::{Album, ResultEntry, Scope},
};

pub const SEARCH_MAX_RESULTS: u32 = 20;

/// Catalog service reached over its JSON HTTP API.
///
/// Every request after the login carries the session token as a bearer
/// token. There is no retry or timeout policy: a failing request is reported
/// once and a stalled one blocks until the connection gives up.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    base_url: Url,
    token: String,
}

impl HttpCatalog {
    /// Logs in with the credentials from the settings file.
    pub async fn login(settings: &Settings) -> Result<Self, CatalogError> {
        Self::login_at(settings.api_url(), &settings.email, &settings.password).await
    }

    pub async fn login_at(
        base_url: impl Into<String>,
        email: &str,
        password: &str,
    ) -> Result<Self, CatalogError> {
        let client = Client::new();
        let base_url = parse_base_url(&base_url.into())?;

        let response = client
            .post(endpoint(&base_url, &["auth", "login"]))
            .json(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;

        if is_auth_failure(response.status()) {
            return Err(CatalogError::Auth);
        }

        let login = response.error_for_status()?.json::<LoginResponse>().await?;

        Ok(Self {
            client,
            base_url,
            token: login.token,
        })
    }

    fn url(&self, segments: &[&str]) -> Url {
        endpoint(&self.base_url, segments)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, CatalogError> {
        let response = request.bearer_auth(&self.token).send().await?;
        if is_auth_failure(response.status()) {
            return Err(CatalogError::Auth);
        }
        Ok(response.error_for_status()?.json::<T>().await?)
    }

    async fn search_catalog(&self, query: &str) -> Result<Vec<ResultEntry>, CatalogError> {
        let max_results = SEARCH_MAX_RESULTS.to_string();
        let request = self
            .client
            .get(self.url(&["search"]))
            .query(&[("q", query), ("max-results", max_results.as_str())]);
        let response: SearchResponse = self.send_json(request).await?;
        Ok(normalize_search(response))
    }

    async fn search_library(&self, query: &str) -> Result<Vec<ResultEntry>, CatalogError> {
        let request = self.client.get(self.url(&["library", "tracks"]));
        let response: LibraryResponse = self.send_json(request).await?;
        Ok(library::search_library(response.items, query))
    }
}

fn parse_base_url(raw: &str) -> Result<Url, CatalogError> {
    let invalid = |reason: String| CatalogError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };
    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(invalid("not a hierarchical URL".to_string()));
    }
    Ok(url)
}

/// Appends `segments` to the base path. Each segment is percent-encoded, so
/// ids containing `/`, `?` or `#` stay inside their own segment.
fn endpoint(base_url: &Url, segments: &[&str]) -> Url {
    let mut url = base_url.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

fn is_auth_failure(status: StatusCode) -> bool {
    status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN
}

#[async_trait]
impl Catalog for HttpCatalog {
    async fn search(&self, query: &str, scope: Scope) -> Result<Vec<ResultEntry>, CatalogError> {
        let entries = match scope {
            Scope::Catalog => self.search_catalog(query).await?,
            Scope::Library => self.search_library(query).await?,
        };

        if entries.is_empty() {
            return Err(CatalogError::NoResults {
                query: query.to_string(),
            });
        }
        Ok(entries)
    }

    async fn stream_url(&self, stream_id: &str) -> Result<String, CatalogError> {
        let request = self.client.get(self.url(&["stream", stream_id]));
        let resolution_error = |reason: String| CatalogError::StreamResolution {
            stream_id: stream_id.to_string(),
            reason,
        };

        match self.send_json::<StreamUrlResponse>(request).await {
            Ok(response) if response.url.is_empty() => {
                Err(resolution_error("the catalog returned an empty URL".to_string()))
            }
            Ok(response) => Ok(response.url),
            Err(e) => Err(resolution_error(e.to_string())),
        }
    }

    async fn album_detail(&self, album_id: &str) -> Result<Album, CatalogError> {
        let request = self
            .client
            .get(self.url(&["albums", album_id]))
            .query(&[("include-tracks", "true")]);

        match self.send_json::<AlbumDto>(request).await {
            Ok(album) => Ok(album.into_album()),
            Err(e) => Err(CatalogError::AlbumFetch {
                album_id: album_id.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}
