//! TMDB catalog API client

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::{null_as_default, CatalogItem, Genre, SearchPage};

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/300x450?text=No+Image";

const TRAILER_TYPE: &str = "Trailer";
const TRAILER_SITE: &str = "YouTube";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] ureq::Error),
    #[error("Invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No TMDB API key configured")]
    MissingApiKey,
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Size token of the image CDN
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImageSize {
    Poster,
    Original,
}

impl ImageSize {
    fn token(&self) -> &'static str {
        match self {
            ImageSize::Poster => "w500",
            ImageSize::Original => "original",
        }
    }
}

/// Full image URL for a path fragment, or the placeholder if there is none
pub fn image_url(base_url: &str, size: ImageSize, path: Option<&str>) -> String {
    match path.filter(|p| !p.is_empty()) {
        Some(path) => format!("{}/{}{}", base_url.trim_end_matches('/'), size.token(), path),
        None => PLACEHOLDER_IMAGE_URL.to_string(),
    }
}

pub fn trailer_url(key: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", key)
}

#[derive(Debug, Clone, Deserialize)]
pub struct Video {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub site: String,
    #[serde(default, rename = "type")]
    pub video_type: String,
}

/// First YouTube video of type "Trailer"
pub fn select_trailer(videos: &[Video]) -> Option<&Video> {
    videos
        .iter()
        .find(|v| v.video_type == TRAILER_TYPE && v.site == TRAILER_SITE)
}

#[derive(Debug, Deserialize)]
struct ResultsResponse {
    #[serde(default)]
    results: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Value>,
    #[serde(default)]
    total_pages: u32,
    #[serde(default = "first_page")]
    page: u32,
}

fn first_page() -> u32 { 1 }

#[derive(Debug, Default, Deserialize)]
struct VideoList {
    #[serde(default)]
    results: Vec<Video>,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    #[serde(flatten)]
    item: CatalogItem,
    #[serde(default, deserialize_with = "null_as_default")]
    videos: VideoList,
}

#[derive(Debug, Deserialize)]
struct GenresResponse {
    #[serde(default)]
    genres: Vec<Genre>,
}

/// Convert raw result entries, skipping the ones that don't describe a movie
fn collect_items(results: Vec<Value>) -> Vec<CatalogItem> {
    let total = results.len();
    let items: Vec<CatalogItem> = results
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect();
    if items.len() < total {
        log::debug!("Skipped {} malformed result entries", total - items.len());
    }
    items
}

pub fn parse_trending(body: &str) -> Result<Vec<CatalogItem>> {
    let response: ResultsResponse = serde_json::from_str(body)?;
    Ok(collect_items(response.results))
}

pub fn parse_search(body: &str) -> Result<SearchPage> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(SearchPage {
        items: collect_items(response.results),
        total_pages: response.total_pages,
        current_page: response.page,
    })
}

pub fn parse_details(body: &str) -> Result<CatalogItem> {
    let DetailsResponse { mut item, videos } = serde_json::from_str(body)?;
    if item.genre_ids.is_empty() {
        item.genre_ids = item.genres.iter().map(|g| g.id).collect();
    }
    item.trailer_key = select_trailer(&videos.results).map(|v| v.key.clone());
    Ok(item)
}

pub fn parse_genres(body: &str) -> Result<Vec<Genre>> {
    let response: GenresResponse = serde_json::from_str(body)?;
    Ok(response.genres)
}

pub struct TmdbClient {
    agent: ureq::Agent,
    base_url: String,
    api_key: String,
    language: String,
}

impl TmdbClient {
    pub fn new(base_url: &str, api_key: &str, language: &str, timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            language: language.to_string(),
        }
    }

    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<String> {
        if self.api_key.is_empty() {
            return Err(ApiError::MissingApiKey);
        }
        let url = self.endpoint_url(path);
        log::debug!("GET {}", url);
        let mut request = self
            .agent
            .get(&url)
            .header("Accept", "application/json")
            .query("api_key", &self.api_key)
            .query("language", &self.language);
        for (name, value) in params {
            request = request.query(*name, *value);
        }
        let mut response = request.call()?;
        let body = response.body_mut().read_to_string()?;
        Ok(body)
    }

    pub fn trending(&self) -> Result<Vec<CatalogItem>> {
        let body = self.get("/trending/movie/week", &[])?;
        parse_trending(&body)
    }

    pub fn search(&self, query: &str, page: u32) -> Result<SearchPage> {
        let page = page.max(1).to_string();
        let body = self.get("/search/movie", &[("query", query), ("page", &page)])?;
        parse_search(&body)
    }

    pub fn details(&self, id: i64) -> Result<CatalogItem> {
        let path = format!("/movie/{}", id);
        let body = self.get(&path, &[("append_to_response", "videos,credits")])?;
        parse_details(&body)
    }

    pub fn genres(&self) -> Result<Vec<Genre>> {
        let body = self.get("/genre/movie/list", &[])?;
        parse_genres(&body)
    }

    /// Trending movies of the week, empty on any failure
    pub fn fetch_trending(&self) -> Vec<CatalogItem> {
        self.trending().unwrap_or_else(|e| {
            log::error!("Error fetching trending movies: {}", e);
            Vec::new()
        })
    }

    /// One page of title search results, an empty page on any failure
    pub fn search_by_title(&self, query: &str, page: u32) -> SearchPage {
        self.search(query, page).unwrap_or_else(|e| {
            log::error!("Error searching movies for '{}' (page {}): {}", query, page, e);
            SearchPage::empty()
        })
    }

    /// Full detail record including the trailer key, `None` on any failure
    pub fn fetch_details(&self, id: i64) -> Option<CatalogItem> {
        self.details(id)
            .map_err(|e| log::error!("Error fetching movie details for {}: {}", id, e))
            .ok()
    }

    /// Genre taxonomy; failures are propagated to the caller
    pub fn fetch_genres(&self) -> Result<Vec<Genre>> {
        self.genres()
    }
}
