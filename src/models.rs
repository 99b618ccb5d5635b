//! Data models for Movie Explorer

use serde::{Deserialize, Deserializer, Serialize};

/// Top-level views of the navigation shell
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Home,
    Details(i64),
    Favorites,
    Login,
}

impl View {
    /// Views that are only reachable with a logged-in session
    pub fn requires_session(&self) -> bool {
        matches!(self, View::Details(_) | View::Favorites)
    }
}

/// Genre taxonomy entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// One movie of the catalog (persisted to JSON as part of the favorites)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overview: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genre_ids: Vec<i64>,
    // Only present on detail records
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub trailer_key: Option<String>,
}

/// TMDB sends `null` for some absent fields
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl CatalogItem {
    /// Year part of the release date, e.g. "1999" for "1999-03-31"
    pub fn release_year(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .and_then(|date| date.split('-').next())
            .filter(|year| !year.is_empty())
    }

    pub fn rating_label(&self) -> String {
        match self.vote_average {
            Some(rating) => format!("{:.1}", rating),
            None => "NR".to_string(),
        }
    }

    /// Runtime as "2h 16m", `None` for unknown or zero runtimes
    pub fn runtime_label(&self) -> Option<String> {
        match self.runtime {
            Some(minutes) if minutes > 0 => Some(format!("{}h {}m", minutes / 60, minutes % 60)),
            _ => None,
        }
    }

    /// Search results without a poster or a rating are never shown
    pub fn passes_quality_check(&self) -> bool {
        let has_poster = self.poster_path.as_deref().is_some_and(|path| !path.is_empty());
        has_poster && self.vote_average.is_some()
    }
}

/// One page of search results
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchPage {
    pub items: Vec<CatalogItem>,
    pub total_pages: u32,
    pub current_page: u32,
}

impl SearchPage {
    /// Returned in place of a failed search
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_pages: 0,
            current_page: 1,
        }
    }
}

/// Client-side filters for the browse view
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub genre: Option<i64>,
    pub year: Option<i32>,
    pub min_rating: f32,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            genre: None,
            year: None,
            min_rating: 0.0,
        }
    }
}

/// Logged-in demo identity (persisted to JSON)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub login_timestamp: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::CatalogItem;

    /// Bare catalog item without optional metadata
    pub(crate) fn item(id: i64) -> CatalogItem {
        CatalogItem {
            id,
            title: format!("Movie {}", id),
            overview: String::new(),
            release_date: None,
            poster_path: None,
            backdrop_path: None,
            vote_average: None,
            genre_ids: Vec::new(),
            genres: Vec::new(),
            runtime: None,
            trailer_key: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::item;
    use super::*;

    #[test]
    fn test_release_year() {
        let mut movie = item(1);
        assert_eq!(movie.release_year(), None);
        movie.release_date = Some("1999-03-31".to_string());
        assert_eq!(movie.release_year(), Some("1999"));
        movie.release_date = Some(String::new());
        assert_eq!(movie.release_year(), None);
    }

    #[test]
    fn test_rating_label() {
        let mut movie = item(1);
        assert_eq!(movie.rating_label(), "NR");
        movie.vote_average = Some(7.26);
        assert_eq!(movie.rating_label(), "7.3");
        movie.vote_average = Some(8.0);
        assert_eq!(movie.rating_label(), "8.0");
    }

    #[test]
    fn test_runtime_label() {
        let mut movie = item(1);
        assert_eq!(movie.runtime_label(), None);
        movie.runtime = Some(0);
        assert_eq!(movie.runtime_label(), None);
        movie.runtime = Some(136);
        assert_eq!(movie.runtime_label().as_deref(), Some("2h 16m"));
        movie.runtime = Some(45);
        assert_eq!(movie.runtime_label().as_deref(), Some("0h 45m"));
    }

    #[test]
    fn test_quality_check_requires_poster_and_rating() {
        let mut movie = item(1);
        assert!(!movie.passes_quality_check());
        movie.poster_path = Some("/poster.jpg".to_string());
        assert!(!movie.passes_quality_check());
        movie.vote_average = Some(0.0);
        assert!(movie.passes_quality_check());
        movie.poster_path = Some(String::new());
        assert!(!movie.passes_quality_check());
    }

    #[test]
    fn test_deserialize_with_missing_optional_fields() {
        let movie: CatalogItem = serde_json::from_str(r#"{"id": 5, "title": "Alien"}"#).unwrap();
        assert_eq!(movie.id, 5);
        assert!(movie.genre_ids.is_empty());
        assert_eq!(movie.vote_average, None);
    }

    #[test]
    fn test_deserialize_null_fields() {
        let movie: CatalogItem = serde_json::from_str(
            r#"{"id": 6, "title": null, "overview": null, "genre_ids": null, "genres": null, "vote_average": null}"#,
        )
        .unwrap();
        assert_eq!(movie.title, "");
        assert_eq!(movie.overview, "");
        assert!(movie.genre_ids.is_empty());
        assert!(movie.genres.is_empty());
        assert_eq!(movie.vote_average, None);
    }

    #[test]
    fn test_protected_views() {
        assert!(View::Favorites.requires_session());
        assert!(View::Details(3).requires_session());
        assert!(!View::Home.requires_session());
        assert!(!View::Login.requires_session());
    }
}
