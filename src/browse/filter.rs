//! Client-side filtering of loaded catalog items

use crate::models::{CatalogItem, FilterCriteria};

impl FilterCriteria {
    /// Absent criteria never exclude anything. A missing rating counts as 0.
    pub fn matches(&self, item: &CatalogItem) -> bool {
        let genre_ok = self.genre.is_none_or(|genre| item.genre_ids.contains(&genre));
        let year_ok = self.year.is_none_or(|year| {
            item.release_date
                .as_deref()
                .is_some_and(|date| date.starts_with(&year.to_string()))
        });
        let rating_ok = item.vote_average.unwrap_or(0.0) >= self.min_rating;
        genre_ok && year_ok && rating_ok
    }

    pub fn is_unconstrained(&self) -> bool {
        self.genre.is_none() && self.year.is_none() && self.min_rating <= 0.0
    }
}

/// Indices of the items passing the criteria, in source order
pub fn filter_indices(items: &[CatalogItem], criteria: &FilterCriteria) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| criteria.matches(item))
        .map(|(idx, _)| idx)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_support::item;

    fn movie(id: i64, genres: &[i64], date: Option<&str>, rating: Option<f32>) -> CatalogItem {
        let mut movie = item(id);
        movie.genre_ids = genres.to_vec();
        movie.release_date = date.map(str::to_string);
        movie.vote_average = rating;
        movie
    }

    #[test]
    fn test_default_criteria_pass_everything() {
        let criteria = FilterCriteria::default();
        assert!(criteria.is_unconstrained());
        assert!(criteria.matches(&item(1)));
    }

    #[test]
    fn test_genre_filter() {
        let criteria = FilterCriteria { genre: Some(28), ..Default::default() };
        assert!(criteria.matches(&movie(1, &[12, 28], None, None)));
        assert!(!criteria.matches(&movie(2, &[12], None, None)));
        assert!(!criteria.matches(&movie(3, &[], None, None)));
    }

    #[test]
    fn test_year_filter() {
        let criteria = FilterCriteria { year: Some(2021), ..Default::default() };
        assert!(criteria.matches(&movie(1, &[], Some("2021-09-15"), None)));
        assert!(!criteria.matches(&movie(2, &[], Some("2020-01-01"), None)));
        assert!(!criteria.matches(&movie(3, &[], None, None)));
    }

    #[test]
    fn test_undefined_rating_counts_as_zero() {
        let unrated = movie(1, &[], None, None);
        let strict = FilterCriteria { min_rating: 5.0, ..Default::default() };
        let lenient = FilterCriteria { min_rating: 0.0, ..Default::default() };
        assert!(!strict.matches(&unrated));
        assert!(lenient.matches(&unrated));
        assert!(strict.matches(&movie(2, &[], None, Some(5.0))));
        assert!(!strict.matches(&movie(3, &[], None, Some(4.5))));
    }

    #[test]
    fn test_combined_criteria() {
        let items = vec![
            movie(1, &[28], Some("2021-05-01"), Some(7.0)),
            movie(2, &[28], Some("2021-05-01"), Some(4.0)),
            movie(3, &[35], Some("2021-05-01"), Some(8.0)),
            movie(4, &[28], Some("2019-05-01"), Some(9.0)),
        ];
        let criteria = FilterCriteria { genre: Some(28), year: Some(2021), min_rating: 5.0 };
        assert_eq!(filter_indices(&items, &criteria), vec![0]);
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let items: Vec<CatalogItem> = (0..20)
            .map(|id| movie(id, &[id % 3], Some("2020-01-01"), Some((id % 10) as f32)))
            .collect();
        let criteria = FilterCriteria { genre: Some(1), year: None, min_rating: 3.0 };
        let first = filter_indices(&items, &criteria);
        let second = filter_indices(&items, &criteria);
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }
}
