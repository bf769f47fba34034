//! Customer reviews proxy.
//!
//! Reviews come from the Google Places API (v1) through a `ReviewSource`, get sorted newest
//! first, filtered to five-star ratings and reshaped into `AppReview`. `ReviewsCache` keeps the
//! last good result for a configurable TTL.
//!
//! The whole check-fetch-store sequence runs under one async mutex, so a burst of requests on
//! an expired cache produces a single upstream call.

pub mod google;
pub mod handlers;

use std::sync::{Arc, LazyLock};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info, warn};

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

#[derive(Debug, Error)]
pub enum ReviewsError {
    #[error("Reviews API key or place id is not configured")]
    NotConfigured,

    #[error("Reviews API error (status {status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

// ────────────────────────────────────────────────────────────────────────────
// Upstream (Places v1) shapes
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorAttribution {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub photo_uri: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewText {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacesReview {
    #[serde(default)]
    pub relative_publish_time_description: Option<String>,
    pub rating: f64,
    #[serde(default)]
    pub text: Option<ReviewText>,
    #[serde(default)]
    pub author_attribution: Option<AuthorAttribution>,
    /// RFC 3339 timestamp.
    #[serde(default)]
    pub publish_time: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Our shape
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppReview {
    pub id: String,
    pub author_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_photo_url: Option<String>,
    pub rating: u8,
    pub relative_time_description: String,
    pub text: String,
    /// Unix seconds.
    pub time: i64,
}

fn publish_time(review: &PlacesReview) -> Option<DateTime<Utc>> {
    review
        .publish_time
        .as_deref()
        .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
        .map(|t| t.with_timezone(&Utc))
}

/// Sorts newest first, keeps five-star reviews and reshapes them.
/// `now` (unix seconds) stands in for reviews without a publish time.
pub fn transform_reviews(mut raw: Vec<PlacesReview>, now: i64) -> Vec<AppReview> {
    raw.sort_by_key(|r| std::cmp::Reverse(publish_time(r).map_or(0, |t| t.timestamp_millis())));

    raw.into_iter()
        .filter(|r| r.rating == 5.0)
        .enumerate()
        .map(|(index, review)| {
            let time = publish_time(&review).map_or(now, |t| t.timestamp());
            let author = review.author_attribution.unwrap_or_default();
            let author_name = author
                .display_name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "Anonymous".to_string());
            let id = format!(
                "v1-{time}-{}-{index}",
                WHITESPACE_RE.replace_all(&author_name, "-")
            );
            AppReview {
                id,
                author_name,
                author_url: author.uri,
                profile_photo_url: author.photo_uri,
                rating: 5,
                relative_time_description: review
                    .relative_publish_time_description
                    .unwrap_or_default(),
                text: review.text.map(|t| t.text).unwrap_or_default(),
                time,
            }
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Source trait + cache
// ────────────────────────────────────────────────────────────────────────────

/// Where raw reviews come from. `Ok(None)` means the upstream answered without a reviews list.
#[async_trait]
pub trait ReviewSource: Send + Sync {
    async fn fetch(&self) -> Result<Option<Vec<PlacesReview>>, ReviewsError>;
}

struct CachedReviews {
    reviews: Arc<Vec<AppReview>>,
    fetched_at: Instant,
}

pub struct ReviewsCache {
    source: Arc<dyn ReviewSource>,
    ttl: Duration,
    entry: Mutex<Option<CachedReviews>>,
}

impl ReviewsCache {
    /// A zero `ttl` disables caching.
    pub fn new(source: Arc<dyn ReviewSource>, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            entry: Mutex::new(None),
        }
    }

    pub async fn get(&self) -> Result<Arc<Vec<AppReview>>, ReviewsError> {
        let mut entry = self.entry.lock().await;

        if !self.ttl.is_zero() {
            if let Some(cached) = entry.as_ref() {
                if cached.fetched_at.elapsed() < self.ttl {
                    debug!("Reviews cache hit");
                    return Ok(Arc::clone(&cached.reviews));
                }
            }
        }

        debug!("Reviews cache miss, fetching from source");
        let Some(raw) = self.source.fetch().await? else {
            warn!("Reviews source returned no reviews list");
            return Ok(Arc::new(Vec::new()));
        };

        let fetched = raw.len();
        let reviews = Arc::new(transform_reviews(raw, Utc::now().timestamp()));
        info!("Fetched {fetched} reviews, kept {} five-star", reviews.len());

        if !self.ttl.is_zero() {
            *entry = Some(CachedReviews {
                reviews: Arc::clone(&reviews),
                fetched_at: Instant::now(),
            });
        }
        Ok(reviews)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn review(author: Option<&str>, rating: f64, time: Option<&str>) -> PlacesReview {
        PlacesReview {
            relative_publish_time_description: Some("a week ago".to_string()),
            rating,
            text: Some(ReviewText {
                text: "Great work".to_string(),
            }),
            author_attribution: author.map(|a| AuthorAttribution {
                display_name: Some(a.to_string()),
                uri: Some("https://example.com/a".to_string()),
                photo_uri: None,
            }),
            publish_time: time.map(str::to_string),
        }
    }

    struct CountingSource {
        calls: AtomicUsize,
        reviews: Option<Vec<PlacesReview>>,
    }

    #[async_trait]
    impl ReviewSource for CountingSource {
        async fn fetch(&self) -> Result<Option<Vec<PlacesReview>>, ReviewsError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.reviews.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl ReviewSource for FailingSource {
        async fn fetch(&self) -> Result<Option<Vec<PlacesReview>>, ReviewsError> {
            Err(ReviewsError::NotConfigured)
        }
    }

    fn counting(reviews: Option<Vec<PlacesReview>>) -> Arc<CountingSource> {
        Arc::new(CountingSource {
            calls: AtomicUsize::new(0),
            reviews,
        })
    }

    #[test]
    fn test_transform_sorts_newest_first_and_keeps_five_stars() {
        let raw = vec![
            review(Some("Old Timer"), 5.0, Some("2023-01-01T00:00:00Z")),
            review(Some("Grumpy"), 2.0, Some("2024-06-01T00:00:00Z")),
            review(Some("Newest Fan"), 5.0, Some("2024-05-01T12:00:00Z")),
        ];
        let out = transform_reviews(raw, 0);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].author_name, "Newest Fan");
        assert_eq!(out[1].author_name, "Old Timer");
        assert_eq!(out[0].time, 1_714_564_800);
        assert_eq!(out[0].id, "v1-1714564800-Newest-Fan-0");
        assert_eq!(out[1].id, "v1-1672531200-Old-Timer-1");
    }

    #[test]
    fn test_transform_defaults() {
        let mut raw = review(None, 5.0, None);
        raw.text = None;
        raw.relative_publish_time_description = None;
        let out = transform_reviews(vec![raw], 42);
        assert_eq!(out[0].author_name, "Anonymous");
        assert_eq!(out[0].time, 42);
        assert_eq!(out[0].text, "");
        assert_eq!(out[0].relative_time_description, "");
        assert_eq!(out[0].id, "v1-42-Anonymous-0");
        assert!(out[0].author_url.is_none());
    }

    #[test]
    fn test_undated_reviews_sort_last() {
        let raw = vec![
            review(Some("Undated"), 5.0, None),
            review(Some("Dated"), 5.0, Some("2020-01-01T00:00:00Z")),
        ];
        let out = transform_reviews(raw, 0);
        assert_eq!(out[0].author_name, "Dated");
    }

    #[test]
    fn test_places_json_shape_parses() {
        let json = r#"{
            "rating": 5,
            "relativePublishTimeDescription": "2 days ago",
            "text": { "text": "Fixed our boiler", "languageCode": "en" },
            "authorAttribution": { "displayName": "Pat", "photoUri": "https://p" },
            "publishTime": "2024-05-01T12:00:00Z"
        }"#;
        let parsed: PlacesReview = serde_json::from_str(json).unwrap();
        let out = transform_reviews(vec![parsed], 0);
        assert_eq!(out[0].profile_photo_url.as_deref(), Some("https://p"));
        assert_eq!(out[0].text, "Fixed our boiler");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cache_hit_within_ttl_and_refetch_after() {
        let source = counting(Some(vec![review(Some("A"), 5.0, None)]));
        let cache = ReviewsCache::new(source.clone(), Duration::from_secs(3600));

        cache.get().await.unwrap();
        cache.get().await.unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        tokio::time::advance(Duration::from_secs(3601)).await;
        cache.get().await.unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_zero_ttl_disables_cache() {
        let source = counting(Some(vec![]));
        let cache = ReviewsCache::new(source.clone(), Duration::ZERO);
        cache.get().await.unwrap();
        cache.get().await.unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_missing_reviews_list_not_cached() {
        let source = counting(None);
        let cache = ReviewsCache::new(source.clone(), Duration::from_secs(60));
        assert!(cache.get().await.unwrap().is_empty());
        cache.get().await.unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_concurrent_misses_fetch_once() {
        let source = counting(Some(vec![review(Some("A"), 5.0, None)]));
        let cache = Arc::new(ReviewsCache::new(source.clone(), Duration::from_secs(60)));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                tokio::spawn(async move { cache.get().await.map(|r| r.len()) })
            })
            .collect();
        for h in handles {
            assert_eq!(h.await.unwrap().unwrap(), 1);
        }
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_source_error_propagates() {
        let cache = ReviewsCache::new(Arc::new(FailingSource), Duration::from_secs(60));
        assert!(matches!(cache.get().await, Err(ReviewsError::NotConfigured)));
    }
}
