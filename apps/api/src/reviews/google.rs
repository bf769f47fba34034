//! Google Places API (v1) review source.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error};

use crate::reviews::{PlacesReview, ReviewSource, ReviewsError};

const PLACES_API_URL: &str = "https://places.googleapis.com/v1/places";

/// Field mask requested from the Places API. `reviews.publishTime` drives newest-first sorting.
const FIELDS: &[&str] = &[
    "id",
    "displayName",
    "rating",
    "userRatingCount",
    "reviews.authorAttribution.displayName",
    "reviews.authorAttribution.uri",
    "reviews.authorAttribution.photoUri",
    "reviews.publishTime",
    "reviews.rating",
    "reviews.text.text",
    "reviews.relativePublishTimeDescription",
];

#[derive(Debug, Deserialize)]
struct PlaceDetails {
    #[serde(default)]
    reviews: Option<Vec<PlacesReview>>,
}

#[derive(Clone)]
pub struct GooglePlacesSource {
    client: Client,
    api_key: Option<String>,
    place_id: Option<String>,
}

impl GooglePlacesSource {
    pub fn new(api_key: Option<String>, place_id: Option<String>) -> Result<Self, ReviewsError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(15))
                .build()?,
            api_key,
            place_id,
        })
    }
}

#[async_trait]
impl ReviewSource for GooglePlacesSource {
    async fn fetch(&self) -> Result<Option<Vec<PlacesReview>>, ReviewsError> {
        let (Some(api_key), Some(place_id)) = (self.api_key.as_deref(), self.place_id.as_deref())
        else {
            error!("GOOGLE_PLACES_API_KEY or GOOGLE_PLACE_ID is not configured");
            return Err(ReviewsError::NotConfigured);
        };

        let fields = FIELDS.join(",");
        let response = self
            .client
            .get(format!("{PLACES_API_URL}/{place_id}"))
            .query(&[
                ("fields", fields.as_str()),
                ("key", api_key),
                ("languageCode", "en"),
            ])
            .header("content-type", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Places API returned {status}: {body}");
            return Err(ReviewsError::Upstream {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("upstream error")
                    .to_string(),
            });
        }

        let details: PlaceDetails = response.json().await?;
        debug!(
            "Places API returned {} reviews",
            details.reviews.as_ref().map_or(0, Vec::len)
        );
        Ok(details.reviews)
    }
}
