//! Entity types for the resources the client exposes.
//!
//! # Design
//! Responses only carry the fields a query selected, so every field is
//! optional and defaults to `None`. Unknown fields are ignored. Reference
//! fields hold the referenced entity's identifier. These shapes cover the
//! commonly used fields only; callers needing more can decode into their
//! own type through [`IgdbClient::endpoint`](crate::IgdbClient::endpoint).

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};
use crate::image::{self, Ratio, SizePreset};

/// A stored image reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Image {
    pub image_id: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub url: Option<String>,
}

impl Image {
    /// URL of this image rendered at `preset` and `ratio`.
    pub fn sized_url(&self, preset: SizePreset, ratio: Ratio) -> Result<String> {
        let id = self
            .image_id
            .as_deref()
            .ok_or(ApiError::EmptyField { what: "image id" })?;
        image::image_url(id, preset, ratio)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Game {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub url: Option<String>,
    pub summary: Option<String>,
    pub storyline: Option<String>,
    pub popularity: Option<f64>,
    pub rating: Option<f64>,
    pub rating_count: Option<u64>,
    pub first_release_date: Option<i64>,
    pub platforms: Option<Vec<u64>>,
    pub genres: Option<Vec<u64>>,
    pub developers: Option<Vec<u64>>,
    pub publishers: Option<Vec<u64>>,
    pub franchise: Option<u64>,
    pub cover: Option<Image>,
    pub screenshots: Option<Vec<Image>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Company {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub country: Option<u32>,
    pub website: Option<String>,
    pub start_date: Option<i64>,
    pub parent: Option<u64>,
    pub developed: Option<Vec<u64>>,
    pub published: Option<Vec<u64>>,
    pub logo: Option<Image>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Person {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub country: Option<u32>,
    pub games: Option<Vec<u64>>,
    pub mug_shot: Option<Image>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Review {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub url: Option<String>,
    pub game: Option<u64>,
    pub user: Option<u64>,
    pub platform: Option<u64>,
    pub likes: Option<u64>,
    pub views: Option<u64>,
    pub introduction: Option<String>,
    pub content: Option<String>,
    pub conclusion: Option<String>,
    pub positive_points: Option<String>,
    pub negative_points: Option<String>,
    pub created_at: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Platform {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub alternative_name: Option<String>,
    pub generation: Option<u32>,
    pub games: Option<Vec<u64>>,
    pub logo: Option<Image>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Franchise {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub games: Option<Vec<u64>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Character {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub akas: Option<Vec<String>>,
    pub games: Option<Vec<u64>>,
    pub mug_shot: Option<Image>,
}

/// A user-curated list of games.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameList {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub public: Option<bool>,
    pub games: Option<Vec<u64>>,
}
