//! Read-only artwork catalog.
//!
//! The marketplace UI browses a seeded in-memory dataset instead of a real
//! commerce backend. The catalog hands out records verbatim; nothing in
//! this workspace mutates it.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use artvista_core::{ArtworkId, CategoryId, Price, UserId};

use crate::models::CartItemSource;

/// A listed piece of art.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Artwork {
    /// Opaque artwork id.
    pub id: ArtworkId,
    /// Title.
    pub title: String,
    /// Long-form description.
    pub description: String,
    /// Asking price; `None` for pieces shown but not priced.
    pub price: Option<Price>,
    /// Image URL.
    pub image_url: String,
    /// Category name the piece is listed under.
    pub category: String,
    /// Whether the piece can be purchased.
    pub for_sale: bool,
    /// Selling artist's account id.
    pub artist_id: UserId,
    /// Selling artist's display name.
    pub artist_name: String,
    /// When the piece was listed.
    pub created_at: DateTime<Utc>,
}

impl Artwork {
    /// The cart-facing fields of this piece, if it can be purchased.
    ///
    /// Returns `None` for pieces that are not for sale or carry no price;
    /// those can be inquired about but never added to a cart.
    #[must_use]
    pub fn to_cart_item(&self) -> Option<CartItemSource> {
        if !self.for_sale {
            return None;
        }
        let unit_price = self.price?;

        Some(CartItemSource {
            artwork_id: self.id.clone(),
            title: self.title.clone(),
            unit_price,
            image_url: self.image_url.clone(),
            artist_id: self.artist_id.clone(),
            artist_name: self.artist_name.clone(),
        })
    }
}

/// A browsing category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// The seeded artwork dataset.
pub struct Catalog {
    artworks: Vec<Artwork>,
    categories: Vec<Category>,
}

impl Catalog {
    /// An empty catalog.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            artworks: Vec::new(),
            categories: Vec::new(),
        }
    }

    /// The catalog shipped with the demo dataset.
    #[must_use]
    pub fn with_seed_data() -> Self {
        Self {
            artworks: seed_artworks(),
            categories: seed_categories(),
        }
    }

    /// All artworks, in listing order.
    #[must_use]
    pub fn artworks(&self) -> &[Artwork] {
        &self.artworks
    }

    /// All categories.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up one artwork by id.
    #[must_use]
    pub fn artwork(&self, id: &ArtworkId) -> Option<&Artwork> {
        self.artworks.iter().find(|a| &a.id == id)
    }

    /// Artworks listed under a category.
    #[must_use]
    pub fn by_category(&self, category: &str) -> Vec<&Artwork> {
        self.artworks
            .iter()
            .filter(|a| a.category.eq_ignore_ascii_case(category))
            .collect()
    }

    /// Artworks listed by one artist.
    #[must_use]
    pub fn by_artist(&self, artist_id: &UserId) -> Vec<&Artwork> {
        self.artworks
            .iter()
            .filter(|a| &a.artist_id == artist_id)
            .collect()
    }

    /// Artworks currently purchasable.
    #[must_use]
    pub fn for_sale(&self) -> Vec<&Artwork> {
        self.artworks
            .iter()
            .filter(|a| a.for_sale && a.price.is_some())
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::with_seed_data()
    }
}

/// Fixed listing timestamp for seed records.
fn listed_at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 9, 0, 0)
        .single()
        .unwrap_or_default()
}

fn seed_categories() -> Vec<Category> {
    [
        ("1", "Paintings"),
        ("2", "Sculpture"),
        ("3", "Digital Art"),
        ("4", "Photography"),
        ("5", "Mixed Media"),
        ("6", "Illustration"),
        ("7", "Abstract"),
        ("8", "Portrait"),
    ]
    .into_iter()
    .map(|(id, name)| Category {
        id: CategoryId::new(id),
        name: name.to_owned(),
    })
    .collect()
}

#[allow(clippy::too_many_lines)]
fn seed_artworks() -> Vec<Artwork> {
    let mara = (UserId::new("2"), "Mara Ellison");
    let diego = (UserId::new("3"), "Diego Fuentes");

    let piece = |id: &str,
                 title: &str,
                 description: &str,
                 price: Option<Price>,
                 image: &str,
                 category: &str,
                 artist: &(UserId, &str),
                 listed: DateTime<Utc>| Artwork {
        id: ArtworkId::new(id),
        title: title.to_owned(),
        description: description.to_owned(),
        price,
        image_url: format!("https://images.artvista.app/{image}"),
        category: category.to_owned(),
        for_sale: price.is_some(),
        artist_id: artist.0.clone(),
        artist_name: artist.1.to_owned(),
        created_at: listed,
    };

    vec![
        piece(
            "1",
            "Tidal Memory",
            "Layered oil washes in blues and rust, painted over a summer on the Atlantic coast.",
            Some(Price::usd(1200)),
            "tidal-memory.jpg",
            "Paintings",
            &mara,
            listed_at(2024, 2, 12),
        ),
        piece(
            "2",
            "Concrete Rhythm",
            "Black and white study of repeating balconies on a brutalist housing block.",
            Some(Price::usd(850)),
            "concrete-rhythm.jpg",
            "Photography",
            &diego,
            listed_at(2024, 3, 3),
        ),
        piece(
            "3",
            "Neon Arroyo",
            "Digital landscape of a dry riverbed lit by imagined neon signage.",
            Some(Price::usd(750)),
            "neon-arroyo.jpg",
            "Digital Art",
            &mara,
            listed_at(2024, 4, 21),
        ),
        piece(
            "4",
            "Cast Iron Dancer",
            "Small cast figure mid-turn, one of an edition of five.",
            Some(Price::usd(2200)),
            "cast-iron-dancer.jpg",
            "Sculpture",
            &diego,
            listed_at(2024, 5, 9),
        ),
        piece(
            "5",
            "Colour Study IV",
            "Large canvas of stacked colour fields, fourth in an ongoing series.",
            Some(Price::usd(1800)),
            "colour-study-iv.jpg",
            "Abstract",
            &mara,
            listed_at(2024, 6, 30),
        ),
        piece(
            "6",
            "Winter Stillness",
            "A frozen lake at dawn. Exhibition piece, not currently for sale.",
            None,
            "winter-stillness.jpg",
            "Photography",
            &diego,
            listed_at(2024, 8, 17),
        ),
        piece(
            "7",
            "Glasshouse Portrait",
            "Portrait in a botanical garden, the sitter half-hidden by palm leaves.",
            Some(Price::usd(950)),
            "glasshouse-portrait.jpg",
            "Portrait",
            &mara,
            listed_at(2024, 10, 2),
        ),
        piece(
            "8",
            "Fragment Series",
            "Collage of torn ledger paper, thread and gouache on board.",
            Some(Price::usd(640)),
            "fragment-series.jpg",
            "Mixed Media",
            &diego,
            listed_at(2025, 1, 14),
        ),
    ]
}
