//! Cart line item types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use artvista_core::{ArtworkId, CurrencyCode, Price, UserId};

/// One distinct artwork in the cart.
///
/// The artwork id is unique within the cart and the quantity is always at
/// least 1; the cart service removes the line instead of storing a zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartLine {
    /// Artwork this line refers to (unique key within the cart).
    pub artwork_id: ArtworkId,
    /// Artwork title, copied verbatim from the catalog.
    pub title: String,
    /// Unit price at the time the line was created.
    pub unit_price: Price,
    /// Artwork image URL.
    pub image_url: String,
    /// Selling artist's account id.
    pub artist_id: UserId,
    /// Selling artist's display name.
    pub artist_name: String,
    /// Number of units, always >= 1.
    pub quantity: u32,
}

/// The catalog-sourced fields of a line item, without a quantity.
///
/// What the presentation layer hands to `add_item`; the cart trusts these
/// fields verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemSource {
    pub artwork_id: ArtworkId,
    pub title: String,
    pub unit_price: Price,
    pub image_url: String,
    pub artist_id: UserId,
    pub artist_name: String,
}

impl CartItemSource {
    /// Turn the source into a line with the given quantity.
    #[must_use]
    pub fn into_line(self, quantity: u32) -> CartLine {
        CartLine {
            artwork_id: self.artwork_id,
            title: self.title,
            unit_price: self.unit_price,
            image_url: self.image_url,
            artist_id: self.artist_id,
            artist_name: self.artist_name,
            quantity,
        }
    }
}

/// Derived cart totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotals {
    /// Sum of quantities across all lines.
    pub item_count: u64,
    /// Sum of `unit_price * quantity` across all lines.
    pub total_price: Price,
}

impl CartTotals {
    /// Compute totals over a set of lines.
    ///
    /// An empty cart totals to zero in the default currency.
    #[must_use]
    pub fn compute(lines: &[CartLine]) -> Self {
        let item_count = lines.iter().map(|l| u64::from(l.quantity)).sum();
        let amount: Decimal = lines
            .iter()
            .map(|l| l.unit_price.amount * Decimal::from(l.quantity))
            .sum();
        let currency_code = lines
            .first()
            .map_or(CurrencyCode::default(), |l| l.unit_price.currency_code);

        Self {
            item_count,
            total_price: Price::new(amount, currency_code),
        }
    }
}
