//! Integration tests for the cart aggregate.
//!
//! Drives the cart from catalog records the way the gallery pages do and
//! checks totals, persistence and independence from the session.

use artvista_core::ArtworkId;
use artvista_integration_tests::TestContext;
use artvista_storefront::storage::{KeyValueStore, keys};
use rust_decimal::Decimal;

fn add_from_catalog(ctx: &TestContext, id: &str) {
    let artwork = ctx
        .catalog
        .artwork(&ArtworkId::new(id))
        .expect("seeded artwork exists");
    let item = artwork
        .to_cart_item()
        .expect("seeded artwork is purchasable");
    ctx.cart.add_item(item);
}

#[test]
fn test_add_from_catalog_and_totals() {
    let ctx = TestContext::new();

    add_from_catalog(&ctx, "1"); // $1200
    add_from_catalog(&ctx, "1");
    add_from_catalog(&ctx, "2"); // $850

    let lines = ctx.cart.lines();
    assert_eq!(lines.len(), 2, "repeat adds merge into one line");
    assert_eq!(lines.first().expect("line present").quantity, 2);

    let totals = ctx.cart.totals();
    assert_eq!(totals.item_count, 3);
    assert_eq!(totals.total_price.amount, Decimal::from(3250));
}

#[test]
fn test_unpriced_artwork_cannot_reach_the_cart() {
    let ctx = TestContext::new();
    let exhibition_piece = ctx
        .catalog
        .artwork(&ArtworkId::new("6"))
        .expect("seeded artwork exists");
    assert!(exhibition_piece.to_cart_item().is_none());
}

#[test]
fn test_cart_survives_reload() {
    let ctx = TestContext::new();
    add_from_catalog(&ctx, "4"); // $2200
    add_from_catalog(&ctx, "8"); // $640
    ctx.cart.set_quantity(&ArtworkId::new("8"), 3);

    let reloaded = ctx.reload();
    assert_eq!(reloaded.cart.lines(), ctx.cart.lines());

    let totals = reloaded.cart.totals();
    assert_eq!(totals.item_count, 4);
    assert_eq!(totals.total_price.amount, Decimal::from(4120));
}

#[test]
fn test_corrupt_cart_record_restores_empty() {
    let ctx = TestContext::new();
    add_from_catalog(&ctx, "1");

    ctx.store
        .set(keys::CART, "[[[[not a cart")
        .expect("memory store write");

    let reloaded = ctx.reload();
    assert!(reloaded.cart.lines().is_empty());
    assert_eq!(reloaded.cart.totals().item_count, 0);
    // The bad record was purged.
    assert_eq!(ctx.store.get(keys::CART).expect("memory store read"), None);
}

#[tokio::test]
async fn test_cart_is_independent_of_session() {
    let ctx = TestContext::new();
    add_from_catalog(&ctx, "3"); // $750

    ctx.session
        .login_with_password("priya@example.com", "pw")
        .await
        .expect("seeded buyer logs in");
    assert_eq!(ctx.cart.totals().item_count, 1);

    ctx.session.logout();
    assert_eq!(
        ctx.cart.totals().item_count,
        1,
        "logout leaves the cart alone"
    );

    // And the stored records live under disjoint keys.
    assert!(ctx.store.get(keys::CART).expect("read").is_some());
    assert!(ctx.store.get(keys::SESSION).expect("read").is_none());

    // A failed login does not disturb it either.
    let _ = ctx
        .session
        .login_with_password("ghost@x.com", "pw")
        .await
        .expect_err("unknown email fails");
    assert_eq!(ctx.cart.totals().item_count, 1);
}

#[test]
fn test_quantity_edge_cases_end_to_end() {
    let ctx = TestContext::new();
    add_from_catalog(&ctx, "5"); // $1800

    ctx.cart.set_quantity(&ArtworkId::new("5"), 0);
    assert!(ctx.cart.lines().is_empty());

    add_from_catalog(&ctx, "5");
    ctx.cart.set_quantity(&ArtworkId::new("5"), -7);
    assert!(ctx.cart.lines().is_empty());

    // Removing or resizing lines that are not there is quietly ignored.
    ctx.cart.remove_item(&ArtworkId::new("5"));
    ctx.cart.set_quantity(&ArtworkId::new("5"), 2);
    assert!(ctx.cart.lines().is_empty());
}

#[test]
fn test_clear_persists_empty_snapshot() {
    let ctx = TestContext::new();
    add_from_catalog(&ctx, "1");
    add_from_catalog(&ctx, "2");

    ctx.cart.clear();

    let reloaded = ctx.reload();
    assert!(reloaded.cart.lines().is_empty());
}
