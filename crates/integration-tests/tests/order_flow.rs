//! Integration tests for the catalog, cart, and order composer together.
//!
//! These exercise the shopping flow at the library level: pick products
//! from the catalog, fill the cart, validate the form, and compose the
//! outbound message and link.

use art_haus_core::{
    AddMode, Cart, Catalog, CheckoutForm, ItemSnapshot, NavigationKind, OrderComposer,
    OrderLine, Price, ProductId, ScrollMemory,
};

fn snapshot(catalog: &Catalog, id: &str) -> ItemSnapshot {
    ItemSnapshot::from(catalog.get(id).expect("product should exist"))
}

fn form() -> CheckoutForm {
    CheckoutForm {
        full_name: "Jane Doe".to_string(),
        phone: "+1 555 0100".to_string(),
        address: "1 Main St".to_string(),
        notes: None,
    }
}

// =============================================================================
// Cart Checkout Tests
// =============================================================================

#[test]
fn test_cart_checkout_message() {
    let catalog = Catalog::builtin();
    let mut cart = Cart::new();
    cart.add(snapshot(&catalog, "golden-bear"), 2, AddMode::Accumulate);
    cart.add(snapshot(&catalog, "noir-bot"), 1, AddMode::Accumulate);

    let contact = form().validate().expect("form should be valid");
    let order = OrderComposer::default().prepare(&cart.order_lines(), cart.total(), &contact);

    assert!(order.message.contains("• Golden Bear x2 = $179.98"));
    assert!(order.message.contains("• Noir Bot x1 = $119.99"));
    assert!(order.message.contains("💰 Total: $299.97"));
    assert!(order.redirect_url.starts_with("https://wa.me/96170073526?text="));
}

#[test]
fn test_redirect_url_decodes_to_message() {
    let catalog = Catalog::builtin();
    let mut cart = Cart::new();
    cart.add(snapshot(&catalog, "shadow-cat"), 3, AddMode::Accumulate);

    let contact = form()
        .validate()
        .expect("form should be valid")
        .with_notes("Gift wrap & card, please?");
    let order = OrderComposer::default().prepare(&cart.order_lines(), cart.total(), &contact);

    let (_, encoded) = order
        .redirect_url
        .split_once("?text=")
        .expect("url should carry the message");
    let decoded = urlencoding::decode(encoded).expect("message should decode");
    assert_eq!(decoded, order.message);
    assert!(order.message.contains("📝 Notes: Gift wrap & card, please?"));
}

#[test]
fn test_cart_edits_flow_into_total() {
    let catalog = Catalog::builtin();
    let bear = ProductId::from("golden-bear");
    let bunny = ProductId::from("bronze-bunny");
    let mut cart = Cart::new();

    cart.add(snapshot(&catalog, "golden-bear"), 1, AddMode::Accumulate);
    cart.add(snapshot(&catalog, "bronze-bunny"), 1, AddMode::Accumulate);
    cart.increase(&bear);
    cart.increase(&bear);
    cart.decrease(&bunny);
    cart.decrease(&bunny);

    assert_eq!(cart.get(&bear).map(|l| l.quantity), Some(3));
    assert_eq!(cart.get(&bunny).map(|l| l.quantity), Some(1));
    assert_eq!(cart.item_count(), 4);
    assert_eq!(cart.total(), Price::from_cents(3 * 8999 + 7999));

    cart.remove(&bear);
    assert_eq!(cart.total(), Price::from_cents(7999));
}

#[test]
fn test_invalid_form_blocks_order() {
    let mut form = form();
    form.phone = "   ".to_string();

    let errors = form.validate().expect_err("blank phone should fail");
    assert_eq!(errors.len(), 1);
}

// =============================================================================
// Buy Now Tests
// =============================================================================

#[test]
fn test_buy_now_matches_cart_of_one_product() {
    let catalog = Catalog::builtin();
    let product = catalog.get("bronze-bunny").expect("product should exist");
    let contact = form().validate().expect("form should be valid");
    let composer = OrderComposer::default();

    let line = OrderLine::single(product.name.clone(), 2, product.price);
    let direct = composer.prepare(&[line.clone()], line.subtotal, &contact);

    let mut cart = Cart::new();
    cart.add(ItemSnapshot::from(product), 2, AddMode::Accumulate);
    let via_cart = composer.prepare(&cart.order_lines(), cart.total(), &contact);

    assert_eq!(direct, via_cart);
}

// =============================================================================
// Scroll Memory Tests
// =============================================================================

#[test]
#[allow(clippy::float_cmp)]
fn test_back_navigation_restores_offset() {
    let mut memory = ScrollMemory::new();

    memory.leave("/", 1200.0).expect("offset should record");
    assert_eq!(memory.enter("/products/golden-bear", NavigationKind::Push), 0.0);

    memory
        .leave("/products/golden-bear", 400.0)
        .expect("offset should record");
    assert_eq!(memory.enter("/", NavigationKind::Pop), 1200.0);
    assert_eq!(memory.enter("/", NavigationKind::Push), 0.0);
}
