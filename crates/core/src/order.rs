//! Order message composition.
//!
//! Orders are not submitted anywhere by this crate. Instead the order details
//! and the shopper's contact fields are rendered into a human-readable message,
//! which is percent-encoded into a link to the store's messaging account. The
//! caller opens that link; delivery is never confirmed.
//!
//! Both checkout flows go through the same composer: the cart checkout passes
//! every cart line, the "buy now" flow passes a single line.
//!
//! ```
//! use art_haus_core::{ContactDetails, OrderComposer, OrderLine, Price};
//!
//! let composer = OrderComposer::default();
//! let lines = [OrderLine::new("Golden Bear", 2, Price::from_cents(17998))];
//! let contact = ContactDetails::new("Jane Doe", "+96170000000", "Beirut");
//!
//! let order = composer.prepare(&lines, Price::from_cents(17998), &contact);
//! assert!(order.message.contains("• Golden Bear x2 = $179.98"));
//! assert!(order.redirect_url.starts_with("https://wa.me/96170073526?text="));
//! ```

use serde::Serialize;

use crate::types::Price;

/// Store name used in the greeting line by default.
pub const DEFAULT_STORE_NAME: &str = "Art Haus";

/// Messaging number orders are sent to by default.
pub const DEFAULT_BUSINESS_NUMBER: &str = "+96170073526";

/// Messaging deep-link base by default.
pub const DEFAULT_REDIRECT_BASE: &str = "https://wa.me";

/// Errors that can occur when parsing a [`BusinessNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BusinessNumberError {
    /// The input has no digits at all.
    #[error("business number must contain at least one digit")]
    NoDigits,
}

/// The store's messaging phone number, reduced to its digits.
///
/// ```
/// use art_haus_core::BusinessNumber;
///
/// let number = BusinessNumber::parse("+961 70-073 526").unwrap_or_default();
/// assert_eq!(number.as_str(), "96170073526");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessNumber(String);

impl BusinessNumber {
    /// Parse a phone number, stripping every non-digit character.
    ///
    /// # Errors
    ///
    /// Returns [`BusinessNumberError::NoDigits`] if nothing is left after
    /// stripping.
    pub fn parse(s: &str) -> Result<Self, BusinessNumberError> {
        let digits: String = s.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return Err(BusinessNumberError::NoDigits);
        }
        Ok(Self(digits))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BusinessNumber {
    fn default() -> Self {
        Self(
            DEFAULT_BUSINESS_NUMBER
                .chars()
                .filter(char::is_ascii_digit)
                .collect(),
        )
    }
}

/// One line of an order: what, how many, and for how much in total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderLine {
    pub name: String,
    pub quantity: u32,
    /// Unit price times quantity.
    pub subtotal: Price,
}

impl OrderLine {
    #[must_use]
    pub fn new(name: impl Into<String>, quantity: u32, subtotal: Price) -> Self {
        Self {
            name: name.into(),
            quantity,
            subtotal,
        }
    }

    /// A single-product line priced at `unit_price` times `quantity`.
    #[must_use]
    pub fn single(name: impl Into<String>, quantity: u32, unit_price: Price) -> Self {
        Self::new(name, quantity, unit_price.times(quantity))
    }
}

/// Contact fields the order is placed under.
///
/// Normally produced by [`CheckoutForm::validate`](crate::CheckoutForm::validate),
/// which guarantees the fields are trimmed, present, and within bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactDetails {
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub notes: Option<String>,
}

impl ContactDetails {
    #[must_use]
    pub fn new(
        full_name: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            phone: phone.into(),
            address: address.into(),
            notes: None,
        }
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// A composed order, ready to hand to the shopper's browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundOrder {
    /// The plain-text message.
    pub message: String,
    /// Messaging link carrying the encoded message.
    pub redirect_url: String,
}

/// Renders orders into messages and messaging links.
#[derive(Debug, Clone)]
pub struct OrderComposer {
    store_name: String,
    business_number: BusinessNumber,
    redirect_base: String,
}

impl OrderComposer {
    /// Create a composer for a store.
    ///
    /// A trailing `/` on `redirect_base` is ignored.
    #[must_use]
    pub fn new(
        store_name: impl Into<String>,
        business_number: BusinessNumber,
        redirect_base: &str,
    ) -> Self {
        Self {
            store_name: store_name.into(),
            business_number,
            redirect_base: redirect_base.trim_end_matches('/').to_owned(),
        }
    }

    /// Render the order message.
    ///
    /// The output depends only on the arguments, so equal inputs always give
    /// byte-identical messages.
    #[must_use]
    pub fn compose_message(
        &self,
        lines: &[OrderLine],
        total: Price,
        contact: &ContactDetails,
    ) -> String {
        let mut out = vec![
            format!("Hello {} 👋", self.store_name),
            "I would like to place an order.".to_owned(),
            String::new(),
            format!("👤 Name: {}", contact.full_name),
            format!("📞 Phone: {}", contact.phone),
            format!("📍 Address: {}", contact.address),
        ];

        if let Some(notes) = contact.notes.as_deref().map(str::trim)
            && !notes.is_empty()
        {
            out.push(format!("📝 Notes: {notes}"));
        }

        out.push(String::new());
        out.push("📦 Items:".to_owned());
        out.extend(
            lines
                .iter()
                .map(|l| format!("• {} x{} = {}", l.name, l.quantity, l.subtotal)),
        );
        out.push(String::new());
        out.push(format!("💰 Total: {total}"));
        out.push(String::new());
        out.push("Thank you!".to_owned());

        out.join("\n")
    }

    /// Build the messaging link for an already-encoded message.
    #[must_use]
    pub fn build_redirect_url(&self, encoded_message: &str) -> String {
        format!(
            "{}/{}?text={}",
            self.redirect_base,
            self.business_number.as_str(),
            encoded_message
        )
    }

    /// Compose, encode, and link in one step.
    #[must_use]
    pub fn prepare(
        &self,
        lines: &[OrderLine],
        total: Price,
        contact: &ContactDetails,
    ) -> OutboundOrder {
        let message = self.compose_message(lines, total, contact);
        let redirect_url = self.build_redirect_url(&encode_message(&message));
        OutboundOrder {
            message,
            redirect_url,
        }
    }
}

impl Default for OrderComposer {
    fn default() -> Self {
        Self::new(
            DEFAULT_STORE_NAME,
            BusinessNumber::default(),
            DEFAULT_REDIRECT_BASE,
        )
    }
}

/// Percent-encode a message for use as a query parameter value.
///
/// Everything except unreserved characters (`A-Z a-z 0-9 - _ . ~`) is
/// encoded, including newlines and the UTF-8 bytes of emoji.
#[must_use]
pub fn encode_message(message: &str) -> String {
    urlencoding::encode(message).into_owned()
}
