//! Three-step checkout flow: shipping, payment, confirmation.
//!
//! `Confirmation` is terminal. Once reached, every further input is refused
//! and a new session must be started to buy again.

use super::cart::CartViewEntry;
use super::errors::DomainError;
use super::user::ClientProfile;

const CARD_DIGITS: usize = 16;
const EXPIRY_DIGITS: usize = 4;
const CVV_DIGITS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStep {
    Shipping,
    Payment,
    Confirmation,
}

impl CheckoutStep {
    pub fn as_str(self) -> &'static str {
        match self {
            CheckoutStep::Shipping => "shipping",
            CheckoutStep::Payment => "payment",
            CheckoutStep::Confirmation => "confirmation",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShippingDetails {
    pub name: String,
    pub address: String,
    pub city: String,
    pub phone: String,
}

impl ShippingDetails {
    pub fn is_complete(&self) -> bool {
        [&self.name, &self.address, &self.city, &self.phone]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

/// Simulated card data. Never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentDetails {
    pub card_number: String,
    pub expiry: String,
    pub cvv: String,
}

impl PaymentDetails {
    /// Build payment details from raw input, applying the input masks.
    pub fn from_input(card_number: &str, expiry: &str, cvv: &str) -> Self {
        Self {
            card_number: format_card_number(card_number),
            expiry: format_expiry(expiry),
            cvv: format_cvv(cvv),
        }
    }

    pub fn is_complete(&self) -> bool {
        [&self.card_number, &self.expiry, &self.cvv]
            .iter()
            .all(|field| !field.is_empty())
    }
}

fn digits(input: &str, max: usize) -> String {
    input.chars().filter(char::is_ascii_digit).take(max).collect()
}

/// Keep at most 16 digits and group them in blocks of 4.
pub fn format_card_number(input: &str) -> String {
    let digits: Vec<char> = digits(input, CARD_DIGITS).chars().collect();
    digits
        .chunks(4)
        .map(|block| block.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Keep at most 4 digits, rendered as `MM/YY` once two digits are present.
pub fn format_expiry(input: &str) -> String {
    let digits = digits(input, EXPIRY_DIGITS);
    if digits.len() < 2 {
        return digits;
    }
    let (month, year) = digits.split_at(2);
    format!("{month}/{year}")
}

pub fn format_cvv(input: &str) -> String {
    digits(input, CVV_DIGITS)
}

#[derive(Debug, Clone)]
pub struct CheckoutSession {
    step: CheckoutStep,
    shipping: ShippingDetails,
    payment: PaymentDetails,
    processing: bool,
}

impl CheckoutSession {
    /// Open a session for the given cart contents. An empty cart has nothing
    /// to buy and never enters the flow.
    pub fn start(items: &[CartViewEntry]) -> Result<Self, DomainError> {
        if items.is_empty() {
            return Err(DomainError::ValidationFailed(
                "there are no products to buy".into(),
            ));
        }
        Ok(Self {
            step: CheckoutStep::Shipping,
            shipping: ShippingDetails::default(),
            payment: PaymentDetails::default(),
            processing: false,
        })
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    pub fn shipping(&self) -> &ShippingDetails {
        &self.shipping
    }

    pub fn payment(&self) -> &PaymentDetails {
        &self.payment
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn is_complete(&self) -> bool {
        self.step == CheckoutStep::Confirmation
    }

    /// Fill shipping fields from a signed-in client's saved profile.
    pub fn prefill(&mut self, profile: &ClientProfile) {
        if self.step != CheckoutStep::Shipping {
            return;
        }
        self.shipping.name = profile.name.clone();
        if let Some(address) = &profile.address {
            self.shipping.address = address.clone();
        }
        if let Some(city) = &profile.city {
            self.shipping.city = city.clone();
        }
        if let Some(phone) = &profile.phone {
            self.shipping.phone = phone.clone();
        }
    }

    fn expect_step(&self, expected: CheckoutStep) -> Result<(), DomainError> {
        if self.step != expected || self.processing {
            return Err(DomainError::Conflict(format!(
                "checkout is at step '{}'",
                self.step.as_str()
            )));
        }
        Ok(())
    }

    pub fn submit_shipping(&mut self, details: ShippingDetails) -> Result<(), DomainError> {
        self.expect_step(CheckoutStep::Shipping)?;
        self.shipping = details;
        if !self.shipping.is_complete() {
            return Err(DomainError::ValidationFailed(
                "please fill in all shipping fields".into(),
            ));
        }
        self.step = CheckoutStep::Payment;
        Ok(())
    }

    /// Return from payment to shipping, keeping the entered shipping data.
    /// Returns whether the step changed.
    pub fn back(&mut self) -> bool {
        if self.step == CheckoutStep::Payment && !self.processing {
            self.step = CheckoutStep::Shipping;
            return true;
        }
        false
    }

    /// Validate payment data and enter the processing sub-state.
    pub fn begin_payment(&mut self, details: PaymentDetails) -> Result<(), DomainError> {
        self.expect_step(CheckoutStep::Payment)?;
        self.payment = details;
        if !self.payment.is_complete() {
            return Err(DomainError::ValidationFailed(
                "please fill in all payment fields".into(),
            ));
        }
        self.processing = true;
        Ok(())
    }

    pub fn complete(&mut self) -> Result<(), DomainError> {
        if !self.processing {
            return Err(DomainError::Conflict("payment is not being processed".into()));
        }
        self.processing = false;
        self.step = CheckoutStep::Confirmation;
        Ok(())
    }

    /// Leave the processing sub-state without confirming.
    pub fn abort_processing(&mut self) {
        self.processing = false;
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;
    use uuid::Uuid;

    use super::*;
    use crate::domain::cart::CartEntry;
    use crate::domain::catalog::Product;

    fn one_item() -> Vec<CartViewEntry> {
        let product_id = Uuid::new_v4();
        vec![CartViewEntry {
            entry: CartEntry {
                id: Uuid::new_v4(),
                user_id: Uuid::new_v4(),
                product_id,
                quantity: 1,
            },
            product: Product {
                id: product_id,
                name: "Tee".into(),
                description: String::new(),
                price: BigDecimal::from_str("10.00").expect("valid decimal"),
                stock: 5,
                image_url: String::new(),
                category_id: Uuid::new_v4(),
            },
        }]
    }

    fn shipping() -> ShippingDetails {
        ShippingDetails {
            name: "Ana".into(),
            address: "Av. Principal 123".into(),
            city: "Lima".into(),
            phone: "999 999 999".into(),
        }
    }

    fn payment() -> PaymentDetails {
        PaymentDetails::from_input("4111111111111111", "1228", "123")
    }

    #[test]
    fn empty_cart_never_starts() {
        assert!(matches!(
            CheckoutSession::start(&[]),
            Err(DomainError::ValidationFailed(_))
        ));
    }

    #[test]
    fn each_missing_shipping_field_blocks_transition() {
        let blanks: [fn(&mut ShippingDetails); 4] = [
            |s| s.name.clear(),
            |s| s.address.clear(),
            |s| s.city.clear(),
            |s| s.phone = "  ".into(),
        ];
        for blank in blanks {
            let mut session = CheckoutSession::start(&one_item()).expect("start");
            let mut details = shipping();
            blank(&mut details);
            assert!(session.submit_shipping(details).is_err());
            assert_eq!(session.step(), CheckoutStep::Shipping);
        }
    }

    #[test]
    fn back_keeps_shipping_data() {
        let mut session = CheckoutSession::start(&one_item()).expect("start");
        session.submit_shipping(shipping()).expect("shipping");
        assert_eq!(session.step(), CheckoutStep::Payment);
        assert!(session.back());
        assert_eq!(session.step(), CheckoutStep::Shipping);
        assert_eq!(session.shipping(), &shipping());
    }

    #[test]
    fn incomplete_payment_stays_on_payment() {
        let mut session = CheckoutSession::start(&one_item()).expect("start");
        session.submit_shipping(shipping()).expect("shipping");
        let result = session.begin_payment(PaymentDetails::from_input("4111", "", "123"));
        assert!(matches!(result, Err(DomainError::ValidationFailed(_))));
        assert_eq!(session.step(), CheckoutStep::Payment);
        assert!(!session.is_processing());
    }

    #[test]
    fn processing_blocks_back_and_resubmission() {
        let mut session = CheckoutSession::start(&one_item()).expect("start");
        session.submit_shipping(shipping()).expect("shipping");
        session.begin_payment(payment()).expect("payment");
        assert!(session.is_processing());
        assert!(!session.back());
        assert!(session.begin_payment(payment()).is_err());
    }

    #[test]
    fn confirmation_is_terminal() {
        let mut session = CheckoutSession::start(&one_item()).expect("start");
        session.submit_shipping(shipping()).expect("shipping");
        session.begin_payment(payment()).expect("payment");
        session.complete().expect("complete");
        assert_eq!(session.step(), CheckoutStep::Confirmation);

        assert!(!session.back());
        assert!(session.submit_shipping(shipping()).is_err());
        assert!(session.begin_payment(payment()).is_err());
        assert!(session.complete().is_err());
        assert_eq!(session.step(), CheckoutStep::Confirmation);
    }

    #[test]
    fn prefill_uses_saved_profile() {
        let mut session = CheckoutSession::start(&one_item()).expect("start");
        session.prefill(&ClientProfile {
            id: Uuid::new_v4(),
            name: "Ana".into(),
            email: "ana@example.com".into(),
            address: Some("Jr. Lima 45".into()),
            city: None,
            phone: Some("987".into()),
        });
        assert_eq!(session.shipping().name, "Ana");
        assert_eq!(session.shipping().address, "Jr. Lima 45");
        assert_eq!(session.shipping().city, "");
        assert_eq!(session.shipping().phone, "987");
    }

    #[test]
    fn card_number_is_grouped_and_truncated() {
        assert_eq!(format_card_number("4111-1111 1111 1111 9999"), "4111 1111 1111 1111");
        assert_eq!(format_card_number("12345"), "1234 5");
        assert_eq!(format_card_number(""), "");
    }

    #[test]
    fn expiry_is_masked_as_month_slash_year() {
        assert_eq!(format_expiry("1"), "1");
        assert_eq!(format_expiry("12"), "12/");
        assert_eq!(format_expiry("12/285"), "12/28");
    }

    #[test]
    fn cvv_keeps_three_digits() {
        assert_eq!(format_cvv("1a2b34"), "123");
    }
}
