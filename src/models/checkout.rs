use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{error::AppError, models::CartSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryRegion {
    Tripoli,
    North,
    Other,
}

impl DeliveryRegion {
    pub const ALL: [DeliveryRegion; 3] = [Self::Tripoli, Self::North, Self::Other];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Tripoli => "tripoli",
            Self::North => "north",
            Self::Other => "other",
        }
    }

    pub fn fee(&self) -> Decimal {
        match self {
            Self::Tripoli => Decimal::from(3),
            Self::North => Decimal::from(4),
            Self::Other => Decimal::from(5),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Tripoli => "Tripoli & Suburbs",
            Self::North => "Rest of North",
            Self::Other => "Beirut / South / Chouf / Bikaa",
        }
    }
}

impl fmt::Display for DeliveryRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for DeliveryRegion {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "tripoli" => Ok(Self::Tripoli),
            "north" => Ok(Self::North),
            "other" => Ok(Self::Other),
            other => Err(AppError::BadRequest(format!(
                "Unknown delivery region '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RegionOption {
    pub code: &'static str,
    pub label: &'static str,
    pub fee: Decimal,
}

pub fn region_options() -> Vec<RegionOption> {
    DeliveryRegion::ALL
        .iter()
        .map(|region| RegionOption {
            code: region.code(),
            label: region.display_name(),
            fee: region.fee(),
        })
        .collect()
}

#[derive(Debug, Deserialize, Validate)]
pub struct ShippingForm {
    #[validate(length(min = 1, max = 100))]
    #[serde(default)]
    pub name: String,
    #[validate(length(min = 1, max = 30))]
    #[serde(default)]
    pub phone: String,
    #[validate(length(min = 1, max = 255))]
    #[serde(default)]
    pub address: String,
    #[validate(length(min = 1, max = 100))]
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub region: String,
}

impl ShippingForm {
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
            region: self.region.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub name: String,
    pub qty: i32,
    pub total: Decimal,
}

/// Everything the confirmation page, the email and the PDF need about one order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceContext {
    pub order_id: String,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub region_display: String,
    pub items_summary: Vec<InvoiceItem>,
    pub subtotal: Decimal,
    pub delivery_fee: Decimal,
    pub final_total: Decimal,
}

impl InvoiceContext {
    pub fn new(
        order_id: String,
        form: &ShippingForm,
        region: DeliveryRegion,
        summary: &CartSummary,
    ) -> Self {
        let items_summary = summary
            .lines
            .iter()
            .map(|line| InvoiceItem {
                name: line.product.name.clone(),
                qty: line.quantity,
                total: line.subtotal,
            })
            .collect();

        let delivery_fee = region.fee();

        Self {
            order_id,
            name: form.name.clone(),
            phone: form.phone.clone(),
            address: form.address.clone(),
            city: form.city.clone(),
            region_display: region.display_name().to_string(),
            items_summary,
            subtotal: summary.total,
            delivery_fee,
            final_total: summary.total + delivery_fee,
        }
    }

    pub fn email_subject(&self) -> String {
        format!("Order Confirmation: {}", self.order_id)
    }

    pub fn attachment_name(&self) -> String {
        format!("Invoice_{}.pdf", self.order_id)
    }

    pub fn email_body(&self, store_name: &str, with_attachment: bool) -> String {
        let mut items = String::new();
        for item in &self.items_summary {
            items.push_str(&format!("- {} (x{}): ${}\n", item.name, item.qty, item.total));
        }

        let attachment_line = if with_attachment {
            "We have attached your invoice to this email.\n\n"
        } else {
            ""
        };

        format!(
            "Hello {name},\n\n\
             Thank you for your order!\n\
             Your Order ID is: {order_id}\n\n\
             {attachment_line}\
             ORDER SUMMARY\n\
             -------------\n\
             {items}\n\
             Subtotal:     ${subtotal}\n\
             Delivery Fee: ${fee} ({region})\n\
             TOTAL:        ${total}\n\n\
             Customer phone: {phone}\n\
             Address: {address}, {city}\n\n\
             Best regards,\n\
             {store_name} Team",
            name = self.name,
            order_id = self.order_id,
            attachment_line = attachment_line,
            items = items,
            subtotal = self.subtotal,
            fee = self.delivery_fee,
            region = self.region_display,
            total = self.final_total,
            phone = self.phone,
            address = self.address,
            city = self.city,
            store_name = store_name,
        )
    }
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub items: Vec<crate::models::CartLineResponse>,
    pub total_price: Decimal,
    pub regions: Vec<RegionOption>,
}

#[derive(Debug, Serialize)]
pub struct OrderSuccessResponse {
    #[serde(flatten)]
    pub invoice: InvoiceContext,
    pub notification_sent: bool,
}

/// Session payload for the one-shot confirmation page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacedOrder {
    pub invoice: InvoiceContext,
    pub notification_sent: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Cart, Product};
    use chrono::Utc;

    fn form() -> ShippingForm {
        ShippingForm {
            name: "Lina".to_string(),
            phone: "70123456".to_string(),
            address: "Main St".to_string(),
            city: "Tripoli".to_string(),
            region: "tripoli".to_string(),
        }
    }

    fn summary() -> CartSummary {
        let mut cart = Cart::default();
        cart.add_one(1, 2);
        cart.add_one(1, 2);

        let product = Product {
            id: 1,
            category_id: 1,
            name: "Pearl Necklace".to_string(),
            description: String::new(),
            price: Decimal::new(1000, 2),
            image: None,
            is_available: true,
            stock: 2,
            created_at: Utc::now(),
        };

        CartSummary::build(&cart, vec![product])
    }

    #[test]
    fn region_fees_match_table() {
        assert_eq!("tripoli".parse::<DeliveryRegion>().unwrap().fee(), Decimal::from(3));
        assert_eq!("north".parse::<DeliveryRegion>().unwrap().fee(), Decimal::from(4));
        assert_eq!("other".parse::<DeliveryRegion>().unwrap().fee(), Decimal::from(5));
    }

    #[test]
    fn unknown_region_is_an_error() {
        assert!("beirut".parse::<DeliveryRegion>().is_err());
        assert!("".parse::<DeliveryRegion>().is_err());
    }

    #[test]
    fn region_labels() {
        assert_eq!(DeliveryRegion::Tripoli.to_string(), "Tripoli & Suburbs");
        assert_eq!(DeliveryRegion::Other.display_name(), "Beirut / South / Chouf / Bikaa");
        assert_eq!(region_options().len(), 3);
    }

    #[test]
    fn invoice_totals_include_delivery_fee() {
        let invoice = InvoiceContext::new(
            "RS-12345".to_string(),
            &form(),
            DeliveryRegion::North,
            &summary(),
        );

        assert_eq!(invoice.subtotal, Decimal::new(2000, 2));
        assert_eq!(invoice.delivery_fee, Decimal::from(4));
        assert_eq!(invoice.final_total.to_string(), "24.00");
        assert_eq!(invoice.region_display, "Rest of North");
        assert_eq!(invoice.items_summary[0].qty, 2);
    }

    #[test]
    fn email_lists_items_and_totals() {
        let invoice = InvoiceContext::new(
            "RS-12345".to_string(),
            &form(),
            DeliveryRegion::Tripoli,
            &summary(),
        );

        let body = invoice.email_body("Sparkles", true);

        assert_eq!(invoice.email_subject(), "Order Confirmation: RS-12345");
        assert_eq!(invoice.attachment_name(), "Invoice_RS-12345.pdf");
        assert!(body.contains("- Pearl Necklace (x2): $20.00"));
        assert!(body.contains("Delivery Fee: $3 (Tripoli & Suburbs)"));
        assert!(body.contains("TOTAL:        $23.00"));
        assert!(body.contains("attached your invoice"));
        assert!(!invoice.email_body("Sparkles", false).contains("attached"));
    }

    #[test]
    fn blank_shipping_fields_fail_validation() {
        let mut incomplete = form();
        incomplete.address = "   ".to_string();

        let errors = incomplete.trimmed().validate().unwrap_err();
        assert!(errors.field_errors().contains_key("address"));
    }
}
