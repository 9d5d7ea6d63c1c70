//! Request payload shapes
//!
//! A shape is a plain data definition for one request/response payload, with
//! no behavior attached. Each shape carries its canonical field list: the
//! wire spelling used in JSON and the display label used in error maps.
//!
//! Shapes are created per request, never mutated after creation, and
//! discarded at the end of the request scope.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// One field of a shape: the JSON wire name and the display label reported
/// in validation error maps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Canonical JSON key (e.g. `invoiceNumber`)
    pub wire: &'static str,
    /// Label used in the error map (e.g. `InvoiceNumber`)
    pub label: &'static str,
}

impl Field {
    pub const fn new(wire: &'static str, label: &'static str) -> Self {
        Self { wire, label }
    }
}

/// Trait implemented by every request payload shape
///
/// `NAME` is the resource key used in success envelopes
/// (`{"message": ..., "customer": {...}}`); `FIELDS` is the canonical field
/// list in declaration order, which also fixes the evaluation order of the
/// declarative constraint tables.
pub trait Shape: Serialize + DeserializeOwned + Clone + PartialEq {
    const NAME: &'static str;
    const FIELDS: &'static [Field];
}

/// Payload for `POST /customers`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerCreateRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl Shape for CustomerCreateRequest {
    const NAME: &'static str = "customer";
    const FIELDS: &'static [Field] = &[Field::new("name", "Name"), Field::new("email", "Email")];
}

/// Payload for `PUT /customers/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerUpdateRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl Shape for CustomerUpdateRequest {
    const NAME: &'static str = "customer";
    const FIELDS: &'static [Field] = &[Field::new("name", "Name"), Field::new("email", "Email")];
}

/// Payload for `POST /invoices`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceCreateRequest {
    #[serde(default)]
    pub invoice_number: String,
    pub invoice_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub customer_id: i64,
    #[serde(default)]
    pub total_amount: f64,
}

impl Shape for InvoiceCreateRequest {
    const NAME: &'static str = "invoice";
    const FIELDS: &'static [Field] = &[
        Field::new("invoiceNumber", "InvoiceNumber"),
        Field::new("invoiceDate", "InvoiceDate"),
        Field::new("dueDate", "DueDate"),
        Field::new("customerId", "CustomerId"),
        Field::new("totalAmount", "TotalAmount"),
    ];
}

/// Kind of telephone number attached to a customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TelephoneType {
    Mobile,
    Work,
    DirectDial,
}

impl TelephoneType {
    /// All accepted wire spellings, in declaration order
    pub const VARIANTS: &'static [&'static str] = &["Mobile", "Work", "DirectDial"];
}

/// Payload for `POST /telephones`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelephoneCreateRequest {
    #[serde(default)]
    pub customer_id: i64,
    #[serde(rename = "type")]
    pub phone_type: Option<TelephoneType>,
    #[serde(default)]
    pub number: String,
}

impl Shape for TelephoneCreateRequest {
    const NAME: &'static str = "telephone";
    const FIELDS: &'static [Field] = &[
        Field::new("customerId", "CustomerId"),
        Field::new("type", "Type"),
        Field::new("number", "Number"),
    ];
}
