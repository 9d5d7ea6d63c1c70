//! Request handlers and the route composition root
//!
//! Validators and the route table are assembled here once at process start
//! and shared read-only afterwards. The same customer shapes are exposed
//! under two route prefixes bound to different strategies: `/customers`
//! runs the declarative constraint tables, `/customers-alt` the composition
//! rule chains. The two surfaces stay fully independent.
//!
//! The strategies intentionally diverge on one point: only the composition
//! chain consults the disposable-email domain blocklist.

use crate::config::ServiceConfig;
use crate::core::parse::parse_body;
use crate::core::response::Outcome;
use crate::core::shape::{
    CustomerCreateRequest, CustomerUpdateRequest, InvoiceCreateRequest, Shape,
    TelephoneCreateRequest, TelephoneType,
};
use crate::core::validation::constraints::{
    email_format, email_regex, length_between, matches, max_length, one_of, person_name_regex,
    positive_int, required,
};
use crate::core::validation::{CompositionValidator, DeclarativeValidator, ValidationStrategy};
use crate::dispatch::{Handler, RequestContext, RouteTable};
use axum::http::Method;
use serde_json::json;
use std::sync::Arc;

/// Build a handler that parses, validates with the bound strategy, and
/// echoes the validated value
fn validated_echo<T>(strategy: Arc<dyn ValidationStrategy<T>>, message: &'static str) -> Handler
where
    T: Shape + Send + Sync + 'static,
{
    Arc::new(move |ctx: &RequestContext| {
        let value: T = match parse_body(&ctx.body) {
            Ok(v) => v,
            Err(e) => return Outcome::ParseFailed(e),
        };

        let result = strategy.validate(&value);
        if !result.passed() {
            tracing::debug!(
                resource = T::NAME,
                fields = result.errors.len(),
                "validation failed"
            );
            return Outcome::Invalid(result);
        }

        match serde_json::to_value(&value) {
            Ok(echoed) => Outcome::Success {
                message: message.to_string(),
                resource: Some((T::NAME, echoed)),
            },
            Err(e) => Outcome::Fault(format!("echo serialization failed: {}", e)),
        }
    })
}

fn get_customer_stub() -> Handler {
    // No store backs this service; every lookup misses
    Arc::new(|ctx: &RequestContext| Outcome::NotFound {
        resource: "customer",
        id: ctx.params.int("id").unwrap_or(0),
    })
}

fn list_customers_stub() -> Handler {
    Arc::new(|_ctx: &RequestContext| Outcome::Success {
        message: "0 customers found.".to_string(),
        resource: Some(("customers", json!([]))),
    })
}

fn delete_customer_stub() -> Handler {
    Arc::new(|ctx: &RequestContext| Outcome::Success {
        message: format!("Customer {} deleted.", ctx.params.int("id").unwrap_or(0)),
        resource: None,
    })
}

/// Declarative constraint table for a customer shape
macro_rules! customer_constraint_table {
    ($shape:ty) => {
        DeclarativeValidator::<$shape>::new()
            .field(
                "name",
                vec![
                    required(),
                    length_between(2, 200),
                    matches(person_name_regex().clone(), "contains invalid characters."),
                ],
            )
            .field("email", vec![required(), email_format(), max_length(200)])
    };
}

/// Composition rule chain for a customer shape
///
/// Same coverage as the declarative table, plus the blocklist rule.
macro_rules! customer_rule_chain {
    ($shape:ty, $blocked:expr) => {{
        let blocked: Vec<String> = $blocked.to_vec();
        CompositionValidator::<$shape>::new()
            .must(
                "Name",
                |c: &$shape| !c.name.trim().is_empty(),
                "Name is required.",
            )
            .when(
                |c: &$shape| !c.name.trim().is_empty(),
                |v| {
                    v.must(
                        "Name",
                        |c: &$shape| (2..=200).contains(&c.name.len()),
                        "Name must be between 2 and 200 characters.",
                    )
                    .must(
                        "Name",
                        |c: &$shape| person_name_regex().is_match(&c.name),
                        "Name contains invalid characters.",
                    )
                },
            )
            .must(
                "Email",
                |c: &$shape| !c.email.trim().is_empty(),
                "Email is required.",
            )
            .when(
                |c: &$shape| !c.email.trim().is_empty(),
                move |v| {
                    v.must(
                        "Email",
                        |c: &$shape| email_regex().is_match(&c.email),
                        "Invalid email address format.",
                    )
                    .must(
                        "Email",
                        |c: &$shape| c.email.len() <= 200,
                        "Email must not exceed 200 characters.",
                    )
                    .must(
                        "Email",
                        move |c: &$shape| !domain_is_blocked(&c.email, &blocked),
                        "Disposable email addresses are not allowed.",
                    )
                },
            )
    }};
}

fn domain_is_blocked(email: &str, blocked: &[String]) -> bool {
    let Some(domain) = email.rsplit('@').next() else {
        return false;
    };
    blocked.iter().any(|b| b.eq_ignore_ascii_case(domain))
}

/// Declarative table for `POST /customers`
pub fn customer_create_declarative() -> DeclarativeValidator<CustomerCreateRequest> {
    customer_constraint_table!(CustomerCreateRequest)
}

/// Declarative table for `PUT /customers/{id}`
pub fn customer_update_declarative() -> DeclarativeValidator<CustomerUpdateRequest> {
    customer_constraint_table!(CustomerUpdateRequest)
}

/// Composition chain for `POST /customers-alt`
pub fn customer_create_composition(
    blocked: &[String],
) -> CompositionValidator<CustomerCreateRequest> {
    customer_rule_chain!(CustomerCreateRequest, blocked)
}

/// Composition chain for `PUT /customers-alt/{id}`
pub fn customer_update_composition(
    blocked: &[String],
) -> CompositionValidator<CustomerUpdateRequest> {
    customer_rule_chain!(CustomerUpdateRequest, blocked)
}

/// Composition chain for `POST /invoices`
///
/// The due-date ordering rule reads its sibling field, which is what the
/// rule-chain strategy is for.
pub fn invoice_create_composition() -> CompositionValidator<InvoiceCreateRequest> {
    CompositionValidator::new()
        .must(
            "InvoiceNumber",
            |i: &InvoiceCreateRequest| !i.invoice_number.trim().is_empty(),
            "InvoiceNumber is required.",
        )
        .must(
            "InvoiceNumber",
            |i: &InvoiceCreateRequest| i.invoice_number.len() <= 50,
            "InvoiceNumber must not exceed 50 characters.",
        )
        .must(
            "InvoiceDate",
            |i: &InvoiceCreateRequest| i.invoice_date.is_some(),
            "InvoiceDate is required.",
        )
        .must(
            "DueDate",
            |i: &InvoiceCreateRequest| i.due_date.is_some(),
            "DueDate is required.",
        )
        .when(
            |i: &InvoiceCreateRequest| i.invoice_date.is_some() && i.due_date.is_some(),
            |v| {
                v.must(
                    "DueDate",
                    |i: &InvoiceCreateRequest| i.due_date > i.invoice_date,
                    "DueDate must be later than InvoiceDate.",
                )
            },
        )
        .must(
            "CustomerId",
            |i: &InvoiceCreateRequest| i.customer_id > 0,
            "CustomerId must be greater than zero.",
        )
        .must(
            "TotalAmount",
            |i: &InvoiceCreateRequest| i.total_amount >= 0.0,
            "TotalAmount must be zero or greater.",
        )
}

/// Declarative table for `POST /telephones`
pub fn telephone_create_declarative() -> DeclarativeValidator<TelephoneCreateRequest> {
    DeclarativeValidator::new()
        .field("customerId", vec![positive_int()])
        .field("type", vec![required(), one_of(TelephoneType::VARIANTS)])
        .field("number", vec![required(), max_length(50)])
}

/// Assemble the static route table
///
/// Called once at process start; the table is immutable afterwards and
/// lookups are pure reads.
pub fn build_routes(config: &ServiceConfig) -> RouteTable {
    let blocked = &config.blocked_email_domains;

    let create: Arc<dyn ValidationStrategy<CustomerCreateRequest>> =
        Arc::new(customer_create_declarative());
    let update: Arc<dyn ValidationStrategy<CustomerUpdateRequest>> =
        Arc::new(customer_update_declarative());
    let alt_create: Arc<dyn ValidationStrategy<CustomerCreateRequest>> =
        Arc::new(customer_create_composition(blocked));
    let alt_update: Arc<dyn ValidationStrategy<CustomerUpdateRequest>> =
        Arc::new(customer_update_composition(blocked));
    let invoice: Arc<dyn ValidationStrategy<InvoiceCreateRequest>> =
        Arc::new(invoice_create_composition());
    let telephone: Arc<dyn ValidationStrategy<TelephoneCreateRequest>> =
        Arc::new(telephone_create_declarative());

    RouteTable::builder()
        .route(
            Method::POST,
            "/customers",
            validated_echo(create, "Customer validation passed."),
        )
        .route(
            Method::PUT,
            "/customers/{id:int}",
            validated_echo(update, "Customer update validation passed."),
        )
        .route(Method::GET, "/customers/{id:int}", get_customer_stub())
        .route(Method::GET, "/customers", list_customers_stub())
        .route(
            Method::DELETE,
            "/customers/{id:int}",
            delete_customer_stub(),
        )
        .route(
            Method::POST,
            "/customers-alt",
            validated_echo(alt_create, "Customer validation passed."),
        )
        .route(
            Method::PUT,
            "/customers-alt/{id:int}",
            validated_echo(alt_update, "Customer update validation passed."),
        )
        .route(
            Method::POST,
            "/invoices",
            validated_echo(invoice, "Invoice validation passed."),
        )
        .route(
            Method::POST,
            "/telephones",
            validated_echo(telephone, "Telephone validation passed."),
        )
        .build()
}
