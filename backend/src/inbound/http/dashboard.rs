//! Server-rendered dashboard page.
//!
//! `GET /` shows the session display name and, for a signed-in user, their
//! active subscriptions with spend totals. The store is only read; a store
//! failure, or rows whose totals overflow, render an empty list instead of an
//! error page.

use actix_web::{HttpResponse, get, http::header::ContentType, web};
use serde::Serialize;
use tera::{Context, Tera};
use tracing::warn;

use crate::domain::{Error, SpendSummary, Subscription, summarise};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

const TEMPLATE_NAME: &str = "dashboard.html";

#[derive(Debug, Serialize)]
struct SubscriptionRow {
    name: String,
    price: String,
    billing_cycle: String,
    next_billing_date: String,
}

impl From<&Subscription> for SubscriptionRow {
    fn from(value: &Subscription) -> Self {
        Self {
            name: value.name.clone().unwrap_or_default(),
            price: format!("{:.2}", value.price),
            billing_cycle: value.billing_cycle.as_str().to_owned(),
            next_billing_date: value
                .next_billing_date
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct Totals {
    total_subscriptions: usize,
    monthly_total: String,
    yearly_total: String,
}

impl From<&SpendSummary> for Totals {
    fn from(value: &SpendSummary) -> Self {
        Self {
            total_subscriptions: value.total_subscriptions,
            monthly_total: format!("{:.2}", value.monthly_total),
            yearly_total: format!("{:.2}", value.yearly_total),
        }
    }
}

/// Compiled dashboard template.
pub struct DashboardRenderer {
    tera: Tera,
}

impl DashboardRenderer {
    /// Compile the embedded template.
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_template(
            TEMPLATE_NAME,
            include_str!("../../../templates/dashboard.html"),
        )?;
        Ok(Self { tera })
    }

    /// Render the page for `user`, their active `subscriptions`, and the
    /// `summary` computed from them.
    pub fn render(
        &self,
        user: Option<&str>,
        subscriptions: &[Subscription],
        summary: &SpendSummary,
    ) -> Result<String, tera::Error> {
        let rows: Vec<SubscriptionRow> = subscriptions.iter().map(SubscriptionRow::from).collect();
        let mut context = Context::new();
        context.insert("user", &user);
        context.insert("subscriptions", &rows);
        context.insert("totals", &Totals::from(summary));
        self.tera.render(TEMPLATE_NAME, &context)
    }
}

/// Render the dashboard.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Dashboard page", content_type = "text/html", body = String),
        (status = 500, description = "Internal server error")
    ),
    tags = ["dashboard"],
    operation_id = "dashboard",
    security([])
)]
#[get("/")]
pub async fn dashboard(
    state: web::Data<HttpState>,
    renderer: web::Data<DashboardRenderer>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user = session.display_name()?;
    let subscriptions = match session.user_id()? {
        Some(owner) => match state.subscriptions_query.list_active(&owner).await {
            Ok(rows) => rows,
            Err(error) => {
                warn!(user_id = %owner, error = %error, "dashboard falling back to empty list");
                Vec::new()
            }
        },
        None => Vec::new(),
    };
    let (subscriptions, summary) = match summarise(&subscriptions) {
        Ok(summary) => (subscriptions, summary),
        Err(error) => {
            warn!(error = %error, "dashboard totals overflowed; rendering empty list");
            (Vec::new(), SpendSummary::empty())
        }
    };
    let page = renderer
        .render(user.as_deref(), &subscriptions, &summary)
        .map_err(|error| Error::internal(format!("failed to render dashboard: {error}")))?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(page))
}
