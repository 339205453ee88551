//! Server-rendered result pages.
//!
//! Pure display: the success page reads a terminal identifier from the URL
//! query and the cancel page shows a static message. Neither touches the
//! database or the processor; the recorded outcome arrives independently
//! through the webhook.

use axum::extract::Query;
use axum::response::Html;
use serde::Deserialize;

/// Query parameters on the success redirect.
#[derive(Debug, Deserialize)]
pub struct SuccessQuery {
    /// Hosted checkout session ID (hosted path).
    #[serde(default)]
    pub session_id: Option<String>,
    /// Payment intent ID (embedded card path).
    #[serde(default)]
    pub payment_intent: Option<String>,
}

/// Success page.
pub async fn payment_success(Query(query): Query<SuccessQuery>) -> Html<String> {
    let reference = query.payment_intent.or(query.session_id);

    let reference_block = reference.map_or_else(String::new, |id| {
        format!(
            "<p class=\"reference\">Reference: <code>{}</code></p>",
            escape_html(&id)
        )
    });

    Html(render_page(
        "Payment Successful!",
        "Your payment has been processed successfully. Thank you for your purchase!",
        &reference_block,
    ))
}

/// Cancellation page.
pub async fn payment_cancel() -> Html<String> {
    Html(render_page(
        "Payment Cancelled",
        "Your payment was cancelled. No charges were made to your account.",
        "",
    ))
}

fn render_page(title: &str, message: &str, extra: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body>\n\
         <main>\n\
         <h1>{title}</h1>\n\
         <p>{message}</p>\n\
         {extra}\n\
         <p><a href=\"/\">Make Another Payment</a></p>\n\
         </main>\n\
         </body>\n\
         </html>\n"
    )
}

/// Escape query-derived text before embedding it in HTML.
fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
