//! HTML receipt renderer
//!
//! Standalone single-file HTML receipt carrying the same fields as the PDF
//! rendition. Selected via `receipt.format = html`.

use async_trait::async_trait;
use chrono::Utc;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use core_kernel::{
    AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};

use crate::adapters::{EVENT_DEPARTMENT, EVENT_INSTITUTE, EVENT_NAME};
use crate::ports::ReceiptRenderer;
use crate::receipt::{ReceiptData, RenderedReceipt};

/// Configuration for the HTML renderer
#[derive(Debug, Clone)]
pub struct HtmlRendererConfig {
    /// Directory the temp artifacts are written to
    pub temp_dir: PathBuf,
    /// Upper bound on one render, in seconds
    pub timeout_secs: u64,
}

impl Default for HtmlRendererConfig {
    fn default() -> Self {
        Self {
            temp_dir: std::env::temp_dir(),
            timeout_secs: 10,
        }
    }
}

/// Renders receipts as standalone HTML documents
#[derive(Debug)]
pub struct HtmlReceiptRenderer {
    config: HtmlRendererConfig,
}

impl HtmlReceiptRenderer {
    /// Creates a new HTML renderer with the given configuration
    pub fn new(config: HtmlRendererConfig) -> Self {
        Self { config }
    }
}

impl DomainPort for HtmlReceiptRenderer {}

#[async_trait]
impl HealthCheckable for HtmlReceiptRenderer {
    async fn health_check(&self) -> HealthCheckResult {
        let start = Instant::now();
        let (status, message) = match tokio::fs::create_dir_all(&self.config.temp_dir).await {
            Ok(()) => (AdapterHealth::Healthy, None),
            Err(e) => (
                AdapterHealth::Unhealthy,
                Some(format!("Temp dir unavailable: {}", e)),
            ),
        };

        HealthCheckResult {
            adapter_id: "html-receipt-renderer".to_string(),
            status,
            latency_ms: start.elapsed().as_millis() as u64,
            message,
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl ReceiptRenderer for HtmlReceiptRenderer {
    async fn render(&self, data: &ReceiptData) -> Result<RenderedReceipt, PortError> {
        let object_name = format!("{}.html", data.object_stem());
        let path = self.config.temp_dir.join(&object_name);
        let document = build_html(data);

        let write = async {
            tokio::fs::create_dir_all(&self.config.temp_dir).await?;
            tokio::fs::write(&path, document.as_bytes()).await
        };

        match tokio::time::timeout(Duration::from_secs(self.config.timeout_secs), write).await {
            Ok(Ok(())) => Ok(RenderedReceipt { path, object_name }),
            Ok(Err(e)) => Err(PortError::internal(format!("Receipt write failed: {}", e))),
            Err(_) => Err(PortError::Timeout {
                operation: "render_receipt".to_string(),
                duration_ms: self.config.timeout_secs * 1000,
            }),
        }
    }
}

fn build_html(data: &ReceiptData) -> String {
    let rows = |pairs: &[(&str, String)]| -> String {
        pairs
            .iter()
            .map(|(label, value)| {
                format!(
                    "      <tr><td class=\"label\">{}</td><td class=\"value\">{}</td></tr>\n",
                    escape_html(label),
                    escape_html(value)
                )
            })
            .collect()
    };

    let student_rows = rows(&[
        ("Name", data.student_name.clone()),
        ("University Roll No", data.roll_no.to_string()),
        ("Year", data.year.to_string()),
        ("Section", data.section.to_string()),
    ]);
    let payment_rows = rows(&[
        ("Payment Mode", data.mode.to_string()),
        ("Transaction ID", data.transaction_id.clone()),
        ("Amount Paid", data.amount_label()),
        ("Food Coupon", data.food_coupon_label().to_string()),
    ]);

    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title} Receipt</title>\n\
         <style>\n\
         body {{ font-family: 'Segoe UI', sans-serif; color: #333; max-width: 640px; margin: 40px auto; }}\n\
         h1 {{ margin-bottom: 0; }}\n\
         .muted {{ color: #666; margin-top: 4px; }}\n\
         .section {{ background: #E91E63; color: white; padding: 6px 10px; margin-top: 24px; font-weight: bold; }}\n\
         table {{ width: 100%; border-collapse: collapse; }}\n\
         td {{ padding: 6px 10px; }}\n\
         td.label {{ width: 40%; color: #555; }}\n\
         td.value {{ font-weight: bold; }}\n\
         </style>\n\
         </head>\n\
         <body>\n\
         <h1>{title}</h1>\n\
         <p class=\"muted\">{department}<br>{institute}</p>\n\
         <p><strong>Date:</strong> {date}</p>\n\
         <div class=\"section\">Student Details</div>\n\
         <table>\n{student_rows}    </table>\n\
         <div class=\"section\">Payment Details</div>\n\
         <table>\n{payment_rows}    </table>\n\
         </body>\n\
         </html>\n",
        title = escape_html(EVENT_NAME),
        department = escape_html(EVENT_DEPARTMENT),
        institute = escape_html(EVENT_INSTITUTE),
        date = data.date_label(),
        student_rows = student_rows,
        payment_rows = payment_rows,
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::PaymentMode;
    use core_kernel::{Currency, Money};
    use domain_student::{RollNo, Section, Year};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn sample_data(name: &str) -> ReceiptData {
        ReceiptData {
            student_name: name.to_string(),
            roll_no: RollNo::new("CS102"),
            year: Year::Third,
            section: Section::B,
            mode: PaymentMode::Online,
            transaction_id: "TXN42".to_string(),
            amount: Money::new(dec!(300), Currency::INR),
            food_coupon: true,
            payment_date: Utc::now(),
        }
    }

    #[test]
    fn test_html_contains_receipt_fields() {
        let document = build_html(&sample_data("Rohan Gupta"));

        assert!(document.contains("Rohan Gupta"));
        assert!(document.contains("CS102"));
        assert!(document.contains("300.00 /-"));
        assert!(document.contains("TXN42"));
        assert!(document.contains("Food Coupon"));
        assert!(document.contains("Yes"));
    }

    #[test]
    fn test_html_escapes_markup_in_names() {
        let document = build_html(&sample_data("<script>alert(1)</script>"));

        assert!(!document.contains("<script>"));
        assert!(document.contains("&lt;script&gt;"));
    }

    #[tokio::test]
    async fn test_render_writes_html_file() {
        let renderer = HtmlReceiptRenderer::new(HtmlRendererConfig {
            temp_dir: std::env::temp_dir().join(format!("html-render-{}", Uuid::new_v4())),
            timeout_secs: 10,
        });

        let rendered = renderer.render(&sample_data("Rohan Gupta")).await.unwrap();
        assert!(rendered.object_name.ends_with(".html"));

        let document = tokio::fs::read_to_string(&rendered.path).await.unwrap();
        assert!(document.starts_with("<!DOCTYPE html>"));

        tokio::fs::remove_file(&rendered.path).await.unwrap();
    }
}
