//! PDF receipt renderer
//!
//! Emits a minimal single-page PDF with uncompressed text streams: event
//! header, a student-details section, and a payment-details section. Only
//! the two standard Helvetica fonts are referenced, so the file needs no
//! embedded font program and every receipt field stays greppable in the
//! raw bytes.

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

/// Configuration for the PDF renderer
#[derive(Debug, Clone)]
pub struct PdfRendererConfig {
    /// Directory the temp artifacts are written to
    pub temp_dir: PathBuf,
    /// Upper bound on one render, in seconds
    pub timeout_secs: u64,
}

impl Default for PdfRendererConfig {
    fn default() -> Self {
        Self {
            temp_dir: std::env::temp_dir(),
            timeout_secs: 10,
        }
    }
}

/// Renders receipts as minimal single-page PDFs
#[derive(Debug)]
pub struct PdfReceiptRenderer {
    config: PdfRendererConfig,
}

impl PdfReceiptRenderer {
    /// Creates a new PDF renderer with the given configuration
    pub fn new(config: PdfRendererConfig) -> Self {
        Self { config }
    }
}

impl DomainPort for PdfReceiptRenderer {}

#[async_trait]
impl HealthCheckable for PdfReceiptRenderer {
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
            adapter_id: "pdf-receipt-renderer".to_string(),
            status,
            latency_ms: start.elapsed().as_millis() as u64,
            message,
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl ReceiptRenderer for PdfReceiptRenderer {
    async fn render(&self, data: &ReceiptData) -> Result<RenderedReceipt, PortError> {
        let object_name = format!("{}.pdf", data.object_stem());
        let path = self.config.temp_dir.join(&object_name);
        let bytes = build_pdf(data);

        let write = async {
            tokio::fs::create_dir_all(&self.config.temp_dir).await?;
            tokio::fs::write(&path, &bytes).await
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

/// Builds the complete PDF document for one receipt
fn build_pdf(data: &ReceiptData) -> Vec<u8> {
    let content = content_stream(data);
    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 595 842] \
         /Resources << /Font << /F1 4 0 R /F2 5 0 R >> >> /Contents 6 0 R >>"
            .to_string(),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold >>".to_string(),
        format!(
            "<< /Length {} >>\nstream\n{}endstream",
            content.len(),
            content
        ),
    ];

    let mut out: Vec<u8> = Vec::with_capacity(2048);
    out.extend_from_slice(b"%PDF-1.4\n");

    let mut offsets = Vec::with_capacity(objects.len());
    for (index, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", index + 1, body).as_bytes());
    }

    // Cross-reference entries are fixed-width 20-byte records.
    let xref_offset = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in &offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );
    out
}

fn content_stream(data: &ReceiptData) -> String {
    let mut ops = String::new();
    let mut y: u32 = 780;

    push_text(&mut ops, "F2", 20, 40, y, EVENT_NAME);
    y -= 22;
    push_text(&mut ops, "F1", 12, 40, y, EVENT_DEPARTMENT);
    y -= 16;
    push_text(&mut ops, "F1", 12, 40, y, EVENT_INSTITUTE);
    y -= 32;
    push_text(&mut ops, "F2", 12, 40, y, &format!("Date: {}", data.date_label()));
    y -= 36;

    push_text(&mut ops, "F2", 13, 40, y, "Student Details");
    y -= 24;
    let student_rows = [
        ("Name", data.student_name.clone()),
        ("University Roll No", data.roll_no.to_string()),
        ("Year", data.year.to_string()),
        ("Section", data.section.to_string()),
    ];
    for (label, value) in &student_rows {
        push_text(&mut ops, "F1", 12, 50, y, label);
        push_text(&mut ops, "F2", 12, 220, y, value);
        y -= 20;
    }
    y -= 14;

    push_text(&mut ops, "F2", 13, 40, y, "Payment Details");
    y -= 24;
    let payment_rows = [
        ("Payment Mode", data.mode.to_string()),
        ("Transaction ID", data.transaction_id.clone()),
        ("Amount Paid", data.amount_label()),
        ("Food Coupon", data.food_coupon_label().to_string()),
    ];
    for (label, value) in &payment_rows {
        push_text(&mut ops, "F1", 12, 50, y, label);
        push_text(&mut ops, "F2", 12, 220, y, value);
        y -= 20;
    }

    ops
}

fn push_text(ops: &mut String, font: &str, size: u32, x: u32, y: u32, value: &str) {
    ops.push_str(&format!(
        "BT /{} {} Tf {} {} Td ({}) Tj ET\n",
        font,
        size,
        x,
        y,
        escape_pdf_text(value)
    ));
}

// Literal strings delimit with parentheses, so those and the backslash must
// be escaped.
fn escape_pdf_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            c if c.is_control() => out.push(' '),
            c => out.push(c),
        }
    }
    out
}
