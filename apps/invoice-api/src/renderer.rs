//! Narrow interfaces to the external rendering collaborators.
//!
//! Template rendering and HTML-to-PDF conversion are NOT part of the core:
//! the core hands over computed data and does nothing with the results
//! except forward them. This module defines the two seams and ships one
//! minimal implementation of each:
//!
//! - [`TableTemplate`]: a built-in HTML table layout, enough for previews
//!   and for feeding the PDF renderer. Anything fancier replaces this impl,
//!   not the call sites.
//! - [`CommandPdfRenderer`]: pipes HTML through an external renderer binary
//!   (wkhtmltopdf-style: HTML on stdin, PDF on stdout).

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use quill_core::{CurrencyNames, InvoiceDetails, InvoiceTotals, LineItem, Money, TaxRate};

// =============================================================================
// Render Input
// =============================================================================

/// Everything the rendering layer receives: computed values plus
/// pass-through presentation metadata. The renderers never compute.
#[derive(Debug, Clone)]
pub struct InvoiceDocument {
    pub details: InvoiceDetails,
    pub currency: CurrencyNames,
    pub items: Vec<LineItem>,
    /// Rounded total per line, index-aligned with `items`.
    pub line_totals: Vec<Money>,
    pub tax_rate: TaxRate,
    pub totals: InvoiceTotals,
    /// None when the grand total exceeded the words bound.
    pub total_in_words: Option<String>,
}

// =============================================================================
// Ports
// =============================================================================

/// Renders an invoice document to HTML.
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, invoice: &InvoiceDocument) -> Result<String, RenderError>;
}

/// Converts HTML to a PDF document. External process or service.
#[async_trait]
pub trait PdfRenderer: Send + Sync {
    async fn render_pdf(&self, html: &str) -> Result<Vec<u8>, RenderError>;
}

/// Rendering errors.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to start renderer '{binary}': {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error talking to renderer: {0}")]
    Io(#[from] std::io::Error),

    #[error("Renderer exited with {status}: {detail}")]
    RendererFailed { status: String, detail: String },

    #[error("Renderer produced no output")]
    EmptyOutput,

    #[error("Renderer timed out after {limit:?}")]
    TimedOut { limit: Duration },
}

// =============================================================================
// Built-in HTML Template
// =============================================================================

/// Minimal built-in invoice layout: header, item table, totals block,
/// amount in words.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableTemplate;

impl TableTemplate {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for TableTemplate {
    fn render(&self, invoice: &InvoiceDocument) -> Result<String, RenderError> {
        let details = &invoice.details;
        let mut html = String::with_capacity(2048);

        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n");
        html.push_str(&format!("<title>Invoice {}</title>\n", escape(&details.invoice_number_or_draft())));
        html.push_str("</head>\n<body>\n");

        html.push_str(&format!("<h1>{}</h1>\n", escape(&details.brand_name)));
        html.push_str(&format!(
            "<p>Invoice {} — {}</p>\n",
            escape(&details.invoice_number_or_draft()),
            escape(&details.date_or_today())
        ));
        if !details.client_name.is_empty() {
            html.push_str(&format!("<p>Billed to: {}</p>\n", escape(&details.client_name)));
        }
        if !details.invoice_title.is_empty() {
            html.push_str(&format!("<h2>{}</h2>\n", escape(&details.invoice_title)));
        }

        html.push_str("<table border=\"1\" cellspacing=\"0\" cellpadding=\"6\">\n");
        html.push_str("<tr><th>Description</th><th>Qty</th><th>Unit Price</th><th>Total</th></tr>\n");
        for (item, line_total) in invoice.items.iter().zip(&invoice.line_totals) {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape(&item.description),
                item.quantity,
                item.unit_price,
                line_total
            ));
        }
        html.push_str("</table>\n");

        html.push_str(&format!(
            "<p>All amounts in {}</p>\n",
            escape(&invoice.currency.major)
        ));

        let totals = &invoice.totals;
        html.push_str(&format!("<p>Subtotal: {}</p>\n", totals.subtotal));
        if !totals.discount.is_zero() {
            html.push_str(&format!("<p>Discount: {}</p>\n", totals.discount));
        }
        html.push_str(&format!(
            "<p>VAT ({}%): {}</p>\n",
            invoice.tax_rate.percentage(),
            totals.tax
        ));
        html.push_str(&format!("<p><strong>Total Due: {}</strong></p>\n", totals.grand_total));

        if let Some(ref words) = invoice.total_in_words {
            html.push_str(&format!("<p><em>{}</em></p>\n", escape(words)));
        }

        if !details.payee_name.is_empty() {
            html.push_str(&format!(
                "<p>Pay to: {} — {} ({})</p>\n",
                escape(&details.payee_name),
                escape(&details.account_number),
                escape(&details.bank_name)
            ));
        }

        html.push_str("</body>\n</html>\n");
        Ok(html)
    }
}

/// HTML-escapes text content.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

// =============================================================================
// External PDF Renderer
// =============================================================================

/// Cap on one external render, input feed through output collection.
pub const DEFAULT_RENDER_TIMEOUT: Duration = Duration::from_secs(30);

/// Runs an external HTML-to-PDF binary, HTML on stdin, PDF on stdout.
///
/// The default arguments fit wkhtmltopdf (`--quiet --encoding UTF-8 - -`).
#[derive(Debug, Clone)]
pub struct CommandPdfRenderer {
    binary: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandPdfRenderer {
    /// Creates a renderer around the given binary with wkhtmltopdf-style
    /// default arguments.
    pub fn new(binary: impl Into<String>) -> Self {
        CommandPdfRenderer {
            binary: binary.into(),
            args: ["--quiet", "--encoding", "UTF-8", "-", "-"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            timeout: DEFAULT_RENDER_TIMEOUT,
        }
    }

    /// Overrides the command-line arguments.
    pub fn with_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Overrides the render timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl PdfRenderer for CommandPdfRenderer {
    async fn render_pdf(&self, html: &str) -> Result<Vec<u8>, RenderError> {
        let mut child = Command::new(&self.binary)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Timing out drops the child future; the process must not linger
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| RenderError::Spawn {
                binary: self.binary.clone(),
                source,
            })?;

        // stdin is piped above, so take() cannot return None
        let mut stdin = child.stdin.take();

        let render = async {
            // Feed stdin WHILE collecting output. A renderer that streams
            // output as it reads stops consuming stdin once its stdout pipe
            // fills; writing the whole document first would deadlock there.
            let feed = async {
                if let Some(mut stdin) = stdin.take() {
                    stdin.write_all(html.as_bytes()).await?;
                    // Drop closes the pipe so the renderer sees EOF
                }
                Ok::<(), std::io::Error>(())
            };
            let (fed, output) = tokio::join!(feed, child.wait_with_output());

            if let Err(e) = fed {
                // A renderer may close stdin once it has read enough
                if e.kind() != std::io::ErrorKind::BrokenPipe {
                    return Err(RenderError::Io(e));
                }
            }
            Ok(output?)
        };

        let output = match tokio::time::timeout(self.timeout, render).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(RenderError::TimedOut {
                    limit: self.timeout,
                })
            }
        };

        if !output.status.success() {
            return Err(RenderError::RendererFailed {
                status: output.status.to_string(),
                detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        if output.stdout.is_empty() {
            return Err(RenderError::EmptyOutput);
        }

        Ok(output.stdout)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
