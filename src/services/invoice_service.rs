use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};

use crate::{
    error::{AppError, Result},
    models::InvoiceContext,
};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const LINE_HEIGHT: f32 = 7.0;

struct InvoiceWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
}

impl InvoiceWriter<'_> {
    fn line(&mut self, text: &str, size: f32, bold: bool) {
        self.line_at(text, size, bold, MARGIN);
    }

    fn line_at(&mut self, text: &str, size: f32, bold: bool, x: f32) {
        if self.y < MARGIN {
            let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT - MARGIN;
        }

        let font = if bold { &self.bold } else { &self.regular };
        self.layer.use_text(text, size, Mm(x), Mm(self.y), font);
        self.y -= LINE_HEIGHT;
    }

    fn row(&mut self, left: &str, right: &str, bold: bool) {
        self.line_at(left, 11.0, bold, MARGIN);

        // same baseline as the left column, which may have moved to a new page
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.use_text(
            right,
            11.0,
            Mm(PAGE_WIDTH - MARGIN - 35.0),
            Mm(self.y + LINE_HEIGHT),
            font,
        );
    }

    fn gap(&mut self) {
        self.y -= LINE_HEIGHT / 2.0;
    }
}

/// Renders the order invoice as a single PDF document.
pub fn render_invoice_pdf(invoice: &InvoiceContext, store_name: &str) -> Result<Vec<u8>> {
    let title = format!("Invoice {}", invoice.order_id);
    let (doc, page, layer) =
        PdfDocument::new(&title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| AppError::InternalError(format!("Failed to load PDF font: {}", e)))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| AppError::InternalError(format!("Failed to load PDF font: {}", e)))?;

    let mut writer = InvoiceWriter {
        layer: doc.get_page(page).get_layer(layer),
        doc: &doc,
        regular,
        bold,
        y: PAGE_HEIGHT - MARGIN,
    };

    writer.line(store_name, 20.0, true);
    writer.line(&format!("Invoice {}", invoice.order_id), 14.0, true);
    writer.gap();

    writer.line("Bill to", 12.0, true);
    writer.line(&invoice.name, 11.0, false);
    writer.line(&invoice.phone, 11.0, false);
    writer.line(&format!("{}, {}", invoice.address, invoice.city), 11.0, false);
    writer.line(&invoice.region_display, 11.0, false);
    writer.gap();

    writer.row("Item", "Total", true);
    for item in &invoice.items_summary {
        writer.row(
            &format!("{} x{}", item.name, item.qty),
            &format!("${}", item.total),
            false,
        );
    }
    writer.gap();

    writer.row("Subtotal", &format!("${}", invoice.subtotal), false);
    writer.row(
        &format!("Delivery ({})", invoice.region_display),
        &format!("${}", invoice.delivery_fee),
        false,
    );
    writer.row("TOTAL", &format!("${}", invoice.final_total), true);

    drop(writer);

    doc.save_to_bytes()
        .map_err(|e| AppError::InternalError(format!("Failed to render invoice PDF: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InvoiceItem;
    use rust_decimal::Decimal;

    fn invoice(items: usize) -> InvoiceContext {
        InvoiceContext {
            order_id: "RS-54321".to_string(),
            name: "Lina".to_string(),
            phone: "70123456".to_string(),
            address: "Main St".to_string(),
            city: "Tripoli".to_string(),
            region_display: "Tripoli & Suburbs".to_string(),
            items_summary: (0..items)
                .map(|i| InvoiceItem {
                    name: format!("Bracelet {}", i),
                    qty: 1,
                    total: Decimal::new(1500, 2),
                })
                .collect(),
            subtotal: Decimal::new(1500 * items as i64, 2),
            delivery_fee: Decimal::from(3),
            final_total: Decimal::new(1500 * items as i64 + 300, 2),
        }
    }

    #[test]
    fn renders_a_pdf_document() {
        let bytes = render_invoice_pdf(&invoice(2), "Sparkles").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn long_orders_spill_onto_more_pages() {
        let bytes = render_invoice_pdf(&invoice(60), "Sparkles").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
