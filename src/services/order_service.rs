use crate::{
    AppState,
    config::MailConfig,
    error::Result,
    models::{CartSummary, DeliveryRegion, InvoiceContext, PlacedOrder, ShippingForm},
    queries::product_queries,
    services::{
        email_service::{Attachment, Mailer, OutboundEmail},
        invoice_service,
    },
    utils::order::generate_order_id,
};

#[derive(Debug)]
pub enum OrderOutcome {
    Placed(PlacedOrder),
    /// Another buyer took the stock between validation and commit.
    OutOfStock { product_id: i32 },
}

/// Commits stock for every cart line, then notifies the operator.
/// Stock is taken before any mail goes out; notification problems never undo it.
pub async fn place_order(
    state: &AppState,
    summary: &CartSummary,
    form: &ShippingForm,
    region: DeliveryRegion,
) -> Result<OrderOutcome> {
    if let Some(product_id) = product_queries::deduct_stock(&state.db, &summary.lines).await? {
        tracing::warn!(product_id, "Stock ran out while committing order");
        return Ok(OrderOutcome::OutOfStock { product_id });
    }

    let order_id = generate_order_id(&state.store.order_prefix);
    let invoice = InvoiceContext::new(order_id, form, region, summary);

    tracing::info!(
        order_id = %invoice.order_id,
        total = %invoice.final_total,
        lines = invoice.items_summary.len(),
        "Order placed"
    );

    let notification_sent = notify_operator(
        state.mailer.as_ref(),
        &state.mail,
        &state.store.name,
        &invoice,
    )
    .await;

    Ok(OrderOutcome::Placed(PlacedOrder {
        invoice,
        notification_sent,
    }))
}

/// Emails the order to the operator. Returns whether the mail was accepted.
pub async fn notify_operator(
    mailer: &dyn Mailer,
    mail: &MailConfig,
    store_name: &str,
    invoice: &InvoiceContext,
) -> bool {
    let attachment = if mail.invoice_pdf {
        render_attachment(invoice, store_name).await
    } else {
        None
    };

    let email = OutboundEmail {
        from: mail.from_email.clone(),
        to: mail.notify_email.clone(),
        subject: invoice.email_subject(),
        text: invoice.email_body(store_name, attachment.is_some()),
        attachment,
    };

    match mailer.send(&email).await {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(order_id = %invoice.order_id, "Order notification failed: {}", e);
            false
        }
    }
}

async fn render_attachment(invoice: &InvoiceContext, store_name: &str) -> Option<Attachment> {
    let filename = invoice.attachment_name();
    let invoice = invoice.clone();
    let store_name = store_name.to_string();
    let order_id = invoice.order_id.clone();

    let rendered = tokio::task::spawn_blocking(move || {
        invoice_service::render_invoice_pdf(&invoice, &store_name)
    })
    .await;

    match rendered {
        Ok(Ok(data)) => Some(Attachment {
            filename,
            content_type: "application/pdf".to_string(),
            data,
        }),
        Ok(Err(e)) => {
            tracing::error!(order_id = %order_id, "Invoice rendering failed: {}", e);
            None
        }
        Err(e) => {
            tracing::error!(order_id = %order_id, "Invoice rendering task panicked: {}", e);
            None
        }
    }
}
