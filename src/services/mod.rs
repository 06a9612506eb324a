pub mod email_service;
pub mod invoice_service;
pub mod order_service;
