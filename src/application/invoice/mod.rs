//! Invoice use cases

mod create_invoice;
mod delete_invoice;
mod get_invoice_details;
mod invoice_dto;
mod list_invoices;
mod preview_invoice_number;
mod update_invoice;

pub use create_invoice::CreateInvoiceUseCase;
pub use delete_invoice::DeleteInvoiceUseCase;
pub use get_invoice_details::GetInvoiceDetailsUseCase;
pub use invoice_dto::{
  InvoiceItemDto, InvoiceResponse, InvoiceSummaryDto, LineItemCommand, PartyDto,
  SaveInvoiceCommand, SellerDto,
};
pub use list_invoices::{ListInvoicesCommand, ListInvoicesUseCase};
pub use preview_invoice_number::{PreviewInvoiceNumberResponse, PreviewInvoiceNumberUseCase};
pub use update_invoice::UpdateInvoiceUseCase;
