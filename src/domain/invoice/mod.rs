pub mod calculator;
pub mod entities;
pub mod errors;
pub mod numbering;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use calculator::{calculate_line_total, invoice_total, line_total};
pub use entities::{
  BuyerIdentity, Invoice, InvoiceDetails, InvoiceFilter, InvoiceInput, InvoiceItem,
  InvoiceWithItems, LineItemInput, PeriodFilter, PricedInvoice, PricedItem,
};
pub use errors::InvoiceError;
pub use numbering::{DateRange, InvoiceNumber, InvoicePeriod};
pub use ports::InvoiceRepository;
pub use services::InvoiceService;
pub use value_objects::{
  InvoiceNotes, ItemName, Money, Quantity, TaxRate, UnitPrice, ValueObjectError,
};
