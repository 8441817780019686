//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. Every operation on a tenant-scoped entity takes the tenant
//! id and filters by it; the item-name lookup is the one deliberately
//! unscoped table.

pub mod category;
pub mod item_name;
pub mod merchant;
pub mod receipt;
pub mod report;
pub mod settings;

pub use category::{CategoryError, CategoryRepository};
pub use item_name::{ItemNameError, ItemNameRepository, ResolveRequest};
pub use merchant::{MerchantContact, MerchantError, MerchantRepository};
pub use receipt::{
    CreateReceiptInput, CreateReceiptItemInput, ReceiptError, ReceiptRepository, ReceiptWithItems,
    UpdateReceiptInput, UpdateReceiptItemInput,
};
pub use report::{ReceiptGroup, ReportError, ReportRepository};
pub use settings::{SettingsError, SettingsInput, SettingsRepository};
