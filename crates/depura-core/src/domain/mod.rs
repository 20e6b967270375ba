pub mod cell;
pub mod contact;
pub mod phone;
pub mod selection;
pub mod table;

pub use cell::CellValue;
pub use contact::{ContactRecord, ContactTable, DEFAULT_FALLBACK_NAME};
pub use phone::{first_phone_in, is_valid_phone, PhoneNumber};
pub use selection::ColumnSelection;
pub use table::{Row, RowAccess, Table};
