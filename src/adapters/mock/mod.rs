pub mod booking_store;
pub mod item_catalog;
pub mod user_directory;

#[allow(unused_imports)]
pub use booking_store::BookingStore;
#[allow(unused_imports)]
pub use item_catalog::ItemCatalog;
#[allow(unused_imports)]
pub use user_directory::UserDirectory;
