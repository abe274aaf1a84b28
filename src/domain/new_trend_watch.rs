use super::{BrandName, ProductName, WatcherEmail, WatcherName};

/// A fully narrowed trend-summary request, ready to be processed and stored.
#[derive(Debug, Clone)]
pub struct NewTrendWatch {
    pub brand: BrandName,
    pub product: ProductName,
    pub email: WatcherEmail,
    pub name: WatcherName,
    pub subject: String,
    pub metadata: serde_json::Value,
}
