mod brand_name;
mod new_trend_watch;
mod product_name;
mod watcher_email;
mod watcher_name;

pub use {
    brand_name::BrandName, new_trend_watch::NewTrendWatch, product_name::ProductName,
    watcher_email::WatcherEmail, watcher_name::WatcherName,
};
