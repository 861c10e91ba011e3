//! Fetch Adapter - 远程图片下载

mod http_image_fetcher;

pub use http_image_fetcher::*;
