//! 原生 Web API 封装模块
//!
//! 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
//! 以减小 WASM 二进制体积。同时为核心库的宿主抽象提供浏览器实现。

mod dialog;
mod http;
pub mod logging;
pub mod router;
mod storage;
mod timer;

pub use dialog::BrowserDialogs;
pub use http::FetchHttpClient;
pub use router::BrowserNavigator;
pub use storage::BrowserTokenStore;
