//! 浏览器原生对话框

use rollbook::host::Confirm;

/// `window.confirm` / `window.alert`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserDialogs;

impl BrowserDialogs {
    /// 阻塞式提示
    pub fn alert(message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
}

impl Confirm for BrowserDialogs {
    /// 没有 window 或调用失败时视为取消
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}
