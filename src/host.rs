//! 宿主环境抽象
//!
//! 核心逻辑需要的浏览器副作用：整页跳转与确认对话框。
//! 浏览器实现位于 frontend 的 `web` 模块。

/// 整页导航
pub trait Navigator: Send + Sync {
    /// 硬跳转（刷新页面）。已经位于目标路径时实现可以忽略。
    fn redirect(&self, path: &str);
}

/// 交互式确认
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// 记录所有跳转目标
    #[derive(Default)]
    pub struct RecordingNavigator {
        pub visited: Mutex<Vec<String>>,
    }

    impl RecordingNavigator {
        pub fn visits(&self) -> Vec<String> {
            self.visited.lock().unwrap().clone()
        }
    }

    impl Navigator for RecordingNavigator {
        fn redirect(&self, path: &str) {
            self.visited.lock().unwrap().push(path.to_string());
        }
    }

    /// 固定回答的确认框，同时记录提问次数
    pub struct ScriptedConfirm {
        pub answer: bool,
        pub asked: std::cell::Cell<usize>,
    }

    impl ScriptedConfirm {
        pub fn new(answer: bool) -> Self {
            Self { answer, asked: std::cell::Cell::new(0) }
        }
    }

    impl Confirm for ScriptedConfirm {
        fn confirm(&self, _message: &str) -> bool {
            self.asked.set(self.asked.get() + 1);
            self.answer
        }
    }
}
