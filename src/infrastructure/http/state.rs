//! Application State

use std::time::Duration;

use crate::application::GenerateGarmentHandler;
use crate::config::RunMode;

/// 应用状态
pub struct AppState {
    pub generate_handler: GenerateGarmentHandler,
    /// 决定错误响应是否附带诊断信息
    pub mode: RunMode,
    /// 单个生成请求的整体时限
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(
        generate_handler: GenerateGarmentHandler,
        mode: RunMode,
        request_timeout: Duration,
    ) -> Self {
        Self {
            generate_handler,
            mode,
            request_timeout,
        }
    }
}
