//! Generation Context - 状态分类
//!
//! 把一次状态查询的结果分成"继续等待"与"终止"两类，轮询状态机只消费分类结果

use serde_json::Value;

/// 服务端未给出错误原因时的失败文本
pub const GENERIC_FAILURE_MESSAGE: &str = "Generation failed";

/// 状态查询的 HTTP 层分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpStatusClass {
    /// 2xx，响应体需要进一步分类
    Success,
    /// 404：任务尚未在服务端出现，不算错误
    NotMaterialized,
    /// 其它非成功状态码：记录后继续轮询
    Transient,
}

/// 按状态码分类
pub fn classify_http_status(status: u16) -> HttpStatusClass {
    match status {
        200..=299 => HttpStatusClass::Success,
        404 => HttpStatusClass::NotMaterialized,
        _ => HttpStatusClass::Transient,
    }
}

/// 状态响应中的 `data` 对象
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobStatusPayload {
    pub status: Option<String>,
    pub progress: Option<f64>,
    pub result_url: Option<String>,
    pub result: Option<String>,
    pub preview: Option<String>,
    pub error: Option<String>,
    pub message: Option<String>,
}

impl JobStatusPayload {
    /// 逐字段宽松提取，类型不符的字段视为缺失，不影响其它字段
    ///
    /// - `progress` 接受数字或数字字符串
    /// - `error` 接受字符串或带 `message` 的对象
    pub fn from_value(data: &Value) -> Self {
        Self {
            status: text_field(data, "status"),
            progress: data.get("progress").and_then(|v| match v {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().trim_end_matches('%').parse().ok(),
                _ => None,
            }),
            result_url: text_field(data, "result_url"),
            result: text_field(data, "result"),
            preview: text_field(data, "preview"),
            error: text_field(data, "error").or_else(|| {
                data.pointer("/error/message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
            }),
            message: text_field(data, "message"),
        }
    }

    /// 按优先级 result_url > result > preview 取第一个非空结果
    pub fn result_reference(&self) -> Option<&str> {
        [&self.result_url, &self.result, &self.preview]
            .into_iter()
            .filter_map(|field| non_empty(field))
            .next()
    }

    fn status_is(&self, candidates: &[&str]) -> bool {
        self.status
            .as_deref()
            .map(|s| candidates.iter().any(|c| s.trim().eq_ignore_ascii_case(c)))
            .unwrap_or(false)
    }
}

/// 一次成功查询的分类结果
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// 仍在生成（包括"已完成但结果尚未写入"）
    Pending { progress: Option<f64> },
    Completed { reference: String },
    Failed { error: String },
}

/// 按响应体分类
///
/// 失败判定优先于完成判定；带有任意非空结果字段即视为完成，与状态字符串无关
pub fn classify_payload(payload: &JobStatusPayload) -> PollOutcome {
    if payload.status_is(&["failed", "error"]) {
        let error = non_empty(&payload.error)
            .or_else(|| non_empty(&payload.message))
            .unwrap_or(GENERIC_FAILURE_MESSAGE);
        return PollOutcome::Failed {
            error: error.to_string(),
        };
    }

    if let Some(reference) = payload.result_reference() {
        return PollOutcome::Completed {
            reference: reference.to_string(),
        };
    }

    PollOutcome::Pending {
        progress: payload.progress,
    }
}

fn text_field(data: &Value, key: &str) -> Option<String> {
    data.get(key).and_then(Value::as_str).map(str::to_string)
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(status: &str) -> JobStatusPayload {
        JobStatusPayload {
            status: Some(status.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_classify_http_status() {
        assert_eq!(classify_http_status(200), HttpStatusClass::Success);
        assert_eq!(classify_http_status(204), HttpStatusClass::Success);
        assert_eq!(classify_http_status(404), HttpStatusClass::NotMaterialized);
        assert_eq!(classify_http_status(500), HttpStatusClass::Transient);
        assert_eq!(classify_http_status(429), HttpStatusClass::Transient);
    }

    #[test]
    fn test_failed_uses_error_then_message() {
        let mut p = payload("failed");
        p.error = Some("nsfw".to_string());
        p.message = Some("ignored".to_string());
        assert_eq!(
            classify_payload(&p),
            PollOutcome::Failed {
                error: "nsfw".to_string()
            }
        );

        let mut p = payload("error");
        p.message = Some("out of memory".to_string());
        assert_eq!(
            classify_payload(&p),
            PollOutcome::Failed {
                error: "out of memory".to_string()
            }
        );

        assert_eq!(
            classify_payload(&payload("failed")),
            PollOutcome::Failed {
                error: GENERIC_FAILURE_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn test_completed_picks_first_non_empty_reference() {
        let mut p = payload("completed");
        p.result_url = Some(String::new());
        p.result = Some("https://x/result.png".to_string());
        p.preview = Some("https://x/preview.png".to_string());
        assert_eq!(
            classify_payload(&p),
            PollOutcome::Completed {
                reference: "https://x/result.png".to_string()
            }
        );
    }

    #[test]
    fn test_result_field_completes_regardless_of_status() {
        let mut p = payload("processing");
        p.result_url = Some("https://x/img.png".to_string());
        assert_eq!(
            classify_payload(&p),
            PollOutcome::Completed {
                reference: "https://x/img.png".to_string()
            }
        );
    }

    #[test]
    fn test_completed_without_reference_is_pending() {
        let mut p = payload("done");
        p.progress = Some(100.0);
        assert_eq!(
            classify_payload(&p),
            PollOutcome::Pending {
                progress: Some(100.0)
            }
        );
    }

    #[test]
    fn test_unknown_status_is_pending() {
        assert_eq!(
            classify_payload(&payload("queued")),
            PollOutcome::Pending { progress: None }
        );
        assert_eq!(
            classify_payload(&JobStatusPayload::default()),
            PollOutcome::Pending { progress: None }
        );
    }

    #[test]
    fn test_preview_alone_completes_unfinished_job() {
        let mut p = payload("processing");
        p.preview = Some("https://x/preview.png".to_string());
        assert_eq!(
            classify_payload(&p),
            PollOutcome::Completed {
                reference: "https://x/preview.png".to_string()
            }
        );
    }

    #[test]
    fn test_from_value_partial_body() {
        let p = JobStatusPayload::from_value(&json!({"status": "pending", "progress": 45.5}));
        assert_eq!(p.status.as_deref(), Some("pending"));
        assert_eq!(p.progress, Some(45.5));
        assert!(p.result_reference().is_none());
    }

    #[test]
    fn test_from_value_string_progress_keeps_result() {
        let p = JobStatusPayload::from_value(&json!({
            "status": "completed",
            "progress": "100",
            "result_url": "https://x/img.png"
        }));
        assert_eq!(p.progress, Some(100.0));
        assert_eq!(
            classify_payload(&p),
            PollOutcome::Completed {
                reference: "https://x/img.png".to_string()
            }
        );
    }

    #[test]
    fn test_from_value_error_object_on_failed() {
        let p = JobStatusPayload::from_value(&json!({
            "status": "failed",
            "error": {"message": "nsfw", "code": 7}
        }));
        assert_eq!(
            classify_payload(&p),
            PollOutcome::Failed {
                error: "nsfw".to_string()
            }
        );
    }

    #[test]
    fn test_from_value_ignores_mistyped_fields() {
        let p = JobStatusPayload::from_value(&json!({
            "status": "failed",
            "progress": {"value": 3},
            "result": 12,
            "error": ["x"],
            "message": "quota exceeded"
        }));
        assert_eq!(p.progress, None);
        assert_eq!(p.result, None);
        assert_eq!(
            classify_payload(&p),
            PollOutcome::Failed {
                error: "quota exceeded".to_string()
            }
        );
    }
}
