//! 可观测性模块
//!
//! 提供 Prometheus 格式指标、结构化日志和健康检查。

use axum::{Json, Router, response::IntoResponse, routing::get};

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::config::LoggingConfig;

// ===== Simple Metrics =====

/// 关联数据预取的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichmentOutcome {
    /// 结果页不是成功状态，原样转发
    SkippedState,
    /// 没有可跟随的 authority
    SkippedEmpty,
    /// 批量获取成功
    Fetched,
    /// 批量获取失败（已吞掉）
    Failed,
}

/// 简单应用指标
#[derive(Clone, Default)]
pub struct AppMetrics {
    pub http_requests_total: Arc<AtomicU64>,
    pub http_request_duration_sum: Arc<AtomicU64>,
    pub active_connections: Arc<AtomicI64>,
    pub enrichment_skipped_state: Arc<AtomicU64>,
    pub enrichment_skipped_empty: Arc<AtomicU64>,
    pub enrichment_fetched: Arc<AtomicU64>,
    pub enrichment_failed: Arc<AtomicU64>,
    pub enrichment_ids_requested: Arc<AtomicU64>,
    pub errors_total: Arc<AtomicU64>,
}

impl AppMetrics {
    /// 记录 HTTP 请求
    pub fn record_http_request(&self, duration_ms: u64) {
        self.http_requests_total.fetch_add(1, Ordering::SeqCst);
        self.http_request_duration_sum
            .fetch_add(duration_ms, Ordering::SeqCst);
    }

    /// 记录活跃连接
    pub fn record_connection(&self, delta: i64) {
        self.active_connections.fetch_add(delta, Ordering::SeqCst);
    }

    /// 记录一次预取结果
    pub fn record_enrichment(&self, outcome: EnrichmentOutcome) {
        let counter = match outcome {
            EnrichmentOutcome::SkippedState => &self.enrichment_skipped_state,
            EnrichmentOutcome::SkippedEmpty => &self.enrichment_skipped_empty,
            EnrichmentOutcome::Fetched => &self.enrichment_fetched,
            EnrichmentOutcome::Failed => &self.enrichment_failed,
        };
        counter.fetch_add(1, Ordering::SeqCst);
    }

    /// 记录批量请求的 ID 数
    pub fn record_ids_requested(&self, count: usize) {
        self.enrichment_ids_requested
            .fetch_add(count as u64, Ordering::SeqCst);
    }

    /// 记录错误
    pub fn record_error(&self) {
        self.errors_total.fetch_add(1, Ordering::SeqCst);
    }

    pub fn enrichment_count(&self, outcome: EnrichmentOutcome) -> u64 {
        match outcome {
            EnrichmentOutcome::SkippedState => &self.enrichment_skipped_state,
            EnrichmentOutcome::SkippedEmpty => &self.enrichment_skipped_empty,
            EnrichmentOutcome::Fetched => &self.enrichment_fetched,
            EnrichmentOutcome::Failed => &self.enrichment_failed,
        }
        .load(Ordering::SeqCst)
    }

    /// 生成 Prometheus 格式指标
    pub fn gather(&self) -> String {
        format!(
            r#"# HELP http_requests_total Total HTTP requests
# TYPE http_requests_total counter
http_requests_total {}
# HELP http_request_duration_seconds HTTP request duration in seconds
# TYPE http_request_duration_seconds histogram
http_request_duration_seconds_sum {}
http_request_duration_seconds_count {}
# HELP active_connections Active HTTP connections
# TYPE active_connections gauge
active_connections {}
# HELP enrichment_total Related-item prefetch runs by outcome
# TYPE enrichment_total counter
enrichment_total{{outcome="skipped_state"}} {}
enrichment_total{{outcome="skipped_empty"}} {}
enrichment_total{{outcome="fetched"}} {}
enrichment_total{{outcome="failed"}} {}
# HELP enrichment_ids_requested_total Authority ids requested in batch fetches
# TYPE enrichment_ids_requested_total counter
enrichment_ids_requested_total {}
# HELP errors_total Total errors
# TYPE errors_total counter
errors_total {}
"#,
            self.http_requests_total.load(Ordering::SeqCst),
            self.http_request_duration_sum.load(Ordering::SeqCst) as f64 / 1000.0,
            self.http_requests_total.load(Ordering::SeqCst),
            self.active_connections.load(Ordering::SeqCst),
            self.enrichment_skipped_state.load(Ordering::SeqCst),
            self.enrichment_skipped_empty.load(Ordering::SeqCst),
            self.enrichment_fetched.load(Ordering::SeqCst),
            self.enrichment_failed.load(Ordering::SeqCst),
            self.enrichment_ids_requested.load(Ordering::SeqCst),
            self.errors_total.load(Ordering::SeqCst),
        )
    }
}

// ===== Health Check =====

/// 健康检查状态
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub uptime_seconds: f64,
    pub checks: Vec<HealthCheck>,
}

/// 单个健康检查项
#[derive(Debug, Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: String,
    pub message: Option<String>,
    pub latency_ms: Option<u64>,
}

/// 健康检查结果
#[derive(Clone)]
pub struct HealthCheckResult {
    pub name: String,
    pub healthy: bool,
    pub message: String,
    pub latency_ms: u64,
}

/// 应用状态（用于健康检查）
#[derive(Clone)]
pub struct ObservabilityState {
    pub metrics: Arc<AppMetrics>,
    pub health_checks: Arc<Mutex<Vec<HealthCheckResult>>>,
    pub start_time: DateTime<Utc>,
    pub version: String,
}

impl ObservabilityState {
    pub fn new(version: String, metrics: Arc<AppMetrics>) -> Self {
        Self {
            metrics,
            health_checks: Arc::new(Mutex::new(Vec::new())),
            start_time: Utc::now(),
            version,
        }
    }

    /// 添加健康检查结果
    pub async fn add_health_check(&self, result: HealthCheckResult) {
        let mut checks = self.health_checks.lock().await;
        checks.push(result);
        if checks.len() > 10 {
            checks.remove(0);
        }
    }

    /// 获取应用正常运行时间
    pub fn uptime_seconds(&self) -> f64 {
        (Utc::now() - self.start_time).num_seconds() as f64
    }
}

fn status_label(healthy: bool) -> String {
    if healthy { "healthy" } else { "unhealthy" }.to_string()
}

// ===== Health Check Handlers =====

/// 获取完整健康状态
pub async fn health_check(
    state: axum::extract::State<Arc<ObservabilityState>>,
) -> impl IntoResponse {
    let checks = state.health_checks.lock().await;
    let all_healthy = checks.iter().all(|c| c.healthy);

    let health_status = HealthStatus {
        status: status_label(all_healthy),
        timestamp: Utc::now().to_rfc3339(),
        version: state.version.clone(),
        uptime_seconds: state.uptime_seconds(),
        checks: checks
            .iter()
            .map(|c| HealthCheck {
                name: c.name.clone(),
                status: status_label(c.healthy),
                message: Some(c.message.clone()),
                latency_ms: Some(c.latency_ms),
            })
            .collect(),
    };

    let status_code = if all_healthy {
        axum::http::StatusCode::OK
    } else {
        axum::http::StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(health_status))
}

/// 简单存活检查
pub async fn liveness() -> impl IntoResponse {
    "OK"
}

/// 就绪检查
pub async fn readiness(state: axum::extract::State<Arc<ObservabilityState>>) -> impl IntoResponse {
    let checks = state.health_checks.lock().await;
    if checks.iter().all(|c| c.healthy) {
        (axum::http::StatusCode::OK, "Ready")
    } else {
        (axum::http::StatusCode::SERVICE_UNAVAILABLE, "Not Ready")
    }
}

/// Prometheus 指标端点
pub async fn metrics(state: axum::extract::State<Arc<ObservabilityState>>) -> impl IntoResponse {
    (axum::http::StatusCode::OK, state.metrics.gather())
}

/// 版本信息端点
pub async fn version(state: axum::extract::State<Arc<ObservabilityState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "version": state.version,
        "uptime_seconds": state.uptime_seconds(),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// 创建可观测性路由
pub fn create_observability_router(state: Arc<ObservabilityState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness))
        .route("/health/ready", get(readiness))
        .route("/metrics", get(metrics))
        .route("/version", get(version))
        .with_state(state)
}

// ===== Structured Logging =====

/// 初始化结构化日志
///
/// `RUST_LOG` 优先于配置中的级别。配置了日志目录时按天滚动写入文件，
/// 返回的 guard 需要在进程退出前保持存活。
pub fn init_tracing(config: &LoggingConfig) -> Option<WorkerGuard> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let (writer, guard) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "archivist.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stdout), None),
    };

    let fmt_layer = fmt::layer()
        .with_writer(writer)
        .with_target(true)
        .with_line_number(true);

    let result = if config.structured {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
    };

    if let Err(e) = result {
        eprintln!("tracing subscriber already set: {}", e);
    }

    guard
}

// ===== Request Metrics Middleware =====

/// 记录请求指标的中间件
pub async fn metrics_middleware(
    req: axum::extract::Request,
    next: axum::middleware::Next,
    metrics: Arc<AppMetrics>,
) -> axum::response::Response {
    let start = std::time::Instant::now();
    metrics.record_connection(1);

    let response = next.run(req).await;

    metrics.record_http_request(start.elapsed().as_millis() as u64);
    metrics.record_connection(-1);
    if response.status().is_server_error() {
        metrics.record_error();
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[test]
    fn test_metrics_gather() {
        let metrics = AppMetrics::default();
        metrics.record_http_request(100);
        metrics.record_connection(1);
        metrics.record_enrichment(EnrichmentOutcome::Fetched);
        metrics.record_enrichment(EnrichmentOutcome::Failed);
        metrics.record_ids_requested(3);
        metrics.record_error();

        let output = metrics.gather();
        assert!(output.contains("http_requests_total 1"));
        assert!(output.contains("active_connections 1"));
        assert!(output.contains(r#"enrichment_total{outcome="fetched"} 1"#));
        assert!(output.contains(r#"enrichment_total{outcome="skipped_empty"} 0"#));
        assert!(output.contains("enrichment_ids_requested_total 3"));
        assert!(output.contains("errors_total 1"));
    }

    #[test]
    fn test_connection_gauge_goes_back_to_zero() {
        let metrics = AppMetrics::default();
        metrics.record_connection(1);
        metrics.record_connection(-1);
        assert_eq!(metrics.active_connections.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unhealthy_check_fails_readiness() {
        let state = Arc::new(ObservabilityState::new(
            "0.1.0".into(),
            Arc::new(AppMetrics::default()),
        ));
        state
            .add_health_check(HealthCheckResult {
                name: "repository".into(),
                healthy: false,
                message: "unreachable".into(),
                latency_ms: 0,
            })
            .await;

        let app = create_observability_router(state);
        let response = app
            .oneshot(Request::get("/health/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_liveness() {
        let state = Arc::new(ObservabilityState::new(
            "0.1.0".into(),
            Arc::new(AppMetrics::default()),
        ));
        let response = create_observability_router(state)
            .oneshot(Request::get("/health/live").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
