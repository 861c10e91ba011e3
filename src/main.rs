//! Cyclea - 面料图片驱动的服装图片生成服务
//!
//! - Domain: generation/, prompt_composer
//! - Application: commands, services, ports
//! - Infrastructure: http, adapters

use std::sync::Arc;
use std::time::Duration;

use cyclea::application::{CredentialsPort, GenerateGarmentHandler};
use cyclea::config::{load_config, print_config};
use cyclea::infrastructure::adapters::{
    DeapiClient, DeapiClientConfig, EnvCredentials, GeminiVisionClient, GeminiVisionClientConfig,
    HttpImageFetcher, HttpImageFetcherConfig, RandomSeedSource,
};
use cyclea::infrastructure::http::{AppState, HttpServer, ServerConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},cyclea={},tower_http=debug",
        config.log.level, config.log.level
    );
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter));
    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    tracing::info!("Cyclea - 服装图片生成服务");
    print_config(&config);

    // 外部服务客户端
    let vision = Arc::new(GeminiVisionClient::new(
        GeminiVisionClientConfig::new(&config.vision.base_url)
            .with_model(&config.vision.model)
            .with_timeout(config.vision.timeout_secs),
    )?);
    let generator = Arc::new(DeapiClient::new(
        DeapiClientConfig::new(&config.generation.base_url)
            .with_timeout(config.generation.timeout_secs),
    )?);
    let fetcher = Arc::new(HttpImageFetcher::new(HttpImageFetcherConfig {
        timeout_secs: config.fetch.timeout_secs,
        max_bytes: config.server.max_upload_size,
    })?);

    let credentials = Arc::new(EnvCredentials::from_config(&config));
    if credentials.generation_api_key().is_none() {
        tracing::warn!(
            env = %config.generation.api_key_env,
            "Generation API key not found, requests will fail until it is set"
        );
    }

    let handler = GenerateGarmentHandler::new(
        fetcher,
        vision,
        generator,
        credentials,
        Arc::new(RandomSeedSource),
        config.polling.poll_policy(),
    );

    let state = AppState::new(
        handler,
        config.server.mode,
        Duration::from_secs(config.server.request_timeout_secs),
    );
    let server_config = ServerConfig::new(&config.server.host, config.server.port)
        .with_max_upload_size(config.server.max_upload_size);
    let server = HttpServer::new(server_config, state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                return;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
