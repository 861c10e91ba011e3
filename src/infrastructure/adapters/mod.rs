//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod credentials;
pub mod fetch;
pub mod generator;
pub mod seed;
pub mod vision;

pub use credentials::{CredentialSource, EnvCredentials};
pub use fetch::*;
pub use generator::*;
pub use seed::RandomSeedSource;
pub use vision::*;

#[cfg(test)]
pub(crate) mod test_server {
    use axum::Router;
    use tokio::net::TcpListener;

    /// 在随机端口启动一个本地服务，返回其 base URL
    pub async fn serve(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }
}
