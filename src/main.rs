//! Hive - 社交信息流 REST API
//!
//! 启动流程：配置 → 日志 → 数据库 → Repository → HTTP 服务器

use std::sync::Arc;

use hive::config::{load_config, print_config};
use hive::infrastructure::http::{AppState, HttpServer, ServerConfig};
use hive::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, SqliteFollowedHashtagsRepository,
    SqliteHashtagRepository, SqliteLikedPostsRepository, SqliteLikedUsersRepository,
    SqlitePostRepository, SqliteUserRepository,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},hive={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Hive - 社交信息流 REST API");
    print_config(&config);

    // 确保数据目录存在
    if let Some(parent) = std::path::Path::new(&config.database.path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    // 初始化数据库
    let db_config = DatabaseConfig {
        database_url: config.database.database_url(),
        max_connections: config.database.max_connections,
    };
    let pool = create_pool(&db_config).await?;
    run_migrations(&pool).await?;

    // 创建 Repository 适配器
    let state = AppState::new(
        Arc::new(SqliteUserRepository::new(pool.clone())),
        Arc::new(SqlitePostRepository::new(pool.clone())),
        Arc::new(SqliteHashtagRepository::new(pool.clone())),
        Arc::new(SqliteLikedUsersRepository::new(pool.clone())),
        Arc::new(SqliteFollowedHashtagsRepository::new(pool.clone())),
        Arc::new(SqliteLikedPostsRepository::new(pool)),
    );

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c");
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
