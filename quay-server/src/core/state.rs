//! 服务器状态

use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::{DbService, seed};
use crate::utils::AppError;

/// 服务器状态 - 持有所有服务的共享引用
///
/// `Clone` 只做浅拷贝 (连接池内部是 Arc)，每个请求处理器持有一份。
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SQLite 连接池
    pub pool: SqlitePool,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (确保目录存在)
    /// 2. 数据库 (work_dir/database/quayside.db, 迁移 + 首次种子数据)
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::Internal(format!("Failed to create work directory: {e}")))?;

        let db_path = config.database_dir().join("quayside.db");
        let db = DbService::new(&db_path.to_string_lossy()).await?;

        seed::ensure_defaults(&db.pool)
            .await
            .map_err(|e| AppError::database(format!("Seed failed: {e}")))?;

        Ok(Self {
            config: config.clone(),
            pool: db.pool,
        })
    }
}
