use chrono_tz::Tz;
use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppError;

/// 服务器状态 - 持有所有共享资源
///
/// `ServerState` 是请求处理的核心数据结构。`SqlitePool` 内部已是
/// `Arc`，Clone 成本极低。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | pool | SqlitePool | SQLite 连接池 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 数据库连接池
    pub pool: SqlitePool,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 打开数据库（含迁移），构造共享状态。
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.database_path).await?;
        Ok(Self {
            config: config.clone(),
            pool: db.pool,
        })
    }

    /// 获取数据库连接池
    pub fn pool(&self) -> SqlitePool {
        self.pool.clone()
    }

    /// 业务时区
    pub fn timezone(&self) -> Tz {
        self.config.timezone
    }
}
