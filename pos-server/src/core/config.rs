use chrono_tz::Tz;

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | DATABASE_PATH | pos.db | SQLite 数据库文件路径 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | BUSINESS_TIMEZONE | Asia/Kuala_Lumpur | 业务时区 (报表边界) |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// DATABASE_PATH=/data/pos.db HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 数据库文件路径
    pub database_path: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 业务时区: 所有报表边界和 bucket key 都以此时区的
    /// wall-clock 计算，存储仍然是 UTC instant
    pub timezone: Tz,
    /// 运行环境: development | staging | production
    pub environment: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        let timezone = std::env::var("BUSINESS_TIMEZONE")
            .ok()
            .and_then(|v| {
                v.parse::<Tz>()
                    .map_err(|_| {
                        tracing::warn!(
                            "Invalid BUSINESS_TIMEZONE '{}', falling back to Asia/Kuala_Lumpur",
                            v
                        );
                    })
                    .ok()
            })
            .unwrap_or(chrono_tz::Asia::Kuala_Lumpur);

        Self {
            database_path: std::env::var("DATABASE_PATH").unwrap_or_else(|_| "pos.db".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            timezone,
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(database_path: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.database_path = database_path.into();
        config.http_port = http_port;
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
