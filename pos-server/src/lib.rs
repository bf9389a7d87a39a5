//! POS Server - 多租户收银与销售报表服务
//!
//! # 架构概述
//!
//! - **订单引擎** (`orders`): 快照定价、补偿回滚、退款状态机
//! - **报表** (`reports`): 业务时区销售聚合与 CSV 导出
//! - **数据库** (`db`): SQLite (WAL) + repository 层，全部查询按
//!   `company_id` 隔离
//! - **身份** (`auth`): 网关注入的 (user, role, company) 三元组
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! pos-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # 可信身份提取
//! ├── api/           # HTTP 路由和处理器
//! ├── orders/        # 订单引擎 (定价、持久化、退款)
//! ├── reports/       # 销售聚合与导出
//! ├── db/            # 数据库层
//! └── utils/         # 错误、时间、日志工具
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod reports;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, Role};
pub use core::{Config, Server, ServerState};
pub use orders::{OrderError, OrderService};
pub use reports::{Bucketing, ReportService};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::init_logger;
