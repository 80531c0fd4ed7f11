//! Quayside Console Server - 港口/码头运营控制台后端
//!
//! # 架构概述
//!
//! 本模块是控制台后端的主入口，提供以下核心功能：
//!
//! - **数据库** (`db`): 嵌入式 SQLite 存储 (菜单节点、角色)
//! - **HTTP API** (`api`): RESTful API 接口
//! - **核心** (`core`): 配置、状态、服务器生命周期
//!
//! # 模块结构
//!
//! ```text
//! quay-server/src/
//! ├── core/          # 配置、状态、错误
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层 (连接池、迁移、仓储、种子数据)
//! └── utils/         # 错误类型、日志、校验
//! ```
//!
//! 树构建与权限编码的纯逻辑在 `shared` crate 中，与控制台客户端共用。

pub mod api;
pub mod core;
pub mod db;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置进程环境 (dotenv + 日志)
pub fn setup_environment() {
    dotenv::dotenv().ok();
    let config = Config::from_env();
    let logs_dir = config.logs_dir();
    let log_dir = if config.is_production() {
        logs_dir.to_str()
    } else {
        None
    };
    init_logger_with_file(Some(&config.log_level), log_dir);
}

pub fn print_banner() {
    println!(
        r#"
   ____                             _      __
  / __ \ __  __ ____ _ __  __ _____(_)____/ /___
 / / / // / / // __ `// / / // ___/// ___/ // _ \
/ /_/ // /_/ // /_/ // /_/ /(__  )// /__/ //  __/
\___\_\\__,_/ \__,_/ \__, //____/ \___/_/ \___/
                    /____/
    "#
    );
}
