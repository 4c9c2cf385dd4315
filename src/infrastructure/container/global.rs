//! 进程级全局容器
//!
//! 适用于需要单一全局注册表的应用；库代码应显式传递 `Container`。

use super::bean::Bean;
use super::Container;
use crate::errors::Result;

lazy_static::lazy_static! {
    static ref GLOBAL_CONTAINER: Container = Container::new();
}

/// 获取全局容器句柄
pub fn global_container() -> Container {
    GLOBAL_CONTAINER.clone()
}

/// 在全局容器中写入 Bean
pub fn set_global(id: &str, value: impl Into<Bean>) -> Result<()> {
    GLOBAL_CONTAINER.set(id, value)
}

/// 从全局容器解析
pub fn get_global(id: &str) -> Result<Option<Bean>> {
    GLOBAL_CONTAINER.get(id)
}
