//! 以标识符为键的依赖注入容器
//!
//! 标识符可以指向显式写入的 Bean，也可以指向延迟定义（工厂或类）。
//! 解析时按参数名或声明类型递归注入构造依赖，并缓存构建结果。

pub mod config;
pub mod errors;
pub mod infrastructure;
pub mod logging;

// Re-export commonly used items for convenience
pub use config::{ConfigKey, ConfigLoader, ContainerConfig};
pub use errors::{ConfigError, ContainerError, ErrorKind};
pub use infrastructure::container::{
    global_container, Arguments, Bean, Container, ContainerStats, Definition, Identifier,
    Injectable, Instance, Parameter, TypeCatalog, TypeDescriptor, TypeKind,
};
