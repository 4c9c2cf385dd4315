//! 基础设施层
//!
//! 提供依赖注入容器的具体实现：
//! - 定义与 Bean 注册表
//! - 类型目录与自动索引
//! - 构造注入

// 容器实现
pub mod container;

// 重新导出API
pub use container::{Bean, Container, ContainerStats, Definition, Identifier, Instance};
pub use container::{Arguments, Injectable, Parameter, TypeCatalog, TypeDescriptor, TypeKind};
