//! 依赖注入容器
//!
//! 以标识符为键的容器，支持：
//! - 显式 Bean 与延迟定义（工厂或类型引用）
//! - 按祖先链和接口集合自动索引
//! - 按参数名或声明类型进行构造注入
//! - 解析结果缓存（单例语义）

mod bean;
mod catalog;
mod descriptor;
mod global;
mod indexer;
mod instantiator;
mod registrar;
mod registry;
mod resolver;

pub use bean::{Bean, Instance};
pub use catalog::TypeCatalog;
pub use descriptor::{Arguments, ConstructFn, Injectable, Parameter, TypeDescriptor, TypeKind};
pub use global::{get_global, global_container, set_global};
pub use registry::{Definition, FactoryFn, Identifier, Registry};
pub use resolver::ContainerStats;

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

/// 依赖注入容器
///
/// 克隆得到的是同一个容器的句柄；需要相互隔离的容器请分别调用 `new`。
#[derive(Clone)]
pub struct Container {
    /// 定义与 Bean
    registry: Arc<Registry>,
    /// 类型描述符
    catalog: Arc<TypeCatalog>,
    /// 解析统计（原子计数器）
    stats: Arc<InnerStats>,
}

#[derive(Default)]
struct InnerStats {
    total_resolutions: AtomicUsize,
    cache_hits: AtomicUsize,
    cache_misses: AtomicUsize,
}

impl Container {
    pub fn new() -> Self {
        Self::with_catalog(Arc::new(TypeCatalog::new()))
    }

    /// 使用共享的类型目录创建容器，各容器的注册表相互独立
    pub fn with_catalog(catalog: Arc<TypeCatalog>) -> Self {
        Self {
            registry: Arc::new(Registry::new()),
            catalog,
            stats: Arc::new(InnerStats::default()),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }

    /// 登记类型描述符（不产生任何定义）
    pub fn declare_type(&self, descriptor: TypeDescriptor) {
        tracing::trace!(type_name = descriptor.name(), "Declared type");
        self.catalog.declare(descriptor);
    }

    pub fn declare<T: Injectable>(&self) {
        self.declare_type(T::descriptor());
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}
