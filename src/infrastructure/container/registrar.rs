//! 显式注册：定义与 Bean

use tracing::debug;

use super::bean::Bean;
use super::registry::Definition;
use super::Container;
use crate::errors::{BoxError, ContainerError, Result};

impl Container {
    /// 注册延迟定义
    ///
    /// - 工厂：必须提供非空 `id`，直接写入，不做自动索引
    /// - 类型：必须是已登记的类；若 `id` 指向另一个已知类型，
    ///   该类型必须是 `id` 的子类型。先自动索引，再写入 `id`
    pub fn register_definition(&self, definition: Definition, id: Option<&str>) -> Result<()> {
        match definition {
            Definition::Factory(factory) => {
                let id = match id {
                    Some(id) if !id.is_empty() => id,
                    other => {
                        return Err(ContainerError::InvalidId(
                            other.unwrap_or_default().to_string(),
                        ))
                    }
                };
                debug!(id, "Registered factory definition");
                self.registry.insert_definition(id, Definition::Factory(factory));
                Ok(())
            }
            Definition::Type(class) => self.register_class(&class, id),
        }
    }

    fn register_class(&self, class: &str, id: Option<&str>) -> Result<()> {
        if class.is_empty() {
            return Err(ContainerError::EmptyDefinition);
        }
        if !self.catalog.is_class(class) {
            return Err(ContainerError::UnknownDefinition(class.to_string()));
        }

        let id = id.filter(|id| !id.is_empty());
        if let Some(id) = id {
            if self.catalog.is_known(id) && id != class && !self.catalog.is_subtype(class, id) {
                return Err(ContainerError::NotASubclass {
                    class: class.to_string(),
                    id: id.to_string(),
                });
            }
        }

        self.auto_register_class(class);

        if let Some(id) = id {
            self.registry.insert_definition(id, Definition::of_type(class));
        }
        debug!(class, id = id.unwrap_or(class), "Registered class definition");
        Ok(())
    }

    /// 写入 Bean，覆盖已有值
    ///
    /// 若 `id` 是已知类型名，值必须是该类型的实例；对象值同时按其类型层次自动索引。
    pub fn set(&self, id: &str, value: impl Into<Bean>) -> Result<()> {
        if id.is_empty() {
            return Err(ContainerError::InvalidId(id.to_string()));
        }

        let bean = value.into();
        if self.catalog.is_known(id) && !self.catalog.is_instance(&bean, id) {
            return Err(ContainerError::NotAnInstance {
                id: id.to_string(),
                actual: bean.type_name().to_string(),
            });
        }

        self.auto_register_bean(&bean);

        debug!(id, type_name = bean.type_name(), "Stored bean");
        self.registry.insert_bean(id, bean);
        Ok(())
    }

    pub fn register_factory<F>(&self, id: &str, factory: F) -> Result<()>
    where
        F: Fn() -> std::result::Result<Bean, BoxError> + Send + Sync + 'static,
    {
        self.register_definition(Definition::factory(factory), Some(id))
    }

    /// 只做自动索引
    pub fn register_type(&self, class: &str) -> Result<()> {
        self.register_definition(Definition::of_type(class), None)
    }

    /// 将 `id` 绑定到类 `class`
    pub fn bind(&self, id: &str, class: &str) -> Result<()> {
        self.register_definition(Definition::of_type(class), Some(id))
    }
}
