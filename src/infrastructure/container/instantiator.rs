//! 构造注入
//!
//! 按描述符声明的参数顺序逐个解析依赖，遇到第一个可选参数即停止：
//! 可选参数及其后的所有参数（包括必选参数）都不会被解析，也不会传入构造函数。

use std::sync::Arc;
use tracing::{debug, warn};

use super::bean::{Bean, Instance};
use super::descriptor::Arguments;
use super::registry::Definition;
use super::Container;
use crate::errors::{ContainerError, Result};

impl Container {
    pub(crate) fn create_from_definition(&self, id: &str, definition: &Definition) -> Result<Bean> {
        match definition {
            Definition::Factory(factory) => {
                debug!(id, "Creating bean from factory");
                factory().map_err(|source| ContainerError::creation_failed(id, source))
            }
            Definition::Type(class) => self.create_from_class(class),
        }
    }

    pub(crate) fn create_from_class(&self, class: &str) -> Result<Bean> {
        let descriptor = self
            .catalog
            .descriptor(class)
            .filter(|descriptor| descriptor.is_class())
            .ok_or_else(|| ContainerError::UnknownDefinition(class.to_string()))?;
        // 未声明构造函数：以无参标记实例代替
        let Some(construct) = descriptor.construct_fn() else {
            debug!(class, "Constructing marker instance");
            return Ok(Bean::Object(Instance::from_arc(class, Arc::new(()))));
        };

        let mut arguments = Arguments::new(class);
        for parameter in descriptor.parameters() {
            if parameter.optional {
                break;
            }

            let mut actual = self.get(&parameter.name)?;
            if actual.is_none() {
                if let Some(declared_type) = &parameter.declared_type {
                    actual = self.get(declared_type)?;
                }
            }

            let Some(actual) = actual else {
                warn!(class, parameter = %parameter.name, "Unresolved constructor dependency");
                return Err(ContainerError::MissingDependency {
                    class: class.to_string(),
                    parameter: parameter.name.clone(),
                });
            };
            arguments.push(parameter.name.clone(), actual);
        }

        debug!(class, arguments = arguments.len(), "Constructing instance");
        let value = construct(&arguments)?;
        Ok(Bean::Object(Instance::from_arc(class, value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::container::TypeDescriptor;

    #[derive(Debug)]
    struct Endpoint {
        url: String,
    }

    #[derive(Debug)]
    struct Client {
        endpoint: std::sync::Arc<Endpoint>,
        timeout: u64,
    }

    fn container() -> Container {
        let container = Container::new();
        container.declare_type(
            TypeDescriptor::class("Endpoint")
                .required("url")
                .constructor(|args| {
                    Ok(Endpoint {
                        url: args.value("url")?,
                    })
                }),
        );
        container.declare_type(
            TypeDescriptor::class("Client")
                .required_typed("endpoint", "Endpoint")
                .optional("timeout")
                .constructor(|args| {
                    Ok(Client {
                        endpoint: args.object("endpoint")?,
                        timeout: if args.contains("timeout") {
                            args.value("timeout")?
                        } else {
                            30
                        },
                    })
                }),
        );
        container
    }

    #[test]
    fn test_dependency_resolved_by_declared_type() {
        let container = container();
        container.set("url", "https://example.test").unwrap();
        container.set("timeout", 5i64).unwrap();

        let client = container.get_as::<Client>("Client").unwrap().unwrap();
        assert_eq!(client.endpoint.url, "https://example.test");
        // 可选参数不参与注入
        assert_eq!(client.timeout, 30);
    }

    #[test]
    fn test_dependency_resolved_by_name_first() {
        let container = container();
        container
            .set("endpoint", Instance::new("Endpoint", Endpoint { url: "named".into() }))
            .unwrap();
        container.set("url", "typed").unwrap();

        let client = container.get_as::<Client>("Client").unwrap().unwrap();
        assert_eq!(client.endpoint.url, "named");
    }

    #[test]
    fn test_missing_dependency() {
        let container = container();

        let err = container.get("Client").unwrap_err();
        match err {
            ContainerError::MissingDependency { class, parameter } => {
                assert_eq!(class, "Endpoint");
                assert_eq!(parameter, "url");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!container.registry().has_bean("Client"));
    }

    #[test]
    fn test_class_without_constructor() {
        let container = Container::new();
        container.declare_type(TypeDescriptor::interface("Marker"));
        container.declare_type(TypeDescriptor::class("Plain").implements("Marker"));
        container.register_type("Plain").unwrap();

        let bean = container.get("Plain").unwrap().unwrap();
        assert_eq!(bean.type_name(), "Plain");
        assert!(bean.downcast::<()>().is_some());
        // 与普通对象一样缓存并索引
        assert!(container.get("Plain").unwrap().unwrap().ptr_eq(&bean));
        assert!(container.registry().bean("Marker").unwrap().ptr_eq(&bean));
    }

    #[test]
    fn test_factory_error_is_wrapped() {
        let container = Container::new();
        container
            .register_factory("db", || Err("connection refused".into()))
            .unwrap();

        let err = container.get("db").unwrap_err();
        assert!(err.to_string().contains("connection refused"));
        assert!(err.to_string().contains("'db'"));
    }
}
