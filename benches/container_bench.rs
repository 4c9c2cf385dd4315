#![allow(clippy::uninlined_format_args)]
//! 容器解析的性能基准测试

use beanbox::{Bean, Container, TypeDescriptor};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// 测试用的简单服务
struct SimpleService {
    value: i64,
}

/// 依赖链上的一环
struct Link {
    depth: usize,
}

/// 注册一条长度为 `depth` 的依赖链：link_N 依赖 link_{N-1}
fn chain_container(depth: usize) -> Container {
    let container = Container::new();
    container.declare_type(TypeDescriptor::class("link_0").constructor(|_| Ok(Link { depth: 0 })));

    for level in 1..depth {
        let previous = format!("link_{}", level - 1);
        container.declare_type(
            TypeDescriptor::class(format!("link_{}", level))
                .required(previous.clone())
                .constructor(move |args| {
                    let parent = args.object::<Link>(&previous)?;
                    Ok(Link {
                        depth: parent.depth + 1,
                    })
                }),
        );
    }
    container
}

/// 基准测试：缓存命中
fn bench_cached_resolution(c: &mut Criterion) {
    let container = Container::new();
    container.set("config.name", "acme").unwrap();

    c.bench_function("cached_resolution", |b| {
        b.iter(|| black_box(container.get(black_box("config.name")).unwrap()))
    });
}

/// 基准测试：工厂定义的首次解析
fn bench_factory_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("factory_resolution");

    for service_count in [1, 10, 100].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(service_count),
            service_count,
            |b, &service_count| {
                b.iter(|| {
                    let container = Container::new();
                    container.declare_type(TypeDescriptor::class("SimpleService"));

                    for i in 0..service_count {
                        container
                            .register_factory(&format!("service_{}", i), move || {
                                Ok(beanbox::Instance::new(
                                    "SimpleService",
                                    SimpleService { value: i as i64 },
                                )
                                .into())
                            })
                            .unwrap();
                    }

                    let mut total = 0;
                    for i in 0..service_count {
                        let service = container
                            .get_as::<SimpleService>(&format!("service_{}", i))
                            .unwrap()
                            .unwrap();
                        total += service.value;
                    }
                    black_box(total)
                });
            },
        );
    }

    group.finish();
}

/// 基准测试：构造注入的递归解析
fn bench_constructor_injection(c: &mut Criterion) {
    let mut group = c.benchmark_group("constructor_injection");

    for depth in [1, 8, 32].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(depth), depth, |b, &depth| {
            b.iter(|| {
                let container = chain_container(depth);
                let top = container
                    .get_as::<Link>(&format!("link_{}", depth - 1))
                    .unwrap()
                    .unwrap();
                black_box(top.depth)
            });
        });
    }

    group.finish();
}

/// 基准测试：写入对象 Bean 时的自动索引
fn bench_auto_indexing(c: &mut Criterion) {
    let container = Container::new();
    container.declare_type(TypeDescriptor::interface("Service"));
    container.declare_type(TypeDescriptor::class("BaseService").implements("Service"));
    container.declare_type(TypeDescriptor::class("SimpleService").extends("BaseService"));

    c.bench_function("set_with_auto_indexing", |b| {
        b.iter(|| {
            let bean = Bean::Object(beanbox::Instance::new("SimpleService", SimpleService { value: 1 }));
            container.set(black_box("simple"), bean).unwrap();
        })
    });
}

criterion_group!(
    benches,
    bench_cached_resolution,
    bench_factory_resolution,
    bench_constructor_injection,
    bench_auto_indexing
);
criterion_main!(benches);
