mod args;

use anyhow::Context;

use args::{Args, Command};
use beanbox::logging::{init_logging, LoggingConfig};
use beanbox::{Bean, ConfigLoader, Container};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let logging = LoggingConfig::for_format(args.log_format).with_level(args.log_level);
    init_logging(logging).map_err(|e| anyhow::anyhow!(e))?;

    match args.command {
        Command::Inspect { config } => {
            let container = load(&config)?;
            inspect(&container);
        }
        Command::Get { config, ids } => {
            let container = load(&config)?;
            for id in ids {
                let bean = container
                    .get(&id)
                    .with_context(|| format!("failed to resolve '{}'", id))?;
                println!("{} = {}", id, render(bean.as_ref()));
            }
            tracing::debug!("{}", container.get_stats().summary());
        }
    }

    Ok(())
}

fn load(path: &std::path::Path) -> anyhow::Result<Container> {
    let container = Container::new();
    ConfigLoader::new()
        .load_into(path, &container)
        .with_context(|| format!("failed to load {}", path.display()))?;
    Ok(container)
}

fn inspect(container: &Container) {
    let registry = container.registry();

    println!("definitions ({}):", registry.definition_count());
    for id in registry.definition_ids() {
        if let Some(definition) = registry.definition(&id) {
            match definition.type_name() {
                Some(class) => println!("  {} -> {}", id, class),
                None => println!("  {} -> <factory>", id),
            }
        }
    }

    println!("beans ({}):", registry.bean_count());
    for id in registry.bean_ids() {
        println!("  {} = {}", id, render(registry.bean(&id).as_ref()));
    }
}

fn render(bean: Option<&Bean>) -> String {
    match bean {
        None => "null".to_string(),
        Some(Bean::Data(value)) => value.to_string(),
        Some(Bean::Object(instance)) => format!("<{} instance>", instance.type_name()),
    }
}
