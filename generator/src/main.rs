mod cli;
mod config;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use dt_wsdl::{StrategyKind, Style};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();
    let mut description = config::ServiceDescription::load(&cli.input)?;

    if let Some(uri) = cli.uri {
        description.uri = Some(uri);
    }
    if let Some(name) = cli.service_name {
        description.name = Some(name);
    }
    if let Some(strategy) = cli.strategy {
        let kind = match strategy {
            cli::Strategy::AnyType => StrategyKind::AnyType,
            cli::Strategy::DefaultComplexType => StrategyKind::DefaultComplexType,
            cli::Strategy::ArrayOfTypeComplex => StrategyKind::ArrayOfTypeComplex,
            cli::Strategy::ArrayOfTypeSequence => StrategyKind::ArrayOfTypeSequence,
            cli::Strategy::Composite => StrategyKind::Composite,
        };
        description.strategy = Some(kind.name().to_owned());
    }
    if let Some(style) = cli.style {
        description.style = match style {
            cli::Style::Rpc => Style::Rpc,
            cli::Style::Document => Style::Document,
        };
    }
    description.documentation |= cli.documentation;

    let discover = description.autodiscover()?;
    discover.dump(cli.output.as_deref())?;
    if let Some(output) = &cli.output {
        tracing::info!(path = %output.display(), "wrote wsdl");
    }
    Ok(())
}
