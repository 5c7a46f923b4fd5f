use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum Strategy {
    AnyType,
    DefaultComplexType,
    ArrayOfTypeComplex,
    ArrayOfTypeSequence,
    Composite,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum Style {
    Rpc,
    Document,
}

#[derive(Parser)]
#[clap(version, about)]
pub struct Cli {
    #[clap(value_parser, help = "The TOML service description")]
    pub input: PathBuf,

    #[clap(short, long, value_parser, help = "Write the WSDL to this file instead of stdout")]
    pub output: Option<PathBuf>,

    #[clap(long, value_enum, help = "Complex type strategy, overriding the description")]
    pub strategy: Option<Strategy>,

    #[clap(long, value_enum, help = "Binding style, overriding the description")]
    pub style: Option<Style>,

    #[clap(long, help = "Target namespace URI, overriding the description")]
    pub uri: Option<String>,

    #[clap(long, help = "Service name, overriding the description")]
    pub service_name: Option<String>,

    #[clap(long, help = "Document complex types with their doc comments")]
    pub documentation: bool,
}
