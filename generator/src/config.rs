//! Service descriptions: which functions or class to expose and how to map their types.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result};
use serde::Deserialize;

use dt_wsdl::{
    ArrayOfTypeComplex, ArrayOfTypeSequence, AutoDiscover, BindingStyle, BodyUse,
    ComplexTypeStrategy, Composite, DefaultComplexType, DocCommentDocumentation,
    DocumentationStrategy, SoapBody, StrategyKind, Style, TypeCatalog,
};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceDescription {
    pub name: Option<String>,
    pub uri: Option<String>,
    /// Exposes the methods of this class instead of `functions`.
    pub class: Option<String>,
    #[serde(default)]
    pub functions: Vec<String>,
    /// Name of the complex type strategy, `DefaultComplexType` when absent.
    pub strategy: Option<String>,
    #[serde(default)]
    pub style: Style,
    pub transport: Option<String>,
    #[serde(default, rename = "use")]
    pub body_use: BodyUse,
    #[serde(default)]
    pub documentation: bool,
    #[serde(default)]
    pub class_map: BTreeMap<String, String>,
    #[serde(default)]
    pub composite: CompositeDescription,
    #[serde(default)]
    pub catalog: TypeCatalog,
}

/// Per-type strategies used when the strategy is `Composite`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompositeDescription {
    pub default: Option<String>,
    #[serde(default)]
    pub types: BTreeMap<String, String>,
}

fn instantiate(
    kind: StrategyKind,
    documentation: Option<Rc<dyn DocumentationStrategy>>,
) -> Rc<dyn ComplexTypeStrategy> {
    match (kind, documentation) {
        (StrategyKind::DefaultComplexType, Some(documentation)) => {
            Rc::new(DefaultComplexType::with_documentation(documentation))
        }
        (StrategyKind::ArrayOfTypeComplex, Some(documentation)) => {
            Rc::new(ArrayOfTypeComplex::with_documentation(documentation))
        }
        (StrategyKind::ArrayOfTypeSequence, Some(documentation)) => {
            Rc::new(ArrayOfTypeSequence::with_documentation(documentation))
        }
        (kind, _) => kind.instantiate(),
    }
}

impl ServiceDescription {
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("reading service description {}", path.display()))?;
        Self::parse(&source).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn parse(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    fn documentation_strategy(&self) -> Option<Rc<dyn DocumentationStrategy>> {
        self.documentation
            .then(|| Rc::new(DocCommentDocumentation) as Rc<dyn DocumentationStrategy>)
    }

    pub fn strategy_kind(&self) -> Result<StrategyKind> {
        match &self.strategy {
            Some(name) => Ok(name.parse()?),
            None => Ok(StrategyKind::DefaultComplexType),
        }
    }

    pub fn complex_type_strategy(&self) -> Result<Rc<dyn ComplexTypeStrategy>> {
        let documentation = self.documentation_strategy();
        let kind = self.strategy_kind()?;
        if kind != StrategyKind::Composite {
            return Ok(instantiate(kind, documentation));
        }

        let mut composite = Composite::new();
        for (type_, name) in &self.composite.types {
            let strategy = name
                .parse::<StrategyKind>()
                .with_context(|| format!("strategy for type {type_:?}"))?;
            composite.connect_type_to_strategy(type_, instantiate(strategy, documentation.clone()))?;
        }
        if let Some(name) = &self.composite.default {
            let strategy = name
                .parse::<StrategyKind>()
                .context("default composite strategy")?;
            composite.set_default_strategy(instantiate(strategy, documentation));
        }
        Ok(Rc::new(composite))
    }

    pub fn autodiscover(&self) -> Result<AutoDiscover> {
        let mut discover = AutoDiscover::new(self.catalog.clone());
        if let Some(uri) = &self.uri {
            discover.set_uri(uri)?;
        }
        if let Some(name) = &self.name {
            discover.set_service_name(name)?;
        }
        if let Some(class) = &self.class {
            discover.set_class(class)?;
        }
        for function in &self.functions {
            discover.add_function(function)?;
        }

        let mut binding_style = BindingStyle {
            style: self.style,
            ..Default::default()
        };
        if let Some(transport) = &self.transport {
            binding_style.transport = transport.clone();
        }
        let body = match self.body_use {
            BodyUse::Encoded => SoapBody::default(),
            BodyUse::Literal => SoapBody::literal(),
        };
        discover
            .set_class_map(self.class_map.clone())
            .set_complex_type_strategy(self.complex_type_strategy()?)
            .set_binding_style(binding_style)
            .set_operation_body_style(body);
        Ok(discover)
    }
}
