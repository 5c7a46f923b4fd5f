use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use super::{ComplexTypeStrategy, StrategyKind, StrategyRef};
use crate::reflection::canonical_class_name;
use crate::{Wsdl, WsdlError};

/// Dispatches each type to the strategy connected to it, or to a default strategy.
///
/// Strategies given by name are resolved the first time they are needed and cached afterwards.
pub struct Composite {
    type_map: RefCell<BTreeMap<String, StrategyRef>>,
    default_strategy: RefCell<StrategyRef>,
}

impl Default for Composite {
    fn default() -> Self {
        Self {
            type_map: RefCell::new(BTreeMap::new()),
            default_strategy: RefCell::new(StrategyKind::DefaultComplexType.into()),
        }
    }
}

impl Composite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type_map<I, T>(
        type_map: I,
        default_strategy: impl Into<StrategyRef>,
    ) -> Result<Self, WsdlError>
    where
        I: IntoIterator<Item = (T, StrategyRef)>,
        T: AsRef<str>,
    {
        let mut composite = Self::new();
        for (type_, strategy) in type_map {
            composite.connect_type_to_strategy(type_.as_ref(), strategy)?;
        }
        composite.set_default_strategy(default_strategy);
        Ok(composite)
    }

    pub fn connect_type_to_strategy(
        &mut self,
        type_: &str,
        strategy: impl Into<StrategyRef>,
    ) -> Result<(), WsdlError> {
        let key = canonical_class_name(type_);
        if key.is_empty() || key.chars().any(char::is_whitespace) {
            return Err(WsdlError::InvalidTypeKey(type_.to_owned()));
        }
        self.type_map
            .get_mut()
            .insert(key.to_owned(), strategy.into());
        Ok(())
    }

    pub fn set_default_strategy(&mut self, strategy: impl Into<StrategyRef>) {
        *self.default_strategy.get_mut() = strategy.into();
    }

    pub fn default_strategy(&self) -> Result<Rc<dyn ComplexTypeStrategy>, WsdlError> {
        let mut slot = self.default_strategy.borrow_mut();
        let strategy = slot
            .resolve()
            .ok_or_else(|| WsdlError::InvalidDefaultStrategy(slot.describe()))?;
        *slot = StrategyRef::Instance(Rc::clone(&strategy));
        Ok(strategy)
    }

    pub fn strategy_of_type(&self, type_: &str) -> Result<Rc<dyn ComplexTypeStrategy>, WsdlError> {
        let key = canonical_class_name(type_);
        if let Some(slot) = self.type_map.borrow_mut().get_mut(key) {
            let strategy = slot.resolve().ok_or_else(|| WsdlError::InvalidStrategy {
                type_: key.to_owned(),
                strategy: slot.describe(),
            })?;
            *slot = StrategyRef::Instance(Rc::clone(&strategy));
            return Ok(strategy);
        }
        self.default_strategy()
    }
}

impl ComplexTypeStrategy for Composite {
    fn add_complex_type(&self, context: &mut Wsdl, type_: &str) -> Result<String, WsdlError> {
        let strategy = self.strategy_of_type(type_)?;
        strategy.add_complex_type(context, type_)
    }
}
