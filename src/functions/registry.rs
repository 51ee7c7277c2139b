use super::kinds::{KindSpec, KindTag};
use crate::types::{FactoryType, NodeType};
use std::collections::HashMap;

/// Lookup table of the node kinds available to a factory
pub struct KindRegistry {
    kinds: HashMap<KindTag, KindSpec>,
}

impl KindRegistry {
    /// Registry holding every kind, including time-series kinds.
    pub fn new() -> Self {
        let mut registry = Self {
            kinds: HashMap::new(),
        };
        for tag in KindTag::ALL {
            registry.register(tag.spec());
        }
        registry
    }

    /// Registry without time-series kinds, for trees evaluated without a data source.
    pub fn without_time_series() -> Self {
        let mut registry = Self::new();
        registry.kinds.retain(|_, spec| !spec.is_time_series);
        registry
    }

    pub fn register(&mut self, spec: KindSpec) {
        self.kinds.insert(spec.tag, spec);
    }

    pub fn unregister(&mut self, tag: KindTag) -> Option<KindSpec> {
        self.kinds.remove(&tag)
    }

    pub fn get(&self, tag: KindTag) -> Option<&KindSpec> {
        self.kinds.get(&tag)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&KindSpec> {
        self.kinds.values().find(|spec| spec.name == name)
    }

    /// Kinds returning `return_type` in the requested category, in a stable order.
    pub fn get_by_return_type(&self, return_type: NodeType, factory_type: FactoryType) -> Vec<KindSpec> {
        KindTag::ALL
            .iter()
            .filter_map(|tag| self.kinds.get(tag))
            .filter(|spec| spec.return_type == return_type)
            .filter(|spec| match factory_type {
                FactoryType::All => true,
                FactoryType::Terminals => spec.is_terminal(),
                FactoryType::Operators => !spec.is_terminal(),
            })
            .copied()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl Default for KindRegistry {
    fn default() -> Self {
        Self::new()
    }
}
