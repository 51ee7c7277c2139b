use crate::config::{BuildMethod, ConfigSection, GeneratorConfig};
use crate::data::SeriesSource;
use crate::error::{GpError, Result};
use crate::functions::{KindRegistry, KindSpec, KindTag, MovingAverage, NodeKind, SeriesValue};
use crate::tree::ExpressionTree;
use crate::types::{FactoryType, NodeId, NodeType, ParentSlot};
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;

/// Builds standalone nodes and random well-typed trees
pub struct NodeFactory {
    registry: KindRegistry,
    config: GeneratorConfig,
    source: Option<Arc<SeriesSource>>,
}

impl NodeFactory {
    /// Factory without a data source; time-series kinds are never produced.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            registry: KindRegistry::without_time_series(),
            config,
            source: None,
        })
    }

    /// Factory drawing series kinds from `source`.
    ///
    /// `MovingAverage` is only offered when `ma_periods` is non-empty.
    pub fn with_source(config: GeneratorConfig, source: Arc<SeriesSource>) -> Result<Self> {
        config.validate()?;
        let mut registry = if config.series_columns.is_empty() {
            KindRegistry::without_time_series()
        } else {
            KindRegistry::new()
        };
        if config.ma_periods.is_empty() {
            registry.unregister(KindTag::MovingAverage);
        }
        Ok(Self {
            registry,
            config,
            source: Some(source),
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn candidates(&self, return_type: NodeType, factory_type: FactoryType) -> Vec<KindSpec> {
        self.registry.get_by_return_type(return_type, factory_type)
    }

    /// Create one random standalone node of the requested type and category.
    pub fn create<R: Rng>(
        &self,
        tree: &mut ExpressionTree,
        return_type: NodeType,
        factory_type: FactoryType,
        rng: &mut R,
    ) -> Result<NodeId> {
        let candidates = self.candidates(return_type, factory_type);
        let spec = candidates.choose(rng).ok_or_else(|| {
            GpError::Generation(format!(
                "No {:?} kinds return {}",
                factory_type, return_type
            ))
        })?;
        let kind = self.instantiate(spec.tag, rng)?;
        Ok(tree.create(kind))
    }

    /// Concrete kind for `tag`, sampling any per-node state.
    pub fn instantiate<R: Rng>(&self, tag: KindTag, rng: &mut R) -> Result<NodeKind> {
        if let Some(operator) = NodeKind::operator(tag) {
            return Ok(operator);
        }
        match tag {
            KindTag::Constant => Ok(NodeKind::Constant(
                rng.gen_range(self.config.constant_min..=self.config.constant_max),
            )),
            KindTag::BoolConstant => Ok(NodeKind::BoolConstant(rng.gen_bool(0.5))),
            KindTag::SeriesValue => {
                let (source, column) = self.series_choice(rng)?;
                let lag = rng.gen_range(0..=self.config.max_lag);
                Ok(NodeKind::SeriesValue(SeriesValue::new(source, column, lag)))
            }
            KindTag::MovingAverage => {
                let (source, column) = self.series_choice(rng)?;
                let period = *self.config.ma_periods.choose(rng).ok_or_else(|| {
                    GpError::Generation("No moving average periods configured".to_string())
                })?;
                Ok(NodeKind::MovingAverage(MovingAverage::new(source, column, period)))
            }
            other => Err(GpError::Generation(format!("Cannot instantiate {}", other.name()))),
        }
    }

    fn series_choice<R: Rng>(&self, rng: &mut R) -> Result<(Arc<SeriesSource>, String)> {
        let source = self
            .source
            .clone()
            .ok_or_else(|| GpError::Generation("No series source configured".to_string()))?;
        let column = self
            .config
            .series_columns
            .choose(rng)
            .cloned()
            .ok_or_else(|| GpError::Generation("No series columns configured".to_string()))?;
        Ok((source, column))
    }

    /// Random complete tree rooted at a node of `config.root_type`.
    pub fn build<R: Rng>(&self, tree: &mut ExpressionTree, rng: &mut R) -> Result<NodeId> {
        let (method, depth) = match self.config.method {
            BuildMethod::RampedHalfAndHalf => {
                let method = if rng.gen_bool(0.5) { BuildMethod::Grow } else { BuildMethod::Full };
                let depth = rng.gen_range(self.config.min_depth..=self.config.max_depth);
                (method, depth)
            }
            method => (method, self.config.max_depth),
        };
        let root = self.build_node(tree, self.config.root_type, 0, depth, method, rng)?;
        log::debug!("Built {:?} tree of depth {}: {}", method, depth, tree.display(root));
        Ok(root)
    }

    fn build_node<R: Rng>(
        &self,
        tree: &mut ExpressionTree,
        return_type: NodeType,
        depth: usize,
        max_depth: usize,
        method: BuildMethod,
        rng: &mut R,
    ) -> Result<NodeId> {
        let factory_type = self.factory_type_at(return_type, depth, max_depth, method, rng);
        let node = self.create(tree, return_type, factory_type, rng)?;

        let (child_type, arity) = {
            let created = tree.node(node)?;
            (created.child_type(), created.declared_arity())
        };
        for slot in ParentSlot::slots_for(arity) {
            let child = match self.build_node(tree, child_type, depth + 1, max_depth, method, rng) {
                Ok(child) => child,
                Err(e) => {
                    tree.remove(node)?;
                    return Err(e);
                }
            };
            tree.attach(node, *slot, child)?;
        }
        Ok(node)
    }

    fn factory_type_at<R: Rng>(
        &self,
        return_type: NodeType,
        depth: usize,
        max_depth: usize,
        method: BuildMethod,
        rng: &mut R,
    ) -> FactoryType {
        let has_terminals = !self.candidates(return_type, FactoryType::Terminals).is_empty();
        let has_operators = !self.candidates(return_type, FactoryType::Operators).is_empty();

        if depth >= max_depth && has_terminals {
            return FactoryType::Terminals;
        }
        if !has_operators {
            return FactoryType::Terminals;
        }
        match method {
            BuildMethod::Grow if depth > 0 && has_terminals => {
                if rng.gen_bool(self.config.terminal_probability) {
                    FactoryType::Terminals
                } else {
                    FactoryType::Operators
                }
            }
            _ => FactoryType::Operators,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_create_terminal_constant_in_range() {
        let config = GeneratorConfig {
            constant_min: 1.0,
            constant_max: 2.0,
            ..Default::default()
        };
        let factory = NodeFactory::new(config).unwrap();
        let mut tree = ExpressionTree::new();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            let id = factory
                .create(&mut tree, NodeType::Numeric, FactoryType::Terminals, &mut rng)
                .unwrap();
            match tree.node(id).unwrap().kind() {
                NodeKind::Constant(v) => assert!((1.0..=2.0).contains(v)),
                other => panic!("unexpected terminal {:?}", other),
            }
        }
    }

    #[test]
    fn test_series_kinds_need_source() {
        let factory = NodeFactory::new(GeneratorConfig::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(factory.instantiate(KindTag::SeriesValue, &mut rng).is_err());
        assert!(factory
            .candidates(NodeType::Numeric, FactoryType::Terminals)
            .iter()
            .all(|spec| !spec.is_time_series));
    }

    #[test]
    fn test_full_tree_reaches_max_depth() {
        let config = GeneratorConfig {
            root_type: NodeType::Numeric,
            method: BuildMethod::Full,
            max_depth: 3,
            ..Default::default()
        };
        let factory = NodeFactory::new(config).unwrap();
        let mut tree = ExpressionTree::new();
        let mut rng = StdRng::seed_from_u64(42);

        let root = factory.build(&mut tree, &mut rng).unwrap();
        assert_eq!(tree.height(root).unwrap(), 3);
        assert!(tree.is_complete(root).unwrap());
    }
}
