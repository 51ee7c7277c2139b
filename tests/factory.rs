use gptree::config::{BuildMethod, GeneratorConfig};
use gptree::data::SeriesSource;
use gptree::engines::NodeFactory;
use gptree::{ExpressionTree, FactoryType, GpError, NodeId, NodeType};
use polars::df;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

fn assert_well_typed(tree: &ExpressionTree, root: NodeId) {
    for id in tree.preorder(root).unwrap() {
        let node = tree.node(id).unwrap();
        assert!(node.is_complete(), "{} is incomplete", node.name());
        for (slot, child) in node.children() {
            let c = tree.node(child).unwrap();
            assert_eq!(c.return_type(), node.child_type());
            assert_eq!(c.parent(), Some(id));
            assert_eq!(c.parent_slot(), slot);
        }
    }
}

#[test]
fn test_ramped_trees_are_complete_and_evaluable() {
    let _ = env_logger::builder().is_test(true).try_init();
    let factory = NodeFactory::new(GeneratorConfig::default()).unwrap();
    let mut tree = ExpressionTree::new();
    let mut rng = StdRng::seed_from_u64(2024);

    for _ in 0..25 {
        let root = factory.build(&mut tree, &mut rng).unwrap();
        assert_well_typed(&tree, root);
        assert_eq!(tree.node(root).unwrap().return_type(), NodeType::Boolean);
        assert!(tree.height(root).unwrap() <= factory.config().max_depth);
        assert!(tree.evaluate_boolean(root, 0).is_ok());
    }
}

#[test]
fn test_same_seed_builds_same_tree() {
    let factory = NodeFactory::new(GeneratorConfig::default()).unwrap();
    let mut first = ExpressionTree::new();
    let mut second = ExpressionTree::new();

    let a = factory.build(&mut first, &mut StdRng::seed_from_u64(9)).unwrap();
    let b = factory.build(&mut second, &mut StdRng::seed_from_u64(9)).unwrap();
    assert_eq!(
        first.tree_to_string(a).unwrap(),
        second.tree_to_string(b).unwrap()
    );
}

#[test]
fn test_operators_category_never_yields_terminals() {
    let factory = NodeFactory::new(GeneratorConfig::default()).unwrap();
    let mut tree = ExpressionTree::new();
    let mut rng = StdRng::seed_from_u64(3);

    for return_type in [NodeType::Boolean, NodeType::Numeric] {
        for _ in 0..20 {
            let id = factory
                .create(&mut tree, return_type, FactoryType::Operators, &mut rng)
                .unwrap();
            let node = tree.node(id).unwrap();
            assert!(!node.is_terminal());
            assert_eq!(node.return_type(), return_type);
            assert!(node.is_root());
        }
    }
}

#[test]
fn test_series_trees_need_pre_process() {
    let source = SeriesSource::shared(
        df! { "close" => &[1.0, 2.0, 3.0, 2.0, 1.0, 2.0, 3.0, 4.0] }.unwrap(),
    );
    let config = GeneratorConfig {
        root_type: NodeType::Numeric,
        method: BuildMethod::Grow,
        max_depth: 4,
        terminal_probability: 0.6,
        max_lag: 2,
        ma_periods: vec![2, 3],
        ..Default::default()
    };
    let factory = NodeFactory::with_source(config, Arc::clone(&source)).unwrap();
    let mut tree = ExpressionTree::new();
    let mut rng = StdRng::seed_from_u64(11);

    let mut saw_series = false;
    for _ in 0..30 {
        let root = factory.build(&mut tree, &mut rng).unwrap();
        assert_well_typed(&tree, root);
        let series_nodes = tree
            .preorder(root)
            .unwrap()
            .into_iter()
            .filter(|id| tree.node(*id).unwrap().is_time_series())
            .count();
        saw_series |= series_nodes > 0;
        assert_eq!(tree.pre_process(root).unwrap(), series_nodes);
        assert!(tree.evaluate_numeric(root, source.len() - 1).is_ok());
    }
    assert!(saw_series);
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = GeneratorConfig {
        terminal_probability: 1.5,
        ..Default::default()
    };
    assert!(matches!(
        NodeFactory::new(config),
        Err(GpError::Configuration(_))
    ));
}

#[test]
fn test_no_ma_periods_still_builds_series_trees() {
    let source = SeriesSource::shared(df! { "close" => &[1.0, 2.0, 3.0, 4.0] }.unwrap());
    let config = GeneratorConfig {
        root_type: NodeType::Numeric,
        method: BuildMethod::Grow,
        max_depth: 4,
        ma_periods: vec![],
        ..Default::default()
    };
    let factory = NodeFactory::with_source(config, source).unwrap();
    assert!(factory
        .candidates(NodeType::Numeric, FactoryType::Terminals)
        .iter()
        .all(|spec| spec.name != "MovingAverage"));

    let mut tree = ExpressionTree::new();
    for seed in 0..50 {
        let root = factory
            .build(&mut tree, &mut StdRng::seed_from_u64(seed))
            .unwrap();
        assert_well_typed(&tree, root);
    }
}
