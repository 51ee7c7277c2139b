pub mod factory;

pub use factory::NodeFactory;
