pub mod chain;
pub mod error;
pub mod mapping;
pub mod resolver;
pub mod stages;

pub use chain::ChainBuilder;
pub use error::{ConfigFormat, StageError, StageResult};
pub use mapping::{PathUrlEntry, RedirectMapping, build_mapping};
pub use resolver::{Action, MapStage, Resolution, ResolverStage, StageSource, TerminalStage};
pub use stages::{build_json_stage, build_yaml_stage, load_json_stage, load_yaml_stage};
