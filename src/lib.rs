pub mod cli;
pub mod fetch;
pub mod parser;
pub mod pipeline;
pub mod schema;
pub mod ui;
pub mod writer;

pub use cli::{Cli, Commands};
pub use fetch::{ApiConfig, Resource, ResourceSource, SwapiClient};
pub use pipeline::{run_pipeline, sync, Extraction, RunReport};
pub use ui::{LogUi, Phase, SilentUi, Ui, UiApp};
