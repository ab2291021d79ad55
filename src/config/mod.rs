//! Pipeline and CLI configuration.

mod cli;
mod pipeline;

pub use cli::{
    Cli, Command, ExtractArgs, InfoArgs, PackageArgs, PrepareArgs, PublishArgs, VerifyArgs,
};
pub use pipeline::PipelineConfig;
