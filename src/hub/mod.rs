//! HuggingFace Hub publishing
//!
//! Uploads a merged model directory, a generated Turkish medical model
//! card, and a tag list to a Hub repository via the HF REST API.
//!
//! A name collision on repository creation (HTTP 409) is the one
//! recoverable remote failure: it routes the publish into the
//! update-in-place path instead of aborting. Every other remote failure is
//! fatal and surfaced to the caller.

mod config;
mod model_card;
mod publisher;
mod result;

pub use config::PublishConfig;
pub use model_card::ModelCard;
pub use publisher::HfPublisher;
pub use result::{PublishError, PublishResult, RepoCreation};
