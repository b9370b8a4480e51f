pub mod cache;
pub mod cluster;
pub mod config;
pub mod data;
pub mod error;
pub mod hymns;
pub mod linkage;
pub mod logging;
pub mod server;
pub mod service;
pub mod vocab;

pub use cache::ClusterCache;
pub use cluster::{ClusterAssignment, ClusterModel, WordEntry};
pub use config::Settings;
pub use data::{DataFile, load_model};
pub use error::{LoadError, QueryError};
pub use hymns::HymnStore;
pub use linkage::{Linkage, MergeStep};
pub use service::ClusterService;
pub use vocab::Vocabulary;
