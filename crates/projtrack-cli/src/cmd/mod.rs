pub mod completions;
pub mod create;
pub mod edit;
pub mod list;
pub mod open;
pub mod show;

use anyhow::Context;
use chrono::Utc;
use projtrack_core::config::EffectiveConfig;
use projtrack_core::seed::seed_collection;
use projtrack_core::storage::{FileStore, Repository};
use projtrack_core::store::ProjectStore;
use tracing::debug;

/// Open the file-backed store for this invocation.
///
/// Falls back to the seed projects when nothing usable is stored; the
/// loaded collection is written back immediately.
pub fn open_store(config: &EffectiveConfig) -> anyhow::Result<ProjectStore<FileStore>> {
    let files = FileStore::new(&config.data_dir);
    let repository = Repository::with_key(files, config.config.storage.key.clone());
    debug!(dir = %config.data_dir.display(), key = %repository.key(), "opening project store");

    ProjectStore::open(repository, seed_collection(Utc::now()))
        .with_context(|| format!("failed to open project store in {}", config.data_dir.display()))
}
