use std::future::Future;
use std::path::PathBuf;
use std::sync::LazyLock;

use assert_cmd::Command;
use libtest_mimic::{Failed, Trial};
use purgify::error::Result;
use purgify::store::{OpenDalStore, StorageConfig};
use rand::Rng;
use rand::prelude::*;
use uuid::Uuid;

pub static TEST_RUNTIME: LazyLock<tokio::runtime::Runtime> = LazyLock::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap()
});

// All per-test roots live under one temp directory, removed after the run.
static TEST_ROOT: LazyLock<tempfile::TempDir> =
    LazyLock::new(|| tempfile::tempdir().expect("create test root"));

pub fn cleanup_test_root() {
    let _ = std::fs::remove_dir_all(TEST_ROOT.path());
}

/// One isolated end-to-end environment per test: a dedicated fs-provider
/// root, a verifier store over it, and pre-configured binary commands.
pub struct TestEnv {
    root: PathBuf,
    store: OpenDalStore,
}

impl TestEnv {
    pub async fn new() -> Result<Self> {
        let root = TEST_ROOT.path().join(Uuid::new_v4().to_string());
        std::fs::create_dir_all(&root)?;

        let config = StorageConfig::fs(root.display().to_string());
        let store = OpenDalStore::new(config).await?;
        Ok(Self { root, store })
    }

    pub fn store(&self) -> &OpenDalStore {
        &self.store
    }

    /// A purgify Command wired to this environment's storage root.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("purgify").unwrap();
        cmd.env_clear()
            .env("RUST_LOG", "info")
            .env("STORAGE_PROVIDER", "fs")
            .env("STORAGE_ROOT_PATH", &self.root);
        cmd
    }

    /// Seed a container with `objects` small files of random content.
    pub async fn seed_container(&self, container: &str, objects: usize) -> Result<()> {
        let mut rng = rand::rng();
        for i in 0..objects {
            let size = rng.random_range(1..256);
            let mut content = vec![0u8; size];
            rng.fill_bytes(&mut content);
            self.store
                .operator()
                .write(&format!("{container}/obj-{i:03}.bin"), content)
                .await?;
        }
        Ok(())
    }

    pub async fn container_exists(&self, container: &str) -> bool {
        self.store
            .operator()
            .stat(&format!("{container}/"))
            .await
            .is_ok()
    }
}

pub fn new_container_name() -> String {
    format!("c-{}", Uuid::new_v4())
}

pub fn build_async_trial<F, Fut>(name: &str, f: F) -> Trial
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<()>>,
{
    let handle = TEST_RUNTIME.handle().clone();

    Trial::test(format!("behavior::{name}"), move || {
        handle
            .block_on(f())
            .map_err(|err| Failed::from(err.to_string()))
    })
}

#[macro_export]
macro_rules! async_trials {
    ($($test:ident),* $(,)?) => {
        vec![$(build_async_trial(stringify!($test), $test),)*]
    };
}
