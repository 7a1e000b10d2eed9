use crate::*;
use libtest_mimic::Trial;
use predicates::prelude::*;
use purgify::error::Result;

pub fn tests(tests: &mut Vec<Trial>) {
    tests.extend(async_trials!(
        test_purge_force_removes_container_and_contents,
        test_purge_reports_full_progress,
        test_purge_declined_leaves_container,
        test_purge_closed_stdin_counts_as_cancel,
        test_purge_missing_container_fails,
        test_purge_nested_objects
    ));
}

async fn test_purge_force_removes_container_and_contents() -> Result<()> {
    let env = TestEnv::new().await?;
    let container = new_container_name();
    env.seed_container(&container, 5).await?;

    env.command()
        .arg("purge")
        .arg(&container)
        .arg("--force")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted container"));

    assert!(
        !env.container_exists(&container).await,
        "container should be gone after purge"
    );

    Ok(())
}

async fn test_purge_reports_full_progress() -> Result<()> {
    let env = TestEnv::new().await?;
    let container = new_container_name();
    env.seed_container(&container, 10).await?;

    env.command()
        .arg("purge")
        .arg(&container)
        .arg("--force")
        .assert()
        .success()
        .stdout(predicate::str::contains("0%"))
        .stdout(predicate::str::contains("100%"));

    Ok(())
}

async fn test_purge_declined_leaves_container() -> Result<()> {
    let env = TestEnv::new().await?;
    let container = new_container_name();
    env.seed_container(&container, 2).await?;

    env.command()
        .arg("purge")
        .arg(&container)
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Aborted."));

    assert!(
        env.container_exists(&container).await,
        "declined purge must not touch the container"
    );

    Ok(())
}

async fn test_purge_closed_stdin_counts_as_cancel() -> Result<()> {
    let env = TestEnv::new().await?;
    let container = new_container_name();
    env.seed_container(&container, 1).await?;

    env.command()
        .arg("purge")
        .arg(&container)
        .assert()
        .success()
        .stdout(predicate::str::contains("Aborted."));

    assert!(env.container_exists(&container).await);

    Ok(())
}

async fn test_purge_missing_container_fails() -> Result<()> {
    let env = TestEnv::new().await?;

    env.command()
        .arg("purge")
        .arg("no-such-container")
        .arg("--force")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no-such-container"));

    Ok(())
}

async fn test_purge_nested_objects() -> Result<()> {
    let env = TestEnv::new().await?;
    let container = new_container_name();
    env.seed_container(&container, 2).await?;
    env.store()
        .operator()
        .write(&format!("{container}/nested/deep/obj.bin"), vec![1u8, 2, 3])
        .await?;

    env.command()
        .arg("purge")
        .arg(&container)
        .arg("--force")
        .assert()
        .success();

    assert!(!env.container_exists(&container).await);

    Ok(())
}
