use crate::*;
use libtest_mimic::Trial;
use predicates::prelude::*;
use purgify::error::Result;

pub fn tests(tests: &mut Vec<Trial>) {
    tests.extend(async_trials!(
        test_stat_reports_object_count,
        test_stat_missing_container_fails
    ));
}

async fn test_stat_reports_object_count() -> Result<()> {
    let env = TestEnv::new().await?;
    let container = new_container_name();
    env.seed_container(&container, 4).await?;

    env.command()
        .arg("stat")
        .arg(&container)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Name:         {container}")))
        .stdout(predicate::str::contains("Object count: 4"));

    Ok(())
}

async fn test_stat_missing_container_fails() -> Result<()> {
    let env = TestEnv::new().await?;

    env.command()
        .arg("stat")
        .arg("no-such-container")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no-such-container"));

    Ok(())
}
