use crate::*;
use libtest_mimic::Trial;
use predicates::prelude::*;
use purgify::error::Result;

pub fn tests(tests: &mut Vec<Trial>) {
    tests.extend(async_trials!(
        test_containers_lists_seeded_containers,
        test_containers_empty_account
    ));
}

async fn test_containers_lists_seeded_containers() -> Result<()> {
    let env = TestEnv::new().await?;
    let first = new_container_name();
    let second = new_container_name();
    env.seed_container(&first, 3).await?;
    env.seed_container(&second, 1).await?;

    env.command()
        .arg("containers")
        .assert()
        .success()
        .stdout(predicate::str::contains(&first))
        .stdout(predicate::str::contains(&second))
        .stdout(predicate::str::contains("3 objects"));

    Ok(())
}

async fn test_containers_empty_account() -> Result<()> {
    let env = TestEnv::new().await?;

    env.command()
        .arg("containers")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    Ok(())
}
