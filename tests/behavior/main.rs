use libtest_mimic::Arguments;
use libtest_mimic::Trial;

mod operations;
mod utils;

pub use utils::*;

fn main() {
    let args = Arguments::from_args();

    let mut tests = Vec::new();

    operations::containers::tests(&mut tests);
    operations::tree::tests(&mut tests);
    operations::stat::tests(&mut tests);
    operations::purge::tests(&mut tests);

    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let conclusion = libtest_mimic::run(&args, tests);

    cleanup_test_root();

    conclusion.exit()
}
