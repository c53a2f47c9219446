use xshell::{cmd, Shell};

use crate::flags::XtaskCmd;

mod flags;

fn main() -> anyhow::Result<()> {
    let flags = flags::Xtask::from_env()?;
    let sh = Shell::new()?;
    match flags.subcommand {
        XtaskCmd::Test(test) => {
            let package = test.package.map(|p| vec!["-p".to_string(), p]).unwrap_or_default();
            cmd!(sh, "cargo test --workspace {package...}").run()?;
            cmd!(sh, "cargo test -p containers --no-default-features").run()?;
        }
        XtaskCmd::Miri(_) => {
            cmd!(sh, "cargo +nightly miri test -p containers --no-default-features").run()?;
        }
        XtaskCmd::Fix(_) => {
            cmd!(sh, "cargo fmt --all").run()?;
            cmd!(sh, "cargo fix --allow-dirty --allow-staged -q").run()?;
            cmd!(sh, "cargo clippy --fix --allow-dirty --allow-staged").run()?;
            cmd!(sh, "cargo sort -w").run()?;
        }
    }

    Ok(())
}
