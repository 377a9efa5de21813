use anyhow::Result;
use clap::Parser;

// Sizes, colors and the output directory are fixed; the only flags are
// clap's own `--help` and `--version`.
#[derive(Debug, Parser)]
#[clap(
    name = "store-icon-gen",
    version,
    about = "Generate the PWA icon set (assets/icons/icon-<size>x<size>.png)"
)]
struct Args {}

fn main() -> Result<()> {
    let _args = Args::parse();

    store_icon_gen::icon_gen::run()
}
