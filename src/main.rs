use changelog_viewer::cli;

fn main() -> anyhow::Result<()> {
    cli::run()
}
