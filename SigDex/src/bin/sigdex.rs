fn main() -> anyhow::Result<()> {
    sigdex::cli::run_cli()
}
