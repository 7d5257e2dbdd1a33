use assetfetch_lib::cli::{ResolvedCommand, parse_args, resolve_command, run_download, run_list};
use assetfetch_lib::error::AssetFetchError;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AssetFetchError> {
    color_eyre::install()?;

    let args = parse_args();
    let command = resolve_command(args.command)?;

    match command {
        ResolvedCommand::Download(params) => {
            run_download(params, std::io::stdout()).await?;
        }
        ResolvedCommand::List(params) => run_list(params, std::io::stdout())?,
    }

    Ok(())
}
