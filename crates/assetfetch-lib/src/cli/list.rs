use crate::cli::ListParams;
use crate::error::AssetFetchError;
use crate::report::ConsoleReport;
use std::io::Write;

pub fn run_list<W: Write>(params: ListParams, out: W) -> Result<(), AssetFetchError> {
    let ListParams { base_url, assets } = params;

    ConsoleReport::new(out).listing(&base_url, &assets)?;
    Ok(())
}
