// Entrypoint for the CLI application.
// - Keeps `main` small: create an API client and hand it to the UI loop.
// - A second argument switches to one-shot upload mode, where any error
//   is fatal and exits nonzero.

use anyhow::Context;
use cls_demo_cli::{api::ApiClient, ui};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let token = args
        .next()
        .context("bearer token is required as the first argument")?;
    // Base URL comes from the environment, with the dev cluster as the
    // default.
    let base_url = std::env::var("CLS_BASEURL")
        .unwrap_or_else(|_| "https://api-dev.coriell-services.com".into());

    let api = ApiClient::new(base_url, &token)?;

    // One-shot mode: upload the given OpenArray file and exit.
    if let Some(path) = args.next() {
        let batch = api.upload_open_array(Path::new(&path))?;
        println!("openarray upload response: {batch}");
        println!("sample names: {:?}", batch.sample_names);
        return Ok(());
    }

    // Interactive mode: blocks until the user quits.
    ui::repl(&api)
}
