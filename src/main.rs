// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use splittab::{api, cli, commands, config};

fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();

    if let Some(("config", sub)) = matches.subcommand() {
        match sub.subcommand() {
            Some(("set-url", s)) => {
                let url = s.get_one::<String>("url").unwrap();
                let path = config::set_api_url(url)?;
                println!("API URL saved to {}", path.display());
            }
            Some(("show", _)) => {
                println!("api_url = {}", config::api_url(None)?);
            }
            _ => {}
        }
        return Ok(());
    }

    let api_override = matches.get_one::<String>("api-url").map(String::as_str);
    let client = api::ApiClient::new(&config::api_url(api_override)?)?;

    match matches.subcommand() {
        Some(("user", sub)) => commands::users::handle(&client, sub)?,
        Some(("category", sub)) => commands::categories::handle(&client, sub)?,
        Some(("expense", sub)) => commands::expenses::handle(&client, sub)?,
        Some(("report", sub)) => commands::reports::handle(&client, sub)?,
        Some(("import", sub)) => commands::importer::handle(&client, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&client, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
