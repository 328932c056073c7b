// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::ApiClient;
use crate::models::NewUser;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(client: &ApiClient, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let color = sub.get_one::<String>("color").map(|s| s.to_string());
            let user = client.create_user(&NewUser {
                name: name.clone(),
                color,
            })?;
            println!("Added user '{}' (id {})", user.name, user.id);
        }
        Some(("list", sub)) => {
            let users = client.list_users()?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &users)? {
                let rows = users
                    .into_iter()
                    .map(|u| vec![u.id.to_string(), u.name, u.color])
                    .collect();
                println!("{}", pretty_table(&["ID", "Name", "Color"], rows));
            }
        }
        Some(("set", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let current = client.get_user(id)?;
            let update = NewUser {
                name: sub
                    .get_one::<String>("name")
                    .cloned()
                    .unwrap_or(current.name),
                color: Some(
                    sub.get_one::<String>("color")
                        .cloned()
                        .unwrap_or(current.color),
                ),
            };
            let user = client.update_user(id, &update)?;
            println!("Updated user '{}' (id {})", user.name, user.id);
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            client.delete_user(id)?;
            println!("Removed user {}", id);
        }
        _ => {}
    }
    Ok(())
}
