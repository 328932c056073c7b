// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::ApiClient;
use crate::models::NewCategory;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(client: &ApiClient, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let category = client.create_category(&NewCategory {
                name: name.clone(),
                color: sub.get_one::<String>("color").map(|s| s.to_string()),
                is_default: sub.get_flag("default").then_some(1),
            })?;
            println!("Added category '{}' (id {})", category.name, category.id);
        }
        Some(("list", sub)) => {
            let categories = client.list_categories()?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &categories)? {
                let rows = categories
                    .into_iter()
                    .map(|c| {
                        vec![
                            c.id.to_string(),
                            c.name,
                            c.color,
                            if c.is_default != 0 { "yes" } else { "" }.to_string(),
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(&["ID", "Name", "Color", "Default"], rows));
            }
        }
        Some(("set", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let current = client.get_category(id)?;
            let update = NewCategory {
                name: sub
                    .get_one::<String>("name")
                    .cloned()
                    .unwrap_or(current.name),
                color: Some(
                    sub.get_one::<String>("color")
                        .cloned()
                        .unwrap_or(current.color),
                ),
                is_default: Some(if sub.get_flag("default") {
                    1
                } else {
                    current.is_default
                }),
            };
            let category = client.update_category(id, &update)?;
            println!("Updated category '{}' (id {})", category.name, category.id);
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            client.delete_category(id)?;
            println!("Removed category {}", id);
        }
        _ => {}
    }
    Ok(())
}
