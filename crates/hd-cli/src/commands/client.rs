use hd_core::entities::NewClient;
use hd_db::updates::client::{ClientUpdate, ClientUpdateBuilder};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ClientCommands;
use crate::cli::subcommands::client::{ClientCreateArgs, ClientUpdateArgs};
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::{columns, output, output_rows};

/// Handle `hdk client`.
pub async fn handle(
    action: ClientCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let actor = ctx.session.require_actor()?;

    match action {
        ClientCommands::Create(args) => {
            let client = ctx.desk.create_client(&actor, new_client(args)).await?;
            output(&client, flags.format)
        }
        ClientCommands::Update(args) => {
            let id = args.id.clone();
            let client = ctx.desk.update_client(&actor, &id, client_update(args)).await?;
            output(&client, flags.format)
        }
        ClientCommands::List { limit } => {
            let mut clients = ctx.desk.list_clients(&actor).await?;
            clients.truncate(effective_limit(
                limit,
                flags.limit,
                ctx.config.general.default_limit,
            ));
            output_rows(&clients, flags.format, columns::CLIENT)
        }
        ClientCommands::Get { id } => {
            let client = ctx.desk.get_client(&actor, &id).await?;
            output(&client, flags.format)
        }
        ClientCommands::Delete { id } => {
            ctx.desk.delete_client(&actor, &id).await?;
            output(&serde_json::json!({ "deleted": id }), flags.format)
        }
    }
}

fn new_client(args: ClientCreateArgs) -> NewClient {
    NewClient {
        name: args.name,
        contact_person: args.contact_person,
        email: args.email,
        phone: args.phone,
        address: args.address,
        city: args.city,
        state: args.state,
        agency_number: args.agency_number,
        agency_name: args.agency_name,
    }
}

fn client_update(args: ClientUpdateArgs) -> ClientUpdate {
    let mut builder = ClientUpdateBuilder::new();
    if let Some(name) = args.name {
        builder = builder.name(name);
    }
    if let Some(contact_person) = args.contact_person {
        builder = builder.contact_person(contact_person);
    }
    if let Some(email) = args.email {
        builder = builder.email(email);
    }
    if let Some(phone) = args.phone {
        builder = builder.phone(phone);
    }
    if let Some(address) = args.address {
        builder = builder.address(address);
    }
    if let Some(city) = args.city {
        builder = builder.city(city);
    }
    if let Some(state) = args.state {
        builder = builder.state(state);
    }
    if args.clear_agency {
        builder = builder.agency_number(None).agency_name(None);
    } else {
        if let Some(number) = args.agency_number {
            builder = builder.agency_number(Some(number));
        }
        if let Some(name) = args.agency_name {
            builder = builder.agency_name(Some(name));
        }
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::cli::{Cli, Commands};

    fn update_args(argv: &[&str]) -> ClientUpdateArgs {
        let mut full = vec!["hdk", "client", "update", "cli-1"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).expect("cli should parse").command {
            Commands::Client {
                action: ClientCommands::Update(args),
            } => args,
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn clear_agency_nulls_both_fields() {
        let update = client_update(update_args(&["--clear-agency"]));
        assert_eq!(update.agency_number, Some(None));
        assert_eq!(update.agency_name, Some(None));
        assert!(update.name.is_none());
    }

    #[test]
    fn untouched_agency_stays_unset() {
        let update = client_update(update_args(&["--city", "Niterói"]));
        assert_eq!(update.city.as_deref(), Some("Niterói"));
        assert!(update.agency_number.is_none());
    }

    #[test]
    fn clear_agency_conflicts_with_agency_number() {
        let parsed = Cli::try_parse_from([
            "hdk",
            "client",
            "update",
            "cli-1",
            "--agency-number",
            "0042",
            "--clear-agency",
        ]);
        assert!(parsed.is_err());
    }
}
