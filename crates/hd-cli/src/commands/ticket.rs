use hd_core::entities::{NewTicket, Ticket};
use hd_core::enums::{Priority, TicketStatus};
use hd_db::updates::ticket::TicketUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TicketCommands;
use crate::cli::subcommands::ticket::{TicketCreateArgs, TicketSort, TicketUpdateArgs};
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::{columns, output, output_rows};

/// Handle `hdk ticket`.
pub async fn handle(
    action: TicketCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let actor = ctx.session.require_actor()?;

    match action {
        TicketCommands::Create(args) => {
            let ticket = ctx.desk.create_ticket(&actor, new_ticket(args)?).await?;
            output(&ticket, flags.format)
        }
        TicketCommands::Update(args) => {
            let id = args.id.clone();
            let update = update_builder(args)?.build();
            let ticket = ctx.desk.update_ticket(&actor, &id, update).await?;
            output(&ticket, flags.format)
        }
        TicketCommands::List {
            status,
            technician,
            client,
            sort,
            limit,
        } => {
            let status = status
                .as_deref()
                .map(|raw| parse_enum::<TicketStatus>(raw, "status"))
                .transpose()?;

            let mut tickets = ctx.desk.list_tickets(&actor).await?;
            tickets.retain(|t| {
                status.is_none_or(|s| t.status == s)
                    && technician
                        .as_deref()
                        .is_none_or(|id| t.technician_id.as_deref() == Some(id))
                    && client.as_deref().is_none_or(|id| t.client_id == id)
            });
            sort_tickets(&mut tickets, sort);
            tickets.truncate(effective_limit(
                limit,
                flags.limit,
                ctx.config.general.default_limit,
            ));
            output_rows(&tickets, flags.format, columns::TICKET)
        }
        TicketCommands::Get { id } => {
            let ticket = ctx.desk.get_ticket(&actor, &id).await?;
            output(&ticket, flags.format)
        }
        TicketCommands::Delete { id } => {
            ctx.desk.delete_ticket(&actor, &id).await?;
            output(&serde_json::json!({ "deleted": id }), flags.format)
        }
    }
}

fn sort_tickets(tickets: &mut [Ticket], sort: TicketSort) {
    match sort {
        TicketSort::Newest => tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        TicketSort::Oldest => tickets.sort_by_key(|t| t.created_at),
        TicketSort::Priority => tickets.sort_by(|a, b| {
            b.priority
                .weight()
                .cmp(&a.priority.weight())
                .then_with(|| b.created_at.cmp(&a.created_at))
        }),
    }
}

fn new_ticket(args: TicketCreateArgs) -> anyhow::Result<NewTicket> {
    let mut ticket = NewTicket::new(args.title, args.description, args.client);
    ticket.technician_id = args.technician;
    if let Some(raw) = args.status.as_deref() {
        ticket.status = parse_enum::<TicketStatus>(raw, "status")?;
    }
    if let Some(raw) = args.priority.as_deref() {
        ticket.priority = parse_enum::<Priority>(raw, "priority")?;
    }
    ticket.location = args.location;
    ticket.equipment_info = args.equipment_info;
    ticket.found_defect = args.found_defect;
    ticket.under_warranty = args.under_warranty;
    Ok(ticket)
}

/// Blank text on a nullable field clears it.
fn nullable(value: String) -> Option<String> {
    if value.trim().is_empty() { None } else { Some(value) }
}

fn update_builder(args: TicketUpdateArgs) -> anyhow::Result<TicketUpdateBuilder> {
    let mut builder = TicketUpdateBuilder::new();
    if let Some(title) = args.title {
        builder = builder.title(title);
    }
    if let Some(description) = args.description {
        builder = builder.description(description);
    }
    if let Some(client) = args.client {
        builder = builder.client_id(client);
    }
    if let Some(technician) = args.technician {
        builder = builder.technician_id(Some(technician));
    } else if args.unassign {
        builder = builder.technician_id(None);
    }
    if let Some(raw) = args.status.as_deref() {
        builder = builder.status(parse_enum::<TicketStatus>(raw, "status")?);
    }
    if let Some(raw) = args.priority.as_deref() {
        builder = builder.priority(parse_enum::<Priority>(raw, "priority")?);
    }
    if let Some(location) = args.location {
        builder = builder.location(location);
    }
    if let Some(value) = args.found_defect {
        builder = builder.found_defect(nullable(value));
    }
    if let Some(value) = args.executed_services {
        builder = builder.executed_services(nullable(value));
    }
    if let Some(value) = args.technician_notes {
        builder = builder.technician_notes(nullable(value));
    }
    if let Some(value) = args.client_notes {
        builder = builder.client_notes(nullable(value));
    }
    if let Some(value) = args.equipment_info {
        builder = builder.equipment_info(nullable(value));
    }
    if let Some(value) = args.under_warranty {
        builder = builder.under_warranty(value);
    }
    if let Some(value) = args.working {
        builder = builder.working(value);
    }
    if let Some(value) = args.service_completed {
        builder = builder.service_completed(value);
    }
    if let Some(value) = args.verified_by_client {
        builder = builder.verified_by_client(value);
    }
    if let Some(value) = args.technician_signature {
        builder = builder.technician_signature(nullable(value));
    }
    if let Some(value) = args.client_signature {
        builder = builder.client_signature(nullable(value));
    }
    Ok(builder)
}
