use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use ticketdesk_client::tickets::{
    NewTicket, Priority, Status, Ticket, TicketOrdering, TicketPatch, TicketQuery,
};
use ticketdesk_client::ApiClient;

#[derive(Args)]
pub struct TicketsSubCommand {
    #[command(subcommand)]
    action: TicketsAction,
}

#[derive(Subcommand)]
enum TicketsAction {
    /// List tickets
    List(ListArgs),
    /// Show one ticket
    Get {
        /// Ticket id
        id: u64,
    },
    /// Create a ticket
    Create(CreateArgs),
    /// Change fields of a ticket
    Update(UpdateArgs),
    /// Delete a ticket
    Delete {
        /// Ticket id
        id: u64,
    },
}

#[derive(Args)]
struct ListArgs {
    /// Only tickets with this priority
    #[arg(long)]
    priority: Option<Priority>,
    /// Only tickets with this status
    #[arg(long)]
    status: Option<Status>,
    /// Only tickets assigned to this user id
    #[arg(long)]
    assigned_to: Option<u64>,
    /// Search title and description
    #[arg(short, long)]
    search: Option<String>,
    /// date_created, -date_created, priority or -priority
    #[arg(long, allow_hyphen_values = true)]
    ordering: Option<TicketOrdering>,
    /// Print raw JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct CreateArgs {
    /// Title
    #[arg(long)]
    title: String,
    /// Description
    #[arg(long)]
    description: String,
    /// Priority
    #[arg(long, default_value = "Low")]
    priority: Priority,
    /// Status
    #[arg(long, default_value = "Open")]
    status: Status,
    /// Assigned user id
    #[arg(long)]
    assigned_to: Option<u64>,
}

#[derive(Args)]
struct UpdateArgs {
    /// Ticket id
    id: u64,
    /// New title
    #[arg(long)]
    title: Option<String>,
    /// New description
    #[arg(long)]
    description: Option<String>,
    /// New priority
    #[arg(long)]
    priority: Option<Priority>,
    /// New status
    #[arg(long)]
    status: Option<Status>,
    /// Assign to this user id
    #[arg(long, conflicts_with = "unassign")]
    assigned_to: Option<u64>,
    /// Remove the assignee
    #[arg(long)]
    unassign: bool,
}

impl UpdateArgs {
    fn to_patch(&self) -> TicketPatch {
        let assigned_to = if self.unassign {
            Some(None)
        } else {
            self.assigned_to.map(Some)
        };

        TicketPatch {
            title: self.title.clone(),
            description: self.description.clone(),
            priority: self.priority,
            status: self.status,
            assigned_to,
        }
    }
}

fn print_ticket(ticket: &Ticket) {
    println!("#{} {}", ticket.id, ticket.title);
    println!("  priority: {}", ticket.priority);
    println!("  status:   {}", ticket.status);
    match (&ticket.assigned_to_username, ticket.assigned_to) {
        (Some(username), _) => println!("  assigned: {}", username),
        (None, Some(id)) => println!("  assigned: user {}", id),
        (None, None) => println!("  assigned: -"),
    }
    println!("  created:  {}", ticket.date_created);
    println!("  updated:  {}", ticket.date_updated);
    if !ticket.description.is_empty() {
        println!("  {}", ticket.description);
    }
}

pub async fn tickets(client: &ApiClient, sub_command_args: &TicketsSubCommand) -> Result<()> {
    let tickets = client.tickets();

    match &sub_command_args.action {
        TicketsAction::List(args) => {
            let query = TicketQuery {
                priority: args.priority,
                status: args.status,
                assigned_to: args.assigned_to,
                search: args.search.clone(),
                ordering: args.ordering,
            };
            let list = tickets.list(&query).await?;

            if args.json {
                println!("{}", serde_json::to_string_pretty(&list)?);
            } else if list.is_empty() {
                println!("No tickets");
            } else {
                for ticket in &list {
                    println!(
                        "#{:<5} {:<8} {:<12} {}",
                        ticket.id,
                        ticket.priority.to_string(),
                        ticket.status.to_string(),
                        ticket.title
                    );
                }
            }
        }
        TicketsAction::Get { id } => {
            let ticket = tickets.get(*id).await?;
            print_ticket(&ticket);
        }
        TicketsAction::Create(args) => {
            let new_ticket = NewTicket {
                title: args.title.clone(),
                description: args.description.clone(),
                priority: args.priority,
                status: args.status,
                assigned_to: args.assigned_to,
            };
            let ticket = tickets.create(&new_ticket).await?;
            println!("Created ticket #{}", ticket.id);
        }
        TicketsAction::Update(args) => {
            let patch = args.to_patch();
            if patch.is_empty() {
                bail!("Nothing to update");
            }
            let ticket = tickets.update(args.id, &patch).await?;
            print_ticket(&ticket);
        }
        TicketsAction::Delete { id } => {
            tickets.delete(*id).await?;
            println!("Deleted ticket #{}", id);
        }
    }

    Ok(())
}
