use commands::command_argument_builder;
use uplink::print_banner;

mod commands;
mod handlers;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");

    if !quiet {
        print_banner();
    }

    if chosen_command.subcommand().is_none() {
        return;
    }

    let outcome = match chosen_command.subcommand() {
        Some(("resolve", primary_command)) => handlers::handle_resolve(primary_command),
        Some(("watch", primary_command)) => handlers::handle_watch(primary_command).await,
        Some(("gateways", primary_command)) => handlers::handle_gateways(primary_command),
        Some(("graph", primary_command)) => handlers::handle_graph(primary_command),
        Some(("parent", primary_command)) => handlers::handle_parent(primary_command),
        _ => unreachable!("clap should ensure we don't get here"),
    };

    if let Err(e) = outcome {
        eprintln!("✗ {:#}", e);
        std::process::exit(1);
    }
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
