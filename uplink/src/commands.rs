use crate::CLAP_STYLING;
use clap::{arg, command};

fn inventory_arg() -> clap::Arg {
    arg!(-i --"inventory" <PATH>)
        .required(true)
        .help("Path to a JSON inventory export (nodes and topology edges)")
        .value_parser(clap::value_parser!(std::path::PathBuf))
}

fn config_arg() -> clap::Arg {
    arg!(-c --"config" <PATH>)
        .required(false)
        .help("Path to the resolver config (default: ~/.config/uplink/config.json)")
}

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("uplink")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("uplink")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("resolve")
                .about(
                    "Run one discovery cycle over an inventory and print the resolved \
                parent map.",
                )
                .arg(inventory_arg())
                .arg(config_arg())
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Output format")
                        .value_parser(["text", "json"])
                        .default_value("text"),
                ),
        )
        .subcommand(
            command!("watch")
                .about(
                    "Re-run discovery on a fixed delay, publishing a fresh parent map \
                each cycle, until interrupted.",
                )
                .arg(inventory_arg())
                .arg(config_arg())
                .arg(
                    arg!(--"initial-delay" <MS>)
                        .required(false)
                        .help("Delay before the first cycle, in milliseconds (overrides config)")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(--"delay" <MS>)
                        .required(false)
                        .help("Fixed delay between cycles, in milliseconds (overrides config)")
                        .value_parser(clap::value_parser!(u64)),
                ),
        )
        .subcommand(
            command!("gateways")
                .about("Show the resolved gateway assignments for an inventory.")
                .arg(inventory_arg())
                .arg(config_arg()),
        )
        .subcommand(
            command!("graph")
                .about("Show one protocol's adjacency graph for an inventory.")
                .arg(inventory_arg())
                .arg(config_arg())
                .arg(
                    arg!(-p --"protocol" <PROTOCOL>)
                        .required(false)
                        .help("Link-discovery protocol")
                        .value_parser(["lldp", "cdp", "bridge"])
                        .default_value("lldp"),
                )
                .arg(
                    arg!(-l --"label" <LABEL>)
                        .required(false)
                        .help("Only show the neighbors of this node label"),
                ),
        )
        .subcommand(
            command!("parent")
                .about("Resolve the parent of a single node label.")
                .arg(inventory_arg())
                .arg(config_arg())
                .arg(
                    arg!(-n --"node" <LABEL>)
                        .required(true)
                        .help("The node label to resolve"),
                )
                .arg(
                    arg!(--"by-gateway-key" "Only consult the computed map, ignoring overrides")
                        .required(false)
                        .action(clap::ArgAction::SetTrue)
                        .conflicts_with("by-parent-key"),
                )
                .arg(
                    arg!(--"by-parent-key" "Only consult the operator override metadata")
                        .required(false)
                        .action(clap::ArgAction::SetTrue)
                        .conflicts_with("by-gateway-key"),
                ),
        )
}
