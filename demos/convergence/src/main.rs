mod topology;

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use log::{info, warn};
use simplelog::*;

use crate::topology::TopologyFile;

#[derive(Parser)]
#[command(name = "convergence", about = "Converges a link-state network and prints every routing table")]
struct Cli {
    /// JSON topology file, the built-in sample network when omitted
    topology: Option<PathBuf>,

    /// number of exchange rounds, defaults to the number of nodes minus one
    #[arg(long)]
    rounds: Option<usize>,

    /// never flood an advertisement back over the interface it arrived on
    #[arg(long)]
    quiet_flood: bool,

    /// print the tables as JSON
    #[arg(long)]
    json: bool,

    /// print the topology as JSON and exit
    #[arg(long)]
    dump_topology: bool,

    #[arg(long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    TermLogger::init(cli.log_level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto)?;

    let topology = match &cli.topology {
        Some(path) => TopologyFile::load(path)?,
        None => {
            info!("No topology given, using the sample network");
            TopologyFile::sample()
        }
    };
    if cli.dump_topology {
        println!("{}", serde_json::to_string_pretty(&topology)?);
        return Ok(());
    }

    let mut params = topology.params.clone();
    if cli.rounds.is_some() {
        params.rounds = cli.rounds;
    }
    if cli.quiet_flood {
        warn!("Flooding back to the sender is disabled, nodes with several interfaces may not learn every address");
        params.flood_to_sender = false;
    }

    let mut network = topology.build(params)?;
    network.run_convergence()?;

    let mut out = io::stdout().lock();
    if cli.json {
        let tables: BTreeMap<_, _> = network
            .routers
            .iter()
            .map(|r| (r.name.clone(), r.get_table()))
            .collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&tables)?)?;
    } else {
        writeln!(out, "Printing the routing tables after the convergence")?;
        network.print_tables(&mut out)?;
    }
    Ok(())
}
