//! Redwire CLI Client
//!
//! Command-line interface for issuing commands to a Redis-compatible server.

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use redwire::{Client, Config, SortOptions};

/// Redwire CLI
#[derive(Parser, Debug)]
#[command(name = "redwire-cli")]
#[command(about = "Synchronous RESP2 client for Redis-compatible servers")]
#[command(version)]
struct Args {
    /// Server host
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Server port
    #[arg(short, long, default_value = "6379")]
    port: u16,

    /// Logical database index to select before the command
    #[arg(short, long)]
    db: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Set a key-value pair
    Set {
        /// The key to set
        key: String,

        /// The value to set
        value: String,
    },

    /// Delete one or more keys
    Del {
        /// The keys to delete
        keys: Vec<String>,
    },

    /// Count how many of the given keys exist
    Exists {
        /// The key to check
        key: String,
    },

    /// Increment a counter
    Incr {
        /// The counter key
        key: String,
    },

    /// List keys matching a glob pattern
    Keys {
        /// The glob pattern
        #[arg(default_value = "*")]
        pattern: String,
    },

    /// Ping the server
    Ping,

    /// Echo a message back from the server
    Echo {
        /// The message
        message: String,
    },

    /// Server information and statistics
    Info,

    /// Sort the elements at a key
    Sort {
        /// The key to sort
        key: String,

        /// Sort lexicographically (ALPHA)
        #[arg(long)]
        alpha: bool,

        /// Ascending order (descending when omitted)
        #[arg(long)]
        asc: bool,

        /// Limit: start offset
        #[arg(long, requires = "count")]
        offset: Option<i64>,

        /// Limit: element count
        #[arg(long, requires = "offset")]
        count: Option<i64>,
    },

    /// Send a raw command: name followed by its arguments
    Raw {
        /// Command name
        name: String,

        /// Command arguments
        args: Vec<String>,
    },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,redwire=info"));

    fmt().with_env_filter(filter).with_target(false).init();

    let args = Args::parse();

    let config = Config::builder().host(args.host).port(args.port).build();
    let mut client = Client::new(config);

    if let Err(e) = run(&mut client, args.db, args.command) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(client: &mut Client, db: Option<u32>, command: Commands) -> redwire::Result<()> {
    if let Some(index) = db {
        client.select(index)?;
    }

    let value = match command {
        Commands::Get { key } => client.get(&key)?,
        Commands::Set { key, value } => client.set(&key, value.as_bytes())?,
        Commands::Del { keys } => {
            let refs: Vec<&str> = keys.iter().map(String::as_str).collect();
            client.del(&refs)?
        }
        Commands::Exists { key } => client.exists(&key)?,
        Commands::Incr { key } => client.incr(&key)?,
        Commands::Keys { pattern } => client.keys(&pattern)?,
        Commands::Ping => client.ping()?,
        Commands::Echo { message } => client.echo(&message)?,
        Commands::Info => client.info()?,
        Commands::Sort {
            key,
            alpha,
            asc,
            offset,
            count,
        } => {
            let mut options = SortOptions::new()
                .lexicographically(alpha)
                .ascending(asc);
            if let (Some(offset), Some(count)) = (offset, count) {
                options = options.limit(offset, count);
            }
            client.sort(&key, &options)?
        }
        Commands::Raw { name, args } => client.command(&name, &args)?,
    };

    println!("{}", value);

    let _ = client.quit();
    Ok(())
}
