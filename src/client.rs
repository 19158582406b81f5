//! Client Dispatcher
//!
//! The synchronous command dispatcher that coordinates all components.
//!
//! ## Responsibilities
//! - Validate command names against the command table before any I/O
//! - Encode once, write, and block for the decoded reply
//! - Perform exactly one reconnect-and-retry cycle on transport failure
//! - Apply the command's post-processing transform to the reply
//!
//! ## Connection Model
//!
//! The client exclusively owns at most one connection (methods take
//! `&mut self`; no queueing or locking). The connection opens lazily on the
//! first command, is torn down on quit or unrecoverable failure, and is
//! transparently recreated by the reconnect path. The selected logical
//! database index resets to 0 whenever a fresh connection is opened;
//! callers that need another database must re-issue `select` after a
//! reconnect.

use crate::command::{post_process, CommandTable, SortOptions, Value};
use crate::config::Config;
use crate::error::{Result, RedwireError};
use crate::network::Connection;
use crate::protocol::{encode_command, Reply};

/// Synchronous Redis client over a single blocking connection
pub struct Client {
    /// Connection configuration
    config: Config,

    /// Supported command descriptors
    table: CommandTable,

    /// The open connection, if any
    conn: Option<Connection>,

    /// Currently selected logical database index
    db: u32,
}

impl Client {
    /// Create a client; no connection is opened until the first command
    pub fn new(config: Config) -> Self {
        Self {
            config,
            table: CommandTable::with_builtin_commands(),
            conn: None,
            db: 0,
        }
    }

    /// Create a client for the given host and port with default settings
    pub fn open(host: impl Into<String>, port: u16) -> Self {
        Self::new(Config::builder().host(host).port(port).build())
    }

    /// Open a fresh connection, discarding any pre-existing one first
    ///
    /// Idempotent re-open. The selected database index resets to 0; this
    /// call never re-issues `select` on the caller's behalf.
    pub fn connect(&mut self) -> Result<()> {
        self.conn = None;
        self.conn = Some(Connection::open(&self.config)?);
        self.db = 0;
        Ok(())
    }

    /// True while a connection is open
    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    /// The currently selected logical database index
    pub fn database(&self) -> u32 {
        self.db
    }

    /// Execute a command by name with pre-assembled byte arguments
    ///
    /// This is the single generic dispatch path every command flows
    /// through: table validation, encoding, the write/read round trip with
    /// its one-shot retry, and post-processing.
    pub fn execute(&mut self, name: &str, args: Vec<Vec<u8>>) -> Result<Value> {
        let spec = *self
            .table
            .lookup(name)
            .ok_or_else(|| RedwireError::UnsupportedCommand(name.to_string()))?;

        let mut frame = Vec::new();
        encode_command(spec.name, &args, &mut frame);
        tracing::trace!(command = spec.name, frame_len = frame.len(), "dispatching");

        let reply = self.roundtrip(&frame)?;
        Ok(post_process(spec.post, reply))
    }

    /// Execute a command assembling its arguments from text
    pub fn command<S: AsRef<str>>(&mut self, name: &str, args: &[S]) -> Result<Value> {
        self.execute(name, text_args(args))
    }

    /// Send QUIT best-effort and release the connection
    ///
    /// Fails with an illegal-state error when no connection is open. The
    /// QUIT write is the one place an I/O error is swallowed; the server
    /// closes the socket without a meaningful reply.
    pub fn quit(&mut self) -> Result<()> {
        let mut conn = self
            .conn
            .take()
            .ok_or(RedwireError::IllegalState("quit requires an open connection"))?;

        let mut frame = Vec::new();
        encode_command("quit", &[], &mut frame);
        let _ = conn.send(&frame);
        self.db = 0;
        Ok(())
    }

    // =========================================================================
    // Round trip + retry policy
    // =========================================================================

    /// Write the frame and decode the reply, retrying once on transport
    /// failure
    fn roundtrip(&mut self, frame: &[u8]) -> Result<Reply> {
        if self.conn.is_none() {
            self.connect()?;
        }

        match self.attempt(frame) {
            Err(err) if err.is_transport() => {
                tracing::debug!("transport failure, reconnecting once: {}", err);
                self.connect()?;
                match self.attempt(frame) {
                    Err(second) if second.is_transport() => {
                        tracing::warn!("retry after reconnect failed: {}", second);
                        self.conn = None;
                        Err(second)
                    }
                    other => self.finish_attempt(other),
                }
            }
            other => self.finish_attempt(other),
        }
    }

    /// One write/read cycle on the current connection
    fn attempt(&mut self, frame: &[u8]) -> Result<Reply> {
        let conn = self
            .conn
            .as_mut()
            .ok_or(RedwireError::IllegalState("no open connection"))?;
        conn.send(frame)?;
        conn.read_reply()
    }

    /// A protocol violation desynchronizes the stream: drop the connection
    /// and never resend. Command errors leave the connection usable.
    fn finish_attempt(&mut self, outcome: Result<Reply>) -> Result<Reply> {
        if matches!(outcome, Err(RedwireError::Protocol(_))) {
            self.conn = None;
        }
        outcome
    }

    // =========================================================================
    // Connection commands
    // =========================================================================

    /// Ping the server
    pub fn ping(&mut self) -> Result<Value> {
        self.execute("ping", Vec::new())
    }

    /// Echo a message back from the server
    pub fn echo(&mut self, message: &str) -> Result<Value> {
        self.command("echo", &[message])
    }

    /// Authenticate with a password
    pub fn auth(&mut self, password: &str) -> Result<Value> {
        self.command("auth", &[password])
    }

    /// Select a logical database; the index is remembered until reconnect
    pub fn select(&mut self, index: u32) -> Result<Value> {
        let value = self.command("select", &[index.to_string()])?;
        self.db = index;
        Ok(value)
    }

    // =========================================================================
    // String commands
    // =========================================================================

    /// Fetch a value by key
    pub fn get(&mut self, key: &str) -> Result<Value> {
        self.command("get", &[key])
    }

    /// Set a key to a value
    pub fn set(&mut self, key: &str, value: impl AsRef<[u8]>) -> Result<Value> {
        self.execute(
            "set",
            vec![key.as_bytes().to_vec(), value.as_ref().to_vec()],
        )
    }

    /// Set a key only if it does not exist; true when the key was set
    pub fn setnx(&mut self, key: &str, value: impl AsRef<[u8]>) -> Result<Value> {
        self.execute(
            "setnx",
            vec![key.as_bytes().to_vec(), value.as_ref().to_vec()],
        )
    }

    /// Set a key with an expiration in seconds
    pub fn setex(&mut self, key: &str, seconds: u64, value: impl AsRef<[u8]>) -> Result<Value> {
        self.execute(
            "setex",
            vec![
                key.as_bytes().to_vec(),
                seconds.to_string().into_bytes(),
                value.as_ref().to_vec(),
            ],
        )
    }

    /// Fetch the values of several keys; missing keys yield nil entries
    pub fn mget(&mut self, keys: &[&str]) -> Result<Value> {
        self.command("mget", keys)
    }

    /// Increment a counter by one
    pub fn incr(&mut self, key: &str) -> Result<Value> {
        self.command("incr", &[key])
    }

    /// Increment a counter by `amount`
    pub fn incrby(&mut self, key: &str, amount: i64) -> Result<Value> {
        self.command("incrby", &[key, &amount.to_string()])
    }

    /// Decrement a counter by one
    pub fn decr(&mut self, key: &str) -> Result<Value> {
        self.command("decr", &[key])
    }

    /// Decrement a counter by `amount`
    pub fn decrby(&mut self, key: &str, amount: i64) -> Result<Value> {
        self.command("decrby", &[key, &amount.to_string()])
    }

    // =========================================================================
    // Keyspace commands
    // =========================================================================

    /// Delete one or more keys; returns the number removed
    pub fn del(&mut self, keys: &[&str]) -> Result<Value> {
        self.command("del", keys)
    }

    /// Count how many of the given keys exist
    pub fn exists(&mut self, key: &str) -> Result<Value> {
        self.command("exists", &[key])
    }

    /// Type tag of the value stored at a key
    pub fn key_type(&mut self, key: &str) -> Result<Value> {
        self.command("type", &[key])
    }

    /// Keys matching a glob pattern
    pub fn keys(&mut self, pattern: &str) -> Result<Value> {
        self.command("keys", &[pattern])
    }

    /// A random key from the selected database
    pub fn randomkey(&mut self) -> Result<Value> {
        self.execute("randomkey", Vec::new())
    }

    /// Rename a key
    pub fn rename(&mut self, from: &str, to: &str) -> Result<Value> {
        self.command("rename", &[from, to])
    }

    /// Set a time-to-live in seconds on a key
    pub fn expire(&mut self, key: &str, seconds: u64) -> Result<Value> {
        self.command("expire", &[key, &seconds.to_string()])
    }

    /// Remaining time-to-live of a key in seconds
    pub fn ttl(&mut self, key: &str) -> Result<Value> {
        self.command("ttl", &[key])
    }

    /// Sort the elements at a key per the given options
    pub fn sort(&mut self, key: &str, options: &SortOptions) -> Result<Value> {
        self.execute("sort", options.to_args(key))
    }

    // =========================================================================
    // List commands
    // =========================================================================

    /// Prepend a value to a list
    pub fn lpush(&mut self, key: &str, value: impl AsRef<[u8]>) -> Result<Value> {
        self.execute(
            "lpush",
            vec![key.as_bytes().to_vec(), value.as_ref().to_vec()],
        )
    }

    /// Append a value to a list
    pub fn rpush(&mut self, key: &str, value: impl AsRef<[u8]>) -> Result<Value> {
        self.execute(
            "rpush",
            vec![key.as_bytes().to_vec(), value.as_ref().to_vec()],
        )
    }

    /// Length of a list
    pub fn llen(&mut self, key: &str) -> Result<Value> {
        self.command("llen", &[key])
    }

    /// Elements of a list between two indices, inclusive
    pub fn lrange(&mut self, key: &str, start: i64, stop: i64) -> Result<Value> {
        self.command("lrange", &[key, &start.to_string(), &stop.to_string()])
    }

    /// Pop the first element of a list
    pub fn lpop(&mut self, key: &str) -> Result<Value> {
        self.command("lpop", &[key])
    }

    /// Pop the last element of a list
    pub fn rpop(&mut self, key: &str) -> Result<Value> {
        self.command("rpop", &[key])
    }

    // =========================================================================
    // Set commands
    // =========================================================================

    /// Add a member to a set; true when it was newly added
    pub fn sadd(&mut self, key: &str, member: impl AsRef<[u8]>) -> Result<Value> {
        self.execute(
            "sadd",
            vec![key.as_bytes().to_vec(), member.as_ref().to_vec()],
        )
    }

    /// Remove a member from a set
    pub fn srem(&mut self, key: &str, member: impl AsRef<[u8]>) -> Result<Value> {
        self.execute(
            "srem",
            vec![key.as_bytes().to_vec(), member.as_ref().to_vec()],
        )
    }

    /// True when the member is in the set
    pub fn sismember(&mut self, key: &str, member: impl AsRef<[u8]>) -> Result<Value> {
        self.execute(
            "sismember",
            vec![key.as_bytes().to_vec(), member.as_ref().to_vec()],
        )
    }

    /// All members of a set
    pub fn smembers(&mut self, key: &str) -> Result<Value> {
        self.command("smembers", &[key])
    }

    /// Number of members in a set
    pub fn scard(&mut self, key: &str) -> Result<Value> {
        self.command("scard", &[key])
    }

    // =========================================================================
    // Sorted set commands
    // =========================================================================

    /// Add a member with a score; true when it was newly added
    pub fn zadd(&mut self, key: &str, score: f64, member: impl AsRef<[u8]>) -> Result<Value> {
        self.execute(
            "zadd",
            vec![
                key.as_bytes().to_vec(),
                score.to_string().into_bytes(),
                member.as_ref().to_vec(),
            ],
        )
    }

    /// Remove a member from a sorted set; true when it was removed
    pub fn zrem(&mut self, key: &str, member: impl AsRef<[u8]>) -> Result<Value> {
        self.execute(
            "zrem",
            vec![key.as_bytes().to_vec(), member.as_ref().to_vec()],
        )
    }

    /// Score of a member in a sorted set
    pub fn zscore(&mut self, key: &str, member: impl AsRef<[u8]>) -> Result<Value> {
        self.execute(
            "zscore",
            vec![key.as_bytes().to_vec(), member.as_ref().to_vec()],
        )
    }

    /// Members of a sorted set between two ranks, ascending
    pub fn zrange(&mut self, key: &str, start: i64, stop: i64) -> Result<Value> {
        self.command("zrange", &[key, &start.to_string(), &stop.to_string()])
    }

    // =========================================================================
    // Server commands
    // =========================================================================

    /// Server information and statistics as a typed map
    pub fn info(&mut self) -> Result<Value> {
        self.execute("info", Vec::new())
    }

    /// UNIX timestamp of the last successful save
    pub fn lastsave(&mut self) -> Result<Value> {
        self.execute("lastsave", Vec::new())
    }

    /// Number of keys in the selected database
    pub fn dbsize(&mut self) -> Result<Value> {
        self.execute("dbsize", Vec::new())
    }

    /// Delete all keys in the selected database
    pub fn flushdb(&mut self) -> Result<Value> {
        self.execute("flushdb", Vec::new())
    }

    /// Delete all keys in all databases
    pub fn flushall(&mut self) -> Result<Value> {
        self.execute("flushall", Vec::new())
    }
}

fn text_args<S: AsRef<str>>(args: &[S]) -> Vec<Vec<u8>> {
    args.iter()
        .map(|arg| arg.as_ref().as_bytes().to_vec())
        .collect()
}
