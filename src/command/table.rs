//! Command table
//!
//! One descriptor per supported command, collected into a table built once
//! and owned by the client. Unknown names fail before any I/O happens.

use std::collections::HashMap;

/// Post-processing transform applied to a command's decoded reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostOp {
    /// Pass the decoded reply through unchanged
    Identity,

    /// Integer reply: 0 becomes false, nonzero becomes true
    IntToBool,

    /// Bulk `key:value` text blob becomes a map, numeric-looking values
    /// become numbers
    InfoMap,

    /// Numeric-looking text becomes a number
    NumberFromText,
}

/// Descriptor for one supported command
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    /// Canonical lowercase command name
    pub name: &'static str,

    /// Reply transform for this command
    pub post: PostOp,
}

/// Registry of supported commands
#[derive(Debug, Clone, Default)]
pub struct CommandTable {
    entries: HashMap<&'static str, CommandSpec>,
}

impl CommandTable {
    /// Builds an empty table
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Builds a table preloaded with the classic single-node command surface
    pub fn with_builtin_commands() -> Self {
        let mut table = Self::new();
        table.register_connection_commands();
        table.register_string_commands();
        table.register_keyspace_commands();
        table.register_list_commands();
        table.register_set_commands();
        table.register_sorted_set_commands();
        table.register_server_commands();
        table
    }

    /// Register a command descriptor
    pub fn register(&mut self, spec: CommandSpec) {
        self.entries.insert(spec.name, spec);
    }

    /// Case-insensitive lookup
    pub fn lookup(&self, name: &str) -> Option<&CommandSpec> {
        let lowered = name.to_ascii_lowercase();
        self.entries.get(lowered.as_str())
    }

    /// Number of registered commands
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no commands are registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn register_connection_commands(&mut self) {
        for name in ["ping", "echo", "auth", "select", "quit"] {
            self.register(CommandSpec {
                name,
                post: PostOp::Identity,
            });
        }
    }

    fn register_string_commands(&mut self) {
        self.register(CommandSpec {
            name: "setnx",
            post: PostOp::IntToBool,
        });
        for name in [
            "get", "set", "setex", "getset", "append", "substr", "mget", "mset", "msetnx",
            "incr", "incrby", "decr", "decrby",
        ] {
            self.register(CommandSpec {
                name,
                post: PostOp::Identity,
            });
        }
    }

    fn register_keyspace_commands(&mut self) {
        for name in [
            "exists",
            "del",
            "type",
            "keys",
            "randomkey",
            "rename",
            "renamenx",
            "expire",
            "ttl",
            "move",
            "sort",
        ] {
            self.register(CommandSpec {
                name,
                post: PostOp::Identity,
            });
        }
    }

    fn register_list_commands(&mut self) {
        for name in [
            "lpush", "rpush", "llen", "lrange", "ltrim", "lindex", "lset", "lrem", "lpop",
            "rpop",
        ] {
            self.register(CommandSpec {
                name,
                post: PostOp::Identity,
            });
        }
    }

    fn register_set_commands(&mut self) {
        self.register(CommandSpec {
            name: "sadd",
            post: PostOp::IntToBool,
        });
        self.register(CommandSpec {
            name: "sismember",
            post: PostOp::IntToBool,
        });
        for name in [
            "srem",
            "spop",
            "scard",
            "smembers",
            "smove",
            "sinter",
            "sinterstore",
            "sunion",
            "sunionstore",
            "sdiff",
            "sdiffstore",
        ] {
            self.register(CommandSpec {
                name,
                post: PostOp::Identity,
            });
        }
    }

    fn register_sorted_set_commands(&mut self) {
        self.register(CommandSpec {
            name: "zadd",
            post: PostOp::IntToBool,
        });
        self.register(CommandSpec {
            name: "zrem",
            post: PostOp::IntToBool,
        });
        for name in [
            "zscore",
            "zincrby",
            "zrange",
            "zrevrange",
            "zrangebyscore",
            "zcard",
        ] {
            self.register(CommandSpec {
                name,
                post: PostOp::Identity,
            });
        }
    }

    fn register_server_commands(&mut self) {
        self.register(CommandSpec {
            name: "info",
            post: PostOp::InfoMap,
        });
        self.register(CommandSpec {
            name: "lastsave",
            post: PostOp::NumberFromText,
        });
        for name in [
            "dbsize", "flushdb", "flushall", "save", "bgsave", "shutdown",
        ] {
            self.register(CommandSpec {
                name,
                post: PostOp::Identity,
            });
        }
    }
}
