//! SORT option builder
//!
//! Assembles the argument list for the structured SORT command. Direction is
//! always emitted explicitly: `ASC` when `ascending` is set (the server's
//! default ordering), `DESC` otherwise.

/// Options for the SORT command
#[derive(Debug, Clone, Default)]
pub struct SortOptions {
    /// `BY <pattern>` external-weight lookup pattern
    pub by_pattern: Option<String>,

    /// `LIMIT <start> <count>` window
    pub limit: Option<(i64, i64)>,

    /// One `GET <pattern>` per entry
    pub get_patterns: Vec<String>,

    /// Emit `ASC` instead of `DESC`
    pub ascending: bool,

    /// `ALPHA`: sort lexicographically instead of numerically
    pub lexicographically: bool,
}

impl SortOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sort by an external key pattern instead of the element value
    pub fn by_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.by_pattern = Some(pattern.into());
        self
    }

    /// Constrain the result window to `count` elements starting at `start`
    pub fn limit(mut self, start: i64, count: i64) -> Self {
        self.limit = Some((start, count));
        self
    }

    /// Fetch values through a pattern instead of returning the elements
    pub fn get_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.get_patterns.push(pattern.into());
        self
    }

    /// Ascending order (the server default); unset emits `DESC`
    pub fn ascending(mut self, ascending: bool) -> Self {
        self.ascending = ascending;
        self
    }

    /// Lexicographic ordering (`ALPHA`)
    pub fn lexicographically(mut self, lexicographically: bool) -> Self {
        self.lexicographically = lexicographically;
        self
    }

    /// Assemble the SORT argument list for `key`
    pub fn to_args(&self, key: &str) -> Vec<Vec<u8>> {
        let mut args: Vec<Vec<u8>> = vec![key.as_bytes().to_vec()];

        if let Some(pattern) = &self.by_pattern {
            args.push(b"BY".to_vec());
            args.push(pattern.as_bytes().to_vec());
        }
        if let Some((start, count)) = self.limit {
            args.push(b"LIMIT".to_vec());
            args.push(start.to_string().into_bytes());
            args.push(count.to_string().into_bytes());
        }
        for pattern in &self.get_patterns {
            args.push(b"GET".to_vec());
            args.push(pattern.as_bytes().to_vec());
        }
        args.push(if self.ascending {
            b"ASC".to_vec()
        } else {
            b"DESC".to_vec()
        });
        if self.lexicographically {
            args.push(b"ALPHA".to_vec());
        }
        args
    }
}
