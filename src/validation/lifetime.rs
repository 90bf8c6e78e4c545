// src/validation/lifetime.rs

use std::fmt;

/// How the container constructs and reuses a registered service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ServiceLifetime {
    /// One instance for the whole process
    Singleton,
    /// One instance per logical scope (e.g. a request)
    #[default]
    Scoped,
    /// A fresh instance on every resolve
    Transient,
}

impl fmt::Display for ServiceLifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceLifetime::Singleton => write!(f, "singleton"),
            ServiceLifetime::Scoped => write!(f, "scoped"),
            ServiceLifetime::Transient => write!(f, "transient"),
        }
    }
}
