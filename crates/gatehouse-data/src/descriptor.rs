//! Connection descriptors produced by engine resolution.

use std::fmt::{self, Display, Formatter};

/// Supported storage engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineKind {
    /// Embedded file database.
    Sqlite,
    /// `MySQL` server.
    Mysql,
    /// `PostgreSQL` server.
    Postgres,
}

impl EngineKind {
    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Mysql => "mysql",
            Self::Postgres => "postgres",
        }
    }
}

impl Display for EngineKind {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Server coordinates used to create the target database out of band.
#[derive(Clone, PartialEq, Eq)]
pub struct ProvisioningTarget {
    /// Engine that owns the server.
    pub engine: EngineKind,
    /// Server host name or address.
    pub host: String,
    /// Server TCP port.
    pub port: u16,
    /// User with permission to create databases.
    pub user: String,
    /// Password for `user`.
    pub password: String,
    /// Database that must exist.
    pub database_name: String,
    /// SSL mode named by the configuration; `None` keeps the client default.
    pub ssl_mode: Option<String>,
}

impl fmt::Debug for ProvisioningTarget {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ProvisioningTarget")
            .field("engine", &self.engine)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database_name", &self.database_name)
            .field("ssl_mode", &self.ssl_mode)
            .finish()
    }
}

/// Everything needed to open the application connection.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionDescriptor {
    engine: EngineKind,
    dsn_or_path: String,
    provisioning: Option<ProvisioningTarget>,
}

impl ConnectionDescriptor {
    /// Descriptor for an embedded database file; never provisioned.
    #[must_use]
    pub fn sqlite(path: impl Into<String>) -> Self {
        Self {
            engine: EngineKind::Sqlite,
            dsn_or_path: path.into(),
            provisioning: None,
        }
    }

    /// Descriptor for a server engine.
    #[must_use]
    pub fn server(
        engine: EngineKind,
        dsn: impl Into<String>,
        provisioning: Option<ProvisioningTarget>,
    ) -> Self {
        Self {
            engine,
            dsn_or_path: dsn.into(),
            provisioning,
        }
    }

    /// Engine the descriptor targets.
    #[must_use]
    pub const fn engine(&self) -> EngineKind {
        self.engine
    }

    /// Connection string for server engines, file path for `SQLite`.
    #[must_use]
    pub fn dsn_or_path(&self) -> &str {
        &self.dsn_or_path
    }

    /// Out-of-band creation target, when the engine supports provisioning.
    #[must_use]
    pub const fn provisioning(&self) -> Option<&ProvisioningTarget> {
        self.provisioning.as_ref()
    }
}

impl fmt::Debug for ConnectionDescriptor {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let location = match self.engine {
            EngineKind::Sqlite => self.dsn_or_path.as_str(),
            EngineKind::Mysql | EngineKind::Postgres => "<redacted>",
        };
        formatter
            .debug_struct("ConnectionDescriptor")
            .field("engine", &self.engine)
            .field("dsn_or_path", &location)
            .field("provisioning", &self.provisioning)
            .finish()
    }
}

/// Result of ensuring the target database exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionOutcome {
    /// The database was created by this call.
    Created,
    /// The database already existed.
    AlreadyPresent,
    /// The engine needs no out-of-band creation.
    NotApplicable,
}

impl ProvisionOutcome {
    /// Stable identifier suitable for logs and CLI output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::AlreadyPresent => "already_present",
            Self::NotApplicable => "not_applicable",
        }
    }
}
