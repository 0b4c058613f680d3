/// Store error taxonomy
///
/// Every gateway operation returns `Result<_, StoreError>`. Integrity
/// violations reported by PostgreSQL are classified by constraint name so
/// callers can branch on the variant instead of inspecting messages.

use sqlx::error::ErrorKind;

/// Named constraints from the initial migration
pub mod constraints {
    pub const USERS_PKEY: &str = "users_pkey";
    pub const USERS_EMAIL_KEY: &str = "users_email_key";
    pub const TEAMS_PKEY: &str = "teams_pkey";
    pub const TEAMS_USER_FKEY: &str = "teams_user_id_fkey";
    pub const TEAM_MEMBERS_PKEY: &str = "team_members_pkey";
    pub const DOCUMENTS_PKEY: &str = "documents_pkey";
}

/// Typed outcome of a failed store operation
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Registration with an email that already has an account
    #[error("Email already registered")]
    DuplicateEmail,

    /// No user has this email
    #[error("Unknown email")]
    UnknownEmail,

    /// No team has this identifier
    #[error("Invalid team id")]
    InvalidTeamId,

    /// Team already holds the maximum number of members
    #[error("Team is full")]
    TeamFull,

    /// No member with this identifier in this team
    #[error("No such team member")]
    NoSuchMember,

    /// The store rejected a new team row
    #[error("Team rejected by store: {0}")]
    DuplicateTeam(String),

    /// A freshly generated identifier was already taken
    #[error("Identifier collision on {0}")]
    IdentifierCollision(String),

    /// Connectivity or any other unexpected store failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Integrity violation extracted from a `sqlx::Error`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub kind: ViolationKind,
    pub constraint: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    Unique,
    ForeignKey,
    Other,
}

impl Violation {
    /// Returns the violation carried by `err`, if it is a constraint failure
    pub fn from_sqlx(err: &sqlx::Error) -> Option<Self> {
        let db_err = err.as_database_error()?;

        let kind = match db_err.kind() {
            ErrorKind::UniqueViolation => ViolationKind::Unique,
            ErrorKind::ForeignKeyViolation => ViolationKind::ForeignKey,
            ErrorKind::NotNullViolation | ErrorKind::CheckViolation => ViolationKind::Other,
            _ => return None,
        };

        Some(Self {
            kind,
            constraint: db_err.constraint().map(str::to_string),
        })
    }

    pub fn is_constraint(&self, name: &str) -> bool {
        self.constraint.as_deref() == Some(name)
    }

    pub fn describe(&self) -> String {
        self.constraint
            .clone()
            .unwrap_or_else(|| format!("{:?} violation", self.kind))
    }
}
