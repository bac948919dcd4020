use std::fmt;

pub const ROLE_KEY: &str = "role";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Male,
    Female,
}

pub const ALL_ROLES: &[Role] = &[Role::Male, Role::Female];

pub fn is_valid_role(value: &str) -> bool {
    Role::parse(value).is_ok()
}

impl Role {
    /// Exact match against the stored and `data-role` spelling.
    pub fn parse(value: &str) -> Result<Self, RoleError> {
        match value {
            "male" => Ok(Role::Male),
            "female" => Ok(Role::Female),
            other => Err(RoleError::Unknown(other.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Male => "male",
            Role::Female => "female",
        }
    }

    pub fn theme_class(self) -> &'static str {
        match self {
            Role::Male => "theme-male",
            Role::Female => "theme-female",
        }
    }

    pub fn all_theme_classes() -> impl Iterator<Item = &'static str> {
        ALL_ROLES.iter().map(|role| role.theme_class())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = RoleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleError {
    Unknown(String),
}

impl fmt::Display for RoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoleError::Unknown(value) => write!(f, "unknown role '{value}'"),
        }
    }
}

impl std::error::Error for RoleError {}
