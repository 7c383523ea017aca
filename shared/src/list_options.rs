use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} value: {value:?}")]
pub struct UnknownOption {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownOption {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Completion filter for the listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    #[default]
    All,
    Pending,
    Completed,
}

impl Status {
    pub const VARIANTS: [Status; 3] = [Status::All, Status::Pending, Status::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::All => "all",
            Status::Pending => "pending",
            Status::Completed => "completed",
        }
    }
}

impl FromStr for Status {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Status::All),
            "pending" | "incomplete" => Ok(Status::Pending),
            "completed" => Ok(Status::Completed),
            _ => Err(UnknownOption::new("status", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    CreatedAt,
    DueDate,
    Title,
}

impl SortKey {
    pub const VARIANTS: [SortKey; 3] = [SortKey::CreatedAt, SortKey::DueDate, SortKey::Title];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::CreatedAt => "createdAt",
            SortKey::DueDate => "dueDate",
            SortKey::Title => "title",
        }
    }
}

impl FromStr for SortKey {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "createdat" => Ok(SortKey::CreatedAt),
            "duedate" => Ok(SortKey::DueDate),
            "title" => Ok(SortKey::Title),
            _ => Err(UnknownOption::new("sort", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Order {
    Asc,
    #[default]
    Desc,
}

impl Order {
    pub const VARIANTS: [Order; 2] = [Order::Asc, Order::Desc];

    pub fn as_str(&self) -> &'static str {
        match self {
            Order::Asc => "asc",
            Order::Desc => "desc",
        }
    }
}

impl FromStr for Order {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Order::Asc),
            "desc" => Ok(Order::Desc),
            _ => Err(UnknownOption::new("order", s)),
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(Status, SortKey, Order);

/// Filter and sort descriptor for one listing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListOptions {
    pub status: Status,
    pub sort: SortKey,
    pub order: Order,
}

impl ListOptions {
    pub fn new(status: Status, sort: SortKey, order: Order) -> Self {
        Self {
            status,
            sort,
            order,
        }
    }
}
