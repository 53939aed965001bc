//! Search result data shapes.
//!
//! `ResultItem` and `Owner` are the immutable domain types handed to the UI.
//! The `*Dto` types mirror the remote JSON payload and are converted into
//! domain types once decoding succeeds.

mod query;
mod wire;

pub use query::Query;
pub use wire::{OwnerDto, RepositoryDto, RepositoryId, SearchResponse};

/// A single repository returned by a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultItem {
    /// Stable identifier, unique within a result list.
    pub id: String,
    /// Display name (`owner/repo`).
    pub name: String,
    pub description: Option<String>,
    pub owner: Owner,
    /// Address of the detail view for this item.
    pub url: String,
}

/// Owner metadata attached to a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    pub avatar_url: String,
}

impl ResultItem {
    /// Shorthand for the owner's avatar.
    pub fn owner_avatar_url(&self) -> &str {
        &self.owner.avatar_url
    }
}

impl From<RepositoryDto> for ResultItem {
    fn from(dto: RepositoryDto) -> Self {
        Self {
            id: dto.id.into_string(),
            name: dto.full_name,
            description: dto.description,
            owner: Owner {
                avatar_url: dto.owner.avatar_url,
            },
            url: dto.html_url,
        }
    }
}
