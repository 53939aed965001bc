use serde::Deserialize;

/// Body of a successful `GET /search/repositories` response.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total_count: u64,
    pub items: Vec<RepositoryDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryDto {
    pub id: RepositoryId,
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub owner: OwnerDto,
    pub html_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwnerDto {
    pub avatar_url: String,
}

/// Repository id as sent by the server: a JSON string or an integer.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RepositoryId {
    Text(String),
    Number(u64),
}

impl RepositoryId {
    pub fn into_string(self) -> String {
        match self {
            RepositoryId::Text(text) => text,
            RepositoryId::Number(number) => number.to_string(),
        }
    }
}
