use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Company {
    pub id: String,
    pub name: String,
    pub description: String,
    pub owner_id: String,
    pub visibility: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Company {
    pub fn new(name: &str, description: &str, owner_id: &str) -> Self {
        Company {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: description.to_string(),
            owner_id: owner_id.to_string(),
            visibility: true,
            created_at: Some(Utc::now()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_creation() {
        let company = Company::new("Acme", "Widgets", "owner-1");
        assert_eq!(company.name, "Acme");
        assert_eq!(company.owner_id, "owner-1");
        assert!(company.visibility);
    }
}
