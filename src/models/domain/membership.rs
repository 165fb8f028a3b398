use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row per (company, user) pair. The owner never holds a member row;
/// ownership is checked against `Company::owner_id` directly.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct CompanyMember {
    pub id: String,
    pub company_id: String,
    pub user_id: String,
    pub is_administrator: bool,
}

impl CompanyMember {
    pub fn new(company_id: &str, user_id: &str) -> Self {
        CompanyMember {
            id: Uuid::new_v4().to_string(),
            company_id: company_id.to_string(),
            user_id: user_id.to_string(),
            is_administrator: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_member_is_not_admin() {
        let member = CompanyMember::new("c-1", "u-1");
        assert!(!member.is_administrator);
    }
}
