//! Family member / emergency contact model.

use serde::{Deserialize, Serialize};

/// Stable identifier for one family member.
pub type FamilyMemberId = String;

/// A person notifiable in an emergency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyMember {
    pub id: FamilyMemberId,
    pub name: String,
    /// Free-form label such as `Daughter`.
    pub relationship: String,
    pub phone: String,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub is_primary: bool,
}

impl FamilyMember {
    pub fn new(
        id: impl Into<FamilyMemberId>,
        name: impl Into<String>,
        relationship: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            relationship: relationship.into(),
            phone: phone.into(),
            email: None,
            avatar: None,
            is_primary: false,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    pub fn primary(mut self) -> Self {
        self.is_primary = true;
        self
    }
}
