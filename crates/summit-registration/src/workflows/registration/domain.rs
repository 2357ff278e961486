use serde::{Deserialize, Serialize};

/// Salon details collected at the top of every registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SalonInfo {
    pub salon_name: String,
    pub city: String,
    pub state: String,
}

/// The registrant filling out the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrimaryAttendee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl PrimaryAttendee {
    /// Phone number with surrounding whitespace removed, `None` when blank.
    pub fn phone_number(&self) -> Option<&str> {
        self.phone
            .as_deref()
            .map(str::trim)
            .filter(|phone| !phone.is_empty())
    }
}

/// Additional Summit attendee; only a name is collected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AttendeeName {
    pub full_name: String,
}

impl AttendeeName {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
        }
    }
}

/// Additional Camp Essence attendee with contact details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AttendeeContact {
    pub full_name: String,
    pub email: String,
    pub phone: String,
}
