use serde::{Deserialize, Serialize};

use crate::workflows::registration::format_currency;

/// Fee charged for each attendee beyond those covered by the base price.
pub const ADDITIONAL_ATTENDEE_FEE: u32 = 600;

/// Largest party a single Summit registration may bring.
pub const MAX_SUMMIT_ATTENDEES: u8 = 10;

/// Registration category derived from the classification answers and the
/// attendee count. Never chosen by the registrant directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegistrationType {
    Alumni,
    LevelMember,
    LevelMemberSolo,
    NonLevelMember,
}

impl RegistrationType {
    pub const fn label(self) -> &'static str {
        match self {
            RegistrationType::Alumni => "Alumni",
            RegistrationType::LevelMember => "LEVEL Member",
            RegistrationType::LevelMemberSolo => "LEVEL Member (Solo)",
            RegistrationType::NonLevelMember => "Non-LEVEL Member",
        }
    }

    pub const fn id(self) -> &'static str {
        match self {
            RegistrationType::Alumni => "alumni",
            RegistrationType::LevelMember => "level-member",
            RegistrationType::LevelMemberSolo => "level-member-solo",
            RegistrationType::NonLevelMember => "non-level-member",
        }
    }
}

/// Classification reached from the yes/no answers, before an attendee count
/// narrows it down to a [`RegistrationType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegistrantProfile {
    Alumni,
    LevelMember,
    NonLevelMember,
}

impl RegistrantProfile {
    /// Alumni first, then loyalty membership; `None` until both questions
    /// that matter have answers.
    pub fn resolve(is_alumni: Option<bool>, is_level_member: Option<bool>) -> Option<Self> {
        match (is_alumni, is_level_member) {
            (Some(true), _) => Some(RegistrantProfile::Alumni),
            (Some(false), Some(true)) => Some(RegistrantProfile::LevelMember),
            (Some(false), Some(false)) => Some(RegistrantProfile::NonLevelMember),
            _ => None,
        }
    }

    pub fn registration_type(self, total_attendees: u8) -> RegistrationType {
        match self {
            RegistrantProfile::Alumni => RegistrationType::Alumni,
            RegistrantProfile::LevelMember if total_attendees == 1 => {
                RegistrationType::LevelMemberSolo
            }
            RegistrantProfile::LevelMember => RegistrationType::LevelMember,
            RegistrantProfile::NonLevelMember => RegistrationType::NonLevelMember,
        }
    }

    pub const fn loyalty_eligible(self) -> bool {
        matches!(
            self,
            RegistrantProfile::Alumni | RegistrantProfile::LevelMember
        )
    }
}

/// Resolve the registration type, or `None` while answers are incomplete.
pub fn resolve_registration_type(
    is_alumni: Option<bool>,
    is_level_member: Option<bool>,
    total_attendees: Option<u8>,
) -> Option<RegistrationType> {
    let profile = RegistrantProfile::resolve(is_alumni, is_level_member)?;
    let total_attendees = total_attendees?;
    Some(profile.registration_type(total_attendees))
}

/// Selects which level-member price table is in force.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingVariant {
    /// Level members pay 1950 for two, or 1450 for a solo registration.
    Tiered,
    /// Level members pay 1450 for the first attendee plus the fee per extra.
    Flat,
}

impl PricingVariant {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "tiered" => Some(Self::Tiered),
            "flat" => Some(Self::Flat),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            PricingVariant::Tiered => "tiered",
            PricingVariant::Flat => "flat",
        }
    }
}

/// Base price, coverage, and permitted party sizes for one registration type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTier {
    pub registration_type: RegistrationType,
    pub base_price: u32,
    pub included_attendees: u8,
    pub min_attendees: u8,
    pub max_attendees: u8,
}

impl PriceTier {
    pub fn admits(&self, total_attendees: u8) -> bool {
        (self.min_attendees..=self.max_attendees).contains(&total_attendees)
    }
}

/// Derived price for a resolved registration type and attendee count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub registration_type: RegistrationType,
    pub registration_type_name: String,
    pub base: u32,
    pub additional: u32,
    pub total: u32,
    pub included_attendees: u8,
    pub additional_attendee_count: u8,
}

/// One entry in the attendee-count selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendeeOption {
    pub count: u8,
    pub price: u32,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingTable {
    variant: PricingVariant,
    additional_attendee_fee: u32,
    alumni: PriceTier,
    level_member_solo: PriceTier,
    level_member: PriceTier,
    non_level_member: PriceTier,
}

impl PricingTable {
    pub fn for_variant(variant: PricingVariant) -> Self {
        let level_member = match variant {
            PricingVariant::Tiered => PriceTier {
                registration_type: RegistrationType::LevelMember,
                base_price: 1950,
                included_attendees: 2,
                min_attendees: 2,
                max_attendees: MAX_SUMMIT_ATTENDEES,
            },
            PricingVariant::Flat => PriceTier {
                registration_type: RegistrationType::LevelMember,
                base_price: 1450,
                included_attendees: 1,
                min_attendees: 2,
                max_attendees: MAX_SUMMIT_ATTENDEES,
            },
        };

        Self {
            variant,
            additional_attendee_fee: ADDITIONAL_ATTENDEE_FEE,
            alumni: PriceTier {
                registration_type: RegistrationType::Alumni,
                base_price: 1250,
                included_attendees: 2,
                min_attendees: 2,
                max_attendees: MAX_SUMMIT_ATTENDEES,
            },
            level_member_solo: PriceTier {
                registration_type: RegistrationType::LevelMemberSolo,
                base_price: 1450,
                included_attendees: 1,
                min_attendees: 1,
                max_attendees: 1,
            },
            level_member,
            non_level_member: PriceTier {
                registration_type: RegistrationType::NonLevelMember,
                base_price: 2750,
                included_attendees: 2,
                min_attendees: 2,
                max_attendees: MAX_SUMMIT_ATTENDEES,
            },
        }
    }

    pub fn tiered() -> Self {
        Self::for_variant(PricingVariant::Tiered)
    }

    pub fn flat() -> Self {
        Self::for_variant(PricingVariant::Flat)
    }

    pub fn variant(&self) -> PricingVariant {
        self.variant
    }

    pub fn additional_attendee_fee(&self) -> u32 {
        self.additional_attendee_fee
    }

    pub fn tier(&self, registration_type: RegistrationType) -> &PriceTier {
        match registration_type {
            RegistrationType::Alumni => &self.alumni,
            RegistrationType::LevelMember => &self.level_member,
            RegistrationType::LevelMemberSolo => &self.level_member_solo,
            RegistrationType::NonLevelMember => &self.non_level_member,
        }
    }

    /// Total = base + fee for every attendee past the included count.
    pub fn quote(&self, registration_type: RegistrationType, total_attendees: u8) -> PriceQuote {
        let tier = self.tier(registration_type);
        let additional_attendee_count = total_attendees.saturating_sub(tier.included_attendees);
        let additional = u32::from(additional_attendee_count) * self.additional_attendee_fee;

        PriceQuote {
            registration_type,
            registration_type_name: registration_type.label().to_string(),
            base: tier.base_price,
            additional,
            total: tier.base_price + additional,
            included_attendees: tier.included_attendees,
            additional_attendee_count,
        }
    }

    /// Whether the selector offers `total_attendees` to this profile.
    pub fn admits(&self, profile: RegistrantProfile, total_attendees: u8) -> bool {
        self.tier(profile.registration_type(total_attendees))
            .admits(total_attendees)
    }

    /// Counts (and prices) the attendee selector offers to `profile`.
    pub fn attendee_options(&self, profile: RegistrantProfile) -> Vec<AttendeeOption> {
        let tiers: Vec<&PriceTier> = match profile {
            RegistrantProfile::Alumni => vec![&self.alumni],
            RegistrantProfile::LevelMember => vec![&self.level_member_solo, &self.level_member],
            RegistrantProfile::NonLevelMember => vec![&self.non_level_member],
        };

        tiers
            .into_iter()
            .flat_map(|tier| {
                (tier.min_attendees..=tier.max_attendees).map(move |count| (tier, count))
            })
            .map(|(tier, count)| {
                let price = self.quote(tier.registration_type, count).total;
                let label = if count == 1 {
                    format!("Just me — {}", format_currency(price))
                } else {
                    format!("{count} people — {}", format_currency(price))
                };
                AttendeeOption {
                    count,
                    price,
                    label,
                }
            })
            .collect()
    }

    /// Human-readable range of permitted counts, used in validation copy.
    pub fn admitted_range(&self, profile: RegistrantProfile) -> (u8, u8) {
        match profile {
            RegistrantProfile::Alumni => (self.alumni.min_attendees, self.alumni.max_attendees),
            RegistrantProfile::LevelMember => (
                self.level_member_solo.min_attendees,
                self.level_member.max_attendees,
            ),
            RegistrantProfile::NonLevelMember => (
                self.non_level_member.min_attendees,
                self.non_level_member.max_attendees,
            ),
        }
    }
}

impl Default for PricingTable {
    fn default() -> Self {
        Self::tiered()
    }
}
