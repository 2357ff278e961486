use serde::{Deserialize, Serialize};

use crate::workflows::registration::is_canadian_province;

/// How a Summit registrant intends to pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Credit,
    Loyalty,
    /// Split between credit card and loyalty points.
    Combo,
}

impl PaymentMethod {
    /// Vocabulary expected by the CRM's summit payment property.
    pub const fn external_value(self) -> &'static str {
        match self {
            PaymentMethod::Credit => "credit_card",
            PaymentMethod::Loyalty => "level",
            PaymentMethod::Combo => "combo",
        }
    }

    pub const fn uses_loyalty(self) -> bool {
        matches!(self, PaymentMethod::Loyalty | PaymentMethod::Combo)
    }
}

/// A toggleable checkbox in the payment section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentOption {
    Credit,
    Loyalty,
}

/// Set of ticked payment options. Four reachable states: none, credit,
/// loyalty, and both (combo).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaymentSelection {
    credit: bool,
    loyalty: bool,
}

impl PaymentSelection {
    pub const NONE: PaymentSelection = PaymentSelection {
        credit: false,
        loyalty: false,
    };

    pub const fn from_method(method: Option<PaymentMethod>) -> Self {
        match method {
            None => Self::NONE,
            Some(PaymentMethod::Credit) => Self {
                credit: true,
                loyalty: false,
            },
            Some(PaymentMethod::Loyalty) => Self {
                credit: false,
                loyalty: true,
            },
            Some(PaymentMethod::Combo) => Self {
                credit: true,
                loyalty: true,
            },
        }
    }

    pub const fn method(self) -> Option<PaymentMethod> {
        match (self.credit, self.loyalty) {
            (true, true) => Some(PaymentMethod::Combo),
            (true, false) => Some(PaymentMethod::Credit),
            (false, true) => Some(PaymentMethod::Loyalty),
            (false, false) => None,
        }
    }

    pub const fn contains(self, option: PaymentOption) -> bool {
        match option {
            PaymentOption::Credit => self.credit,
            PaymentOption::Loyalty => self.loyalty,
        }
    }

    pub const fn toggled(self, option: PaymentOption) -> Self {
        match option {
            PaymentOption::Credit => Self {
                credit: !self.credit,
                ..self
            },
            PaymentOption::Loyalty => Self {
                loyalty: !self.loyalty,
                ..self
            },
        }
    }
}

/// Flip `option` on the current method and derive the resulting method.
pub fn toggle_payment(current: Option<PaymentMethod>, option: PaymentOption) -> Option<PaymentMethod> {
    PaymentSelection::from_method(current).toggled(option).method()
}

/// Presentation row for a payment option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentOptionView {
    pub id: PaymentOption,
    pub name: &'static str,
    pub description: &'static str,
    pub selected: bool,
}

/// Options shown to the registrant. Loyalty points appear only for alumni
/// and level members; Canadian salons see the L'Oréal program copy.
pub fn payment_options(
    loyalty_eligible: bool,
    state: &str,
    current: Option<PaymentMethod>,
) -> Vec<PaymentOptionView> {
    let selection = PaymentSelection::from_method(current);
    let mut options = vec![PaymentOptionView {
        id: PaymentOption::Credit,
        name: "Credit Card",
        description: "We'll send you a secure payment link",
        selected: selection.contains(PaymentOption::Credit),
    }];

    if loyalty_eligible {
        let canadian = is_canadian_province(state);
        options.push(PaymentOptionView {
            id: PaymentOption::Loyalty,
            name: if canadian {
                "L'Oréal Loyalty Points"
            } else {
                "Level Loyalty Points"
            },
            description: if canadian {
                "Use your accumulated L'Oréal loyalty points (Redken C5A, L'Oréal Excellence, Club Matrix)"
            } else {
                "Use your accumulated Level points"
            },
            selected: selection.contains(PaymentOption::Loyalty),
        });
    }

    options
}
