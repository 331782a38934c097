use serde::{Deserialize, Serialize};

/// Spending category an expense is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transport,
    Entertainment,
    /// Electricity, water, phone, internet
    Utilities,
    Health,
    Education,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Food,
        Category::Transport,
        Category::Entertainment,
        Category::Utilities,
        Category::Health,
        Category::Education,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Utilities => "Utilities",
            Category::Health => "Health",
            Category::Education => "Education",
            Category::Other => "Other",
        }
    }

    /// Exact, case-sensitive lookup. The ledger stores the canonical spelling.
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }

    pub fn spanish_label(&self) -> &'static str {
        match self {
            Category::Food => "Comida",
            Category::Transport => "Transporte",
            Category::Entertainment => "Entretenimiento",
            Category::Utilities => "Servicios",
            Category::Health => "Salud",
            Category::Education => "Educación",
            Category::Other => "Otros",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How an expense was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    /// Debit or credit card
    Card,
    /// Bank transfer
    Transfer,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::Cash,
        PaymentMethod::Card,
        PaymentMethod::Transfer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Transfer => "transfer",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == s)
    }

    pub fn spanish_label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Efectivo",
            PaymentMethod::Card => "Tarjeta",
            PaymentMethod::Transfer => "Transferencia",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Entry of the bilingual reference listings served to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    pub id: String,
    pub english: String,
    pub spanish: String,
}

pub fn category_listing() -> Vec<ReferenceEntry> {
    Category::ALL
        .iter()
        .map(|c| ReferenceEntry {
            id: c.as_str().to_string(),
            english: c.as_str().to_string(),
            spanish: c.spanish_label().to_string(),
        })
        .collect()
}

pub fn payment_method_listing() -> Vec<ReferenceEntry> {
    PaymentMethod::ALL
        .iter()
        .map(|m| ReferenceEntry {
            id: m.as_str().to_string(),
            english: m.as_str().to_string(),
            spanish: m.spanish_label().to_string(),
        })
        .collect()
}

/// Comma-separated list of valid values, for error messages.
pub fn valid_values<T: std::fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
