use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PurchaseType {
    #[serde(rename = "one-time")]
    OneTime,
    #[serde(rename = "subscription")]
    Subscription,
}

impl PurchaseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseType::OneTime => "one-time",
            PurchaseType::Subscription => "subscription",
        }
    }
}

impl std::str::FromStr for PurchaseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "one-time" => Ok(PurchaseType::OneTime),
            "subscription" => Ok(PurchaseType::Subscription),
            _ => Err(format!("Unknown purchase type: {}", s)),
        }
    }
}

impl std::fmt::Display for PurchaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status only ever moves active -> expired (detected during verification).
/// Revoked exists in the schema for external administrative action; no
/// endpoint sets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LicenseStatus {
    Active,
    Expired,
    Revoked,
}

impl LicenseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LicenseStatus::Active => "active",
            LicenseStatus::Expired => "expired",
            LicenseStatus::Revoked => "revoked",
        }
    }
}

impl std::str::FromStr for LicenseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(LicenseStatus::Active),
            "expired" => Ok(LicenseStatus::Expired),
            "revoked" => Ok(LicenseStatus::Revoked),
            _ => Err(format!("Unknown license status: {}", s)),
        }
    }
}

impl std::fmt::Display for LicenseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct License {
    pub license_key: String,
    pub user_email: String,
    pub product: String,
    pub purchase_type: PurchaseType,
    pub status: LicenseStatus,
    /// Machine bound on first successful verification (None = unbound)
    pub machine_id: Option<String>,
    pub created_at: i64,
    /// Only consulted when purchase_type is subscription
    pub expires_at: Option<i64>,
}

/// Insert input, validated by the handler before construction.
#[derive(Debug, Clone)]
pub struct NewLicense {
    pub license_key: String,
    pub user_email: String,
    pub product: String,
    pub purchase_type: PurchaseType,
    pub expires_at: Option<i64>,
}
