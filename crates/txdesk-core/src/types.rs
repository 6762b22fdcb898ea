//! Basic types for the transaction model

use serde::{Deserialize, Serialize};

/// Approval state of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Awaiting approval
    Pending,
    /// Approved for payment
    Approved,
}

impl Default for TransactionStatus {
    fn default() -> Self {
        TransactionStatus::Pending
    }
}

impl std::str::FromStr for TransactionStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(TransactionStatus::Pending),
            "approved" => Ok(TransactionStatus::Approved),
            _ => Err(format!("Invalid transaction status: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::Pending => write!(f, "pending"),
            TransactionStatus::Approved => write!(f, "approved"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!("Approved".parse::<TransactionStatus>(), Ok(TransactionStatus::Approved));
        assert_eq!("PENDING".parse::<TransactionStatus>(), Ok(TransactionStatus::Pending));
        assert!("denied".parse::<TransactionStatus>().is_err());
        assert!("".parse::<TransactionStatus>().is_err());
    }

    #[test]
    fn test_status_display_matches_serde() {
        let json = serde_json::to_string(&TransactionStatus::Approved).unwrap();
        assert_eq!(json, format!("\"{}\"", TransactionStatus::Approved));
    }
}
