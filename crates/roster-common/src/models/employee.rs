use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Employee record as it crosses the wire. `owner_id` always comes from the
/// authenticated principal, never from client input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub neighborhood: Option<String>,
    pub zip_code: Option<String>,
    pub phone: Option<String>,
    pub role: String,
    pub salary: Decimal,
    pub contract_date: NaiveDate,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Employee {
        Employee {
            id: Uuid::new_v4(),
            name: "Bob".to_string(),
            address: "Rua A, 123".to_string(),
            neighborhood: Some("Centro".to_string()),
            zip_code: Some("01001-000".to_string()),
            phone: None,
            role: "QA".to_string(),
            salary: Decimal::new(500000, 2),
            contract_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            owner_id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_serializes_camel_case_field_names() {
        let value = serde_json::to_value(sample()).unwrap();
        assert!(value.get("zipCode").is_some());
        assert!(value.get("contractDate").is_some());
        assert!(value.get("ownerId").is_some());
        assert!(value.get("zip_code").is_none());
        assert!(value.get("owner_id").is_none());
    }

    #[test]
    fn test_salary_keeps_decimal_precision() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["salary"], "5000.00");
    }

    #[test]
    fn test_contract_date_is_iso_date() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["contractDate"], "2025-01-15");
    }
}
