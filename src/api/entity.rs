//! Entity types supported by the tuition backend and their resource mapping

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when a type tag does not name a known entity
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown entity type '{0}'")]
pub struct UnknownEntityType(pub String);

/// Record kinds that can be duplicated through the backend's creation endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    Student,
    Teacher,
    Customer,
    TransportCustomer,
    User,
    Fee,
    Insurer,
    Policy,
    CustomerPolicy,
    PolicyPayment,
    Claim,
}

/// Per-entity resource path and field rules
struct EntityRow {
    tag: &'static str,
    endpoint: &'static str,
    display_field: &'static str,
    generated_key: Option<&'static str>,
}

const ALL: [EntityType; 11] = [
    EntityType::Student,
    EntityType::Teacher,
    EntityType::Customer,
    EntityType::TransportCustomer,
    EntityType::User,
    EntityType::Fee,
    EntityType::Insurer,
    EntityType::Policy,
    EntityType::CustomerPolicy,
    EntityType::PolicyPayment,
    EntityType::Claim,
];

impl EntityType {
    fn row(&self) -> EntityRow {
        let (tag, endpoint, display_field, generated_key) = match self {
            Self::Student => ("Student", "/api/students", "firstName", Some("studentCode")),
            Self::Teacher => ("Teacher", "/api/teachers", "firstName", Some("teacherCode")),
            Self::Customer => ("Customer", "/api/customers", "name", None),
            Self::TransportCustomer => ("TransportCustomer", "/api/transport-customers", "name", None),
            Self::User => ("User", "/api/users", "name", None),
            Self::Fee => ("Fee", "/api/fees", "reference", Some("transactionId")),
            Self::Insurer => ("Insurer", "/api/insurers", "name", None),
            Self::Policy => ("Policy", "/api/policies", "name", Some("policyNumber")),
            Self::CustomerPolicy => ("CustomerPolicy", "/api/customer-policies", "reference", None),
            Self::PolicyPayment => ("PolicyPayment", "/api/policy-payments", "reference", Some("transactionId")),
            Self::Claim => ("Claim", "/api/claims", "title", Some("claimNumber")),
        };

        EntityRow {
            tag,
            endpoint,
            display_field,
            generated_key,
        }
    }

    /// All entity types
    pub fn all() -> impl Iterator<Item = EntityType> {
        ALL.into_iter()
    }

    /// Canonical type tag (e.g. "CustomerPolicy")
    pub fn tag(&self) -> &'static str {
        self.row().tag
    }

    /// Resource path of the creation endpoint (e.g. "/api/customer-policies")
    pub fn endpoint(&self) -> &'static str {
        self.row().endpoint
    }

    /// Human-readable field that receives the copy marker
    pub fn display_field(&self) -> &'static str {
        self.row().display_field
    }

    /// Business key the backend generates on create, if this entity has one
    pub fn generated_key(&self) -> Option<&'static str> {
        self.row().generated_key
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for EntityType {
    type Err = UnknownEntityType;

    /// Accepts the canonical tag in any case, with or without separating
    /// spaces, hyphens or underscores ("Transport Customer", "customer-policy").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();

        Self::all()
            .find(|entity| entity.tag().to_lowercase() == normalized)
            .ok_or_else(|| UnknownEntityType(s.to_string()))
    }
}
