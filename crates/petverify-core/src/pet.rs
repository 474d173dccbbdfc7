// crates/petverify-core/src/pet.rs
// ============================================================================
// Module: Pet Wire Types
// Description: Serde types for the petstore `pet` resource.
// Purpose: Build request payloads and decode creation responses.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Wire types mirror the petstore resource shape: a pet with a name and
//! status plus optional category, photo URLs, and tags. Optional fields are
//! skipped during serialization so minimal payloads stay minimal, which the
//! contract suite relies on when checking that both minimal and full
//! creation payloads validate.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Pet Status
// ============================================================================

/// Valid pet availability states accepted by `findByStatus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetStatus {
    /// Pet is available for purchase.
    Available,
    /// Pet purchase is pending.
    Pending,
    /// Pet has been sold.
    Sold,
}

impl PetStatus {
    /// All valid status values, in documented order.
    pub const ALL: [Self; 3] = [Self::Available, Self::Pending, Self::Sold];

    /// Returns the wire value of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Pending => "pending",
            Self::Sold => "sold",
        }
    }
}

// ============================================================================
// SECTION: Related Entities
// ============================================================================

/// Pet category, an optional related entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category identifier.
    pub id: i64,
    /// Category name.
    pub name: String,
}

/// Pet tag, an optional related entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag identifier.
    pub id: i64,
    /// Tag name.
    pub name: String,
}

// ============================================================================
// SECTION: Pet
// ============================================================================

/// The petstore `pet` resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    /// Service-assigned (or client-proposed) identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Pet name.
    pub name: String,
    /// Optional category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Optional photo URLs.
    #[serde(rename = "photoUrls", skip_serializing_if = "Option::is_none")]
    pub photo_urls: Option<Vec<String>>,
    /// Optional tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    /// Availability status.
    pub status: PetStatus,
}

impl Pet {
    /// Builds a minimal pet payload: name and status only.
    #[must_use]
    pub fn minimal(name: &str, status: PetStatus) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            category: None,
            photo_urls: None,
            tags: None,
            status,
        }
    }

    /// Builds a fully populated pet payload.
    #[must_use]
    pub fn full(name: &str, status: PetStatus, category: Category, tags: Vec<Tag>) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            category: Some(category),
            photo_urls: Some(vec!["https://example.org/photo.png".to_string()]),
            tags: Some(tags),
            status,
        }
    }

    /// Serializes the pet into a JSON payload value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
