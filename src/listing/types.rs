//! Listing types and response-shape decoding

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue, OptionStringExt};
use serde::{Deserialize, Serialize};

/// `kind` tag carried by listing envelopes
const LISTING_KIND: &str = "Listing";

// ============================================================================
// Items
// ============================================================================

/// An ordinary listing child, e.g. a `t3` submission or `t1` comment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thing {
    /// Type prefix (`t1`, `t3`, `t5`, ...)
    pub kind: String,
    /// Raw object payload
    #[serde(default)]
    pub data: JsonValue,
}

impl Thing {
    /// The `kind_id` fullname, taken from `data.name` when present
    pub fn fullname(&self) -> Option<&str> {
        self.data.get("name").and_then(JsonValue::as_str)
    }
}

/// One row of a flair listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlairEntry {
    /// Username the flair belongs to
    pub user: String,
    /// Flair text
    #[serde(default)]
    pub flair_text: Option<String>,
    /// Flair CSS class
    #[serde(default)]
    pub flair_css_class: Option<String>,
}

/// An item yielded by a listing generator
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ListingItem {
    /// Child of a bare or duplicates listing
    Thing(Thing),
    /// Entry of a flair listing
    Flair(FlairEntry),
}

impl ListingItem {
    /// Borrow as a thing, if it is one
    pub fn as_thing(&self) -> Option<&Thing> {
        match self {
            Self::Thing(thing) => Some(thing),
            Self::Flair(_) => None,
        }
    }

    /// Borrow as a flair entry, if it is one
    pub fn as_flair(&self) -> Option<&FlairEntry> {
        match self {
            Self::Flair(entry) => Some(entry),
            Self::Thing(_) => None,
        }
    }
}

// ============================================================================
// Listings
// ============================================================================

/// A `{"kind": "Listing", "data": {...}}` envelope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// Ordered children
    #[serde(default)]
    pub children: Vec<Thing>,
    /// Cursor for the following page
    #[serde(default)]
    pub after: Option<String>,
    /// Cursor for the preceding page
    #[serde(default)]
    pub before: Option<String>,
    /// Number of children the server reports
    #[serde(default)]
    pub dist: Option<u64>,
}

impl Listing {
    /// Check whether a JSON object is a listing envelope
    pub fn is_listing(object: &JsonObject) -> bool {
        object.get("kind").and_then(JsonValue::as_str) == Some(LISTING_KIND)
    }

    /// Decode a listing envelope
    pub fn from_value(value: JsonValue) -> Result<Self> {
        let mut object = match value {
            JsonValue::Object(object) => object,
            other => {
                return Err(Error::protocol(format!(
                    "expected a listing object, got {}",
                    json_type_name(&other)
                )))
            }
        };

        if !Self::is_listing(&object) {
            return Err(Error::protocol("object is not a Listing"));
        }

        let data = object.remove("data").unwrap_or(JsonValue::Null);
        if data.is_null() {
            return Ok(Self::default());
        }

        serde_json::from_value(data)
            .map_err(|e| Error::protocol(format!("malformed listing data: {e}")))
    }
}

/// A keyed flair listing: `{"users": [...], "next": ..., "prev": ...}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlairListing {
    /// Ordered flair entries
    #[serde(default)]
    pub users: Vec<FlairEntry>,
    /// Cursor for the following page
    #[serde(default)]
    pub next: Option<String>,
    /// Cursor for the preceding page
    #[serde(default)]
    pub prev: Option<String>,
}

impl FlairListing {
    /// Decode a flair listing object
    pub fn from_object(object: JsonObject) -> Result<Self> {
        serde_json::from_value(JsonValue::Object(object))
            .map_err(|e| Error::protocol(format!("malformed flair listing: {e}")))
    }
}

// ============================================================================
// Responses
// ============================================================================

/// The response shapes a listing endpoint may return
#[derive(Debug, Clone, PartialEq)]
pub enum ListingResponse {
    /// A plain listing envelope
    Bare(Listing),
    /// `[primary, listing]` as returned by the duplicates endpoint
    Duplicates {
        /// The submission the duplicates belong to; never yielded
        primary: JsonValue,
        /// The duplicates listing
        listing: Listing,
    },
    /// A keyed flair listing
    Flair(FlairListing),
}

impl ListingResponse {
    /// Decode a raw JSON response
    ///
    /// Two-element arrays are duplicates responses, listing envelopes are
    /// bare listings, and any other object is read as a flair listing.
    /// Everything else is a protocol violation.
    pub fn from_value(value: JsonValue) -> Result<Self> {
        match value {
            JsonValue::Array(elements) => {
                let [primary, listing]: [JsonValue; 2] =
                    elements.try_into().map_err(|elements: Vec<JsonValue>| {
                        Error::protocol(format!(
                            "expected a two-element duplicates response, got {} elements",
                            elements.len()
                        ))
                    })?;
                Ok(Self::Duplicates {
                    primary,
                    listing: Listing::from_value(listing)?,
                })
            }
            JsonValue::Object(object) => {
                if Listing::is_listing(&object) {
                    Listing::from_value(JsonValue::Object(object)).map(Self::Bare)
                } else {
                    FlairListing::from_object(object).map(Self::Flair)
                }
            }
            other => Err(Error::protocol(format!(
                "expected a listing or duplicates response, got {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Short name of the response shape, for logging
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Bare(_) => "listing",
            Self::Duplicates { .. } => "duplicates",
            Self::Flair(_) => "flair",
        }
    }

    /// Normalize into a page of items and a cursor
    pub fn into_page(self) -> Page {
        match self {
            Self::Bare(listing) | Self::Duplicates { listing, .. } => Page::new(
                listing.children.into_iter().map(ListingItem::Thing).collect(),
                listing.after,
            ),
            Self::Flair(flair) => Page::new(
                flair.users.into_iter().map(ListingItem::Flair).collect(),
                flair.next,
            ),
        }
    }
}

impl From<Listing> for ListingResponse {
    fn from(listing: Listing) -> Self {
        Self::Bare(listing)
    }
}

impl From<FlairListing> for ListingResponse {
    fn from(flair: FlairListing) -> Self {
        Self::Flair(flair)
    }
}

// ============================================================================
// Page
// ============================================================================

/// One fetched batch of items plus the cursor to the next batch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    items: Vec<ListingItem>,
    after: Option<String>,
}

impl Page {
    /// Create a page; an empty cursor is stored as no cursor
    pub fn new(items: Vec<ListingItem>, after: Option<String>) -> Self {
        Self {
            items,
            after: after.none_if_empty(),
        }
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the page holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Cursor for the following page
    pub fn after(&self) -> Option<&str> {
        self.after.as_deref()
    }

    /// Consume the page, keeping its items
    pub fn into_items(self) -> Vec<ListingItem> {
        self.items
    }
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
