use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Item - One lost/found report as returned by the search endpoint
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub sub_category: Option<String>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
    pub image_url: Option<String>,
    pub created_at: Option<String>,

    // -- Extra fields the endpoint sends alongside the consumed ones --
    pub id: Option<String>,
    pub status: Option<String>,
    pub zipcode: Option<String>,
    pub location_description: Option<String>,
    pub reporter_name: Option<String>,
}

impl Item {
    /// Site-relative link to the item's detail page.
    pub fn detail_path(&self) -> String {
        format!("/item/{}", self.slug)
    }
}

// ---------------------------------------------------------------------------
// SearchResultPage - The page of results currently held by the client
// ---------------------------------------------------------------------------

/// Null `results` reads as empty; a null or zero `page` / `total_pages`
/// (the backend reports `total_pages: 0` for an empty search) reads as 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultPage {
    #[serde(rename = "results", default, deserialize_with = "null_as_empty")]
    pub items: Vec<Item>,
    #[serde(default = "first_page", deserialize_with = "page_number")]
    pub page: u32,
    #[serde(default = "first_page", deserialize_with = "page_number")]
    pub total_pages: u32,
}

fn first_page() -> u32 {
    1
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn page_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or(1).max(1))
}

impl Default for SearchResultPage {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            total_pages: 1,
        }
    }
}

impl SearchResultPage {
    /// Raise zero page numbers to 1.
    pub fn normalized(mut self) -> Self {
        self.page = self.page.max(1);
        self.total_pages = self.total_pages.max(1);
        self
    }
}
