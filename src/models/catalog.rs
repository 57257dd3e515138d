//! Catalog records for the MVVM architecture.
//!
//! Wire types mirror the remote API's JSON and stay crate-private; the
//! public records ([`ListItem`], [`ItemDetail`], [`Page`]) are produced at
//! ingestion, where derived fields (slug, image URL) are computed once and
//! stored rather than recomputed ad hoc.

use serde::{Deserialize, Serialize};

/// One row of the paginated catalog list.
///
/// Identity is the slug: two items with the same slug are the same item,
/// whatever their other fields say.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListItem {
    /// Display name as the catalog reports it.
    pub name: String,
    /// Stable identifier, parsed from the item's canonical resource URL.
    pub slug: String,
    /// Official-artwork image URL, derived from the slug at ingestion.
    pub image_url: String,
}

impl PartialEq for ListItem {
    fn eq(&self, other: &Self) -> bool {
        self.slug == other.slug
    }
}

impl Eq for ListItem {}

impl ListItem {
    pub(crate) fn from_resource(resource: NamedResource, sprite_base_url: &str) -> Self {
        let slug = slug_from_url(&resource.url, &resource.name);
        let image_url = artwork_url(sprite_base_url, &slug);
        Self {
            name: resource.name,
            slug,
            image_url,
        }
    }
}

/// Full detail record for a single catalog item.
///
/// Immutable once fetched; a re-fetch overwrites the cached copy whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDetail {
    pub id: u32,
    pub name: String,
    /// Base experience yield.
    pub base_experience: u32,
    /// Height in decimetres.
    pub height: u32,
    /// Weight in hectograms.
    pub weight: u32,
    /// Official-artwork image URL, flattened out of the sprite tree.
    pub image_url: String,
}

/// One page of list results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Items in server pagination order.
    pub items: Vec<ListItem>,
    /// Whether the server reports a further page.
    pub has_next: bool,
}

/// Build the official-artwork URL for a slug or numeric id.
pub fn artwork_url(sprite_base_url: &str, key: &str) -> String {
    format!("{sprite_base_url}/{key}.png")
}

/// Last non-empty path segment of a resource URL, falling back to `name`
/// when the URL carries no usable segment.
fn slug_from_url(url: &str, name: &str) -> String {
    url.rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or(name)
        .to_string()
}

// --- Wire types -----------------------------------------------------------

/// `GET {api}/pokemon?limit=N&offset=K` response body.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PageResponse {
    #[allow(dead_code)] // decoded for completeness, the total is unused
    pub(crate) count: u32,
    pub(crate) next: Option<String>,
    #[allow(dead_code)]
    pub(crate) previous: Option<String>,
    pub(crate) results: Vec<NamedResource>,
}

impl PageResponse {
    pub(crate) fn into_page(self, sprite_base_url: &str) -> Page {
        let has_next = self.next.is_some();
        let items = self
            .results
            .into_iter()
            .map(|resource| ListItem::from_resource(resource, sprite_base_url))
            .collect();
        Page { items, has_next }
    }
}

/// `{name, url}` pair as the list endpoint sends it.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct NamedResource {
    pub(crate) name: String,
    pub(crate) url: String,
}

/// `GET {api}/pokemon/{id}` response body, sprite tree included.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DetailResponse {
    pub(crate) id: u32,
    pub(crate) name: String,
    pub(crate) base_experience: u32,
    pub(crate) height: u32,
    pub(crate) weight: u32,
    pub(crate) sprites: Option<Sprites>,
}

impl DetailResponse {
    pub(crate) fn into_detail(self, sprite_base_url: &str) -> ItemDetail {
        let image_url = self
            .sprites
            .and_then(|sprites| sprites.other)
            .and_then(|other| other.official_artwork)
            .and_then(|artwork| artwork.front_default)
            .unwrap_or_else(|| artwork_url(sprite_base_url, &self.id.to_string()));
        ItemDetail {
            id: self.id,
            name: self.name,
            base_experience: self.base_experience,
            height: self.height,
            weight: self.weight,
            image_url,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Sprites {
    pub(crate) other: Option<OtherSprites>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OtherSprites {
    #[serde(rename = "official-artwork")]
    pub(crate) official_artwork: Option<OfficialArtwork>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OfficialArtwork {
    pub(crate) front_default: Option<String>,
}
