//! Resources exposed by the API.

use std::fmt;

/// A named category of entity, addressed as `<base>/<path>/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Games,
    Companies,
    People,
    Reviews,
    Platforms,
    Franchises,
    Characters,
    /// The authenticated user's lists. Needs an access token.
    PrivateLists,
}

impl Resource {
    pub fn path(self) -> &'static str {
        match self {
            Resource::Games => "games",
            Resource::Companies => "companies",
            Resource::People => "people",
            Resource::Reviews => "reviews",
            Resource::Platforms => "platforms",
            Resource::Franchises => "franchises",
            Resource::Characters => "characters",
            Resource::PrivateLists => "private/lists",
        }
    }

    /// Whether requests must carry the bearer access token.
    pub fn requires_token(self) -> bool {
        matches!(self, Resource::PrivateLists)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
