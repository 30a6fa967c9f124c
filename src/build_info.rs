//! Build-time metadata exposed at runtime.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

pub const BUILD_ID: &str = env!("BUILD_IDENTITY_ID");
pub const BUILD_BRANCH: &str = env!("BUILD_IDENTITY_BRANCH");
pub const BUILD_TAG: &str = env!("BUILD_IDENTITY_TAG");
pub const BUILD_DATE: &str = env!("BUILD_IDENTITY_DATE");
pub const BUILD_AUTHOR: &str = env!("BUILD_IDENTITY_AUTHOR");
pub const BUILD_COMMITTER: &str = env!("BUILD_IDENTITY_COMMITTER");
pub const BUILD_BUILDER: &str = env!("BUILD_IDENTITY_BUILDER");
pub const BUILD_STATUS: &str = env!("BUILD_IDENTITY_STATUS");

/// Identity of the running build.
pub static BUILD: VersionIdentity = VersionIdentity {
    identifier: BUILD_ID,
    branch: BUILD_BRANCH,
    tag: BUILD_TAG,
    build_date: BUILD_DATE,
    author: BUILD_AUTHOR,
    builder: BUILD_BUILDER,
    committer: BUILD_COMMITTER,
    status: BUILD_STATUS,
};

/// Stamp of one build. Only `identifier` takes part in comparisons,
/// every other field is informational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VersionIdentity {
    pub identifier: &'static str,
    pub branch: &'static str,
    #[serde(serialize_with = "serialize_tag")]
    pub tag: &'static str,
    pub build_date: &'static str,
    pub author: &'static str,
    pub builder: &'static str,
    pub committer: &'static str,
    #[serde(rename = "repository_status")]
    pub status: &'static str,
}

impl VersionIdentity {
    /// Identity carrying only an identifier, descriptive fields left empty.
    pub const fn new(identifier: &'static str) -> Self {
        Self {
            identifier,
            branch: "",
            tag: "",
            build_date: "",
            author: "",
            builder: "",
            committer: "",
            status: "",
        }
    }

    pub fn version(&self) -> &'static str {
        self.identifier
    }

    /// `None` when the build was not made from a tagged commit.
    pub fn tag(&self) -> Option<&'static str> {
        match self.tag {
            "" | "None" => None,
            tag => Some(tag),
        }
    }

    /// Build date parsed back into a timestamp, if it was stamped in the default format.
    pub fn built_at(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_str(self.build_date, "%Y-%m-%d %H:%M:%S %z").ok()
    }

    /// Multi-line description. The tag is printed exactly as stamped, so an
    /// empty stamp renders as `Tag: ` while [`tag`](Self::tag) reports `None`.
    pub fn verbose_message(&self) -> String {
        format!(
            "Branch: {}\nTag: {}\nId: {}\n\nBuilder: {}\nBuild date: {}\nRepository status: {}",
            self.branch,
            self.tag,
            self.identifier,
            self.builder,
            self.build_date,
            self.status
        )
    }

    /// Human-readable summary combining Cargo version and build metadata.
    pub fn summary(&self) -> String {
        let branch = if self.branch.is_empty() {
            "unknown"
        } else {
            self.branch
        };
        format!(
            "{} (id {}, branch {}, built at {})",
            env!("CARGO_PKG_VERSION"),
            self.identifier,
            branch,
            self.build_date
        )
    }
}

fn serialize_tag<S>(tag: &&'static str, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match *tag {
        "" | "None" => serializer.serialize_none(),
        tag => serializer.serialize_some(tag),
    }
}

/// Human-readable summary of the running build.
pub fn summary() -> String {
    BUILD.summary()
}
