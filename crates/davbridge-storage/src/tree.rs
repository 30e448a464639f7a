//! Directory tree built from the hrefs of a `PROPFIND` multi-status response.
//!
//! A [`DirectoryNode::Leaf`] marks a file and serializes as JSON `null`;
//! a [`DirectoryNode::Directory`] serializes as an object keyed by segment
//! name. A segment is treated as a file when it contains a `.`.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use url::Url;

use crate::path::{decode, trim_slashes};

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryNode {
    /// A file.
    Leaf,
    /// A directory and the children listed so far.
    Directory(BTreeMap<String, DirectoryNode>),
}

impl Default for DirectoryNode {
    fn default() -> Self {
        Self::empty()
    }
}

impl DirectoryNode {
    /// A directory without children.
    pub fn empty() -> Self {
        Self::Directory(BTreeMap::new())
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf)
    }

    /// Children of a directory; `None` for a file.
    pub fn children(&self) -> Option<&BTreeMap<String, DirectoryNode>> {
        match self {
            Self::Directory(children) => Some(children),
            Self::Leaf => None,
        }
    }

    /// Child named `name`, if this is a directory that has one.
    pub fn get(&self, name: &str) -> Option<&DirectoryNode> {
        self.children().and_then(|children| children.get(name))
    }

    /// Insert a `/`-separated path relative to this node.
    ///
    /// Intermediate segments become directories (a file in the way is turned
    /// into a directory). The final segment becomes a file when it contains
    /// a `.`, otherwise an empty directory; existing entries are kept.
    pub fn insert_path(&mut self, relative: &str) {
        let segments: Vec<&str> = relative.split('/').filter(|s| !s.is_empty()).collect();
        if segments.is_empty() {
            return;
        }

        if self.is_leaf() {
            *self = Self::empty();
        }

        if let Self::Directory(children) = self {
            insert_segments(children, &segments);
        }
    }
}

fn insert_segments(children: &mut BTreeMap<String, DirectoryNode>, segments: &[&str]) {
    match segments {
        [] => {}
        [name] => {
            if name.contains('.') {
                children.entry((*name).to_string()).or_insert(DirectoryNode::Leaf);
            } else {
                children
                    .entry((*name).to_string())
                    .or_insert_with(DirectoryNode::empty);
            }
        }
        [name, rest @ ..] => {
            let child = children
                .entry((*name).to_string())
                .or_insert_with(DirectoryNode::empty);
            if child.is_leaf() {
                *child = DirectoryNode::empty();
            }
            if let DirectoryNode::Directory(grandchildren) = child {
                insert_segments(grandchildren, rest);
            }
        }
    }
}

impl Serialize for DirectoryNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Leaf => serializer.serialize_none(),
            Self::Directory(children) => children.serialize(serializer),
        }
    }
}

/// Build the listing of `directory` from raw multi-status hrefs.
///
/// `base_path` is the decoded path of the WebDAV base URL; hrefs that carry
/// it are made relative to the container first.
pub fn build_tree<'a, I>(hrefs: I, directory: &str, base_path: &str) -> DirectoryNode
where
    I: IntoIterator<Item = &'a str>,
{
    let directory = trim_slashes(directory);
    let base_path = trim_slashes(base_path);

    let mut root = DirectoryNode::empty();
    for href in hrefs {
        if let Some(relative) = relative_path(href, directory, base_path) {
            root.insert_path(&relative);
        }
    }
    root
}

/// Path of `href` below `directory`, or `None` for the directory itself.
pub fn relative_path(href: &str, directory: &str, base_path: &str) -> Option<String> {
    let decoded = decode(&href_path(href));
    let mut href = trim_slashes(&decoded);

    if !base_path.is_empty() {
        if let Some(rest) = strip_segment_prefix(href, base_path) {
            href = trim_slashes(rest);
        }
    }

    if href == directory {
        return None;
    }

    let relative = if directory.is_empty() {
        href
    } else {
        strip_segment_prefix(href, directory).unwrap_or(href)
    };

    let relative = trim_slashes(relative);
    if relative.is_empty() {
        None
    } else {
        Some(relative.to_string())
    }
}

/// Servers may answer with absolute URLs instead of absolute paths.
fn href_path(href: &str) -> Cow<'_, str> {
    match Url::parse(href.trim()) {
        Ok(url) if url.has_host() => Cow::Owned(url.path().to_string()),
        _ => Cow::Borrowed(href.trim()),
    }
}

/// Strip `prefix` only when it ends on a segment boundary.
fn strip_segment_prefix<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = value.strip_prefix(prefix)?;
    if rest.is_empty() || rest.starts_with('/') {
        Some(rest)
    } else {
        None
    }
}
