//! File-backed document sources.

use crate::error::{PulseError, Result};
use crate::source::{Document, DocumentSource, SortOrder, SourceQuery};
use log::debug;
use serde::Deserialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

fn unavailable(path: &Path, err: impl std::fmt::Display) -> PulseError {
    PulseError::SourceUnavailable(format!("{}: {}", path.display(), err))
}

/// Reads one document per line from a file, or from stdin when the path is `-`.
///
/// Blank lines are skipped. Ids are `"{collection}-{line}"` with 1-based line
/// numbers. Plain lines carry no score or timestamp, so the query order is
/// not applied.
#[derive(Debug, Clone)]
pub struct LineFileSource {
    path: PathBuf,
}

impl LineFileSource {
    /// Creates a source over `path`.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    fn collect<R: BufRead>(reader: R, query: &SourceQuery) -> io::Result<Vec<Document>> {
        let mut documents = Vec::new();
        for (line_no, line) in reader.lines().enumerate() {
            if documents.len() >= query.count {
                break;
            }
            let line = line?;
            let text = line.trim();
            if text.is_empty() {
                continue;
            }
            documents.push(Document::new(
                format!("{}-{}", query.collection, line_no + 1),
                text,
            ));
        }
        Ok(documents)
    }
}

impl DocumentSource for LineFileSource {
    fn fetch(&self, query: &SourceQuery) -> Result<Vec<Document>> {
        let read = if self.path.as_os_str() == "-" {
            Self::collect(io::stdin().lock(), query)
        } else {
            let file = File::open(&self.path).map_err(|e| unavailable(&self.path, e))?;
            Self::collect(BufReader::new(file), query)
        };
        let documents = read.map_err(|e| unavailable(&self.path, e))?;

        debug!("Read {} documents from {}", documents.len(), self.path.display());
        Ok(documents)
    }
}

#[derive(Debug, Deserialize)]
struct Post {
    #[serde(default)]
    id: Option<String>,
    title: String,
    #[serde(default)]
    score: Option<i64>,
    #[serde(default)]
    created_utc: Option<f64>,
    #[serde(default)]
    subreddit: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Child {
    data: Post,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListingFile {
    Listing { data: ListingData },
    Posts(Vec<Post>),
}

impl ListingFile {
    fn into_posts(self) -> Vec<Post> {
        match self {
            ListingFile::Listing { data } => data.children.into_iter().map(|c| c.data).collect(),
            ListingFile::Posts(posts) => posts,
        }
    }
}

/// Reads posts from a JSON listing export.
///
/// Accepts either a listing object (`{"data": {"children": [{"data": post}]}}`)
/// or a bare array of post objects. Each post needs a `title`; `id`, `score`,
/// `created_utc` and `subreddit` are optional.
///
/// Posts that name a different collection are dropped. [`SortOrder::Top`]
/// orders by score, [`SortOrder::New`] by creation time, both descending and
/// stable; posts missing the field sort last.
#[derive(Debug, Clone)]
pub struct ListingFileSource {
    path: PathBuf,
}

impl ListingFileSource {
    /// Creates a source over `path`.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    fn select(posts: Vec<Post>, query: &SourceQuery) -> Vec<Document> {
        let mut posts: Vec<Post> = posts
            .into_iter()
            .filter(|p| {
                p.subreddit
                    .as_deref()
                    .map(|s| s.eq_ignore_ascii_case(&query.collection))
                    .unwrap_or(true)
            })
            .collect();

        match query.order {
            SortOrder::Top => posts.sort_by(|a, b| b.score.cmp(&a.score)),
            SortOrder::New => posts.sort_by(|a, b| {
                let a = a.created_utc.unwrap_or(f64::NEG_INFINITY);
                let b = b.created_utc.unwrap_or(f64::NEG_INFINITY);
                b.total_cmp(&a)
            }),
        }

        posts
            .into_iter()
            .take(query.count)
            .enumerate()
            .map(|(i, post)| {
                let id = post
                    .id
                    .unwrap_or_else(|| format!("{}-{}", query.collection, i + 1));
                let mut doc = Document::new(id, post.title);
                if let Some(score) = post.score {
                    doc = doc.with_score(score);
                }
                if let Some(created) = post.created_utc {
                    doc = doc.with_created_utc(created);
                }
                doc
            })
            .collect()
    }
}

impl DocumentSource for ListingFileSource {
    fn fetch(&self, query: &SourceQuery) -> Result<Vec<Document>> {
        let file = File::open(&self.path).map_err(|e| unavailable(&self.path, e))?;
        let listing: ListingFile =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| unavailable(&self.path, e))?;

        let posts = listing.into_posts();
        debug!("Listing {} holds {} posts", self.path.display(), posts.len());
        Ok(Self::select(posts, query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_line_source() {
        let file = write_temp("First title\n\n  Second title  \nThird\n");
        let source = LineFileSource::new(file.path());
        let docs = source
            .fetch(&SourceQuery::new("gradschool", 2, SortOrder::Top))
            .unwrap();

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id(), "gradschool-1");
        assert_eq!(docs[1].id(), "gradschool-3");
        assert_eq!(docs[1].text(), "Second title");
    }

    #[test]
    fn test_line_source_missing_file() {
        let source = LineFileSource::new("/no/such/titles.txt");
        let err = source
            .fetch(&SourceQuery::new("x", 10, SortOrder::Top))
            .unwrap_err();
        assert!(matches!(err, PulseError::SourceUnavailable(_)));
    }

    const LISTING: &str = r#"{
        "kind": "Listing",
        "data": {
            "children": [
                {"kind": "t3", "data": {"id": "a", "title": "Old and loved", "score": 50, "created_utc": 100.0, "subreddit": "gradschool"}},
                {"kind": "t3", "data": {"id": "b", "title": "Newest", "score": 5, "created_utc": 300.0, "subreddit": "GradSchool"}},
                {"kind": "t3", "data": {"id": "c", "title": "Elsewhere", "score": 999, "created_utc": 200.0, "subreddit": "AskAcademia"}},
                {"kind": "t3", "data": {"id": "d", "title": "Middle", "score": 20, "created_utc": 200.0}}
            ]
        }
    }"#;

    #[test]
    fn test_listing_top_order() {
        let file = write_temp(LISTING);
        let source = ListingFileSource::new(file.path());
        let docs = source
            .fetch(&SourceQuery::new("gradschool", 10, SortOrder::Top))
            .unwrap();

        let ids: Vec<&str> = docs.iter().map(|d| d.id()).collect();
        assert_eq!(ids, vec!["a", "d", "b"]);
        assert_eq!(docs[0].score(), Some(50));
    }

    #[test]
    fn test_listing_new_order_and_count() {
        let file = write_temp(LISTING);
        let source = ListingFileSource::new(file.path());
        let docs = source
            .fetch(&SourceQuery::new("gradschool", 2, SortOrder::New))
            .unwrap();

        let ids: Vec<&str> = docs.iter().map(|d| d.id()).collect();
        assert_eq!(ids, vec!["b", "d"]);
    }

    #[test]
    fn test_bare_post_array() {
        let file = write_temp(r#"[{"title": "no id here"}, {"title": "nor here"}]"#);
        let source = ListingFileSource::new(file.path());
        let docs = source
            .fetch(&SourceQuery::new("phd", 5, SortOrder::Top))
            .unwrap();

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id(), "phd-1");
        assert_eq!(docs[0].text(), "no id here");
    }

    #[test]
    fn test_malformed_listing() {
        let file = write_temp(r#"{"data": {"children": [{"data": {"score": 1}}]}}"#);
        let source = ListingFileSource::new(file.path());
        let err = source
            .fetch(&SourceQuery::new("x", 5, SortOrder::Top))
            .unwrap_err();
        assert!(matches!(err, PulseError::SourceUnavailable(_)));
    }
}
