// src/services/catalog.rs
use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Kingdom {
    Animalia,
    Plantae,
    Fungi,
    Protista,
    Archaea,
    Bacteria,
}

/// A species row as stored by the records backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub id: i64,
    pub scientific_name: String,
    #[serde(default)]
    pub common_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub kingdom: Kingdom,
    #[serde(default)]
    pub total_population: Option<i64>,
    #[serde(default)]
    pub endangered: bool,
    #[serde(default)]
    pub image: Option<String>,
    pub author: String,
    #[serde(default)]
    pub user_created: bool,
}

impl Species {
    fn matches(&self, needle: &str) -> bool {
        let contains = |field: Option<&str>| {
            field
                .map(|text| text.to_lowercase().contains(needle))
                .unwrap_or(false)
        };
        contains(Some(&self.scientific_name))
            || contains(self.common_name.as_deref())
            || contains(self.description.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub display_name: String,
    pub email: String,
    #[serde(default)]
    pub biography: Option<String>,
}

/// Timestamps are kept as the backend's RFC 3339 text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub species_id: i64,
    pub author_id: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentWithAuthor {
    #[serde(flatten)]
    pub comment: Comment,
    pub author_profile: Option<Profile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesWithAuthor {
    #[serde(flatten)]
    pub species: Species,
    pub author_profile: Option<Profile>,
    pub comments: Vec<CommentWithAuthor>,
}

/// On-disk layout of the catalogue file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub species: Vec<Species>,
    #[serde(default)]
    pub profiles: Vec<Profile>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// Read-only view of the records backend, loaded at startup.
///
/// Species are joined with their author and comments and kept newest id
/// first; profiles are kept sorted by display name.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    species: Vec<SpeciesWithAuthor>,
    profiles: Vec<Profile>,
}

impl Catalog {
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        let CatalogSnapshot { species, mut profiles, comments } = snapshot;

        let by_id: HashMap<&str, &Profile> =
            profiles.iter().map(|p| (p.id.as_str(), p)).collect();
        let author = |id: &str| by_id.get(id).map(|p| (*p).clone());

        let mut comments_by_species: HashMap<i64, Vec<CommentWithAuthor>> = HashMap::new();
        for comment in comments {
            let author_profile = author(&comment.author_id);
            comments_by_species
                .entry(comment.species_id)
                .or_default()
                .push(CommentWithAuthor { comment, author_profile });
        }

        let mut species: Vec<SpeciesWithAuthor> = species
            .into_iter()
            .map(|species| {
                let mut comments = comments_by_species.remove(&species.id).unwrap_or_default();
                comments.sort_by(|a, b| b.comment.created_at.cmp(&a.comment.created_at));
                SpeciesWithAuthor {
                    author_profile: author(&species.author),
                    comments,
                    species,
                }
            })
            .collect();
        species.sort_by(|a, b| b.species.id.cmp(&a.species.id));

        profiles.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        Self { species, profiles }
    }

    /// A missing file gives an empty catalogue; bad JSON is an error.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "species catalogue not found, starting empty");
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("reading species catalogue {}", path.display()));
            }
        };

        let snapshot: CatalogSnapshot = serde_json::from_str(&raw)
            .with_context(|| format!("parsing species catalogue {}", path.display()))?;
        info!(
            species = snapshot.species.len(),
            profiles = snapshot.profiles.len(),
            comments = snapshot.comments.len(),
            "species catalogue loaded"
        );
        Ok(Self::new(snapshot))
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&SpeciesWithAuthor> {
        self.species.iter().find(|s| s.species.id == id)
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    /// Case-insensitive substring search over scientific name, common name
    /// and description. A blank query returns every record.
    pub fn search(&self, query: &str) -> Vec<&SpeciesWithAuthor> {
        if query.trim().is_empty() {
            return self.species.iter().collect();
        }
        let needle = query.to_lowercase();
        self.species
            .iter()
            .filter(|s| s.species.matches(&needle))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn species(id: i64, scientific: &str, common: Option<&str>, description: Option<&str>) -> Species {
        Species {
            id,
            scientific_name: scientific.to_string(),
            common_name: common.map(str::to_string),
            description: description.map(str::to_string),
            kingdom: Kingdom::Animalia,
            total_population: None,
            endangered: false,
            image: None,
            author: "author-1".to_string(),
            user_created: false,
        }
    }

    fn profile(id: &str, name: &str) -> Profile {
        Profile {
            id: id.to_string(),
            display_name: name.to_string(),
            email: format!("{id}@example.org"),
            biography: None,
        }
    }

    fn comment(id: i64, species_id: i64, author_id: &str, created_at: &str) -> Comment {
        Comment {
            id,
            species_id,
            author_id: author_id.to_string(),
            content: format!("comment {id}"),
            created_at: created_at.to_string(),
            updated_at: created_at.to_string(),
        }
    }

    fn sample() -> Catalog {
        Catalog::new(CatalogSnapshot {
            species: vec![
                species(1, "Panthera tigris", Some("Tiger"), Some("Largest living cat")),
                species(2, "Acinonyx jubatus", Some("Cheetah"), None),
                species(3, "Quercus robur", None, Some("A deciduous oak")),
            ],
            profiles: vec![profile("author-2", "Zoe"), profile("author-1", "Ada")],
            comments: vec![
                comment(10, 1, "author-2", "2024-03-01T10:00:00+00:00"),
                comment(11, 1, "ghost", "2024-05-01T10:00:00+00:00"),
                comment(12, 2, "author-1", "2024-04-01T10:00:00+00:00"),
            ],
        })
    }

    fn ids(found: &[&SpeciesWithAuthor]) -> Vec<i64> {
        found.iter().map(|s| s.species.id).collect()
    }

    #[test]
    fn blank_query_returns_everything_newest_first() {
        let catalog = sample();
        assert_eq!(ids(&catalog.search("")), vec![3, 2, 1]);
        assert_eq!(ids(&catalog.search("   ")), vec![3, 2, 1]);
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let catalog = sample();

        assert_eq!(ids(&catalog.search("PANTHERA")), vec![1]);
        assert_eq!(ids(&catalog.search("cheetah")), vec![2]);
        assert_eq!(ids(&catalog.search("oak")), vec![3]);
        assert_eq!(ids(&catalog.search("cat")), vec![1]);
        assert!(catalog.search("zebra").is_empty());
    }

    #[test]
    fn query_is_not_trimmed_before_matching() {
        let catalog = sample();
        assert!(catalog.search(" tiger ").is_empty());
    }

    #[test]
    fn species_carry_author_and_comments() {
        let catalog = sample();
        let tiger = catalog.get(1).unwrap();

        assert_eq!(tiger.author_profile.as_ref().map(|p| p.display_name.as_str()), Some("Ada"));
        let comment_ids: Vec<i64> = tiger.comments.iter().map(|c| c.comment.id).collect();
        assert_eq!(comment_ids, vec![11, 10]);
        assert!(tiger.comments[0].author_profile.is_none());
        assert_eq!(
            tiger.comments[1].author_profile.as_ref().map(|p| p.id.as_str()),
            Some("author-2")
        );

        assert!(catalog.get(3).unwrap().comments.is_empty());
        assert!(catalog.get(42).is_none());
    }

    #[test]
    fn profiles_sorted_by_display_name() {
        let catalog = sample();
        let names: Vec<&str> = catalog.profiles().iter().map(|p| p.display_name.as_str()).collect();
        assert_eq!(names, vec!["Ada", "Zoe"]);
    }

    #[test]
    fn missing_file_is_an_empty_catalog() {
        let catalog = Catalog::from_json_file(Path::new("does/not/exist.json")).unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.profiles().is_empty());
    }

    #[test]
    fn snapshot_sections_and_optional_fields_default() {
        let raw = r#"{"species": [{"id": 7, "scientific_name": "Ursus arctos", "kingdom": "Animalia", "author": "u"}]}"#;
        let snapshot: CatalogSnapshot = serde_json::from_str(raw).unwrap();
        assert!(!snapshot.species[0].endangered);
        assert!(snapshot.species[0].common_name.is_none());
        assert!(snapshot.profiles.is_empty());
        assert!(snapshot.comments.is_empty());
    }

    #[test]
    fn joined_species_serializes_flat() {
        let catalog = sample();
        let value = serde_json::to_value(catalog.get(2).unwrap()).unwrap();
        assert_eq!(value["scientific_name"], "Acinonyx jubatus");
        assert_eq!(value["author_profile"]["display_name"], "Ada");
        assert_eq!(value["comments"][0]["content"], "comment 12");
        assert_eq!(value["comments"][0]["author_profile"]["display_name"], "Ada");
    }
}
