use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use super::{
    account::AccountProfile,
    ids::{AccountId, CommentId, MagazineId},
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MagazineError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("Comment text is required")]
    EmptyComment,
}

fn required(field: &'static str, raw: &str) -> Result<String, MagazineError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(MagazineError::MissingField(field))
    } else {
        Ok(trimmed.to_owned())
    }
}

fn supplied(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn categories_from(raw: Vec<String>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    raw.into_iter()
        .map(|category| category.trim().to_owned())
        .filter(|category| !category.is_empty() && seen.insert(category.clone()))
        .collect()
}

/// Validated payload for a new magazine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMagazine {
    pub title: String,
    pub description: String,
    pub categories: Vec<String>,
    pub file_url: String,
    pub cover_image_url: String,
}

impl NewMagazine {
    pub fn parse(
        title: &str,
        description: &str,
        categories: Vec<String>,
        file_url: &str,
        cover_image_url: &str,
    ) -> Result<Self, MagazineError> {
        let categories = categories_from(categories);
        if categories.is_empty() {
            return Err(MagazineError::MissingField("categories"));
        }
        Ok(Self {
            title: required("title", title)?,
            description: required("description", description)?,
            categories,
            file_url: required("fileUrl", file_url)?,
            cover_image_url: required("coverImageUrl", cover_image_url)?,
        })
    }
}

/// Partial update. Blank strings and empty category lists count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MagazinePatch {
    title: Option<String>,
    description: Option<String>,
    categories: Option<Vec<String>>,
    file_url: Option<String>,
    cover_image_url: Option<String>,
}

impl MagazinePatch {
    pub fn new(
        title: Option<String>,
        description: Option<String>,
        categories: Option<Vec<String>>,
        file_url: Option<String>,
        cover_image_url: Option<String>,
    ) -> Self {
        Self {
            title: supplied(title),
            description: supplied(description),
            categories: categories
                .map(categories_from)
                .filter(|categories| !categories.is_empty()),
            file_url: supplied(file_url),
            cover_image_url: supplied(cover_image_url),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentText(String);

impl CommentText {
    pub fn parse(raw: &str) -> Result<Self, MagazineError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(MagazineError::EmptyComment);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub user: AccountId,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Magazine {
    pub id: MagazineId,
    pub title: String,
    pub description: String,
    pub categories: Vec<String>,
    pub file_url: String,
    pub cover_image_url: String,
    pub uploaded_by: AccountId,
    pub likes: Vec<AccountId>,
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Magazine {
    pub fn publish(new: NewMagazine, owner: AccountId, now: DateTime<Utc>) -> Self {
        Self {
            id: MagazineId::new(),
            title: new.title,
            description: new.description,
            categories: new.categories,
            file_url: new.file_url,
            cover_image_url: new.cover_image_url,
            uploaded_by: owner,
            likes: Vec::new(),
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, account: AccountId) -> bool {
        self.uploaded_by == account
    }

    /// Adds the like when absent, removes it when present. Returns whether
    /// the account likes the magazine afterwards.
    pub fn toggle_like(&mut self, account: AccountId, now: DateTime<Utc>) -> bool {
        self.updated_at = now;
        if let Some(position) = self.likes.iter().position(|id| *id == account) {
            self.likes.remove(position);
            false
        } else {
            self.likes.push(account);
            true
        }
    }

    pub fn add_comment(&mut self, user: AccountId, text: CommentText, now: DateTime<Utc>) -> &Comment {
        self.comments.push(Comment {
            id: CommentId::new(),
            user,
            text: text.0,
            created_at: now,
        });
        self.updated_at = now;
        &self.comments[self.comments.len() - 1]
    }

    pub fn apply(&mut self, patch: MagazinePatch, now: DateTime<Utc>) {
        let MagazinePatch {
            title,
            description,
            categories,
            file_url,
            cover_image_url,
        } = patch;
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(categories) = categories {
            self.categories = categories;
        }
        if let Some(file_url) = file_url {
            self.file_url = file_url;
        }
        if let Some(cover_image_url) = cover_image_url {
            self.cover_image_url = cover_image_url;
        }
        self.updated_at = now;
    }

    /// Every account this magazine points at: uploader, likers and commenters.
    pub fn referenced_accounts(&self) -> BTreeSet<AccountId> {
        std::iter::once(self.uploaded_by)
            .chain(self.likes.iter().copied())
            .chain(self.comments.iter().map(|comment| comment.user))
            .collect()
    }
}

/// Listing filter. Both criteria are optional and combine with AND.
///
/// `search` is a case-insensitive substring match on title or description.
/// Regex metacharacters in it are matched literally, so `.*` only finds
/// text containing a dot followed by an asterisk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MagazineFilter {
    category: Option<String>,
    search: Option<String>,
}

impl MagazineFilter {
    pub fn new(category: Option<String>, search: Option<String>) -> Self {
        Self {
            category: supplied(category),
            search: supplied(search),
        }
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn matches(&self, magazine: &Magazine) -> bool {
        let category_ok = self
            .category
            .as_ref()
            .is_none_or(|category| magazine.categories.contains(category));
        let search_ok = self.search.as_ref().is_none_or(|search| {
            let needle = search.to_lowercase();
            magazine.title.to_lowercase().contains(&needle)
                || magazine.description.to_lowercase().contains(&needle)
        });
        category_ok && search_ok
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonView {
    pub id: AccountId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploaderView {
    pub id: AccountId,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: CommentId,
    pub user: Option<PersonView>,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// A magazine with its account references resolved to public profiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MagazineView {
    pub id: MagazineId,
    pub title: String,
    pub description: String,
    pub categories: Vec<String>,
    pub file_url: String,
    pub cover_image_url: String,
    pub uploaded_by: Option<UploaderView>,
    pub likes: Vec<PersonView>,
    pub comments: Vec<CommentView>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn person(profiles: &HashMap<AccountId, AccountProfile>, id: &AccountId) -> Option<PersonView> {
    profiles.get(id).map(|profile| PersonView {
        id: profile.id,
        name: profile.name.clone(),
    })
}

impl MagazineView {
    pub fn likes(magazine: &Magazine, profiles: &HashMap<AccountId, AccountProfile>) -> Vec<PersonView> {
        magazine
            .likes
            .iter()
            .filter_map(|id| person(profiles, id))
            .collect()
    }

    pub fn comments(
        magazine: &Magazine,
        profiles: &HashMap<AccountId, AccountProfile>,
    ) -> Vec<CommentView> {
        magazine
            .comments
            .iter()
            .map(|comment| CommentView {
                id: comment.id,
                user: person(profiles, &comment.user),
                text: comment.text.clone(),
                created_at: comment.created_at,
            })
            .collect()
    }

    /// Unknown references resolve to `None` for single refs and are dropped from lists.
    pub fn populate(magazine: &Magazine, profiles: &HashMap<AccountId, AccountProfile>) -> Self {
        Self {
            id: magazine.id,
            title: magazine.title.clone(),
            description: magazine.description.clone(),
            categories: magazine.categories.clone(),
            file_url: magazine.file_url.clone(),
            cover_image_url: magazine.cover_image_url.clone(),
            uploaded_by: profiles.get(&magazine.uploaded_by).map(|profile| UploaderView {
                id: profile.id,
                name: profile.name.clone(),
                email: profile.email.clone(),
            }),
            likes: Self::likes(magazine, profiles),
            comments: Self::comments(magazine, profiles),
            created_at: magazine.created_at,
            updated_at: magazine.updated_at,
        }
    }
}
