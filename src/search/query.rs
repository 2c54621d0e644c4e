//! Search form fields.

use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::config::{MANAGE_PATH, SEARCH_PATH};

/// Resource type filter of the search form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum ObjectType {
    Audiovisual,
    Collection,
    Dataset,
    Event,
    Image,
    InteractiveResource,
    Model,
    PhysicalObject,
    Service,
    Software,
    Sound,
    Text,
    Workflow,
    Other,
}

/// Identifier scheme filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum IdentifierType {
    Ark,
    Doi,
}

/// Identifier status filter (manage page only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum IdStatus {
    Public,
    Reserved,
    Unavailable,
}

/// Which page a search runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTarget {
    /// Public search over all identifiers
    Search,
    /// The signed-in account's identifiers
    Manage,
}

impl SearchTarget {
    pub fn path(&self) -> &'static str {
        match self {
            SearchTarget::Search => SEARCH_PATH,
            SearchTarget::Manage => MANAGE_PATH,
        }
    }
}

/// Extra filters only the manage page understands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManageFilters {
    pub target: Option<String>,
    pub create_time_from: Option<String>,
    pub create_time_to: Option<String>,
    pub update_time_from: Option<String>,
    pub update_time_to: Option<String>,
    pub id_status: Option<IdStatus>,
    pub harvesting: Option<bool>,
    pub has_metadata: Option<bool>,
    pub owner_selected: Option<String>,
}

/// A filled-in search form.
///
/// Unset fields are left out of the request. Setting `manage` sends the
/// query to the manage page with the extra filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub keywords: Option<String>,
    pub identifier: Option<String>,
    pub title: Option<String>,
    pub creator: Option<String>,
    pub publisher: Option<String>,
    pub pubyear_from: Option<String>,
    pub pubyear_to: Option<String>,
    pub object_type: Option<ObjectType>,
    pub id_type: Option<IdentifierType>,
    /// Hidden form field; the page sends `t`
    pub filtered: Option<String>,
    pub manage: Option<ManageFilters>,
}

fn form_bool(value: bool) -> String {
    let text = if value { "True" } else { "False" };
    text.to_string()
}

impl SearchQuery {
    /// A keyword-only public search.
    pub fn with_keywords(keywords: impl Into<String>) -> Self {
        Self {
            keywords: Some(keywords.into()),
            ..Default::default()
        }
    }

    pub fn target(&self) -> SearchTarget {
        if self.manage.is_some() {
            SearchTarget::Manage
        } else {
            SearchTarget::Search
        }
    }

    /// Form parameters for every field that is set, in form order.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params: Vec<(&'static str, String)> = Vec::new();
        let mut text = |name: &'static str, value: &Option<String>| {
            if let Some(value) = value {
                params.push((name, value.clone()));
            }
        };
        text("keywords", &self.keywords);
        text("identifier", &self.identifier);
        text("title", &self.title);
        text("creator", &self.creator);
        text("publisher", &self.publisher);
        text("pubyear_from", &self.pubyear_from);
        text("pubyear_to", &self.pubyear_to);

        if let Some(object_type) = self.object_type {
            params.push(("object_type", object_type.to_string()));
        }
        if let Some(id_type) = self.id_type {
            params.push(("id_type", id_type.to_string()));
        }
        if let Some(filtered) = &self.filtered {
            params.push(("filtered", filtered.clone()));
        }

        if let Some(manage) = &self.manage {
            let optional = [
                ("target", &manage.target),
                ("create_time_from", &manage.create_time_from),
                ("create_time_to", &manage.create_time_to),
                ("update_time_from", &manage.update_time_from),
                ("update_time_to", &manage.update_time_to),
            ];
            for (name, value) in optional {
                if let Some(value) = value {
                    params.push((name, value.clone()));
                }
            }
            if let Some(id_status) = manage.id_status {
                params.push(("id_status", id_status.to_string()));
            }
            if let Some(harvesting) = manage.harvesting {
                params.push(("harvesting", form_bool(harvesting)));
            }
            if let Some(has_metadata) = manage.has_metadata {
                params.push(("hasMetadata", form_bool(has_metadata)));
            }
            if let Some(owner) = &manage.owner_selected {
                params.push(("owner_selected", owner.clone()));
            }
        }
        params
    }
}
