//! Browsing state over a fetched catalog
//!
//! Category filtering, the "show more" cutoff and the detail overlay are
//! display concerns; the service hands over the full merged list and this
//! view narrows it.

use crate::project::Project;

/// Label of the catch-all category filter
pub const ALL_CATEGORIES: &str = "All";

/// Entries shown before "show more"
pub const INITIAL_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Filter for a category button label
    pub fn from_label(label: &str) -> Self {
        if label == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Only(category) => category,
        }
    }

    pub fn matches(&self, project: &Project) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => project.category == *category,
        }
    }
}

/// Distinct categories in first-seen order
pub fn categories(projects: &[Project]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for project in projects {
        if !seen.iter().any(|c| c == &project.category) {
            seen.push(project.category.clone());
        }
    }
    seen
}

/// Projects matching `filter`, relative order preserved
pub fn filter_by_category<'a>(projects: &'a [Project], filter: &CategoryFilter) -> Vec<&'a Project> {
    projects.iter().filter(|p| filter.matches(p)).collect()
}

/// Browse state for the portfolio grid
#[derive(Debug, Clone)]
pub struct CatalogView {
    projects: Vec<Project>,
    filter: CategoryFilter,
    show_all: bool,
    page_size: usize,
    selected: Option<String>,
}

impl CatalogView {
    pub fn new(projects: Vec<Project>) -> Self {
        Self {
            projects,
            filter: CategoryFilter::All,
            show_all: false,
            page_size: INITIAL_LIMIT,
            selected: None,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Filter button labels: `All` followed by each category
    pub fn category_labels(&self) -> Vec<String> {
        std::iter::once(ALL_CATEGORIES.to_string())
            .chain(categories(&self.projects))
            .collect()
    }

    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    /// Switch category; collapses "show more"
    pub fn select_category(&mut self, label: &str) {
        self.filter = CategoryFilter::from_label(label);
        self.show_all = false;
    }

    pub fn filtered(&self) -> Vec<&Project> {
        filter_by_category(&self.projects, &self.filter)
    }

    /// What the grid renders right now
    pub fn displayed(&self) -> Vec<&Project> {
        let filtered = self.filtered();
        if self.show_all {
            filtered
        } else {
            filtered.into_iter().take(self.page_size).collect()
        }
    }

    /// Whether a "show more" control is warranted
    pub fn has_more(&self) -> bool {
        !self.show_all && self.filtered().len() > self.page_size
    }

    pub fn show_more(&mut self) {
        self.show_all = true;
    }

    pub fn is_showing_all(&self) -> bool {
        self.show_all
    }

    /// Open the detail overlay for a project; `None` if the id is unknown
    pub fn open(&mut self, id: &str) -> Option<&Project> {
        let index = self.projects.iter().position(|p| p.id == id)?;
        self.selected = Some(id.to_string());
        self.projects.get(index)
    }

    pub fn close(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&Project> {
        let id = self.selected.as_deref()?;
        self.projects.iter().find(|p| p.id == id)
    }
}
