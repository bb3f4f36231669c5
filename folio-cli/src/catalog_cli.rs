//! Folio catalog CLI commands
//!
//! Lists the merged catalog (uploaded + curated), inspects single projects
//! and submits new ones through the same validation as the admin form.

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::{Parser, Subcommand};
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

use folio_core::catalog::{CatalogService, CatalogView, SubmissionForm};
use folio_core::config::SiteConfig;
use folio_core::project::{Orientation, Project};

/// Catalog subcommand for browsing and submitting projects
#[derive(Parser, Debug)]
pub struct CatalogCommand {
    #[clap(subcommand)]
    pub command: CatalogSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CatalogSubcommand {
    /// List projects, uploaded first
    List {
        /// Only show projects in this category
        #[clap(long)]
        category: Option<String>,

        /// Show every project instead of the first page
        #[clap(long)]
        all: bool,

        /// Output results as JSON
        #[clap(long)]
        json: bool,
    },

    /// List categories in display order
    Categories {
        /// Output as JSON
        #[clap(long)]
        json: bool,
    },

    /// Show a single project
    Show {
        /// Project id
        id: String,

        /// Output as JSON
        #[clap(long)]
        json: bool,
    },

    /// Upload a new project
    Submit {
        /// Image link (Drive sharing links are converted)
        #[clap(long)]
        link: String,

        #[clap(long)]
        title: String,

        #[clap(long)]
        category: String,

        #[clap(long)]
        description: Option<String>,

        #[clap(long)]
        client: Option<String>,

        /// Defaults to the current year
        #[clap(long)]
        year: Option<String>,

        /// Comma separated, e.g. "Photoshop, Illustrator"
        #[clap(long)]
        tools: Option<String>,

        /// Comma separated
        #[clap(long)]
        tags: Option<String>,

        /// portrait, landscape or square
        #[clap(long)]
        orientation: Option<Orientation>,
    },
}

impl CatalogCommand {
    pub async fn execute(self, config: &SiteConfig) -> Result<()> {
        let service = CatalogService::from_config(config)?;

        match self.command {
            CatalogSubcommand::List {
                category,
                all,
                json,
            } => execute_list(&service, config, category.as_deref(), all, json).await,
            CatalogSubcommand::Categories { json } => execute_categories(&service, json).await,
            CatalogSubcommand::Show { id, json } => execute_show(&service, &id, json).await,
            CatalogSubcommand::Submit {
                link,
                title,
                category,
                description,
                client,
                year,
                tools,
                tags,
                orientation,
            } => {
                let form = SubmissionForm {
                    image_link: link,
                    title,
                    category,
                    description: description.unwrap_or_default(),
                    client: client.unwrap_or_default(),
                    year: year.unwrap_or_default(),
                    tools: tools.unwrap_or_default(),
                    tags: tags.unwrap_or_default(),
                    orientation: orientation.unwrap_or_default(),
                };
                execute_submit(&service, form).await
            }
        }
    }
}

/// Table row for project listings
#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Year")]
    year: String,
    #[tabled(rename = "Source")]
    source: String,
}

impl From<&Project> for ProjectRow {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id.clone(),
            title: project.title.clone(),
            category: project.category.clone(),
            year: project.year.clone().unwrap_or_default(),
            source: if project.is_dynamic() {
                "uploaded".to_string()
            } else {
                "curated".to_string()
            },
        }
    }
}

/// Fetch the merged catalog, noting on stderr when it is degraded
async fn fetch_view(service: &CatalogService) -> CatalogView {
    let listing = service.list_all().await;
    if let Some(failure) = &listing.failure {
        eprintln!("Warning: could not reach the project store ({failure}); showing curated projects only.");
    }
    CatalogView::new(listing.into_projects())
}

async fn execute_list(
    service: &CatalogService,
    config: &SiteConfig,
    category: Option<&str>,
    all: bool,
    json_output: bool,
) -> Result<()> {
    let mut view = fetch_view(service)
        .await
        .with_page_size(config.catalog.page_size);

    if let Some(category) = category {
        view.select_category(category);
    }
    if all {
        view.show_more();
    }

    let displayed = view.displayed();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&displayed)?);
        return Ok(());
    }

    if displayed.is_empty() {
        println!("No projects found.");
        return Ok(());
    }

    let rows: Vec<ProjectRow> = displayed.iter().map(|p| ProjectRow::from(*p)).collect();
    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string();
    println!("{table}");

    if view.has_more() {
        println!(
            "\nShowing {} of {} projects. Use --all to show more.",
            displayed.len(),
            view.filtered().len()
        );
    }

    Ok(())
}

async fn execute_categories(service: &CatalogService, json_output: bool) -> Result<()> {
    let view = fetch_view(service).await;
    let labels = view.category_labels();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&labels)?);
    } else {
        for label in labels {
            println!("{label}");
        }
    }

    Ok(())
}

async fn execute_show(service: &CatalogService, id: &str, json_output: bool) -> Result<()> {
    let mut view = fetch_view(service).await;
    let project = view
        .open(id)
        .with_context(|| format!("Project '{id}' not found in catalog"))?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(project)?);
        return Ok(());
    }

    println!("{}", project.title);
    println!("Category:    {}", project.category);
    if let Some(client) = &project.client {
        println!("Client:      {client}");
    }
    if let Some(year) = &project.year {
        println!("Year:        {year}");
    }
    println!("Orientation: {}", project.layout());
    println!("Image:       {}", project.image_url);
    if !project.tools.is_empty() {
        println!("Tools:       {}", project.tools.join(", "));
    }
    if !project.tags.is_empty() {
        println!("Tags:        {}", project.tags.join(", "));
    }
    if let Some(description) = &project.description {
        println!("\n{description}");
    }

    Ok(())
}

async fn execute_submit(service: &CatalogService, form: SubmissionForm) -> Result<()> {
    if let Err(e) = form.validate() {
        anyhow::bail!("{} ({})", e.user_message(), e);
    }

    let year = chrono::Local::now().year().to_string();
    let details = form.to_details(Some(&year));

    println!("Image: {}", form.preview_link(service.normalizer()));

    match service.submit(&form.image_link, &details).await {
        Ok(id) => {
            println!("Project uploaded successfully! ({id})");
            Ok(())
        }
        Err(e) => anyhow::bail!("{}", e.user_message()),
    }
}
