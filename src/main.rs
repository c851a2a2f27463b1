use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cms_search::config::Config;
use cms_search::models::{AssetType, EntityKind, MediaAsset, Page, Section, Template};
use cms_search::search::{FilterSpec, SearchRequest, SearchService};
use cms_search::state::InMemoryStore;

/// Run a content search against a seeded demo store and print the
/// response as JSON
#[derive(Parser, Debug)]
#[command(name = "cms-search", version, about)]
struct Args {
    /// Free-text query
    query: String,

    /// Entity kinds to search (page, template, media, section); all four
    /// when omitted
    #[arg(long = "kind")]
    kinds: Vec<String>,

    /// Extra filter parameters, e.g. --filter status=draft,published
    #[arg(long = "filter", value_name = "KEY=VALUE")]
    filters: Vec<String>,

    /// Result page size
    #[arg(long, default_value_t = 20)]
    limit: usize,

    /// Offset into the merged result list
    #[arg(long, default_value_t = 0)]
    offset: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cms_search=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        eprintln!("Using default configuration");
        Config::default()
    });

    let args = Args::parse();
    tracing::info!("Starting cms-search v{}", env!("CARGO_PKG_VERSION"));

    let mut params: HashMap<String, String> = HashMap::new();
    for pair in &args.filters {
        match pair.split_once('=') {
            Some((key, value)) => {
                params.insert(key.to_string(), value.to_string());
            }
            None => {
                tracing::warn!(filter = %pair, "Ignoring malformed --filter (expected key=value)")
            }
        }
    }
    let filters = FilterSpec::from_params(&params);
    for line in filters.summary() {
        tracing::info!("{}", line);
    }

    let mut kinds = Vec::new();
    for raw in &args.kinds {
        match EntityKind::from_str(raw) {
            Ok(kind) => kinds.push(kind),
            Err(_) => tracing::warn!(kind = %raw, "Ignoring unknown entity kind"),
        }
    }

    let store = Arc::new(seed_store());
    let service = SearchService::new(store, config.search);

    let request = SearchRequest {
        query: args.query,
        entity_kinds: if kinds.is_empty() { None } else { Some(kinds) },
        filters,
        limit: args.limit,
        offset: args.offset,
    };

    let response = service.search(&request).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}

/// A small demo dataset covering all four entity kinds
fn seed_store() -> InMemoryStore {
    let store = InMemoryStore::new();

    let mut home = Page::new(
        "Welcome Home".to_string(),
        "home".to_string(),
        "home".to_string(),
        "demo-author".to_string(),
    );
    home.meta_description = Some("Agency services, projects and case studies".to_string());
    home.seo_score = 92;
    home.publish();
    store.insert_page(home);

    let mut services = Page::new(
        "Our Services".to_string(),
        "services".to_string(),
        "services".to_string(),
        "demo-author".to_string(),
    );
    services.category = Some("services".to_string());
    services.meta_keywords = Some("consulting, branding, web design".to_string());
    services.publish();
    store.insert_page(services);

    store.insert_page(Page::new(
        "Unpublished Draft".to_string(),
        "draft-notes".to_string(),
        "draft-notes".to_string(),
        "demo-editor".to_string(),
    ));

    let mut landing = Template::new("Hero Landing".to_string());
    landing.description = Some("Full-width hero with call to action".to_string());
    landing.category = Some("landing".to_string());
    landing.order = 1;
    store.insert_template(landing);

    let mut blog = Template::new("Blog Post".to_string());
    blog.description = Some("Article layout with sidebar".to_string());
    blog.category = Some("blog".to_string());
    blog.order = 2;
    store.insert_template(blog);

    let mut banner = MediaAsset::new(
        "hero-banner.png".to_string(),
        AssetType::Image,
        "image/png".to_string(),
        482_113,
        "/media/hero-banner.png".to_string(),
        "demo-author".to_string(),
    );
    banner.alt_text = Some("Hero banner artwork".to_string());
    banner.tags = vec!["hero".to_string(), "homepage".to_string()];
    store.insert_media(banner);

    store.insert_media(MediaAsset::new(
        "brand-guidelines.pdf".to_string(),
        AssetType::Document,
        "application/pdf".to_string(),
        1_204_992,
        "/media/brand-guidelines.pdf".to_string(),
        "demo-editor".to_string(),
    ));

    let mut hero = Section::new(
        "home-hero".to_string(),
        "Hero Section".to_string(),
        "hero".to_string(),
    );
    hero.content = Some("Main hero section content".to_string());
    store.insert_section(hero);

    let mut cta = Section::new(
        "home-cta".to_string(),
        "Get In Touch".to_string(),
        "cta".to_string(),
    );
    cta.content = Some("Contact our team for a quote".to_string());
    cta.order = 9;
    store.insert_section(cta);

    store
}
