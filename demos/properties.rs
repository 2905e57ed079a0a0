use edgio::api::properties::Properties;
use edgio::api::Page;
use edgio::{ApiScope, EdgioApi};

fn main() {
    let mut edgio = EdgioApi::from_env_values();
    edgio
        .authenticate(ApiScope::Accounts)
        .expect("Failed to authenticate");

    let organization_id = std::env::var("EDGIO_ORGANIZATION_ID").unwrap_or_default();

    let properties = Properties::new(&edgio);
    let page = Page {
        page: 1,
        page_size: 10,
    };

    let listing = properties
        .list(&page, &organization_id)
        .expect("Failed to list properties");

    println!(
        "{} of {} properties:",
        listing.items.len(),
        listing.total_items
    );
    for property in listing.items {
        println!("{} ({})", property.slug, property.id);
    }
}
